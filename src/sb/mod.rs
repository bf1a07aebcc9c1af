//! The SB (surface-based city object) model (spec §3/§4.10): the output tree of C13.
//! Every city object carries a LOD2 multi-surface (or a point, for furniture/signals
//! that never got richer geometry), a feature classification, and a namespaced
//! attribute set.

use crate::roadspaces::AttributeSet;
use crate::solid::Polygon3D;

/// The roadway family a `TrafficArea`/`AuxiliaryTrafficArea` sits on (spec §4.10's
/// classification table, "SB feature" column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadFeatureFamily {
    Road,
    Railway,
}

/// `AuxiliaryTrafficArea`'s optional function tag (spec §4.10's "Type slot" column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryFunction {
    None,
    Footpath,
    Cyclepath,
}

/// What a [`CityObject`] represents, mirroring spec §4.10's classification table plus
/// the road-object mapping (CityFurniture / Building / Vegetation / GenericObject).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityObjectKind {
    TrafficArea { family: RoadFeatureFamily },
    AuxiliaryTrafficArea { family: RoadFeatureFamily, function: AuxiliaryFunction },
    CityFurniture,
    Building,
    Vegetation,
    GenericObject,
}

/// A city object's geometry: a LOD2 multi-surface for anything discretized, or a bare
/// point for furniture/signals that never resolved to a richer shape (spec §4.9 step 4
/// priority list's last tier, carried through unchanged into SB).
#[derive(Debug, Clone, PartialEq)]
pub enum CityObjectGeometry {
    MultiSurface(Vec<Polygon3D>),
    Point(crate::geom::Vector3D),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityObject {
    pub gml_id: String,
    pub kind: CityObjectKind,
    pub geometry: CityObjectGeometry,
    pub attributes: AttributeSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CityModelHeader {
    pub crs_epsg: i32,
}

/// The full SB dataset produced by C13 (spec §3 "SB dataset").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityModel {
    pub header: CityModelHeader,
    pub city_objects: Vec<CityObject>,
}
