//! Roadspace objects (spec §4.9 step 4): road-relative furniture/vegetation/building
//! entries, each carrying whichever geometry its priority-list match produced.

use crate::geom::Vector3D;
use crate::pr::object::RoadObjectType;
use crate::roadspaces::attribute::AttributeSet;
use crate::solid::{LinearRing3D, Polygon3D, Solid3D};

/// The geometry a [`RoadspaceObject`] ends up with, decided by the priority list of spec
/// §4.9 step 4. Variant order mirrors the spec's priority list; the transformer picks the
/// first that structurally applies.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadspaceObjectGeometry {
    Polyhedron(Vec<Polygon3D>),
    LinearRing(LinearRing3D),
    Solid(Solid3D),
    Point(Vector3D),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadspaceObject {
    pub id: String,
    pub object_type: RoadObjectType,
    pub name: Option<String>,
    pub geometry: RoadspaceObjectGeometry,
    pub attributes: AttributeSet,
}
