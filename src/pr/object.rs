//! Mirrors `object/{outline,corner_road,corner_local}.rs` and
//! `road/objects/{repeat,material,validity,markings}.rs`: one road object entry,
//! optionally carrying a repeat specification, outlines, material, validity and markings.

use uom::si::f64::Length;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRoad {
    pub id: Option<u64>,
    /// s-coordinate of the corner
    pub s: Length,
    /// t-coordinate of the corner
    pub t: Length,
    /// dz of the corner relative to the road reference line
    pub dz: Length,
    /// height of the object at this corner, along the z-axis
    pub height: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerLocal {
    pub id: Option<u64>,
    /// u-coordinate in the object's local reference frame
    pub u: Length,
    /// v-coordinate in the object's local reference frame
    pub v: Length,
    pub z: Length,
    pub height: Length,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Corner {
    Road(CornerRoad),
    Local(CornerLocal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineFillType {
    #[default]
    Grass,
    Concrete,
    Cobble,
    Asphalt,
    Pavement,
    Gravel,
    Soil,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub id: Option<u64>,
    pub closed: bool,
    pub outer: bool,
    pub fill_type: Option<OutlineFillType>,
    pub corners: Vec<Corner>,
}

/// Repeats an object along the reference line (spec §4.9 step 4 / SPEC_FULL.md §B.1).
/// Field set mirrors `road::objects::repeat::Repeat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeat {
    pub s: Length,
    pub length: Length,
    pub distance: Length,
    pub t_start: Length,
    pub t_end: Length,
    pub width_start: Option<Length>,
    pub width_end: Option<Length>,
    pub height_start: Length,
    pub height_end: Length,
    pub length_start: Option<Length>,
    pub length_end: Option<Length>,
    pub radius_start: Option<Length>,
    pub radius_end: Option<Length>,
    pub z_offset_start: Length,
    pub z_offset_end: Length,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    pub surface: Option<String>,
    pub friction: Option<f64>,
    pub roughness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub from_lane: i64,
    pub to_lane: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marking {
    pub side: Option<String>,
    pub width: Option<Length>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadObjectType {
    #[default]
    None,
    Obstacle,
    Pole,
    Tree,
    Vegetation,
    Barrier,
    Building,
    SoundBarrier,
    Crosswalk,
    StreetLamp,
    Gantry,
    ParkingSpace,
    Patch,
    Railing,
    TrafficIsland,
    Wind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadObject {
    pub id: String,
    pub object_type: RoadObjectType,
    pub name: Option<String>,
    pub s: Length,
    pub t: Length,
    pub z_offset: Length,
    pub valid_length: Length,
    pub orientation_plus: bool,
    pub length: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub radius: Option<Length>,
    pub hdg: f64,
    pub pitch: f64,
    pub roll: f64,
    pub outlines: Vec<Outline>,
    pub repeat: Vec<Repeat>,
    pub material: Option<Material>,
    pub validity: Vec<Validity>,
    pub markings: Vec<Marking>,
}
