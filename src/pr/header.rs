//! Mirrors `core/header.rs`, `core/offset.rs`, `core/geo_reference.rs` of the teacher:
//! the `<header>` element is the first thing in a PR dataset. The XML marshalling glue
//! the teacher carries (`visit_attributes`, `TryFrom<ReadContext>`) is out of scope here
//! (spec §1) -- only the data shape survives.

use uom::si::f64::{Angle, Length};

/// To avoid large coordinates, an offset of the whole dataset may be applied. The dataset
/// is first translated by x/y/z, then rotated by hdg around the new origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Offset {
    pub hdg: Angle,
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Default for Offset {
    fn default() -> Self {
        Self {
            hdg: Angle::new::<uom::si::angle::radian>(0.0),
            x: Length::new::<uom::si::length::meter>(0.0),
            y: Length::new::<uom::si::length::meter>(0.0),
            z: Length::new::<uom::si::length::meter>(0.0),
        }
    }
}

/// Coordinate reference system of the dataset, carried as the raw PROJ-ish string the
/// upstream format embeds; `deriveCrsEpsgAutomatically` (spec §6) controls whether the
/// transformer tries to parse an EPSG code out of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoReference {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub rev_major: u16,
    pub rev_minor: u16,
    pub name: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub north: Option<Length>,
    pub south: Option<Length>,
    pub east: Option<Length>,
    pub west: Option<Length>,
    pub vendor: Option<String>,
    pub geo_reference: Option<GeoReference>,
    pub offset: Offset,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            rev_major: 1,
            rev_minor: 7,
            name: None,
            version: None,
            date: None,
            north: None,
            south: None,
            east: None,
            west: None,
            vendor: None,
            geo_reference: None,
            offset: Offset::default(),
        }
    }
}
