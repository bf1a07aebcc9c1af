//! The Roadspaces object model (spec component C10): the intermediate representation
//! between PR and SB. A pure tree -- junctions reference roadspaces by identifier value,
//! never by pointer (spec §9). See DESIGN.md.

pub mod attribute;
pub mod junction;
pub mod lane;
pub mod object;

pub use attribute::{AttributeSet, AttributeValue};
pub use junction::{Connection, Junction};
pub use lane::{LongitudinalFillerSurface, RoadspaceLane, RoadspaceLaneSection};
pub use object::{RoadspaceObject, RoadspaceObjectGeometry};

use crate::curve::{Curve3D, CurveRelativeParametricSurface3D};
use crate::pr::Identifier;
use crate::range::Range;

/// One road's worth of geometry and metadata (spec §3 "Roadspace").
#[derive(Debug, Clone, PartialEq)]
pub struct Roadspace {
    pub id: Identifier,
    pub reference_line: Curve3D,
    pub road_surface: CurveRelativeParametricSurface3D,
    pub lane_sections: Vec<RoadspaceLaneSection>,
    pub filler_surfaces: Vec<LongitudinalFillerSurface>,
    pub objects: Vec<RoadspaceObject>,
    pub attributes: AttributeSet,
}

impl Roadspace {
    pub fn road_id(&self) -> &str {
        match &self.id {
            Identifier::Road { road_id } => road_id,
            other => panic!("Roadspace id must be Identifier::Road, got {other:?}"),
        }
    }

    /// The union of lane-section domains must equal the reference-line domain (spec §8
    /// testable property #4). Returns the maximum gap/overlap found, or `0.0` if none.
    pub fn lane_section_coverage_defect(&self) -> f64 {
        let domain = self.reference_line.domain();
        let mut sections: Vec<Range> = self.lane_sections.iter().map(|s| Range::closed(s.s_start, s.s_end)).collect();
        sections.sort_by(|a, b| a.lower_value().partial_cmp(&b.lower_value()).unwrap());
        let mut defect = 0.0_f64;
        if let Some(first) = sections.first() {
            defect = defect.max((first.lower_value() - domain.lower_value()).abs());
        }
        if let Some(last) = sections.last() {
            defect = defect.max((domain.upper_value() - last.upper_value()).abs());
        }
        for pair in sections.windows(2) {
            defect = defect.max((pair[1].lower_value() - pair[0].upper_value()).abs());
        }
        defect
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadspacesHeader {
    pub crs_epsg: i32,
}

/// The full Roadspaces dataset produced by C12, consumed by C13.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadspacesModel {
    pub header: RoadspacesHeader,
    pub roadspaces: Vec<Roadspace>,
    pub junctions: Vec<Junction>,
}

impl RoadspacesModel {
    pub fn roadspace(&self, road_id: &str) -> Option<&Roadspace> {
        self.roadspaces.iter().find(|r| r.road_id() == road_id)
    }
}
