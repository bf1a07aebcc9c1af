//! A Roadspace's road body (spec §4.9 step 3): lane sections with boundary offsets
//! expressed as functions of arc length, plus the filler surfaces bridging boundary
//! discontinuities between consecutive sections.

use crate::function::UnivariateFunction;
use crate::pr::lane::{LaneSide, LaneType, RoadMark};
use crate::roadspaces::attribute::AttributeSet;

/// One lane within a [`crate::roadspaces::RoadspaceLaneSection`]. `t_inner`/`t_outer` are
/// the lateral offsets (from the reference line) of the lane's inner and outer boundary,
/// each a function of arc length local to the section's `s_start`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadspaceLane {
    pub id: i64,
    pub side: LaneSide,
    pub lane_type: LaneType,
    pub t_inner: UnivariateFunction,
    pub t_outer: UnivariateFunction,
    pub road_marks: Vec<RoadMark>,
    pub attributes: AttributeSet,
}

impl RoadspaceLane {
    /// Lane centerline offset: mean of inner and outer boundary, at local parameter `ds`.
    pub fn center_offset_unbounded(&self, ds: f64) -> f64 {
        (self.t_inner.value_unbounded(ds) + self.t_outer.value_unbounded(ds)) / 2.0
    }
}

/// A contiguous `[s_start, s_end)` stretch of constant lane topology.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadspaceLaneSection {
    pub s_start: f64,
    pub s_end: f64,
    pub lanes: Vec<RoadspaceLane>,
}

impl RoadspaceLaneSection {
    pub fn lane(&self, id: i64) -> Option<&RoadspaceLane> {
        self.lanes.iter().find(|l| l.id == id)
    }

    pub fn length(&self) -> f64 {
        self.s_end - self.s_start
    }
}

/// A thin surface bridging a tolerance-scale gap between the outer boundaries of two
/// consecutive lane sections at a shared `s` (spec §4.9 closing paragraph, glossary
/// "Filler surface"). Discretized into polygons during the Roadspaces -> SB pass (C13).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongitudinalFillerSurface {
    pub at_s: f64,
    pub from_lane_id: i64,
    pub to_lane_id: i64,
    pub t_from: f64,
    pub t_to: f64,
}
