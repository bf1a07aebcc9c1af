//! Mirrors `road/mod.rs` + `road/link.rs`: a `Road` is the header (id, name, length,
//! link, type), plan view, elevation/lateral profiles, lanes, objects and signals.

use uom::si::f64::Length;

use crate::pr::geometry::PlanView;
use crate::pr::junction::ContactPoint;
use crate::pr::lane::Lanes;
use crate::pr::object::RoadObject;
use crate::pr::profile::{ElevationRecord, LateralProfile};
use crate::pr::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Road,
    Junction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkEndpoint {
    pub element_type: ElementType,
    pub element_id: String,
    pub contact_point: Option<ContactPoint>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    pub predecessor: Option<LinkEndpoint>,
    pub successor: Option<LinkEndpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficRule {
    #[default]
    RightHandTraffic,
    LeftHandTraffic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: String,
    pub name: Option<String>,
    pub length: Length,
    pub junction_id: Option<String>,
    pub rule: TrafficRule,
    pub link: Link,
    pub plan_view: PlanView,
    pub elevation_profile: Vec<ElevationRecord>,
    pub lateral_profile: LateralProfile,
    pub lanes: Lanes,
    pub objects: Vec<RoadObject>,
    pub signals: Vec<Signal>,
}

impl Road {
    pub fn is_within_junction(&self) -> bool {
        self.junction_id.is_some()
    }
}
