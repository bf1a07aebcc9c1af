//! Roadspaces junctions reference roadspaces by identifier value only, never by pointer
//! (spec §9 "Ownership of children"), eliminating cyclic ownership.

use std::collections::BTreeMap;

use crate::pr::junction::ContactPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub incoming_roadspace_id: String,
    pub connecting_roadspace_id: String,
    pub connecting_contact_point: ContactPoint,
    /// incoming lane id -> connecting lane id, one entry per `<laneLink>`.
    pub lane_links: BTreeMap<i64, i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub id: String,
    pub connections: Vec<Connection>,
}
