//! Mirrors `junction/{connection,lane_link,junction_group,contact_point}.rs`: a junction
//! is a set of connections linking incoming road(s) to connecting road(s), with a
//! per-lane mapping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactPoint {
    #[default]
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JunctionType {
    #[default]
    Default,
    Virtual,
    Direct,
    Crossing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionLaneLink {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Connection {
    pub id: String,
    pub incoming_road: Option<String>,
    pub connecting_road: Option<String>,
    pub linked_road: Option<String>,
    pub contact_point: Option<ContactPoint>,
    pub lane_link: Vec<JunctionLaneLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub id: String,
    pub name: Option<String>,
    pub junction_type: JunctionType,
    pub connection: Vec<Connection>,
}

/// Groups several junctions (e.g. the sub-junctions of a roundabout). Spec.md's
/// evaluator/transformer never process group membership; it is carried through
/// unevaluated onto SB attributes (SPEC_FULL.md §B.4).
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionGroup {
    pub id: String,
    pub name: Option<String>,
    pub junction_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Controller {
    pub id: String,
    pub name: Option<String>,
    pub sequence: Option<u32>,
    pub controlled_signals: Vec<String>,
}
