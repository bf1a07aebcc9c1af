//! Structural identifiers: tuples of small integers and short strings that act as map
//! keys. Every in-memory PR and Roadspaces entity carries one (spec §3).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Road {
        road_id: String,
    },
    LaneSection {
        road_id: String,
        lane_section_index: usize,
    },
    Lane {
        road_id: String,
        lane_section_index: usize,
        lane_id: i64,
    },
    RoadObject {
        road_id: String,
        object_id: String,
    },
    Signal {
        road_id: String,
        signal_id: String,
    },
    Junction {
        junction_id: String,
    },
    Connection {
        junction_id: String,
        connection_id: String,
    },
}

impl Identifier {
    pub fn road(road_id: impl Into<String>) -> Self {
        Identifier::Road { road_id: road_id.into() }
    }

    pub fn lane_section(road_id: impl Into<String>, index: usize) -> Self {
        Identifier::LaneSection { road_id: road_id.into(), lane_section_index: index }
    }

    pub fn lane(road_id: impl Into<String>, lane_section_index: usize, lane_id: i64) -> Self {
        Identifier::Lane { road_id: road_id.into(), lane_section_index, lane_id }
    }

    pub fn junction(junction_id: impl Into<String>) -> Self {
        Identifier::Junction { junction_id: junction_id.into() }
    }

    /// Canonical `|`-joined field string used as input to the identifier hash (spec §6).
    pub fn canonical_string(&self) -> String {
        match self {
            Identifier::Road { road_id } => format!("road|{road_id}"),
            Identifier::LaneSection { road_id, lane_section_index } => {
                format!("laneSection|{road_id}|{lane_section_index}")
            }
            Identifier::Lane { road_id, lane_section_index, lane_id } => {
                format!("lane|{road_id}|{lane_section_index}|{lane_id}")
            }
            Identifier::RoadObject { road_id, object_id } => {
                format!("roadObject|{road_id}|{object_id}")
            }
            Identifier::Signal { road_id, signal_id } => format!("signal|{road_id}|{signal_id}"),
            Identifier::Junction { junction_id } => format!("junction|{junction_id}"),
            Identifier::Connection { junction_id, connection_id } => {
                format!("connection|{junction_id}|{connection_id}")
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
