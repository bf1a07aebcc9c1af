//! The PR object model (spec component C9): a mirror of the PR (parametric road
//! description) format as a tagged tree, minus the wire-format reader/writer which spec
//! §1 places out of scope. Grounded in `examples/IT-Designers-opendrive-rs`'s
//! `core`/`road`/`lane`/`junction`/`object`/`signal` module layout; see DESIGN.md.

pub mod geometry;
pub mod header;
pub mod identifier;
pub mod junction;
pub mod lane;
pub mod object;
pub mod profile;
pub mod road;
pub mod signal;

pub use header::Header;
pub use identifier::Identifier;
pub use junction::{Controller, Junction, JunctionGroup};
pub use road::Road;

/// The root of a PR dataset: header, list of roads, list of junctions, list of
/// controllers (spec §3).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenDrive {
    pub header: Header,
    pub road: Vec<Road>,
    pub junction: Vec<Junction>,
    pub junction_group: Vec<JunctionGroup>,
    pub controller: Vec<Controller>,
}

impl OpenDrive {
    pub fn road_by_id(&self, id: &str) -> Option<&Road> {
        self.road.iter().find(|r| r.id == id)
    }

    pub fn junction_by_id(&self, id: &str) -> Option<&Junction> {
        self.junction.iter().find(|j| j.id == id)
    }
}
