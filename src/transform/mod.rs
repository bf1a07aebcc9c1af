//! PR -> Roadspaces -> SB transform pipeline (spec components C12/C13).

mod pr_to_roadspaces;
mod roadspaces_to_sb;

pub use pr_to_roadspaces::convert_to_roadspaces;
pub use roadspaces_to_sb::convert_to_city_model;
