//! Plan 3 -- conversion requirements (spec §4.8): rules required only by the target
//! surface model, run after Plan 1/2 healing, immediately before the PR -> Roadspaces
//! transform (C12) consumes the result.

use crate::config::ConversionParameters;
use crate::issue::{Issue, IssueList, Severity};
use crate::pr::junction::JunctionType;
use crate::pr::{Identifier, OpenDrive};

pub fn evaluate_fatal(model: &OpenDrive) -> IssueList {
    let mut issues = IssueList::new();
    for junction in &model.junction {
        if junction.junction_type != JunctionType::Default {
            continue;
        }
        for connection in &junction.connection {
            if connection.incoming_road.is_none() || connection.connecting_road.is_none() {
                issues.push(
                    Issue::new(
                        "DefaultJunctionWithoutIncomingRoad",
                        format!("junction {}: connection {} is missing an incoming or connecting road", junction.id, connection.id),
                        Severity::FatalError,
                    )
                    .with_location(Identifier::junction(junction.id.clone())),
                );
            }
        }
    }
    issues
}

pub fn evaluate_non_fatal(model: &OpenDrive, params: &ConversionParameters) -> (OpenDrive, IssueList) {
    let mut healed = model.clone();
    let mut issues = IssueList::new();
    let tolerance = params.number_tolerance;

    for road in &mut healed.road {
        let road_id = road.id.clone();
        let before = road.plan_view.geometry.len();
        road.plan_view.geometry.retain(|g| g.length.value > tolerance);
        let dropped = before - road.plan_view.geometry.len();
        if dropped > 0 {
            issues.push(
                Issue::new(
                    "PlanViewSegmentTooShort",
                    format!("road {road_id}: dropped {dropped} plan-view segment(s) with length below tolerance"),
                    Severity::Error,
                )
                .with_location(Identifier::road(road_id.clone()))
                .with_numeric("dropped", dropped as f64)
                .fixed(),
            );
        }
    }

    (healed, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::junction::{Connection, Junction};

    #[test]
    fn default_junction_missing_incoming_road_is_fatal() {
        let mut model = OpenDrive::default();
        model.junction.push(Junction {
            id: "j1".to_string(),
            name: None,
            junction_type: JunctionType::Default,
            connection: vec![Connection { id: "c1".to_string(), connecting_road: Some("2".to_string()), ..Default::default() }],
        });
        let issues = evaluate_fatal(&model);
        assert!(issues.has_fatal());
        assert_eq!(issues.0[0].kind, "DefaultJunctionWithoutIncomingRoad");
    }

    #[test]
    fn non_default_junction_is_not_checked() {
        let mut model = OpenDrive::default();
        model.junction.push(Junction {
            id: "j1".to_string(),
            name: None,
            junction_type: JunctionType::Virtual,
            connection: vec![Connection::default()],
        });
        assert!(!evaluate_fatal(&model).has_fatal());
    }
}
