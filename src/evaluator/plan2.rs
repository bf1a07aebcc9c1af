//! Plan 2 -- modeling rules (spec §4.8): cross-field consistency per road/section.
//!
//! Open Question #1 (spec §9) is resolved here per SPEC_FULL.md §C.1: the next segment's
//! `s` is authoritative over a disagreeing `length` attribute, which is overwritten.

use uom::si::f64::Length;
use uom::si::length::meter;

use crate::config::ConversionParameters;
use crate::issue::{Issue, IssueList, Severity};
use crate::pr::{Identifier, OpenDrive};

pub fn evaluate_fatal(model: &OpenDrive, params: &ConversionParameters) -> IssueList {
    let mut issues = IssueList::new();
    let tolerance = params.plan_view_geometry_distance_tolerance;

    for road in &model.road {
        let road_length = road.length.value;
        for geometry in &road.plan_view.geometry {
            if geometry.s.value - road_length > tolerance {
                issues.push(
                    Issue::new(
                        "PlanViewSegmentExceedsRoadLength",
                        format!("road {}: plan-view segment at s={} exceeds road length {road_length}", road.id, geometry.s.value),
                        Severity::FatalError,
                    )
                    .with_location(Identifier::road(road.id.clone()))
                    .with_numeric("s", geometry.s.value)
                    .with_numeric("roadLength", road_length),
                );
            }
        }

        for section in &road.lanes.lane_section {
            if section.center.len() != 1 {
                issues.push(
                    Issue::new(
                        "InvalidCenterLaneCount",
                        format!("road {}: lane section at s={} must have exactly one center lane, has {}", road.id, section.s, section.center.len()),
                        Severity::FatalError,
                    )
                    .with_location(Identifier::road(road.id.clone())),
                );
            }
            if section.left.is_empty() && section.right.is_empty() {
                issues.push(
                    Issue::new(
                        "NoTravelLanes",
                        format!("road {}: lane section at s={} has neither left nor right lanes", road.id, section.s),
                        Severity::FatalError,
                    )
                    .with_location(Identifier::road(road.id.clone())),
                );
            }
            for (label, lanes) in [("left", &section.left), ("right", &section.right)] {
                if has_missing_lane_id(lanes) {
                    issues.push(
                        Issue::new(
                            "MissingLaneId",
                            format!("road {}: {label} lane ids at s={} are not dense", road.id, section.s),
                            Severity::FatalError,
                        )
                        .with_location(Identifier::road(road.id.clone())),
                    );
                }
            }
        }
    }

    issues
}

fn has_missing_lane_id(lanes: &[crate::pr::lane::Lane]) -> bool {
    let mut magnitudes: Vec<i64> = lanes.iter().map(|l| l.id.abs()).collect();
    magnitudes.sort_unstable();
    magnitudes.dedup();
    magnitudes.iter().enumerate().any(|(i, &m)| m != (i as i64 + 1))
}

fn is_dense_ordered(lanes: &[crate::pr::lane::Lane]) -> bool {
    lanes.windows(2).all(|w| w[0].id.abs() < w[1].id.abs())
}

pub fn evaluate_non_fatal(model: &OpenDrive, params: &ConversionParameters) -> (OpenDrive, IssueList) {
    let mut healed = model.clone();
    let mut issues = IssueList::new();
    let tolerance = params.plan_view_geometry_distance_tolerance;

    for road in &mut healed.road {
        let road_id = road.id.clone();
        let road_length = road.length.value;
        let n = road.plan_view.geometry.len();
        for i in 0..n {
            let expected_length = if i + 1 < n {
                road.plan_view.geometry[i + 1].s.value - road.plan_view.geometry[i].s.value
            } else {
                road_length - road.plan_view.geometry[i].s.value
            };
            let geometry = &mut road.plan_view.geometry[i];
            if (geometry.length.value - expected_length).abs() > tolerance {
                let old = geometry.length.value;
                geometry.length = Length::new::<meter>(expected_length);
                issues.push(
                    Issue::new(
                        "PlanViewGeometryLengthMismatch",
                        format!("road {road_id}: plan-view segment {i} length {old} disagreed with next-s derived length {expected_length}, overwritten"),
                        Severity::Error,
                    )
                    .with_location(Identifier::road(road_id.clone()))
                    .with_numeric("oldLength", old)
                    .with_numeric("newLength", expected_length)
                    .fixed(),
                );
            }
        }

        for section in &mut road.lanes.lane_section {
            for (label, lanes) in [("left", &mut section.left), ("right", &mut section.right)] {
                if !has_missing_lane_id(lanes) && !is_dense_ordered(lanes) {
                    lanes.sort_by_key(|l| l.id.abs());
                    issues.push(
                        Issue::new(
                            "NonStrictlySortedList",
                            format!("road {road_id}: {label} lane ids at s={} were not in outward order, re-sorted", section.s),
                            Severity::Error,
                        )
                        .with_location(Identifier::road(road_id.clone()))
                        .fixed(),
                    );
                }
            }
        }
    }

    (healed, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::road::Road;
    use uom::si::f64::Length;

    fn sample_road() -> Road {
        Road {
            id: "1".to_string(),
            name: None,
            length: Length::new::<meter>(10.0),
            junction_id: None,
            rule: Default::default(),
            link: Default::default(),
            plan_view: Default::default(),
            elevation_profile: Vec::new(),
            lateral_profile: Default::default(),
            lanes: Default::default(),
            objects: Vec::new(),
            signals: Vec::new(),
        }
    }

    #[test]
    fn segment_beyond_road_length_is_fatal() {
        use crate::pr::geometry::{GeometryType, PlanViewGeometry};
        use uom::si::angle::radian;
        use uom::si::f64::Angle;

        let mut road = sample_road();
        road.plan_view.geometry.push(PlanViewGeometry {
            s: Length::new::<meter>(20.0),
            x: Length::new::<meter>(0.0),
            y: Length::new::<meter>(0.0),
            hdg: Angle::new::<radian>(0.0),
            length: Length::new::<meter>(1.0),
            geometry_type: GeometryType::Line,
        });
        let mut model = OpenDrive::default();
        model.road.push(road);
        let issues = evaluate_fatal(&model, &ConversionParameters::default());
        assert!(issues.has_fatal());
    }

    #[test]
    fn length_mismatch_is_healed_using_next_s() {
        use crate::pr::geometry::{GeometryType, PlanViewGeometry};
        use uom::si::angle::radian;
        use uom::si::f64::Angle;

        let mut road = sample_road();
        road.plan_view.geometry.push(PlanViewGeometry {
            s: Length::new::<meter>(0.0),
            x: Length::new::<meter>(0.0),
            y: Length::new::<meter>(0.0),
            hdg: Angle::new::<radian>(0.0),
            length: Length::new::<meter>(5.0),
            geometry_type: GeometryType::Line,
        });
        road.plan_view.geometry.push(PlanViewGeometry {
            s: Length::new::<meter>(7.0),
            x: Length::new::<meter>(0.0),
            y: Length::new::<meter>(0.0),
            hdg: Angle::new::<radian>(0.0),
            length: Length::new::<meter>(3.0),
            geometry_type: GeometryType::Line,
        });
        let mut model = OpenDrive::default();
        model.road.push(road);
        let (healed, issues) = evaluate_non_fatal(&model, &ConversionParameters::default());
        assert_eq!(healed.road[0].plan_view.geometry[0].length.value, 7.0);
        assert_eq!(issues.0[0].kind, "PlanViewGeometryLengthMismatch");
    }
}
