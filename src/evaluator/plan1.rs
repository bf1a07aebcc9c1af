//! Plan 1 -- basic data types (spec §4.8): per-entity field-level rules (finiteness,
//! non-empty, strict sorting by natural key, value bounds).

use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

use crate::config::ConversionParameters;
use crate::issue::{Issue, IssueList, Severity};
use crate::numeric::filter_to_strictly_sorted_by;
use crate::pr::lane::Lane;
use crate::pr::{Identifier, OpenDrive};

/// No Plan 1 rule in spec §4.8 is fatal; every basic-data-type defect is healed in place.
pub fn evaluate_fatal(_model: &OpenDrive) -> IssueList {
    IssueList::new()
}

pub fn evaluate_non_fatal(model: &OpenDrive, params: &ConversionParameters) -> (OpenDrive, IssueList) {
    let mut healed = model.clone();
    let mut issues = IssueList::new();

    heal_header_offset(&mut healed, &mut issues);

    for road in &mut healed.road {
        let road_id = road.id.clone();

        road.elevation_profile = filter_to_strictly_sorted_by(&road.elevation_profile, |r| r.s);
        road.lateral_profile.superelevation = filter_to_strictly_sorted_by(&road.lateral_profile.superelevation, |r| r.s);

        for section in &mut road.lanes.lane_section {
            for lane in section.all_lanes_mut() {
                let before = lane.width.len();
                lane.width = filter_to_strictly_sorted_by(&lane.width, |w| w.s_offset);
                if lane.width.len() != before {
                    issues.push(
                        Issue::new(
                            "NonStrictlySortedList",
                            format!("road {road_id}: lane {} width sOffsets were not strictly ascending", lane.id),
                            Severity::Error,
                        )
                        .with_location(Identifier::lane(road_id.clone(), 0, lane.id))
                        .fixed(),
                    );
                }
            }

            if section.center.is_empty() {
                section.center.push(Lane::new_center(0));
                issues.push(
                    Issue::new(
                        "EmptyCenterLane",
                        format!("road {road_id}: lane section at s={} had no center lane, inserted default", section.s),
                        Severity::Error,
                    )
                    .fixed(),
                );
            }
        }
    }

    let _ = params;
    (healed, issues)
}

fn heal_header_offset(model: &mut OpenDrive, issues: &mut IssueList) {
    let offset = &mut model.header.offset;
    for (label, value) in [
        ("x", &mut offset.x),
        ("y", &mut offset.y),
        ("z", &mut offset.z),
    ] {
        if !value.value.is_finite() {
            *value = Length::new::<meter>(0.0);
            issues.push(
                Issue::new("NonFiniteHeaderOffset", format!("header offset {label} was non-finite, replaced with 0.0"), Severity::Error)
                    .fixed(),
            );
        }
    }
    if !offset.hdg.value.is_finite() {
        offset.hdg = Angle::new::<radian>(0.0);
        issues.push(Issue::new("NonFiniteHeaderOffset", "header offset hdg was non-finite, replaced with 0.0", Severity::Error).fixed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::road::Road;

    #[test]
    fn non_finite_offset_is_replaced_with_zero() {
        let mut model = OpenDrive::default();
        model.header.offset.x = Length::new::<meter>(f64::NAN);
        let (healed, issues) = evaluate_non_fatal(&model, &ConversionParameters::default());
        assert_eq!(healed.header.offset.x.value, 0.0);
        assert_eq!(issues.count(Severity::Warning), 1);
    }

    #[test]
    fn unsorted_lane_widths_are_filtered_and_reported() {
        use crate::pr::lane::{Lane, LaneSection, LaneSide, LaneType, Width};
        let mut road = Road {
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
        };
        let mut lane = Lane::new_center(1);
        lane.side = LaneSide::Right;
        lane.lane_type = LaneType::Driving;
        lane.width = vec![
            Width { s_offset: 0.0, a: 3.0, b: 0.0, c: 0.0, d: 0.0 },
            Width { s_offset: 0.5, a: 3.0, b: 0.0, c: 0.0, d: 0.0 },
            Width { s_offset: 0.3, a: 3.0, b: 0.0, c: 0.0, d: 0.0 },
            Width { s_offset: 1.0, a: 3.0, b: 0.0, c: 0.0, d: 0.0 },
        ];
        road.lanes.lane_section.push(LaneSection { s: 0.0, single_side: false, left: Vec::new(), center: vec![Lane::new_center(0)], right: vec![lane] });
        let mut model = OpenDrive::default();
        model.road.push(road);

        let (healed, issues) = evaluate_non_fatal(&model, &ConversionParameters::default());
        let widths = &healed.road[0].lanes.lane_section[0].right[0].width;
        assert_eq!(widths.iter().map(|w| w.s_offset).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(issues.count(Severity::Warning), 1);
        assert_eq!(issues.0[0].kind, "NonStrictlySortedList");
        assert!(issues.0[0].was_fixed);
    }
}
