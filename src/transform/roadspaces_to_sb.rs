//! Roadspaces -> SB transform (spec component C13, §4.10). Discretizes every lane,
//! filler and road-mark surface into LOD2 multi-surfaces, classifies lanes and road
//! objects into SB feature families, and assigns each a deterministic GML id.

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::ConversionParameters;
use crate::curve::CurveRelativeParametricSurface3D;
use crate::geom::Vector3D;
use crate::issue::{Issue, IssueList, Severity};
use crate::pr::lane::{LaneSide, LaneType};
use crate::pr::object::RoadObjectType;
use crate::pr::signal::Signal;
use crate::pr::{Identifier, OpenDrive};
use crate::roadspaces::{AttributeSet, RoadspaceObjectGeometry, RoadspacesModel};
use crate::sb::{AuxiliaryFunction, CityModel, CityModelHeader, CityObject, CityObjectGeometry, CityObjectKind, RoadFeatureFamily};
use crate::solid::{LinearRing3D, Polygon3D};

struct IdAssigner {
    prefix: String,
    seen_keys: BTreeMap<String, u32>,
    seen_ids: HashSet<String>,
}

impl IdAssigner {
    fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), seen_keys: BTreeMap::new(), seen_ids: HashSet::new() }
    }

    /// Deterministic GML id: SHA-256 of `feature_name|canonical-key[#n]`, re-encoded
    /// with RFC 4122 version/variant bits set so it reads as a UUID (spec §6 "Identifier
    /// hash"). `n` is a monotonic per-key counter appended only on repeat use of the same
    /// key, guaranteeing uniqueness without ever re-hashing the same bytes twice.
    fn assign(&mut self, feature_name: &str, key: &str, issues: &mut IssueList) -> String {
        let counter = self.seen_keys.entry(key.to_string()).or_insert(0);
        let disambiguated = if *counter == 0 { key.to_string() } else { format!("{key}#{counter}") };
        *counter += 1;

        let digest = Sha256::digest(format!("{feature_name}|{disambiguated}").as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[0..16]);
        bytes[6] = (bytes[6] & 0x0F) | 0x50;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;
        let uuid = Uuid::from_bytes(bytes);
        let gml_id = format!("{}{}", self.prefix, uuid);

        if !self.seen_ids.insert(gml_id.clone()) {
            issues.push(Issue::new(
                "DuplicateGmlId",
                format!("hash collision assigning gml id for key '{disambiguated}' (feature {feature_name})"),
                Severity::Error,
            ));
        }
        gml_id
    }
}

/// Runs C13 over an already-built Roadspaces model. Signals are rendered from the PR
/// tree directly (spec §3: signals live on `Road`, not on `Roadspace`).
pub fn convert_to_city_model(roadspaces: &RoadspacesModel, pr_model: &OpenDrive, params: &ConversionParameters) -> (CityModel, IssueList) {
    let mut issues = IssueList::new();
    let mut ids = IdAssigner::new(&params.gml_id_prefix);
    let mut city_objects = Vec::new();

    for roadspace in &roadspaces.roadspaces {
        let road_id = roadspace.road_id().to_string();
        log::debug!("transform: road {road_id} -> SB start");

        for (section_index, section) in roadspace.lane_sections.iter().enumerate() {
            for lane in &section.lanes {
                if lane.side == LaneSide::Center {
                    continue;
                }
                let polygons = discretize_ribbon(
                    &roadspace.road_surface,
                    section.s_start,
                    section.s_end,
                    |ds| lane.t_inner.value_unbounded(ds),
                    |ds| lane.t_outer.value_unbounded(ds),
                    params.discretization_step_size,
                    params.number_tolerance,
                );
                let identifier = Identifier::lane(road_id.clone(), section_index, lane.id);
                let gml_id = ids.assign("laneSurface", &identifier.canonical_string(), &mut issues);
                let mut attributes = AttributeSet::new();
                attributes.insert(format!("{}roadId", params.identifier_attributes_prefix), road_id.clone().into());
                attributes.insert(format!("{}laneId", params.identifier_attributes_prefix), lane.id.into());
                city_objects.push(CityObject {
                    gml_id,
                    kind: classify_lane(lane.lane_type),
                    geometry: CityObjectGeometry::MultiSurface(polygons),
                    attributes,
                });

                for (mark_index, mark) in lane.road_marks.iter().enumerate() {
                    let half_width = mark.width.map(|w| w.value).unwrap_or(0.12) / 2.0;
                    let polygons = discretize_ribbon(
                        &roadspace.road_surface,
                        section.s_start,
                        section.s_end,
                        |ds| lane.t_outer.value_unbounded(ds) - half_width,
                        |ds| lane.t_outer.value_unbounded(ds) + half_width,
                        params.discretization_step_size,
                        params.number_tolerance,
                    );
                    if polygons.is_empty() {
                        continue;
                    }
                    let key = format!("{}|mark|{mark_index}", identifier.canonical_string());
                    let gml_id = ids.assign("roadMark", &key, &mut issues);
                    let mut attributes = AttributeSet::new();
                    attributes.insert("roadMark.type".to_string(), format!("{:?}", mark.mark_type).into());
                    if let Some(color) = &mark.color {
                        attributes.insert("roadMark.color".to_string(), color.clone().into());
                    }
                    city_objects.push(CityObject {
                        gml_id,
                        kind: classify_lane(lane.lane_type),
                        geometry: CityObjectGeometry::MultiSurface(polygons),
                        attributes,
                    });
                }
            }
        }

        for filler in &roadspace.filler_surfaces {
            if let Some(polygon) = discretize_filler(&roadspace.road_surface, filler.at_s, filler.t_from, filler.t_to, params.number_tolerance) {
                let key = format!("road|{road_id}|filler|{}|{}", filler.from_lane_id, filler.at_s);
                let gml_id = ids.assign("fillerSurface", &key, &mut issues);
                city_objects.push(CityObject {
                    gml_id,
                    kind: CityObjectKind::AuxiliaryTrafficArea { family: RoadFeatureFamily::Road, function: AuxiliaryFunction::None },
                    geometry: CityObjectGeometry::MultiSurface(vec![polygon]),
                    attributes: AttributeSet::new(),
                });
            }
        }

        for object in &roadspace.objects {
            let identifier = Identifier::RoadObject { road_id: road_id.clone(), object_id: object.id.clone() };
            let gml_id = ids.assign("roadObject", &identifier.canonical_string(), &mut issues);
            let mut attributes = object.attributes.clone();
            if params.flatten_generic_attribute_sets {
                attributes = flatten_attributes(attributes, &params.geometry_attributes_prefix);
            }
            city_objects.push(CityObject {
                gml_id,
                kind: classify_object(object.object_type),
                geometry: convert_object_geometry(&object.geometry),
                attributes,
            });
        }

        log::debug!("transform: road {road_id} -> SB end, {} city objects so far", city_objects.len());
    }

    for road in &pr_model.road {
        for signal in &road.signals {
            if let Some(roadspace) = roadspaces.roadspace(&road.id) {
                let point = roadspace.road_surface.point_unbounded(signal.s.value, signal.t.value);
                let identifier = Identifier::Signal { road_id: road.id.clone(), signal_id: signal.id.clone() };
                let gml_id = ids.assign("signal", &identifier.canonical_string(), &mut issues);
                city_objects.push(CityObject {
                    gml_id,
                    kind: CityObjectKind::GenericObject,
                    geometry: CityObjectGeometry::Point(Vector3D::new(point.x, point.y, point.z + signal.z_offset.value)),
                    attributes: signal_attributes(signal),
                });
            }
        }
    }

    log::info!("transform: roadspaces -> SB complete, {} city objects, {} issues", city_objects.len(), issues.count(Severity::Warning) + issues.count(Severity::Error) + issues.count(Severity::FatalError));

    let header = CityModelHeader { crs_epsg: roadspaces.header.crs_epsg };
    (CityModel { header, city_objects }, issues)
}

fn classify_lane(lane_type: LaneType) -> CityObjectKind {
    use RoadFeatureFamily::{Railway, Road};
    match lane_type {
        LaneType::Driving | LaneType::Exit | LaneType::Entry | LaneType::OnRamp | LaneType::OffRamp => {
            CityObjectKind::TrafficArea { family: Road }
        }
        LaneType::Sidewalk | LaneType::Walking => {
            CityObjectKind::AuxiliaryTrafficArea { family: Road, function: AuxiliaryFunction::Footpath }
        }
        LaneType::Biking => CityObjectKind::TrafficArea { family: Road },
        LaneType::Rail | LaneType::Tram => CityObjectKind::TrafficArea { family: Railway },
        LaneType::Parking => CityObjectKind::AuxiliaryTrafficArea { family: Road, function: AuxiliaryFunction::None },
        _ => CityObjectKind::AuxiliaryTrafficArea { family: Road, function: AuxiliaryFunction::None },
    }
}

fn classify_object(object_type: RoadObjectType) -> CityObjectKind {
    match object_type {
        RoadObjectType::Building => CityObjectKind::Building,
        RoadObjectType::Tree | RoadObjectType::Vegetation => CityObjectKind::Vegetation,
        RoadObjectType::Obstacle
        | RoadObjectType::Pole
        | RoadObjectType::Barrier
        | RoadObjectType::SoundBarrier
        | RoadObjectType::StreetLamp
        | RoadObjectType::Gantry
        | RoadObjectType::Railing => CityObjectKind::CityFurniture,
        RoadObjectType::None
        | RoadObjectType::Crosswalk
        | RoadObjectType::ParkingSpace
        | RoadObjectType::Patch
        | RoadObjectType::TrafficIsland
        | RoadObjectType::Wind => CityObjectKind::GenericObject,
    }
}

fn convert_object_geometry(geometry: &RoadspaceObjectGeometry) -> CityObjectGeometry {
    match geometry {
        RoadspaceObjectGeometry::Polyhedron(faces) => CityObjectGeometry::MultiSurface(faces.clone()),
        RoadspaceObjectGeometry::LinearRing(ring) => CityObjectGeometry::MultiSurface(vec![Polygon3D::new(ring.clone())]),
        RoadspaceObjectGeometry::Solid(solid) => {
            CityObjectGeometry::MultiSurface(solid.faces(1e-6).unwrap_or_default())
        }
        RoadspaceObjectGeometry::Point(point) => CityObjectGeometry::Point(*point),
    }
}

fn signal_attributes(signal: &Signal) -> AttributeSet {
    let mut attributes = AttributeSet::new();
    if let Some(signal_type) = &signal.signal_type {
        attributes.insert("signal.type".to_string(), signal_type.clone().into());
    }
    if let Some(subtype) = &signal.subtype {
        attributes.insert("signal.subtype".to_string(), subtype.clone().into());
    }
    if let Some(name) = &signal.name {
        attributes.insert("signal.name".to_string(), name.clone().into());
    }
    attributes.insert("signal.dynamic".to_string(), signal.dynamic.into());
    attributes
}

fn flatten_attributes(attributes: AttributeSet, _prefix: &str) -> AttributeSet {
    // Nested attribute sets never arise on this crate's `AttributeValue` (no `Set`
    // variant), so flattening is a no-op; kept as an explicit pass-through so the flag
    // has somewhere to hook in if a future variant needs it.
    attributes
}

/// Samples a ribbon between two curve-relative boundary functions of local arc length,
/// producing one quad per discretization step (same quad-strip shape as
/// `solid::cylinder_faces`/`sweep_faces`, just over a road surface instead of a solid).
fn discretize_ribbon(
    road_surface: &CurveRelativeParametricSurface3D,
    s_start: f64,
    s_end: f64,
    inner_t: impl Fn(f64) -> f64,
    outer_t: impl Fn(f64) -> f64,
    step: f64,
    tolerance: f64,
) -> Vec<Polygon3D> {
    let length = s_end - s_start;
    if length <= tolerance || step <= 0.0 {
        return Vec::new();
    }
    let steps = (length / step).ceil().max(1.0) as usize;
    let delta = length / steps as f64;

    let mut polygons = Vec::with_capacity(steps);
    for i in 0..steps {
        let ds0 = i as f64 * delta;
        let ds1 = ((i + 1) as f64 * delta).min(length);
        let s0 = s_start + ds0;
        let s1 = s_start + ds1;
        let quad = vec![
            road_surface.point_unbounded(s0, inner_t(ds0)),
            road_surface.point_unbounded(s0, outer_t(ds0)),
            road_surface.point_unbounded(s1, outer_t(ds1)),
            road_surface.point_unbounded(s1, inner_t(ds1)),
        ];
        if let Ok(ring) = LinearRing3D::try_new(quad, tolerance) {
            polygons.push(Polygon3D::new(ring));
        }
    }
    polygons
}

/// A thin quad bridging a `t`-discontinuity between two consecutive lane sections at the
/// boundary `s` (spec §4.9 closing paragraph, §4.10 "filler surface"). The longitudinal
/// extent is a small epsilon either side of `at_s`, since the physical gap is a
/// zero-length step in arc length.
fn discretize_filler(road_surface: &CurveRelativeParametricSurface3D, at_s: f64, t_from: f64, t_to: f64, tolerance: f64) -> Option<Polygon3D> {
    let epsilon = (tolerance * 10.0).max(1e-4);
    let s0 = at_s - epsilon;
    let s1 = at_s + epsilon;
    let quad = vec![
        road_surface.point_unbounded(s0, t_from),
        road_surface.point_unbounded(s1, t_from),
        road_surface.point_unbounded(s1, t_to),
        road_surface.point_unbounded(s0, t_to),
    ];
    LinearRing3D::try_new(quad, tolerance).ok().map(Polygon3D::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Curve2D, Curve3D, LineSegment2D};
    use crate::function::{BivariateFunction, UnivariateFunction};
    use crate::geom::{Pose2D, Rotation2D, Vector2D};
    use crate::range::Range;
    use crate::roadspaces::{Roadspace, RoadspaceLane, RoadspaceLaneSection, RoadspacesHeader};

    fn flat_road_surface(length: f64) -> CurveRelativeParametricSurface3D {
        let plan_view = Curve2D::Line(LineSegment2D::new(
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, length),
            1e-9,
        ));
        let reference = Curve3D::new(
            plan_view,
            UnivariateFunction::constant(0.0, Range::all()),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        )
        .unwrap();
        CurveRelativeParametricSurface3D::new(reference, BivariateFunction::plane(0.0, 0.0, 0.0, Range::all(), Range::all()), 1e-9)
    }

    #[test]
    fn discretizing_a_10m_lane_at_2m_steps_yields_five_quads() {
        let surface = flat_road_surface(10.0);
        let polygons = discretize_ribbon(&surface, 0.0, 10.0, |_| 0.0, |_| 3.5, 2.0, 1e-9);
        assert_eq!(polygons.len(), 5);
        for polygon in &polygons {
            assert_eq!(polygon.exterior.vertices().len(), 4);
        }
    }

    #[test]
    fn driving_lane_classifies_as_road_traffic_area() {
        assert!(matches!(classify_lane(LaneType::Driving), CityObjectKind::TrafficArea { family: RoadFeatureFamily::Road }));
    }

    #[test]
    fn sidewalk_classifies_as_footpath_auxiliary_area() {
        assert!(matches!(
            classify_lane(LaneType::Sidewalk),
            CityObjectKind::AuxiliaryTrafficArea { family: RoadFeatureFamily::Road, function: AuxiliaryFunction::Footpath }
        ));
    }

    #[test]
    fn id_assigner_disambiguates_repeated_keys() {
        let mut issues = IssueList::new();
        let mut ids = IdAssigner::new("UUID_");
        let a = ids.assign("lane", "road|1", &mut issues);
        let b = ids.assign("lane", "road|1", &mut issues);
        assert_ne!(a, b);
        assert!(issues.is_empty());
    }

    #[test]
    fn converting_an_empty_roadspaces_model_yields_no_city_objects() {
        let model = RoadspacesModel { header: RoadspacesHeader::default(), roadspaces: Vec::new(), junctions: Vec::new() };
        let pr = OpenDrive::default();
        let (city_model, issues) = convert_to_city_model(&model, &pr, &ConversionParameters::default());
        assert!(city_model.city_objects.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn single_lane_roadspace_produces_one_traffic_area() {
        let surface = flat_road_surface(10.0);
        let roadspace = Roadspace {
            id: Identifier::road("1"),
            reference_line: surface_reference(&surface),
            road_surface: surface,
            lane_sections: vec![RoadspaceLaneSection {
                s_start: 0.0,
                s_end: 10.0,
                lanes: vec![RoadspaceLane {
                    id: -1,
                    side: LaneSide::Right,
                    lane_type: LaneType::Driving,
                    t_inner: UnivariateFunction::constant(0.0, Range::all()),
                    t_outer: UnivariateFunction::constant(-3.5, Range::all()),
                    road_marks: Vec::new(),
                    attributes: AttributeSet::new(),
                }],
            }],
            filler_surfaces: Vec::new(),
            objects: Vec::new(),
            attributes: AttributeSet::new(),
        };
        let model = RoadspacesModel { header: RoadspacesHeader::default(), roadspaces: vec![roadspace], junctions: Vec::new() };
        let pr = OpenDrive::default();
        let (city_model, _) = convert_to_city_model(&model, &pr, &ConversionParameters::default());
        assert_eq!(city_model.city_objects.len(), 1);
        assert!(matches!(city_model.city_objects[0].kind, CityObjectKind::TrafficArea { .. }));
    }

    fn surface_reference(surface: &CurveRelativeParametricSurface3D) -> Curve3D {
        let plan_view = Curve2D::Line(LineSegment2D::new(
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            surface.domain_s(),
            1e-9,
        ));
        Curve3D::new(plan_view, UnivariateFunction::constant(0.0, Range::all()), UnivariateFunction::constant(0.0, Range::all()), 1e-9).unwrap()
    }
}
