//! PR -> Roadspaces transform (spec component C12, §4.9). Per road: reference line, road
//! surface, road body, roadspace objects, in that order, followed by junction resolution.
//! Per-road conversion is embarrassingly parallel (spec §5); behind the `concurrent`
//! feature and `ConversionParameters::concurrent_processing` it runs on rayon's pool.

use std::collections::BTreeMap;

use crate::config::ConversionParameters;
use crate::curve::{
    ArcSegment2D, CompositeCurve2D, Curve2D, Curve3D, CurveRelativeParametricSurface3D, CubicCurve2D, LineSegment2D,
    ParametricCubicCurve2D, SpiralSegment2D,
};
use crate::function::{BivariateFunction, OrderedF64, UnivariateFunction};
use crate::geom::{Affine3D, AffineSequence, Pose2D, Pose3D, Rotation2D, Rotation3D, Vector2D, Vector3D};
use crate::issue::{Issue, IssueList, Severity};
use crate::pr::geometry::{GeometryType, ParamPoly3PRange, PlanViewGeometry};
use crate::pr::lane::{Lane, LaneSection, LaneSide};
use crate::pr::object::{Corner, Repeat, RoadObject};
use crate::pr::road::Road;
use crate::pr::{Identifier, OpenDrive};
use crate::range::Range;
use crate::roadspaces::attribute::AttributeSet;
use crate::roadspaces::{
    Connection, Junction, LongitudinalFillerSurface, Roadspace, RoadspaceLane, RoadspaceLaneSection, RoadspaceObject,
    RoadspaceObjectGeometry, RoadspacesHeader, RoadspacesModel,
};
use crate::solid::{LinearRing3D, Polygon3D, Solid3D};

/// Runs C12 over the whole (already-evaluated and healed) PR tree.
pub fn convert_to_roadspaces(model: &OpenDrive, params: &ConversionParameters) -> (RoadspacesModel, IssueList) {
    let mut issues = IssueList::new();

    #[cfg(feature = "concurrent")]
    let converted: Vec<(String, Result<Roadspace, Issue>, IssueList)> = if params.concurrent_processing {
        use rayon::prelude::*;
        model.road.par_iter().map(|road| convert_road(road, params)).collect()
    } else {
        model.road.iter().map(|road| convert_road(road, params)).collect()
    };
    #[cfg(not(feature = "concurrent"))]
    let converted: Vec<(String, Result<Roadspace, Issue>, IssueList)> =
        model.road.iter().map(|road| convert_road(road, params)).collect();

    let mut roadspaces = Vec::with_capacity(converted.len());
    for (_, result, road_issues) in converted {
        issues.append(road_issues);
        match result {
            Ok(roadspace) => roadspaces.push(roadspace),
            Err(issue) => issues.push(issue),
        }
    }

    let junctions = model.junction.iter().map(|j| convert_junction(j, &mut issues)).collect();

    let header = RoadspacesHeader { crs_epsg: params.crs_epsg };
    (RoadspacesModel { header, roadspaces, junctions }, issues)
}

fn convert_road(road: &Road, params: &ConversionParameters) -> (String, Result<Roadspace, Issue>, IssueList) {
    let mut issues = IssueList::new();

    let reference_line = match build_reference_line(road, params, &mut issues) {
        Ok(curve) => curve,
        Err(reason) => {
            return (
                road.id.clone(),
                Err(Issue::new("UnbuildableReferenceLine", format!("road {}: {reason}", road.id), Severity::FatalError)
                    .with_location(Identifier::road(road.id.clone()))),
                issues,
            );
        }
    };

    let road_surface = build_road_surface(road, &reference_line, params);
    let (lane_sections, fillers) = build_road_body(road, params);
    let objects =
        road.objects.iter().flat_map(|object| build_roadspace_object(object, &reference_line, &road_surface, params)).collect();

    let mut attributes = AttributeSet::new();
    if let Some(name) = &road.name {
        attributes.insert("road.name".to_string(), name.clone().into());
    }
    if let Some(junction_id) = &road.junction_id {
        attributes.insert("road.junctionId".to_string(), junction_id.clone().into());
    }

    let roadspace = Roadspace {
        id: Identifier::road(road.id.clone()),
        reference_line,
        road_surface,
        lane_sections,
        filler_surfaces: fillers,
        objects,
        attributes,
    };
    (road.id.clone(), Ok(roadspace), issues)
}

/// Step 1 (spec §4.9): plan-view segments concatenated into one curve, lifted to 3D by the
/// elevation and superelevation profiles.
fn build_reference_line(road: &Road, params: &ConversionParameters, issues: &mut IssueList) -> Result<Curve3D, String> {
    if road.plan_view.geometry.is_empty() {
        return Err("plan view has no geometry segments".to_string());
    }
    let tolerance = params.plan_view_geometry_distance_tolerance.max(params.plan_view_geometry_angle_tolerance);
    let segments: Vec<Curve2D> = road.plan_view.geometry.iter().map(|g| build_plan_view_segment(g, tolerance)).collect();

    report_sub_tolerance_gaps(road, &segments, tolerance, issues);

    let plan_view = if segments.len() == 1 {
        segments.into_iter().next().unwrap()
    } else {
        Curve2D::Composite(CompositeCurve2D::try_new(segments, tolerance).map_err(|e| e.to_string())?)
    };

    let elevation = build_cubic_concatenation(road.elevation_profile.iter().map(|r| (r.s, (r.a, r.b, r.c, r.d))), false)
        .unwrap_or_else(|| UnivariateFunction::constant(0.0, Range::all()));
    // Superelevation is extended below its first breakpoint by a constant piece at that
    // breakpoint's own value, rather than extrapolating the first cubic backwards.
    let superelevation = build_cubic_concatenation(road.lateral_profile.superelevation.iter().map(|r| (r.s, (r.a, r.b, r.c, r.d))), true)
        .unwrap_or_else(|| UnivariateFunction::constant(0.0, Range::all()));

    Curve3D::new(plan_view, elevation, superelevation, params.number_tolerance).map_err(|e| e.to_string())
}

/// Warns about consecutive plan-view segments whose declared endpoints don't quite meet
/// (within tolerance, or `CompositeCurve2D::try_new` would already have rejected the road).
/// Spec §4.9's closing paragraph requires surfacing a healed-but-imperfect join rather than
/// silently accepting it.
fn report_sub_tolerance_gaps(road: &Road, segments: &[Curve2D], tolerance: f64, issues: &mut IssueList) {
    use crate::curve::AbstractCurve2D;
    for pair in segments.windows(2) {
        let (Ok(end), Ok(start)) = (
            pair[0].calculate_pose_local_cs(pair[0].domain().upper_value()),
            pair[1].calculate_pose_local_cs(pair[1].domain().lower_value()),
        ) else {
            continue;
        };
        let gap = end.point.distance(start.point);
        if gap > 0.0 && gap <= tolerance {
            issues.push(
                Issue::new(
                    "OverlapOrGapInCurve",
                    format!("road {}: consecutive plan-view segments are {gap} apart, within tolerance {tolerance}", road.id),
                    Severity::Warning,
                )
                .with_location(Identifier::road(road.id.clone()))
                .with_numeric("gap", gap),
            );
        }
    }
}

fn build_plan_view_segment(geometry: &PlanViewGeometry, tolerance: f64) -> Curve2D {
    let domain = Range::closed(geometry.s.value, geometry.s.value + geometry.length.value);
    let start_pose = Pose2D { point: Vector2D::new(geometry.x.value, geometry.y.value), rotation: Rotation2D::new(geometry.hdg.value) };
    match &geometry.geometry_type {
        GeometryType::Line => Curve2D::Line(LineSegment2D::new(start_pose, domain, tolerance)),
        GeometryType::Arc { curvature } => Curve2D::Arc(ArcSegment2D::new(curvature.value, start_pose, domain, tolerance)),
        GeometryType::Spiral { curv_start, curv_end } => {
            Curve2D::Spiral(SpiralSegment2D::new(curv_start.value, curv_end.value, start_pose, domain, tolerance))
        }
        GeometryType::Poly3 { a, b, c, d } => Curve2D::Cubic(CubicCurve2D::new(*a, *b, *c, *d, start_pose, domain, tolerance)),
        GeometryType::ParamPoly3 { a_u, b_u, c_u, d_u, a_v, b_v, c_v, d_v, p_range } => {
            // Normalized p in [0, 1]; rescale coefficients so the polynomial in arc-length
            // local parameter p' = p * length produces the same u/v values.
            let (b_u, c_u, d_u, b_v, c_v, d_v) = match p_range {
                ParamPoly3PRange::ArcLength => (*b_u, *c_u, *d_u, *b_v, *c_v, *d_v),
                ParamPoly3PRange::Normalized => {
                    let length = geometry.length.value;
                    if length <= 0.0 {
                        (*b_u, *c_u, *d_u, *b_v, *c_v, *d_v)
                    } else {
                        (b_u / length, c_u / length.powi(2), d_u / length.powi(3), b_v / length, c_v / length.powi(2), d_v / length.powi(3))
                    }
                }
            };
            Curve2D::ParamCubic(ParametricCubicCurve2D::new(*a_u, b_u, c_u, d_u, *a_v, b_v, c_v, d_v, start_pose, domain, tolerance))
        }
    }
}

/// Builds a `Concatenated` function from `(s, (a,b,c,d))` records, s strictly ascending
/// (already healed upstream by the evaluator). `None` when there are no records. When
/// `prepend_constant` is set, the domain is extended below the first breakpoint with a
/// constant equal to the first piece's own value there (its `a` coefficient, since the
/// piece is evaluated at local parameter zero at its own breakpoint).
fn build_cubic_concatenation(records: impl Iterator<Item = (f64, (f64, f64, f64, f64))>, prepend_constant: bool) -> Option<UnivariateFunction> {
    let (breakpoints, coeffs): (Vec<f64>, Vec<(f64, f64, f64, f64)>) = records.unzip();
    if breakpoints.is_empty() {
        return None;
    }
    let prepend_value = prepend_constant.then(|| coeffs[0].0);
    UnivariateFunction::of_cubics(breakpoints, coeffs, prepend_constant, prepend_value).ok()
}

/// Step 2 (spec §4.9): the road surface is the reference line offset laterally by `t` and
/// vertically by the lateral-shape height function.
fn build_road_surface(road: &Road, reference_line: &Curve3D, params: &ConversionParameters) -> CurveRelativeParametricSurface3D {
    let mut grouped: BTreeMap<OrderedF64, Vec<(f64, f64, f64, f64, f64)>> = BTreeMap::new();
    for record in &road.lateral_profile.shape {
        grouped.entry(OrderedF64(record.s)).or_default().push((record.t.value, record.a, record.b, record.c, record.d));
    }

    let mut sections = BTreeMap::new();
    for (s_key, mut rows) in grouped {
        rows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        rows.dedup_by(|a, b| a.0 == b.0);
        let breakpoints: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let coeffs: Vec<(f64, f64, f64, f64)> = rows.iter().map(|r| (r.1, r.2, r.3, r.4)).collect();
        if let Ok(f) = UnivariateFunction::of_cubics(breakpoints, coeffs, false, None) {
            sections.insert(s_key, f);
        }
    }

    let height = if sections.is_empty() {
        BivariateFunction::plane(0.0, 0.0, 0.0, Range::all(), Range::all())
    } else {
        BivariateFunction::shape(sections, params.extrapolate_lateral_road_shapes, params.extrapolate_lateral_road_shapes)
            .unwrap_or_else(|_| BivariateFunction::plane(0.0, 0.0, 0.0, Range::all(), Range::all()))
    };

    CurveRelativeParametricSurface3D::new(reference_line.clone(), height, params.number_tolerance)
}

/// Step 3 (spec §4.9): lane sections with width accumulated outward from the center lane.
fn build_road_body(road: &Road, params: &ConversionParameters) -> (Vec<RoadspaceLaneSection>, Vec<LongitudinalFillerSurface>) {
    let tolerance = params.number_tolerance;
    let lane_offset = build_cubic_concatenation(road.lanes.lane_offset.iter().map(|r| (r.s, (r.a, r.b, r.c, r.d))), false)
        .unwrap_or_else(|| UnivariateFunction::constant(0.0, Range::all()));

    let n = road.lanes.lane_section.len();
    let mut sections = Vec::with_capacity(n);
    for (index, section) in road.lanes.lane_section.iter().enumerate() {
        let s_start = section.s;
        let s_end = if index + 1 < n { road.lanes.lane_section[index + 1].s } else { road.length.value };
        let local_domain = Range::closed(s_start, s_end.max(s_start));
        let lane_offset_local = UnivariateFunction::sectioned(lane_offset.clone(), local_domain, tolerance)
            .unwrap_or_else(|_| UnivariateFunction::constant(0.0, Range::all()));

        let mut lanes = Vec::new();
        lanes.push(center_lane(section));
        lanes.extend(side_lanes(section, LaneSide::Left, 1.0, &lane_offset_local));
        lanes.extend(side_lanes(section, LaneSide::Right, -1.0, &lane_offset_local));

        sections.push(RoadspaceLaneSection { s_start, s_end, lanes });
    }

    let fillers = if params.generate_longitudinal_filler_surfaces {
        build_filler_surfaces(&sections, tolerance)
    } else {
        Vec::new()
    };

    (sections, fillers)
}

fn center_lane(section: &LaneSection) -> RoadspaceLane {
    let lane = section.center.first();
    RoadspaceLane {
        id: 0,
        side: LaneSide::Center,
        lane_type: lane.map(|l| l.lane_type).unwrap_or_default(),
        t_inner: UnivariateFunction::constant(0.0, Range::all()),
        t_outer: UnivariateFunction::constant(0.0, Range::all()),
        road_marks: lane.map(|l| l.road_mark.clone()).unwrap_or_default(),
        attributes: AttributeSet::new(),
    }
}

fn side_lanes(section: &LaneSection, side: LaneSide, sign: f64, lane_offset_local: &UnivariateFunction) -> Vec<RoadspaceLane> {
    let source: &[Lane] = match side {
        LaneSide::Left => &section.left,
        LaneSide::Right => &section.right,
        LaneSide::Center => return Vec::new(),
    };
    let mut ordered: Vec<&Lane> = source.iter().collect();
    ordered.sort_by_key(|l| l.id.abs());

    let mut cumulative = UnivariateFunction::constant(0.0, Range::all());
    let mut out = Vec::with_capacity(ordered.len());
    for lane in ordered {
        let width_fn = width_function(lane);
        let inner = cumulative.clone();
        cumulative = UnivariateFunction::stacked_sum(vec![cumulative, width_fn]);
        let signed = |f: UnivariateFunction| UnivariateFunction::stacked_product(vec![f, UnivariateFunction::constant(sign, Range::all())]);
        let t_inner = UnivariateFunction::stacked_sum(vec![lane_offset_local.clone(), signed(inner)]);
        let t_outer = UnivariateFunction::stacked_sum(vec![lane_offset_local.clone(), signed(cumulative.clone())]);
        out.push(RoadspaceLane {
            id: lane.id,
            side,
            lane_type: lane.lane_type,
            t_inner,
            t_outer,
            road_marks: lane.road_mark.clone(),
            attributes: AttributeSet::new(),
        });
    }
    out
}

fn width_function(lane: &Lane) -> UnivariateFunction {
    if lane.width.is_empty() {
        return UnivariateFunction::constant(0.0, Range::all());
    }
    let breakpoints: Vec<f64> = lane.width.iter().map(|w| w.s_offset).collect();
    let coeffs: Vec<(f64, f64, f64, f64)> = lane.width.iter().map(|w| (w.a, w.b, w.c, w.d)).collect();
    UnivariateFunction::of_cubics(breakpoints, coeffs, false, None).unwrap_or_else(|_| UnivariateFunction::constant(0.0, Range::all()))
}

/// Thin surfaces bridging an outer-boundary discontinuity between consecutive sections for
/// a lane id present on both sides of the join (spec §4.9 closing paragraph).
fn build_filler_surfaces(sections: &[RoadspaceLaneSection], tolerance: f64) -> Vec<LongitudinalFillerSurface> {
    let mut fillers = Vec::new();
    for pair in sections.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        for lane in &next.lanes {
            if lane.side == LaneSide::Center {
                continue;
            }
            if let Some(prev_lane) = prev.lane(lane.id) {
                let t_from = prev_lane.t_outer.value_unbounded(prev.length());
                let t_to = lane.t_outer.value_unbounded(0.0);
                if (t_from - t_to).abs() > tolerance {
                    fillers.push(LongitudinalFillerSurface { at_s: next.s_start, from_lane_id: lane.id, to_lane_id: lane.id, t_from, t_to });
                }
            }
        }
    }
    fillers
}

/// Step 4 (spec §4.9): a condensed priority list -- road-corner polyhedron, local-corner
/// polyhedron, dimensioned solid, bare point -- tried in order; the first that structurally
/// applies wins. Any `repeat` specifications additionally expand into their own sweep
/// instances alongside this base geometry.
fn build_roadspace_object(
    object: &RoadObject,
    reference_line: &Curve3D,
    road_surface: &CurveRelativeParametricSurface3D,
    params: &ConversionParameters,
) -> Vec<RoadspaceObject> {
    let tolerance = params.number_tolerance;
    let object_affine = object_pose_affine(reference_line, object.s.value, object.t.value, object.z_offset.value, object.hdg, object.pitch, object.roll);

    let geometry = outline_polyhedron(object, road_surface, &object_affine, tolerance)
        .or_else(|| outline_linear_ring(object, road_surface, &object_affine, tolerance))
        .or_else(|| dimensioned_solid(object.length.map(|l| l.value), object.width.map(|w| w.value), object.height.map(|h| h.value), object.radius.map(|r| r.value), &object_affine, params.circle_slices, tolerance))
        .unwrap_or_else(|| RoadspaceObjectGeometry::Point(object_affine.translation));

    let mut objects = vec![RoadspaceObject { id: object.id.clone(), object_type: object.object_type, name: object.name.clone(), geometry, attributes: object_attributes(object) }];

    for (repeat_index, repeat) in object.repeat.iter().enumerate() {
        objects.extend(expand_repeat(object, repeat, repeat_index, reference_line, params));
    }
    objects
}

fn object_attributes(object: &RoadObject) -> AttributeSet {
    let mut attributes = AttributeSet::new();
    if let Some(material) = &object.material {
        if let Some(surface) = &material.surface {
            attributes.insert("object.material.surface".to_string(), surface.clone().into());
        }
    }
    attributes
}

/// The rigid transform from the object's own local frame (hdg/pitch/roll about its `s`/`t`/
/// `zOffset` anchor) into world space, used both for dimensioned solids and to place
/// `Corner::Local` outline corners.
fn object_pose_affine(reference_line: &Curve3D, s: f64, t: f64, z_offset: f64, hdg: f64, pitch: f64, roll: f64) -> Affine3D {
    let base_pose = reference_line.pose_unbounded(s);
    let object_rotation = Rotation3D::new(hdg, pitch, roll);
    Affine3D {
        rotation: base_pose.rotation.then(object_rotation),
        translation: base_pose.point.add(base_pose.rotation.apply(Vector3D::new(0.0, t, z_offset))),
    }
}

/// Resolves one outline corner to a world point: road-relative corners are read off the
/// road surface at their own `(s, t)`; local corners are placed by transforming their
/// `(u, v, z)` through the object's own affine frame rather than being dropped.
fn corner_base_point(corner: &Corner, road_surface: &CurveRelativeParametricSurface3D, object_affine: &Affine3D) -> Vector3D {
    match corner {
        Corner::Road(r) => {
            let p = road_surface.point_unbounded(r.s.value, r.t.value);
            Vector3D::new(p.x, p.y, p.z + r.dz.value)
        }
        Corner::Local(l) => object_affine.transform_point(Vector3D::new(l.u.value, l.v.value, l.z.value)),
    }
}

fn corner_height(corner: &Corner) -> f64 {
    match corner {
        Corner::Road(r) => r.height.value,
        Corner::Local(l) => l.height.value,
    }
}

/// Highest-priority tiers: a closed outline, extruded into a polyhedron when every corner
/// carries a positive height, road- and local-relative corners both resolved to world
/// points and mixed freely within one outline.
fn outline_polyhedron(
    object: &RoadObject,
    road_surface: &CurveRelativeParametricSurface3D,
    object_affine: &Affine3D,
    tolerance: f64,
) -> Option<RoadspaceObjectGeometry> {
    let outline = object.outlines.iter().find(|o| o.closed && o.corners.len() >= 3)?;
    if !outline.corners.iter().all(|c| corner_height(c) > tolerance) {
        return None;
    }
    let bottom: Vec<Vector3D> = outline.corners.iter().map(|c| corner_base_point(c, road_surface, object_affine)).collect();
    let top: Vec<Vector3D> =
        outline.corners.iter().zip(&bottom).map(|(c, b)| Vector3D::new(b.x, b.y, b.z + corner_height(c))).collect();
    extrude_rings(bottom, top, tolerance).map(RoadspaceObjectGeometry::Polyhedron)
}

/// Next tiers: a flat closed outline with no extrusion height, road- and local-relative
/// corners resolved the same way as [`outline_polyhedron`].
fn outline_linear_ring(
    object: &RoadObject,
    road_surface: &CurveRelativeParametricSurface3D,
    object_affine: &Affine3D,
    tolerance: f64,
) -> Option<RoadspaceObjectGeometry> {
    let outline = object.outlines.iter().find(|o| o.closed && o.corners.len() >= 3)?;
    let points: Vec<Vector3D> = outline.corners.iter().map(|c| corner_base_point(c, road_surface, object_affine)).collect();
    LinearRing3D::try_new(points, tolerance).ok().map(RoadspaceObjectGeometry::LinearRing)
}

/// Lowest structural tier: a cuboid or cylinder built from already-resolved dimensions,
/// shared by the base object and each repeat instance.
fn dimensioned_solid(
    length: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    object_affine: &Affine3D,
    circle_slices: usize,
    tolerance: f64,
) -> Option<RoadspaceObjectGeometry> {
    if let (Some(length), Some(width), Some(height)) = (length, width, height) {
        if let Ok(solid) = Solid3D::cuboid(length, width, height, tolerance) {
            let sequence = AffineSequence::new(vec![*object_affine]);
            if let Ok(faces) = solid.global_faces(&sequence, tolerance) {
                return Some(RoadspaceObjectGeometry::Polyhedron(faces));
            }
        }
    }
    if let (Some(radius), Some(height)) = (radius, height) {
        if let Ok(solid) = Solid3D::cylinder(radius, height, circle_slices) {
            let sequence = AffineSequence::new(vec![*object_affine]);
            if let Ok(faces) = solid.global_faces(&sequence, tolerance) {
                return Some(RoadspaceObjectGeometry::Polyhedron(faces));
            }
        }
    }
    None
}

fn lerp(start: f64, end: f64, fraction: f64) -> f64 {
    start + (end - start) * fraction
}

/// Expands one `repeat` block into a discrete series of `RoadspaceObject`s along
/// `[repeat.s, repeat.s + repeat.length]`, stepping at `repeat.distance` (or, for a
/// continuous repeat with `distance <= tolerance`, at `sweepDiscretizationStepSize`) and
/// linearly interpolating every start/end dimension pair across instances (spec §4.9 step
/// 4's closing sentence; SPEC_FULL.md §B.1).
fn expand_repeat(
    object: &RoadObject,
    repeat: &Repeat,
    repeat_index: usize,
    reference_line: &Curve3D,
    params: &ConversionParameters,
) -> Vec<RoadspaceObject> {
    let tolerance = params.number_tolerance;
    let length = repeat.length.value;
    let step = if repeat.distance.value > tolerance { repeat.distance.value } else { params.sweep_discretization_step_size.max(tolerance) };

    let count = if length <= tolerance { 1 } else { (length / step).floor() as usize + 1 };
    let mut instances = Vec::with_capacity(count);
    for i in 0..count {
        let local_s = (step * i as f64).min(length);
        let fraction = if length > tolerance { local_s / length } else { 0.0 };

        let s = repeat.s.value + local_s;
        let t = lerp(repeat.t_start.value, repeat.t_end.value, fraction);
        let z_offset = lerp(repeat.z_offset_start.value, repeat.z_offset_end.value, fraction);
        let height = lerp(repeat.height_start.value, repeat.height_end.value, fraction);
        let width = interpolated_or_base(repeat.width_start, repeat.width_end, fraction, object.width);
        let instance_length = interpolated_or_base(repeat.length_start, repeat.length_end, fraction, object.length);
        let radius = interpolated_or_base(repeat.radius_start, repeat.radius_end, fraction, object.radius);

        let object_affine = object_pose_affine(reference_line, s, t, z_offset, object.hdg, object.pitch, object.roll);
        let geometry = dimensioned_solid(instance_length, width, Some(height), radius, &object_affine, params.circle_slices, tolerance)
            .unwrap_or_else(|| RoadspaceObjectGeometry::Point(object_affine.translation));

        instances.push(RoadspaceObject {
            id: format!("{}.repeat{repeat_index}.{i}", object.id),
            object_type: object.object_type,
            name: object.name.clone(),
            geometry,
            attributes: object_attributes(object),
        });
    }
    instances
}

/// Linearly interpolates a repeat's start/end pair when both are given, otherwise falls
/// back to the base object's own (non-tapering) dimension.
fn interpolated_or_base(start: Option<uom::si::f64::Length>, end: Option<uom::si::f64::Length>, fraction: f64, base: Option<uom::si::f64::Length>) -> Option<f64> {
    match (start, end) {
        (Some(start), Some(end)) => Some(lerp(start.value, end.value, fraction)),
        _ => base.map(|b| b.value),
    }
}

/// Builds the side-wall + cap faces of a prism between two matching rings (spec §4.7's
/// `ParametricSweep` shape, specialized to a 2-ring extrusion).
fn extrude_rings(bottom: Vec<Vector3D>, top: Vec<Vector3D>, tolerance: f64) -> Option<Vec<Polygon3D>> {
    if bottom.len() != top.len() || bottom.len() < 3 {
        return None;
    }
    let n = bottom.len();
    let mut faces = Vec::with_capacity(n + 2);
    faces.push(Polygon3D::new(LinearRing3D::try_new(bottom.iter().rev().cloned().collect(), tolerance).ok()?));
    faces.push(Polygon3D::new(LinearRing3D::try_new(top.clone(), tolerance).ok()?));
    for i in 0..n {
        let j = (i + 1) % n;
        let quad = vec![bottom[i], bottom[j], top[j], top[i]];
        faces.push(Polygon3D::new(LinearRing3D::try_new(quad, tolerance).ok()?));
    }
    Some(faces)
}

/// Step 5 (spec §4.9): junctions reference roadspaces by identifier value (spec §9).
fn convert_junction(junction: &crate::pr::junction::Junction, issues: &mut IssueList) -> Junction {
    let connections = junction
        .connection
        .iter()
        .map(|connection| {
            if connection.incoming_road.is_none() || connection.connecting_road.is_none() {
                issues.push(
                    Issue::new(
                        "JunctionConnectionMissingRoad",
                        format!("junction {}: connection {} is missing an incoming or connecting road reference", junction.id, connection.id),
                        Severity::Warning,
                    )
                    .with_location(Identifier::junction(junction.id.clone())),
                );
            }
            Connection {
                id: connection.id.clone(),
                incoming_roadspace_id: connection.incoming_road.clone().unwrap_or_default(),
                connecting_roadspace_id: connection.connecting_road.clone().unwrap_or_default(),
                connecting_contact_point: connection.contact_point.unwrap_or_default(),
                lane_links: connection.lane_link.iter().map(|l| (l.from, l.to)).collect(),
            }
        })
        .collect();
    Junction { id: junction.id.clone(), connections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::lane::{LaneSection, LaneType, Lanes, Width};
    use crate::pr::road::Link;
    use uom::si::angle::radian;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    fn straight_road(length: f64) -> Road {
        Road {
            id: "1".to_string(),
            name: None,
            length: Length::new::<meter>(length),
            junction_id: None,
            rule: Default::default(),
            link: Link::default(),
            plan_view: crate::pr::geometry::PlanView {
                geometry: vec![PlanViewGeometry {
                    s: Length::new::<meter>(0.0),
                    x: Length::new::<meter>(0.0),
                    y: Length::new::<meter>(0.0),
                    hdg: Angle::new::<radian>(0.0),
                    length: Length::new::<meter>(length),
                    geometry_type: GeometryType::Line,
                }],
            },
            elevation_profile: Vec::new(),
            lateral_profile: Default::default(),
            lanes: Lanes::default(),
            objects: Vec::new(),
            signals: Vec::new(),
        }
    }

    #[test]
    fn straight_road_builds_a_reference_line_matching_scenario_s1() {
        let road = straight_road(10.0);
        let mut issues = IssueList::new();
        let curve = build_reference_line(&road, &ConversionParameters::default(), &mut issues).unwrap();
        let end = curve.calculate_point(10.0).unwrap();
        assert!(end.fuzzy_equals(Vector3D::new(10.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn single_right_lane_outer_boundary_equals_its_width() {
        let mut road = straight_road(10.0);
        let mut lane = Lane::new_center(-1);
        lane.side = LaneSide::Right;
        lane.lane_type = LaneType::Driving;
        lane.width = vec![Width { s_offset: 0.0, a: 3.5, b: 0.0, c: 0.0, d: 0.0 }];
        road.lanes.lane_section.push(LaneSection { s: 0.0, single_side: false, left: Vec::new(), center: vec![Lane::new_center(0)], right: vec![lane] });

        let params = ConversionParameters::default();
        let (sections, _) = build_road_body(&road, &params);
        let right_lane = sections[0].lane(-1).unwrap();
        assert!((right_lane.t_outer.value_unbounded(0.0) - (-3.5)).abs() < 1e-9);
        assert!((right_lane.t_inner.value_unbounded(0.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn stacked_right_lanes_accumulate_outward() {
        let mut road = straight_road(10.0);
        let mut lane1 = Lane::new_center(-1);
        lane1.side = LaneSide::Right;
        lane1.width = vec![Width { s_offset: 0.0, a: 3.0, b: 0.0, c: 0.0, d: 0.0 }];
        let mut lane2 = Lane::new_center(-2);
        lane2.side = LaneSide::Right;
        lane2.width = vec![Width { s_offset: 0.0, a: 2.0, b: 0.0, c: 0.0, d: 0.0 }];
        road.lanes.lane_section.push(LaneSection {
            s: 0.0,
            single_side: false,
            left: Vec::new(),
            center: vec![Lane::new_center(0)],
            right: vec![lane1, lane2],
        });

        let params = ConversionParameters::default();
        let (sections, _) = build_road_body(&road, &params);
        let lane2 = sections[0].lane(-2).unwrap();
        assert!((lane2.t_inner.value_unbounded(0.0) - (-3.0)).abs() < 1e-9);
        assert!((lane2.t_outer.value_unbounded(0.0) - (-5.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_plan_view_is_rejected() {
        let mut road = straight_road(10.0);
        road.plan_view.geometry.clear();
        let mut issues = IssueList::new();
        assert!(build_reference_line(&road, &ConversionParameters::default(), &mut issues).is_err());
    }

    #[test]
    fn sub_tolerance_gap_between_segments_is_healed_with_a_warning() {
        let mut road = straight_road(10.0);
        road.plan_view.geometry = vec![
            PlanViewGeometry {
                s: Length::new::<meter>(0.0),
                x: Length::new::<meter>(0.0),
                y: Length::new::<meter>(0.0),
                hdg: Angle::new::<radian>(0.0),
                length: Length::new::<meter>(5.0),
                geometry_type: GeometryType::Line,
            },
            PlanViewGeometry {
                s: Length::new::<meter>(5.0000001),
                x: Length::new::<meter>(5.0000001),
                y: Length::new::<meter>(0.0),
                hdg: Angle::new::<radian>(0.0),
                length: Length::new::<meter>(5.0),
                geometry_type: GeometryType::Line,
            },
        ];

        let params = ConversionParameters { plan_view_geometry_distance_tolerance: 1e-2, ..ConversionParameters::default() };
        let mut issues = IssueList::new();
        let curve = build_reference_line(&road, &params, &mut issues).unwrap();
        assert!(curve.calculate_point(10.0).is_ok());
        assert_eq!(issues.count(Severity::Warning), 1);
        assert_eq!(issues.0[0].kind, "OverlapOrGapInCurve");
        assert!((issues.0[0].numeric_values["gap"] - 1e-7).abs() < 1e-12);
    }

    #[test]
    fn superelevation_extends_below_first_breakpoint_as_a_constant() {
        use crate::pr::profile::SuperelevationRecord;
        let mut road = straight_road(10.0);
        road.lateral_profile.superelevation = vec![SuperelevationRecord { s: 5.0, a: 0.2, b: 0.1, c: 0.0, d: 0.0 }];
        let mut issues = IssueList::new();
        let curve = build_reference_line(&road, &ConversionParameters::default(), &mut issues).unwrap();
        let roll_before = curve.pose_unbounded(0.0).rotation.roll;
        let roll_at_breakpoint = curve.pose_unbounded(5.0).rotation.roll;
        assert!((roll_before - 0.2).abs() < 1e-9);
        assert!((roll_at_breakpoint - 0.2).abs() < 1e-9);
    }

    fn sample_object(id: &str) -> RoadObject {
        RoadObject {
            id: id.to_string(),
            object_type: Default::default(),
            name: None,
            s: Length::new::<meter>(5.0),
            t: Length::new::<meter>(0.0),
            z_offset: Length::new::<meter>(0.0),
            valid_length: Length::new::<meter>(0.0),
            orientation_plus: true,
            length: None,
            width: None,
            height: None,
            radius: None,
            hdg: 0.0,
            pitch: 0.0,
            roll: 0.0,
            outlines: Vec::new(),
            repeat: Vec::new(),
            material: None,
            validity: Vec::new(),
            markings: Vec::new(),
        }
    }

    #[test]
    fn local_corners_are_placed_at_the_object_affine_frame_not_dropped() {
        use crate::pr::object::{CornerLocal, Outline};
        let road = straight_road(10.0);
        let mut issues = IssueList::new();
        let reference_line = build_reference_line(&road, &ConversionParameters::default(), &mut issues).unwrap();
        let road_surface = build_road_surface(&road, &reference_line, &ConversionParameters::default());

        let mut object = sample_object("pole1");
        object.outlines.push(Outline {
            id: None,
            closed: true,
            outer: true,
            fill_type: None,
            corners: vec![
                Corner::Local(CornerLocal { id: None, u: Length::new::<meter>(0.0), v: Length::new::<meter>(0.0), z: Length::new::<meter>(0.0), height: Length::new::<meter>(0.0) }),
                Corner::Local(CornerLocal { id: None, u: Length::new::<meter>(1.0), v: Length::new::<meter>(0.0), z: Length::new::<meter>(0.0), height: Length::new::<meter>(0.0) }),
                Corner::Local(CornerLocal { id: None, u: Length::new::<meter>(0.0), v: Length::new::<meter>(1.0), z: Length::new::<meter>(0.0), height: Length::new::<meter>(0.0) }),
            ],
        });

        let objects = build_roadspace_object(&object, &reference_line, &road_surface, &ConversionParameters::default());
        assert_eq!(objects.len(), 1);
        match &objects[0].geometry {
            RoadspaceObjectGeometry::LinearRing(ring) => assert_eq!(ring.vertices().len(), 3),
            other => panic!("expected a linear ring geometry from local corners, got {other:?}"),
        }
    }

    #[test]
    fn repeat_expands_into_one_roadspace_object_per_instance() {
        let road = straight_road(10.0);
        let mut issues = IssueList::new();
        let reference_line = build_reference_line(&road, &ConversionParameters::default(), &mut issues).unwrap();
        let road_surface = build_road_surface(&road, &reference_line, &ConversionParameters::default());

        let mut object = sample_object("tree1");
        object.repeat.push(Repeat {
            s: Length::new::<meter>(0.0),
            length: Length::new::<meter>(4.0),
            distance: Length::new::<meter>(2.0),
            t_start: Length::new::<meter>(-2.0),
            t_end: Length::new::<meter>(-2.0),
            width_start: Some(Length::new::<meter>(0.5)),
            width_end: Some(Length::new::<meter>(1.0)),
            height_start: Length::new::<meter>(2.0),
            height_end: Length::new::<meter>(2.0),
            length_start: Some(Length::new::<meter>(0.5)),
            length_end: Some(Length::new::<meter>(1.0)),
            radius_start: None,
            radius_end: None,
            z_offset_start: Length::new::<meter>(0.0),
            z_offset_end: Length::new::<meter>(0.0),
        });

        let objects = build_roadspace_object(&object, &reference_line, &road_surface, &ConversionParameters::default());
        // the base (unrepeated) object plus three instances at s = 0, 2, 4
        assert_eq!(objects.len(), 4);
        for instance in &objects[1..] {
            assert!(matches!(instance.geometry, RoadspaceObjectGeometry::Polyhedron(_)));
        }
        assert_ne!(objects[1].id, objects[2].id);
    }
}
