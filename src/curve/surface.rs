//! `CurveRelativeParametricSurface3D` (spec §3/§4.6): a surface addressed by curve-relative
//! coordinates `(s, t)`, built by offsetting a [`Curve3D`] laterally by `t` and vertically by
//! a height function `h(s, t)` (e.g. a lane's road-mark or object elevation), both expressed
//! in the reference line's local frame at `s`.

use crate::curve::Curve3D;
use crate::error::GeometricResult;
use crate::function::BivariateFunction;
use crate::geom::{CurveRelativeVector2D, Vector3D};
use crate::range::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct CurveRelativeParametricSurface3D {
    reference: Curve3D,
    height: BivariateFunction,
    tolerance: f64,
}

impl CurveRelativeParametricSurface3D {
    pub fn new(reference: Curve3D, height: BivariateFunction, tolerance: f64) -> Self {
        Self { reference, height, tolerance }
    }

    pub fn domain_s(&self) -> Range {
        self.reference.domain()
    }

    pub fn point_unbounded(&self, s: f64, t: f64) -> Vector3D {
        let pose = self.reference.pose_unbounded(s);
        let h = self.height.value_unbounded(s, t);
        let local = Vector3D::new(0.0, t, h);
        pose.point.add(pose.rotation.apply(local))
    }

    pub fn calculate_point(&self, curve_relative: CurveRelativeVector2D) -> GeometricResult<Vector3D> {
        self.reference.calculate_point(curve_relative.s)?;
        Ok(self.point_unbounded(curve_relative.s, curve_relative.t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Curve2D, LineSegment2D};
    use crate::function::UnivariateFunction;
    use crate::geom::{Pose2D, Rotation2D, Vector2D};

    #[test]
    fn lateral_offset_on_a_straight_flat_road_moves_perpendicular_to_travel() {
        let plan_view = Curve2D::Line(LineSegment2D::new(
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 10.0),
            1e-9,
        ));
        let reference = Curve3D::new(
            plan_view,
            UnivariateFunction::constant(0.0, Range::all()),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        )
        .unwrap();
        let height = BivariateFunction::plane(0.0, 0.0, 0.0, Range::all(), Range::all());
        let surface = CurveRelativeParametricSurface3D::new(reference, height, 1e-9);
        let point = surface.calculate_point(CurveRelativeVector2D { s: 5.0, t: -3.5 }).unwrap();
        assert!(point.fuzzy_equals(Vector3D::new(5.0, -3.5, 0.0), 1e-9));
    }
}
