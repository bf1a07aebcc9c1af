use crate::curve::curve2d::AbstractCurve2D;
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// A parametric-cubic plan-view segment: `u(p)`/`v(p)` each cubic in the local parameter
/// `p`, both expressed in the local frame of `start_pose` (spec §3
/// "ParameterTransformedCurve2D"... no: "cubic & parametric-cubic polynomials" of
/// component C6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCubicCurve2D {
    a_u: f64,
    b_u: f64,
    c_u: f64,
    d_u: f64,
    a_v: f64,
    b_v: f64,
    c_v: f64,
    d_v: f64,
    start_pose: Pose2D,
    domain: Range,
    tolerance: f64,
}

impl ParametricCubicCurve2D {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a_u: f64,
        b_u: f64,
        c_u: f64,
        d_u: f64,
        a_v: f64,
        b_v: f64,
        c_v: f64,
        d_v: f64,
        start_pose: Pose2D,
        domain: Range,
        tolerance: f64,
    ) -> Self {
        Self { a_u, b_u, c_u, d_u, a_v, b_v, c_v, d_v, start_pose, domain, tolerance }
    }

    fn local_uv(&self, p: f64) -> (f64, f64) {
        let u = self.a_u + self.b_u * p + self.c_u * p * p + self.d_u * p * p * p;
        let v = self.a_v + self.b_v * p + self.c_v * p * p + self.d_v * p * p * p;
        (u, v)
    }

    fn local_duv(&self, p: f64) -> (f64, f64) {
        let du = self.b_u + 2.0 * self.c_u * p + 3.0 * self.d_u * p * p;
        let dv = self.b_v + 2.0 * self.c_v * p + 3.0 * self.d_v * p * p;
        (du, dv)
    }
}

impl AbstractCurve2D for ParametricCubicCurve2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        let p = s - self.domain.lower_value();
        let (u, v) = self.local_uv(p);
        self.start_pose.point.add(self.start_pose.rotation.apply(Vector2D::new(u, v)))
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        let p = s - self.domain.lower_value();
        let (du, dv) = self.local_duv(p);
        Rotation2D::new(self.start_pose.rotation.angle() + dv.atan2(du))
    }
}
