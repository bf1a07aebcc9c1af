use crate::curve::curve2d::AbstractCurve2D;
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// A cubic-polynomial plan-view segment: `v(p) = a + b*p + c*p^2 + d*p^3` in the local
/// frame of `start_pose`, `p` the local arc-length-like parameter (spec §3 "CubicCurve2D").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve2D {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    start_pose: Pose2D,
    domain: Range,
    tolerance: f64,
}

impl CubicCurve2D {
    pub fn new(a: f64, b: f64, c: f64, d: f64, start_pose: Pose2D, domain: Range, tolerance: f64) -> Self {
        Self { a, b, c, d, start_pose, domain, tolerance }
    }

    fn local_v(&self, p: f64) -> f64 {
        self.a + self.b * p + self.c * p * p + self.d * p * p * p
    }

    fn local_slope(&self, p: f64) -> f64 {
        self.b + 2.0 * self.c * p + 3.0 * self.d * p * p
    }
}

impl AbstractCurve2D for CubicCurve2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        let p = s - self.domain.lower_value();
        let local = Vector2D::new(p, self.local_v(p));
        self.start_pose.point.add(self.start_pose.rotation.apply(local))
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        let p = s - self.domain.lower_value();
        Rotation2D::new(self.start_pose.rotation.angle() + self.local_slope(p).atan())
    }
}
