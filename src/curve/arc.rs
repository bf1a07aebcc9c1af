use crate::curve::curve2d::AbstractCurve2D;
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// A constant-curvature plan-view segment (spec §4.4). The sign of `curvature`
/// determines turn direction: positive curves left (counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment2D {
    curvature: f64,
    start_pose: Pose2D,
    domain: Range,
    tolerance: f64,
}

impl ArcSegment2D {
    pub fn new(curvature: f64, start_pose: Pose2D, domain: Range, tolerance: f64) -> Self {
        Self { curvature, start_pose, domain, tolerance }
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }
}

impl AbstractCurve2D for ArcSegment2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        let l = s - self.domain.lower_value();
        let h0 = self.start_pose.rotation.angle();
        if self.curvature.abs() < 1e-14 {
            let direction = self.start_pose.rotation.apply(Vector2D::new(1.0, 0.0));
            return self.start_pose.point.add(direction.scale(l));
        }
        let angle = self.curvature * l;
        let dx = (f64::sin(h0 + angle) - f64::sin(h0)) / self.curvature;
        let dy = -(f64::cos(h0 + angle) - f64::cos(h0)) / self.curvature;
        self.start_pose.point.add(Vector2D::new(dx, dy))
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        let l = s - self.domain.lower_value();
        Rotation2D::new(self.start_pose.rotation.angle() + self.curvature * l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_matches_scenario_s2() {
        let arc = ArcSegment2D::new(
            1.0,
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, FRAC_PI_2),
            1e-9,
        );
        let pose = arc.calculate_pose_local_cs(FRAC_PI_2).unwrap();
        assert!(pose.point.fuzzy_equals(Vector2D::new(1.0, 1.0), 1e-9));
        assert!((pose.rotation.angle() - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn zero_curvature_degenerates_to_line() {
        let arc = ArcSegment2D::new(
            0.0,
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 10.0),
            1e-9,
        );
        let pose = arc.calculate_pose_local_cs(10.0).unwrap();
        assert!(pose.point.fuzzy_equals(Vector2D::new(10.0, 0.0), 1e-9));
    }
}
