use crate::curve::curve2d::AbstractCurve2D;
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// A straight plan-view segment (spec §4.4).
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment2D {
    start_pose: Pose2D,
    domain: Range,
    tolerance: f64,
}

impl LineSegment2D {
    pub fn new(start_pose: Pose2D, domain: Range, tolerance: f64) -> Self {
        Self { start_pose, domain, tolerance }
    }
}

impl AbstractCurve2D for LineSegment2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        let ds = s - self.domain.lower_value();
        let direction = self.start_pose.rotation.apply(Vector2D::new(1.0, 0.0));
        self.start_pose.point.add(direction.scale(ds))
    }

    fn rotation_local_unbounded(&self, _s: f64) -> Rotation2D {
        self.start_pose.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_segment_matches_scenario_s1() {
        let line = LineSegment2D::new(
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 10.0),
            1e-6,
        );
        let pose = line.calculate_pose_local_cs(5.0).unwrap();
        assert!(pose.point.fuzzy_equals(Vector2D::new(5.0, 0.0), 1e-12));
        assert!((pose.rotation.angle()).abs() < 1e-12);
    }
}
