use crate::curve::curve2d::AbstractCurve2D;
use crate::curve::Curve2D;
use crate::error::{GeometricError, GeometricResult};
use crate::geom::{Rotation2D, Vector2D};
use crate::range::Range;

/// A plan view assembled from consecutive segments, each already expressed with its own
/// absolute arc-length domain. [`CompositeCurve2D::try_new`] enforces the C0-continuity
/// invariant from spec §4.4: the end pose of segment `i` must fuzzy-equal the start pose of
/// segment `i+1`, both in position (else [`GeometricError::OverlapOrGap`], surfaced upstream
/// as `OverlapOrGapInCurve`) and in heading (else [`GeometricError::Kink`], surfaced as
/// `KinkInCurve`). Both are fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve2D {
    segments: Vec<Curve2D>,
    domain: Range,
    tolerance: f64,
}

impl CompositeCurve2D {
    pub fn try_new(segments: Vec<Curve2D>, tolerance: f64) -> GeometricResult<Self> {
        if segments.is_empty() {
            return Err(GeometricError::EmptyDomain);
        }
        for pair in segments.windows(2) {
            let end = pair[0].calculate_pose_local_cs(pair[0].domain().upper_value())?;
            let start = pair[1].calculate_pose_local_cs(pair[1].domain().lower_value())?;
            let distance = end.point.distance(start.point);
            if distance > tolerance {
                return Err(GeometricError::OverlapOrGap { distance, tolerance });
            }
            let angle = (end.rotation.angle() - start.rotation.angle()).abs();
            let angle = angle.min(2.0 * std::f64::consts::PI - angle);
            if angle > tolerance {
                return Err(GeometricError::Kink { angle, tolerance });
            }
        }
        let lower = segments.first().unwrap().domain().lower_value();
        let upper = segments.last().unwrap().domain().upper_value();
        Ok(Self { segments, domain: Range::closed(lower, upper), tolerance })
    }

    fn segment_for(&self, s: f64) -> &Curve2D {
        let mut chosen = &self.segments[0];
        for segment in &self.segments {
            if segment.domain().fuzzy_contains(s, self.tolerance) {
                chosen = segment;
            }
            if segment.domain().lower_value() <= s {
                chosen = segment;
            } else {
                break;
            }
        }
        chosen
    }

    pub fn segments(&self) -> &[Curve2D] {
        &self.segments
    }
}

impl AbstractCurve2D for CompositeCurve2D {
    fn domain(&self) -> Range {
        self.domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        self.segment_for(s).point_local_unbounded(s)
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        self.segment_for(s).rotation_local_unbounded(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::LineSegment2D;
    use crate::geom::Pose2D;

    fn line(x0: f64, y0: f64, heading: f64, from: f64, to: f64) -> Curve2D {
        Curve2D::Line(LineSegment2D::new(
            Pose2D { point: Vector2D::new(x0, y0), rotation: Rotation2D::new(heading) },
            Range::closed(from, to),
            1e-9,
        ))
    }

    #[test]
    fn two_collinear_segments_join_without_error() {
        let first = line(0.0, 0.0, 0.0, 0.0, 5.0);
        let second = line(5.0, 0.0, 0.0, 5.0, 10.0);
        let composite = CompositeCurve2D::try_new(vec![first, second], 1e-9).unwrap();
        let end = composite.calculate_point_local_cs(10.0).unwrap();
        assert!(end.fuzzy_equals(Vector2D::new(10.0, 0.0), 1e-9));
    }

    #[test]
    fn gap_between_segments_is_rejected() {
        let first = line(0.0, 0.0, 0.0, 0.0, 5.0);
        let second = line(6.0, 0.0, 0.0, 5.0, 10.0);
        let err = CompositeCurve2D::try_new(vec![first, second], 1e-6).unwrap_err();
        assert!(matches!(err, GeometricError::OverlapOrGap { .. }));
    }

    #[test]
    fn heading_kink_between_segments_is_rejected() {
        let first = line(0.0, 0.0, 0.0, 0.0, 5.0);
        let second = line(5.0, 0.0, std::f64::consts::FRAC_PI_2, 5.0, 10.0);
        let err = CompositeCurve2D::try_new(vec![first, second], 1e-6).unwrap_err();
        assert!(matches!(err, GeometricError::Kink { .. }));
    }
}
