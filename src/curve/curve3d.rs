//! `Curve3D = Curve2D + elevation + torsion` (spec §3/§4.5): the reference line of a road,
//! lifted into 3D by an elevation profile and banked by a superelevation (torsion) profile.

use crate::curve::curve2d::AbstractCurve2D;
use crate::curve::Curve2D;
use crate::error::{DomainSnapshot, GeometricError, GeometricResult};
use crate::function::UnivariateFunction;
use crate::geom::{Pose3D, Rotation3D, Vector3D};
use crate::range::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Curve3D {
    plan_view: Curve2D,
    elevation: UnivariateFunction,
    superelevation: UnivariateFunction,
    tolerance: f64,
}

impl Curve3D {
    /// Errs with [`GeometricError::MismatchedDomains`] unless both the elevation and
    /// superelevation functions' domains enclose the plan view's domain within
    /// `tolerance` (spec §3/§4.5: all three sub-models share one domain).
    pub fn new(plan_view: Curve2D, elevation: UnivariateFunction, superelevation: UnivariateFunction, tolerance: f64) -> GeometricResult<Self> {
        let plan_domain = plan_view.domain();
        if !elevation.domain().fuzzy_encloses(&plan_domain, tolerance) || !superelevation.domain().fuzzy_encloses(&plan_domain, tolerance) {
            return Err(GeometricError::MismatchedDomains { tolerance });
        }
        Ok(Self { plan_view, elevation, superelevation, tolerance })
    }

    pub fn plan_view(&self) -> &Curve2D {
        &self.plan_view
    }

    pub fn domain(&self) -> Range {
        self.plan_view.domain()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn check_domain(&self, s: f64) -> GeometricResult<()> {
        if self.domain().fuzzy_contains(s, self.tolerance) {
            Ok(())
        } else {
            Err(GeometricError::OutOfDomain {
                x: s,
                domain: DomainSnapshot { lower: self.domain().lower_value(), upper: self.domain().upper_value() },
            })
        }
    }

    pub fn point_unbounded(&self, s: f64) -> Vector3D {
        let xy = self.plan_view.point_local_unbounded(s);
        let z = self.elevation.value_unbounded(s);
        xy.to_3d(z)
    }

    pub fn rotation_unbounded(&self, s: f64) -> Rotation3D {
        let heading = self.plan_view.rotation_local_unbounded(s).angle();
        let pitch = self.elevation.slope_unbounded(s).atan();
        let roll = self.superelevation.value_unbounded(s);
        Rotation3D::new(heading, pitch, roll)
    }

    pub fn pose_unbounded(&self, s: f64) -> Pose3D {
        Pose3D { point: self.point_unbounded(s), rotation: self.rotation_unbounded(s) }
    }

    pub fn calculate_point(&self, s: f64) -> GeometricResult<Vector3D> {
        self.check_domain(s)?;
        Ok(self.point_unbounded(s))
    }

    pub fn calculate_pose(&self, s: f64) -> GeometricResult<Pose3D> {
        self.check_domain(s)?;
        Ok(self.pose_unbounded(s))
    }

    /// Total 3D length by numerically integrating `sqrt(1 + slope(s)^2)` over the 2D arc
    /// length domain (the reference line's own parameter already is plan-view arc length,
    /// so this is the length correction the elevation profile introduces).
    pub fn length_3d(&self, samples: usize) -> f64 {
        let domain = self.domain();
        let lower = domain.lower_value();
        let upper = domain.upper_value();
        if !lower.is_finite() || !upper.is_finite() || samples == 0 {
            return upper - lower;
        }
        let step = (upper - lower) / samples as f64;
        (0..samples)
            .map(|i| {
                let s = lower + step * (i as f64 + 0.5);
                let slope = self.elevation.slope_unbounded(s);
                (1.0 + slope * slope).sqrt() * step
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::LineSegment2D;
    use crate::geom::{Pose2D, Rotation2D, Vector2D};

    fn flat_line(length: f64) -> Curve2D {
        Curve2D::Line(LineSegment2D::new(
            Pose2D { point: Vector2D::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, length),
            1e-9,
        ))
    }

    #[test]
    fn flat_elevation_keeps_pitch_at_zero() {
        let curve = Curve3D::new(
            flat_line(10.0),
            UnivariateFunction::constant(0.0, Range::all()),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        )
        .unwrap();
        let pose = curve.calculate_pose(5.0).unwrap();
        assert!((pose.point.z).abs() < 1e-12);
        assert!((pose.rotation.pitch).abs() < 1e-12);
    }

    #[test]
    fn ramped_elevation_lifts_z_and_sets_pitch() {
        let curve = Curve3D::new(
            flat_line(10.0),
            UnivariateFunction::linear(0.5, 0.0, Range::all()),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        )
        .unwrap();
        let pose = curve.calculate_pose(4.0).unwrap();
        assert!((pose.point.z - 2.0).abs() < 1e-12);
        assert!((pose.rotation.pitch - 0.5_f64.atan()).abs() < 1e-9);
    }

    #[test]
    fn length_3d_exceeds_plan_length_on_a_grade() {
        let curve = Curve3D::new(
            flat_line(10.0),
            UnivariateFunction::linear(1.0, 0.0, Range::all()),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        )
        .unwrap();
        assert!(curve.length_3d(1000) > 10.0);
    }

    #[test]
    fn elevation_domain_not_covering_plan_view_is_rejected() {
        let result = Curve3D::new(
            flat_line(10.0),
            UnivariateFunction::linear(0.5, 0.0, Range::closed(0.0, 5.0)),
            UnivariateFunction::constant(0.0, Range::all()),
            1e-9,
        );
        assert_eq!(result, Err(GeometricError::MismatchedDomains { tolerance: 1e-9 }));
    }
}
