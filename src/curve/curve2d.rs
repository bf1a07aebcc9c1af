//! `Curve2D` (spec §3 "Curve2D ≡ AbstractCurve2D"): domain, tolerance, and
//! point/rotation/pose evaluation, each available bounded and unbounded. Implemented as a
//! tagged sum per spec §9's design note ("model each family as a tagged sum... dispatch
//! is by match, not virtual call"); shared behaviour (domain, tolerance) lives in the
//! enum envelope.

use crate::curve::{
    ArcSegment2D, CompositeCurve2D, CubicCurve2D, LineSegment2D, ParameterTransformedCurve2D, ParametricCubicCurve2D,
    SpiralSegment2D,
};
use crate::error::{DomainSnapshot, GeometricError, GeometricResult};
use crate::geom::{Pose2D, Rotation2D, Vector2D};
use crate::range::Range;

/// Common surface every curve primitive exposes, used internally by [`Curve2D`]'s match
/// arms and directly by callers that hold a concrete primitive (e.g. a fresh
/// `LineSegment2D` before it is wrapped).
pub trait AbstractCurve2D {
    fn domain(&self) -> Range;
    fn tolerance(&self) -> f64;

    fn point_local_unbounded(&self, s: f64) -> Vector2D;
    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D;

    fn pose_local_unbounded(&self, s: f64) -> Pose2D {
        Pose2D { point: self.point_local_unbounded(s), rotation: self.rotation_local_unbounded(s) }
    }

    fn check_domain(&self, s: f64) -> GeometricResult<()> {
        if self.domain().fuzzy_contains(s, self.tolerance()) {
            Ok(())
        } else {
            Err(GeometricError::OutOfDomain {
                x: s,
                domain: DomainSnapshot { lower: self.domain().lower_value(), upper: self.domain().upper_value() },
            })
        }
    }

    fn calculate_point_local_cs(&self, s: f64) -> GeometricResult<Vector2D> {
        self.check_domain(s)?;
        Ok(self.point_local_unbounded(s))
    }

    fn calculate_rotation_local_cs(&self, s: f64) -> GeometricResult<Rotation2D> {
        self.check_domain(s)?;
        Ok(self.rotation_local_unbounded(s))
    }

    fn calculate_pose_local_cs(&self, s: f64) -> GeometricResult<Pose2D> {
        self.check_domain(s)?;
        Ok(self.pose_local_unbounded(s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Curve2D {
    Line(LineSegment2D),
    Arc(ArcSegment2D),
    Spiral(SpiralSegment2D),
    Cubic(CubicCurve2D),
    ParamCubic(ParametricCubicCurve2D),
    ParamTransformed(Box<ParameterTransformedCurve2D>),
    Composite(CompositeCurve2D),
}

macro_rules! dispatch {
    ($self:expr, $variant_method:ident $(, $arg:expr)*) => {
        match $self {
            Curve2D::Line(c) => c.$variant_method($($arg),*),
            Curve2D::Arc(c) => c.$variant_method($($arg),*),
            Curve2D::Spiral(c) => c.$variant_method($($arg),*),
            Curve2D::Cubic(c) => c.$variant_method($($arg),*),
            Curve2D::ParamCubic(c) => c.$variant_method($($arg),*),
            Curve2D::ParamTransformed(c) => c.$variant_method($($arg),*),
            Curve2D::Composite(c) => c.$variant_method($($arg),*),
        }
    };
}

impl AbstractCurve2D for Curve2D {
    fn domain(&self) -> Range {
        dispatch!(self, domain)
    }

    fn tolerance(&self) -> f64 {
        dispatch!(self, tolerance)
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        dispatch!(self, point_local_unbounded, s)
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        dispatch!(self, rotation_local_unbounded, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector2D as V2;

    #[test]
    fn boundary_value_within_tolerance_succeeds_beyond_fails() {
        let line = LineSegment2D::new(
            Pose2D { point: V2::new(0.0, 0.0), rotation: Rotation2D::new(0.0) },
            Range::closed(0.0, 10.0),
            1e-6,
        );
        let curve = Curve2D::Line(line);
        assert!(curve.calculate_point_local_cs(10.0 + 1e-9).is_ok());
        assert!(curve.calculate_point_local_cs(10.1).is_err());
    }
}
