use crate::curve::curve2d::AbstractCurve2D;
use crate::curve::Curve2D;
use crate::geom::{Rotation2D, Vector2D};
use crate::range::Range;

/// Reparameterizes a wrapped curve whose domain is `[a, b]` so that it is addressed over
/// `[0, reported_length]` instead, via the affine map `outer -> a + outer*(b-a)/reported_length`
/// (spec §4.4 "Parameter transform").
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTransformedCurve2D {
    wrapped: Box<Curve2D>,
    outer_domain: Range,
    tolerance: f64,
}

impl ParameterTransformedCurve2D {
    /// `outer_domain` is the domain the *reported* length implies (e.g. `[s, s+length]`
    /// for a plan-view segment); the wrapped curve's own domain `[a, b]` is the one
    /// actually backing the math.
    pub fn new(wrapped: Curve2D, outer_domain: Range, tolerance: f64) -> Self {
        Self { wrapped: Box::new(wrapped), outer_domain, tolerance }
    }

    fn to_inner(&self, s_outer: f64) -> f64 {
        let inner_domain = self.wrapped.domain();
        let a = inner_domain.lower_value();
        let b = inner_domain.upper_value();
        let reported_length = self.outer_domain.length();
        if reported_length == 0.0 {
            a
        } else {
            a + (s_outer - self.outer_domain.lower_value()) * (b - a) / reported_length
        }
    }
}

impl AbstractCurve2D for ParameterTransformedCurve2D {
    fn domain(&self) -> Range {
        self.outer_domain
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn point_local_unbounded(&self, s: f64) -> Vector2D {
        self.wrapped.point_local_unbounded(self.to_inner(s))
    }

    fn rotation_local_unbounded(&self, s: f64) -> Rotation2D {
        self.wrapped.rotation_local_unbounded(self.to_inner(s))
    }
}
