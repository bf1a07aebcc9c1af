//! Linear, polynomial, piecewise-concatenated, sectioned, and stacked (sum/product)
//! univariate functions (spec §4.3). `value`/`slope` are bounded (return
//! [`GeometricError::OutOfDomain`] outside the fuzzy domain); `value_unbounded`/
//! `slope_unbounded` never fail.

use crate::error::{DomainSnapshot, GeometricError, GeometricResult};
use crate::range::{Bound, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCombiner {
    Sum,
    Product,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnivariateFunction {
    Linear {
        slope: f64,
        intercept: f64,
        domain: Range,
    },
    Polynomial {
        coeffs: Vec<f64>,
        domain: Range,
    },
    /// `ofPolynomials`: `breakpoints` strictly ascending, one piece per breakpoint. Piece
    /// `i` is valid on `[breakpoints[i], breakpoints[i+1])` except the last, which is
    /// closed. Each piece is evaluated at the *local* parameter `x - breakpoints[i]`.
    Concatenated {
        breakpoints: Vec<f64>,
        pieces: Vec<UnivariateFunction>,
        /// When set, the domain is extended to `(-inf, breakpoints[0]]` with this
        /// constant value.
        prepend_constant_value: Option<f64>,
    },
    Sectioned {
        wrapped: Box<UnivariateFunction>,
        sub_domain: Range,
    },
    Stacked {
        members: Vec<UnivariateFunction>,
        combiner: StackCombiner,
    },
}

impl UnivariateFunction {
    pub fn linear(slope: f64, intercept: f64, domain: Range) -> Self {
        UnivariateFunction::Linear { slope, intercept, domain }
    }

    /// Builds a linear function through two points; `value(p1.0) == p1.1` and
    /// `value(p2.0) == p2.1` to within `1e-12` (spec §8 round-trip law #6).
    pub fn of_inclusive_points(p1: (f64, f64), p2: (f64, f64)) -> GeometricResult<Self> {
        if (p2.0 - p1.0).abs() < f64::EPSILON {
            return Err(GeometricError::EmptyDomain);
        }
        let slope = (p2.1 - p1.1) / (p2.0 - p1.0);
        let intercept = p1.1 - slope * p1.0;
        let (lo, hi) = if p1.0 <= p2.0 { (p1.0, p2.0) } else { (p2.0, p1.0) };
        Ok(UnivariateFunction::linear(slope, intercept, Range::closed(lo, hi)))
    }

    pub fn polynomial(coeffs: Vec<f64>, domain: Range) -> Self {
        UnivariateFunction::Polynomial { coeffs, domain }
    }

    pub fn constant(value: f64, domain: Range) -> Self {
        UnivariateFunction::Polynomial { coeffs: vec![value], domain }
    }

    /// Builds a `Concatenated` from cubic coefficient rows `(a, b, c, d)`, one per
    /// breakpoint. `breakpoints` must be strictly ascending (caller's responsibility --
    /// the evaluator heals this upstream via `filter_to_strictly_sorted_by`).
    pub fn of_cubics(
        breakpoints: Vec<f64>,
        coeffs: Vec<(f64, f64, f64, f64)>,
        prepend_constant: bool,
        prepend_constant_value: Option<f64>,
    ) -> GeometricResult<Self> {
        if breakpoints.len() != coeffs.len() || breakpoints.is_empty() {
            return Err(GeometricError::EmptyDomain);
        }
        for (i, w) in breakpoints.windows(2).enumerate() {
            if w[1] <= w[0] {
                return Err(GeometricError::UnsortedBreakpoints { index: i + 1 });
            }
        }
        let pieces = coeffs
            .into_iter()
            .map(|(a, b, c, d)| UnivariateFunction::polynomial(vec![a, b, c, d], Range::all()))
            .collect();
        let prepend_value = if prepend_constant {
            Some(prepend_constant_value.unwrap_or(0.0))
        } else {
            None
        };
        Ok(UnivariateFunction::Concatenated { breakpoints, pieces, prepend_constant_value: prepend_value })
    }

    pub fn sectioned(wrapped: UnivariateFunction, sub_domain: Range, tolerance: f64) -> GeometricResult<Self> {
        if !wrapped.domain().fuzzy_encloses(&sub_domain, tolerance) {
            return Err(GeometricError::MismatchedDomains { tolerance });
        }
        Ok(UnivariateFunction::Sectioned { wrapped: Box::new(wrapped), sub_domain })
    }

    pub fn stacked_sum(members: Vec<UnivariateFunction>) -> Self {
        UnivariateFunction::Stacked { members, combiner: StackCombiner::Sum }
    }

    pub fn stacked_product(members: Vec<UnivariateFunction>) -> Self {
        UnivariateFunction::Stacked { members, combiner: StackCombiner::Product }
    }

    pub fn domain(&self) -> Range {
        match self {
            UnivariateFunction::Linear { domain, .. } => *domain,
            UnivariateFunction::Polynomial { domain, .. } => *domain,
            UnivariateFunction::Concatenated { breakpoints, prepend_constant_value, .. } => {
                let lower = if prepend_constant_value.is_some() {
                    Bound::Open(f64::NEG_INFINITY)
                } else {
                    Bound::Closed(breakpoints[0])
                };
                Range::new(lower, Bound::Closed(f64::INFINITY))
            }
            UnivariateFunction::Sectioned { sub_domain, .. } => *sub_domain,
            UnivariateFunction::Stacked { members, .. } => members
                .iter()
                .map(UnivariateFunction::domain)
                .reduce(|a, b| a.intersect(&b).unwrap_or(Range::closed(0.0, 0.0)))
                .unwrap_or_else(Range::all),
        }
    }

    /// Finds the concatenated piece index and local parameter for `x`, clamping to the
    /// nearest piece when `x` falls before the first or after the last breakpoint (used
    /// only by the unbounded evaluators).
    fn locate_piece(breakpoints: &[f64], x: f64) -> (usize, f64) {
        if x < breakpoints[0] {
            return (0, x - breakpoints[0]);
        }
        let mut idx = 0;
        for (i, bp) in breakpoints.iter().enumerate() {
            if *bp <= x {
                idx = i;
            } else {
                break;
            }
        }
        (idx, x - breakpoints[idx])
    }

    pub fn value_unbounded(&self, x: f64) -> f64 {
        match self {
            UnivariateFunction::Linear { slope, intercept, .. } => slope * x + intercept,
            UnivariateFunction::Polynomial { coeffs, .. } => {
                coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
            }
            UnivariateFunction::Concatenated { breakpoints, pieces, prepend_constant_value } => {
                if let Some(v) = prepend_constant_value {
                    if x < breakpoints[0] {
                        return *v;
                    }
                }
                let (idx, local_x) = Self::locate_piece(breakpoints, x);
                pieces[idx].value_unbounded(local_x)
            }
            UnivariateFunction::Sectioned { wrapped, sub_domain } => {
                wrapped.value_unbounded(sub_domain.lower_value() + x)
            }
            UnivariateFunction::Stacked { members, combiner } => match combiner {
                StackCombiner::Sum => members.iter().map(|m| m.value_unbounded(x)).sum(),
                StackCombiner::Product => members.iter().map(|m| m.value_unbounded(x)).product(),
            },
        }
    }

    pub fn slope_unbounded(&self, x: f64) -> f64 {
        match self {
            UnivariateFunction::Linear { slope, .. } => *slope,
            UnivariateFunction::Polynomial { coeffs, .. } => {
                if coeffs.len() < 2 {
                    return 0.0;
                }
                coeffs[1..]
                    .iter()
                    .enumerate()
                    .rev()
                    .fold(0.0, |acc, (i, c)| acc * x + c * (i as f64 + 1.0))
            }
            UnivariateFunction::Concatenated { breakpoints, pieces, prepend_constant_value } => {
                if prepend_constant_value.is_some() && x < breakpoints[0] {
                    return 0.0;
                }
                let (idx, local_x) = Self::locate_piece(breakpoints, x);
                pieces[idx].slope_unbounded(local_x)
            }
            UnivariateFunction::Sectioned { wrapped, sub_domain } => {
                wrapped.slope_unbounded(sub_domain.lower_value() + x)
            }
            UnivariateFunction::Stacked { members, combiner } => match combiner {
                StackCombiner::Sum => members.iter().map(|m| m.slope_unbounded(x)).sum(),
                StackCombiner::Product => {
                    // product rule over n factors
                    members
                        .iter()
                        .enumerate()
                        .map(|(i, mi)| {
                            mi.slope_unbounded(x)
                                * members
                                    .iter()
                                    .enumerate()
                                    .filter(|(j, _)| *j != i)
                                    .map(|(_, mj)| mj.value_unbounded(x))
                                    .product::<f64>()
                        })
                        .sum()
                }
            },
        }
    }

    pub fn value(&self, x: f64, tolerance: f64) -> GeometricResult<f64> {
        self.check_domain(x, tolerance)?;
        Ok(self.value_unbounded(x))
    }

    pub fn slope(&self, x: f64, tolerance: f64) -> GeometricResult<f64> {
        self.check_domain(x, tolerance)?;
        Ok(self.slope_unbounded(x))
    }

    fn check_domain(&self, x: f64, tolerance: f64) -> GeometricResult<()> {
        let domain = self.domain();
        if domain.fuzzy_contains(x, tolerance) {
            Ok(())
        } else {
            Err(GeometricError::OutOfDomain {
                x,
                domain: DomainSnapshot { lower: domain.lower_value(), upper: domain.upper_value() },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_of_inclusive_points_round_trips() {
        let f = UnivariateFunction::of_inclusive_points((0.0, 1.0), (10.0, 11.0)).unwrap();
        assert!((f.value(0.0, 1e-12).unwrap() - 1.0).abs() < 1e-12);
        assert!((f.value(10.0, 1e-12).unwrap() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn sectioned_matches_wrapped_shifted_by_sub_lower() {
        let wrapped = UnivariateFunction::polynomial(vec![0.0, 1.0], Range::closed(0.0, 100.0));
        let sub = Range::closed(10.0, 20.0);
        let sectioned = UnivariateFunction::sectioned(wrapped.clone(), sub, 1e-9).unwrap();
        for x in [0.0, 5.0, 10.0] {
            assert!((sectioned.value_unbounded(x) - wrapped.value_unbounded(sub.lower_value() + x)).abs() < 1e-12);
        }
    }

    #[test]
    fn concatenated_uses_local_parameter_per_piece() {
        let f = UnivariateFunction::of_cubics(
            vec![0.0, 10.0],
            vec![(0.0, 1.0, 0.0, 0.0), (10.0, 2.0, 0.0, 0.0)],
            false,
            None,
        )
        .unwrap();
        // first piece: value(5) = 0 + 1*5 = 5
        assert!((f.value_unbounded(5.0) - 5.0).abs() < 1e-12);
        // second piece starts at local parameter 0 at x=10: value = 10
        assert!((f.value_unbounded(10.0) - 10.0).abs() < 1e-12);
        // at x=15, local parameter is 5: value = 10 + 2*5 = 20
        assert!((f.value_unbounded(15.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn prepend_constant_extends_domain_to_minus_infinity() {
        let f = UnivariateFunction::of_cubics(vec![0.0], vec![(3.0, 0.0, 0.0, 0.0)], true, Some(7.0)).unwrap();
        assert_eq!(f.value_unbounded(-100.0), 7.0);
        assert!(f.value(-100.0, 1e-9).is_ok());
    }

    #[test]
    fn stacked_sum_adds_values_and_slopes() {
        let a = UnivariateFunction::linear(1.0, 0.0, Range::closed(0.0, 10.0));
        let b = UnivariateFunction::linear(2.0, 1.0, Range::closed(0.0, 10.0));
        let stacked = UnivariateFunction::stacked_sum(vec![a, b]);
        assert_eq!(stacked.value_unbounded(2.0), 2.0 * 1.0 + (2.0 * 2.0 + 1.0));
        assert_eq!(stacked.slope_unbounded(2.0), 1.0 + 2.0);
    }

    #[test]
    fn bounded_evaluation_at_domain_edge_within_tolerance_succeeds() {
        let f = UnivariateFunction::linear(1.0, 0.0, Range::closed(0.0, 10.0));
        assert!(f.value(10.0 + 1e-9, 1e-6).is_ok());
        assert!(f.value(10.1, 1e-6).is_err());
    }

    #[test]
    fn every_finite_domain_value_and_slope_is_finite() {
        let f = UnivariateFunction::of_cubics(
            vec![0.0, 5.0, 12.0],
            vec![(0.0, 1.0, 0.2, -0.01), (2.0, 0.5, 0.0, 0.0), (1.0, -0.3, 0.05, 0.0)],
            false,
            None,
        )
        .unwrap();
        for i in 0..120 {
            let x = i as f64 / 10.0;
            assert!(f.value_unbounded(x).is_finite());
            assert!(f.slope_unbounded(x).is_finite());
        }
    }
}
