//! Closed/open interval arithmetic, fuzzy containment, and shifting (spec component C2).

use crate::numeric::{fuzzy_greater_equals, fuzzy_less_equals};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Open(f64),
    Closed(f64),
}

impl Bound {
    pub fn value(self) -> f64 {
        match self {
            Bound::Open(v) | Bound::Closed(v) => v,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Bound::Open(_))
    }
}

/// A range over `f64`, with optional lower/upper endpoints; `None` means unbounded
/// (±infinity) on that side. Invariant: `lower <= upper` whenever both present; empty iff
/// `lower == upper` and at least one bound is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl Range {
    pub fn new(lower: Bound, upper: Bound) -> Self {
        assert!(
            lower.value() <= upper.value(),
            "range lower endpoint must not exceed upper endpoint"
        );
        Self { lower: Some(lower), upper: Some(upper) }
    }

    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new(Bound::Closed(lower), Bound::Closed(upper))
    }

    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new(Bound::Open(lower), Bound::Open(upper))
    }

    pub fn at_least(lower: Bound) -> Self {
        Self { lower: Some(lower), upper: None }
    }

    pub fn at_most(upper: Bound) -> Self {
        Self { lower: None, upper: Some(upper) }
    }

    pub fn all() -> Self {
        Self { lower: None, upper: None }
    }

    pub fn lower_endpoint(&self) -> Option<Bound> {
        self.lower
    }

    pub fn upper_endpoint(&self) -> Option<Bound> {
        self.upper
    }

    pub fn lower_value(&self) -> f64 {
        self.lower.map(Bound::value).unwrap_or(f64::NEG_INFINITY)
    }

    pub fn upper_value(&self) -> f64 {
        self.upper.map(Bound::value).unwrap_or(f64::INFINITY)
    }

    pub fn length(&self) -> f64 {
        self.upper_value() - self.lower_value()
    }

    pub fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) => l.value() == u.value() && (l.is_open() || u.is_open()),
            _ => false,
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        let lower_ok = match self.lower {
            None => true,
            Some(Bound::Closed(v)) => x >= v,
            Some(Bound::Open(v)) => x > v,
        };
        let upper_ok = match self.upper {
            None => true,
            Some(Bound::Closed(v)) => x <= v,
            Some(Bound::Open(v)) => x < v,
        };
        lower_ok && upper_ok
    }

    /// Containment with `tolerance` slack on both ends, using [`fuzzy_greater_equals`] /
    /// [`fuzzy_less_equals`] for endpoint comparisons regardless of open/closed-ness: a
    /// value within tolerance of an open endpoint is still considered inside.
    pub fn fuzzy_contains(&self, x: f64, tolerance: f64) -> bool {
        let lower_ok = match self.lower {
            None => true,
            Some(b) => fuzzy_greater_equals(x, b.value(), tolerance),
        };
        let upper_ok = match self.upper {
            None => true,
            Some(b) => fuzzy_less_equals(x, b.value(), tolerance),
        };
        lower_ok && upper_ok
    }

    /// True iff `self` fuzzily contains every point of `other`, i.e. `other`'s endpoints
    /// lie within `self` (with tolerance slack).
    pub fn fuzzy_encloses(&self, other: &Range, tolerance: f64) -> bool {
        self.fuzzy_contains(other.lower_value(), tolerance) && self.fuzzy_contains(other.upper_value(), tolerance)
    }

    /// Intersection, which is associative and commutative; returns `None` if disjoint.
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        let lower = max_bound(self.lower, other.lower, true);
        let upper = min_bound(self.upper, other.upper, false);
        match (lower, upper) {
            (Some(l), Some(u)) if l.value() > u.value() => None,
            _ => Some(Range { lower, upper }),
        }
    }

    /// Shifts the range so its lower endpoint becomes `new_lower`, preserving length.
    pub fn shift_lower_endpoint_to(&self, new_lower: f64) -> Range {
        let delta = new_lower - self.lower_value();
        Range {
            lower: self.lower.map(|b| shift_bound(b, delta)),
            upper: self.upper.map(|b| shift_bound(b, delta)),
        }
    }
}

fn shift_bound(b: Bound, delta: f64) -> Bound {
    match b {
        Bound::Open(v) => Bound::Open(v + delta),
        Bound::Closed(v) => Bound::Closed(v + delta),
    }
}

fn max_bound(a: Option<Bound>, b: Option<Bound>, _is_lower: bool) -> Option<Bound> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some(a), Some(b)) => {
            if a.value() > b.value() {
                Some(a)
            } else if b.value() > a.value() {
                Some(b)
            } else {
                Some(if a.is_open() || b.is_open() { Bound::Open(a.value()) } else { a })
            }
        }
    }
}

fn min_bound(a: Option<Bound>, b: Option<Bound>, _is_lower: bool) -> Option<Bound> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some(a), Some(b)) => {
            if a.value() < b.value() {
                Some(a)
            } else if b.value() < a.value() {
                Some(b)
            } else {
                Some(if a.is_open() || b.is_open() { Bound::Open(a.value()) } else { a })
            }
        }
    }
}

/// A set of disjoint, sorted ranges, maintained via sweep-line union/intersection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn union(mut self, range: Range) -> Self {
        if range.is_empty() {
            return self;
        }
        self.ranges.push(range);
        self.ranges.sort_by(|a, b| a.lower_value().partial_cmp(&b.lower_value()).unwrap());
        let mut merged: Vec<Range> = Vec::with_capacity(self.ranges.len());
        for r in self.ranges {
            match merged.last_mut() {
                Some(last) if last.upper_value() >= r.lower_value() => {
                    let new_upper = if last.upper_value() >= r.upper_value() {
                        last.upper_endpoint().unwrap_or(Bound::Closed(last.upper_value()))
                    } else {
                        r.upper_endpoint().unwrap_or(Bound::Closed(r.upper_value()))
                    };
                    *last = Range { lower: last.lower_endpoint(), upper: Some(new_upper) };
                }
                _ => merged.push(r),
            }
        }
        Self { ranges: merged }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.ranges.iter().any(|r| r.contains(x))
    }
}
