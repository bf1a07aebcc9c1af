//! Geometric domain errors. These are always returned as values, never thrown or
//! panicked, and are propagated up by geometry builders with `?` (spec §7).

use thiserror::Error;

/// A closed-or-open numeric domain, rendered for error messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainSnapshot {
    pub lower: f64,
    pub upper: f64,
}

impl std::fmt::Display for DomainSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometricError {
    #[error("value {x} is out of domain {domain}")]
    OutOfDomain { x: f64, domain: DomainSnapshot },

    #[error("expected at least {expected} vertices, got {actual}")]
    NotEnoughVertices { expected: usize, actual: usize },

    #[error("vertices are not coplanar within tolerance {tolerance}")]
    NonPlanar { tolerance: f64 },

    #[error("three consecutive vertices are colinear within tolerance {tolerance}")]
    ColinearConsecutive { tolerance: f64 },

    #[error("gap or overlap of {distance} between consecutive curve segments exceeds tolerance {tolerance}")]
    OverlapOrGap { distance: f64, tolerance: f64 },

    #[error("rotation discontinuity of {angle} rad between consecutive curve segments exceeds tolerance {tolerance}")]
    Kink { angle: f64, tolerance: f64 },

    #[error("boundary generation failed: {reason}")]
    BoundaryGenerationFailure { reason: String },

    #[error("domain is empty")]
    EmptyDomain,

    #[error("sub-models do not share a common domain within tolerance {tolerance}")]
    MismatchedDomains { tolerance: f64 },

    #[error("function pieces are not monotonically ascending at breakpoint index {index}")]
    UnsortedBreakpoints { index: usize },
}

pub type GeometricResult<T> = Result<T, GeometricError>;
