//! Mirrors `road/geometry/{line,arc,spiral,poly_3,param_poly_3,plan_view}.rs`: the plan
//! view is an ordered list of geometry segments, each an s-offset plus a start pose and
//! primitive-specific parameters.

use uom::si::f64::{Angle, Curvature, Length};

/// One `<geometry>` entry of the plan view: common header (s, x, y, hdg, length) plus a
/// primitive-specific [`GeometryType`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlanViewGeometry {
    /// s-coordinate of start position
    pub s: Length,
    /// Start position (inertial x)
    pub x: Length,
    /// Start position (inertial y)
    pub y: Length,
    /// Start orientation (inertial heading)
    pub hdg: Angle,
    /// Length of the element's reference line
    pub length: Length,
    pub geometry_type: GeometryType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryType {
    /// A straight line.
    Line,
    /// Constant curvature throughout the element.
    Arc { curvature: Curvature },
    /// Curvature varying linearly between `curv_start` and `curv_end`.
    Spiral { curv_start: Curvature, curv_end: Curvature },
    /// Cubic polynomial `f(p) = a + b*p + c*p^2 + d*p^3`, `p` local to the element.
    Poly3 { a: f64, b: f64, c: f64, d: f64 },
    /// Parametric cubic polynomial, `u(p)`/`v(p)` each a cubic in local parameter `p`.
    ParamPoly3 {
        a_u: f64,
        b_u: f64,
        c_u: f64,
        d_u: f64,
        a_v: f64,
        b_v: f64,
        c_v: f64,
        d_v: f64,
        p_range: ParamPoly3PRange,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPoly3PRange {
    /// `p` runs over `[0, 1]`.
    Normalized,
    /// `p` runs over `[0, length]`.
    ArcLength,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanView {
    pub geometry: Vec<PlanViewGeometry>,
}
