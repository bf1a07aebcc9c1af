//! Mirrors `road/profile/{mod,lateral_profile,shape}.rs`: elevation, superelevation and
//! lateral-shape are all cubic-polynomial-at-`s` records.

use uom::si::f64::Length;

/// One `<elevation>` entry: `f(ds) = a + b*ds + c*ds^2 + d*ds^3`, `ds = s - self.s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRecord {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// One `<superelevation>` entry: same cubic shape, describing the road's roll angle
/// (radians) as a function of arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperelevationRecord {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// One `<shape>` entry: a cross-section cubic in lateral coordinate `t`, valid from `s`
/// onward until the next shape record at a greater `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeRecord {
    pub s: f64,
    pub t: Length,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LateralProfile {
    pub superelevation: Vec<SuperelevationRecord>,
    pub shape: Vec<ShapeRecord>,
}
