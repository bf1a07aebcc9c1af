//! Mirrors `signal/{signal,controller,dependency}.rs`. Spec.md's classification table
//! (§4.10) is silent on signals; they are carried through to SB as `GenericObject`
//! fallbacks (SPEC_FULL.md §B.5).

use uom::si::f64::Length;

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub id: String,
    pub name: Option<String>,
    pub s: Length,
    pub t: Length,
    pub z_offset: Length,
    pub dynamic: bool,
    pub orientation_plus: bool,
    pub country: Option<String>,
    pub signal_type: Option<String>,
    pub subtype: Option<String>,
    pub value: Option<f64>,
    pub height: Option<Length>,
    pub width: Option<Length>,
}

/// A signal controlled by another signal (e.g. a pedestrian signal paired with a vehicle
/// signal at the same intersection).
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    pub signal_id: String,
    pub controlled_signal_id: String,
    pub signal_type: Option<String>,
}
