//! Univariate and bivariate function algebra (spec components C3/C4).

mod bivariate;
mod univariate;

pub use bivariate::ordered_float::OrderedF64;
pub use bivariate::BivariateFunction;
pub use univariate::{StackCombiner, UnivariateFunction};
