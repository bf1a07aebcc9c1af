//! Converts parametric road-network datasets ("PR", an ASAM OpenDRIVE-shaped tree of
//! plan-view geometry, lateral profile, and lane topology) into a surface-based 3D city
//! object dataset ("SB", a CityGML-shaped tree of multi-surface features) via an
//! intermediate `Roadspaces` object model.
//!
//! Reading and writing the PR/SB wire formats, the CLI, and packaging are out of scope
//! for this crate: callers hand it an already-parsed [`pr::OpenDrive`] tree and receive a
//! populated [`sb::CityModel`] tree back.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod function;
pub mod geom;
pub mod issue;
pub mod numeric;
pub mod pr;
pub mod range;
pub mod report;
pub mod roadspaces;
pub mod sb;
pub mod solid;
pub mod transform;

pub mod curve {
    //! Parametric plane-curve primitives and their lift into 3D (spec components C6/C7).
    mod composite;
    mod curve2d;
    mod curve3d;
    mod line;
    mod arc;
    mod spiral;
    mod cubic;
    mod param_cubic;
    mod param_transform;
    mod surface;

    pub use arc::ArcSegment2D;
    pub use composite::CompositeCurve2D;
    pub use cubic::CubicCurve2D;
    pub use curve2d::{AbstractCurve2D, Curve2D};
    pub use curve3d::Curve3D;
    pub use line::LineSegment2D;
    pub use param_cubic::ParametricCubicCurve2D;
    pub use param_transform::ParameterTransformedCurve2D;
    pub use spiral::SpiralSegment2D;
    pub use surface::CurveRelativeParametricSurface3D;
}

pub use error::GeometricError;

/// Runs the full pipeline end to end: evaluator healing, PR -> Roadspaces, Roadspaces ->
/// SB, bundled with a [`report::ConversionReport`] (spec §3's data-flow summary). Returns
/// `None` for the city model iff the evaluator recorded a fatal issue; the report is
/// always returned so callers can inspect what went wrong.
pub fn convert(
    model: &pr::OpenDrive,
    params: config::ConversionParameters,
) -> (Option<sb::CityModel>, report::ConversionReport) {
    let outcome = evaluator::evaluate(model, &params);
    let report = report::ConversionReport::new(params.clone(), &outcome);
    let Some(healed) = outcome.healed.as_ref() else {
        return (None, report);
    };

    let (roadspaces, roadspaces_issues) = transform::convert_to_roadspaces(healed, &params);
    let mut report = report;
    report.plan3_issues.append(roadspaces_issues);

    let (city_model, sb_issues) = transform::convert_to_city_model(&roadspaces, healed, &params);
    report.plan3_issues.append(sb_issues);

    (Some(city_model), report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converting_an_empty_model_yields_an_empty_city_model_and_no_fatal_issues() {
        let model = pr::OpenDrive::default();
        let (city_model, report) = convert(&model, config::ConversionParameters::default());
        assert!(city_model.is_some());
        assert!(!report.has_fatal());
        assert!(city_model.unwrap().city_objects.is_empty());
    }
}
