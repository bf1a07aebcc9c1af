//! Conversion parameters: every tolerance and flag frozen by spec §6, with the defaults
//! named there. Validated once before core entry (spec §7's "configuration errors...
//! surfaced by the configuration loader before core entry"); the core itself treats a
//! constructed [`ConversionParameters`] as a precondition, never re-validating it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} = {value:?} does not match pattern [_A-Za-z][-_.A-Za-z0-9]*")]
    InvalidPrefix { field: &'static str, value: String },
    #[error("crsEpsg must be a positive EPSG code when set, got {0}")]
    InvalidEpsg(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionParameters {
    pub number_tolerance: f64,
    pub plan_view_geometry_distance_tolerance: f64,
    pub plan_view_geometry_angle_tolerance: f64,
    pub discretization_step_size: f64,
    pub sweep_discretization_step_size: f64,
    pub circle_slices: usize,
    pub extrapolate_lateral_road_shapes: bool,
    pub derive_crs_epsg_automatically: bool,
    pub crs_epsg: i32,
    pub concurrent_processing: bool,
    pub flatten_generic_attribute_sets: bool,
    pub transform_additional_road_lines: bool,
    pub generate_longitudinal_filler_surfaces: bool,
    pub mapping_backwards_compatibility: bool,
    pub generate_random_geometry_ids: bool,
    pub attributes_prefix: String,
    pub identifier_attributes_prefix: String,
    pub geometry_attributes_prefix: String,
    pub gml_id_prefix: String,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            number_tolerance: 1e-7,
            plan_view_geometry_distance_tolerance: 1e0,
            plan_view_geometry_angle_tolerance: 1e0,
            discretization_step_size: 0.7,
            sweep_discretization_step_size: 0.3,
            circle_slices: 16,
            extrapolate_lateral_road_shapes: false,
            derive_crs_epsg_automatically: false,
            crs_epsg: 0,
            concurrent_processing: false,
            flatten_generic_attribute_sets: false,
            transform_additional_road_lines: false,
            generate_longitudinal_filler_surfaces: true,
            mapping_backwards_compatibility: false,
            generate_random_geometry_ids: false,
            attributes_prefix: "".to_string(),
            identifier_attributes_prefix: "identifier_".to_string(),
            geometry_attributes_prefix: "geometry_".to_string(),
            gml_id_prefix: "UUID_".to_string(),
        }
    }
}

fn is_valid_prefix(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '-' || c == '.' || c.is_ascii_alphanumeric())
}

impl ConversionParameters {
    /// Validates the prefix fields and the EPSG code, returning the parameters unchanged
    /// on success. Empty prefixes are permitted (`attributesPrefix` defaults to `""`).
    pub fn validated(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("identifierAttributesPrefix", &self.identifier_attributes_prefix),
            ("geometryAttributesPrefix", &self.geometry_attributes_prefix),
            ("gmlIdPrefix", &self.gml_id_prefix),
        ] {
            if !value.is_empty() && !is_valid_prefix(value) {
                return Err(ConfigError::InvalidPrefix {
                    field,
                    value: value.clone(),
                });
            }
        }
        if !self.attributes_prefix.is_empty() && !is_valid_prefix(&self.attributes_prefix) {
            return Err(ConfigError::InvalidPrefix {
                field: "attributesPrefix",
                value: self.attributes_prefix.clone(),
            });
        }
        if self.crs_epsg < 0 {
            return Err(ConfigError::InvalidEpsg(self.crs_epsg));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_validate() {
        assert!(ConversionParameters::default().validated().is_ok());
    }

    #[test]
    fn invalid_gml_prefix_is_rejected() {
        let params = ConversionParameters {
            gml_id_prefix: "1nvalid".to_string(),
            ..ConversionParameters::default()
        };
        assert!(matches!(
            params.validated(),
            Err(ConfigError::InvalidPrefix { field: "gmlIdPrefix", .. })
        ));
    }

    #[test]
    fn negative_epsg_is_rejected() {
        let params = ConversionParameters {
            crs_epsg: -1,
            ..ConversionParameters::default()
        };
        assert!(matches!(params.validated(), Err(ConfigError::InvalidEpsg(-1))));
    }
}
