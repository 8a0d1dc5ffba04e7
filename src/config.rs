//! Application configuration.
//!
//! Defaults are compiled in. A page may override any subset by embedding JSON
//! in `<script id="graph-config" type="application/json">`, e.g.
//! `{"filter": {"min_edge_weight": 250}, "simulation": {"width": 1600}}`.

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::components::force_graph::{EncodingConfig, SimulationConfig};
use crate::graph::FilterConfig;

/// Reasons a configuration override is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The override is not valid JSON for [`AppConfig`].
	#[error("invalid config JSON: {0}")]
	Parse(#[from] serde_json::Error),

	/// The override parsed but a value is unusable.
	#[error("invalid config value `{field}`: {reason}")]
	Invalid {
		/// Dotted path of the offending field.
		field: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
	ConfigError::Invalid { field, reason }
}

fn check_range(field: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
	if !min.is_finite() || !max.is_finite() {
		return Err(invalid(field, "bounds must be finite"));
	}
	if min <= 0.0 {
		return Err(invalid(field, "lower bound must be > 0"));
	}
	if min > max {
		return Err(invalid(field, "lower bound exceeds upper bound"));
	}
	Ok(())
}

/// Everything the page can tune.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// URL of the graph JSON, relative to the page.
	pub data_url: String,
	/// Edge threshold.
	pub filter: FilterConfig,
	/// Visual encodings.
	pub encoding: EncodingConfig,
	/// Physics, canvas and zoom.
	pub simulation: SimulationConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: "graphData.json".to_string(),
			filter: FilterConfig::default(),
			encoding: EncodingConfig::default(),
			simulation: SimulationConfig::default(),
		}
	}
}

impl AppConfig {
	/// Parse overrides without validating them.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Parse and validate overrides.
	pub fn parse(json: &str) -> Result<Self, ConfigError> {
		let config = Self::from_json(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Parse overrides, falling back to the defaults with a warning when
	/// they are malformed or unusable.
	pub fn from_overrides(json: &str) -> Self {
		match Self::parse(json) {
			Ok(config) => {
				info!("artist-network: loaded config overrides");
				config
			}
			Err(e) => {
				warn!("artist-network: ignoring config overrides: {}", e);
				Self::default()
			}
		}
	}

	/// Reject values the simulation or the encodings cannot work with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let sim = &self.simulation;
		check_range("simulation.zoom_extent", sim.zoom_extent)?;
		check_range("simulation.charge_distance", sim.charge_distance)?;
		if !(sim.width > 0.0 && sim.height > 0.0) {
			return Err(invalid("simulation.width/height", "canvas size must be > 0"));
		}
		if !(sim.alpha_decay > 0.0 && sim.alpha_decay <= 1.0) {
			return Err(invalid("simulation.alpha_decay", "must be in (0, 1]"));
		}
		if !(sim.alpha_min >= 0.0 && sim.alpha_min.is_finite()) {
			return Err(invalid("simulation.alpha_min", "must be >= 0"));
		}
		if !(sim.node_mass > 0.0 && sim.node_mass.is_finite()) {
			return Err(invalid("simulation.node_mass", "must be > 0"));
		}

		let enc = &self.encoding;
		check_range("encoding.radius_range", enc.radius_range)?;
		if enc.opacity_divisor == 0.0 || !enc.opacity_divisor.is_finite() {
			return Err(invalid("encoding.opacity_divisor", "must be finite and non-zero"));
		}
		if !(enc.max_stroke_width > 0.0) {
			return Err(invalid("encoding.max_stroke_width", "must be > 0"));
		}

		if !(self.filter.min_edge_weight >= 0.0) {
			return Err(invalid("filter.min_edge_weight", "must be >= 0"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = AppConfig::from_json(
			r#"{"filter": {"min_edge_weight": 250}, "simulation": {"width": 1600}}"#,
		)
		.unwrap();
		assert_eq!(config.filter.min_edge_weight, 250.0);
		assert_eq!(config.simulation.width, 1600.0);
		assert_eq!(config.simulation.height, 2000.0);
		assert_eq!(config.encoding, EncodingConfig::default());
		assert_eq!(config.data_url, "graphData.json");
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn defaults_match_reference_constants() {
		let config = AppConfig::default();
		assert_eq!(config.filter.min_edge_weight, 400.0);
		assert_eq!(config.encoding.edge_color_domain_max, 4500.0);
		assert_eq!(config.simulation.charge_strength, -1000.0);
		assert_eq!(config.simulation.charge_distance, (20.0, 1000.0));
		assert_eq!(config.simulation.zoom_extent, (0.1, 10.0));
	}

	#[test]
	fn defaults_are_valid() {
		AppConfig::default().validate().unwrap();
	}

	#[test]
	fn inverted_zoom_extent_falls_back_to_defaults() {
		let json = r#"{"simulation": {"zoom_extent": [10, 0.1]}}"#;
		let err = AppConfig::parse(json).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Invalid {
				field: "simulation.zoom_extent",
				..
			}
		));
		assert_eq!(AppConfig::from_overrides(json), AppConfig::default());
	}

	#[test]
	fn unusable_values_are_rejected() {
		for json in [
			r#"{"simulation": {"zoom_extent": [0, 10]}}"#,
			r#"{"simulation": {"zoom_extent": [-1, 10]}}"#,
			r#"{"simulation": {"alpha_decay": 0}}"#,
			r#"{"simulation": {"alpha_decay": 1.5}}"#,
			r#"{"simulation": {"width": 0}}"#,
			r#"{"simulation": {"charge_distance": [0, 1000]}}"#,
			r#"{"encoding": {"radius_range": [30, 5]}}"#,
			r#"{"encoding": {"opacity_divisor": 0}}"#,
			r#"{"filter": {"min_edge_weight": -1}}"#,
		] {
			assert!(AppConfig::parse(json).is_err(), "{json} should be rejected");
			assert_eq!(AppConfig::from_overrides(json), AppConfig::default());
		}
	}

	#[test]
	fn valid_override_survives_validation() {
		let json = r#"{"simulation": {"zoom_extent": [0.5, 4], "alpha_decay": 1}}"#;
		let config = AppConfig::from_overrides(json);
		assert_eq!(config.simulation.zoom_extent, (0.5, 4.0));
		assert_eq!(config.simulation.alpha_decay, 1.0);
	}

	#[test]
	fn malformed_json_falls_back() {
		assert!(matches!(AppConfig::parse("{"), Err(ConfigError::Parse(_))));
		assert_eq!(AppConfig::from_overrides("{"), AppConfig::default());
	}
}
