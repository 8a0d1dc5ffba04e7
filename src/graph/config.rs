//! Filtering thresholds applied before the graph is built.

use serde::Deserialize;

/// Edge weight threshold used when no override is supplied.
pub const DEFAULT_MIN_EDGE_WEIGHT: f64 = 400.0;

/// Controls which edges (and therefore which nodes) survive filtering.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
	/// Edges with `weight < min_edge_weight` are dropped. Must be >= 0.
	pub min_edge_weight: f64,
}

impl Default for FilterConfig {
	fn default() -> Self {
		Self {
			min_edge_weight: DEFAULT_MIN_EDGE_WEIGHT,
		}
	}
}
