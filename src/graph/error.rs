//! Errors raised while parsing and building a graph.

use thiserror::Error;

/// Why a graph could not be loaded.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The input is not valid graph JSON.
	#[error("malformed graph data: {0}")]
	Parse(#[from] serde_json::Error),

	/// An edge names a node that is not in the node list.
	#[error("edge {edge} references unknown node {node:?}")]
	UnknownNode {
		/// Id of the offending edge.
		edge: String,
		/// The missing node id.
		node: String,
	},

	/// An edge weight is NaN or infinite.
	#[error("edge {edge} has non-finite weight {weight}")]
	InvalidWeight {
		/// Id of the offending edge.
		edge: String,
		/// The rejected weight.
		weight: f64,
	},
}
