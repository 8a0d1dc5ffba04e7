//! Raw graph records as they appear in `graphData.json`.

use serde::{Deserialize, Serialize};

/// A node record. Only the id is used; any other fields are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	pub id: String,
}

/// A weighted, undirected edge record between two node ids.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Edge weight. Records without a weight count as 1.
	#[serde(default = "default_weight")]
	pub weight: f64,
}

fn default_weight() -> f64 {
	1.0
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
	/// Node records; missing means none.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edge records; missing means none.
	#[serde(default)]
	pub edges: Vec<GraphLink>,
}

impl GraphLink {
	/// Edge record with an explicit weight.
	pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}
}

#[cfg(test)]
impl GraphData {
	/// Build graph data from bare node ids and `(source, target, weight)` triples.
	pub(crate) fn from_parts<'a>(
		nodes: impl IntoIterator<Item = &'a str>,
		edges: impl IntoIterator<Item = (&'a str, &'a str, f64)>,
	) -> Self {
		Self {
			nodes: nodes
				.into_iter()
				.map(|id| GraphNode { id: id.to_string() })
				.collect(),
			edges: edges
				.into_iter()
				.map(|(s, t, w)| GraphLink::new(s, t, w))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_graph_data_json() {
		let json = r#"{
			"nodes": [{"id": "A", "label": "ignored"}, {"id": "B"}],
			"edges": [{"source": "A", "target": "B", "weight": 500}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges, vec![GraphLink::new("A", "B", 500.0)]);
	}

	#[test]
	fn missing_weight_defaults_to_one() {
		let json = r#"{"nodes": [], "edges": [{"source": "A", "target": "B"}]}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.edges[0].weight, 1.0);
	}
}
