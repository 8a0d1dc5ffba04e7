//! Per-node statistics derived from the filtered edges.

use std::collections::HashMap;

use super::element::Element;
use super::registry::Graph;

/// The heaviest incident edge of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrongestConnection {
	/// Weight of the heaviest incident edge, 0 when there is none.
	pub max_weight: f64,
	/// `None` until a positive-weight edge is seen.
	pub neighbor: Option<String>,
}

/// Degree, total incident weight and strongest connection, keyed by node id.
///
/// Recomputed from scratch for every graph; there is no incremental update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStats {
	/// Incident edge count.
	pub degree: HashMap<String, usize>,
	/// Sum of incident edge weights.
	pub total_weight: HashMap<String, f64>,
	/// Heaviest incident edge. Every node has an entry, even when isolated.
	pub strongest: HashMap<String, StrongestConnection>,
}

impl GraphStats {
	/// Derive every statistic in one pass over the edges.
	pub fn compute(graph: &Graph) -> Self {
		let mut stats = Self {
			strongest: graph
				.nodes
				.iter()
				.map(|node| (node.id().to_string(), StrongestConnection::default()))
				.collect(),
			..Self::default()
		};

		for edge in &graph.edges {
			let weight = edge.weight();
			for this in [edge.source(), edge.target()] {
				let Some(other) = edge.opposite(this) else {
					continue;
				};
				*stats.degree.entry(this.to_string()).or_insert(0) += 1;
				*stats.total_weight.entry(this.to_string()).or_insert(0.0) += weight;

				let strongest = stats.strongest.entry(this.to_string()).or_default();
				// Strictly greater: the first edge seen wins ties.
				if weight > strongest.max_weight {
					strongest.max_weight = weight;
					strongest.neighbor = Some(other.to_string());
				}
			}
		}

		stats
	}

	/// Degree of `id`, 0 when unknown.
	pub fn degree(&self, id: &str) -> usize {
		self.degree.get(id).copied().unwrap_or(0)
	}

	/// Total weight of `id`, 0 when unknown.
	pub fn total_weight(&self, id: &str) -> f64 {
		self.total_weight.get(id).copied().unwrap_or(0.0)
	}

	/// Strongest connection of `id`.
	pub fn strongest(&self, id: &str) -> Option<&StrongestConnection> {
		self.strongest.get(id)
	}

	/// Hover text for a node.
	pub fn tooltip(&self, id: &str) -> TooltipContent {
		let mut lines = vec![
			format!("Total Connections: {}", self.degree(id)),
			format!("Total Weight: {}", self.total_weight(id)),
		];
		match self.strongest(id) {
			Some(StrongestConnection {
				max_weight,
				neighbor: Some(neighbor),
			}) => lines.push(format!(
				"Strongest Connection: {neighbor} (Weight: {max_weight})"
			)),
			_ => lines.push("No Connections".to_string()),
		}
		TooltipContent {
			title: id.to_string(),
			lines,
		}
	}
}

/// Tooltip text: a bold title followed by plain lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	/// Node id, shown bold.
	pub title: String,
	/// Statistics lines.
	pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FilterConfig, GraphData, build_graph};

	fn stats_for(data: &GraphData) -> GraphStats {
		GraphStats::compute(&build_graph(data, &FilterConfig::default()).unwrap())
	}

	#[test]
	fn scenario_degrees_and_weights() {
		let data = GraphData::from_parts(
			["A", "B", "C"],
			[("A", "B", 500.0), ("B", "C", 300.0)],
		);
		let stats = stats_for(&data);
		assert_eq!(stats.degree("A"), 1);
		assert_eq!(stats.degree("B"), 1);
		assert!(!stats.degree.contains_key("C"));
		assert_eq!(stats.total_weight("A"), 500.0);
		assert_eq!(stats.total_weight("B"), 500.0);
		assert_eq!(stats.strongest("A").unwrap().neighbor.as_deref(), Some("B"));
	}

	#[test]
	fn every_rendered_node_has_positive_degree() {
		let data = GraphData::from_parts(
			["A", "B", "C", "D"],
			[("A", "B", 500.0), ("C", "D", 100.0), ("B", "C", 1200.0)],
		);
		let graph = build_graph(&data, &FilterConfig::default()).unwrap();
		let stats = GraphStats::compute(&graph);
		for node in graph.nodes.iter() {
			assert!(stats.degree(node.id()) >= 1, "{} is isolated", node.id());
		}
		assert!(graph.nodes.get("D").is_none());
	}

	#[test]
	fn strongest_connection_first_seen_wins_ties() {
		let data = GraphData::from_parts(
			["A", "B", "C", "D"],
			[("A", "B", 700.0), ("A", "C", 700.0), ("D", "A", 650.0)],
		);
		let stats = stats_for(&data);
		let strongest = stats.strongest("A").unwrap();
		assert_eq!(strongest.max_weight, 700.0);
		assert_eq!(strongest.neighbor.as_deref(), Some("B"));
		assert_eq!(stats.degree("A"), 3);
		assert_eq!(stats.total_weight("A"), 2050.0);
	}

	#[test]
	fn recomputation_is_idempotent() {
		let data = GraphData::from_parts(
			["A", "B", "C"],
			[("A", "B", 500.0), ("B", "C", 800.0), ("A", "C", 450.0)],
		);
		assert_eq!(stats_for(&data), stats_for(&data));
	}

	#[test]
	fn tooltip_lists_strongest_neighbor() {
		let data = GraphData::from_parts(["A", "B"], [("A", "B", 500.0)]);
		let tooltip = stats_for(&data).tooltip("A");
		assert_eq!(tooltip.title, "A");
		assert_eq!(
			tooltip.lines,
			[
				"Total Connections: 1",
				"Total Weight: 500",
				"Strongest Connection: B (Weight: 500)",
			]
		);
	}

	#[test]
	fn tooltip_without_connections() {
		let tooltip = GraphStats::default().tooltip("nobody");
		assert_eq!(tooltip.lines.last().unwrap(), "No Connections");
		assert_eq!(tooltip.lines[0], "Total Connections: 0");
	}
}
