//! Load, filter and build stages.
//!
//! Edges below the weight threshold are dropped first; nodes that are not an
//! endpoint of any surviving edge are dropped next. The survivors are turned
//! into a [`Graph`] whose edges are guaranteed to reference registered nodes.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::config::FilterConfig;
use super::edge::{Edge, edge_id};
use super::element::Element;
use super::error::GraphError;
use super::node::Node;
use super::registry::{Graph, NodeRegistry};
use super::types::{GraphData, GraphLink, GraphNode};

/// Parse `graphData.json` contents.
pub fn parse_graph(json: &str) -> Result<GraphData, GraphError> {
	Ok(serde_json::from_str(json)?)
}

/// Drop light edges, then drop nodes left without any edge.
///
/// Returned records borrow from `data` and keep its order.
pub fn filter_graph<'a>(
	data: &'a GraphData,
	config: &FilterConfig,
) -> (Vec<&'a GraphNode>, Vec<&'a GraphLink>) {
	let links: Vec<&GraphLink> = data
		.edges
		.iter()
		.filter(|link| link.weight >= config.min_edge_weight)
		.collect();

	let connected: HashSet<&str> = links
		.iter()
		.flat_map(|link| [link.source.as_str(), link.target.as_str()])
		.collect();

	let nodes = data
		.nodes
		.iter()
		.filter(|node| connected.contains(node.id.as_str()))
		.collect();

	(nodes, links)
}

/// Filter `data` and construct the node registry and edge list.
pub fn build_graph(data: &GraphData, config: &FilterConfig) -> Result<Graph, GraphError> {
	let (node_records, link_records) = filter_graph(data, config);

	let mut nodes = NodeRegistry::new();
	for record in node_records {
		if nodes.insert(Node::new(record.id.clone())).is_none() {
			warn!("duplicate node id {:?} ignored", record.id);
		}
	}

	let mut edges = Vec::with_capacity(link_records.len());
	for link in link_records {
		if !link.weight.is_finite() {
			return Err(GraphError::InvalidWeight {
				edge: edge_id(&link.source, &link.target),
				weight: link.weight,
			});
		}
		for endpoint in [&link.source, &link.target] {
			if !nodes.contains(endpoint) {
				return Err(GraphError::UnknownNode {
					edge: edge_id(&link.source, &link.target),
					node: endpoint.clone(),
				});
			}
		}
		edges.push(Edge::with_weight(
			link.source.clone(),
			link.target.clone(),
			link.weight,
		));
	}

	info!(
		"graph filtered: {}/{} nodes, {}/{} edges (min weight {})",
		nodes.len(),
		data.nodes.len(),
		edges.len(),
		data.edges.len(),
		config.min_edge_weight
	);
	if let (Some(node), Some(edge)) = (nodes.iter().next(), edges.first()) {
		debug!("{}", node.describe());
		debug!("{}", edge.describe());
	}

	Ok(Graph { nodes, edges })
}
