//! Node registry and the built graph.

use std::collections::HashMap;

use super::edge::Edge;
use super::element::Element;
use super::node::Node;

/// Insertion-ordered node store with lookup by id.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
}

impl NodeRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a node, returning its index. If a node with the same id already
	/// exists, the registry is unchanged and `None` is returned.
	pub fn insert(&mut self, node: Node) -> Option<usize> {
		if self.index.contains_key(node.id()) {
			return None;
		}
		let idx = self.nodes.len();
		self.index.insert(node.id().to_string(), idx);
		self.nodes.push(node);
		Some(idx)
	}

	/// Node with this id.
	pub fn get(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&idx| &self.nodes[idx])
	}

	/// Mutable node with this id.
	pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.index.get(id).map(|&idx| &mut self.nodes[idx])
	}

	/// Whether a node with this id is registered.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Number of registered nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether no node is registered.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Mutable nodes in insertion order.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
		self.nodes.iter_mut()
	}

	/// Consume the registry, yielding nodes in insertion order.
	pub fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}
}

/// A filtered graph: every edge endpoint is present in `nodes`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Nodes keyed by id.
	pub nodes: NodeRegistry,
	/// Edges in input order.
	pub edges: Vec<Edge>,
}

impl Graph {
	/// Whether the graph has neither nodes nor edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// The `(source, target)` nodes of an edge.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		Some((self.nodes.get(edge.source())?, self.nodes.get(edge.target())?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_insert_wins() {
		let mut registry = NodeRegistry::new();
		assert_eq!(registry.insert(Node::new("A")), Some(0));
		assert_eq!(registry.insert(Node::new("B")), Some(1));
		assert_eq!(registry.insert(Node::new("A")), None);
		assert_eq!(registry.len(), 2);
		assert_eq!(registry.iter().map(|n| n.id()).collect::<Vec<_>>(), ["A", "B"]);
	}

	#[test]
	fn mutation_through_registry_is_shared_by_edges() {
		let mut graph = Graph::default();
		graph.nodes.insert(Node::new("A"));
		graph.nodes.insert(Node::new("B"));
		graph.edges.push(Edge::with_weight("A", "B", 450.0));

		if let Some(node) = graph.nodes.get_mut("A") {
			node.set_position(10.0, 20.0);
		}

		let (source, target) = graph.endpoints(&graph.edges[0]).unwrap();
		assert_eq!((source.x, source.y), (10.0, 20.0));
		assert_eq!(target.id(), "B");
	}
}
