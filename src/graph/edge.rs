//! Weighted edges between two nodes, referenced by id.

use super::element::{Element, ElementKind};

/// An edge in the graph. Endpoints are node ids resolved through the
/// [`NodeRegistry`](super::registry::NodeRegistry).
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	id: String,
	source: String,
	target: String,
	weight: f64,
}

impl Edge {
	/// Create an edge with the default weight of 1.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self::with_weight(source, target, 1.0)
	}

	/// Create an edge with an explicit weight. The id is `"{source}-{target}"`,
	/// so parallel edges share an id.
	pub fn with_weight(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: edge_id(&source, &target),
			source,
			target,
			weight,
		}
	}

	/// Source node id.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Target node id.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// Co-occurrence weight.
	pub fn weight(&self) -> f64 {
		self.weight
	}

	/// The endpoint on the other side of `id`, if `id` is an endpoint.
	pub fn opposite(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Id an edge between `source` and `target` gets.
pub fn edge_id(source: &str, target: &str) -> String {
	format!("{source}-{target}")
}

impl Element for Edge {
	fn id(&self) -> &str {
		&self.id
	}

	fn kind(&self) -> ElementKind {
		ElementKind::Edge
	}

	fn format_id(&self) -> String {
		format!("{{{}}}", self.id)
	}

	fn describe(&self) -> String {
		format!(
			"Edge {} connects {} and {} with weight {}",
			self.format_id(),
			self.source,
			self.target,
			self.weight
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weight_defaults_to_one() {
		let edge = Edge::new("A", "B");
		assert_eq!(edge.weight(), 1.0);
		assert_eq!(edge.id(), "A-B");
		assert_eq!(edge.kind(), ElementKind::Edge);
	}

	#[test]
	fn describe_names_both_endpoints() {
		let edge = Edge::with_weight("A", "B", 512.5);
		assert_eq!(
			edge.describe(),
			"Edge {A-B} connects A and B with weight 512.5"
		);
	}

	#[test]
	fn opposite_endpoint() {
		let edge = Edge::with_weight("A", "B", 500.0);
		assert_eq!(edge.opposite("A"), Some("B"));
		assert_eq!(edge.opposite("B"), Some("A"));
		assert_eq!(edge.opposite("C"), None);
	}
}
