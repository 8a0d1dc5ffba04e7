//! Shared identity and description capability for nodes and edges.

use std::fmt;

use super::edge::Edge;
use super::node::Node;

/// Type tag distinguishing graph element variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
	/// A bare element with no more specific kind.
	Element,
	/// A graph node.
	Node,
	/// A weighted edge.
	Edge,
}

impl ElementKind {
	/// Lowercase tag: `"element"`, `"node"` or `"edge"`.
	pub fn as_str(self) -> &'static str {
		match self {
			ElementKind::Element => "element",
			ElementKind::Node => "node",
			ElementKind::Edge => "edge",
		}
	}
}

impl fmt::Display for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Anything in the graph that has an identity and a human-readable description.
///
/// Implementors override [`Element::format_id`] to change how the id appears in
/// [`Element::describe`], or override `describe` entirely.
pub trait Element {
	/// Externally assigned identifier. Never changes after construction.
	fn id(&self) -> &str;

	/// Which variant this is.
	fn kind(&self) -> ElementKind {
		ElementKind::Element
	}

	/// Formatting hook used by `describe`.
	fn format_id(&self) -> String {
		format!("[ID: {}]", self.id())
	}

	/// Human-readable summary built around [`Element::format_id`].
	fn describe(&self) -> String {
		format!("GraphElement: {}", self.format_id())
	}
}

/// Borrowed view over either element variant, for code that handles nodes and
/// edges uniformly.
#[derive(Clone, Copy, Debug)]
pub enum GraphElement<'a> {
	/// A borrowed node.
	Node(&'a Node),
	/// A borrowed edge.
	Edge(&'a Edge),
}

impl Element for GraphElement<'_> {
	fn id(&self) -> &str {
		match self {
			GraphElement::Node(node) => node.id(),
			GraphElement::Edge(edge) => edge.id(),
		}
	}

	fn kind(&self) -> ElementKind {
		match self {
			GraphElement::Node(node) => node.kind(),
			GraphElement::Edge(edge) => edge.kind(),
		}
	}

	fn format_id(&self) -> String {
		match self {
			GraphElement::Node(node) => node.format_id(),
			GraphElement::Edge(edge) => edge.format_id(),
		}
	}

	fn describe(&self) -> String {
		match self {
			GraphElement::Node(node) => node.describe(),
			GraphElement::Edge(edge) => edge.describe(),
		}
	}
}

impl<'a> From<&'a Node> for GraphElement<'a> {
	fn from(node: &'a Node) -> Self {
		GraphElement::Node(node)
	}
}

impl<'a> From<&'a Edge> for GraphElement<'a> {
	fn from(edge: &'a Edge) -> Self {
		GraphElement::Edge(edge)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Plain(&'static str);

	impl Element for Plain {
		fn id(&self) -> &str {
			self.0
		}
	}

	#[test]
	fn default_description_uses_base_formatting() {
		let element = Plain("x1");
		assert_eq!(element.kind(), ElementKind::Element);
		assert_eq!(element.format_id(), "[ID: x1]");
		assert_eq!(element.describe(), "GraphElement: [ID: x1]");
	}

	#[test]
	fn tagged_variant_dispatches_to_each_kind() {
		let a = Node::new("A");
		let edge = Edge::with_weight("A", "B", 500.0);
		let elements = [GraphElement::from(&a), GraphElement::from(&edge)];

		let kinds: Vec<_> = elements.iter().map(|e| e.kind().as_str()).collect();
		assert_eq!(kinds, ["node", "edge"]);
		assert_eq!(elements[0].describe(), "Node <<A>> at position (0, 0)");
		assert_eq!(
			elements[1].describe(),
			"Edge {A-B} connects A and B with weight 500"
		);
	}
}
