//! Graph nodes: identity, position and drag pins.

use super::element::{Element, ElementKind};

/// Radius a node has before encodings are applied.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// A position snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate, in world units.
	pub x: f64,
	/// Vertical coordinate, in world units.
	pub y: f64,
}

/// A node in the graph.
///
/// `fx`/`fy` are the pinned position while a drag is in progress on this node
/// and `None` otherwise. Pinned nodes are held in place by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	id: String,
	/// Current x, written by the simulation each tick.
	pub x: f64,
	/// Current y, written by the simulation each tick.
	pub y: f64,
	/// Pinned x while dragged.
	pub fx: Option<f64>,
	/// Pinned y while dragged.
	pub fy: Option<f64>,
	/// Circle radius in world units, set from the degree encoding.
	pub radius: f64,
	/// CSS fill color.
	pub color: String,
}

impl Node {
	/// Unpinned node at the origin with the default radius.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			x: 0.0,
			y: 0.0,
			fx: None,
			fy: None,
			radius: DEFAULT_RADIUS,
			color: "blue".to_string(),
		}
	}

	/// Move the node. Pins are left untouched.
	pub fn set_position(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}

	/// Current position.
	pub fn position(&self) -> Position {
		Position {
			x: self.x,
			y: self.y,
		}
	}

	/// Whether a drag currently holds this node in place.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() && self.fy.is_some()
	}
}

impl Element for Node {
	fn id(&self) -> &str {
		&self.id
	}

	fn kind(&self) -> ElementKind {
		ElementKind::Node
	}

	fn format_id(&self) -> String {
		format!("<<{}>>", self.id)
	}

	fn describe(&self) -> String {
		format!(
			"Node {} at position ({}, {})",
			self.format_id(),
			self.x,
			self.y
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn describe_includes_position() {
		let mut node = Node::new("Drake");
		assert_eq!(node.describe(), "Node <<Drake>> at position (0, 0)");
		node.set_position(12.5, -3.0);
		assert_eq!(node.describe(), "Node <<Drake>> at position (12.5, -3)");
	}

	#[test]
	fn position_is_a_snapshot() {
		let mut node = Node::new("A");
		node.set_position(1.0, 2.0);
		let before = node.position();
		node.set_position(3.0, 4.0);
		assert_eq!(before, Position { x: 1.0, y: 2.0 });
		assert_eq!(node.position(), Position { x: 3.0, y: 4.0 });
	}

	#[test]
	fn new_node_is_unpinned() {
		let node = Node::new("A");
		assert_eq!(node.kind(), ElementKind::Node);
		assert!(!node.is_pinned());
		assert_eq!(node.radius, DEFAULT_RADIUS);
	}
}
