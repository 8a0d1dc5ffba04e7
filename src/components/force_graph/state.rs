//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics engine with the graph's nodes as user data,
//! the pan/zoom view transform, active pointer drags, and hover state. Each
//! tick copies drag pins into the engine, advances it scaled by the current
//! alpha, enforces per-edge target distances, recenters the layout, and
//! copies positions back into the nodes.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;
use serde::Deserialize;

use crate::graph::{Element, Graph, GraphStats, Node, TooltipContent};

use super::drag::{self, Liveliness};
use super::encoding::{EdgeVisual, Encodings};

/// Simulation, canvas and zoom parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Canvas width in pixels. The layout is centered on its midpoint.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Node repulsion. Negative values repel.
	pub charge_strength: f64,
	/// `(min, max)` distance over which charge acts. `min` caps the repulsion
	/// two nodes can exert on each other at the strength they would have at
	/// that distance. The engine has no cutoff, so `max` is accepted but
	/// never read.
	pub charge_distance: (f64, f64),
	/// Engine spring constant along edges. Target lengths come from the link
	/// constraint, so this is usually 0.
	pub spring: f64,
	/// Engine mass of every node. Repulsion scales with the product of masses.
	pub node_mass: f32,
	/// Engine velocity damping per step.
	pub damping: f32,
	/// Fraction of the gap to the alpha target closed per tick, in `(0, 1]`.
	pub alpha_decay: f64,
	/// Alpha below which the simulation stops.
	pub alpha_min: f64,
	/// Alpha target while any node is dragged.
	pub drag_alpha_target: f64,
	/// Alpha target once every drag has ended.
	pub rest_alpha_target: f64,
	/// Allowed zoom factors `(min, max)`.
	pub zoom_extent: (f64, f64),
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			width: 3000.0,
			height: 2000.0,
			charge_strength: -1000.0,
			charge_distance: (20.0, 1000.0),
			spring: 0.0,
			node_mass: 10.0,
			damping: 0.9,
			alpha_decay: 0.01,
			alpha_min: 0.001,
			drag_alpha_target: 0.8,
			rest_alpha_target: 0.0,
			zoom_extent: (0.1, 10.0),
		}
	}
}

impl SimulationConfig {
	fn engine_parameters(&self) -> SimulationParameters {
		let charge = self.charge_strength.abs();
		let mass = self.node_mass as f64;
		let min_distance = self.charge_distance.0.max(1.0);
		SimulationParameters {
			force_charge: charge as f32,
			force_spring: self.spring as f32,
			force_max: (charge * mass * mass / (min_distance * min_distance)) as f32,
			node_speed: 3000.0,
			damping_factor: self.damping,
		}
	}

	fn liveliness(&self) -> Liveliness {
		Liveliness::new(
			self.alpha_decay,
			self.alpha_min,
			self.drag_alpha_target,
			self.rest_alpha_target,
		)
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%), clamped to the configured extent.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is in progress.
	pub active: bool,
	/// Pointer x when the pan started.
	pub start_x: f64,
	/// Pointer y when the pan started.
	pub start_y: f64,
	/// View translation x when the pan started.
	pub transform_start_x: f64,
	/// View translation y when the pan started.
	pub transform_start_y: f64,
}

/// Source of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pointer {
	/// The mouse.
	Mouse,
	/// A touch point, by its `Touch::identifier`.
	Touch(i32),
}

/// One active node drag.
#[derive(Clone, Copy, Debug)]
struct DragGrab {
	node_idx: DefaultNodeIdx,
	/// Node position minus pointer position at grab time, in graph units.
	offset_x: f64,
	offset_y: f64,
}

#[derive(Clone, Copy, Debug)]
struct Link {
	source: DefaultNodeIdx,
	target: DefaultNodeIdx,
	distance: f64,
	/// Share of the correction applied to the target endpoint.
	bias: f64,
	strength: f64,
}

/// Core graph state combining the physics engine with interaction tracking.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	/// Physics engine holding every node and edge.
	pub graph: ForceGraph<Node, EdgeVisual>,
	/// Per-node statistics used for tooltips.
	pub stats: GraphStats,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Background pan in progress, if any.
	pub pan: PanState,
	/// Simulation alpha and drag count.
	pub liveliness: Liveliness,
	/// Node under the pointer.
	pub hovered: Option<DefaultNodeIdx>,
	/// Canvas width in graph units.
	pub width: f64,
	/// Canvas height in graph units.
	pub height: f64,
	zoom_extent: (f64, f64),
	grabs: HashMap<Pointer, DragGrab>,
	links: Vec<Link>,
}

impl ForceGraphState {
	/// Seed the layout and hand nodes and links to the engine.
	pub fn new(
		mut graph: Graph,
		stats: GraphStats,
		encodings: &Encodings,
		config: &SimulationConfig,
	) -> Self {
		encodings.apply_to_nodes(&mut graph, &stats);

		let (cx, cy) = (config.width / 2.0, config.height / 2.0);
		let mut engine = ForceGraph::new(config.engine_parameters());
		let mut id_to_idx = HashMap::new();

		// Phyllotaxis seed layout around the center.
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		for (i, mut node) in graph.nodes.into_nodes().into_iter().enumerate() {
			let radius = 10.0 * (0.5 + i as f64).sqrt();
			let angle = i as f64 * golden_angle;
			node.set_position(cx + radius * angle.cos(), cy + radius * angle.sin());

			let id = node.id().to_string();
			let idx = engine.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: config.node_mass,
				is_anchor: false,
				user_data: node,
			});
			id_to_idx.insert(id, idx);
		}

		let mut links = Vec::with_capacity(graph.edges.len());
		for edge in &graph.edges {
			let (Some(&source), Some(&target)) =
				(id_to_idx.get(edge.source()), id_to_idx.get(edge.target()))
			else {
				continue;
			};
			let visual = encodings.edge_visual(edge);
			let (ds, dt) = (
				stats.degree(edge.source()).max(1) as f64,
				stats.degree(edge.target()).max(1) as f64,
			);
			links.push(Link {
				source,
				target,
				distance: visual.distance,
				bias: ds / (ds + dt),
				strength: 1.0 / ds.min(dt),
			});
			engine.add_edge(source, target, EdgeData { user_data: visual });
		}

		debug!(
			"simulation ready: {} nodes, {} links",
			id_to_idx.len(),
			links.len()
		);

		Self {
			graph: engine,
			stats,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			liveliness: config.liveliness(),
			hovered: None,
			width: config.width,
			height: config.height,
			zoom_extent: config.zoom_extent,
			grabs: HashMap::new(),
			links,
		}
	}

	/// Invert the view transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Node under a screen position. Where circles overlap, the node whose
	/// center is closest wins.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			let closer = found.is_none_or(|(_, best)| dist < best);
			if dist < node.data.user_data.radius && closer {
				found = Some((node.index(), dist));
			}
		});
		found.map(|(idx, _)| idx)
	}

	/// Snapshot of a node's data.
	pub fn node(&self, idx: DefaultNodeIdx) -> Option<Node> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	fn with_node_mut(&mut self, idx: DefaultNodeIdx, f: impl FnOnce(&mut Node, &mut Liveliness)) {
		let liveliness = &mut self.liveliness;
		let mut f = Some(f);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some(f) = f.take() {
					f(&mut node.data.user_data, liveliness);
				}
			}
		});
	}

	/// Grab the node under the pointer. Returns whether a node was hit.
	pub fn begin_drag(&mut self, pointer: Pointer, sx: f64, sy: f64) -> bool {
		let Some(node_idx) = self.node_at_position(sx, sy) else {
			return false;
		};
		if let Some(previous) = self.grabs.remove(&pointer) {
			self.with_node_mut(previous.node_idx, drag::drag_end);
		}
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let Some(node) = self.node(node_idx) else {
			return false;
		};
		self.grabs.insert(
			pointer,
			DragGrab {
				node_idx,
				offset_x: node.x - gx,
				offset_y: node.y - gy,
			},
		);
		self.with_node_mut(node_idx, drag::drag_start);
		true
	}

	/// Move the node held by `pointer`. Returns whether the pointer holds one.
	pub fn move_drag(&mut self, pointer: Pointer, sx: f64, sy: f64) -> bool {
		let Some(grab) = self.grabs.get(&pointer).copied() else {
			return false;
		};
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let (x, y) = (gx + grab.offset_x, gy + grab.offset_y);
		self.with_node_mut(grab.node_idx, |node, _| drag::drag_to(node, x, y));
		true
	}

	/// Release the node held by `pointer`, if any.
	pub fn end_drag(&mut self, pointer: Pointer) {
		if let Some(grab) = self.grabs.remove(&pointer) {
			self.with_node_mut(grab.node_idx, drag::drag_end);
		}
	}

	/// Node a pointer at `(sx, sy)` is over. A pointer holding a node stays
	/// over it for the whole drag, even while the engine lags behind.
	pub fn hover_target(&self, pointer: Pointer, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		self.grabbed(pointer)
			.or_else(|| self.node_at_position(sx, sy))
	}

	/// Node currently held by `pointer`.
	pub fn grabbed(&self, pointer: Pointer) -> Option<DefaultNodeIdx> {
		self.grabs.get(&pointer).map(|grab| grab.node_idx)
	}

	/// Mark the hovered node.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hovered = node;
	}

	/// Tooltip for the hovered node.
	pub fn hovered_tooltip(&self) -> Option<TooltipContent> {
		let node = self.node(self.hovered?)?;
		Some(self.stats.tooltip(node.id()))
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let (min_k, max_k) = self.zoom_extent;
		let new_k = (self.transform.k * factor).max(min_k).min(max_k);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Begin panning from screen point `(sx, sy)`.
	pub fn start_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Continue a pan to `(sx, sy)`. No-op when no pan is active.
	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Advance one frame. Does nothing once alpha has cooled below its minimum.
	pub fn tick(&mut self, dt: f32) {
		let Some(alpha) = self.liveliness.tick() else {
			return;
		};

		self.graph.visit_nodes_mut(|node| {
			let pinned = &node.data.user_data;
			node.data.is_anchor = pinned.is_pinned();
			if let (Some(fx), Some(fy)) = (pinned.fx, pinned.fy) {
				node.data.x = fx as f32;
				node.data.y = fy as f32;
			}
		});

		self.graph.update(dt * alpha as f32);
		self.apply_links(alpha);
		self.apply_centering();

		self.graph.visit_nodes_mut(|node| {
			let (x, y) = (node.data.x as f64, node.data.y as f64);
			node.data.user_data.set_position(x, y);
		});
	}

	/// Pull or push each edge's endpoints toward its target distance.
	fn apply_links(&mut self, alpha: f64) {
		let mut positions: HashMap<DefaultNodeIdx, (f64, f64, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.index(),
				(node.x() as f64, node.y() as f64, node.data.is_anchor),
			);
		});

		for link in &self.links {
			let (Some(&(sx, sy, _)), Some(&(tx, ty, _))) =
				(positions.get(&link.source), positions.get(&link.target))
			else {
				continue;
			};
			let (dx, dy) = (tx - sx, ty - sy);
			let len = (dx * dx + dy * dy).sqrt();
			if len < 1e-6 {
				continue;
			}
			let l = (len - link.distance) / len * alpha * link.strength;
			let (cx, cy) = (dx * l, dy * l);
			if let Some(target) = positions.get_mut(&link.target) {
				if !target.2 {
					target.0 -= cx * link.bias;
					target.1 -= cy * link.bias;
				}
			}
			if let Some(source) = positions.get_mut(&link.source) {
				if !source.2 {
					source.0 += cx * (1.0 - link.bias);
					source.1 += cy * (1.0 - link.bias);
				}
			}
		}

		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y, _)) = positions.get(&node.index()) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}

	/// Translate free nodes so the layout's centroid sits at the canvas midpoint.
	fn apply_centering(&mut self) {
		let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
		self.graph.visit_nodes(|node| {
			sum_x += node.x() as f64;
			sum_y += node.y() as f64;
			count += 1;
		});
		if count == 0 {
			return;
		}
		let shift_x = sum_x / count as f64 - self.width / 2.0;
		let shift_y = sum_y / count as f64 - self.height / 2.0;
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= shift_x as f32;
				node.data.y -= shift_y as f32;
			}
		});
	}
}
