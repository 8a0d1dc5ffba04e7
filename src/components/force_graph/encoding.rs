//! Visual encodings derived from graph statistics.
//!
//! | Channel            | Input               | Scale                                   |
//! |--------------------|---------------------|-----------------------------------------|
//! | node fill          | √ total weight      | sequential, 3-stop basis ramp           |
//! | node radius        | degree + 1          | log, `radius_range`                     |
//! | edge stroke        | √ weight            | sequential, 2-stop ramp, capped domain  |
//! | edge width         | weight              | `weight * max_stroke / max_weight * k`  |
//! | edge opacity       | weight              | `weight / divisor - offset`, clamped    |
//! | link distance      | weight              | linear, inverted `link_distance_range`  |

use log::warn;
use serde::Deserialize;

use crate::graph::{Edge, Element, Graph, GraphStats};

use super::scale::{LinearScale, LogScale, SequentialScale, extent};
use super::theme::{Color, ColorRamp};

/// Encoding parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
	/// Node radius `(min, max)` in world units. Both > 0.
	pub radius_range: (f64, f64),
	/// Upper end of the edge color domain, in weight units (the scale uses its
	/// square root). Weights above it get the last stop.
	pub edge_color_domain_max: f64,
	/// Width of the heaviest edge before `stroke_width_multiplier`. > 0.
	pub max_stroke_width: f64,
	/// Extra factor on every stroke width.
	pub stroke_width_multiplier: f64,
	/// Opacity is `weight / opacity_divisor - opacity_offset`, clamped to `[0, 1]`.
	pub opacity_divisor: f64,
	/// Subtracted from the opacity ratio before clamping.
	pub opacity_offset: f64,
	/// Target link length `(shortest, longest)`; the heaviest edge gets the shortest.
	pub link_distance_range: (f64, f64),
	/// CSS colors for the node fill ramp, light to heavy.
	pub node_color_stops: Vec<String>,
	/// CSS colors for the edge stroke ramp, light to heavy.
	pub edge_color_stops: Vec<String>,
}

impl Default for EncodingConfig {
	fn default() -> Self {
		Self {
			radius_range: (5.0, 30.0),
			edge_color_domain_max: 4500.0,
			max_stroke_width: 10.0,
			stroke_width_multiplier: 2.0,
			opacity_divisor: 3000.0,
			opacity_offset: 0.1,
			link_distance_range: (50.0, 200.0),
			node_color_stops: vec![
				"rgb(126,168,255)".to_string(),
				"rgb(127,243,43)".to_string(),
				"rgb(255,253,97)".to_string(),
			],
			edge_color_stops: vec![
				"rgb(176,209,249)".to_string(),
				"rgb(135,234,75)".to_string(),
			],
		}
	}
}

fn parse_ramp(stops: &[String]) -> ColorRamp {
	let colors = stops
		.iter()
		.filter_map(|s| {
			let color = Color::parse(s);
			if color.is_none() {
				warn!("ignoring unparsable color stop {s:?}");
			}
			color
		})
		.collect();
	ColorRamp::from_stops(colors)
}

/// Per-edge visual attributes handed to the renderer and the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	/// CSS stroke color.
	pub stroke: String,
	/// Stroke width in world units.
	pub width: f64,
	/// Stroke opacity in `[0, 1]`.
	pub opacity: f64,
	/// Target length for the link constraint.
	pub distance: f64,
}

/// All scales for one graph, built from its statistics.
#[derive(Clone, Debug)]
pub struct Encodings {
	node_color: SequentialScale,
	radius: LogScale,
	edge_color: SequentialScale,
	link_distance: LinearScale,
	stroke_factor: f64,
	opacity_divisor: f64,
	opacity_offset: f64,
}

impl Encodings {
	/// Fit every scale to the extents of `graph`.
	pub fn new(graph: &Graph, stats: &GraphStats, config: &EncodingConfig) -> Self {
		let (min_total, max_total) =
			extent(graph.nodes.iter().map(|n| stats.total_weight(n.id()))).unwrap_or((0.0, 0.0));
		let (min_degree, max_degree) = extent(
			graph
				.nodes
				.iter()
				.map(|n| (stats.degree(n.id()) + 1) as f64),
		)
		.unwrap_or((1.0, 1.0));
		let (min_weight, max_weight) =
			extent(graph.edges.iter().map(Edge::weight)).unwrap_or((0.0, 0.0));

		let (shortest, longest) = config.link_distance_range;
		let stroke_factor = if max_weight > 0.0 {
			config.max_stroke_width / max_weight * config.stroke_width_multiplier
		} else {
			0.0
		};

		Self {
			node_color: SequentialScale::new(
				(min_total.sqrt(), max_total.sqrt()),
				parse_ramp(&config.node_color_stops),
			),
			radius: LogScale::new((min_degree, max_degree), config.radius_range),
			edge_color: SequentialScale::new(
				(min_weight.sqrt(), config.edge_color_domain_max.sqrt()),
				parse_ramp(&config.edge_color_stops),
			),
			link_distance: LinearScale::new((min_weight, max_weight), (longest, shortest)),
			stroke_factor,
			opacity_divisor: config.opacity_divisor,
			opacity_offset: config.opacity_offset,
		}
	}

	/// Fill for a node with this total incident weight.
	pub fn node_color(&self, total_weight: f64) -> Color {
		self.node_color.apply(total_weight.sqrt())
	}

	/// Radius for a node with this many edges.
	pub fn node_radius(&self, degree: usize) -> f64 {
		self.radius.apply((degree + 1) as f64)
	}

	/// Stroke color for an edge weight.
	pub fn edge_color(&self, weight: f64) -> Color {
		self.edge_color.apply(weight.sqrt())
	}

	/// Stroke width, proportional to weight.
	pub fn stroke_width(&self, weight: f64) -> f64 {
		weight * self.stroke_factor
	}

	/// Opacity, clamped to `[0, 1]`.
	pub fn stroke_opacity(&self, weight: f64) -> f64 {
		(weight / self.opacity_divisor - self.opacity_offset).clamp(0.0, 1.0)
	}

	/// Target length; heavier edges are shorter.
	pub fn link_distance(&self, weight: f64) -> f64 {
		self.link_distance.apply(weight)
	}

	/// Every per-edge encoding at once.
	pub fn edge_visual(&self, edge: &Edge) -> EdgeVisual {
		let weight = edge.weight();
		EdgeVisual {
			stroke: self.edge_color(weight).to_css(),
			width: self.stroke_width(weight),
			opacity: self.stroke_opacity(weight),
			distance: self.link_distance(weight),
		}
	}

	/// Write radius and fill color into every node of the graph.
	pub fn apply_to_nodes(&self, graph: &mut Graph, stats: &GraphStats) {
		for node in graph.nodes.iter_mut() {
			node.radius = self.node_radius(stats.degree(node.id()));
			node.color = self.node_color(stats.total_weight(node.id())).to_css();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{FilterConfig, GraphData, build_graph};

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	fn star() -> (Graph, GraphStats) {
		// hub has degree 3, leaves degree 1; weights 400..=4400
		let data = GraphData::from_parts(
			["hub", "a", "b", "c"],
			[("hub", "a", 400.0), ("hub", "b", 2400.0), ("hub", "c", 4400.0)],
		);
		let graph = build_graph(&data, &FilterConfig::default()).unwrap();
		let stats = GraphStats::compute(&graph);
		(graph, stats)
	}

	#[test]
	fn radius_is_log_scaled_over_degree() {
		let (graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert!(close(enc.node_radius(1), 5.0));
		assert!(close(enc.node_radius(3), 30.0));
	}

	#[test]
	fn stroke_width_normalizes_to_heaviest_edge() {
		let (graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert!(close(enc.stroke_width(4400.0), 20.0));
		assert!(close(enc.stroke_width(2200.0), 10.0));
	}

	#[test]
	fn opacity_is_clamped() {
		let (graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert!(close(enc.stroke_opacity(150.0), 0.0));
		assert!(close(enc.stroke_opacity(600.0), 0.1));
		assert!(close(enc.stroke_opacity(9000.0), 1.0));
	}

	#[test]
	fn heavier_links_are_shorter() {
		let (graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert!(close(enc.link_distance(400.0), 200.0));
		assert!(close(enc.link_distance(4400.0), 50.0));
		assert!(enc.link_distance(2400.0) < enc.link_distance(400.0));
	}

	#[test]
	fn edge_color_domain_is_capped() {
		let (graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert_eq!(enc.edge_color(400.0), Color::rgb(176, 209, 249));
		assert_eq!(enc.edge_color(4500.0), Color::rgb(135, 234, 75));
		assert_eq!(enc.edge_color(20000.0), Color::rgb(135, 234, 75));
	}

	#[test]
	fn node_colors_span_the_ramp() {
		let (mut graph, stats) = star();
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		enc.apply_to_nodes(&mut graph, &stats);
		assert_eq!(graph.nodes.get("a").unwrap().color, "#7ea8ff");
		assert_eq!(graph.nodes.get("hub").unwrap().color, "#fffd61");
		assert!(close(graph.nodes.get("hub").unwrap().radius, 30.0));
	}

	#[test]
	fn uniform_graph_uses_midpoints() {
		let data = GraphData::from_parts(["A", "B"], [("A", "B", 500.0)]);
		let graph = build_graph(&data, &FilterConfig::default()).unwrap();
		let stats = GraphStats::compute(&graph);
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert!(close(enc.node_radius(1), 17.5));
		assert!(close(enc.link_distance(500.0), 125.0));
		let visual = enc.edge_visual(&graph.edges[0]);
		assert!(visual.width.is_finite() && visual.opacity.is_finite());
	}

	#[test]
	fn empty_graph_builds_finite_scales() {
		let graph = Graph::default();
		let stats = GraphStats::compute(&graph);
		let enc = Encodings::new(&graph, &stats, &EncodingConfig::default());
		assert_eq!(enc.stroke_width(500.0), 0.0);
	}
}
