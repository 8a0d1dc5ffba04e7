//! Canvas rendering for the force graph.
//!
//! Draws in two world-space passes for correct z-ordering: edges first, then
//! nodes with their labels, with a ring around the hovered node.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::graph::Element;

use super::state::ForceGraphState;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_edges(|n1, n2, edge| {
		let visual = &edge.user_data;
		if visual.opacity <= 0.0 || visual.width <= 0.0 {
			return;
		}
		ctx.set_global_alpha(visual.opacity);
		ctx.set_stroke_style_str(&visual.stroke);
		ctx.set_line_width(visual.width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = state.transform.k;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.hovered == Some(node.index()) {
			let hover = &theme.hover;
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.radius + hover.ring_offset / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&hover.ring_color.to_css());
			ctx.set_line_width(hover.ring_width / k);
			ctx.stroke();
		}

		let font_size = info.radius * theme.label.size_ratio;
		ctx.set_font(&format!("{}px {}", font_size, theme.label.font_family));
		ctx.set_fill_style_str(&theme.label.color.to_css());
		let _ = ctx.fill_text(info.id(), x, y);
	});
}
