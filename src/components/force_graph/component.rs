//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, touch and
//! wheel handlers for node dragging, panning and zooming, plus a hover tooltip.
//! Mouse drags and pans are tracked on the window once started, so they keep
//! following the pointer after it leaves the canvas. An animation loop runs
//! via `requestAnimationFrame`, stepping the simulation and redrawing each
//! frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent};

use crate::graph::{Graph, GraphStats, TooltipContent};

use super::encoding::Encodings;
use super::render;
use super::state::{ForceGraphState, Pointer, SimulationConfig};
use super::theme::Theme;

/// A filtered graph with its statistics and encodings, ready to simulate.
#[derive(Clone, Debug)]
pub struct PreparedGraph {
	/// Nodes and edges that survived filtering.
	pub graph: Graph,
	/// Per-node statistics of `graph`.
	pub stats: GraphStats,
	/// Scales fitted to `graph`.
	pub encodings: Encodings,
}

/// Bundles graph simulation state with its theme.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

/// Tooltip text and its page position.
#[derive(Clone, Debug, PartialEq)]
struct TooltipView {
	content: TooltipContent,
	left: i32,
	top: i32,
}

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn local_coords(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x - rect.left(), client_y - rect.top())
}

fn is_over_canvas(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> bool {
	let rect = canvas.get_bounding_client_rect();
	(rect.left()..rect.right()).contains(&client_x) && (rect.top()..rect.bottom()).contains(&client_y)
}

/// Page position of the tooltip box for a pointer at `(page_x, page_y)`.
fn tooltip_anchor(page_x: i32, page_y: i32) -> (i32, i32) {
	(page_x + 10, page_y - 20)
}

/// Show the hovered node's tooltip next to the pointer, or hide it.
fn show_tooltip(tooltip: RwSignal<Option<TooltipView>>, state: &ForceGraphState, ev: &MouseEvent) {
	let (left, top) = tooltip_anchor(ev.page_x(), ev.page_y());
	let next = state
		.hovered_tooltip()
		.map(|content| TooltipView { content, left, top });
	if tooltip.get_untracked() != next {
		tooltip.set(next);
	}
}

/// Visit every changed touch of a touch event as `(identifier, client_x, client_y)`.
fn for_each_changed_touch(ev: &TouchEvent, mut f: impl FnMut(i32, f64, f64)) {
	let touches = ev.changed_touches();
	for i in 0..touches.length() {
		if let Some(touch) = touches.get(i) {
			f(
				touch.identifier(),
				touch.client_x() as f64,
				touch.client_y() as f64,
			);
		}
	}
}

/// Renders an interactive force-directed graph on a fixed-size canvas.
///
/// Canvas size, forces and zoom limits come from `config`.
#[component]
pub fn ForceGraphCanvas(prepared: PreparedGraph, config: SimulationConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(None::<TooltipView>);
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let window_listeners: Rc<RefCell<Vec<(&'static str, MouseListener)>>> =
		Rc::new(RefCell::new(Vec::new()));
	let (context_init, animate_init) = (context.clone(), animate.clone());
	let window_listeners_init = window_listeners.clone();
	let mut pending = Some((prepared, config));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some((prepared, config)) = pending.take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("canvas 2d context unavailable");
			return;
		};

		let state = ForceGraphState::new(
			prepared.graph,
			prepared.stats,
			&prepared.encodings,
			&config,
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			theme: Theme::default(),
		});

		let (context_drag, canvas_drag) = (context_init.clone(), canvas.clone());
		let drag_move: MouseListener = Closure::new(move |ev: MouseEvent| {
			let (x, y) = local_coords(&canvas_drag, ev.client_x() as f64, ev.client_y() as f64);
			if let Some(ref mut c) = *context_drag.borrow_mut() {
				if c.state.move_drag(Pointer::Mouse, x, y) {
					let hovered = c.state.hover_target(Pointer::Mouse, x, y);
					c.state.set_hover(hovered);
					show_tooltip(tooltip, &c.state, &ev);
				} else {
					c.state.pan_to(x, y);
				}
			}
		});

		let (context_release, canvas_release) = (context_init.clone(), canvas.clone());
		let drag_end: MouseListener = Closure::new(move |ev: MouseEvent| {
			let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
			if let Some(ref mut c) = *context_release.borrow_mut() {
				c.state.end_drag(Pointer::Mouse);
				c.state.pan.active = false;
				if !is_over_canvas(&canvas_release, cx, cy) {
					c.state.set_hover(None);
					tooltip.set(None);
				}
			}
		});

		let mut listeners = window_listeners_init.borrow_mut();
		listeners.push(("mousemove", drag_move));
		listeners.push(("mouseup", drag_end));
		for (event, cb) in listeners.iter() {
			let _ = window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		drop(listeners);

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.theme);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_coords(&canvas, ev.client_x() as f64, ev.client_y() as f64);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if !c.state.begin_drag(Pointer::Mouse, x, y) {
				c.state.start_pan(x, y);
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_coords(&canvas, ev.client_x() as f64, ev.client_y() as f64);

		// Drags and pans move on the window listener.
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.pan.active {
				return;
			}
			let hovered = c.state.hover_target(Pointer::Mouse, x, y);
			c.state.set_hover(hovered);
			show_tooltip(tooltip, &c.state, &ev);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if c.state.grabbed(Pointer::Mouse).is_some() {
				return;
			}
			c.state.set_hover(None);
		}
		tooltip.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_coords(&canvas, ev.client_x() as f64, ev.client_y() as f64);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			for_each_changed_touch(&ev, |id, cx, cy| {
				let (x, y) = local_coords(&canvas, cx, cy);
				c.state.begin_drag(Pointer::Touch(id), x, y);
			});
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			for_each_changed_touch(&ev, |id, cx, cy| {
				let (x, y) = local_coords(&canvas, cx, cy);
				c.state.move_drag(Pointer::Touch(id), x, y);
			});
		}
	};

	let context_te = context.clone();
	let on_touchend = move |ev: TouchEvent| {
		if let Some(ref mut c) = *context_te.borrow_mut() {
			for_each_changed_touch(&ev, |id, _, _| c.state.end_drag(Pointer::Touch(id)));
		}
	};
	let on_touchcancel = on_touchend.clone();

	let tooltip_css = Theme::default().tooltip_css;

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:touchcancel=on_touchcancel
			style="display: block; cursor: grab; touch-action: none;"
		/>
		{move || {
			tooltip
				.get()
				.map(|t| {
					view! {
						<div
							id="tooltip"
							style=format!(
								"{tooltip_css} display: inline-block; left: {}px; top: {}px;",
								t.left,
								t.top,
							)
						>
							<strong>{t.content.title.clone()}</strong>
							{t
								.content
								.lines
								.iter()
								.map(|line| view! { <br />{line.clone()} })
								.collect_view()}
						</div>
					}
				})
		}}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tooltip_sits_right_of_and_above_the_pointer() {
		assert_eq!(tooltip_anchor(100, 50), (110, 30));
		assert_eq!(tooltip_anchor(0, 0), (10, -20));
	}
}
