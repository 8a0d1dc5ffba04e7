//! Node pinning protocol and simulation liveliness.
//!
//! A drag pins a node (`fx`/`fy`) so the simulation holds it under the pointer,
//! and keeps the simulation lively while any drag is active. Concurrent drags
//! (multi-touch) share one [`Liveliness`]: the first drag to start raises the
//! alpha target, the last one to end lowers it again.

use crate::graph::Node;

/// Alpha ("liveliness") of the simulation and the number of active drags.
///
/// Every tick alpha moves toward `alpha_target` by `alpha_decay` of the
/// remaining gap. The simulation stops once alpha falls below `alpha_min` and
/// resumes on [`Liveliness::restart`].
#[derive(Clone, Debug, PartialEq)]
pub struct Liveliness {
	/// Current alpha. Scales every engine step.
	pub alpha: f64,
	/// Value alpha decays toward.
	pub alpha_target: f64,
	/// Share of the gap to the target closed per tick.
	pub alpha_decay: f64,
	/// Alpha below which ticking stops.
	pub alpha_min: f64,
	/// Target while at least one drag is active.
	pub drag_target: f64,
	/// Target with no drag active.
	pub rest_target: f64,
	running: bool,
	active_drags: usize,
}

impl Liveliness {
	/// Start hot (alpha 1) with the rest target and no drags.
	pub fn new(alpha_decay: f64, alpha_min: f64, drag_target: f64, rest_target: f64) -> Self {
		Self {
			alpha: 1.0,
			alpha_target: rest_target,
			alpha_decay,
			alpha_min,
			drag_target,
			rest_target,
			running: true,
			active_drags: 0,
		}
	}

	/// Whether `tick` still advances the simulation.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Drags currently holding a node.
	pub fn active_drags(&self) -> usize {
		self.active_drags
	}

	/// Resume ticking after a cool-down.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advance alpha by one tick. Returns the alpha to step the engine with, or
	/// `None` if the simulation has cooled down.
	pub fn tick(&mut self) -> Option<f64> {
		if !self.running {
			return None;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		if self.alpha < self.alpha_min {
			self.running = false;
			return None;
		}
		Some(self.alpha)
	}
}

impl Default for Liveliness {
	fn default() -> Self {
		Self::new(0.01, 0.001, 0.8, 0.0)
	}
}

/// Begin dragging `node`: pin it where it is.
pub fn drag_start(node: &mut Node, liveliness: &mut Liveliness) {
	if liveliness.active_drags == 0 {
		liveliness.alpha_target = liveliness.drag_target;
		liveliness.restart();
	}
	liveliness.active_drags += 1;
	node.fx = Some(node.x);
	node.fy = Some(node.y);
}

/// Move the pin of a dragged node to the pointer, in graph coordinates.
pub fn drag_to(node: &mut Node, x: f64, y: f64) {
	node.fx = Some(x);
	node.fy = Some(y);
}

/// Finish dragging `node`: release its pin.
pub fn drag_end(node: &mut Node, liveliness: &mut Liveliness) {
	liveliness.active_drags = liveliness.active_drags.saturating_sub(1);
	if liveliness.active_drags == 0 {
		liveliness.alpha_target = liveliness.rest_target;
	}
	node.fx = None;
	node.fy = None;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_drag_lifecycle() {
		let mut live = Liveliness::default();
		let mut node = Node::new("A");
		node.set_position(10.0, 20.0);

		drag_start(&mut node, &mut live);
		assert_eq!((node.fx, node.fy), (Some(10.0), Some(20.0)));
		assert_eq!(live.alpha_target, 0.8);

		for step in 1..=5 {
			drag_to(&mut node, 10.0 + step as f64, 20.0);
		}
		assert_eq!(node.fx, Some(15.0));

		drag_end(&mut node, &mut live);
		assert_eq!((node.fx, node.fy), (None, None));
		assert_eq!(live.alpha_target, 0.0);
		assert_eq!(live.active_drags(), 0);
	}

	#[test]
	fn drag_without_moves() {
		let mut live = Liveliness::default();
		let mut node = Node::new("A");
		drag_start(&mut node, &mut live);
		drag_end(&mut node, &mut live);
		assert!(!node.is_pinned());
		assert_eq!(live.alpha_target, live.rest_target);
	}

	#[test]
	fn concurrent_drags_keep_simulation_lively() {
		let mut live = Liveliness::default();
		let (mut a, mut b) = (Node::new("A"), Node::new("B"));

		drag_start(&mut a, &mut live);
		drag_start(&mut b, &mut live);
		drag_end(&mut a, &mut live);
		assert_eq!(live.alpha_target, 0.8, "B is still being dragged");
		assert!(b.is_pinned());
		assert!(!a.is_pinned());

		drag_end(&mut b, &mut live);
		assert_eq!(live.alpha_target, 0.0);
	}

	#[test]
	fn alpha_cools_and_drag_restarts() {
		let mut live = Liveliness::new(0.5, 0.01, 0.8, 0.0);
		let mut ticks = 0;
		while live.tick().is_some() {
			ticks += 1;
			assert!(ticks < 100);
		}
		assert!(!live.is_running());
		assert!(live.alpha < 0.01);

		let mut node = Node::new("A");
		drag_start(&mut node, &mut live);
		assert!(live.is_running());
		let alpha = live.tick().unwrap();
		assert!(alpha > 0.01);
	}

	#[test]
	fn alpha_moves_toward_target() {
		let mut live = Liveliness::default();
		let first = live.tick().unwrap();
		assert!((first - 0.99).abs() < 1e-12);
	}
}
