//! Continuous scales mapping data values to visual values.
//!
//! # Degenerate domains
//!
//! When a domain collapses to a single value (`d0 == d1`) every scale maps its
//! whole input to the midpoint of its output, so a graph with uniform weights
//! still renders with finite sizes and colors.

use super::theme::{Color, ColorRamp};

/// Maps `[d0, d1]` linearly onto `[r0, r1]`. Unclamped: inputs outside the
/// domain extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	/// Scale from `domain` onto `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Map one value.
	pub fn apply(&self, x: f64) -> f64 {
		let (r0, r1) = self.range;
		r0 + normalize(x, self.domain) * (r1 - r0)
	}
}

/// Maps `[d0, d1]` onto `[r0, r1]` in log space. Domain values must be > 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
	inner: LinearScale,
}

impl LogScale {
	/// Scale from `domain` onto `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			inner: LinearScale::new((domain.0.ln(), domain.1.ln()), range),
		}
	}

	/// Map one value. `x` must be > 0.
	pub fn apply(&self, x: f64) -> f64 {
		self.inner.apply(x.ln())
	}
}

/// Maps `[d0, d1]` onto a color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct SequentialScale {
	domain: (f64, f64),
	ramp: ColorRamp,
}

impl SequentialScale {
	/// Scale from `domain` onto `ramp`.
	pub fn new(domain: (f64, f64), ramp: ColorRamp) -> Self {
		Self { domain, ramp }
	}

	/// Color for one value.
	pub fn apply(&self, x: f64) -> Color {
		self.ramp.at(normalize(x, self.domain))
	}
}

/// Position of `x` within `domain` as a fraction, 0.5 for a collapsed domain.
fn normalize(x: f64, (d0, d1): (f64, f64)) -> f64 {
	let span = d1 - d0;
	if span == 0.0 || !span.is_finite() {
		0.5
	} else {
		(x - d0) / span
	}
}

/// `(min, max)` of the values, or `None` for an empty input.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
	values.into_iter().fold(None, |acc, v| match acc {
		None => Some((v, v)),
		Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
	})
}
