//! Visual theming for the force graph.
//!
//! Provides the color type, color ramps used by the sequential scales, and the
//! fixed styling (background, labels, hover ring, tooltip).

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| channel(a as f64 * (1.0 - t) + b as f64 * t);
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS form: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// `#rrggbb`, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 {
				return None;
			}
			let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
			return Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?));
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if parts.len() != 3 && parts.len() != 4 {
			return None;
		}
		let r = parts[0].parse().ok()?;
		let g = parts[1].parse().ok()?;
		let b = parts[2].parse().ok()?;
		let a = match parts.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}
}

fn channel(v: f64) -> u8 {
	v.round().clamp(0.0, 255.0) as u8
}

/// A color interpolator over `t` in `[0, 1]`. Inputs outside are clamped.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorRamp {
	/// Straight RGB blend between two colors.
	Linear(Color, Color),
	/// Uniform cubic B-spline through the stops; passes through the first and
	/// last stop exactly.
	Basis(Vec<Color>),
}

impl ColorRamp {
	/// Two stops become a linear ramp, one stop a constant, more stops a basis spline.
	pub fn from_stops(stops: Vec<Color>) -> Self {
		match stops.as_slice() {
			[] => ColorRamp::Linear(Color::rgb(0, 0, 0), Color::rgb(0, 0, 0)),
			[only] => ColorRamp::Linear(*only, *only),
			[from, to] => ColorRamp::Linear(*from, *to),
			_ => ColorRamp::Basis(stops),
		}
	}

	/// Color at `t`. NaN maps to the middle of the ramp.
	pub fn at(&self, t: f64) -> Color {
		let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
		match self {
			ColorRamp::Linear(from, to) => from.lerp(*to, t),
			ColorRamp::Basis(stops) => Color::rgb(
				channel(basis_spline(stops, t, |c| c.r as f64)),
				channel(basis_spline(stops, t, |c| c.g as f64)),
				channel(basis_spline(stops, t, |c| c.b as f64)),
			),
		}
	}
}

/// Evaluates one channel of a uniform B-spline through `stops` (at least 2).
/// Phantom end points `2 * v1 - v2` make the curve start and end on the stops.
fn basis_spline(stops: &[Color], t: f64, value: impl Fn(&Color) -> f64) -> f64 {
	let n = stops.len() - 1;
	let i = if t >= 1.0 {
		n - 1
	} else {
		(t * n as f64).floor() as usize
	};
	let v1 = value(&stops[i]);
	let v2 = value(&stops[i + 1]);
	let v0 = if i > 0 { value(&stops[i - 1]) } else { 2.0 * v1 - v2 };
	let v3 = if i + 2 <= n { value(&stops[i + 2]) } else { 2.0 * v2 - v1 };

	let t1 = (t - i as f64 / n as f64) * n as f64;
	let (t2, t3) = (t1 * t1, t1 * t1 * t1);
	((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
		+ (4.0 - 6.0 * t2 + 3.0 * t3) * v1
		+ (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
		+ t3 * v3)
		/ 6.0
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Text fill.
	pub color: Color,
	/// Font size as a fraction of the node radius.
	pub size_ratio: f64,
	/// CSS font family.
	pub font_family: &'static str,
}

/// Ring drawn around the hovered node.
#[derive(Clone, Debug)]
pub struct HoverStyle {
	/// Ring stroke.
	pub ring_color: Color,
	/// Stroke width in screen pixels.
	pub ring_width: f64,
	/// Gap between node edge and ring in screen pixels.
	pub ring_offset: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Node labels.
	pub label: LabelStyle,
	/// Hover ring.
	pub hover: HoverStyle,
	/// Inline CSS for the tooltip element.
	pub tooltip_css: &'static str,
}

impl Theme {
	/// Light canvas with dark labels.
	pub fn default_theme() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			label: LabelStyle {
				color: Color::rgb(20, 20, 20),
				size_ratio: 0.5,
				font_family: "sans-serif",
			},
			hover: HoverStyle {
				ring_color: Color::rgba(40, 40, 40, 0.8),
				ring_width: 1.5,
				ring_offset: 2.0,
			},
			tooltip_css: "position: absolute; background: lightgray; padding: 5px; \
				border-radius: 5px; pointer-events: none;",
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_colors() {
		assert_eq!(Color::parse("rgb(126,168,255)"), Some(Color::rgb(126, 168, 255)));
		assert_eq!(
			Color::parse("rgba(1, 2, 3, 0.5)"),
			Some(Color::rgba(1, 2, 3, 0.5))
		);
		assert_eq!(Color::parse("#7ea8ff"), Some(Color::rgb(126, 168, 255)));
		assert_eq!(Color::parse("blue"), None);
		assert_eq!(Color::parse("rgb(1,2)"), None);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(126, 168, 255).to_css(), "#7ea8ff");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn basis_ramp_passes_through_end_stops() {
		let stops = vec![
			Color::rgb(126, 168, 255),
			Color::rgb(127, 243, 43),
			Color::rgb(255, 253, 97),
		];
		let ramp = ColorRamp::from_stops(stops.clone());
		assert_eq!(ramp.at(0.0), stops[0]);
		assert_eq!(ramp.at(1.0), stops[2]);
		assert_eq!(ramp.at(-3.0), stops[0]);
		assert_eq!(ramp.at(7.0), stops[2]);
	}

	#[test]
	fn basis_ramp_midpoint_is_smoothed() {
		let ramp = ColorRamp::from_stops(vec![
			Color::rgb(0, 0, 0),
			Color::rgb(120, 120, 120),
			Color::rgb(0, 0, 0),
		]);
		// The spline is pulled toward, but does not reach, the middle stop.
		let mid = ramp.at(0.5);
		assert_eq!(mid, Color::rgb(80, 80, 80));
	}

	#[test]
	fn linear_ramp_rounds_channels() {
		let ramp = ColorRamp::from_stops(vec![Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)]);
		assert_eq!(ramp.at(0.5), Color::rgb(128, 128, 128));
	}
}
