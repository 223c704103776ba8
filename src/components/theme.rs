//! Visual theming shared by the globe and the starfield.
//!
//! Colors, gradient stops and glow presets are fixed at build time. Nothing in
//! here changes per frame.

use super::fmt_decimal;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Fully transparent; renders as the CSS keyword `transparent` in
	/// gradient stops.
	pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

	/// An opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// A color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// The same hue at a different opacity.
	pub const fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Opaque colors render as `#rrggbb`, translucent ones as `rgba(...)`
	/// with the alpha rounded to three decimals.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			self.to_css_rgba()
		}
	}

	/// Always `rgba(r, g, b, a)`, even when opaque.
	pub fn to_css_rgba(self) -> String {
		format!(
			"rgba({}, {}, {}, {})",
			self.r,
			self.g,
			self.b,
			fmt_decimal(self.a)
		)
	}
}

/// One color stop of a CSS gradient, positioned in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// Stop color.
	pub color: Color,
	/// Position along the gradient, in percent.
	pub at: f64,
}

impl GradientStop {
	/// A stop at `at` percent.
	pub const fn new(color: Color, at: f64) -> Self {
		Self { color, at }
	}

	/// CSS for this stop, e.g. `rgba(20, 184, 166, 0.04) 42%`.
	pub fn to_css(&self) -> String {
		let color = if self.color.a == 0.0 {
			"transparent".to_string()
		} else {
			self.color.to_css_rgba()
		};
		format!("{color} {}%", fmt_decimal(self.at))
	}
}

fn join_stops(stops: &[GradientStop]) -> String {
	stops
		.iter()
		.map(GradientStop::to_css)
		.collect::<Vec<_>>()
		.join(", ")
}

/// Fixed styling of the globe's chrome and country layers.
#[derive(Clone, Debug)]
pub struct GlobeTheme {
	/// Inner stop of the ocean gradient.
	pub ocean_inner: Color,
	/// Outer stop of the ocean gradient.
	pub ocean_outer: Color,
	/// Gradient focus, as percentages of the sphere's bounding box.
	pub ocean_focus: (f64, f64),
	/// Stroke of the latitude/longitude grid.
	pub graticule_stroke: Color,
	/// Stroke width of the grid.
	pub graticule_width: f64,
	/// Stroke of the atmosphere ring around the sphere.
	pub ring_stroke: Color,
	/// Stroke width of the atmosphere ring.
	pub ring_width: f64,
	/// Blur radius of the glow filter applied to high-activity countries.
	pub glow_blur: f64,
	/// How far the glow filter region extends past a country's bounding box
	/// on each side, in percent of its size.
	pub glow_margin: f64,
	/// Hue used for every country with an activity value.
	pub accent: Color,
	/// Fill of countries without activity.
	pub fallback_fill: Color,
	/// Stroke of countries without activity.
	pub fallback_stroke: Color,
	/// Stroke width of every country outline.
	pub country_stroke_width: f64,
}

impl Default for GlobeTheme {
	fn default() -> Self {
		Self {
			ocean_inner: Color::rgb(13, 17, 23),
			ocean_outer: Color::rgb(1, 4, 9),
			ocean_focus: (35.0, 35.0),
			graticule_stroke: Color::rgba(255, 255, 255, 0.03),
			graticule_width: 0.5,
			ring_stroke: Color::rgba(20, 184, 166, 0.1),
			ring_width: 2.0,
			glow_blur: 2.0,
			glow_margin: 50.0,
			accent: Color::rgb(20, 184, 166),
			fallback_fill: Color::rgba(255, 255, 255, 0.06),
			fallback_stroke: Color::rgba(255, 255, 255, 0.1),
			country_stroke_width: 0.5,
		}
	}
}

const TEAL: Color = Color::rgb(20, 184, 166);
const CYAN: Color = Color::rgb(6, 182, 212);

/// A wide diagonal band of light crossing behind the globe.
#[derive(Clone, Copy, Debug)]
pub struct RayBand {
	/// Band thickness in pixels.
	pub height: f64,
	/// Vertical anchor of the band's centre, percent of the container.
	pub top: f64,
	/// Horizontal shift applied before rotating, percent of the band width.
	pub shift: f64,
	/// Rotation in degrees; negative tilts the band up to the right.
	pub angle: f64,
	/// Horizontal gradient across the band.
	pub stops: &'static [GradientStop],
}

impl RayBand {
	/// Inline CSS for the band's `<div>`.
	pub fn style(&self) -> String {
		format!(
			"position: absolute; pointer-events: none; z-index: 0; \
			 width: 250vw; height: {}px; left: 50%; top: {}%; \
			 transform: translate({}%, -50%) rotate({}deg); \
			 background: linear-gradient(90deg, {});",
			fmt_decimal(self.height),
			fmt_decimal(self.top),
			fmt_decimal(self.shift),
			fmt_decimal(self.angle),
			join_stops(self.stops),
		)
	}
}

/// A round radial glow centred on the globe.
#[derive(Clone, Copy, Debug)]
pub struct HaloGlow {
	/// Diameter in pixels.
	pub diameter: f64,
	/// Radial gradient from the centre outwards.
	pub stops: &'static [GradientStop],
	/// Gaussian blur in pixels, if any.
	pub blur: Option<f64>,
}

impl HaloGlow {
	/// Inline CSS for the glow's `<div>`.
	pub fn style(&self) -> String {
		let blur = self
			.blur
			.map(|b| format!(" filter: blur({}px);", fmt_decimal(b)))
			.unwrap_or_default();
		format!(
			"position: absolute; pointer-events: none; z-index: 0; \
			 width: {d}px; height: {d}px; left: 50%; top: 50%; \
			 transform: translate(-50%, -50%); border-radius: 50%; \
			 background: radial-gradient(circle, {});{blur}",
			join_stops(self.stops),
			d = fmt_decimal(self.diameter),
		)
	}
}

/// The two sun rays behind the globe, brighter one first.
pub const GLOBE_RAYS: [RayBand; 2] = [
	RayBand {
		height: 400.0,
		top: 50.0,
		shift: -40.0,
		angle: -12.0,
		stops: &[
			GradientStop::new(Color::TRANSPARENT, 0.0),
			GradientStop::new(Color::TRANSPARENT, 35.0),
			GradientStop::new(TEAL.with_alpha(0.04), 42.0),
			GradientStop::new(CYAN.with_alpha(0.08), 50.0),
			GradientStop::new(TEAL.with_alpha(0.04), 58.0),
			GradientStop::new(Color::TRANSPARENT, 65.0),
			GradientStop::new(Color::TRANSPARENT, 100.0),
		],
	},
	RayBand {
		height: 200.0,
		top: 60.0,
		shift: -45.0,
		angle: -6.0,
		stops: &[
			GradientStop::new(Color::TRANSPARENT, 0.0),
			GradientStop::new(Color::TRANSPARENT, 38.0),
			GradientStop::new(TEAL.with_alpha(0.03), 45.0),
			GradientStop::new(CYAN.with_alpha(0.05), 52.0),
			GradientStop::new(TEAL.with_alpha(0.03), 59.0),
			GradientStop::new(Color::TRANSPARENT, 66.0),
			GradientStop::new(Color::TRANSPARENT, 100.0),
		],
	},
];

/// The wide ambient glow and the tighter ring glow, in paint order.
pub const GLOBE_HALOS: [HaloGlow; 2] = [
	HaloGlow {
		diameter: 600.0,
		stops: &[
			GradientStop::new(TEAL.with_alpha(0.12), 0.0),
			GradientStop::new(CYAN.with_alpha(0.06), 30.0),
			GradientStop::new(Color::TRANSPARENT, 60.0),
		],
		blur: Some(40.0),
	},
	HaloGlow {
		diameter: 450.0,
		stops: &[
			GradientStop::new(Color::TRANSPARENT, 35.0),
			GradientStop::new(TEAL.with_alpha(0.08), 45.0),
			GradientStop::new(TEAL.with_alpha(0.15), 50.0),
			GradientStop::new(CYAN.with_alpha(0.08), 55.0),
			GradientStop::new(Color::TRANSPARENT, 65.0),
		],
		blur: None,
	},
];

/// Fill and glow for one particle color class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPreset {
	/// Particle fill.
	pub fill: Color,
	/// Box-shadow blur radius in pixels.
	pub glow_radius: f64,
	/// Box-shadow color.
	pub glow: Color,
}

impl StarPreset {
	/// CSS `box-shadow` value, e.g. `0 0 6px rgba(...)`.
	pub fn box_shadow(&self) -> String {
		format!(
			"0 0 {}px {}",
			fmt_decimal(self.glow_radius),
			self.glow.to_css_rgba()
		)
	}
}

/// The three particle looks, indexed by a descriptor's color class.
#[derive(Clone, Debug)]
pub struct StarPalette {
	/// Teal, cyan and white, in color-class order.
	pub presets: [StarPreset; 3],
}

impl StarPalette {
	/// Preset for a color class; classes past the end wrap around.
	pub fn get(&self, color_class: u8) -> &StarPreset {
		&self.presets[color_class as usize % self.presets.len()]
	}
}

impl Default for StarPalette {
	fn default() -> Self {
		Self {
			presets: [
				StarPreset {
					fill: Color::rgba(20, 184, 166, 1.0),
					glow_radius: 6.0,
					glow: Color::rgba(20, 184, 166, 0.8),
				},
				StarPreset {
					fill: Color::rgba(6, 182, 212, 1.0),
					glow_radius: 6.0,
					glow: Color::rgba(6, 182, 212, 0.8),
				},
				StarPreset {
					fill: Color::rgba(255, 255, 255, 0.9),
					glow_radius: 4.0,
					glow: Color::rgba(255, 255, 255, 0.5),
				},
			],
		}
	}
}

/// A large blurred gradient blob drifting behind the stars.
#[derive(Clone, Copy, Debug)]
pub struct Orb {
	/// Diameter in pixels.
	pub diameter: f64,
	/// Color at the centre.
	pub color: Color,
	/// Alpha of the gradient's middle stop (at 40%), if it has one.
	pub mid_alpha: Option<f64>,
	/// Gaussian blur in pixels.
	pub blur: f64,
	/// CSS placement, e.g. `left: 5%; top: 10%;`.
	pub anchor: &'static str,
	/// Peak drift offset in pixels.
	pub drift: (f64, f64),
	/// Scale at the drift peak.
	pub scale_peak: f64,
	/// Opacity at rest and at the drift peak.
	pub opacity: (f64, f64),
	/// Length of one drift loop in seconds.
	pub period: f64,
}

impl Orb {
	/// CSS `background` value.
	pub fn background(&self) -> String {
		match self.mid_alpha {
			Some(mid) => format!(
				"radial-gradient(circle, {} 0%, {} 40%, transparent 70%)",
				self.color.to_css_rgba(),
				self.color.with_alpha(mid).to_css_rgba()
			),
			None => format!(
				"radial-gradient(circle, {} 0%, transparent 70%)",
				self.color.to_css_rgba()
			),
		}
	}
}

/// Teal, cyan and violet orbs.
pub const ORBS: [Orb; 3] = [
	Orb {
		diameter: 500.0,
		color: Color::rgba(20, 184, 166, 0.25),
		mid_alpha: Some(0.1),
		blur: 80.0,
		anchor: "left: 5%; top: 10%;",
		drift: (80.0, 50.0),
		scale_peak: 1.3,
		opacity: (0.8, 1.0),
		period: 15.0,
	},
	Orb {
		diameter: 400.0,
		color: Color::rgba(6, 182, 212, 0.2),
		mid_alpha: Some(0.08),
		blur: 70.0,
		anchor: "right: 10%; bottom: 20%;",
		drift: (-60.0, -40.0),
		scale_peak: 0.85,
		opacity: (0.7, 1.0),
		period: 12.0,
	},
	Orb {
		diameter: 350.0,
		color: Color::rgba(139, 92, 246, 0.15),
		mid_alpha: None,
		blur: 60.0,
		anchor: "left: 50%; top: 60%;",
		drift: (40.0, -30.0),
		scale_peak: 1.15,
		opacity: (0.5, 0.8),
		period: 18.0,
	},
];
