//! Deterministic particle fields for the background.
//!
//! Every descriptor is a pure function of its index and the field's seed
//! offset, so the same count always produces the same field on every render.

use crate::components::fmt_decimal;
use crate::components::theme::StarPalette;

/// Trigonometric hash mapping a seed to `[0, 1)`.
pub fn seeded_random(seed: f64) -> f64 {
	let x = (seed * 9999.0).sin() * 10000.0;
	x - x.floor()
}

/// A single twinkling particle. Never mutated after generation; only its
/// rendered opacity and scale oscillate.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleDescriptor {
	/// Index in the field; stable across renders.
	pub id: usize,
	/// Horizontal position, percent of the container width.
	pub x: f64,
	/// Vertical position, percent of the container height.
	pub y: f64,
	/// Diameter in pixels.
	pub size: f64,
	/// Resting opacity the twinkle animates from.
	pub base_opacity: f64,
	/// Twinkle period in seconds.
	pub duration: f64,
	/// Seconds before the first twinkle.
	pub delay: f64,
	/// Index into the [`StarPalette`].
	pub color_class: u8,
}

impl ParticleDescriptor {
	/// Inline CSS for this particle. The keyframes read the opacity peak
	/// from `--star-opacity`.
	pub fn inline_style(&self, palette: &StarPalette) -> String {
		let preset = palette.get(self.color_class);
		format!(
			"left: {}%; top: {}%; width: {size}px; height: {size}px; \
			 background: {}; box-shadow: {}; --star-opacity: {}; \
			 animation: starfield-twinkle {}s ease-in-out {}s infinite;",
			fmt_decimal(self.x),
			fmt_decimal(self.y),
			preset.fill.to_css_rgba(),
			preset.box_shadow(),
			fmt_decimal(self.base_opacity),
			fmt_decimal(self.duration),
			fmt_decimal(self.delay),
			size = fmt_decimal(self.size),
		)
	}
}

/// Per-instance knobs that keep two fields of the same size apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
	/// Added to every seed.
	pub seed_offset: f64,
	/// Lower bound of the base opacity; the upper bound is 1.
	pub opacity_min: f64,
}

impl FieldParams {
	/// The full-page star background.
	pub const fn starfield() -> Self {
		Self {
			seed_offset: 0.0,
			opacity_min: 0.4,
		}
	}

	/// The brighter sparkle layer.
	pub const fn sparkles() -> Self {
		Self {
			seed_offset: 500.0,
			opacity_min: 0.6,
		}
	}
}

impl Default for FieldParams {
	fn default() -> Self {
		Self::starfield()
	}
}

/// Generates `count` descriptors. Identical inputs always give identical
/// output.
pub fn generate_field(count: usize, params: &FieldParams) -> Vec<ParticleDescriptor> {
	(0..count)
		.map(|i| {
			let base = i as f64;
			let r = |k: f64| seeded_random(base * k + params.seed_offset);
			ParticleDescriptor {
				id: i,
				x: r(1.0) * 100.0,
				y: r(2.0) * 100.0,
				size: 1.0 + r(3.0) * 3.0,
				base_opacity: params.opacity_min + r(4.0) * (1.0 - params.opacity_min),
				duration: 2.0 + r(5.0) * 5.0,
				delay: r(6.0) * 3.0,
				color_class: (i % 3) as u8,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn hash_stays_in_unit_interval() {
		for seed in 0..2000 {
			let value = seeded_random(seed as f64 * 0.37);
			assert!((0.0..1.0).contains(&value), "seed {seed} gave {value}");
		}
		assert_eq!(seeded_random(0.0), 0.0);
	}

	#[test]
	fn same_count_same_field() {
		let params = FieldParams::starfield();
		assert_eq!(generate_field(64, &params), generate_field(64, &params));
		assert!(generate_field(0, &params).is_empty());
	}

	#[test]
	fn smaller_field_is_a_prefix() {
		let params = FieldParams::sparkles();
		let large = generate_field(30, &params);
		assert_eq!(generate_field(10, &params), large[..10].to_vec());
	}

	#[test]
	fn offsets_separate_fields() {
		let stars = generate_field(10, &FieldParams::starfield());
		let sparkles = generate_field(10, &FieldParams::sparkles());
		assert_ne!(stars[1].x, sparkles[1].x);
	}

	#[test]
	fn color_classes_cycle() {
		let classes: Vec<u8> = generate_field(7, &FieldParams::default())
			.iter()
			.map(|p| p.color_class)
			.collect();
		assert_eq!(classes, vec![0, 1, 2, 0, 1, 2, 0]);
	}

	#[test]
	fn style_carries_timing_and_preset() {
		let particle = ParticleDescriptor {
			id: 2,
			x: 12.5,
			y: 50.0,
			size: 2.0,
			base_opacity: 0.75,
			duration: 4.0,
			delay: 1.5,
			color_class: 2,
		};
		let style = particle.inline_style(&StarPalette::default());
		assert!(style.starts_with("left: 12.5%; top: 50%; width: 2px; height: 2px;"));
		assert!(style.contains("background: rgba(255, 255, 255, 0.9);"));
		assert!(style.contains("box-shadow: 0 0 4px rgba(255, 255, 255, 0.5);"));
		assert!(style.contains("--star-opacity: 0.75;"));
		assert!(style.ends_with("animation: starfield-twinkle 4s ease-in-out 1.5s infinite;"));
	}
}
