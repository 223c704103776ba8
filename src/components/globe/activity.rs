//! Per-country activity values and the styling derived from them.

use std::collections::HashMap;

use crate::components::theme::{Color, GlobeTheme};

/// Activity at or above this value gets the glow filter.
pub const GLOW_THRESHOLD: u32 = 40;

/// Relative activity per country (higher = more users). Keyed by ISO 3166-1
/// numeric code as it appears in the world-atlas topology.
const COUNTRY_VALUES: [(&str, u32); 50] = [
	("840", 100), // USA
	("616", 90),  // Poland
	("356", 50),  // India
	("124", 45),  // Canada
	("276", 45),  // Germany
	("380", 45),  // Italy
	("826", 40),  // United Kingdom
	("036", 35),  // Australia
	("352", 30),  // Iceland
	("724", 30),  // Spain
	("300", 28),  // Greece
	("528", 28),  // Netherlands
	("578", 28),  // Norway
	("586", 28),  // Pakistan
	("076", 25),  // Brazil
	("152", 25),  // Chile
	("818", 25),  // Egypt
	("360", 25),  // Indonesia
	("484", 25),  // Mexico
	("504", 25),  // Morocco
	("642", 25),  // Romania
	("643", 25),  // Russia
	("710", 25),  // South Africa
	("756", 25),  // Switzerland
	("784", 25),  // UAE
	("040", 20),  // Austria
	("056", 20),  // Belgium
	("100", 20),  // Bulgaria
	("170", 20),  // Colombia
	("208", 20),  // Denmark
	("372", 20),  // Ireland
	("400", 20),  // Jordan
	("414", 20),  // Kuwait
	("434", 20),  // Libya
	("440", 20),  // Lithuania
	("442", 20),  // Luxembourg
	("470", 20),  // Malta
	("478", 20),  // Mauritania
	("554", 20),  // New Zealand
	("566", 20),  // Nigeria
	("600", 20),  // Paraguay
	("608", 20),  // Philippines
	("620", 20),  // Portugal
	("634", 20),  // Qatar
	("682", 20),  // Saudi Arabia
	("792", 20),  // Turkey
	("800", 20),  // Uganda
	("348", 20),  // Hungary
	("368", 20),  // Iraq
	("764", 20),  // Thailand
];

/// Fixed mapping from country id to activity intensity.
#[derive(Clone, Debug)]
pub struct ActivityTable {
	values: HashMap<String, u32>,
}

impl ActivityTable {
	/// A table from `(id, value)` pairs.
	pub fn with_entries<I, K>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, u32)>,
		K: Into<String>,
	{
		Self {
			values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
		}
	}

	/// Zero counts as no activity.
	pub fn get(&self, id: &str) -> Option<u32> {
		self.values.get(id).copied().filter(|&v| v > 0)
	}

	/// Number of entries, including zero-valued ones.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Styling for one country, computed once when the scene is built.
	pub fn style_for(&self, id: &str, theme: &GlobeTheme) -> CountryStyle {
		match self.get(id) {
			Some(value) => {
				let normalized = (value as f64 - 20.0) / 80.0;
				CountryStyle {
					fill: theme.accent.with_alpha(0.15 + normalized * 0.55),
					stroke: theme.accent.with_alpha(0.3 + normalized * 0.5),
					glow: value >= GLOW_THRESHOLD,
				}
			}
			None => CountryStyle {
				fill: theme.fallback_fill,
				stroke: theme.fallback_stroke,
				glow: false,
			},
		}
	}
}

impl Default for ActivityTable {
	fn default() -> Self {
		Self::with_entries(COUNTRY_VALUES)
	}
}

/// Fill, stroke and glow of one country. Never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountryStyle {
	/// Country fill.
	pub fill: Color,
	/// Country outline.
	pub stroke: Color,
	/// Whether the glow filter is applied.
	pub glow: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_table_covers_fifty_countries() {
		let table = ActivityTable::default();
		assert_eq!(table.len(), 50);
		assert_eq!(table.get("840"), Some(100));
		assert_eq!(table.get("036"), Some(35));
		assert_eq!(table.get("999"), None);
	}

	#[test]
	fn busiest_country_is_fully_saturated() {
		let style = ActivityTable::default().style_for("840", &GlobeTheme::default());
		assert_eq!(style.fill.to_css(), "rgba(20, 184, 166, 0.7)");
		assert_eq!(style.stroke.to_css(), "rgba(20, 184, 166, 0.8)");
		assert!(style.glow);
	}

	#[test]
	fn quiet_country_has_no_glow() {
		let style = ActivityTable::default().style_for("764", &GlobeTheme::default());
		assert_eq!(style.fill.to_css(), "rgba(20, 184, 166, 0.15)");
		assert_eq!(style.stroke.to_css(), "rgba(20, 184, 166, 0.3)");
		assert!(!style.glow);
	}

	#[test]
	fn glow_starts_at_threshold() {
		let theme = GlobeTheme::default();
		assert!(ActivityTable::default().style_for("826", &theme).glow);
		assert!(!ActivityTable::default().style_for("036", &theme).glow);
	}

	#[test]
	fn unknown_and_zero_fall_back() {
		let theme = GlobeTheme::default();
		let table = ActivityTable::with_entries([("001", 0)]);
		for id in ["001", "999", ""] {
			let style = table.style_for(id, &theme);
			assert_eq!(style.fill.to_css(), "rgba(255, 255, 255, 0.06)");
			assert_eq!(style.stroke.to_css(), "rgba(255, 255, 255, 0.1)");
			assert!(!style.glow);
		}
	}
}
