//! Two-tier scene for the globe.
//!
//! The static tier (ocean sphere, gradient and glow definitions, atmosphere
//! ring, per-country styling) is described once when the scene is built. The
//! dynamic tier is only path geometry: [`GlobeScene::update`] reprojects the
//! graticule and every country and returns their path strings, which the
//! component assigns to nodes that already exist.

use log::{error, info};

use super::activity::{ActivityTable, CountryStyle};
use super::graticule::Graticule;
use super::path::{geo_path, line_path};
use super::projection::Orthographic;
use super::topology::LoadError;
use super::types::{CountryId, GeoPolygon, LineString};
use crate::components::theme::GlobeTheme;

/// Logical size of the drawing surface.
pub const SURFACE_SIZE: f64 = 500.0;
/// Sphere radius in surface units.
pub const GLOBE_SCALE: f64 = 200.0;
/// Grid spacing of the graticule overlay, in degrees.
pub const GRATICULE_STEP: [f64; 2] = [20.0, 20.0];

/// Base id of the ocean gradient; instances append their own suffix.
pub const GRADIENT_ID: &str = "globe-gradient";
/// Base id of the country glow filter; instances append their own suffix.
pub const GLOW_FILTER_ID: &str = "glow";

/// Static visual elements that never change after mount.
#[derive(Clone, Debug, PartialEq)]
pub struct Chrome {
	/// SVG `viewBox` of the drawing surface.
	pub view_box: String,
	/// Centre of the sphere in surface units.
	pub center: [f64; 2],
	/// Radius of the ocean sphere.
	pub radius: f64,
	/// Radius of the atmosphere ring, just outside the sphere.
	pub ring_radius: f64,
	/// Ring stroke color.
	pub ring_stroke: String,
	/// Ring stroke width.
	pub ring_width: f64,
	/// Document id of the ocean gradient.
	pub gradient_id: String,
	/// Gradient `cx`/`cy`.
	pub gradient_focus: (String, String),
	/// Gradient `(offset, stop-color)` pairs, inner first.
	pub gradient_stops: [(String, String); 2],
	/// Document id of the glow filter.
	pub glow_filter_id: String,
	/// Glow filter `stdDeviation`.
	pub glow_blur: f64,
	/// Glow filter region as `x`, `y`, `width`, `height`. The region is
	/// widened so the blur is not clipped at the country's bounding box.
	pub glow_region: [String; 4],
	/// Graticule stroke color.
	pub graticule_stroke: String,
	/// Graticule stroke width.
	pub graticule_width: f64,
	/// Stroke width shared by all country outlines.
	pub country_stroke_width: f64,
}

impl Chrome {
	/// Chrome for the fixed surface, styled by `theme`.
	pub fn new(theme: &GlobeTheme) -> Self {
		let center = SURFACE_SIZE / 2.0;
		let margin = theme.glow_margin;
		Self {
			view_box: format!("0 0 {SURFACE_SIZE} {SURFACE_SIZE}"),
			center: [center, center],
			radius: GLOBE_SCALE,
			ring_radius: GLOBE_SCALE + 1.0,
			ring_stroke: theme.ring_stroke.to_css(),
			ring_width: theme.ring_width,
			gradient_id: GRADIENT_ID.to_string(),
			gradient_focus: (
				format!("{}%", theme.ocean_focus.0),
				format!("{}%", theme.ocean_focus.1),
			),
			gradient_stops: [
				("0%".to_string(), theme.ocean_inner.to_css()),
				("100%".to_string(), theme.ocean_outer.to_css()),
			],
			glow_filter_id: GLOW_FILTER_ID.to_string(),
			glow_blur: theme.glow_blur,
			glow_region: [
				format!("{}%", -margin),
				format!("{}%", -margin),
				format!("{}%", 100.0 + 2.0 * margin),
				format!("{}%", 100.0 + 2.0 * margin),
			],
			graticule_stroke: theme.graticule_stroke.to_css(),
			graticule_width: theme.graticule_width,
			country_stroke_width: theme.country_stroke_width,
		}
	}

	/// Suffixes the definition ids with `instance` so several globes can
	/// share a document without their `url(#...)` references colliding.
	pub fn scoped(mut self, instance: usize) -> Self {
		self.gradient_id = format!("{GRADIENT_ID}-{instance}");
		self.glow_filter_id = format!("{GLOW_FILTER_ID}-{instance}");
		self
	}

	/// `fill` value referencing the ocean gradient.
	pub fn gradient_fill(&self) -> String {
		format!("url(#{})", self.gradient_id)
	}

	/// `filter` value referencing the glow filter.
	pub fn glow_filter(&self) -> String {
		format!("url(#{})", self.glow_filter_id)
	}
}

/// A country's fixed identity and styling plus its geometry.
#[derive(Clone, Debug)]
pub struct CountryNode {
	/// Topology id, e.g. `"840"`.
	pub id: CountryId,
	/// Styling fixed when the scene is built.
	pub style: CountryStyle,
	geometry: GeoPolygon,
}

impl CountryNode {
	/// CSS fill.
	pub fn fill(&self) -> String {
		self.style.fill.to_css()
	}

	/// CSS stroke.
	pub fn stroke(&self) -> String {
		self.style.stroke.to_css()
	}
}

/// Path data for one frame, in the scene's country order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePaths {
	/// `d` of the graticule path.
	pub graticule: String,
	/// `d` of each country, empty when it is entirely behind the horizon.
	pub countries: Vec<String>,
}

/// Everything needed to draw the globe.
#[derive(Clone, Debug)]
pub struct GlobeScene {
	/// Static tier.
	pub chrome: Chrome,
	countries: Vec<CountryNode>,
	graticule: Vec<LineString>,
}

impl GlobeScene {
	/// Styles every country from `activity` and prepares the graticule.
	pub fn new(polygons: Vec<GeoPolygon>, activity: &ActivityTable, theme: &GlobeTheme) -> Self {
		let countries = polygons
			.into_iter()
			.map(|geometry| CountryNode {
				id: geometry.id.clone(),
				style: activity.style_for(&geometry.id, theme),
				geometry,
			})
			.collect();
		Self {
			chrome: Chrome::new(theme),
			countries,
			graticule: Graticule::new(GRATICULE_STEP).lines(),
		}
	}

	/// Builds the scene from the outcome of the topology load. A failure is
	/// logged and leaves the globe with chrome only.
	pub fn from_load_result(
		result: Result<Vec<GeoPolygon>, LoadError>,
		activity: &ActivityTable,
		theme: &GlobeTheme,
	) -> Self {
		let polygons = match result {
			Ok(polygons) => {
				info!("globe-field: loaded {} countries", polygons.len());
				polygons
			}
			Err(e) => {
				error!("globe-field: failed to load world data: {}", e);
				Vec::new()
			}
		};
		Self::new(polygons, activity, theme)
	}

	/// A scene with no countries, shown until the topology arrives.
	pub fn empty(theme: &GlobeTheme) -> Self {
		Self::new(Vec::new(), &ActivityTable::default(), theme)
	}

	/// The projection matching the chrome's surface, rotated to `angles`.
	pub fn projection(angles: [f64; 3]) -> Orthographic {
		let center = SURFACE_SIZE / 2.0;
		Orthographic::new(GLOBE_SCALE, [center, center]).with_rotation(angles)
	}

	/// Countries in topology order.
	pub fn countries(&self) -> &[CountryNode] {
		&self.countries
	}

	/// Reprojects the dynamic tier. Styling is not touched.
	pub fn update(&self, projection: &Orthographic) -> FramePaths {
		FramePaths {
			graticule: line_path(projection, &self.graticule),
			countries: self
				.countries
				.iter()
				.map(|country| geo_path(projection, &country.geometry))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn patch(id: &str, lon: f64, lat: f64) -> GeoPolygon {
		GeoPolygon::new(
			id,
			vec![vec![vec![
				[lon - 5.0, lat + 5.0],
				[lon + 5.0, lat + 5.0],
				[lon + 5.0, lat - 5.0],
				[lon - 5.0, lat - 5.0],
				[lon - 5.0, lat + 5.0],
			]]],
		)
	}

	#[test]
	fn chrome_matches_the_surface() {
		let chrome = Chrome::new(&GlobeTheme::default());
		assert_eq!(chrome.view_box, "0 0 500 500");
		assert_eq!(chrome.center, [250.0, 250.0]);
		assert_eq!(chrome.radius, 200.0);
		assert_eq!(chrome.ring_radius, 201.0);
		assert_eq!(chrome.ring_stroke, "rgba(20, 184, 166, 0.1)");
		assert_eq!(chrome.gradient_stops[0].1, "#0d1117");
		assert_eq!(chrome.gradient_fill(), "url(#globe-gradient)");
		assert_eq!(chrome.glow_blur, 2.0);
		assert_eq!(chrome.glow_region, ["-50%", "-50%", "200%", "200%"]);
	}

	#[test]
	fn scoped_chrome_references_its_own_definitions() {
		let theme = GlobeTheme::default();
		let first = Chrome::new(&theme).scoped(0);
		let second = Chrome::new(&theme).scoped(1);
		assert_eq!(first.gradient_id, "globe-gradient-0");
		assert_eq!(first.gradient_fill(), "url(#globe-gradient-0)");
		assert_eq!(second.glow_filter_id, "glow-1");
		assert_eq!(second.glow_filter(), "url(#glow-1)");
		assert_ne!(first.gradient_id, second.gradient_id);
		assert_ne!(first.glow_filter(), second.glow_filter());
	}

	#[test]
	fn update_keeps_country_order() {
		let theme = GlobeTheme::default();
		let scene = GlobeScene::new(
			vec![patch("840", 0.0, 0.0), patch("999", 180.0, 0.0)],
			&ActivityTable::default(),
			&theme,
		);
		let frame = scene.update(&GlobeScene::projection([0.0, 0.0, 0.0]));
		assert_eq!(frame.countries.len(), 2);
		assert!(frame.countries[0].starts_with('M'));
		assert_eq!(frame.countries[1], "");
		assert!(!frame.graticule.is_empty());
	}

	#[test]
	fn rotation_changes_geometry_not_style() {
		let theme = GlobeTheme::default();
		let scene = GlobeScene::new(vec![patch("840", 0.0, 0.0)], &ActivityTable::default(), &theme);
		let style = scene.countries()[0].style;
		let a = scene.update(&GlobeScene::projection([0.0, -25.0, 0.0]));
		let b = scene.update(&GlobeScene::projection([10.0, -25.0, 0.0]));
		assert_ne!(a, b);
		assert_eq!(scene.countries()[0].style, style);
	}

	#[test]
	fn failed_load_keeps_chrome() {
		let theme = GlobeTheme::default();
		let scene = GlobeScene::from_load_result(
			Err(LoadError::Status(503)),
			&ActivityTable::default(),
			&theme,
		);
		assert!(scene.countries().is_empty());
		assert_eq!(scene.chrome, Chrome::new(&theme));
		let frame = scene.update(&GlobeScene::projection([0.0, -25.0, 0.0]));
		assert!(frame.countries.is_empty());
		assert!(frame.graticule.starts_with('M'));
	}
}
