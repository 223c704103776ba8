//! Page-level settings embedded in the host document.
//!
//! The host page may carry a
//! `<script id="globe-field-config" type="application/json">` element. Every
//! field is optional; anything missing or unreadable falls back to defaults.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

/// Id of the script element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "globe-field-config";

/// Size of one particle field.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct FieldConfig {
	/// Number of particles.
	pub count: usize,
}

/// All externally tunable settings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// The page-wide star field.
	pub starfield: FieldConfig,
	/// The sparse overlay field.
	pub sparkles: FieldConfig,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			starfield: FieldConfig { count: 100 },
			sparkles: FieldConfig { count: 40 },
		}
	}
}

/// Parses a JSON config; missing sections keep their defaults.
pub fn parse_config(json: &str) -> Result<SiteConfig, serde_json::Error> {
	serde_json::from_str(json)
}

fn config_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Reads the config from the DOM, or the defaults if there is none.
pub fn load_config() -> SiteConfig {
	let Some(json_text) = config_text() else {
		return SiteConfig::default();
	};
	match parse_config(&json_text) {
		Ok(config) => {
			info!(
				"globe-field: config loaded ({} stars, {} sparkles)",
				config.starfield.count, config.sparkles.count
			);
			config
		}
		Err(e) => {
			warn!("globe-field: failed to parse config: {}", e);
			SiteConfig::default()
		}
	}
}
