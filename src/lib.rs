//! globe-field: a spinning activity globe over a twinkling particle field.
//!
//! This crate provides WASM-based Leptos components: an orthographic SVG globe
//! with per-country activity shading and drag-to-rotate, and deterministic
//! CSS-animated star fields.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;

pub use components::globe::SpinningGlobe;
pub use components::starfield::{FieldParams, StarfieldBackground};
pub use config::SiteConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("globe-field: logging initialized");
}

/// Main application component.
/// Reads the page config from the DOM and layers the globe over the fields.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = config::load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="globe-field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="globe-field" style="position: relative; min-height: 100vh; overflow: hidden;">
			<StarfieldBackground count=config.starfield.count />
			<StarfieldBackground
				count=config.sparkles.count
				params=FieldParams::sparkles()
				orbs=false
			/>
			<div
				class="globe-container"
				style="position: relative; z-index: 1; width: min(500px, 90vw); aspect-ratio: 1; margin: 0 auto;"
			>
				<SpinningGlobe />
			</div>
		</div>
	}
}
