//! Fetching the world topology over the network.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::topology::{LoadError, decode_topology};
use super::types::GeoPolygon;

/// Country outlines at 1:110m, quantized TopoJSON.
pub const WORLD_ATLAS_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Name of the geometry collection holding the countries.
pub const COUNTRIES_OBJECT: &str = "countries";

/// Downloads a topology and decodes the named object into country polygons.
pub async fn fetch_countries(url: &str, object: &str) -> Result<Vec<GeoPolygon>, LoadError> {
	let body = fetch_text(url).await?;
	decode_topology(&body, object)
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);

	let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
	let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?
		.dyn_into()
		.map_err(|_| LoadError::Fetch("not a Response".to_string()))?;

	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}

	let text = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	text.as_string()
		.ok_or_else(|| LoadError::Fetch("response body is not text".to_string()))
}

fn js_error(value: JsValue) -> LoadError {
	let message = match value.dyn_ref::<js_sys::Error>() {
		Some(error) => String::from(error.message()),
		None => format!("{value:?}"),
	};
	LoadError::Fetch(message)
}
