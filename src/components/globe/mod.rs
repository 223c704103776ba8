//! Spinning globe visualization component.
//!
//! Renders an orthographic world globe as SVG with:
//! - Country outlines decoded from a quantized TopoJSON topology
//! - Per-country shading and glow driven by a fixed activity table
//! - Auto-spin with tilt recovery, and pointer dragging
//! - Horizon clipping and great-circle resampling of every path
//!
//! # Example
//!
//! ```ignore
//! use globe_field::components::globe::SpinningGlobe;
//!
//! view! { <SpinningGlobe /> }
//! ```

pub mod activity;
mod component;
pub mod graticule;
pub mod loader;
pub mod path;
pub mod projection;
pub mod scene;
pub mod state;
pub mod topology;
pub mod types;

pub use activity::{ActivityTable, CountryStyle};
pub use component::SpinningGlobe;
pub use projection::Orthographic;
pub use scene::{FramePaths, GlobeScene};
pub use state::{DragState, GlobeMotion, MotionParams};
pub use topology::{LoadError, decode_topology};
pub use types::{CountryId, GeoPolygon};
