//! End-to-end behaviour of the globe's pure layers: motion, decoding and the
//! scene built on top of them.

use globe_field::components::globe::scene::Chrome;
use globe_field::components::globe::{
	ActivityTable, GlobeMotion, GlobeScene, LoadError, decode_topology,
};
use globe_field::components::theme::GlobeTheme;
use pretty_assertions::assert_eq;

const TWO_COUNTRIES: &str = r#"{
	"type": "Topology",
	"transform": { "scale": [0.1, 0.1], "translate": [-20, -10] },
	"objects": {
		"countries": {
			"type": "GeometryCollection",
			"geometries": [
				{ "type": "Polygon", "arcs": [[0]], "id": "840" },
				{ "type": "Polygon", "arcs": [[1]], "id": "999" }
			]
		}
	},
	"arcs": [
		[[0, 200], [100, 0], [0, -100], [-100, 0], [0, 100]],
		[[250, 200], [100, 0], [0, -100], [-100, 0], [0, 100]]
	]
}"#;

#[test]
fn drag_clamps_tilt() {
	let mut motion = GlobeMotion::default();
	motion.pointer_down(0.0, 0.0);
	motion.pointer_move(0.0, 100_000.0);
	assert_eq!(motion.rotation.phi, -60.0);
	motion.pointer_move(0.0, -300_000.0);
	assert_eq!(motion.rotation.phi, 60.0);

	let mut y = -300_000.0;
	for step in 0..200 {
		y += if step % 3 == 0 { 917.0 } else { -411.0 };
		motion.pointer_move(step as f64, y);
		assert!((-60.0..=60.0).contains(&motion.rotation.phi));
	}
}

#[test]
fn idle_spin_recovers_tilt_monotonically() {
	let mut motion = GlobeMotion::default();
	motion.rotation.phi = 40.0;
	let steps = 2000;
	let mut previous = motion.rotation.phi;
	for _ in 0..steps {
		motion.tick();
		assert!(motion.rotation.phi <= previous);
		assert!(motion.rotation.phi >= -25.0 - 1e-9);
		previous = motion.rotation.phi;
	}
	// Relaxation stops once within `MotionParams::settle_threshold` (0.1°) of
	// the default tilt, so φ parks near -24.9 rather than at -25.
	assert!((motion.rotation.phi + 25.0).abs() <= 0.1 + 1e-9);
	assert!((motion.rotation.lambda - steps as f64 * 0.4).abs() < 1e-6);
}

#[test]
fn drag_suspends_auto_spin() {
	let mut motion = GlobeMotion::default();
	let start = motion.rotation;
	motion.pointer_down(200.0, 200.0);
	for _ in 0..10 {
		motion.tick();
	}
	assert_eq!(motion.rotation, start);

	let (dx, dy) = (37.0, -12.0);
	motion.pointer_move(200.0 + dx, 200.0 + dy);
	motion.tick();
	assert_eq!(motion.rotation.lambda, start.lambda + dx * 0.3);
	assert_eq!(motion.rotation.phi, start.phi - dy * 0.3);

	motion.pointer_up();
	motion.tick();
	assert!(motion.rotation.lambda > start.lambda + dx * 0.3);
}

#[test]
fn failed_fetch_keeps_chrome_without_countries() {
	let theme = GlobeTheme::default();
	let activity = ActivityTable::default();
	for failure in [
		Err(LoadError::Fetch("network down".to_string())),
		Err(LoadError::Status(404)),
		decode_topology("<html>", "countries"),
		decode_topology(TWO_COUNTRIES, "land"),
	] {
		let scene = GlobeScene::from_load_result(failure, &activity, &theme);
		assert_eq!(scene.chrome, Chrome::new(&theme));
		assert!(scene.countries().is_empty());
		let frame = scene.update(&GlobeScene::projection([0.0, -25.0, 0.0]));
		assert!(frame.countries.is_empty());
		assert!(!frame.graticule.is_empty());
	}
}

#[test]
fn activity_drives_country_styles() {
	let theme = GlobeTheme::default();
	let result = decode_topology(TWO_COUNTRIES, "countries");
	let scene = GlobeScene::from_load_result(result, &ActivityTable::default(), &theme);

	let countries = scene.countries();
	assert_eq!(countries.len(), 2);
	assert_eq!(countries[0].id, "840");
	assert_eq!(countries[0].fill(), "rgba(20, 184, 166, 0.7)");
	assert!(countries[0].style.glow);
	assert_eq!(countries[1].id, "999");
	assert_eq!(countries[1].fill(), "rgba(255, 255, 255, 0.06)");
	assert!(!countries[1].style.glow);

	let frame = scene.update(&GlobeScene::projection([0.0, -25.0, 0.0]));
	assert_eq!(frame.countries.len(), 2);
	assert!(frame.countries.iter().all(|d| d.starts_with('M') && d.ends_with('Z')));
}
