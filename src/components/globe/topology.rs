//! Decoding of TopoJSON country boundaries into [`GeoPolygon`]s.
//!
//! The topology shares arcs between neighbouring countries and usually stores
//! them quantized and delta-encoded. Only polygonal geometries are kept;
//! points and lines have no place on the globe.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::types::{GeoPolygon, LonLat, Polygon, Ring};

/// Why the country geometry could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// The request never produced a response.
	#[error("fetch failed: {0}")]
	Fetch(String),
	/// The server answered with a non-success status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),
	/// The body was not a valid topology document.
	#[error("invalid topology: {0}")]
	Decode(#[from] serde_json::Error),
	/// The topology has no object with the requested name.
	#[error("topology has no object named {0:?}")]
	MissingObject(String),
	/// A geometry references an arc that does not exist.
	#[error("arc reference {0} is out of range")]
	BadArc(i64),
	/// An arc contains a position with fewer than two coordinates.
	#[error("arc {0} has a malformed position")]
	MalformedArc(usize),
}

#[derive(Debug, Deserialize)]
struct Topology {
	#[serde(default)]
	transform: Option<Transform>,
	objects: HashMap<String, Value>,
	arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
struct Transform {
	scale: [f64; 2],
	translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
	Text(String),
	Number(serde_json::Number),
}

impl IdValue {
	fn into_id(self) -> String {
		match self {
			IdValue::Text(s) => s,
			IdValue::Number(n) => n.to_string(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
	#[serde(default)]
	id: Option<IdValue>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureMeta {
	#[serde(default)]
	id: Option<IdValue>,
	#[serde(default)]
	properties: Option<Properties>,
}

impl FeatureMeta {
	/// The geometry's own id wins over `properties.id`.
	fn into_id(self) -> String {
		self.id
			.or_else(|| self.properties.and_then(|p| p.id))
			.map(IdValue::into_id)
			.unwrap_or_default()
	}
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
	GeometryCollection {
		geometries: Vec<Value>,
	},
	Polygon {
		arcs: Vec<Vec<i64>>,
		#[serde(flatten)]
		meta: FeatureMeta,
	},
	MultiPolygon {
		arcs: Vec<Vec<Vec<i64>>>,
		#[serde(flatten)]
		meta: FeatureMeta,
	},
	#[serde(other)]
	Unsupported,
}

/// Decodes the named object of a TopoJSON document into country polygons.
pub fn decode_topology(json: &str, object: &str) -> Result<Vec<GeoPolygon>, LoadError> {
	let topology: Topology = serde_json::from_str(json)?;
	let arcs = decode_arcs(&topology.arcs, topology.transform.as_ref())?;
	let root = topology
		.objects
		.get(object)
		.ok_or_else(|| LoadError::MissingObject(object.to_string()))?;

	let mut countries = Vec::new();
	collect_geometry(root, &arcs, &mut countries)?;
	debug!(
		"globe-field: decoded {} countries from {} arcs",
		countries.len(),
		arcs.len()
	);
	Ok(countries)
}

/// Resolves quantized, delta-encoded arcs into absolute positions.
fn decode_arcs(
	raw: &[Vec<Vec<f64>>],
	transform: Option<&Transform>,
) -> Result<Vec<Vec<LonLat>>, LoadError> {
	let mut arcs = Vec::with_capacity(raw.len());
	for (i, arc) in raw.iter().enumerate() {
		let (mut x, mut y) = (0.0, 0.0);
		let mut points = Vec::with_capacity(arc.len());
		for position in arc {
			let [px, py] = match position.as_slice() {
				[px, py, ..] => [*px, *py],
				_ => return Err(LoadError::MalformedArc(i)),
			};
			points.push(match transform {
				Some(t) => {
					x += px;
					y += py;
					[
						x * t.scale[0] + t.translate[0],
						y * t.scale[1] + t.translate[1],
					]
				}
				None => [px, py],
			});
		}
		arcs.push(points);
	}
	Ok(arcs)
}

fn collect_geometry(
	value: &Value,
	arcs: &[Vec<LonLat>],
	out: &mut Vec<GeoPolygon>,
) -> Result<(), LoadError> {
	let geometry = match TopoGeometry::deserialize(value) {
		Ok(geometry) => geometry,
		Err(e) => {
			debug!("globe-field: skipping geometry without a usable type: {}", e);
			return Ok(());
		}
	};

	match geometry {
		TopoGeometry::GeometryCollection { geometries } => {
			for child in &geometries {
				collect_geometry(child, arcs, out)?;
			}
		}
		TopoGeometry::Polygon { arcs: rings, meta } => {
			out.push(GeoPolygon::new(meta.into_id(), vec![polygon(&rings, arcs)?]));
		}
		TopoGeometry::MultiPolygon {
			arcs: polygons,
			meta,
		} => {
			let polygons = polygons
				.iter()
				.map(|rings| polygon(rings, arcs))
				.collect::<Result<Vec<_>, _>>()?;
			out.push(GeoPolygon::new(meta.into_id(), polygons));
		}
		TopoGeometry::Unsupported => {}
	}
	Ok(())
}

fn polygon(rings: &[Vec<i64>], arcs: &[Vec<LonLat>]) -> Result<Polygon, LoadError> {
	rings.iter().map(|refs| ring(refs, arcs)).collect()
}

/// Stitches arc references into one ring. A negative reference `r` walks arc
/// `!r` backwards; consecutive arcs share their joining position.
fn ring(refs: &[i64], arcs: &[Vec<LonLat>]) -> Result<Ring, LoadError> {
	let mut points: Ring = Vec::new();
	for &reference in refs {
		let (index, reversed) = if reference < 0 {
			(!reference, true)
		} else {
			(reference, false)
		};
		let arc = usize::try_from(index)
			.ok()
			.and_then(|i| arcs.get(i))
			.ok_or(LoadError::BadArc(reference))?;

		points.pop();
		if reversed {
			points.extend(arc.iter().rev());
		} else {
			points.extend(arc.iter());
		}
	}

	if let Some(&first) = points.first() {
		while points.len() < 4 {
			points.push(first);
		}
	}
	Ok(points)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const SQUARE: &str = r#"{
		"type": "Topology",
		"transform": { "scale": [1, 1], "translate": [0, 0] },
		"objects": {
			"countries": {
				"type": "GeometryCollection",
				"geometries": [
					{ "type": "Polygon", "arcs": [[0, 1]], "id": "840", "properties": { "name": "A" } },
					{ "type": "Polygon", "arcs": [[-2, -1]], "id": 36 },
					{ "type": "MultiPolygon", "arcs": [[[0, 1]], [[2]]], "properties": { "id": "250" } },
					{ "type": null, "id": "010" },
					{ "type": "Point", "coordinates": [0, 0] }
				]
			}
		},
		"arcs": [
			[[0, 0], [10, 0], [0, 10]],
			[[10, 10], [-10, 0], [0, -10]],
			[[20, 20], [1, 1]]
		]
	}"#;

	#[test]
	fn stitches_shared_arcs() {
		let countries = decode_topology(SQUARE, "countries").unwrap();
		assert_eq!(countries.len(), 3);
		assert_eq!(countries[0].id, "840");
		assert_eq!(
			countries[0].polygons,
			vec![vec![vec![
				[0.0, 0.0],
				[10.0, 0.0],
				[10.0, 10.0],
				[0.0, 10.0],
				[0.0, 0.0],
			]]]
		);
	}

	#[test]
	fn negative_references_reverse_arcs() {
		let countries = decode_topology(SQUARE, "countries").unwrap();
		assert_eq!(countries[1].id, "36");
		assert_eq!(
			countries[1].polygons[0][0],
			vec![
				[0.0, 0.0],
				[0.0, 10.0],
				[10.0, 10.0],
				[10.0, 0.0],
				[0.0, 0.0],
			]
		);
	}

	#[test]
	fn short_rings_are_padded() {
		let countries = decode_topology(SQUARE, "countries").unwrap();
		let multi = &countries[2];
		assert_eq!(multi.id, "250");
		assert_eq!(multi.polygons.len(), 2);
		assert_eq!(
			multi.polygons[1][0],
			vec![[20.0, 20.0], [21.0, 21.0], [20.0, 20.0], [20.0, 20.0]]
		);
	}

	#[test]
	fn untransformed_arcs_are_absolute() {
		let json = r#"{
			"type": "Topology",
			"objects": { "land": { "type": "Polygon", "arcs": [[0]] } },
			"arcs": [[[1.5, 2.5], [3.5, 4.5], [1.5, 2.5]]]
		}"#;
		let countries = decode_topology(json, "land").unwrap();
		assert_eq!(countries[0].id, "");
		assert_eq!(
			countries[0].polygons[0][0],
			vec![[1.5, 2.5], [3.5, 4.5], [1.5, 2.5], [1.5, 2.5]]
		);
	}

	#[test]
	fn missing_object_is_reported() {
		let err = decode_topology(SQUARE, "land").unwrap_err();
		assert!(matches!(err, LoadError::MissingObject(name) if name == "land"));
	}

	#[test]
	fn out_of_range_arc_is_reported() {
		let json = r#"{
			"type": "Topology",
			"objects": { "countries": { "type": "Polygon", "arcs": [[-4]] } },
			"arcs": [[[0, 0], [1, 1]]]
		}"#;
		let err = decode_topology(json, "countries").unwrap_err();
		assert!(matches!(err, LoadError::BadArc(-4)));
	}

	#[test]
	fn garbage_is_a_decode_error() {
		let err = decode_topology("<html>503</html>", "countries").unwrap_err();
		assert!(matches!(err, LoadError::Decode(_)));
	}
}
