//! Geographic data structures consumed by the globe.

/// A longitude/latitude pair in degrees.
pub type LonLat = [f64; 2];

/// A closed ring of positions. The last position repeats the first.
pub type Ring = Vec<LonLat>;

/// One polygon: an exterior ring followed by its holes.
///
/// Exterior rings wind clockwise on the sphere and holes anticlockwise, as
/// seen from outside the globe.
pub type Polygon = Vec<Ring>;

/// An open polyline, used for graticule lines.
pub type LineString = Vec<LonLat>;

/// Numeric country identifier as it appears in the topology (e.g. `"840"`).
pub type CountryId = String;

/// One country's boundary geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoPolygon {
	/// Topology id.
	pub id: CountryId,
	/// Polygons in `[lon, lat]` degrees; first ring exterior, rest holes.
	pub polygons: Vec<Polygon>,
}

impl GeoPolygon {
	/// A country from its id and polygons.
	pub fn new(id: impl Into<CountryId>, polygons: Vec<Polygon>) -> Self {
		Self {
			id: id.into(),
			polygons,
		}
	}
}
