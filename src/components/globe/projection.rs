//! Orthographic projection of the unit sphere onto the globe's drawing surface.
//!
//! Points are first rotated into view space, a right-handed frame whose x axis
//! points at the viewer. A point is visible when its view-space x is positive
//! (a 90° clip angle around the view centre). The projection then drops x and
//! maps y to screen-right and z to screen-up.
//!
//! Rotation follows the usual `[λ, φ, γ]` convention: λ is added to every
//! longitude, then the sphere is tilted by φ about the y axis and rolled by γ
//! about the x axis.

use super::types::LonLat;

/// A vector in view space.
pub type Vec3 = [f64; 3];

/// Angular radius of the visible cap, in degrees.
pub const CLIP_ANGLE: f64 = 90.0;

/// View-space depth below which a point counts as behind the horizon.
const HORIZON_EPSILON: f64 = 1e-12;

/// Orthographic projection with rotation, scale and translation.
#[derive(Clone, Debug, PartialEq)]
pub struct Orthographic {
	scale: f64,
	translate: [f64; 2],
	precision: f64,
	rotation: [f64; 3],
	delta_lambda: f64,
	cos_phi: f64,
	sin_phi: f64,
	cos_gamma: f64,
	sin_gamma: f64,
}

impl Orthographic {
	/// Creates an unrotated projection with a sphere radius of `scale` pixels
	/// centred on `translate`.
	pub fn new(scale: f64, translate: [f64; 2]) -> Self {
		let mut projection = Self {
			scale,
			translate,
			precision: 0.1,
			rotation: [0.0; 3],
			delta_lambda: 0.0,
			cos_phi: 1.0,
			sin_phi: 0.0,
			cos_gamma: 1.0,
			sin_gamma: 0.0,
		};
		projection.set_rotation([0.0; 3]);
		projection
	}

	/// Sets the adaptive resampling threshold in pixels.
	pub fn with_precision(mut self, precision: f64) -> Self {
		self.precision = precision.max(0.0);
		self
	}

	/// Builder form of [`Orthographic::set_rotation`].
	pub fn with_rotation(mut self, angles: [f64; 3]) -> Self {
		self.set_rotation(angles);
		self
	}

	/// Sets `[λ, φ, γ]` in degrees.
	pub fn set_rotation(&mut self, angles: [f64; 3]) {
		let [lambda, phi, gamma] = angles;
		self.rotation = angles;
		self.delta_lambda = lambda.to_radians();
		(self.sin_phi, self.cos_phi) = phi.to_radians().sin_cos();
		(self.sin_gamma, self.cos_gamma) = gamma.to_radians().sin_cos();
	}

	/// Current `[λ, φ, γ]` in degrees.
	pub fn rotation(&self) -> [f64; 3] {
		self.rotation
	}

	/// Sphere radius in pixels.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Pixel position of the projection centre.
	pub fn translate(&self) -> [f64; 2] {
		self.translate
	}

	/// Resampling threshold in pixels.
	pub fn precision(&self) -> f64 {
		self.precision
	}

	/// Rotates a longitude/latitude pair (degrees) into a view-space unit vector.
	pub fn rotate(&self, [lon, lat]: LonLat) -> Vec3 {
		let lambda = lon.to_radians() + self.delta_lambda;
		let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
		let (sin_lambda, cos_lambda) = lambda.sin_cos();
		let (x, y, z) = (cos_lambda * cos_lat, sin_lambda * cos_lat, sin_lat);

		let k = z * self.cos_phi + x * self.sin_phi;
		[
			x * self.cos_phi - z * self.sin_phi,
			y * self.cos_gamma - k * self.sin_gamma,
			k * self.cos_gamma + y * self.sin_gamma,
		]
	}

	/// Maps a view-space vector to screen coordinates, ignoring visibility.
	pub fn to_screen(&self, v: Vec3) -> [f64; 2] {
		[
			self.translate[0] + self.scale * v[1],
			self.translate[1] - self.scale * v[2],
		]
	}

	/// Projects a longitude/latitude pair, or `None` if it is on the far side.
	pub fn project(&self, position: LonLat) -> Option<[f64; 2]> {
		let v = self.rotate(position);
		is_visible(v).then(|| self.to_screen(v))
	}

	/// Angle of a screen point around the sphere centre, increasing clockwise
	/// on screen (y grows downwards).
	pub fn screen_angle(&self, v: Vec3) -> f64 {
		(-v[2]).atan2(v[1])
	}
}

impl Default for Orthographic {
	/// The 500×500 globe surface with a 200px sphere.
	fn default() -> Self {
		Self::new(200.0, [250.0, 250.0])
	}
}

/// Whether a rotated point lies on the near hemisphere.
pub fn is_visible(v: Vec3) -> bool {
	v[0] > HORIZON_EPSILON
}

/// Where the great-circle arc between `a` and `b` meets the horizon. Only
/// meaningful when exactly one of them is visible.
pub fn horizon_crossing(a: Vec3, b: Vec3) -> Vec3 {
	let (wa, wb) = (b[0].abs(), a[0].abs());
	normalize([
		a[0] * wa + b[0] * wb,
		a[1] * wa + b[1] * wb,
		a[2] * wa + b[2] * wb,
	])
	.unwrap_or(a)
}

/// Midpoint of the shorter great-circle arc between two unit vectors.
pub fn arc_midpoint(a: Vec3, b: Vec3) -> Option<Vec3> {
	normalize([a[0] + b[0], a[1] + b[1], a[2] + b[2]])
}

fn normalize(v: Vec3) -> Option<Vec3> {
	let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
	(length > 1e-12).then(|| [v[0] / length, v[1] / length, v[2] / length])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_close(a: f64, b: f64, eps: f64) {
		let diff = (a - b).abs();
		assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
	}

	#[test]
	fn centre_and_pole_without_rotation() {
		let projection = Orthographic::default();
		let [x, y] = projection.project([0.0, 0.0]).unwrap();
		assert_close(x, 250.0, 1e-9);
		assert_close(y, 250.0, 1e-9);

		let [x, y] = projection.project([0.0, 89.999]).unwrap();
		assert_close(x, 250.0, 1e-6);
		assert_close(y, 50.0, 1e-3);

		let [x, _] = projection.project([30.0, 0.0]).unwrap();
		assert_close(x, 250.0 + 200.0 * 0.5, 1e-9);
	}

	#[test]
	fn far_hemisphere_is_clipped() {
		let projection = Orthographic::default();
		assert!(projection.project([180.0, 0.0]).is_none());
		assert!(projection.project([90.0, 0.0]).is_none());
		assert!(projection.project([-120.0, 10.0]).is_none());
	}

	#[test]
	fn rotation_recentres_the_view() {
		let projection = Orthographic::default().with_rotation([-40.0, -25.0, 0.0]);
		let [x, y] = projection.project([40.0, 25.0]).unwrap();
		assert_close(x, 250.0, 1e-9);
		assert_close(y, 250.0, 1e-9);

		// Tilting by -25° brings the north pole into view above the centre.
		let [x, y] = projection.project([0.0, 90.0]).unwrap();
		assert_close(x, 250.0, 1e-9);
		assert_close(y, 250.0 - 200.0 * 25f64.to_radians().cos(), 1e-9);
	}

	#[test]
	fn crossing_lies_on_horizon_between_endpoints() {
		let projection = Orthographic::default();
		let a = projection.rotate([80.0, 10.0]);
		let b = projection.rotate([100.0, 10.0]);
		let h = horizon_crossing(a, b);
		assert_close(h[0], 0.0, 1e-12);
		assert_close(h[1] * h[1] + h[2] * h[2], 1.0, 1e-12);
		assert!(h[1] > 0.0 && h[2] > 0.0);
		assert_eq!(horizon_crossing(b, a), h);
	}

	#[test]
	fn screen_angle_turns_clockwise() {
		let projection = Orthographic::default();
		let right = projection.screen_angle([0.0, 1.0, 0.0]);
		let bottom = projection.screen_angle([0.0, 0.0, -1.0]);
		assert_close(right, 0.0, 1e-12);
		assert_close(bottom, std::f64::consts::FRAC_PI_2, 1e-12);
	}
}
