//! Latitude/longitude grid overlay.

use super::types::LineString;

const EPSILON: f64 = 1e-6;

/// A meridian/parallel grid laid out the way d3's `geoGraticule` does it:
/// major meridians every 90° reach almost to the poles, minor lines stop at
/// ±80° and skip positions already covered by a major line.
#[derive(Clone, Debug)]
pub struct Graticule {
	step_minor: [f64; 2],
	step_major: [f64; 2],
	extent_minor: [[f64; 2]; 2],
	extent_major: [[f64; 2]; 2],
	/// Longitude spacing of samples along parallels, in degrees.
	precision: f64,
}

impl Graticule {
	/// Minor lines every `step` degrees of longitude and latitude.
	pub fn new(step: [f64; 2]) -> Self {
		Self {
			step_minor: step,
			step_major: [90.0, 360.0],
			extent_minor: [[-180.0, -80.0 - EPSILON], [180.0, 80.0 + EPSILON]],
			extent_major: [[-180.0, -90.0 + EPSILON], [180.0, 90.0 - EPSILON]],
			precision: 2.5,
		}
	}

	/// Every grid line, major lines first, sampled densely enough to curve.
	pub fn lines(&self) -> Vec<LineString> {
		let [[x0, y0], [x1, y1]] = self.extent_minor;
		let [[mx0, my0], [mx1, my1]] = self.extent_major;
		let [dx, dy] = self.step_minor;
		let [mdx, mdy] = self.step_major;

		let mut lines = Vec::new();
		for x in range((mx0 / mdx).ceil() * mdx, mx1, mdx) {
			lines.push(self.meridian(x, my0, my1));
		}
		for y in range((my0 / mdy).ceil() * mdy, my1, mdy) {
			lines.push(self.parallel(y, mx0, mx1));
		}
		for x in range((x0 / dx).ceil() * dx, x1, dx) {
			if (x % mdx).abs() > EPSILON {
				lines.push(self.meridian(x, y0, y1));
			}
		}
		for y in range((y0 / dy).ceil() * dy, y1, dy) {
			if (y % mdy).abs() > EPSILON {
				lines.push(self.parallel(y, x0, x1));
			}
		}
		lines
	}

	/// Meridians are great circles, so sparse samples suffice; the path
	/// resampler fills in the curve.
	fn meridian(&self, x: f64, y0: f64, y1: f64) -> LineString {
		let mut ys = range(y0, y1 - EPSILON, 90.0);
		ys.push(y1);
		ys.into_iter().map(|y| [x, y]).collect()
	}

	fn parallel(&self, y: f64, x0: f64, x1: f64) -> LineString {
		let mut xs = range(x0, x1 - EPSILON, self.precision);
		xs.push(x1);
		xs.into_iter().map(|x| [x, y]).collect()
	}
}

impl Default for Graticule {
	fn default() -> Self {
		Self::new([10.0, 10.0])
	}
}

/// `start, start + step, ...` up to but excluding `stop`.
fn range(start: f64, stop: f64, step: f64) -> Vec<f64> {
	let n = ((stop - start) / step).ceil().max(0.0) as usize;
	(0..n).map(|i| start + i as f64 * step).collect()
}
