//! SVG path generation for projected geometry.
//!
//! Lines are cut where they pass behind the globe. Polygons are clipped to the
//! visible hemisphere: each visible run of a ring starts and ends on the
//! horizon, and runs are joined by walking the horizon circle clockwise from
//! an exit to the next entry. Because exterior rings wind clockwise and holes
//! anticlockwise, the polygon interior always lies to the right of travel, so
//! the clockwise walk keeps it inside.
//!
//! Edges are resampled along their great circle until the projected midpoint
//! sits within the projection's precision of the straight chord.

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::components::fmt_decimal;
use super::projection::{Orthographic, Vec3, arc_midpoint, horizon_crossing, is_visible};
use super::types::{GeoPolygon, LineString, Polygon};

/// Maximum recursion depth of the adaptive resampler.
const MAX_RESAMPLE_DEPTH: u8 = 16;

/// Path data for a set of open polylines.
pub fn line_path(projection: &Orthographic, lines: &[LineString]) -> String {
	let mut writer = PathWriter::new(projection);
	for line in lines {
		writer.line(line);
	}
	writer.finish()
}

/// Path data for a single polygon, clipped to the visible hemisphere.
pub fn polygon_path(projection: &Orthographic, polygon: &Polygon) -> String {
	let mut writer = PathWriter::new(projection);
	writer.polygon(polygon);
	writer.finish()
}

/// Path data for every polygon of a country. Empty when nothing is visible.
pub fn geo_path(projection: &Orthographic, country: &GeoPolygon) -> String {
	let mut writer = PathWriter::new(projection);
	for polygon in &country.polygons {
		writer.polygon(polygon);
	}
	writer.finish()
}

/// A visible stretch of a ring, from its horizon entry to its horizon exit.
struct Run {
	points: Vec<Vec3>,
	entry_angle: f64,
	exit_angle: f64,
}

struct PathWriter<'a> {
	projection: &'a Orthographic,
	delta2: f64,
	buf: String,
}

impl<'a> PathWriter<'a> {
	fn new(projection: &'a Orthographic) -> Self {
		let precision = projection.precision();
		Self {
			projection,
			delta2: precision * precision,
			buf: String::new(),
		}
	}

	fn finish(self) -> String {
		self.buf
	}

	fn move_to(&mut self, [x, y]: [f64; 2]) {
		let _ = write!(self.buf, "M{},{}", fmt_decimal(x), fmt_decimal(y));
	}

	fn line_to(&mut self, [x, y]: [f64; 2]) {
		let _ = write!(self.buf, "L{},{}", fmt_decimal(x), fmt_decimal(y));
	}

	fn close(&mut self) {
		self.buf.push('Z');
	}

	/// Emits a line from `a` to `b`, inserting resampled points when the
	/// projected great circle bends away from the chord.
	fn segment(&mut self, a: Vec3, b: Vec3) {
		let (pa, pb) = (self.projection.to_screen(a), self.projection.to_screen(b));
		self.resample(a, pa, b, pb, MAX_RESAMPLE_DEPTH);
		self.line_to(pb);
	}

	fn resample(&mut self, a: Vec3, pa: [f64; 2], b: Vec3, pb: [f64; 2], depth: u8) {
		if depth == 0 {
			return;
		}
		let Some(m) = arc_midpoint(a, b) else {
			return;
		};
		let pm = self.projection.to_screen(m);
		let (dx, dy) = (pb[0] - pa[0], pb[1] - pa[1]);
		let (mx, my) = (pm[0] - pa[0], pm[1] - pa[1]);
		let chord2 = dx * dx + dy * dy;
		let dist2 = if chord2 > 0.0 {
			let cross = dx * my - dy * mx;
			cross * cross / chord2
		} else {
			mx * mx + my * my
		};
		if dist2 > self.delta2 {
			self.resample(a, pa, m, pm, depth - 1);
			self.line_to(pm);
			self.resample(m, pm, b, pb, depth - 1);
		}
	}

	fn line(&mut self, points: &[[f64; 2]]) {
		let mut previous: Option<Vec3> = None;
		for &position in points {
			let v = self.projection.rotate(position);
			match previous {
				None => {
					if is_visible(v) {
						self.move_to(self.projection.to_screen(v));
					}
				}
				Some(u) => match (is_visible(u), is_visible(v)) {
					(true, true) => self.segment(u, v),
					(true, false) => self.segment(u, horizon_crossing(u, v)),
					(false, true) => {
						let h = horizon_crossing(u, v);
						self.move_to(self.projection.to_screen(h));
						self.segment(h, v);
					}
					(false, false) => {}
				},
			}
			previous = Some(v);
		}
	}

	fn polygon(&mut self, polygon: &Polygon) {
		let mut runs = Vec::new();
		for ring in polygon {
			let open = match ring.split_last() {
				Some((last, rest)) if rest.first() == Some(last) => rest,
				_ => ring.as_slice(),
			};
			if open.is_empty() {
				continue;
			}
			let points: Vec<Vec3> = open.iter().map(|&p| self.projection.rotate(p)).collect();
			let visible: Vec<bool> = points.iter().map(|&v| is_visible(v)).collect();

			if visible.iter().all(|&v| v) {
				self.closed_ring(&points);
			} else if visible.iter().any(|&v| v) {
				self.split_runs(&points, &visible, &mut runs);
			}
		}
		if !runs.is_empty() {
			self.stitch(&runs);
		}
	}

	fn closed_ring(&mut self, points: &[Vec3]) {
		self.move_to(self.projection.to_screen(points[0]));
		for pair in points.windows(2) {
			self.segment(pair[0], pair[1]);
		}
		if points.len() > 1 {
			self.segment(points[points.len() - 1], points[0]);
		}
		self.close();
	}

	/// Cuts a partly visible ring into runs that begin and end on the horizon.
	fn split_runs(&self, points: &[Vec3], visible: &[bool], runs: &mut Vec<Run>) {
		let n = points.len();
		let Some(start) = (0..n).find(|&i| visible[i] && !visible[(i + n - 1) % n]) else {
			return;
		};

		let mut current: Option<Vec<Vec3>> = None;
		for k in 0..n {
			let i = (start + k) % n;
			if !visible[i] {
				continue;
			}
			let run = current.get_or_insert_with(|| {
				let previous = points[(i + n - 1) % n];
				vec![horizon_crossing(previous, points[i])]
			});
			run.push(points[i]);

			let next = (i + 1) % n;
			if !visible[next] {
				if let Some(mut run) = current.take() {
					run.push(horizon_crossing(points[i], points[next]));
					runs.push(self.make_run(run));
				}
			}
		}
	}

	fn make_run(&self, points: Vec<Vec3>) -> Run {
		let entry_angle = self.projection.screen_angle(points[0]);
		let exit_angle = self.projection.screen_angle(points[points.len() - 1]);
		Run {
			points,
			entry_angle,
			exit_angle,
		}
	}

	/// Joins runs into closed outlines along the horizon.
	fn stitch(&mut self, runs: &[Run]) {
		let mut used = vec![false; runs.len()];
		for start in 0..runs.len() {
			if used[start] {
				continue;
			}
			self.move_to(self.projection.to_screen(runs[start].points[0]));
			let mut current = start;
			loop {
				used[current] = true;
				let run = &runs[current];
				for pair in run.points.windows(2) {
					self.segment(pair[0], pair[1]);
				}

				let next = next_entry(runs, run.exit_angle);
				self.horizon_arc(run.exit_angle, &runs[next]);
				if used[next] {
					break;
				}
				current = next;
			}
			self.close();
		}
	}

	fn horizon_arc(&mut self, from_angle: f64, to: &Run) {
		let sweep = (to.entry_angle - from_angle).rem_euclid(TAU);
		let [x, y] = self.projection.to_screen(to.points[0]);
		if sweep < 1e-9 || TAU - sweep < 1e-9 {
			self.line_to([x, y]);
			return;
		}
		let radius = fmt_decimal(self.projection.scale());
		let large = u8::from(sweep > PI);
		let _ = write!(
			self.buf,
			"A{radius},{radius},0,{large},1,{},{}",
			fmt_decimal(x),
			fmt_decimal(y)
		);
	}
}

/// The run whose entry is reached first when walking clockwise from `angle`.
fn next_entry(runs: &[Run], angle: f64) -> usize {
	runs.iter()
		.enumerate()
		.map(|(i, run)| (i, (run.entry_angle - angle).rem_euclid(TAU)))
		.fold((0, f64::INFINITY), |best, (i, gap)| {
			if gap < best.1 { (i, gap) } else { best }
		})
		.0
}
