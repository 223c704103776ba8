//! Globe orientation and pointer interaction.
//!
//! One [`GlobeMotion`] belongs to one mounted globe. It is advanced once per
//! display frame by the animation loop and mutated by pointer handlers; both
//! run on the same thread, so it is shared through `Rc<RefCell<_>>` rather
//! than any global.

/// Tuning constants for auto-spin, tilt recovery and dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionParams {
	/// λ advance per frame while idle, in degrees.
	pub spin_step: f64,
	/// φ the globe settles back to, in degrees.
	pub default_tilt: f64,
	/// Fraction of the remaining tilt error removed each frame.
	pub damping: f64,
	/// Tilt error below which no correction is applied; an idle globe parks
	/// up to this far from `default_tilt`.
	pub settle_threshold: f64,
	/// Degrees of rotation per pixel of pointer movement.
	pub sensitivity: f64,
	/// Dragging clamps φ to `[-tilt_limit, tilt_limit]`.
	pub tilt_limit: f64,
}

impl Default for MotionParams {
	fn default() -> Self {
		Self {
			spin_step: 0.4,
			default_tilt: -25.0,
			damping: 0.02,
			settle_threshold: 0.1,
			sensitivity: 0.3,
			tilt_limit: 60.0,
		}
	}
}

/// Current orientation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
	/// Longitude component.
	pub lambda: f64,
	/// Tilt component.
	pub phi: f64,
}

/// Angular velocity applied per frame during auto-spin, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
	/// Longitude component.
	pub lambda: f64,
	/// Tilt component.
	pub phi: f64,
}

/// Who is driving the rotation right now.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	/// Auto-spin drives the rotation.
	#[default]
	Idle,
	/// The pointer is held down; `last` is its previous screen position.
	Dragging { last: [f64; 2] },
}

/// Rotation, velocity and drag state of a single globe.
#[derive(Clone, Debug)]
pub struct GlobeMotion {
	/// Current orientation.
	pub rotation: Rotation,
	/// Per-frame auto-spin step.
	pub velocity: Velocity,
	drag: DragState,
	params: MotionParams,
}

impl GlobeMotion {
	/// Starts idle at the default tilt, spinning eastward.
	pub fn new(params: MotionParams) -> Self {
		Self {
			rotation: Rotation {
				lambda: 0.0,
				phi: params.default_tilt,
			},
			velocity: Self::spin_velocity(&params),
			drag: DragState::Idle,
			params,
		}
	}

	fn spin_velocity(params: &MotionParams) -> Velocity {
		Velocity {
			lambda: params.spin_step,
			phi: 0.0,
		}
	}

	/// Tuning this motion was built with.
	pub fn params(&self) -> &MotionParams {
		&self.params
	}

	/// Current drag state.
	pub fn drag_state(&self) -> DragState {
		self.drag
	}

	/// Whether a pointer drag is in progress.
	pub fn is_dragging(&self) -> bool {
		matches!(self.drag, DragState::Dragging { .. })
	}

	/// Advances auto-spin by one frame. Does nothing while dragging.
	///
	/// The tilt relaxes toward the default by a fixed fraction of the
	/// remaining error each frame, so it never overshoots.
	pub fn tick(&mut self) {
		if self.is_dragging() {
			return;
		}
		self.rotation.lambda += self.velocity.lambda;
		self.rotation.phi += self.velocity.phi;
		self.velocity.phi *= 1.0 - self.params.damping;

		let error = self.params.default_tilt - self.rotation.phi;
		if error.abs() > self.params.settle_threshold {
			self.rotation.phi += error * self.params.damping;
		}
	}

	/// Starts a drag at screen position `(x, y)`, suspending auto-spin.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag = DragState::Dragging { last: [x, y] };
	}

	/// Rotates by the pointer's movement since the last event. Ignored unless
	/// a drag is in progress.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		let DragState::Dragging { last } = self.drag else {
			return;
		};
		let (dx, dy) = (x - last[0], y - last[1]);
		let limit = self.params.tilt_limit;
		self.rotation.lambda += dx * self.params.sensitivity;
		self.rotation.phi = (self.rotation.phi - dy * self.params.sensitivity).clamp(-limit, limit);
		self.drag = DragState::Dragging { last: [x, y] };
	}

	/// Ends a drag (pointer up or leaving the surface). Auto-spin resumes at
	/// the default velocity; the drag's own speed is discarded.
	pub fn pointer_up(&mut self) {
		self.drag = DragState::Idle;
		self.velocity = Self::spin_velocity(&self.params);
	}

	/// Projection rotation `[λ, φ, γ]`; roll is always zero.
	pub fn angles(&self) -> [f64; 3] {
		[self.rotation.lambda, self.rotation.phi, 0.0]
	}
}

impl Default for GlobeMotion {
	fn default() -> Self {
		Self::new(MotionParams::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_tilted_and_idle() {
		let motion = GlobeMotion::default();
		assert_eq!(motion.angles(), [0.0, -25.0, 0.0]);
		assert_eq!(motion.drag_state(), DragState::Idle);
		assert_eq!(motion.velocity, Velocity { lambda: 0.4, phi: 0.0 });
	}

	#[test]
	fn idle_tick_spins_without_touching_settled_tilt() {
		let mut motion = GlobeMotion::default();
		motion.tick();
		assert_eq!(motion.rotation.lambda, 0.4);
		assert_eq!(motion.rotation.phi, -25.0);
	}

	#[test]
	fn tilt_inside_threshold_is_left_alone() {
		let mut motion = GlobeMotion::default();
		motion.rotation.phi = -25.05;
		motion.tick();
		assert_eq!(motion.rotation.phi, -25.05);
	}

	#[test]
	fn tilt_relaxes_by_damping_fraction() {
		let mut motion = GlobeMotion::default();
		motion.rotation.phi = 25.0;
		motion.tick();
		assert!((motion.rotation.phi - (25.0 - 50.0 * 0.02)).abs() < 1e-12);
	}

	#[test]
	fn drag_moves_by_sensitivity() {
		let mut motion = GlobeMotion::default();
		motion.pointer_down(100.0, 100.0);
		motion.pointer_move(110.0, 90.0);
		assert!((motion.rotation.lambda - 3.0).abs() < 1e-12);
		assert!((motion.rotation.phi - (-22.0)).abs() < 1e-12);
		assert_eq!(
			motion.drag_state(),
			DragState::Dragging {
				last: [110.0, 90.0]
			}
		);
	}

	#[test]
	fn moves_without_a_press_are_ignored() {
		let mut motion = GlobeMotion::default();
		motion.pointer_move(500.0, 500.0);
		assert_eq!(motion.angles(), [0.0, -25.0, 0.0]);
	}

	#[test]
	fn release_restores_spin() {
		let mut motion = GlobeMotion::default();
		motion.velocity.lambda = 9.0;
		motion.pointer_down(0.0, 0.0);
		motion.pointer_move(50.0, 0.0);
		motion.pointer_up();
		assert!(!motion.is_dragging());
		assert_eq!(motion.velocity, Velocity { lambda: 0.4, phi: 0.0 });

		let before = motion.rotation.lambda;
		motion.tick();
		assert!((motion.rotation.lambda - before - 0.4).abs() < 1e-12);
	}
}
