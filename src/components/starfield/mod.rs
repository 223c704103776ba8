//! Twinkling particle backgrounds.
//!
//! Particle positions and timings come from a seeded hash of the particle
//! index, never from a runtime random source.

mod component;
pub mod particles;

pub use component::StarfieldBackground;
pub use particles::{FieldParams, ParticleDescriptor, generate_field, seeded_random};
