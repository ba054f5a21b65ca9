//! Physics engine: the particle container and its pairwise collision sweep.

pub mod collision;
pub mod system;

pub use collision::{resolve_collisions, Resolution};
pub use system::{ParticleSystem, TheoryCurve};
