//! Hard-sphere kinetic gas.
//!
//! A [`ParticleSystem`] holds N unit-mass hard spheres in a square (2D) or cubic (3D)
//! box. Each [`ParticleSystem::evolve`] step moves particles ballistically, resolves
//! overlapping pairs with the elastic equal-mass rule and reflects particles off the
//! walls. Starting from a flat or delta-shaped velocity distribution, the speed
//! histogram relaxes to the Maxwell-Boltzmann curve returned by
//! [`ParticleSystem::theory`].
//!
//! ```
//! use kinetic_gas::{GasConfig, ParticleSystem};
//!
//! let mut gas = ParticleSystem::new(&GasConfig {
//!     seed: Some(7),
//!     ..GasConfig::new(64, 20.0)
//! })?;
//! let e0 = gas.sum_squared_speed();
//! for _ in 0..10 {
//!     gas.evolve(0.05)?;
//! }
//! assert!((gas.sum_squared_speed() - e0).abs() < 1e-9 * e0);
//! # Ok::<(), kinetic_gas::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use crate::config::GasConfig;
pub use crate::core::{resolve_collisions, ParticleSystem, Resolution, TheoryCurve};
