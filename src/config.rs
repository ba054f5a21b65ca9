//! Construction parameters for a [`ParticleSystem`](crate::core::ParticleSystem).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of a hard-sphere gas.
///
/// Missing fields fall back to [`GasConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    /// Number of particles N (> 0).
    pub num_particles: usize,
    /// Side length L of the square/cubic box (> 0).
    pub box_size: f64,
    /// Target temperature realized at initialization (>= 0).
    pub temperature: f64,
    /// Spatial dimension, 2 or 3.
    pub ndim: usize,
    /// Hard-sphere collision radius shared by all particles (> 0).
    pub radius: f64,
    /// Half-width of the uniform initial velocity distribution (>= 0).
    pub vmax: f64,
    /// Start every particle at velocity (1, ..., 1) before rescaling.
    pub delta_velocity: bool,
    /// RNG seed for reproducible initialization; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            num_particles: 100,
            box_size: 50.0,
            temperature: 1.0,
            ndim: 2,
            radius: 0.5,
            vmax: 1.5,
            delta_velocity: false,
            seed: None,
        }
    }
}

impl GasConfig {
    /// Config with the given particle count and box size; everything else default.
    pub fn new(num_particles: usize, box_size: f64) -> Self {
        Self {
            num_particles,
            box_size,
            ..Self::default()
        }
    }

    /// Check every parameter precondition.
    ///
    /// Errors:
    /// - `Error::InvalidParam` naming the first offending parameter.
    /// - `Error::ZeroKineticEnergy` if uniform sampling with `vmax == 0` is requested.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(Error::InvalidParam("num_particles must be > 0".into()));
        }
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(Error::InvalidParam(
                "box_size must be finite and > 0".into(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(Error::InvalidParam(
                "temperature must be finite and >= 0".into(),
            ));
        }
        if !(2..=3).contains(&self.ndim) {
            return Err(Error::InvalidParam(format!(
                "ndim must be 2 or 3, got {}",
                self.ndim
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !self.vmax.is_finite() || self.vmax < 0.0 {
            return Err(Error::InvalidParam("vmax must be finite and >= 0".into()));
        }
        // Sampling range [-vmax, vmax) must have a finite width.
        if !(2.0 * self.vmax).is_finite() {
            return Err(Error::InvalidParam(
                "vmax too large: 2 * vmax overflows".into(),
            ));
        }
        if !self.delta_velocity && self.vmax == 0.0 {
            return Err(Error::ZeroKineticEnergy);
        }
        Ok(())
    }
}
