use crate::config::GasConfig;
use crate::core::collision::resolve_collisions;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis, Zip};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

/// Number of samples in the reference speed curve.
pub const THEORY_POINTS: usize = 100;
/// Upper end of the speed range covered by the reference curve.
pub const THEORY_MAX_SPEED: f64 = 10.0;

/// Gas of unit-mass hard spheres in the box `[0, L]^ndim`.
///
/// Positions and velocities are stored as `(N, ndim)` arrays. Walls reflect
/// specularly and pairs collide elastically, so `Σ|v_i|²` is conserved by
/// [`ParticleSystem::evolve`].
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    box_size: f64,
    temperature: f64,
    collision_radius: f64,
    collision_radius2: f64,
    r: Array2<f64>,
    v: Array2<f64>,
    time: f64,
    steps: u64,
    collisions: u64,
}

/// Sampled Maxwell-Boltzmann speed density.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoryCurve {
    /// Speeds `s`, evenly spaced.
    pub speeds: Vec<f64>,
    /// Density `p(s)` at each speed.
    pub density: Vec<f64>,
}

impl TheoryCurve {
    /// Iterate `(s, p(s))` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.speeds.iter().copied().zip(self.density.iter().copied())
    }
}

impl ParticleSystem {
    /// Create a thermalized gas from `config`, seeding a `StdRng` from `config.seed`
    /// (fresh entropy when `None`).
    pub fn new(config: &GasConfig) -> Result<Self> {
        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Create a thermalized gas drawing every random number from `rng`.
    ///
    /// Positions are uniform on `[0, L)` per component. Velocities are either
    /// `(1, ..., 1)` for every particle (delta mode) or uniform on `[-vmax, vmax)` per
    /// component, then rescaled so [`ParticleSystem::temperature`] equals the target.
    ///
    /// Errors:
    /// - `Error::InvalidParam` for any violated precondition (see [`GasConfig::validate`]).
    /// - `Error::ZeroKineticEnergy` if the sampled velocities are all zero.
    pub fn with_rng<R: Rng>(config: &GasConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let shape = (config.num_particles, config.ndim);
        let l = config.box_size;

        let r = Array2::from_shape_fn(shape, |_| rng.random_range(0.0..l));
        let mut v = if config.delta_velocity {
            Array2::ones(shape)
        } else {
            let vmax = config.vmax;
            Array2::from_shape_fn(shape, |_| rng.random_range(-vmax..vmax))
        };

        let t_emp = empirical_temperature(&v.view());
        if t_emp <= 0.0 || !t_emp.is_finite() {
            return Err(Error::ZeroKineticEnergy);
        }
        let scale = (config.temperature / t_emp).sqrt();
        v *= scale;

        debug!(
            n = config.num_particles,
            ndim = config.ndim,
            box_size = l,
            temperature = config.temperature,
            radius = config.radius,
            delta = config.delta_velocity,
            scale,
            "initialized particle system"
        );

        Ok(Self::assemble(l, config.temperature, config.radius, r, v))
    }

    /// Build a system from explicit positions and velocities, without rescaling.
    ///
    /// `temperature` is only recorded as the nominal value used by [`ParticleSystem::theory`].
    ///
    /// Errors:
    /// - `Error::InvalidParam` for a non-positive box or radius, negative temperature,
    ///   an empty state, unsupported dimension, or non-finite entries.
    /// - `Error::DimensionMismatch` if `r` and `v` have different shapes.
    pub fn from_state(
        box_size: f64,
        temperature: f64,
        radius: f64,
        r: Array2<f64>,
        v: Array2<f64>,
    ) -> Result<Self> {
        let (n, ndim) = r.dim();
        let config = GasConfig {
            num_particles: n,
            box_size,
            temperature,
            ndim,
            radius,
            ..GasConfig::default()
        };
        config.validate()?;
        if v.dim() != r.dim() {
            return Err(Error::shape(r.dim(), v.dim()));
        }
        check_finite(&r, "position")?;
        check_finite(&v, "velocity")?;
        Ok(Self::assemble(box_size, temperature, radius, r, v))
    }

    fn assemble(
        box_size: f64,
        temperature: f64,
        radius: f64,
        r: Array2<f64>,
        v: Array2<f64>,
    ) -> Self {
        Self {
            box_size,
            temperature,
            collision_radius: radius,
            collision_radius2: radius * radius,
            r,
            v,
            time: 0.0,
            steps: 0,
            collisions: 0,
        }
    }

    /// Advance the gas by `dt`: free flight, one pairwise collision sweep, then
    /// a single specular reflection pass against the walls.
    ///
    /// Positions are not corrected after collisions, and a particle that travels
    /// farther than `L` in one step may still be outside the box afterwards.
    ///
    /// Errors: `Error::InvalidParam` if `dt` is negative or not finite. The state is
    /// untouched in that case.
    pub fn evolve(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidParam("dt must be finite and >= 0".into()));
        }

        self.r.scaled_add(dt, &self.v);

        let res = resolve_collisions(self.r.view(), self.v.view_mut(), self.collision_radius2)?;

        self.reflect_walls();

        self.time += dt;
        self.steps += 1;
        self.collisions += res.collisions as u64;
        trace!(
            step = self.steps,
            collisions = res.collisions,
            coincident = res.coincident,
            "evolved"
        );
        Ok(())
    }

    /// Reflect every component at or beyond a wall, once.
    fn reflect_walls(&mut self) {
        let l = self.box_size;
        Zip::from(&mut self.r).and(&mut self.v).for_each(|x, vx| {
            if *x <= 0.0 {
                *x = -*x;
                *vx = -*vx;
            } else if *x >= l {
                *x = 2.0 * l - *x;
                *vx = -*vx;
            }
        });
    }

    /// Two-dimensional Maxwell-Boltzmann speed density `p(s) = s/T exp(-s²/2T)`,
    /// sampled at [`THEORY_POINTS`] points over `[0, THEORY_MAX_SPEED]`.
    ///
    /// Errors:
    /// - `Error::DimensionMismatch` unless the system is 2D.
    /// - `Error::InvalidParam` if the target temperature is zero.
    pub fn theory(&self) -> Result<TheoryCurve> {
        if self.ndim() != 2 {
            return Err(Error::DimensionMismatch {
                expected: "ndim = 2".into(),
                found: format!("ndim = {}", self.ndim()),
            });
        }
        let t = self.temperature;
        if t <= 0.0 {
            return Err(Error::InvalidParam(
                "theory curve needs a positive temperature".into(),
            ));
        }
        let speeds = crate::stats::linspace(0.0, THEORY_MAX_SPEED, THEORY_POINTS);
        let density = speeds
            .iter()
            .map(|&s| s / t * (-s * s / (2.0 * t)).exp())
            .collect();
        Ok(TheoryCurve { speeds, density })
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.r.nrows()
    }

    /// Spatial dimension.
    pub fn ndim(&self) -> usize {
        self.r.ncols()
    }

    /// Box side length L.
    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Nominal temperature requested at construction.
    pub fn target_temperature(&self) -> f64 {
        self.temperature
    }

    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    /// Positions, shape `(N, ndim)`.
    pub fn positions(&self) -> ArrayView2<'_, f64> {
        self.r.view()
    }

    /// Velocities, shape `(N, ndim)`.
    pub fn velocities(&self) -> ArrayView2<'_, f64> {
        self.v.view()
    }

    /// Simulated time accumulated over all `evolve` calls.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Cumulative number of resolved pair collisions.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Replace all positions. Shape must be `(N, ndim)` and values finite.
    pub fn set_positions(&mut self, r: Array2<f64>) -> Result<()> {
        if r.dim() != self.r.dim() {
            return Err(Error::shape(self.r.dim(), r.dim()));
        }
        check_finite(&r, "position")?;
        self.r = r;
        Ok(())
    }

    /// Replace all velocities. Shape must be `(N, ndim)` and values finite.
    pub fn set_velocities(&mut self, v: Array2<f64>) -> Result<()> {
        if v.dim() != self.v.dim() {
            return Err(Error::shape(self.v.dim(), v.dim()));
        }
        check_finite(&v, "velocity")?;
        self.v = v;
        Ok(())
    }

    /// `Σ|v_i|²`, the quantity conserved by every step.
    pub fn sum_squared_speed(&self) -> f64 {
        self.v.iter().map(|c| c * c).sum()
    }

    /// Total kinetic energy with unit masses: `½ Σ|v_i|²`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.sum_squared_speed()
    }

    /// Empirical temperature `2 · mean_i(|v_i|²) / ndim`.
    pub fn temperature(&self) -> f64 {
        empirical_temperature(&self.v.view())
    }

    /// Total momentum `Σ v_i`.
    pub fn momentum(&self) -> Array1<f64> {
        self.v.sum_axis(Axis(0))
    }

    /// Per-particle speeds `|v_i|`.
    pub fn speeds(&self) -> Array1<f64> {
        self.v.map_axis(Axis(1), |row| row.dot(&row).sqrt())
    }
}

fn empirical_temperature(v: &ArrayView2<'_, f64>) -> f64 {
    let (n, ndim) = v.dim();
    if n == 0 || ndim == 0 {
        return 0.0;
    }
    let sum_sq: f64 = v.iter().map(|c| c * c).sum();
    2.0 * (sum_sq / n as f64) / ndim as f64
}

fn check_finite(a: &Array2<f64>, what: &str) -> Result<()> {
    if a.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!("{what} values must be finite")))
    }
}
