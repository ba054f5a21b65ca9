use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::GasConfig;
use crate::core::ParticleSystem;
use crate::stats::speed_histogram;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// KineticGas: Python-facing wrapper around [`ParticleSystem`].
///
/// API:
/// - __new__(num_particles, box_size, t=1.0, ndim=2, radius=0.5, vmax=1.5, delta=False, seed=None)
/// - evolve(dt, steps=1)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, ndim)
/// - box_size
/// - theory() -> (speeds, density)
#[pyclass]
pub struct KineticGas {
    sys: ParticleSystem,
}

#[pymethods]
impl KineticGas {
    /// Initialize a thermalized hard-sphere gas in a square/cubic box of side `box_size`.
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (num_particles, box_size, t=1.0, ndim=2, radius=0.5, vmax=1.5, delta=false, seed=None))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        num_particles: usize,
        box_size: f64,
        t: f64,
        ndim: usize,
        radius: f64,
        vmax: f64,
        delta: bool,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = GasConfig {
            num_particles,
            box_size,
            temperature: t,
            ndim,
            radius,
            vmax,
            delta_velocity: delta,
            seed,
        };
        let sys = ParticleSystem::new(&config).map_err(py_err)?;
        Ok(Self { sys })
    }

    /// Advance `steps` times by `dt` (releases the GIL during computation).
    #[pyo3(signature = (dt, steps=1))]
    fn evolve(&mut self, py: Python<'_>, dt: f64, steps: usize) -> PyResult<()> {
        let sys = &mut self.sys;
        py.detach(|| {
            for _ in 0..steps {
                sys.evolve(dt)?;
            }
            Ok::<(), crate::error::Error>(())
        })
        .map_err(py_err)
    }

    /// Return positions as a NumPy array of shape (N, ndim), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = self.sys.positions().to_owned();
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return velocities as a NumPy array of shape (N, ndim), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = self.sys.velocities().to_owned();
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Replace all velocities from a NumPy array of shape (N, ndim). Values must be finite.
    fn set_velocities<'py>(&mut self, velocities: PyReadonlyArray2<'py, f64>) -> PyResult<()> {
        self.sys
            .set_velocities(velocities.as_array().to_owned())
            .map_err(py_err)
    }

    /// Box side length L.
    #[getter]
    fn box_size(&self) -> f64 {
        self.sys.box_size()
    }

    /// 2D Maxwell-Boltzmann reference curve as (speeds, density) arrays.
    fn theory(&self, py: Python<'_>) -> PyResult<(Py<PyArray1<f64>>, Py<PyArray1<f64>>)> {
        let curve = self.sys.theory().map_err(py_err)?;
        Ok((
            curve.speeds.into_pyarray(py).to_owned().into(),
            curve.density.into_pyarray(py).to_owned().into(),
        ))
    }

    /// Density-normalized histogram of current speeds over `edges`.
    fn speed_histogram(&self, edges: Vec<f64>) -> PyResult<Vec<f64>> {
        speed_histogram(self.sys.speeds().iter().copied(), &edges).map_err(py_err)
    }

    fn kinetic_energy(&self) -> f64 {
        self.sys.kinetic_energy()
    }

    /// Empirical temperature 2 * mean(|v|^2) / ndim.
    fn temperature(&self) -> f64 {
        self.sys.temperature()
    }
}

/// The kinetic_gas Python module entry point.
#[pymodule]
fn kinetic_gas(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KineticGas>()?;
    Ok(())
}
