use crate::config::SimConfig;
use crate::core::{SimState, Simulation};
use crate::snapshot::NullSnapshotWriter;
use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust Simulation core.
///
/// API:
/// - __new__(grid_size=40, dt=0.05, min_distance=0.01, max_velocity=1.0, cutoff=1.0,
///   gravity_factor=-1e-5, ticks=150000, seed=None)
/// - initialize()
/// - step(n=1), run_to_end()
/// - get_positions() / get_velocities() -> np.ndarray, shape (M, 2), float32
/// - get_identities() -> np.ndarray, shape (M,), uint32
#[pyclass]
pub struct CellSim {
    sim: Simulation,
}

#[pymethods]
impl CellSim {
    /// Configure a new periodic simulation on a grid_size x grid_size lattice.
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (
        grid_size=40,
        dt=0.05,
        min_distance=0.01,
        max_velocity=1.0,
        cutoff=1.0,
        gravity_factor=-1.0e-5,
        ticks=150_000,
        seed=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        grid_size: usize,
        dt: f32,
        min_distance: f32,
        max_velocity: f32,
        cutoff: f32,
        gravity_factor: f32,
        ticks: usize,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = SimConfig {
            grid_size,
            dt,
            min_distance,
            max_velocity,
            cutoff,
            gravity_factor,
            ticks,
            snapshot_every: 0,
            seed,
        };
        let sim = Simulation::new(config).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Place grid_size^2 particles at random positions with zero velocity.
    fn initialize(&mut self) -> PyResult<()> {
        self.sim.initialize().map_err(py_err)
    }

    /// Advance `n` ticks (releases the GIL during computation).
    #[pyo3(signature = (n=1))]
    fn step(&mut self, py: Python<'_>, n: usize) -> PyResult<()> {
        let sim = &mut self.sim;
        py.detach(|| {
            for _ in 0..n {
                sim.step()?;
            }
            Ok::<(), crate::error::Error>(())
        })
        .map_err(py_err)
    }

    /// Run every remaining tick; returns elapsed seconds.
    fn run_to_end(&mut self, py: Python<'_>) -> PyResult<f64> {
        let sim = &mut self.sim;
        let summary = py
            .detach(|| sim.run(&mut NullSnapshotWriter))
            .map_err(py_err)?;
        Ok(summary.elapsed.as_secs_f64())
    }

    /// Number of completed ticks.
    #[getter]
    fn tick(&self) -> usize {
        self.sim.tick()
    }

    /// One of "uninitialized", "ready", "running", "done".
    #[getter]
    fn state(&self) -> &'static str {
        match self.sim.state() {
            SimState::Uninitialized => "uninitialized",
            SimState::Ready => "ready",
            SimState::Running => "running",
            SimState::Done => "done",
        }
    }

    /// Return positions as a NumPy array of shape (M, 2), dtype=float32.
    ///
    /// Rows follow the current (cell-sorted) order; pair with get_identities().
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f32>>> {
        let particles = self.sim.particles();
        let mut arr = Array2::<f32>::zeros((particles.len(), 2));
        for (i, p) in particles.iter().enumerate() {
            arr[[i, 0]] = p.r[0];
            arr[[i, 1]] = p.r[1];
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return velocities as a NumPy array of shape (M, 2), dtype=float32.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f32>>> {
        let particles = self.sim.particles();
        let mut arr = Array2::<f32>::zeros((particles.len(), 2));
        for (i, p) in particles.iter().enumerate() {
            arr[[i, 0]] = p.v[0];
            arr[[i, 1]] = p.v[1];
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return particle identities in the same row order as get_positions().
    fn get_identities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<u32>>> {
        let ids: Vec<u32> = self.sim.particles().iter().map(|p| p.id).collect();
        Ok(ids.into_pyarray(py).to_owned().into())
    }

    /// Return the per-cell start offsets from the last index rebuild.
    fn get_boundary_table<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<usize>>> {
        Ok(self.sim.boundary_table().into_pyarray(py).to_owned().into())
    }

    /// Total kinetic energy for unit masses.
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

/// The cellsim Python module entry point.
#[pymodule]
fn cellsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CellSim>()?;
    Ok(())
}
