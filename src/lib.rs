//! A framework for simulating 2-dimensional transverse electric (TE) waves
//! with the finite-difference time-domain method.
//!
//! To get started, refer to the `demos` directory in the main repository.

mod simulation;

pub mod fdtd;
pub mod observers;
pub mod prelude;

pub use simulation::{
    GridDescriptor, PhysicalConstants, RunDescriptor, Simulation, SimulationDescriptor,
    SimulationParameters, SimulationState,
};

/// Represents an error in the simulation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Init {array_name} array does not have expected shape \
        ( {array_name} array shape: {input_shape:?}, \
        expected shape: {expected_shape:?} )")]
    BadInit {
        array_name: String,
        input_shape: (usize, usize),
        expected_shape: (usize, usize),
    },
    #[error("Invalid configuration: {0}")]
    BadConfig(String),
    #[error("Field values diverged at step {step}, check the time step against the CFL limit")]
    Diverged {
        step: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    H5Error(#[from] hdf5::Error),
}

/// Manages actual computations.
pub trait Solver {
    /// Advances `state` by a single time step.
    fn step(
        &mut self,
        state: &mut SimulationState,
        sim_params: &SimulationParameters,
    ) -> Result<(), Error>;

    /// The `(nx, ny)` shape of the grid the solver works on.
    fn shape(&self) -> (usize, usize);

    /// The fastest wave speed on the grid, used for the CFL check.
    fn max_phase_velocity(&self) -> f64;
}
