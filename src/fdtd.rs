pub mod components;

mod fdtd_solver;

pub use fdtd_solver::{FdtdSolver, FdtdSolverDescriptor};

use crate::{PhysicalConstants, SimulationParameters};

/// Frequency of the default point source [Hz].
pub const SOURCE_FREQUENCY: f64 = 1e9;

/// Multipliers of the lossless TE update, fixed for a whole run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UpdateCoefficients {
    /// Ez self term.
    pub ceze: f64,
    /// Ez curl of H term.
    pub cezh: f64,
    /// H self term, also scales the Hy curl term.
    pub chxh: f64,
    /// Hx curl of Ez term.
    pub chxe: f64,
}

impl UpdateCoefficients {
    #[inline]
    pub fn new(constants: &PhysicalConstants, sim_params: &SimulationParameters) -> Self {
        Self {
            ceze: 1.0,
            cezh: sim_params.delta_t / (constants.permittivity * sim_params.delta_x),
            chxh: 1.0,
            chxe: sim_params.delta_t / (constants.permeability * sim_params.delta_y),
        }
    }
}

/// Generates the field injected into the grid every step.
pub trait Source {
    /// Adds the source contribution at `time` to `ez`.
    fn inject(&self, ez: ndarray::ArrayViewMut2<f64>, time: f64);
    /// The source waveform value at `time`.
    fn generate(&self, time: f64) -> f64;
}

/// Handles the outermost rows and columns of Ez, representing an open domain.
pub trait Boundary {
    /// Stores whatever the next `apply` needs from the finalized Ez.
    fn capture(&mut self, ez: ndarray::ArrayView2<f64>);
    /// Overwrites the edges of a freshly updated Ez.
    fn apply(&self, ez: ndarray::ArrayViewMut2<f64>);
}
