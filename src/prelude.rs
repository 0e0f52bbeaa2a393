//! Includes commonly used library components.

pub use crate::{
    GridDescriptor,
    PhysicalConstants,
    RunDescriptor,
    Simulation,
    SimulationDescriptor,
    SimulationParameters,
    SimulationState,
    Solver,
};
pub use crate::fdtd::{Boundary, Source, UpdateCoefficients};
pub use crate::observers::{Renderer, Telemetry};
