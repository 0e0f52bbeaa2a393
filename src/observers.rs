//! Consumers of the field state handed out by a run.

mod console;
mod hdf5_renderer;

pub use console::ConsoleTelemetry;
pub use hdf5_renderer::{Hdf5Renderer, SaveSettings, SaveType};

use crate::Error;

/// Receives a summary of Ez after every step.
pub trait Telemetry {
    fn on_step(&mut self, step: usize, center: f64, max: f64, min: f64) -> Result<(), Error>;
}

/// Receives full Ez snapshots, transposed to `(ny, nx)` for display.
pub trait Renderer {
    fn on_frame(&mut self, step: usize, frame: ndarray::ArrayView2<f64>) -> Result<(), Error>;

    /// Called once with the final field after the last step of a run.
    fn finish(&mut self, step: usize, frame: ndarray::ArrayView2<f64>) -> Result<(), Error>;
}
