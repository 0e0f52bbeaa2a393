use std::time::Duration;

use crate::{Error, Solver};
use crate::observers::{Renderer, Telemetry};

/// Constants of the uniform medium the wave travels through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Wave speed in the medium [m/s].
    pub speed_of_light: f64,
    /// Permittivity of the medium [F/m].
    pub permittivity: f64,
    /// Permeability of the medium [H/m].
    pub permeability: f64,
}

impl PhysicalConstants {
    /// Vacuum values.
    #[inline]
    pub fn vacuum() -> Self {
        Self {
            speed_of_light: 299_792_458.0,
            permittivity: 8.854e-12,
            permeability: 4.0 * std::f64::consts::PI * 1e-7,
        }
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::vacuum()
    }
}

/// Simulation specific parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    /// The physical size of each spacial step along x.
    pub delta_x: f64,
    /// The physical size of each spacial step along y.
    pub delta_y: f64,
    /// The length of each temperal step in the simulation.
    pub delta_t: f64,
}

impl SimulationParameters {
    /// The largest time step the 2D update stays stable for at wave speed `velocity`.
    #[inline]
    pub fn courant_limit(&self, velocity: f64) -> f64 {
        (velocity * (self.delta_x.powi(-2) + self.delta_y.powi(-2)).sqrt()).recip()
    }
}

/// Describes the extent and resolution of the simulated plane.
#[derive(Copy, Clone, Debug)]
pub struct GridDescriptor {
    /// Number of grid points along x.
    pub nx: usize,
    /// Number of grid points along y.
    pub ny: usize,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl GridDescriptor {
    /// Picks a time step of `stability * min(dx, dy) / c0`.
    ///
    /// A `stability` of 0.5 keeps the update inside the 2D CFL limit for any
    /// aspect ratio.
    pub fn calculate_simulation_parameters(
        &self,
        stability: f64,
        constants: &PhysicalConstants,
    ) -> SimulationParameters {
        let delta_t = stability * f64::min(self.delta_x, self.delta_y) / constants.speed_of_light;

        SimulationParameters {
            delta_x: self.delta_x,
            delta_y: self.delta_y,
            delta_t,
        }
    }
}

/// Describes the field state at the current time step.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// The 1-indexed number of the last completed step, 0 before any step.
    pub step: usize,
    /// Out of plane electric field, on the primary grid nodes.
    pub ez: ndarray::Array2<f64>,
    /// Magnetic field along x, staggered half a step in y.
    pub hx: ndarray::Array2<f64>,
    /// Magnetic field along y, staggered half a step in x.
    pub hy: ndarray::Array2<f64>,
}

impl SimulationState {
    /// Creates an all zero state for a `(nx, ny)` grid.
    #[inline]
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            step: 0,
            ez: ndarray::Array2::<f64>::zeros(shape),
            hx: ndarray::Array2::<f64>::zeros(shape),
            hy: ndarray::Array2::<f64>::zeros(shape),
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.ez.dim()
    }

    /// Index of the center cell, rounded up for even sizes.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        let (nx, ny) = self.shape();
        (nx / 2, ny / 2)
    }

    /// Ez at the center cell.
    #[inline]
    pub fn center_value(&self) -> f64 {
        let (i, j) = self.center();
        self.ez[[i, j]]
    }

    /// Grid wide `(max, min)` of Ez.
    pub fn ez_extrema(&self) -> (f64, f64) {
        self.ez.fold((f64::NEG_INFINITY, f64::INFINITY), |(max, min), &v| {
            (max.max(v), min.min(v))
        })
    }

    /// Whether every field value is finite.
    pub fn is_finite(&self) -> bool {
        self.ez.iter()
            .chain(self.hx.iter())
            .chain(self.hy.iter())
            .all(|v| v.is_finite())
    }

    /// Physical time of the last completed step.
    #[inline]
    pub fn time(&self, sim_params: &SimulationParameters) -> f64 {
        (self.step as f64) * sim_params.delta_t
    }
}

/// Describes a simulation.
pub struct SimulationDescriptor<S: Solver> {
    /// The `Solver` for the simulation.
    pub solver: S,
    /// The parameters for the simulation.
    pub sim_params: SimulationParameters,
    /// The state that the simulation starts in.
    pub init_state: Option<SimulationState>,
}

/// Describes a simulation run.
pub struct RunDescriptor<'a> {
    /// How many time steps to advance.
    pub nsteps: usize,
    /// Whether or not to print information to the console.
    pub verbose: bool,
    /// Steps between frames handed to the renderer.
    pub frame_interval: usize,
    /// How long to wait after each frame is handed off.
    pub frame_pause: Option<Duration>,
    /// Receives center value and extrema of Ez on every step.
    pub telemetry: Option<&'a mut dyn Telemetry>,
    /// Receives a transposed view of Ez every `frame_interval` steps.
    pub renderer: Option<&'a mut dyn Renderer>,
}

impl<'a> RunDescriptor<'a> {
    /// A quiet run of `nsteps` with no collaborators attached.
    pub fn new(nsteps: usize) -> Self {
        Self {
            nsteps,
            verbose: false,
            frame_interval: 50,
            frame_pause: None,
            telemetry: None,
            renderer: None,
        }
    }
}

/// The main `struct` of the framework.
pub struct Simulation<S: Solver> {
    solver: S,
    sim_params: SimulationParameters,
    state: SimulationState,
}

impl<S: Solver> Simulation<S> {
    /// Creates a new `Simulation` instance.
    pub fn new(desc: SimulationDescriptor<S>) -> Result<Self, Error> {
        let (nx, ny) = desc.solver.shape();
        if nx < 3 || ny < 3 {
            return Err(Error::BadConfig(format!(
                "grid must be at least 3x3 points, got {}x{}", nx, ny
            )));
        }

        let SimulationParameters { delta_x, delta_y, delta_t } = desc.sim_params;
        for (name, value) in [("delta_x", delta_x), ("delta_y", delta_y), ("delta_t", delta_t)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::BadConfig(format!(
                    "{} must be positive and finite, got {}", name, value
                )));
            }
        }

        let limit = desc.sim_params.courant_limit(desc.solver.max_phase_velocity());
        if delta_t > limit {
            return Err(Error::BadConfig(format!(
                "time step {:.4e} s exceeds the CFL limit of {:.4e} s", delta_t, limit
            )));
        }

        // create arrays for initial data
        let state = desc.init_state.unwrap_or_else(|| SimulationState::new((nx, ny)));
        for (array_name, array) in [("Ez", &state.ez), ("Hx", &state.hx), ("Hy", &state.hy)] {
            if array.dim() != (nx, ny) {
                return Err(Error::BadInit {
                    array_name: array_name.to_string(),
                    input_shape: array.dim(),
                    expected_shape: (nx, ny),
                });
            }
        }

        Ok(Self {
            state,
            solver: desc.solver,
            sim_params: desc.sim_params,
        })
    }

    /// Does a computational run.
    pub fn run(&mut self, desc: RunDescriptor) -> Result<(), Error> {
        let RunDescriptor {
            nsteps,
            verbose,
            frame_interval,
            frame_pause,
            mut telemetry,
            mut renderer,
        } = desc;
        if frame_interval == 0 {
            return Err(Error::BadConfig("frame interval must be at least 1".to_string()));
        }

        // setup output if verbose
        let bar = if verbose {
            println!("# of time steps: {}", nsteps);
            Some(indicatif::ProgressBar::new(nsteps as u64))
        } else {
            None
        };

        for _ in 0..nsteps {
            self.solver.step(&mut self.state, &self.sim_params)?;
            let step = self.state.step;

            if !self.state.is_finite() {
                if let Some(ref bar) = bar {
                    bar.abandon();
                }
                return Err(Error::Diverged { step });
            }

            if let Some(ref mut telemetry) = telemetry {
                let (max, min) = self.state.ez_extrema();
                telemetry.on_step(step, self.state.center_value(), max, min)?;
            }

            if step % frame_interval == 0 {
                if let Some(ref mut renderer) = renderer {
                    renderer.on_frame(step, self.state.ez.t())?;
                    if let Some(pause) = frame_pause {
                        std::thread::sleep(pause);
                    }
                }
            }

            if let Some(ref bar) = bar {
                bar.inc(1)
            }
        }

        if let Some(ref bar) = bar {
            bar.finish();
        }

        if let Some(renderer) = renderer {
            renderer.finish(self.state.step, self.state.ez.t())?;
        }

        Ok(())
    }

    #[inline]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    #[inline]
    pub fn sim_params(&self) -> &SimulationParameters {
        &self.sim_params
    }

    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }
}
