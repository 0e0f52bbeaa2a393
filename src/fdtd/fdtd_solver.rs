use std::f64::consts::PI;

use crate::{Error, PhysicalConstants, SimulationParameters, SimulationState, Solver};
use crate::fdtd::{Boundary, Source, UpdateCoefficients, SOURCE_FREQUENCY};
use crate::fdtd::components::{MurBoundary, PointSource};

/// Describes the composition of an `FdtdSolver`.
pub struct FdtdSolverDescriptor {
    /// `(nx, ny)` grid points.
    pub shape: (usize, usize),
    pub constants: PhysicalConstants,
    pub sim_params: SimulationParameters,
    pub boundary: Box<dyn Boundary>,
    pub source: Box<dyn Source>,
}

/// Does single threaded TE updates on the CPU.
pub struct FdtdSolver {
    shape: (usize, usize),
    constants: PhysicalConstants,
    coefs: UpdateCoefficients,
    boundary: Box<dyn Boundary>,
    source: Box<dyn Source>,
}

impl FdtdSolver {
    #[inline]
    pub fn new(desc: FdtdSolverDescriptor) -> Self {
        Self {
            shape: desc.shape,
            constants: desc.constants,
            coefs: UpdateCoefficients::new(&desc.constants, &desc.sim_params),
            boundary: desc.boundary,
            source: desc.source,
        }
    }

    /// Mur boundaries and a 1 GHz sinusoid at the center cell.
    pub fn with_center_source(
        shape: (usize, usize),
        constants: PhysicalConstants,
        sim_params: SimulationParameters,
    ) -> Self {
        Self::new(FdtdSolverDescriptor {
            shape,
            constants,
            sim_params,
            boundary: Box::new(MurBoundary::new(shape, &sim_params, constants.speed_of_light)),
            source: Box::new(PointSource::centered(shape, |t| {
                f64::sin(2.0*PI * SOURCE_FREQUENCY * t)
            })),
        })
    }

    #[inline]
    pub fn coefficients(&self) -> &UpdateCoefficients {
        &self.coefs
    }

    /// Advances Hx and Hy from the current Ez.
    ///
    /// The last column of Hx and the last row of Hy are never written.
    fn update_magnetic(&self, state: &mut SimulationState) {
        let UpdateCoefficients { chxh, chxe, .. } = self.coefs;

        ndarray::Zip::from(state.hx.slice_mut(ndarray::s![.., ..-1]))
            .and(state.ez.slice(ndarray::s![.., 1..]))
            .and(state.ez.slice(ndarray::s![.., ..-1]))
            .for_each(|hx, &ez_up, &ez| {
                *hx = chxh * *hx + chxe * (ez_up - ez);
            });

        ndarray::Zip::from(state.hy.slice_mut(ndarray::s![..-1, ..]))
            .and(state.ez.slice(ndarray::s![1.., ..]))
            .and(state.ez.slice(ndarray::s![..-1, ..]))
            .for_each(|hy, &ez_right, &ez| {
                *hy = chxh * *hy - chxh * (ez_right - ez);
            });
    }

    /// Advances Ez on every cell with `i, j >= 1` from the new H fields.
    fn update_electric(&self, state: &mut SimulationState) {
        let UpdateCoefficients { ceze, cezh, .. } = self.coefs;

        ndarray::Zip::from(state.ez.slice_mut(ndarray::s![1.., 1..]))
            .and(state.hy.slice(ndarray::s![1.., 1..]))
            .and(state.hy.slice(ndarray::s![..-1, 1..]))
            .and(state.hx.slice(ndarray::s![1.., 1..]))
            .and(state.hx.slice(ndarray::s![1.., ..-1]))
            .for_each(|ez, &hy, &hy_left, &hx, &hx_down| {
                *ez = ceze * *ez + cezh * ((hy - hy_left) - (hx - hx_down));
            });
    }
}

impl Solver for FdtdSolver {
    fn step(
        &mut self,
        state: &mut SimulationState,
        sim_params: &SimulationParameters,
    ) -> Result<(), Error> {
        if state.shape() != self.shape {
            return Err(Error::BadInit {
                array_name: "Ez".to_string(),
                input_shape: state.shape(),
                expected_shape: self.shape,
            });
        }
        let (nx, ny) = self.shape;
        if nx < 3 || ny < 3 {
            return Err(Error::BadConfig(format!(
                "grid must be at least 3x3 points, got {}x{}", nx, ny
            )));
        }

        // H must be complete before Ez reads it
        self.update_magnetic(state);
        self.update_electric(state);

        self.boundary.apply(state.ez.view_mut());
        self.boundary.capture(state.ez.view());

        state.step += 1;
        let t = state.time(sim_params);
        self.source.inject(state.ez.view_mut(), t);

        Ok(())
    }

    #[inline]
    fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    fn max_phase_velocity(&self) -> f64 {
        self.constants.speed_of_light
    }
}
