use crate::SimulationParameters;
use crate::fdtd::Boundary;

/// First order Mur absorbing boundary on all four edges.
///
/// Keeps the Ez values one cell inward from each edge as they were at the
/// end of the previous step. Exact for normal incidence, partially
/// reflecting at oblique angles.
pub struct MurBoundary {
    coef_x: f64,
    coef_y: f64,
    // rows 1 and nx-2
    x0: ndarray::Array1<f64>,
    x1: ndarray::Array1<f64>,
    // columns 1 and ny-2
    y0: ndarray::Array1<f64>,
    y1: ndarray::Array1<f64>,
}
impl MurBoundary {
    /// Creates a boundary for a `(nx, ny)` grid with an all zero snapshot.
    pub fn new(shape: (usize, usize), sim_params: &SimulationParameters, velocity: f64) -> Self {
        let (nx, ny) = shape;
        let c_dt = velocity * sim_params.delta_t;

        Self {
            coef_x: (c_dt - sim_params.delta_x) / (c_dt + sim_params.delta_x),
            coef_y: (c_dt - sim_params.delta_y) / (c_dt + sim_params.delta_y),
            x0: ndarray::Array1::<f64>::zeros(ny),
            x1: ndarray::Array1::<f64>::zeros(ny),
            y0: ndarray::Array1::<f64>::zeros(nx),
            y1: ndarray::Array1::<f64>::zeros(nx),
        }
    }

    /// The `(x, y)` edge coefficients `(c·dt - d) / (c·dt + d)`.
    #[inline]
    pub fn reflection_coefficients(&self) -> (f64, f64) {
        (self.coef_x, self.coef_y)
    }
}
impl Boundary for MurBoundary {
    fn capture(&mut self, ez: ndarray::ArrayView2<f64>) {
        let (nx, ny) = ez.dim();

        self.x0.assign(&ez.row(1));
        self.x1.assign(&ez.row(nx-2));
        self.y0.assign(&ez.column(1));
        self.y1.assign(&ez.column(ny-2));
    }

    fn apply(&self, mut ez: ndarray::ArrayViewMut2<f64>) {
        let (nx, ny) = ez.dim();

        // x edges first, the y edges then see the new corner values
        let next = &self.x0 + &((&ez.row(1) - &ez.row(0)) * self.coef_x);
        ez.row_mut(0).assign(&next);
        let next = &self.x1 + &((&ez.row(nx-2) - &ez.row(nx-1)) * self.coef_x);
        ez.row_mut(nx-1).assign(&next);

        let next = &self.y0 + &((&ez.column(1) - &ez.column(0)) * self.coef_y);
        ez.column_mut(0).assign(&next);
        let next = &self.y1 + &((&ez.column(ny-2) - &ez.column(ny-1)) * self.coef_y);
        ez.column_mut(ny-1).assign(&next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn unit_params(delta: f64) -> SimulationParameters {
        SimulationParameters { delta_x: delta, delta_y: delta, delta_t: 1.0 }
    }

    #[test]
    fn capture_takes_edge_adjacent_lines() {
        let ez = ndarray::Array2::from_shape_fn((4, 5), |(i, j)| (10*i + j) as f64);
        let mut boundary = MurBoundary::new((4, 5), &unit_params(1.0), 1.0);

        boundary.capture(ez.view());

        assert_eq!(boundary.x0, array![10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(boundary.x1, array![20.0, 21.0, 22.0, 23.0, 24.0]);
        assert_eq!(boundary.y0, array![1.0, 11.0, 21.0, 31.0]);
        assert_eq!(boundary.y1, array![3.0, 13.0, 23.0, 33.0]);
    }

    #[test]
    fn x_edges_are_applied_before_y_edges() {
        // c·dt = 1, d = 3 gives a coefficient of exactly -0.5
        let boundary = MurBoundary::new((3, 3), &unit_params(3.0), 1.0);
        assert_eq!(boundary.reflection_coefficients(), (-0.5, -0.5));
        let mut ez = array![
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ];

        boundary.apply(ez.view_mut());

        assert_eq!(ez, array![
            [0.0, -1.5, 0.0],
            [-0.5, 5.0, 0.5],
            [0.0, 1.5, 0.0],
        ]);
    }

    #[test]
    fn matched_step_passes_snapshot_through() {
        let boundary_params = unit_params(1.0);
        let mut boundary = MurBoundary::new((4, 4), &boundary_params, 1.0);
        assert_eq!(boundary.reflection_coefficients(), (0.0, 0.0));

        let previous = ndarray::Array2::from_shape_fn((4, 4), |(i, j)| (i + 4*j) as f64);
        boundary.capture(previous.view());

        let mut ez = previous.mapv(|v| 3.0*v + 7.0);
        boundary.apply(ez.view_mut());

        // corners end up with the y snapshot since the y pass runs last
        assert_eq!(ez.row(0).slice(ndarray::s![1..3]), previous.row(1).slice(ndarray::s![1..3]));
        assert_eq!(ez.row(3).slice(ndarray::s![1..3]), previous.row(2).slice(ndarray::s![1..3]));
        assert_eq!(ez.column(0), previous.column(1));
        assert_eq!(ez.column(3), previous.column(2));
        // interior untouched
        assert_eq!(ez[[1, 1]], 3.0*previous[[1, 1]] + 7.0);
    }

    #[test]
    fn matched_step_with_physical_units() {
        let c0 = 299_792_458.0;
        let sim_params = SimulationParameters { delta_x: 1e-3, delta_y: 1e-3, delta_t: 1e-3 / c0 };
        let mut boundary = MurBoundary::new((5, 5), &sim_params, c0);
        let (coef_x, coef_y) = boundary.reflection_coefficients();
        assert!(coef_x.abs() < 1e-12);
        assert!(coef_y.abs() < 1e-12);

        let previous = ndarray::Array2::from_elem((5, 5), 1.0);
        boundary.capture(previous.view());
        let mut ez = ndarray::Array2::from_elem((5, 5), 5.0);
        boundary.apply(ez.view_mut());

        for &edge in ez.row(0).iter().chain(ez.column(4).iter()) {
            assert!((edge - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn snapshot_lags_one_capture_behind() {
        let sim_params = unit_params(3.0);
        let mut boundary = MurBoundary::new((3, 3), &sim_params, 1.0);

        let older = ndarray::Array2::from_elem((3, 3), 2.0);
        boundary.capture(older.view());

        // a later interior change does not reach the snapshot until the next capture
        let mut ez = ndarray::Array2::from_elem((3, 3), 2.0);
        ez[[1, 1]] = 10.0;
        boundary.apply(ez.view_mut());
        assert_eq!(ez[[0, 1]], 2.0 + -0.5*(10.0 - 2.0));

        boundary.capture(ez.view());
        assert_eq!(boundary.x0[1], 10.0);
    }

    #[test]
    fn zero_field_stays_zero() {
        let boundary = MurBoundary::new((6, 6), &unit_params(2.0), 1.0);
        let mut ez = ndarray::Array2::<f64>::zeros((6, 6));

        boundary.apply(ez.view_mut());

        assert!(ez.iter().all(|&v| v == 0.0));
    }
}
