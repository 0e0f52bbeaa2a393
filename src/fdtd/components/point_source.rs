use crate::fdtd::Source;

/// A soft source adding `source_fn(t)` to a single Ez cell.
pub struct PointSource<Fs> where Fs: Fn(f64)->f64 {
    pub source_fn: Fs,
    /// `(i, j)` index of the driven cell.
    pub position: (usize, usize),
}
impl<Fs> PointSource<Fs> where Fs: Fn(f64)->f64 {
    /// Places the source at `(nx/2, ny/2)`.
    #[inline]
    pub fn centered(shape: (usize, usize), source_fn: Fs) -> Self {
        Self {
            source_fn,
            position: (shape.0 / 2, shape.1 / 2),
        }
    }
}
impl<Fs> Source for PointSource<Fs> where Fs: Fn(f64)->f64 {
    fn inject(&self, mut ez: ndarray::ArrayViewMut2<f64>, time: f64) {
        let (i, j) = self.position;
        ez[[i, j]] += self.generate(time);
    }

    fn generate(&self, time: f64) -> f64 {
        (self.source_fn)(time)
    }
}
