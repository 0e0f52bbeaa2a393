//! Sources and boundaries.

mod mur_boundary;
mod point_source;

pub use mur_boundary::MurBoundary;
pub use point_source::PointSource;
