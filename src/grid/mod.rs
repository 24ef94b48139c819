//! Dense 2D rasters and the world-space coordinate grids they are sampled on.
//!
//! Every layer the generator produces is a [`Field`] with exactly the shape of
//! the [`CoordGrid`] it was computed from.

mod coords;
mod field;

pub use coords::{CoordGrid, GridSpacing};
pub use field::Field;

use thiserror::Error;

/// Errors raised when arrays handed to the generator disagree in shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("shape mismatch for {what}: expected {expected_width}x{expected_height}, got {found_width}x{found_height}")]
    ShapeMismatch {
        what: &'static str,
        expected_width: usize,
        expected_height: usize,
        found_width: usize,
        found_height: usize,
    },
    #[error("buffer for {what} holds {found} values but a {width}x{height} field needs {expected}")]
    LengthMismatch {
        what: &'static str,
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },
}
