//! Error types for the matrix driver.

use core::fmt;

/// Errors that can occur when programming the crosspoint matrix.
#[derive(Debug)]
pub enum MatrixError<E> {
    /// Underlying GPIO pin error.
    Pin(E),

    /// Crosspoint outside the 8×16 grid.
    InvalidCrosspoint,
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for MatrixError<E> {
    fn from(error: E) -> Self {
        MatrixError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for MatrixError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::Pin(e) => write!(f, "pin error: {:?}", e),
            MatrixError::InvalidCrosspoint => {
                write!(f, "invalid crosspoint (row must be 0-7, column 0-15)")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for MatrixError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            MatrixError::Pin(e) => defmt::write!(f, "pin error: {}", e),
            MatrixError::InvalidCrosspoint => defmt::write!(f, "invalid crosspoint"),
        }
    }
}
