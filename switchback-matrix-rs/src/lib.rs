//! GPIO driver for the MT8816 analog crosspoint switch matrix.
//!
//! The MT8816 routes any of 16 X lines to any of 8 Y lines through an
//! 8×16 grid of analog switches. The switchback loop switcher uses it to
//! wire the instrument input, effect loop sends/returns, and the output
//! into an arbitrary series chain.
//!
//! Crosspoints are programmed over a parallel control interface: 4 X
//! address pins, 3 Y address pins, a DATA pin carrying the new switch
//! state, and a STROBE pulse that latches it. RESET opens every switch
//! at once.
//!
//! # Quick start
//!
//! ```ignore
//! use matrix_driver::Mt8816;
//!
//! // All control pins are `embedded-hal` output pins of one type
//! let mut matrix = Mt8816::new(pins, delay);
//!
//! matrix.clear_all()?;
//! matrix.set_switch(0, 12, true)?; // connect Y0 to X12
//! ```
//!
//! [`Mt8816`] implements [`switchback::routing::CrosspointMatrix`], so
//! the signal router drives it directly.
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![no_std]

pub use error::MatrixError;
pub use matrix::{ControlPins, Mt8816, MATRIX_COLUMNS, MATRIX_ROWS};

mod error;
mod matrix;
