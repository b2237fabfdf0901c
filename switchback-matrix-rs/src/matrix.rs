//! High-level interface for the MT8816 crosspoint switch.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use switchback::routing::CrosspointMatrix;

use crate::error::MatrixError;

/// Number of Y lines (rows).
pub const MATRIX_ROWS: u8 = 8;

/// Number of X lines (columns).
pub const MATRIX_COLUMNS: u8 = 16;

/// Address-setup and strobe-width margin in nanoseconds. The datasheet
/// minimums are tens of nanoseconds; this stays comfortably above them.
const STROBE_PULSE_NS: u32 = 100;

/// Minimum RESET pulse width in nanoseconds, with margin.
const RESET_PULSE_NS: u32 = 100;

/// The MT8816 parallel control interface.
///
/// All pins share one GPIO type so the driver stays generic over a
/// single pin error.
pub struct ControlPins<P> {
    /// X address, AX0 first (column, 4 bits).
    pub ax: [P; 4],
    /// Y address, AY0 first (row, 3 bits).
    pub ay: [P; 3],
    /// State latched into the addressed crosspoint on STROBE.
    pub data: P,
    /// Active-high latch pulse.
    pub strobe: P,
    /// Active-high, opens all 128 switches.
    pub reset: P,
}

/// High-level interface for the MT8816 analog crosspoint switch.
///
/// Provides validated, blocking crosspoint programming.
///
/// # Example
///
/// ```ignore
/// use matrix_driver::{ControlPins, Mt8816};
///
/// let mut matrix = Mt8816::new(pins, delay);
///
/// matrix.clear_all()?;
/// matrix.set_switch(3, 11, true)?;
/// ```
pub struct Mt8816<P, D> {
    pins: ControlPins<P>,
    delay: D,
}

impl<P, D> Mt8816<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new matrix interface.
    ///
    /// Pins are assumed already configured as outputs with STROBE and
    /// RESET low.
    pub fn new(pins: ControlPins<P>, delay: D) -> Self {
        Self { pins, delay }
    }

    /// Close or open a single crosspoint.
    ///
    /// # Arguments
    /// * `row` — Y line (0–7)
    /// * `column` — X line (0–15)
    /// * `on` — `true` closes the switch, `false` opens it
    ///
    /// # Errors
    /// * [`MatrixError::InvalidCrosspoint`] if the address is outside the grid
    /// * [`MatrixError::Pin`] on GPIO failure
    pub fn set_switch(
        &mut self,
        row: u8,
        column: u8,
        on: bool,
    ) -> Result<(), MatrixError<P::Error>> {
        if row >= MATRIX_ROWS || column >= MATRIX_COLUMNS {
            return Err(MatrixError::InvalidCrosspoint);
        }

        self.set_address(row, column)?;
        set_level(&mut self.pins.data, on)?;

        // Address and data must be stable before the strobe edge.
        self.delay.delay_ns(STROBE_PULSE_NS);
        self.pulse_strobe()
    }

    /// Open every crosspoint at once via the RESET pin.
    pub fn clear_all(&mut self) -> Result<(), MatrixError<P::Error>> {
        self.pins.reset.set_high()?;
        self.delay.delay_ns(RESET_PULSE_NS);
        self.pins.reset.set_low()?;
        Ok(())
    }

    fn set_address(&mut self, row: u8, column: u8) -> Result<(), MatrixError<P::Error>> {
        for (bit, pin) in self.pins.ax.iter_mut().enumerate() {
            set_level(pin, column & (1 << bit) != 0)?;
        }
        for (bit, pin) in self.pins.ay.iter_mut().enumerate() {
            set_level(pin, row & (1 << bit) != 0)?;
        }
        Ok(())
    }

    fn pulse_strobe(&mut self) -> Result<(), MatrixError<P::Error>> {
        self.pins.strobe.set_high()?;
        self.delay.delay_ns(STROBE_PULSE_NS);
        self.pins.strobe.set_low()?;
        Ok(())
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<P, D> CrosspointMatrix for Mt8816<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = MatrixError<P::Error>;

    fn set_switch(&mut self, row: u8, column: u8, on: bool) -> Result<(), Self::Error> {
        Mt8816::set_switch(self, row, column, on)
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        Mt8816::clear_all(self)
    }
}
