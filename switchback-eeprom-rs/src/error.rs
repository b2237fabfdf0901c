//! Error types for the EEPROM driver.

use core::fmt;

/// Errors that can occur when communicating with the EEPROM.
///
/// Generic over the SPI bus error and the chip-select pin error so the
/// driver works with any `embedded-hal` implementation.
#[derive(Debug)]
pub enum EepromError<SpiE, PinE> {
    /// Underlying SPI bus error.
    Spi(SpiE),

    /// Chip-select pin error.
    Pin(PinE),

    /// Address beyond the 32 KiB capacity (must be < 0x8000).
    AddressOutOfRange,
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for EepromError<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EepromError::Spi(e) => write!(f, "SPI error: {:?}", e),
            EepromError::Pin(e) => write!(f, "chip-select pin error: {:?}", e),
            EepromError::AddressOutOfRange => {
                write!(f, "address out of range (must be < 0x8000)")
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<SpiE: defmt::Format, PinE: defmt::Format> defmt::Format for EepromError<SpiE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EepromError::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            EepromError::Pin(e) => defmt::write!(f, "chip-select pin error: {}", e),
            EepromError::AddressOutOfRange => defmt::write!(f, "address out of range"),
        }
    }
}
