//! High-level interface for 25LC256-class SPI EEPROMs.
//!
//! [`Eeprom25lc256`] wraps the low-level command driver with address
//! validation and the write-enable/busy-wait sequencing every write
//! needs, and implements [`ByteStore`] so the preset engine can use it
//! directly.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use switchback::storage::ByteStore;

use crate::driver::SpiCommandDriver;
use crate::error::EepromError;
use crate::opcodes::MEMORY_SIZE;

/// High-level interface for a 25LC256-class SPI EEPROM.
///
/// Provides validated, blocking byte reads and writes at 15-bit
/// addresses.
///
/// # Example
///
/// ```ignore
/// use eeprom_driver::Eeprom25lc256;
///
/// // `spi` is any `embedded-hal` SPI bus, `cs` any output pin
/// let mut eeprom = Eeprom25lc256::new(spi, cs);
///
/// let state = eeprom.read_byte(0x0000)?;
/// eeprom.write_byte(0x0000, state + 1)?;
/// ```
pub struct Eeprom25lc256<SPI, CS> {
    driver: SpiCommandDriver<SPI, CS>,
}

impl<SPI, CS> Eeprom25lc256<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a new EEPROM interface.
    ///
    /// # Arguments
    /// * `spi` — SPI bus (takes ownership for exclusive access)
    /// * `cs` — chip-select pin, assumed already configured high
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            driver: SpiCommandDriver::new(spi, cs),
        }
    }

    /// Read a single byte.
    ///
    /// # Errors
    /// * [`EepromError::AddressOutOfRange`] if `address >= 0x8000`
    /// * [`EepromError::Spi`] / [`EepromError::Pin`] on bus failure
    pub fn read_byte(
        &mut self,
        address: u16,
    ) -> Result<u8, EepromError<SPI::Error, CS::Error>> {
        if address >= MEMORY_SIZE {
            return Err(EepromError::AddressOutOfRange);
        }

        let mut value = [0u8; 1];
        self.driver.read_at(address, &mut value)?;
        Ok(value[0])
    }

    /// Sequential read of `buffer.len()` bytes starting at `address`.
    ///
    /// One transaction regardless of length; the whole span must fit
    /// below the 32 KiB capacity.
    pub fn read(
        &mut self,
        address: u16,
        buffer: &mut [u8],
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        let end = (address as usize) + buffer.len();
        if end > MEMORY_SIZE as usize {
            return Err(EepromError::AddressOutOfRange);
        }

        self.driver.read_at(address, buffer)
    }

    /// Write a single byte and wait for the internal write cycle to
    /// finish.
    ///
    /// Latches write enable, issues the write, then polls the status
    /// register until the chip accepts instructions again. Blocks for up
    /// to one write cycle (5 ms).
    ///
    /// # Errors
    /// * [`EepromError::AddressOutOfRange`] if `address >= 0x8000`
    /// * [`EepromError::Spi`] / [`EepromError::Pin`] on bus failure
    pub fn write_byte(
        &mut self,
        address: u16,
        value: u8,
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        if address >= MEMORY_SIZE {
            return Err(EepromError::AddressOutOfRange);
        }

        self.driver.write_enable()?;
        self.driver.write_byte_at(address, value)?;
        self.driver.wait_while_busy()
    }
}

impl<SPI, CS> ByteStore for Eeprom25lc256<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = EepromError<SPI::Error, CS::Error>;

    fn read_byte(&mut self, address: u16) -> Result<u8, Self::Error> {
        Eeprom25lc256::read_byte(self, address)
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Self::Error> {
        Eeprom25lc256::write_byte(self, address, value)
    }
}
