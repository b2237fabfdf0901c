//! Low-level SPI command driver.
//!
//! Implements the chip-select framed transactions of the 25LC256
//! instruction set, including the write-enable latch and the
//! write-in-progress busy wait.
//!
//! This module is crate-private — consumers interact with
//! [`Eeprom25lc256`](crate::Eeprom25lc256) in `eeprom.rs` instead.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::error::EepromError;
use crate::opcodes::{RDSR, READ, STATUS_WIP, WREN, WRITE};

/// Low-level SPI command driver.
///
/// Owns the SPI bus and the chip-select pin and provides one-command
/// transaction primitives. Chip select is active-low and must frame every
/// instruction, so all bus access goes through [`transaction`](Self::transaction).
pub(crate) struct SpiCommandDriver<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiCommandDriver<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a new command driver.
    ///
    /// # Arguments
    /// * `spi` — SPI bus (takes ownership for exclusive access)
    /// * `cs` — chip-select pin, driven low during transactions
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    // -----------------------------------------------------------------------
    // Core protocol primitive
    // -----------------------------------------------------------------------

    /// Run one chip-select framed transaction: write `command`, then read
    /// `response` if it is non-empty.
    ///
    /// The chip is always deselected before returning, even when the bus
    /// errors mid-transaction, so a failed command cannot leave the next
    /// one framed inside it.
    fn transaction(
        &mut self,
        command: &[u8],
        response: &mut [u8],
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(EepromError::Pin)?;

        let result = self.transfer(command, response);
        let deselect = self.cs.set_high().map_err(EepromError::Pin);

        result?;
        deselect
    }

    fn transfer(
        &mut self,
        command: &[u8],
        response: &mut [u8],
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        self.spi.write(command).map_err(EepromError::Spi)?;
        if !response.is_empty() {
            self.spi.read(response).map_err(EepromError::Spi)?;
        }
        // Drain the bus before chip select is released.
        self.spi.flush().map_err(EepromError::Spi)
    }

    // -----------------------------------------------------------------------
    // Instruction helpers
    // -----------------------------------------------------------------------

    /// Sequential read starting at `address`. The chip streams consecutive
    /// bytes for as long as clocks arrive, so one transaction fills the
    /// whole buffer.
    pub fn read_at(
        &mut self,
        address: u16,
        buffer: &mut [u8],
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        let [hi, lo] = address.to_be_bytes();
        self.transaction(&[READ, hi, lo], buffer)
    }

    /// Set the write-enable latch. The chip drops any WRITE that is not
    /// immediately preceded by this.
    pub fn write_enable(&mut self) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        self.transaction(&[WREN], &mut [])
    }

    /// Write a single byte at `address`. Caller must have latched write
    /// enable first and should busy-wait afterwards.
    pub fn write_byte_at(
        &mut self,
        address: u16,
        value: u8,
    ) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        let [hi, lo] = address.to_be_bytes();
        self.transaction(&[WRITE, hi, lo, value], &mut [])
    }

    /// Read the status register.
    pub fn read_status(&mut self) -> Result<u8, EepromError<SPI::Error, CS::Error>> {
        let mut status = [0u8; 1];
        self.transaction(&[RDSR], &mut status)?;
        Ok(status[0])
    }

    /// Poll the status register until the internal write cycle finishes.
    ///
    /// Write cycles take up to 5 ms; the chip ignores memory instructions
    /// for the duration, so every write path ends here.
    pub fn wait_while_busy(&mut self) -> Result<(), EepromError<SPI::Error, CS::Error>> {
        while self.read_status()? & STATUS_WIP != 0 {}
        Ok(())
    }
}
