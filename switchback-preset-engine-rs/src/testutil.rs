//! Test doubles shared across the unit test modules.

use core::convert::Infallible;

use crate::storage::ByteStore;

/// Capacity matching the 25LC256 part the pedal ships with.
const SIZE: usize = 0x8000;

/// In-memory [`ByteStore`] for tests.
pub struct MemStore {
    data: [u8; SIZE],
}

impl MemStore {
    /// Zero-filled store.
    pub fn new() -> Self {
        Self { data: [0u8; SIZE] }
    }

    /// `0xFF`-filled store — what a factory-fresh EEPROM reads.
    pub fn blank() -> Self {
        Self {
            data: [0xFFu8; SIZE],
        }
    }
}

impl ByteStore for MemStore {
    type Error = Infallible;

    fn read_byte(&mut self, address: u16) -> Result<u8, Self::Error> {
        Ok(self.data[address as usize])
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Self::Error> {
        self.data[address as usize] = value;
        Ok(())
    }
}
