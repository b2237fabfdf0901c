//! Blocking SPI driver for 25LC256-class EEPROMs.
//!
//! This crate provides the persistent storage backend for the switchback
//! loop switcher: a 32 KiB SPI EEPROM holding presets, footswitch
//! configurations, and the device state.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — Low-level SPI command primitives that
//!   handle chip-select framing, the write-enable latch, and the
//!   write-in-progress busy wait.
//! - **[`Eeprom25lc256`]** (public) — Validated, high-level API for reading
//!   and writing bytes at 15-bit addresses.
//!
//! # Quick start
//!
//! ```ignore
//! use eeprom_driver::Eeprom25lc256;
//!
//! // Construct with any `embedded-hal` SPI bus and chip-select pin
//! let mut eeprom = Eeprom25lc256::new(spi, cs);
//!
//! let value = eeprom.read_byte(0x0000)?;
//! eeprom.write_byte(0x0000, 0x01)?;
//! ```
//!
//! [`Eeprom25lc256`] implements [`switchback::storage::ByteStore`], so it
//! plugs directly into the preset engine's storage layer.
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![no_std]

pub use eeprom::Eeprom25lc256;
pub use error::EepromError;
pub use opcodes::{MEMORY_SIZE, PAGE_SIZE};

mod driver;
mod eeprom;
mod error;
mod opcodes;
