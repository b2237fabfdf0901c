//! EEPROM persistence: the byte store seam, the memory map, and the
//! preset codec.
//!
//! # Memory map
//!
//! ```text
//! Address              Field                Notes
//! ---------------------------------------------------------------------
//! 0x0000               last bank            device state, 1 byte
//! 0x0001               last preset          device state, 1 byte
//! 0x0080 + s * 128     preset slot s        s = bank * 4 + preset index
//!   slot byte 0          bank
//!   slot byte 1          preset number
//!   slot byte 2          loops count
//!   slot byte 3          MIDI messages count
//!   slot byte 4..        loop records         4 bytes each:
//!                                             state, order, send, return
//!   after loop records   MIDI records         3 bytes each:
//!                                             status, data1, data2
//! 0x2080 + c * 11      footswitch config c  c = bank * 6 + switch index
//!   byte 0               mode
//!   byte 1               latching
//!   byte 2               loop index
//!   byte 3               target bank
//!   byte 4               target preset
//!   byte 5..10           2 × 3 MIDI bytes
//! ---------------------------------------------------------------------
//! ```
//!
//! MIDI records start immediately after the loop records, not at a fixed
//! offset: their position depends on the loop count, so a slot holds up
//! to 16 loops or up to 20 messages but always fits in 128 bytes. The
//! codec rejects any combination that would not
//! ([`CodecError::SlotOverflow`]) instead of overrunning into the next
//! slot.

mod codec;
mod memory;

pub use codec::{
    deserialize_foot_switch_config, deserialize_preset, serialize_foot_switch_config,
    serialize_preset, CodecError,
};
pub use memory::{PresetStorage, StorageError};

/// Address of the 2-byte device state record (last bank, last preset).
pub const DEVICE_STATE_ADDRESS: u16 = 0x0000;

/// First byte of the preset slot region.
pub const BANKS_START_ADDRESS: u16 = 0x0080;

/// Size of one preset slot in bytes.
pub const PRESET_SLOT_SIZE: usize = 128;

/// Presets per bank.
pub const PRESETS_PER_BANK: u8 = 4;

/// Number of banks.
pub const MAX_BANKS: u8 = 16;

/// Physical footswitches per bank.
pub const FOOT_SWITCH_COUNT: u8 = 6;

/// Size of one footswitch config record in bytes.
pub const FOOT_SWITCH_CONFIG_SIZE: usize = 11;

/// First byte of the footswitch config region — directly after the last
/// preset slot (`0x0080 + 16 * 4 * 128`).
pub const FOOT_SWITCH_START_ADDRESS: u16 =
    BANKS_START_ADDRESS + (MAX_BANKS as u16) * (PRESETS_PER_BANK as u16) * (PRESET_SLOT_SIZE as u16);

/// Byte-addressable persistent storage.
///
/// The codec's only collaborator: the EEPROM driver implements this, and
/// tests substitute an in-memory array. Busy-waiting on the hardware
/// write-in-progress status is the implementor's concern — by the time a
/// call returns, the transfer is complete.
pub trait ByteStore {
    /// Bus-level error type, propagated as fatal by the storage layer.
    type Error;

    /// Read one byte.
    fn read_byte(&mut self, address: u16) -> Result<u8, Self::Error>;

    /// Write one byte.
    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Self::Error>;
}
