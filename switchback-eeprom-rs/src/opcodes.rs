//! Instruction opcodes and geometry constants for 25LC256-class EEPROMs.
//!
//! Every transaction starts with a one-byte opcode while chip select is
//! held low. READ and WRITE are followed by a 16-bit big-endian address
//! (the chip decodes the low 15 bits).

// ---------------------------------------------------------------------------
// Instruction opcodes
// ---------------------------------------------------------------------------

/// Read data from memory starting at the given address.
pub const READ: u8 = 0x03;

/// Write data to memory starting at the given address.
pub const WRITE: u8 = 0x02;

/// Set the write-enable latch. Required before every WRITE; the chip
/// clears the latch itself when the write cycle completes.
pub const WREN: u8 = 0x06;

/// Reset the write-enable latch (not used in v1).
#[allow(dead_code)]
pub const WRDI: u8 = 0x04;

/// Read the status register.
pub const RDSR: u8 = 0x05;

/// Write the status register (block-protection bits, not used in v1).
#[allow(dead_code)]
pub const WRSR: u8 = 0x01;

// ---------------------------------------------------------------------------
// Status register bits
// ---------------------------------------------------------------------------

/// Write-in-progress flag. Set while an internal write cycle is running;
/// the chip ignores all memory instructions until it clears.
pub const STATUS_WIP: u8 = 0x01;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Total capacity in bytes (32 KiB, addresses 0x0000–0x7FFF).
pub const MEMORY_SIZE: u16 = 0x8000;

/// Internal page size in bytes. Writes that cross a page boundary wrap
/// within the page, which is why this driver writes one byte at a time.
pub const PAGE_SIZE: u16 = 64;
