//! Preset persistence and signal-routing engine for the switchback
//! multi-loop effects switcher.
//!
//! This crate is the hardware-independent core of the pedal firmware. It
//! owns the in-memory data model (presets, loops, MIDI messages, footswitch
//! configurations), the byte-exact EEPROM serialization format, the
//! bank/preset lifecycle, and the algorithm that turns an ordered set of
//! active loops into crosspoint-matrix connections.
//!
//! # Architecture
//!
//! ```text
//! preset    — entities: Loop, MidiMessage, Preset, FootSwitchConfig,
//!             PresetView (the UI-facing projection)
//! storage   — ByteStore trait, EEPROM memory map, preset codec,
//!             PresetStorage (addressed load/save)
//! manager   — PresetManager: bank/preset navigation, mutation,
//!             footswitch dispatch
//! routing   — CrosspointMatrix trait, SignalRouter chain builder
//! ```
//!
//! Hardware access goes through two traits: [`storage::ByteStore`] (the
//! EEPROM) and [`routing::CrosspointMatrix`] (the switch matrix). The
//! `eeprom-driver` and `matrix-driver` sibling crates provide the real
//! implementations; tests use in-memory doubles.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Collections are `heapless::Vec` with compile-time
//! capacity; everything else is fixed arrays and const tables. The
//! optional `defmt` feature enables structured logging for embedded
//! targets.

#![no_std]

pub mod manager;
pub mod preset;
pub mod routing;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;
