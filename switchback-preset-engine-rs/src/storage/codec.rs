//! Bit-exact translation between entities and EEPROM slot buffers.
//!
//! The preset layout is variable within a fixed-size slot: the header and
//! loop records are followed immediately by the MIDI records, wherever
//! the loop count puts them. See the memory map in
//! [`storage`](crate::storage).

use core::fmt;

use crate::preset::{
    FootSwitchConfig, FootSwitchMode, Loop, MidiMessage, Preset, FOOT_SWITCH_MIDI_MESSAGES,
    MAX_LOOPS, MAX_MIDI_MESSAGES,
};
use crate::storage::{FOOT_SWITCH_CONFIG_SIZE, PRESET_SLOT_SIZE};

/// Slot bytes before the first loop record: bank, preset number, loops
/// count, MIDI messages count.
pub const PRESET_HEADER_SIZE: usize = 4;

/// Bytes per loop record: state, order, send, return.
pub const LOOP_RECORD_SIZE: usize = 4;

/// Bytes per MIDI record: status, data1, data2.
pub const MIDI_RECORD_SIZE: usize = 3;

/// Errors from encoding or decoding a slot buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Encoded loop count exceeds [`MAX_LOOPS`].
    TooManyLoops,
    /// Encoded MIDI message count exceeds [`MAX_MIDI_MESSAGES`].
    TooManyMidiMessages,
    /// Header plus records would not fit in the slot.
    SlotOverflow,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::TooManyLoops => write!(f, "loop count exceeds capacity"),
            CodecError::TooManyMidiMessages => write!(f, "MIDI message count exceeds capacity"),
            CodecError::SlotOverflow => write!(f, "encoded preset would overflow its slot"),
        }
    }
}

/// Number of slot bytes a preset with the given counts occupies.
fn encoded_len(loops: usize, midi_messages: usize) -> usize {
    PRESET_HEADER_SIZE + loops * LOOP_RECORD_SIZE + midi_messages * MIDI_RECORD_SIZE
}

/// Validate counts against capacity and slot size.
fn check_counts(loops: usize, midi_messages: usize) -> Result<(), CodecError> {
    if loops > MAX_LOOPS {
        return Err(CodecError::TooManyLoops);
    }
    if midi_messages > MAX_MIDI_MESSAGES {
        return Err(CodecError::TooManyMidiMessages);
    }
    if encoded_len(loops, midi_messages) > PRESET_SLOT_SIZE {
        return Err(CodecError::SlotOverflow);
    }
    Ok(())
}

/// Serialize `preset` into a slot buffer.
///
/// Unused tail bytes are zeroed so a slot rewrite leaves no stale data.
pub fn serialize_preset(
    preset: &Preset,
    buffer: &mut [u8; PRESET_SLOT_SIZE],
) -> Result<(), CodecError> {
    let loops = preset.loops();
    let midi_messages = preset.midi_messages();
    check_counts(loops.len(), midi_messages.len())?;

    buffer.fill(0);
    buffer[0] = preset.bank();
    buffer[1] = preset.number();
    buffer[2] = loops.len() as u8;
    buffer[3] = midi_messages.len() as u8;

    let mut offset = PRESET_HEADER_SIZE;
    for l in loops {
        buffer[offset] = l.state as u8;
        buffer[offset + 1] = l.order;
        buffer[offset + 2] = l.send;
        buffer[offset + 3] = l.ret;
        offset += LOOP_RECORD_SIZE;
    }

    for m in midi_messages {
        buffer[offset] = m.status();
        buffer[offset + 1] = m.data1();
        buffer[offset + 2] = m.data2_raw();
        offset += MIDI_RECORD_SIZE;
    }

    Ok(())
}

/// Deserialize a slot buffer into a [`Preset`] — the exact inverse of
/// [`serialize_preset`].
///
/// Counts beyond capacity or beyond what fits in the slot are rejected,
/// never clamped into reading past the buffer.
pub fn deserialize_preset(buffer: &[u8; PRESET_SLOT_SIZE]) -> Result<Preset, CodecError> {
    let loops_count = buffer[2] as usize;
    let midi_count = buffer[3] as usize;
    check_counts(loops_count, midi_count)?;

    let mut preset = Preset::new(buffer[0], buffer[1]);

    let mut offset = PRESET_HEADER_SIZE;
    for _ in 0..loops_count {
        preset.add_loop(Loop::new(
            buffer[offset] != 0,
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ));
        offset += LOOP_RECORD_SIZE;
    }

    for _ in 0..midi_count {
        preset.add_midi_message(MidiMessage::from_bytes(
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
        ));
        offset += MIDI_RECORD_SIZE;
    }

    Ok(preset)
}

/// Serialize a footswitch configuration into its fixed 11-byte record.
pub fn serialize_foot_switch_config(
    config: &FootSwitchConfig,
    buffer: &mut [u8; FOOT_SWITCH_CONFIG_SIZE],
) {
    buffer[0] = config.mode.as_byte();
    buffer[1] = config.latching as u8;
    buffer[2] = config.loop_index;
    buffer[3] = config.target_bank;
    buffer[4] = config.target_preset;

    for (i, m) in config.midi_messages.iter().enumerate() {
        let offset = 5 + i * MIDI_RECORD_SIZE;
        buffer[offset] = m.status();
        buffer[offset + 1] = m.data1();
        buffer[offset + 2] = m.data2_raw();
    }
}

/// Deserialize a footswitch configuration from its 11-byte record.
///
/// Unknown mode bytes decode as [`FootSwitchMode::None`], so a blank
/// chip (all `0xFF`) yields inert switches rather than a load failure.
pub fn deserialize_foot_switch_config(
    buffer: &[u8; FOOT_SWITCH_CONFIG_SIZE],
) -> FootSwitchConfig {
    let mut config = FootSwitchConfig::new(FootSwitchMode::from_byte(buffer[0]));
    config.latching = buffer[1] != 0;
    config.loop_index = buffer[2];
    config.target_bank = buffer[3];
    config.target_preset = buffer[4];

    for i in 0..FOOT_SWITCH_MIDI_MESSAGES {
        let offset = 5 + i * MIDI_RECORD_SIZE;
        config.midi_messages[i] =
            MidiMessage::from_bytes(buffer[offset], buffer[offset + 1], buffer[offset + 2]);
    }

    config
}
