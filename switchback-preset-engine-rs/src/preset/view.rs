//! Flattened, UI-facing projection of a [`Preset`].
//!
//! The menu layer never touches a `Preset` directly: it reads a
//! [`PresetView`] snapshot, edits the copy, and hands it back to
//! [`PresetManager::apply_preset_view`](crate::manager::PresetManager::apply_preset_view)
//! which applies the edits and persists in one step.

use heapless::Vec;

use super::midi_message::{MidiMessage, NO_DATA_BYTE2};
use super::preset::Preset;
use super::{MAX_LOOPS, MAX_MIDI_MESSAGES};

/// One loop row in the view: index, active flag, chain position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopView {
    /// Loop slot index in the preset.
    pub index: u8,
    /// Whether the loop is in the signal chain.
    pub is_active: bool,
    /// Chain position, meaningful while active.
    pub order: u8,
}

/// One MIDI message row in the view, with the status byte unpacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiMessageView {
    /// Message kind nibble (e.g. `0xB0`, `0xC0`).
    pub kind: u8,
    /// Channel nibble.
    pub channel: u8,
    /// First data byte.
    pub data1: u8,
    /// Second data byte; only meaningful when `has_data2` is set.
    pub data2: u8,
    /// Whether the message carries a second data byte.
    pub has_data2: bool,
}

/// Flattened snapshot of a preset for the menu layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresetView {
    /// One row per loop slot.
    pub loops: Vec<LoopView, MAX_LOOPS>,
    /// One row per MIDI message.
    pub midi_messages: Vec<MidiMessageView, MAX_MIDI_MESSAGES>,
}

impl PresetView {
    /// Build a snapshot of `preset`.
    pub fn from_preset(preset: &Preset) -> Self {
        let mut view = Self::default();

        for (i, l) in preset.loops().iter().enumerate() {
            // Cannot overflow: both sides share MAX_LOOPS capacity.
            let _ = view.loops.push(LoopView {
                index: i as u8,
                is_active: l.state,
                order: l.order,
            });
        }

        for m in preset.midi_messages() {
            let _ = view.midi_messages.push(MidiMessageView {
                kind: m.kind(),
                channel: m.channel(),
                data1: m.data1(),
                data2: m.data2().unwrap_or(0),
                has_data2: m.has_data2(),
            });
        }

        view
    }

    /// Apply the (possibly edited) view back onto `preset`.
    ///
    /// Loop rows address their slot through `index`, so reordering the
    /// rows in the UI does not corrupt the mapping. The MIDI list is
    /// replaced wholesale — row count changes (add/remove in the menu)
    /// take effect here. Send/return wiring is untouched: it is not part
    /// of the view.
    pub fn apply_to(&self, preset: &mut Preset) {
        for row in &self.loops {
            if let Some(l) = preset.loop_at_mut(row.index) {
                l.state = row.is_active;
                l.order = row.order;
            }
        }

        // Rebuild the MIDI list from the rows.
        while preset.midi_messages_count() > 0 {
            preset.remove_midi_message(preset.midi_messages_count() - 1);
        }
        for row in &self.midi_messages {
            let data2 = if row.has_data2 { row.data2 } else { NO_DATA_BYTE2 };
            preset.add_midi_message(MidiMessage::new(row.kind, row.channel, row.data1, data2));
        }
    }
}
