use heapless::Vec;

use super::loops::Loop;
use super::midi_message::MidiMessage;
use super::{MAX_LOOPS, MAX_MIDI_MESSAGES};

/// A saved configuration of active loops and MIDI messages, addressed by
/// `(bank, preset number)`.
///
/// Loop and MIDI storage are fixed-capacity inline vectors — no heap
/// allocation, bounds-checked access. The loop list length is the number
/// of loop slots the installation uses (set on bank load); the MIDI list
/// length is the number of messages the preset sends on recall.
///
/// Out-of-range indices passed to the mutation methods are silent no-ops
/// (logged when the `defmt` feature is enabled), matching the pedal's
/// reject-bad-input-and-carry-on error model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preset {
    bank: u8,
    number: u8,
    loops: Vec<Loop, MAX_LOOPS>,
    midi_messages: Vec<MidiMessage, MAX_MIDI_MESSAGES>,
}

impl Preset {
    /// Create an empty preset with the given identity.
    pub fn new(bank: u8, number: u8) -> Self {
        Self {
            bank,
            number,
            loops: Vec::new(),
            midi_messages: Vec::new(),
        }
    }

    // ── Identity ─────────────────────────────────────────────────────

    /// Bank this preset belongs to.
    pub fn bank(&self) -> u8 {
        self.bank
    }

    /// Overwrite the bank number.
    pub fn set_bank(&mut self, bank: u8) {
        self.bank = bank;
    }

    /// Preset number within the bank.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Overwrite the preset number.
    pub fn set_number(&mut self, number: u8) {
        self.number = number;
    }

    // ── Loops ────────────────────────────────────────────────────────

    /// All loop slots as a slice.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Number of loop slots in use.
    pub fn loops_count(&self) -> u8 {
        self.loops.len() as u8
    }

    /// Resize the loop list to `count` slots, clamped to [`MAX_LOOPS`].
    ///
    /// New slots are default-constructed (bypassed, order 0). Shrinking
    /// discards the tail.
    pub fn set_loops_count(&mut self, count: u8) {
        let count = (count as usize).min(MAX_LOOPS);
        // Cannot fail: count is clamped to the capacity.
        let _ = self.loops.resize_default(count);
    }

    /// Immutable access to one loop slot.
    pub fn loop_at(&self, index: u8) -> Option<&Loop> {
        self.loops.get(index as usize)
    }

    /// Mutable access to one loop slot.
    pub fn loop_at_mut(&mut self, index: u8) -> Option<&mut Loop> {
        self.loops.get_mut(index as usize)
    }

    /// Append a loop slot. Returns `false` when the preset is full.
    pub fn add_loop(&mut self, l: Loop) -> bool {
        self.loops.push(l).is_ok()
    }

    /// Toggle one loop between active and bypassed.
    pub fn toggle_loop_state(&mut self, index: u8) {
        match self.loops.get_mut(index as usize) {
            Some(l) => l.toggle(),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("toggle_loop_state: loop {} out of range", index);
            }
        }
    }

    /// Index of the loop whose `order` field equals `order`, or `None`.
    ///
    /// Linear scan over all slots; the first match wins.
    pub fn loop_index_by_order(&self, order: u8) -> Option<u8> {
        self.loops
            .iter()
            .position(|l| l.order == order)
            .map(|i| i as u8)
    }

    /// Swap the `order` values of two loops.
    ///
    /// Self-inverse: applying the same swap twice restores both orders.
    /// Out-of-range indices make the call a logged no-op with neither
    /// loop modified.
    pub fn swap_loop_orders(&mut self, a: u8, b: u8) {
        let (a, b) = (a as usize, b as usize);
        if a >= self.loops.len() || b >= self.loops.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!("swap_loop_orders: index out of range ({}, {})", a, b);
            return;
        }
        let order_a = self.loops[a].order;
        self.loops[a].order = self.loops[b].order;
        self.loops[b].order = order_a;
    }

    /// Bind one loop slot to its physical matrix send column / return row.
    ///
    /// Installation-time operation; not part of per-preset editing.
    pub fn set_loop_io(&mut self, index: u8, send: u8, ret: u8) {
        if let Some(l) = self.loops.get_mut(index as usize) {
            l.send = send;
            l.ret = ret;
        }
    }

    // ── MIDI messages ────────────────────────────────────────────────

    /// All MIDI messages as a slice.
    pub fn midi_messages(&self) -> &[MidiMessage] {
        &self.midi_messages
    }

    /// Number of MIDI messages in the preset.
    pub fn midi_messages_count(&self) -> u8 {
        self.midi_messages.len() as u8
    }

    /// Immutable access to one MIDI message.
    pub fn midi_message_at(&self, index: u8) -> Option<&MidiMessage> {
        self.midi_messages.get(index as usize)
    }

    /// Append a MIDI message. Returns `false` when the list is full
    /// ([`MAX_MIDI_MESSAGES`] entries).
    pub fn add_midi_message(&mut self, message: MidiMessage) -> bool {
        match self.midi_messages.push(message) {
            Ok(()) => true,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("add_midi_message: message list full");
                false
            }
        }
    }

    /// Remove the MIDI message at `index`, shifting all later messages
    /// down by one and decrementing the count.
    ///
    /// Relative order of the remaining messages is preserved.
    pub fn remove_midi_message(&mut self, index: u8) {
        if (index as usize) < self.midi_messages.len() {
            self.midi_messages.remove(index as usize);
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("remove_midi_message: index {} out of range", index);
        }
    }

    /// Overwrite the MIDI message at `index` in place.
    pub fn set_midi_message(&mut self, index: u8, message: MidiMessage) {
        match self.midi_messages.get_mut(index as usize) {
            Some(slot) => *slot = message,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("set_midi_message: index {} out of range", index);
            }
        }
    }
}
