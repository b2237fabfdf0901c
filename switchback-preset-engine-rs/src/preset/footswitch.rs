use super::midi_message::MidiMessage;
use super::FOOT_SWITCH_MIDI_MESSAGES;

/// Behavior bound to a physical footswitch press.
///
/// Discriminants are the wire values stored in the footswitch config
/// records on EEPROM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FootSwitchMode {
    /// Switch does nothing.
    #[default]
    None = 0,
    /// Toggle one loop in the current preset.
    ToggleLoop = 1,
    /// Transmit the embedded MIDI messages.
    SendMidiMessage = 2,
    /// Navigate banks: target 0 = down, anything else = up.
    BankSelect = 3,
    /// Recall a preset within the current bank.
    PresetSelect = 4,
    /// Disconnect the whole signal chain.
    Mute = 5,
}

impl FootSwitchMode {
    /// Decode a wire byte. Unknown values decode as [`None`](Self::None)
    /// so a blank or corrupted EEPROM record still loads.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Self::ToggleLoop,
            2 => Self::SendMidiMessage,
            3 => Self::BankSelect,
            4 => Self::PresetSelect,
            5 => Self::Mute,
            _ => Self::None,
        }
    }

    /// Encode as the wire byte.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Per-footswitch behavior configuration.
///
/// One record per physical switch per bank. Only the fields relevant to
/// the configured mode are meaningful: `loop_index` for `ToggleLoop`,
/// `target_bank`/`target_preset` for the navigation modes, and
/// `midi_messages` for `SendMidiMessage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FootSwitchConfig {
    /// What a press of this switch does.
    pub mode: FootSwitchMode,
    /// Latching (toggle) vs momentary behavior.
    pub latching: bool,
    /// Loop toggled by `ToggleLoop` mode.
    pub loop_index: u8,
    /// Bank direction selector for `BankSelect` (0 = down, else up).
    pub target_bank: u8,
    /// Preset recalled by `PresetSelect`.
    pub target_preset: u8,
    /// Messages transmitted by `SendMidiMessage`.
    pub midi_messages: [MidiMessage; FOOT_SWITCH_MIDI_MESSAGES],
}

impl FootSwitchConfig {
    /// Create a configuration with the given mode and all other fields
    /// at their defaults.
    pub fn new(mode: FootSwitchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set one of the embedded MIDI messages. Out-of-range slots are a
    /// logged no-op.
    pub fn set_midi_message(&mut self, slot: u8, message: MidiMessage) {
        match self.midi_messages.get_mut(slot as usize) {
            Some(m) => *m = message,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("set_midi_message: slot {} out of range", slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_wire_byte() {
        for mode in [
            FootSwitchMode::None,
            FootSwitchMode::ToggleLoop,
            FootSwitchMode::SendMidiMessage,
            FootSwitchMode::BankSelect,
            FootSwitchMode::PresetSelect,
            FootSwitchMode::Mute,
        ] {
            assert_eq!(FootSwitchMode::from_byte(mode.as_byte()), mode);
        }
    }

    #[test]
    fn unknown_mode_byte_decodes_as_none() {
        assert_eq!(FootSwitchMode::from_byte(6), FootSwitchMode::None);
        // Blank EEPROM reads 0xFF.
        assert_eq!(FootSwitchMode::from_byte(0xFF), FootSwitchMode::None);
    }

    #[test]
    fn set_midi_message_respects_slot_bounds() {
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::SendMidiMessage);
        let msg = MidiMessage::new(0xB0, 1, 23, 64);
        cfg.set_midi_message(1, msg);
        assert_eq!(cfg.midi_messages[1], msg);

        cfg.set_midi_message(2, MidiMessage::default());
        assert_eq!(cfg.midi_messages[1], msg);
    }
}
