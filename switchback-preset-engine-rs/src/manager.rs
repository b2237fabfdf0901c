//! Bank/preset lifecycle: the in-RAM cache of the current bank, the
//! navigation and mutation operations, and footswitch dispatch.
//!
//! [`PresetManager`] is the sole owner of the loaded presets and the
//! footswitch configuration table; every mutation goes through its
//! methods. With the single-threaded polling model that ownership is the
//! only synchronization boundary the core needs.
//!
//! Invalid bank or preset indices are rejected as logged no-ops — the
//! pedal keeps playing with its current state rather than faulting on a
//! bad input. Storage failures, by contrast, propagate: the device
//! cannot function without its EEPROM.

use crate::preset::{FootSwitchConfig, FootSwitchMode, MidiMessage, Preset, PresetView};
use crate::storage::{
    ByteStore, PresetStorage, StorageError, FOOT_SWITCH_COUNT, MAX_BANKS, PRESETS_PER_BANK,
};

/// Outcome of a footswitch press that the hardware layer must act on.
///
/// The core applies state changes itself; transmitting MIDI bytes and
/// driving the matrix are the caller's side of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FootSwitchEvent {
    /// The active preset's routing changed — reconnect the matrix.
    RoutingChanged,
    /// Transmit these messages on the MIDI output.
    SendMidi([MidiMessage; 2]),
    /// Disconnect the whole signal chain.
    Muted,
}

/// Owns the current bank's presets and orchestrates load/save through
/// the codec and store.
pub struct PresetManager<S: ByteStore> {
    storage: PresetStorage<S>,
    current_bank: u8,
    current_preset_index: u8,
    bank_presets: [Preset; PRESETS_PER_BANK as usize],
    foot_switches: [FootSwitchConfig; FOOT_SWITCH_COUNT as usize],
}

impl<S: ByteStore> PresetManager<S> {
    /// Create a manager over `storage`. No I/O happens until
    /// [`initialize`](Self::initialize).
    pub fn new(storage: PresetStorage<S>) -> Self {
        Self {
            storage,
            current_bank: 0,
            current_preset_index: 0,
            bank_presets: core::array::from_fn(|_| Preset::default()),
            foot_switches: [FootSwitchConfig::default(); FOOT_SWITCH_COUNT as usize],
        }
    }

    /// Load the persisted device state and restore the last bank and
    /// preset selection.
    ///
    /// Out-of-range persisted values (a blank chip reads `0xFF`) are
    /// clamped to 0 so the device always boots to a defined selection.
    pub fn initialize(&mut self) -> Result<(), StorageError<S::Error>> {
        let (mut bank, mut preset) = self.storage.load_device_state()?;

        if bank >= MAX_BANKS {
            #[cfg(feature = "defmt")]
            defmt::warn!("initialize: persisted bank {} out of range, using 0", bank);
            bank = 0;
        }
        if preset >= PRESETS_PER_BANK {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "initialize: persisted preset {} out of range, using 0",
                preset
            );
            preset = 0;
        }

        self.set_preset_bank(bank)?;
        self.set_current_preset(preset)?;
        Ok(())
    }

    /// Write factory-default contents to every bank and reset the device
    /// state, bringing a blank chip to a bootable state.
    pub fn format_blank_device(&mut self, loops_count: u8) -> Result<(), StorageError<S::Error>> {
        for bank in 0..MAX_BANKS {
            self.storage.format_bank(bank, loops_count)?;
        }
        self.storage.save_device_state(0, 0)
    }

    /// Direct access to the storage layer for maintenance paths.
    pub fn storage_mut(&mut self) -> &mut PresetStorage<S> {
        &mut self.storage
    }

    // ── Bank navigation ──────────────────────────────────────────────

    /// Currently loaded bank.
    pub fn current_bank(&self) -> u8 {
        self.current_bank
    }

    /// Load `bank` into the cache and select its first preset.
    ///
    /// `bank >= MAX_BANKS` is a logged no-op with state unchanged.
    /// Persists the new device state on success.
    pub fn set_preset_bank(&mut self, bank: u8) -> Result<(), StorageError<S::Error>> {
        if bank >= MAX_BANKS {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_preset_bank: invalid bank {}", bank);
            return Ok(());
        }

        for index in 0..PRESETS_PER_BANK {
            self.bank_presets[index as usize] = self.storage.load_preset(bank, index)?;
        }
        for switch_index in 0..FOOT_SWITCH_COUNT {
            self.foot_switches[switch_index as usize] =
                self.storage.load_foot_switch_config(bank, switch_index)?;
        }

        self.current_bank = bank;
        self.current_preset_index = 0;

        #[cfg(feature = "defmt")]
        defmt::debug!("loaded bank {}, preset 0", bank);

        self.storage.save_device_state(self.current_bank, self.current_preset_index)
    }

    /// Go up one bank, wrapping from the last bank to bank 0.
    pub fn set_preset_bank_up(&mut self) -> Result<(), StorageError<S::Error>> {
        self.set_preset_bank((self.current_bank + 1) % MAX_BANKS)
    }

    /// Go down one bank, wrapping from bank 0 to the last bank.
    pub fn set_preset_bank_down(&mut self) -> Result<(), StorageError<S::Error>> {
        self.set_preset_bank((self.current_bank + MAX_BANKS - 1) % MAX_BANKS)
    }

    // ── Preset selection ─────────────────────────────────────────────

    /// The active preset.
    pub fn current_preset(&self) -> &Preset {
        &self.bank_presets[self.current_preset_index as usize]
    }

    /// Mutable access to the active preset.
    pub fn current_preset_mut(&mut self) -> &mut Preset {
        &mut self.bank_presets[self.current_preset_index as usize]
    }

    /// Index of the active preset within the bank.
    pub fn current_preset_index(&self) -> u8 {
        self.current_preset_index
    }

    /// Select a preset within the loaded bank and persist the selection.
    ///
    /// `index >= PRESETS_PER_BANK` is a logged no-op.
    pub fn set_current_preset(&mut self, index: u8) -> Result<(), StorageError<S::Error>> {
        if index >= PRESETS_PER_BANK {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_current_preset: invalid preset {}", index);
            return Ok(());
        }

        self.current_preset_index = index;
        self.storage.save_device_state(self.current_bank, self.current_preset_index)
    }

    /// Serialize the active preset and write it to its EEPROM slot.
    /// Bank and preset selection are untouched.
    pub fn save_current_preset(&mut self) -> Result<(), StorageError<S::Error>> {
        let preset = &self.bank_presets[self.current_preset_index as usize];
        self.storage
            .save_preset(self.current_bank, self.current_preset_index, preset)
    }

    // ── Loop operations on the active preset ─────────────────────────

    /// Toggle one loop of the active preset (in RAM only).
    pub fn toggle_loop_state(&mut self, loop_index: u8) {
        self.current_preset_mut().toggle_loop_state(loop_index);
    }

    /// Swap the chain positions of two loops. Self-inverse.
    pub fn swap_loops(&mut self, a: u8, b: u8) {
        self.current_preset_mut().swap_loop_orders(a, b);
    }

    /// Index of the active preset's loop at chain position `order`.
    pub fn loop_index_by_order(&self, order: u8) -> Option<u8> {
        self.current_preset().loop_index_by_order(order)
    }

    // ── MIDI messages on the active preset ───────────────────────────

    /// Append a MIDI message. Returns `false` when the list is full.
    pub fn add_midi_message(&mut self, message: MidiMessage) -> bool {
        self.current_preset_mut().add_midi_message(message)
    }

    /// Remove a MIDI message, compacting the list.
    pub fn remove_midi_message(&mut self, index: u8) {
        self.current_preset_mut().remove_midi_message(index);
    }

    /// Overwrite a MIDI message in place.
    pub fn set_midi_message(&mut self, index: u8, message: MidiMessage) {
        self.current_preset_mut().set_midi_message(index, message);
    }

    // ── Footswitches ─────────────────────────────────────────────────

    /// Configuration of one footswitch in the loaded bank.
    pub fn foot_switch_config(&self, switch_id: u8) -> Option<&FootSwitchConfig> {
        self.foot_switches.get(switch_id as usize)
    }

    /// Mode of one footswitch; `None`-mode for out-of-range ids.
    pub fn foot_switch_mode(&self, switch_id: u8) -> FootSwitchMode {
        self.foot_switch_config(switch_id)
            .map(|c| c.mode)
            .unwrap_or(FootSwitchMode::None)
    }

    /// Bank direction selector of one footswitch.
    pub fn foot_switch_target_bank(&self, switch_id: u8) -> u8 {
        self.foot_switch_config(switch_id)
            .map(|c| c.target_bank)
            .unwrap_or(0)
    }

    /// Target preset of one footswitch.
    pub fn foot_switch_target_preset(&self, switch_id: u8) -> u8 {
        self.foot_switch_config(switch_id)
            .map(|c| c.target_preset)
            .unwrap_or(0)
    }

    /// Apply the behavior bound to a footswitch press.
    ///
    /// State changes (loop toggles, bank/preset navigation) happen here;
    /// the returned event tells the hardware layer what it still has to
    /// do (re-route the matrix, transmit MIDI, mute). Out-of-range ids
    /// and `None`-mode switches do nothing.
    pub fn dispatch_foot_switch(
        &mut self,
        switch_id: u8,
    ) -> Result<Option<FootSwitchEvent>, StorageError<S::Error>> {
        let Some(config) = self.foot_switch_config(switch_id).copied() else {
            #[cfg(feature = "defmt")]
            defmt::warn!("dispatch_foot_switch: invalid switch {}", switch_id);
            return Ok(None);
        };

        match config.mode {
            FootSwitchMode::None => Ok(None),
            FootSwitchMode::ToggleLoop => {
                self.toggle_loop_state(config.loop_index);
                Ok(Some(FootSwitchEvent::RoutingChanged))
            }
            FootSwitchMode::SendMidiMessage => {
                Ok(Some(FootSwitchEvent::SendMidi(config.midi_messages)))
            }
            FootSwitchMode::BankSelect => {
                if config.target_bank > 0 {
                    self.set_preset_bank_up()?;
                } else {
                    self.set_preset_bank_down()?;
                }
                Ok(Some(FootSwitchEvent::RoutingChanged))
            }
            FootSwitchMode::PresetSelect => {
                self.set_current_preset(config.target_preset)?;
                Ok(Some(FootSwitchEvent::RoutingChanged))
            }
            FootSwitchMode::Mute => Ok(Some(FootSwitchEvent::Muted)),
        }
    }

    // ── Preset view (UI boundary) ────────────────────────────────────

    /// Snapshot of the active preset for the menu layer.
    pub fn preset_view(&self) -> PresetView {
        PresetView::from_preset(self.current_preset())
    }

    /// Apply an edited view onto the active preset and persist it in one
    /// step.
    pub fn apply_preset_view(&mut self, view: &PresetView) -> Result<(), StorageError<S::Error>> {
        view.apply_to(self.current_preset_mut());
        self.save_current_preset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;

    /// Manager over a formatted in-memory chip: every bank holds empty
    /// 4-loop presets, device state points at bank 0 / preset 0.
    fn manager() -> PresetManager<MemStore> {
        let mut storage = PresetStorage::new(MemStore::new());
        for bank in 0..MAX_BANKS {
            storage.format_bank(bank, 4).unwrap();
        }
        storage.save_device_state(0, 0).unwrap();

        let mut m = PresetManager::new(storage);
        m.initialize().unwrap();
        m
    }

    // ── Initialization ───────────────────────────────────────────────

    #[test]
    fn initialize_restores_persisted_selection() {
        let mut storage = PresetStorage::new(MemStore::new());
        for bank in 0..MAX_BANKS {
            storage.format_bank(bank, 4).unwrap();
        }
        storage.save_device_state(5, 2).unwrap();

        let mut m = PresetManager::new(storage);
        m.initialize().unwrap();

        assert_eq!(m.current_bank(), 5);
        assert_eq!(m.current_preset_index(), 2);
        assert_eq!(m.current_preset().bank(), 5);
    }

    #[test]
    fn initialize_clamps_out_of_range_device_state() {
        let mut storage = PresetStorage::new(MemStore::new());
        for bank in 0..MAX_BANKS {
            storage.format_bank(bank, 4).unwrap();
        }
        // Simulates a chip whose device state was never written.
        storage.save_device_state(0xFF, 0xFF).unwrap();

        let mut m = PresetManager::new(storage);
        m.initialize().unwrap();

        assert_eq!(m.current_bank(), 0);
        assert_eq!(m.current_preset_index(), 0);
    }

    #[test]
    fn format_blank_device_makes_blank_chip_bootable() {
        let storage = PresetStorage::new(MemStore::blank());
        let mut m = PresetManager::new(storage);

        assert!(m.initialize().is_err());

        m.format_blank_device(4).unwrap();
        m.initialize().unwrap();
        assert_eq!(m.current_bank(), 0);
    }

    // ── Bank navigation ──────────────────────────────────────────────

    #[test]
    fn set_preset_bank_loads_bank_and_resets_preset() {
        let mut m = manager();
        m.set_current_preset(2).unwrap();

        m.set_preset_bank(3).unwrap();

        assert_eq!(m.current_bank(), 3);
        assert_eq!(m.current_preset_index(), 0);
        assert_eq!(m.current_preset().bank(), 3);
    }

    #[test]
    fn set_preset_bank_invalid_is_noop() {
        let mut m = manager();
        m.set_preset_bank(2).unwrap();

        m.set_preset_bank(MAX_BANKS).unwrap();
        m.set_preset_bank(0xFF).unwrap();

        assert_eq!(m.current_bank(), 2);
    }

    #[test]
    fn bank_up_wraps_from_last_to_zero() {
        let mut m = manager();
        m.set_preset_bank(MAX_BANKS - 1).unwrap();
        m.set_preset_bank_up().unwrap();
        assert_eq!(m.current_bank(), 0);
    }

    #[test]
    fn bank_down_wraps_from_zero_to_last() {
        let mut m = manager();
        m.set_preset_bank_down().unwrap();
        assert_eq!(m.current_bank(), MAX_BANKS - 1);
    }

    #[test]
    fn bank_navigation_persists_device_state() {
        let mut m = manager();
        m.set_preset_bank(7).unwrap();
        m.set_current_preset(3).unwrap();

        assert_eq!(m.storage_mut().load_device_state().unwrap(), (7, 3));
    }

    // ── Preset selection and save ────────────────────────────────────

    #[test]
    fn set_current_preset_invalid_is_noop() {
        let mut m = manager();
        m.set_current_preset(1).unwrap();
        m.set_current_preset(PRESETS_PER_BANK).unwrap();
        assert_eq!(m.current_preset_index(), 1);
    }

    #[test]
    fn save_current_preset_persists_edits() {
        let mut m = manager();
        m.toggle_loop_state(1);
        m.add_midi_message(MidiMessage::new_single(0xC0, 0, 9));
        m.save_current_preset().unwrap();

        // Reload the bank from storage; the edits must survive.
        m.set_preset_bank(1).unwrap();
        m.set_preset_bank(0).unwrap();

        assert!(m.current_preset().loop_at(1).unwrap().state);
        assert_eq!(m.current_preset().midi_messages_count(), 1);
    }

    #[test]
    fn save_current_preset_keeps_selection() {
        let mut m = manager();
        m.set_current_preset(2).unwrap();
        m.save_current_preset().unwrap();
        assert_eq!(m.current_preset_index(), 2);
        assert_eq!(m.current_bank(), 0);
    }

    #[test]
    fn unsaved_edits_are_lost_on_bank_reload() {
        let mut m = manager();
        m.toggle_loop_state(0);

        m.set_preset_bank(1).unwrap();
        m.set_preset_bank(0).unwrap();

        assert!(!m.current_preset().loop_at(0).unwrap().state);
    }

    // ── Loop operations ──────────────────────────────────────────────

    #[test]
    fn swap_loops_twice_restores_orders() {
        let mut m = manager();
        m.swap_loops(0, 3);
        assert_eq!(m.current_preset().loop_at(0).unwrap().order, 3);
        m.swap_loops(0, 3);
        assert_eq!(m.current_preset().loop_at(0).unwrap().order, 0);
        assert_eq!(m.current_preset().loop_at(3).unwrap().order, 3);
    }

    #[test]
    fn loop_index_by_order_tracks_swaps() {
        let mut m = manager();
        m.swap_loops(0, 2);
        assert_eq!(m.loop_index_by_order(0), Some(2));
        assert_eq!(m.loop_index_by_order(2), Some(0));
        assert_eq!(m.loop_index_by_order(9), None);
    }

    // ── Footswitch dispatch ──────────────────────────────────────────

    /// Install a footswitch config on switch 0 of the current bank and
    /// reload so the manager's table picks it up.
    fn install_switch(m: &mut PresetManager<MemStore>, config: FootSwitchConfig) {
        let bank = m.current_bank();
        m.storage_mut()
            .save_foot_switch_config(bank, 0, &config)
            .unwrap();
        m.set_preset_bank(bank).unwrap();
    }

    #[test]
    fn bank_select_target_one_goes_up() {
        let mut m = manager();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::BankSelect);
        cfg.target_bank = 1;
        install_switch(&mut m, cfg);

        let event = m.dispatch_foot_switch(0).unwrap();
        assert_eq!(event, Some(FootSwitchEvent::RoutingChanged));
        assert_eq!(m.current_bank(), 1);
    }

    #[test]
    fn bank_select_target_zero_goes_down() {
        let mut m = manager();
        let cfg = FootSwitchConfig::new(FootSwitchMode::BankSelect);
        install_switch(&mut m, cfg);

        m.dispatch_foot_switch(0).unwrap();
        assert_eq!(m.current_bank(), MAX_BANKS - 1);
    }

    #[test]
    fn preset_select_recalls_target() {
        let mut m = manager();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::PresetSelect);
        cfg.target_preset = 3;
        install_switch(&mut m, cfg);

        let event = m.dispatch_foot_switch(0).unwrap();
        assert_eq!(event, Some(FootSwitchEvent::RoutingChanged));
        assert_eq!(m.current_preset_index(), 3);
    }

    #[test]
    fn toggle_loop_flips_loop_and_requests_rerouting() {
        let mut m = manager();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::ToggleLoop);
        cfg.loop_index = 2;
        install_switch(&mut m, cfg);

        let event = m.dispatch_foot_switch(0).unwrap();
        assert_eq!(event, Some(FootSwitchEvent::RoutingChanged));
        assert!(m.current_preset().loop_at(2).unwrap().state);
    }

    #[test]
    fn send_midi_returns_embedded_messages() {
        let mut m = manager();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::SendMidiMessage);
        cfg.set_midi_message(0, MidiMessage::new(0xB0, 1, 23, 64));
        install_switch(&mut m, cfg);

        match m.dispatch_foot_switch(0).unwrap() {
            Some(FootSwitchEvent::SendMidi(messages)) => {
                assert_eq!(messages[0].kind(), 0xB0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn mute_reports_muted_without_state_change() {
        let mut m = manager();
        install_switch(&mut m, FootSwitchConfig::new(FootSwitchMode::Mute));

        let event = m.dispatch_foot_switch(0).unwrap();
        assert_eq!(event, Some(FootSwitchEvent::Muted));
        assert_eq!(m.current_bank(), 0);
    }

    #[test]
    fn none_mode_and_invalid_switch_do_nothing() {
        let mut m = manager();
        assert_eq!(m.dispatch_foot_switch(0).unwrap(), None);
        assert_eq!(m.dispatch_foot_switch(99).unwrap(), None);
    }

    #[test]
    fn foot_switch_accessors_reflect_loaded_bank() {
        let mut m = manager();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::BankSelect);
        cfg.target_bank = 1;
        cfg.target_preset = 2;
        install_switch(&mut m, cfg);

        assert_eq!(m.foot_switch_mode(0), FootSwitchMode::BankSelect);
        assert_eq!(m.foot_switch_target_bank(0), 1);
        assert_eq!(m.foot_switch_target_preset(0), 2);
        // Out-of-range ids read as inert.
        assert_eq!(m.foot_switch_mode(99), FootSwitchMode::None);
    }

    // ── Preset view boundary ─────────────────────────────────────────

    #[test]
    fn apply_preset_view_applies_and_persists() {
        let mut m = manager();
        let mut view = m.preset_view();
        view.loops[0].is_active = true;
        view.loops[0].order = 1;

        m.apply_preset_view(&view).unwrap();

        // In RAM.
        assert!(m.current_preset().loop_at(0).unwrap().state);
        // And on the chip.
        m.set_preset_bank(1).unwrap();
        m.set_preset_bank(0).unwrap();
        assert!(m.current_preset().loop_at(0).unwrap().state);
    }
}
