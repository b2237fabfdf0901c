//! Addressed load/save of presets, footswitch configs, and device state
//! over a [`ByteStore`].

use core::fmt;

use crate::preset::{FootSwitchConfig, Preset};
use crate::storage::codec::{
    deserialize_foot_switch_config, deserialize_preset, serialize_foot_switch_config,
    serialize_preset, CodecError,
};
use crate::storage::{
    ByteStore, BANKS_START_ADDRESS, DEVICE_STATE_ADDRESS, FOOT_SWITCH_CONFIG_SIZE,
    FOOT_SWITCH_COUNT, FOOT_SWITCH_START_ADDRESS, PRESETS_PER_BANK, PRESET_SLOT_SIZE,
};

/// Errors from the storage layer.
///
/// Bus failures are fatal for the device (it cannot function without its
/// EEPROM); codec failures indicate a corrupted or foreign slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError<E> {
    /// Underlying byte store failed.
    Bus(E),
    /// Slot contents could not be encoded or decoded.
    Codec(CodecError),
}

impl<E> From<CodecError> for StorageError<E> {
    fn from(error: CodecError) -> Self {
        StorageError::Codec(error)
    }
}

impl<E: fmt::Debug> fmt::Display for StorageError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Bus(e) => write!(f, "store error: {:?}", e),
            StorageError::Codec(e) => write!(f, "codec error: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for StorageError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            StorageError::Bus(e) => defmt::write!(f, "store error: {}", e),
            StorageError::Codec(e) => defmt::write!(f, "codec error: {}", e),
        }
    }
}

/// Persistence front-end: owns the byte store and knows the memory map.
///
/// All addressing goes through here — callers name things by
/// `(bank, index)`, never by raw address.
pub struct PresetStorage<S> {
    store: S,
}

impl<S: ByteStore> PresetStorage<S> {
    /// Take ownership of the byte store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Slot address for preset `index` of `bank`.
    fn preset_address(bank: u8, index: u8) -> u16 {
        BANKS_START_ADDRESS
            + (bank as u16 * PRESETS_PER_BANK as u16 + index as u16) * PRESET_SLOT_SIZE as u16
    }

    /// Record address for footswitch `switch_index` of `bank`.
    fn foot_switch_address(bank: u8, switch_index: u8) -> u16 {
        FOOT_SWITCH_START_ADDRESS
            + (bank as u16 * FOOT_SWITCH_COUNT as u16 + switch_index as u16)
                * FOOT_SWITCH_CONFIG_SIZE as u16
    }

    // ── Device state ─────────────────────────────────────────────────

    /// Persist the last-selected bank and preset.
    pub fn save_device_state(&mut self, bank: u8, preset: u8) -> Result<(), StorageError<S::Error>> {
        self.store
            .write_byte(DEVICE_STATE_ADDRESS, bank)
            .map_err(StorageError::Bus)?;
        self.store
            .write_byte(DEVICE_STATE_ADDRESS + 1, preset)
            .map_err(StorageError::Bus)
    }

    /// Read back the last-selected bank and preset.
    pub fn load_device_state(&mut self) -> Result<(u8, u8), StorageError<S::Error>> {
        let bank = self
            .store
            .read_byte(DEVICE_STATE_ADDRESS)
            .map_err(StorageError::Bus)?;
        let preset = self
            .store
            .read_byte(DEVICE_STATE_ADDRESS + 1)
            .map_err(StorageError::Bus)?;
        Ok((bank, preset))
    }

    // ── Presets ──────────────────────────────────────────────────────

    /// Serialize `preset` and write its whole slot.
    pub fn save_preset(
        &mut self,
        bank: u8,
        index: u8,
        preset: &Preset,
    ) -> Result<(), StorageError<S::Error>> {
        let mut buffer = [0u8; PRESET_SLOT_SIZE];
        serialize_preset(preset, &mut buffer)?;

        let address = Self::preset_address(bank, index);
        for (i, byte) in buffer.iter().enumerate() {
            self.store
                .write_byte(address + i as u16, *byte)
                .map_err(StorageError::Bus)?;
        }
        Ok(())
    }

    /// Read a whole slot and deserialize it.
    pub fn load_preset(&mut self, bank: u8, index: u8) -> Result<Preset, StorageError<S::Error>> {
        let address = Self::preset_address(bank, index);
        let mut buffer = [0u8; PRESET_SLOT_SIZE];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self
                .store
                .read_byte(address + i as u16)
                .map_err(StorageError::Bus)?;
        }
        Ok(deserialize_preset(&buffer)?)
    }

    // ── Footswitch configs ───────────────────────────────────────────

    /// Write one footswitch config record.
    pub fn save_foot_switch_config(
        &mut self,
        bank: u8,
        switch_index: u8,
        config: &FootSwitchConfig,
    ) -> Result<(), StorageError<S::Error>> {
        let mut buffer = [0u8; FOOT_SWITCH_CONFIG_SIZE];
        serialize_foot_switch_config(config, &mut buffer);

        let address = Self::foot_switch_address(bank, switch_index);
        for (i, byte) in buffer.iter().enumerate() {
            self.store
                .write_byte(address + i as u16, *byte)
                .map_err(StorageError::Bus)?;
        }
        Ok(())
    }

    /// Read one footswitch config record.
    pub fn load_foot_switch_config(
        &mut self,
        bank: u8,
        switch_index: u8,
    ) -> Result<FootSwitchConfig, StorageError<S::Error>> {
        let address = Self::foot_switch_address(bank, switch_index);
        let mut buffer = [0u8; FOOT_SWITCH_CONFIG_SIZE];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self
                .store
                .read_byte(address + i as u16)
                .map_err(StorageError::Bus)?;
        }
        Ok(deserialize_foot_switch_config(&buffer))
    }

    // ── Formatting ───────────────────────────────────────────────────

    /// Write factory-default contents for one bank: empty presets with
    /// the given loop count and inert footswitch configs.
    ///
    /// Used to bring a blank chip to a loadable state.
    pub fn format_bank(&mut self, bank: u8, loops_count: u8) -> Result<(), StorageError<S::Error>> {
        for index in 0..PRESETS_PER_BANK {
            let mut preset = Preset::new(bank, index);
            preset.set_loops_count(loops_count);
            for i in 0..loops_count {
                if let Some(l) = preset.loop_at_mut(i) {
                    l.order = i;
                }
            }
            self.save_preset(bank, index, &preset)?;
        }
        for switch_index in 0..FOOT_SWITCH_COUNT {
            self.save_foot_switch_config(bank, switch_index, &FootSwitchConfig::default())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{FootSwitchMode, Loop, MidiMessage};
    use crate::testutil::MemStore;

    fn storage() -> PresetStorage<MemStore> {
        PresetStorage::new(MemStore::new())
    }

    // ── Addressing ───────────────────────────────────────────────────

    #[test]
    fn preset_addresses_match_memory_map() {
        assert_eq!(PresetStorage::<MemStore>::preset_address(0, 0), 0x0080);
        assert_eq!(PresetStorage::<MemStore>::preset_address(0, 1), 0x0100);
        // Bank 1 starts one bank stride (4 * 128 bytes) later.
        assert_eq!(PresetStorage::<MemStore>::preset_address(1, 0), 0x0280);
    }

    #[test]
    fn foot_switch_addresses_match_memory_map() {
        assert_eq!(
            PresetStorage::<MemStore>::foot_switch_address(0, 0),
            0x2080
        );
        assert_eq!(
            PresetStorage::<MemStore>::foot_switch_address(0, 1),
            0x2080 + 11
        );
        assert_eq!(
            PresetStorage::<MemStore>::foot_switch_address(1, 0),
            0x2080 + 6 * 11
        );
    }

    // ── Device state ─────────────────────────────────────────────────

    #[test]
    fn device_state_round_trips() {
        let mut s = storage();
        s.save_device_state(3, 2).unwrap();
        assert_eq!(s.load_device_state().unwrap(), (3, 2));
    }

    // ── Presets ──────────────────────────────────────────────────────

    #[test]
    fn preset_round_trips_through_store() {
        let mut s = storage();
        let mut p = Preset::new(2, 1);
        p.add_loop(Loop::new(true, 0, 12, 3));
        p.add_midi_message(MidiMessage::new(0xB0, 1, 23, 64));

        s.save_preset(2, 1, &p).unwrap();
        assert_eq!(s.load_preset(2, 1).unwrap(), p);
    }

    #[test]
    fn adjacent_slots_do_not_interfere() {
        let mut s = storage();
        let mut a = Preset::new(0, 0);
        a.set_loops_count(16);
        let mut b = Preset::new(0, 1);
        b.set_loops_count(2);

        s.save_preset(0, 0, &a).unwrap();
        s.save_preset(0, 1, &b).unwrap();

        assert_eq!(s.load_preset(0, 0).unwrap().loops_count(), 16);
        assert_eq!(s.load_preset(0, 1).unwrap().loops_count(), 2);
    }

    #[test]
    fn rewriting_smaller_preset_leaves_no_stale_records() {
        let mut s = storage();
        let mut big = Preset::new(0, 0);
        big.set_loops_count(10);
        for i in 0..5 {
            big.add_midi_message(MidiMessage::new_single(0xC0, 0, i));
        }
        s.save_preset(0, 0, &big).unwrap();

        let mut small = Preset::new(0, 0);
        small.set_loops_count(2);
        s.save_preset(0, 0, &small).unwrap();

        let restored = s.load_preset(0, 0).unwrap();
        assert_eq!(restored.loops_count(), 2);
        assert_eq!(restored.midi_messages_count(), 0);
    }

    #[test]
    fn loading_blank_slot_fails_cleanly() {
        let mut s = PresetStorage::new(MemStore::blank());
        assert!(matches!(
            s.load_preset(0, 0),
            Err(StorageError::Codec(_))
        ));
    }

    // ── Footswitch configs ───────────────────────────────────────────

    #[test]
    fn foot_switch_config_round_trips_through_store() {
        let mut s = storage();
        let mut cfg = FootSwitchConfig::new(FootSwitchMode::PresetSelect);
        cfg.target_preset = 3;

        s.save_foot_switch_config(1, 4, &cfg).unwrap();
        assert_eq!(s.load_foot_switch_config(1, 4).unwrap(), cfg);
    }

    // ── Formatting ───────────────────────────────────────────────────

    #[test]
    fn format_bank_makes_blank_chip_loadable() {
        let mut s = PresetStorage::new(MemStore::blank());
        s.format_bank(0, 8).unwrap();

        for index in 0..PRESETS_PER_BANK {
            let p = s.load_preset(0, index).unwrap();
            assert_eq!(p.loops_count(), 8);
            // Sequential default ordering.
            assert_eq!(p.loop_at(5).unwrap().order, 5);
        }
        for switch_index in 0..FOOT_SWITCH_COUNT {
            let cfg = s.load_foot_switch_config(0, switch_index).unwrap();
            assert_eq!(cfg.mode, FootSwitchMode::None);
        }
    }
}
