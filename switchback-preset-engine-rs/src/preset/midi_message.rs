/// Wire value marking an absent second data byte.
///
/// One-data-byte messages (e.g. Program Change) store `0xFF` in the
/// `data2` slot, both in RAM and in the EEPROM record. The public API
/// translates the sentinel to `Option<u8>`.
pub const NO_DATA_BYTE2: u8 = 0xFF;

/// A MIDI message at the byte level.
///
/// The status byte packs the message kind in the high nibble and the
/// channel in the low nibble. Data bytes are stored raw; `data2` uses the
/// [`NO_DATA_BYTE2`] sentinel for one-data-byte messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiMessage {
    status: u8,
    data1: u8,
    data2: u8,
}

impl Default for MidiMessage {
    fn default() -> Self {
        Self {
            status: 0,
            data1: 0,
            data2: NO_DATA_BYTE2,
        }
    }
}

impl MidiMessage {
    /// Build a two-data-byte message (e.g. Control Change).
    ///
    /// `kind` is the status high nibble (e.g. `0xB0`); `channel` is masked
    /// to its low four bits.
    pub fn new(kind: u8, channel: u8, data1: u8, data2: u8) -> Self {
        Self {
            status: kind | (channel & 0x0F),
            data1,
            data2,
        }
    }

    /// Build a one-data-byte message (e.g. Program Change).
    pub fn new_single(kind: u8, channel: u8, data1: u8) -> Self {
        Self::new(kind, channel, data1, NO_DATA_BYTE2)
    }

    /// Rebuild a message from raw wire bytes (EEPROM records).
    pub fn from_bytes(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
        }
    }

    /// The full status byte (kind | channel).
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Overwrite the full status byte.
    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Message kind — the high nibble of the status byte (e.g. `0xC0`).
    pub fn kind(&self) -> u8 {
        self.status & 0xF0
    }

    /// MIDI channel — the low nibble of the status byte.
    pub fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// First data byte.
    pub fn data1(&self) -> u8 {
        self.data1
    }

    /// Overwrite the first data byte.
    pub fn set_data1(&mut self, data1: u8) {
        self.data1 = data1;
    }

    /// Second data byte, or `None` for one-data-byte messages.
    pub fn data2(&self) -> Option<u8> {
        if self.data2 == NO_DATA_BYTE2 {
            None
        } else {
            Some(self.data2)
        }
    }

    /// Raw second data byte including the [`NO_DATA_BYTE2`] sentinel.
    pub fn data2_raw(&self) -> u8 {
        self.data2
    }

    /// Overwrite the second data byte. Writing [`NO_DATA_BYTE2`] marks
    /// the message as one-data-byte.
    pub fn set_data2(&mut self, data2: u8) {
        self.data2 = data2;
    }

    /// `true` when the message carries a second data byte.
    pub fn has_data2(&self) -> bool {
        self.data2 != NO_DATA_BYTE2
    }

    /// Render the message as the byte sequence to put on the serial line.
    ///
    /// Returns the buffer and the number of valid bytes (2 or 3). The
    /// transmit layer writes exactly that many bytes.
    pub fn to_bytes(&self) -> ([u8; 3], usize) {
        let bytes = [self.status, self.data1, self.data2];
        let len = if self.has_data2() { 3 } else { 2 };
        (bytes, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_byte_packs_kind_and_channel() {
        let m = MidiMessage::new(0xB0, 0x05, 23, 64);
        assert_eq!(m.status(), 0xB5);
        assert_eq!(m.kind(), 0xB0);
        assert_eq!(m.channel(), 0x05);
    }

    #[test]
    fn channel_is_masked_to_low_nibble() {
        let m = MidiMessage::new(0x90, 0x1F, 60, 100);
        assert_eq!(m.channel(), 0x0F);
        assert_eq!(m.kind(), 0x90);
    }

    #[test]
    fn single_byte_message_has_no_data2() {
        let m = MidiMessage::new_single(0xC0, 2, 17);
        assert!(!m.has_data2());
        assert_eq!(m.data2(), None);
        assert_eq!(m.data2_raw(), NO_DATA_BYTE2);
    }

    #[test]
    fn default_is_empty_single_byte_message() {
        let m = MidiMessage::default();
        assert_eq!(m.status(), 0);
        assert_eq!(m.data1(), 0);
        assert!(!m.has_data2());
    }

    #[test]
    fn to_bytes_length_tracks_data2_presence() {
        let pc = MidiMessage::new_single(0xC0, 0, 5);
        let (bytes, len) = pc.to_bytes();
        assert_eq!(len, 2);
        assert_eq!(&bytes[..len], &[0xC0, 5]);

        let cc = MidiMessage::new(0xB0, 1, 23, 64);
        let (bytes, len) = cc.to_bytes();
        assert_eq!(len, 3);
        assert_eq!(&bytes[..len], &[0xB1, 23, 64]);
    }

    #[test]
    fn from_bytes_round_trips_sentinel() {
        let m = MidiMessage::from_bytes(0xC3, 10, NO_DATA_BYTE2);
        assert_eq!(m.data2(), None);
        let m2 = MidiMessage::from_bytes(0xB3, 10, 0x40);
        assert_eq!(m2.data2(), Some(0x40));
    }
}
