//! Entities of the preset data model.
//!
//! A [`Preset`] is the unit of recall on the pedal: it names a bank and a
//! preset number, holds up to [`MAX_LOOPS`] effect loops (each with an
//! active flag, a position in the signal chain, and the matrix send/return
//! pins it is wired to) and up to [`MAX_MIDI_MESSAGES`] MIDI messages sent
//! on recall. A [`FootSwitchConfig`] binds one physical footswitch to a
//! behavior. A [`PresetView`] is the flattened snapshot exchanged with the
//! menu layer.
//!
//! # Ordering invariant
//!
//! Among loops whose `state` is active, the `order` values are expected to
//! form a permutation `0..n`. The routing algorithm does not strictly
//! require contiguity (it sorts by `order`), but duplicate order values
//! among active loops produce an arbitrary relative order between the
//! duplicates.

mod footswitch;
mod loops;
mod midi_message;
#[allow(clippy::module_inception)]
mod preset;
mod view;

pub use footswitch::{FootSwitchConfig, FootSwitchMode};
pub use loops::Loop;
pub use midi_message::{MidiMessage, NO_DATA_BYTE2};
pub use preset::Preset;
pub use view::{LoopView, MidiMessageView, PresetView};

/// Maximum number of effect loops a preset can hold.
pub const MAX_LOOPS: usize = 16;

/// Maximum number of MIDI messages a preset can hold.
pub const MAX_MIDI_MESSAGES: usize = 20;

/// Number of MIDI messages embedded in a footswitch configuration.
pub const FOOT_SWITCH_MIDI_MESSAGES: usize = 2;
