// Purpose - external interfaces, format conversions

pub mod converter;
pub mod pitch;

pub use converter::{frequency_to_midi, midi_to_frequency, nearest_midi, A4_FREQUENCY, A4_MIDI};
pub use pitch::{frequency_to_pitch, midi_to_pitch, pitch_to_midi, PitchLabel};
