/// Concert pitch reference.
pub const A4_FREQUENCY: f64 = 440.0;
/// MIDI note number of A4.
pub const A4_MIDI: i32 = 69;

/// Equal-tempered frequency of a (possibly fractional) MIDI note number.
pub fn midi_to_frequency(note: impl Into<f64>) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((note.into() - A4_MIDI as f64) / 12.0)
}

/// Continuous inverse of [`midi_to_frequency`]. Non-positive frequencies have no
/// pitch and map to `None`.
pub fn frequency_to_midi(freq: f64) -> Option<f64> {
    if freq <= 0.0 {
        return None;
    }
    Some(A4_MIDI as f64 + 12.0 * (freq / A4_FREQUENCY).log2())
}

/// Closest MIDI note to `freq` and the offset from it in (rounded) cents.
pub fn nearest_midi(freq: f64) -> Option<(i32, i32)> {
    let midi = frequency_to_midi(freq)?.round() as i32;
    let cents = (1200.0 * (freq / midi_to_frequency(midi)).log2()).round() as i32;
    Some((midi, cents))
}
