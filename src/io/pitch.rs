/*
Pitch Names
===========

Pitch names follow scientific pitch notation: a letter, any number of
accidentals, and an octave number. Middle C (C4) = MIDI note 60.

  letter       C D E F G A B (case-insensitive)
  accidental   '#' raises a semitone, 'b' lowers one, 'x' raises two
  octave       signed integer, C-1 = MIDI 0

The MIDI formula: note_number = 12 * (octave + 1) + semitone + alteration

Labels produced from MIDI numbers always use sharp spelling.
*/

use crate::error::{DissonanceError, Result};

use super::converter::nearest_midi;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Nearest pitch name of a frequency together with its deviation in cents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchLabel {
    pub name: String,
    pub cents: i32,
}

impl std::fmt::Display for PitchLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{:+}c", self.name, self.cents)
        }
    }
}

/// Sharp-spelled pitch name of a MIDI note number.
pub fn midi_to_pitch(note: i32) -> String {
    let class = note.rem_euclid(12) as usize;
    let octave = note.div_euclid(12) - 1;
    format!("{}{}", SHARP_NAMES[class], octave)
}

/// Parse a pitch name such as `C4`, `Eb3`, `F#5` or `Bb-1` into a MIDI number.
pub fn pitch_to_midi(pitch: &str) -> Result<i32> {
    let invalid = || DissonanceError::InvalidPitch(pitch.to_string());
    let mut chars = pitch.trim().chars();

    let semitone = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(invalid()),
    };

    let rest = chars.as_str();
    let octave_start = rest
        .find(|c: char| c == '-' || c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (accidentals, octave) = rest.split_at(octave_start);

    let mut alteration: i32 = 0;
    for c in accidentals.chars() {
        let step = match c {
            '#' => 1,
            'b' => -1,
            'x' => 2,
            _ => return Err(invalid()),
        };
        alteration = alteration.checked_add(step).ok_or_else(invalid)?;
    }

    let octave: i32 = octave.parse().map_err(|_| invalid())?;
    octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|m| m.checked_add(semitone))
        .and_then(|m| m.checked_add(alteration))
        .ok_or_else(invalid)
}

/// Label for an arbitrary frequency: closest equal-tempered pitch plus cents.
pub fn frequency_to_pitch(freq: f64) -> Option<PitchLabel> {
    let (midi, cents) = nearest_midi(freq)?;
    Some(PitchLabel {
        name: midi_to_pitch(midi),
        cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_60() {
        assert_eq!(pitch_to_midi("C4").unwrap(), 60);
        assert_eq!(midi_to_pitch(60), "C4");
    }

    #[test]
    fn sharps_and_flats_are_equal() {
        assert_eq!(pitch_to_midi("C#4").unwrap(), pitch_to_midi("Db4").unwrap());
        assert_eq!(pitch_to_midi("F#2").unwrap(), pitch_to_midi("Gb2").unwrap());
        assert_eq!(pitch_to_midi("Bbb3").unwrap(), pitch_to_midi("A3").unwrap());
        assert_eq!(pitch_to_midi("Fx3").unwrap(), pitch_to_midi("G3").unwrap());
    }

    #[test]
    fn extreme_octaves_stay_in_range() {
        assert_eq!(pitch_to_midi("C178956969").unwrap(), 2_147_483_640);
        assert!(pitch_to_midi("C178956970").is_err());
    }

    #[test]
    fn negative_octaves() {
        assert_eq!(pitch_to_midi("C-1").unwrap(), 0);
        assert_eq!(midi_to_pitch(0), "C-1");
        assert_eq!(midi_to_pitch(-1), "B-2");
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "H4", "C", "C#", "Cq4", "E4.5", "C999999999", "B-999999999"] {
            assert_eq!(
                pitch_to_midi(bad),
                Err(DissonanceError::InvalidPitch(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn frequency_labels() {
        let label = frequency_to_pitch(440.0).unwrap();
        assert_eq!(label.name, "A4");
        assert_eq!(label.cents, 0);
        assert_eq!(label.to_string(), "A4");

        // Seventh harmonic of A2 lands well below G5
        let label = frequency_to_pitch(110.0 * 7.0).unwrap();
        assert_eq!(label.name, "G5");
        assert_eq!(label.cents, -31);
        assert_eq!(label.to_string(), "G5-31c");

        assert!(frequency_to_pitch(-3.0).is_none());
    }
}
