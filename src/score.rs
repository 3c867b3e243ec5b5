//! Interfaces to the score/chord model that supplies notes to the engine.
//!
//! Score parsing lives outside this crate. Anything that can list the
//! fundamentals of a chord implements [`ChordNotes`]; anything that can list
//! chords along a timeline implements [`ScoreChords`]. [`Chord`] and
//! [`ChordTimeline`] are minimal in-memory implementations.

use crate::error::Result;
use crate::io::{frequency_to_pitch, midi_to_frequency, midi_to_pitch, pitch_to_midi};

/// Notes sounding together.
pub trait ChordNotes {
    /// Fundamental frequency of every note, in note order.
    fn fundamentals(&self) -> Vec<f64>;

    /// Pitch label of every note, in note order.
    fn labels(&self) -> Vec<String> {
        self.fundamentals()
            .into_iter()
            .map(|f| frequency_to_pitch(f).map(|p| p.to_string()).unwrap_or_default())
            .collect()
    }

    fn size(&self) -> usize {
        self.fundamentals().len()
    }
}

/// Chords placed along an ordered domain (measure number or continuous time).
pub trait ScoreChords {
    type Chord: ChordNotes + Sync;

    /// `(position, chord)` entries in time order.
    fn chords(&self) -> Vec<(f64, &Self::Chord)>;

    fn measure_count(&self) -> usize;
}

impl ChordNotes for [f64] {
    fn fundamentals(&self) -> Vec<f64> {
        self.to_vec()
    }
}

impl ChordNotes for Vec<f64> {
    fn fundamentals(&self) -> Vec<f64> {
        self.clone()
    }
}

/// A single note: fundamental frequency plus a display label.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub frequency: f64,
    pub label: String,
}

impl Note {
    pub fn from_frequency(frequency: f64) -> Self {
        let label = frequency_to_pitch(frequency)
            .map(|p| p.to_string())
            .unwrap_or_default();
        Self { frequency, label }
    }

    pub fn from_midi(note: i32) -> Self {
        Self {
            frequency: midi_to_frequency(note),
            label: midi_to_pitch(note),
        }
    }

    pub fn from_pitch(pitch: &str) -> Result<Self> {
        let midi = pitch_to_midi(pitch)?;
        Ok(Self {
            frequency: midi_to_frequency(midi),
            label: pitch.trim().to_string(),
        })
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chord {
    pub notes: Vec<Note>,
}

impl Chord {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn from_midi(notes: &[i32]) -> Self {
        Self::new(notes.iter().map(|&n| Note::from_midi(n)).collect())
    }

    pub fn from_frequencies(frequencies: &[f64]) -> Self {
        Self::new(
            frequencies
                .iter()
                .map(|&f| Note::from_frequency(f))
                .collect(),
        )
    }

    /// Chord from pitch names, e.g. `["C3", "E3", "G3"]`.
    pub fn from_pitches<S: AsRef<str>>(pitches: &[S]) -> Result<Self> {
        let notes = pitches
            .iter()
            .map(|p| Note::from_pitch(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(notes))
    }
}

impl ChordNotes for Chord {
    fn fundamentals(&self) -> Vec<f64> {
        self.notes.iter().map(|n| n.frequency).collect()
    }

    fn labels(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.label.clone()).collect()
    }

    fn size(&self) -> usize {
        self.notes.len()
    }
}

/// One chord at a position of the timeline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TimedChord {
    pub position: f64,
    pub chord: Chord,
}

/// Chords in time order with the measure count of the score they came from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChordTimeline {
    pub entries: Vec<TimedChord>,
    pub measures: usize,
}

impl ChordTimeline {
    pub fn new(measures: usize) -> Self {
        Self {
            entries: Vec::new(),
            measures,
        }
    }

    /// Append a chord at `position`. Entries are kept sorted by position;
    /// chords at equal positions keep their insertion order.
    pub fn push(&mut self, position: f64, chord: Chord) {
        let at = self
            .entries
            .partition_point(|e| e.position <= position);
        self.entries.insert(at, TimedChord { position, chord });
    }

    pub fn with_chord(mut self, position: f64, chord: Chord) -> Self {
        self.push(position, chord);
        self
    }
}

impl ScoreChords for ChordTimeline {
    type Chord = Chord;

    fn chords(&self) -> Vec<(f64, &Chord)> {
        self.entries.iter().map(|e| (e.position, &e.chord)).collect()
    }

    fn measure_count(&self) -> usize {
        self.measures
    }
}
