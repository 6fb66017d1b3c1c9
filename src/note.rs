// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is, and how high it sounds.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Equal-tempered frequencies in Hz with A4 at 440 Hz, one row per octave.
///
/// The octave number changes at E, so every row runs
/// `e f f# g g# a a# b c c# d d#`.
const FREQUENCIES: [[f64; 12]; 8] = [
    [
        20.60172, 21.82676, 23.12465, 24.49971, 25.95654, 27.50000, 29.13524, 30.86771, 32.70320,
        34.64783, 36.70810, 38.89087,
    ],
    [
        41.20344, 43.65353, 46.24930, 48.99943, 51.91309, 55.00000, 58.27047, 61.73541, 65.40639,
        69.29566, 73.41619, 77.78175,
    ],
    [
        82.40689, 87.30706, 92.49861, 97.99886, 103.8262, 110.0000, 116.5409, 123.4708, 130.8128,
        138.5913, 146.8324, 155.5635,
    ],
    [
        164.8138, 174.6141, 184.9972, 195.9977, 207.6523, 220.0000, 233.0819, 246.9417, 261.6256,
        277.1826, 293.6648, 311.1270,
    ],
    [
        329.6276, 349.2282, 369.9944, 391.9954, 415.3047, 440.0000, 466.1638, 493.8833, 523.2511,
        554.3653, 587.3295, 622.2540,
    ],
    [
        659.2551, 698.4565, 739.9888, 783.9909, 830.6094, 880.0000, 932.3275, 987.7666, 1046.502,
        1108.731, 1174.659, 1244.508,
    ],
    [
        1318.510, 1396.913, 1479.978, 1567.982, 1661.219, 1760.000, 1864.655, 1975.533, 2093.005,
        2217.461, 2349.318, 2489.016,
    ],
    [
        2637.020, 2793.826, 2959.955, 3135.963, 3322.438, 3520.000, 3729.310, 3951.066, 4186.009,
        4434.922, 4698.636, 4978.032,
    ],
];

/// The highest octave present in the frequency table.
pub const MAX_OCTAVE: u8 = 7;

/// The twelve pitches of an octave, in the order of the frequency table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Pitch {
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
    C,
    CSharp,
    D,
    DSharp,
}

impl Pitch {
    pub const ALL: [Pitch; 12] = [
        Pitch::E,
        Pitch::F,
        Pitch::FSharp,
        Pitch::G,
        Pitch::GSharp,
        Pitch::A,
        Pitch::ASharp,
        Pitch::B,
        Pitch::C,
        Pitch::CSharp,
        Pitch::D,
        Pitch::DSharp,
    ];

    /// Resolve a letter and an optional sharp. There is no E♯ or B♯ in the table.
    fn from_letter(letter: char, sharp: bool) -> Option<Pitch> {
        let pitch = match (letter.to_ascii_lowercase(), sharp) {
            ('e', false) => Pitch::E,
            ('f', false) => Pitch::F,
            ('f', true) => Pitch::FSharp,
            ('g', false) => Pitch::G,
            ('g', true) => Pitch::GSharp,
            ('a', false) => Pitch::A,
            ('a', true) => Pitch::ASharp,
            ('b', false) => Pitch::B,
            ('c', false) => Pitch::C,
            ('c', true) => Pitch::CSharp,
            ('d', false) => Pitch::D,
            ('d', true) => Pitch::DSharp,
            _ => return None,
        };
        Some(pitch)
    }

    fn column(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Pitch::E => "e",
            Pitch::F => "f",
            Pitch::FSharp => "f#",
            Pitch::G => "g",
            Pitch::GSharp => "g#",
            Pitch::A => "a",
            Pitch::ASharp => "a#",
            Pitch::B => "b",
            Pitch::C => "c",
            Pitch::CSharp => "c#",
            Pitch::D => "d",
            Pitch::DSharp => "d#",
        }
    }
}

/// A note of the frequency table, e.g. `a#2`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Note {
    octave: u8,
    pitch: Pitch,
}

impl Note {
    /// Returns `None` if the octave is not part of the table.
    pub fn new(pitch: Pitch, octave: u8) -> Option<Note> {
        if octave <= MAX_OCTAVE {
            Some(Note { octave, pitch })
        } else {
            None
        }
    }

    /// Parse a name string of the format `<letter><sharp><octave>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_wave::note::*;
    ///
    /// assert_eq!(Note::named_str("a4"), Note::new(Pitch::A, 4));
    /// assert_eq!(Note::named_str("A#2"), Note::new(Pitch::ASharp, 2));
    /// assert_eq!(Note::named_str("c♯6"), Note::new(Pitch::CSharp, 6));
    /// assert_eq!(Note::named_str("e#4"), None);
    /// assert_eq!(Note::named_str("a8"), None);
    /// ```
    pub fn named_str(name_str: &str) -> Option<Note> {
        let mut name_chars = name_str.chars();
        let letter = name_chars.next()?;

        let accidental_str = name_chars
            .as_str()
            .trim_end_matches(|ch: char| ch.is_ascii_digit());
        let sharp = match accidental_str {
            "#" | "♯" => true,
            "" => false,
            _ => return None,
        };
        let pitch = Pitch::from_letter(letter, sharp)?;

        let octave_str = &name_chars.as_str()[accidental_str.len()..];
        let octave = octave_str.parse().ok()?;
        Note::new(pitch, octave)
    }

    pub fn pitch(self) -> Pitch {
        self.pitch
    }

    pub fn octave(self) -> u8 {
        self.octave
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(self) -> f64 {
        FREQUENCIES[self.octave as usize][self.pitch.column()]
    }

    /// All notes of the table, from lowest to highest.
    pub fn all() -> impl Iterator<Item = Note> {
        (0..=MAX_OCTAVE).flat_map(|octave| {
            (0..Pitch::ALL.len()).map(move |column| Note {
                octave,
                pitch: Pitch::ALL[column],
            })
        })
    }
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Note::named_str(s).ok_or_else(|| Error::UnknownNote { name: s.to_string() })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch.name(), self.octave)
    }
}

/// Look up the frequency of a note by its name.
///
/// # Examples
///
/// ```
/// use syn_wave::note::frequency;
///
/// assert_eq!(frequency("a4").unwrap(), 440.0);
/// assert_eq!(frequency("a#2").unwrap(), 116.5409);
/// assert!(frequency("h4").is_err());
/// ```
pub fn frequency(note_name: &str) -> Result<f64> {
    note_name.parse::<Note>().map(Note::frequency)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_equal_tempered() {
        let a4 = Note::new(Pitch::A, 4).unwrap();
        for note in Note::all() {
            let semitones = (note.octave() as i32 - a4.octave() as i32) * 12
                + (note.pitch().column() as i32 - a4.pitch().column() as i32);
            let expected = 440.0 * 2.0f64.powf(semitones as f64 / 12.0);
            let relative = (note.frequency() - expected).abs() / expected;
            assert!(note.frequency() > 0.0);
            assert!(relative < 1e-5, "{} is {} Hz, expected {}", note, note.frequency(), expected);
        }
    }

    #[test]
    fn table_is_ascending() {
        let freqs: Vec<f64> = Note::all().map(Note::frequency).collect();
        assert_eq!(freqs.len(), 96);
        assert!(freqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn octave_starts_at_e() {
        assert_eq!(frequency("e0").unwrap(), 20.60172);
        assert_eq!(frequency("c4").unwrap(), 523.2511);
        assert_eq!(frequency("d#7").unwrap(), 4978.032);
    }

    #[test]
    fn names_round_trip_through_display() {
        for note in Note::all() {
            assert_eq!(note.to_string().parse::<Note>(), Ok(note));
        }
    }

    #[test]
    fn unknown_names() {
        for name in &["", "a", "h4", "a##4", "ab4", "b#3", "a-1", "a+4", "0", "4a"] {
            assert_eq!(
                frequency(name),
                Err(Error::UnknownNote {
                    name: name.to_string()
                }),
                "{:?} should not be a note",
                name
            );
        }
    }
}
