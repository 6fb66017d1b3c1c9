// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A simple textual format for writing melodies.
//!
//! A melody is a sequence of notes, each followed by its duration in seconds:
//!
//! ```text
//! g4 0.2s b4 0.2s (g3 d5 g5) 0.5s
//! ```
//!
//! Notes in parentheses form a chord and sound together for the duration after the group.

pub mod lexer;
pub mod parser;

pub use parser::{ParseError, ParseErrorKind, Parser};

use log::{debug, trace};

use crate::error::Result;
use crate::mix;
use crate::note::Note;
use crate::synth::envelope::ADSR;
use crate::synth::timeline::sample_count;
use crate::synth::{self, SynthConfig};
use crate::wave::Signal;

#[derive(Debug, Clone, PartialEq)]
pub enum MelodyEvent {
    /// A single note held for `duration` seconds.
    Note { note: Note, duration: f64 },
    /// Notes sounding together for `duration` seconds.
    Chord { notes: Vec<Note>, duration: f64 },
}

impl MelodyEvent {
    pub fn duration(&self) -> f64 {
        match self {
            MelodyEvent::Note { duration, .. } => *duration,
            MelodyEvent::Chord { duration, .. } => *duration,
        }
    }

    pub fn notes(&self) -> &[Note] {
        match self {
            MelodyEvent::Note { note, .. } => std::slice::from_ref(note),
            MelodyEvent::Chord { notes, .. } => notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Melody {
    pub events: Vec<MelodyEvent>,
}

impl Melody {
    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.events.iter().map(MelodyEvent::duration).sum()
    }
}

/// Parse a melody string. Either the whole string is valid, or nothing is returned.
///
/// # Examples
///
/// ```
/// use syn_wave::melody::*;
///
/// let melody = parse("a4 0.4s (g3 d5) 0.5s").unwrap();
/// assert_eq!(melody.events.len(), 2);
/// assert_eq!(melody.events[1].notes().len(), 2);
/// assert!(parse("a4 0.4s e4").is_err());
/// ```
pub fn parse(text: &str) -> Result<Melody> {
    Parser::new(text).parse()
}

/// Turns melodies into a single signal, one event after the other.
pub struct Sequencer {
    config: SynthConfig,
    envelope: Option<ADSR>,
}

impl Sequencer {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            envelope: None,
        }
    }

    /// Shape every event with an envelope before it is sequenced.
    ///
    /// Chords are shaped as a whole. As all notes of a chord have the same length,
    /// this is the same as shaping each note individually.
    pub fn with_envelope(mut self, envelope: ADSR) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Sum the waves of several notes played for `duration` seconds.
    pub fn generate_group_wave(&self, notes: &[Note], duration: f64) -> Result<Signal> {
        let mut group = Signal::zeros(sample_count(duration, self.config.sample_rate)?);
        for &note in notes {
            let wave = synth::note_signal(note, duration, &self.config)?;
            mix::superpose_into(&mut group, &wave)?;
        }
        Ok(group)
    }

    pub fn event_wave(&self, event: &MelodyEvent) -> Result<Signal> {
        trace!("synthesizing {:?}", event);
        let wave = match event {
            MelodyEvent::Note { note, duration } => {
                synth::note_signal(*note, *duration, &self.config)?
            }
            MelodyEvent::Chord { notes, duration } => {
                self.generate_group_wave(notes, *duration)?
            }
        };
        match &self.envelope {
            Some(envelope) => envelope.apply(&wave, self.config.sample_rate),
            None => Ok(wave),
        }
    }

    /// Synthesize all events and join them in order.
    pub fn render(&self, melody: &Melody) -> Result<Signal> {
        let waves = melody
            .events
            .iter()
            .map(|event| self.event_wave(event))
            .collect::<Result<Vec<_>>>()?;
        let signal = mix::concat(&waves);
        debug!(
            "rendered {} events into {} samples ({:.2} seconds)",
            melody.events.len(),
            signal.len(),
            signal.duration(self.config.sample_rate)
        );
        Ok(signal)
    }

    /// Parse and render a melody string.
    pub fn render_str(&self, text: &str) -> Result<Signal> {
        self.render(&parse(text)?)
    }
}
