// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This namespace contains all the parts converting from note data to wave data.

pub mod envelope;
pub mod oscillator;
pub mod timeline;

use std::path::{Path, PathBuf};

use log::{error, trace};

use crate::error::Result;
use crate::melody::{self, Sequencer};
use crate::mix;
use crate::note::Note;
use crate::output::{FileStore, Format, PersistError, PersistenceAdapter};
use crate::wave::{NamedWave, Signal};

use envelope::ADSR;
use oscillator::WaveShape;
use timeline::Timeline;

/// Sampling parameters shared by everything that is mixed together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Number of samples per second.
    pub sample_rate: u32,
    /// Peak amplitude of synthesized notes and target of normalization.
    /// The default leaves headroom for chords in 16 bit audio.
    pub max_amplitude: f64,
    /// Duration in seconds of notes created without an explicit duration.
    pub default_duration: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: 44100,
            max_amplitude: 8192.0,
            default_duration: 5.0,
        }
    }
}

/// The sine wave of a note, `duration` seconds long at peak `max_amplitude`.
pub fn note_signal(note: Note, duration: f64, config: &SynthConfig) -> Result<Signal> {
    let timeline = Timeline::generate(duration, config.sample_rate)?;
    trace!(
        "{}: {} Hz for {} samples",
        note,
        note.frequency(),
        timeline.len()
    );
    Ok(oscillator::sine(
        note.frequency(),
        &timeline,
        config.max_amplitude,
    ))
}

/// One-stop interface for creating and manipulating waves with a fixed configuration.
///
/// # Examples
///
/// ```
/// use syn_wave::synth::{Synth, SynthConfig};
///
/// let synth = Synth::new(SynthConfig { sample_rate: 8000, ..SynthConfig::default() });
/// let a4 = synth.create_wave("a4", Some(0.5)).unwrap();
/// assert_eq!(a4.label, "a4");
/// assert_eq!(a4.signal.len(), 4000);
///
/// let melody = synth.melody("a4 0.25s (a4 c4) 0.25s").unwrap();
/// assert_eq!(melody.len(), 4000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synth {
    config: SynthConfig,
}

impl Synth {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Create the wave of a note. Without a duration, the configured default is used.
    pub fn create_wave(&self, note_name: &str, duration: Option<f64>) -> Result<NamedWave> {
        let note: Note = note_name.parse()?;
        let duration = duration.unwrap_or(self.config.default_duration);
        let signal = note_signal(note, duration, &self.config)?;
        Ok(NamedWave::new(note.to_string(), signal))
    }

    /// Cut signals to a common length and scale them to the configured amplitude.
    pub fn normalize_waves(&self, signals: &[Signal]) -> Result<Vec<Signal>> {
        mix::normalize(signals, self.config.max_amplitude)
    }

    /// Reshape a sine signal. The result has a peak amplitude of one.
    pub fn convert_wave(&self, signal: &Signal, shape: WaveShape) -> Result<Signal> {
        oscillator::reshape(signal, shape)
    }

    /// Shape the loudness of a wave, keeping its label.
    pub fn apply_adsr(&self, wave: NamedWave, envelope: &ADSR) -> Result<NamedWave> {
        let signal = envelope.apply(&wave.signal, self.config.sample_rate)?;
        Ok(NamedWave {
            signal,
            ..wave
        })
    }

    /// Play the waves one after another.
    pub fn combine_waves(&self, waves: &[NamedWave]) -> NamedWave {
        mix::combine(waves)
    }

    pub fn generate_group_wave(&self, notes: &[Note], duration: f64) -> Result<Signal> {
        Sequencer::new(self.config).generate_group_wave(notes, duration)
    }

    /// Parse and render a melody string, see [`crate::melody`].
    pub fn melody(&self, text: &str) -> Result<Signal> {
        Sequencer::new(self.config).render(&melody::parse(text)?)
    }

    /// Like [`Synth::melody`], but every note or chord is shaped by `envelope`.
    pub fn melody_with_envelope(&self, text: &str, envelope: ADSR) -> Result<Signal> {
        Sequencer::new(self.config)
            .with_envelope(envelope)
            .render(&melody::parse(text)?)
    }

    /// A store under `root` writing files at the configured sample rate.
    pub fn file_store<P: Into<PathBuf>>(&self, root: P) -> FileStore {
        FileStore::new(root, self.config.sample_rate)
    }

    /// See [`FileStore::save_wave`].
    pub fn save_wave(
        &self,
        store: &FileStore,
        wave: &NamedWave,
        format: Format,
    ) -> Result<Vec<PathBuf>, PersistError> {
        store.save_wave(wave, format)
    }

    pub fn save_melody(
        &self,
        store: &FileStore,
        melody: &Signal,
        name: &str,
    ) -> Result<PathBuf, PersistError> {
        store.save_melody(melody, name)
    }

    /// Read a stored wave. Failures are logged and yield `None`, so that callers
    /// reading many files can skip the broken ones.
    pub fn read_wave<A: PersistenceAdapter + ?Sized>(
        &self,
        store: &A,
        path: &Path,
    ) -> Option<NamedWave> {
        match store.read(path) {
            Ok(wave) => Some(wave),
            Err(err) => {
                error!("{}", err);
                None
            }
        }
    }
}
