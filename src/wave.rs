// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.
//!
//! A [`Signal`] does not store its sample rate. All signals that are mixed
//! together must have been sampled at the same rate, which is usually the one
//! of the [`SynthConfig`](crate::synth::SynthConfig) in use.

use std::fmt;
use std::iter::FromIterator;

use crate::error::{Error, Result};

/// A mono buffer of floating point samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
}

impl Signal {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// A silent signal of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Size of the signal in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the signal in seconds when played back at `sample_rate`.
    pub fn duration(&self, sample_rate: u32) -> f64 {
        self.len() as f64 / sample_rate as f64
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    /// The largest absolute sample value, zero for an empty signal.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_wave::wave::Signal;
    ///
    /// assert_eq!(Signal::new(vec![0.5, -2.0, 1.0]).peak(), 2.0);
    /// assert_eq!(Signal::default().peak(), 0.0);
    /// ```
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0f64, |max, s| max.max(s.abs()))
    }

    /// Multiply every sample with `factor`.
    pub fn scaled(&self, factor: f64) -> Signal {
        self.samples.iter().map(|s| s * factor).collect()
    }

    /// Rescale the signal so that its peak equals `target`.
    ///
    /// Fails with [`Error::DegenerateSignal`] if there is no peak to scale, i.e.
    /// when the signal is silent or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_wave::wave::Signal;
    ///
    /// let signal = Signal::new(vec![0.5, -0.25]).normalized_to(2.0).unwrap();
    /// assert_eq!(signal.samples(), &[2.0, -1.0]);
    /// assert!(Signal::zeros(4).normalized_to(1.0).is_err());
    /// ```
    pub fn normalized_to(&self, target: f64) -> Result<Signal> {
        let peak = self.peak();
        if peak == 0.0 {
            return Err(Error::DegenerateSignal);
        }
        Ok(self.scaled(target / peak))
    }

    /// The first `len` samples, or the whole signal if it is shorter.
    pub fn truncated(&self, len: usize) -> Signal {
        Signal::new(self.samples[..len.min(self.len())].to_vec())
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Signal::new(samples)
    }
}

impl FromIterator<f64> for Signal {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Signal::new(iter.into_iter().collect())
    }
}

/// A signal together with a label telling where it came from,
/// e.g. the note name, `combined`, or the name of a melody.
///
/// The label doubles as file name when the wave is saved.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedWave {
    pub label: String,
    pub signal: Signal,
}

impl NamedWave {
    pub fn new<S: Into<String>>(label: S, signal: Signal) -> Self {
        Self {
            label: label.into(),
            signal,
        }
    }

    /// Short human readable summary of the wave.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_wave::wave::{NamedWave, Signal};
    ///
    /// let wave = NamedWave::new("a4", Signal::new(vec![0.0, 1.0, 0.5]));
    /// assert_eq!(wave.details(), "Note: a4, Sound wave: [0, 1, 0.5] (3 samples)");
    /// ```
    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NamedWave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // abbreviate long waves to their first and last few samples
        const SHOWN: usize = 3;
        let samples = self.signal.samples();
        let join = |part: &[f64]| {
            part.iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let body = if samples.len() <= 2 * SHOWN {
            join(samples)
        } else {
            format!(
                "{}, ..., {}",
                join(&samples[..SHOWN]),
                join(&samples[samples.len() - SHOWN..])
            )
        };
        write!(
            f,
            "Note: {}, Sound wave: [{}] ({} samples)",
            self.label,
            body,
            samples.len()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truncate() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(signal.truncated(2).samples(), &[1.0, 2.0]);
        assert_eq!(signal.truncated(10), signal);
        assert!(signal.truncated(0).is_empty());
    }

    #[test]
    fn duration() {
        assert_eq!(Signal::zeros(22050).duration(44100), 0.5);
    }

    #[test]
    fn long_details_are_abbreviated() {
        let wave = NamedWave::new("combined", (0..10).map(f64::from).collect());
        assert_eq!(
            wave.details(),
            "Note: combined, Sound wave: [0, 1, 2, ..., 7, 8, 9] (10 samples)"
        );
    }
}
