// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::wave::Signal;

use super::timeline::Timeline;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaveShape {
    Sine,
    Triangular,
    Square,
}

impl FromStr for WaveShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(WaveShape::Sine),
            "triangular" | "triangle" => Ok(WaveShape::Triangular),
            "square" => Ok(WaveShape::Square),
            _ => Err(Error::UnsupportedWaveform {
                shape: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveShape::Sine => "sine",
            WaveShape::Triangular => "triangular",
            WaveShape::Square => "square",
        };
        f.write_str(name)
    }
}

/// Value of a sine wave of `frequency` Hz at `time` seconds.
pub fn sine_at(frequency: f64, time: f64, amplitude: f64) -> f64 {
    amplitude * (2.0 * PI * frequency * time).sin()
}

/// Sample a sine wave of `frequency` Hz with peak `amplitude` along a timeline.
///
/// # Examples
///
/// ```
/// use syn_wave::synth::oscillator::sine;
/// use syn_wave::synth::timeline::Timeline;
///
/// let timeline = Timeline::generate(1.0, 4).unwrap();
/// let wave = sine(1.0, &timeline, 2.0);
/// assert_eq!(wave.len(), 4);
/// assert_eq!(wave.samples()[0], 0.0);
/// assert_eq!(wave.samples()[1], 2.0);
/// ```
pub fn sine(frequency: f64, timeline: &Timeline, amplitude: f64) -> Signal {
    timeline
        .iter()
        .map(|t| sine_at(frequency, t, amplitude))
        .collect()
}

/// Turn a sine signal into another shape with the same zero crossings.
///
/// The input is first normalized to a peak of one, so the result does not depend
/// on the amplitude of the input. The triangular shape spans `[-1, 1]`, the square
/// shape takes the values 0 and 1.
///
/// Fails with [`Error::DegenerateSignal`] on silent input.
pub fn reshape(signal: &Signal, shape: WaveShape) -> Result<Signal> {
    let normalized = signal.normalized_to(1.0)?;
    let reshaped = match shape {
        WaveShape::Sine => normalized,
        WaveShape::Triangular => normalized.iter().map(|&x| triangular(x)).collect(),
        WaveShape::Square => normalized.iter().map(|&x| square(x)).collect(),
    };
    Ok(reshaped)
}

fn triangular(x: f64) -> f64 {
    2.0 * (2.0 * (x - (x + 0.5).floor())).abs() - 1.0
}

/// A sample of exactly zero counts as positive.
fn square(x: f64) -> f64 {
    0.5 * (1.0 + x.signum())
}
