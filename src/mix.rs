// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Putting several signals together, one after another or on top of each other.
//!
//! All signals passed to the same call must share a sample rate.

use log::debug;

use crate::error::{Error, Result};
use crate::wave::{NamedWave, Signal};

/// Label of waves produced by [`combine`].
pub const COMBINED_LABEL: &str = "combined";

/// Bring signals to a common length and loudness.
///
/// All signals are cut to the length of the shortest one, then each of them is scaled
/// so that its peak equals `target_amplitude`.
///
/// # Examples
///
/// ```
/// use syn_wave::mix::normalize;
/// use syn_wave::wave::Signal;
///
/// let a = Signal::new(vec![1.0, -2.0, 4.0]);
/// let b = Signal::new(vec![0.5, 0.25]);
/// let normalized = normalize(&[a, b], 10.0).unwrap();
/// assert_eq!(normalized[0].samples(), &[5.0, -10.0]);
/// assert_eq!(normalized[1].samples(), &[10.0, 5.0]);
/// ```
pub fn normalize(signals: &[Signal], target_amplitude: f64) -> Result<Vec<Signal>> {
    let min_len = signals
        .iter()
        .map(Signal::len)
        .min()
        .ok_or(Error::EmptyInput)?;
    debug!(
        "normalizing {} signals to {} samples at peak {}",
        signals.len(),
        min_len,
        target_amplitude
    );
    signals
        .iter()
        .map(|signal| signal.truncated(min_len).normalized_to(target_amplitude))
        .collect()
}

/// Join signals one after another, in the given order.
///
/// Boundaries are hard cuts, there is no cross-fading. Joining nothing yields an
/// empty signal.
pub fn concat(signals: &[Signal]) -> Signal {
    let total = signals.iter().map(Signal::len).sum();
    let mut samples = Vec::with_capacity(total);
    for signal in signals {
        samples.extend_from_slice(signal.samples());
    }
    Signal::new(samples)
}

/// Add a signal sample by sample onto a buffer of the same length.
pub fn superpose_into(buffer: &mut Signal, signal: &Signal) -> Result<()> {
    if buffer.len() != signal.len() {
        return Err(Error::LengthMismatch {
            expected: buffer.len(),
            actual: signal.len(),
        });
    }
    for (out, sample) in buffer.samples_mut().iter_mut().zip(signal.iter()) {
        *out += sample;
    }
    Ok(())
}

/// Sum signals of equal length, e.g. the notes of a chord.
///
/// # Examples
///
/// ```
/// use syn_wave::mix::superpose;
/// use syn_wave::wave::Signal;
///
/// let sum = superpose(&[Signal::new(vec![1.0, 2.0]), Signal::new(vec![0.5, -2.0])]).unwrap();
/// assert_eq!(sum.samples(), &[1.5, 0.0]);
/// assert!(superpose(&[Signal::zeros(2), Signal::zeros(3)]).is_err());
/// ```
pub fn superpose(signals: &[Signal]) -> Result<Signal> {
    let first = signals.first().ok_or(Error::EmptyInput)?;
    let mut sum = Signal::zeros(first.len());
    for signal in signals {
        superpose_into(&mut sum, signal)?;
    }
    Ok(sum)
}

/// Concatenate named waves into a single wave labelled [`COMBINED_LABEL`].
pub fn combine(waves: &[NamedWave]) -> NamedWave {
    let signals: Vec<Signal> = waves.iter().map(|w| w.signal.clone()).collect();
    NamedWave::new(COMBINED_LABEL, concat(&signals))
}
