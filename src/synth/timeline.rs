// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The points in time at which a wave is sampled.

use crate::error::{Error, Result};

/// Evenly spaced timestamps covering `[0, duration)`.
///
/// The end point is excluded, so two timelines of the same duration
/// produce signals that can be joined without a gap or an overlap.
///
/// # Examples
///
/// ```
/// use syn_wave::synth::timeline::Timeline;
///
/// let timeline = Timeline::generate(0.5, 8).unwrap();
/// assert_eq!(timeline.len(), 4);
/// assert_eq!(timeline.iter().collect::<Vec<_>>(), vec![0.0, 0.125, 0.25, 0.375]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    duration: f64,
    len: usize,
}

impl Timeline {
    /// A timeline of `floor(duration * sample_rate)` samples.
    ///
    /// Fails for durations rejected by [`sample_count`].
    pub fn generate(duration: f64, sample_rate: u32) -> Result<Timeline> {
        Ok(Timeline {
            duration,
            len: sample_count(duration, sample_rate)?,
        })
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The timestamp of sample `index` in seconds.
    pub fn time(&self, index: usize) -> f64 {
        index as f64 * self.duration / self.len as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |index| self.time(index))
    }
}

/// Upper limit on the length of a single signal, about 100 minutes at 44.1 kHz.
pub const MAX_SAMPLES: usize = 1 << 28;

/// Number of samples needed for `duration` seconds, rounded down.
///
/// Fails for negative or non-finite durations, and for durations needing more
/// than [`MAX_SAMPLES`] samples.
pub fn sample_count(duration: f64, sample_rate: u32) -> Result<usize> {
    let count = (duration * sample_rate as f64).floor();
    if !duration.is_finite() || duration < 0.0 || !(count <= MAX_SAMPLES as f64) {
        return Err(Error::InvalidDuration { duration });
    }
    Ok(count as usize)
}
