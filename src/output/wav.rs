// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mono 16 bit WAV files.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};
use snafu::ResultExt;

use super::{PersistError, Wav};
use crate::wave::Signal;

/// Write the samples as they are, rounded to 16 bit integers.
/// Samples outside of the 16 bit range are clamped.
pub fn write(path: &Path, signal: &Signal, sample_rate: u32) -> Result<(), PersistError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).context(Wav { path })?;

    let mut clamped = 0usize;
    for sample in signal.iter() {
        let rounded = sample.round();
        if rounded > i16::MAX as f64 || rounded < i16::MIN as f64 {
            clamped += 1;
        }
        let value = rounded.max(i16::MIN as f64).min(i16::MAX as f64) as i16;
        writer.write_sample(value).context(Wav { path })?;
    }
    writer.finalize().context(Wav { path })?;

    if clamped > 0 {
        warn!(
            "{}: clamped {} of {} samples to the 16 bit range",
            path.display(),
            clamped,
            signal.len()
        );
    }
    Ok(())
}

/// Read the first channel of a WAV file, without rescaling the sample values.
/// Also returns the sample rate of the file.
pub fn read(path: &Path) -> Result<(Signal, u32), PersistError> {
    let reader = WavReader::open(path).context(Wav { path })?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    debug!(
        "{}: {} channels, {} bits at {} Hz",
        path.display(),
        spec.channels,
        spec.bits_per_sample,
        spec.sample_rate
    );

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(channels)
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<f64>, hound::Error>>(),
        SampleFormat::Int => reader
            .into_samples::<i32>()
            .step_by(channels)
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<f64>, hound::Error>>(),
    }
    .context(Wav { path })?;

    Ok((Signal::new(samples), spec.sample_rate))
}
