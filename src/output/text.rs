// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Plain text files with one sample per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use snafu::ResultExt;

use super::{Io, ParseSample, PersistError};
use crate::wave::Signal;

pub fn write(path: &Path, signal: &Signal) -> Result<(), PersistError> {
    let file = File::create(path).context(Io { path })?;
    let mut out = BufWriter::new(file);
    for sample in signal.iter() {
        writeln!(out, "{:.18e}", sample).context(Io { path })?;
    }
    out.flush().context(Io { path })
}

/// Blank lines are skipped, everything else must be a number.
pub fn read(path: &Path) -> Result<Signal, PersistError> {
    let content = std::fs::read_to_string(path).context(Io { path })?;
    let mut samples = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let sample = text.parse::<f64>().context(ParseSample {
            path,
            line: index + 1,
            text,
        })?;
        samples.push(sample);
    }
    Ok(Signal::new(samples))
}
