// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Errors raised while synthesizing, shaping and mixing waves.
//!
//! All of these indicate bad input to an operation, so they abort the operation
//! instead of silently producing a zero or truncated signal.
//! Errors of the persistence layer live in [`crate::output::PersistError`].

use snafu::Snafu;

use crate::melody::ParseError;

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Unknown note {:?}", name))]
    UnknownNote { name: String },

    #[snafu(display("Unsupported wave shape {:?}, use 'sine', 'triangular' or 'square'", shape))]
    UnsupportedWaveform { shape: String },

    #[snafu(display("Signal is silent, cannot scale it to a peak amplitude"))]
    DegenerateSignal,

    #[snafu(display("At least one signal is required"))]
    EmptyInput,

    #[snafu(display("Expected a signal of {} samples, got {}", expected, actual))]
    LengthMismatch { expected: usize, actual: usize },

    #[snafu(display("Invalid envelope: {}", reason))]
    InvalidEnvelope { reason: String },

    #[snafu(display("Invalid duration {} seconds", duration))]
    InvalidDuration { duration: f64 },

    #[snafu(display("Malformed melody: {}", source))]
    MalformedMelody { source: ParseError },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
