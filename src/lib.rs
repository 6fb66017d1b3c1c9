// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

pub mod error;
pub mod note;
pub mod wave;

// modules for making sounds
pub mod mix;
pub mod synth;

// Building melodies
pub mod melody;
pub mod output;

pub use error::{Error, Result};
