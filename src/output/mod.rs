// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Saving waves to disk and reading them back.
//!
//! Errors in here are not fatal for the synthesis itself. Callers are expected to
//! report them and carry on with the next wave.

pub mod text;
pub mod wav;

use std::fmt;
use std::io;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};
use snafu::{ResultExt, Snafu};

use crate::wave::{NamedWave, Signal};

/// Sub-directory of a [`FileStore`] holding WAV files.
pub const WAV_DIR: &str = "wav_files";
/// Sub-directory of a [`FileStore`] holding numeric text files.
pub const TEXT_DIR: &str = "txt_files";

#[derive(Debug, Snafu)]
pub enum PersistError {
    #[snafu(display("Could not create directory {}: {}", path.display(), source))]
    CreateDir { path: PathBuf, source: io::Error },

    #[snafu(display("Could not access {}: {}", path.display(), source))]
    Io { path: PathBuf, source: io::Error },

    #[snafu(display("Could not process WAV file {}: {}", path.display(), source))]
    Wav { path: PathBuf, source: hound::Error },

    #[snafu(display(
        "{}:{}: malformed sample {:?}: {}",
        path.display(),
        line,
        text,
        source
    ))]
    ParseSample {
        path: PathBuf,
        line: usize,
        text: String,
        source: ParseFloatError,
    },

    #[snafu(display("Cannot tell the wave format of {}", path.display()))]
    UnknownFormat { path: PathBuf },
}

/// The file formats a wave can be stored in.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    /// Mono 16 bit PCM WAV.
    Wav,
    /// One sample per line in plain text.
    Text,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Wav => "wav",
            Format::Text => "txt",
        }
    }

    /// Guess the format from the extension of a file.
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(Format::Wav),
            "txt" | "text" => Ok(Format::Text),
            _ => Err(format!("unknown format {:?}, use 'wav' or 'txt'", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Stores signals somewhere and retrieves them again.
///
/// Signals handed to `write` must already fit the target format, e.g. stay within the
/// 16 bit range for WAV files. They are not rescaled.
pub trait PersistenceAdapter {
    fn write(
        &self,
        signal: &Signal,
        sample_rate: u32,
        destination: &Path,
        format: Format,
    ) -> Result<(), PersistError>;

    /// Read a wave back, labelled by the name it was stored under.
    fn read(&self, source: &Path) -> Result<NamedWave, PersistError>;
}

/// Keeps waves in a directory, WAV files and text files in separate sub-directories.
/// Relative paths passed to the [`PersistenceAdapter`] methods are resolved against
/// the root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    sample_rate: u32,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P, sample_rate: u32) -> Self {
        Self {
            root: root.into(),
            sample_rate,
        }
    }

    pub fn wav_path(&self, label: &str) -> PathBuf {
        self.root.join(WAV_DIR).join(file_name(label, Format::Wav))
    }

    pub fn text_path(&self, label: &str) -> PathBuf {
        self.root.join(TEXT_DIR).join(file_name(label, Format::Text))
    }

    /// Save a wave as text, and additionally as WAV if that format is requested.
    /// Returns the paths written to.
    pub fn save_wave(&self, wave: &NamedWave, format: Format) -> Result<Vec<PathBuf>, PersistError> {
        let mut written = Vec::new();
        if format == Format::Wav {
            let path = self.wav_path(&wave.label);
            self.write(&wave.signal, self.sample_rate, &path, Format::Wav)?;
            written.push(path);
        }
        let path = self.text_path(&wave.label);
        self.write(&wave.signal, self.sample_rate, &path, Format::Text)?;
        written.push(path);
        Ok(written)
    }

    /// Save a melody as WAV file only.
    ///
    /// Chords are the sum of their notes, so their peak may exceed the configured
    /// amplitude. Samples beyond the 16 bit range are clamped.
    pub fn save_melody(&self, melody: &Signal, name: &str) -> Result<PathBuf, PersistError> {
        let path = self.wav_path(name);
        self.write(melody, self.sample_rate, &path, Format::Wav)?;
        Ok(path)
    }

    /// Read the text file of a wave previously saved under `label`.
    pub fn read_text(&self, label: &str) -> Result<NamedWave, PersistError> {
        self.read(&self.text_path(label))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn file_name(label: &str, format: Format) -> String {
    format!("{}.{}", label, format.extension())
}

impl PersistenceAdapter for FileStore {
    fn write(
        &self,
        signal: &Signal,
        sample_rate: u32,
        destination: &Path,
        format: Format,
    ) -> Result<(), PersistError> {
        let path = self.resolve(destination);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).context(CreateDir { path: dir })?;
        }
        match format {
            Format::Wav => wav::write(&path, signal, sample_rate)?,
            Format::Text => text::write(&path, signal)?,
        }
        info!("Saved wave as {}", path.display());
        Ok(())
    }

    fn read(&self, source: &Path) -> Result<NamedWave, PersistError> {
        let path = self.resolve(source);
        let format = Format::from_path(&path).ok_or_else(|| PersistError::UnknownFormat {
            path: path.clone(),
        })?;
        let signal = match format {
            Format::Wav => {
                let (signal, sample_rate) = wav::read(&path)?;
                if sample_rate != self.sample_rate {
                    warn!(
                        "{} is sampled at {} Hz, expected {} Hz",
                        path.display(),
                        sample_rate,
                        self.sample_rate
                    );
                }
                signal
            }
            Format::Text => text::read(&path)?,
        };
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(NamedWave::new(label, signal))
    }
}
