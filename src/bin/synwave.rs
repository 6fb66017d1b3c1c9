// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `synwave` turns note names and melody strings into WAV and text files.

use std::error::Error;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use syn_wave::output::{FileStore, Format};
use syn_wave::synth::envelope::ADSR;
use syn_wave::synth::oscillator::WaveShape;
use syn_wave::synth::{Synth, SynthConfig};
use syn_wave::wave::NamedWave;

#[derive(Debug, StructOpt)]
#[structopt(name = "synwave", about = "Synthesizing waveforms from musical notation")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Samples per second.
    #[structopt(long, default_value = "44100")]
    rate: u32,

    /// Peak amplitude of synthesized notes.
    #[structopt(long, default_value = "8192")]
    amplitude: f64,

    /// Seconds a note lasts when no duration is given.
    #[structopt(long, default_value = "5")]
    duration: f64,

    /// Directory receiving the `wav_files` and `txt_files` sub-directories.
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    output: PathBuf,

    /// Save notes as `wav` (plus text) or as `txt` only.
    #[structopt(long, default_value = "wav")]
    format: Format,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Synthesize single notes, e.g. `a4 c#5`.
    Note {
        notes: Vec<String>,

        /// Length of every note in seconds.
        #[structopt(short, long)]
        length: Option<f64>,

        /// Convert the sine to `triangular` or `square`.
        #[structopt(long)]
        shape: Option<WaveShape>,

        /// Envelope as `attack,decay,sustain,release`.
        #[structopt(long)]
        adsr: Option<ADSR>,
    },
    /// Render a melody like `g4 0.2s b4 0.2s (g3 d5 g5) 0.5s` into a WAV file.
    Melody {
        text: String,

        /// File name of the melody, without extension.
        #[structopt(short, long, default_value = "melody")]
        name: String,

        /// Envelope applied to each note or chord.
        #[structopt(long)]
        adsr: Option<ADSR>,
    },
    /// Play several notes one after another.
    Mix {
        notes: Vec<String>,

        #[structopt(short, long)]
        length: Option<f64>,

        /// Cut the notes to the shortest one and equalize their peaks first.
        #[structopt(long)]
        normalize: bool,
    },
    /// Print a summary of stored waves.
    Show {
        #[structopt(parse(from_os_str))]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let synth = Synth::new(SynthConfig {
        sample_rate: opt.rate,
        max_amplitude: opt.amplitude,
        default_duration: opt.duration,
    });
    let store = synth.file_store(&opt.output);

    match opt.command {
        Command::Note {
            notes,
            length,
            shape,
            adsr,
        } => {
            for name in &notes {
                let mut wave = synth.create_wave(name, length)?;
                if let Some(shape) = shape {
                    let unit = synth.convert_wave(&wave.signal, shape)?;
                    wave.signal = unit.scaled(synth.config().max_amplitude);
                }
                if let Some(envelope) = &adsr {
                    wave = synth.apply_adsr(wave, envelope)?;
                }
                save(&synth, &store, &wave, opt.format)?;
            }
        }
        Command::Melody { text, name, adsr } => {
            let signal = match adsr {
                Some(envelope) => synth.melody_with_envelope(&text, envelope)?,
                None => synth.melody(&text)?,
            };
            synth.save_melody(&store, &signal, &name)?;
        }
        Command::Mix {
            notes,
            length,
            normalize,
        } => {
            let mut waves = notes
                .iter()
                .map(|name| synth.create_wave(name, length))
                .collect::<Result<Vec<_>, _>>()?;
            if normalize {
                let signals: Vec<_> = waves.iter().map(|w| w.signal.clone()).collect();
                let normalized = synth.normalize_waves(&signals)?;
                for (wave, signal) in waves.iter_mut().zip(normalized) {
                    wave.signal = signal;
                }
            }
            let combined = synth.combine_waves(&waves);
            save(&synth, &store, &combined, opt.format)?;
        }
        Command::Show { files } => {
            // unreadable files are reported by `read_wave`, keep going with the rest
            for file in &files {
                if let Some(wave) = synth.read_wave(&store, file) {
                    println!("{}", wave.details());
                }
            }
        }
    }
    Ok(())
}

fn save(
    synth: &Synth,
    store: &FileStore,
    wave: &NamedWave,
    format: Format,
) -> Result<(), Box<dyn Error>> {
    info!("{}", wave.details());
    synth.save_wave(store, wave, format)?;
    Ok(())
}
