// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::path::Path;

use syn_wave::output::{FileStore, Format, PersistError, PersistenceAdapter};
use syn_wave::synth::{Synth, SynthConfig};
use syn_wave::wave::Signal;

const RATE: u32 = 8000;

fn synth() -> Synth {
    Synth::new(SynthConfig {
        sample_rate: RATE,
        ..SynthConfig::default()
    })
}

#[test]
fn save_wave_writes_text_and_wav() {
    let dir = tempfile::tempdir().unwrap();
    let synth = synth();
    let store = synth.file_store(dir.path());
    let wave = synth.create_wave("a#2", Some(0.1)).unwrap();

    let written = synth.save_wave(&store, &wave, Format::Wav).unwrap();
    assert_eq!(
        written,
        vec![
            dir.path().join("wav_files").join("a#2.wav"),
            dir.path().join("txt_files").join("a#2.txt"),
        ]
    );
    assert!(written.iter().all(|path| path.is_file()));

    let text_only = synth.create_wave("e4", Some(0.1)).unwrap();
    let written = synth.save_wave(&store, &text_only, Format::Text).unwrap();
    assert_eq!(written, vec![store.text_path("e4")]);
    assert!(!store.wav_path("e4").exists());
}

#[test]
fn text_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let synth = synth();
    let store = synth.file_store(dir.path());
    let wave = synth.create_wave("c4", Some(0.05)).unwrap();
    store.save_wave(&wave, Format::Text).unwrap();

    let read = store.read_text("c4").unwrap();
    assert_eq!(read, wave);
}

#[test]
fn wav_round_trip_rounds_samples() {
    let dir = tempfile::tempdir().unwrap();
    let synth = synth();
    let store = synth.file_store(dir.path());
    let wave = synth.create_wave("a4", Some(0.05)).unwrap();
    store.save_wave(&wave, Format::Wav).unwrap();

    let read = store.read(Path::new("wav_files/a4.wav")).unwrap();
    assert_eq!(read.label, "a4");
    assert_eq!(read.signal.len(), wave.signal.len());
    for (original, stored) in wave.signal.iter().zip(read.signal.iter()) {
        assert_eq!(*stored, original.round());
    }
}

#[test]
fn melody_is_saved_as_wav_only() {
    let dir = tempfile::tempdir().unwrap();
    let synth = synth();
    let store = synth.file_store(dir.path());
    let melody = synth.melody("g4 0.2s b4 0.2s (g3 d5 g5) 0.5s").unwrap();
    assert_eq!(melody.len(), 1600 + 1600 + 4000);

    let path = synth.save_melody(&store, &melody, "tune").unwrap();
    assert_eq!(path, dir.path().join("wav_files").join("tune.wav"));
    assert!(!dir.path().join("txt_files").exists());

    let read = synth.read_wave(&store, &path).unwrap();
    assert_eq!(read.label, "tune");
    assert_eq!(read.signal.len(), melody.len());
}

#[test]
fn loud_samples_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), RATE);
    let signal = Signal::new(vec![50000.0, -50000.0, 12.0]);
    let path = store.save_melody(&signal, "loud").unwrap();

    let read = store.read(&path).unwrap();
    assert_eq!(read.signal.samples(), &[32767.0, -32768.0, 12.0]);
}

#[test]
fn chords_above_the_16_bit_range_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let synth = Synth::new(SynthConfig {
        sample_rate: RATE,
        max_amplitude: 20000.0,
        ..SynthConfig::default()
    });
    let store = synth.file_store(dir.path());
    let chord = synth.melody("(a4 a4) 0.05s").unwrap();
    assert!(chord.peak() > 32767.0);

    let path = synth.save_melody(&store, &chord, "chord").unwrap();
    let read = store.read(&path).unwrap();
    assert_eq!(read.signal.peak(), 32768.0);
    for (original, stored) in chord.iter().zip(read.signal.iter()) {
        assert_eq!(*stored, original.round().max(-32768.0).min(32767.0));
    }
}

#[test]
fn read_failures() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), RATE);

    assert!(matches!(
        store.read_text("missing"),
        Err(PersistError::Io { .. })
    ));
    assert!(matches!(
        store.read(Path::new("wav_files/missing.wav")),
        Err(PersistError::Wav { .. })
    ));
    assert!(matches!(
        store.read(Path::new("a4.mp3")),
        Err(PersistError::UnknownFormat { .. })
    ));

    std::fs::create_dir_all(dir.path().join("txt_files")).unwrap();
    std::fs::write(store.text_path("broken"), "1.0\nnot a number\n").unwrap();
    match store.read_text("broken") {
        Err(PersistError::ParseSample { line, text, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "not a number");
        }
        other => panic!("unexpected result {:?}", other),
    }

    // the facade only logs
    assert_eq!(synth().read_wave(&store, &store.text_path("broken")), None);
}
