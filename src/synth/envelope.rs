// syn.wave -- synthesizing waveforms from musical notation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::str::FromStr;

use log::trace;

use crate::error::{Error, Result};
use crate::wave::Signal;

use super::timeline::sample_count;

/// An Attack-Decay-Sustain-Release envelope.
/// The amplitude first rises from zero to one over `attack` seconds,
/// then decays over an additional `decay` seconds to the `sustain` level where it is held
/// until `release` seconds before the end of the signal. Over these last seconds the
/// volume falls back to zero.
///
/// # Example
///
/// ```
/// use syn_wave::synth::envelope::*;
/// let e = ADSR {
///     attack: 0.25,
///     decay: 0.25,
///     sustain: 0.5,
///     release: 0.25,
/// };
/// assert_eq!(
///     e.gain_curve(8, 8).unwrap(),
///     vec![0.0, 0.5, 1.0, 0.75, 0.5, 0.5, 0.5, 0.25]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ADSR {
    /// Time in seconds to go from 0.0 to 1.0
    pub attack: f64,
    /// Time in seconds to go from 1.0 to `sustain`.
    pub decay: f64,
    /// Constant amplitude between decay and release, in `[0, 1]`.
    pub sustain: f64,
    /// Time in seconds to go from `sustain` to 0.0.
    pub release: f64,
}

impl ADSR {
    /// Check the parameters on their own, independent of any signal.
    pub fn validate(&self) -> Result<()> {
        let times = [
            ("attack", self.attack),
            ("decay", self.decay),
            ("release", self.release),
        ];
        for (name, time) in times.iter() {
            if !time.is_finite() || *time < 0.0 {
                return Err(Error::InvalidEnvelope {
                    reason: format!("{} time must be a non-negative number, got {}", name, time),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.sustain) {
            return Err(Error::InvalidEnvelope {
                reason: format!("sustain level must be within [0, 1], got {}", self.sustain),
            });
        }
        Ok(())
    }

    /// The gain for each of `len` samples at the given sample rate.
    ///
    /// The segments are measured in whole samples. Attack, decay and release together
    /// must fit into the signal, otherwise the envelope is rejected.
    pub fn gain_curve(&self, len: usize, sample_rate: u32) -> Result<Vec<f64>> {
        self.validate()?;
        let samples = |time: f64| {
            sample_count(time, sample_rate).map_err(|_| Error::InvalidEnvelope {
                reason: format!("{} seconds do not fit into a signal", time),
            })
        };
        let attack = samples(self.attack)?;
        let decay = samples(self.decay)?;
        let release = samples(self.release)?;

        let ramps = attack + decay + release;
        if ramps > len {
            return Err(Error::InvalidEnvelope {
                reason: format!(
                    "attack, decay and release take {} samples, but the signal only has {}",
                    ramps, len
                ),
            });
        }
        let sustain = len - ramps;
        trace!(
            "envelope segments: attack {}, decay {}, sustain {}, release {}",
            attack,
            decay,
            sustain,
            release
        );

        let mut curve = Vec::with_capacity(len);
        curve.extend((0..attack).map(|i| i as f64 / attack as f64));
        curve.extend((0..decay).map(|i| 1.0 - (i as f64 / decay as f64) * (1.0 - self.sustain)));
        curve.extend(std::iter::repeat(self.sustain).take(sustain));
        curve.extend((0..release).map(|i| self.sustain * (1.0 - i as f64 / release as f64)));
        Ok(curve)
    }

    /// Shape the amplitude of a signal sampled at `sample_rate`.
    /// The result has the same length as the input.
    pub fn apply(&self, signal: &Signal, sample_rate: u32) -> Result<Signal> {
        let curve = self.gain_curve(signal.len(), sample_rate)?;
        Ok(signal
            .iter()
            .zip(curve.iter())
            .map(|(sample, gain)| sample * gain)
            .collect())
    }
}

/// Parses `attack,decay,sustain,release`, e.g. `0.1,0.05,0.7,0.2`.
impl FromStr for ADSR {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidEnvelope {
            reason: format!("expected attack,decay,sustain,release, got {:?}", s),
        };
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        match values.as_slice() {
            &[attack, decay, sustain, release] => {
                let envelope = ADSR {
                    attack,
                    decay,
                    sustain,
                    release,
                };
                envelope.validate()?;
                Ok(envelope)
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RATE: u32 = 1000;

    fn envelope() -> ADSR {
        ADSR {
            attack: 0.1,
            decay: 0.1,
            sustain: 0.5,
            release: 0.1,
        }
    }

    #[test]
    fn segments() {
        let curve = envelope().gain_curve(1000, RATE).unwrap();
        assert_eq!(curve.len(), 1000);
        // attack
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[50], 0.5);
        // decay
        assert_eq!(curve[100], 1.0);
        assert_eq!(curve[150], 0.75);
        // sustain, including its midpoint
        assert!(curve[200..900].iter().all(|&g| g == 0.5));
        assert_eq!(curve[550], 0.5);
        // release
        assert_eq!(curve[900], 0.5);
        assert_eq!(curve[950], 0.25);
        assert!(curve[999] > 0.0 && curve[999] < 0.01);
    }

    #[test]
    fn apply_keeps_length() {
        let signal = Signal::new(vec![2.0; 500]);
        let shaped = envelope().apply(&signal, RATE).unwrap();
        assert_eq!(shaped.len(), signal.len());
        assert_eq!(shaped.samples()[0], 0.0);
        assert_eq!(shaped.samples()[250], 1.0);
    }

    #[test]
    fn without_attack_starts_at_full_gain() {
        let e = ADSR {
            attack: 0.0,
            ..envelope()
        };
        let curve = e.gain_curve(400, RATE).unwrap();
        assert_eq!(curve[0], 1.0);
    }

    #[test]
    fn ramps_exactly_filling_the_signal() {
        let curve = envelope().gain_curve(300, RATE).unwrap();
        assert_eq!(curve.len(), 300);
        assert_eq!(curve[200], 0.5);
    }

    #[test]
    fn too_long_for_signal() {
        let result = envelope().apply(&Signal::zeros(299), RATE);
        assert_eq!(
            result,
            Err(Error::InvalidEnvelope {
                reason: "attack, decay and release take 300 samples, but the signal only has 299"
                    .into()
            })
        );
    }

    #[test]
    fn ramps_are_counted_in_whole_samples() {
        // 0.9999 seconds of ramps fit into 0.999 seconds, as each ramp is 333 samples
        let e = ADSR {
            attack: 0.3333,
            decay: 0.3333,
            sustain: 0.5,
            release: 0.3333,
        };
        let curve = e.gain_curve(999, RATE).unwrap();
        assert_eq!(curve.len(), 999);
        assert_eq!(curve[333], 1.0);
        assert_eq!(curve[666], 0.5);
        assert!(e.gain_curve(998, RATE).is_err());
    }

    #[test]
    fn huge_ramps() {
        let e = ADSR {
            release: 1e20,
            ..envelope()
        };
        assert!(matches!(
            e.gain_curve(1000, RATE),
            Err(Error::InvalidEnvelope { .. })
        ));
    }

    #[test]
    fn invalid_parameters() {
        let negative = ADSR {
            decay: -0.1,
            ..envelope()
        };
        assert!(negative.validate().is_err());
        let loud = ADSR {
            sustain: 1.5,
            ..envelope()
        };
        assert!(loud.gain_curve(1000, RATE).is_err());
    }

    #[test]
    fn parse() {
        assert_eq!("0.1, 0.1,0.5,0.1".parse::<ADSR>(), Ok(envelope()));
        assert!("0.1,0.1,0.5".parse::<ADSR>().is_err());
        assert!("0.1,0.1,1.5,0.1".parse::<ADSR>().is_err());
        assert!("a,d,s,r".parse::<ADSR>().is_err());
    }
}
