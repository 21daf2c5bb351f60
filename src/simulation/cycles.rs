// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Single-cycle waveform generation
//!
//! One cycle of an oscillation, in a selectable shape. The tiled simulators
//! in [`super::periodic`] repeat these cycles across the signal; shapes with
//! parameters carry them in the [`CycleShape`] variant.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Cycle waveform shapes.
///
/// Serializes with a `type` tag (`sine`, `asine`, `sawtooth`, `gaussian`,
/// `exp`, `2exp`) so shapes can be selected from configuration files.
///
/// # Examples
///
/// ```
/// use rust_neurosim::simulation::CycleShape;
///
/// let shape: CycleShape =
///     serde_json::from_str(r#"{ "type": "asine", "rdsym": 0.3 }"#).unwrap();
/// assert_eq!(shape, CycleShape::Asine { rdsym: 0.3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CycleShape {
    /// One period of a sine wave
    Sine,
    /// Asymmetric sine: `rdsym` is the fraction of the period spent rising
    Asine {
        /// Rise-decay symmetry, in (0, 1)
        rdsym: f32,
    },
    /// Sawtooth ramp: `width` is the fraction of the period spent rising
    Sawtooth {
        /// Rise width, in \[0, 1\]
        width: f32,
    },
    /// Gaussian bump centered mid-cycle
    Gaussian {
        /// Standard deviation, in seconds
        std: f32,
    },
    /// Decaying exponential starting at the cycle onset
    Exp {
        /// Decay time constant, in seconds
        tau_d: f32,
    },
    /// Difference of exponentials (synaptic-current-like rise and decay)
    #[serde(rename = "2exp")]
    TwoExp {
        /// Rise time constant, in seconds
        tau_r: f32,
        /// Decay time constant, in seconds
        tau_d: f32,
    },
}

/// Simulate one cycle of an oscillation.
///
/// # Arguments
///
/// * `n_seconds` - Cycle duration, in seconds
/// * `fs` - Sampling rate, in Hz
/// * `shape` - Waveform shape and its parameters
///
/// # Returns
///
/// `ceil(n_seconds * fs)` samples of the requested cycle
///
/// # Examples
///
/// ```
/// use rust_neurosim::simulation::{sim_cycle, CycleShape};
///
/// let cycle = sim_cycle(0.1, 1000, CycleShape::Sine);
/// assert_eq!(cycle.len(), 100);
/// assert!(cycle[0].abs() < 1e-6);
/// ```
pub fn sim_cycle(n_seconds: f32, fs: u32, shape: CycleShape) -> Vec<f32> {
    // Relative backoff keeps f32 round-off (0.1 * 1000 = 100.0000015) from
    // ceiling one sample past the intended cycle length.
    let exact = n_seconds as f64 * fs as f64;
    let n_samples = (exact * (1.0 - 1e-6)).ceil() as usize;
    let mut cycle = Vec::with_capacity(n_samples);

    match shape {
        CycleShape::Sine => {
            for i in 0..n_samples {
                cycle.push((2.0 * PI * i as f32 / n_samples as f32).sin());
            }
        }
        CycleShape::Asine { rdsym } => {
            // Rise from trough to peak over the rdsym fraction of the
            // period, decay back over the rest.
            let n_rise = (n_samples as f32 * rdsym).round() as usize;
            let n_decay = n_samples - n_rise.min(n_samples);
            for k in 0..n_rise {
                cycle.push((-PI / 2.0 + PI * k as f32 / n_rise as f32).sin());
            }
            for k in 0..n_decay {
                cycle.push((PI / 2.0 + PI * k as f32 / n_decay as f32).sin());
            }
        }
        CycleShape::Sawtooth { width } => {
            for i in 0..n_samples {
                let p = i as f32 / n_samples as f32;
                let value = if p < width {
                    -1.0 + 2.0 * p / width
                } else if width < 1.0 {
                    1.0 - 2.0 * (p - width) / (1.0 - width)
                } else {
                    1.0
                };
                cycle.push(value);
            }
        }
        CycleShape::Gaussian { std } => {
            let center = n_seconds / 2.0;
            for i in 0..n_samples {
                let t = i as f32 / fs as f32;
                let d = t - center;
                cycle.push((-d * d / (2.0 * std * std)).exp());
            }
        }
        CycleShape::Exp { tau_d } => {
            for i in 0..n_samples {
                let t = i as f32 / fs as f32;
                cycle.push((-t / tau_d).exp());
            }
        }
        CycleShape::TwoExp { tau_r, tau_d } => {
            for i in 0..n_samples {
                let t = i as f32 / fs as f32;
                cycle.push((-t / tau_d).exp() - (-t / tau_r).exp());
            }
            let peak = cycle.iter().fold(0.0f32, |m, &v| m.max(v.abs()));
            if peak > 0.0 {
                for value in &mut cycle {
                    *value /= peak;
                }
            }
        }
    }

    cycle
}
