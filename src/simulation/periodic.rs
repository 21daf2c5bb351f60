// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Oscillation simulators
//!
//! [`OscillationGenerator`] owns a seedable random stream and exposes the
//! public simulation entry points. Every entry point returns exactly
//! `floor(n_seconds * fs)` samples and variance-normalizes its output
//! (zero mean, unit variance) before returning.
//!
//! # Examples
//!
//! ```rust
//! use rust_neurosim::simulation::{CycleShape, OscillationGenerator};
//!
//! let mut generator = OscillationGenerator::new(12345);
//!
//! // 1 s of a plain 10 Hz sine oscillation at 1 kHz
//! let sig = generator.sim_oscillation(1.0, 1000, 10.0, CycleShape::Sine);
//! assert_eq!(sig.len(), 1000);
//!
//! // Same duration, bursting on and off
//! let bursty = generator.sim_bursty_oscillation(1.0, 1000, 10.0, 0.2, 0.2, CycleShape::Sine);
//! assert_eq!(bursty.len(), 1000);
//! ```

use super::burst::sample_burst_states;
use super::cycles::{sim_cycle, CycleShape};
use super::features::{sample_cycle_features, CycleFeatures, InvalidFeatureError};
use super::synthesis::synthesize;
use super::table::CycleTable;
use crate::utility::normalize::normalize_variance;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::SystemTime;

/// A bursty simulation with its per-cycle ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstySimulation {
    /// The synthesized, variance-normalized signal
    pub signal: Vec<f32>,
    /// Ground-truth cycle labels (sentinel boundary row already dropped).
    /// Amplitudes are those of the raw waveform, before normalization.
    pub table: CycleTable,
}

/// Oscillation simulator owning its random stream.
///
/// Two simulations constructed with the same seed and called with the same
/// arguments in the same order produce bit-identical output.
pub struct OscillationGenerator {
    rng: StdRng,
}

impl OscillationGenerator {
    /// Create a generator with a given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the system time.
    ///
    /// # Panics
    ///
    /// Panics if the system time is before the Unix epoch (extremely unlikely)
    pub fn new_from_system_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;
        Self::new(seed)
    }

    /// Create a generator around an existing random stream.
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Simulate a stationary oscillation by tiling one cycle waveform.
    ///
    /// # Arguments
    ///
    /// * `n_seconds` - Signal duration, in seconds
    /// * `fs` - Sampling rate, in Hz
    /// * `freq` - Oscillation frequency, in Hz
    /// * `shape` - Cycle waveform shape
    ///
    /// # Returns
    ///
    /// `floor(n_seconds * fs)` samples, variance-normalized
    pub fn sim_oscillation(
        &mut self,
        n_seconds: f32,
        fs: u32,
        freq: f32,
        shape: CycleShape,
    ) -> Vec<f32> {
        let n_samples = target_samples(n_seconds, fs);
        let cycle = sim_cycle(cycle_seconds(fs, freq), fs, shape);

        let mut sig = Vec::with_capacity(n_samples + cycle.len());
        while !cycle.is_empty() && sig.len() < n_samples {
            sig.extend_from_slice(&cycle);
        }
        sig.resize(n_samples, 0.0);
        normalize_variance(&mut sig);
        sig
    }

    /// Simulate an oscillation whose cycle onsets jitter around the period.
    ///
    /// Builds an impulse train at the oscillation period, shifts each impulse
    /// by a uniform random offset of at most `jitter` seconds, and convolves
    /// it with the cycle waveform.
    ///
    /// # Arguments
    ///
    /// * `n_seconds` - Signal duration, in seconds
    /// * `fs` - Sampling rate, in Hz
    /// * `freq` - Oscillation frequency, in Hz
    /// * `jitter` - Maximum onset jitter, in seconds
    /// * `shape` - Cycle waveform shape
    ///
    /// # Returns
    ///
    /// `floor(n_seconds * fs)` samples, variance-normalized
    pub fn sim_jittered_oscillation(
        &mut self,
        n_seconds: f32,
        fs: u32,
        freq: f32,
        jitter: f32,
        shape: CycleShape,
    ) -> Vec<f32> {
        let n_samples = target_samples(n_seconds, fs);
        let cycle = sim_cycle(cycle_seconds(fs, freq), fs, shape);
        let len_cycle = cycle.len();

        // Impulse train covering the signal plus one cycle of headroom, so
        // the "valid" convolution below comes out at exactly n_samples.
        let n_impulses = n_samples + len_cycle - 1;
        let mut impulses = vec![false; n_impulses];
        let period = ((fs as f32 / freq) as usize).max(1);
        let max_jitter = (fs as f32 * jitter) as i64;

        let mut index = period;
        while index < n_impulses {
            let jittered = if max_jitter > 0 {
                index as i64 + self.rng.random_range(-max_jitter..max_jitter)
            } else {
                index as i64
            };
            if (0..n_impulses as i64).contains(&jittered) {
                impulses[jittered as usize] = true;
            }
            index += period;
        }

        // Valid-mode convolution of the impulse train with the cycle.
        let mut full = vec![0.0f32; n_impulses + len_cycle - 1];
        for (i, &impulse) in impulses.iter().enumerate() {
            if impulse {
                for (j, &value) in cycle.iter().enumerate() {
                    full[i + j] += value;
                }
            }
        }
        let mut sig = full[len_cycle - 1..len_cycle - 1 + n_samples].to_vec();
        normalize_variance(&mut sig);
        sig
    }

    /// Simulate a bursty oscillation with one fixed cycle waveform.
    ///
    /// The signal is divided into an even grid of cycle slots; each slot
    /// either carries the cycle waveform or stays quiescent according to the
    /// two-state burst process. Slots that do not fit evenly at the end of
    /// the signal stay quiescent.
    ///
    /// # Arguments
    ///
    /// * `n_seconds` - Signal duration, in seconds
    /// * `fs` - Sampling rate, in Hz
    /// * `freq` - Oscillation frequency, in Hz
    /// * `enter_prob` - Probability of a quiescent slot starting a burst
    /// * `leave_prob` - Probability of a bursting slot ending the burst
    /// * `shape` - Cycle waveform shape
    ///
    /// # Returns
    ///
    /// `floor(n_seconds * fs)` samples, variance-normalized
    pub fn sim_bursty_oscillation(
        &mut self,
        n_seconds: f32,
        fs: u32,
        freq: f32,
        enter_prob: f32,
        leave_prob: f32,
        shape: CycleShape,
    ) -> Vec<f32> {
        let n_samples = target_samples(n_seconds, fs);
        let cycle = sim_cycle(cycle_seconds(fs, freq), fs, shape);
        let len_cycle = cycle.len();
        let n_cycles = n_samples / len_cycle;

        let flags = sample_burst_states(&mut self.rng, n_cycles, enter_prob, leave_prob);

        let mut sig = vec![0.0f32; n_samples];
        for (i, &flag) in flags.iter().enumerate() {
            if flag {
                let start = i * len_cycle;
                sig[start..start + len_cycle].copy_from_slice(&cycle);
            }
        }
        normalize_variance(&mut sig);
        sig
    }

    /// Simulate a bursty oscillation with per-cycle random features.
    ///
    /// Every oscillating cycle draws its own period, amplitude, and
    /// rise-decay symmetry from the hierarchical model in `features`; the
    /// synthesized cycles are stitched together continuously (entry ramps,
    /// exit decays, intra-burst blending) and the per-cycle parameters are
    /// returned as ground-truth labels alongside the signal.
    ///
    /// # Arguments
    ///
    /// * `n_seconds` - Signal duration, in seconds
    /// * `fs` - Sampling rate, in Hz
    /// * `enter_prob` - Probability of a quiescent slot starting a burst
    /// * `leave_prob` - Probability of a bursting slot ending the burst
    /// * `features` - Per-cycle feature distribution parameters; the
    ///   oscillation frequency enters through
    ///   [`CycleFeatures::new`](super::CycleFeatures::new)'s mean period
    /// * `max_retries` - Resampling attempts per cycle before failing
    ///   ([`super::DEFAULT_MAX_RETRIES`] is the conventional choice)
    ///
    /// # Returns
    ///
    /// A [`BurstySimulation`] holding the normalized signal (exactly
    /// `floor(n_seconds * fs)` samples) and the cycle table.
    ///
    /// # Errors
    ///
    /// [`InvalidFeatureError`] when some cycle's features stay out of range
    /// through every resampling attempt; no partial signal is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_neurosim::simulation::{CycleFeatures, OscillationGenerator};
    ///
    /// let mut generator = OscillationGenerator::new(7);
    /// let features = CycleFeatures::new(500, 8.0, 0.5).with_amp_burst_std(0.2);
    /// let sim = generator
    ///     .sim_bursty_oscillation_features(3.0, 500, 0.2, 0.2, &features, 5)
    ///     .expect("valid feature ranges");
    /// assert_eq!(sim.signal.len(), 1500);
    /// ```
    pub fn sim_bursty_oscillation_features(
        &mut self,
        n_seconds: f32,
        fs: u32,
        enter_prob: f32,
        leave_prob: f32,
        features: &CycleFeatures,
        max_retries: usize,
    ) -> Result<BurstySimulation, InvalidFeatureError> {
        let n_samples = target_samples(n_seconds, fs);

        // Twice the cycle count needed at the mean period; the surplus
        // absorbs random period variation so the table always covers the
        // requested duration.
        let mean_period = features.period_mean.max(1.0);
        let n_cycles = ((n_samples as f32 / mean_period).ceil() as usize).max(1) * 2;
        debug!(
            "featured bursty simulation: {} samples, {} cycle slots at mean period {}",
            n_samples, n_cycles, features.period_mean
        );

        let flags = sample_burst_states(&mut self.rng, n_cycles, enter_prob, leave_prob);
        let cycles = sample_cycle_features(&mut self.rng, &flags, features, max_retries)?;
        let table = CycleTable::build(&cycles).truncated(n_samples);

        let mut signal = synthesize(&table);
        signal.truncate(n_samples);
        if signal.len() < n_samples {
            // Only reachable when sampled periods collapse far below the
            // mean; pad with quiescence rather than returning short.
            debug!(
                "synthesized signal fell short ({} < {}), zero-padding",
                signal.len(),
                n_samples
            );
            signal.resize(n_samples, 0.0);
        }
        normalize_variance(&mut signal);

        Ok(BurstySimulation {
            signal,
            table: table.without_sentinel(),
        })
    }
}

fn target_samples(n_seconds: f32, fs: u32) -> usize {
    (n_seconds as f64 * fs as f64).floor() as usize
}

/// Duration of one cycle on the tiling grid: `ceil(fs / freq)` samples.
fn cycle_seconds(fs: u32, freq: f32) -> f32 {
    (fs as f32 / freq).ceil() / fs as f32
}
