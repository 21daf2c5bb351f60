// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Cycle feature sampling
//!
//! Draws per-cycle period, amplitude, and rise-decay symmetry values with a
//! two-level hierarchical random model: when a burst begins, burst-level
//! means are drawn once around the global means (using the `*_burst_std`
//! spreads); every oscillating cycle inside the burst then draws its own
//! values around those burst means (using the cycle-level `*_std` spreads).
//!
//! Draws that land outside the valid ranges (`period > 0`, `amp > 0`,
//! `0 < rdsym < 1`) are retried up to a bounded number of attempts; if every
//! attempt fails, the whole simulation fails with [`InvalidFeatureError`]
//! naming the offending features.

use super::table::CycleKind;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default number of resampling attempts before a cycle is declared invalid.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Per-cycle feature distribution parameters.
///
/// Nine named fields: a mean, a cycle-level standard deviation, and a
/// burst-level standard deviation for each of period (in samples), amplitude,
/// and rise-decay symmetry. The burst-level deviation controls how far each
/// burst's mean wanders from the global mean; the cycle-level deviation
/// controls variation between cycles of the same burst.
///
/// All standard deviations default to 0, which makes the simulation
/// deterministic apart from the burst on/off pattern. Use the builder-style
/// `with_*` methods to override individual fields.
///
/// # Examples
///
/// ```
/// use rust_neurosim::simulation::CycleFeatures;
///
/// // 10 Hz oscillation sampled at 1 kHz: 100-sample mean period
/// let features = CycleFeatures::new(1000, 10.0, 0.5)
///     .with_amp_std(0.1)
///     .with_period_burst_std(5.0);
/// assert_eq!(features.period_mean, 100.0);
/// assert_eq!(features.amp_mean, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleFeatures {
    /// Mean cycle period, in samples
    pub period_mean: f32,
    /// Standard deviation of each cycle's period, in samples
    pub period_std: f32,
    /// Standard deviation of each burst's mean period, in samples
    pub period_burst_std: f32,
    /// Mean cycle amplitude
    pub amp_mean: f32,
    /// Standard deviation of each cycle's amplitude
    pub amp_std: f32,
    /// Standard deviation of each burst's mean amplitude
    pub amp_burst_std: f32,
    /// Mean rise-decay symmetry, as the fraction of the period spent rising
    pub rdsym_mean: f32,
    /// Standard deviation of each cycle's rise-decay symmetry
    pub rdsym_std: f32,
    /// Standard deviation of each burst's mean rise-decay symmetry
    pub rdsym_burst_std: f32,
}

impl CycleFeatures {
    /// Create feature parameters for an oscillation at `freq` Hz sampled at
    /// `fs` Hz, with the given mean rise-decay symmetry.
    ///
    /// The mean period is `fs / freq` samples (fractional part discarded),
    /// the mean amplitude is 1, and all standard deviations are 0.
    pub fn new(fs: u32, freq: f32, rdsym: f32) -> Self {
        Self {
            period_mean: (fs as f32 / freq).floor(),
            period_std: 0.0,
            period_burst_std: 0.0,
            amp_mean: 1.0,
            amp_std: 0.0,
            amp_burst_std: 0.0,
            rdsym_mean: rdsym,
            rdsym_std: 0.0,
            rdsym_burst_std: 0.0,
        }
    }

    /// Set the mean cycle period, in samples
    pub fn with_period_mean(mut self, period_mean: f32) -> Self {
        self.period_mean = period_mean;
        self
    }

    /// Set the cycle-level period standard deviation, in samples
    pub fn with_period_std(mut self, period_std: f32) -> Self {
        self.period_std = period_std;
        self
    }

    /// Set the burst-level period standard deviation, in samples
    pub fn with_period_burst_std(mut self, period_burst_std: f32) -> Self {
        self.period_burst_std = period_burst_std;
        self
    }

    /// Set the mean cycle amplitude
    pub fn with_amp_mean(mut self, amp_mean: f32) -> Self {
        self.amp_mean = amp_mean;
        self
    }

    /// Set the cycle-level amplitude standard deviation
    pub fn with_amp_std(mut self, amp_std: f32) -> Self {
        self.amp_std = amp_std;
        self
    }

    /// Set the burst-level amplitude standard deviation
    pub fn with_amp_burst_std(mut self, amp_burst_std: f32) -> Self {
        self.amp_burst_std = amp_burst_std;
        self
    }

    /// Set the mean rise-decay symmetry
    pub fn with_rdsym_mean(mut self, rdsym_mean: f32) -> Self {
        self.rdsym_mean = rdsym_mean;
        self
    }

    /// Set the cycle-level rise-decay symmetry standard deviation
    pub fn with_rdsym_std(mut self, rdsym_std: f32) -> Self {
        self.rdsym_std = rdsym_std;
        self
    }

    /// Set the burst-level rise-decay symmetry standard deviation
    pub fn with_rdsym_burst_std(mut self, rdsym_burst_std: f32) -> Self {
        self.rdsym_burst_std = rdsym_burst_std;
        self
    }
}

/// The three per-cycle features subject to validity enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleFeature {
    /// Cycle period, valid when strictly positive
    Period,
    /// Cycle amplitude, valid when strictly positive
    Amp,
    /// Rise-decay symmetry, valid when strictly inside (0, 1)
    Rdsym,
}

impl fmt::Display for CycleFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleFeature::Period => write!(f, "period"),
            CycleFeature::Amp => write!(f, "amp"),
            CycleFeature::Rdsym => write!(f, "rdsym"),
        }
    }
}

fn join_features(features: &[CycleFeature]) -> String {
    features
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error raised when a cycle's features stayed invalid through every
/// resampling attempt.
///
/// Carries the features that were still out of range on the final attempt.
/// This is fatal to the simulation call; the caller must adjust the
/// [`CycleFeatures`] distribution parameters (means and standard deviations)
/// and restart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "a cycle was repeatedly simulated with invalid feature(s) for: {}; \
     adjust the per-cycle distribution parameters (mean & std) and restart \
     the simulation ({attempts} attempts)",
    join_features(.features)
)]
pub struct InvalidFeatureError {
    /// Features invalid on the final attempt
    pub features: Vec<CycleFeature>,
    /// Number of attempts made before giving up
    pub attempts: usize,
}

/// One cycle slot's sampled parameters, before start offsets are assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledCycle {
    /// Cycle length, in samples
    pub period: usize,
    /// Quiescent, or oscillating with amplitude and symmetry
    pub kind: CycleKind,
}

/// Burst-level means, drawn once at each burst onset.
#[derive(Debug, Clone, Copy)]
struct BurstMeans {
    period: f32,
    amp: f32,
    rdsym: f32,
}

fn draw_normal<R: Rng>(rng: &mut R) -> f32 {
    rng.sample(StandardNormal)
}

fn round_period(period: f32) -> usize {
    period.round().max(0.0) as usize
}

/// Draw one oscillating cycle's features, retrying until valid.
///
/// Up to `max_retries` attempts are made; each attempt draws period, amp,
/// and rdsym (in that order) around the burst means. The first attempt
/// satisfying `period > 0 && amp > 0 && 0 < rdsym < 1` wins. On exhaustion,
/// the features invalid on the final attempt are reported.
fn sample_valid_cycle<R: Rng>(
    rng: &mut R,
    burst: &BurstMeans,
    features: &CycleFeatures,
    max_retries: usize,
) -> Result<(f32, f32, f32), InvalidFeatureError> {
    let mut last = (f32::NAN, f32::NAN, f32::NAN);

    for _ in 0..max_retries {
        let period = burst.period + draw_normal(rng) * features.period_std;
        let amp = burst.amp + draw_normal(rng) * features.amp_std;
        let rdsym = burst.rdsym + draw_normal(rng) * features.rdsym_std;

        if period > 0.0 && amp > 0.0 && rdsym > 0.0 && rdsym < 1.0 {
            return Ok((period, amp, rdsym));
        }
        last = (period, amp, rdsym);
    }

    let mut invalid = Vec::new();
    if !(last.0 > 0.0) {
        invalid.push(CycleFeature::Period);
    }
    if !(last.1 > 0.0) {
        invalid.push(CycleFeature::Amp);
    }
    if !(last.2 > 0.0 && last.2 < 1.0) {
        invalid.push(CycleFeature::Rdsym);
    }

    Err(InvalidFeatureError {
        features: invalid,
        attempts: max_retries,
    })
}

/// Sample the features of every cycle slot.
///
/// Quiescent slots draw only a period around the global mean and reset the
/// burst context. The first oscillating slot of each burst draws the burst
/// means, then every oscillating slot (including the first) draws its cycle
/// values around them with bounded retry.
///
/// Exactly one standard-normal draw is consumed per feature per draw even
/// when the corresponding standard deviation is 0, so seeded streams replay
/// identically whichever deviations are overridden.
///
/// # Arguments
///
/// * `rng` - Random stream for all feature draws
/// * `is_oscillating` - Burst flags from [`super::sample_burst_states`]
/// * `features` - Distribution parameters
/// * `max_retries` - Attempts per oscillating cycle before failing
///
/// # Errors
///
/// [`InvalidFeatureError`] when some oscillating cycle exhausts its retries.
/// No partial output is returned.
pub fn sample_cycle_features<R: Rng>(
    rng: &mut R,
    is_oscillating: &[bool],
    features: &CycleFeatures,
    max_retries: usize,
) -> Result<Vec<SampledCycle>, InvalidFeatureError> {
    let mut cycles = Vec::with_capacity(is_oscillating.len());
    let mut burst: Option<BurstMeans> = None;

    for &is_osc in is_oscillating {
        if !is_osc {
            let period = features.period_mean + draw_normal(rng) * features.period_std;
            burst = None;
            cycles.push(SampledCycle {
                period: round_period(period),
                kind: CycleKind::Quiescent,
            });
        } else {
            let means = burst.get_or_insert_with(|| BurstMeans {
                period: features.period_mean + draw_normal(rng) * features.period_burst_std,
                amp: features.amp_mean + draw_normal(rng) * features.amp_burst_std,
                rdsym: features.rdsym_mean + draw_normal(rng) * features.rdsym_burst_std,
            });
            let (period, amp, rdsym) = sample_valid_cycle(rng, means, features, max_retries)?;
            cycles.push(SampledCycle {
                period: round_period(period),
                kind: CycleKind::Oscillating { amp, rdsym },
            });
        }
    }

    Ok(cycles)
}
