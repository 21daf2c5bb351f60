// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Waveform synthesis
//!
//! Consumes a [`CycleTable`] in temporal order and emits one continuous
//! sample sequence. Each oscillating cycle is a descending then ascending
//! half-cosine whose split point is set by the cycle's rise-decay symmetry.
//! Transitions are kept click-free:
//!
//! - entering a burst overwrites the tail of the preceding quiescent run
//!   with a cosine rise ramp up to the first cycle's amplitude
//! - leaving a burst appends a cosine decay ramp from the last emitted
//!   sample down to zero before the quiescent zero-fill
//! - consecutive oscillating cycles of different amplitude blend the decay
//!   half of the new cycle between the previous peak and the new amplitude
//!
//! The emitted signal covers every row of the table and may overshoot the
//! requested duration by up to one cycle; the caller truncates afterwards.

use super::table::{CycleKind, CycleTable};
use log::debug;
use std::f32::consts::{FRAC_PI_2, PI};

/// Synthesize the signal described by a cycle table.
///
/// Pure function of the table: all randomness happened upstream. Invalid
/// feature values never reach this point, the feature sampler rejects them.
pub fn synthesize(table: &CycleTable) -> Vec<f32> {
    let total_samples: usize = table.iter().map(|r| r.period).sum();
    let mut sig: Vec<f32> = Vec::with_capacity(total_samples);
    let mut previous_was_oscillating = false;

    for record in table {
        match record.kind {
            CycleKind::Quiescent => {
                if previous_was_oscillating {
                    append_burst_exit(&mut sig, record.period);
                } else {
                    sig.extend(std::iter::repeat(0.0).take(record.period));
                }
                previous_was_oscillating = false;
            }
            CycleKind::Oscillating { amp, rdsym } => {
                if !previous_was_oscillating {
                    blend_burst_entry(&mut sig, record.period, amp);
                }
                append_cycle_body(&mut sig, record.period, amp, rdsym, previous_was_oscillating);
                previous_was_oscillating = true;
            }
        }
    }

    debug!(
        "synthesized {} samples from {} cycle rows",
        sig.len(),
        table.len()
    );
    sig
}

/// Cosine decay ramp from the last emitted sample down to zero, then zeros.
///
/// The ramp spans `period / 4` samples easing the phase from 0 to pi/2; the
/// remaining `period - period / 4` samples are silence.
fn append_burst_exit(sig: &mut Vec<f32>, period: usize) {
    let n_ramp = period / 4;
    let last = sig.last().copied().unwrap_or(0.0);

    for k in 0..n_ramp {
        let phase = if n_ramp > 1 {
            FRAC_PI_2 * k as f32 / (n_ramp - 1) as f32
        } else {
            0.0
        };
        sig.push(phase.cos() * last);
    }
    sig.extend(std::iter::repeat(0.0).take(period - n_ramp));
}

/// Cosine rise ramp into a new burst.
///
/// Overwrites the trailing `period / 4 - 1` emitted samples (the tail of the
/// preceding quiescent run) with a cosine ease from just above -pi/2 to 0,
/// scaled by the entering cycle's amplitude. The -pi/2 endpoint is excluded
/// so the ramp grows from near zero rather than restarting at zero.
fn blend_burst_entry(sig: &mut Vec<f32>, period: usize, amp: f32) {
    let n_ramp = period / 4;
    if n_ramp < 2 {
        return;
    }

    let rise: Vec<f32> = (1..n_ramp)
        .map(|k| {
            let phase = -FRAC_PI_2 + FRAC_PI_2 * k as f32 / (n_ramp - 1) as f32;
            phase.cos() * amp
        })
        .collect();

    let n_overwrite = rise.len().min(sig.len());
    let dst_start = sig.len() - n_overwrite;
    let src_start = rise.len() - n_overwrite;
    sig[dst_start..].copy_from_slice(&rise[src_start..]);
}

/// One oscillating cycle: descending then ascending half-cosine.
///
/// The phase runs through (0, pi] over the decay samples, then (-pi, 0] over
/// the rise samples, each segment excluding the boundary it shares with its
/// predecessor so no sample is emitted twice. When the previous row was also
/// oscillating, the decay half is remapped to start at the previous cycle's
/// final sample and settle toward this cycle's amplitude.
fn append_cycle_body(
    sig: &mut Vec<f32>,
    period: usize,
    amp: f32,
    rdsym: f32,
    previous_was_oscillating: bool,
) {
    let rise_samples = (period as f32 * rdsym).round() as usize;
    let decay_samples = period.saturating_sub(rise_samples);

    let mut cycle: Vec<f32> = Vec::with_capacity(decay_samples + rise_samples);
    for k in 1..=decay_samples {
        cycle.push((PI * k as f32 / decay_samples as f32).cos());
    }
    for k in 1..=rise_samples {
        cycle.push((-PI + PI * k as f32 / rise_samples as f32).cos());
    }

    if previous_was_oscillating {
        let last = sig.last().copied().unwrap_or(0.0);
        let scaling = (amp + last) / 2.0;
        let offset = (last - amp) / 2.0;
        for value in &mut cycle[..decay_samples] {
            *value = *value * scaling + offset;
        }
        for value in &mut cycle[decay_samples..] {
            *value *= amp;
        }
    } else {
        for value in &mut cycle {
            *value *= amp;
        }
    }

    sig.extend(cycle);
}
