// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Burst state generation
//!
//! Models bursting as a memoryless two-state Markov chain over cycle slots:
//! a quiescent slot enters a burst with probability `enter_prob`, and a
//! bursting slot leaves it with probability `leave_prob`.

use rand::Rng;

/// Sample which cycle slots oscillate.
///
/// The first slot is always quiescent; the simulation starts outside a burst.
/// Every later slot consumes exactly one uniform draw from `rng`, so a seeded
/// stream replays the same burst pattern regardless of downstream sampling.
///
/// # Arguments
///
/// * `rng` - Random stream to draw transitions from
/// * `n_cycles` - Number of cycle slots to generate
/// * `enter_prob` - Probability of a quiescent slot starting a burst, in \[0, 1\]
/// * `leave_prob` - Probability of a bursting slot ending the burst, in \[0, 1\]
///
/// # Returns
///
/// A vector of `n_cycles` flags, `true` where the slot oscillates
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rust_neurosim::simulation::sample_burst_states;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let flags = sample_burst_states(&mut rng, 100, 0.2, 0.2);
/// assert_eq!(flags.len(), 100);
/// assert!(!flags[0]);
/// ```
pub fn sample_burst_states<R: Rng>(
    rng: &mut R,
    n_cycles: usize,
    enter_prob: f32,
    leave_prob: f32,
) -> Vec<bool> {
    let mut flags = Vec::with_capacity(n_cycles);
    if n_cycles == 0 {
        return flags;
    }
    flags.push(false);

    for i in 1..n_cycles {
        let u: f32 = rng.random();
        let flag = if flags[i - 1] {
            u > leave_prob
        } else {
            u < enter_prob
        };
        flags.push(flag);
    }

    flags
}
