// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Oscillation simulation module
//!
//! This module contains the bursty-oscillation engine and the simpler tiled
//! oscillation simulators built on top of it.
//!
//! # Pipeline
//!
//! The featured bursty simulator runs as one sequential pipeline:
//!
//! 1. [`burst::sample_burst_states`] - two-state Markov chain marking which
//!    cycle slots oscillate
//! 2. [`features::sample_cycle_features`] - hierarchical (burst-level, then
//!    cycle-level) random draws of period/amplitude/symmetry, with bounded
//!    retry on invalid values
//! 3. [`table::CycleTable`] - ordered per-cycle records with cumulative
//!    start offsets, truncated to the requested length
//! 4. [`synthesis::synthesize`] - stitches the individually parameterized
//!    cycles into one continuous signal
//!
//! All sampling steps are generic over [`rand::Rng`], so callers own the
//! random stream and seeded simulations replay bit-identically.

pub mod burst;
pub mod cycles;
pub mod features;
pub mod periodic;
pub mod synthesis;
pub mod table;

// Re-exports for use in other modules
pub use burst::sample_burst_states;
pub use cycles::{sim_cycle, CycleShape};
pub use features::{
    sample_cycle_features, CycleFeature, CycleFeatures, InvalidFeatureError, SampledCycle,
    DEFAULT_MAX_RETRIES,
};
pub use periodic::{BurstySimulation, OscillationGenerator};
pub use synthesis::synthesize;
pub use table::{CycleKind, CycleRecord, CycleTable};
