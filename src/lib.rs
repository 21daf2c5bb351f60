// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Synthetic Neural Oscillation Simulator
//!
//! This crate generates synthetic time series that mimic bursty neural
//! oscillations: periods of rhythmic activity interleaved with quiescence,
//! where every oscillatory cycle carries its own randomly varying amplitude,
//! period, and rise-decay symmetry.
//!
//! The simulators are commonly used for:
//!
//! - Validating burst-detection algorithms against known ground truth
//! - Evaluating cycle-by-cycle waveform analysis pipelines
//! - Producing labeled test signals with controlled statistics
//! - Benchmarking oscillation feature estimators
//!
//! ## Simulators
//!
//! * [`simulation::OscillationGenerator::sim_oscillation`] - a stationary
//!   oscillation built by tiling one cycle waveform
//! * [`simulation::OscillationGenerator::sim_jittered_oscillation`] - a tiled
//!   oscillation with random jitter applied to every cycle onset
//! * [`simulation::OscillationGenerator::sim_bursty_oscillation`] - a tiled
//!   oscillation gated by a two-state burst process
//! * [`simulation::OscillationGenerator::sim_bursty_oscillation_features`] -
//!   a bursty oscillation where each cycle's period, amplitude, and
//!   rise-decay symmetry are drawn from a hierarchical random model, with the
//!   per-cycle ground truth returned alongside the signal
//!
//! ## Example
//!
//! ```rust
//! use rust_neurosim::simulation::{CycleFeatures, OscillationGenerator};
//!
//! // Seeded generator so the simulation is reproducible
//! let mut generator = OscillationGenerator::new(12345);
//!
//! // 10 Hz bursty oscillation, 2 s at 1 kHz, with amplitude variation
//! let features = CycleFeatures::new(1000, 10.0, 0.5).with_amp_std(0.1);
//! let simulation = generator
//!     .sim_bursty_oscillation_features(2.0, 1000, 0.2, 0.2, &features, 5)
//!     .expect("cycle features within valid ranges");
//!
//! assert_eq!(simulation.signal.len(), 2000);
//! for record in simulation.table.records() {
//!     // per-cycle ground truth for downstream burst-detection scoring
//!     let _ = (record.is_cycle(), record.period, record.start_sample);
//! }
//! ```

pub mod simulation;
pub mod utility;
