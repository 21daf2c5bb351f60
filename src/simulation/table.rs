// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Cycle table
//!
//! Ordered per-cycle records with cumulative start offsets. The table is
//! both the synthesis plan consumed by [`super::synthesize`] and, with its
//! sentinel row dropped, the ground-truth labels returned to callers for
//! scoring burst-detection algorithms.

use super::features::SampledCycle;

/// Whether a cycle slot oscillates, and with what parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleKind {
    /// Quiescent slot: no amplitude or symmetry applies
    Quiescent,
    /// Oscillating slot with its sampled amplitude and rise-decay symmetry
    Oscillating {
        /// Cycle amplitude
        amp: f32,
        /// Fraction of the period spent rising, in (0, 1)
        rdsym: f32,
    },
}

/// One cycle slot of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleRecord {
    /// Cycle length, in samples
    pub period: usize,
    /// Offset of the cycle's first sample; prefix sum of preceding periods
    pub start_sample: usize,
    /// Quiescent or oscillating parameters
    pub kind: CycleKind,
}

impl CycleRecord {
    /// Whether this slot oscillates
    pub fn is_cycle(&self) -> bool {
        matches!(self.kind, CycleKind::Oscillating { .. })
    }

    /// Cycle amplitude, `None` for quiescent slots
    pub fn amp(&self) -> Option<f32> {
        match self.kind {
            CycleKind::Oscillating { amp, .. } => Some(amp),
            CycleKind::Quiescent => None,
        }
    }

    /// Rise-decay symmetry, `None` for quiescent slots
    pub fn rdsym(&self) -> Option<f32> {
        match self.kind {
            CycleKind::Oscillating { rdsym, .. } => Some(rdsym),
            CycleKind::Quiescent => None,
        }
    }
}

/// Ordered sequence of [`CycleRecord`], insertion order = temporal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleTable {
    records: Vec<CycleRecord>,
}

impl CycleTable {
    /// Assemble the table from sampled cycles, assigning start offsets.
    ///
    /// `start_sample[0]` is 0 and each following offset is the previous
    /// offset plus the previous period.
    pub fn build(cycles: &[SampledCycle]) -> Self {
        let mut records = Vec::with_capacity(cycles.len());
        let mut start_sample = 0usize;
        for cycle in cycles {
            records.push(CycleRecord {
                period: cycle.period,
                start_sample,
                kind: cycle.kind,
            });
            start_sample += cycle.period;
        }
        Self { records }
    }

    /// Keep only the rows starting before `n_samples`.
    ///
    /// The last retained row usually extends past `n_samples`; it stays in
    /// the table so synthesis covers the full requested duration, and is
    /// dropped by [`CycleTable::without_sentinel`] before the table is
    /// handed out as labels.
    pub fn truncated(mut self, n_samples: usize) -> Self {
        self.records.retain(|r| r.start_sample < n_samples);
        self
    }

    /// Drop the final row, which bounds synthesis but is not a labeled cycle.
    pub fn without_sentinel(mut self) -> Self {
        self.records.pop();
        self
    }

    /// The records, in temporal order
    pub fn records(&self) -> &[CycleRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in temporal order
    pub fn iter(&self) -> std::slice::Iter<'_, CycleRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a CycleTable {
    type Item = &'a CycleRecord;
    type IntoIter = std::slice::Iter<'a, CycleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
