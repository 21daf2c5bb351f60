// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! WAV export for simulated signals
//!
//! Dumps a mono f32 signal to a 16-bit PCM WAV file so simulations can be
//! inspected in any audio or signal viewer.

use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Write a mono f32 signal to a 16-bit WAV file.
///
/// Samples are scaled by `i16::MAX` and clamped, so signals should be in
/// \[-1, 1\] (normalized signals may clip on their extreme samples).
///
/// # Arguments
///
/// * `path` - Destination file path
/// * `samples` - Signal samples
/// * `sample_rate` - Sampling rate, in Hz
pub fn write_wav_mono<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;
    Ok(())
}
