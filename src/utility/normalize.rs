// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-neurosim project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signal normalization

/// Rescale a signal to zero mean and unit variance, in place.
///
/// Zero-variance signals (all samples equal) are only mean-centered; empty
/// signals are left untouched.
pub fn normalize_variance(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }

    let mean = samples.iter().sum::<f32>() / samples.len() as f32;
    for sample in samples.iter_mut() {
        *sample -= mean;
    }

    let variance = samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32;
    if variance > 0.0 {
        let std = variance.sqrt();
        for sample in samples.iter_mut() {
            *sample /= std;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalized_signal_has_zero_mean_unit_variance() {
        let mut sig: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.13).sin() + 2.5).collect();
        normalize_variance(&mut sig);

        let mean = sig.iter().sum::<f32>() / sig.len() as f32;
        let var = sig.iter().map(|s| s * s).sum::<f32>() / sig.len() as f32;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-4);
        assert_relative_eq!(var, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_constant_signal_is_centered_only() {
        let mut sig = vec![3.0f32; 64];
        normalize_variance(&mut sig);
        assert!(sig.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_signal_is_untouched() {
        let mut sig: Vec<f32> = Vec::new();
        normalize_variance(&mut sig);
        assert!(sig.is_empty());
    }
}
