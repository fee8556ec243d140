use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{ToolkitError, ToolkitResult};

/// Seed used when none is given, matching the lab's default.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic random source for synthetic data.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Zero-mean Gaussian sample. A negative or non-finite `sigma` is rejected.
    pub fn gaussian(&mut self, sigma: f64) -> ToolkitResult<f64> {
        if sigma == 0.0 {
            return Ok(0.0);
        }
        if !sigma.is_finite() {
            return Err(ToolkitError::InvalidInput(format!("noise sigma {sigma} is not finite")));
        }
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| ToolkitError::InvalidInput(format!("noise sigma {sigma}: {e}")))?;
        Ok(normal.sample(&mut self.rng))
    }

    /// Random background stars for polar sky plots.
    pub fn star_field(&mut self, count: usize, max_radius: f64) -> Vec<Star> {
        (0..count)
            .map(|_| Star {
                theta: self.uniform(0.0, TAU),
                radius: self.uniform(0.0, max_radius),
                size: self.uniform(5.0, 25.0),
                alpha: self.uniform(0.2, 0.8),
            })
            .collect()
    }
}

/// One decorative background star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub theta: f64,
    pub radius: f64,
    pub size: f64,
    pub alpha: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = NoiseSource::seeded(7);
        let mut b = NoiseSource::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.gaussian(1.0).unwrap(), b.gaussian(1.0).unwrap());
        }
    }

    #[test]
    fn test_gaussian_statistics() {
        let mut noise = NoiseSource::seeded(DEFAULT_SEED);
        let samples: Vec<f64> = (0..20_000).map(|_| noise.gaussian(2.0).unwrap()).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.1, "mean {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "sigma {}", var.sqrt());
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        let mut noise = NoiseSource::seeded(3);
        assert_eq!(noise.gaussian(0.0).unwrap(), 0.0);
        assert!(matches!(noise.gaussian(-1.0), Err(ToolkitError::InvalidInput(_))));
        assert!(matches!(noise.gaussian(f64::NAN), Err(ToolkitError::InvalidInput(_))));
        assert!(matches!(noise.gaussian(f64::INFINITY), Err(ToolkitError::InvalidInput(_))));
    }

    #[test]
    fn test_star_field_bounds() {
        let mut noise = NoiseSource::seeded(1);
        let stars = noise.star_field(150, 300.0);
        assert_eq!(stars.len(), 150);
        assert!(stars.iter().all(|s| s.radius >= 0.0 && s.radius < 300.0));
        assert!(stars.iter().all(|s| s.alpha >= 0.2 && s.alpha < 0.8));
    }
}
