use log::debug;
use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use crate::algorithms::transit::{transit_model, TransitParameters};
use crate::core::{LightCurve, TRAPPIST1_PLANETS};
use crate::error::{ToolkitError, ToolkitResult};

/// Kepler-22b as it appears in the lab data.
pub const KEPLER22B_PARAMETERS: TransitParameters = TransitParameters {
    planet_size: 0.06,
    orbital_period: 289.9,
    speed_factor: 1.0,
};

/// Radius ratios used for the synthetic TRAPPIST-1 planets, b..h.
const TRAPPIST1_RADIUS_RATIOS: [f64; 7] = [0.085, 0.083, 0.060, 0.070, 0.080, 0.090, 0.060];

/// Transit parameters for every TRAPPIST-1 planet.
pub fn trappist1_transit_parameters() -> Vec<TransitParameters> {
    TRAPPIST1_PLANETS
        .iter()
        .zip(TRAPPIST1_RADIUS_RATIOS)
        .map(|(planet, size)| TransitParameters::new(size, planet.period_days(), 1.0))
        .collect()
}

/// Sampling and noise settings for a synthetic light curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSpec {
    pub duration_days: f64,
    pub cadence_days: f64,
    pub noise_sigma: f64,
}

impl SimulationSpec {
    pub fn sample_times(&self) -> ToolkitResult<Vec<f64>> {
        if !(self.cadence_days.is_finite() && self.cadence_days > 0.0) {
            return Err(ToolkitError::InvalidInput(format!(
                "cadence must be positive, got {}",
                self.cadence_days
            )));
        }
        if !(self.duration_days.is_finite() && self.duration_days >= 0.0) {
            return Err(ToolkitError::InvalidInput(format!(
                "duration must be non-negative, got {}",
                self.duration_days
            )));
        }
        let n = (self.duration_days / self.cadence_days).floor() as usize;
        Ok((0..n).map(|i| i as f64 * self.cadence_days).collect())
    }
}

/// Datasets used by the three missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPreset {
    /// 1200 days of Kepler photometry with three Kepler-22b transits
    Kepler22b,
    /// 20 days of TRAPPIST-1 photometry for the detective mission
    Trappist1,
    /// 40 days of JWST-style TRAPPIST-1 photometry for the habitable-zone mission
    Trappist1Jwst,
}

impl SimulationPreset {
    pub fn spec(&self) -> SimulationSpec {
        match self {
            SimulationPreset::Kepler22b => SimulationSpec {
                duration_days: 1200.0,
                cadence_days: 0.25,
                noise_sigma: 2e-4,
            },
            SimulationPreset::Trappist1 => SimulationSpec {
                duration_days: 20.0,
                cadence_days: 0.005,
                noise_sigma: 3e-4,
            },
            SimulationPreset::Trappist1Jwst => SimulationSpec {
                duration_days: 40.0,
                cadence_days: 0.01,
                noise_sigma: 3e-4,
            },
        }
    }

    pub fn planets(&self) -> Vec<TransitParameters> {
        match self {
            SimulationPreset::Kepler22b => vec![KEPLER22B_PARAMETERS],
            // Outer planets add background dips that make planet c harder to spot
            SimulationPreset::Trappist1 | SimulationPreset::Trappist1Jwst => {
                trappist1_transit_parameters()
            }
        }
    }

    /// Default file name the missions look for.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            SimulationPreset::Kepler22b => "kepler22b_data.csv",
            SimulationPreset::Trappist1 => "trappist1_data.csv",
            SimulationPreset::Trappist1Jwst => "trappist_jwst_data.csv",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SimulationPreset::Kepler22b => "Kepler-22 simulated light curve",
            SimulationPreset::Trappist1 => "TRAPPIST-1 simulated light curve (20 days)",
            SimulationPreset::Trappist1Jwst => "TRAPPIST-1 JWST-style light curve (7 planets)",
        }
    }

    pub fn generate(&self, seed: u64) -> ToolkitResult<LightCurve> {
        let mut noise = NoiseSource::seeded(seed);
        simulate_light_curve(&self.spec(), &self.planets(), &mut noise)
    }
}

/// Superpose transits of every planet and add Gaussian noise.
pub fn simulate_light_curve(
    spec: &SimulationSpec,
    planets: &[TransitParameters],
    noise: &mut NoiseSource,
) -> ToolkitResult<LightCurve> {
    let time = spec.sample_times()?;
    let mut flux = vec![1.0; time.len()];

    for params in planets {
        let model = transit_model(&time, params)?;
        for (f, m) in flux.iter_mut().zip(model) {
            *f *= m;
        }
    }

    for f in flux.iter_mut() {
        *f += noise.gaussian(spec.noise_sigma)?;
    }

    debug!(
        "Simulated {} samples with {} planet(s), sigma={}",
        time.len(),
        planets.len(),
        spec.noise_sigma
    );

    LightCurve::new(time, flux)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_reproducible() {
        let a = SimulationPreset::Trappist1.generate(42).unwrap();
        let b = SimulationPreset::Trappist1.generate(42).unwrap();
        let c = SimulationPreset::Trappist1.generate(43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_kepler_preset_shape() {
        let curve = SimulationPreset::Kepler22b.generate(42).unwrap();
        assert_eq!(curve.len(), 4800);
        let min = curve.flux().iter().cloned().fold(f64::INFINITY, f64::min);
        // Transit depth 0.0036 plus a few sigma of noise
        assert!(min < 0.997, "min flux {}", min);
        assert!(min > 0.995, "min flux {}", min);
    }

    #[test]
    fn test_noiseless_superposition_multiplies() {
        let spec = SimulationSpec {
            duration_days: 10.0,
            cadence_days: 0.01,
            noise_sigma: 0.0,
        };
        let planets = [
            TransitParameters::new(0.1, 2.0, 1.0),
            TransitParameters::new(0.1, 2.0, 1.0),
        ];
        let curve = simulate_light_curve(&spec, &planets, &mut NoiseSource::seeded(1)).unwrap();
        let min = curve.flux().iter().cloned().fold(f64::INFINITY, f64::min);
        assert!((min - 0.99 * 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_bad_cadence_is_rejected() {
        let spec = SimulationSpec {
            duration_days: 10.0,
            cadence_days: 0.0,
            noise_sigma: 0.0,
        };
        assert!(simulate_light_curve(&spec, &[], &mut NoiseSource::seeded(1)).is_err());
    }

    #[test]
    fn test_trappist_presets_include_all_planets() {
        assert_eq!(SimulationPreset::Trappist1Jwst.planets().len(), 7);
        assert_eq!(SimulationPreset::Trappist1.planets().len(), 7);
    }
}
