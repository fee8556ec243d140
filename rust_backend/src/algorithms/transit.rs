use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// Phase at which the model places the transit centre.
pub const TRANSIT_CENTER_PHASE: f64 = 0.5;

/// Fraction of the transit half-width that sits on the flat bottom.
const FLAT_BOTTOM_FRACTION: f64 = 0.6;

/// Physical parameters of the trapezoid transit model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitParameters {
    /// Planet radius relative to star radius (Rp/Rs)
    pub planet_size: f64,
    /// Orbital period in days
    pub orbital_period: f64,
    /// Orbital speed factor; widens the transit window
    pub speed_factor: f64,
}

impl TransitParameters {
    pub fn new(planet_size: f64, orbital_period: f64, speed_factor: f64) -> Self {
        Self {
            planet_size,
            orbital_period,
            speed_factor,
        }
    }

    /// Fractional flux drop at mid-transit (area ratio).
    pub fn depth(&self) -> f64 {
        self.planet_size * self.planet_size
    }

    /// Half-width of the transit window, in phase units.
    pub fn half_width(&self) -> f64 {
        0.1 * (self.speed_factor / 10.0)
    }

    pub fn validate(&self) -> ToolkitResult<()> {
        validate_period(self.orbital_period)?;
        if !self.planet_size.is_finite() || self.planet_size < 0.0 {
            return Err(ToolkitError::InvalidInput(format!(
                "planet size must be a non-negative ratio, got {}",
                self.planet_size
            )));
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ToolkitError::InvalidInput(format!(
                "speed factor must be greater than zero (zero is rejected rather than \
                 producing a flat, transit-free model), got {}",
                self.speed_factor
            )));
        }
        Ok(())
    }
}

pub fn validate_period(period: f64) -> ToolkitResult<()> {
    if period.is_finite() && period > 0.0 {
        Ok(())
    } else {
        Err(ToolkitError::InvalidPeriod(period))
    }
}

/// Orbital phase of a single time stamp, in `[0, 1)`.
#[inline]
pub fn phase_of(time: f64, period: f64) -> f64 {
    let phase = time.rem_euclid(period) / period;
    // rem_euclid can round up to exactly `period` for tiny negative inputs
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Fold a time series at `period`, returning each sample's phase in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use exoplanet_toolkit::algorithms::transit::phase_fold;
///
/// let phase = phase_fold(&[0.0, 0.75, 1.5, 2.25], 1.5).unwrap();
/// assert_eq!(phase, vec![0.0, 0.5, 0.0, 0.5]);
/// ```
pub fn phase_fold(time: &[f64], period: f64) -> ToolkitResult<Vec<f64>> {
    validate_period(period)?;
    Ok(time.iter().map(|&t| phase_of(t, period)).collect())
}

/// Mask of samples whose phase lies strictly inside `(lo, hi)`.
pub fn transit_mask(phase: &[f64], lo: f64, hi: f64) -> Vec<bool> {
    phase.iter().map(|&p| p > lo && p < hi).collect()
}

/// Simulated light curve for the given transit parameters.
///
/// The transit is a trapezoid centred on phase 0.5: a flat bottom at
/// `1 - size²` over the inner 60% of the half-width, with quadratic
/// ingress/egress over the remaining 40%.
pub fn transit_model(time: &[f64], params: &TransitParameters) -> ToolkitResult<Vec<f64>> {
    params.validate()?;

    let depth = params.depth();
    let half_width = params.half_width();
    let flat = half_width * FLAT_BOTTOM_FRACTION;
    let edge = half_width * (1.0 - FLAT_BOTTOM_FRACTION);

    let flux = time
        .iter()
        .map(|&t| {
            let distance = (phase_of(t, params.orbital_period) - TRANSIT_CENTER_PHASE).abs();
            if distance >= half_width {
                1.0
            } else if distance < flat {
                1.0 - depth
            } else {
                let e = (distance - flat) / edge;
                1.0 - depth * (1.0 - e * e)
            }
        })
        .collect();

    Ok(flux)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_fold_rejects_bad_period() {
        assert!(matches!(phase_fold(&[1.0], 0.0), Err(ToolkitError::InvalidPeriod(_))));
        assert!(matches!(phase_fold(&[1.0], -2.0), Err(ToolkitError::InvalidPeriod(_))));
        assert!(phase_fold(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_phase_fold_negative_times_wrap_forward() {
        let phase = phase_fold(&[-0.5], 2.0).unwrap();
        assert!((phase[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_transit_mask_is_strict() {
        let mask = transit_mask(&[0.45, 0.46, 0.5, 0.55, 0.9], 0.45, 0.55);
        assert_eq!(mask, vec![false, true, true, false, false]);
    }

    #[test]
    fn test_model_flat_bottom_and_baseline() {
        let params = TransitParameters::new(0.05, 10.0, 4.0);
        // half width 0.04, flat region |phase - 0.5| < 0.024
        let flux = transit_model(&[5.0, 0.0, 9.0], &params).unwrap();

        assert!((flux[0] - (1.0 - 0.0025)).abs() < 1e-12);
        assert_eq!(flux[1], 1.0);
        assert_eq!(flux[2], 1.0);
    }

    #[test]
    fn test_model_ingress_is_between_bottom_and_baseline() {
        let params = TransitParameters::new(0.05, 10.0, 4.0);
        // phase 0.53 -> distance 0.03, inside the sloped edge
        let flux = transit_model(&[5.3], &params).unwrap();
        let depth = params.depth();

        assert!(flux[0] > 1.0 - depth);
        assert!(flux[0] < 1.0);
        let e: f64 = (0.03 - 0.024) / 0.016;
        assert!((flux[0] - (1.0 - depth * (1.0 - e * e))).abs() < 1e-9);
    }

    #[test]
    fn test_model_rejects_invalid_parameters() {
        let params = TransitParameters::new(0.05, 10.0, 0.0);
        match transit_model(&[1.0], &params) {
            Err(ToolkitError::InvalidInput(msg)) => assert!(msg.contains("zero is rejected"), "{}", msg),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        let params = TransitParameters::new(-0.1, 10.0, 1.0);
        assert!(transit_model(&[1.0], &params).is_err());
    }
}
