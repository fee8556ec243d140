//! Property tests for phase folding, the transit model and scoring.

use proptest::prelude::*;

use exoplanet_toolkit::algorithms::fit::fit_score;
use exoplanet_toolkit::algorithms::{habitability_score, phase_fold, transit_model, TransitParameters};

proptest! {
    #[test]
    fn phase_is_in_unit_interval(
        time in prop::collection::vec(-1.0e4f64..1.0e4, 1..200),
        period in 0.1f64..500.0,
    ) {
        for phase in phase_fold(&time, period).unwrap() {
            prop_assert!((0.0..1.0).contains(&phase), "phase {}", phase);
        }
    }

    #[test]
    fn model_flux_is_bounded_by_depth(
        size in 0.0f64..0.2,
        period in 0.5f64..400.0,
        speed in 0.1f64..10.0,
        start in 0.0f64..1000.0,
    ) {
        let params = TransitParameters::new(size, period, speed);
        let time: Vec<f64> = (0..500).map(|i| start + i as f64 * 0.037).collect();
        let floor = 1.0 - size * size;
        for flux in transit_model(&time, &params).unwrap() {
            prop_assert!(flux <= 1.0);
            prop_assert!(flux >= floor - 1e-12, "flux {} below {}", flux, floor);
        }
    }

    #[test]
    fn fit_score_stays_in_range(rms in 0.0f64..1.0) {
        let score = fit_score(rms);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn habitability_score_stays_in_range(temp in -300.0f64..500.0) {
        let score = habitability_score(temp);
        prop_assert!((0.3..=1.0).contains(&score), "score {} at {}", score, temp);
    }
}

#[test]
fn perfect_fit_scores_100() {
    assert_eq!(fit_score(0.0), 100.0);
}
