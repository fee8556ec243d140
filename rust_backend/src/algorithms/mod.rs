//! Transit analysis algorithms.
//!
//! # Components
//!
//! - [`transit`]: Trapezoid transit model, phase folding and transit masks
//! - [`fit`]: Fit scoring, derived planet properties and student feedback
//! - [`period_search`]: Known-planet matching and folded-dip period scans
//! - [`habitability`]: Temperature-based habitability scores and assessments
//!
//! # Example
//!
//! ```
//! use exoplanet_toolkit::algorithms::{evaluate_fit, TransitParameters};
//! use exoplanet_toolkit::core::LightCurve;
//!
//! let curve = LightCurve::new(vec![0.0, 145.0, 290.0], vec![1.0, 0.9964, 1.0]).unwrap();
//! let eval = evaluate_fit(&curve, TransitParameters::new(0.06, 290.0, 1.0)).unwrap();
//! println!("Score: {:.0}/100", eval.score);
//! ```

pub mod fit;
pub mod habitability;
pub mod period_search;
pub mod transit;

pub use fit::{evaluate_fit, FitEvaluation, FitFeedback, SizeClass, TemperatureClass};
pub use habitability::{
    assess_habitable_zone, habitability_score, period_zone, HabitabilityAssessment, PeriodZone,
};
pub use period_search::{
    catalog_match, detective_verdict, distinct_candidates, list_mystery_periods, scan_periods,
    DetectiveTarget, DetectiveVerdict, PeriodCandidate, PeriodListing, PeriodScan, PhaseWindow,
};
pub use transit::{phase_fold, transit_mask, transit_model, TransitParameters};
