//! Seeded synthetic photometry.
//!
//! The workshop ships pre-made CSV files; these generators reproduce data of
//! the same shape so the missions can run (and be tested) without them.
//!
//! - [`light_curves`]: Kepler-22b and TRAPPIST-1 light curve presets
//! - [`noise`]: Seeded Gaussian/uniform sampling

pub mod light_curves;
pub mod noise;

pub use light_curves::{
    simulate_light_curve, trappist1_transit_parameters, SimulationPreset, SimulationSpec,
    KEPLER22B_PARAMETERS,
};
pub use noise::{NoiseSource, Star, DEFAULT_SEED};
