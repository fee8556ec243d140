//! High-level data loading utilities.
//!
//! Loaders combine path resolution with the CSV parsers and map failures onto
//! [`ToolkitError`](crate::error::ToolkitError) so missions can report a
//! missing file differently from a malformed one.
//!
//! # Example
//!
//! ```no_run
//! use exoplanet_toolkit::io::loaders::LightCurveLoader;
//! use exoplanet_toolkit::parsing::CsvLayout;
//!
//! let result = LightCurveLoader::load_with_search("trappist_jwst_data.csv", &[], &CsvLayout::default())
//!     .expect("Failed to load");
//! println!("Loaded {} samples from {}", result.curve.len(), result.path.display());
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{LightCurveLoadResult, LightCurveLoader, WORKSHOP_DATA_DIR};
