//! Exoplanet Detective Toolkit: transit photometry exercises for workshops.
//!
//! Three missions share one backend:
//!
//! - [`missions::kepler`]: fit a transit model to Kepler-22b data
//! - [`missions::detective`]: phase-fold TRAPPIST-1 data to find planets b and c
//! - [`missions::habitable`]: assess TRAPPIST-1's habitable-zone planets and
//!   write a team report
//!
//! Plots are produced as [`visualization::Figure`] descriptions that a
//! notebook renders. With the `python` feature the crate builds the
//! `exoplanet_toolkit` extension module.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod missions;
pub mod parsing;
pub mod report;
pub mod simulation;
pub mod visualization;

#[cfg(feature = "python")]
pub mod python;

pub use config::ToolkitConfig;
pub use error::{ToolkitError, ToolkitResult};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Exoplanet Detective Toolkit Python module
#[cfg(feature = "python")]
#[pymodule]
fn exoplanet_toolkit(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
