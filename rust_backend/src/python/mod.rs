//! Python bindings for the workshop missions.
//!
//! The classes keep the names the notebooks import:
//!
//! - `Kepler_Tool`: Kepler-22b transit lab
//! - `TRAPPISTMission`: TRAPPIST-1 detective
//! - `TRAPPISTHabitable`: TRAPPIST-1 habitable-zone mission
//!
//! Every mission command prints its console lines through Python's `print`
//! and returns a `StepReport` whose figures are JSON strings, ready for the
//! notebook's matplotlib renderer.

pub mod missions;
pub mod types;

use pyo3::exceptions::{PyFileNotFoundError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::ToolkitError;

pub use missions::{PyKeplerTool, PyTrappistHabitable, PyTrappistMission};
pub use types::{PyFitReport, PyStepReport};

impl From<ToolkitError> for PyErr {
    fn from(err: ToolkitError) -> Self {
        match err {
            ToolkitError::DataNotFound { .. } => PyFileNotFoundError::new_err(err.to_string()),
            ToolkitError::InvalidPeriod(_)
            | ToolkitError::InvalidInput(_)
            | ToolkitError::Configuration(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Print lines in the notebook, where Rust's stdout is not captured.
pub(crate) fn echo(py: Python<'_>, lines: &[String]) -> PyResult<()> {
    let print = py.import("builtins")?.getattr("print")?;
    for line in lines {
        print.call1((line.as_str(),))?;
    }
    Ok(())
}

/// Register every class and constant with the Python module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKeplerTool>()?;
    m.add_class::<PyTrappistMission>()?;
    m.add_class::<PyTrappistHabitable>()?;
    m.add_class::<PyStepReport>()?;
    m.add_class::<PyFitReport>()?;

    m.add("KEPLER_DATA_FILE", crate::missions::kepler::DEFAULT_DATA_FILE)?;
    m.add("TRAPPIST_DATA_FILE", crate::missions::detective::DEFAULT_DATA_FILE)?;
    m.add("HABITABLE_DATA_FILE", crate::missions::habitable::DEFAULT_DATA_FILE)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
