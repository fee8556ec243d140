//! Python-facing report DTOs.
//!
//! Figures cross the boundary as JSON strings so the Python side only needs
//! `json.loads` and its renderer. Everything else is a plain primitive.

use pyo3::prelude::*;

use crate::error::ToolkitResult;
use crate::missions::{FitReport, FoldOutcome, StepReport};

/// Console output and figures from one mission command.
#[pyclass(module = "exoplanet_toolkit", name = "StepReport", get_all)]
#[derive(Debug, Clone)]
pub struct PyStepReport {
    pub title: String,
    pub lines: Vec<String>,
    /// One JSON document per figure
    pub figures: Vec<String>,
}

#[pymethods]
impl PyStepReport {
    /// All lines joined with newlines.
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn __len__(&self) -> usize {
        self.lines.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "StepReport(title={:?}, lines={}, figures={})",
            self.title,
            self.lines.len(),
            self.figures.len()
        )
    }
}

impl PyStepReport {
    pub fn from_report(report: StepReport) -> ToolkitResult<Self> {
        let figures = report
            .figures
            .iter()
            .map(|f| f.to_json(false))
            .collect::<ToolkitResult<Vec<_>>>()?;
        Ok(Self {
            title: report.title,
            lines: report.lines,
            figures,
        })
    }

    pub fn from_fold(outcome: FoldOutcome) -> ToolkitResult<Self> {
        Ok(Self {
            title: format!("Data Folded at {:.2} days", outcome.period),
            figures: vec![outcome.figure.to_json(false)?],
            lines: outcome.lines,
        })
    }
}

/// Score and dashboard for one set of fit parameters.
#[pyclass(module = "exoplanet_toolkit", name = "FitReport", get_all)]
#[derive(Debug, Clone)]
pub struct PyFitReport {
    pub planet_size: f64,
    pub orbital_period: f64,
    pub speed_factor: f64,
    pub score: f64,
    pub rms_error: f64,
    pub depth_percent: f64,
    pub duration_days: f64,
    pub orbital_distance_au: f64,
    pub size_class: String,
    pub temperature_class: String,
    pub feedback: String,
    pub hints: Vec<String>,
    pub lines: Vec<String>,
    pub figure: String,
}

#[pymethods]
impl PyFitReport {
    fn __repr__(&self) -> String {
        format!(
            "FitReport(score={:.0}, rms_error={:.6}, size_class={:?})",
            self.score, self.rms_error, self.size_class
        )
    }
}

impl PyFitReport {
    pub fn from_report(report: FitReport) -> ToolkitResult<Self> {
        let eval = &report.evaluation;
        Ok(Self {
            planet_size: eval.params.planet_size,
            orbital_period: eval.params.orbital_period,
            speed_factor: eval.params.speed_factor,
            score: eval.score,
            rms_error: eval.rms_error,
            depth_percent: eval.depth_percent,
            duration_days: eval.duration_days,
            orbital_distance_au: eval.orbital_distance_au,
            size_class: eval.size_class.label().to_string(),
            temperature_class: eval.temperature_class.label().to_string(),
            feedback: eval.feedback.message().to_string(),
            hints: eval.hints(),
            figure: report.figure.to_json(false)?,
            lines: report.lines,
        })
    }
}
