//! Kepler-22b transit lab.
//!
//! Students load a Kepler light curve, look at the dips, then tune three
//! parameters (planet size, orbital period, orbital speed) until the
//! trapezoid model matches the data.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::StepReport;
use crate::algorithms::fit::{evaluate_fit, FitEvaluation};
use crate::algorithms::transit::TransitParameters;
use crate::core::LightCurve;
use crate::error::{ToolkitError, ToolkitResult};
use crate::io::LightCurveLoader;
use crate::parsing::CsvLayout;
use crate::simulation::{SimulationPreset, DEFAULT_SEED};
use crate::visualization::{plots, Figure};

pub const DEFAULT_DATA_FILE: &str = "kepler22b_data.csv";
pub const DEFAULT_PLOT_TITLE: &str = "Kepler Telescope Data";

/// One interactive fit parameter, described for the frontend's slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub name: String,
    pub description: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderRange {
    fn new(name: &str, description: &str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            min,
            max,
            step,
            default,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Result of scoring one set of slider values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub evaluation: FitEvaluation,
    pub figure: Figure,
    pub lines: Vec<String>,
}

/// The Kepler-22b transit lab.
#[derive(Debug, Clone)]
pub struct KeplerTool {
    seed: u64,
    search_dirs: Vec<PathBuf>,
}

impl Default for KeplerTool {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl KeplerTool {
    pub fn new(seed: u64) -> Self {
        info!("🚀 Transit Lab initialized. Ready to detect Kepler-22B!");
        Self {
            seed,
            search_dirs: Vec::new(),
        }
    }

    /// Also look for data files in these directories.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn greeting(&self) -> &'static str {
        "🚀 Transit Lab initialized. Ready to detect Kepler-22B!"
    }

    /// Load a Kepler export: five preamble lines, then `time,flux` rows.
    pub fn load_data(&self, filename: impl AsRef<Path>) -> ToolkitResult<(LightCurve, Vec<String>)> {
        let filename = filename.as_ref();
        let mut lines = vec![format!("📂 Loading data from {}...", filename.display())];

        let loaded = LightCurveLoader::load_with_search(
            &filename.to_string_lossy(),
            &self.search_dirs,
            &CsvLayout::kepler(),
        )
        .inspect_err(|e| warn!("{}", e))?;

        let curve = loaded.curve;
        lines.push(format!("✅ Successfully loaded {} data points", curve.len()));
        if let (Some(start), Some(end)) = (curve.start_time(), curve.end_time()) {
            lines.push(format!("📊 Time range: {:.1} to {:.1} days", start, end));
        }
        Ok((curve, lines))
    }

    /// Lines shown when the data file is missing.
    pub fn not_found_lines(filename: &str) -> Vec<String> {
        vec![
            format!("❌ Error: File '{}' not found.", filename),
            "💡 Make sure the data file exists in the current folder.".to_string(),
        ]
    }

    /// Synthetic Kepler-22b data from this lab's seed.
    pub fn simulated_data(&self) -> ToolkitResult<LightCurve> {
        SimulationPreset::Kepler22b.generate(self.seed)
    }

    pub fn plot_light_curve(&self, curve: &LightCurve, title: Option<&str>) -> Figure {
        plots::light_curve(curve, title.unwrap_or(DEFAULT_PLOT_TITLE))
    }

    /// Slider ranges for planet size, orbital period and orbital speed.
    pub fn slider_ranges() -> Vec<SliderRange> {
        vec![
            SliderRange::new("planet_size", "Planet Size (Rp/Rs):", 0.005, 0.09, 0.005, 0.05),
            SliderRange::new("orbital_period", "Orbital Period (days):", 220.0, 350.0, 0.5, 260.0),
            SliderRange::new("orbital_speed", "Orbital Speed Factor:", 0.5, 8.0, 0.1, 4.0),
        ]
    }

    /// Parameters at the sliders' starting positions.
    pub fn default_parameters() -> TransitParameters {
        TransitParameters::new(0.05, 260.0, 4.0)
    }

    /// Banner printed before the interactive fit starts.
    pub fn interactive_intro(&self) -> StepReport {
        let rule = "=".repeat(60);
        let mut report = StepReport::new("INTERACTIVE TRANSIT DETECTIVE");
        report.extend_lines([
            "🎯 INTERACTIVE TRANSIT DETECTIVE".to_string(),
            rule.clone(),
            "ADJUST SLIDERS to find the hidden planet!".to_string(),
            "Watch the ANALYSIS update in real-time.".to_string(),
            rule,
        ]);
        report
    }

    /// Score a model against the data and build the analysis dashboard.
    pub fn evaluate_fit(&self, curve: &LightCurve, params: TransitParameters) -> ToolkitResult<FitReport> {
        params.validate()?;
        let evaluation = evaluate_fit(curve, params)?;
        let figure = plots::fit_dashboard(curve, &evaluation);
        let lines = fit_console_lines(&evaluation);
        info!(
            "Fit size={:.3} period={:.1} speed={:.1}: score {:.0}",
            params.planet_size, params.orbital_period, params.speed_factor, evaluation.score
        );
        Ok(FitReport {
            evaluation,
            figure,
            lines,
        })
    }

    /// Load `filename`, mapping a missing file to its console lines.
    pub fn load_or_report(&self, filename: &str) -> Result<(LightCurve, Vec<String>), Vec<String>> {
        match self.load_data(filename) {
            Ok(loaded) => Ok(loaded),
            Err(ToolkitError::DataNotFound { .. }) => Err(Self::not_found_lines(filename)),
            Err(e) => Err(vec![format!("❌ Error: {}", e)]),
        }
    }
}

fn fit_console_lines(eval: &FitEvaluation) -> Vec<String> {
    let rule = "=".repeat(60);
    let p = &eval.params;
    let mut lines = vec![
        rule.clone(),
        "REAL-TIME ANALYSIS UPDATE".to_string(),
        rule,
        String::new(),
        "CURRENT PARAMETERS:".to_string(),
        format!("  • Planet Size (Rp/Rs): {:.3}", p.planet_size),
        format!("  • Orbital Period: {:.1} days", p.orbital_period),
        format!("  • Speed Factor: {:.1}", p.speed_factor),
        String::new(),
        format!("FIT SCORE: {:.0}/100", eval.score),
        format!("  [{}] {:.0}%", eval.progress_bar(), eval.score),
        String::new(),
        format!("FEEDBACK: {}", eval.feedback.message()),
    ];

    let hints = eval.hints();
    if !hints.is_empty() {
        lines.push(String::new());
        lines.push("HINTS:".to_string());
        lines.extend(hints.iter().map(|h| format!("  • {}", h)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::transit::transit_model;
    use crate::simulation::KEPLER22B_PARAMETERS;

    #[test]
    fn test_slider_defaults_are_in_range() {
        let sliders = KeplerTool::slider_ranges();
        assert_eq!(sliders.len(), 3);
        for slider in &sliders {
            assert!(slider.contains(slider.default), "{}", slider.name);
        }
        let defaults = KeplerTool::default_parameters();
        assert_eq!(defaults.planet_size, sliders[0].default);
        assert_eq!(defaults.orbital_period, sliders[1].default);
        assert_eq!(defaults.speed_factor, sliders[2].default);
    }

    #[test]
    fn test_true_parameters_beat_defaults() {
        let tool = KeplerTool::new(42);
        let curve = tool.simulated_data().unwrap();

        let good = tool.evaluate_fit(&curve, KEPLER22B_PARAMETERS).unwrap();
        let bad = tool
            .evaluate_fit(&curve, KeplerTool::default_parameters())
            .unwrap();

        assert!(good.evaluation.score > bad.evaluation.score);
        assert!(good.evaluation.score > 50.0, "score {}", good.evaluation.score);
        assert!(good.lines.iter().any(|l| l.starts_with("FEEDBACK: EXCELLENT")));
        assert!(!good.lines.iter().any(|l| l == "HINTS:"));
    }

    #[test]
    fn test_low_score_lists_hints() {
        let tool = KeplerTool::new(42);
        // Deep noiseless transits that a shallow, wide model misses badly
        let time: Vec<f64> = (0..4800).map(|i| i as f64 * 0.25).collect();
        let flux = transit_model(&time, &TransitParameters::new(0.09, 290.0, 1.0)).unwrap();
        let curve = LightCurve::new(time, flux).unwrap();
        let report = tool
            .evaluate_fit(&curve, TransitParameters::new(0.02, 230.0, 8.0))
            .unwrap();

        let hints_at = report.lines.iter().position(|l| l == "HINTS:").unwrap();
        assert!(report.lines[hints_at + 1..]
            .iter()
            .any(|l| l.contains("DEEPER")));
        assert_eq!(
            report.lines.last().unwrap(),
            "  • Try: Period = 290, Size > 0.05, Speed = 0.5 - 1.5"
        );
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let tool = KeplerTool::new(42);
        let curve = LightCurve::new(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap();
        let err = tool
            .evaluate_fit(&curve, TransitParameters::new(0.05, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidPeriod(_)));
    }

    #[test]
    fn test_missing_file_reports_lines() {
        let tool = KeplerTool::new(42);
        let lines = tool.load_or_report("definitely_missing_kepler.csv").unwrap_err();
        assert_eq!(lines[0], "❌ Error: File 'definitely_missing_kepler.csv' not found.");
    }

    #[test]
    fn test_default_plot_title() {
        let tool = KeplerTool::default();
        let curve = LightCurve::new(vec![0.0], vec![1.0]).unwrap();
        let figure = tool.plot_light_curve(&curve, None);
        assert_eq!(figure.panels[0].title, DEFAULT_PLOT_TITLE);
    }
}
