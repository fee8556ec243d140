//! TRAPPIST-1 habitable-zone mission.
//!
//! Construction loads the data by itself and never fails: a missing file
//! leaves an empty curve and a warning, and every data-dependent command
//! then reports [`ToolkitError::EmptyData`].

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{banner, StepReport};
use crate::algorithms::habitability::assess_habitable_zone;
use crate::algorithms::period_search::{
    catalog_match, distinct_candidates, list_mystery_periods, scan_periods, PeriodScan,
};
use crate::algorithms::transit::phase_fold;
use crate::config::ToolkitConfig;
use crate::core::{find_planet_near, habitable_planets, LightCurve};
use crate::error::{ToolkitError, ToolkitResult};
use crate::io::LightCurveLoader;
use crate::parsing::CsvLayout;
use crate::report::{self, ReportContext};
use crate::simulation::NoiseSource;
use crate::visualization::plots;

pub const DEFAULT_DATA_FILE: &str = "trappist_jwst_data.csv";
pub const DEFAULT_TEAM_NAME: &str = "Team_Alpha";

const RULE_WIDTH: usize = 70;
const PREVIEW_LINES: usize = 15;

/// A report written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReport {
    pub path: PathBuf,
    pub preview: Vec<String>,
    pub lines: Vec<String>,
}

/// The TRAPPIST-1 habitable-zone mission.
#[derive(Debug, Clone)]
pub struct TrappistHabitable {
    curve: Option<LightCurve>,
    data_file: String,
    data_path: Option<PathBuf>,
    config: ToolkitConfig,
    noise: NoiseSource,
    startup: StepReport,
}

impl TrappistHabitable {
    /// Load `data_file` (default `trappist_jwst_data.csv`) with default settings.
    pub fn new(data_file: Option<&str>) -> Self {
        Self::with_config(data_file, ToolkitConfig::default())
    }

    pub fn with_config(data_file: Option<&str>, config: ToolkitConfig) -> Self {
        let mut mission = Self::without_data(config);
        let data_file = data_file.unwrap_or(DEFAULT_DATA_FILE);
        let load_lines = mission.load_into_self(data_file);

        let mut startup = StepReport::new("TRAPPIST-1 HABITABLE ZONE MISSION");
        startup.extend_lines(load_lines);
        let rule = "=".repeat(RULE_WIDTH);
        startup.extend_lines([
            rule.clone(),
            "🌍 TRAPPIST-1 HABITABLE ZONE MISSION".to_string(),
            rule.clone(),
            String::new(),
            "✅ Mission initialized and ready!".to_string(),
        ]);
        match mission.curve.as_ref().filter(|c| !c.is_empty()) {
            Some(curve) => startup.extend_lines(curve.summary_lines()),
            None => startup.line("⚠️  Data not loaded - use mission.load_data() manually"),
        }
        startup.extend_lines([
            String::new(),
            "Use these simple commands:".to_string(),
            "• mission.visualize_data()".to_string(),
            "• mission.find_habitable_periods()".to_string(),
            "• mission.run_habitability_dashboard()".to_string(),
            rule,
        ]);
        startup.log();

        mission.startup = startup;
        mission
    }

    /// A mission with nothing loaded yet.
    pub fn without_data(config: ToolkitConfig) -> Self {
        let noise = NoiseSource::seeded(config.simulation.seed);
        Self {
            curve: None,
            data_file: DEFAULT_DATA_FILE.to_string(),
            data_path: None,
            config,
            noise,
            startup: StepReport::default(),
        }
    }

    /// What the mission printed while starting up.
    pub fn startup(&self) -> &StepReport {
        &self.startup
    }

    pub fn curve(&self) -> Option<&LightCurve> {
        self.curve.as_ref()
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    /// Load data manually. Returns whether any samples were loaded, and the
    /// lines to show the user.
    pub fn load_data(&mut self, filename: Option<&str>) -> (bool, Vec<String>) {
        let lines = self.load_into_self(filename.unwrap_or(DEFAULT_DATA_FILE));
        for line in &lines {
            info!("{}", line);
        }
        (self.has_data(), lines)
    }

    /// Use an in-memory curve, e.g. freshly simulated data.
    pub fn set_data(&mut self, curve: LightCurve, label: &str) {
        self.curve = Some(curve);
        self.data_file = label.to_string();
        self.data_path = None;
    }

    /// Load `filename`, replacing the current data with an empty curve on failure.
    fn load_into_self(&mut self, filename: &str) -> Vec<String> {
        self.data_file = filename.to_string();
        let result = LightCurveLoader::load_with_search(
            filename,
            &self.config.data.search_dirs,
            &CsvLayout::commented_with_header(),
        );

        match result {
            Ok(loaded) => {
                let line = format!("✅ Data loaded from: {}", loaded.path.display());
                self.curve = Some(loaded.curve);
                self.data_path = Some(loaded.path);
                vec![line]
            }
            Err(ToolkitError::DataNotFound { file, tried }) => {
                warn!("Data file {} not found", file);
                self.curve = Some(LightCurve::empty());
                self.data_path = None;
                let tried: Vec<String> = tried.iter().map(|p| p.display().to_string()).collect();
                vec![
                    format!("❌ File not found: {}", filename),
                    format!("   Tried: {}", tried.join(", ")),
                ]
            }
            Err(e) => {
                warn!("Failed to load {}: {}", filename, e);
                self.curve = Some(LightCurve::empty());
                self.data_path = None;
                vec![format!("❌ Error loading {}: {}", filename, e)]
            }
        }
    }

    pub fn has_data(&self) -> bool {
        self.data().is_ok()
    }

    fn data(&self) -> ToolkitResult<&LightCurve> {
        match &self.curve {
            None => Err(ToolkitError::NoData),
            Some(curve) if curve.is_empty() => Err(ToolkitError::EmptyData),
            Some(curve) => Ok(curve),
        }
    }

    /// The full system light curve with an info box and an interpretation guide.
    pub fn visualize_data(&self) -> ToolkitResult<StepReport> {
        let curve = self.data()?;
        let mut report = StepReport::new("FULL TRAPPIST-1 System Light Curve");
        report.figure(plots::full_light_curve(curve));
        report.extend_lines([
            "",
            "🔍 DATA INTERPRETATION GUIDE:",
            "• Each dot = one brightness measurement",
            "• Dips = planets transiting (blocking starlight)",
            "• Multiple overlapping dips = 7 planets!",
            "• Your challenge: Find the habitable ones",
        ]);
        Ok(report)
    }

    /// Candidate period table, the habitable-zone reveal and the period plot.
    pub fn find_habitable_periods(&self) -> ToolkitResult<StepReport> {
        self.data()?;
        let dashes = "-".repeat(50);
        let mut report = StepReport::new("🔍 STEP 2: FIND HABITABLE ZONE PERIODS");
        report.extend_lines(banner(&report.title, RULE_WIDTH));

        report.extend_lines([
            String::new(),
            "📋 ALL PERIODS IN THE DATA (The computer may be wrong so verify all of them, maybe using fold_at_period):".to_string(),
            dashes.clone(),
        ]);
        report.extend_lines(list_mystery_periods().iter().map(|l| l.describe()));

        report.extend_lines([
            String::new(),
            "💡 DISCUSSION QUESTION (2 minutes with partner):".to_string(),
            "Which 3 periods are in the 'Goldilocks Zone' (not too hot, not too cold)?".to_string(),
            "Hint: Look for 'habitable' type planets.".to_string(),
            String::new(),
            dashes.clone(),
            "🎯 HABITABLE ZONE PLANETS (from NASA):".to_string(),
            dashes,
        ]);
        for planet in habitable_planets() {
            report.line(format!("  {}: {:.2} days", planet.designation(), planet.period_days()));
            report.line(format!("     Temperature: {}°C  {}", planet.temp_c, planet.icon()));
        }

        report.extend_lines([
            "",
            "✅ KEY INSIGHT:",
            "Habitable zone = MEDIUM periods (4-10 days)",
            "Too hot = SHORT periods (<3 days)",
            "Too cold = LONG periods (>10 days)",
        ]);
        report.figure(plots::period_distribution());
        Ok(report)
    }

    /// Brute-force period scan of the loaded data, strongest distinct dips first.
    pub fn find_periods(&self, scan: &PeriodScan, count: usize) -> ToolkitResult<StepReport> {
        let curve = self.data()?;
        let candidates = scan_periods(curve, scan)?;
        let best = distinct_candidates(&candidates, count, 0.02);

        let mut report = StepReport::new("🔎 PERIOD SEARCH");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.line(format!(
            "Scanned {:.2} to {:.2} days in steps of {} ({} trial periods)",
            scan.min_period,
            scan.max_period,
            scan.step,
            candidates.len()
        ));
        report.line(String::new());
        for (i, candidate) in best.iter().enumerate() {
            let source = match find_planet_near(candidate.period, 0.05) {
                Some(planet) => format!("✅ near {} ({})", planet.designation(), planet.class),
                None => "❓ no known planet".to_string(),
            };
            report.line(format!(
                "{:2}. {:5.2} days  dip {:.4}  {}",
                i + 1,
                candidate.period,
                candidate.depth,
                source
            ));
        }
        Ok(report)
    }

    /// Habitability scores for d, e and f, with the three-panel dashboard.
    pub fn run_habitability_dashboard(&self) -> ToolkitResult<StepReport> {
        self.data()?;
        let assessments = assess_habitable_zone();

        let mut report = StepReport::new("🌡️ STEP 3: HABITABILITY DASHBOARD");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.figure(plots::habitability_dashboard(&assessments));
        report.extend_lines([String::new(), "📊 HABITABILITY ASSESSMENT:".to_string(), "-".repeat(50)]);
        for assessment in &assessments {
            report.line(String::new());
            report.extend_lines(assessment.lines());
        }
        report.extend_lines([String::new(), "=".repeat(RULE_WIDTH)]);
        Ok(report)
    }

    /// How this analysis connects to current JWST observations. Needs no data.
    pub fn real_science_connection(&self) -> StepReport {
        let mut report = StepReport::new("🔭 STEP 4: REAL-WORLD SCIENCE CONNECTION");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.extend_lines([
            "",
            "🎯 YOUR ANALYSIS MATTERS BECAUSE:",
            "1. JWST is observing TRAPPIST-1 RIGHT NOW",
            "2. Searching for water vapor, oxygen, methane in atmospheres",
            "3. Could find BIOSIGNATURES (signs of life) in next 5 years!",
            "",
            "📡 CURRENT JWST OBSERVATIONS:",
            "• TRAPPIST-1e: Primary target (your 'most interesting' planet)",
            "• Method: Transmission spectroscopy during transits",
            "• Goal: Detect atmospheric gases that could indicate life",
            "",
            "🌌 WHY THIS IS HISTORIC:",
            "• First time we can study Earth-sized exoplanet atmospheres",
            "• Could answer: 'Are we alone in the universe?'",
            "• Your analysis today used REAL methods scientists use",
        ]);
        report.extend_lines(banner("🏆 MISSION IMPACT:", RULE_WIDTH));
        report.extend_lines([
            "",
            "You didn't just complete an exercise.",
            "You practiced the EXACT methods that might discover",
            "the first evidence of life beyond Earth.",
            "",
            "Keep looking up! 🔭✨",
        ]);
        report
    }

    /// Write `trappist_report_{team}.txt` to the report directory.
    pub fn save_report(&self, team_name: Option<&str>) -> ToolkitResult<SavedReport> {
        let curve = self.data()?;
        let team_name = team_name.unwrap_or(DEFAULT_TEAM_NAME);
        if team_name.trim().is_empty() || team_name.contains(['/', '\\']) {
            return Err(ToolkitError::InvalidInput(format!(
                "team name '{}' cannot be used in a file name",
                team_name
            )));
        }

        let text = report::render_report(&ReportContext::today(team_name, &self.data_file, curve));
        let path = self.config.report_path(team_name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&path, &text)?;
        info!("Saved report for {} to {}", team_name, path.display());

        let preview = report::preview(&text, PREVIEW_LINES);
        let mut lines = vec![
            String::new(),
            format!("✅ REPORT SAVED: {}", path.display()),
            "   Share with your instructor or keep as a science portfolio piece!".to_string(),
            String::new(),
            "📄 REPORT PREVIEW:".to_string(),
            "-".repeat(50),
        ];
        lines.extend(preview.iter().cloned());
        lines.push("... (full report in file)".to_string());

        Ok(SavedReport {
            path,
            preview,
            lines,
        })
    }

    /// Fold at any period and check it against the whole catalogue.
    pub fn fold_at_period(&self, period: f64) -> ToolkitResult<StepReport> {
        let curve = self.data()?;
        let phase = phase_fold(curve.time(), period)?;
        let matched = catalog_match(period);

        let mut report = StepReport::new(format!("Data Folded at {:.2} days", period));
        report.figure(plots::catalog_fold(period, &phase, curve.flux(), matched));
        report.line(match matched {
            Some(planet) => format!("✅ Matches {} ({} planet)", planet.designation(), planet.class),
            None => format!("❌ No known planet at {:.2} days", period),
        });
        Ok(report)
    }

    /// All seven planets' periods and temperatures. Needs no data.
    pub fn show_full_system(&self) -> StepReport {
        let mut report = StepReport::new("🌌 FULL TRAPPIST-1 SYSTEM (7 Planets!)");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.figure(plots::full_system());
        report.extend_lines([
            "",
            "🔬 SYSTEM STATS:",
            "• Total planets: 7",
            "• Habitable zone planets: 3 (d, e, f)",
            "• Closest orbit: 1.51 days (b)",
            "• Farthest orbit: 18.77 days (h)",
            "• Temperature range: 127°C to -123°C",
            "",
            "🎯 WHY IT'S SPECIAL:",
            "• Most Earth-sized planets around one star",
            "• 3 in habitable zone",
            "• Close enough for detailed study",
            "• Best candidate for finding life beyond Earth",
        ]);
        report
    }

    /// Polar orbit comparison with the inner Solar System. Needs no data.
    pub fn solar_system_comparison(&mut self) -> StepReport {
        let mut report = StepReport::new("🌞 COMPARISON: TRAPPIST-1 vs OUR SOLAR SYSTEM");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.figure(plots::solar_system_comparison(&mut self.noise));
        report.extend_lines([
            "",
            "📏 SCALE COMPARISON:",
            "• TRAPPIST-1b orbit: 1.51 days",
            "• Mercury orbit: 88 days",
            "→ TRAPPIST-1 planets are 58x closer to their star!",
            "",
            "🌡️ TEMPERATURE CONTEXT:",
            "• TRAPPIST-1d: 15°C (Same as Earth!)",
            "• Venus: 464°C (Runaway greenhouse)",
            "• Mars: -63°C (Too cold without thick atmosphere)",
            "",
            "💡 KEY INSIGHT:",
            "Red dwarf stars (like TRAPPIST-1) are smaller and cooler,",
            "so planets can orbit very close and still be habitable!",
        ]);
        report
    }
}
