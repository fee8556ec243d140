//! TRAPPIST-1 detective: find the two innermost planets by phase folding.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{banner, StepReport};
use crate::algorithms::period_search::{detective_verdict, DetectiveTarget, DetectiveVerdict};
use crate::algorithms::transit::{phase_fold, transit_mask};
use crate::core::LightCurve;
use crate::error::{ToolkitError, ToolkitResult};
use crate::io::LightCurveLoader;
use crate::parsing::CsvLayout;
use crate::visualization::{plots, Figure};

pub const DEFAULT_DATA_FILE: &str = "trappist1_data.csv";

const RULE_WIDTH: usize = 60;

/// Result of folding the data at one trial period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldOutcome {
    pub period: f64,
    pub phase: Vec<f64>,
    pub verdict: DetectiveVerdict,
    pub figure: Figure,
    pub lines: Vec<String>,
}

impl FoldOutcome {
    pub fn detected(&self) -> Option<DetectiveTarget> {
        match self.verdict {
            DetectiveVerdict::Found(target) => Some(target),
            _ => None,
        }
    }

    fn into_report(self, report: &mut StepReport) {
        report.extend_lines(self.lines);
        report.figure(self.figure);
    }
}

/// The TRAPPIST-1 detective mission.
#[derive(Debug, Clone, Default)]
pub struct TrappistMission {
    curve: Option<LightCurve>,
    data_path: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl TrappistMission {
    pub fn new() -> Self {
        info!("🔭 TRAPPIST-1 DETECTIVE MISSION 🔭");
        Self::default()
    }

    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Mission briefing shown when the mission starts.
    pub fn briefing() -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        vec![
            rule.clone(),
            "🔭 TRAPPIST-1 DETECTIVE MISSION 🔭".to_string(),
            rule.clone(),
            String::new(),
            "Mission: Find the hidden planets orbiting TRAPPIST-1".to_string(),
            "This red dwarf star has at least 7 Earth-sized planets!".to_string(),
            "Your task: Find the two innermost ones.".to_string(),
            String::new(),
            rule,
        ]
    }

    pub fn planet_b_period(&self) -> f64 {
        DetectiveTarget::B.period()
    }

    pub fn planet_c_period(&self) -> f64 {
        DetectiveTarget::C.period()
    }

    pub fn curve(&self) -> Option<&LightCurve> {
        self.curve.as_ref()
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    /// Load `#`-commented `time,flux` rows. The previous data is kept on failure.
    pub fn load_data(&mut self, filename: impl AsRef<Path>) -> ToolkitResult<Vec<String>> {
        let filename = filename.as_ref();
        let loaded = LightCurveLoader::load_with_search(
            &filename.to_string_lossy(),
            &self.search_dirs,
            &CsvLayout::commented(),
        )
        .inspect_err(|e| warn!("{}", e))?;

        let mut lines = vec![format!("✅ Data loaded from: {}", loaded.path.display())];
        lines.extend(loaded.curve.summary_lines());

        self.curve = Some(loaded.curve);
        self.data_path = Some(loaded.path);
        Ok(lines)
    }

    /// Use an in-memory curve, e.g. freshly simulated data.
    pub fn set_data(&mut self, curve: LightCurve) {
        self.curve = Some(curve);
        self.data_path = None;
    }

    pub fn not_found_lines(filename: &str) -> Vec<String> {
        vec![
            format!("❌ ERROR: File '{}' not found!", filename),
            format!("Make sure '{}' is in the same folder.", DEFAULT_DATA_FILE),
        ]
    }

    fn data(&self) -> ToolkitResult<&LightCurve> {
        match &self.curve {
            None => Err(ToolkitError::NoData),
            Some(curve) if curve.is_empty() => Err(ToolkitError::EmptyData),
            Some(curve) => Ok(curve),
        }
    }

    /// Fold the data at any period and check it against planets b and c.
    pub fn fold_at_period(&self, period: f64) -> ToolkitResult<FoldOutcome> {
        let curve = self.data()?;
        let phase = phase_fold(curve.time(), period)?;
        let verdict = detective_verdict(period);

        let mut lines = vec![
            String::new(),
            format!("🔍 Testing period: {:.2} days", period),
            "-".repeat(40),
        ];
        match verdict {
            DetectiveVerdict::Found(target) => {
                lines.push(format!("🎯 BINGO! You found {}!", target.name()));
                lines.push(format!("   Real period: {:.2} days", target.period()));
            }
            DetectiveVerdict::Close(_) | DetectiveVerdict::Nothing => {
                lines.push("❌ No clear transit detected.".to_string());
                lines.push("   Try a different period!".to_string());
            }
        }
        match verdict {
            DetectiveVerdict::Close(DetectiveTarget::B) => {
                lines.push("💡 Hint: You're close! Try adjusting slightly...".to_string());
            }
            DetectiveVerdict::Close(DetectiveTarget::C) => {
                lines.push("💡 Hint: Getting warm! Fine-tune your period...".to_string());
            }
            _ => {}
        }

        info!("Folded {} samples at {} days: {:?}", curve.len(), period, verdict);

        let figure = plots::detective_fold(period, &phase, curve.flux(), verdict);
        Ok(FoldOutcome {
            period,
            phase,
            verdict,
            figure,
            lines,
        })
    }

    /// Step 1: look at the raw light curve.
    pub fn step1_view_data(&self) -> ToolkitResult<StepReport> {
        let curve = self.data()?;
        let mut report = StepReport::new("STEP 1: EXAMINE THE RAW DATA");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.figure(plots::raw_data(curve));
        report.extend_lines([
            "",
            "🔍 YOUR TASK:",
            "Look at the data. What do you notice?",
            "• Can you see any repeating patterns?",
            "• Why is it so messy?",
        ]);
        Ok(report)
    }

    /// Step 2: fold at planet b's period.
    pub fn step2_fold_first_planet(&self) -> ToolkitResult<StepReport> {
        let mut report = StepReport::new("STEP 2: FIND THE FIRST PLANET");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.line("Let's use the fold_at_period tool to search...");
        self.fold_at_period(self.planet_b_period())?
            .into_report(&mut report);
        Ok(report)
    }

    /// Step 3: mark planet b's in-transit points so they can be set aside.
    pub fn step3_remove_planet(&self) -> ToolkitResult<StepReport> {
        let curve = self.data()?;
        let window = DetectiveTarget::B.window();
        let phase = phase_fold(curve.time(), self.planet_b_period())?;
        let mask = transit_mask(&phase, window.start, window.end);
        let in_transit = mask.iter().filter(|m| **m).count();

        let mut report = StepReport::new("STEP 3: REMOVE PLANET b");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.figure(plots::transit_highlight(curve, &mask));
        report.extend_lines([
            format!("✅ Found {} transit points for Planet b", in_transit),
            String::new(),
            "🔧 Next step: Remove these points and search for more planets!".to_string(),
        ]);
        Ok(report)
    }

    /// The data with planet b's transits removed.
    pub fn data_without_planet_b(&self) -> ToolkitResult<LightCurve> {
        let curve = self.data()?;
        let window = DetectiveTarget::B.window();
        let phase = phase_fold(curve.time(), self.planet_b_period())?;
        let keep: Vec<bool> = transit_mask(&phase, window.start, window.end)
            .into_iter()
            .map(|in_transit| !in_transit)
            .collect();
        Ok(curve.select(&keep))
    }

    /// Step 4: fold at planet c's period.
    pub fn step4_find_second_planet(&self) -> ToolkitResult<StepReport> {
        let mut report = StepReport::new("STEP 4: FIND THE SECOND PLANET");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.extend_lines([
            "Now search in the 'cleaned' data...",
            "",
            "💡 Try using: mission.fold_at_period(2.42)",
            "   Or experiment with other periods!",
        ]);
        self.fold_at_period(self.planet_c_period())?
            .into_report(&mut report);
        Ok(report)
    }

    /// Step 5: wrap-up. Needs no data.
    pub fn step5_conclusion(&self) -> StepReport {
        let mut report = StepReport::new("STEP 5: MISSION CONCLUSION");
        report.extend_lines(banner(&report.title, RULE_WIDTH));
        report.extend_lines([
            String::new(),
            "🏆 MISSION ACCOMPLISHED!".to_string(),
            "You discovered:".to_string(),
            format!("• TRAPPIST-1b: {} day orbit", self.planet_b_period()),
            format!("• TRAPPIST-1c: {} day orbit", self.planet_c_period()),
            String::new(),
            "🌍 REAL-WORLD CONTEXT:".to_string(),
            "• TRAPPIST-1 has 7 Earth-sized planets!".to_string(),
            "• 3 are in the 'habitable zone' for liquid water".to_string(),
            "• This is one of the most promising systems for life!".to_string(),
            String::new(),
            "🔬 TRY ANSWERING THESE:".to_string(),
            "1. mission.fold_at_period(3.0) - What happens?".to_string(),
            "2. mission.fold_at_period(4.0) - Any signal?".to_string(),
            "3. What if there was a third planet?".to_string(),
        ]);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationPreset;

    fn mission_with_data() -> TrappistMission {
        let mut mission = TrappistMission::new();
        mission.set_data(SimulationPreset::Trappist1.generate(42).unwrap());
        mission
    }

    #[test]
    fn test_fold_requires_data() {
        let mission = TrappistMission::new();
        assert!(matches!(
            mission.fold_at_period(1.51),
            Err(ToolkitError::NoData)
        ));
        assert!(matches!(mission.step1_view_data(), Err(ToolkitError::NoData)));
    }

    #[test]
    fn test_fold_at_planet_b() {
        let outcome = mission_with_data().fold_at_period(1.51).unwrap();
        assert_eq!(outcome.detected(), Some(DetectiveTarget::B));
        assert!(outcome.lines.contains(&"🎯 BINGO! You found TRAPPIST-1b!".to_string()));
        assert!(outcome.lines.contains(&"   Real period: 1.51 days".to_string()));
        assert!(outcome.phase.iter().all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn test_close_period_gives_hint() {
        let outcome = mission_with_data().fold_at_period(1.45).unwrap();
        assert_eq!(outcome.verdict, DetectiveVerdict::Close(DetectiveTarget::B));
        assert_eq!(
            outcome.lines.last().unwrap(),
            "💡 Hint: You're close! Try adjusting slightly..."
        );
    }

    #[test]
    fn test_unrelated_period_detects_nothing() {
        let outcome = mission_with_data().fold_at_period(3.0).unwrap();
        assert_eq!(outcome.verdict, DetectiveVerdict::Nothing);
        assert_eq!(outcome.lines.last().unwrap(), "   Try a different period!");
        assert_eq!(outcome.lines[1], "🔍 Testing period: 3.00 days");
        assert_eq!(outcome.figure.panels[0].title, "Data Folded at 3.00 days");
    }

    #[test]
    fn test_invalid_period() {
        let err = mission_with_data().fold_at_period(-1.0).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidPeriod(_)));
    }

    #[test]
    fn test_step3_counts_planet_b_points() {
        let mission = mission_with_data();
        let report = mission.step3_remove_planet().unwrap();
        let count_line = report
            .lines
            .iter()
            .find(|l| l.starts_with("✅ Found"))
            .unwrap();
        let removed = mission.curve().unwrap().len() - mission.data_without_planet_b().unwrap().len();
        assert_eq!(
            count_line,
            &format!("✅ Found {} transit points for Planet b", removed)
        );
        // A tenth of every 1.51 day orbit is inside the window
        let fraction = removed as f64 / mission.curve().unwrap().len() as f64;
        assert!((fraction - 0.1).abs() < 0.01, "fraction {}", fraction);
    }

    #[test]
    fn test_guided_steps_produce_figures() {
        let mission = mission_with_data();
        assert_eq!(mission.step1_view_data().unwrap().figures.len(), 1);
        let step2 = mission.step2_fold_first_planet().unwrap();
        assert_eq!(step2.lines[2], "STEP 2: FIND THE FIRST PLANET");
        assert_eq!(step2.figures.len(), 1);
        let step4 = mission.step4_find_second_planet().unwrap();
        assert!(step4.text().contains("You found TRAPPIST-1c"));
    }

    #[test]
    fn test_conclusion_needs_no_data() {
        let report = TrappistMission::new().step5_conclusion();
        assert!(report.text().contains("• TRAPPIST-1b: 1.51 day orbit"));
        assert!(report.figures.is_empty());
    }
}
