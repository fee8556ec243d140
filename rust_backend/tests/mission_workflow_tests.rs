//! End-to-end tests for the three missions.
//!
//! Each test writes simulated data in the mission's file layout to a
//! temporary directory, points the mission at it through its search
//! directories, and runs the workshop flow.

use std::path::{Path, PathBuf};

use exoplanet_toolkit::algorithms::{DetectiveTarget, TransitParameters};
use exoplanet_toolkit::io::LightCurveLoader;
use exoplanet_toolkit::missions::{KeplerTool, TrappistHabitable, TrappistMission};
use exoplanet_toolkit::parsing::CsvLayout;
use exoplanet_toolkit::simulation::{SimulationPreset, KEPLER22B_PARAMETERS};
use exoplanet_toolkit::visualization::Figure;
use exoplanet_toolkit::{ToolkitConfig, ToolkitError};
use tempfile::TempDir;

// ==================== Helper Functions ====================

fn write_preset(dir: &Path, preset: SimulationPreset, file_name: &str, layout: &CsvLayout) -> PathBuf {
    let curve = preset.generate(42).unwrap();
    let path = dir.join(file_name);
    let comments = vec![
        preset.description().to_string(),
        "Seed: 42".to_string(),
        "Columns: time, flux".to_string(),
        String::new(),
    ];
    LightCurveLoader::save_to_file(&path, &curve, layout, &comments).unwrap();
    path
}

fn habitable_config(dir: &TempDir) -> ToolkitConfig {
    let mut config = ToolkitConfig::default();
    config.data.search_dirs = vec![dir.path().to_path_buf()];
    config.output.report_dir = dir.path().join("reports");
    config
}

// ==================== Kepler ====================

#[test]
fn test_kepler_file_workflow() {
    let dir = TempDir::new().unwrap();
    write_preset(
        dir.path(),
        SimulationPreset::Kepler22b,
        "it_kepler22b.csv",
        &CsvLayout::kepler(),
    );

    let tool = KeplerTool::new(42).with_search_dirs(vec![dir.path().to_path_buf()]);
    let (curve, lines) = tool.load_data("it_kepler22b.csv").unwrap();
    assert_eq!(curve.len(), 4800);
    assert_eq!(lines[1], "✅ Successfully loaded 4800 data points");

    let fit = tool.evaluate_fit(&curve, KEPLER22B_PARAMETERS).unwrap();
    assert!(fit.evaluation.score > 50.0, "score {}", fit.evaluation.score);
    assert_eq!(fit.figure.panels.len(), 4);

    let wrong = tool
        .evaluate_fit(&curve, TransitParameters::new(0.05, 260.0, 4.0))
        .unwrap();
    assert!(wrong.evaluation.score < fit.evaluation.score);
}

#[test]
fn test_kepler_missing_file() {
    let tool = KeplerTool::new(42);
    let err = tool.load_data("it_no_such_kepler.csv").unwrap_err();
    match err {
        ToolkitError::DataNotFound { file, tried } => {
            assert_eq!(file, "it_no_such_kepler.csv");
            assert_eq!(tried.len(), 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ==================== Detective ====================

#[test]
fn test_detective_finds_both_planets() {
    let dir = TempDir::new().unwrap();
    write_preset(
        dir.path(),
        SimulationPreset::Trappist1,
        "it_trappist1.csv",
        &CsvLayout::commented(),
    );

    let mut mission = TrappistMission::new().with_search_dirs(vec![dir.path().to_path_buf()]);
    assert!(matches!(mission.step1_view_data(), Err(ToolkitError::NoData)));

    mission.load_data("it_trappist1.csv").unwrap();
    let n = SimulationPreset::Trappist1.generate(42).unwrap().len();
    assert_eq!(mission.curve().unwrap().len(), n);

    let b = mission.fold_at_period(1.51).unwrap();
    assert_eq!(b.detected(), Some(DetectiveTarget::B));
    let c = mission.fold_at_period(2.42).unwrap();
    assert_eq!(c.detected(), Some(DetectiveTarget::C));
    assert_eq!(mission.fold_at_period(3.0).unwrap().detected(), None);

    for step in [
        mission.step1_view_data().unwrap(),
        mission.step2_fold_first_planet().unwrap(),
        mission.step3_remove_planet().unwrap(),
        mission.step4_find_second_planet().unwrap(),
    ] {
        assert_eq!(step.figures.len(), 1, "{}", step.title);
    }

    let without_b = mission.data_without_planet_b().unwrap();
    assert!(without_b.len() < n);
}

// ==================== Habitable ====================

#[test]
fn test_habitable_workflow_writes_report() {
    let dir = TempDir::new().unwrap();
    write_preset(
        dir.path(),
        SimulationPreset::Trappist1Jwst,
        "it_trappist_jwst.csv",
        &CsvLayout::commented_with_header(),
    );

    let mut mission = TrappistHabitable::with_config(Some("it_trappist_jwst.csv"), habitable_config(&dir));
    assert!(mission.has_data());
    assert!(mission
        .startup()
        .lines
        .iter()
        .any(|l| l == "✅ Mission initialized and ready!"));

    let view = mission.visualize_data().unwrap();
    let json = view.figures[0].to_json(false).unwrap();
    let figure = Figure::from_json(&json).unwrap();
    assert_eq!(figure.panels[0].title, "FULL TRAPPIST-1 System Light Curve");

    mission.find_habitable_periods().unwrap();
    assert_eq!(mission.run_habitability_dashboard().unwrap().figures[0].panels.len(), 3);
    assert_eq!(mission.solar_system_comparison().figures.len(), 1);

    let saved = mission.save_report(Some("Integration_Team")).unwrap();
    assert_eq!(
        saved.path,
        dir.path().join("reports").join("trappist_report_Integration_Team.txt")
    );
    let text = std::fs::read_to_string(&saved.path).unwrap();
    assert!(text.contains("TEAM: Integration_Team"));
    assert!(text.contains("Data File: it_trappist_jwst.csv"));
}

#[test]
fn test_habitable_reload_after_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut mission = TrappistHabitable::with_config(Some("it_missing_jwst.csv"), habitable_config(&dir));
    assert!(matches!(mission.visualize_data(), Err(ToolkitError::EmptyData)));
    assert!(mission.real_science_connection().lines.len() > 10);

    write_preset(
        dir.path(),
        SimulationPreset::Trappist1Jwst,
        "it_late_jwst.csv",
        &CsvLayout::commented_with_header(),
    );
    let (loaded, lines) = mission.load_data(Some("it_still_missing.csv"));
    assert!(!loaded);
    assert_eq!(lines[0], "❌ File not found: it_still_missing.csv");
    assert!(lines[1].starts_with("   Tried: "), "{}", lines[1]);
    assert!(lines[1].contains("it_still_missing.csv"));

    let (loaded, lines) = mission.load_data(Some("it_late_jwst.csv"));
    assert!(loaded);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("✅ Data loaded from: "), "{}", lines[0]);
    assert!(lines[0].ends_with("it_late_jwst.csv"));
    assert!(mission.visualize_data().is_ok());
}
