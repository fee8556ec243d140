//! Exoplanet Lab command line driver
//!
//! Runs the workshop missions outside a notebook. Console lines go to
//! stdout; figures are written as JSON when a figure directory is given.
//!
//! # Usage
//!
//! ```bash
//! # Write synthetic data files for all three missions
//! exoplanet-lab simulate --preset all
//!
//! # Score a Kepler-22b fit
//! exoplanet-lab kepler --size 0.06 --period 289.9 --speed 1.0
//!
//! # Full habitable-zone walkthrough with figures and a team report
//! exoplanet-lab --figure-dir figures habitable --team Team_Alpha
//! ```
//!
//! # Environment Variables
//!
//! - `EXOPLANET_CONFIG`: path to an `exoplanet.toml`
//! - `RUST_LOG`: overrides the verbosity flags

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use tracing::{error, info};

use exoplanet_toolkit::algorithms::{distinct_candidates, scan_periods, PeriodScan, TransitParameters};
use exoplanet_toolkit::io::LightCurveLoader;
use exoplanet_toolkit::missions::{KeplerTool, StepReport, TrappistHabitable, TrappistMission};
use exoplanet_toolkit::parsing::CsvLayout;
use exoplanet_toolkit::simulation::SimulationPreset;
use exoplanet_toolkit::visualization::Figure;
use exoplanet_toolkit::{ToolkitConfig, ToolkitError};

/// Exoplanet Lab - transit photometry workshop missions
#[derive(Debug, Parser)]
#[command(name = "exoplanet-lab", author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "EXOPLANET_CONFIG", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory for figure JSON files
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    figure_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write synthetic light-curve files
    Simulate {
        #[arg(long, value_enum, default_value = "all")]
        preset: PresetArg,

        /// Output directory
        #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
        output: PathBuf,

        /// Random seed (defaults to the configured seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score a transit model against Kepler-22b data
    Kepler {
        /// Data file (defaults to the configured Kepler file)
        #[arg(short, long)]
        file: Option<String>,

        /// Use simulated data instead of a file
        #[arg(long)]
        simulate: bool,

        /// Planet size (Rp/Rs)
        #[arg(long, default_value_t = 0.05)]
        size: f64,

        /// Orbital period in days
        #[arg(long, default_value_t = 260.0)]
        period: f64,

        /// Orbital speed factor
        #[arg(long, default_value_t = 4.0)]
        speed: f64,
    },

    /// Walk through the TRAPPIST-1 detective mission
    Detective {
        #[arg(short, long)]
        file: Option<String>,

        #[arg(long)]
        simulate: bool,

        /// Extra trial periods to fold at
        #[arg(long = "fold", value_name = "DAYS")]
        folds: Vec<f64>,
    },

    /// Run the habitable-zone mission and save a team report
    Habitable {
        #[arg(short, long)]
        file: Option<String>,

        #[arg(long)]
        simulate: bool,

        /// Team name used in the report file name
        #[arg(long, default_value = "Team_Alpha")]
        team: String,

        /// Extra trial periods to fold at
        #[arg(long = "fold", value_name = "DAYS")]
        folds: Vec<f64>,
    },

    /// Search a light curve for transit periods
    Scan {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value = "commented")]
        layout: LayoutArg,

        #[arg(long, default_value_t = 1.0)]
        min_period: f64,

        #[arg(long, default_value_t = 20.0)]
        max_period: f64,

        #[arg(long, default_value_t = 0.01)]
        step: f64,

        /// Number of distinct periods to report
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Kepler,
    Trappist,
    Jwst,
    All,
}

impl PresetArg {
    fn presets(self) -> Vec<SimulationPreset> {
        match self {
            PresetArg::Kepler => vec![SimulationPreset::Kepler22b],
            PresetArg::Trappist => vec![SimulationPreset::Trappist1],
            PresetArg::Jwst => vec![SimulationPreset::Trappist1Jwst],
            PresetArg::All => vec![
                SimulationPreset::Kepler22b,
                SimulationPreset::Trappist1,
                SimulationPreset::Trappist1Jwst,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Five preamble lines, no header
    Kepler,
    /// `#` comments, no header
    Commented,
    /// `#` comments and a `time,flux` header
    Header,
}

impl LayoutArg {
    fn layout(self) -> CsvLayout {
        match self {
            LayoutArg::Kepler => CsvLayout::kepler(),
            LayoutArg::Commented => CsvLayout::commented(),
            LayoutArg::Header => CsvLayout::commented_with_header(),
        }
    }
}

fn layout_for(preset: SimulationPreset) -> CsvLayout {
    match preset {
        SimulationPreset::Kepler22b => CsvLayout::kepler(),
        SimulationPreset::Trappist1 => CsvLayout::commented(),
        SimulationPreset::Trappist1Jwst => CsvLayout::commented_with_header(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            match e.downcast_ref::<ToolkitError>() {
                Some(ToolkitError::Configuration(_)) => ExitCode::from(2),
                Some(ToolkitError::DataNotFound { .. }) | Some(ToolkitError::Io(_)) => ExitCode::from(3),
                Some(ToolkitError::InvalidPeriod(_)) | Some(ToolkitError::InvalidInput(_)) => {
                    ExitCode::from(5)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    // `init` also routes `log` records from the library through tracing
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(cli.verbose >= 2).with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<ToolkitConfig> {
    let mut config = match &cli.config {
        Some(path) => ToolkitConfig::from_file(path)?,
        None => ToolkitConfig::load_or_default()?,
    };
    if let Some(dir) = &cli.figure_dir {
        config.output.figure_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let output = Output::new(&config);

    match cli.command {
        Command::Simulate {
            preset,
            output: dir,
            seed,
        } => simulate(&dir, preset, seed.unwrap_or(config.simulation.seed)),
        Command::Kepler {
            file,
            simulate,
            size,
            period,
            speed,
        } => {
            let tool = KeplerTool::new(config.simulation.seed).with_search_dirs(config.data.search_dirs.clone());
            let curve = if simulate {
                tool.simulated_data()?
            } else {
                let file = file.unwrap_or_else(|| config.data.kepler_file.clone());
                let (curve, lines) = tool.load_data(&file)?;
                output.lines(&lines);
                curve
            };
            output.figure("kepler_light_curve", &tool.plot_light_curve(&curve, None))?;
            output.report("kepler_intro", tool.interactive_intro())?;

            let fit = tool.evaluate_fit(&curve, TransitParameters::new(size, period, speed))?;
            output.lines(&fit.lines);
            output.figure("kepler_fit", &fit.figure)
        }
        Command::Detective {
            file,
            simulate,
            folds,
        } => {
            let mut mission = TrappistMission::new().with_search_dirs(config.data.search_dirs.clone());
            output.lines(&TrappistMission::briefing());
            if simulate {
                mission.set_data(SimulationPreset::Trappist1.generate(config.simulation.seed)?);
            } else {
                let file = file.unwrap_or_else(|| config.data.trappist_file.clone());
                let lines = mission.load_data(&file)?;
                output.lines(&lines);
            }

            output.report("detective_step1", mission.step1_view_data()?)?;
            output.report("detective_step2", mission.step2_fold_first_planet()?)?;
            output.report("detective_step3", mission.step3_remove_planet()?)?;
            output.report("detective_step4", mission.step4_find_second_planet()?)?;
            for period in folds {
                let fold = mission.fold_at_period(period)?;
                output.lines(&fold.lines);
                output.figure(&format!("detective_fold_{:.2}", period), &fold.figure)?;
            }
            output.report("detective_step5", mission.step5_conclusion())
        }
        Command::Habitable {
            file,
            simulate,
            team,
            folds,
        } => {
            let mut mission = if simulate {
                let mut mission = TrappistHabitable::without_data(config.clone());
                let curve = SimulationPreset::Trappist1Jwst.generate(config.simulation.seed)?;
                mission.set_data(curve, SimulationPreset::Trappist1Jwst.default_file_name());
                mission
            } else {
                let file = file.unwrap_or_else(|| config.data.habitable_file.clone());
                let mission = TrappistHabitable::with_config(Some(&file), config.clone());
                output.lines(&mission.startup().lines);
                mission
            };

            output.report("habitable_data", mission.visualize_data()?)?;
            output.report("habitable_periods", mission.find_habitable_periods()?)?;
            for period in folds {
                output.report(&format!("habitable_fold_{:.2}", period), mission.fold_at_period(period)?)?;
            }
            output.report("habitable_dashboard", mission.run_habitability_dashboard()?)?;
            output.report("habitable_system", mission.show_full_system())?;
            output.report("habitable_comparison", mission.solar_system_comparison())?;
            output.report("habitable_science", mission.real_science_connection())?;

            let saved = mission.save_report(Some(&team))?;
            output.lines(&saved.lines);
            info!("Report written to {}", saved.path.display());
            Ok(())
        }
        Command::Scan {
            file,
            layout,
            min_period,
            max_period,
            step,
            top,
        } => {
            let loaded = LightCurveLoader::load_from_file(&file, &layout.layout())?;
            let scan = PeriodScan {
                min_period,
                max_period,
                step,
                ..PeriodScan::default()
            };
            let candidates = scan_periods(&loaded.curve, &scan)?;
            println!("{:>4}  {:>8}  {:>8}  {:>6}", "rank", "period", "depth", "phase");
            for (i, c) in distinct_candidates(&candidates, top, 0.02).iter().enumerate() {
                println!("{:>4}  {:>8.3}  {:>8.5}  {:>6.3}", i + 1, c.period, c.depth, c.phase);
            }
            Ok(())
        }
    }
}

fn simulate(dir: &Path, preset: PresetArg, seed: u64) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for preset in preset.presets() {
        let curve = preset.generate(seed)?;
        let path = dir.join(preset.default_file_name());
        let comments = vec![
            preset.description().to_string(),
            format!("Seed: {}", seed),
            "Columns: time (days), flux (normalized)".to_string(),
            String::new(),
        ];
        LightCurveLoader::save_to_file(&path, &curve, &layout_for(preset), &comments)?;
        println!("✅ Wrote {} ({} points)", path.display(), curve.len());
    }
    Ok(())
}

/// Console lines to stdout, figures to the figure directory if one is set.
struct Output {
    figure_dir: Option<PathBuf>,
    pretty: bool,
}

impl Output {
    fn new(config: &ToolkitConfig) -> Self {
        Self {
            figure_dir: config.output.figure_dir.clone(),
            pretty: config.output.pretty_json,
        }
    }

    fn lines(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }

    fn figure(&self, name: &str, figure: &Figure) -> Result<()> {
        let Some(dir) = &self.figure_dir else {
            return Ok(());
        };
        if name.contains(['/', '\\']) {
            bail!("figure name '{}' is not a file name", name);
        }
        let path = dir.join(format!("{}.json", name));
        figure.write_json(&path, self.pretty)?;
        info!("Figure written to {}", path.display());
        Ok(())
    }

    fn report(&self, name: &str, report: StepReport) -> Result<()> {
        self.lines(&report.lines);
        for (i, figure) in report.figures.iter().enumerate() {
            let suffix = if report.figures.len() > 1 {
                format!("_{}", i + 1)
            } else {
                String::new()
            };
            self.figure(&format!("{}{}", name, suffix), figure)?;
        }
        Ok(())
    }
}
