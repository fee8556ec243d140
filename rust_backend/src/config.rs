//! Toolkit configuration file support.
//!
//! Reads `exoplanet.toml`. Every field has a default, so an empty file (or no
//! file at all) gives the workshop's standard setup.
//!
//! ```toml
//! [data]
//! kepler_file = "kepler22b_data.csv"
//! search_dirs = ["data"]
//!
//! [simulation]
//! seed = 7
//!
//! [output]
//! report_dir = "reports"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ToolkitError, ToolkitResult};
use crate::simulation::{SimulationPreset, DEFAULT_SEED};

/// Name of the configuration file searched for by [`ToolkitConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "exoplanet.toml";

/// Toolkit configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_kepler_file")]
    pub kepler_file: String,
    #[serde(default = "default_trappist_file")]
    pub trappist_file: String,
    #[serde(default = "default_habitable_file")]
    pub habitable_file: String,
    /// Extra directories tried after the standard locations
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
}

/// Synthetic data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Where reports and figures are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    /// When set, figures are written here as JSON
    #[serde(default)]
    pub figure_dir: Option<PathBuf>,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_kepler_file() -> String {
    SimulationPreset::Kepler22b.default_file_name().to_string()
}

fn default_trappist_file() -> String {
    SimulationPreset::Trappist1.default_file_name().to_string()
}

fn default_habitable_file() -> String {
    SimulationPreset::Trappist1Jwst.default_file_name().to_string()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pretty_json() -> bool {
    true
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            kepler_file: default_kepler_file(),
            trappist_file: default_trappist_file(),
            habitable_file: default_habitable_file(),
            search_dirs: Vec::new(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            figure_dir: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl ToolkitConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(ToolkitConfig)` if successful
    /// * `Err(ToolkitError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ToolkitResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ToolkitError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ToolkitResult<Self> {
        toml::from_str(content).map_err(|e| {
            ToolkitError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// First existing `exoplanet.toml` in the standard locations:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn default_path() -> Option<PathBuf> {
        Self::default_candidates().into_iter().find(|path| path.exists())
    }

    fn default_candidates() -> Vec<PathBuf> {
        vec![
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
    }

    /// Load configuration from the default location.
    pub fn from_default_location() -> ToolkitResult<Self> {
        match Self::default_path() {
            Some(path) => {
                log::debug!("Using configuration at {}", path.display());
                Self::from_file(&path)
            }
            None => Err(ToolkitError::Configuration(format!(
                "No {} found in standard locations",
                CONFIG_FILE_NAME
            ))),
        }
    }

    /// Default-location config, or built-in defaults when no file exists.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> ToolkitResult<Self> {
        Self::load_first_or_default(&Self::default_candidates())
    }

    /// First existing file among `candidates`, or defaults when none exists.
    pub fn load_first_or_default(candidates: &[PathBuf]) -> ToolkitResult<Self> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => {
                log::debug!("Using configuration at {}", path.display());
                Self::from_file(path)
            }
            None => {
                log::debug!("No {} found; using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Path a team report is written to.
    pub fn report_path(&self, team_name: &str) -> PathBuf {
        self.output
            .report_dir
            .join(format!("trappist_report_{}.txt", team_name))
    }
}
