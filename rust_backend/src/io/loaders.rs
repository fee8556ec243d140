use anyhow::Context;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::core::LightCurve;
use crate::error::{ToolkitError, ToolkitResult};
use crate::parsing::csv_parser::{self, CsvLayout};

/// Folder the workshop bundle ships the habitable-zone data in.
pub const WORKSHOP_DATA_DIR: &str = "Exoplanet_Workshop/Activity3_Entire_Trappist_System";

/// Result of loading a light curve file
#[derive(Debug, Clone)]
pub struct LightCurveLoadResult {
    pub curve: LightCurve,
    pub path: PathBuf,
}

/// Unified interface for loading light curves from mission CSV exports
pub struct LightCurveLoader;

impl LightCurveLoader {
    /// Candidate locations for `filename`, in search order.
    ///
    /// The name itself comes first, then the workshop data folder, the
    /// current and parent directories, then any extra directories.
    pub fn candidate_paths(filename: &str, extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(filename),
            Path::new(WORKSHOP_DATA_DIR).join(filename),
            Path::new(".").join(filename),
            Path::new("..").join(filename),
        ];
        paths.extend(extra_dirs.iter().map(|dir| dir.join(filename)));
        paths
    }

    /// Find the first existing candidate for `filename`.
    pub fn resolve(filename: &str, extra_dirs: &[PathBuf]) -> ToolkitResult<PathBuf> {
        let tried = Self::candidate_paths(filename, extra_dirs);
        match tried.iter().find(|p| p.exists()) {
            Some(path) => {
                debug!("Resolved {} to {}", filename, path.display());
                Ok(path.clone())
            }
            None => Err(ToolkitError::DataNotFound {
                file: filename.to_string(),
                tried,
            }),
        }
    }

    /// Load a light curve from an exact path
    pub fn load_from_file(path: &Path, layout: &CsvLayout) -> ToolkitResult<LightCurveLoadResult> {
        if !path.exists() {
            return Err(ToolkitError::DataNotFound {
                file: path.display().to_string(),
                tried: vec![path.to_path_buf()],
            });
        }

        let curve = csv_parser::parse_light_curve_csv_to_curve(path, layout)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded {} samples from {}", curve.len(), path.display());

        Ok(LightCurveLoadResult {
            curve,
            path: path.to_path_buf(),
        })
    }

    /// Resolve `filename` across the candidate locations, then load it
    pub fn load_with_search(
        filename: &str,
        extra_dirs: &[PathBuf],
        layout: &CsvLayout,
    ) -> ToolkitResult<LightCurveLoadResult> {
        let path = Self::resolve(filename, extra_dirs)?;
        Self::load_from_file(&path, layout)
    }

    /// Write a light curve so that it can be read back with `layout`.
    ///
    /// Layouts that skip a fixed preamble get exactly that many lines
    /// (comments plus the header row), padded if needed.
    pub fn save_to_file(
        path: &Path,
        curve: &LightCurve,
        layout: &CsvLayout,
        comments: &[String],
    ) -> ToolkitResult<()> {
        let mut lines: Vec<String> = comments.to_vec();
        if layout.skip_rows > 0 {
            // The CSV header occupies the last preamble line
            let wanted = layout.skip_rows - 1;
            lines.truncate(wanted);
            while lines.len() < wanted {
                lines.push(String::new());
            }
        }

        let include_header = layout.has_header || layout.skip_rows > 0;
        csv_parser::write_light_curve_csv(path, curve, &lines, include_header)?;
        info!("Wrote {} samples to {}", curve.len(), path.display());
        Ok(())
    }
}
