//! Error types shared by the missions, loaders and configuration.

use std::path::PathBuf;

/// Result type for toolkit operations
pub type ToolkitResult<T> = Result<T, ToolkitError>;

/// Error type for toolkit operations
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("Data file '{file}' not found (tried: {})", format_tried(.tried))]
    DataNotFound { file: String, tried: Vec<PathBuf> },

    #[error("No data loaded! Run load_data() first.")]
    NoData,

    #[error("Data is empty! Check your file path.")]
    EmptyData,

    #[error("Invalid period: {0} (must be a positive, finite number of days)")]
    InvalidPeriod(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load light curve: {0:#}")]
    Load(#[from] anyhow::Error),
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for ToolkitError {
    fn from(e: serde_json::Error) -> Self {
        ToolkitError::InvalidInput(format!("Serialization failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_not_found_lists_tried_paths() {
        let err = ToolkitError::DataNotFound {
            file: "trappist.csv".to_string(),
            tried: vec![PathBuf::from("trappist.csv"), PathBuf::from("../trappist.csv")],
        };
        let msg = err.to_string();
        assert!(msg.contains("'trappist.csv'"));
        assert!(msg.contains("../trappist.csv"));
    }

    #[test]
    fn test_invalid_period_message() {
        let msg = ToolkitError::InvalidPeriod(-1.0).to_string();
        assert!(msg.contains("-1"));
    }
}
