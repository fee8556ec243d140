//! Light curves: normalized stellar brightness sampled over time.

use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// A photometric time series.
///
/// `time` is in days and `flux` is normalized brightness (1.0 = unobstructed
/// star). Both vectors always have the same length.
///
/// # Examples
///
/// ```
/// use exoplanet_toolkit::core::LightCurve;
///
/// let curve = LightCurve::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.99, 1.0]).unwrap();
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve.end_time(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightCurve {
    time: Vec<f64>,
    flux: Vec<f64>,
}

impl LightCurve {
    /// Creates a light curve, rejecting mismatched column lengths.
    pub fn new(time: Vec<f64>, flux: Vec<f64>) -> ToolkitResult<Self> {
        if time.len() != flux.len() {
            return Err(ToolkitError::InvalidInput(format!(
                "time has {} samples but flux has {}",
                time.len(),
                flux.len()
            )));
        }
        Ok(Self { time, flux })
    }

    /// An empty curve, used when loading fails but the mission must still exist.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.time.first().copied()
    }

    pub fn end_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    /// Elapsed time between the first and last sample.
    pub fn time_span(&self) -> f64 {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// Returns the samples whose mask entry is `true`.
    pub fn select(&self, mask: &[bool]) -> LightCurve {
        let (time, flux) = self
            .time
            .iter()
            .zip(&self.flux)
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|((t, f), _)| (*t, *f))
            .unzip();
        LightCurve { time, flux }
    }

    /// Consumes the curve and returns its columns.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.time, self.flux)
    }

    /// One-line description used by the mission banners.
    pub fn summary_lines(&self) -> Vec<String> {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => vec![
                format!("📊 {} data points", format_thousands(self.len())),
                format!("📅 Time range: {:.1} to {:.1} days", start, end),
            ],
            _ => vec!["⚠️  No data points".to_string()],
        }
    }
}

/// Formats an integer with `,` thousands separators (`12345` -> `12,345`).
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = LightCurve::new(vec![0.0, 1.0], vec![1.0]);
        assert!(matches!(result, Err(ToolkitError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_curve_accessors() {
        let curve = LightCurve::empty();
        assert!(curve.is_empty());
        assert_eq!(curve.start_time(), None);
        assert_eq!(curve.time_span(), 0.0);
    }

    #[test]
    fn test_select_by_mask() {
        let curve = LightCurve::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.9, 1.0]).unwrap();
        let picked = curve.select(&[false, true, true]);
        assert_eq!(picked.time(), &[1.0, 2.0]);
        assert_eq!(picked.flux(), &[0.9, 1.0]);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
