//! Matching trial periods against known planets, and a brute-force
//! folded-dip scan for finding periods in unlabelled data.

use serde::{Deserialize, Serialize};

use super::transit::{phase_of, validate_period};
use crate::core::{find_planet_near, CatalogPlanet, LightCurve};
use crate::error::{ToolkitError, ToolkitResult};

/// A fold counts as a detection when it is within this many days of a known period.
pub const DETECTION_TOLERANCE: f64 = 0.05;

/// Tolerance for labelling a listed period as a known planet.
pub const CATALOG_MATCH_TOLERANCE: f64 = 0.01;

/// Periods offered to students in the habitable-zone mission. Some of them
/// are decoys.
pub const MYSTERY_PERIODS: [f64; 7] = [1.51, 2.42, 3.0, 4.05, 6.10, 9.21, 12.0];

/// Phase window `(start, end)` highlighted around a detected transit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub start: f64,
    pub end: f64,
}

impl PhaseWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Inner TRAPPIST-1 planets the detective mission searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectiveTarget {
    B,
    C,
}

impl DetectiveTarget {
    pub fn period(&self) -> f64 {
        match self {
            DetectiveTarget::B => 1.51,
            DetectiveTarget::C => 2.42,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetectiveTarget::B => "TRAPPIST-1b",
            DetectiveTarget::C => "TRAPPIST-1c",
        }
    }

    /// Planet b's transit is wider in phase because its orbit is shorter.
    pub fn window(&self) -> PhaseWindow {
        match self {
            DetectiveTarget::B => PhaseWindow::new(0.45, 0.55),
            DetectiveTarget::C => PhaseWindow::new(0.48, 0.52),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DetectiveTarget::B => "red",
            DetectiveTarget::C => "green",
        }
    }
}

/// Outcome of checking a trial period in the detective mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectiveVerdict {
    Found(DetectiveTarget),
    /// Not a detection, but within the "getting warm" band of a target.
    Close(DetectiveTarget),
    Nothing,
}

pub fn detective_verdict(period: f64) -> DetectiveVerdict {
    for target in [DetectiveTarget::B, DetectiveTarget::C] {
        if (period - target.period()).abs() < DETECTION_TOLERANCE {
            return DetectiveVerdict::Found(target);
        }
    }
    if period > 1.4 && period < 1.6 {
        DetectiveVerdict::Close(DetectiveTarget::B)
    } else if period > 2.3 && period < 2.5 {
        DetectiveVerdict::Close(DetectiveTarget::C)
    } else {
        DetectiveVerdict::Nothing
    }
}

/// Transit window used when a habitable-mission fold matches a planet.
pub const CATALOG_TRANSIT_WINDOW: PhaseWindow = PhaseWindow::new(0.48, 0.52);

/// Known planet matching a fold period in the habitable-zone mission.
pub fn catalog_match(period: f64) -> Option<&'static CatalogPlanet> {
    find_planet_near(period, DETECTION_TOLERANCE)
}

/// One row of the candidate-period table.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodListing {
    pub index: usize,
    pub period: f64,
    pub planet: Option<&'static CatalogPlanet>,
}

impl PeriodListing {
    pub fn describe(&self) -> String {
        let source = match self.planet {
            Some(p) => format!("✅ Planet {} ({})", p.letter, p.class),
            None => "❌ Unknown".to_string(),
        };
        format!("{:2}. {:5.2} days  {}", self.index, self.period, source)
    }
}

/// Label every mystery period with the catalogue planet it matches, if any.
pub fn list_mystery_periods() -> Vec<PeriodListing> {
    MYSTERY_PERIODS
        .iter()
        .enumerate()
        .map(|(i, &period)| PeriodListing {
            index: i + 1,
            period,
            planet: find_planet_near(period, CATALOG_MATCH_TOLERANCE),
        })
        .collect()
}

/// Parameters for [`scan_periods`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodScan {
    pub min_period: f64,
    pub max_period: f64,
    pub step: f64,
    pub n_bins: usize,
    /// Upper bound on the number of trial periods one scan may fold.
    pub max_trials: usize,
}

/// Default trial cap: a million folds of a few thousand samples.
pub const DEFAULT_MAX_TRIALS: usize = 1_000_000;

impl Default for PeriodScan {
    fn default() -> Self {
        Self {
            min_period: 1.0,
            max_period: 20.0,
            step: 0.01,
            n_bins: 50,
            max_trials: DEFAULT_MAX_TRIALS,
        }
    }
}

impl PeriodScan {
    /// Number of trial periods from `min_period` to `max_period` inclusive.
    pub fn trial_count(&self) -> f64 {
        ((self.max_period - self.min_period) / self.step).floor() + 1.0
    }
}

/// Dip strength of the curve folded at one trial period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodCandidate {
    pub period: f64,
    /// Median bin flux minus the darkest bin flux
    pub depth: f64,
    /// Phase (bin centre) of the darkest bin
    pub phase: f64,
}

/// Fold the curve at every trial period and rank periods by dip depth.
///
/// Each fold is binned into `n_bins` phase bins; the dip depth is the median
/// of the non-empty bin means minus the smallest bin mean. Candidates are
/// returned strongest first.
pub fn scan_periods(curve: &LightCurve, scan: &PeriodScan) -> ToolkitResult<Vec<PeriodCandidate>> {
    validate_period(scan.min_period)?;
    validate_period(scan.max_period)?;
    if scan.max_period < scan.min_period {
        return Err(ToolkitError::InvalidPeriod(scan.max_period));
    }
    if !(scan.step.is_finite() && scan.step > 0.0) {
        return Err(ToolkitError::InvalidInput(format!(
            "scan step must be positive, got {}",
            scan.step
        )));
    }
    if scan.n_bins < 2 {
        return Err(ToolkitError::InvalidInput(
            "scan needs at least 2 phase bins".to_string(),
        ));
    }
    let trials = scan.trial_count();
    if trials > scan.max_trials as f64 {
        return Err(ToolkitError::InvalidInput(format!(
            "scan of {}..{} days at step {} needs {:.0} trial periods, limit is {}",
            scan.min_period, scan.max_period, scan.step, trials, scan.max_trials
        )));
    }
    if curve.is_empty() {
        return Err(ToolkitError::EmptyData);
    }

    let mut candidates: Vec<PeriodCandidate> = (0..trials as usize)
        .map(|i| scan.min_period + i as f64 * scan.step)
        .filter_map(|period| fold_dip(curve, period, scan.n_bins))
        .collect();

    candidates.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    Ok(candidates)
}

/// Strongest candidates whose periods differ by at least `min_separation`
/// (relative), so neighbouring trial periods of one dip count once.
pub fn distinct_candidates(
    candidates: &[PeriodCandidate],
    count: usize,
    min_separation: f64,
) -> Vec<PeriodCandidate> {
    let mut picked: Vec<PeriodCandidate> = Vec::with_capacity(count);
    for candidate in candidates {
        if picked.len() == count {
            break;
        }
        let overlaps = picked
            .iter()
            .any(|p| (p.period - candidate.period).abs() < min_separation * p.period);
        if !overlaps {
            picked.push(*candidate);
        }
    }
    picked
}

fn fold_dip(curve: &LightCurve, period: f64, n_bins: usize) -> Option<PeriodCandidate> {
    let mut sums = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];

    for (&t, &f) in curve.time().iter().zip(curve.flux()) {
        let bin = ((phase_of(t, period) * n_bins as f64) as usize).min(n_bins - 1);
        sums[bin] += f;
        counts[bin] += 1;
    }

    let means: Vec<(usize, f64)> = sums
        .iter()
        .zip(&counts)
        .enumerate()
        .filter(|(_, (_, &count))| count > 0)
        .map(|(i, (&sum, &count))| (i, sum / count as f64))
        .collect();

    if means.len() < 2 {
        return None;
    }

    let (darkest_bin, darkest) = means
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let mut sorted: Vec<f64> = means.iter().map(|(_, m)| *m).collect();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    Some(PeriodCandidate {
        period,
        depth: median - darkest,
        phase: (darkest_bin as f64 + 0.5) / n_bins as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::transit::{transit_model, TransitParameters};

    #[test]
    fn test_detective_verdicts() {
        assert_eq!(detective_verdict(1.51), DetectiveVerdict::Found(DetectiveTarget::B));
        assert_eq!(detective_verdict(2.45), DetectiveVerdict::Found(DetectiveTarget::C));
        assert_eq!(detective_verdict(1.45), DetectiveVerdict::Close(DetectiveTarget::B));
        assert_eq!(detective_verdict(2.35), DetectiveVerdict::Close(DetectiveTarget::C));
        assert_eq!(detective_verdict(3.0), DetectiveVerdict::Nothing);
        assert_eq!(detective_verdict(4.0), DetectiveVerdict::Nothing);
    }

    #[test]
    fn test_catalog_match_tolerance() {
        assert_eq!(catalog_match(6.14).map(|p| p.letter), Some('e'));
        assert!(catalog_match(6.2).is_none());
    }

    #[test]
    fn test_mystery_period_listing() {
        let listings = list_mystery_periods();
        assert_eq!(listings.len(), 7);
        assert_eq!(listings[0].planet.map(|p| p.letter), Some('b'));
        assert!(listings[2].planet.is_none()); // 3.0 is a decoy
        assert!(listings[6].planet.is_none()); // 12.0 is not 12.35
        assert_eq!(listings[3].describe(), " 4.  4.05 days  ✅ Planet d (habitable)");
        assert!(listings[2].describe().ends_with("❌ Unknown"));
    }

    #[test]
    fn test_scan_finds_injected_period() {
        let params = TransitParameters::new(0.08, 4.05, 2.0);
        let time: Vec<f64> = (0..8000).map(|i| i as f64 * 0.005).collect();
        let flux = transit_model(&time, &params).unwrap();
        let curve = LightCurve::new(time, flux).unwrap();

        let scan = PeriodScan {
            min_period: 3.0,
            max_period: 5.0,
            step: 0.01,
            n_bins: 40,
            ..PeriodScan::default()
        };
        let candidates = scan_periods(&curve, &scan).unwrap();
        let best = candidates[0];

        assert!((best.period - 4.05).abs() < 0.03, "best period {}", best.period);
        assert!(best.depth > 0.003);
    }

    #[test]
    fn test_distinct_candidates_skips_neighbours() {
        let c = |period, depth| PeriodCandidate { period, depth, phase: 0.5 };
        let ranked = [c(4.05, 0.01), c(4.06, 0.009), c(2.42, 0.008), c(4.04, 0.007), c(6.1, 0.005)];
        let picked = distinct_candidates(&ranked, 3, 0.02);
        let periods: Vec<f64> = picked.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![4.05, 2.42, 6.1]);
    }

    #[test]
    fn test_scan_rejects_bad_ranges() {
        let curve = LightCurve::new(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap();
        let bad_order = PeriodScan { min_period: 5.0, max_period: 2.0, ..PeriodScan::default() };
        assert!(scan_periods(&curve, &bad_order).is_err());

        let bad_step = PeriodScan { step: 0.0, ..PeriodScan::default() };
        assert!(scan_periods(&curve, &bad_step).is_err());

        let empty = scan_periods(&LightCurve::empty(), &PeriodScan::default());
        assert!(matches!(empty, Err(ToolkitError::EmptyData)));
    }

    #[test]
    fn test_scan_rejects_tiny_step() {
        let time: Vec<f64> = (0..4000).map(|i| i as f64 * 0.01).collect();
        let curve = LightCurve::new(time, vec![1.0; 4000]).unwrap();
        let tiny = PeriodScan { step: 1e-12, ..PeriodScan::default() };
        assert!(tiny.trial_count() > 1e12);

        let started = std::time::Instant::now();
        let result = scan_periods(&curve, &tiny);
        assert!(matches!(result, Err(ToolkitError::InvalidInput(_))));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_scan_trial_limit_is_inclusive() {
        let curve = LightCurve::new(vec![0.0, 0.5, 1.0, 1.5], vec![1.0, 0.9, 1.0, 0.9]).unwrap();
        let scan = PeriodScan {
            min_period: 1.0,
            max_period: 1.5,
            step: 0.25,
            n_bins: 2,
            max_trials: 3,
        };
        assert_eq!(scan.trial_count(), 3.0);
        assert!(scan_periods(&curve, &scan).is_ok());

        let too_few = PeriodScan { max_trials: 2, ..scan };
        assert!(matches!(scan_periods(&curve, &too_few), Err(ToolkitError::InvalidInput(_))));
    }
}
