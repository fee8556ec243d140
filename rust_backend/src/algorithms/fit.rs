//! Scoring a transit model against observed data, plus the derived
//! quantities shown in the Kepler lab's real-time analysis panels.

use qtty::time::{Days, JulianYear};
use serde::{Deserialize, Serialize};

use super::transit::{transit_model, TransitParameters};
use crate::core::LightCurve;
use crate::error::{ToolkitError, ToolkitResult};

/// Reference period (days) used to scale the transit duration estimate.
const DURATION_REFERENCE_PERIOD: f64 = 290.0;

/// Width of the console progress bar.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Size classification of a planet from its radius ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    EarthSized,
    SuperEarth,
    NeptuneSized,
    JupiterSized,
}

impl SizeClass {
    pub fn from_radius_ratio(planet_size: f64) -> Self {
        if planet_size < 0.04 {
            SizeClass::EarthSized
        } else if planet_size < 0.085 {
            SizeClass::SuperEarth
        } else if planet_size < 0.1 {
            SizeClass::NeptuneSized
        } else {
            SizeClass::JupiterSized
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeClass::EarthSized => "Earth-sized",
            SizeClass::SuperEarth => "Super-Earth",
            SizeClass::NeptuneSized => "Neptune-sized",
            SizeClass::JupiterSized => "Jupiter-sized",
        }
    }

    pub fn planet_type(&self) -> &'static str {
        match self {
            SizeClass::EarthSized => "Rocky World",
            SizeClass::SuperEarth => "Large Rocky",
            SizeClass::NeptuneSized => "Ice Giant",
            SizeClass::JupiterSized => "Gas Giant",
        }
    }

    pub fn composition(&self) -> &'static str {
        match self {
            SizeClass::EarthSized => "Rock/iron like Earth",
            SizeClass::SuperEarth => "Rock with thick atmosphere",
            SizeClass::NeptuneSized => "Hydrogen/helium with icy core",
            SizeClass::JupiterSized => "Mostly hydrogen/helium",
        }
    }
}

/// Temperature classification from the orbital period of a Sun-like host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureClass {
    VeryHot,
    Warm,
    EarthLike,
    Cold,
}

impl TemperatureClass {
    pub fn from_period(orbital_period: f64) -> Self {
        if orbital_period < 200.0 {
            TemperatureClass::VeryHot
        } else if orbital_period < 250.0 {
            TemperatureClass::Warm
        } else if orbital_period < 300.0 {
            TemperatureClass::EarthLike
        } else {
            TemperatureClass::Cold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureClass::VeryHot => "VERY HOT",
            TemperatureClass::Warm => "WARM",
            TemperatureClass::EarthLike => "EARTH-LIKE",
            TemperatureClass::Cold => "COLD",
        }
    }

    pub fn estimated_range(&self) -> &'static str {
        match self {
            TemperatureClass::VeryHot => "700-1000°C",
            TemperatureClass::Warm => "100-300°C",
            TemperatureClass::EarthLike => "0-100°C",
            TemperatureClass::Cold => "-100 to 0°C",
        }
    }

    pub fn habitability(&self) -> &'static str {
        match self {
            TemperatureClass::VeryHot => "Not habitable",
            TemperatureClass::Warm => "Too hot for life",
            TemperatureClass::EarthLike => "Possibly habitable!",
            TemperatureClass::Cold => "Maybe with greenhouse",
        }
    }
}

/// Feedback tier derived from the fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitFeedback {
    Excellent,
    Good,
    Decent,
    KeepTrying,
}

impl FitFeedback {
    pub fn from_score(score: f64) -> Self {
        if score > 50.0 {
            FitFeedback::Excellent
        } else if score > 40.0 {
            FitFeedback::Good
        } else if score > 35.0 {
            FitFeedback::Decent
        } else {
            FitFeedback::KeepTrying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FitFeedback::Excellent => "EXCELLENT FIT! Matches Kepler-22b data well!",
            FitFeedback::Good => "GOOD FIT! Close to the real parameters.",
            FitFeedback::Decent => "DECENT FIT. Keep adjusting!",
            FitFeedback::KeepTrying => "KEEP TRYING! Adjust sliders carefully.",
        }
    }

    pub fn science_context(&self) -> &'static str {
        match self {
            FitFeedback::Excellent => "You've found an Earth-sized world in the habitable zone!",
            FitFeedback::Good => "This could be a super-Earth or mini-Neptune.",
            FitFeedback::Decent => "Look for a deeper dip with the right spacing.",
            FitFeedback::KeepTrying => "Check period spacing and transit depth.",
        }
    }
}

/// Everything the Kepler lab reports about one set of slider values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitEvaluation {
    pub params: TransitParameters,
    pub model_flux: Vec<f64>,
    pub residuals: Vec<f64>,
    pub rms_error: f64,
    pub score: f64,
    /// Transit depth in percent
    pub depth_percent: f64,
    /// Estimated transit duration in days
    pub duration_days: f64,
    /// Approximate orbital distance in AU (Kepler's third law, solar-mass host)
    pub orbital_distance_au: f64,
    pub size_class: SizeClass,
    pub temperature_class: TemperatureClass,
    pub feedback: FitFeedback,
}

impl FitEvaluation {
    pub fn hints(&self) -> Vec<String> {
        fit_hints(self.score, self.rms_error, self.params.planet_size)
    }

    pub fn progress_bar(&self) -> String {
        progress_bar(self.score)
    }
}

/// Root-mean-square of the residuals.
pub fn rms(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = residuals.iter().map(|r| r * r).sum();
    (sum_sq / residuals.len() as f64).sqrt()
}

/// Fit score in `[0, 100]`: `100 * exp(-1000 * rms)`.
pub fn fit_score(rms_error: f64) -> f64 {
    (100.0 * (-rms_error * 1000.0).exp()).clamp(0.0, 100.0)
}

pub fn transit_duration_days(params: &TransitParameters) -> f64 {
    0.1 * params.speed_factor * (params.orbital_period / DURATION_REFERENCE_PERIOD).sqrt()
}

/// Orbital distance in AU for a period, assuming a solar-mass star.
pub fn orbital_distance_au(orbital_period: f64) -> f64 {
    let years = Days::new(orbital_period).to::<JulianYear>().value();
    years.powf(2.0 / 3.0)
}

/// `[#####---------------]`-style bar for a score out of 100.
pub fn progress_bar(score: f64) -> String {
    let filled = ((PROGRESS_BAR_WIDTH as f64 * score / 100.0) as usize).min(PROGRESS_BAR_WIDTH);
    format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Hints shown when the score is below 50.
pub fn fit_hints(score: f64, rms_error: f64, planet_size: f64) -> Vec<String> {
    let mut hints = Vec::new();
    if score >= 50.0 {
        return hints;
    }
    if rms_error > 0.001 {
        hints.push("Try adjusting the PERIOD slider".to_string());
        hints.push("Look for repeating pattern every ~290 days".to_string());
    }
    if planet_size < 0.04 {
        hints.push("The transit dip should be DEEPER".to_string());
        hints.push("Increase planet size".to_string());
    }
    hints.push("Try: Period = 290, Size > 0.05, Speed = 0.5 - 1.5".to_string());
    hints
}

/// Evaluate a model against observed data.
pub fn evaluate_fit(curve: &LightCurve, params: TransitParameters) -> ToolkitResult<FitEvaluation> {
    if curve.is_empty() {
        return Err(ToolkitError::EmptyData);
    }

    let model_flux = transit_model(curve.time(), &params)?;
    let residuals: Vec<f64> = curve
        .flux()
        .iter()
        .zip(&model_flux)
        .map(|(observed, model)| observed - model)
        .collect();

    let rms_error = rms(&residuals);
    let score = fit_score(rms_error);

    Ok(FitEvaluation {
        params,
        model_flux,
        residuals,
        rms_error,
        score,
        depth_percent: params.depth() * 100.0,
        duration_days: transit_duration_days(&params),
        orbital_distance_au: orbital_distance_au(params.orbital_period),
        size_class: SizeClass::from_radius_ratio(params.planet_size),
        temperature_class: TemperatureClass::from_period(params.orbital_period),
        feedback: FitFeedback::from_score(score),
    })
}
