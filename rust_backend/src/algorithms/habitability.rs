//! Habitability scoring from surface temperature, and the orbital-period
//! zones that place TRAPPIST-1 planets inside or outside the habitable zone.

use serde::{Deserialize, Serialize};

use crate::core::{habitable_planets, CatalogPlanet};

/// Temperature treated as ideal for life (Earth's mean surface temperature).
pub const IDEAL_TEMP_C: f64 = 15.0;

/// Range in which surface liquid water is possible.
pub const LIQUID_WATER_RANGE_C: (f64, f64) = (-20.0, 50.0);

/// Habitable zone expressed as orbital period, in days.
pub const HABITABLE_PERIOD_RANGE: (f64, f64) = (4.0, 10.0);

/// Habitability score in `[0.3, 1.0]` from surface temperature.
///
/// Inside the liquid-water range the score falls off linearly from 1.0 at
/// 15 °C. Between -50 °C and -20 °C a greenhouse atmosphere or a subsurface
/// ocean could still help. Everything else gets the floor of 0.3.
///
/// # Examples
///
/// ```
/// use exoplanet_toolkit::algorithms::habitability::habitability_score;
///
/// assert_eq!(habitability_score(15.0), 1.0);
/// assert_eq!(habitability_score(-54.0), 0.3);
/// ```
pub fn habitability_score(temp_c: f64) -> f64 {
    let (water_min, water_max) = LIQUID_WATER_RANGE_C;
    let score = if (water_min..=water_max).contains(&temp_c) {
        1.0 - (temp_c - IDEAL_TEMP_C).abs() / 65.0
    } else if (-50.0..water_min).contains(&temp_c) {
        0.6 - (temp_c.abs() - 20.0) / 150.0
    } else {
        0.3
    };
    score.clamp(0.3, 1.0)
}

/// Label for a habitability score.
pub fn score_label(score: f64) -> &'static str {
    if score > 0.8 {
        "Excellent"
    } else if score > 0.6 {
        "Good"
    } else {
        "Possible"
    }
}

/// Where an orbital period sits relative to TRAPPIST-1's habitable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodZone {
    TooHot,
    Habitable,
    TooCold,
    /// Between the hot and habitable bands (3-4 days)
    Boundary,
}

pub fn period_zone(period_days: f64) -> PeriodZone {
    let (hz_min, hz_max) = HABITABLE_PERIOD_RANGE;
    if period_days < 3.0 {
        PeriodZone::TooHot
    } else if period_days > hz_max {
        PeriodZone::TooCold
    } else if period_days >= hz_min {
        PeriodZone::Habitable
    } else {
        PeriodZone::Boundary
    }
}

/// Assessment of one habitable-zone planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitabilityAssessment {
    pub designation: String,
    pub letter: char,
    pub period_days: f64,
    pub temp_c: f64,
    pub icon: String,
    pub score: f64,
    pub label: String,
    pub notes: Vec<String>,
}

impl HabitabilityAssessment {
    pub fn for_planet(planet: &CatalogPlanet) -> Self {
        let score = habitability_score(planet.temp_c);
        Self {
            designation: planet.designation(),
            letter: planet.letter,
            period_days: planet.period_days(),
            temp_c: planet.temp_c,
            icon: planet.icon().to_string(),
            score,
            label: score_label(score).to_string(),
            notes: planet_notes(planet.letter)
                .iter()
                .map(|n| n.to_string())
                .collect(),
        }
    }

    /// Console block for this planet.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{} TRAPPIST-1{}:",
                self.icon,
                self.letter.to_ascii_uppercase()
            ),
            format!("  Period: {:.2} days", self.period_days),
            format!("  Temperature: {}°C", self.temp_c),
            format!("  Score: {:.2}/1.0", self.score),
        ];
        lines.extend(self.notes.iter().map(|n| format!("  • {}", n)));
        lines
    }
}

fn planet_notes(letter: char) -> &'static [&'static str] {
    match letter {
        'd' => &[
            "Earth-like! Similar to our planet's temperature",
            "Surface liquid water VERY likely",
        ],
        'e' => &[
            "JWST's primary target for atmosphere study",
            "With CO₂ atmosphere: could be 0-30°C",
        ],
        'f' => &[
            "Possible subsurface ocean (like Europa)",
            "Ice shell could protect life from radiation",
        ],
        _ => &[],
    }
}

/// Assess every habitable-zone planet in catalogue order.
pub fn assess_habitable_zone() -> Vec<HabitabilityAssessment> {
    habitable_planets()
        .map(HabitabilityAssessment::for_planet)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_in_liquid_water_range() {
        assert_eq!(habitability_score(15.0), 1.0);
        assert!((habitability_score(50.0) - (1.0 - 35.0 / 65.0)).abs() < 1e-12);
        assert!((habitability_score(-20.0) - (1.0 - 35.0 / 65.0)).abs() < 1e-12);
    }

    #[test]
    fn test_score_greenhouse_band() {
        let expected = 0.6 - 2.0 / 150.0;
        assert!((habitability_score(-22.0) - expected).abs() < 1e-12);
        assert!((habitability_score(-50.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_score_floor() {
        assert_eq!(habitability_score(-54.0), 0.3);
        assert_eq!(habitability_score(127.0), 0.3);
        assert_eq!(habitability_score(-123.0), 0.3);
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(1.0), "Excellent");
        assert_eq!(score_label(0.8), "Good");
        assert_eq!(score_label(0.5867), "Possible");
    }

    #[test]
    fn test_period_zones() {
        assert_eq!(period_zone(1.51), PeriodZone::TooHot);
        assert_eq!(period_zone(3.5), PeriodZone::Boundary);
        assert_eq!(period_zone(4.05), PeriodZone::Habitable);
        assert_eq!(period_zone(10.0), PeriodZone::Habitable);
        assert_eq!(period_zone(12.35), PeriodZone::TooCold);
    }

    #[test]
    fn test_assess_habitable_zone() {
        let assessments = assess_habitable_zone();
        assert_eq!(assessments.len(), 3);
        assert_eq!(assessments[0].designation, "TRAPPIST-1d");
        assert_eq!(assessments[0].label, "Excellent");
        assert_eq!(assessments[1].notes.len(), 2);
        assert_eq!(assessments[2].score, 0.3);

        let lines = assessments[0].lines();
        assert_eq!(lines[0], "🌍 TRAPPIST-1D:");
        assert_eq!(lines[3], "  Score: 1.00/1.0");
    }
}
