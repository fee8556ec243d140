//! Planet catalogues used by the TRAPPIST-1 missions.

use std::fmt;

use qtty::time::Days;
use serde::{Deserialize, Serialize};

/// Thermal classification of a planet relative to its star's habitable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetClass {
    Hot,
    Habitable,
    Cold,
}

impl PlanetClass {
    /// Plot colour for this class.
    pub fn color(&self) -> &'static str {
        match self {
            PlanetClass::Hot => "red",
            PlanetClass::Habitable => "green",
            PlanetClass::Cold => "blue",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetClass::Hot => "hot",
            PlanetClass::Habitable => "habitable",
            PlanetClass::Cold => "cold",
        }
    }
}

impl fmt::Display for PlanetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known TRAPPIST-1 planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogPlanet {
    pub letter: char,
    pub period: Days,
    pub class: PlanetClass,
    pub temp_c: f64,
    pub icon: Option<&'static str>,
}

impl CatalogPlanet {
    const fn new(
        letter: char,
        period_days: f64,
        class: PlanetClass,
        temp_c: f64,
        icon: Option<&'static str>,
    ) -> Self {
        Self {
            letter,
            period: Days::new(period_days),
            class,
            temp_c,
            icon,
        }
    }

    /// Orbital period in days.
    pub fn period_days(&self) -> f64 {
        self.period.value()
    }

    /// Full designation, e.g. `TRAPPIST-1d`.
    pub fn designation(&self) -> String {
        format!("TRAPPIST-1{}", self.letter)
    }

    /// Short plot label, e.g. `1d`.
    pub fn short_label(&self) -> String {
        format!("1{}", self.letter)
    }

    pub fn icon(&self) -> &'static str {
        self.icon.unwrap_or("")
    }

    pub fn is_habitable(&self) -> bool {
        self.class == PlanetClass::Habitable
    }
}

/// TRAPPIST-1 planets b..h, ordered by orbital period (NASA values).
pub const TRAPPIST1_PLANETS: [CatalogPlanet; 7] = [
    CatalogPlanet::new('b', 1.51, PlanetClass::Hot, 127.0, None),
    CatalogPlanet::new('c', 2.42, PlanetClass::Hot, 73.0, None),
    CatalogPlanet::new('d', 4.05, PlanetClass::Habitable, 15.0, Some("🌍")),
    CatalogPlanet::new('e', 6.10, PlanetClass::Habitable, -22.0, Some("❄️")),
    CatalogPlanet::new('f', 9.21, PlanetClass::Habitable, -54.0, Some("🧊")),
    CatalogPlanet::new('g', 12.35, PlanetClass::Cold, -98.0, None),
    CatalogPlanet::new('h', 18.77, PlanetClass::Cold, -123.0, None),
];

/// Planets inside the habitable zone (d, e, f).
pub fn habitable_planets() -> impl Iterator<Item = &'static CatalogPlanet> {
    TRAPPIST1_PLANETS.iter().filter(|p| p.is_habitable())
}

pub fn planet_by_letter(letter: char) -> Option<&'static CatalogPlanet> {
    let letter = letter.to_ascii_lowercase();
    TRAPPIST1_PLANETS.iter().find(|p| p.letter == letter)
}

/// First catalogue planet whose period is strictly within `tolerance` days.
pub fn find_planet_near(period: f64, tolerance: f64) -> Option<&'static CatalogPlanet> {
    TRAPPIST1_PLANETS
        .iter()
        .find(|p| (p.period_days() - period).abs() < tolerance)
}

/// Inner Solar System planet used for the scale comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSystemBody {
    pub name: &'static str,
    /// Mean orbital distance in millions of km.
    pub orbit_mkm: f64,
    pub temp_c: f64,
    pub class: PlanetClass,
}

pub const SOLAR_SYSTEM: [SolarSystemBody; 4] = [
    SolarSystemBody { name: "Mercury", orbit_mkm: 57.9, temp_c: 167.0, class: PlanetClass::Hot },
    SolarSystemBody { name: "Venus", orbit_mkm: 108.2, temp_c: 464.0, class: PlanetClass::Hot },
    SolarSystemBody { name: "Earth", orbit_mkm: 149.6, temp_c: 15.0, class: PlanetClass::Habitable },
    SolarSystemBody { name: "Mars", orbit_mkm: 227.9, temp_c: -63.0, class: PlanetClass::Cold },
];
