//! Core domain types for the toolkit.
//!
//! - [`lightcurve`]: time/flux series loaded from telescope data
//! - [`planet`]: planet classes and the TRAPPIST-1 / Solar System catalogues

pub mod lightcurve;
pub mod planet;

pub use lightcurve::LightCurve;
pub use planet::{
    find_planet_near, habitable_planets, planet_by_letter, CatalogPlanet, PlanetClass, SolarSystemBody,
    SOLAR_SYSTEM, TRAPPIST1_PLANETS,
};
