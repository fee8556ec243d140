//! Team report for the habitable-zone mission.
//!
//! Plain text, written next to the notebook as `trappist_report_{team}.txt`.
//! Scores come from the same function the dashboard uses.

use chrono::{Local, NaiveDate};
use std::fmt::Write;

use crate::algorithms::habitability::habitability_score;
use crate::core::lightcurve::format_thousands;
use crate::core::{habitable_planets, CatalogPlanet, LightCurve, PlanetClass, TRAPPIST1_PLANETS};

const RULE_WIDTH: usize = 70;

/// Inputs to a habitability report.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub team_name: &'a str,
    pub data_file: &'a str,
    pub curve: &'a LightCurve,
    pub date: NaiveDate,
}

impl<'a> ReportContext<'a> {
    /// Context dated today (local time).
    pub fn today(team_name: &'a str, data_file: &'a str, curve: &'a LightCurve) -> Self {
        Self {
            team_name,
            data_file,
            curve,
            date: Local::now().date_naive(),
        }
    }

    fn time_range(&self) -> String {
        match (self.curve.len(), self.curve.start_time(), self.curve.end_time()) {
            (n, Some(start), Some(end)) if n > 1 => format!("{:.1} to {:.1}", start, end),
            _ => "N/A".to_string(),
        }
    }
}

fn section(out: &mut String, heading: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}\n{}\n{}\n", rule, heading, rule);
}

/// Report prose for one habitable-zone planet; numbers come from the catalogue.
struct PlanetNotes {
    temp_note: &'static str,
    assessment: &'static str,
    key_factor: &'static str,
}

fn notes_for(planet: &CatalogPlanet) -> PlanetNotes {
    match planet.letter {
        'd' => PlanetNotes {
            temp_note: " (Earth-like!)",
            assessment: "EXCELLENT - Similar temperature to Earth",
            key_factor: "Surface liquid water VERY likely",
        },
        'e' => PlanetNotes {
            temp_note: "",
            assessment: "GOOD - Could be warmed by atmosphere",
            key_factor: "JWST primary target for atmospheric study",
        },
        'f' => PlanetNotes {
            temp_note: "",
            assessment: "POSSIBLE - Subsurface ocean potential",
            key_factor: "Ice shell could protect from radiation",
        },
        _ => PlanetNotes {
            temp_note: "",
            assessment: "UNCERTAIN - Needs further study",
            key_factor: "Inside the habitable zone",
        },
    }
}

fn planet_block(out: &mut String, index: usize, planet: &CatalogPlanet) {
    let notes = notes_for(planet);
    let _ = writeln!(out, "{}. {} {}", index, planet.designation(), planet.icon());
    let _ = writeln!(out, "   • Orbital Period: {:.2} days", planet.period_days());
    let _ = writeln!(out, "   • Temperature: {}°C{}", planet.temp_c, notes.temp_note);
    let _ = writeln!(
        out,
        "   • Habitability Score: {:.2}/1.0",
        habitability_score(planet.temp_c)
    );
    let _ = writeln!(out, "   • Assessment: {}", notes.assessment);
    let _ = writeln!(out, "   • Key Factor: {}\n", notes.key_factor);
}

/// `"  • 1.51, 2.42 days: Too hot (inner planets b, c)"` style exclusion line.
fn excluded_line(class: PlanetClass, verdict: &str, side: &str) -> String {
    let planets: Vec<&CatalogPlanet> = TRAPPIST1_PLANETS.iter().filter(|p| p.class == class).collect();
    let periods: Vec<String> = planets.iter().map(|p| format!("{:.2}", p.period_days())).collect();
    let letters: Vec<String> = planets.iter().map(|p| p.letter.to_string()).collect();
    format!(
        "  • {} days: {} ({} planets {})",
        periods.join(", "),
        verdict,
        side,
        letters.join(", ")
    )
}

/// Render the full report.
pub fn render_report(ctx: &ReportContext<'_>) -> String {
    let mut out = String::from("\n");

    section(&mut out, "TRAPPIST-1 HABITABILITY ANALYSIS REPORT");
    let _ = writeln!(out, "TEAM: {}", ctx.team_name);
    let _ = writeln!(out, "DATE: {}", ctx.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "MISSION: Habitable Zone Analysis\n");

    section(&mut out, "EXECUTIVE SUMMARY");
    out.push_str(
        "Based on analysis of TRAPPIST-1 system light curve data, our team\n\
         has identified and assessed the three planets within the star's\n\
         habitable zone. TRAPPIST-1d shows the highest potential for\n\
         Earth-like conditions and possible surface liquid water.\n\n",
    );

    section(&mut out, "DATA ANALYSIS");
    let _ = writeln!(out, "Data File: {}", ctx.data_file);
    let _ = writeln!(out, "Data Points: {}", format_thousands(ctx.curve.len()));
    let _ = writeln!(out, "Time Range: {} days", ctx.time_range());
    out.push_str(
        "Analysis Method: Transit photometry + period folding\n\n\
         Identified Habitable Zone Periods:\n",
    );
    for (i, planet) in habitable_planets().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:.2} days ({})",
            i + 1,
            planet.period_days(),
            planet.designation()
        );
    }
    out.push_str("\nExcluded Periods (non-habitable):\n");
    let _ = writeln!(out, "{}", excluded_line(PlanetClass::Hot, "Too hot", "inner"));
    let _ = writeln!(out, "{}\n", excluded_line(PlanetClass::Cold, "Too cold", "outer"));

    section(&mut out, "HABITABILITY ASSESSMENT");
    for (i, planet) in habitable_planets().enumerate() {
        planet_block(&mut out, i + 1, planet);
    }

    section(&mut out, "RECOMMENDATIONS");
    out.push_str(
        "PRIORITY 1: Atmospheric Study (TRAPPIST-1e)\n  \
         • Use JWST transmission spectroscopy\n  \
         • Search for CO₂, H₂O, CH₄, O₂ signatures\n  \
         • Assess greenhouse warming potential\n\n\
         PRIORITY 2: Surface Characterization (TRAPPIST-1d)\n  \
         • Future direct imaging missions\n  \
         • Search for ocean glint, vegetation red edge\n  \
         • Climate modeling for water cycle\n\n\
         PRIORITY 3: Subsurface Exploration (TRAPPIST-1f)\n  \
         • Ice-penetrating radar studies\n  \
         • Search for Europa-like subsurface oceans\n  \
         • Assess radiation protection capabilities\n\n",
    );

    section(&mut out, "SCIENTIFIC IMPACT");
    out.push_str(
        "This analysis contributes to:\n  \
         1. Target selection for JWST observations\n  \
         2. Understanding red dwarf habitable zones\n  \
         3. Multi-planet system dynamics\n  \
         4. Biosignature detection strategies\n\n\
         The TRAPPIST-1 system represents our best opportunity to\n\
         discover life beyond Earth within the next decade.\n\n",
    );

    section(&mut out, "TEAM CONCLUSION");
    out.push_str(
        "We recommend focusing observational resources on TRAPPIST-1e,\n\
         as its position in the habitable zone combined with potential\n\
         atmospheric warming makes it the most promising candidate for\n\
         detecting biosignatures with current technology.\n\n\
         All three habitable zone planets warrant further study and\n\
         represent humanity's best chance to answer the fundamental\n\
         question: \"Are we alone in the universe?\"\n\n",
    );

    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}\nAPPROVED BY: {}\n{}", rule, ctx.team_name, rule);
    out
}

/// First `n` lines of a rendered report.
pub fn preview(report: &str, n: usize) -> Vec<String> {
    report.split('\n').take(n).map(str::to_string).collect()
}
