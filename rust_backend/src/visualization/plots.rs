//! Figure builders for every plot the missions show.

use std::f64::consts::TAU;

use super::figure::{Annotation, Figure, LegendEntry, Panel, ReferenceLine, Series, Span, TextBox};
use crate::algorithms::fit::FitEvaluation;
use crate::algorithms::habitability::{HabitabilityAssessment, HABITABLE_PERIOD_RANGE, LIQUID_WATER_RANGE_C};
use crate::algorithms::period_search::{DetectiveVerdict, CATALOG_TRANSIT_WINDOW};
use crate::algorithms::transit::TRANSIT_CENTER_PHASE;
use crate::core::lightcurve::format_thousands;
use crate::core::{CatalogPlanet, LightCurve, SOLAR_SYSTEM, TRAPPIST1_PLANETS};
use crate::simulation::NoiseSource;

/// Flux range shown on TRAPPIST-1 plots.
pub const TRAPPIST_FLUX_LIMITS: (f64, f64) = (0.995, 1.003);

/// Flux range of the Kepler data-vs-model panel.
pub const KEPLER_FLUX_LIMITS: (f64, f64) = (0.994, 1.004);

/// Background stars per polar panel.
pub const STARS_PER_PANEL: usize = 150;

const TIME_LABEL: &str = "Time (days)";
const BRIGHTNESS_LABEL: &str = "Normalized Brightness";

/// Kepler lab: raw light curve.
pub fn light_curve(curve: &LightCurve, title: &str) -> Figure {
    let panel = Panel::new(title)
        .x_label(TIME_LABEL)
        .y_label("Normalized Flux")
        .with_series(
            Series::scatter(curve.time().to_vec(), curve.flux().to_vec())
                .label("Observations")
                .color("navy")
                .size(1.0)
                .alpha(0.7),
        )
        .with_annotation(
            Annotation::at(0.02, 0.95, "Transit dips →")
                .axes_fraction()
                .color("darkred")
                .font_size(11.0)
                .bold(),
        )
        .legend_at("upper right");

    Figure::single(panel, (12.0, 5.0))
}

/// "PLANET PROPERTIES" text panel of the fit dashboard.
pub fn planet_properties_text(eval: &FitEvaluation) -> String {
    let p = &eval.params;
    [
        "PLANET PROPERTIES".to_string(),
        String::new(),
        "SIZE:".to_string(),
        format!("  • Rp/Rs: {:.3}", p.planet_size),
        format!("  • Type: {}", eval.size_class.label()),
        format!("  • {}", eval.size_class.planet_type()),
        String::new(),
        "ORBIT:".to_string(),
        format!("  • Period: {:.1} days", p.orbital_period),
        format!("  • Distance: ~{:.2} AU", eval.orbital_distance_au),
        format!("  • Temperature class: {}", eval.temperature_class.label()),
        String::new(),
        "TEMPERATURE:".to_string(),
        format!("  • Estimated: {}", eval.temperature_class.estimated_range()),
        format!("  • Habitable: {}", eval.temperature_class.habitability()),
    ]
    .join("\n")
}

/// "TRANSIT ANALYSIS" text panel of the fit dashboard.
pub fn transit_analysis_text(eval: &FitEvaluation) -> String {
    [
        "TRANSIT ANALYSIS".to_string(),
        String::new(),
        "DIP CHARACTERISTICS:".to_string(),
        format!("  • Depth: {:.3}%", eval.depth_percent),
        format!("  • Duration: {:.3} days", eval.duration_days),
        format!("  • Frequency: Every {:.1} days", eval.params.orbital_period),
        String::new(),
        "FIT QUALITY:".to_string(),
        format!("  • Score: {:.0}/100", eval.score),
        String::new(),
        "FEEDBACK:".to_string(),
        format!("  {}", eval.feedback.message()),
        String::new(),
        "SCIENCE CONTEXT:".to_string(),
        format!("  {}", eval.feedback.science_context()),
        String::new(),
        "NEXT STEPS:".to_string(),
        "  • Maximize your score (>50 is great!)".to_string(),
        "  • Match the transit shape".to_string(),
        "  • Note the best parameters".to_string(),
    ]
    .join("\n")
}

/// Kepler lab: data vs model, residuals and the two analysis panels.
pub fn fit_dashboard(curve: &LightCurve, eval: &FitEvaluation) -> Figure {
    let time = curve.time().to_vec();
    let (flux_min, flux_max) = KEPLER_FLUX_LIMITS;

    let fit = Panel::new("DATA vs MODEL FIT")
        .y_label("Normalized Flux")
        .y_limits(flux_min, flux_max)
        .with_series(
            Series::scatter(time.clone(), curve.flux().to_vec())
                .label("Telescope Data")
                .color("navy")
                .size(1.0)
                .alpha(0.4),
        )
        .with_series(
            Series::line(time.clone(), eval.model_flux.clone())
                .label(format!("Your Model (Score: {:.0}/100)", eval.score))
                .color("red")
                .size(2.5)
                .alpha(0.8),
        )
        .legend_at("upper right");

    let residuals = Panel::new("RESIDUALS (Data - Model)")
        .x_label(TIME_LABEL)
        .y_label("Residuals")
        .with_series(
            Series::scatter(time, eval.residuals.clone())
                .color("green")
                .size(1.0)
                .alpha(0.6),
        )
        .with_line(ReferenceLine::horizontal(0.0, "black").alpha(0.7).width(1.5));

    Figure::new("REAL-TIME EXOPLANET ANALYSIS")
        .grid(2, 2)
        .size(16.0, 10.0)
        .with_panel(fit)
        .with_panel(residuals)
        .with_panel(Panel::text_only(
            TextBox::new(planet_properties_text(eval), "lightblue", 0.3)
                .position(0.05, 0.95)
                .font_size(11.0)
                .monospace(),
        ))
        .with_panel(Panel::text_only(
            TextBox::new(transit_analysis_text(eval), "lightgreen", 0.3)
                .position(0.05, 0.95)
                .font_size(11.0)
                .monospace(),
        ))
}

/// Detective step 1: the raw 20-day light curve.
pub fn raw_data(curve: &LightCurve) -> Figure {
    let (lo, hi) = TRAPPIST_FLUX_LIMITS;
    let panel = Panel::new("TRAPPIST-1: Raw Telescope Data (20 days)")
        .x_label(TIME_LABEL)
        .y_label(BRIGHTNESS_LABEL)
        .y_limits(lo, hi)
        .with_series(
            Series::dots(curve.time().to_vec(), curve.flux().to_vec())
                .color("black")
                .size(2.0)
                .alpha(0.5),
        );
    Figure::single(panel, (14.0, 5.0))
}

fn folded_panel(title: String, x_label: &str, phase: &[f64], flux: &[f64], size: f64, alpha: f64) -> Panel {
    let (lo, hi) = TRAPPIST_FLUX_LIMITS;
    Panel::new(title)
        .x_label(x_label)
        .y_label(BRIGHTNESS_LABEL)
        .y_limits(lo, hi)
        .with_series(
            Series::scatter(phase.to_vec(), flux.to_vec())
                .color("blue")
                .size(size)
                .alpha(alpha),
        )
}

fn expected_transit_line() -> ReferenceLine {
    ReferenceLine::vertical(TRANSIT_CENTER_PHASE, "gray")
        .dashed()
        .alpha(0.5)
        .label("Expected transit location")
}

/// Detective mission fold, highlighting a detected inner planet.
pub fn detective_fold(period: f64, phase: &[f64], flux: &[f64], verdict: DetectiveVerdict) -> Figure {
    let panel = folded_panel(
        format!("Data Folded at {:.2} days", period),
        "Phase (0 to 1 = one complete orbit)",
        phase,
        flux,
        2.0,
        0.3,
    );
    let panel = match verdict {
        DetectiveVerdict::Found(target) => {
            let window = target.window();
            panel.with_span(
                Span::vertical(window.start, window.end, target.color(), 0.2)
                    .label(format!("{} transit!", target.name())),
            )
        }
        DetectiveVerdict::Close(_) | DetectiveVerdict::Nothing => {
            panel.with_line(expected_transit_line())
        }
    };
    Figure::single(panel.with_legend(), (12.0, 5.0))
}

/// Habitable-zone mission fold, highlighting any catalogue planet at this period.
pub fn catalog_fold(
    period: f64,
    phase: &[f64],
    flux: &[f64],
    matched: Option<&CatalogPlanet>,
) -> Figure {
    let panel = folded_panel(
        format!("Data Folded at {:.2} days", period),
        "Phase (0 to 1 = one orbit)",
        phase,
        flux,
        1.0,
        0.1,
    );
    let panel = match matched {
        Some(planet) => panel.with_span(
            Span::vertical(CATALOG_TRANSIT_WINDOW.start, CATALOG_TRANSIT_WINDOW.end, "red", 0.3)
                .label(format!("{} transit region", planet.designation())),
        ),
        None => panel.with_line(expected_transit_line()),
    };
    Figure::single(panel.with_legend(), (12.0, 5.0))
}

/// Detective step 3: planet b's in-transit points over the full curve.
pub fn transit_highlight(curve: &LightCurve, in_transit: &[bool]) -> Figure {
    let (lo, hi) = TRAPPIST_FLUX_LIMITS;
    let transits = curve.select(in_transit);
    let panel = Panel::new("Identifying Planet b's Transits")
        .x_label(TIME_LABEL)
        .y_label("Brightness")
        .y_limits(lo, hi)
        .with_series(
            Series::scatter(curve.time().to_vec(), curve.flux().to_vec())
                .color("gray")
                .size(2.0)
                .alpha(0.1),
        )
        .with_series(
            Series::scatter(transits.time().to_vec(), transits.flux().to_vec())
                .label("Planet b transits")
                .color("red")
                .size(10.0)
                .alpha(0.7),
        )
        .with_legend();
    Figure::single(panel, (12.0, 5.0))
}

/// Info box text for the full light curve.
pub fn data_info_text(curve: &LightCurve) -> String {
    format!(
        "Data points: {}\nTime span: {:.0} days",
        format_thousands(curve.len()),
        curve.end_time().unwrap_or(0.0)
    )
}

/// Habitable-zone mission: the whole system light curve with an info box.
pub fn full_light_curve(curve: &LightCurve) -> Figure {
    let panel = Panel::new("FULL TRAPPIST-1 System Light Curve")
        .x_label(TIME_LABEL)
        .y_label(BRIGHTNESS_LABEL)
        .with_series(
            Series::dots(curve.time().to_vec(), curve.flux().to_vec())
                .color("black")
                .size(1.0)
                .alpha(0.3),
        )
        .with_text_box(TextBox::new(data_info_text(curve), "wheat", 0.8));
    Figure::single(panel, (14.0, 5.0))
}

fn class_colors<'a>(planets: impl IntoIterator<Item = &'a CatalogPlanet>) -> Vec<&'static str> {
    planets.into_iter().map(|p| p.class.color()).collect()
}

fn habitable_zone_span() -> Span {
    let (hz_min, hz_max) = HABITABLE_PERIOD_RANGE;
    Span::vertical(hz_min, hz_max, "lightgreen", 0.2).label("Habitable Zone")
}

fn liquid_water_span() -> Span {
    let (water_min, water_max) = LIQUID_WATER_RANGE_C;
    Span::horizontal(water_min, water_max, "lightgreen", 0.2).label("Liquid water possible")
}

/// Every planet on a period axis, coloured by class.
pub fn period_distribution() -> Figure {
    let periods: Vec<f64> = TRAPPIST1_PLANETS.iter().map(|p| p.period_days()).collect();
    let mut panel = Panel::new("TRAPPIST-1 Planet Distribution")
        .x_label("Orbital Period (days)")
        .x_limits(0.0, 20.0)
        .hide_y_ticks()
        .with_series(
            Series::scatter(periods.clone(), vec![1.0; periods.len()])
                .colors(class_colors(&TRAPPIST1_PLANETS))
                .size(200.0)
                .alpha(0.7),
        )
        .with_span(habitable_zone_span())
        .legend_entries(vec![
            LegendEntry::new("Hot (b, c)", "red", 0.7),
            LegendEntry::new("Habitable (d, e, f)", "green", 0.7),
            LegendEntry::new("Cold (g, h)", "blue", 0.7),
            LegendEntry::new("Habitable Zone", "lightgreen", 0.2),
        ]);
    panel.legend_location = Some("upper right".to_string());

    for planet in &TRAPPIST1_PLANETS {
        panel = panel.with_annotation(Annotation::at(
            planet.period_days(),
            1.05,
            planet.short_label(),
        ));
    }

    Figure::single(panel, (10.0, 5.0))
}

/// Three-panel dashboard: periods, temperatures and habitability scores.
pub fn habitability_dashboard(assessments: &[HabitabilityAssessment]) -> Figure {
    let names: Vec<String> = assessments.iter().map(|a| a.letter.to_string()).collect();
    let periods: Vec<f64> = assessments.iter().map(|a| a.period_days).collect();
    let temps: Vec<f64> = assessments.iter().map(|a| a.temp_c).collect();
    let scores: Vec<f64> = assessments.iter().map(|a| a.score).collect();

    let mut distance = Panel::new("Distance from Star")
        .y_label("Orbital Period (days)")
        .with_series(
            Series::bar(names.clone(), periods.clone())
                .colors(["lightgreen", "lightblue", "blue"])
                .alpha(0.8)
                .edge_color("black"),
        );
    for (i, a) in assessments.iter().enumerate() {
        distance = distance.with_annotation(
            Annotation::at(i as f64, a.period_days + 0.3, format!("{}\n{} days", a.icon, a.period_days))
                .font_size(10.0),
        );
    }

    let mut surface = Panel::new("Surface Conditions")
        .y_label("Temperature (°C)")
        .with_series(
            Series::bar(names.clone(), temps)
                .colors(["green", "lightblue", "blue"])
                .alpha(0.8)
                .edge_color("black"),
        )
        .with_line(ReferenceLine::horizontal(0.0, "black").alpha(0.3))
        .with_span(liquid_water_span())
        .legend_at("lower right");
    for (i, a) in assessments.iter().enumerate() {
        let offset = if a.temp_c > 0.0 { 3.0 } else { -8.0 };
        surface = surface.with_annotation(
            Annotation::at(i as f64, a.temp_c + offset, format!("{}°C", a.temp_c))
                .font_size(10.0)
                .bold(),
        );
    }

    let mut potential = Panel::new("Life Potential")
        .y_label("Habitability Score")
        .y_limits(0.0, 1.1)
        .with_series(
            Series::bar(names, scores)
                .colors(["darkgreen", "green", "lightgreen"])
                .alpha(0.8)
                .edge_color("black"),
        );
    for (y, color, label) in [
        (0.8, "darkgreen", "Excellent"),
        (0.6, "green", "Good"),
        (0.4, "yellow", "Possible"),
        (0.2, "orange", "Marginal"),
    ] {
        potential = potential.with_line(
            ReferenceLine::horizontal(y, color)
                .dashed()
                .alpha(0.5)
                .width(0.8)
                .label(label),
        );
    }
    for (i, a) in assessments.iter().enumerate() {
        potential = potential.with_annotation(Annotation::at(
            i as f64,
            a.score + 0.02,
            format!("{:.2}\n{}", a.score, a.label),
        ));
    }

    Figure::new("TRAPPIST-1 Habitable Zone Analysis")
        .grid(1, 3)
        .size(15.0, 4.0)
        .with_panel(distance)
        .with_panel(surface)
        .with_panel(potential)
}

/// Period and temperature bars for all seven planets.
pub fn full_system() -> Figure {
    let names: Vec<String> = TRAPPIST1_PLANETS.iter().map(|p| p.letter.to_string()).collect();
    let colors = class_colors(&TRAPPIST1_PLANETS);
    let (hz_min, hz_max) = HABITABLE_PERIOD_RANGE;

    let mut orbits = Panel::new("All TRAPPIST-1 Planets")
        .y_label("Orbital Period (days)")
        .with_series(
            Series::bar(
                names.clone(),
                TRAPPIST1_PLANETS.iter().map(|p| p.period_days()).collect(),
            )
            .colors(colors.clone())
            .alpha(0.7),
        )
        .with_span(Span::horizontal(hz_min, hz_max, "lightgreen", 0.2).label("Habitable Zone"))
        .with_legend();

    let mut temperatures = Panel::new("Surface Temperatures")
        .y_label("Temperature (°C)")
        .with_series(
            Series::bar(names, TRAPPIST1_PLANETS.iter().map(|p| p.temp_c).collect())
                .colors(colors)
                .alpha(0.7),
        )
        .with_line(ReferenceLine::horizontal(0.0, "black").alpha(0.3))
        .with_span(liquid_water_span())
        .with_legend();

    for (i, planet) in TRAPPIST1_PLANETS.iter().enumerate() {
        orbits = orbits.with_annotation(Annotation::at(
            i as f64,
            planet.period_days() + 0.5,
            planet.short_label(),
        ));
        let offset = if planet.temp_c > 0.0 { 5.0 } else { -10.0 };
        temperatures = temperatures.with_annotation(Annotation::at(
            i as f64,
            planet.temp_c + offset,
            format!("{}°C", planet.temp_c),
        ));
    }

    Figure::new("The TRAPPIST-1 System: 7 Earth-sized Worlds")
        .grid(1, 2)
        .size(15.0, 5.0)
        .with_panel(orbits)
        .with_panel(temperatures)
}

fn star_field_series(noise: &mut NoiseSource) -> Series {
    let stars = noise.star_field(STARS_PER_PANEL, 300.0);
    Series::scatter(
        stars.iter().map(|s| s.theta).collect(),
        stars.iter().map(|s| s.radius).collect(),
    )
    .color("white")
    .sizes(stars.iter().map(|s| s.size).collect())
    .alphas(stars.iter().map(|s| s.alpha).collect())
}

/// `n` evenly spaced angles in `[0, 2π)`.
fn orbit_angles(n: usize) -> Vec<f64> {
    (0..n).map(|i| TAU * i as f64 / n as f64).collect()
}

fn polar_system_panel(
    title: &str,
    noise: &mut NoiseSource,
    host: Series,
    names: Vec<String>,
    radii: Vec<f64>,
    planet_color: &str,
    label_offset: f64,
) -> Panel {
    let angles = orbit_angles(radii.len());
    let mut panel = Panel::polar(title)
        .dark()
        .with_series(star_field_series(noise))
        .with_series(host)
        .with_series(
            Series::scatter(angles.clone(), radii.clone())
                .color(planet_color)
                .size(200.0)
                .alpha(0.9),
        );
    for ((angle, r), name) in angles.into_iter().zip(radii).zip(names) {
        panel = panel.with_annotation(Annotation::at(angle, r + label_offset, name).color("white"));
    }
    panel
}

/// Polar orbit plots of TRAPPIST-1 (period scale) next to the inner Solar
/// System (real distances), on a starry background.
pub fn solar_system_comparison(noise: &mut NoiseSource) -> Figure {
    let trappist = polar_system_panel(
        "TRAPPIST-1 System",
        noise,
        Series::scatter(vec![0.0], vec![0.0])
            .color("red")
            .size(600.0)
            .edge_color("white"),
        TRAPPIST1_PLANETS.iter().map(|p| p.short_label()).collect(),
        TRAPPIST1_PLANETS.iter().map(|p| p.period_days()).collect(),
        "cyan",
        0.6,
    )
    .y_limits(0.0, 25.0)
    .r_ticks(vec![5.0, 10.0, 15.0, 20.0]);

    let solar = polar_system_panel(
        "Inner Solar System (Real Distances)",
        noise,
        Series::scatter(vec![0.0], vec![0.0])
            .color("yellow")
            .size(900.0)
            .edge_color("orange"),
        SOLAR_SYSTEM.iter().map(|b| b.name.to_string()).collect(),
        SOLAR_SYSTEM.iter().map(|b| b.orbit_mkm).collect(),
        "skyblue",
        8.0,
    )
    .y_limits(0.0, 300.0)
    .r_ticks(vec![50.0, 100.0, 200.0]);

    Figure::new("Real Distance Orbit Comparison • Space Theme")
        .grid(1, 2)
        .size(14.0, 6.0)
        .dark()
        .with_panel(trappist)
        .with_panel(solar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::fit::evaluate_fit;
    use crate::algorithms::habitability::assess_habitable_zone;
    use crate::algorithms::period_search::DetectiveTarget;
    use crate::algorithms::transit::TransitParameters;

    fn small_curve() -> LightCurve {
        LightCurve::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 0.999, 0.998, 1.0]).unwrap()
    }

    #[test]
    fn test_fit_dashboard_layout() {
        let curve = small_curve();
        let eval = evaluate_fit(&curve, TransitParameters::new(0.05, 260.0, 4.0)).unwrap();
        let figure = fit_dashboard(&curve, &eval);

        assert_eq!(figure.panels.len(), 4);
        assert_eq!(figure.panels[0].y_limits, Some(KEPLER_FLUX_LIMITS));
        assert_eq!(figure.panels[0].series[1].y, eval.model_flux);
        assert!(!figure.panels[2].axis_visible);
        let text = &figure.panels[3].text_box.as_ref().unwrap().text;
        assert!(text.contains("Depth: 0.250%"));
    }

    #[test]
    fn test_detective_fold_marks_detection() {
        let curve = small_curve();
        let found = detective_fold(1.51, curve.time(), curve.flux(), DetectiveVerdict::Found(DetectiveTarget::B));
        let panel = &found.panels[0];
        assert_eq!(panel.span_labels(), vec!["TRAPPIST-1b transit!"]);
        assert_eq!(panel.spans[0].start, 0.45);
        assert!(panel.reference_lines.is_empty());

        let nothing = detective_fold(3.0, curve.time(), curve.flux(), DetectiveVerdict::Nothing);
        assert!(nothing.panels[0].spans.is_empty());
        assert_eq!(nothing.panels[0].reference_lines[0].value, 0.5);
        assert_eq!(nothing.panels[0].title, "Data Folded at 3.00 days");
        assert_eq!(found.panels[0].title, "Data Folded at 1.51 days");
    }

    #[test]
    fn test_catalog_fold_title_and_span() {
        let curve = small_curve();
        let figure = catalog_fold(4.05, curve.time(), curve.flux(), TRAPPIST1_PLANETS.get(2));
        assert_eq!(figure.panels[0].title, "Data Folded at 4.05 days");
        assert_eq!(figure.panels[0].span_labels(), vec!["TRAPPIST-1d transit region"]);
    }

    #[test]
    fn test_full_light_curve_info_box() {
        let time: Vec<f64> = (0..1500).map(|i| i as f64 * 0.02).collect();
        let curve = LightCurve::new(time, vec![1.0; 1500]).unwrap();
        let figure = full_light_curve(&curve);
        let info = &figure.panels[0].text_box.as_ref().unwrap().text;
        assert_eq!(info, "Data points: 1,500\nTime span: 30 days");
    }

    #[test]
    fn test_habitability_dashboard_scores() {
        let figure = habitability_dashboard(&assess_habitable_zone());
        assert_eq!(figure.panels.len(), 3);
        let scores = &figure.panels[2].series[0];
        assert_eq!(scores.categories, vec!["d", "e", "f"]);
        assert_eq!(scores.y[0], 1.0);
        assert_eq!(figure.panels[2].reference_lines.len(), 4);
        assert_eq!(figure.panels[1].span_labels(), vec!["Liquid water possible"]);
    }

    #[test]
    fn test_period_distribution() {
        let figure = period_distribution();
        let panel = &figure.panels[0];
        assert_eq!(panel.x_limits, Some((0.0, 20.0)));
        assert_eq!(panel.series[0].colors[0], "red");
        assert_eq!(panel.series[0].colors[2], "green");
        assert_eq!(panel.annotations.len(), 7);
        assert!(panel.spans[0].contains(6.1));
    }

    #[test]
    fn test_solar_system_comparison_is_seeded() {
        let a = solar_system_comparison(&mut NoiseSource::seeded(42));
        let b = solar_system_comparison(&mut NoiseSource::seeded(42));
        assert_eq!(a, b);
        assert_eq!(a.panels[0].series[0].len(), STARS_PER_PANEL);
        assert_eq!(a.panels[0].y_limits, Some((0.0, 25.0)));
        assert_eq!(a.panels[1].y_limits, Some((0.0, 300.0)));
        assert_eq!(a.background.as_deref(), Some("black"));
        assert_eq!(a.panels[1].annotations[2].text, "Earth");
    }

    #[test]
    fn test_full_system_bars() {
        let figure = full_system();
        assert_eq!(figure.panels[0].series[0].categories.len(), 7);
        assert_eq!(figure.panels[1].annotations[0].text, "127°C");
        assert_eq!(figure.panels[1].annotations[6].text, "-123°C");
    }
}
