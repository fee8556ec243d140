//! Serializable figure descriptions.
//!
//! A [`Figure`] is a grid of [`Panel`]s. Each panel carries plain data
//! (series, shaded spans, reference lines, text) that the notebook frontend
//! hands to its plotting library unchanged.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ToolkitResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Cartesian,
    Polar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Scatter,
    /// Connected line; with `marker_only` the frontend draws points instead
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Coordinate system of a text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coords {
    #[default]
    Data,
    /// `(0, 0)` is the bottom-left corner of the panel, `(1, 1)` the top-right
    AxesFraction,
}

/// One plotted data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub label: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Category names for bar series (x positions are their indices)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub color: String,
    /// Per-point colours, overriding `color`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    pub alpha: f64,
    /// Marker size for scatter, line width for lines
    pub size: f64,
    /// Per-point marker sizes, overriding `size`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<f64>,
    /// Per-point opacity, overriding `alpha`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alphas: Vec<f64>,
    #[serde(default)]
    pub marker_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,
}

impl Series {
    fn with_kind(kind: SeriesKind, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            kind,
            label: None,
            x,
            y,
            categories: Vec::new(),
            color: "black".to_string(),
            colors: Vec::new(),
            alpha: 1.0,
            size: 1.0,
            sizes: Vec::new(),
            alphas: Vec::new(),
            marker_only: false,
            edge_color: None,
        }
    }

    pub fn scatter(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::with_kind(SeriesKind::Scatter, x, y)
    }

    pub fn line(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::with_kind(SeriesKind::Line, x, y)
    }

    /// Dots drawn in the style of a line plot (`'k.'`).
    pub fn dots(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            marker_only: true,
            ..Self::with_kind(SeriesKind::Line, x, y)
        }
    }

    pub fn bar(categories: Vec<String>, values: Vec<f64>) -> Self {
        let x = (0..values.len()).map(|i| i as f64).collect();
        Self {
            categories,
            ..Self::with_kind(SeriesKind::Bar, x, values)
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }

    pub fn edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Shaded band between two coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub orientation: Orientation,
    pub start: f64,
    pub end: f64,
    pub color: String,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Span {
    pub fn vertical(start: f64, end: f64, color: impl Into<String>, alpha: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            start,
            end,
            color: color.into(),
            alpha,
            label: None,
        }
    }

    pub fn horizontal(start: f64, end: f64, color: impl Into<String>, alpha: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::vertical(start, end, color, alpha)
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}

/// Straight line across the whole panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub color: String,
    pub style: LineStyle,
    pub alpha: f64,
    pub width: f64,
    pub label: Option<String>,
}

impl ReferenceLine {
    pub fn vertical(value: f64, color: impl Into<String>) -> Self {
        Self {
            orientation: Orientation::Vertical,
            value,
            color: color.into(),
            style: LineStyle::Solid,
            alpha: 1.0,
            width: 1.0,
            label: None,
        }
    }

    pub fn horizontal(value: f64, color: impl Into<String>) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::vertical(value, color)
        }
    }

    pub fn dashed(mut self) -> Self {
        self.style = LineStyle::Dashed;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Free text placed on a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub coords: Coords,
    pub color: String,
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
}

impl Annotation {
    pub fn at(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            coords: Coords::Data,
            color: "black".to_string(),
            font_size: 9.0,
            bold: false,
        }
    }

    pub fn axes_fraction(mut self) -> Self {
        self.coords = Coords::AxesFraction;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Boxed text anchored at its top-left corner, in axes-fraction coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub face_color: String,
    pub alpha: f64,
    pub font_size: f64,
    #[serde(default)]
    pub monospace: bool,
}

impl TextBox {
    pub fn new(text: impl Into<String>, face_color: impl Into<String>, alpha: f64) -> Self {
        Self {
            x: 0.02,
            y: 0.98,
            text: text.into(),
            face_color: face_color.into(),
            alpha,
            font_size: 10.0,
            monospace: false,
        }
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }
}

/// Explicit legend entry, used instead of series labels when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub alpha: f64,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: impl Into<String>, alpha: f64) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            alpha,
        }
    }
}

/// One set of axes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub projection: Projection,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub series: Vec<Series>,
    pub spans: Vec<Span>,
    pub reference_lines: Vec<ReferenceLine>,
    pub annotations: Vec<Annotation>,
    pub text_box: Option<TextBox>,
    pub legend: Vec<LegendEntry>,
    pub show_legend: bool,
    pub legend_location: Option<String>,
    pub grid: bool,
    /// `false` hides the axes entirely (text-only panels)
    pub axis_visible: bool,
    pub hide_y_ticks: bool,
    /// Radial ticks for polar panels
    pub r_ticks: Vec<f64>,
    pub background: Option<String>,
    pub text_color: Option<String>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            grid: true,
            axis_visible: true,
            ..Default::default()
        }
    }

    /// A panel that only shows a text box.
    pub fn text_only(text_box: TextBox) -> Self {
        Self {
            text_box: Some(text_box),
            axis_visible: false,
            ..Default::default()
        }
    }

    pub fn polar(title: impl Into<String>) -> Self {
        Self {
            projection: Projection::Polar,
            ..Self::new(title)
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn x_limits(mut self, min: f64, max: f64) -> Self {
        self.x_limits = Some((min, max));
        self
    }

    pub fn y_limits(mut self, min: f64, max: f64) -> Self {
        self.y_limits = Some((min, max));
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn with_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_text_box(mut self, text_box: TextBox) -> Self {
        self.text_box = Some(text_box);
        self
    }

    pub fn with_legend(mut self) -> Self {
        self.show_legend = true;
        self
    }

    pub fn legend_at(mut self, location: impl Into<String>) -> Self {
        self.show_legend = true;
        self.legend_location = Some(location.into());
        self
    }

    pub fn legend_entries(mut self, entries: Vec<LegendEntry>) -> Self {
        self.show_legend = true;
        self.legend = entries;
        self
    }

    pub fn hide_y_ticks(mut self) -> Self {
        self.hide_y_ticks = true;
        self
    }

    pub fn r_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.r_ticks = ticks;
        self
    }

    pub fn dark(mut self) -> Self {
        self.background = Some("black".to_string());
        self.text_color = Some("white".to_string());
        self
    }

    /// Labels of every span on this panel.
    pub fn span_labels(&self) -> Vec<&str> {
        self.spans.iter().filter_map(|s| s.label.as_deref()).collect()
    }
}

/// A complete figure: panels laid out on a `rows x cols` grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    /// Width and height in inches
    pub size: (f64, f64),
    pub background: Option<String>,
    pub title_color: Option<String>,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: 1,
            cols: 1,
            size: (12.0, 5.0),
            background: None,
            title_color: None,
            panels: Vec::new(),
        }
    }

    /// Single-panel figure whose title is the panel title.
    pub fn single(panel: Panel, size: (f64, f64)) -> Self {
        Self {
            size,
            panels: vec![panel],
            ..Self::new("")
        }
    }

    pub fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    pub fn dark(mut self) -> Self {
        self.background = Some("black".to_string());
        self.title_color = Some("white".to_string());
        self
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn to_json(&self, pretty: bool) -> ToolkitResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> ToolkitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json(&self, path: &Path, pretty: bool) -> ToolkitResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json(pretty)?)?;
        log::debug!("Wrote figure '{}' to {}", self.title, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_series_uses_category_indices() {
        let series = Series::bar(vec!["d".into(), "e".into()], vec![4.05, 6.10]);
        assert_eq!(series.x, vec![0.0, 1.0]);
        assert_eq!(series.kind, SeriesKind::Bar);
    }

    #[test]
    fn test_json_uses_lowercase_tags() {
        let figure = Figure::new("Test").with_panel(
            Panel::polar("Orbits")
                .with_series(Series::scatter(vec![0.0], vec![1.0]))
                .with_line(ReferenceLine::vertical(0.5, "gray").dashed()),
        );
        let json = figure.to_json(false).unwrap();
        assert!(json.contains("\"projection\":\"polar\""));
        assert!(json.contains("\"kind\":\"scatter\""));
        assert!(json.contains("\"style\":\"dashed\""));
        assert_eq!(Figure::from_json(&json).unwrap(), figure);
    }

    #[test]
    fn test_write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures/out.json");
        Figure::new("Saved").write_json(&path, true).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"title\": \"Saved\""));
    }

    #[test]
    fn test_text_only_panel_hides_axes() {
        let panel = Panel::text_only(TextBox::new("hello", "wheat", 0.8));
        assert!(!panel.axis_visible);
        assert!(panel.series.is_empty());
    }
}
