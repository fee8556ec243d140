use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::LightCurve;

/// Describes how a mission's CSV export is laid out.
///
/// The workshop files come in three flavours: the Kepler export has a fixed
/// five-line preamble with no header, the TRAPPIST-1 detective file uses `#`
/// comment lines, and the JWST habitable-zone file has `#` comments followed
/// by a `time,flux` header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub skip_rows: usize,
    pub comment_prefix: Option<String>,
    pub has_header: bool,
}

impl CsvLayout {
    /// Kepler-22b export: five preamble lines, then `time,flux` rows.
    pub fn kepler() -> Self {
        Self {
            skip_rows: 5,
            comment_prefix: None,
            has_header: false,
        }
    }

    /// TRAPPIST-1 detective export: `#` comments, no header row.
    pub fn commented() -> Self {
        Self {
            skip_rows: 0,
            comment_prefix: Some("#".to_string()),
            has_header: false,
        }
    }

    /// JWST habitable-zone export: `#` comments and a header row.
    pub fn commented_with_header() -> Self {
        Self {
            skip_rows: 0,
            comment_prefix: Some("#".to_string()),
            has_header: true,
        }
    }
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self::commented_with_header()
    }
}

/// Parse a light curve CSV file into a Polars DataFrame
pub fn parse_light_curve_csv(csv_path: &Path, layout: &CsvLayout) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(layout.has_header)
        .with_skip_rows(layout.skip_rows)
        .map_parse_options(|opts| opts.with_comment_prefix(layout.comment_prefix.as_deref()))
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .context("Failed to parse CSV into DataFrame")?;

    if df.width() < 2 {
        bail!(
            "Expected at least 2 columns (time, flux) but found {}",
            df.width()
        );
    }

    Ok(df)
}

/// Parse a light curve CSV file straight into a [`LightCurve`]
pub fn parse_light_curve_csv_to_curve(csv_path: &Path, layout: &CsvLayout) -> Result<LightCurve> {
    let df = parse_light_curve_csv(csv_path, layout)?;
    dataframe_to_light_curve(&df)
}

/// Convert a DataFrame to a light curve using its first two columns.
///
/// Columns are cast to Float64 because integer-looking time stamps are
/// inferred as i64. Any null (missing or non-numeric cell) is an error.
pub fn dataframe_to_light_curve(df: &DataFrame) -> Result<LightCurve> {
    let columns = df.get_columns();
    if columns.len() < 2 {
        bail!("Light curve needs time and flux columns");
    }

    let time = column_to_f64(&columns[0]).context("Invalid time column")?;
    let flux = column_to_f64(&columns[1]).context("Invalid flux column")?;

    LightCurve::new(time, flux).map_err(|e| anyhow::anyhow!(e.to_string()))
}

fn column_to_f64(column: &Column) -> Result<Vec<f64>> {
    let casted = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", column.name()))?;
    let values = casted.f64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.with_context(|| format!("Missing or non-numeric value at row {}", row))
        })
        .collect()
}

/// Convert a light curve to a two-column (`time`, `flux`) DataFrame
pub fn light_curve_to_dataframe(curve: &LightCurve) -> Result<DataFrame> {
    let df = df!(
        "time" => curve.time().to_vec(),
        "flux" => curve.flux().to_vec(),
    )?;
    Ok(df)
}

/// Write a light curve as CSV, preceded by `# `-prefixed comment lines.
pub fn write_light_curve_csv(
    csv_path: &Path,
    curve: &LightCurve,
    comments: &[String],
    include_header: bool,
) -> Result<()> {
    let mut df = light_curve_to_dataframe(curve)?;
    let mut file = File::create(csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;

    for line in comments {
        writeln!(file, "# {}", line)?;
    }

    CsvWriter::new(&mut file)
        .include_header(include_header)
        .finish(&mut df)
        .context("Failed to write CSV")?;

    Ok(())
}
