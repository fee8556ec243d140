//! Parsers for telescope light curve exports.
//!
//! - [`csv_parser`]: Parse CSV light curves (Kepler, TRAPPIST-1 and JWST layouts)
//!
//! # Example
//!
//! ```no_run
//! use exoplanet_toolkit::parsing::csv_parser::{parse_light_curve_csv_to_curve, CsvLayout};
//! use std::path::Path;
//!
//! let curve = parse_light_curve_csv_to_curve(Path::new("kepler22b_data.csv"), &CsvLayout::kepler())
//!     .expect("Failed to parse light curve");
//! ```

pub mod csv_parser;


pub use csv_parser::CsvLayout;
