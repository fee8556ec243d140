//! Plot data for the notebook frontend.
//!
//! Nothing here draws pixels. [`plots`] builds a [`Figure`] for every view
//! the missions offer and the frontend renders it from JSON.

pub mod figure;
pub mod plots;

pub use figure::{
    Annotation, Coords, Figure, LegendEntry, LineStyle, Orientation, Panel, Projection,
    ReferenceLine, Series, SeriesKind, Span, TextBox,
};
