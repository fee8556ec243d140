//! The three workshop missions.
//!
//! # Components
//!
//! - [`kepler`]: Kepler-22b transit lab (load, plot, score a model fit)
//! - [`detective`]: TRAPPIST-1 detective, five guided steps to find planets b and c
//! - [`habitable`]: TRAPPIST-1 habitable-zone analysis and team report
//!
//! Missions never print. Every operation returns the console lines it would
//! show, together with any figures, in a [`StepReport`].

pub mod detective;
pub mod habitable;
pub mod kepler;

use serde::{Deserialize, Serialize};

use crate::error::ToolkitResult;
use crate::visualization::Figure;

pub use detective::{FoldOutcome, TrappistMission};
pub use habitable::{SavedReport, TrappistHabitable};
pub use kepler::{FitReport, KeplerTool, SliderRange};

/// Console output plus figures produced by one mission command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub title: String,
    pub lines: Vec<String>,
    pub figures: Vec<Figure>,
}

impl StepReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn figure(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    /// Append another report's output after this one's.
    pub fn absorb(&mut self, other: StepReport) {
        self.lines.extend(other.lines);
        self.figures.extend(other.figures);
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn to_json(&self, pretty: bool) -> ToolkitResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Send every line to the `log` facade at info level.
    pub fn log(&self) {
        for line in &self.lines {
            log::info!("{}", line);
        }
    }
}

/// Section banner: blank line, rule, heading, rule.
pub(crate) fn banner(heading: &str, width: usize) -> Vec<String> {
    let rule = "=".repeat(width);
    vec![String::new(), rule.clone(), heading.to_string(), rule]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_shape() {
        let lines = banner("STEP 1: EXAMINE THE RAW DATA", 60);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[1], lines[3]);
    }

    #[test]
    fn test_absorb_keeps_order() {
        let mut first = StepReport::new("first");
        first.line("a");
        let mut second = StepReport::new("second");
        second.extend_lines(["b", "c"]);
        first.absorb(second);
        assert_eq!(first.text(), "a\nb\nc");
        assert_eq!(first.title, "first");
    }
}
