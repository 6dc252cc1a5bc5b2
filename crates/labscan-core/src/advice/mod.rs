//! Rule-based nutrition and exercise advice derived from validated markers.

pub mod exercise;
pub mod nutrition;

pub use exercise::{ExerciseAdvisor, ExercisePlan, Intensity, RiskFactor, advise_exercise};
pub use nutrition::{
    CholesterolStatus, GlucoseStatus, HemoglobinStatus, NutritionAdvisor, advise_nutrition,
};

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::marker::{MarkerSet, format_value};

/// Timestamp format used in advisory headers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which advisor produced an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    Nutrition,
    Exercise,
}

/// Advisory text: an ordered sequence of lines, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    kind: AdvisoryKind,
    generated_at: NaiveDateTime,
    lines: Vec<String>,
}

impl Advisory {
    pub fn kind(&self) -> AdvisoryKind {
        self.kind
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The advisory as one text block.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Line accumulator shared by the advisors.
struct AdvisoryBuilder {
    kind: AdvisoryKind,
    generated_at: NaiveDateTime,
    lines: Vec<String>,
}

impl AdvisoryBuilder {
    fn new(kind: AdvisoryKind, generated_at: NaiveDateTime) -> Self {
        Self {
            kind,
            generated_at,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Section title followed by a dashed rule of the given width.
    fn section(&mut self, title: &str, rule: usize) -> &mut Self {
        self.lines.push(title.to_string());
        self.lines.push("-".repeat(rule));
        self
    }

    /// Banner, timestamp, marker count and the list of detected values.
    fn header(&mut self, title: &str, rule: usize, count_label: &str, list_label: &str, markers: &MarkerSet) {
        let stamp = self.generated_at.format(TIMESTAMP_FORMAT).to_string();
        self.line(title);
        self.line("=".repeat(rule));
        self.line(format!("Analysis Date: {}", stamp));
        self.line(format!("{}: {}", count_label, markers.len()));

        if !markers.is_empty() {
            self.line(list_label);
            for (name, value) in markers.iter() {
                self.line(format!("  • {}: {}", name.label(), format_value(value)));
            }
        }
        self.blank();
    }

    fn build(self) -> Advisory {
        Advisory {
            kind: self.kind,
            generated_at: self.generated_at,
            lines: self.lines,
        }
    }
}
