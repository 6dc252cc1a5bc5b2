//! Markdown, plain-text and JSON renderings of an [`AnalysisReport`].

use std::fmt::Write;

use super::{AnalysisReport, Status};
use crate::advice::TIMESTAMP_FORMAT;
use crate::models::marker::format_value;

const DISCLAIMERS: &[&str] = &[
    "This analysis is for **informational purposes only** and should not replace professional medical advice",
    "**Always consult with your healthcare provider** before making any medical, nutritional, or exercise changes",
    "Blood test interpretation requires clinical context and professional medical judgment",
    "Automated analysis is meant to **supplement**, not replace, professional healthcare guidance",
    "For urgent health concerns, seek immediate medical attention",
];

const NEXT_STEPS: &[&str] = &[
    "**Schedule an appointment** with your healthcare provider to discuss these results",
    "**Share this analysis** with your doctor for professional interpretation",
    "**Ask specific questions** about any concerning findings",
    "**Request follow-up testing** if recommended",
    "**Implement lifestyle changes gradually** under medical supervision",
];

impl AnalysisReport {
    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let stamp = self.generated_at.format(TIMESTAMP_FORMAT);
        let mut md = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(md, "# Blood Test Analysis Report\n");
        let _ = writeln!(md, "**Generated:** {}  ", stamp);
        let _ = writeln!(md, "**Processing Time:** {} ms  ", self.processing_time_ms);
        let _ = writeln!(md, "**Source File:** {}  ", self.source);
        let _ = writeln!(md, "**Blood Markers Detected:** {}\n", self.markers.len());
        md.push_str("---\n\n");

        if let Some(preview) = &self.preview {
            md.push_str("## Original Report Content Preview\n\n");
            let _ = writeln!(md, "```\n{}\n```\n", preview);
            md.push_str("---\n\n");
        }

        md.push_str("## Blood Markers Summary\n\n");
        if self.statuses.is_empty() {
            md.push_str(
                "*Blood markers were not automatically detected. See the advice sections below for general guidance.*\n",
            );
        } else {
            md.push_str("| Marker | Value | Unit | Status |\n|--------|-------|------|--------|\n");
            for row in &self.statuses {
                let unit = if row.status == Status::SeeAnalysis { "-" } else { row.unit };
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    row.marker.label(),
                    format_value(row.value),
                    unit,
                    row.status.label()
                );
            }
        }
        md.push_str("\n---\n\n");

        if !self.warnings.is_empty() {
            md.push_str("## Warnings\n\n");
            for warning in &self.warnings {
                let _ = writeln!(md, "- {}", warning);
            }
            md.push_str("\n---\n\n");
        }

        md.push_str("## Nutrition Recommendations\n\n");
        let _ = writeln!(md, "```\n{}\n```\n", self.nutrition.text());
        md.push_str("---\n\n");

        md.push_str("## Exercise Plan\n\n");
        let _ = writeln!(md, "```\n{}\n```\n", self.exercise.text());
        md.push_str("---\n\n");

        md.push_str("## Important Disclaimers\n\n");
        for line in DISCLAIMERS {
            let _ = writeln!(md, "- {}", line);
        }

        md.push_str("\n## Next Steps\n\n");
        for (i, line) in NEXT_STEPS.iter().enumerate() {
            let _ = writeln!(md, "{}. {}", i + 1, line);
        }

        md.push_str("\n---\n\n");
        let _ = writeln!(md, "*Analysis Date: {}*", stamp);
        md
    }

    /// Render as plain text for the terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Source: {}", self.source);
        let _ = writeln!(out, "Generated: {}", self.generated_at.format(TIMESTAMP_FORMAT));
        let _ = writeln!(out, "Characters analysed: {}", self.characters);
        let _ = writeln!(out, "Markers detected: {}", self.markers.len());
        for row in &self.statuses {
            let _ = writeln!(
                out,
                "  {:<12} {:>8} {:<6} {}",
                row.marker.label(),
                format_value(row.value),
                row.unit,
                row.status.label()
            );
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "Warning: {}", warning);
        }

        out.push('\n');
        out.push_str(&self.nutrition.text());
        out.push_str("\n\n");
        out.push_str(&self.exercise.text());
        out.push('\n');
        out
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
