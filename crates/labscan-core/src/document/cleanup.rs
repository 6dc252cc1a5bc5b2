//! Normalization of text extracted from PDF lab reports.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_LINES: Regex = Regex::new(r"\n+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    /// A number followed by a lab unit, with any spacing in between.
    static ref VALUE_UNIT: Regex =
        Regex::new(r"(\d+\.?\d*)\s*(mg/dL|g/dL|mmol/L|µg/dL|ng/mL|mL/min|%)").unwrap();
}

/// Clean PDF text page by page.
///
/// Each non-blank page becomes one line: whitespace runs collapse to a single
/// space and values are separated from their unit by exactly one space.
/// Pages are split on form feeds.
pub fn clean_report_text(raw: &str) -> String {
    let mut out = String::new();

    for page in raw.split('\x0c') {
        if page.trim().is_empty() {
            continue;
        }
        let page = BLANK_LINES.replace_all(page, "\n");
        let page = WHITESPACE.replace_all(&page, " ");
        let page = VALUE_UNIT.replace_all(&page, "$1 $2");

        out.push_str(page.trim());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapses_whitespace() {
        let raw = "Complete Blood Count\n\n\n  Hemoglobin:   10.5\tg/dL\n";
        assert_eq!(clean_report_text(raw), "Complete Blood Count Hemoglobin: 10.5 g/dL\n");
    }

    #[test]
    fn test_separates_value_and_unit() {
        assert_eq!(clean_report_text("Glucose 135mg/dL"), "Glucose 135 mg/dL\n");
        assert_eq!(clean_report_text("HbA1c 6.1%"), "HbA1c 6.1 %\n");
    }

    #[test]
    fn test_pages_become_lines() {
        let raw = "Page one\nGlucose 92 mg/dL\x0c\n\x0cPage three";
        assert_eq!(clean_report_text(raw), "Page one Glucose 92 mg/dL\nPage three\n");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(clean_report_text(" \n\n "), "");
    }
}
