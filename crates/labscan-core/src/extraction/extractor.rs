//! Ordered-pattern marker extractor with plausibility gating.

use std::str::FromStr;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace};

use super::table::MarkerTable;
use crate::error::ConfigError;
use crate::models::config::ExtractionConfig;
use crate::models::marker::{MarkerName, MarkerSet, MarkerValue};

/// An accepted marker value and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerMatch {
    /// Marker the value belongs to.
    pub marker: MarkerName,
    /// Validated value.
    pub value: MarkerValue,
    /// Index of the pattern that produced the value (0 = most specific).
    pub pattern_index: usize,
    /// Matched text, lower-cased.
    pub source: String,
    /// Byte span of the match in the lower-cased text.
    pub position: (usize, usize),
}

/// Why a candidate value was not recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The capture was not a decimal number.
    Unparseable,
    /// The value fell outside the plausibility range.
    OutOfRange(MarkerValue),
}

/// A pattern hit that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedCandidate {
    pub marker: MarkerName,
    pub pattern_index: usize,
    pub raw: String,
    pub reason: RejectReason,
}

/// Result of marker extraction with diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Validated markers.
    pub markers: MarkerSet,
    /// Accepted matches, one per recorded marker.
    pub matches: Vec<MarkerMatch>,
    /// Candidates skipped before a marker was settled.
    pub rejected: Vec<RejectedCandidate>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extracts validated marker values from free text.
///
/// Markers are visited in table order. For each marker, patterns are tried in
/// priority order and the first in-range value wins; later matches and later
/// patterns for that marker are not evaluated.
#[derive(Debug, Clone, Default)]
pub struct MarkerExtractor {
    table: MarkerTable,
}

impl MarkerExtractor {
    /// Create an extractor over a compiled table.
    pub fn new(table: MarkerTable) -> Self {
        Self { table }
    }

    /// Build the table from configuration and create an extractor.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(MarkerTable::from_config(config)?))
    }

    pub fn table(&self) -> &MarkerTable {
        &self.table
    }

    /// Extract validated markers. Never fails; empty input yields an empty set.
    pub fn extract(&self, text: &str) -> MarkerSet {
        self.extract_detailed(text).markers
    }

    /// Extract validated markers along with match diagnostics.
    pub fn extract_detailed(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let normalized = text.to_lowercase();

        let mut markers = MarkerSet::new();
        let mut matches = Vec::new();
        let mut rejected = Vec::new();

        for rule in self.table.rules() {
            let mut found = false;

            for (pattern_index, pattern) in rule.patterns.iter().enumerate() {
                for caps in pattern.captures_iter(&normalized) {
                    let Some(capture) = caps.iter().skip(1).flatten().next() else {
                        continue;
                    };
                    let raw = capture.as_str();

                    let Some(value) = parse_marker_value(raw) else {
                        trace!("{}: unparseable capture {:?}", rule.marker, raw);
                        rejected.push(RejectedCandidate {
                            marker: rule.marker,
                            pattern_index,
                            raw: raw.to_string(),
                            reason: RejectReason::Unparseable,
                        });
                        continue;
                    };

                    if !rule.range.contains(value) {
                        trace!(
                            "{}: {} outside plausibility range {}-{}",
                            rule.marker, value, rule.range.min, rule.range.max
                        );
                        rejected.push(RejectedCandidate {
                            marker: rule.marker,
                            pattern_index,
                            raw: raw.to_string(),
                            reason: RejectReason::OutOfRange(value),
                        });
                        continue;
                    }

                    let Some(whole) = caps.get(0) else {
                        continue;
                    };
                    markers.record(rule.marker, value);
                    matches.push(MarkerMatch {
                        marker: rule.marker,
                        value,
                        pattern_index,
                        source: whole.as_str().to_string(),
                        position: (whole.start(), whole.end()),
                    });
                    found = true;
                    break;
                }

                if found {
                    break;
                }
            }
        }

        let mut warnings = Vec::new();
        if markers.is_empty() {
            warnings.push("No known markers detected".to_string());
        }

        debug!(
            "Extracted {} markers ({} candidates rejected) from {} characters",
            markers.len(),
            rejected.len(),
            text.len()
        );

        ExtractionResult {
            markers,
            matches,
            rejected,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Parse a captured number. A trailing decimal point is tolerated.
fn parse_marker_value(raw: &str) -> Option<MarkerValue> {
    let cleaned = raw.trim().trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .ok()
        .filter(|v| !v.is_sign_negative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::patterns::default_range;
    use crate::extraction::PlausibilityRange;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn custom(marker: MarkerName, patterns: &[&str], range: PlausibilityRange) -> MarkerExtractor {
        let config = ExtractionConfig {
            patterns: BTreeMap::from([(marker, patterns.iter().map(|p| p.to_string()).collect())]),
            ranges: BTreeMap::from([(marker, range)]),
        };
        MarkerExtractor::from_config(&config).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let extractor = MarkerExtractor::default();
        let result = extractor.extract_detailed("");

        assert!(result.markers.is_empty());
        assert_eq!(result.warnings, vec!["No known markers detected".to_string()]);
    }

    #[test]
    fn test_extract_report_scenario() {
        let text = "Hemoglobin: 10.5 g/dL\nTotal Cholesterol 220 mg/dL\nGlucose 135 mg/dL";
        let markers = MarkerExtractor::default().extract(text);

        let expected: MarkerSet = [
            (MarkerName::Hemoglobin, d("10.5")),
            (MarkerName::Cholesterol, d("220")),
            (MarkerName::Glucose, d("135")),
        ]
        .into_iter()
        .collect();
        assert_eq!(markers, expected);
    }

    #[test]
    fn test_no_markers_in_unrelated_text() {
        let text = "Patient name: John Doe\nCollected 2024-03-01 08:15\nPage 1 of 2";
        assert!(MarkerExtractor::default().extract(text).is_empty());
    }

    #[test]
    fn test_range_gate_for_every_marker() {
        let delta = d("0.01");
        for marker in MarkerName::ALL {
            let range = default_range(marker);
            let extractor = custom(marker, &[r"(\d+\.?\d*)"], range);

            let below = (range.min - delta).to_string();
            let above = (range.max + delta).to_string();
            let text = format!("{} {}", below, above);
            assert!(
                extractor.extract(&text).is_empty(),
                "{} accepted out-of-range value in {:?}",
                marker,
                text
            );

            let edge = format!("{} {}", below, range.min);
            assert_eq!(extractor.extract(&edge).get(marker), Some(range.min));
        }
    }

    #[test]
    fn test_range_gate_with_default_patterns() {
        let extractor = MarkerExtractor::default();

        assert!(extractor.extract("Hemoglobin 4.99 g/dL").is_empty());
        assert!(extractor.extract("Hemoglobin 25.01 g/dL").is_empty());
        assert!(extractor.extract("Creatinine 0.09 mg/dL").is_empty());
        assert_eq!(
            extractor.extract("Creatinine 0.1 mg/dL").get(MarkerName::Creatinine),
            Some(d("0.1"))
        );
    }

    #[test]
    fn test_pattern_priority_beats_text_position() {
        // The bare "hemoglobin 14.2" appears first and is larger, but the
        // unit-qualified "hb ... g/dl" pattern ranks higher.
        let text = "Hemoglobin 14.2\nHb: 11.8 g/dL";
        let result = MarkerExtractor::default().extract_detailed(text);

        assert_eq!(result.markers.get(MarkerName::Hemoglobin), Some(d("11.8")));
        assert_eq!(result.matches[0].pattern_index, 2);
    }

    #[test]
    fn test_pattern_priority_with_custom_table() {
        let range = PlausibilityRange::new(d("30"), d("600"));
        let extractor = custom(
            MarkerName::Glucose,
            &[r"fasting glucose (\d+)", r"glucose (\d+)"],
            range,
        );

        let markers = extractor.extract("glucose 400 then fasting glucose 95");
        assert_eq!(markers.get(MarkerName::Glucose), Some(d("95")));
    }

    #[test]
    fn test_out_of_range_match_falls_through_to_next_match() {
        let result = MarkerExtractor::default()
            .extract_detailed("Glucose 5 mg/dL (repeat) Glucose 95 mg/dL");

        assert_eq!(result.markers.get(MarkerName::Glucose), Some(d("95")));
        assert_eq!(
            result.rejected[0].reason,
            RejectReason::OutOfRange(d("5"))
        );
    }

    #[test]
    fn test_unparseable_capture_is_skipped() {
        let range = PlausibilityRange::new(d("30"), d("600"));
        let extractor = custom(MarkerName::Glucose, &[r"glucose ([\d.]+)"], range);

        let result = extractor.extract_detailed("glucose 1.2.3 glucose 88");
        assert_eq!(result.markers.get(MarkerName::Glucose), Some(d("88")));
        assert_eq!(result.rejected[0].reason, RejectReason::Unparseable);
    }

    #[test]
    fn test_bare_abbreviation_respects_word_boundaries() {
        let extractor = MarkerExtractor::default();

        assert!(!extractor.extract("HbA1c 5.6 %").contains(MarkerName::Hemoglobin));
        assert!(!extractor.extract("North 150").contains(MarkerName::Potassium));
        assert_eq!(
            extractor.extract("HB: 13.4").get(MarkerName::Hemoglobin),
            Some(d("13.4"))
        );
    }

    #[test]
    fn test_trailing_decimal_point() {
        let markers = MarkerExtractor::default().extract("Hemoglobin 13. g/dL");
        assert_eq!(markers.get(MarkerName::Hemoglobin), Some(d("13")));
    }

    #[test]
    fn test_potassium_range_quirk_is_preserved() {
        // Both electrolytes share the 100-200 window, so a normal potassium
        // of 4.2 mEq/L is rejected while sodium is accepted.
        let markers = MarkerExtractor::default().extract("Sodium 140 mEq/L\nPotassium 4.2 mEq/L");

        assert_eq!(markers.get(MarkerName::Sodium), Some(d("140")));
        assert!(!markers.contains(MarkerName::Potassium));
    }

    #[test]
    fn test_lipid_panel() {
        let text = "LIPID PANEL\nTriglycerides: 180 mg/dL\nHDL: 45 mg/dL\nLDL 130 mg/dL\nBUN 14 mg/dL";
        let markers = MarkerExtractor::default().extract(text);

        assert_eq!(markers.get(MarkerName::Triglycerides), Some(d("180")));
        assert_eq!(markers.get(MarkerName::Hdl), Some(d("45")));
        assert_eq!(markers.get(MarkerName::Ldl), Some(d("130")));
        assert_eq!(markers.get(MarkerName::Bun), Some(d("14")));
    }

    #[test]
    fn test_hdl_line_is_read_as_cholesterol() {
        // Pattern order beats text order: the unit-qualified cholesterol
        // pattern matches inside the HDL line before the bare total line.
        let text = "HDL Cholesterol: 55 mg/dL\nTotal Cholesterol: 190";
        let markers = MarkerExtractor::default().extract(text);

        assert_eq!(markers.get(MarkerName::Cholesterol), Some(d("55")));
        assert_eq!(markers.get(MarkerName::Hdl), Some(d("55")));
    }

    #[test]
    fn test_match_records_source_and_position() {
        let text = "Albumin: 4.1 g/dL";
        let result = MarkerExtractor::default().extract_detailed(text);
        let m = &result.matches[0];

        assert_eq!(m.marker, MarkerName::Albumin);
        assert_eq!(m.source, "albumin: 4.1 g/dl");
        assert_eq!(m.position, (0, text.len()));
    }

    #[test]
    fn test_parse_marker_value() {
        assert_eq!(parse_marker_value("7.25"), Some(d("7.25")));
        assert_eq!(parse_marker_value("12."), Some(d("12")));
        assert_eq!(parse_marker_value("."), None);
        assert_eq!(parse_marker_value("-3"), None);
    }
}
