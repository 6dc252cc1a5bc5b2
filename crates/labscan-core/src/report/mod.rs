//! Analysis report assembly: marker statuses plus both advisories.

mod render;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::advice::Advisory;
use crate::models::marker::{MarkerName, MarkerSet, MarkerValue};

/// Clinical reference interval used for the report summary table.
///
/// Separate from the extraction plausibility ranges, which only reject
/// misreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Reference interval for markers the summary table grades.
pub fn reference_range(marker: MarkerName) -> Option<ReferenceRange> {
    let (min, max) = match marker {
        MarkerName::Hemoglobin => (Decimal::from(12), Decimal::from(16)),
        MarkerName::Cholesterol => (Decimal::ZERO, Decimal::from(200)),
        MarkerName::Glucose => (Decimal::from(70), Decimal::from(99)),
        MarkerName::Protein => (Decimal::new(60, 1), Decimal::new(83, 1)),
        MarkerName::Albumin => (Decimal::new(35, 1), Decimal::new(50, 1)),
        MarkerName::Creatinine => (Decimal::new(6, 1), Decimal::new(13, 1)),
        _ => return None,
    };
    Some(ReferenceRange { min, max })
}

/// Grade of a marker value against its reference interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Normal,
    /// Cholesterol above its upper bound. Lower is always better.
    Elevated,
    Abnormal,
    /// No reference interval; see the advisory sections.
    SeeAnalysis,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::Abnormal => "Abnormal",
            Self::SeeAnalysis => "See Analysis",
        }
    }
}

/// One row of the marker summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerStatus {
    pub marker: MarkerName,
    pub value: MarkerValue,
    pub unit: &'static str,
    pub status: Status,
    pub reference: Option<ReferenceRange>,
}

impl MarkerStatus {
    pub fn classify(marker: MarkerName, value: MarkerValue) -> Self {
        let reference = reference_range(marker);
        let status = match reference {
            None => Status::SeeAnalysis,
            Some(range) if marker == MarkerName::Cholesterol => {
                if value <= range.max {
                    Status::Normal
                } else {
                    Status::Elevated
                }
            }
            Some(range) if range.min <= value && value <= range.max => Status::Normal,
            Some(_) => Status::Abnormal,
        };

        Self {
            marker,
            value,
            unit: marker.unit(),
            status,
            reference,
        }
    }
}

/// Summary rows for every marker in the set, in marker order.
pub fn marker_statuses(markers: &MarkerSet) -> Vec<MarkerStatus> {
    markers
        .iter()
        .map(|(marker, value)| MarkerStatus::classify(marker, value))
        .collect()
}

/// Full result of analysing one report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: NaiveDateTime,
    /// File name or label of the analysed report.
    pub source: String,
    /// Character count of the analysed text.
    pub characters: usize,
    pub processing_time_ms: u64,
    pub markers: MarkerSet,
    pub statuses: Vec<MarkerStatus>,
    pub nutrition: Advisory,
    pub exercise: Advisory,
    /// Leading part of the source text, if previews are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Number of markers that were not graded normal.
    pub fn flagged_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| matches!(s.status, Status::Elevated | Status::Abnormal))
            .count()
    }
}

/// First `limit` characters of `text` on one line, with an ellipsis when cut.
pub fn content_preview(text: &str, limit: usize) -> String {
    let mut preview: String = text.chars().take(limit).collect();
    preview = preview.replace('\n', " ").trim().to_string();
    if text.chars().count() > limit {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_grading() {
        let cases = [
            (MarkerName::Hemoglobin, "10.5", Status::Abnormal),
            (MarkerName::Hemoglobin, "12", Status::Normal),
            (MarkerName::Cholesterol, "150", Status::Normal),
            (MarkerName::Cholesterol, "220", Status::Elevated),
            (MarkerName::Glucose, "135", Status::Abnormal),
            (MarkerName::Glucose, "65", Status::Abnormal),
            (MarkerName::Protein, "8.3", Status::Normal),
            (MarkerName::Albumin, "3.4", Status::Abnormal),
            (MarkerName::Creatinine, "0.9", Status::Normal),
            (MarkerName::Ldl, "160", Status::SeeAnalysis),
            (MarkerName::Sodium, "140", Status::SeeAnalysis),
        ];

        for (marker, value, expected) in cases {
            assert_eq!(
                MarkerStatus::classify(marker, d(value)).status,
                expected,
                "{} = {}",
                marker,
                value
            );
        }
    }

    #[test]
    fn test_statuses_follow_marker_order() {
        let markers: MarkerSet = [
            (MarkerName::Glucose, d("92")),
            (MarkerName::Hemoglobin, d("13.1")),
        ]
        .into_iter()
        .collect();

        let rows = marker_statuses(&markers);
        assert_eq!(rows[0].marker, MarkerName::Hemoglobin);
        assert_eq!(rows[0].unit, "g/dL");
        assert_eq!(rows[1].marker, MarkerName::Glucose);
    }

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("Glucose\n92 mg/dL", 1000), "Glucose 92 mg/dL");
        assert_eq!(content_preview("abcdef", 3), "abc...");
        assert_eq!(content_preview("", 10), "");
    }
}
