//! Clinical marker identifiers and the validated marker set.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated numeric value of a marker. The unit is implied by the marker.
pub type MarkerValue = Decimal;

/// A clinical marker recognized in lab reports.
///
/// Declaration order is the extraction priority order and the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerName {
    Hemoglobin,
    Cholesterol,
    Glucose,
    Protein,
    Albumin,
    Creatinine,
    Hdl,
    Ldl,
    Triglycerides,
    Bun,
    Sodium,
    Potassium,
}

impl MarkerName {
    /// All markers in priority order.
    pub const ALL: [MarkerName; 12] = [
        MarkerName::Hemoglobin,
        MarkerName::Cholesterol,
        MarkerName::Glucose,
        MarkerName::Protein,
        MarkerName::Albumin,
        MarkerName::Creatinine,
        MarkerName::Hdl,
        MarkerName::Ldl,
        MarkerName::Triglycerides,
        MarkerName::Bun,
        MarkerName::Sodium,
        MarkerName::Potassium,
    ];

    /// Machine name, as used in config files and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerName::Hemoglobin => "hemoglobin",
            MarkerName::Cholesterol => "cholesterol",
            MarkerName::Glucose => "glucose",
            MarkerName::Protein => "protein",
            MarkerName::Albumin => "albumin",
            MarkerName::Creatinine => "creatinine",
            MarkerName::Hdl => "hdl",
            MarkerName::Ldl => "ldl",
            MarkerName::Triglycerides => "triglycerides",
            MarkerName::Bun => "bun",
            MarkerName::Sodium => "sodium",
            MarkerName::Potassium => "potassium",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerName::Hemoglobin => "Hemoglobin",
            MarkerName::Cholesterol => "Cholesterol",
            MarkerName::Glucose => "Glucose",
            MarkerName::Protein => "Protein",
            MarkerName::Albumin => "Albumin",
            MarkerName::Creatinine => "Creatinine",
            MarkerName::Hdl => "Hdl",
            MarkerName::Ldl => "Ldl",
            MarkerName::Triglycerides => "Triglycerides",
            MarkerName::Bun => "Bun",
            MarkerName::Sodium => "Sodium",
            MarkerName::Potassium => "Potassium",
        }
    }

    /// Conventional unit of the marker value.
    pub fn unit(&self) -> &'static str {
        match self {
            MarkerName::Hemoglobin | MarkerName::Protein | MarkerName::Albumin => "g/dL",
            MarkerName::Sodium | MarkerName::Potassium => "mEq/L",
            _ => "mg/dL",
        }
    }
}

impl fmt::Display for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MarkerName::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| format!("unknown marker: {}", s))
    }
}

/// Validated marker values from one extraction run.
///
/// At most one value per marker. Iteration follows marker priority order.
///
/// Only the extractor applies plausibility ranges; sets built by hand through
/// [`MarkerSet::record`] or `FromIterator` are not range-checked. The type is
/// serialize-only so a set cannot be read back from untrusted JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarkerSet {
    values: BTreeMap<MarkerName, MarkerValue>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value unless the marker already has one.
    ///
    /// Returns `true` if the value was stored. No range check is applied.
    pub fn record(&mut self, marker: MarkerName, value: MarkerValue) -> bool {
        if self.values.contains_key(&marker) {
            return false;
        }
        self.values.insert(marker, value);
        true
    }

    pub fn get(&self, marker: MarkerName) -> Option<MarkerValue> {
        self.values.get(&marker).copied()
    }

    pub fn contains(&self, marker: MarkerName) -> bool {
        self.values.contains_key(&marker)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarkerName, MarkerValue)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    /// Marker names present, in priority order.
    pub fn names(&self) -> Vec<MarkerName> {
        self.values.keys().copied().collect()
    }

    /// True if the marker is present and its value is strictly below `threshold`.
    pub fn is_below(&self, marker: MarkerName, threshold: Decimal) -> bool {
        self.get(marker).is_some_and(|v| v < threshold)
    }

    /// True if the marker is present and its value is strictly above `threshold`.
    pub fn is_above(&self, marker: MarkerName, threshold: Decimal) -> bool {
        self.get(marker).is_some_and(|v| v > threshold)
    }
}

impl FromIterator<(MarkerName, MarkerValue)> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = (MarkerName, MarkerValue)>>(iter: I) -> Self {
        let mut set = MarkerSet::new();
        for (name, value) in iter {
            set.record(name, value);
        }
        set
    }
}

/// Format a marker value without trailing zeros (`220`, `10.5`).
pub fn format_value(value: MarkerValue) -> String {
    value.normalize().to_string()
}
