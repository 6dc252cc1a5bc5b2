//! Default pattern and plausibility-range tables for lab report markers.
//!
//! Patterns are matched against lower-cased text. Each marker lists its
//! patterns from most specific (name plus unit) to most permissive (bare
//! abbreviation), and the first capture group holds the numeric value.
//! Bare abbreviations are anchored on word boundaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::PlausibilityRange;
use crate::models::marker::MarkerName;

const NUMBER: &str = r"(\d+\.?\d*)";

const HEMOGLOBIN: &[&str] = &[
    r"\bhemoglobin[:\s]*{n}\s*g/dl",
    r"\bhgb[:\s]*{n}\s*g/dl",
    r"\bhb[:\s]*{n}\s*g/dl",
    r"\bhemoglobin[:\s]*{n}",
    r"\bhb\s*:?\s*{n}",
    r"\bhemoglobin\s*(?:level)?[:\s]*{n}",
];

// The second entry also matches "HDL Cholesterol: .. mg/dL" lines.
const CHOLESTEROL: &[&str] = &[
    r"\btotal\s*cholesterol[:\s]*{n}\s*mg/dl",
    r"\bcholesterol\s*(?:total)?[:\s]*{n}\s*mg/dl",
    r"\bt\.?\s*chol[:\s]*{n}",
    r"\bcholesterol[:\s]*{n}",
    r"\bchol\s*:?\s*{n}",
];

const GLUCOSE: &[&str] = &[
    r"\bglucose[:\s]*{n}\s*mg/dl",
    r"\bblood\s*glucose[:\s]*{n}\s*mg/dl",
    r"\bfasting\s*glucose[:\s]*{n}\s*mg/dl",
    r"\bglucose[:\s]*{n}",
    r"\bblood\s*sugar[:\s]*{n}",
    r"\bglu\s*:?\s*{n}",
];

const PROTEIN: &[&str] = &[
    r"\btotal\s*protein[:\s]*{n}\s*g/dl",
    r"\bprotein\s*(?:total)?[:\s]*{n}\s*g/dl",
    r"\bt\.?\s*protein[:\s]*{n}",
    r"\bprotein[:\s]*{n}",
];

const ALBUMIN: &[&str] = &[
    r"\balbumin[:\s]*{n}\s*g/dl",
    r"\balbumin[:\s]*{n}",
    r"\balb\s*:?\s*{n}",
];

const CREATININE: &[&str] = &[
    r"\bcreatinine[:\s]*{n}\s*mg/dl",
    r"\bcreatinine[:\s]*{n}",
    r"\bcreat\s*:?\s*{n}",
];

const HDL: &[&str] = &[
    r"\bhdl[:\s]*{n}\s*mg/dl",
    r"\bhdl\s*cholesterol[:\s]*{n}",
    r"\bhdl\s*:?\s*{n}",
];

const LDL: &[&str] = &[
    r"\bldl[:\s]*{n}\s*mg/dl",
    r"\bldl\s*cholesterol[:\s]*{n}",
    r"\bldl\s*:?\s*{n}",
];

const TRIGLYCERIDES: &[&str] = &[
    r"\btriglycerides[:\s]*{n}\s*mg/dl",
    r"\btriglycerides[:\s]*{n}",
    r"\btrig\s*:?\s*{n}",
    r"\btg\s*:?\s*{n}",
];

const BUN: &[&str] = &[
    r"\bbun[:\s]*{n}\s*mg/dl",
    r"\bblood\s*urea\s*nitrogen[:\s]*{n}",
    r"\bbun\s*:?\s*{n}",
];

const SODIUM: &[&str] = &[
    r"\bsodium[:\s]*{n}\s*(?:meq/l|mmol/l)?",
    r"\bna\s*:?\s*{n}",
];

const POTASSIUM: &[&str] = &[
    r"\bpotassium[:\s]*{n}\s*(?:meq/l|mmol/l)?",
    r"\bk\s*:?\s*{n}",
];

fn templates(marker: MarkerName) -> &'static [&'static str] {
    match marker {
        MarkerName::Hemoglobin => HEMOGLOBIN,
        MarkerName::Cholesterol => CHOLESTEROL,
        MarkerName::Glucose => GLUCOSE,
        MarkerName::Protein => PROTEIN,
        MarkerName::Albumin => ALBUMIN,
        MarkerName::Creatinine => CREATININE,
        MarkerName::Hdl => HDL,
        MarkerName::Ldl => LDL,
        MarkerName::Triglycerides => TRIGLYCERIDES,
        MarkerName::Bun => BUN,
        MarkerName::Sodium => SODIUM,
        MarkerName::Potassium => POTASSIUM,
    }
}

/// Default candidate patterns for every marker, most specific first.
pub fn default_patterns() -> BTreeMap<MarkerName, Vec<String>> {
    MarkerName::ALL
        .into_iter()
        .map(|marker| {
            let patterns = templates(marker)
                .iter()
                .map(|t| t.replace("{n}", NUMBER))
                .collect();
            (marker, patterns)
        })
        .collect()
}

/// Default inclusive plausibility range for a marker.
pub fn default_range(marker: MarkerName) -> PlausibilityRange {
    let (min, max) = match marker {
        MarkerName::Hemoglobin => (Decimal::new(5, 0), Decimal::new(25, 0)),
        MarkerName::Cholesterol => (Decimal::new(50, 0), Decimal::new(500, 0)),
        MarkerName::Glucose => (Decimal::new(30, 0), Decimal::new(600, 0)),
        MarkerName::Protein | MarkerName::Albumin => (Decimal::new(2, 0), Decimal::new(15, 0)),
        MarkerName::Creatinine => (Decimal::new(1, 1), Decimal::new(15, 0)),
        MarkerName::Hdl | MarkerName::Ldl => (Decimal::new(10, 0), Decimal::new(300, 0)),
        MarkerName::Triglycerides => (Decimal::new(20, 0), Decimal::new(1000, 0)),
        MarkerName::Bun => (Decimal::new(5, 0), Decimal::new(100, 0)),
        // Shared window for both electrolytes. Not a physiological potassium
        // range; pinned by tests.
        MarkerName::Sodium | MarkerName::Potassium => (Decimal::new(100, 0), Decimal::new(200, 0)),
    };
    PlausibilityRange::new(min, max)
}

/// Default plausibility ranges for every marker.
pub fn default_ranges() -> BTreeMap<MarkerName, PlausibilityRange> {
    MarkerName::ALL
        .into_iter()
        .map(|marker| (marker, default_range(marker)))
        .collect()
}
