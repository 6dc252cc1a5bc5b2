//! Rule-based marker extraction from lab report text.

mod extractor;
pub mod patterns;
mod table;

pub use extractor::{ExtractionResult, MarkerExtractor, MarkerMatch, RejectReason, RejectedCandidate};
pub use table::{MarkerRule, MarkerTable};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::marker::MarkerName;

/// Inclusive range of values accepted for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlausibilityRange {
    /// Lowest accepted value.
    pub min: Decimal,
    /// Highest accepted value.
    pub max: Decimal,
}

impl PlausibilityRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// True if `value` lies within the bounds, inclusive.
    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }

    fn validate(&self, marker: MarkerName) -> Result<(), ConfigError> {
        if self.min.is_sign_negative() {
            return Err(ConfigError::InvalidRange {
                marker,
                reason: format!("negative lower bound {}", self.min),
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                marker,
                reason: format!("lower bound {} exceeds upper bound {}", self.min, self.max),
            });
        }
        Ok(())
    }
}
