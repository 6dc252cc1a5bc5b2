//! Error types for the labscan-core library.

use thiserror::Error;

use crate::models::marker::MarkerName;

/// Main error type for the labscan library.
#[derive(Error, Debug)]
pub enum LabscanError {
    /// Document reading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Marker table configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Advisory tool error.
    #[error("advisory error: {0}")]
    Advisory(#[from] AdvisoryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading report documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is empty.
    #[error("file is empty: {0}")]
    EmptyFile(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No text could be extracted (image-only or corrupted document).
    #[error("no extractable text in {0}")]
    NoText(String),

    /// File extension is not a supported report format.
    #[error("unsupported report format: {0}")]
    UnsupportedFormat(String),
}

/// Marker table defects, detected when the table is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A marker has patterns but no plausibility range.
    #[error("marker {0} has patterns but no plausibility range")]
    MissingRange(MarkerName),

    /// A marker has a plausibility range but no patterns.
    #[error("marker {0} has a plausibility range but no patterns")]
    MissingPatterns(MarkerName),

    /// A pattern failed to compile.
    #[error("invalid pattern for {marker} ({pattern}): {source}")]
    InvalidPattern {
        marker: MarkerName,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern has no capture group for the numeric value.
    #[error("pattern for {marker} has no capture group: {pattern}")]
    MissingCapture { marker: MarkerName, pattern: String },

    /// A plausibility range is empty or negative.
    #[error("invalid range for {marker}: {reason}")]
    InvalidRange { marker: MarkerName, reason: String },

    /// The table defines no markers at all.
    #[error("marker table is empty")]
    EmptyTable,

    /// Failed to read or parse a configuration file.
    #[error("failed to load configuration: {0}")]
    Load(String),

    /// Failed to serialize or write a configuration file.
    #[error("failed to save configuration: {0}")]
    Save(String),
}

/// Errors surfaced at the advisory tool boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdvisoryError {
    /// The tool was called with empty or whitespace-only input.
    #[error("no report data provided for {0}")]
    EmptyInput(&'static str),

    /// No tool is registered under the requested name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Result type for the labscan library.
pub type Result<T> = std::result::Result<T, LabscanError>;
