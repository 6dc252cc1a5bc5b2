//! Report document reading: PDF and plain-text lab reports.

mod cleanup;
mod pdf;

pub use cleanup::clean_report_text;
pub use pdf::PdfExtractor;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::DocumentError;
use crate::models::config::DocumentConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Source format of a report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Text,
}

impl ReportFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Trait for document backends that yield report text.
pub trait ReportSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document.
    fn page_count(&self) -> u32;

    /// Extract the text of the whole document.
    fn extract_text(&self) -> Result<String>;
}

/// Text of a report file, ready for marker extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    /// Path the document was read from.
    pub path: String,
    pub format: ReportFormat,
    /// Page count (1 for plain text).
    pub pages: u32,
    /// Size of the file in bytes.
    pub size: u64,
    pub text: String,
}

/// Read a report file and return its text.
///
/// PDF text is cleaned when `config.clean_text` is set. Plain-text reports
/// are returned as written.
pub fn read_report(path: &Path, config: &DocumentConfig) -> Result<ReportDocument> {
    let format = ReportFormat::from_path(path)?;
    let path_str = path.display().to_string();

    let data = std::fs::read(path).map_err(|e| DocumentError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    if data.is_empty() {
        return Err(DocumentError::EmptyFile(path_str));
    }

    info!("Reading {:?} report from {} ({} bytes)", format, path_str, data.len());

    let (text, pages) = match format {
        ReportFormat::Pdf => {
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            let raw = extractor.extract_text()?;
            let text = if config.clean_text {
                clean_report_text(&raw)
            } else {
                raw
            };
            (text, extractor.page_count())
        }
        ReportFormat::Text => (String::from_utf8_lossy(&data).into_owned(), 1),
    };

    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if visible == 0 || visible < config.min_text_length {
        return Err(DocumentError::NoText(path_str));
    }

    debug!("Read {} characters from {} page(s)", text.chars().count(), pages);

    Ok(ReportDocument {
        path: path_str,
        format,
        pages,
        size: data.len() as u64,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    /// Build a single-page PDF with one text line per entry.
    pub(crate) fn one_page_pdf(lines: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{Document, Object, Stream, dictionary};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("a.PDF")).unwrap(), ReportFormat::Pdf);
        assert_eq!(ReportFormat::from_path(Path::new("a.txt")).unwrap(), ReportFormat::Text);
        assert!(matches!(
            ReportFormat::from_path(Path::new("a.docx")),
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert!(ReportFormat::from_path(Path::new("report")).is_err());
    }

    #[test]
    fn test_read_text_report() {
        let file = write_temp(".txt", b"Hemoglobin: 13.5 g/dL\nGlucose 92 mg/dL\n");
        let doc = read_report(file.path(), &DocumentConfig::default()).unwrap();

        assert_eq!(doc.format, ReportFormat::Text);
        assert_eq!(doc.pages, 1);
        assert!(doc.text.contains("Glucose 92 mg/dL"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_report(Path::new("/nonexistent/report.txt"), &DocumentConfig::default())
            .unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_empty_file() {
        let file = write_temp(".txt", b"");
        let err = read_report(file.path(), &DocumentConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::EmptyFile(_)));
    }

    #[test]
    fn test_whitespace_only_file_has_no_text() {
        let file = write_temp(".txt", b"  \n\t\n");
        let err = read_report(file.path(), &DocumentConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::NoText(_)));
    }

    #[test]
    fn test_min_text_length() {
        let file = write_temp(".txt", b"Hb 12");
        let config = DocumentConfig {
            min_text_length: 10,
            ..Default::default()
        };
        assert!(matches!(
            read_report(file.path(), &config),
            Err(DocumentError::NoText(_))
        ));
    }

    #[test]
    fn test_read_pdf_report() {
        let pdf = one_page_pdf(&["Hemoglobin: 10.5g/dL", "Glucose: 135 mg/dL"]);
        let file = write_temp(".pdf", &pdf);
        let doc = read_report(file.path(), &DocumentConfig::default()).unwrap();

        assert_eq!(doc.format, ReportFormat::Pdf);
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.size, pdf.len() as u64);
        // Cleanup splits the value from its unit.
        assert!(doc.text.contains("10.5 g/dL"), "text: {:?}", doc.text);
        assert!(doc.text.contains("135 mg/dL"), "text: {:?}", doc.text);

        let markers = crate::extract(&doc.text);
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn test_invalid_pdf() {
        let file = write_temp(".pdf", b"this is not a pdf document");
        let err = read_report(file.path(), &DocumentConfig::default()).unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_) | DocumentError::NoPages));
    }
}
