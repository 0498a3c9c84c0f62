//! Extension-based format detection for the bank-statement path.
//!
//! Inference is by file extension only — no content sniffing. The service
//! decides what it accepts from the bytes it receives; this detection only
//! picks the submission route (direct PDF vs. convert-first) and rejects
//! formats that have no route at all.

use std::path::Path;

/// Formats the bank-statement path can route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Png,
    Jpeg,
    /// Anything else; carries the lowercased extension (possibly empty).
    Unknown(String),
}

impl DocumentFormat {
    /// Conventional MIME type for this format.
    pub fn mime_type(&self) -> &str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Png => "image/png",
            DocumentFormat::Jpeg => "image/jpeg",
            DocumentFormat::Unknown(_) => "application/octet-stream",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, DocumentFormat::Png | DocumentFormat::Jpeg)
    }
}

/// Infer the format of `path` from its extension.
pub fn detect(path: &Path) -> DocumentFormat {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => DocumentFormat::Pdf,
        "png" => DocumentFormat::Png,
        "jpg" | "jpeg" => DocumentFormat::Jpeg,
        _ => DocumentFormat::Unknown(extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_detect() {
        assert_eq!(detect(Path::new("a/statement.pdf")), DocumentFormat::Pdf);
        assert_eq!(detect(Path::new("scan.png")), DocumentFormat::Png);
        assert_eq!(detect(Path::new("scan.jpg")), DocumentFormat::Jpeg);
        assert_eq!(detect(Path::new("scan.jpeg")), DocumentFormat::Jpeg);
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect(Path::new("SCAN.PNG")), DocumentFormat::Png);
        assert_eq!(detect(Path::new("doc.Pdf")), DocumentFormat::Pdf);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(
            detect(Path::new("scan.tiff")),
            DocumentFormat::Unknown("tiff".into())
        );
        assert_eq!(
            detect(Path::new("no_extension")),
            DocumentFormat::Unknown(String::new())
        );
    }

    #[test]
    fn mime_types_match_the_routes() {
        assert_eq!(DocumentFormat::Pdf.mime_type(), "application/pdf");
        assert!(DocumentFormat::Png.is_image());
        assert!(DocumentFormat::Jpeg.is_image());
        assert!(!DocumentFormat::Pdf.is_image());
    }
}
