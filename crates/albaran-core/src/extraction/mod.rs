pub mod pdftotext;

use crate::error::AlbaranError;
use serde::{Deserialize, Serialize};

/// A positioned run of text as reported by the page text extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub text: String,
}

impl WordToken {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, text: impl Into<String>) -> Self {
        WordToken {
            x0,
            y0,
            x1,
            y1,
            text: text.into(),
        }
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub width: f64,
    pub height: f64,
    /// Plain page text, used for header and label patterns.
    pub text: String,
    /// Positioned words, used for line and column reconstruction.
    pub words: Vec<WordToken>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text and word boxes from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, AlbaranError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
