pub mod aggregate;
pub mod batch;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod route;
pub mod store;

use aggregate::{Aggregator, LabelTotals};
use chrono::NaiveDate;
use error::AlbaranError;
use extraction::PdfExtractor;
use model::DocumentHeader;
use parsing::header::{matches_signature, parse_header};
use profile::schema::{LabelStrategy, Profile};
use serde::{Deserialize, Serialize};

/// Everything recovered from one document, ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExtraction {
    pub profile: String,
    pub header: DocumentHeader,
    pub page_count: usize,
    /// One entry per label, in the order labels first appear.
    pub labels: Vec<LabelTotals>,
}

impl DocumentExtraction {
    pub fn product_count(&self) -> usize {
        self.labels.iter().map(LabelTotals::product_count).sum()
    }
}

/// Main API entry point: extract aggregated stock lines from a PDF.
///
/// Store and date come from the first page. Records from every page are
/// summed under the label the profile's strategy assigns to that page.
pub fn extract_document(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    profile: &Profile,
    today: NaiveDate,
) -> Result<DocumentExtraction, AlbaranError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let first_text = pages.first().map(|p| p.text.as_str()).ok_or(AlbaranError::NoPages)?;

    if !matches_signature(first_text, &profile.signature_markers) {
        return Err(AlbaranError::UnsupportedReport(format!(
            "first page has none of the '{}' markers ({})",
            profile.name,
            profile.signature_markers.join(", ")
        )));
    }

    let header = parse_header(first_text, today);
    let config = profile.extraction_config();

    let mut aggregator = Aggregator::new();
    if profile.label_strategy == LabelStrategy::PerDocument {
        aggregator.ensure_label(&header.composite_label());
    }

    for page in &pages {
        let label = profile.label_strategy.label_for_page(&header, &page.text);
        for record in parsing::extract_records(page, &config) {
            aggregator.add(&label, &record);
        }
    }

    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        keys = aggregator.len(),
        "document extracted"
    );

    Ok(DocumentExtraction {
        profile: profile.name.clone(),
        header,
        page_count: pages.len(),
        labels: aggregator.into_label_totals(),
    })
}

/// Local calendar date, the fallback for undated documents.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
