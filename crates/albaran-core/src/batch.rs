use crate::error::AlbaranError;
use crate::extraction::PdfExtractor;
use crate::profile::schema::Profile;
use crate::route::{move_or_copy, Destination, Placement};
use crate::store::write_label_db;
use crate::{extract_document, DocumentExtraction};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One database produced for one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenDatabase {
    pub path: PathBuf,
    pub label: String,
    pub products: usize,
    pub total_quantity: u64,
}

/// A document that was extracted, filed and persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedDocument {
    pub source: PathBuf,
    pub store_code: String,
    pub date: NaiveDate,
    pub document_number: String,
    pub pdf_path: PathBuf,
    pub placement: Placement,
    pub databases: Vec<WrittenDatabase>,
}

impl ConvertedDocument {
    pub fn product_count(&self) -> usize {
        self.databases.iter().map(|d| d.products).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Converted(ConvertedDocument),
    Failed { source: PathBuf, reason: String },
}

/// Extract one document, file the PDF under its store and date, and write
/// one database per label.
///
/// A rejected document (signature mismatch, extraction failure) is not
/// moved and nothing is written.
pub fn convert_document(
    pdf_path: &Path,
    dest_root: &Path,
    extractor: &dyn PdfExtractor,
    profile: &Profile,
    today: NaiveDate,
) -> Result<ConvertedDocument, AlbaranError> {
    let pdf_bytes = std::fs::read(pdf_path)?;
    let extraction = extract_document(&pdf_bytes, extractor, profile, today)?;
    let DocumentExtraction { header, labels, .. } = extraction;

    let destination = Destination::new(dest_root, &header.store_code, header.date);
    destination.create()?;

    let (pdf_dest, placement) = move_or_copy(pdf_path, &destination.pdfs_dir)?;

    let mut databases = Vec::with_capacity(labels.len());
    for totals in &labels {
        let file_name = profile
            .label_strategy
            .db_file_name(&profile.db_prefix, &header, &totals.label);
        let db_path = destination.db_path(&file_name);
        write_label_db(&db_path, totals)?;
        databases.push(WrittenDatabase {
            path: db_path,
            label: totals.label.clone(),
            products: totals.product_count(),
            total_quantity: totals.total_quantity(),
        });
    }

    Ok(ConvertedDocument {
        source: pdf_path.to_path_buf(),
        store_code: header.store_code,
        date: header.date,
        document_number: header.document_number,
        pdf_path: pdf_dest,
        placement,
        databases,
    })
}

/// Convert documents one at a time, in order. A failing document is
/// reported and the batch moves on.
pub fn convert_batch(
    pdf_paths: &[PathBuf],
    dest_root: &Path,
    extractor: &dyn PdfExtractor,
    profile: &Profile,
    today: NaiveDate,
) -> Vec<DocumentOutcome> {
    pdf_paths
        .iter()
        .map(
            |path| match convert_document(path, dest_root, extractor, profile, today) {
                Ok(doc) => DocumentOutcome::Converted(doc),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "document skipped");
                    DocumentOutcome::Failed {
                        source: path.clone(),
                        reason: e.to_string(),
                    }
                }
            },
        )
        .collect()
}
