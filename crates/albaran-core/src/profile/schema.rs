use crate::model::DocumentHeader;
use crate::parsing::grammar::Grammar;
use crate::parsing::header::extract_page_label;
use crate::parsing::{ExtractionConfig, DEFAULT_TOL_Y};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How records of a document are grouped into persisted units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStrategy {
    /// One label per document: `<store>_<document number>`.
    PerDocument,
    /// One label per `ETIQUETA` found on each page.
    PerPage,
}

impl LabelStrategy {
    /// Label that records of this page are aggregated under.
    pub fn label_for_page(&self, header: &DocumentHeader, page_text: &str) -> String {
        match self {
            LabelStrategy::PerDocument => header.composite_label(),
            LabelStrategy::PerPage => extract_page_label(page_text),
        }
    }

    /// Database file name for one persisted label.
    pub fn db_file_name(&self, prefix: &str, header: &DocumentHeader, label: &str) -> String {
        match self {
            LabelStrategy::PerDocument => format!(
                "{}_{}_{}_alb_{}.db",
                prefix, header.store_code, header.date, header.document_number
            ),
            LabelStrategy::PerPage => format!(
                "{}_{}_{}_etq_{}.db",
                prefix, header.store_code, header.date, label
            ),
        }
    }
}

impl fmt::Display for LabelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelStrategy::PerDocument => write!(f, "per document"),
            LabelStrategy::PerPage => write!(f, "per page"),
        }
    }
}

/// A report family: layout tolerance, line grammar, labelling and output naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default = "default_tol_y")]
    pub tol_y: f64,
    pub grammar: Grammar,
    pub label_strategy: LabelStrategy,
    /// First-page text must contain one of these (case-insensitive). Empty accepts all.
    #[serde(default)]
    pub signature_markers: Vec<String>,
    /// Prefix of the generated database file names.
    pub db_prefix: String,
}

fn default_tol_y() -> f64 {
    DEFAULT_TOL_Y
}

impl Profile {
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            tol_y: self.tol_y,
            grammar: self.grammar.clone(),
        }
    }
}
