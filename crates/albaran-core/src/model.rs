use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a line quantity is counted on the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFormat {
    /// `U`: individual units.
    Unit,
    /// `B`: boxes / bulk packs.
    Box,
}

impl UnitFormat {
    /// Recognize a format marker token. Only the exact uppercase letters count.
    pub fn from_marker(token: &str) -> Option<UnitFormat> {
        match token {
            "U" => Some(UnitFormat::Unit),
            "B" => Some(UnitFormat::Box),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            UnitFormat::Unit => "U",
            UnitFormat::Box => "B",
        }
    }
}

impl fmt::Display for UnitFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// One product line recognized in a single column of a report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub code: String,
    pub description: String,
    pub quantity: u64,
    pub unit_format: UnitFormat,
}

pub const DEFAULT_STORE_CODE: &str = "00000";
pub const DEFAULT_DOCUMENT_NUMBER: &str = "0-000000";
pub const DEFAULT_PAGE_LABEL: &str = "00000000000";

/// Fields recovered from the first page of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub store_code: String,
    pub date: NaiveDate,
    pub document_number: String,
}

impl DocumentHeader {
    /// Label used when a whole document is persisted as one unit.
    pub fn composite_label(&self) -> String {
        format!("{}_{}", self.store_code, self.document_number)
    }
}
