use crate::model::{
    DocumentHeader, DEFAULT_DOCUMENT_NUMBER, DEFAULT_PAGE_LABEL, DEFAULT_STORE_CODE,
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static STORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TIENDA/CONCESION\.\.:\s*(\d{5})").expect("valid regex"));
static STORE_LOOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTIENDA\b.*?(\d{5})").expect("valid regex"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Fecha\s*\.\.:\s*(\d{1,2}/\d{1,2}/\d{2})").expect("valid regex")
});
static SHORT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").expect("valid regex"));
static DOCUMENT_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"NUMERO DE ALBARAN\s*\.*:\s*([0-9]+\s*-\s*[0-9]+)").expect("valid regex")
});
static PAGE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ETIQUETA.*?(\d{5,})").expect("valid regex"));

/// Extract the document header from first-page text, defaulting missing fields.
pub fn parse_header(text: &str, today: NaiveDate) -> DocumentHeader {
    DocumentHeader {
        store_code: extract_store_code(text),
        date: extract_date(text, today),
        document_number: extract_document_number(text),
    }
}

/// Five-digit store code, e.g. `TIENDA/CONCESION..: 14196/00` -> `14196`.
pub fn extract_store_code(text: &str) -> String {
    let code = STORE_RE
        .captures(text)
        .or_else(|| STORE_LOOSE_RE.captures(text))
        .map(|c| c[1].to_string());
    code.unwrap_or_else(|| {
        tracing::debug!("no store code found, using {DEFAULT_STORE_CODE}");
        DEFAULT_STORE_CODE.to_string()
    })
}

/// Document date from `Fecha ..: D/M/YY`, or `today` when absent or not a calendar date.
pub fn extract_date(text: &str, today: NaiveDate) -> NaiveDate {
    DATE_RE
        .captures(text)
        .and_then(|c| parse_short_date(&c[1]))
        .unwrap_or_else(|| {
            tracing::debug!("no valid document date found, using {today}");
            today
        })
}

/// Parse `D/M/YY` or `DD/MM/YY` as a 21st-century date.
pub fn parse_short_date(s: &str) -> Option<NaiveDate> {
    let caps = SHORT_DATE_RE.captures(s.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Document number with inner whitespace removed, e.g. `0- 610268` -> `0-610268`.
pub fn extract_document_number(text: &str) -> String {
    match DOCUMENT_NUMBER_RE.captures(text) {
        Some(c) => c[1].split_whitespace().collect(),
        None => {
            tracing::debug!("no document number found, using {DEFAULT_DOCUMENT_NUMBER}");
            DEFAULT_DOCUMENT_NUMBER.to_string()
        }
    }
}

/// Per-page label: the first run of 5+ digits after `ETIQUETA`.
pub fn extract_page_label(text: &str) -> String {
    PAGE_LABEL_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| DEFAULT_PAGE_LABEL.to_string())
}

/// True if `text` contains any of `markers`.
///
/// Every marker is compared case-insensitively, so `rf625a` in the page
/// text also matches `RF625A`. An empty marker list accepts every document.
pub fn matches_signature(text: &str, markers: &[String]) -> bool {
    if markers.is_empty() {
        return true;
    }
    let upper = text.to_uppercase();
    markers.iter().any(|m| upper.contains(&m.to_uppercase()))
}
