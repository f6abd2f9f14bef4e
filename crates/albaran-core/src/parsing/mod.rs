pub mod grammar;
pub mod header;
pub mod lines;
pub mod normalize;
pub mod record;

use crate::extraction::PageContent;
use crate::model::ParsedRecord;
use grammar::Grammar;
use lines::{group_lines, split_point};
use record::parse_column;
use serde::{Deserialize, Serialize};

/// Default vertical tolerance for grouping words into one line, in PDF points.
pub const DEFAULT_TOL_Y: f64 = 2.0;

/// Layout and grammar settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub tol_y: f64,
    pub grammar: Grammar,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            tol_y: DEFAULT_TOL_Y,
            grammar: Grammar::default(),
        }
    }
}

/// Recognize every record on a page, top to bottom, left column before right.
///
/// Each line yields 0, 1 or 2 records. Columns are parsed independently.
pub fn extract_records(page: &PageContent, config: &ExtractionConfig) -> Vec<ParsedRecord> {
    let split_x = split_point(page.width);
    let lines = group_lines(&page.words, config.tol_y);

    let mut records = Vec::new();
    for line in &lines {
        let columns = line.split_columns(split_x);
        for side in [&columns.left, &columns.right] {
            if let Some(record) = parse_column(side, &config.grammar) {
                records.push(record);
            }
        }
    }

    tracing::debug!(
        page = page.page_number,
        words = page.words.len(),
        lines = lines.len(),
        records = records.len(),
        "page parsed"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::WordToken;
    use crate::model::UnitFormat;

    /// Lay out a line's tokens left to right starting at `x`.
    fn place(words: &mut Vec<WordToken>, x: f64, y: f64, tokens: &[&str]) {
        let mut x = x;
        for t in tokens {
            words.push(WordToken::new(x, y, x + 30.0, y + 8.0, *t));
            x += 35.0;
        }
    }

    fn two_table_page() -> PageContent {
        let mut words = Vec::new();
        place(&mut words, 20.0, 60.0, &["CODIGO", "DESCRIPCION", "CANT", "FMT"]);
        place(&mut words, 320.0, 60.0, &["CODIGO", "DESCRIPCION", "CANT", "FMT"]);
        place(&mut words, 20.0, 80.3, &["297243", "POLLO", "ENTERO", "1", "U"]);
        place(&mut words, 320.0, 79.9, &["310500", "ARROZ", "1KG", "12", "B", "24"]);
        PageContent {
            page_number: 1,
            width: 600.0,
            height: 842.0,
            text: String::new(),
            words,
        }
    }

    #[test]
    fn test_two_columns_simple_grammar() {
        let config = ExtractionConfig {
            grammar: Grammar::blue_boxes(),
            ..ExtractionConfig::default()
        };
        let records = extract_records(&two_table_page(), &config);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "297243");
        assert_eq!(records[0].description, "POLLO ENTERO");
        assert_eq!(records[0].quantity, 1);
        assert_eq!(records[0].unit_format, UnitFormat::Unit);
        assert_eq!(records[1].code, "310500");
        assert_eq!(records[1].description, "ARROZ 1KG");
        assert_eq!(records[1].quantity, 12);
        assert_eq!(records[1].unit_format, UnitFormat::Box);
    }

    #[test]
    fn test_rich_grammar_needs_multiplier_per_column() {
        let records = extract_records(&two_table_page(), &ExtractionConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "310500");
    }

    #[test]
    fn test_columns_do_not_share_state() {
        // code on the left, quantity on the right: neither column is a record
        let mut words = Vec::new();
        place(&mut words, 200.0, 50.0, &["297243", "POLLO"]);
        place(&mut words, 310.0, 50.0, &["ENTERO", "1", "U"]);
        let page = PageContent {
            page_number: 1,
            width: 600.0,
            height: 842.0,
            text: String::new(),
            words,
        };
        let config = ExtractionConfig {
            grammar: Grammar::blue_boxes(),
            ..ExtractionConfig::default()
        };
        assert!(extract_records(&page, &config).is_empty());
    }
}
