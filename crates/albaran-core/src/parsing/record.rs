use crate::model::{ParsedRecord, UnitFormat};
use crate::parsing::grammar::Grammar;
use crate::parsing::normalize::{clean_tokens, is_numeric};

/// Clean a raw column and try to recognize one record in it.
pub fn parse_column<S: AsRef<str>>(raw: &[S], grammar: &Grammar) -> Option<ParsedRecord> {
    parse_record(&clean_tokens(raw), grammar)
}

/// Recognize `CODE DESCRIPTION... QTY FORMAT [UNITS]` in a normalized column.
///
/// The code is the first numeric token of valid length. The quantity is the
/// numeric token before the leftmost `U`/`B` marker found after the code;
/// with `require_units_multiplier` the marker must also be followed by a
/// numeric token. Everything in between is the description.
///
/// Returns None for header, total and blank lines, or when the description
/// comes out empty (a number in a non-data line mistaken for a code).
pub fn parse_record(tokens: &[String], grammar: &Grammar) -> Option<ParsedRecord> {
    let code_idx = tokens.iter().position(|t| grammar.is_code(t))?;
    let code = &tokens[code_idx];

    let mut body = &tokens[code_idx + 1..];
    if body.first() == Some(code) {
        body = &body[1..];
    }

    // marker at i >= 1 so the quantity is never the code itself
    let fmt_idx = (1..body.len()).find(|&i| {
        UnitFormat::from_marker(&body[i]).is_some()
            && is_numeric(&body[i - 1])
            && (!grammar.require_units_multiplier
                || body.get(i + 1).is_some_and(|t| is_numeric(t)))
    })?;

    let unit_format = UnitFormat::from_marker(&body[fmt_idx])?;
    let quantity: u64 = body[fmt_idx - 1].parse().ok()?;
    let description = body[..fmt_idx - 1].join(" ").trim().to_string();
    if description.is_empty() {
        return None;
    }

    Some(ParsedRecord {
        code: code.clone(),
        description,
        quantity,
        unit_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, description: &str, quantity: u64, unit_format: UnitFormat) -> ParsedRecord {
        ParsedRecord {
            code: code.into(),
            description: description.into(),
            quantity,
            unit_format,
        }
    }

    #[test]
    fn test_simple_grammar_unit_line() {
        let r = parse_column(&["297243", "POLLO", "ENTERO", "1", "U"], &Grammar::blue_boxes());
        assert_eq!(r, Some(rec("297243", "POLLO ENTERO", 1, UnitFormat::Unit)));
    }

    #[test]
    fn test_rich_grammar_box_line() {
        let r = parse_column(
            &["310500", "ARROZ", "1KG", "12", "B", "24"],
            &Grammar::packing_list(),
        );
        assert_eq!(r, Some(rec("310500", "ARROZ 1KG", 12, UnitFormat::Box)));
    }

    #[test]
    fn test_rich_grammar_requires_multiplier() {
        let r = parse_column(&["297243", "POLLO", "1", "U"], &Grammar::packing_list());
        assert_eq!(r, None);
    }

    #[test]
    fn test_rich_grammar_skips_bare_quantity() {
        // "2 U" has no multiplier, the real quantity comes later
        let r = parse_column(
            &["400100", "PACK", "2", "U", "ZUMO", "6", "B", "4"],
            &Grammar::packing_list(),
        );
        assert_eq!(r, Some(rec("400100", "PACK 2 U ZUMO", 6, UnitFormat::Box)));
    }

    #[test]
    fn test_duplicate_code_suppressed() {
        let g = Grammar::blue_boxes();
        let with_dup: Vec<String> = ["297243", "297243", "POLLO", "1", "U"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let without: Vec<String> = ["297243", "POLLO", "1", "U"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(parse_record(&with_dup, &g), parse_record(&without, &g));
        assert!(parse_record(&with_dup, &g).is_some());
    }

    #[test]
    fn test_no_code_no_record() {
        let g = Grammar::blue_boxes();
        assert_eq!(parse_column(&["TOTAL", "BULTOS", "12", "U"], &g), None);
        assert_eq!(parse_column::<&str>(&[], &g), None);
    }

    #[test]
    fn test_empty_description_rejected() {
        let g = Grammar::blue_boxes();
        assert_eq!(parse_column(&["2026", "5", "U"], &g), None);
    }

    #[test]
    fn test_description_with_digits() {
        let r = parse_column(
            &["123456", "AGUA", "6", "X", "1.5L", "3", "B"],
            &Grammar::blue_boxes(),
        );
        assert_eq!(r, Some(rec("123456", "AGUA 6 X 1.5L", 3, UnitFormat::Box)));
    }

    #[test]
    fn test_leader_dots_and_noise() {
        let r = parse_column(
            &["Ref", "....", "297243", "POLLO", ".....", "ENTERO", "4", "U", "kg"],
            &Grammar::blue_boxes(),
        );
        assert_eq!(r, Some(rec("297243", "POLLO ENTERO", 4, UnitFormat::Unit)));
    }

    #[test]
    fn test_short_number_not_a_code() {
        let r = parse_column(&["12", "POLLO", "1", "U"], &Grammar::blue_boxes());
        assert_eq!(r, None);
    }

    #[test]
    fn test_lowercase_marker_ignored() {
        let r = parse_column(&["297243", "POLLO", "1", "u"], &Grammar::blue_boxes());
        assert_eq!(r, None);
    }
}
