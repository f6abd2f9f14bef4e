use albaran_core::batch::DocumentOutcome;
use albaran_core::route::Placement;
use albaran_core::DocumentExtraction;
use std::fmt::Write;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One summary block per document, in batch order.
pub fn format_outcomes(outcomes: &[DocumentOutcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Converted(doc) => {
                let copied = if doc.placement == Placement::Copied {
                    "  (copied, original kept)"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "OK    {}  ->  Store_{}/{}{}",
                    file_name(&doc.pdf_path),
                    doc.store_code,
                    doc.date,
                    copied
                );
                for db in &doc.databases {
                    let _ = writeln!(
                        out,
                        "      {}  ({} products, {} units)",
                        file_name(&db.path),
                        db.products,
                        db.total_quantity
                    );
                }
            }
            DocumentOutcome::Failed { source, reason } => {
                let _ = writeln!(out, "SKIP  {}: {}", file_name(source), reason);
            }
        }
    }

    out
}

/// Header, then one table of aggregated lines per label.
pub fn format_extraction(doc: &DocumentExtraction) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Profile:         {}", doc.profile);
    let _ = writeln!(out, "Store:           {}", doc.header.store_code);
    let _ = writeln!(out, "Date:            {}", doc.header.date);
    let _ = writeln!(out, "Document number: {}", doc.header.document_number);
    let _ = writeln!(out, "Pages:           {}", doc.page_count);

    for unit in &doc.labels {
        let _ = writeln!(
            out,
            "\n=== {} ({} products, {} units) ===\n",
            unit.label,
            unit.product_count(),
            unit.total_quantity()
        );

        if unit.lines.is_empty() {
            let _ = writeln!(out, "  (no lines recognized)");
            continue;
        }

        let code_width = unit.lines.iter().map(|l| l.code.len()).max().unwrap_or(6);
        let desc_width = unit
            .lines
            .iter()
            .map(|l| l.description.chars().count())
            .max()
            .unwrap_or(11)
            .max("Description".len());

        let _ = writeln!(
            out,
            "  {:<cw$}  {:<dw$}  {:>8}",
            "Code",
            "Description",
            "Quantity",
            cw = code_width.max(4),
            dw = desc_width
        );
        let _ = writeln!(out, "  {}", "-".repeat(code_width.max(4) + desc_width + 12));
        for line in &unit.lines {
            let _ = writeln!(
                out,
                "  {:<cw$}  {:<dw$}  {:>8}",
                line.code,
                line.description,
                line.quantity,
                cw = code_width.max(4),
                dw = desc_width
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use albaran_core::aggregate::{AggregatedLine, LabelTotals};
    use albaran_core::batch::{ConvertedDocument, WrittenDatabase};
    use albaran_core::model::DocumentHeader;
    use std::path::PathBuf;

    fn header() -> DocumentHeader {
        serde_json::from_str(
            r#"{"store_code":"14196","date":"2026-01-09","document_number":"0-610268"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_outcomes() {
        let header = header();
        let outcomes = vec![
            DocumentOutcome::Converted(ConvertedDocument {
                source: PathBuf::from("in/a.pdf"),
                store_code: header.store_code.clone(),
                date: header.date,
                document_number: header.document_number.clone(),
                pdf_path: PathBuf::from("out/Store_14196/2026-01-09/pdfs/a.pdf"),
                placement: Placement::Copied,
                databases: vec![WrittenDatabase {
                    path: PathBuf::from("out/x.db"),
                    label: "14196_0-610268".into(),
                    products: 2,
                    total_quantity: 16,
                }],
            }),
            DocumentOutcome::Failed {
                source: PathBuf::from("in/b.pdf"),
                reason: "unsupported report: nope".into(),
            },
        ];

        let text = format_outcomes(&outcomes);
        assert!(text.contains("OK    a.pdf  ->  Store_14196/2026-01-09  (copied, original kept)"));
        assert!(text.contains("x.db  (2 products, 16 units)"));
        assert!(text.contains("SKIP  b.pdf: unsupported report: nope"));
    }

    #[test]
    fn test_format_extraction() {
        let doc = DocumentExtraction {
            profile: "blue-boxes".into(),
            header: header(),
            page_count: 2,
            labels: vec![LabelTotals {
                label: "14196_0-610268".into(),
                lines: vec![AggregatedLine {
                    code: "297243".into(),
                    description: "POLLO ENTERO".into(),
                    quantity: 4,
                }],
            }],
        };

        let text = format_extraction(&doc);
        assert!(text.contains("Store:           14196"));
        assert!(text.contains("=== 14196_0-610268 (1 products, 4 units) ==="));
        assert!(text.contains("297243"));
        assert!(text.contains("POLLO ENTERO"));
    }
}
