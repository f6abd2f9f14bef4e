use crate::aggregate::LabelTotals;
use crate::error::AlbaranError;
use rusqlite::{params, Connection};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Label (label TEXT PRIMARY KEY);
CREATE TABLE IF NOT EXISTS Code (code TEXT PRIMARY KEY);
CREATE TABLE IF NOT EXISTS Description (description TEXT PRIMARY KEY);
CREATE TABLE IF NOT EXISTS Line (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL,
    code TEXT NOT NULL,
    description TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    shortage INTEGER DEFAULT 0
);
";

/// Replace the contents of the database at `path` with one label's totals.
///
/// Tables are created if absent. The clear and the inserts run in a single
/// transaction: on failure the previous contents stay in place.
pub fn write_label_db(path: &Path, totals: &LabelTotals) -> Result<(), AlbaranError> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM Line", [])?;
    tx.execute("DELETE FROM Label", [])?;
    tx.execute("DELETE FROM Code", [])?;
    tx.execute("DELETE FROM Description", [])?;

    tx.execute("INSERT INTO Label (label) VALUES (?1)", params![totals.label])?;
    {
        let mut insert_code = tx.prepare("INSERT OR IGNORE INTO Code (code) VALUES (?1)")?;
        let mut insert_description =
            tx.prepare("INSERT OR IGNORE INTO Description (description) VALUES (?1)")?;
        let mut insert_line = tx.prepare(
            "INSERT INTO Line (label, code, description, quantity, shortage) VALUES (?1, ?2, ?3, ?4, 0)",
        )?;

        for line in &totals.lines {
            // SQLite integers are signed 64-bit
            let quantity = i64::try_from(line.quantity).unwrap_or(i64::MAX);
            insert_code.execute(params![line.code])?;
            insert_description.execute(params![line.description])?;
            insert_line.execute(params![totals.label, line.code, line.description, quantity])?;
        }
    }
    tx.commit()?;

    tracing::info!(
        db = %path.display(),
        label = %totals.label,
        products = totals.product_count(),
        "database written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregatedLine;

    fn totals(label: &str, lines: &[(&str, &str, u64)]) -> LabelTotals {
        LabelTotals {
            label: label.into(),
            lines: lines
                .iter()
                .map(|(c, d, q)| AggregatedLine {
                    code: c.to_string(),
                    description: d.to_string(),
                    quantity: *q,
                })
                .collect(),
        }
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_writes_schema_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        write_label_db(
            &path,
            &totals(
                "84210057731",
                &[
                    ("297243", "POLLO ENTERO", 4),
                    ("310500", "ARROZ 1KG", 12),
                    ("310501", "ARROZ 1KG", 1),
                ],
            ),
        )
        .unwrap();

        let conn = Connection::open(&path).unwrap();
        assert_eq!(count(&conn, "Label"), 1);
        assert_eq!(count(&conn, "Code"), 3);
        assert_eq!(count(&conn, "Description"), 2);
        assert_eq!(count(&conn, "Line"), 3);

        let (qty, shortage): (i64, i64) = conn
            .query_row(
                "SELECT quantity, shortage FROM Line WHERE code = '297243'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(qty, 4);
        assert_eq!(shortage, 0);
    }

    #[test]
    fn test_rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        write_label_db(&path, &totals("OLD", &[("111", "A", 1), ("222", "B", 2)])).unwrap();
        write_label_db(&path, &totals("NEW", &[("333", "C", 3)])).unwrap();

        let conn = Connection::open(&path).unwrap();
        assert_eq!(count(&conn, "Line"), 1);
        let label: String = conn
            .query_row("SELECT label FROM Label", [], |r| r.get(0))
            .unwrap();
        assert_eq!(label, "NEW");
    }

    #[test]
    fn test_empty_totals_keep_label_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        write_label_db(&path, &totals("14196_0-610268", &[])).unwrap();

        let conn = Connection::open(&path).unwrap();
        assert_eq!(count(&conn, "Label"), 1);
        assert_eq!(count(&conn, "Line"), 0);
    }

    #[test]
    fn test_failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.db");
        write_label_db(&path, &totals("OLD", &[("111", "A", 1)])).unwrap();

        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_new BEFORE INSERT ON Line
                 WHEN NEW.label = 'NEW'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();
        }

        let result = write_label_db(&path, &totals("NEW", &[("333", "C", 3), ("444", "D", 4)]));
        assert!(matches!(result, Err(AlbaranError::Database(_))));

        let conn = Connection::open(&path).unwrap();
        let label: String = conn
            .query_row("SELECT label FROM Label", [], |r| r.get(0))
            .unwrap();
        assert_eq!(label, "OLD");
        assert_eq!(count(&conn, "Line"), 1);
        assert_eq!(count(&conn, "Code"), 1);
    }
}
