use crate::extraction::WordToken;
use std::collections::BTreeMap;

/// Words judged to lie on the same visual line, sorted left to right.
#[derive(Debug, Clone)]
pub struct LineGroup<'a> {
    /// Quantized vertical position, in multiples of the tolerance.
    pub bucket: i64,
    pub words: Vec<&'a WordToken>,
}

/// The two per-line token sequences of a two-table page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTokens {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Bucket word tokens into lines by quantized `y0`, top to bottom.
///
/// Buckets are `round(y0 / tol_y)` with ties going to the even bucket, so
/// jitter below half the tolerance lands on the same line.
pub fn group_lines(words: &[WordToken], tol_y: f64) -> Vec<LineGroup<'_>> {
    let mut buckets: BTreeMap<i64, Vec<&WordToken>> = BTreeMap::new();
    for word in words {
        let bucket = (word.y0 / tol_y).round_ties_even() as i64;
        buckets.entry(bucket).or_default().push(word);
    }

    buckets
        .into_iter()
        .map(|(bucket, mut words)| {
            // stable: words sharing an x0 keep extraction order
            words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            LineGroup { bucket, words }
        })
        .collect()
}

/// Horizontal position separating the left and right tables of a page.
pub fn split_point(page_width: f64) -> f64 {
    page_width / 2.0
}

impl LineGroup<'_> {
    /// Split the line at `split_x`. A word starting exactly at the split goes right.
    pub fn split_columns(&self, split_x: f64) -> ColumnTokens {
        let mut columns = ColumnTokens::default();
        for word in &self.words {
            if word.x0 < split_x {
                columns.left.push(word.text.clone());
            } else {
                columns.right.push(word.text.clone());
            }
        }
        columns
    }

    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
