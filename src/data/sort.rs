use std::cmp::Ordering;

use super::model::{Row, coerce, present_cell};

// ---------------------------------------------------------------------------
// SortKey – how one cell orders against another
// ---------------------------------------------------------------------------

/// Ordering key for a present cell.
///
/// Columns may mix numbers and text. Every number orders before every piece
/// of text; numbers compare numerically, text compares byte-wise (so ISO
/// dates come out chronological).
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Key for the cell at `idx`; `None` for an absent or empty cell.
    pub fn for_cell(row: &[String], idx: usize) -> Option<Self> {
        present_cell(row, idx).map(|cell| match coerce(cell) {
            Some(v) => SortKey::Number(v),
            None => SortKey::Text(cell.to_string()),
        })
    }
}

// -- Manual Eq/Ord so the mixed column has one total order --

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Order two optional keys. Missing keys go last in either direction.
fn compare(a: &Option<SortKey>, b: &Option<SortKey>, ascending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) if ascending => a.cmp(b),
        (Some(a), Some(b)) => b.cmp(a),
    }
}

/// Stable sort of `rows` by the column at `col_idx`.
///
/// Rows whose keys compare equal keep their input order, ascending or not.
pub fn sort_rows(rows: Vec<Row>, col_idx: usize, ascending: bool) -> Vec<Row> {
    let mut keyed: Vec<(Option<SortKey>, Row)> = rows
        .into_iter()
        .map(|row| (SortKey::for_cell(&row, col_idx), row))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare(a, b, ascending));

    keyed.into_iter().map(|(_, row)| row).collect()
}
