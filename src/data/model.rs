use super::error::{Result, TableError};

// ---------------------------------------------------------------------------
// Row – one record of the source file
// ---------------------------------------------------------------------------

/// A single record. Cells are kept as text exactly as read; missing values
/// are empty strings. A row may be shorter than the header list.
pub type Row = Vec<String>;

/// Best-effort numeric reading of a cell.
///
/// Surrounding whitespace is ignored. Empty text and `NaN` are not numbers.
pub fn coerce(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// The cell at `idx`, or `None` when it is absent or empty.
pub fn present_cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(String::as_str).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Table – headers plus rows, as produced by the loaders
// ---------------------------------------------------------------------------

/// A parsed table: ordered column names and the records beneath them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// Records, each at most `headers.len()` cells long.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Table { headers, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Resolve a column name against a header list.
pub fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
}
