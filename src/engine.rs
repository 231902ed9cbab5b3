use std::path::Path;

use crate::data::aggregate::{self, AggregateOp};
use crate::data::display::TablePreview;
use crate::data::error::{Result, TableError};
use crate::data::export;
use crate::data::filter::{self, Condition};
use crate::data::loader::{self, LoadOptions};
use crate::data::model::{Row, Table, column_index};
use crate::data::pattern;
use crate::data::sort;

// ---------------------------------------------------------------------------
// Table engine
// ---------------------------------------------------------------------------

/// In-memory table with an untouched original and a working copy.
///
/// Filter and sort replace the working rows wholesale, so successive filters
/// narrow the previous result. [`TableEngine::reset`] goes back to the rows
/// as loaded.
#[derive(Debug, Clone)]
pub struct TableEngine {
    headers: Vec<String>,
    original: Vec<Row>,
    working: Vec<Row>,
    /// Delimiter used for delimited exports.
    delimiter: u8,
    /// Matches from the last palindrome scan.
    palindromes: Vec<String>,
}

impl TableEngine {
    /// Load `path`, folding any reader failure into [`TableError::Load`].
    pub fn open_with(path: &Path, options: &LoadOptions) -> Result<Self> {
        let table = loader::load_file(path, options).map_err(|e| TableError::Load {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;
        Ok(Self::from_table(table, options.delimiter))
    }

    /// Wrap an already parsed table.
    pub fn from_table(table: Table, delimiter: u8) -> Self {
        let Table { headers, rows } = table;
        TableEngine {
            headers,
            working: rows.clone(),
            original: rows,
            delimiter,
            palindromes: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Working rows.
    pub fn rows(&self) -> &[Row] {
        &self.working
    }

    pub fn row_count(&self) -> usize {
        self.working.len()
    }

    pub fn original_row_count(&self) -> usize {
        self.original.len()
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        column_index(&self.headers, column)
    }

    /// Aligned preview of the first `n` working rows.
    pub fn display(&self, n: usize) -> TablePreview {
        TablePreview::render(&self.headers, &self.working, n)
    }

    /// Keep only the working rows whose `column` satisfies `condition`.
    ///
    /// An unknown column leaves the working rows as they were. A numeric
    /// condition against a non-numeric `value` matches nothing.
    pub fn filter(&mut self, column: &str, condition: Condition, value: &str) -> Result<&[Row]> {
        let idx = self.column_index(column)?;
        self.working = filter::filter_rows(&self.working, idx, condition, value);
        Ok(&self.working)
    }

    /// Stable sort of the working rows by `column`.
    pub fn sort(&mut self, column: &str, ascending: bool) -> Result<&[Row]> {
        let idx = self.column_index(column)?;
        let rows = std::mem::take(&mut self.working);
        self.working = sort::sort_rows(rows, idx, ascending);
        Ok(&self.working)
    }

    pub fn aggregate(&self, column: &str, op: AggregateOp) -> Result<f64> {
        let idx = self.column_index(column)?;
        aggregate::aggregate(&self.working, idx, column, op)
    }

    /// How many working cells of `column` read as numbers.
    pub fn numeric_count(&self, column: &str) -> Result<usize> {
        let idx = self.column_index(column)?;
        Ok(aggregate::numeric_values(&self.working, idx).len())
    }

    /// Count restricted palindromes across the working rows. The matches are
    /// kept for [`TableEngine::palindromes`].
    pub fn count_palindromes(&mut self) -> usize {
        self.palindromes = pattern::find_palindromes(&self.working);
        self.palindromes.len()
    }

    /// Matches from the most recent [`TableEngine::count_palindromes`].
    pub fn palindromes(&self) -> &[String] {
        &self.palindromes
    }

    /// Write headers and working rows to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        export::write_file(path, &self.headers, &self.working, self.delimiter).map_err(|e| {
            TableError::Write {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            }
        })
    }

    /// Discard every filter and sort.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }
}
