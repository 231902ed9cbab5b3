use std::fmt;
use std::str::FromStr;

use super::error::{Result, TableError};
use super::model::{Row, coerce, present_cell};

// ---------------------------------------------------------------------------
// Filter condition
// ---------------------------------------------------------------------------

/// How a cell is compared against the filter value.
///
/// Parsing a token through [`FromStr`] rejects unknown ones with
/// [`TableError::InvalidCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Numeric `cell > value`.
    GreaterThan,
    /// Numeric `cell < value`.
    LessThan,
    /// Exact textual match.
    Equals,
    /// Case-insensitive substring match.
    Contains,
}

impl FromStr for Condition {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            ">" | "gt" => Ok(Condition::GreaterThan),
            "<" | "lt" => Ok(Condition::LessThan),
            "==" | "=" | "eq" => Ok(Condition::Equals),
            "contains" => Ok(Condition::Contains),
            _ => Err(TableError::InvalidCondition(s.to_string())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Condition::GreaterThan => ">",
            Condition::LessThan => "<",
            Condition::Equals => "==",
            Condition::Contains => "contains",
        };
        f.write_str(symbol)
    }
}

impl Condition {
    /// Whether this condition compares numbers rather than text.
    pub fn is_numeric(self) -> bool {
        matches!(self, Condition::GreaterThan | Condition::LessThan)
    }
}

// ---------------------------------------------------------------------------
// Predicate evaluation
// ---------------------------------------------------------------------------

/// A condition bound to its comparison value, ready to test cells.
///
/// A numeric threshold that does not read as a number is `None` and matches
/// no cell.
enum Predicate {
    Greater(Option<f64>),
    Less(Option<f64>),
    Equals(String),
    Contains(String),
}

impl Predicate {
    fn new(condition: Condition, value: &str) -> Self {
        match condition {
            Condition::GreaterThan => Predicate::Greater(coerce(value)),
            Condition::LessThan => Predicate::Less(coerce(value)),
            Condition::Equals => Predicate::Equals(value.to_string()),
            Condition::Contains => Predicate::Contains(value.to_lowercase()),
        }
    }

    fn matches(&self, cell: &str) -> bool {
        match self {
            Predicate::Greater(v) => v.zip(coerce(cell)).is_some_and(|(v, c)| c > v),
            Predicate::Less(v) => v.zip(coerce(cell)).is_some_and(|(v, c)| c < v),
            Predicate::Equals(v) => cell == v.as_str(),
            Predicate::Contains(needle) => cell.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Return the rows whose cell at `col_idx` satisfies `condition` against
/// `value`, in input order.
///
/// A row is dropped (never an error) when:
/// * the cell is absent or empty
/// * the condition is numeric and the cell does not read as a number
/// * the condition is numeric and `value` does not read as a number
pub fn filter_rows(rows: &[Row], col_idx: usize, condition: Condition, value: &str) -> Vec<Row> {
    let predicate = Predicate::new(condition, value);

    rows.iter()
        .filter(|row| present_cell(row, col_idx).is_some_and(|cell| predicate.matches(cell)))
        .cloned()
        .collect()
}
