use std::fmt;
use std::str::FromStr;

use super::error::{Result, TableError};
use super::model::{Row, coerce, present_cell};

/// Reductions available over a numeric column.
///
/// Text verbs are turned into an operation through [`FromStr`], which is where
/// an unknown verb fails with [`TableError::InvalidOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Mean,
    Min,
    Max,
}

impl FromStr for AggregateOp {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateOp::Sum),
            "mean" | "avg" | "average" => Ok(AggregateOp::Mean),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            _ => Err(TableError::InvalidOperation(s.to_string())),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Mean => "mean",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        };
        f.write_str(name)
    }
}

/// Every cell of the column that reads as a number, in row order.
pub fn numeric_values(rows: &[Row], col_idx: usize) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| present_cell(row, col_idx).and_then(coerce))
        .collect()
}

/// Reduce the numeric cells of a column. Non-numeric and missing cells are
/// ignored; `column` only names the column in the error.
pub fn aggregate(rows: &[Row], col_idx: usize, column: &str, op: AggregateOp) -> Result<f64> {
    let values = numeric_values(rows, col_idx);
    if values.is_empty() {
        return Err(TableError::NoNumericData(column.to_string()));
    }

    let sum = || values.iter().sum::<f64>();
    Ok(match op {
        AggregateOp::Sum => sum(),
        AggregateOp::Mean => sum() / values.len() as f64,
        AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
