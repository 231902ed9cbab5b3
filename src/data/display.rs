use std::fmt;

use super::model::Row;

/// Rendered head of a table: an aligned grid plus how much of the table it
/// covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePreview {
    lines: Vec<String>,
    /// Rows included in the grid.
    pub shown: usize,
    /// Rows in the table.
    pub total: usize,
}

impl TablePreview {
    /// Lay out `headers` and the first `n` of `rows`.
    ///
    /// Column widths take every row into account, not only the ones shown,
    /// so consecutive previews of the same table line up.
    pub fn render(headers: &[String], rows: &[Row], n: usize) -> Self {
        let widths = column_widths(headers, rows);

        let header_line = join_cells(headers.iter().map(String::as_str), &widths);
        let rule = "-".repeat(header_line.chars().count());

        let shown = n.min(rows.len());
        let mut lines = Vec::with_capacity(shown + 2);
        lines.push(header_line);
        lines.push(rule);
        for row in &rows[..shown] {
            let cells = (0..headers.len()).map(|i| row.get(i).map(String::as_str).unwrap_or(""));
            lines.push(join_cells(cells, &widths));
        }

        TablePreview {
            lines,
            shown,
            total: rows.len(),
        }
    }
}

impl fmt::Display for TablePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "\nShowing {} of {} rows", self.shown, self.total)
    }
}

/// Per column: the longest of the header and every cell beneath it.
fn column_widths(headers: &[String], rows: &[Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn aligns_columns_to_widest_cell() {
        let headers = strings(&["Id", "Product"]);
        let rows = vec![strings(&["1", "Apple"]), strings(&["100", "ANNA"])];

        let preview = TablePreview::render(&headers, &rows, 5);
        assert_eq!(
            preview.lines,
            &[
                "Id  | Product",
                "-------------",
                "1   | Apple  ",
                "100 | ANNA   ",
            ]
        );
        assert_eq!((preview.shown, preview.total), (2, 2));
    }

    #[test]
    fn widths_account_for_rows_not_shown() {
        let headers = strings(&["A"]);
        let rows = vec![strings(&["x"]), strings(&["wider"])];

        let preview = TablePreview::render(&headers, &rows, 1);
        assert_eq!(preview.lines, &["A    ", "-----", "x    "]);
        assert!(preview.to_string().ends_with("Showing 1 of 2 rows"));
    }

    #[test]
    fn short_rows_render_blank_cells() {
        let headers = strings(&["a", "b"]);
        let rows = vec![strings(&["1"])];

        let preview = TablePreview::render(&headers, &rows, 10);
        assert_eq!(preview.lines[2], "1 |  ");
    }

    #[test]
    fn oversized_request_shows_everything() {
        let headers = strings(&["a"]);
        let rows = vec![strings(&["1"]), strings(&["2"])];

        let preview = TablePreview::render(&headers, &rows, 1000);
        assert_eq!(preview.shown, 2);
        assert_eq!(preview.lines.len(), 4);
    }
}
