use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// On-disk layouts understood by the loader and the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Header line then one record per line, split on the given byte.
    Delimited(u8),
    /// `[{ "col": value, ... }, ...]`
    Json,
    Parquet,
}

impl FileFormat {
    /// Pick a format from the file extension. Anything unrecognised is
    /// treated as delimited text with `delimiter`.
    pub fn from_path(path: &Path, delimiter: u8) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "tsv" | "tab" => FileFormat::Delimited(b'\t'),
            "json" => FileFormat::Json,
            "parquet" | "pq" => FileFormat::Parquet,
            _ => FileFormat::Delimited(delimiter),
        }
    }
}

/// Knobs for reading delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` / other – delimited text with a header row
/// * `.tsv`                  – tab-delimited text
/// * `.json`                 – records array, one object per row
/// * `.parquet` / `.pq`      – any schema; every value is stringified
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Table> {
    let format = FileFormat::from_path(path, options.delimiter);
    log::debug!("Loading {} as {format:?}", path.display());

    let table = match format {
        FileFormat::Delimited(delimiter) => load_delimited(path, delimiter)?,
        FileFormat::Json => load_json(path)?,
        FileFormat::Parquet => load_parquet(path)?,
    };

    if table.headers.is_empty() {
        bail!("file must have a header row with at least one column");
    }

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.headers,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// First record is the header. Later records may be shorter than the header
/// (trailing cells are simply absent) but never wider.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .context("opening delimited file")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("record {}", row_no + 1))?;
        if record.len() > headers.len() {
            bail!(
                "record {}: expected at most {} fields, found {}",
                row_no + 1,
                headers.len(),
                record.len()
            );
        }
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Date": "2025-01-01", "Product": "Apple", "Quantity": 10 },
///   ...
/// ]
/// ```
///
/// Headers are the object keys in first-seen order across all records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let objects: Vec<&Map<String, JsonValue>> = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<_>>()?;

    let mut headers: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Table::new(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of any flat schema. Values are rendered with Arrow's
/// display formatting, nulls become empty cells.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .enumerate()
                .map(|(col_idx, col)| {
                    extract_cell(col, row).with_context(|| {
                        format!("Row {row}: failed to read '{}'", headers[col_idx])
                    })
                })
                .collect::<Result<Row>>()?;
            rows.push(cells);
        }
    }

    Ok(Table::new(headers, rows))
}

fn extract_cell(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    Ok(array_value_to_string(col.as_ref(), row)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "sales.csv",
            "Date,Product,Quantity\n2025-01-01,Apple,10\n2025-01-02,\"Banana, ripe\",5\n",
        );

        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["Date", "Product", "Quantity"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][1], "Banana, ripe");
    }

    #[test]
    fn short_rows_are_kept_short_and_empty_cells_are_blank() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "short.csv", "a,b,c\n1,,3\n4\n");

        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.rows[0], vec!["1", "", "3"]);
        assert_eq!(table.rows[1], vec!["4"]);
    }

    #[test]
    fn wider_record_than_header_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "wide.csv", "a,b\n1,2,3\n");

        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("at most 2 fields"));
    }

    #[test]
    fn empty_file_has_no_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "");

        assert!(load_file(&path, &LoadOptions::default()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        assert!(load_file(&path, &LoadOptions::default()).is_err());
    }

    #[test]
    fn custom_delimiter_and_tsv_extension() {
        let dir = TempDir::new().unwrap();
        let semi = write_file(&dir, "data.txt", "x;y\n1;2\n");
        let tsv = write_file(&dir, "data.tsv", "x\ty\n1\t2\n");

        let table = load_file(&semi, &LoadOptions { delimiter: b';' }).unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);

        let table = load_file(&tsv, &LoadOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn loads_json_records_in_key_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "data.json",
            r#"[
                {"Product": "ADA", "Quantity": 15, "Fresh": true},
                {"Product": null, "Quantity": 1.5, "Note": "late"}
            ]"#,
        );

        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["Product", "Quantity", "Fresh", "Note"]);
        assert_eq!(table.rows[0], vec!["ADA", "15", "true", ""]);
        assert_eq!(table.rows[1], vec!["", "1.5", "", "late"]);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.json", r#"[{"a": 1}, 2]"#);

        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1 is not a JSON object"));
    }

    #[test]
    fn loads_parquet_and_stringifies_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Product", DataType::Utf8, true),
            Field::new("Quantity", DataType::Int64, false),
            Field::new("Price", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("ANNA"), None])),
                Arc::new(Int64Array::from(vec![12, 8])),
                Arc::new(Float64Array::from(vec![0.7, 1.5])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.headers, vec!["Product", "Quantity", "Price"]);
        assert_eq!(table.rows[0], vec!["ANNA", "12", "0.7"]);
        assert_eq!(table.rows[1], vec!["", "8", "1.5"]);
    }
}
