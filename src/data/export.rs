use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value as JsonValue};

use super::loader::FileFormat;
use super::model::Row;

/// Write `headers` and `rows` to `path`, choosing the layout from the
/// extension the same way the loader does. Existing files are replaced.
///
/// Rows shorter than the header are padded with empty cells.
pub fn write_file(path: &Path, headers: &[String], rows: &[Row], delimiter: u8) -> Result<()> {
    let format = FileFormat::from_path(path, delimiter);
    log::debug!("Writing {} rows to {} as {format:?}", rows.len(), path.display());

    match format {
        FileFormat::Delimited(delimiter) => write_delimited(path, headers, rows, delimiter)?,
        FileFormat::Json => write_json(path, headers, rows)?,
        FileFormat::Parquet => write_parquet(path, headers, rows)?,
    }

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn padded<'a>(row: &'a Row, width: usize) -> impl Iterator<Item = &'a str> {
    (0..width).map(move |i| row.get(i).map(String::as_str).unwrap_or(""))
}

fn write_delimited(path: &Path, headers: &[String], rows: &[Row], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("creating output file")?;

    writer.write_record(headers).context("writing header row")?;
    for (row_no, row) in rows.iter().enumerate() {
        writer
            .write_record(padded(row, headers.len()))
            .with_context(|| format!("writing record {}", row_no + 1))?;
    }
    writer.flush().context("flushing output file")?;
    Ok(())
}

/// Records-oriented JSON with every value as a string.
///
/// Object keys must be unique, so a repeated header name is refused.
fn write_json(path: &Path, headers: &[String], rows: &[Row]) -> Result<()> {
    for (idx, header) in headers.iter().enumerate() {
        if headers[..idx].contains(header) {
            bail!("duplicate column '{header}' cannot be written as JSON");
        }
    }

    let records: Vec<JsonValue> = rows
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = headers
                .iter()
                .cloned()
                .zip(padded(row, headers.len()).map(|v| JsonValue::String(v.to_string())))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();

    let file = File::create(path).context("creating output file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records).context("serialising JSON")?;
    writer.flush().context("flushing output file")?;
    Ok(())
}

/// One Utf8 column per header.
fn write_parquet(path: &Path, headers: &[String], rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        headers
            .iter()
            .map(|h| Field::new(h, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = (0..headers.len())
        .map(|i| {
            let values = rows.iter().map(|row| row.get(i).map(String::as_str).unwrap_or(""));
            Arc::new(StringArray::from_iter_values(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet record batch")?;
    writer.close().context("finishing parquet file")?;
    Ok(())
}
