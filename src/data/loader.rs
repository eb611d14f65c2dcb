use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchRecord, LaunchTable, Outcome, RawLaunchRow};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const CLASS_COLUMN: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, BOOSTER_COLUMN, CLASS_COLUMN];

/// Typed failures raised while reading a launch file. Wrapped in
/// `anyhow::Error` with file/row context by the loaders below.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("invalid outcome value '{0}', expected 0 or 1")]
    InvalidOutcome(String),
    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four launch columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same column names, numeric or string typed
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches across {} sites from {}",
        table.len(),
        table.sites().len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse launch records from any CSV source. Extra columns are ignored.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV header")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record =
            LaunchRecord::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0", "class": 0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawLaunchRow> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| LaunchRecord::try_from(raw).with_context(|| format!("JSON row {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// String columns may be Utf8 or LargeUtf8; payload and class may be any
/// numeric type (class may also be Boolean). Everything is cast through
/// arrow's cast kernel before reading.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, row_offset, &mut records)?;
        row_offset += batch.num_rows();
    }

    Ok(LaunchTable::from_records(records))
}

/// Append the launches in one record batch to `out`.
fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column_as(batch, SITE_COLUMN, &DataType::Utf8)?;
    let payloads = column_as(batch, PAYLOAD_COLUMN, &DataType::Float64)?;
    let boosters = column_as(batch, BOOSTER_COLUMN, &DataType::Utf8)?;
    let classes = column_as(batch, CLASS_COLUMN, &DataType::Float64)?;

    let sites = sites.as_string::<i32>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let boosters = boosters.as_string::<i32>();
    let classes = classes.as_primitive::<Float64Type>();

    for row in 0..batch.num_rows() {
        let abs_row = row_offset + row;
        for (name, col) in [
            (SITE_COLUMN, sites as &dyn Array),
            (PAYLOAD_COLUMN, payloads as &dyn Array),
            (BOOSTER_COLUMN, boosters as &dyn Array),
            (CLASS_COLUMN, classes as &dyn Array),
        ] {
            if col.is_null(row) {
                return Err(LoadError::NullValue {
                    column: name.to_string(),
                    row: abs_row,
                }
                .into());
            }
        }

        let outcome = Outcome::from_class(classes.value(row))
            .with_context(|| format!("Parquet row {abs_row}"))?;
        out.push(LaunchRecord::new(
            sites.value(row),
            payloads.value(row),
            boosters.value(row),
            outcome,
        ));
    }
    Ok(())
}

/// Look up a column by name and cast it to `target`.
fn column_as(batch: &RecordBatch, name: &str, target: &DataType) -> Result<Arc<dyn Array>> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    cast(col.as_ref(), target).with_context(|| format!("column '{name}' is not convertible to {target}"))
}
