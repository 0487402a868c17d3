use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::RawRow;

// ---------------------------------------------------------------------------
// Table layout
// ---------------------------------------------------------------------------

/// Which columns of the source table carry the region name and the yearly
/// counts. Columns not named here are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub region_column: String,
    pub years: Vec<i32>,
}

impl TableLayout {
    fn year_headers(&self) -> Vec<(i32, String)> {
        self.years.iter().map(|y| (*y, y.to_string())).collect()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the enrollment table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one region column and one column per year
/// * `.json`    – `[{ "<region column>": "...", "2012": 123, ... }, ...]`
/// * `.parquet` – region column (Utf8) plus numeric year columns
pub fn load_file(path: &Path, layout: &TableLayout) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, layout),
        "json" => load_json(path, layout),
        "parquet" | "pq" => load_parquet(path, layout),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, layout: &TableLayout) -> Result<Vec<RawRow>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader, layout)
}

/// Parse CSV from any reader. Empty cells become missing values.
pub fn read_csv<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    layout: &TableLayout,
) -> Result<Vec<RawRow>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let region_idx = headers
        .iter()
        .position(|h| *h == layout.region_column)
        .with_context(|| format!("CSV missing '{}' column", layout.region_column))?;

    let year_cols = layout
        .year_headers()
        .into_iter()
        .map(|(year, name)| {
            headers
                .iter()
                .position(|h| *h == name)
                .map(|idx| (year, idx))
                .with_context(|| format!("CSV missing '{name}' column"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.context("reading CSV record")?;
        let line = record.position().map_or(0, |p| p.line());

        let region = record.get(region_idx).unwrap_or("").trim();
        if region.is_empty() {
            bail!("CSV line {line}: empty '{}'", layout.region_column);
        }

        let mut row = RawRow::new(region);
        for &(year, idx) in &year_cols {
            let cell = record.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let value = cell
                .parse::<f64>()
                .with_context(|| format!("CSV line {line}, {year}: '{cell}' is not a number"))?;
            row.values.insert(year, value);
        }
        rows.push(row);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Location of residence at the time of admission": "Quebec, origin",
///     "2012": 1520, "2013": 1604, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path, layout: &TableLayout) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, layout)
}

pub fn parse_json(text: &str, layout: &TableLayout) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let region = obj
            .get(&layout.region_column)
            .and_then(JsonValue::as_str)
            .with_context(|| format!("Row {i}: missing or invalid '{}'", layout.region_column))?;

        let mut row = RawRow::new(region.trim());
        for (year, key) in layout.year_headers() {
            match obj.get(&key) {
                None | Some(JsonValue::Null) => {}
                Some(v) => {
                    let value = json_number(v)
                        .with_context(|| format!("Row {i}, {key}: not a number"))?;
                    row.values.insert(year, value);
                }
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Numbers, or strings holding numbers (spreadsheet exports often quote them).
fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the enrollment table.
///
/// Expected schema:
/// - the region column: Utf8 or LargeUtf8
/// - one column per year named `"2012"`, `"2013"`, …: Int32, Int64, Float32
///   or Float64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, layout: &TableLayout) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let region_idx = schema
            .index_of(&layout.region_column)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{}' column", layout.region_column))?;
        let region_col = batch.column(region_idx);

        let year_cols = layout
            .year_headers()
            .into_iter()
            .map(|(year, name)| {
                schema
                    .index_of(&name)
                    .map(|idx| (year, batch.column(idx)))
                    .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
            })
            .collect::<Result<Vec<_>>>()?;

        for row_no in 0..batch.num_rows() {
            let region = extract_string(region_col, row_no)
                .with_context(|| format!("Row {row_no}: failed to read region"))?;
            let mut row = RawRow::new(region);
            for (year, col) in &year_cols {
                if let Some(value) = extract_f64(col, row_no)
                    .with_context(|| format!("Row {row_no}: failed to read {year}"))?
                {
                    row.values.insert(*year, value);
                }
            }
            rows.push(row);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null region name");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).trim().to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).trim().to_string()),
        other => bail!("Expected Utf8 region column, got {other:?}"),
    }
}

/// `Ok(None)` for a null cell, which the normalizer reports as missing.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("expected Int32Array")?;
            f64::from(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("expected Int64Array")?;
            arr.value(row) as f64
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            f64::from(arr.value(row))
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.value(row)
        }
        other => bail!("Expected numeric year column, got {other:?}"),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const REGION: &str = "Location of residence at the time of admission";

    fn layout() -> TableLayout {
        TableLayout {
            region_column: REGION.to_string(),
            years: vec![2020, 2021],
        }
    }

    fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(text.as_bytes())
    }

    #[test]
    fn csv_reads_region_and_year_columns() {
        let text = format!(
            "{REGION},2020,2021,Notes\n\"Quebec, origin\",30,35,x\n\"Alberta, origin\",70,,y\n"
        );
        let rows = read_csv(csv_reader(&text), &layout()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region, "Quebec, origin");
        assert_eq!(rows[0].value(2021), Some(35.0));
        assert_eq!(rows[1].value(2020), Some(70.0));
        assert_eq!(rows[1].value(2021), None);
    }

    #[test]
    fn csv_missing_year_column_names_it() {
        let text = format!("{REGION},2020\nA,1\n");
        let err = read_csv(csv_reader(&text), &layout()).unwrap_err();
        assert!(format!("{err:#}").contains("'2021'"));
    }

    #[test]
    fn csv_missing_region_column_names_it() {
        let err = read_csv(csv_reader("Province,2020,2021\nA,1,2\n"), &layout()).unwrap_err();
        assert!(format!("{err:#}").contains(REGION));
    }

    #[test]
    fn csv_rejects_non_numeric_cells() {
        let text = format!("{REGION},2020,2021\nA,1,n/a\n");
        let err = read_csv(csv_reader(&text), &layout()).unwrap_err();
        assert!(format!("{err:#}").contains("'n/a' is not a number"));
    }

    #[test]
    fn csv_errors_name_the_file_line() {
        let text = format!("{REGION},2020,2021\nA,1,2\nB,x,3\n");
        let err = read_csv(csv_reader(&text), &layout()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3, 2020"));

        let text = format!("{REGION},2020,2021\n,1,2\n");
        let err = read_csv(csv_reader(&text), &layout()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 2: empty"));
    }

    #[test]
    fn json_records_with_nulls_and_quoted_numbers() {
        let text = format!(
            r#"[{{"{REGION}": "A", "2020": 10, "2021": null}},
                {{"{REGION}": "B", "2020": "20.5", "2021": 4}}]"#
        );
        let rows = parse_json(&text, &layout()).unwrap();
        assert_eq!(rows[0].value(2020), Some(10.0));
        assert_eq!(rows[0].value(2021), None);
        assert_eq!(rows[1].value(2020), Some(20.5));
    }

    #[test]
    fn json_requires_array_of_objects() {
        assert!(parse_json("{}", &layout()).is_err());
        assert!(parse_json("[1]", &layout()).is_err());
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{REGION},2020,2021\nA,1,2\nB,3,4\n").unwrap();
        file.flush().unwrap();

        let rows = load_file(file.path(), &layout()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].value(2021), Some(4.0));
    }

    #[test]
    fn parquet_reads_mixed_numeric_columns() {
        use arrow::array::ArrayRef;
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(REGION, DataType::Utf8, false),
            Field::new("2020", DataType::Int64, true),
            Field::new("2021", DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["A", "B"])),
            Arc::new(Int64Array::from(vec![Some(30), Some(70)])),
            Arc::new(Float64Array::from(vec![Some(1.5), None])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = load_file(file.path(), &layout()).unwrap();
        assert_eq!(rows[0].region, "A");
        assert_eq!(rows[1].value(2020), Some(70.0));
        assert_eq!(rows[0].value(2021), Some(1.5));
        assert_eq!(rows[1].value(2021), None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = load_file(file.path(), &layout()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn bundled_table_normalizes() {
        let config = crate::config::ViewerConfig::default();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(&config.data_path);
        let rows = load_file(&path, &config.table_layout()).unwrap();
        let ds = crate::data::model::EnrollmentDataset::from_rows(&rows, &config.years).unwrap();

        assert_eq!(ds.len(), 14);
        assert_eq!(ds.year_extent(), (2012, 2021));
        assert!(ds.regions().contains(&config.default_region));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.csv"), &layout()).is_err());
    }
}
