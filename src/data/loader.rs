use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::columns::index_to_label;
use super::model::{CellValue, Sheet, Workbook};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a workbook from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – a SheetJS-style workbook dump (`SheetNames` + `Sheets`)
/// * `.csv`     – a single sheet; CSV line *n* is sheet row *n*
/// * `.parquet` – a single sheet; field names form the header row
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn sheet_name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

/// `"A1:<last column><last row>"`, or `None` for an empty grid.
fn full_range_ref(columns: usize, rows: usize) -> Option<String> {
    if columns == 0 || rows == 0 {
        return None;
    }
    let last = u32::try_from(columns).ok()?;
    Some(format!("A1:{}{rows}", index_to_label(last)))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (what `XLSX.read` produces, serialised):
///
/// ```json
/// {
///   "SheetNames": ["OE_ExSum_Tags_Transitions"],
///   "Sheets": {
///     "OE_ExSum_Tags_Transitions": {
///       "!ref": "A1:CC40",
///       "A1": { "t": "s", "v": "Include" },
///       "B2": { "t": "n", "v": 2016 }
///     }
///   }
/// }
/// ```
///
/// Cells may also be given as bare values (`"B2": 2016`).
fn load_json(path: &Path) -> Result<Workbook> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    workbook_from_json(&root)
}

/// Build a [`Workbook`] from an already parsed SheetJS-style dump.
pub fn workbook_from_json(root: &JsonValue) -> Result<Workbook> {
    let sheets = root
        .get("Sheets")
        .and_then(|s| s.as_object())
        .context("Expected a 'Sheets' object")?;

    let names: Vec<String> = match root.get("SheetNames") {
        Some(JsonValue::Array(names)) => names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                n.as_str()
                    .map(str::to_string)
                    .with_context(|| format!("SheetNames[{i}] is not a string"))
            })
            .collect::<Result<_>>()?,
        Some(_) => bail!("'SheetNames' must be an array"),
        None => sheets.keys().cloned().collect(),
    };

    let mut workbook = Workbook::default();
    for name in names {
        let obj = sheets
            .get(&name)
            .and_then(|s| s.as_object())
            .with_context(|| format!("Sheet '{name}' is missing or not an object"))?;

        let mut sheet = Sheet::new(obj.get("!ref").and_then(|r| r.as_str()).map(str::to_string));
        for (address, cell) in obj {
            if address.starts_with('!') {
                continue;
            }
            let raw = match cell {
                JsonValue::Object(fields) => fields.get("v").unwrap_or(&JsonValue::Null),
                bare => bare,
            };
            sheet.cells.insert(address.clone(), json_to_cell(raw));
        }
        workbook.push_sheet(name, sheet);
    }
    Ok(workbook)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: the raw sheet export, header line included.
/// Line *n* becomes sheet row *n*, field *i* becomes column `index_to_label(i)`.
fn load_csv(path: &Path) -> Result<Workbook> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut sheet = Sheet::default();
    let mut rows = 0usize;
    let mut columns = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_idx + 1))?;
        let row = u32::try_from(row_idx + 1).context("CSV has too many rows")?;
        rows = row_idx + 1;
        columns = columns.max(record.len());

        for (col_idx, field) in record.iter().enumerate() {
            let value = guess_cell_type(field);
            if value.is_empty() {
                continue;
            }
            let col = u32::try_from(col_idx + 1).context("CSV has too many columns")?;
            sheet.set_cell(&index_to_label(col), row, value);
        }
    }
    sheet.range_ref = full_range_ref(columns, rows);

    let mut workbook = Workbook::default();
    workbook.push_sheet(sheet_name_from_path(path), sheet);
    Ok(workbook)
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }
    match s.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the sheet.
///
/// Field names become the header row (row 1) in schema order; record rows
/// follow from row 2.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Workbook> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let mut sheet = Sheet::default();
    let header_labels: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let label = column_label(i)?;
            sheet.set_cell(&label, 1, CellValue::Text(field.name().clone()));
            Ok(label)
        })
        .collect::<Result<_>>()?;

    let reader = builder.build().context("building parquet reader")?;
    let mut next_row: u32 = 2;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            for (col_idx, label) in header_labels.iter().enumerate() {
                let value = extract_cell_value(batch.column(col_idx), row);
                if !value.is_empty() {
                    sheet.set_cell(label, next_row, value);
                }
            }
            next_row += 1;
        }
    }

    let rows = usize::try_from(next_row - 1).context("row count overflow")?;
    sheet.range_ref = full_range_ref(header_labels.len(), rows);

    let mut workbook = Workbook::default();
    workbook.push_sheet(sheet_name_from_path(path), sheet);
    Ok(workbook)
}

fn column_label(idx: usize) -> Result<String> {
    let index = u32::try_from(idx + 1).context("too many columns")?;
    Ok(index_to_label(index))
}

/// Extract a single cell value from an Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Number(f64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => {
            CellValue::Number(f64::from(col.as_primitive::<Float32Type>().value(row)))
        }
        DataType::Float64 => CellValue::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => array_value_to_string(col.as_ref(), row)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Empty),
    }
}
