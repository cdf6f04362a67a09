use std::fs::File;
use std::path::Path;

use log::{debug, info};

use super::model::{Cell, Column, ColumnType, TabularDataset};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl TabularDataset {
    /// Load a dataset from a comma-separated UTF-8 file. The first row is
    /// the header naming the columns; every column's type is inferred once
    /// from the full set of its values.
    ///
    /// Fails with [`Error::Io`] when the path cannot be opened and with
    /// [`Error::Parse`] when a row's field count differs from the header's.
    pub fn load(path: &Path) -> Result<TabularDataset> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            raw_rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        let columns = build_columns(&headers, &raw_rows);
        let dataset = TabularDataset::from_columns(columns)?;

        info!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.column_names().len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Serialize the dataset back to the same delimited format, header row
    /// first, rows in their current order. Overwrites any existing file.
    ///
    /// Fails with [`Error::Io`] when the destination cannot be created.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(Error::Io)?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(self.column_names())?;
        for i in 0..self.row_count() {
            writer.write_record(self.row(i).iter().map(|c| c.to_field()))?;
        }
        writer.flush().map_err(Error::Io)?;

        info!("Persisted {} rows to {}", self.row_count(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

/// Infer per-column types from the raw fields, then materialize the cells.
fn build_columns(headers: &[String], raw_rows: &[Vec<String>]) -> Vec<Column> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let fields: Vec<&str> = raw_rows.iter().map(|row| row[idx].as_str()).collect();
            let ty = infer_column_type(&fields);
            let values = fields.iter().map(|f| typed_cell(f, ty)).collect();
            debug!("Column '{name}' inferred as {ty}");
            Column::new(name.clone(), ty, values)
        })
        .collect()
}

/// Unify per-value guesses into one column type. A column mixing integers
/// and floats is float; any other disagreement degrades to string. Empty
/// fields do not participate, and an all-empty column stays `Null`.
fn infer_column_type(fields: &[&str]) -> ColumnType {
    let mut ty: Option<ColumnType> = None;
    for field in fields {
        let guess = guess_field_type(field);
        if guess == ColumnType::Null {
            continue;
        }
        ty = Some(match ty {
            None => guess,
            Some(prev) if prev == guess => prev,
            Some(prev) if prev.is_numeric() && guess.is_numeric() => ColumnType::Float,
            Some(_) => ColumnType::String,
        });
    }
    ty.unwrap_or(ColumnType::Null)
}

fn guess_field_type(s: &str) -> ColumnType {
    if s.is_empty() {
        return ColumnType::Null;
    }
    if s.parse::<i64>().is_ok() {
        return ColumnType::Integer;
    }
    if s.parse::<f64>().is_ok() {
        return ColumnType::Float;
    }
    if s == "true" || s == "false" {
        return ColumnType::Boolean;
    }
    ColumnType::String
}

/// Parse a raw field as a cell of the column's unified type. The numeric
/// parses cannot fail here: inference only settles on integer/float when
/// every non-empty field parses as one.
fn typed_cell(field: &str, ty: ColumnType) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    match ty {
        ColumnType::Integer => field.parse::<i64>().map_or(Cell::Null, Cell::Integer),
        ColumnType::Float => field.parse::<f64>().map_or(Cell::Null, Cell::Float),
        ColumnType::Boolean => Cell::Bool(field == "true"),
        ColumnType::String | ColumnType::Timestamp | ColumnType::Null => {
            Cell::String(field.to_string())
        }
    }
}
