use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::data::aggregate::{self, AggFn};
use crate::data::filter::{reinterpret_as_timestamps, rows_in_date_range};
use crate::data::model::{Cell, ColumnType, TabularDataset};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// DataProcessor – stateful wrapper over one working dataset
// ---------------------------------------------------------------------------

/// Owns one working [`TabularDataset`] for its lifetime and exposes the
/// transformation and query operations over it. Mutating operations
/// replace the working dataset; queries return independent results.
pub struct DataProcessor {
    dataset: TabularDataset,
}

impl DataProcessor {
    pub fn new(dataset: TabularDataset) -> Self {
        DataProcessor { dataset }
    }

    /// Load the working dataset from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(DataProcessor {
            dataset: TabularDataset::load(path)?,
        })
    }

    /// The current working dataset.
    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    /// Remove duplicate rows (full-row equality, first occurrence kept),
    /// then remove rows containing any null cell. Replaces the working
    /// dataset with the result and returns it.
    pub fn clean_data(&mut self) -> &TabularDataset {
        let mut seen: HashSet<Vec<Cell>> = HashSet::new();
        let mut keep = Vec::new();

        for i in 0..self.dataset.row_count() {
            let row: Vec<Cell> = self.dataset.row(i).into_iter().cloned().collect();
            if row.iter().any(Cell::is_null) {
                continue;
            }
            if seen.insert(row) {
                keep.push(i);
            }
        }

        self.dataset = self.dataset.select_rows(&keep);
        info!("After cleaning: {} rows", self.dataset.row_count());
        &self.dataset
    }

    /// Rows whose `column` value falls within `start..=end`, original
    /// order preserved, as a new dataset.
    ///
    /// Parsing the column as `YYYY-MM-DD` dates durably switches its
    /// declared type to timestamp on the working dataset; the filtered
    /// rows themselves are returned separately and the working dataset
    /// keeps all of its rows. The `&mut self` receiver makes that side
    /// effect explicit.
    pub fn filter_by_date(
        &mut self,
        column: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TabularDataset> {
        let col = self
            .dataset
            .column_mut(column)
            .ok_or_else(|| Error::Validation(format!("column '{column}' not found")))?;

        reinterpret_as_timestamps(col)?;
        let indices = rows_in_date_range(col, start, end);

        info!(
            "Filtered '{column}' to {} of {} rows ({start}..={end})",
            indices.len(),
            self.dataset.row_count()
        );
        Ok(self.dataset.select_rows(&indices))
    }

    /// Group-by aggregation over the working dataset. See
    /// [`aggregate::aggregate`] for the contract.
    pub fn aggregate(
        &self,
        group_by: &[String],
        aggregations: &[(String, AggFn)],
    ) -> Result<TabularDataset> {
        let result = aggregate::aggregate(&self.dataset, group_by, aggregations)?;
        info!("Aggregation complete: {} groups", result.row_count());
        Ok(result)
    }

    /// Snapshot of the working dataset: totals plus per-column name,
    /// declared type and null count, in column order.
    pub fn summary(&self) -> Summary {
        Summary {
            total_rows: self.dataset.row_count(),
            total_columns: self.dataset.columns().len(),
            columns: self
                .dataset
                .columns()
                .iter()
                .map(|col| ColumnSummary {
                    name: col.name.clone(),
                    kind: col.ty,
                    nulls: col.null_count(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnType,
    pub nulls: usize,
}

impl Summary {
    /// Ordered column names, as loaded.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
