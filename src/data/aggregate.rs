use std::collections::BTreeMap;
use std::fmt;

use super::model::{Cell, Column, ColumnType, TabularDataset};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Aggregation functions
// ---------------------------------------------------------------------------

/// One aggregation over a column within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFn {
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl AggFn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Whether the function applies to a column of the given type.
    /// Sum and mean are numeric-only; min/max work on any ordered type
    /// with at least one non-null value; count works everywhere.
    pub fn supports(&self, ty: ColumnType) -> bool {
        match self {
            Self::Sum | Self::Mean => ty.is_numeric(),
            Self::Min | Self::Max => ty != ColumnType::Null,
            Self::Count => true,
        }
    }

    /// The declared type of the aggregated output column.
    fn output_type(&self, input: ColumnType) -> ColumnType {
        match self {
            Self::Sum | Self::Min | Self::Max => input,
            Self::Mean => ColumnType::Float,
            Self::Count => ColumnType::Integer,
        }
    }
}

impl fmt::Display for AggFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Group-by aggregation
// ---------------------------------------------------------------------------

/// Group rows by the distinct tuples of `group_by` values and reduce each
/// remaining column named in `aggregations` with its function.
///
/// The output has one row per distinct group-by tuple: the group-by
/// columns followed by one aggregated column per pair, keeping the source
/// column names. Groups are emitted in ascending tuple order (the
/// grouping map is ordered). Aggregation functions skip null cells.
pub fn aggregate(
    dataset: &TabularDataset,
    group_by: &[String],
    aggregations: &[(String, AggFn)],
) -> Result<TabularDataset> {
    if group_by.is_empty() {
        return Err(Error::Validation(
            "group_by requires at least one column".to_owned(),
        ));
    }
    for name in group_by {
        if dataset.column(name).is_none() {
            return Err(Error::Validation(format!(
                "group-by column '{name}' not found"
            )));
        }
    }
    for (name, func) in aggregations {
        let Some(col) = dataset.column(name) else {
            return Err(Error::Validation(format!(
                "aggregation column '{name}' not found"
            )));
        };
        if !func.supports(col.ty) {
            return Err(Error::Validation(format!(
                "cannot apply {func} to column '{name}' of type {}",
                col.ty
            )));
        }
    }

    // Group tuple -> row indices, in ascending tuple order.
    let key_columns: Vec<&Column> = group_by
        .iter()
        .map(|name| dataset.column(name).expect("validated above"))
        .collect();

    let mut groups: BTreeMap<Vec<Cell>, Vec<usize>> = BTreeMap::new();
    for row in 0..dataset.row_count() {
        let key: Vec<Cell> = key_columns
            .iter()
            .map(|col| col.values[row].clone())
            .collect();
        groups.entry(key).or_default().push(row);
    }

    // Materialize output column-major.
    let mut out_columns: Vec<Column> = Vec::with_capacity(group_by.len() + aggregations.len());
    for (pos, col) in key_columns.iter().enumerate() {
        out_columns.push(Column::new(
            col.name.clone(),
            col.ty,
            groups.keys().map(|key| key[pos].clone()).collect(),
        ));
    }
    for (name, func) in aggregations {
        let col = dataset.column(name).expect("validated above");
        let values = groups
            .values()
            .map(|rows| reduce(col, rows, *func))
            .collect();
        out_columns.push(Column::new(
            col.name.clone(),
            func.output_type(col.ty),
            values,
        ));
    }

    TabularDataset::from_columns(out_columns)
}

/// Reduce one group's cells of a column. Null cells are skipped; a group
/// with no non-null cells sums to zero and is otherwise null.
fn reduce(column: &Column, rows: &[usize], func: AggFn) -> Cell {
    let cells = rows.iter().map(|&i| &column.values[i]);
    let non_null: Vec<&Cell> = cells.filter(|c| !c.is_null()).collect();

    match func {
        AggFn::Count => Cell::Integer(non_null.len() as i64),
        AggFn::Sum => match column.ty {
            ColumnType::Integer => Cell::Integer(
                non_null
                    .iter()
                    .filter_map(|c| match c {
                        Cell::Integer(i) => Some(*i),
                        _ => None,
                    })
                    .sum(),
            ),
            _ => Cell::Float(non_null.iter().filter_map(|c| c.as_f64()).sum()),
        },
        AggFn::Mean => {
            if non_null.is_empty() {
                Cell::Null
            } else {
                let sum: f64 = non_null.iter().filter_map(|c| c.as_f64()).sum();
                Cell::Float(sum / non_null.len() as f64)
            }
        }
        AggFn::Min => non_null.iter().min().map_or(Cell::Null, |c| (*c).clone()),
        AggFn::Max => non_null.iter().max().map_or(Cell::Null, |c| (*c).clone()),
    }
}
