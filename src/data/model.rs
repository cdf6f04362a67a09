use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

/// Date columns hold text in this form until a filter reinterprets them.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Cell – a single value in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common tabular dtypes.
/// Rows are deduplicated and grouped through `HashSet` / `BTreeMap`
/// downstream, so `Cell` must be `Ord` and `Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDate),
    Null,
}

// -- Manual Eq/Ord so Cell can be a BTreeMap key --

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Cell::*;
        fn discriminant(v: &Cell) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Timestamp(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::String(s) => s.hash(state),
            Cell::Integer(i) => i.hash(state),
            Cell::Float(f) => f.to_bits().hash(state),
            Cell::Bool(b) => b.hash(state),
            Cell::Timestamp(d) => d.hash(state),
            Cell::Null => {}
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Timestamp(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// The declared type this cell belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Cell::String(_) => ColumnType::String,
            Cell::Integer(_) => ColumnType::Integer,
            Cell::Float(_) => ColumnType::Float,
            Cell::Bool(_) => ColumnType::Boolean,
            Cell::Timestamp(_) => ColumnType::Timestamp,
            Cell::Null => ColumnType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Serialized CSV field. Whole floats keep a decimal point so they
    /// reload as floats; nulls become the empty field.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
            Cell::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – fixed per-column type discovered at load time
// ---------------------------------------------------------------------------

/// The homogeneous type of a column. `Null` marks a column with no
/// non-absent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Null,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Column – one named, typed sequence of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, values: Vec<Cell>) -> Self {
        Column {
            name: name.into(),
            ty,
            values,
        }
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_null()).count()
    }
}

// ---------------------------------------------------------------------------
// TabularDataset – the complete in-memory table
// ---------------------------------------------------------------------------

/// A rectangular table: ordered, uniquely named columns sharing one row
/// count. Rows are addressed by position; order is insertion order from
/// the source file unless an aggregation regroups them.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl TabularDataset {
    /// Build a dataset, checking the structural invariants: unique column
    /// names and equal per-column lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, |c| c.values.len());

        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(Error::Validation(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
            if col.values.len() != row_count {
                return Err(Error::Validation(format!(
                    "column '{}' has {} values, expected {row_count}",
                    col.name,
                    col.values.len()
                )));
            }
        }

        Ok(TabularDataset { columns, row_count })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Declared type of a column, or `None` if the name is unknown.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column(name).map(|c| c.ty)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The cells of one row, in column order.
    pub fn row(&self, index: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// New dataset containing the given rows (by position, in the given
    /// order), with column names and types carried over.
    pub(crate) fn select_rows(&self, indices: &[usize]) -> TabularDataset {
        let columns = self
            .columns
            .iter()
            .map(|col| Column {
                name: col.name.clone(),
                ty: col.ty,
                values: indices.iter().map(|&i| col.values[i].clone()).collect(),
            })
            .collect();
        TabularDataset {
            columns,
            row_count: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn cell_ordering_is_total() {
        let mut cells = vec![
            Cell::String("b".to_owned()),
            Cell::Null,
            Cell::Float(1.5),
            Cell::Integer(3),
            Cell::Timestamp(day(2)),
            Cell::Bool(true),
        ];
        cells.sort();
        assert_eq!(cells[0], Cell::Null);
        assert_eq!(cells[5], Cell::Timestamp(day(2)));
    }

    #[test]
    fn float_cells_hash_consistently() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Cell::Float(1.5));
        assert!(set.contains(&Cell::Float(1.5)));
        assert!(!set.contains(&Cell::Float(2.5)));
    }

    #[test]
    fn to_field_keeps_type_markers() {
        assert_eq!(Cell::Float(100.0).to_field(), "100.0");
        assert_eq!(Cell::Float(1.25).to_field(), "1.25");
        assert_eq!(Cell::Integer(100).to_field(), "100");
        assert_eq!(Cell::Null.to_field(), "");
        assert_eq!(Cell::Timestamp(day(5)).to_field(), "2024-01-05");
    }

    #[test]
    fn from_columns_rejects_duplicate_names() {
        let cols = vec![
            Column::new("id", ColumnType::Integer, vec![Cell::Integer(1)]),
            Column::new("id", ColumnType::Integer, vec![Cell::Integer(2)]),
        ];
        assert!(matches!(
            TabularDataset::from_columns(cols),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let cols = vec![
            Column::new("id", ColumnType::Integer, vec![Cell::Integer(1)]),
            Column::new("name", ColumnType::String, vec![]),
        ];
        assert!(matches!(
            TabularDataset::from_columns(cols),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn select_rows_preserves_order_and_types() {
        let ds = TabularDataset::from_columns(vec![Column::new(
            "id",
            ColumnType::Integer,
            vec![Cell::Integer(1), Cell::Integer(2), Cell::Integer(3)],
        )])
        .unwrap();
        let picked = ds.select_rows(&[2, 0]);
        assert_eq!(picked.row_count(), 2);
        assert_eq!(picked.column_type("id"), Some(ColumnType::Integer));
        assert_eq!(*picked.row(0)[0], Cell::Integer(3));
        assert_eq!(*picked.row(1)[0], Cell::Integer(1));
    }
}
