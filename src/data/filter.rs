use chrono::NaiveDate;

use super::model::{Cell, Column, ColumnType, DATE_FORMAT};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Timestamp reinterpretation
// ---------------------------------------------------------------------------

/// Reinterpret a column's values as `YYYY-MM-DD` dates in place, durably
/// switching its declared type to `Timestamp`. Null cells stay null; any
/// other unparsable value fails the whole reinterpretation.
pub fn reinterpret_as_timestamps(column: &mut Column) -> Result<()> {
    let mut parsed = Vec::with_capacity(column.values.len());
    for cell in &column.values {
        parsed.push(match cell {
            Cell::Timestamp(d) => Cell::Timestamp(*d),
            Cell::Null => Cell::Null,
            Cell::String(s) => Cell::Timestamp(parse_date(&column.name, s)?),
            other => {
                return Err(Error::Parse(format!(
                    "column '{}': '{other}' is not a {DATE_FORMAT} date",
                    column.name
                )))
            }
        });
    }
    column.values = parsed;
    column.ty = ColumnType::Timestamp;
    Ok(())
}

fn parse_date(column: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        Error::Parse(format!(
            "column '{column}': '{s}' is not a {DATE_FORMAT} date"
        ))
    })
}

// ---------------------------------------------------------------------------
// Range filtering
// ---------------------------------------------------------------------------

/// Indices of rows whose timestamp `v` satisfies `start <= v <= end`,
/// both bounds inclusive, in original row order. Null cells never match.
pub fn rows_in_date_range(column: &Column, start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    column
        .values
        .iter()
        .enumerate()
        .filter(|(_, cell)| match cell {
            Cell::Timestamp(d) => start <= *d && *d <= end,
            _ => false,
        })
        .map(|(i, _)| i)
        .collect()
}
