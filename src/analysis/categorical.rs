//! Categorical Aggregation
//! Frequency tables for the satisfaction and challenge columns.

use polars::prelude::*;
use serde::Serialize;

use super::AnalysisError;

/// One (value, count) pair of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u32,
}

/// Outcome of counting one categorical column.
///
/// Consumers match on the three states instead of probing the table for the
/// column themselves; a missing column is not the same as an empty count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSummary {
    /// Column present, at least one counted value, descending by count.
    Counts(Vec<ValueCount>),
    /// Column present but every cell was null, or the table has no rows.
    Empty,
    /// Column absent from the loaded table.
    MissingColumn,
}

impl ColumnSummary {
    /// The counted rows: `None` when the column was missing, an empty slice
    /// when it was present with nothing to count.
    pub fn rows(&self) -> Option<&[ValueCount]> {
        match self {
            ColumnSummary::Counts(rows) => Some(rows),
            ColumnSummary::Empty => Some(&[]),
            ColumnSummary::MissingColumn => None,
        }
    }
}

/// Count occurrences of each distinct value in `column`.
///
/// Null cells are skipped. The result is sorted descending by count with a
/// stable sort, so tied values keep first-encountered order.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<ColumnSummary, AnalysisError> {
    let Ok(column) = df.column(column) else {
        return Ok(ColumnSummary::MissingColumn);
    };

    let cells = column.cast(&DataType::String)?;
    let cells = cells.str()?;

    let mut rows: Vec<ValueCount> = Vec::new();
    for cell in cells {
        let Some(value) = cell else { continue };
        match rows.iter_mut().find(|row| row.value == value) {
            Some(row) => row.count += 1,
            None => rows.push(ValueCount {
                value: value.to_string(),
                count: 1,
            }),
        }
    }

    if rows.is_empty() {
        return Ok(ColumnSummary::Empty);
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(ColumnSummary::Counts(rows))
}
