//! In-memory tabular data: named columns with declared semantic types.
//!
//! A [`Frame`] is what the ingestion layer hands to the forecasting core.
//! Columns are homogeneous and carry per-row missing values as `None`;
//! row and column identity never change after construction.

mod classify;

pub use classify::{classify, ColumnClassification};

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Floating-point numeric values.
    Numeric,
    /// Free text. Raw ingestion frequently leaves dates in this state.
    Text,
    /// Resolved UTC timestamps.
    Date,
}

/// Column storage, one variant per semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<DateTime<Utc>>>),
}

impl ColumnData {
    /// Number of rows, including missing ones.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The declared semantic type of this storage.
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Numeric(_) => DataType::Numeric,
            ColumnData::Text(_) => DataType::Text,
            ColumnData::Date(_) => DataType::Date,
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Create a text column.
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Create a date column from already-resolved timestamps.
    pub fn date(name: impl Into<String>, values: Vec<Option<DateTime<Utc>>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Date(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An ordered collection of equally sized, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Create a frame, validating that all columns share one row count and
    /// that no column name repeats.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for col in &columns {
                if col.len() != rows {
                    return Err(ForecastError::DimensionMismatch {
                        expected: rows,
                        got: col.len(),
                    });
                }
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == col.name()) {
                return Err(ForecastError::InvalidParameter(format!(
                    "duplicate column name: {}",
                    col.name()
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows (0 for a frame without columns).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn frame_constructs_with_mixed_columns() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let frame = Frame::new(vec![
            Column::date("day", vec![Some(ts), None]),
            Column::numeric("sales", vec![Some(1.0), Some(2.0)]),
            Column::text("region", vec![Some("north".to_string()), None]),
        ])
        .unwrap();

        assert_eq!(frame.num_rows(), 2);
        assert_eq!(frame.num_columns(), 3);
        assert_eq!(frame.column("sales").unwrap().data_type(), DataType::Numeric);
        assert_eq!(frame.column("day").unwrap().data_type(), DataType::Date);
        assert_eq!(frame.column("region").unwrap().data_type(), DataType::Text);
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn frame_rejects_ragged_columns() {
        let result = Frame::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::numeric("b", vec![Some(1.0)]),
        ]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn frame_rejects_duplicate_names() {
        let result = Frame::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::text("a", vec![None]),
        ]);
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn empty_frame_has_zero_rows() {
        let frame = Frame::default();
        assert_eq!(frame.num_rows(), 0);
        assert_eq!(frame.num_columns(), 0);
    }
}
