//! Schema-level column classification.

use std::collections::BTreeSet;

use super::{DataType, Frame};

/// Read-only partition of a frame's columns by declared type.
///
/// Every column lands in exactly one of `numeric` / `categorical` and may
/// independently appear in `date_candidates`. Text columns count as date
/// candidates because raw ingestion frequently leaves dates as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub numeric: BTreeSet<String>,
    pub categorical: BTreeSet<String>,
    pub date_candidates: BTreeSet<String>,
}

impl ColumnClassification {
    /// Whether forecasting has any date axis to offer at all.
    pub fn has_date_candidates(&self) -> bool {
        !self.date_candidates.is_empty()
    }
}

/// Classify a frame's columns by their declared types.
///
/// Pure function of the schema; values are never inspected.
pub fn classify(frame: &Frame) -> ColumnClassification {
    let mut result = ColumnClassification::default();
    for col in frame.columns() {
        let name = col.name().to_string();
        match col.data_type() {
            DataType::Numeric => {
                result.numeric.insert(name);
            }
            DataType::Text => {
                result.categorical.insert(name.clone());
                result.date_candidates.insert(name);
            }
            DataType::Date => {
                result.categorical.insert(name.clone());
                result.date_candidates.insert(name);
            }
        }
    }
    result
}
