//! Series Builder: coerce a (date, target) column pair into a canonical
//! (ds, y) series.
//!
//! Date coercion is best effort per row: an unparseable value becomes a
//! null and its row is dropped, never an error. Only a fully empty result
//! fails. No sorting is imposed; rows keep the frame's native order.

use crate::core::Series;
use crate::error::{ForecastError, Result};
use crate::frame::{Column, ColumnData, Frame};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a single raw text value into a UTC timestamp.
///
/// Tries RFC 3339 first, then a fixed list of common datetime and
/// date-only layouts. Returns `None` when nothing matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Coerce a column's rows to timestamps, null-marking every failure.
///
/// Numeric columns never coerce; offering one as a date axis silently
/// yields all nulls, matching the classifier's date-candidate heuristic.
fn coerce_dates(column: &Column) -> Vec<Option<DateTime<Utc>>> {
    match column.data() {
        ColumnData::Date(values) => values.clone(),
        ColumnData::Text(values) => values
            .iter()
            .map(|v| v.as_deref().and_then(parse_timestamp))
            .collect(),
        ColumnData::Numeric(values) => vec![None; values.len()],
    }
}

/// Build a clean (ds, y) series from a frame and two column selections.
///
/// Rows where either the coerced timestamp or the target value is null are
/// dropped. Fails with `InsufficientData` when nothing survives, since
/// neither downstream model can fit an empty series.
pub fn build_series(frame: &Frame, date_col: &str, target_col: &str) -> Result<Series> {
    let date = frame
        .column(date_col)
        .ok_or_else(|| ForecastError::UnknownColumn(date_col.to_string()))?;
    let target = frame
        .column(target_col)
        .ok_or_else(|| ForecastError::UnknownColumn(target_col.to_string()))?;

    let ColumnData::Numeric(raw_values) = target.data() else {
        return Err(ForecastError::InvalidParameter(format!(
            "target column '{}' is not numeric",
            target_col
        )));
    };

    let coerced = coerce_dates(date);

    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for (ds, y) in coerced.into_iter().zip(raw_values.iter()) {
        if let (Some(ds), Some(y)) = (ds, y) {
            if y.is_finite() {
                timestamps.push(ds);
                values.push(*y);
            }
        }
    }

    if timestamps.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    Series::new(timestamps, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;
    use chrono::TimeZone;

    fn text_col(name: &str, values: &[&str]) -> Column {
        Column::text(name, values.iter().map(|s| Some(s.to_string())).collect())
    }

    #[test]
    fn parse_timestamp_accepts_common_layouts() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05"), Some(midnight));
        assert_eq!(parse_timestamp("2024/03/05"), Some(midnight));
        assert_eq!(parse_timestamp("03/05/2024"), Some(midnight));
        assert_eq!(parse_timestamp(" 2024-03-05 "), Some(midnight));

        let afternoon = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05 14:30:00"), Some(afternoon));
        assert_eq!(parse_timestamp("2024-03-05T14:30:00"), Some(afternoon));
        assert_eq!(parse_timestamp("2024-03-05T14:30:00Z"), Some(afternoon));
    }

    #[test]
    fn parse_timestamp_rejects_non_dates() {
        assert_eq!(parse_timestamp("north"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
        assert_eq!(parse_timestamp("12345"), None);
    }

    #[test]
    fn build_drops_rows_with_unparseable_dates() {
        let frame = Frame::new(vec![
            text_col("day", &["2024-01-01", "junk", "2024-01-03"]),
            Column::numeric("y", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ])
        .unwrap();

        let series = build_series(&frame, "day", "y").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[1.0, 3.0]);
    }

    #[test]
    fn build_drops_rows_with_null_targets() {
        let frame = Frame::new(vec![
            text_col("day", &["2024-01-01", "2024-01-02", "2024-01-03"]),
            Column::numeric("y", vec![Some(1.0), None, Some(f64::NAN)]),
        ])
        .unwrap();

        let series = build_series(&frame, "day", "y").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.values(), &[1.0]);
    }

    #[test]
    fn build_fails_on_fully_unparseable_date_column() {
        let frame = Frame::new(vec![
            text_col("day", &["north", "south", "east"]),
            Column::numeric("y", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ])
        .unwrap();

        assert!(matches!(
            build_series(&frame, "day", "y"),
            Err(ForecastError::InsufficientData { needed: 1, got: 0 })
        ));
    }

    #[test]
    fn numeric_date_axis_coerces_to_nothing() {
        let frame = Frame::new(vec![
            Column::numeric("epoch", vec![Some(1.0), Some(2.0)]),
            Column::numeric("y", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap();

        assert!(matches!(
            build_series(&frame, "epoch", "y"),
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn build_rejects_unknown_columns_and_non_numeric_targets() {
        let frame = Frame::new(vec![
            text_col("day", &["2024-01-01"]),
            Column::numeric("y", vec![Some(1.0)]),
        ])
        .unwrap();

        assert!(matches!(
            build_series(&frame, "missing", "y"),
            Err(ForecastError::UnknownColumn(_))
        ));
        assert!(matches!(
            build_series(&frame, "day", "missing"),
            Err(ForecastError::UnknownColumn(_))
        ));
        assert!(matches!(
            build_series(&frame, "day", "day"),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn build_is_idempotent_on_clean_input() {
        let frame = Frame::new(vec![
            text_col("day", &["2024-01-01", "2024-01-02", "2024-01-03"]),
            Column::numeric("y", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ])
        .unwrap();
        let series = build_series(&frame, "day", "y").unwrap();

        // Round the result back into a frame and rebuild; nothing further
        // should be dropped.
        let rebuilt_frame = Frame::new(vec![
            Column::date("ds", series.timestamps().iter().map(|&t| Some(t)).collect()),
            Column::numeric("y", series.values().iter().map(|&v| Some(v)).collect()),
        ])
        .unwrap();
        let rebuilt = build_series(&rebuilt_frame, "ds", "y").unwrap();

        assert_eq!(rebuilt, series);
    }

    #[test]
    fn build_preserves_frame_row_order() {
        // Out-of-order dates stay out of order; models own sorting policy.
        let frame = Frame::new(vec![
            text_col("day", &["2024-01-03", "2024-01-01", "2024-01-02"]),
            Column::numeric("y", vec![Some(3.0), Some(1.0), Some(2.0)]),
        ])
        .unwrap();

        let series = build_series(&frame, "day", "y").unwrap();
        assert_eq!(series.values(), &[3.0, 1.0, 2.0]);
        assert!(series.timestamps()[0] > series.timestamps()[1]);
    }
}
