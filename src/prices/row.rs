use std::num::{ParseFloatError, ParseIntError};

use chrono::{DateTime, Utc};
use csv::StringRecord;
use thiserror::Error;

use crate::prices::{PriceField, PricePoint};

/// Failure to turn a CSV record into a [`PricePoint`]. `row` is the 0-based
/// record index in the file, the header being record 0.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("row {row}: missing {field} field")]
    MissingField { row: usize, field: PriceField },

    #[error("row {row}: invalid timestamp {value:?}")]
    InvalidTimestamp {
        row: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("row {row}: timestamp {seconds} is out of range")]
    TimestampOutOfRange { row: usize, seconds: i64 },

    #[error("row {row}: invalid {field} value {value:?}")]
    InvalidNumber {
        row: usize,
        field: PriceField,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("row {row}: {field} value {value:?} is not finite")]
    NonFiniteNumber {
        row: usize,
        field: PriceField,
        value: String,
    },
}

pub fn parse_row(row: usize, record: &StringRecord) -> Result<PricePoint, RowError> {
    Ok(PricePoint {
        time: parse_timestamp(row, record)?,
        close: parse_number(row, record, PriceField::Close)?,
        high: parse_number(row, record, PriceField::High)?,
        low: parse_number(row, record, PriceField::Low)?,
        open: parse_number(row, record, PriceField::Open)?,
        volume: parse_number(row, record, PriceField::Volume)?,
    })
}

fn get_field(row: usize, record: &StringRecord, field: PriceField) -> Result<&str, RowError> {
    record
        .get(field.index())
        .ok_or(RowError::MissingField { row, field })
}

fn parse_timestamp(row: usize, record: &StringRecord) -> Result<DateTime<Utc>, RowError> {
    let value = get_field(row, record, PriceField::Timestamp)?;

    let seconds: i64 = value.parse().map_err(|source| RowError::InvalidTimestamp {
        row,
        value: value.to_owned(),
        source,
    })?;

    DateTime::from_timestamp(seconds, 0).ok_or(RowError::TimestampOutOfRange { row, seconds })
}

fn parse_number(row: usize, record: &StringRecord, field: PriceField) -> Result<f64, RowError> {
    let value = get_field(row, record, field)?;

    let number: f64 = value.parse().map_err(|source| RowError::InvalidNumber {
        row,
        field,
        value: value.to_owned(),
        source,
    })?;

    if !number.is_finite() {
        return Err(RowError::NonFiniteNumber {
            row,
            field,
            value: value.to_owned(),
        });
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_columns_to_fields() {
        let record = StringRecord::from(vec!["1700000000", "100.5", "110.2", "90.1", "95.0", "1200"]);

        let point = parse_row(1, &record).unwrap();

        assert_eq!(point.time.timestamp(), 1_700_000_000);
        assert_eq!(point.close, 100.5);
        assert_eq!(point.high, 110.2);
        assert_eq!(point.low, 90.1);
        assert_eq!(point.open, 95.0);
        assert_eq!(point.volume, 1200.0);
    }

    #[test]
    fn ignores_trailing_columns() {
        let record = StringRecord::from(vec!["0", "1", "2", "3", "4", "5", "extra"]);

        let point = parse_row(3, &record).unwrap();

        assert_eq!(point.time.timestamp(), 0);
        assert_eq!(point.volume, 5.0);
    }

    #[test]
    fn rejects_non_numeric_timestamp() {
        let record = StringRecord::from(vec!["abc", "1", "2", "3", "4", "5"]);

        let err = parse_row(2, &record).unwrap_err();

        assert!(matches!(err, RowError::InvalidTimestamp { row: 2, ref value, .. } if value == "abc"));
    }

    #[test]
    fn rejects_fractional_timestamp() {
        let record = StringRecord::from(vec!["1700000000.5", "1", "2", "3", "4", "5"]);

        let err = parse_row(1, &record).unwrap_err();

        assert!(matches!(err, RowError::InvalidTimestamp { .. }));
    }

    #[test]
    fn accepts_timestamp_before_epoch() {
        let record = StringRecord::from(vec!["-86400", "1", "2", "3", "4", "5"]);

        let point = parse_row(1, &record).unwrap();

        assert_eq!(point.time.timestamp(), -86_400);
    }

    #[test]
    fn rejects_timestamp_outside_calendar_range() {
        let seconds = i64::MAX.to_string();
        let record = StringRecord::from(vec![seconds.as_str(), "1", "2", "3", "4", "5"]);

        let err = parse_row(1, &record).unwrap_err();

        assert!(matches!(
            err,
            RowError::TimestampOutOfRange { row: 1, seconds: i64::MAX }
        ));
    }

    #[test]
    fn reports_which_number_is_invalid() {
        let record = StringRecord::from(vec!["1700000000", "1", "2", "low", "4", "5"]);

        let err = parse_row(4, &record).unwrap_err();

        assert!(matches!(
            err,
            RowError::InvalidNumber { row: 4, field: PriceField::Low, .. }
        ));
        assert_eq!(err.to_string(), "row 4: invalid Low value \"low\"");
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for value in ["NaN", "inf", "1e400"] {
            let record = StringRecord::from(vec!["1700000000", "1", "2", "3", "4", value]);

            let err = parse_row(1, &record).unwrap_err();

            assert!(
                matches!(err, RowError::NonFiniteNumber { field: PriceField::Volume, .. }),
                "{value}: {err}"
            );
        }
    }

    #[test]
    fn rejects_short_rows() {
        let record = StringRecord::from(vec!["1700000000", "1", "2", "3", "4"]);

        let err = parse_row(7, &record).unwrap_err();

        assert!(matches!(
            err,
            RowError::MissingField { row: 7, field: PriceField::Volume }
        ));
    }
}
