//! Conversions between plan fields and SQLite column values.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{types::Type, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Serializes a plan field into its JSON column value.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Reads a JSON column.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Fixed-width RFC 3339 form in UTC with nanoseconds, so that text order is
/// chronological.
pub(crate) fn timestamp_text(ts: &Timestamp) -> String {
    ts.strftime("%Y-%m-%dT%H:%M:%S.%NZ").to_string()
}

/// Reads a timestamp column stored in RFC 3339 form.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a text column holding an enum with a string representation.
pub(crate) fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|reason| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, reason)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_text_is_fixed_width() {
        let whole: Timestamp = "2024-01-01T00:00:01Z".parse().expect("valid timestamp");
        let half: Timestamp = "2024-01-01T00:00:01.5Z".parse().expect("valid timestamp");

        assert_eq!(timestamp_text(&whole), "2024-01-01T00:00:01.000000000Z");
        assert_eq!(timestamp_text(&half), "2024-01-01T00:00:01.500000000Z");
        assert!(timestamp_text(&whole) < timestamp_text(&half));
        let parsed: Timestamp = timestamp_text(&half).parse().expect("stored form parses");
        assert_eq!(parsed, half);
    }
}
