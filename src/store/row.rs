use serde_json::{Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::RankingRow;

/// Convert a SQLite row into a JSON object, keeping column order.
///
/// Values are converted by their runtime storage class, not the declared
/// column type:
///
/// | SQLite  | JSON              |
/// |---------|-------------------|
/// | NULL    | `null`            |
/// | INTEGER | number            |
/// | REAL    | number (NaN → `null`) |
/// | TEXT    | string            |
/// | BLOB    | lowercase hex string |
pub fn row_to_json(row: &SqliteRow) -> Result<RankingRow, sqlx::Error> {
    let mut object = RankingRow::with_capacity(row.len());

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_info = raw.type_info();
            match type_info.name() {
                "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" => Number::from_f64(row.try_get_unchecked::<f64, _>(index)?)
                    .map_or(Value::Null, Value::Number),
                "BLOB" => Value::String(hex::encode(
                    row.try_get_unchecked::<Vec<u8>, _>(index)?,
                )),
                _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
            }
        };

        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}
