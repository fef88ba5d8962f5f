use crate::Result;
use rust_decimal::Decimal;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

/// Dynamically typed value used for operation arguments and result rows.
///
/// Every variant carries an `Option` so that a typed NULL (for example a `Varchar(None)` column)
/// can be told apart from an untyped [`Value::Null`]. Both count as null.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    /// Textual form of the value, `None` for nulls.
    ///
    /// Temporal values use ISO 8601 (`2025-01-31`, `13:45:00`, `2025-01-31 13:45:00`, RFC 3339 with
    /// offset), blobs use the `\x` hex escape format.
    pub fn as_text(&self) -> Result<Option<String>> {
        Ok(Some(match self {
            Value::Boolean(Some(v)) => v.to_string(),
            Value::Int16(Some(v)) => v.to_string(),
            Value::Int32(Some(v)) => v.to_string(),
            Value::Int64(Some(v)) => v.to_string(),
            Value::Float32(Some(v)) => v.to_string(),
            Value::Float64(Some(v)) => v.to_string(),
            Value::Decimal(Some(v)) => v.to_string(),
            Value::Varchar(Some(v)) => v.clone(),
            Value::Blob(Some(v)) => format!("\\x{}", hex::encode(v)),
            Value::Date(Some(v)) => v.format(format_description!("[year]-[month]-[day]"))?,
            Value::Time(Some(v)) => {
                if v.nanosecond() == 0 {
                    v.format(format_description!("[hour]:[minute]:[second]"))?
                } else {
                    v.format(format_description!("[hour]:[minute]:[second].[subsecond]"))?
                }
            }
            Value::Timestamp(Some(v)) => {
                if v.nanosecond() == 0 {
                    v.format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second]"
                    ))?
                } else {
                    v.format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"
                    ))?
                }
            }
            Value::TimestampWithTimezone(Some(v)) => v.format(&Rfc3339)?,
            Value::Uuid(Some(v)) => v.to_string(),
            _ => return Ok(None),
        }))
    }

    /// JSON form of the value.
    ///
    /// Integers and finite floats become JSON numbers, booleans become JSON booleans, nulls (and
    /// non finite floats) become `null`, everything else is the JSON string of [`Value::as_text`].
    /// Decimals are written as strings to keep their precision.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        use serde_json::Value as Json;
        Ok(match self {
            Value::Boolean(Some(v)) => Json::Bool(*v),
            Value::Int16(Some(v)) => Json::from(*v),
            Value::Int32(Some(v)) => Json::from(*v),
            Value::Int64(Some(v)) => Json::from(*v),
            Value::Float32(Some(v)) => serde_json::Number::from_f64(*v as f64)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Float64(Some(v)) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            _ => match self.as_text()? {
                Some(v) => Json::String(v),
                None => Json::Null,
            },
        })
    }
}
