use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use rust_decimal::Decimal;
use sqlmod_core::{AsValue, Value};
use std::{error::Error, str::FromStr};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

#[derive(Debug)]
pub(crate) struct ValueHolder(pub(crate) Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, None)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        macro_rules! to_value {
            ($ty_var:ident, $raw:ident, $($($ty:path)|+ => ($value:path, $source:ty),)+) => {
                match *$ty_var {
                    $($($ty)|+ => $value(match $raw {
                        Some($raw) => Some(<$source>::from_sql($ty_var, $raw)?.into()),
                        None => None,
                    }),)+
                    _ => {
                        if $raw.is_some() {
                            return Err(sqlmod_core::Error::msg(format!(
                                "Cannot decode sql type `{}`",
                                $ty_var
                            ))
                            .into());
                        }
                        Value::Null
                    }
                }
            };
        }
        let value = to_value!(ty, raw,
            Type::BOOL => (Value::Boolean, bool),
            Type::INT2 => (Value::Int16, i16),
            Type::INT4 => (Value::Int32, i32),
            Type::INT8 => (Value::Int64, i64),
            Type::OID => (Value::Int64, u32),
            Type::FLOAT4 => (Value::Float32, f32),
            Type::FLOAT8 => (Value::Float64, f64),
            Type::NUMERIC => (Value::Decimal, Decimal),
            Type::VARCHAR
            | Type::TEXT
            | Type::NAME
            | Type::BPCHAR
            | Type::UNKNOWN => (Value::Varchar, String),
            Type::BYTEA => (Value::Blob, Vec<u8>),
            Type::DATE => (Value::Date, Date),
            Type::TIME => (Value::Time, Time),
            Type::TIMESTAMP => (Value::Timestamp, PrimitiveDateTime),
            Type::TIMESTAMPTZ => (Value::TimestampWithTimezone, OffsetDateTime),
            Type::UUID => (Value::Uuid, Uuid),
        );
        Ok(ValueHolder(value))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

type BoxError = Box<dyn Error + Sync + Send>;

fn parse_text<T: FromStr>(text: &str, ty: &Type) -> Result<T, BoxError> {
    text.parse::<T>()
        .map_err(|_| format!("Cannot bind `{text}` to a parameter of type {ty}").into())
}

/// Convert `value` to the variant matching the parameter type `ty`.
///
/// Text is parsed into the parameter type, anything bound to a text parameter is rendered as text,
/// integers and floats are converted when the value fits.
fn coerce(value: Value, ty: &Type) -> Result<Value, BoxError> {
    if let Value::Varchar(Some(text)) = &value {
        let text = text.as_str();
        return Ok(match *ty {
            Type::BOOL => Value::Boolean(Some(match text {
                "t" | "true" | "TRUE" | "1" => true,
                "f" | "false" | "FALSE" | "0" => false,
                _ => return Err(format!("Cannot bind `{text}` to a boolean parameter").into()),
            })),
            Type::INT2 => Value::Int16(Some(parse_text(text, ty)?)),
            Type::INT4 => Value::Int32(Some(parse_text(text, ty)?)),
            Type::INT8 => Value::Int64(Some(parse_text(text, ty)?)),
            Type::FLOAT4 => Value::Float32(Some(parse_text(text, ty)?)),
            Type::FLOAT8 => Value::Float64(Some(parse_text(text, ty)?)),
            Type::NUMERIC => Value::Decimal(Some(parse_text(text, ty)?)),
            Type::UUID => Value::Uuid(Some(parse_text(text, ty)?)),
            Type::DATE => Value::Date(Some(Date::parse(
                text,
                format_description!("[year]-[month]-[day]"),
            )?)),
            Type::TIME => Value::Time(Some(Time::parse(
                text,
                format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]"),
            )?)),
            Type::TIMESTAMP => Value::Timestamp(Some(PrimitiveDateTime::parse(
                text,
                format_description!(
                    "[year]-[month]-[day][first [T][ ]][hour]:[minute]:[second][optional [.[subsecond]]]"
                ),
            )?)),
            Type::TIMESTAMPTZ => {
                Value::TimestampWithTimezone(Some(OffsetDateTime::parse(text, &Rfc3339)?))
            }
            _ => value,
        });
    }
    Ok(match *ty {
        Type::BOOL => Value::Boolean(Some(bool::try_from_value(value)?)),
        Type::INT2 => Value::Int16(Some(i16::try_from_value(value)?)),
        Type::INT4 => Value::Int32(Some(i32::try_from_value(value)?)),
        Type::INT8 => Value::Int64(Some(i64::try_from_value(value)?)),
        Type::FLOAT4 => match value {
            Value::Float64(Some(v)) => Value::Float32(Some(v as f32)),
            value => Value::Float32(Some(f32::try_from_value(value)?)),
        },
        Type::FLOAT8 => Value::Float64(Some(f64::try_from_value(value)?)),
        Type::NUMERIC => match value {
            Value::Float32(Some(v)) => Value::Decimal(Some(Decimal::try_from(v)?)),
            Value::Float64(Some(v)) => Value::Decimal(Some(Decimal::try_from(v)?)),
            value => Value::Decimal(Some(Decimal::try_from_value(value)?)),
        },
        Type::VARCHAR | Type::TEXT | Type::NAME | Type::BPCHAR | Type::UNKNOWN => {
            Value::Varchar(value.as_text()?)
        }
        _ => value,
    })
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        if self.0.is_null() {
            return Ok(IsNull::Yes);
        }
        match coerce(self.0.clone(), ty)? {
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Int16(v) => v.to_sql(ty, out),
            Value::Int32(v) => v.to_sql(ty, out),
            Value::Int64(v) => v.to_sql(ty, out),
            Value::Float32(v) => v.to_sql(ty, out),
            Value::Float64(v) => v.to_sql(ty, out),
            Value::Decimal(v) => v.to_sql(ty, out),
            Value::Varchar(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_deref().to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
            Value::Time(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}
