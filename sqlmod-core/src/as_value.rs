use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{any, borrow::Cow};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It is what lets operation arguments be written as plain Rust literals and results be read back
/// as native types:
/// ```rust
/// use sqlmod_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
///
/// # Error semantics
/// Integer conversions between widths are range checked, a value that does not fit is an error
/// naming both the value and the target type. Nulls only convert into `Option<T>`.
pub trait AsValue {
    /// The typed NULL of this type.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>()
    ))
}

fn range_error<T>(value: impl std::fmt::Display) -> Error {
    Error::msg(format!(
        "Value {value} is out of range for {}",
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean);
impl_as_value!(
    i16,
    Value::Int16,
    Value::Int32(Some(v)) => i16::try_from(v).map_err(|_| range_error::<i16>(v)),
    Value::Int64(Some(v)) => i16::try_from(v).map_err(|_| range_error::<i16>(v)),
);
impl_as_value!(
    i32,
    Value::Int32,
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => i32::try_from(v).map_err(|_| range_error::<i32>(v)),
    Value::Decimal(Some(v)) => {
        if !v.is_integer() {
            return Err(range_error::<i32>(v).context("The value is not an integer"));
        }
        v.to_i32().ok_or_else(|| range_error::<i32>(v))
    },
);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v)) => {
        if !v.is_integer() {
            return Err(range_error::<i64>(v).context("The value is not an integer"));
        }
        v.to_i64().ok_or_else(|| range_error::<i64>(v))
    },
);
impl_as_value!(f32, Value::Float32);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v)) => v.to_f64().ok_or_else(|| range_error::<f64>(v)),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int16(Some(v)) => Ok(v.into()),
    Value::Int32(Some(v)) => Ok(v.into()),
    Value::Int64(Some(v)) => Ok(v.into()),
);
impl_as_value!(String, Value::Varchar);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Uuid, Value::Uuid);

/// Narrower integers are stored in the smallest signed variant that holds them.
macro_rules! impl_as_value_widening {
    ($source:ty, $wide:ty) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                <$wide as AsValue>::as_empty_value()
            }
            fn as_value(self) -> Value {
                <$wide>::from(self).as_value()
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let wide = <i64 as AsValue>::try_from_value(value)?;
                <$source>::try_from(wide).map_err(|_| range_error::<$source>(wide))
            }
        }
    };
}
impl_as_value_widening!(i8, i16);
impl_as_value_widening!(u8, i16);
impl_as_value_widening!(u16, i32);
impl_as_value_widening!(u32, i64);

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        <Box<[u8]>>::try_from_value(value).map(Into::into)
    }
}

impl<'a> AsValue for Cow<'a, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized,
    {
        String::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}
