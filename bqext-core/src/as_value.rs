use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{any, borrow::Cow};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// This is the type check behind row decoding: a column value is only ever
/// copied into a field through [`AsValue::try_from_value`].
///
/// # Conversion contract
/// - The canonical variant of the type is always accepted (`Value::Int64`
///   for `i64`, `Value::String` for `String` and so on).
/// - Integers narrower than `i64` accept `Value::Int64` after a range check,
///   and an integral `Value::Numeric` that fits. `u64` takes a non-negative
///   `Value::Int64` and falls back to `Value::Numeric` past `i64::MAX`.
/// - Nothing is parsed out of strings and floating point values never turn
///   into integers (or the other way around).
/// - A NULL is accepted only by `Option<T>`, which maps any NULL to `None`.
///
/// # Examples
/// ```rust
/// use bqext_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int64(Some(42))));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// assert!(i32::try_from_value(Value::String(Some("42".into()))).is_err());
/// ```
pub trait AsValue {
    /// The typed NULL of this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    /// Type checked conversion from a dynamic [`Value`].
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::String(Some(value.into()))
    }
}

fn null_error<T>() -> Error {
    Error::msg(format!(
        "Cannot store NULL into {}, declare the field as Option<{}> to accept it",
        any::type_name::<T>(),
        any::type_name::<T>(),
    ))
}

fn mismatch_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {} value {} to {}",
        value.type_name(),
        value,
        any::type_name::<T>(),
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
                    ref v if v.is_null() => Err(null_error::<Self>()),
                    ref v => Err(mismatch_error::<Self>(v)),
                }
            }
        }
    };
}

macro_rules! impl_as_value_integer {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_empty_value() -> Value {
                    Value::Int64(None)
                }
                fn as_value(self) -> Value {
                    Value::Int64(Some(self as i64))
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Int64(Some(v)) => <$source>::try_from(v).map_err(|_| {
                            Error::msg(format!(
                                "Value {v}: INT64 is out of range for {}",
                                any::type_name::<Self>(),
                            ))
                        }),
                        Value::Numeric(Some(v)) => {
                            let error = Error::msg(format!(
                                "Value {v}: NUMERIC does not fit into {}",
                                any::type_name::<Self>(),
                            ));
                            if !v.is_integer() {
                                return Err(error.context("The value is not a integer"));
                            }
                            v.to_i64()
                                .and_then(|v| <$source>::try_from(v).ok())
                                .ok_or(error)
                        }
                        ref v if v.is_null() => Err(null_error::<Self>()),
                        ref v => Err(mismatch_error::<Self>(v)),
                    }
                }
            }
        )+
    };
}

impl_as_value_integer!(i8, i16, i32, i64, u8, u16, u32);

impl AsValue for u64 {
    fn as_empty_value() -> Value {
        Value::Int64(None)
    }
    fn as_value(self) -> Value {
        // Past i64::MAX only NUMERIC holds it
        match i64::try_from(self) {
            Ok(v) => Value::Int64(Some(v)),
            Err(..) => Value::Numeric(Some(Decimal::from(self))),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int64(Some(v)) => u64::try_from(v).map_err(|_| {
                Error::msg(format!("Value {v}: INT64 is negative, cannot store it into u64"))
            }),
            Value::Numeric(Some(v)) => {
                let error = Error::msg(format!("Value {v}: NUMERIC does not fit into u64"));
                if !v.is_integer() {
                    return Err(error.context("The value is not a integer"));
                }
                v.to_u64().ok_or(error)
            }
            ref v if v.is_null() => Err(null_error::<Self>()),
            ref v => Err(mismatch_error::<Self>(v)),
        }
    }
}

impl_as_value!(bool, Value::Boolean);
impl_as_value!(f64, Value::Float64);

impl AsValue for f32 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self as f64))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => {
                let result = v as f32;
                if result as f64 != v && !v.is_nan() {
                    return Err(Error::msg(format!(
                        "Value {v}: FLOAT64 does not fit into f32 without losing precision"
                    )));
                }
                Ok(result)
            }
            ref v if v.is_null() => Err(null_error::<Self>()),
            ref v => Err(mismatch_error::<Self>(v)),
        }
    }
}

impl_as_value!(
    Decimal,
    Value::Numeric,
    Value::Int64(Some(v)) => Ok(Decimal::from(v)),
);
impl_as_value!(String, Value::String);
impl_as_value!(Box<[u8]>, Value::Bytes);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::DateTime);
impl_as_value!(OffsetDateTime, Value::Timestamp);

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Bytes(None)
    }
    fn as_value(self) -> Value {
        Value::Bytes(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        <Box<[u8]> as AsValue>::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Cow<'static, str> {
    fn as_empty_value() -> Value {
        Value::String(None)
    }
    fn as_value(self) -> Value {
        Value::String(Some(self.into_owned()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Cow::Owned)
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
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        T::try_from_value(value).map(Box::new)
    }
}
