use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Dynamically typed scalar produced by the query service.
///
/// Every typed variant carries an `Option`, `None` being a NULL of that
/// column type. `Value::Null` is a NULL with no known type.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int64(Option<i64>),
    Float64(Option<f64>),
    Numeric(Option<Decimal>),
    String(Option<String>),
    Bytes(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    DateTime(Option<PrimitiveDateTime>),
    Timestamp(Option<OffsetDateTime>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Numeric(l), Self::Numeric(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            (Self::Bytes(l), Self::Bytes(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::DateTime(l), Self::DateTime(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// True for `Value::Null` and for any typed NULL.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Numeric(v) => v.is_none(),
            Value::String(v) => v.is_none(),
            Value::Bytes(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::DateTime(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    /// Name of the column type, as the query service spells it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "BOOL",
            Value::Int64(..) => "INT64",
            Value::Float64(..) => "FLOAT64",
            Value::Numeric(..) => "NUMERIC",
            Value::String(..) => "STRING",
            Value::Bytes(..) => "BYTES",
            Value::Date(..) => "DATE",
            Value::Time(..) => "TIME",
            Value::DateTime(..) => "DATETIME",
            Value::Timestamp(..) => "TIMESTAMP",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "NULL");
        }
        match self {
            Value::Boolean(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::Float64(Some(v)) => write!(f, "{v}"),
            Value::Numeric(Some(v)) => write!(f, "{v}"),
            Value::String(Some(v)) => write!(f, "{v:?}"),
            Value::Bytes(Some(v)) => write!(f, "{} bytes", v.len()),
            Value::Date(Some(v)) => write!(f, "{v}"),
            Value::Time(Some(v)) => write!(f, "{v}"),
            Value::DateTime(Some(v)) => write!(f, "{v}"),
            Value::Timestamp(Some(v)) => write!(f, "{v}"),
            _ => write!(f, "NULL"),
        }
    }
}
