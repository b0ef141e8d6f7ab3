use crate::{AsValue, BqError, Error, Result, RowLabeled, Value};
use std::{
    any,
    collections::{BTreeMap, HashMap},
};

/// Decodes a result row into a value of `Self`.
///
/// Implemented by `#[derive(Model)]` for tagged structs and directly for the
/// generic row containers ([`RowLabeled`], `BTreeMap<String, Value>` and
/// `HashMap<String, Value>`), which accept any row as it is.
pub trait FromRow: Sized {
    fn from_row(row: RowLabeled) -> Result<Self>;
}

/// Binding between a struct field and the result column feeding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Rust field identifier.
    pub field: &'static str,
    /// Column label the field is filled from.
    pub column: &'static str,
    /// Declared Rust type of the field.
    pub ty: &'static str,
}

/// A struct whose fields are bound to result columns.
///
/// Derive it with `#[derive(Model)]`:
/// ```rust,ignore
/// #[derive(Model, Default)]
/// struct PartitionRow {
///     #[bq(name = "PartitionID")]
///     partition_id: String,
///     #[bq(skip)]
///     cached: Option<u32>,
/// }
/// ```
/// Fields without a matching column keep their `Default` value and columns
/// without a matching field are ignored.
pub trait Model: FromRow {
    fn columns() -> &'static [ColumnBinding];

    fn column(field: &str) -> Option<&'static ColumnBinding> {
        Self::columns().iter().find(|c| c.field == field)
    }
}

/// Maps a generic row onto a fresh instance of `T`.
pub fn parse_model<T: FromRow>(row: RowLabeled) -> Result<T> {
    T::from_row(row)
}

/// Type checked copy of a column value, used by the generated decoders.
///
/// Any conversion failure is reported as [`BqError::TypeMismatch`].
pub fn decode_column<T: AsValue>(column: &str, value: Value) -> Result<T> {
    let found = value.type_name();
    T::try_from_value(value).map_err(|e| {
        let error = Error::new(BqError::TypeMismatch {
            column: column.to_string(),
            target: any::type_name::<T>(),
            found,
            reason: format!("{e:#}"),
        });
        log::debug!("{:#}", error);
        error
    })
}

impl FromRow for RowLabeled {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row)
    }
}

impl FromRow for BTreeMap<String, Value> {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row
            .labels
            .iter()
            .cloned()
            .zip(row.values.into_vec())
            .collect())
    }
}

impl FromRow for HashMap<String, Value> {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row
            .labels
            .iter()
            .cloned()
            .zip(row.values.into_vec())
            .collect())
    }
}
