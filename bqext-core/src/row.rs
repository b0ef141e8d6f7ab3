use crate::Value;
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Value of the column named exactly `name` (case sensitive).
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .and_then(|i| self.values.get(i))
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl<N, V> FromIterator<(N, V)> for RowLabeled
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let (labels, values): (Vec<String>, Vec<Value>) = iter
            .into_iter()
            .map(|(n, v)| (n.into(), v.into()))
            .unzip();
        Self {
            labels: labels.into(),
            values: values.into(),
        }
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}
