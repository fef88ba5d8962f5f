use crate::Value;
use std::{slice, sync::Arc, vec};

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names, in the order the backend returned them.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
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
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
    /// Value of the first column.
    pub fn first_value(&self) -> Option<&Value> {
        self.values.first()
    }
    /// Column name and value pairs, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowLabeled {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let (labels, values): (Vec<String>, Vec<Value>) = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(labels.into(), values.into())
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Ordered rows returned by one execution.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ResultSet {
    rows: Vec<RowLabeled>,
}

impl ResultSet {
    pub fn new(rows: Vec<RowLabeled>) -> Self {
        Self { rows }
    }
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn first(&self) -> Option<&RowLabeled> {
        self.rows.first()
    }
    pub fn rows(&self) -> &[RowLabeled] {
        &self.rows
    }
    pub fn iter(&self) -> slice::Iter<'_, RowLabeled> {
        self.rows.iter()
    }
    pub fn into_rows(self) -> Vec<RowLabeled> {
        self.rows
    }
}

impl From<Vec<RowLabeled>> for ResultSet {
    fn from(rows: Vec<RowLabeled>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<RowLabeled> for ResultSet {
    fn from_iter<T: IntoIterator<Item = RowLabeled>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultSet {
    type Item = RowLabeled;
    type IntoIter = vec::IntoIter<RowLabeled>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RowLabeled;
    type IntoIter = slice::Iter<'a, RowLabeled>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
