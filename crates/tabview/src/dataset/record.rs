//! Records: ordered field to value mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Value;

/// A column name, unique within a schema.
pub type Field = String;

/// One row of the dataset, keyed by field name in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<Field, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by zipping field names with raw cell text.
    ///
    /// Extra cells are dropped; fields without a cell are [`Value::Empty`].
    pub fn from_cells<S: AsRef<str>>(fields: &[Field], cells: &[S]) -> Self {
        let values = fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = cells.get(i).map(|c| Value::new(c.as_ref())).unwrap_or_default();
                (field.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Set a field's value, keeping its position if it already exists.
    pub fn with(mut self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Value for a field; missing fields read as [`Value::Empty`].
    pub fn get(&self, field: &str) -> &Value {
        static EMPTY: Value = Value::Empty;
        self.values.get(field).unwrap_or(&EMPTY)
    }

    /// String form of a field's value.
    pub fn get_str(&self, field: &str) -> &str {
        self.get(field).as_str()
    }

    /// All values in field order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Re-key this record against a schema: schema order, missing fields
    /// filled with [`Value::Empty`], fields outside the schema dropped.
    pub(crate) fn normalized(mut self, fields: &[Field]) -> Self {
        let values = fields
            .iter()
            .map(|f| {
                let value = self.values.swap_remove(f).unwrap_or_default();
                (f.clone(), value)
            })
            .collect();
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Field>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
