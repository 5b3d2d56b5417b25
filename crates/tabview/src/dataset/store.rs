//! The ingested dataset.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, TabviewError};

use super::record::{Field, Record};

/// An immutable, ingested dataset.
///
/// Fields and records are private; the only access is through shared
/// references, so every derived view is a fresh sequence of [`Row`]s.
#[derive(Debug, Clone)]
pub struct Dataset {
    identity: String,
    fields: Vec<Field>,
    records: Vec<Record>,
}

/// A reference to one record together with its position in the dataset.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Zero-based index in the ingested record sequence.
    pub index: usize,
    pub record: &'a Record,
}

impl Dataset {
    /// Ingest a parsed schema and its records.
    ///
    /// Fails if `fields` names the same column twice. Records are re-keyed
    /// against the schema so every record carries every field in order.
    pub fn ingest(
        identity: impl Into<String>,
        fields: Vec<Field>,
        records: Vec<Record>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.as_str()) {
                return Err(TabviewError::DuplicateField(field.clone()));
            }
        }

        let records: Vec<Record> = records
            .into_iter()
            .map(|r| r.normalized(&fields))
            .collect();

        let identity = identity.into();
        debug!(
            "Ingested '{identity}': {} fields, {} records",
            fields.len(),
            records.len()
        );

        Ok(Self {
            identity,
            fields,
            records,
        })
    }

    /// Dataset identity (the source file name).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Schema in original order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of ingested rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.fields.len()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Position of a field in the schema.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Every record, in ingest order.
    pub fn rows(&self) -> Vec<Row<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| Row { index, record })
            .collect()
    }
}
