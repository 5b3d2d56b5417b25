//! Column visibility and display order.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dataset::Field;
use crate::error::{Result, TabviewError};

/// Number of leading fields visible when nothing is saved.
pub const DEFAULT_VISIBLE_COLUMNS: usize = 10;

/// Which fields are shown, and in which order.
///
/// `order` is always a permutation of the schema and `visible` a subset of
/// it. Both are only changed through methods that preserve that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    visible: IndexSet<Field>,
    order: Vec<Field>,
}

impl ColumnState {
    /// Natural order with the first `visible_count` fields shown.
    pub fn with_defaults(fields: &[Field], visible_count: usize) -> Self {
        Self {
            visible: fields.iter().take(visible_count).cloned().collect(),
            order: fields.to_vec(),
        }
    }

    /// Rebuild state from saved lists, reconciled against the schema.
    ///
    /// Saved names outside the schema and duplicates are dropped. Fields the
    /// saved order does not mention are appended in schema order. A missing
    /// visibility list falls back to the default leading fields.
    pub fn from_saved(
        fields: &[Field],
        visible: Option<Vec<Field>>,
        order: Option<Vec<Field>>,
        default_visible: usize,
    ) -> Self {
        let in_schema = |name: &Field| fields.contains(name);

        let visible = match visible {
            Some(saved) => saved.into_iter().filter(in_schema).collect(),
            None => fields.iter().take(default_visible).cloned().collect(),
        };

        let mut ordered: IndexSet<Field> = order
            .unwrap_or_default()
            .into_iter()
            .filter(in_schema)
            .collect();
        ordered.extend(fields.iter().cloned());

        Self {
            visible,
            order: ordered.into_iter().collect(),
        }
    }

    /// Display order of every field.
    pub fn order(&self) -> &[Field] {
        &self.order
    }

    pub fn is_visible(&self, field: &str) -> bool {
        self.visible.contains(field)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Fields to render: `order` restricted to the visible set.
    pub fn display_fields(&self) -> Vec<&Field> {
        self.order
            .iter()
            .filter(|f| self.visible.contains(*f))
            .collect()
    }

    /// Visible fields listed in the given schema order (for persisting).
    pub fn visible_in(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .filter(|f| self.visible.contains(*f))
            .cloned()
            .collect()
    }

    fn ensure_known(&self, field: &str) -> Result<()> {
        if self.order.iter().any(|f| f == field) {
            Ok(())
        } else {
            Err(TabviewError::UnknownField(field.to_string()))
        }
    }

    /// Flip the visibility of `field`.
    pub fn toggle(&mut self, field: &str) -> Result<()> {
        self.ensure_known(field)?;
        if !self.visible.shift_remove(field) {
            self.visible.insert(field.to_string());
        }
        Ok(())
    }

    /// Show every field or hide them all.
    pub fn set_all(&mut self, show: bool) {
        self.visible = if show {
            self.order.iter().cloned().collect()
        } else {
            IndexSet::new()
        };
    }

    /// Move the field at `from` so it ends up at `to`.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.order.len();
        for index in [from, to] {
            if index >= len {
                return Err(TabviewError::IndexOutOfRange { index, len });
            }
        }
        let field = self.order.remove(from);
        self.order.insert(to, field);
        Ok(())
    }
}
