//! Table projection of the record store.
//!
//! Every render builds a fresh `TableView` from the full record list; nothing
//! is patched in place. Backends (TUI table, text table) only format what is
//! here, so both always show exactly the store's current contents.

use crate::model::{Priority, Record, RecordId, Status};
use crate::store::RecordStore;

pub const COLUMNS: [&str; 5] = ["Title", "Description", "Priority", "Status", "Actions"];

/// A user-triggerable action bound to one row's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Resolve(RecordId),
    Delete(RecordId),
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Resolve(_) => "resolve",
            RowAction::Delete(_) => "delete",
        }
    }

    pub fn key(self) -> char {
        match self {
            RowAction::Resolve(_) => 'r',
            RowAction::Delete(_) => 'd',
        }
    }

    pub fn id(self) -> RecordId {
        match self {
            RowAction::Resolve(id) | RowAction::Delete(id) => id,
        }
    }

    /// Run the bound store operation. The caller re-renders afterwards
    /// regardless of the outcome.
    pub fn apply(self, store: &mut RecordStore) -> bool {
        match self {
            RowAction::Resolve(id) => store.resolve(id),
            RowAction::Delete(id) => store.delete(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub opened_at: String,
    pub actions: [RowAction; 2],
}

impl TableRow {
    fn from_record(r: &Record) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            priority: r.priority,
            status: r.status,
            opened_at: r.opened_at.clone(),
            actions: [RowAction::Resolve(r.id), RowAction::Delete(r.id)],
        }
    }

    /// Actions column text, e.g. `[r] resolve  [d] delete`.
    pub fn actions_text(&self) -> String {
        self.actions
            .iter()
            .map(|a| format!("[{}] {}", a.key(), a.label()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn project(records: &[Record]) -> Self {
        Self {
            rows: records.iter().map(TableRow::from_record).collect(),
        }
    }

    pub fn from_store(store: &RecordStore) -> Self {
        Self::project(store.list())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Look up the action with `key` on the row at `index`.
    pub fn action_at(&self, index: usize, key: char) -> Option<RowAction> {
        self.rows
            .get(index)
            .and_then(|row| row.actions.iter().copied().find(|a| a.key() == key))
    }
}
