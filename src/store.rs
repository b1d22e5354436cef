//! In-memory record store.
//!
//! Owns the ordered ticket list for one session. Insertion order is display
//! order; deletions remove a record for good and ids are never reused.

use crate::model::{Priority, Record, RecordId, Status};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Open/resolved tallies for status lines and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.open + self.resolved
    }
}

#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new open record. Field contents are stored as given, empty included.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> &Record {
        let id = RecordId(self.next_id);
        self.next_id += 1;

        let record = Record {
            id,
            title: title.into(),
            description: description.into(),
            priority,
            status: Status::Open,
            opened_at: now_rfc3339(),
        };
        tracing::debug!(id = %id, priority = %priority, "record created");

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Mark a record resolved. Returns false only when no record has `id`;
    /// resolving an already resolved record is a successful no-op.
    pub fn resolve(&mut self, id: RecordId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                if record.status == Status::Open {
                    record.status = Status::Resolved;
                    tracing::debug!(id = %id, "record resolved");
                }
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`, keeping the relative order of the rest.
    pub fn delete(&mut self, id: RecordId) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.records.remove(idx);
                tracing::debug!(id = %id, "record deleted");
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        self.records
            .iter()
            .fold(StatusCounts::default(), |mut acc, r| {
                match r.status {
                    Status::Open => acc.open += 1,
                    Status::Resolved => acc.resolved += 1,
                }
                acc
            })
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(store: &RecordStore) -> Vec<&str> {
        store.list().iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn create_appends_open_record_with_fresh_id() {
        let mut store = RecordStore::new();
        let a = store.create("a", "", Priority::Low).id;
        let b = store.create("b", "", Priority::High).id;

        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(titles(&store), vec!["a", "b"]);
        assert!(store.list().iter().all(|r| r.status == Status::Open));
    }

    #[test]
    fn create_accepts_empty_fields() {
        let mut store = RecordStore::new();
        let r = store.create("", "", Priority::Medium);
        assert_eq!(r.title, "");
        assert_eq!(r.description, "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_stamps_opened_at() {
        let mut store = RecordStore::new();
        let r = store.create("t", "d", Priority::Low);
        assert!(OffsetDateTime::parse(&r.opened_at, &Rfc3339).is_ok());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = RecordStore::new();
        let a = store.create("a", "", Priority::Low).id;
        assert!(store.delete(a));
        let b = store.create("b", "", Priority::Low).id;
        assert!(b > a);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut store = RecordStore::new();
        let id = store.create("a", "", Priority::Low).id;

        assert!(store.resolve(id));
        assert_eq!(store.get(id).map(|r| r.status), Some(Status::Resolved));
        assert!(store.resolve(id));
        assert_eq!(store.get(id).map(|r| r.status), Some(Status::Resolved));
    }

    #[test]
    fn resolve_unknown_id_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        store.create("a", "", Priority::Low);
        let before = store.list().to_vec();

        assert!(!store.resolve(RecordId(99)));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn delete_removes_only_the_match_and_keeps_order() {
        let mut store = RecordStore::new();
        store.create("a", "", Priority::Low);
        let b = store.create("b", "", Priority::Low).id;
        store.create("c", "", Priority::Low);
        store.create("d", "", Priority::Low);

        assert!(store.delete(b));
        assert_eq!(titles(&store), vec!["a", "c", "d"]);
        assert!(!store.delete(b));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn length_tracks_creates_minus_deletes() {
        let mut store = RecordStore::new();
        let ids: Vec<_> = (0..6)
            .map(|i| store.create(format!("t{i}"), "", Priority::Medium).id)
            .collect();
        for id in ids.iter().step_by(2) {
            store.delete(*id);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(titles(&store), vec!["t1", "t3", "t5"]);
    }

    #[test]
    fn counts_split_by_status() {
        let mut store = RecordStore::new();
        let a = store.create("a", "", Priority::Low).id;
        store.create("b", "", Priority::Low);
        store.resolve(a);

        let counts = store.counts();
        assert_eq!(counts, StatusCounts { open: 1, resolved: 1 });
        assert_eq!(counts.total(), store.len());
    }

    #[test]
    fn printer_and_vpn_scenario() {
        let mut store = RecordStore::new();
        let printer = store
            .create("Printer jam", "Office printer broken", Priority::High)
            .id;
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].status, Status::Open);

        assert!(store.resolve(printer));
        assert_eq!(store.list()[0].status, Status::Resolved);

        store.create("VPN down", "Cannot connect", Priority::Medium);
        assert_eq!(store.len(), 2);

        assert!(store.delete(printer));
        assert_eq!(store.len(), 1);
        let vpn = &store.list()[0];
        assert_eq!(vpn.title, "VPN down");
        assert_eq!(vpn.priority, Priority::Medium);
        assert_eq!(vpn.status, Status::Open);
    }

    #[test]
    fn independent_stores_do_not_share_state() {
        let mut one = RecordStore::new();
        let two = RecordStore::new();
        one.create("a", "", Priority::Low);
        assert_eq!(one.len(), 1);
        assert!(two.is_empty());
    }
}
