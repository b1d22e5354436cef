use crate::form::FormState;
use crate::model::{Priority, RecordId, Status};
use crate::store::RecordStore;
use crate::view::{RowAction, TableView};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Form,
    Table,
}

/// Everything the TUI shows. Owned by the UI loop only; the store lives here
/// rather than in any global.
pub struct UiState {
    pub store: RecordStore,
    pub form: FormState,
    pub pane: Pane,
    pub selected: usize, // Index into the current table rows
    pub show_help: bool,
    pub info: String,
    /// Clock used for ticket ages. Set by the event loop before each frame.
    pub now: OffsetDateTime,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Priority::default())
    }
}

impl UiState {
    pub fn new(default_priority: Priority) -> Self {
        Self {
            store: RecordStore::new(),
            form: FormState::new(default_priority),
            pane: Pane::Form,
            selected: 0,
            show_help: false,
            info: String::new(),
            now: OffsetDateTime::now_utc(),
        }
    }

    pub fn submit_form(&mut self) -> RecordId {
        let id = self.form.submit(&mut self.store);
        self.selected = self.store.len().saturating_sub(1);
        let title = self.store.get(id).map(|r| r.title.as_str()).unwrap_or_default();
        self.info = format!("Created #{id} {title}");
        id
    }

    /// Trigger the row action bound to `key` on the selected row.
    /// Unknown or stale ids change nothing and report nothing.
    pub fn apply_row_action(&mut self, key: char) -> bool {
        let view = TableView::from_store(&self.store);
        let Some(action) = view.action_at(self.selected, key) else {
            return false;
        };
        let was_open = self
            .store
            .get(action.id())
            .is_some_and(|r| r.status == Status::Open);
        let applied = action.apply(&mut self.store);
        match action {
            RowAction::Resolve(id) if applied && was_open => {
                self.info = format!("Resolved #{id}");
            }
            RowAction::Delete(id) if applied => self.info = format!("Deleted #{id}"),
            _ => {}
        }
        self.clamp_selection();
        applied
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.store.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.store.len().saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        if self.store.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.store.len() {
            self.selected = self.store.len() - 1;
        }
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Form => Pane::Table,
            Pane::Table => Pane::Form,
        };
    }
}
