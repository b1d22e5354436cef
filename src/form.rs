//! New-ticket form and its submit flow.

use crate::model::{Priority, RecordId};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Priority,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub focus: FormField,
    pub phase: SubmitPhase,
    default_priority: Priority,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Priority::default())
    }
}

impl FormState {
    pub fn new(default_priority: Priority) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: default_priority,
            focus: FormField::Title,
            phase: SubmitPhase::Idle,
            default_priority,
        }
    }

    /// Create a record from the current field values, then clear the form.
    ///
    /// Submission never fails: empty fields are stored as they are. Rendering
    /// is left to the caller, which must rebuild its view after this returns.
    pub fn submit(&mut self, store: &mut RecordStore) -> RecordId {
        self.phase = SubmitPhase::Submitting;

        let title = std::mem::take(&mut self.title);
        let description = std::mem::take(&mut self.description);
        let id = store.create(title, description, self.priority).id;

        self.reset();
        id
    }

    /// Back to empty fields and the default priority, focus on the title.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.priority = self.default_priority;
        self.focus = FormField::Title;
        self.phase = SubmitPhase::Idle;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type a character into the focused field. On the priority selector a
    /// space cycles the level and other characters are ignored.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::Priority => {
                if c == ' ' {
                    self.priority = self.priority.cycle_next();
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Priority => {}
        }
    }

    pub fn priority_next(&mut self) {
        self.priority = self.priority.cycle_next();
    }

    pub fn priority_prev(&mut self) {
        self.priority = self.priority.cycle_prev();
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}
