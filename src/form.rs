//! Editable state behind the "Add a New Task" panel.
//!
//! Each field is updated on its own; the only rule checked across them is
//! that the title is non-empty when the form is turned into a [`TaskDraft`].

use crate::error::{Error, Result};
use crate::task::{Category, Priority, TaskDraft};

/// Focus targets in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Description,
    Category,
    Priority,
    Submit,
    Tasks,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::Category,
        Field::Priority,
        Field::Submit,
        Field::Tasks,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, Field::Title | Field::Description)
    }
}

#[derive(Debug, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub user_priority: Priority,
    pub focus: Field,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            Field::Title if c != '\n' => self.title.push(c),
            Field::Description => self.description.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Title => {
                self.title.pop();
            }
            Field::Description => {
                self.description.pop();
            }
            _ => {}
        }
    }

    /// Steps the focused choice field forwards or backwards.
    pub fn cycle(&mut self, forward: bool) {
        match (self.focus, forward) {
            (Field::Category, true) => self.category = self.category.next(),
            (Field::Category, false) => self.category = self.category.prev(),
            (Field::Priority, true) => self.user_priority = self.user_priority.next(),
            (Field::Priority, false) => self.user_priority = self.user_priority.prev(),
            _ => {}
        }
    }

    /// Snapshot of the form for submission. Whitespace-only titles count as empty.
    pub fn draft(&self) -> Result<TaskDraft> {
        if self.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }
        Ok(TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            user_priority: self.user_priority,
        })
    }

    /// Clears the free-text fields; category and priority carry over.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
