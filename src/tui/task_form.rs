//! Add-task form for the terminal user interface.
//!
//! This module provides the `TaskForm` structure backing the add-task
//! modal. Field order matches the visual layout; the location row only
//! participates when the selected category is Event.

use chrono::NaiveDate;

use crate::fields::Category;
use crate::tui::input::InputField;

/// Order constants for the form fields.
pub const TEXT_FIELD: usize = 0;
pub const DUE_FIELD: usize = 1;
pub const TIME_FIELD: usize = 2;
pub const CATEGORY_FIELD: usize = 3;
pub const LOCATION_FIELD: usize = 4;

/// Form state for the add-task modal.
pub struct TaskForm {
    pub text: InputField,
    pub due: InputField,
    pub time: InputField,
    pub location: InputField,
    pub category: usize,
    pub categories: Vec<Category>,
    pub current_field: usize,
}

impl TaskForm {
    /// Create a form with the due date prefilled.
    pub fn new(due_date: NaiveDate) -> Self {
        let mut form = TaskForm {
            text: InputField::new(),
            due: InputField::with_value(&due_date.to_string()),
            time: InputField::new(),
            location: InputField::new(),
            category: 0,
            categories: Category::ALL.to_vec(),
            current_field: TEXT_FIELD,
        };
        form.update_active_field();
        form
    }

    /// The currently selected category value.
    pub fn selected_category(&self) -> Category {
        self.categories[self.category]
    }

    /// Number of reachable fields. The location row only exists for events.
    pub fn field_count(&self) -> usize {
        if self.selected_category() == Category::Event {
            5
        } else {
            4
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.text.active = self.current_field == TEXT_FIELD;
        self.due.active = self.current_field == DUE_FIELD;
        self.time.active = self.current_field == TIME_FIELD;
        self.location.active = self.current_field == LOCATION_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TEXT_FIELD => self.text.handle_char(c),
            DUE_FIELD => self.due.handle_char(c),
            TIME_FIELD => self.time.handle_char(c),
            LOCATION_FIELD => self.location.handle_char(c),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TEXT_FIELD => self.text.handle_backspace(),
            DUE_FIELD => self.due.handle_backspace(),
            TIME_FIELD => self.time.handle_backspace(),
            LOCATION_FIELD => self.location.handle_backspace(),
            _ => {}
        }
    }

    /// Handle left/right arrows: cursor movement in text fields, selection
    /// cycling on the category row.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TEXT_FIELD => self.move_cursor(right, TEXT_FIELD),
            DUE_FIELD => self.move_cursor(right, DUE_FIELD),
            TIME_FIELD => self.move_cursor(right, TIME_FIELD),
            LOCATION_FIELD => self.move_cursor(right, LOCATION_FIELD),
            CATEGORY_FIELD => {
                if right {
                    self.category = (self.category + 1) % self.categories.len();
                } else {
                    self.category = if self.category == 0 {
                        self.categories.len() - 1
                    } else {
                        self.category - 1
                    };
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, right: bool, field: usize) {
        let input = match field {
            TEXT_FIELD => &mut self.text,
            DUE_FIELD => &mut self.due,
            TIME_FIELD => &mut self.time,
            LOCATION_FIELD => &mut self.location,
            _ => return,
        };
        if right {
            input.move_cursor_right();
        } else {
            input.move_cursor_left();
        }
    }
}
