//! Task collection ownership, mutation paths, and date/time helpers.
//!
//! `TaskStore` holds the authoritative in-memory task list and is the only
//! writer of the persisted collection: every mutation writes the whole list
//! back to disk before returning. Validation failures degrade to no-ops
//! rather than errors, and persistence failures leave the in-memory list as
//! the last-known-good state.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, Timelike, Utc};

use crate::fields::Category;
use crate::storage;
use crate::task::Task;

/// Notification emitted by a successful mutation. The presentation layer
/// turns these into confirmation toasts and feedback pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Added(u64),
    Toggled(u64),
    Removed(u64),
}

/// Authoritative owner of the task collection, kept most-recent-first.
#[derive(Debug)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
    tasks_path: PathBuf,
}

impl TaskStore {
    /// Open the store rooted at `data_dir`, loading whatever collection is
    /// already persisted there. Corrupt or missing data starts empty.
    pub fn open(data_dir: &Path) -> Self {
        let tasks_path = storage::tasks_path(data_dir);
        let tasks = storage::load_tasks(&tasks_path);
        TaskStore { tasks, tasks_path }
    }

    /// Next task id: the current Unix time in milliseconds, bumped past the
    /// largest existing id so rapid successive creations never collide.
    fn next_id(&self) -> u64 {
        let now_ms = Utc::now().timestamp_millis().max(0) as u64;
        let max_id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        now_ms.max(max_id + 1)
    }

    /// Create a task and prepend it to the collection.
    ///
    /// Text that is empty after trimming is a silent no-op. `location` is
    /// only kept for event tasks with a non-empty trimmed value.
    pub fn create(
        &mut self,
        text: &str,
        category: Category,
        due_date: NaiveDate,
        time: Option<NaiveTime>,
        location: Option<&str>,
    ) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let location = match category {
            Category::Event => location
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            _ => None,
        };
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
            category,
            due_date,
            time,
            location,
        };
        self.tasks.insert(0, task);
        self.persist();
        self.tasks.first()
    }

    /// Flip the completion flag on a task. Unknown ids are a no-op.
    pub fn toggle(&mut self, id: u64) -> Option<StoreChange> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        self.persist();
        Some(StoreChange::Toggled(id))
    }

    /// Remove a task from the collection. Unknown ids are a no-op.
    pub fn delete(&mut self, id: u64) -> Option<StoreChange> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return None;
        }
        self.persist();
        Some(StoreChange::Removed(id))
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Write the collection through to disk. Failures are reported but do
    /// not unwind; the in-memory list stays the last-known-good snapshot.
    fn persist(&self) {
        if let Err(e) = storage::save_tasks(&self.tasks_path, &self.tasks) {
            eprintln!("Failed to save tasks: {e}");
        }
    }
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - bare weekday names ("friday", "fri")
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    // Weekday patterns
    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    for (day_name, target_day) in weekdays {
        if s == day_name {
            let current_day = today.weekday().num_days_from_monday() as i32;
            let days_ahead = (target_day + 7 - current_day) % 7;
            return Some(today + Duration::days(days_ahead as i64));
        }
    }

    // Try ISO format
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Parse an `HH:MM` (24-hour) clock time.
pub fn parse_time_input(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let delta = (due - today).num_days();
    if delta == 0 {
        "today".into()
    } else if delta == 1 {
        "tomorrow".into()
    } else if delta > 1 {
        format!("in {}d", delta)
    } else {
        format!("{}d late", -delta)
    }
}

/// Format a clock time as 12-hour "h:MM AM/PM".
pub fn format_time_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if is_pm { "PM" } else { "AM" })
}

/// Format a category for display.
pub fn format_category(category: Category) -> &'static str {
    match category {
        Category::Work => "Work",
        Category::Personal => "Personal",
        Category::Shopping => "Shopping",
        Category::Health => "Health",
        Category::Event => "Event",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &Path) -> TaskStore {
        TaskStore::open(dir)
    }

    fn due(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn created_ids_are_unique_and_increasing() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        let a = store.create("one", Category::Work, due("2024-01-01"), None, None).unwrap().id;
        let b = store.create("two", Category::Work, due("2024-01-01"), None, None).unwrap().id;
        let c = store.create("three", Category::Work, due("2024-01-01"), None, None).unwrap().id;
        assert!(a < b && b < c);
    }

    #[test]
    fn empty_text_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        store.create("real", Category::Work, due("2024-01-01"), None, None);
        let before = store.tasks.clone();
        assert!(store.create("   ", Category::Work, due("2024-01-01"), None, None).is_none());
        assert_eq!(store.tasks, before);
    }

    #[test]
    fn new_tasks_are_prepended() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        store.create("first", Category::Work, due("2024-01-01"), None, None);
        store.create("second", Category::Work, due("2024-01-01"), None, None);
        assert_eq!(store.tasks[0].text, "second");
        assert_eq!(store.tasks[1].text, "first");
    }

    #[test]
    fn location_only_sticks_to_events() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        let event = store
            .create("gig", Category::Event, due("2024-01-01"), None, Some(" Main St "))
            .unwrap();
        assert_eq!(event.location.as_deref(), Some("Main St"));
        let work = store
            .create("report", Category::Work, due("2024-01-01"), None, Some("X"))
            .unwrap();
        assert_eq!(work.location, None);
        let blank = store
            .create("meetup", Category::Event, due("2024-01-01"), None, Some("   "))
            .unwrap();
        assert_eq!(blank.location, None);
    }

    #[test]
    fn toggle_twice_restores_the_original_flag() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        let id = store.create("flip", Category::Work, due("2024-01-01"), None, None).unwrap().id;
        assert_eq!(store.toggle(id), Some(StoreChange::Toggled(id)));
        assert!(store.get(id).unwrap().completed);
        store.toggle(id);
        assert!(!store.get(id).unwrap().completed);
        assert_eq!(store.toggle(9999), None);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        let id = store.create("gone", Category::Work, due("2024-01-01"), None, None).unwrap().id;
        assert_eq!(store.delete(id), Some(StoreChange::Removed(id)));
        let after = store.tasks.clone();
        assert_eq!(store.delete(id), None);
        assert_eq!(store.tasks, after);
    }

    #[test]
    fn mutations_survive_a_reload() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());
        let id = store
            .create("persisted", Category::Health, due("2024-04-10"), parse_time_input("08:15"), None)
            .unwrap()
            .id;
        store.toggle(id);

        let reloaded = open_store(dir.path());
        assert_eq!(reloaded.tasks, store.tasks);
        assert!(reloaded.get(id).unwrap().completed);
    }

    #[test]
    fn parses_common_due_inputs() {
        let today = Local::now().date_naive();
        assert_eq!(parse_due_input("today"), Some(today));
        assert_eq!(parse_due_input("Tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_due_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_due_input("in 2w"), Some(today + Duration::weeks(2)));
        assert_eq!(parse_due_input("2024-12-31"), Some(due("2024-12-31")));
        assert_eq!(parse_due_input("not a date"), None);

        let friday = parse_due_input("friday").unwrap();
        assert_eq!(friday.weekday(), chrono::Weekday::Fri);
        assert!((friday - today).num_days() < 7);
    }

    #[test]
    fn formats_relative_due_dates() {
        let today = due("2024-06-15");
        assert_eq!(format_due_relative(due("2024-06-15"), today), "today");
        assert_eq!(format_due_relative(due("2024-06-16"), today), "tomorrow");
        assert_eq!(format_due_relative(due("2024-06-18"), today), "in 3d");
        assert_eq!(format_due_relative(due("2024-06-13"), today), "2d late");
    }

    #[test]
    fn formats_twelve_hour_times() {
        assert_eq!(format_time_12h(parse_time_input("08:00").unwrap()), "8:00 AM");
        assert_eq!(format_time_12h(parse_time_input("12:05").unwrap()), "12:05 PM");
        assert_eq!(format_time_12h(parse_time_input("00:30").unwrap()), "12:30 AM");
        assert_eq!(format_time_12h(parse_time_input("17:45").unwrap()), "5:45 PM");
    }
}
