//! Durable storage for the task collection and theme preference.
//!
//! The data directory holds two entries mirroring a key-value layout:
//! `tasks.json`, the whole collection as a JSON array, and `theme`, a plain
//! `light`/`dark` string. Reads are fail-open: missing or unparseable
//! content comes back as the empty collection or the default theme, and the
//! next successful write replaces it. Writes overwrite the whole value,
//! synchronously.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::fields::Theme;
use crate::task::Task;

const TASKS_FILE: &str = "tasks.json";
const THEME_FILE: &str = "theme";

/// Path of the task collection inside the data directory.
pub fn tasks_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TASKS_FILE)
}

/// Path of the theme preference inside the data directory.
pub fn theme_path(data_dir: &Path) -> PathBuf {
    data_dir.join(THEME_FILE)
}

/// Load the task collection, treating a missing or corrupt file as empty.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }
    let mut buf = String::new();
    match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
        Ok(_) => match serde_json::from_str(&buf) {
            Ok(tasks) => tasks,
            Err(e) => {
                eprintln!("Error parsing tasks, starting fresh: {e}");
                Vec::new()
            }
        },
        Err(e) => {
            eprintln!("Error reading tasks, starting fresh: {e}");
            Vec::new()
        }
    }
}

/// Overwrite the stored collection using an atomic-ish write (temp + rename).
pub fn save_tasks(path: &Path, tasks: &[Task]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let mut f = File::create(&tmp)?;
    let data = serde_json::to_string_pretty(tasks).unwrap();
    f.write_all(data.as_bytes())?;
    f.flush()?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Load the theme preference, defaulting to light on anything unexpected.
pub fn load_theme(path: &Path) -> Theme {
    match fs::read_to_string(path) {
        Ok(raw) => match raw.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        },
        Err(_) => Theme::Light,
    }
}

/// Overwrite the stored theme preference.
pub fn save_theme(path: &Path, theme: Theme) -> std::io::Result<()> {
    fs::write(path, theme_name(theme))
}

/// The persisted spelling of a theme.
pub fn theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::fields::Category;

    fn sample_task() -> Task {
        Task {
            id: 1,
            text: "Water the plants".into(),
            completed: false,
            category: Category::Personal,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: None,
            location: None,
        }
    }

    #[test]
    fn tasks_round_trip() {
        let dir = tempdir().unwrap();
        let path = tasks_path(dir.path());
        let tasks = vec![sample_task()];
        save_tasks(&path, &tasks).unwrap();
        assert_eq!(load_tasks(&path), tasks);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        assert!(load_tasks(&tasks_path(dir.path())).is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = tasks_path(dir.path());
        fs::write(&path, "not json at all").unwrap();
        assert!(load_tasks(&path).is_empty());
    }

    #[test]
    fn theme_round_trips_and_fails_open() {
        let dir = tempdir().unwrap();
        let path = theme_path(dir.path());
        assert_eq!(load_theme(&path), Theme::Light);
        save_theme(&path, Theme::Dark).unwrap();
        assert_eq!(load_theme(&path), Theme::Dark);
        fs::write(&path, "mauve").unwrap();
        assert_eq!(load_theme(&path), Theme::Light);
    }
}
