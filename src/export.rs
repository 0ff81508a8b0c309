//! Whole-collection export helpers shared by the CLI and the TUI.
//!
//! Export produces the pretty-printed document for the downloadable file;
//! backup produces the compact string handed to the system clipboard. Both
//! are contracts over the full collection; callers decide the empty-case
//! notification.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::task::Task;

/// Default file name for the JSON export.
pub const EXPORT_FILE: &str = "daink-list-tasks.json";

/// Pretty-printed JSON document of the whole collection.
pub fn export_json(tasks: &[Task]) -> String {
    serde_json::to_string_pretty(tasks).unwrap_or_default()
}

/// Compact JSON string of the whole collection for the clipboard.
pub fn backup_json(tasks: &[Task]) -> String {
    serde_json::to_string(tasks).unwrap_or_default()
}

/// Pipe `text` into the platform clipboard helper. Returns false when no
/// helper is available or the write fails.
pub fn copy_to_clipboard(text: &str) -> bool {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), text)
    }

    #[cfg(target_os = "linux")]
    {
        // Wayland first, then the X11 helpers.
        if pipe_to(Command::new("wl-copy"), text) {
            return true;
        }
        let mut xclip = Command::new("xclip");
        xclip.arg("-selection").arg("clipboard");
        if pipe_to(xclip, text) {
            return true;
        }
        let mut xsel = Command::new("xsel");
        xsel.arg("--clipboard").arg("--input");
        pipe_to(xsel, text)
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        false
    }
}

fn pipe_to(mut command: Command, text: &str) -> bool {
    let child = command.stdin(Stdio::piped()).stdout(Stdio::null()).spawn();
    match child {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                if stdin.write_all(text.as_bytes()).is_ok() {
                    drop(stdin);
                    return child.wait().map(|s| s.success()).unwrap_or(false);
                }
            }
            false
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::fields::Category;

    #[test]
    fn export_is_pretty_and_backup_is_compact() {
        let tasks = vec![Task {
            id: 1,
            text: "Pack bags".into(),
            completed: false,
            category: Category::Personal,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            time: None,
            location: None,
        }];
        let pretty = export_json(&tasks);
        let compact = backup_json(&tasks);
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
        let back: Vec<Task> = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, tasks);
    }
}
