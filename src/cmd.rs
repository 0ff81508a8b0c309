//! Command implementations for the CLI interface.
//!
//! Each subcommand maps onto a Task Store mutation or a derived view over
//! the current collection; the interactive interface lives behind `ui`.

use std::path::Path;

use chrono::Local;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::export::{backup_json, copy_to_clipboard, export_json, EXPORT_FILE};
use crate::fields::{Category, StatusFilter, Theme};
use crate::storage;
use crate::store::{
    format_category, format_due_relative, format_time_12h, parse_due_input, parse_time_input,
    TaskStore,
};
use crate::task::Task;
use crate::tui::run::run_tui;
use crate::views;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// The task text.
        text: String,
        /// Category: work | personal | shopping | health | event.
        #[arg(long, value_enum, default_value_t = Category::Work)]
        category: Category,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or a weekday.
        /// Defaults to today.
        #[arg(long)]
        due: Option<String>,
        /// Clock time, HH:MM (24-hour).
        #[arg(long)]
        time: Option<String>,
        /// Location. Only kept for event tasks.
        #[arg(long)]
        location: Option<String>,
    },

    /// List tasks, schedule-sorted with completed tasks last.
    List {
        /// Status filter.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
    },

    /// Show today's summary counts and agenda.
    Today,

    /// List tasks due on a calendar day (defaults to today).
    Agenda {
        /// Date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or a weekday.
        date: Option<String>,
    },

    /// Flip a task between completed and active.
    Toggle {
        /// Task id.
        id: u64,
    },

    /// Delete a task by id.
    Delete {
        /// Task id.
        id: u64,
    },

    /// Export every task as pretty-printed JSON.
    Export {
        /// Output file path (default: daink-list-tasks.json).
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Copy the whole collection to the system clipboard as compact JSON.
    Backup,

    /// Show or set the colour theme.
    Theme {
        /// New theme; omit to print the current one.
        #[arg(value_enum)]
        theme: Option<Theme>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(data_dir: &Path) {
    if let Err(e) = run_tui(data_dir) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Create a task from CLI arguments.
pub fn cmd_add(
    store: &mut TaskStore,
    text: String,
    category: Category,
    due: Option<String>,
    time: Option<String>,
    location: Option<String>,
) {
    let due_date = match due {
        Some(raw) => match parse_due_input(&raw) {
            Some(d) => d,
            None => {
                eprintln!("Unrecognised due date. Use YYYY-MM-DD, 'today', 'tomorrow', or 'in Nd'.");
                return;
            }
        },
        None => Local::now().date_naive(),
    };
    let time = match time {
        Some(raw) => match parse_time_input(&raw) {
            Some(t) => Some(t),
            None => {
                eprintln!("Unrecognised time. Use HH:MM (24-hour).");
                return;
            }
        },
        None => None,
    };

    if let Some(task) = store.create(&text, category, due_date, time, location.as_deref()) {
        println!("Added task {}", task.id);
    }
}

/// List the collection through the schedule sort and status filter.
pub fn cmd_list(store: &TaskStore, filter: StatusFilter) {
    let tasks = views::filter_by_status(&views::sorted_by_schedule(&store.tasks), filter);
    if tasks.is_empty() {
        match filter {
            StatusFilter::All => println!("All clear! Add a task to get started."),
            StatusFilter::Active => println!("No active tasks."),
            StatusFilter::Completed => println!("No tasks completed yet."),
        }
        return;
    }
    print_table(&tasks);
}

/// Print today's dashboard counters and agenda.
pub fn cmd_today(store: &TaskStore) {
    let today = Local::now().date_naive();
    let stats = views::dashboard_stats(&store.tasks, today);
    println!(
        "Today: {}   Overdue: {}   Completed: {}",
        stats.due_today, stats.overdue, stats.completed_today
    );

    let agenda = views::tasks_on_date(&store.tasks, today);
    if agenda.is_empty() {
        println!("\nNo tasks for today. Enjoy your day!");
    } else {
        println!();
        print_table(&agenda);
    }
}

/// Print the agenda for a calendar day.
pub fn cmd_agenda(store: &TaskStore, date: Option<String>) {
    let date = match date {
        Some(raw) => match parse_due_input(&raw) {
            Some(d) => d,
            None => {
                eprintln!("Unrecognised date. Use YYYY-MM-DD, 'today', 'tomorrow', or 'in Nd'.");
                return;
            }
        },
        None => Local::now().date_naive(),
    };
    let tasks = views::tasks_on_date(&store.tasks, date);
    if tasks.is_empty() {
        println!("No tasks scheduled on {date}.");
        return;
    }
    print_table(&tasks);
}

/// Flip a task's completion flag. Unknown ids are a quiet no-op.
pub fn cmd_toggle(store: &mut TaskStore, id: u64) {
    if store.toggle(id).is_some() {
        let done = store.get(id).map(|t| t.completed).unwrap_or(false);
        println!("Task {} marked {}.", id, if done { "done" } else { "active" });
    }
}

/// Delete a task. Unknown ids are a quiet no-op.
pub fn cmd_delete(store: &mut TaskStore, id: u64) {
    if store.delete(id).is_some() {
        println!("Task deleted.");
    }
}

/// Write the whole collection to a pretty-printed JSON file.
pub fn cmd_export(store: &TaskStore, output: Option<String>) {
    if store.tasks.is_empty() {
        println!("No tasks to export.");
        return;
    }
    let path = output.unwrap_or_else(|| EXPORT_FILE.to_string());
    match std::fs::write(&path, export_json(&store.tasks)) {
        Ok(_) => println!("Exported {} task(s) to {}", store.tasks.len(), path),
        Err(e) => {
            eprintln!("Failed to write export file: {e}");
            std::process::exit(1);
        }
    }
}

/// Copy the whole collection to the system clipboard.
pub fn cmd_backup(store: &TaskStore) {
    if store.tasks.is_empty() {
        println!("No tasks to back up.");
        return;
    }
    if copy_to_clipboard(&backup_json(&store.tasks)) {
        println!("Copied {} task(s) to the clipboard.", store.tasks.len());
    } else {
        eprintln!("Failed to copy tasks to the clipboard.");
    }
}

/// Show or set the persisted theme preference.
pub fn cmd_theme(data_dir: &Path, theme: Option<Theme>) {
    let path = storage::theme_path(data_dir);
    match theme {
        Some(theme) => {
            if let Err(e) = storage::save_theme(&path, theme) {
                eprintln!("Failed to save theme: {e}");
                std::process::exit(1);
            }
            println!("Theme set to {}.", storage::theme_name(theme));
        }
        None => println!("{}", storage::theme_name(storage::load_theme(&path))),
    }
}

/// Generate shell completion scripts on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Print tasks in a formatted table.
fn print_table(tasks: &[Task]) {
    let today = Local::now().date_naive();
    println!(
        "{:<15} {:<5} {:<10} {:<9} {:<9} {}",
        "ID", "Done", "Due", "Time", "Category", "Text"
    );
    for t in tasks {
        let done = if t.completed { "x" } else { "-" };
        let due = format_due_relative(t.due_date, today);
        let time = t.time.map(format_time_12h).unwrap_or_else(|| "-".into());
        let location = t
            .location
            .as_deref()
            .map(|l| format!(" @ {l}"))
            .unwrap_or_default();
        println!(
            "{:<15} {:<5} {:<10} {:<9} {:<9} {}{}",
            t.id,
            done,
            due,
            time,
            format_category(t.category),
            t.text,
            location
        );
    }
}
