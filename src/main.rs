//! # Daink List - personal task manager for the terminal
//!
//! A small, file-backed task list with three ways of looking at the same
//! collection: a home dashboard, a flat filtered list, and a month calendar
//! with a per-day agenda.
//!
//! ## Key Features
//!
//! - **Dated Tasks**: every task carries a due date, an optional clock time,
//!   and one of five categories (work, personal, shopping, health, event).
//! - **Multiple Interfaces**: full CLI for scripting + interactive TUI for
//!   visual management.
//! - **Local File Storage**: a single JSON file with export and clipboard
//!   backup, no server or account anywhere.
//! - **Light/Dark Themes**: the preference persists next to the tasks.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI
//! daink ui
//!
//! # Add a task via CLI
//! daink add "Buy groceries" --category shopping --due tomorrow --time 09:30
//!
//! # Today's dashboard
//! daink today
//!
//! # List everything still open
//! daink list --filter active
//! ```
//!
//! Data is stored locally in `~/.daink`. Point `--data-dir` somewhere else
//! to keep separate collections.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod export;
pub mod fields;
pub mod storage;
pub mod store;
pub mod task;
pub mod views;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Determine the data directory.
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".daink")
    });
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }

    // Commands that don't go through the task store.
    match &cli.command {
        Commands::Ui => {
            cmd_ui(&data_dir);
            return;
        }
        Commands::Theme { theme } => {
            cmd_theme(&data_dir, *theme);
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    let mut store = TaskStore::open(&data_dir);

    match cli.command {
        Commands::Ui | Commands::Theme { .. } | Commands::Completions { .. } => {
            unreachable!("handled above")
        }

        Commands::Add { text, category, due, time, location } => {
            cmd_add(&mut store, text, category, due, time, location)
        }

        Commands::List { filter } => cmd_list(&store, filter),

        Commands::Today => cmd_today(&store),

        Commands::Agenda { date } => cmd_agenda(&store, date),

        Commands::Toggle { id } => cmd_toggle(&mut store, id),

        Commands::Delete { id } => cmd_delete(&mut store, id),

        Commands::Export { output } => cmd_export(&store, output),

        Commands::Backup => cmd_backup(&store),
    }
}
