//! Enumerations and field types for the task list.
//!
//! This module defines the fixed category set plus the status-filter and
//! theme-preference enums shared by the CLI and the TUI.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fixed task categories. Every task belongs to exactly one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "Work")]
    Work,
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Shopping")]
    Shopping,
    #[serde(alias = "Health")]
    Health,
    #[serde(alias = "Event")]
    Event,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Health,
        Category::Event,
    ];
}

/// Status filter applied to the flat task list.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Colour theme preference, persisted alongside the task collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
