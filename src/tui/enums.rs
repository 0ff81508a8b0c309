//! Enumerations for TUI state management.

/// Which of the three main views fills the screen.
#[derive(Clone, Copy, PartialEq)]
pub enum View {
    Home,
    List,
    Calendar,
}

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    /// Browsing the active view.
    Browse,
    /// The add-task form is open over the active view.
    AddTask,
    /// The key reference overlay.
    Help,
}
