//! Shared helpers for the terminal user interface.

use std::io::{self, Write};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Compute a centered rectangle covering the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Ring the terminal bell as confirmation feedback; `strong` doubles it.
pub fn feedback_pulse(strong: bool) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(if strong { b"\x07\x07" } else { b"\x07" });
    let _ = stdout.flush();
}
