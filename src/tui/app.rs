//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the view-controller
//! state (active view, status filter, selected calendar day, modal, toast)
//! and routes key presses into the task store. Every task list it renders
//! is recomputed from the store snapshot after each mutation, so the screen
//! always reflects the last committed state.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Datelike, Duration as Days, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::export::{backup_json, copy_to_clipboard, export_json, EXPORT_FILE};
use crate::fields::{Category, StatusFilter, Theme};
use crate::storage;
use crate::store::{
    format_category, format_due_relative, format_time_12h, parse_due_input, parse_time_input,
    StoreChange, TaskStore,
};
use crate::task::Task;
use crate::tui::colors::{category_color, palette, Palette};
use crate::tui::enums::{AppState, View};
use crate::tui::task_form::{TaskForm, CATEGORY_FIELD};
use crate::tui::utils::{centered_rect, feedback_pulse};

/// How long a toast stays up before the event loop dismisses it.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Main application state for the terminal user interface.
///
/// Holds the store plus everything that is UI-only: which view is active,
/// the list filter, the selected calendar day, the displayed month, the
/// add-task form, and the transient toast.
pub struct App {
    state: AppState,
    view: View,
    store: TaskStore,
    theme: Theme,
    theme_path: PathBuf,
    filter: StatusFilter,
    selected_date: NaiveDate,
    month_anchor: NaiveDate,
    visible_tasks: Vec<u64>,
    list_state: TableState,
    task_form: TaskForm,
    toast: Option<(String, Instant)>,
}

impl App {
    /// Create a new App instance rooted at the data directory.
    pub fn new(data_dir: &Path) -> Self {
        let today = Local::now().date_naive();
        let theme_path = storage::theme_path(data_dir);
        let theme = storage::load_theme(&theme_path);

        let mut app = App {
            state: AppState::Browse,
            view: View::Home,
            store: TaskStore::open(data_dir),
            theme,
            theme_path,
            filter: StatusFilter::All,
            selected_date: today,
            month_anchor: month_start(today),
            visible_tasks: Vec::new(),
            list_state: TableState::default(),
            task_form: TaskForm::new(today),
            toast: None,
        };
        app.update_visible_tasks();
        app
    }

    /// Recompute the task ids shown by the active view, preserving the
    /// cursor position when the selected task is still visible.
    fn update_visible_tasks(&mut self) {
        let old_selected_id = self
            .list_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
            .copied();

        let today = Local::now().date_naive();
        self.visible_tasks = match self.view {
            View::Home => crate::views::tasks_on_date(&self.store.tasks, today),
            View::List => crate::views::filter_by_status(
                &crate::views::sorted_by_schedule(&self.store.tasks),
                self.filter,
            ),
            View::Calendar => crate::views::tasks_on_date(&self.store.tasks, self.selected_date),
        }
        .iter()
        .map(|t| t.id)
        .collect();

        // Try to restore selection, or reset to the first row.
        if let Some(old_id) = old_selected_id {
            if let Some(new_idx) = self.visible_tasks.iter().position(|&id| id == old_id) {
                self.list_state.select(Some(new_idx));
                return;
            }
        }
        self.list_state.select(if self.visible_tasks.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    /// The id under the cursor, if any row is selected.
    fn selected_task_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
            .copied()
    }

    /// Move the cursor within the visible rows.
    fn move_selection(&mut self, down: bool) {
        if self.visible_tasks.is_empty() {
            return;
        }
        let last = self.visible_tasks.len() - 1;
        let next = match self.list_state.selected() {
            Some(idx) if down => (idx + 1).min(last),
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Replace the current toast; the previous deadline is superseded.
    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now() + TOAST_TTL));
    }

    /// Drop the toast once its deadline passes.
    fn tick_toast(&mut self) {
        let expired = matches!(&self.toast, Some((_, deadline)) if Instant::now() > *deadline);
        if expired {
            self.toast = None;
        }
    }

    /// Surface a store mutation: toast, feedback pulse, and recomputation
    /// of the visible projection.
    fn apply_change(&mut self, change: StoreChange) {
        match change {
            StoreChange::Added(_) => self.show_toast("Task added successfully!"),
            StoreChange::Toggled(_) => feedback_pulse(false),
            StoreChange::Removed(_) => {
                self.show_toast("Task deleted.");
                feedback_pulse(true);
            }
        }
        self.update_visible_tasks();
    }

    /// Switch the active view and recompute its projection.
    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.update_visible_tasks();
    }

    /// Flip and persist the theme preference.
    fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        if let Err(e) = storage::save_theme(&self.theme_path, self.theme) {
            eprintln!("Failed to save theme: {e}");
        }
    }

    /// Move the selected calendar day, following it across month borders.
    fn shift_selected_date(&mut self, days: i64) {
        self.selected_date += Days::days(days);
        if month_start(self.selected_date) != self.month_anchor {
            self.month_anchor = month_start(self.selected_date);
        }
        self.update_visible_tasks();
    }

    /// Show the previous or next month without moving the selected day.
    fn shift_month(&mut self, forward: bool) {
        let anchor = self.month_anchor;
        let (year, month) = if forward {
            if anchor.month() == 12 {
                (anchor.year() + 1, 1)
            } else {
                (anchor.year(), anchor.month() + 1)
            }
        } else if anchor.month() == 1 {
            (anchor.year() - 1, 12)
        } else {
            (anchor.year(), anchor.month() - 1)
        };
        self.month_anchor = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor);
    }

    /// Open the add-task modal, prefilled with the contextual due date.
    fn open_task_form(&mut self) {
        let date = match self.view {
            View::Calendar => self.selected_date,
            _ => Local::now().date_naive(),
        };
        self.task_form = TaskForm::new(date);
        self.state = AppState::AddTask;
    }

    /// Validate the form and create the task. Empty text keeps the modal
    /// open without any feedback; bad date or time input gets a toast.
    fn submit_task_form(&mut self) {
        let text = self.task_form.text.value.clone();
        if text.trim().is_empty() {
            return;
        }
        let due_date = match parse_due_input(&self.task_form.due.value) {
            Some(d) => d,
            None => {
                self.show_toast("Unrecognised due date. Use YYYY-MM-DD.");
                return;
            }
        };
        let time = if self.task_form.time.value.trim().is_empty() {
            None
        } else {
            match parse_time_input(&self.task_form.time.value) {
                Some(t) => Some(t),
                None => {
                    self.show_toast("Unrecognised time. Use HH:MM.");
                    return;
                }
            }
        };
        let category = self.task_form.selected_category();
        let location = self.task_form.location.value.clone();

        let added = self
            .store
            .create(&text, category, due_date, time, Some(location.as_str()))
            .map(|t| StoreChange::Added(t.id));
        if let Some(change) = added {
            self.state = AppState::Browse;
            self.apply_change(change);
        }
    }

    /// Export the collection to the default JSON file.
    fn export_tasks(&mut self) {
        if self.store.tasks.is_empty() {
            self.show_toast("No tasks to download.");
            return;
        }
        match std::fs::write(EXPORT_FILE, export_json(&self.store.tasks)) {
            Ok(_) => self.show_toast(format!("Tasks saved to {EXPORT_FILE}!")),
            Err(_) => self.show_toast("Failed to save tasks."),
        }
    }

    /// Copy the collection to the system clipboard.
    fn backup_tasks(&mut self) {
        if self.store.tasks.is_empty() {
            self.show_toast("No tasks to back up.");
            return;
        }
        if copy_to_clipboard(&backup_json(&self.store.tasks)) {
            self.show_toast("Tasks copied to clipboard!");
        } else {
            self.show_toast("Failed to copy tasks.");
        }
    }

    /// Handle keyboard input while browsing. Returns true on quit.
    fn handle_browse_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => self.switch_view(View::Home),
            KeyCode::Char('2') => self.switch_view(View::List),
            KeyCode::Char('3') => self.switch_view(View::Calendar),
            KeyCode::Char('a') => self.open_task_form(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('e') => self.export_tasks(),
            KeyCode::Char('b') => self.backup_tasks(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Char('f') if self.view == View::List => {
                self.filter = match self.filter {
                    StatusFilter::All => StatusFilter::Active,
                    StatusFilter::Active => StatusFilter::Completed,
                    StatusFilter::Completed => StatusFilter::All,
                };
                self.update_visible_tasks();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    if let Some(change) = self.store.toggle(id) {
                        self.apply_change(change);
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    if let Some(change) = self.store.delete(id) {
                        self.apply_change(change);
                    }
                }
            }
            KeyCode::Up if self.view == View::Calendar => self.shift_selected_date(-7),
            KeyCode::Down if self.view == View::Calendar => self.shift_selected_date(7),
            KeyCode::Left if self.view == View::Calendar => self.shift_selected_date(-1),
            KeyCode::Right if self.view == View::Calendar => self.shift_selected_date(1),
            KeyCode::Char('[') if self.view == View::Calendar => self.shift_month(false),
            KeyCode::Char(']') if self.view == View::Calendar => self.shift_month(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            _ => {}
        }
        false
    }

    /// Handle keyboard input while the add-task form is open.
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::Browse,
            KeyCode::Enter => self.submit_task_form(),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    /// Handle keyboard input on the help overlay.
    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
            self.state = AppState::Browse;
        }
    }

    /// Poll for the next event and dispatch it. Returns true on quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(match self.state {
                    AppState::Browse => self.handle_browse_input(key.code),
                    AppState::AddTask => {
                        self.handle_form_input(key.code);
                        false
                    }
                    AppState::Help => {
                        self.handle_help_input(key.code);
                        false
                    }
                });
            }
        }
        Ok(false)
    }

    /// Render the one-line navigation bar across the top.
    fn render_nav(&self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let tab = |label: &str, view: View| {
            if self.view == view {
                Span::styled(
                    format!("  {label}  "),
                    Style::default()
                        .bg(colors.accent)
                        .fg(colors.bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!("  {label}  "), Style::default().fg(colors.muted))
            }
        };
        let line = Line::from(vec![
            Span::styled(
                " Daink List ",
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            tab("1 Home", View::Home),
            tab("2 Tasks", View::List),
            tab("3 Calendar", View::Calendar),
        ]);
        let nav = Paragraph::new(line).style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(nav, area);
    }

    /// Render the home dashboard: greeting, summary cards, today's agenda.
    fn render_home(&mut self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let today = Local::now().date_naive();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Hello!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                today.format("%A, %-d %B %Y").to_string(),
                Style::default().fg(colors.muted),
            )),
        ])
        .style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(header, chunks[0]);

        let stats = crate::views::dashboard_stats(&self.store.tasks, today);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(chunks[1]);
        self.render_card(f, cards[0], "Today", stats.due_today, colors.accent);
        self.render_card(f, cards[1], "Overdue", stats.overdue, colors.danger);
        self.render_card(f, cards[2], "Completed", stats.completed_today, colors.success);

        if self.visible_tasks.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "All Clear!",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "No tasks for today. Enjoy your day!",
                    Style::default().fg(colors.muted),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Today's Agenda"))
            .style(Style::default().bg(colors.bg).fg(colors.text));
            f.render_widget(empty, chunks[2]);
        } else {
            self.render_task_table(f, chunks[2], "Today's Agenda");
        }
    }

    /// Render one dashboard summary card.
    fn render_card(&self, f: &mut Frame, area: Rect, label: &str, value: usize, accent: ratatui::style::Color) {
        let colors = palette(self.theme);
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(colors.muted))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(card, area);
    }

    /// Render the flat list view with its filter row.
    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let filter_tab = |label: &str, filter: StatusFilter| {
            if self.filter == filter {
                Span::styled(
                    format!(" {label} "),
                    Style::default()
                        .bg(colors.accent)
                        .fg(colors.bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(colors.muted))
            }
        };
        let filters = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            filter_tab("All", StatusFilter::All),
            Span::raw(" "),
            filter_tab("Active", StatusFilter::Active),
            Span::raw(" "),
            filter_tab("Completed", StatusFilter::Completed),
            Span::styled("  (f to cycle)", Style::default().fg(colors.muted)),
        ]))
        .style(Style::default().bg(colors.bg));
        f.render_widget(filters, chunks[0]);

        if self.visible_tasks.is_empty() {
            let (title, hint) = match self.filter {
                StatusFilter::All => ("All clear!", "Add a new task to get started."),
                StatusFilter::Active => ("No active tasks", "Looks like you're all caught up."),
                StatusFilter::Completed => {
                    ("No tasks completed yet", "Complete a task to see it here.")
                }
            };
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(hint, Style::default().fg(colors.muted))),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Tasks"))
            .style(Style::default().bg(colors.bg).fg(colors.text));
            f.render_widget(empty, chunks[1]);
        } else {
            self.render_task_table(f, chunks[1], "Tasks");
        }
    }

    /// Render the calendar view: month grid on top, day agenda below.
    fn render_calendar(&mut self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(0)])
            .split(area);

        self.render_month_grid(f, chunks[0]);

        let agenda_title = format!(
            "{} - {}",
            self.selected_date.format("%A"),
            self.selected_date.format("%-d %B %Y")
        );
        if self.visible_tasks.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No Tasks Scheduled",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Enjoy your day or add a new task.",
                    Style::default().fg(colors.muted),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(agenda_title))
            .style(Style::default().bg(colors.bg).fg(colors.text));
            f.render_widget(empty, chunks[1]);
        } else {
            self.render_task_table(f, chunks[1], &agenda_title);
        }
    }

    /// Render the month grid with weekend tint, today marker, selection
    /// highlight, and per-day category dots.
    fn render_month_grid(&self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let today = Local::now().date_naive();
        let month = self.month_anchor.month();

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            self.month_anchor.format("%B %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            " Su     Mo     Tu     We     Th     Fr     Sa",
            Style::default().fg(colors.muted),
        )));

        for week in crate::views::month_grid(self.month_anchor).chunks(7) {
            let mut spans = Vec::new();
            for day in week {
                let in_month = day.month() == month;
                let selected = *day == self.selected_date;

                let mut style = Style::default().fg(colors.text);
                if !in_month {
                    style = style.fg(colors.muted);
                }
                if day.weekday() == chrono::Weekday::Sun && !selected {
                    style = style.fg(colors.danger);
                }
                if *day == today && !selected {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                }
                if selected {
                    style = style
                        .bg(colors.accent)
                        .fg(colors.bg)
                        .add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(format!(" {:>2}", day.day()), style));

                let dots = crate::views::categories_on_date(&self.store.tasks, *day);
                for category in &dots {
                    spans.push(Span::styled(
                        "•",
                        Style::default().fg(category_color(*category)),
                    ));
                }
                spans.push(Span::raw(" ".repeat(4 - dots.len())));
            }
            lines.push(Line::from(spans));
        }

        let grid = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Calendar ([ and ] change month)"),
            )
            .style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(grid, area);
    }

    /// Render the visible tasks as a table shared by all three views.
    fn render_task_table(&mut self, f: &mut Frame, area: Rect, title: &str) {
        let colors = palette(self.theme);
        let today = Local::now().date_naive();

        let header = Row::new(
            ["", "Due", "Time", "Category", "Task"]
                .iter()
                .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .height(1);

        let rows: Vec<Row> = self
            .visible_tasks
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| task_row(task, today, &colors))
            .collect();

        let widths = [
            Constraint::Length(3),  // done marker
            Constraint::Length(10), // due
            Constraint::Length(9),  // time
            Constraint::Length(10), // category
            Constraint::Min(20),    // text
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "{} ({})",
                title,
                self.visible_tasks.len()
            )))
            .style(Style::default().bg(colors.bg).fg(colors.text))
            .row_highlight_style(Style::default().bg(colors.accent).fg(colors.bg))
            .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    /// Render the add-task modal over the current view.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Add New Task")
            .style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(outer, popup);

        let is_event = self.task_form.selected_category() == Category::Event;
        let mut constraints = vec![
            Constraint::Length(3), // text
            Constraint::Length(3), // due
            Constraint::Length(3), // time
            Constraint::Length(3), // category
        ];
        if is_event {
            constraints.push(Constraint::Length(3)); // location
        }
        constraints.push(Constraint::Min(1)); // hint
        let inner = popup.inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 1,
        });
        let fields = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let field_block = |label: &'static str, active: bool| {
            let border = if active {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.muted)
            };
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label)
        };
        let input_line = |value: &str, active: bool| {
            if active {
                Line::from(vec![
                    Span::raw(value.to_string()),
                    Span::styled("█", Style::default().fg(colors.accent)),
                ])
            } else {
                Line::from(value.to_string())
            }
        };

        let form = &self.task_form;
        f.render_widget(
            Paragraph::new(input_line(&form.text.value, form.text.active))
                .block(field_block("Task", form.text.active)),
            fields[0],
        );
        f.render_widget(
            Paragraph::new(input_line(&form.due.value, form.due.active))
                .block(field_block("Due date", form.due.active)),
            fields[1],
        );
        f.render_widget(
            Paragraph::new(input_line(&form.time.value, form.time.active))
                .block(field_block("Time (HH:MM, optional)", form.time.active)),
            fields[2],
        );

        let category_active = form.current_field == CATEGORY_FIELD;
        let category = Paragraph::new(Line::from(vec![
            Span::styled("< ", Style::default().fg(colors.muted)),
            Span::styled(
                format_category(form.selected_category()),
                Style::default()
                    .fg(category_color(form.selected_category()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" >", Style::default().fg(colors.muted)),
        ]))
        .block(field_block("Category", category_active));
        f.render_widget(category, fields[3]);

        if is_event {
            f.render_widget(
                Paragraph::new(input_line(&form.location.value, form.location.active))
                    .block(field_block("Event location", form.location.active)),
                fields[4],
            );
        }

        let hint = Paragraph::new(Span::styled(
            "Tab next field · Enter add · Esc cancel",
            Style::default().fg(colors.muted),
        ))
        .alignment(Alignment::Center);
        f.render_widget(hint, fields[fields.len() - 1]);
    }

    /// Render the key reference overlay.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let popup = centered_rect(50, 60, area);
        f.render_widget(Clear, popup);

        let text = vec![
            Line::from(""),
            Line::from("1 / 2 / 3      switch view"),
            Line::from("a              add a task"),
            Line::from("space / enter  toggle completion"),
            Line::from("d / delete     delete task"),
            Line::from("f              cycle list filter"),
            Line::from("arrows         move (calendar: change day)"),
            Line::from("[ / ]          previous / next month"),
            Line::from("e              export tasks to JSON"),
            Line::from("b              back up to clipboard"),
            Line::from("t              toggle light/dark theme"),
            Line::from("q              quit"),
            Line::from(""),
            Line::from("Press Esc to close"),
        ];
        let help = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().bg(colors.bg).fg(colors.text));
        f.render_widget(help, popup);
    }

    /// Render the status bar: the toast takes precedence over the hint.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let colors = palette(self.theme);
        let (text, style) = match &self.toast {
            Some((message, _)) => (
                message.clone(),
                Style::default()
                    .bg(colors.accent)
                    .fg(colors.bg)
                    .add_modifier(Modifier::BOLD),
            ),
            None => {
                let hint = match self.state {
                    AppState::AddTask => "Add New Task".to_string(),
                    AppState::Help => "Help".to_string(),
                    AppState::Browse => {
                        format!("Tasks: {} | Press 'h' for help", self.store.tasks.len())
                    }
                };
                (hint, Style::default().bg(colors.bg).fg(colors.muted))
            }
        };
        let status = Paragraph::new(text).style(style).alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function dispatching to the active view and overlays.
    fn render(&mut self, f: &mut Frame) {
        let colors = palette(self.theme);
        f.render_widget(
            Block::default().style(Style::default().bg(colors.bg)),
            f.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_nav(f, chunks[0]);
        match self.view {
            View::Home => self.render_home(f, chunks[1]),
            View::List => self.render_list(f, chunks[1]),
            View::Calendar => self.render_calendar(f, chunks[1]),
        }
        match self.state {
            AppState::AddTask => self.render_task_form(f, chunks[1]),
            AppState::Help => self.render_help(f, chunks[1]),
            AppState::Browse => {}
        }
        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: render, tick the toast, process input until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick_toast();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::days(date.day0() as i64)
}

/// Build one table row for a task.
fn task_row<'a>(task: &'a Task, today: NaiveDate, colors: &Palette) -> Row<'a> {
    let done = if task.completed { "[x]" } else { "[ ]" };
    let due = format_due_relative(task.due_date, today);
    let time = task.time.map(format_time_12h).unwrap_or_default();
    let text = match &task.location {
        Some(location) => format!("{} @ {}", task.text, location),
        None => task.text.clone(),
    };

    let style = if task.completed {
        Style::default()
            .fg(colors.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(colors.text)
    };

    Row::new(vec![
        Cell::from(done),
        Cell::from(due),
        Cell::from(time),
        Cell::from(format_category(task.category))
            .style(Style::default().fg(category_color(task.category))),
        Cell::from(text),
    ])
    .style(style)
}
