//! Derived view computation over the task collection.
//!
//! Every projection here is a pure function of a store snapshot and its
//! parameters; nothing mutates the collection. The TUI recomputes the
//! projection it renders after each mutation notification, the CLI once per
//! command.

use chrono::{Datelike, Duration, NaiveDate};

use crate::fields::{Category, StatusFilter};
use crate::task::Task;

/// Counters behind the home dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// Incomplete tasks due today.
    pub due_today: usize,
    /// Incomplete tasks due strictly before today.
    pub overdue: usize,
    /// Completed tasks due today.
    pub completed_today: usize,
}

/// Schedule-then-completion ordering for the flat list.
///
/// A stable sort on `(due_date, time or midnight)` followed by a second
/// stable pass that moves completed tasks after incomplete ones. Ties keep
/// collection order, so equal-schedule tasks stay most-recent-first within
/// their completion group.
pub fn sorted_by_schedule(tasks: &[Task]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    out.sort_by_key(Task::schedule_key);
    out.sort_by_key(|t| t.completed);
    out
}

/// Status filtering. Applied after the schedule sort, so filtered output
/// keeps the same relative ordering.
pub fn filter_by_status(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            StatusFilter::All => true,
            StatusFilter::Active => !t.completed,
            StatusFilter::Completed => t.completed,
        })
        .cloned()
        .collect()
}

/// Tasks whose due date falls on the given calendar day.
pub fn tasks_on_date(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks.iter().filter(|t| t.due_date == date).cloned().collect()
}

/// Counters for the home dashboard. A task is never counted as both due
/// today and overdue, since overdue requires a due date before today.
pub fn dashboard_stats(tasks: &[Task], today: NaiveDate) -> DashboardStats {
    let mut stats = DashboardStats::default();
    for t in tasks {
        if t.due_date == today {
            if t.completed {
                stats.completed_today += 1;
            } else {
                stats.due_today += 1;
            }
        } else if t.due_date < today && !t.completed {
            stats.overdue += 1;
        }
    }
    stats
}

/// Distinct categories present on a day, bounded to the first four in
/// collection order. Drives the calendar-cell indicator dots.
pub fn categories_on_date(tasks: &[Task], date: NaiveDate) -> Vec<Category> {
    let mut categories = Vec::new();
    for t in tasks.iter().filter(|t| t.due_date == date) {
        if !categories.contains(&t.category) {
            categories.push(t.category);
            if categories.len() == 4 {
                break;
            }
        }
    }
    categories
}

/// Calendar cells for the month containing `anchor`: whole weeks from the
/// Sunday on or before the 1st through the Saturday on or after the last
/// day of the month.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = anchor - Duration::days(anchor.day0() as i64);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month.map(|d| d - Duration::days(1)).unwrap_or(first);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days((6 - last.weekday().num_days_from_sunday()) as i64);

    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn task(id: u64, due: &str, time: Option<&str>, completed: bool, category: Category) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            completed,
            category,
            due_date: due.parse().unwrap(),
            time: time.map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap()),
            location: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn sorts_by_date_then_time() {
        let tasks = vec![
            task(1, "2024-01-05", Some("09:00"), false, Category::Work),
            task(2, "2024-01-05", Some("08:00"), false, Category::Work),
            task(3, "2024-01-04", None, false, Category::Work),
        ];
        assert_eq!(ids(&sorted_by_schedule(&tasks)), vec![3, 2, 1]);
    }

    #[test]
    fn timeless_tasks_sort_as_midnight() {
        let tasks = vec![
            task(1, "2024-01-05", Some("00:30"), false, Category::Work),
            task(2, "2024-01-05", None, false, Category::Work),
        ];
        assert_eq!(ids(&sorted_by_schedule(&tasks)), vec![2, 1]);
    }

    #[test]
    fn sort_is_stable_for_equal_schedules() {
        let tasks = vec![
            task(10, "2024-01-05", Some("09:00"), false, Category::Work),
            task(11, "2024-01-05", Some("09:00"), false, Category::Work),
            task(12, "2024-01-05", Some("09:00"), false, Category::Work),
        ];
        assert_eq!(ids(&sorted_by_schedule(&tasks)), vec![10, 11, 12]);
    }

    #[test]
    fn completed_tasks_sink_but_keep_schedule_order() {
        let tasks = vec![
            task(1, "2024-01-06", None, true, Category::Work),
            task(2, "2024-01-05", None, false, Category::Work),
            task(3, "2024-01-04", None, true, Category::Work),
            task(4, "2024-01-07", None, false, Category::Work),
        ];
        assert_eq!(ids(&sorted_by_schedule(&tasks)), vec![2, 4, 3, 1]);
    }

    #[test]
    fn status_filters_partition_the_collection() {
        let tasks = vec![
            task(1, "2024-01-05", None, false, Category::Work),
            task(2, "2024-01-05", None, true, Category::Work),
            task(3, "2024-01-06", None, false, Category::Work),
        ];
        let all = filter_by_status(&tasks, StatusFilter::All);
        let active = filter_by_status(&tasks, StatusFilter::Active);
        let completed = filter_by_status(&tasks, StatusFilter::Completed);
        assert_eq!(all.len(), active.len() + completed.len());
        assert!(active.iter().all(|t| !t.completed));
        assert!(completed.iter().all(|t| t.completed));
        let mut rejoined = ids(&active);
        rejoined.extend(ids(&completed));
        rejoined.sort_unstable();
        assert_eq!(rejoined, vec![1, 2, 3]);
    }

    #[test]
    fn tasks_on_date_matches_the_calendar_day() {
        let tasks = vec![
            task(1, "2024-03-10", Some("23:59"), false, Category::Work),
            task(2, "2024-03-11", Some("00:00"), false, Category::Work),
        ];
        let day = "2024-03-10".parse().unwrap();
        assert_eq!(ids(&tasks_on_date(&tasks, day)), vec![1]);
    }

    #[test]
    fn dashboard_counts_are_disjoint() {
        let today = "2024-06-15".parse().unwrap();
        let tasks = vec![
            task(1, "2024-06-15", None, false, Category::Work),
            task(2, "2024-06-15", None, true, Category::Work),
            task(3, "2024-06-10", None, false, Category::Work),
            task(4, "2024-06-10", None, true, Category::Work),
            task(5, "2024-06-20", None, false, Category::Work),
        ];
        let stats = dashboard_stats(&tasks, today);
        assert_eq!(stats.due_today, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completed_today, 1);
    }

    #[test]
    fn single_fresh_task_counts_once() {
        let today = "2024-06-15".parse().unwrap();
        let tasks = vec![task(1, "2024-06-15", None, false, Category::Work)];
        let stats = dashboard_stats(&tasks, today);
        assert_eq!(stats, DashboardStats { due_today: 1, overdue: 0, completed_today: 0 });
    }

    #[test]
    fn category_dots_are_distinct_and_capped_at_four() {
        let tasks = vec![
            task(1, "2024-02-01", None, false, Category::Work),
            task(2, "2024-02-01", None, false, Category::Work),
            task(3, "2024-02-01", None, false, Category::Personal),
            task(4, "2024-02-01", None, false, Category::Shopping),
            task(5, "2024-02-01", None, false, Category::Health),
            task(6, "2024-02-01", None, false, Category::Event),
            task(7, "2024-02-02", None, false, Category::Event),
        ];
        let day = "2024-02-01".parse().unwrap();
        assert_eq!(
            categories_on_date(&tasks, day),
            vec![Category::Work, Category::Personal, Category::Shopping, Category::Health]
        );
    }

    #[test]
    fn month_grid_is_whole_weeks_from_sunday_to_saturday() {
        for anchor in ["2024-02-14", "2024-01-01", "2023-12-31", "2024-06-15"] {
            let anchor: NaiveDate = anchor.parse().unwrap();
            let grid = month_grid(anchor);
            assert_eq!(grid.len() % 7, 0, "anchor {anchor}");
            assert_eq!(grid.first().unwrap().weekday(), Weekday::Sun);
            assert_eq!(grid.last().unwrap().weekday(), Weekday::Sat);
            // Every day of the anchor month is present.
            let mut day = anchor - Duration::days(anchor.day0() as i64);
            while day.month() == anchor.month() {
                assert!(grid.contains(&day), "missing {day}");
                day += Duration::days(1);
            }
        }
    }

    #[test]
    fn month_grid_covers_leap_february() {
        let grid = month_grid("2024-02-29".parse().unwrap());
        assert!(grid.contains(&"2024-02-29".parse().unwrap()));
        assert_eq!(grid.len(), 35);
    }
}
