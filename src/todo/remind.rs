use super::data::*;
use chrono::{Duration, NaiveDateTime};

use std::fmt;

pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Overdue,
    DueSoon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder<'a> {
    pub task: &'a Task,
    pub kind: ReminderKind,
    /// `target - now`; zero or negative once the task is overdue.
    pub remaining: Duration,
}

impl fmt::Display for Reminder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self.kind {
            ReminderKind::Overdue => "OVERDUE by",
            ReminderKind::DueSoon => "Due in",
        };
        write!(
            f,
            "{} {}: {} {}",
            label,
            format_duration(self.remaining),
            self.task.id,
            self.task.description
        )
    }
}

fn window_duration(hours: f64) -> Duration {
    let millis = (hours * 3_600_000.0).round() as i64;
    Duration::milliseconds(millis.max(-i64::MAX))
}

/// Pending tasks that are overdue or due within `window_hours`, most urgent
/// first.
pub fn reminders(
    collection: &Collection,
    window_hours: f64,
    now: NaiveDateTime,
) -> Vec<Reminder<'_>> {
    let window = window_duration(window_hours);

    let mut due = collection
        .values()
        .filter(|task| !task.is_finished())
        .filter_map(|task| {
            let remaining = task.target - now;
            let kind = if remaining <= Duration::zero() {
                ReminderKind::Overdue
            } else if remaining <= window {
                ReminderKind::DueSoon
            } else {
                return None;
            };

            Some(Reminder {
                task,
                kind,
                remaining,
            })
        })
        .collect::<Vec<Reminder>>();

    due.sort_by_key(|reminder| reminder.remaining);

    due
}

/// Renders the two largest non-zero units of `duration`, ignoring sign and
/// seconds.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds().unsigned_abs();

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{} days {} hours", days, hours)
    } else if hours > 0 {
        format!("{} hours {} minutes", hours, minutes)
    } else {
        format!("{} minutes", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::util::{add_task, create_task, finish_task};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn add(collection: &mut Collection, description: &str, target: NaiveDateTime) {
        let task = create_task(
            collection,
            description.to_string(),
            Some(now() - Duration::days(1)),
            target,
            Priority::Medium,
            vec![],
            now() - Duration::days(1),
        )
        .unwrap();
        add_task(collection, task);
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(
            format_duration(Duration::days(2) + Duration::hours(3) + Duration::minutes(9)),
            "2 days 3 hours"
        );
        assert_eq!(
            format_duration(Duration::hours(5) + Duration::minutes(7) + Duration::seconds(40)),
            "5 hours 7 minutes"
        );
        assert_eq!(format_duration(Duration::minutes(42)), "42 minutes");
        assert_eq!(format_duration(Duration::seconds(59)), "0 minutes");
        assert_eq!(format_duration(Duration::days(1)), "1 days 0 hours");
    }

    #[test]
    fn test_format_duration_ignores_sign() {
        assert_eq!(
            format_duration(-(Duration::hours(2) + Duration::minutes(30))),
            "2 hours 30 minutes"
        );
    }

    #[test]
    fn test_target_now_is_overdue() {
        let mut collection = Collection::new();
        add(&mut collection, "now", now());

        let due = reminders(&collection, DEFAULT_WINDOW_HOURS, now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, ReminderKind::Overdue);
        assert_eq!(due[0].to_string(), "OVERDUE by 0 minutes: 0 now");
    }

    #[test]
    fn test_window_and_ordering() {
        let mut collection = Collection::new();
        add(&mut collection, "soon", now() + Duration::hours(3));
        add(&mut collection, "late", now() - Duration::hours(5));
        add(&mut collection, "far", now() + Duration::hours(30));
        add(&mut collection, "edge", now() + Duration::hours(24));

        let due = reminders(&collection, DEFAULT_WINDOW_HOURS, now());
        let names = due
            .iter()
            .map(|reminder| reminder.task.description.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["late", "soon", "edge"]);
        assert_eq!(due[0].to_string(), "OVERDUE by 5 hours 0 minutes: 1 late");
        assert_eq!(due[1].to_string(), "Due in 3 hours 0 minutes: 0 soon");
    }

    #[test]
    fn test_fractional_window() {
        let mut collection = Collection::new();
        add(&mut collection, "in forty", now() + Duration::minutes(40));
        add(&mut collection, "in twenty", now() + Duration::minutes(20));

        let due = reminders(&collection, 0.5, now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].task.description, "in twenty");
    }

    #[test]
    fn test_finished_tasks_are_skipped() {
        let mut collection = Collection::new();
        add(&mut collection, "done", now() - Duration::hours(1));
        finish_task(collection.get_mut(&0).unwrap(), now());

        assert!(reminders(&collection, DEFAULT_WINDOW_HOURS, now()).is_empty());
    }
}
