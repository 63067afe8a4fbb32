//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};

use crate::todo::data::{Priority, TaskID};
use crate::todo::remind::DEFAULT_WINDOW_HOURS;
use crate::todo::storage::DEFAULT_STORE_FILE;

/// Personal task tracker backed by a JSON file
#[derive(Parser, Debug)]
#[command(name = "rtasks", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Task store file
    #[arg(short, long, global = true, env = "RTASKS_FILE", default_value = DEFAULT_STORE_FILE)]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    Add {
        /// What needs doing
        #[arg(value_parser = parse_description)]
        description: String,
        /// low, medium or high (anything else means medium)
        #[arg(long)]
        priority: Option<String>,
        /// Start time (default: now)
        #[arg(long, value_parser = parse_datetime)]
        start: Option<NaiveDateTime>,
        /// Target time
        #[arg(long, value_parser = parse_datetime)]
        target: NaiveDateTime,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Remove a task
    Remove {
        #[arg(value_name = "TASK_ID")]
        task_id: TaskID,
    },
    /// Mark a task as finished
    Finish {
        #[arg(value_name = "TASK_ID")]
        task_id: TaskID,
    },
    /// Change fields of an existing task
    Edit {
        #[arg(value_name = "TASK_ID")]
        task_id: TaskID,
        /// New description
        #[arg(long, value_parser = parse_description)]
        task: Option<String>,
        /// low, medium or high (anything else leaves the priority as it is)
        #[arg(long)]
        priority: Option<String>,
        /// New target time
        #[arg(long, value_parser = parse_datetime)]
        target: Option<NaiveDateTime>,
        /// Comma-separated tags, replacing the current ones
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// List tasks
    List {
        /// Only unfinished tasks
        #[arg(long)]
        pending: bool,
        /// Only finished tasks
        #[arg(long)]
        finished: bool,
        /// Only tasks with this priority
        #[arg(long, value_enum, default_value_t = PriorityFilter::All)]
        priority: PriorityFilter,
        /// Only tasks carrying all of these comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Comma-separated sort fields: priority, start, target, updated, task, tid
        #[arg(long, value_delimiter = ',')]
        sort: Vec<String>,
    },
    /// Show overdue tasks and tasks due soon
    Remind {
        /// Reminder window in hours
        #[arg(long, default_value_t = DEFAULT_WINDOW_HOURS)]
        hours: f64,
    },
    /// Delete every task
    Clear {
        #[arg(long)]
        passcode: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PriorityFilter {
    Low,
    Medium,
    High,
    All,
}

impl PriorityFilter {
    pub fn priority(self) -> Option<Priority> {
        match self {
            PriorityFilter::Low => Some(Priority::Low),
            PriorityFilter::Medium => Some(Priority::Medium),
            PriorityFilter::High => Some(Priority::High),
            PriorityFilter::All => None,
        }
    }
}

fn parse_description(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("description must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Tries `YYYY-MM-DD HH:MM`, then `YYYY-MM-DD` (midnight), then `HH:MM` on
/// `today`.
pub fn parse_datetime_at(value: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Some(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M") {
        return Some(today.and_time(time));
    }

    None
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime_at(value, Local::now().date_naive()).ok_or_else(|| {
        format!(
            "'{}' is not a date or time (use YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM)",
            value
        )
    })
}
