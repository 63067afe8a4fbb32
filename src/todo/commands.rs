use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::cli::{Command, PriorityFilter};
use crate::config::Config;
use crate::internal_error::InternalResult;
use crate::output;

use super::data::*;
use super::remind::reminders;
use super::storage::{load_collection, reset_store, save_collection};
use super::util::*;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Trims each tag and drops the empty ones; order and duplicates are kept.
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn not_found(task_id: TaskID) {
    output::warning(&format!("Task {} not found.", task_id));
}

fn warn_target_before_start(task: &Task) {
    if target_precedes_start(task) {
        output::warning(&format!(
            "Target time of task {} is before its start time.",
            task.id
        ));
    }
}

pub fn handle(command: Command, config: &Config) -> InternalResult<()> {
    debug!(store = %config.store_path.display(), ?command, "dispatching");

    match command {
        Command::Add {
            description,
            priority,
            start,
            target,
            tags,
        } => add(config, description, priority, start, target, tags),
        Command::Remove { task_id } => remove(config, task_id),
        Command::Finish { task_id } => finish(config, task_id),
        Command::Edit {
            task_id,
            task,
            priority,
            target,
            tags,
        } => edit(
            config,
            task_id,
            TaskEditArgs {
                description: task,
                priority,
                target,
                tags,
            },
        ),
        Command::List {
            pending,
            finished,
            priority,
            tags,
            sort,
        } => list(config, pending, finished, priority, tags, sort),
        Command::Remind { hours } => remind(config, hours),
        Command::Clear { passcode } => clear(config, passcode),
    }
}

pub fn add(
    config: &Config,
    description: String,
    priority: Option<String>,
    start: Option<NaiveDateTime>,
    target: NaiveDateTime,
    tags: Vec<String>,
) -> InternalResult<()> {
    let mut collection = load_collection(&config.store_path);

    let priority = match priority {
        Some(name) => Priority::from_name(&name).unwrap_or_else(|| {
            output::warning(&format!(
                "Unrecognized priority '{}', using Medium.",
                name
            ));
            Priority::Medium
        }),
        None => Priority::default(),
    };

    let task = create_task(
        &collection,
        description,
        start,
        target,
        priority,
        clean_tags(tags),
        now(),
    )?;
    warn_target_before_start(&task);

    let message = format!("Added task {}: {}", task.id, task.description);
    add_task(&mut collection, task);
    save_collection(&config.store_path, &collection)?;

    output::success(&message);
    Ok(())
}

pub fn remove(config: &Config, task_id: TaskID) -> InternalResult<()> {
    let mut collection = load_collection(&config.store_path);

    match remove_task(&mut collection, task_id) {
        Some(task) => {
            save_collection(&config.store_path, &collection)?;
            output::success(&format!("Removed task {}: {}", task.id, task.description));
        }
        None => not_found(task_id),
    }

    Ok(())
}

pub fn finish(config: &Config, task_id: TaskID) -> InternalResult<()> {
    let mut collection = load_collection(&config.store_path);

    let task = match collection.get_mut(&task_id) {
        Some(task) => task,
        None => {
            not_found(task_id);
            return Ok(());
        }
    };

    if !finish_task(task, now()) {
        output::dim(&format!("Task {} is already finished.", task_id));
        return Ok(());
    }

    let message = format!("Finished task {}: {}", task.id, task.description);
    save_collection(&config.store_path, &collection)?;

    output::success(&message);
    Ok(())
}

/// Raw `edit` options before the priority name is resolved.
pub struct TaskEditArgs {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub target: Option<NaiveDateTime>,
    pub tags: Option<Vec<String>>,
}

pub fn edit(config: &Config, task_id: TaskID, args: TaskEditArgs) -> InternalResult<()> {
    let mut collection = load_collection(&config.store_path);

    let task = match collection.get_mut(&task_id) {
        Some(task) => task,
        None => {
            not_found(task_id);
            return Ok(());
        }
    };

    let priority = args.priority.and_then(|name| {
        let priority = Priority::from_name(&name);
        if priority.is_none() {
            output::warning(&format!(
                "Unrecognized priority '{}', leaving priority unchanged.",
                name
            ));
        }
        priority
    });

    let target_changed = args.target.is_some();
    edit_task(
        task,
        TaskEdit {
            description: args.description,
            target: args.target,
            priority,
            tags: args.tags.map(clean_tags),
        },
        now(),
    );
    if target_changed {
        warn_target_before_start(task);
    }

    let message = format!("Updated task {}: {}", task.id, task.description);
    save_collection(&config.store_path, &collection)?;

    output::success(&message);
    Ok(())
}

pub fn list(
    config: &Config,
    pending: bool,
    finished: bool,
    priority: PriorityFilter,
    tags: Vec<String>,
    sort: Vec<String>,
) -> InternalResult<()> {
    let collection = load_collection(&config.store_path);

    let filter = ListFilter {
        pending_only: pending,
        finished_only: finished,
        priority: priority.priority(),
        tags: clean_tags(tags),
    };

    let fields = resolve_sort_fields(&sort);

    let tasks = match query_tasks(&collection, &filter, &fields) {
        Ok(tasks) => tasks,
        Err(conflict) => {
            output::warning(&conflict.to_string());
            return Ok(());
        }
    };

    if collection.is_empty() {
        output::line("To do list empty.");
    } else if tasks.is_empty() {
        output::dim("No tasks match the given filters.");
    } else {
        for task in tasks {
            output::line(&task.to_string());
        }
    }

    Ok(())
}

pub fn remind(config: &Config, hours: f64) -> InternalResult<()> {
    let collection = load_collection(&config.store_path);

    let due = reminders(&collection, hours, now());
    if due.is_empty() {
        output::line("No upcoming or overdue tasks.");
        return Ok(());
    }

    output::header(&format!("Reminders (next {} hours)", hours));
    for reminder in due {
        output::line(&reminder.to_string());
    }

    Ok(())
}

pub fn clear(config: &Config, passcode: i64) -> InternalResult<()> {
    if passcode != config.passcode {
        output::warning("Incorrect passcode.");
        return Ok(());
    }

    if reset_store(&config.store_path)? {
        output::success("To do list cleared.");
    } else {
        output::dim("To do list already empty.");
    }

    Ok(())
}
