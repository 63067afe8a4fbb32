use super::data::*;
use chrono::NaiveDateTime;
use tracing::debug;

use std::cmp::Ordering;
use std::fmt;

use crate::internal_error::{InternalError, InternalResult};

/// `max(existing ids) + 1`, or 0 for an empty collection.
pub fn next_task_id(collection: &Collection) -> InternalResult<TaskID> {
    match collection.keys().next_back() {
        Some(&last) => last
            .checked_add(1)
            .ok_or(InternalError::IdsExhausted { last }),
        None => Ok(0),
    }
}

pub fn create_task(
    collection: &Collection,
    description: String,
    start: Option<NaiveDateTime>,
    target: NaiveDateTime,
    priority: Priority,
    tags: Vec<String>,
    now: NaiveDateTime,
) -> InternalResult<Task> {
    let id = next_task_id(collection)?;
    debug!(id, priority = priority.name(), "allocated task id");

    Ok(Task {
        id,
        description,
        start: start.unwrap_or(now),
        target,
        updated: now,
        finished_at: None,
        priority,
        tags,
    })
}

/// Inserts `task` under its id, replacing any task already stored there.
pub fn add_task(collection: &mut Collection, task: Task) {
    collection.insert(task.id, task);
}

pub fn remove_task(collection: &mut Collection, id: TaskID) -> Option<Task> {
    collection.remove(&id)
}

fn touch(task: &mut Task, now: NaiveDateTime) {
    if now > task.updated {
        task.updated = now;
    }
}

/// Marks the task finished. Returns false, leaving the task untouched, when it
/// was already finished.
pub fn finish_task(task: &mut Task, now: NaiveDateTime) -> bool {
    if task.finished_at.is_some() {
        return false;
    }

    task.finished_at = Some(now);
    touch(task, now);
    true
}

pub fn edit_task(task: &mut Task, edit: TaskEdit, now: NaiveDateTime) {
    if let Some(description) = edit.description {
        task.description = description;
    }
    if let Some(target) = edit.target {
        task.target = target;
    }
    if let Some(priority) = edit.priority {
        task.priority = priority;
    }
    if let Some(tags) = edit.tags {
        task.tags = tags;
    }

    touch(task, now);
}

pub fn target_precedes_start(task: &Task) -> bool {
    task.target < task.start
}

/// Maps user supplied sort names to fields, dropping names that are not
/// recognized.
pub fn parse_sort_fields<S: AsRef<str>>(names: &[S]) -> Vec<SortField> {
    names
        .iter()
        .filter_map(|name| {
            let field = SortField::from_name(name.as_ref());
            if field.is_none() {
                debug!(name = name.as_ref(), "ignoring unknown sort field");
            }
            field
        })
        .collect()
}

/// Like [`parse_sort_fields`], falling back to [`DEFAULT_SORT`] when no
/// usable field was named.
pub fn resolve_sort_fields<S: AsRef<str>>(names: &[S]) -> Vec<SortField> {
    let fields = parse_sort_fields(names);
    if fields.is_empty() {
        DEFAULT_SORT.to_vec()
    } else {
        fields
    }
}

fn compare_by(field: SortField, a: &Task, b: &Task) -> Ordering {
    match field {
        SortField::Priority => b.priority.cmp(&a.priority),
        SortField::Start => a.start.cmp(&b.start),
        SortField::Target => a.target.cmp(&b.target),
        SortField::Updated => a.updated.cmp(&b.updated),
        SortField::Task => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
        SortField::Tid => a.id.cmp(&b.id),
    }
}

/// Stable composite sort: each field breaks ties left by the ones before it.
pub fn sort_tasks(tasks: &mut [&Task], fields: &[SortField]) {
    tasks.sort_by(|a, b| {
        fields
            .iter()
            .fold(Ordering::Equal, |ordering, field| {
                ordering.then_with(|| compare_by(*field, a, b))
            })
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictingStatusFilters;

impl fmt::Display for ConflictingStatusFilters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Pending only and finished only filters both set. Select only one or neither."
        )
    }
}

fn matches_filter(task: &Task, filter: &ListFilter) -> bool {
    if filter.pending_only && task.is_finished() {
        return false;
    }
    if filter.finished_only && !task.is_finished() {
        return false;
    }
    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }

    filter.tags.iter().all(|tag| task.tags.contains(tag))
}

pub fn query_tasks<'a>(
    collection: &'a Collection,
    filter: &ListFilter,
    sort: &[SortField],
) -> Result<Vec<&'a Task>, ConflictingStatusFilters> {
    if filter.pending_only && filter.finished_only {
        return Err(ConflictingStatusFilters);
    }

    let mut tasks = collection
        .values()
        .filter(|task| matches_filter(task, filter))
        .collect::<Vec<&Task>>();

    sort_tasks(&mut tasks, sort);

    Ok(tasks)
}
