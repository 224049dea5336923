//! Task list.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::model::Value;
use crate::notify::Notifier;
use crate::report::Messages;
use crate::report::Reporter;
use crate::store::RecordSource;
use crate::view::Cell;
use crate::view::Column;
use crate::view::ColumnKind;
use crate::view::filter;

/// Fields matched by the task search box.
pub const TASK_SEARCH_FIELDS: [&str; 3] = ["title", "description", "relatedTo"];

/// Progress of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Overdue,
    Pending,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_completed(task: &Record) -> bool {
    task.get_bool("completed").ok().flatten().unwrap_or(false)
}

fn is_past_due(task: &Record, today: NaiveDate) -> bool {
    task.get_date("dueDate")
        .ok()
        .flatten()
        .is_some_and(|due| due < today)
}

/// Status of a task as seen on `today`.
///
/// Completion wins over the due date; a task due today is still pending.
pub fn task_status(task: &Record, today: NaiveDate) -> TaskStatus {
    if is_completed(task) {
        TaskStatus::Completed
    } else if is_past_due(task, today) {
        TaskStatus::Overdue
    } else {
        TaskStatus::Pending
    }
}

/// Preset filters offered above the task table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
    Completed,
    Overdue,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 6] = [
        TaskFilter::All,
        TaskFilter::High,
        TaskFilter::Medium,
        TaskFilter::Low,
        TaskFilter::Completed,
        TaskFilter::Overdue,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    /// Resolves a filter id, ignoring case.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.id().eq_ignore_ascii_case(id))
    }

    /// Returns `true` if `task` passes this filter on `today`.
    pub fn matches(&self, task: &Record, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::High | Self::Medium | Self::Low => {
                filter::field_matches(task, "priority", self.id())
            }
            Self::Completed => is_completed(task),
            Self::Overdue => task_status(task, today) == TaskStatus::Overdue,
        }
    }
}

/// Applies a preset filter and the search term.
pub fn filter_tasks(
    tasks: &[Record],
    term: &str,
    preset: TaskFilter,
    today: NaiveDate,
) -> Vec<Record> {
    filter::retain_where(tasks, |task| {
        preset.matches(task, today) && filter::matches_search(task, term, &TASK_SEARCH_FIELDS)
    })
}

/// Column schema for the task table.
pub fn task_columns(today: NaiveDate) -> Vec<Column> {
    vec![
        Column::new("completed", "")
            .not_sortable()
            .render(|value, _| match value {
                Some(Value::Bool(true)) => Cell::text("[x]"),
                _ => Cell::text("[ ]"),
            }),
        Column::new("title", "Task"),
        Column::new("priority", "Priority").kind(ColumnKind::Status),
        Column::new("dueDate", "Due Date").kind(ColumnKind::Date),
        Column::new("relatedTo", "Related To"),
        Column::new("status", "Status")
            .kind(ColumnKind::Status)
            .render(move |_, task| Cell::status(task_status(task, today).as_str())),
        Column::new("actions", "Actions")
            .not_sortable()
            .render(|_, task| match task.id() {
                Some(id) => Cell::text(format!("Edit #{id} | Delete #{id}")),
                None => Cell::Empty,
            }),
    ]
}

/// Summary figures shown above the task table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Open tasks with high priority.
    pub high_priority: usize,
}

impl TaskSummary {
    pub fn from_records(tasks: &[Record], today: NaiveDate) -> Self {
        tasks.iter().fold(
            Self {
                total: tasks.len(),
                ..Self::default()
            },
            |mut summary, task| {
                match task_status(task, today) {
                    TaskStatus::Completed => summary.completed += 1,
                    TaskStatus::Overdue => summary.overdue += 1,
                    TaskStatus::Pending => {}
                }
                if !is_completed(task) && filter::field_matches(task, "priority", "high") {
                    summary.high_priority += 1;
                }
                summary
            },
        )
    }
}

/// Flips a task's completion flag.
///
/// `completed` is the flag as currently shown; the stored task is updated to
/// its negation and returned.
pub async fn toggle_complete<S, N>(
    reporter: &Reporter<S, N>,
    id: u64,
    completed: bool,
) -> Result<Record, SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let now_completed = !completed;
    let verb = if now_completed { "completed" } else { "reopened" };
    let messages = Messages::on_failure("Failed to update task")
        .with_success(format!("Task {verb} successfully"));

    reporter
        .update(
            EntityKind::Task,
            id,
            Record::new().set("completed", now_completed),
            &messages,
        )
        .await
}

/// Deletes a task.
pub async fn delete_task<S, N>(reporter: &Reporter<S, N>, id: u64) -> Result<(), SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let messages =
        Messages::on_failure("Failed to delete task").with_success("Task deleted successfully");
    reporter.delete(EntityKind::Task, id, &messages).await
}
