use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Lifecycle state of a server-side task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Queued, not yet picked up by a worker.
    Waiting,
    /// Picked up by a worker.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Cancellation requested.
    Canceling,
    /// Cancelled before completion.
    Canceled,
    /// Skipped by the tasking system.
    Skipped,
    /// State value this client does not know.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Returns whether the task will not change state anymore.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Canceled | Self::Skipped
        )
    }

    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Canceling => "canceling",
            Self::Canceled => "canceled",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }
}

/// Task reference returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskHandle {
    /// Task href to poll.
    pub task: String,
}

/// Task detail from `pulp/api/v3/tasks/<id>/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    /// Task href.
    pub pulp_href: String,
    /// Current state.
    pub state: TaskState,
    /// Task name, for logs.
    #[serde(default)]
    pub name: Option<String>,
    /// Error description for failed tasks.
    #[serde(default)]
    pub error: Option<Value>,
    /// Start timestamp.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Finish timestamp.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns whether the task reached `completed`.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }
}
