use async_trait::async_trait;

use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::{Task, TaskHandle};

/// Port for awaiting server-side tasks.
#[async_trait]
pub trait TaskPort: Send + Sync {
    /// Polls the task until it reaches a terminal state and returns it.
    async fn wait_for_task(&self, handle: &TaskHandle) -> AppResult<Task>;
}
