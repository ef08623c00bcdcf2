use std::sync::Arc;

use shared::{Task, TaskList};

use crate::config::{Config, StoreBackend};
use crate::store::{self, Collection, MemoryCollection, RedisCollection, StoreError};

/// Store handles shared by every request. Built once at startup and injected
/// into the router.
#[derive(Clone)]
pub struct AppState {
    pub task_lists: Arc<dyn Collection<TaskList>>,
    pub tasks: Arc<dyn Collection<Task>>,
}

impl AppState {
    pub fn new(
        task_lists: impl Collection<TaskList> + 'static,
        tasks: impl Collection<Task> + 'static,
    ) -> Self {
        Self {
            task_lists: Arc::new(task_lists),
            tasks: Arc::new(tasks),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryCollection::new(), MemoryCollection::new())
    }

    /// Connects the configured backend. Fails if the store is unreachable.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        match config.store {
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data will not survive a restart");
                Ok(Self::in_memory())
            }
            StoreBackend::Redis => {
                let connection = store::connect(&config.redis_url).await?;
                tracing::info!(url = %config.redis_url, "connected to redis");
                Ok(Self::new(
                    RedisCollection::new(connection.clone()),
                    RedisCollection::new(connection),
                ))
            }
        }
    }
}
