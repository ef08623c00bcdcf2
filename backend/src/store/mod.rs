//! Document store used by the HTTP routes.
//!
//! Each entity lives in its own [`Collection`]. Collections only know how to
//! insert, find, update and delete documents matching a filter; they never
//! look across collections, so deleting a task list leaves its tasks behind.

mod memory;
mod redis;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Task, TaskList, UpdateTaskListRequest, UpdateTaskRequest, ValidationError};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub use self::memory::MemoryCollection;
pub use self::redis::{connect, RedisCollection};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("redis: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("document encoding: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Parses a path identifier. A malformed identifier is a store failure, not a miss.
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the key prefix in key-value backends.
    const COLLECTION: &'static str;

    type Filter: fmt::Debug + Send + Sync;
    type Update: fmt::Debug + Send;

    fn id(&self) -> Uuid;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Identifier pinned by `filter`, if any.
    fn pinned_id(filter: &Self::Filter) -> Option<Uuid>;

    fn apply(&mut self, update: Self::Update) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListFilter {
    All,
    Id(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    pub task_list_id: Uuid,
    pub id: Option<Uuid>,
}

impl TaskFilter {
    pub fn in_list(task_list_id: Uuid) -> Self {
        Self {
            task_list_id,
            id: None,
        }
    }

    pub fn one(task_list_id: Uuid, id: Uuid) -> Self {
        Self {
            task_list_id,
            id: Some(id),
        }
    }
}

impl Document for TaskList {
    const COLLECTION: &'static str = "tasklist";

    type Filter = TaskListFilter;
    type Update = UpdateTaskListRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, filter: &TaskListFilter) -> bool {
        match filter {
            TaskListFilter::All => true,
            TaskListFilter::Id(id) => self.id == *id,
        }
    }

    fn pinned_id(filter: &TaskListFilter) -> Option<Uuid> {
        match filter {
            TaskListFilter::All => None,
            TaskListFilter::Id(id) => Some(*id),
        }
    }

    fn apply(&mut self, update: UpdateTaskListRequest) -> Result<(), StoreError> {
        TaskList::apply(self, update)?;
        Ok(())
    }
}

impl Document for Task {
    const COLLECTION: &'static str = "task";

    type Filter = TaskFilter;
    type Update = UpdateTaskRequest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, filter: &TaskFilter) -> bool {
        self.task_list_id == filter.task_list_id && filter.id.map_or(true, |id| self.id == id)
    }

    fn pinned_id(filter: &TaskFilter) -> Option<Uuid> {
        filter.id
    }

    fn apply(&mut self, update: UpdateTaskRequest) -> Result<(), StoreError> {
        Task::apply(self, update);
        Ok(())
    }
}

#[async_trait]
pub trait Collection<D: Document>: Send + Sync {
    async fn insert(&self, document: D) -> Result<D, StoreError>;

    async fn find(&self, filter: &D::Filter) -> Result<Vec<D>, StoreError>;

    async fn find_one(&self, filter: &D::Filter) -> Result<Option<D>, StoreError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Applies `update` to the first match and returns the document as it was
    /// before the update.
    async fn find_one_and_update(
        &self,
        filter: &D::Filter,
        update: D::Update,
    ) -> Result<Option<D>, StoreError>;

    async fn find_one_and_delete(&self, filter: &D::Filter) -> Result<Option<D>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shared::CreateTaskRequest;

    #[rstest]
    #[case("not-an-id")]
    #[case("")]
    #[case("5f8d0d55b54764421b7156c9")]
    fn parse_id_rejects_malformed(#[case] raw: &str) {
        assert!(matches!(parse_id(raw), Err(StoreError::InvalidId(_))));
    }

    #[rstest]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();

        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[rstest]
    fn task_filter_requires_both_fields() {
        let owner = Uuid::new_v4();
        let task = Task::new(owner, CreateTaskRequest::default());

        assert!(task.matches(&TaskFilter::in_list(owner)));
        assert!(task.matches(&TaskFilter::one(owner, task.id)));
        assert!(!task.matches(&TaskFilter::one(Uuid::new_v4(), task.id)));
        assert!(!task.matches(&TaskFilter::one(owner, Uuid::new_v4())));
    }

    #[rstest]
    fn task_list_update_surfaces_validation_error() {
        let mut list = TaskList {
            id: Uuid::new_v4(),
            title: Some("Groceries".to_string()),
        };

        let result = Document::apply(
            &mut list,
            UpdateTaskListRequest {
                title: Some("no".to_string()),
            },
        );

        assert!(matches!(result, Err(StoreError::Validation(_))));
    }
}
