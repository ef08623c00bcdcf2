use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shortest title a task list accepts, counted after trimming.
pub const TITLE_MIN_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title `{title}` is shorter than the minimum allowed length ({min})")]
    TitleTooShort { title: String, min: usize },
}

/// Trims a present title and enforces the minimum length. An absent title is left alone.
pub fn normalize_title(title: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(title) = title else {
        return Ok(None);
    };

    let trimmed = title.trim();
    if trimmed.chars().count() < TITLE_MIN_LEN {
        return Err(ValidationError::TitleTooShort {
            title: trimmed.to_string(),
            min: TITLE_MIN_LEN,
        });
    }

    Ok(Some(trimmed.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub task_list_id: Uuid,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTaskListRequest {
    pub title: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
}

/// Fields a task list update may set. Anything else in the body is ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskListRequest {
    pub title: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TaskList {
    pub fn new(request: CreateTaskListRequest) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: normalize_title(request.title)?,
        })
    }

    /// Overwrites every field present in `update`. The record is untouched on error.
    pub fn apply(&mut self, update: UpdateTaskListRequest) -> Result<(), ValidationError> {
        if update.title.is_some() {
            self.title = normalize_title(update.title)?;
        }
        Ok(())
    }
}

impl Task {
    pub fn new(task_list_id: Uuid, request: CreateTaskRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            task_list_id,
            completed: false,
        }
    }

    pub fn apply(&mut self, update: UpdateTaskRequest) {
        if let Some(title) = update.title {
            self.title = Some(title);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Groceries", "Groceries")]
    #[case("  Work  ", "Work")]
    #[case("abc", "abc")]
    #[case("\tééé\n", "ééé")]
    fn normalize_title_trims_and_accepts(#[case] input: &str, #[case] expected: &str) {
        let title = normalize_title(Some(input.to_string())).unwrap();

        assert_eq!(title.as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("ab")]
    #[case("   ab   ")]
    #[case("      ")]
    fn normalize_title_rejects_short_titles(#[case] input: &str) {
        let result = normalize_title(Some(input.to_string()));

        assert!(matches!(
            result,
            Err(ValidationError::TitleTooShort { min: 3, .. })
        ));
    }

    #[rstest]
    fn normalize_title_passes_absent_title() {
        assert_eq!(normalize_title(None), Ok(None));
    }

    #[rstest]
    fn task_list_new_assigns_id_and_trims() {
        let list = TaskList::new(CreateTaskListRequest {
            title: Some(" Groceries ".to_string()),
        })
        .unwrap();

        assert!(!list.id.is_nil());
        assert_eq!(list.title.as_deref(), Some("Groceries"));
    }

    #[rstest]
    fn task_list_apply_keeps_record_on_invalid_title() {
        let mut list = TaskList::new(CreateTaskListRequest {
            title: Some("Groceries".to_string()),
        })
        .unwrap();

        let result = list.apply(UpdateTaskListRequest {
            title: Some("x".to_string()),
        });

        assert!(result.is_err());
        assert_eq!(list.title.as_deref(), Some("Groceries"));
    }

    #[rstest]
    fn task_list_apply_without_fields_is_noop() {
        let mut list = TaskList::new(CreateTaskListRequest {
            title: Some("Groceries".to_string()),
        })
        .unwrap();
        let before = list.clone();

        list.apply(UpdateTaskListRequest::default()).unwrap();

        assert_eq!(list, before);
    }

    #[rstest]
    fn task_list_apply_treats_null_title_as_absent() {
        let mut list = TaskList::new(CreateTaskListRequest {
            title: Some("Groceries".to_string()),
        })
        .unwrap();
        let update: UpdateTaskListRequest = serde_json::from_value(json!({ "title": null })).unwrap();

        list.apply(update).unwrap();

        assert_eq!(list.title.as_deref(), Some("Groceries"));
    }

    #[rstest]
    fn task_new_stamps_owner_and_skips_validation() {
        let owner = Uuid::new_v4();
        let task = Task::new(
            owner,
            CreateTaskRequest {
                title: Some("x".to_string()),
            },
        );

        assert_eq!(task.task_list_id, owner);
        assert_eq!(task.title.as_deref(), Some("x"));
        assert!(!task.completed);
    }

    #[rstest]
    fn task_apply_sets_present_fields_only() {
        let mut task = Task::new(
            Uuid::new_v4(),
            CreateTaskRequest {
                title: Some("Milk".to_string()),
            },
        );

        task.apply(UpdateTaskRequest {
            title: None,
            completed: Some(true),
        });

        assert_eq!(task.title.as_deref(), Some("Milk"));
        assert!(task.completed);
    }

    #[rstest]
    fn task_serializes_owner_in_camel_case() {
        let owner = Uuid::new_v4();
        let task = Task::new(
            owner,
            CreateTaskRequest {
                title: Some("Milk".to_string()),
            },
        );

        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["taskListId"], json!(owner.to_string()));
        assert_eq!(value["title"], json!("Milk"));
        assert_eq!(value["completed"], json!(false));
    }

    #[rstest]
    fn update_request_ignores_unknown_fields() {
        let update: UpdateTaskRequest =
            serde_json::from_value(json!({"taskListId": Uuid::new_v4(), "completed": true}))
                .unwrap();

        assert_eq!(update.title, None);
        assert_eq!(update.completed, Some(true));
    }
}
