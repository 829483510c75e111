use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a task.
///
/// All four fields are required; an update is a full replace.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task. Between 1 and 200 characters.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    /// A description of the task. Between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000, message = "Description is required"))]
    pub description: String,

    /// The day work on the task begins.
    pub start_date: NaiveDate,

    /// The day the task is due.
    pub end_date: NaiveDate,
}

/// A task record as stored in the database and returned by the API.
///
/// Tasks are not linked to user identity; wire field names are camelCase
/// (`startDate`, `endDate`).
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` with a fresh UUID and current
    /// timestamps.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_input() -> TaskInput {
        TaskInput {
            title: "T".to_string(),
            description: "0123456789".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    #[test]
    fn test_task_creation() {
        let task = Task::new(sample_input());
        assert_eq!(task.title, "T");
        assert_eq!(task.description, "0123456789");
        assert_eq!(task.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(task.end_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_validation() {
        assert!(sample_input().validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            ..sample_input()
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            ..sample_input()
        };
        assert!(long_title.validate().is_err());

        let empty_description = TaskInput {
            description: "".to_string(),
            ..sample_input()
        };
        assert!(empty_description.validate().is_err());

        let long_description = TaskInput {
            description: "b".repeat(1001),
            ..sample_input()
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_task_wire_format_is_camel_case() {
        let task = Task::new(sample_input());
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["title"], "T");
        assert_eq!(value["description"], "0123456789");
        assert_eq!(value["startDate"], "2024-01-01");
        assert_eq!(value["endDate"], "2024-01-02");
        assert!(value.get("start_date").is_none());
    }

    #[test]
    fn test_task_input_missing_field_fails_deserialization() {
        let result = serde_json::from_value::<TaskInput>(serde_json::json!({
            "title": "T",
            "description": "0123456789",
            "startDate": "2024-01-01"
        }));
        assert!(result.is_err());
    }
}
