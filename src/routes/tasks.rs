use crate::{
    error::AppError,
    models::{Task, TaskInput},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, start_date, end_date, created_at, updated_at";

/// Retrieves the list of tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: `{message, data}` with a JSON array of tasks.
/// - `401/403`: missing or invalid bearer token.
/// - `500 Internal Server Error`: database errors.
#[get("")]
pub async fn get_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY created_at DESC",
        TASK_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task list",
        "data": tasks,
    })))
}

/// Creates a new task.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`: `title`, `description`, `startDate`,
/// `endDate` — all required.
///
/// ## Responses:
/// - `201 Created`: `{message, data}` with the created task.
/// - `400 Bad Request`: missing fields or failed validation; nothing written.
/// - `401/403`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner());

    let result = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, start_date, end_date) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.start_date)
    .bind(task.end_date)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "data": result,
    })))
}

/// Retrieves a single task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{message, data}` with the task.
/// - `404 Not Found`: no task with the given id.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Task details",
            "data": task,
        }))),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Updates an existing task. This is a full replace: all `TaskInput` fields
/// are required.
///
/// ## Responses:
/// - `200 OK`: `{message, data}` with the updated task.
/// - `400 Bad Request`: missing fields or failed validation.
/// - `404 Not Found`: no task with the given id; the table is unchanged.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, description = $2, start_date = $3, end_date = $4, \
         updated_at = now() WHERE id = $5 RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(task_data.start_date)
    .bind(task_data.end_date)
    .bind(task_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match updated {
        Some(task) => Ok(HttpResponse::Ok().json(json!({
            "message": "Task updated successfully",
            "data": task,
        }))),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{message}` on successful deletion.
/// - `404 Not Found`: no task with the given id.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully",
    })))
}
