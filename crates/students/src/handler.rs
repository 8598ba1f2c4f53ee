use crate::models::{AssignCardRequest, CreateStudentRequest, Student, UpdateStudentRequest};
use crate::service::{StudentError, StudentService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use common::AppState;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            StudentError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            StudentError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            StudentError::NotFound => (StatusCode::NOT_FOUND, "Student not found".to_string()),
            StudentError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

pub fn students_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_students).post(enroll_student))
        .route("/{id}", get(get_student).put(update_student).delete(delete_student))
        .route("/{id}/card", put(assign_card).delete(unassign_card))
        .with_state(state)
}

async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, StudentError> {
    let students = StudentService::list_students(&state.db).await?;
    Ok(Json(students))
}

async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, StudentError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

async fn enroll_student(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, StudentError> {
    let id = StudentService::enroll_student(&state.db, payload.name).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, StudentError> {
    StudentService::rename_student(&state.db, id, payload.name).await?;
    Ok(StatusCode::OK)
}

async fn assign_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignCardRequest>,
) -> Result<impl IntoResponse, StudentError> {
    StudentService::assign_card(&state.db, id, payload.card_id).await?;
    Ok(StatusCode::OK)
}

async fn unassign_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StudentError> {
    StudentService::unassign_card(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StudentError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
