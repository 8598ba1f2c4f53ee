use crate::models::{CardHolder, CreateIdCardRequest, IdCard, UpdateIdCardRequest};
use crate::service::{IdCardError, IdCardService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::AppState;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for IdCardError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            IdCardError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            IdCardError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            IdCardError::NotFound => (StatusCode::NOT_FOUND, "Card not found".to_string()),
            IdCardError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

pub fn id_cards_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_active_cards).post(issue_card))
        .route("/all", get(list_all_cards))
        .route("/{id}", get(get_card).put(update_card).delete(revoke_card))
        .route("/{id}/holder", get(get_holder))
        .with_state(state)
}

async fn list_active_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IdCard>>, IdCardError> {
    let cards = IdCardService::list_active_cards(&state.db).await?;
    Ok(Json(cards))
}

async fn list_all_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IdCard>>, IdCardError> {
    let cards = IdCardService::list_cards(&state.db).await?;
    Ok(Json(cards))
}

async fn issue_card(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateIdCardRequest>,
) -> Result<impl IntoResponse, IdCardError> {
    let id = IdCardService::issue_card(&state.db, payload.is_active).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<IdCard>, IdCardError> {
    let card = IdCardService::get_card(&state.db, id).await?;
    Ok(Json(card))
}

async fn get_holder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Option<CardHolder>>, IdCardError> {
    let holder = IdCardService::get_holder(&state.db, id).await?;
    Ok(Json(holder))
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateIdCardRequest>,
) -> Result<impl IntoResponse, IdCardError> {
    IdCardService::set_card_state(&state.db, id, payload.is_active).await?;
    Ok(StatusCode::OK)
}

async fn revoke_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, IdCardError> {
    IdCardService::revoke_card(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
