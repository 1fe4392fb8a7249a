use crate::error::AppError;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use mongodb::bson::doc;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}

pub async fn count_songs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let count = state
        .db
        .songs()
        .count_documents(doc! {}, None)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({ "count": count })))
}
