use crate::error::AppError;
use crate::models::{to_extended_json, Song};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson};
use serde_json::json;

pub async fn list_songs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut cursor = state
        .db
        .songs()
        .find(None, None)
        .await
        .map_err(AppError::from)?;

    let mut songs = Vec::new();
    while let Some(song) = cursor.try_next().await.map_err(AppError::from)? {
        songs.push(to_extended_json(song));
    }

    Ok(Json(json!({ "songs": songs })))
}

pub async fn get_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let song = state
        .db
        .songs()
        .find_one(doc! { "id": song_id }, None)
        .await
        .map_err(AppError::from)?;

    match song {
        Some(song) => Ok(Json(to_extended_json(song)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "song with id not found" })),
        )
            .into_response()),
    }
}

pub async fn create_song(
    State(state): State<AppState>,
    Json(song): Json<Song>,
) -> Result<impl IntoResponse, AppError> {
    let id = song
        .get("id")
        .cloned()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("song body must contain an id field")))?;

    // Lookup-then-insert, not a unique index; concurrent creates with the
    // same id can still both land.
    let existing = state
        .db
        .songs()
        .find_one(doc! { "id": id.clone() }, None)
        .await
        .map_err(AppError::from)?;

    if existing.is_some() {
        return Ok((
            StatusCode::FOUND,
            Json(json!({ "Message": format!("song with id {} already present", id) })),
        )
            .into_response());
    }

    let result = state
        .db
        .songs()
        .insert_one(&song, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert song: {}", e);
            AppError::from(e)
        })?;

    let inserted_id = match &result.inserted_id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    };

    tracing::info!(id = %id, inserted_id = %inserted_id, "Song created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "inserted id": inserted_id })),
    )
        .into_response())
}

pub async fn update_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    Json(changes): Json<Song>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state
        .db
        .songs()
        .find_one(doc! { "id": song_id }, None)
        .await
        .map_err(AppError::from)?;

    if existing.is_none() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "song not found" })),
        )
            .into_response());
    }

    let result = state
        .db
        .songs()
        .update_one(doc! { "id": song_id }, doc! { "$set": changes }, None)
        .await
        .map_err(AppError::from)?;

    if result.modified_count == 0 {
        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "song found, but nothing updated" })),
        )
            .into_response());
    }

    let updated = state
        .db
        .songs()
        .find_one(doc! { "id": song_id }, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("song {} missing after update", song_id))
        })?;

    tracing::info!(id = song_id, "Song updated");

    Ok((StatusCode::CREATED, Json(to_extended_json(updated))).into_response())
}

pub async fn delete_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .songs()
        .delete_one(doc! { "id": song_id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "song not found" })),
        )
            .into_response());
    }

    tracing::info!(id = song_id, "Song deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
