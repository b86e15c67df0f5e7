use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

use crate::http_server::error::ApiError;
use crate::http_server::http_routes::payload::{CreateTrackRequest, TrackPayload, TrackQuery};
use crate::http_server::state::AppState;
use crate::services::track::TrackError;

/// `GET /track?track_id=<id>`
///
/// Returns the matched track under the `Tracks` key.
pub async fn get_track(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<Value>, ApiError> {
    let track = state.tracks.get_track(query.track_id).await?;

    Ok(Json(json!({ "Tracks": TrackPayload::from(track) })))
}

/// `POST /track`
pub async fn create_track(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTrackRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .tracks
        .create_track(body.title, body.genre_id, &body.cast_id)
        .await
        .map_err(|err| match err {
            TrackError::Database(_) => {
                log::error!("Failed to persist track: {err}");
                ApiError::Internal(
                    "An error occurred while trying to add new Track to database.".to_string(),
                )
            }
            other => ApiError::from(other),
        })?;

    Ok(Json(json!({ "message": "New Track has been created." })))
}
