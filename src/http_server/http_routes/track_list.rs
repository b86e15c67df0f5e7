use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::http_server::error::ApiError;
use crate::http_server::http_routes::payload::TrackPayload;
use crate::http_server::state::AppState;

/// `GET /track/all`
pub async fn list_tracks(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let tracks = state.tracks.list_tracks().await?;
    let tracks: Vec<TrackPayload> = tracks.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "track": tracks })))
}
