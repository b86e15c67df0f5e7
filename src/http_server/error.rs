use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::track::TrackError;

/// API error taxonomy, rendered as `(status, {"message": ...})`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<TrackError> for ApiError {
    fn from(err: TrackError) -> Self {
        match err {
            TrackError::TrackNotFound(_) | TrackError::ProducerNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            TrackError::TitleExists(_) => ApiError::BadRequest(err.to_string()),
            TrackError::MissingGenre(_) | TrackError::Database(_) => {
                log::error!("{err}");
                ApiError::Internal("Internal server error.".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
