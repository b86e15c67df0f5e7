use serde::{Deserialize, Serialize};

use crate::entities;
use crate::services::track::TrackWithCast;

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub track_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTrackRequest {
    pub title: String,
    pub genre_id: i64,
    /// Producer ids, as strings on the wire
    #[serde(default)]
    pub cast_id: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenrePayload {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProducerPayload {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TrackPayload {
    pub id: i64,
    pub title: String,
    pub genre: GenrePayload,
    pub cast: Vec<ProducerPayload>,
}

impl From<entities::genre::Model> for GenrePayload {
    fn from(genre: entities::genre::Model) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

impl From<entities::producer::Model> for ProducerPayload {
    fn from(producer: entities::producer::Model) -> Self {
        Self {
            id: producer.id,
            name: producer.name,
        }
    }
}

impl From<TrackWithCast> for TrackPayload {
    fn from(track: TrackWithCast) -> Self {
        Self {
            id: track.track.id,
            title: track.track.title,
            genre: track.genre.into(),
            cast: track.cast.into_iter().map(Into::into).collect(),
        }
    }
}
