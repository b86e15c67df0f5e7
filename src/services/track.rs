use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};

use crate::database::Database;
use crate::entities;

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Track with id: {0} does not exist in database.")]
    TrackNotFound(i64),
    #[error("Track with title: {0} already exists in database.")]
    TitleExists(String),
    #[error("Producer with id: {0} does not exist in database.")]
    ProducerNotFound(String),
    #[error("Track {0} has no associated genre")]
    MissingGenre(i64),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// A track joined with its genre and producer rows.
pub struct TrackWithCast {
    pub track: entities::track::Model,
    pub genre: entities::genre::Model,
    pub cast: Vec<entities::producer::Model>,
}

pub struct TrackService {
    db: Arc<Database>,
}

impl TrackService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a track with the given title, genre and cast.
    ///
    /// Cast ids arrive as strings from the API; an id that does not parse as
    /// an integer cannot match a producer row and is reported the same way as
    /// a missing one. The track and its cast links are written in a single
    /// transaction, so a failed create leaves no partial rows behind.
    pub async fn create_track(
        &self,
        title: String,
        genre_id: i64,
        cast_ids: &[String],
    ) -> Result<(), TrackError> {
        let existing = entities::track::Entity::find()
            .filter(entities::track::Column::Title.eq(&title))
            .one(&self.db.conn)
            .await?;

        if existing.is_some() {
            return Err(TrackError::TitleExists(title));
        }

        // Resolve the whole cast before anything is written
        let mut cast = Vec::with_capacity(cast_ids.len());
        for raw_id in cast_ids {
            let producer = match raw_id.parse::<i64>() {
                Ok(id) => {
                    entities::producer::Entity::find_by_id(id)
                        .one(&self.db.conn)
                        .await?
                }
                Err(_) => None,
            };

            match producer {
                Some(producer) => cast.push(producer),
                None => return Err(TrackError::ProducerNotFound(raw_id.clone())),
            }
        }

        log::debug!("Creating track: '{}' (genre: {})", title, genre_id);

        self.db
            .conn
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let track = entities::track::ActiveModel {
                        title: Set(title),
                        genre_id: Set(genre_id),
                        ..Default::default()
                    };
                    let track = track.insert(txn).await?;

                    for producer in cast {
                        let link = entities::track_producer::ActiveModel {
                            producer_id: Set(producer.id),
                            track_id: Set(track.id),
                        };
                        link.insert(txn).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|err| match err {
                TransactionError::Connection(e) => TrackError::Database(e),
                TransactionError::Transaction(e) => TrackError::Database(e),
            })?;

        Ok(())
    }

    pub async fn get_track(&self, track_id: i64) -> Result<TrackWithCast, TrackError> {
        let (track, genre) = entities::track::Entity::find_by_id(track_id)
            .find_also_related(entities::genre::Entity)
            .one(&self.db.conn)
            .await?
            .ok_or(TrackError::TrackNotFound(track_id))?;

        // genre_id is non-null, so a missing genre means a broken database
        let genre = genre.ok_or(TrackError::MissingGenre(track.id))?;

        let cast = track
            .find_related(entities::producer::Entity)
            .order_by_asc(entities::producer::Column::Id)
            .all(&self.db.conn)
            .await?;

        Ok(TrackWithCast { track, genre, cast })
    }

    pub async fn list_tracks(&self) -> Result<Vec<TrackWithCast>, TrackError> {
        let rows = entities::track::Entity::find()
            .find_also_related(entities::genre::Entity)
            .order_by_asc(entities::track::Column::Id)
            .all(&self.db.conn)
            .await?;

        let mut tracks = Vec::with_capacity(rows.len());
        for (track, genre) in rows {
            let genre = genre.ok_or(TrackError::MissingGenre(track.id))?;
            let cast = track
                .find_related(entities::producer::Entity)
                .order_by_asc(entities::producer::Column::Id)
                .all(&self.db.conn)
                .await?;
            tracks.push(TrackWithCast { track, genre, cast });
        }

        Ok(tracks)
    }
}
