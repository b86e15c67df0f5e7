use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::services::track::TrackService;

pub struct AppState {
    pub db: Arc<Database>,
    pub tracks: TrackService,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        Self {
            tracks: TrackService::new(db.clone()),
            db,
            config,
        }
    }
}
