use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database as SeaDatabase};

use crate::database::Database;

/// In-memory catalog database with the crate's migrations applied, so tests
/// exercise the same schema the server creates at startup.
pub async fn test_db() -> Arc<Database> {
    let conn = SeaDatabase::connect("sqlite::memory:?mode=rwc")
        .await
        .unwrap();

    // Enable foreign keys
    conn.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();

    migration::Migrator::up(&conn, None)
        .await
        .expect("migrations should apply to an empty database");

    Arc::new(Database { conn })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_db_creates_catalog_tables() {
        let db = test_db().await;

        entities::genre::Entity::find().all(&db.conn).await.unwrap();
        entities::producer::Entity::find().all(&db.conn).await.unwrap();
        entities::track::Entity::find().all(&db.conn).await.unwrap();
        entities::track_producer::Entity::find()
            .all(&db.conn)
            .await
            .unwrap();
    }
}
