use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
#[cfg(not(debug_assertions))]
use tower_http::cors::{AllowMethods, Any};
use tower_http::cors::CorsLayer;

use crate::{
    config::Config,
    database::Database,
    http_server::{admin, http_routes, state::AppState},
};

pub fn router(app_state: Arc<AppState>) -> Router {
    #[cfg(debug_assertions)]
    let cors_layer = CorsLayer::permissive();

    #[cfg(not(debug_assertions))]
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(AllowMethods::any());

    Router::new()
        .route(
            "/track",
            get(http_routes::track::get_track).post(http_routes::track::create_track),
        )
        .route("/track/all", get(http_routes::track_list::list_tracks))
        .nest("/admin", admin::router())
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(app_state)
}

pub async fn start(port: u16, database: Database, config: Config) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState::new(Arc::new(database), config));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;

    log::info!("Listening on port {}", port);
    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities;
    use crate::test_utils::test_db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};
    use tower::ServiceExt;

    async fn test_app() -> (Router, Arc<AppState>) {
        let db = test_db().await;
        let state = Arc::new(AppState::new(db, Config::default()));
        (router(state.clone()), state)
    }

    async fn seed_genre(state: &AppState, name: &str) -> i64 {
        let genre = entities::genre::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        genre.insert(&state.db.conn).await.unwrap().id
    }

    async fn seed_producer(state: &AppState, name: &str) -> i64 {
        let producer = entities::producer::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        producer.insert(&state.db.conn).await.unwrap().id
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_tracks() {
        let (app, state) = test_app().await;
        let genre_id = seed_genre(&state, "Country").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/track",
                serde_json::json!({ "title": "Song A", "genre_id": genre_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "New Track has been created.");

        let response = app
            .oneshot(Request::get("/track/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["track"].as_array().unwrap().len(), 1);
        assert_eq!(body["track"][0]["title"], "Song A");
        assert_eq!(body["track"][0]["genre"]["id"], genre_id);
        assert_eq!(body["track"][0]["cast"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_single_track() {
        let (app, state) = test_app().await;
        let genre_id = seed_genre(&state, "Blues").await;
        let producer_id = seed_producer(&state, "Producer One").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/track",
                serde_json::json!({
                    "title": "Song B",
                    "genre_id": genre_id,
                    "cast_id": [producer_id.to_string()],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::get("/track?track_id=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["Tracks"]["title"], "Song B");
        assert_eq!(body["Tracks"]["cast"][0]["name"], "Producer One");
    }

    #[tokio::test]
    async fn test_get_unknown_track_is_404() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(
                Request::get("/track?track_id=42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "Track with id: 42 does not exist in database."
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_title_is_400() {
        let (app, state) = test_app().await;
        let genre_id = seed_genre(&state, "Rock").await;

        let request = serde_json::json!({ "title": "Song C", "genre_id": genre_id });
        let response = app
            .clone()
            .oneshot(post_json("/track", request.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json("/track", request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "Track with title: Song C already exists in database."
        );

        let response = app
            .oneshot(Request::get("/track/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["track"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_with_unknown_producer_is_404() {
        let (app, state) = test_app().await;
        let genre_id = seed_genre(&state, "Jazz").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/track",
                serde_json::json!({
                    "title": "Song D",
                    "genre_id": genre_id,
                    "cast_id": ["999"],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "Producer with id: 999 does not exist in database."
        );

        // The track was not persisted
        let response = app
            .oneshot(Request::get("/track/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["track"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_admin_pages() {
        let (app, state) = test_app().await;
        seed_genre(&state, "Country").await;

        let response = app
            .clone()
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get("/admin/genre").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Country"));
    }

    #[tokio::test]
    async fn test_admin_create_genre() {
        let (app, state) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/genre/new")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=Soul"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let genres = entities::genre::Entity::find()
            .all(&state.db.conn)
            .await
            .unwrap();
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].name, "Soul");
    }

    #[tokio::test]
    async fn test_admin_edit_genre() {
        let (app, state) = test_app().await;
        let genre_id = seed_genre(&state, "Contry").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/admin/genre/{genre_id}/edit"))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=Country"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let genre = entities::genre::Entity::find_by_id(genre_id)
            .one(&state.db.conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(genre.name, "Country");
    }

    #[tokio::test]
    async fn test_admin_delete_producer() {
        let (app, state) = test_app().await;
        let producer_id = seed_producer(&state, "Producer One").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/admin/producer/{producer_id}/delete"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let producers = entities::producer::Entity::find()
            .all(&state.db.conn)
            .await
            .unwrap();
        assert!(producers.is_empty());
    }

    #[tokio::test]
    async fn test_admin_edit_unknown_id_is_404() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/genre/42/edit")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=Country"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
