//! HTTP routes of the Event Management API
//!
//! Everything is mounted at the root; `create_router` adds the docs and
//! middleware on top.

pub mod health;
pub mod root;

use axum::Router;
use database::mongodb::DocumentStore;
use domain_events::{Attendee, Booking, Event, ResourceService, Venue, resource_router};
use domain_media::{MediaService, media_router};
use std::sync::Arc;

use crate::state::AppState;

/// All API routes over one document store
pub fn routes<S: DocumentStore + 'static>(database: &str, store: Arc<S>) -> Router {
    Router::new()
        .merge(root::router())
        .merge(health::router(AppState::new(database, store.clone())))
        .merge(resource_router(ResourceService::<Event, S>::new(store.clone())))
        .merge(resource_router(ResourceService::<Venue, S>::new(store.clone())))
        .merge(resource_router(ResourceService::<Attendee, S>::new(store.clone())))
        .merge(resource_router(ResourceService::<Booking, S>::new(store.clone())))
        .merge(media_router(MediaService::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use test_utils::MemoryDocumentStore;
    use tower::ServiceExt;

    fn app(store: Arc<MemoryDocumentStore>) -> Router {
        routes("event_management_db", store)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let (status, body) = get_json(app(Arc::new(MemoryDocumentStore::new())), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "Welcome to Event Management API",
                "docs": "/docs",
                "health": "/health"
            })
        );
    }

    #[tokio::test]
    async fn test_health_reports_connection() {
        let store = Arc::new(MemoryDocumentStore::new());

        let (status, body) = get_json(app(store.clone()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "healthy", "database": "event_management_db", "connected": true})
        );

        store.set_offline(true);
        let (status, body) = get_json(app(store), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], false);
    }

    #[tokio::test]
    async fn test_ready_follows_store() {
        let store = Arc::new(MemoryDocumentStore::new());

        let (status, body) = get_json(app(store.clone()), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "mongodb": "connected"}));

        store.set_offline(true);
        let (status, body) = get_json(app(store), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["mongodb"], "disconnected");
    }

    #[tokio::test]
    async fn test_domain_routes_share_one_store() {
        let store = Arc::new(MemoryDocumentStore::new());
        let app = app(store.clone());

        let response = app
            .clone()
            .oneshot(
                Request::post("/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "name": "RustConf",
                            "description": "Annual conference",
                            "date": "2026-09-10",
                            "venue_id": "v1",
                            "max_attendees": 500
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let (status, events) = get_json(app.clone(), "/events").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events.as_array().unwrap().len(), 1);
        assert_eq!(store.count("events"), 1);

        let (status, photos) = get_json(app, "/venue_photos/v1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photos, json!([]));
    }
}
