//! HTTP handlers shared by every resource

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::ValidatedJson;
use database::mongodb::DocumentStore;
use std::sync::Arc;

use crate::error::ResourceResult;
use crate::models::{MessageResponse, Resource, Stored};
use crate::service::ResourceService;

/// Router state for one resource
pub type ResourceState<T, S> = Arc<ResourceService<T, S>>;

/// Mount create/list at `T::URL` and get/update/delete at `T::URL/{id}`
///
/// ```ignore
/// let venues = ResourceService::<Venue, _>::new(store.clone());
/// let app = Router::new().merge(resource_router(venues));
/// ```
pub fn resource_router<T, S>(service: ResourceService<T, S>) -> Router
where
    T: Resource,
    S: DocumentStore + 'static,
{
    let item_path = format!("{}/{{id}}", T::URL);

    Router::new()
        .route(T::URL, get(list::<T, S>).post(create::<T, S>))
        .route(
            &item_path,
            get(fetch::<T, S>)
                .put(update::<T, S>)
                .delete(remove::<T, S>),
        )
        .with_state(Arc::new(service))
}

async fn create<T: Resource, S: DocumentStore>(
    State(service): State<ResourceState<T, S>>,
    ValidatedJson(input): ValidatedJson<T>,
) -> ResourceResult<impl IntoResponse> {
    let id = service.create(input).await?;
    let body = MessageResponse::new(format!("{} created", T::NAME), id);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn list<T: Resource, S: DocumentStore>(
    State(service): State<ResourceState<T, S>>,
) -> ResourceResult<Json<Vec<Stored<T>>>> {
    Ok(Json(service.list().await?))
}

async fn fetch<T: Resource, S: DocumentStore>(
    State(service): State<ResourceState<T, S>>,
    Path(id): Path<String>,
) -> ResourceResult<Json<Stored<T>>> {
    Ok(Json(service.get(&id).await?))
}

async fn update<T: Resource, S: DocumentStore>(
    State(service): State<ResourceState<T, S>>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<T::Update>,
) -> ResourceResult<Json<MessageResponse>> {
    service.update(&id, changes).await?;
    Ok(Json(MessageResponse::new(
        format!("{} updated successfully", T::NAME),
        id,
    )))
}

async fn remove<T: Resource, S: DocumentStore>(
    State(service): State<ResourceState<T, S>>,
    Path(id): Path<String>,
) -> ResourceResult<Json<MessageResponse>> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new(
        format!("{} deleted successfully", T::NAME),
        id,
    )))
}
