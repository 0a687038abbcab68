//! HTTP handlers for asset upload and retrieval

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_helpers::AppError;
use database::mongodb::DocumentStore;
use std::sync::Arc;

use crate::error::MediaError;
use crate::kind::AssetKind;
use crate::models::{AssetFile, AssetMetadata, Upload, UploadResponse};
use crate::service::MediaService;

/// HTTP body ceiling for uploads; videos are cut off earlier, at their own limit
pub const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Router state for one asset kind
pub struct AssetState<S> {
    pub service: Arc<MediaService<S>>,
    pub kind: AssetKind,
}

impl<S> Clone for AssetState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            kind: self.kind,
        }
    }
}

/// Routes for every asset kind
pub fn media_router<S: DocumentStore + 'static>(service: MediaService<S>) -> Router {
    let service = Arc::new(service);

    AssetKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router.merge(asset_router(Arc::clone(&service), kind))
        })
}

/// Upload, latest-metadata and file routes (plus the gallery for photos) of one kind
pub fn asset_router<S: DocumentStore + 'static>(
    service: Arc<MediaService<S>>,
    kind: AssetKind,
) -> Router {
    let mut router = Router::new()
        .route(
            &kind.upload_path(),
            post(upload::<S>).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(&kind.latest_path(), get(latest::<S>))
        .route(&kind.file_path(), get(file::<S>));

    if let Some(gallery) = kind.gallery_path() {
        router = router.route(&gallery, get(gallery_list::<S>));
    }

    router.with_state(AssetState { service, kind })
}

/// Read the `file` part, giving up as soon as it grows past `max_bytes`
async fn read_upload(
    mut multipart: Multipart,
    max_bytes: Option<usize>,
) -> Result<Upload, MediaError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);

        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            content.extend_from_slice(&chunk);
            if let Some(limit) = max_bytes {
                if content.len() > limit {
                    return Err(MediaError::TooLarge { limit });
                }
            }
        }

        return Ok(Upload {
            filename,
            content_type,
            content,
        });
    }

    Err(MediaError::MissingFile)
}

async fn upload<S: DocumentStore>(
    State(state): State<AssetState<S>>,
    Path(owner_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let upload = read_upload(multipart?, state.kind.max_bytes()).await?;
    let id = state.service.upload(state.kind, &owner_id, upload).await?;

    let body = UploadResponse {
        message: state.kind.uploaded_message().to_string(),
        id,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

async fn latest<S: DocumentStore>(
    State(state): State<AssetState<S>>,
    Path(owner_id): Path<String>,
) -> Result<Json<AssetMetadata>, AppError> {
    Ok(Json(state.service.latest(state.kind, &owner_id).await?))
}

async fn gallery_list<S: DocumentStore>(
    State(state): State<AssetState<S>>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<AssetMetadata>>, AppError> {
    Ok(Json(state.service.list(state.kind, &owner_id).await?))
}

async fn file<S: DocumentStore>(
    State(state): State<AssetState<S>>,
    Path(asset_id): Path<String>,
) -> Result<AssetFile, AppError> {
    Ok(state.service.file(state.kind, &asset_id).await?)
}
