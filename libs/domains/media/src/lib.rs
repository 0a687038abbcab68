//! Media Domain
//!
//! Event posters, promotional videos and venue photos. Each upload is kept
//! as a single MongoDB document holding the raw bytes next to its metadata;
//! older uploads are never replaced, the newest one wins on lookup.
//!
//! ```text
//! POST /upload_{kind}/{owner}  ─► MediaService::upload ─► {collection}
//! GET  /{kind}/{owner}         ─► newest metadata (no bytes)
//! GET  /{kind}/file/{id}       ─► raw bytes, inline
//! GET  /venue_photos/{venue}   ─► every photo, newest first
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_media::{MediaService, media_router};
//!
//! let router = media_router(MediaService::new(store.clone()));
//! ```

pub mod docs;
pub mod error;
pub mod handlers;
pub mod kind;
pub mod models;
pub mod service;

pub use docs::document_asset;
pub use error::{MediaError, MediaResult};
pub use handlers::{AssetState, UPLOAD_BODY_LIMIT, asset_router, media_router};
pub use kind::{AssetKind, MAX_VIDEO_BYTES};
pub use models::{AssetFile, AssetMetadata, Upload, UploadResponse};
pub use service::MediaService;
