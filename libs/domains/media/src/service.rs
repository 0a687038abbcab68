//! Media service: store and look up binary assets

use database::mongodb::{DocumentStore, ListQuery, parse_object_id};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{MediaError, MediaResult};
use crate::kind::AssetKind;
use crate::models::{AssetFile, AssetMetadata, Upload};

pub struct MediaService<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> MediaService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Store an upload for `owner_id` and return the asset id
    #[instrument(skip(self, upload), fields(kind = kind.label(), size = upload.content.len()))]
    pub async fn upload(
        &self,
        kind: AssetKind,
        owner_id: &str,
        upload: Upload,
    ) -> MediaResult<String> {
        if let Some(limit) = kind.max_bytes() {
            if upload.content.len() > limit {
                return Err(MediaError::TooLarge { limit });
            }
        }

        let document = upload.into_document(kind, owner_id);
        let id = self.store.insert(kind.collection(), document).await?.to_hex();

        info!(id = %id, owner_id, "{} stored", kind.label());
        Ok(id)
    }

    /// Metadata of the most recent upload for `owner_id`
    #[instrument(skip(self), fields(kind = kind.label()))]
    pub async fn latest(&self, kind: AssetKind, owner_id: &str) -> MediaResult<AssetMetadata> {
        let mut assets = self.metadata(kind, owner_id, 1).await?;
        if assets.is_empty() {
            return Err(MediaError::NotFound(kind.none_for_owner_message(owner_id)));
        }
        Ok(assets.swap_remove(0))
    }

    /// Metadata of every upload for `owner_id`, newest first, at most 100
    #[instrument(skip(self), fields(kind = kind.label()))]
    pub async fn list(&self, kind: AssetKind, owner_id: &str) -> MediaResult<Vec<AssetMetadata>> {
        self.metadata(kind, owner_id, database::mongodb::DEFAULT_LIST_LIMIT)
            .await
    }

    async fn metadata(
        &self,
        kind: AssetKind,
        owner_id: &str,
        limit: i64,
    ) -> MediaResult<Vec<AssetMetadata>> {
        let query = ListQuery::new()
            .filter_eq(kind.owner_field(), owner_id)
            .newest_first("uploaded_at")
            .exclude("content")
            .limit(limit);

        let documents = self.store.list(kind.collection(), query).await?;
        documents
            .iter()
            .map(|document| AssetMetadata::from_document(kind, document).map_err(MediaError::from))
            .collect()
    }

    /// The stored bytes of one asset
    ///
    /// A malformed id is rejected before the store is consulted.
    #[instrument(skip(self), fields(kind = kind.label()))]
    pub async fn file(&self, kind: AssetKind, asset_id: &str) -> MediaResult<AssetFile> {
        if parse_object_id(asset_id).is_none() {
            return Err(MediaError::InvalidId {
                label: kind.label(),
                id: asset_id.to_string(),
            });
        }

        let document = self
            .store
            .fetch(kind.collection(), asset_id)
            .await?
            .ok_or_else(|| MediaError::NotFound(kind.not_found_message(asset_id)))?;

        Ok(AssetFile::from_document(kind, document)?)
    }
}
