//! In-memory `DocumentStore`
//!
//! Mirrors the MongoDB semantics the services rely on: generated ObjectIds,
//! equality filters, descending sort, field exclusion, `$set` updates that
//! report "modified" only when a value actually changed.

use async_trait::async_trait;
use database::mongodb::bson::{Bson, Document, oid::ObjectId};
use database::mongodb::{DocumentStore, ListQuery, parse_object_id, strip_nulls};
use database::{DatabaseError, DatabaseResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    /// Number of documents stored in `collection`
    pub fn count(&self, collection: &str) -> usize {
        self.lock().get(collection).map_or(0, Vec::len)
    }

    /// Copy of every stored document in `collection`, in insertion order
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Document>>> {
        // A panicking test must not poison the store for the others
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_online(&self) -> DatabaseResult<()> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            Err(DatabaseError::ConnectionFailed(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn has_id(document: &Document, oid: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(id)) if id == oid)
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        (Some(Bson::Double(a)), Some(Bson::Double(b))) => a.total_cmp(b),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(Bson::ObjectId(a)), Some(Bson::ObjectId(b))) => a.cmp(b),
        // Missing fields sort before present ones, as in MongoDB
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<ObjectId> {
        self.ensure_online()?;

        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => ObjectId::new(),
        };

        let mut stored = Document::new();
        stored.insert("_id", id);
        for (field, value) in document {
            if field != "_id" {
                stored.insert(field, value);
            }
        }

        self.lock()
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(id)
    }

    async fn list(&self, collection: &str, query: ListQuery) -> DatabaseResult<Vec<Document>> {
        self.ensure_online()?;

        let mut matching: Vec<Document> = self
            .lock()
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filter(document, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(field) = &query.newest_first_by {
            matching.sort_by(|a, b| compare_bson(b.get(field), a.get(field)));
        }

        if query.limit > 0 {
            matching.truncate(query.limit as usize);
        }

        for document in &mut matching {
            for field in &query.exclude {
                document.remove(field);
            }
        }

        Ok(matching)
    }

    async fn fetch(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>> {
        self.ensure_online()?;

        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        Ok(self.lock().get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| has_id(document, &oid))
                .cloned()
        }))
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> DatabaseResult<bool> {
        self.ensure_online()?;

        let fields = strip_nulls(fields);
        if fields.is_empty() {
            return Ok(false);
        }
        let Some(oid) = parse_object_id(id) else {
            return Ok(false);
        };

        let mut collections = self.lock();
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| has_id(document, &oid)))
        else {
            return Ok(false);
        };

        let mut modified = false;
        for (field, value) in fields {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                modified = true;
            }
        }
        Ok(modified)
    }

    async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool> {
        self.ensure_online()?;

        let Some(oid) = parse_object_id(id) else {
            return Ok(false);
        };

        let mut collections = self.lock();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|document| !has_id(document, &oid));
        Ok(documents.len() < before)
    }

    async fn ping(&self) -> DatabaseResult<()> {
        self.ensure_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::mongodb::bson::{DateTime, doc};

    #[tokio::test]
    async fn test_insert_then_fetch() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert("venues", doc! { "name": "Hall", "capacity": 10 })
            .await
            .unwrap();

        let found = store.fetch("venues", &id.to_hex()).await.unwrap().unwrap();
        assert_eq!(found.get_object_id("_id").unwrap(), id);
        assert_eq!(found.get_str("name").unwrap(), "Hall");
        assert_eq!(store.count("venues"), 1);
    }

    #[tokio::test]
    async fn test_fetch_malformed_and_unknown_ids() {
        let store = MemoryDocumentStore::new();
        store.insert("venues", doc! { "name": "Hall" }).await.unwrap();

        assert!(store.fetch("venues", "bogus").await.unwrap().is_none());
        let unknown = ObjectId::new().to_hex();
        assert!(store.fetch("venues", &unknown).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_reports_modification() {
        let store = MemoryDocumentStore::new();
        let id = store
            .insert("venues", doc! { "name": "Hall", "capacity": 10 })
            .await
            .unwrap()
            .to_hex();

        assert!(store
            .update("venues", &id, doc! { "capacity": 250 })
            .await
            .unwrap());
        // Same value again is not a modification
        assert!(!store
            .update("venues", &id, doc! { "capacity": 250 })
            .await
            .unwrap());
        // Only nulls is nothing to set
        assert!(!store
            .update("venues", &id, doc! { "name": Bson::Null })
            .await
            .unwrap());
        assert!(!store
            .update("venues", "bogus", doc! { "capacity": 1 })
            .await
            .unwrap());

        let found = store.fetch("venues", &id).await.unwrap().unwrap();
        assert_eq!(found.get_i32("capacity").unwrap(), 250);
        assert_eq!(found.get_str("name").unwrap(), "Hall");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("events", doc! { "name": "Gala" }).await.unwrap().to_hex();

        assert!(store.delete("events", &id).await.unwrap());
        assert!(!store.delete("events", &id).await.unwrap());
        assert!(!store.delete("events", "bogus").await.unwrap());
        assert_eq!(store.count("events"), 0);
    }

    #[tokio::test]
    async fn test_list_filter_sort_exclude_limit() {
        let store = MemoryDocumentStore::new();
        for (venue, millis) in [("a", 1_000), ("b", 2_000), ("a", 3_000), ("a", 2_000)] {
            store
                .insert(
                    "venue_photos",
                    doc! {
                        "venue_id": venue,
                        "content": "bytes",
                        "uploaded_at": DateTime::from_millis(millis),
                    },
                )
                .await
                .unwrap();
        }

        let photos = store
            .list(
                "venue_photos",
                ListQuery::new()
                    .filter_eq("venue_id", "a")
                    .newest_first("uploaded_at")
                    .exclude("content")
                    .limit(2),
            )
            .await
            .unwrap();

        assert_eq!(photos.len(), 2);
        assert_eq!(
            photos[0].get_datetime("uploaded_at").unwrap().timestamp_millis(),
            3_000
        );
        assert_eq!(
            photos[1].get_datetime("uploaded_at").unwrap().timestamp_millis(),
            2_000
        );
        assert!(photos.iter().all(|photo| !photo.contains_key("content")));
        // Stored documents keep their content
        assert!(store.documents("venue_photos")[0].contains_key("content"));
    }

    #[tokio::test]
    async fn test_list_default_limit() {
        let store = MemoryDocumentStore::new();
        for i in 0..105 {
            store.insert("attendees", doc! { "n": i }).await.unwrap();
        }

        let listed = store.list("attendees", ListQuery::new()).await.unwrap();
        assert_eq!(listed.len(), 100);
        assert_eq!(listed[0].get_i32("n").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);

        assert!(store.ping().await.is_err());
        assert!(matches!(
            store.list("events", ListQuery::new()).await,
            Err(DatabaseError::ConnectionFailed(_))
        ));

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
