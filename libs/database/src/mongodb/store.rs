//! Document store adapter
//!
//! A thin async abstraction over a MongoDB database that every domain crate
//! talks to. Identifiers cross the boundary as hex strings; a string that is
//! not a valid ObjectId behaves exactly like an id that matches nothing.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId},
};
use tracing::{debug, instrument};

use crate::common::{DatabaseError, DatabaseResult};

/// Upper bound applied to every list query unless overridden
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Parameters for [`DocumentStore::list`]
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Equality filter; empty matches everything
    pub filter: Document,
    /// Sort descending on this field (newest first)
    pub newest_first_by: Option<String>,
    /// Fields left out of the returned documents
    pub exclude: Vec<String>,
    pub limit: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: Document::new(),
            newest_first_by: None,
            exclude: Vec::new(),
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn newest_first(mut self, field: impl Into<String>) -> Self {
        self.newest_first_by = Some(field.into());
        self
    }

    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.exclude.push(field.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    fn sort_document(&self) -> Option<Document> {
        self.newest_first_by.as_ref().map(|field| {
            let mut sort = Document::new();
            sort.insert(field.clone(), -1);
            sort
        })
    }

    fn projection(&self) -> Option<Document> {
        if self.exclude.is_empty() {
            return None;
        }
        Some(
            self.exclude
                .iter()
                .map(|field| (field.clone(), Bson::Int32(0)))
                .collect(),
        )
    }
}

/// Parse a hex ObjectId, returning `None` for anything malformed
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Remove every field whose value is `null`
pub fn strip_nulls(fields: Document) -> Document {
    fields
        .into_iter()
        .filter(|(_, value)| !matches!(value, Bson::Null))
        .collect()
}

/// Async document persistence keyed by collection name
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its generated id
    async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<ObjectId>;

    /// Return at most `query.limit` matching documents
    async fn list(&self, collection: &str, query: ListQuery) -> DatabaseResult<Vec<Document>>;

    /// Find a document by id; malformed and unknown ids both yield `None`
    async fn fetch(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>>;

    /// `$set` the non-null `fields` on the document with `id`
    ///
    /// Returns `false` without touching the database when nothing is left to
    /// set or the id is malformed; otherwise whether a document was modified.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> DatabaseResult<bool>;

    /// Delete by id, returning whether a document was removed
    async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool>;

    /// Lightweight connectivity check
    async fn ping(&self) -> DatabaseResult<()>;
}

/// [`DocumentStore`] backed by a MongoDB database handle
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, document))]
    async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<ObjectId> {
        let result = self.collection(collection).insert_one(document).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            DatabaseError::Generic(format!(
                "insert into {collection} returned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    #[instrument(skip(self))]
    async fn list(&self, collection: &str, query: ListQuery) -> DatabaseResult<Vec<Document>> {
        let sort = query.sort_document();
        let projection = query.projection();

        let coll = self.collection(collection);
        let mut find = coll.find(query.filter).limit(query.limit);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        if let Some(projection) = projection {
            find = find.projection(projection);
        }

        let documents: Vec<Document> = find.await?.try_collect().await?;
        debug!(count = documents.len(), "Listed documents");
        Ok(documents)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        Ok(self
            .collection(collection)
            .find_one(doc! { "_id": oid })
            .await?)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, collection: &str, id: &str, fields: Document) -> DatabaseResult<bool> {
        let fields = strip_nulls(fields);
        if fields.is_empty() {
            return Ok(false);
        }
        let Some(oid) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection(collection)
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;

        Ok(result.modified_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": oid })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> DatabaseResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
