//! Resource service: one generic CRUD implementation for every schema

use database::DatabaseError;
use database::mongodb::bson;
use database::mongodb::{DocumentStore, ListQuery};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{ResourceError, ResourceResult};
use crate::models::{Resource, Stored};

/// CRUD over the collection named by `T::COLLECTION`
pub struct ResourceService<T, S> {
    store: Arc<S>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource, S: DocumentStore> ResourceService<T, S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// Insert a new record and return its id
    #[instrument(skip(self, input), fields(collection = T::COLLECTION))]
    pub async fn create(&self, input: T) -> ResourceResult<String> {
        input.validate()?;

        let document = bson::to_document(&input).map_err(DatabaseError::from)?;
        let id = self.store.insert(T::COLLECTION, document).await?.to_hex();

        info!(id = %id, "{} created", T::NAME);
        Ok(id)
    }

    /// Up to 100 records in storage order
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn list(&self) -> ResourceResult<Vec<Stored<T>>> {
        let documents = self.store.list(T::COLLECTION, ListQuery::new()).await?;

        documents
            .into_iter()
            .map(|document| Stored::from_document(document).map_err(ResourceError::from))
            .collect()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn get(&self, id: &str) -> ResourceResult<Stored<T>> {
        let document = self
            .store
            .fetch(T::COLLECTION, id)
            .await?
            .ok_or_else(|| ResourceError::not_found(T::NAME, id))?;

        Ok(Stored::from_document(document)?)
    }

    /// Apply the fields present in `changes`
    ///
    /// Fails with `NotFound` before looking at the payload when the record
    /// does not exist, and with `NothingToUpdate` when no field is present or
    /// no stored value actually changed.
    #[instrument(skip(self, changes), fields(collection = T::COLLECTION))]
    pub async fn update(&self, id: &str, changes: T::Update) -> ResourceResult<()> {
        changes.validate()?;

        if self.store.fetch(T::COLLECTION, id).await?.is_none() {
            return Err(ResourceError::not_found(T::NAME, id));
        }

        let fields = bson::to_document(&changes).map_err(DatabaseError::from)?;
        if fields.is_empty() {
            return Err(ResourceError::NothingToUpdate);
        }

        if !self.store.update(T::COLLECTION, id, fields).await? {
            return Err(ResourceError::NothingToUpdate);
        }

        info!(id, "{} updated", T::NAME);
        Ok(())
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn delete(&self, id: &str) -> ResourceResult<()> {
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(ResourceError::not_found(T::NAME, id));
        }

        info!(id, "{} deleted", T::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attendee, Booking, BookingUpdate, Venue, VenueUpdate};
    use database::mongodb::MockDocumentStore;
    use database::mongodb::bson::oid::ObjectId;
    use test_utils::{MemoryDocumentStore, TestDataBuilder};

    fn venue_service() -> (Arc<MemoryDocumentStore>, ResourceService<Venue, MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        (store.clone(), ResourceService::new(store))
    }

    fn hall() -> Venue {
        Venue {
            name: "Hall A".into(),
            address: "123 St".into(),
            capacity: 200,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (_, service) = venue_service();

        let id = service.create(hall()).await.unwrap();
        let stored = service.get(&id).await.unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.record, hall());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let (store, service) = venue_service();
        let mut venue = hall();
        venue.capacity = -5;

        let err = service.create(venue).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));
        assert_eq!(store.count("venues"), 0);
    }

    #[tokio::test]
    async fn test_get_malformed_and_missing_ids_are_not_found() {
        let (_, service) = venue_service();

        for id in ["not-an-id".to_string(), ObjectId::new().to_hex()] {
            let err = service.get(&id).await.unwrap_err();
            assert!(matches!(err, ResourceError::NotFound { name: "Venue", .. }));
        }
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_given_fields() {
        let (_, service) = venue_service();
        let id = service.create(hall()).await.unwrap();

        let changes = VenueUpdate {
            capacity: Some(250),
            ..Default::default()
        };
        service.update(&id, changes).await.unwrap();

        let stored = service.get(&id).await.unwrap();
        assert_eq!(stored.record.capacity, 250);
        assert_eq!(stored.record.name, "Hall A");
        assert_eq!(stored.record.address, "123 St");
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let (_, service) = venue_service();
        let id = service.create(hall()).await.unwrap();

        let err = service.update(&id, VenueUpdate::default()).await.unwrap_err();
        assert!(matches!(err, ResourceError::NothingToUpdate));
    }

    #[tokio::test]
    async fn test_unchanged_update_is_rejected() {
        let (_, service) = venue_service();
        let id = service.create(hall()).await.unwrap();

        let changes = VenueUpdate {
            capacity: Some(200),
            ..Default::default()
        };
        let err = service.update(&id, changes).await.unwrap_err();
        assert!(matches!(err, ResourceError::NothingToUpdate));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let (_, service) = venue_service();

        let err = service
            .update("bogus", VenueUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (store, service) = venue_service();
        let id = service.create(hall()).await.unwrap();

        service.delete(&id).await.unwrap();
        assert_eq!(store.count("venues"), 0);

        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            ResourceError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(&id).await.unwrap_err(),
            ResourceError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_is_capped_at_one_hundred() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = ResourceService::<Attendee, _>::new(store);
        let builder = TestDataBuilder::from_test_name("list_cap");

        for i in 0..105 {
            let attendee = Attendee {
                name: builder.name("attendee", &i.to_string()),
                email: builder.email(&format!("a{i}")),
                phone: None,
            };
            service.create(attendee).await.unwrap();
        }

        assert_eq!(service.list().await.unwrap().len(), 100);
    }

    #[tokio::test]
    async fn test_dangling_references_are_accepted() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = ResourceService::<Booking, _>::new(store);

        let booking = Booking {
            event_id: ObjectId::new().to_hex(),
            attendee_id: ObjectId::new().to_hex(),
            ticket_type: "VIP".into(),
            quantity: 2,
        };
        let id = service.create(booking.clone()).await.unwrap();

        let changes = BookingUpdate {
            quantity: Some(3),
            ..Default::default()
        };
        service.update(&id, changes).await.unwrap();
        assert_eq!(service.get(&id).await.unwrap().record.quantity, 3);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_database_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(DatabaseError::ConnectionFailed("unreachable".into())));

        let service = ResourceService::<Venue, _>::new(Arc::new(store));
        let err = service.create(hall()).await.unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Database(DatabaseError::ConnectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_update_uses_collection_name() {
        let mut store = MockDocumentStore::new();
        let id = ObjectId::new();
        store
            .expect_fetch()
            .withf(|collection, _| collection == "venues")
            .returning(move |_, _| Ok(Some(bson::doc! { "_id": id })));
        store
            .expect_update()
            .withf(|collection, _, fields| {
                collection == "venues" && fields == &bson::doc! { "name": "Hall B" }
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let service = ResourceService::<Venue, _>::new(Arc::new(store));
        let changes = VenueUpdate {
            name: Some("Hall B".into()),
            ..Default::default()
        };
        service.update(&id.to_hex(), changes).await.unwrap();
    }
}
