//! Events Domain
//!
//! Events, venues, attendees and bookings stored as MongoDB documents.
//! Every entity goes through the same generic service and router, bound to
//! its collection through [`ApiResource`](core_proc_macros::ApiResource).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ resource_router<T,S> │  ← POST/GET {url}, GET/PUT/DELETE {url}/{id}
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │ ResourceService<T,S> │  ← validation, not-found and no-op rules
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │    DocumentStore     │  ← MongoDB (or in-memory in tests)
//! └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_events::{ResourceService, Venue, resource_router};
//!
//! let store = Arc::new(MongoDocumentStore::new(db));
//! let router = resource_router(ResourceService::<Venue, _>::new(store));
//! ```

pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use docs::document_resource;
pub use error::{ResourceError, ResourceResult};
pub use handlers::{ResourceState, resource_router};
pub use models::{
    Attendee, AttendeeUpdate, Booking, BookingUpdate, Event, EventUpdate, MessageResponse,
    Resource, Stored, Venue, VenueUpdate,
};
pub use service::ResourceService;
