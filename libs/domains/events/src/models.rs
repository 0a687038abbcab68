//! Entity schemas
//!
//! Each entity has a create schema (every field required) and an update
//! schema where every field is optional. Absent update fields are never
//! serialized, so a partial update cannot overwrite stored values with null.

use core_proc_macros::ApiResource;
use database::DatabaseError;
use database::mongodb::bson::{self, Bson, Document};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A schema bound to a collection, with its partial-update counterpart
pub trait Resource:
    ApiResource + ToSchema + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    type Update: ToSchema + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, ApiResource)]
pub struct Event {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    /// Free-form date string, stored as given
    pub date: String,
    /// Soft reference to a venue; not checked
    pub venue_id: String,
    #[validate(range(min = 0))]
    pub max_attendees: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub max_attendees: Option<i32>,
}

impl Resource for Event {
    type Update = EventUpdate;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, ApiResource)]
pub struct Venue {
    #[validate(length(min = 1))]
    pub name: String,
    pub address: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct VenueUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

impl Resource for Venue {
    type Update = VenueUpdate;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, ApiResource)]
pub struct Attendee {
    #[validate(length(min = 1))]
    pub name: String,
    pub email: String,
    /// Stored as null when omitted
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct AttendeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Resource for Attendee {
    type Update = AttendeeUpdate;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate, ApiResource)]
pub struct Booking {
    /// Soft reference to an event; not checked
    pub event_id: String,
    /// Soft reference to an attendee; not checked
    pub attendee_id: String,
    pub ticket_type: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct BookingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

impl Resource for Booking {
    type Update = BookingUpdate;
}

/// A stored record: the schema fields plus its id as a hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

impl<T: DeserializeOwned> Stored<T> {
    /// Split `_id` off a raw document and decode the remaining fields
    pub fn from_document(mut document: Document) -> Result<Self, DatabaseError> {
        let id = match document.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(Bson::String(id)) => id,
            other => {
                return Err(DatabaseError::Serialization(format!(
                    "document has no usable _id: {other:?}"
                )));
            }
        };

        Ok(Self {
            id,
            record: bson::from_document(document)?,
        })
    }
}

/// Acknowledgement returned by create, update and delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Hex ObjectId of the affected record
    pub id: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
        }
    }
}
