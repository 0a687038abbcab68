//! OpenAPI documentation configuration

use axum_helpers::HealthResponse;
use axum_helpers::openapi::register_error_responses;
use domain_events::{Attendee, Booking, Event, Venue, document_resource};
use domain_media::{AssetKind, document_asset};
use utoipa::{Modify, OpenApi};

use crate::api::{health, root};

/// Combined OpenAPI documentation for the whole service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Management API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for events, venues, attendees, bookings and their media",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(root::root, health::health, health::ready),
    components(schemas(root::RootResponse, HealthResponse)),
    modifiers(&DomainPaths),
    tags(
        (name = "System", description = "Service status endpoints")
    )
)]
pub struct ApiDoc;

/// Paths of the generic domain routers, generated from their metadata
struct DomainPaths;

impl Modify for DomainPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        register_error_responses(openapi);

        document_resource::<Event>(openapi);
        document_resource::<Venue>(openapi);
        document_resource::<Attendee>(openapi);
        document_resource::<Booking>(openapi);

        for kind in AssetKind::ALL {
            document_asset(kind, openapi);
        }
    }
}
