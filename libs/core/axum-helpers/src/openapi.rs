//! Builders for documenting routers whose paths are only known at runtime.
//!
//! A generic router bound to many schemas cannot carry `#[utoipa::path]`
//! annotations, so its operations are assembled with these helpers from a
//! [`utoipa::Modify`] implementation.
//!
//! ```ignore
//! struct VenuePaths;
//!
//! impl Modify for VenuePaths {
//!     fn modify(&self, openapi: &mut OpenApi) {
//!         register_schema::<Venue>(openapi);
//!         let operation = OperationBuilder::new()
//!             .tag("Venues")
//!             .request_body(Some(json_request_body(schema_ref::<Venue>())))
//!             .response("201", json_response("Venue created", schema_ref::<MessageResponse>()))
//!             .build();
//!         add_operation(openapi, "/venues", HttpMethod::Post, operation);
//!     }
//! }
//! ```

use crate::errors::ErrorResponse;
use crate::errors::responses::{
    BadRequestObjectIdResponse, BadRequestResponse, BadRequestValidationResponse,
    InternalServerErrorResponse, NotFoundResponse, UnprocessableEntityResponse,
};
use utoipa::openapi::path::{HttpMethod, Operation, Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{
    Content, ContentBuilder, OpenApi, Ref, RefOr, Required, Response, ResponseBuilder, Schema,
};
use utoipa::{PartialSchema, ToResponse, ToSchema};

/// `$ref` to a schema registered under `T::name()`
pub fn schema_ref<T: ToSchema>() -> RefOr<Schema> {
    Ref::from_schema_name(T::name()).into()
}

/// `$ref` to a response registered with [`register_response`]
pub fn response_ref<R: ToResponse<'static>>() -> RefOr<Response> {
    Ref::from_response_name(R::response().0).into()
}

/// Add `T` (and the schemas it references) to the components
pub fn register_schema<T: ToSchema>(openapi: &mut OpenApi) {
    let components = openapi.components.get_or_insert_default();

    let mut nested = Vec::new();
    T::schemas(&mut nested);
    components.schemas.extend(nested);
    components
        .schemas
        .insert(T::name().into_owned(), <T as PartialSchema>::schema());
}

pub fn register_response<R: ToResponse<'static>>(openapi: &mut OpenApi) {
    let (name, response) = R::response();
    openapi
        .components
        .get_or_insert_default()
        .responses
        .insert(name.to_string(), response);
}

/// Register [`ErrorResponse`] and every reusable error response
pub fn register_error_responses(openapi: &mut OpenApi) {
    register_schema::<ErrorResponse>(openapi);
    register_response::<BadRequestResponse>(openapi);
    register_response::<BadRequestValidationResponse>(openapi);
    register_response::<BadRequestObjectIdResponse>(openapi);
    register_response::<NotFoundResponse>(openapi);
    register_response::<UnprocessableEntityResponse>(openapi);
    register_response::<InternalServerErrorResponse>(openapi);
}

/// Add a tag once, keeping the first description
pub fn add_tag(openapi: &mut OpenApi, name: &str, description: &str) {
    let tags = openapi.tags.get_or_insert_default();
    if tags.iter().any(|tag| tag.name == name) {
        return;
    }
    tags.push(
        TagBuilder::new()
            .name(name)
            .description(Some(description))
            .build(),
    );
}

/// Add `operation` under `path`, merging with methods already documented there
pub fn add_operation(openapi: &mut OpenApi, path: &str, method: HttpMethod, operation: Operation) {
    openapi
        .paths
        .add_path_operation(path, vec![method], operation);
}

/// Required string path parameter
pub fn path_parameter(name: &str, description: &str) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(description))
        .schema(Some(String::schema()))
        .build()
}

pub fn json_content(schema: RefOr<Schema>) -> Content {
    ContentBuilder::new().schema(Some(schema)).build()
}

pub fn json_request_body(schema: RefOr<Schema>) -> RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", json_content(schema))
        .required(Some(Required::True))
        .build()
}

pub fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", json_content(schema))
        .build()
}
