//! OpenAPI description of [`resource_router`](crate::handlers::resource_router)

use axum_helpers::errors::responses::{
    BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse, UnprocessableEntityResponse,
};
use axum_helpers::openapi::{
    add_operation, add_tag, json_request_body, json_response, path_parameter, register_schema,
    response_ref, schema_ref,
};
use utoipa::PartialSchema;
use utoipa::openapi::path::{HttpMethod, OperationBuilder};
use utoipa::openapi::schema::{AllOfBuilder, Array, ObjectBuilder};
use utoipa::openapi::{OpenApi, RefOr, Schema};

use crate::models::{MessageResponse, Resource};

/// Schema fields plus the stringified `_id`
fn stored_schema<T: Resource>() -> RefOr<Schema> {
    let id = ObjectBuilder::new()
        .property("_id", String::schema())
        .required("_id")
        .build();

    RefOr::T(Schema::AllOf(
        AllOfBuilder::new()
            .item(schema_ref::<T>())
            .item(Schema::Object(id))
            .build(),
    ))
}

/// Document the five CRUD operations for `T`
pub fn document_resource<T: Resource>(openapi: &mut OpenApi) {
    register_schema::<T>(openapi);
    register_schema::<T::Update>(openapi);
    register_schema::<MessageResponse>(openapi);
    add_tag(
        openapi,
        T::TAG,
        &format!("{} management", T::NAME),
    );

    let singular = T::NAME.to_lowercase();
    let item_path = format!("{}/{{id}}", T::URL);
    let id_description = format!("{} ObjectId (24 hex characters)", T::NAME);

    let create = OperationBuilder::new()
        .tag(T::TAG)
        .operation_id(Some(format!("create_{singular}")))
        .summary(Some(format!("Create a {singular}")))
        .request_body(Some(json_request_body(schema_ref::<T>())))
        .response(
            "201",
            json_response(
                &format!("{} created", T::NAME),
                schema_ref::<MessageResponse>(),
            ),
        )
        .response("400", response_ref::<BadRequestValidationResponse>())
        .response("422", response_ref::<UnprocessableEntityResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, T::URL, HttpMethod::Post, create);

    let list = OperationBuilder::new()
        .tag(T::TAG)
        .operation_id(Some(format!("list_{}", T::COLLECTION)))
        .summary(Some(format!("List up to 100 {}", T::COLLECTION)))
        .response(
            "200",
            json_response(
                &format!("List of {}", T::COLLECTION),
                RefOr::T(Schema::Array(Array::new(stored_schema::<T>()))),
            ),
        )
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, T::URL, HttpMethod::Get, list);

    let get = OperationBuilder::new()
        .tag(T::TAG)
        .operation_id(Some(format!("get_{singular}")))
        .summary(Some(format!("Get a {singular} by ID")))
        .parameter(path_parameter("id", &id_description))
        .response(
            "200",
            json_response(&format!("{} found", T::NAME), stored_schema::<T>()),
        )
        .response("404", response_ref::<NotFoundResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, &item_path, HttpMethod::Get, get);

    let update = OperationBuilder::new()
        .tag(T::TAG)
        .operation_id(Some(format!("update_{singular}")))
        .summary(Some(format!("Update the given fields of a {singular}")))
        .parameter(path_parameter("id", &id_description))
        .request_body(Some(json_request_body(schema_ref::<T::Update>())))
        .response(
            "200",
            json_response(
                &format!("{} updated successfully", T::NAME),
                schema_ref::<MessageResponse>(),
            ),
        )
        .response("400", response_ref::<BadRequestResponse>())
        .response("404", response_ref::<NotFoundResponse>())
        .response("422", response_ref::<UnprocessableEntityResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, &item_path, HttpMethod::Put, update);

    let delete = OperationBuilder::new()
        .tag(T::TAG)
        .operation_id(Some(format!("delete_{singular}")))
        .summary(Some(format!("Delete a {singular}")))
        .parameter(path_parameter("id", &id_description))
        .response(
            "200",
            json_response(
                &format!("{} deleted successfully", T::NAME),
                schema_ref::<MessageResponse>(),
            ),
        )
        .response("404", response_ref::<NotFoundResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, &item_path, HttpMethod::Delete, delete);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Venue;
    use utoipa::openapi::OpenApiBuilder;

    #[test]
    fn test_venue_paths_are_documented() {
        let mut openapi = OpenApiBuilder::new().build();
        document_resource::<Venue>(&mut openapi);

        let collection = &openapi.paths.paths["/venues"];
        assert!(collection.get.is_some());
        assert!(collection.post.is_some());

        let item = &openapi.paths.paths["/venues/{id}"];
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());

        let components = openapi.components.unwrap();
        assert!(components.schemas.contains_key("Venue"));
        assert!(components.schemas.contains_key("VenueUpdate"));
        assert!(components.schemas.contains_key("MessageResponse"));
    }

    #[test]
    fn test_operation_ids_are_unique_per_resource() {
        let mut openapi = OpenApiBuilder::new().build();
        document_resource::<Venue>(&mut openapi);

        let json = serde_json::to_value(&openapi).unwrap();
        assert_eq!(
            json["paths"]["/venues/{id}"]["put"]["operationId"],
            "update_venue"
        );
        assert_eq!(json["paths"]["/venues"]["get"]["operationId"], "list_venues");
    }
}
