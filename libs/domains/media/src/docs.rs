//! OpenAPI description of the asset routes

use axum_helpers::errors::responses::{
    BadRequestObjectIdResponse, BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::openapi::{
    add_operation, add_tag, json_response, path_parameter, register_schema, response_ref,
    schema_ref,
};
use utoipa::PartialSchema;
use utoipa::openapi::path::{HttpMethod, OperationBuilder};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, KnownFormat, ObjectBuilder, SchemaFormat, Type};
use utoipa::openapi::{ContentBuilder, OpenApi, RefOr, Required, ResponseBuilder, Schema};

use crate::kind::AssetKind;
use crate::models::UploadResponse;

fn metadata_schema(kind: AssetKind) -> RefOr<Schema> {
    let uploaded_at = ObjectBuilder::new()
        .schema_type(Type::String)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::DateTime)))
        .build();

    let object = ObjectBuilder::new()
        .property("id", String::schema())
        .property(kind.owner_field(), String::schema())
        .property("filename", String::schema())
        .property("content_type", String::schema())
        .property("uploaded_at", Schema::Object(uploaded_at))
        .required("id")
        .required(kind.owner_field())
        .required("filename")
        .required("content_type")
        .required("uploaded_at")
        .build();

    RefOr::T(Schema::Object(object))
}

fn multipart_body() -> utoipa::openapi::request_body::RequestBody {
    let file = ObjectBuilder::new()
        .schema_type(Type::String)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Binary)))
        .build();
    let form = ObjectBuilder::new()
        .property("file", Schema::Object(file))
        .required("file")
        .build();

    RequestBodyBuilder::new()
        .content(
            "multipart/form-data",
            ContentBuilder::new()
                .schema(Some(RefOr::T(Schema::Object(form))))
                .build(),
        )
        .required(Some(Required::True))
        .build()
}

/// Document the routes of one asset kind
pub fn document_asset(kind: AssetKind, openapi: &mut OpenApi) {
    register_schema::<UploadResponse>(openapi);
    add_tag(
        openapi,
        kind.tag(),
        &format!("Binary {} storage", kind.label()),
    );

    let owner = kind.owner_field();
    let owner_description = format!("Owning {owner}");
    let asset_param = format!("{}_id", kind.label());

    let mut upload = OperationBuilder::new()
        .tag(kind.tag())
        .operation_id(Some(format!("upload_{}", kind.segment())))
        .summary(Some(format!("Upload a {}", kind.label())))
        .parameter(path_parameter(owner, &owner_description))
        .request_body(Some(multipart_body()))
        .response(
            "201",
            json_response(kind.uploaded_message(), schema_ref::<UploadResponse>()),
        )
        .response("400", response_ref::<BadRequestResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>());
    if let Some(limit) = kind.max_bytes() {
        upload = upload.description(Some(format!(
            "Files larger than {} MiB are rejected with 400.",
            limit / (1024 * 1024)
        )));
    }
    add_operation(openapi, &kind.upload_path(), HttpMethod::Post, upload.build());

    let latest = OperationBuilder::new()
        .tag(kind.tag())
        .operation_id(Some(format!("get_{}_metadata", kind.segment())))
        .summary(Some(format!("Metadata of the most recent {}", kind.label())))
        .parameter(path_parameter(owner, &owner_description))
        .response(
            "200",
            json_response("Asset metadata without content", metadata_schema(kind)),
        )
        .response("404", response_ref::<NotFoundResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, &kind.latest_path(), HttpMethod::Get, latest);

    let file = OperationBuilder::new()
        .tag(kind.tag())
        .operation_id(Some(format!("get_{}_file", kind.segment())))
        .summary(Some(format!("Download a {} by ID", kind.label())))
        .parameter(path_parameter(&asset_param, "Asset ObjectId (24 hex characters)"))
        .response(
            "200",
            ResponseBuilder::new()
                .description("Stored bytes, served inline with the stored content type")
                .content(kind.default_content_type(), ContentBuilder::new().build())
                .build(),
        )
        .response("400", response_ref::<BadRequestObjectIdResponse>())
        .response("404", response_ref::<NotFoundResponse>())
        .response("500", response_ref::<InternalServerErrorResponse>())
        .build();
    add_operation(openapi, &kind.file_path(), HttpMethod::Get, file);

    if let Some(gallery_path) = kind.gallery_path() {
        let gallery = OperationBuilder::new()
            .tag(kind.tag())
            .operation_id(Some(format!("list_{}s", kind.segment())))
            .summary(Some(format!(
                "Every {} for an owner, newest first (at most 100)",
                kind.label()
            )))
            .parameter(path_parameter(owner, &owner_description))
            .response(
                "200",
                json_response(
                    "Asset metadata without content",
                    RefOr::T(Schema::Array(Array::new(metadata_schema(kind)))),
                ),
            )
            .response("500", response_ref::<InternalServerErrorResponse>())
            .build();
        add_operation(openapi, &gallery_path, HttpMethod::Get, gallery);
    }
}
