//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "capacity": [{
                "code": "range",
                "message": null,
                "params": {"min": 0.0, "value": -1}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "BAD_REQUEST",
        "message": "No valid fields to update"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid ObjectId",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_OBJECT_ID",
        "message": "Invalid poster ID format: not-an-id"
    })
)]
pub struct BadRequestObjectIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Venue with ID 65f1c0ffee0000000000beef not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - malformed JSON body",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "JSON_EXTRACTION",
        "message": "Failed to deserialize the JSON body into the target type: missing field `name`"
    })
)]
pub struct UnprocessableEntityResponse(pub ErrorResponse);
