//! OpenAPI response components shared by the domain routers.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "code": 1500,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - the first violated validation rule",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "name must be between 3 and 30 characters",
        "details": {
            "name": [{
                "code": "length",
                "message": "name must be between 3 and 30 characters",
                "params": {"min": 3, "max": 30, "value": "ab"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed id",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "code": 1002,
        "error": "INVALID_OBJECT_ID",
        "message": "abc is not a valid id"
    })
)]
pub struct BadRequestObjectIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Seller with id 65f0c1d2e3a4b5c6d7e8f901 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing, invalid or revoked bearer token",
    content_type = "application/json",
    example = json!({
        "status": 401,
        "code": 1006,
        "error": "UNAUTHORIZED",
        "message": "Not authorized"
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - refresh token rejected",
    content_type = "application/json",
    example = json!({
        "status": 403,
        "code": 1007,
        "error": "FORBIDDEN",
        "message": "Forbidden"
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - resource already exists",
    content_type = "application/json",
    example = json!({
        "status": 409,
        "code": 1008,
        "error": "CONFLICT",
        "message": "Email in use"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
