use crate::transport::http::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

/// Unwraps the `{id}` path segment, turning extractor rejections into `ApiError`.
pub fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::Validation(format!("Invalid id: {}", e)))
}

/// Path id for reads: a segment that is not a valid id cannot name a stored
/// record, so it is reported as not found.
pub fn lookup_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::NotFound(format!("No record for id: {}", e)))
}

/// Rejects ids that can never exist in the store.
pub fn ensure_positive_id(id: i32) -> Result<(), ApiError> {
    if id < 1 {
        return Err(ApiError::Validation(format!(
            "Invalid id {}: must be a positive integer",
            id
        )));
    }
    Ok(())
}

/// Unwraps a JSON body, rejecting malformed JSON and an explicit `null`.
pub fn require_body<T>(
    body: Result<Json<Option<T>>, JsonRejection>,
    expected: &str,
) -> Result<T, ApiError> {
    match body {
        Ok(Json(Some(v))) => Ok(v),
        Ok(Json(None)) => Err(ApiError::Validation(format!(
            "Request body is required (expected: {})",
            expected
        ))),
        Err(e) => Err(ApiError::Validation(format!(
            "Invalid JSON body: {} (expected: {})",
            e, expected
        ))),
    }
}
