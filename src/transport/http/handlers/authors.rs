use crate::domain::model::Author;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{
    ensure_positive_id, lookup_id, path_id, require_body,
};
use crate::transport::http::types::{
    AppState, AuthorDto, CreateAuthorDto, UpdateAuthorDto, Validate,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{debug, info};

#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "All authors", body = [AuthorDto]),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn list_authors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorDto>>, ApiError> {
    debug!("Listing authors");
    let authors = state.authors.find_all().await?;
    info!(count = authors.len(), "Returning authors");
    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found", body = AuthorDto),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_author_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<AuthorDto>, ApiError> {
    let id = lookup_id(id)?;
    debug!(id, "Fetching author");

    let Some(author) = state.authors.find_by_id(id).await? else {
        return Err(ApiError::NotFound(format!("Author {} not found", id)));
    };
    info!(id, "Returning author");
    Ok(Json(author.into()))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn create_author_handler(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateAuthorDto>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Creating author");
    let dto = require_body(body, "{\"firstName\": ..., \"lastName\": ...}")?;
    dto.validate().map_err(ApiError::Validation)?;

    let mut author = Author::from(dto);
    let mut uow = state.authors.begin().await?;
    if !uow.create(&mut author).await? || !uow.save().await? {
        return Err(ApiError::Unexpected("Failed to create author".to_string()));
    }

    info!(id = author.id, "Author created");
    let location = format!("/api/authors/{}", author.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorDto::from(author)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    request_body = UpdateAuthorDto,
    responses(
        (status = 204, description = "Author replaced"),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn update_author_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Option<UpdateAuthorDto>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    debug!(id, "Updating author");
    ensure_positive_id(id)?;
    let dto = require_body(body, "{\"id\": ..., \"firstName\": ..., \"lastName\": ...}")?;
    if dto.id != id {
        return Err(ApiError::Validation(format!(
            "Path id {} does not match body id {}",
            id, dto.id
        )));
    }
    if !state.authors.exists(id).await? {
        return Err(ApiError::NotFound(format!("Author {} not found", id)));
    }
    dto.validate().map_err(ApiError::Validation)?;

    let author = Author::from(dto);
    let mut uow = state.authors.begin().await?;
    if !uow.update(&author).await? || !uow.save().await? {
        return Err(ApiError::Unexpected(format!("Failed to update author {}", id)));
    }

    info!(id, "Author updated");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn delete_author_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    debug!(id, "Deleting author");
    ensure_positive_id(id)?;

    let Some(author) = state.authors.find_by_id(id).await? else {
        return Err(ApiError::NotFound(format!("Author {} not found", id)));
    };
    let mut uow = state.authors.begin().await?;
    if !uow.delete(&author).await? || !uow.save().await? {
        return Err(ApiError::Unexpected(format!("Failed to delete author {}", id)));
    }

    info!(id, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}
