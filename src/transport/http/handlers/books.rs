use crate::domain::model::{Author, Book};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{
    ensure_positive_id, lookup_id, path_id, require_body,
};
use crate::transport::http::types::{AppState, BookDto, CreateBookDto, UpdateBookDto, Validate};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::collections::HashMap;
use tracing::{debug, info};

/// Explicit lookup of the author a book points at.
async fn author_of(state: &AppState, book: &Book) -> Result<Option<Author>, ApiError> {
    match book.author_id {
        Some(author_id) => Ok(state.authors.find_by_id(author_id).await?),
        None => Ok(None),
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books with their authors", body = [BookDto]),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn list_books_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookDto>>, ApiError> {
    debug!("Listing books");
    let books = state.books.find_all().await?;

    // One author scan instead of a lookup per book.
    let authors: HashMap<i32, Author> = if books.iter().any(|b| b.author_id.is_some()) {
        state
            .authors
            .find_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    } else {
        HashMap::new()
    };

    info!(count = books.len(), "Returning books");
    let dtos = books
        .into_iter()
        .map(|book| {
            let author = book.author_id.and_then(|id| authors.get(&id).cloned());
            BookDto::from_entity(book, author)
        })
        .collect();
    Ok(Json(dtos))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = BookDto),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<BookDto>, ApiError> {
    let id = lookup_id(id)?;
    debug!(id, "Fetching book");

    let Some(book) = state.books.find_by_id(id).await? else {
        return Err(ApiError::NotFound(format!("Book {} not found", id)));
    };
    let author = author_of(&state, &book).await?;
    info!(id, "Returning book");
    Ok(Json(BookDto::from_entity(book, author)))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error (including unknown authorId)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateBookDto>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Creating book");
    let dto = require_body(body, "{\"title\": ..., \"isbn\": ...}")?;
    dto.validate().map_err(ApiError::Validation)?;

    let mut book = Book::from(dto);
    let mut uow = state.books.begin().await?;
    if !uow.create(&mut book).await? || !uow.save().await? {
        return Err(ApiError::Unexpected("Failed to create book".to_string()));
    }

    info!(id = book.id, "Book created");
    let author = author_of(&state, &book).await?;
    let location = format!("/api/books/{}", book.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookDto::from_entity(book, author)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = UpdateBookDto,
    responses(
        (status = 204, description = "Book replaced"),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Option<UpdateBookDto>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    debug!(id, "Updating book");
    ensure_positive_id(id)?;
    let dto = require_body(body, "{\"id\": ..., \"title\": ..., \"isbn\": ...}")?;
    if dto.id != id {
        return Err(ApiError::Validation(format!(
            "Path id {} does not match body id {}",
            id, dto.id
        )));
    }
    if !state.books.exists(id).await? {
        return Err(ApiError::NotFound(format!("Book {} not found", id)));
    }
    dto.validate().map_err(ApiError::Validation)?;

    let book = Book::from(dto);
    let mut uow = state.books.begin().await?;
    if !uow.update(&book).await? || !uow.save().await? {
        return Err(ApiError::Unexpected(format!("Failed to update book {}", id)));
    }

    info!(id, "Book updated");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Bad request", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Not found", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    debug!(id, "Deleting book");
    ensure_positive_id(id)?;

    let Some(book) = state.books.find_by_id(id).await? else {
        return Err(ApiError::NotFound(format!("Book {} not found", id)));
    };
    let mut uow = state.books.begin().await?;
    if !uow.delete(&book).await? || !uow.save().await? {
        return Err(ApiError::Unexpected(format!("Failed to delete book {}", id)));
    }

    info!(id, "Book deleted");
    Ok(StatusCode::NO_CONTENT)
}
