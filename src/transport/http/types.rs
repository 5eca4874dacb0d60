use crate::domain::model::{Author, Book};
use crate::storage::Repository;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn Repository<Author>>,
    pub books: Arc<dyn Repository<Book>>,
}

/// Envelope used for error bodies and the health check.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const MAX_SUMMARY_LEN: usize = 250;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorDto {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorDto {
    pub id: i32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub author_id: Option<i32>,
    /// Owning author, resolved from `authorId` when present.
    pub author: Option<AuthorDto>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub author_id: Option<i32>,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDto {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub author_id: Option<i32>,
}

/// Presence/shape checks applied to incoming bodies before they reach storage.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("'{}' is required", field));
    }
    Ok(())
}

fn validate_book_fields(
    title: &str,
    isbn: &str,
    summary: Option<&str>,
    price: Option<f64>,
    author_id: Option<i32>,
) -> Result<(), String> {
    require("title", title)?;
    require("isbn", isbn)?;
    if let Some(summary) = summary {
        if summary.chars().count() > MAX_SUMMARY_LEN {
            return Err(format!(
                "'summary' must be at most {} characters",
                MAX_SUMMARY_LEN
            ));
        }
    }
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err("'price' must be a non-negative number".to_string());
        }
    }
    if let Some(author_id) = author_id {
        if author_id < 1 {
            return Err("'authorId' must be a positive integer".to_string());
        }
    }
    Ok(())
}

impl Validate for CreateAuthorDto {
    fn validate(&self) -> Result<(), String> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)
    }
}

impl Validate for UpdateAuthorDto {
    fn validate(&self) -> Result<(), String> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)
    }
}

impl Validate for CreateBookDto {
    fn validate(&self) -> Result<(), String> {
        validate_book_fields(
            &self.title,
            &self.isbn,
            self.summary.as_deref(),
            self.price,
            self.author_id,
        )
    }
}

impl Validate for UpdateBookDto {
    fn validate(&self) -> Result<(), String> {
        validate_book_fields(
            &self.title,
            &self.isbn,
            self.summary.as_deref(),
            self.price,
            self.author_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_requires_both_names() {
        let dto: CreateAuthorDto = serde_json::from_value(json!({ "firstName": "Jane" })).unwrap();
        assert_eq!(dto.validate().unwrap_err(), "'lastName' is required");

        let dto: CreateAuthorDto =
            serde_json::from_value(json!({ "firstName": "  ", "lastName": "Doe" })).unwrap();
        assert_eq!(dto.validate().unwrap_err(), "'firstName' is required");

        let dto: CreateAuthorDto =
            serde_json::from_value(json!({ "firstName": "Jane", "lastName": "Doe" })).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_body_without_id_does_not_deserialize() {
        let parsed = serde_json::from_value::<UpdateAuthorDto>(
            json!({ "firstName": "Jane", "lastName": "Doe" }),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn book_shape_checks() {
        let base = json!({ "title": "Dune", "isbn": "9780441013593" });
        let dto: CreateBookDto = serde_json::from_value(base.clone()).unwrap();
        assert!(dto.validate().is_ok());

        let mut long = base.clone();
        long["summary"] = json!("x".repeat(MAX_SUMMARY_LEN + 1));
        let dto: CreateBookDto = serde_json::from_value(long).unwrap();
        assert!(dto.validate().unwrap_err().contains("summary"));

        let mut negative = base.clone();
        negative["price"] = json!(-1.5);
        let dto: CreateBookDto = serde_json::from_value(negative).unwrap();
        assert!(dto.validate().unwrap_err().contains("price"));

        let mut bad_author = base;
        bad_author["authorId"] = json!(0);
        let dto: CreateBookDto = serde_json::from_value(bad_author).unwrap();
        assert!(dto.validate().unwrap_err().contains("authorId"));

        let dto: CreateBookDto = serde_json::from_value(json!({ "title": "Dune" })).unwrap();
        assert_eq!(dto.validate().unwrap_err(), "'isbn' is required");
    }

    #[test]
    fn book_dto_serializes_camel_case() {
        let dto = BookDto {
            id: 1,
            title: "Dune".to_string(),
            year: Some(1965),
            isbn: "9780441013593".to_string(),
            summary: None,
            image: None,
            price: None,
            author_id: Some(2),
            author: None,
        };
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["authorId"], json!(2));
        assert!(value.get("author_id").is_none());
    }
}
