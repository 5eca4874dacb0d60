use super::Entity;

/// A persisted book.
///
/// The owning author is an explicit foreign key; callers that need the
/// author record look it up themselves.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub author_id: Option<i32>,
}

impl Entity for Book {
    const NAME: &'static str = "Book";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
