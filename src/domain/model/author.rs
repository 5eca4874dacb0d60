use super::Entity;

/// A persisted author. Books reference it through `Book::author_id`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
}

impl Entity for Author {
    const NAME: &'static str = "Author";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
