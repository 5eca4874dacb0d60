//! Domain model definitions for the bookstore entities.

pub mod author;
pub mod book;

pub use author::Author;
pub use book::Book;

/// Contract shared by every persisted record.
///
/// Identifiers are assigned by the store on creation; a record that has not
/// been persisted yet carries id `0`.
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    /// Human readable name used in log lines and error messages (e.g. `Author`).
    const NAME: &'static str;

    fn id(&self) -> i32;

    /// Writes back the identifier assigned by the store.
    fn set_id(&mut self, id: i32);
}
