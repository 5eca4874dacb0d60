//! Conversions between stored entities and transfer objects.
//!
//! Create and update bodies always produce a fresh entity; nothing is merged
//! with the stored row.

use crate::domain::model::{Author, Book};
use crate::transport::http::types::{
    AuthorDto, BookDto, CreateAuthorDto, CreateBookDto, UpdateAuthorDto, UpdateBookDto,
};

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            bio: author.bio,
        }
    }
}

impl From<CreateAuthorDto> for Author {
    fn from(dto: CreateAuthorDto) -> Self {
        Self {
            id: 0,
            first_name: dto.first_name,
            last_name: dto.last_name,
            bio: dto.bio,
        }
    }
}

impl From<UpdateAuthorDto> for Author {
    fn from(dto: UpdateAuthorDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            bio: dto.bio,
        }
    }
}

impl BookDto {
    /// Builds the read shape of a book; `author` is the record `book.author_id`
    /// points at, looked up by the caller.
    pub fn from_entity(book: Book, author: Option<Author>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            year: book.year,
            isbn: book.isbn,
            summary: book.summary,
            image: book.image,
            price: book.price,
            author_id: book.author_id,
            author: author.map(AuthorDto::from),
        }
    }
}

impl From<CreateBookDto> for Book {
    fn from(dto: CreateBookDto) -> Self {
        Self {
            id: 0,
            title: dto.title,
            year: dto.year,
            isbn: dto.isbn,
            summary: dto.summary,
            image: dto.image,
            price: dto.price,
            author_id: dto.author_id,
        }
    }
}

impl From<UpdateBookDto> for Book {
    fn from(dto: UpdateBookDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            year: dto.year,
            isbn: dto.isbn,
            summary: dto.summary,
            image: dto.image,
            price: dto.price,
            author_id: dto.author_id,
        }
    }
}
