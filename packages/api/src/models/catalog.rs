//! Catalogue rows: books and professors.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::{Book, BookId, Professor};

#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub genre: String,
    pub isbn_no: Option<String>,
    pub pages: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            genre: row.genre,
            publisher: row.publisher,
            isbn_no: row.isbn_no,
            pages: row.pages,
            total_copies: row.total_copies,
            available_copies: row.available_copies,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfessorRow {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub bio: String,
    pub calendly_link: Option<String>,
    pub credits: i32,
}

impl From<ProfessorRow> for Professor {
    fn from(row: ProfessorRow) -> Self {
        Professor {
            id: row.id,
            name: row.name,
            department: row.department,
            bio: row.bio,
            calendly_link: row.calendly_link,
            credits: row.credits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_projection_keeps_catalogue_fields() {
        let row = BookRow {
            id: 3,
            title: "Middlemarch".to_string(),
            author: "George Eliot".to_string(),
            publisher: None,
            genre: "Fiction".to_string(),
            isbn_no: Some("9780141439549".to_string()),
            pages: Some(880),
            total_copies: 2,
            available_copies: 1,
            created_at: Utc::now(),
        };

        let book = Book::from(row);

        assert_eq!(book.id, 3);
        assert_eq!(book.publisher, None);
        assert_eq!(book.isbn_no.as_deref(), Some("9780141439549"));
        assert_eq!(book.pages, Some(880));
        assert_eq!((book.available_copies, book.total_copies), (1, 2));
    }
}
