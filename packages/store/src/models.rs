//! # Domain models shared by the client and the server
//!
//! Read-only projections of the rows owned by the library database. These types
//! are `Serialize + Deserialize` so they can cross the server/client boundary via
//! Dioxus server functions.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Book`] | A catalogue entry with its copy counts. `available_copies` never exceeds `total_copies`. |
//! | [`FavoriteBook`] | The slim book projection embedded in a [`UserProfile`]. |
//! | [`UserProfile`] | The signed-in member as shown on the profile page, favorites included. |
//! | [`ProfileUpdate`] | The only fields a member may change about themselves. |
//! | [`Professor`] | A professor that can be booked for a meeting, with its credit cost. |
//! | [`BookPage`] | One page of the dashboard listing plus the data the header needs. |
//! | [`SessionMember`] | The member attached to the current session. |

use serde::{Deserialize, Serialize};

/// Server-assigned book identifier.
pub type BookId = i64;

/// Server-assigned member identifier.
pub type MemberId = i64;

/// A book as listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: Option<String>,
    pub isbn_no: Option<String>,
    pub pages: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
}

impl Book {
    /// Whether at least one copy can be borrowed right now.
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Label for the borrow button.
    pub fn availability_label(&self) -> &'static str {
        if self.is_available() {
            "Borrow Book"
        } else {
            "Unavailable"
        }
    }
}

/// Book projection embedded in the profile's favorites list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn_no: Option<String>,
}

impl From<&Book> for FavoriteBook {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            isbn_no: book.isbn_no.clone(),
        }
    }
}

/// The signed-in member's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    /// Avatar URL; empty when the member has none.
    pub image: String,
    pub credits: i32,
    pub favorites: Vec<FavoriteBook>,
}

impl UserProfile {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Initials used when no avatar image is set.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// The editable subset of this profile.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Fields submitted by a profile save. Email and role are never part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// A professor that members can book meetings with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub bio: String,
    /// Booking page of the external calendar widget, if configured.
    pub calendly_link: Option<String>,
    /// Credits deducted from the member per scheduled meeting.
    pub credits: i32,
}

/// One page of the dashboard listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub recently_added: Vec<Book>,
    pub current_page: u32,
    pub total_pages: u32,
    pub genres: Vec<String>,
    pub selected_genre: Option<String>,
}

/// Member attached to the current session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMember {
    pub id: MemberId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl SessionMember {
    /// Get display name, falling back to email if no name is set.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn book(id: BookId, available_copies: i32) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: "Ursula K. Le Guin".to_string(),
            genre: "Fiction".to_string(),
            publisher: None,
            isbn_no: None,
            pages: Some(320),
            total_copies: available_copies.max(1),
            available_copies,
        }
    }

    pub fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            role: "member".to_string(),
            image: String::new(),
            credits: 10,
            favorites: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_availability_label() {
        assert_eq!(book(1, 2).availability_label(), "Borrow Book");
        assert_eq!(book(1, 0).availability_label(), "Unavailable");
        assert!(!book(1, 0).is_available());
    }

    #[test]
    fn test_profile_names() {
        let p = profile();
        assert_eq!(p.full_name(), "Ada Lovelace");
        assert_eq!(p.initials(), "AL");

        let update = p.to_update();
        assert_eq!(update.first_name, "Ada");
        assert_eq!(update.phone_number, "555-0100");
    }
}
