//! # Member model
//!
//! [`MemberRow`] is the complete row of the `members` table. It derives
//! [`sqlx::FromRow`] so it can be loaded directly from queries and contains every
//! column, including the Argon2 `password_hash` and the scheduling `credits`
//! balance.
//!
//! It is never sent to the client. [`MemberRow::to_session_member`] and
//! [`MemberRow::to_profile`] project it into the client-safe
//! [`SessionMember`] and [`UserProfile`]; both drop the password hash and
//! timestamps.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::{FavoriteBook, MemberId, SessionMember, UserProfile};

/// Full member record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub image: String,
    pub password_hash: Option<String>,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberRow {
    pub fn to_session_member(&self) -> SessionMember {
        SessionMember {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.clone(),
        }
    }

    pub fn to_profile(&self, favorites: Vec<FavoriteBook>) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            role: self.role.clone(),
            image: self.image.clone(),
            credits: self.credits,
            favorites,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
