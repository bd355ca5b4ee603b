//! # API crate: shared fullstack server functions for Shelfmark
//!
//! This crate defines every Dioxus server function that the front-end calls,
//! along with the server-side modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` items | Session lookup and Argon2 password hashing |
//! | [`db`] | `server` items | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`library`] | `server` | Queries behind every library action |
//! | [`models`] | `server` items | Database rows and their projections into `store` models |
//! | [`settings`] | `server` | `shelfmark.toml` loaded once per process |
//! | [`validation`] | none | Input rules for profile and password changes |
//! | [`gateway`] | none | [`ServerGateway`], the `store::LibraryGateway` over these functions |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Session**: `get_current_user`, `login_password`, `logout`, `get_client_settings`
//! - **Catalogue**: `list_books`, `list_professors`, `get_professor`
//! - **Favorites**: `get_favorites`, `add_favorite`, `remove_favorite`
//! - **Loans**: `borrow_book`
//! - **Member**: `get_profile_data`, `update_user_profile`, `change_password`, `update_member_credits`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
mod gateway;
#[cfg(feature = "server")]
pub mod library;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;
pub mod validation;

pub use gateway::ServerGateway;
pub use store::{
    ActionResult, Book, BookId, BookPage, BorrowReceipt, ClientSettings, MemberId, Professor,
    SessionMember, UserProfile,
};

#[cfg(feature = "server")]
use crate::error::server_fn_error;

/// Get the member attached to the current session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<SessionMember>, ServerFnError> {
    let Some(member_id) = auth::session_member_id(&session)
        .await
        .map_err(server_fn_error)?
    else {
        return Ok(None);
    };

    let pool = db::get_pool().await.map_err(server_fn_error)?;
    let member = library::find_member(pool, member_id)
        .await
        .map_err(server_fn_error)?;

    Ok(member.map(|m| m.to_session_member()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<SessionMember>, ServerFnError> {
    Ok(None)
}

/// Sign in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<SessionMember, ServerFnError> {
    let pool = db::get_pool().await.map_err(server_fn_error)?;

    let Some(member) = library::authenticate(pool, &email, &password)
        .await
        .map_err(server_fn_error)?
    else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    session
        .insert(auth::SESSION_MEMBER_ID_KEY, member.id)
        .await
        .map_err(server_fn_error)?;

    Ok(member.to_session_member())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<SessionMember, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(server_fn_error)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Configuration values the front-end uses (notice limit, professors path).
#[cfg(feature = "server")]
#[get("/api/settings")]
pub async fn get_client_settings() -> Result<ClientSettings, ServerFnError> {
    Ok(settings::library_config().client_settings())
}

#[cfg(not(feature = "server"))]
#[get("/api/settings")]
pub async fn get_client_settings() -> Result<ClientSettings, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// One page of the dashboard listing, optionally filtered by genre and by
/// free text matched against title and author.
#[cfg(feature = "server")]
#[post("/api/books")]
pub async fn list_books(page: u32, genre: String, search: String) -> Result<BookPage, ServerFnError> {
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    let query = store::ListingQuery::new(page, &genre, &search);
    library::list_books(pool, settings::library_config(), &query)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/books")]
pub async fn list_books(page: u32, genre: String, search: String) -> Result<BookPage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The signed-in member's favorite books.
#[cfg(feature = "server")]
#[get("/api/favorites", session: tower_sessions::Session)]
pub async fn get_favorites() -> Result<Vec<Book>, ServerFnError> {
    let member_id = auth::require_member(&session).await.map_err(server_fn_error)?;
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::favorites(pool, member_id)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/favorites")]
pub async fn get_favorites() -> Result<Vec<Book>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/favorites/add", session: tower_sessions::Session)]
pub async fn add_favorite(book_id: BookId) -> Result<(), ServerFnError> {
    let member_id = auth::require_member(&session).await.map_err(server_fn_error)?;
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::add_favorite(pool, member_id, book_id)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/favorites/add")]
pub async fn add_favorite(book_id: BookId) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/favorites/remove", session: tower_sessions::Session)]
pub async fn remove_favorite(book_id: BookId) -> Result<(), ServerFnError> {
    let member_id = auth::require_member(&session).await.map_err(server_fn_error)?;
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::remove_favorite(pool, member_id, book_id)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/favorites/remove")]
pub async fn remove_favorite(book_id: BookId) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Borrow one copy of a book. Refusals come back as an unsuccessful receipt.
#[cfg(feature = "server")]
#[post("/api/loans/borrow", session: tower_sessions::Session)]
pub async fn borrow_book(book_id: BookId) -> Result<BorrowReceipt, ServerFnError> {
    let Some(member_id) = auth::session_member_id(&session)
        .await
        .map_err(server_fn_error)?
    else {
        return Ok(BorrowReceipt::refused("Not authenticated"));
    };
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::borrow(pool, settings::library_config(), member_id, book_id)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/loans/borrow")]
pub async fn borrow_book(book_id: BookId) -> Result<BorrowReceipt, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/profile", session: tower_sessions::Session)]
pub async fn get_profile_data() -> Result<ActionResult<UserProfile>, ServerFnError> {
    let Some(member_id) = auth::session_member_id(&session)
        .await
        .map_err(server_fn_error)?
    else {
        return Ok(ActionResult::failure("Not authenticated"));
    };
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::profile(pool, member_id)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/profile")]
pub async fn get_profile_data() -> Result<ActionResult<UserProfile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update the member's name and phone number. Email and role are not accepted.
#[cfg(feature = "server")]
#[post("/api/profile", session: tower_sessions::Session)]
pub async fn update_user_profile(
    first_name: String,
    last_name: String,
    phone_number: String,
) -> Result<ActionResult<String>, ServerFnError> {
    let Some(member_id) = auth::session_member_id(&session)
        .await
        .map_err(server_fn_error)?
    else {
        return Ok(ActionResult::failure("Not authenticated"));
    };
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    let update = store::ProfileUpdate {
        first_name,
        last_name,
        phone_number,
    };
    library::update_profile(pool, member_id, update)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/profile")]
pub async fn update_user_profile(
    first_name: String,
    last_name: String,
    phone_number: String,
) -> Result<ActionResult<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/profile/password", session: tower_sessions::Session)]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<ActionResult<String>, ServerFnError> {
    let Some(member_id) = auth::session_member_id(&session)
        .await
        .map_err(server_fn_error)?
    else {
        return Ok(ActionResult::failure("Not authenticated"));
    };
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::change_password(pool, member_id, &current_password, &new_password)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/profile/password")]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<ActionResult<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Add `delta` (usually negative) to a member's scheduling credits.
#[cfg(feature = "server")]
#[post("/api/members/credits", session: tower_sessions::Session)]
pub async fn update_member_credits(member_id: MemberId, delta: i32) -> Result<(), ServerFnError> {
    let caller = auth::require_member(&session).await.map_err(server_fn_error)?;
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::adjust_credits(pool, caller, member_id, delta)
        .await
        .map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/members/credits")]
pub async fn update_member_credits(member_id: MemberId, delta: i32) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/professors")]
pub async fn list_professors() -> Result<Vec<Professor>, ServerFnError> {
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::professors(pool).await.map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/professors")]
pub async fn list_professors() -> Result<Vec<Professor>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/professors/get")]
pub async fn get_professor(id: i64) -> Result<Option<Professor>, ServerFnError> {
    let pool = db::get_pool().await.map_err(server_fn_error)?;
    library::professor(pool, id).await.map_err(server_fn_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/professors/get")]
pub async fn get_professor(id: i64) -> Result<Option<Professor>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
