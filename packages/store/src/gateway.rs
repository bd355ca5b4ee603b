//! # Remote action gateway
//!
//! [`LibraryGateway`] is the async seam between the controllers in this crate and
//! whatever answers the remote actions. In the app it is backed by Dioxus server
//! functions (`api::ServerGateway`); in tests and offline demos by
//! [`crate::MemoryGateway`].
//!
//! Every method is one network round-trip. `Err(GatewayError)` means the call
//! never produced an answer; refusals by the server come back inside
//! [`ActionResult`] or [`BorrowReceipt`].

use std::future::Future;

use crate::models::{Book, BookId, MemberId, ProfileUpdate, UserProfile};
use crate::result::{ActionResult, BorrowReceipt, GatewayError};

/// Async interface to the library's remote actions.
pub trait LibraryGateway {
    fn get_favorites(&self) -> impl Future<Output = Result<Vec<Book>, GatewayError>>;

    fn add_favorite(&self, book_id: BookId) -> impl Future<Output = Result<(), GatewayError>>;

    fn remove_favorite(&self, book_id: BookId) -> impl Future<Output = Result<(), GatewayError>>;

    fn borrow_book(
        &self,
        book_id: BookId,
    ) -> impl Future<Output = Result<BorrowReceipt, GatewayError>>;

    fn get_profile_data(
        &self,
    ) -> impl Future<Output = Result<ActionResult<UserProfile>, GatewayError>>;

    fn update_user_profile(
        &self,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<ActionResult<String>, GatewayError>>;

    fn change_password(
        &self,
        current: String,
        new: String,
    ) -> impl Future<Output = Result<ActionResult<String>, GatewayError>>;

    fn update_member_credits(
        &self,
        member_id: MemberId,
        delta: i32,
    ) -> impl Future<Output = Result<(), GatewayError>>;
}
