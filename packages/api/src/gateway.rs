//! [`ServerGateway`]: the remote action gateway used by the app.
//!
//! Each call is one server function round-trip. A [`ServerFnError`] means no
//! usable answer came back and becomes [`GatewayError::Transport`].

use dioxus::prelude::ServerFnError;
use store::{
    ActionResult, Book, BookId, BorrowReceipt, GatewayError, LibraryGateway, MemberId,
    ProfileUpdate, UserProfile,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServerGateway;

fn transport(e: ServerFnError) -> GatewayError {
    GatewayError::transport(e)
}

impl LibraryGateway for ServerGateway {
    async fn get_favorites(&self) -> Result<Vec<Book>, GatewayError> {
        crate::get_favorites().await.map_err(transport)
    }

    async fn add_favorite(&self, book_id: BookId) -> Result<(), GatewayError> {
        crate::add_favorite(book_id).await.map_err(transport)
    }

    async fn remove_favorite(&self, book_id: BookId) -> Result<(), GatewayError> {
        crate::remove_favorite(book_id).await.map_err(transport)
    }

    async fn borrow_book(&self, book_id: BookId) -> Result<BorrowReceipt, GatewayError> {
        crate::borrow_book(book_id).await.map_err(transport)
    }

    async fn get_profile_data(&self) -> Result<ActionResult<UserProfile>, GatewayError> {
        crate::get_profile_data().await.map_err(transport)
    }

    async fn update_user_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<ActionResult<String>, GatewayError> {
        crate::update_user_profile(update.first_name, update.last_name, update.phone_number)
            .await
            .map_err(transport)
    }

    async fn change_password(
        &self,
        current: String,
        new: String,
    ) -> Result<ActionResult<String>, GatewayError> {
        crate::change_password(current, new).await.map_err(transport)
    }

    async fn update_member_credits(
        &self,
        member_id: MemberId,
        delta: i32,
    ) -> Result<(), GatewayError> {
        crate::update_member_credits(member_id, delta)
            .await
            .map_err(transport)
    }
}
