use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::gateway::LibraryGateway;
use crate::models::{Book, BookId, FavoriteBook, MemberId, ProfileUpdate, UserProfile};
use crate::result::{ActionResult, BorrowReceipt, GatewayError};

/// A remote call as observed by [`MemoryGateway`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayCall {
    GetFavorites,
    AddFavorite(BookId),
    RemoveFavorite(BookId),
    BorrowBook(BookId),
    GetProfileData,
    UpdateUserProfile(ProfileUpdate),
    ChangePassword,
    UpdateMemberCredits(MemberId, i32),
}

#[derive(Debug, Default)]
struct Library {
    books: BTreeMap<BookId, Book>,
    favorites: BTreeSet<BookId>,
    loans: BTreeSet<BookId>,
    profile: Option<UserProfile>,
    password: String,
    credits: BTreeMap<MemberId, i32>,
    scripted_borrows: VecDeque<BorrowReceipt>,
    offline: bool,
    calls: Vec<GatewayCall>,
}

/// In-memory LibraryGateway for testing and offline demos.
///
/// Behaves like a single signed-in member talking to a tiny library. Every call
/// is recorded and can be inspected with [`MemoryGateway::calls`].
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Library>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Library> {
        // A panic while holding the lock only happens inside a failing test.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_books(self, books: impl IntoIterator<Item = Book>) -> Self {
        self.lock()
            .books
            .extend(books.into_iter().map(|b| (b.id, b)));
        self
    }

    pub fn with_favorites(self, ids: impl IntoIterator<Item = BookId>) -> Self {
        self.lock().favorites.extend(ids);
        self
    }

    pub fn with_profile(self, profile: UserProfile, password: &str) -> Self {
        {
            let mut lib = self.lock();
            lib.credits.insert(profile.id, profile.credits);
            lib.profile = Some(profile);
            lib.password = password.to_string();
        }
        self
    }

    /// Make every following call fail without an answer.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Answer the next borrow with `receipt` instead of consulting the catalogue.
    pub fn script_borrow(&self, receipt: BorrowReceipt) {
        self.lock().scripted_borrows.push_back(receipt);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    pub fn favorites(&self) -> BTreeSet<BookId> {
        self.lock().favorites.clone()
    }

    pub fn book(&self, id: BookId) -> Option<Book> {
        self.lock().books.get(&id).cloned()
    }

    pub fn credits(&self, member_id: MemberId) -> Option<i32> {
        self.lock().credits.get(&member_id).copied()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.lock().profile.clone()
    }

    /// Record the call, then fail it if the gateway is offline.
    fn enter(&self, call: GatewayCall) -> Result<MutexGuard<'_, Library>, GatewayError> {
        let mut lib = self.lock();
        lib.calls.push(call);
        if lib.offline {
            return Err(GatewayError::transport("connection refused"));
        }
        Ok(lib)
    }
}

impl LibraryGateway for MemoryGateway {
    async fn get_favorites(&self) -> Result<Vec<Book>, GatewayError> {
        let lib = self.enter(GatewayCall::GetFavorites)?;
        Ok(lib
            .favorites
            .iter()
            .filter_map(|id| lib.books.get(id).cloned())
            .collect())
    }

    async fn add_favorite(&self, book_id: BookId) -> Result<(), GatewayError> {
        let mut lib = self.enter(GatewayCall::AddFavorite(book_id))?;
        lib.favorites.insert(book_id);
        Ok(())
    }

    async fn remove_favorite(&self, book_id: BookId) -> Result<(), GatewayError> {
        let mut lib = self.enter(GatewayCall::RemoveFavorite(book_id))?;
        lib.favorites.remove(&book_id);
        Ok(())
    }

    async fn borrow_book(&self, book_id: BookId) -> Result<BorrowReceipt, GatewayError> {
        let mut lib = self.enter(GatewayCall::BorrowBook(book_id))?;
        if let Some(receipt) = lib.scripted_borrows.pop_front() {
            return Ok(receipt);
        }
        if lib.loans.contains(&book_id) {
            return Ok(BorrowReceipt::refused("You have already borrowed this book"));
        }
        let Some(book) = lib.books.get_mut(&book_id) else {
            return Ok(BorrowReceipt::refused("Book not found"));
        };
        if book.available_copies <= 0 {
            return Ok(BorrowReceipt::refused("Book is not available"));
        }
        book.available_copies -= 1;
        lib.loans.insert(book_id);
        Ok(BorrowReceipt::borrowed("Book borrowed successfully"))
    }

    async fn get_profile_data(&self) -> Result<ActionResult<UserProfile>, GatewayError> {
        let lib = self.enter(GatewayCall::GetProfileData)?;
        let Some(mut profile) = lib.profile.clone() else {
            return Ok(ActionResult::failure("Not authenticated"));
        };
        profile.credits = lib.credits.get(&profile.id).copied().unwrap_or_default();
        profile.favorites = lib
            .favorites
            .iter()
            .filter_map(|id| lib.books.get(id))
            .map(FavoriteBook::from)
            .collect();
        Ok(ActionResult::success(profile))
    }

    async fn update_user_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<ActionResult<String>, GatewayError> {
        let mut lib = self.enter(GatewayCall::UpdateUserProfile(update.clone()))?;
        if update.first_name.trim().is_empty() {
            return Ok(ActionResult::failure("First name is required"));
        }
        let Some(profile) = lib.profile.as_mut() else {
            return Ok(ActionResult::failure("Not authenticated"));
        };
        profile.first_name = update.first_name;
        profile.last_name = update.last_name;
        profile.phone_number = update.phone_number;
        Ok(ActionResult::success("Profile updated successfully".to_string()))
    }

    async fn change_password(
        &self,
        current: String,
        new: String,
    ) -> Result<ActionResult<String>, GatewayError> {
        let mut lib = self.enter(GatewayCall::ChangePassword)?;
        if lib.password != current {
            return Ok(ActionResult::failure("Current password is incorrect"));
        }
        lib.password = new;
        Ok(ActionResult::success("Password changed successfully".to_string()))
    }

    async fn update_member_credits(
        &self,
        member_id: MemberId,
        delta: i32,
    ) -> Result<(), GatewayError> {
        let mut lib = self.enter(GatewayCall::UpdateMemberCredits(member_id, delta))?;
        match lib.credits.get_mut(&member_id) {
            Some(balance) => {
                *balance += delta;
                Ok(())
            }
            None => Err(GatewayError::transport(format!("member {member_id} not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{book, profile};

    #[tokio::test]
    async fn test_borrow_decrements_copies_once_per_member() {
        let gateway = MemoryGateway::new().with_books([book(1, 2)]);

        let first = gateway.borrow_book(1).await.unwrap();
        assert!(first.success);
        assert_eq!(gateway.book(1).unwrap().available_copies, 1);

        let second = gateway.borrow_book(1).await.unwrap();
        assert!(!second.success);
        assert_eq!(second.message, "You have already borrowed this book");
        assert_eq!(gateway.book(1).unwrap().available_copies, 1);
    }

    #[tokio::test]
    async fn test_borrow_unavailable_is_refused() {
        let gateway = MemoryGateway::new().with_books([book(3, 0)]);
        let receipt = gateway.borrow_book(3).await.unwrap();
        assert_eq!(receipt, BorrowReceipt::refused("Book is not available"));
    }

    #[tokio::test]
    async fn test_profile_includes_favorites() {
        let gateway = MemoryGateway::new()
            .with_books([book(7, 1), book(9, 1)])
            .with_favorites([9])
            .with_profile(profile(), "secret");

        let loaded = gateway.get_profile_data().await.unwrap().into_result().unwrap();
        assert_eq!(loaded.favorites.len(), 1);
        assert_eq!(loaded.favorites[0].id, 9);
    }

    #[tokio::test]
    async fn test_offline_records_call_and_fails() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);

        assert!(gateway.add_favorite(4).await.is_err());
        assert_eq!(gateway.calls(), vec![GatewayCall::AddFavorite(4)]);
        assert!(gateway.favorites().is_empty());
    }
}
