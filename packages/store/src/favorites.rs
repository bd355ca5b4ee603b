//! # Favorites cache
//!
//! Client-side copy of the current member's favorite book ids. It is filled once
//! from the server and afterwards only changed when a remote add/remove call has
//! *succeeded*, so a failed call can never make it diverge from the server.
//!
//! Toggling is two-phase so that UI code can release its state handle while the
//! remote call is in flight:
//!
//! 1. [`FavoritesCache::begin_toggle`] decides add vs. remove from the current
//!    membership and hands out a [`FavoriteIntent`].
//! 2. The caller performs the remote call described by the intent.
//! 3. [`FavoritesCache::complete`] applies the outcome and returns the notice.
//!
//! Add and remove are idempotent on the server, so every successful completion
//! is applied as it arrives. When calls for the same book overlapped, answers
//! may arrive in a different order than the server ran them; once the last of
//! them resolves the cache asks for a re-sync ([`FavoritesCache::take_resync`]),
//! and [`FavoritesCache::resync`] installs the server's set.

use std::collections::{BTreeSet, HashMap};

use crate::gateway::LibraryGateway;
use crate::models::BookId;
use crate::notice::{Notice, NoticeLevel};
use crate::result::GatewayError;

/// Which remote call a toggle performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// A toggle that has been decided but not yet applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FavoriteIntent {
    pub book_id: BookId,
    pub action: FavoriteAction,
}

impl FavoriteIntent {
    /// Perform the remote call this intent stands for.
    pub async fn send<G: LibraryGateway>(&self, gateway: &G) -> Result<(), GatewayError> {
        match self.action {
            FavoriteAction::Add => gateway.add_favorite(self.book_id).await,
            FavoriteAction::Remove => gateway.remove_favorite(self.book_id).await,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FavoritesCache {
    ids: BTreeSet<BookId>,
    /// Unanswered calls per book.
    in_flight: HashMap<BookId, usize>,
    /// Books that had more than one call in flight since they were last idle.
    overlapped: BTreeSet<BookId>,
    resync: bool,
    loaded: bool,
}

impl FavoritesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the authoritative favorite set. A failed fetch leaves the cache empty.
    pub async fn load<G: LibraryGateway>(gateway: &G) -> Self {
        let mut cache = Self::new();
        match gateway.get_favorites().await {
            Ok(books) => cache.replace(books.iter().map(|b| b.id)),
            Err(e) => tracing::error!("Failed to load favorites: {}", e),
        }
        cache
    }

    /// Overwrite the set with server truth.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = BookId>) {
        self.ids = ids.into_iter().collect();
        self.loaded = true;
    }

    pub fn contains(&self, book_id: BookId) -> bool {
        self.ids.contains(&book_id)
    }

    pub fn ids(&self) -> &BTreeSet<BookId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether a toggle for this book is still waiting for its answer.
    pub fn is_pending(&self, book_id: BookId) -> bool {
        self.in_flight.contains_key(&book_id)
    }

    /// Decide the remote call for a toggle.
    pub fn begin_toggle(&mut self, book_id: BookId) -> FavoriteIntent {
        let action = if self.contains(book_id) {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        };
        let count = self.in_flight.entry(book_id).or_default();
        *count += 1;
        if *count > 1 {
            self.overlapped.insert(book_id);
        }
        FavoriteIntent { book_id, action }
    }

    /// Apply the outcome of `intent`'s remote call.
    pub fn complete(&mut self, intent: FavoriteIntent, outcome: Result<(), GatewayError>) -> Notice {
        let book_id = intent.book_id;
        let remaining = match self.in_flight.get_mut(&book_id) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            self.in_flight.remove(&book_id);
        }
        if remaining == 0 && self.overlapped.remove(&book_id) {
            tracing::debug!("Overlapping favorite toggles for book {} settled", book_id);
            self.resync = true;
        }

        if let Err(e) = outcome {
            tracing::error!("Error toggling favorite for book {}: {}", book_id, e);
            return Notice::error("Failed to update favorites. Please try again.");
        }

        match intent.action {
            FavoriteAction::Add => {
                self.ids.insert(book_id);
                Notice::new(
                    NoticeLevel::Success,
                    "Added to favorites",
                    "The book has been added to your favorites.",
                )
            }
            FavoriteAction::Remove => {
                self.ids.remove(&book_id);
                Notice::new(
                    NoticeLevel::Info,
                    "Removed from favorites",
                    "The book has been removed from your favorites.",
                )
            }
        }
    }

    /// Whether overlapping toggles settled since the last call. Resets the flag.
    pub fn take_resync(&mut self) -> bool {
        std::mem::take(&mut self.resync)
    }

    /// Install a freshly fetched server set. Books with calls still in flight
    /// keep their local membership; their completions decide it.
    pub fn resync(&mut self, server_ids: impl IntoIterator<Item = BookId>) {
        let mut ids: BTreeSet<BookId> = server_ids.into_iter().collect();
        for book_id in self.in_flight.keys() {
            if self.ids.contains(book_id) {
                ids.insert(*book_id);
            } else {
                ids.remove(book_id);
            }
        }
        self.replace(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{GatewayCall, MemoryGateway};
    use crate::models::fixtures::book;

    async fn toggle(cache: &mut FavoritesCache, gateway: &MemoryGateway, book_id: BookId) -> Notice {
        let intent = cache.begin_toggle(book_id);
        let outcome = intent.send(gateway).await;
        cache.complete(intent, outcome)
    }

    #[tokio::test]
    async fn test_load_mirrors_server_favorites() {
        let gateway = MemoryGateway::new()
            .with_books([book(7, 1), book(8, 1), book(9, 1)])
            .with_favorites([7, 9]);

        let cache = FavoritesCache::load(&gateway).await;

        assert!(cache.is_loaded());
        assert_eq!(cache.ids().iter().copied().collect::<Vec<_>>(), vec![7, 9]);
        assert_eq!(gateway.calls(), vec![GatewayCall::GetFavorites]);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_cache_empty() {
        let gateway = MemoryGateway::new().with_favorites([1]);
        gateway.set_offline(true);

        let cache = FavoritesCache::load(&gateway).await;

        assert!(cache.is_empty());
        assert!(!cache.is_loaded());
    }

    #[tokio::test]
    async fn test_toggle_adds_after_success() {
        let gateway = MemoryGateway::new().with_books([book(5, 1)]);
        let mut cache = FavoritesCache::new();

        let notice = toggle(&mut cache, &gateway, 5).await;

        assert_eq!(notice.title, "Added to favorites");
        assert!(cache.contains(5));
        assert_eq!(gateway.calls(), vec![GatewayCall::AddFavorite(5)]);
    }

    #[tokio::test]
    async fn test_toggle_removes_existing() {
        let gateway = MemoryGateway::new().with_favorites([5]);
        let mut cache = FavoritesCache::new();
        cache.replace([5]);

        let notice = toggle(&mut cache, &gateway, 5).await;

        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(!cache.contains(5));
        assert_eq!(gateway.calls(), vec![GatewayCall::RemoveFavorite(5)]);
        assert!(gateway.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_failed_add_leaves_set_unchanged() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let mut cache = FavoritesCache::new();
        cache.replace([1]);

        let notice = toggle(&mut cache, &gateway, 2).await;

        assert!(notice.is_error());
        assert_eq!(notice.description, "Failed to update favorites. Please try again.");
        assert_eq!(cache.ids().len(), 1);
        assert!(!cache.contains(2));
        assert!(!cache.is_pending(2));
        assert_eq!(gateway.calls(), vec![GatewayCall::AddFavorite(2)]);
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_membership() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let mut cache = FavoritesCache::new();
        cache.replace([3]);

        toggle(&mut cache, &gateway, 3).await;

        assert!(cache.contains(3));
    }

    #[tokio::test]
    async fn test_double_toggle_before_resolution() {
        // Both toggles read membership before either call resolves, so both add.
        let gateway = MemoryGateway::new();
        let mut cache = FavoritesCache::new();

        let first = cache.begin_toggle(4);
        let second = cache.begin_toggle(4);
        assert_eq!(first.action, FavoriteAction::Add);
        assert_eq!(second.action, FavoriteAction::Add);

        // Answers arrive in reverse order.
        let second_outcome = second.send(&gateway).await;
        let first_outcome = first.send(&gateway).await;
        cache.complete(second, second_outcome);
        assert!(cache.is_pending(4));
        cache.complete(first, first_outcome);

        assert_eq!(cache.len(), 1);
        assert!(cache.contains(4));
        assert!(!cache.is_pending(4));
        assert_eq!(gateway.favorites().len(), 1);
        assert_eq!(
            gateway.calls(),
            vec![GatewayCall::AddFavorite(4), GatewayCall::AddFavorite(4)]
        );
    }

    #[tokio::test]
    async fn test_earlier_success_survives_later_failure() {
        let gateway = MemoryGateway::new();
        let mut cache = FavoritesCache::new();

        let first = cache.begin_toggle(4);
        let second = cache.begin_toggle(4);

        let first_outcome = first.send(&gateway).await;
        let notice = cache.complete(first, first_outcome);
        assert_eq!(notice.title, "Added to favorites");

        gateway.set_offline(true);
        let second_outcome = second.send(&gateway).await;
        let notice = cache.complete(second, second_outcome);
        assert!(notice.is_error());

        assert!(gateway.favorites().contains(&4));
        assert!(cache.contains(4));
        assert!(!cache.is_pending(4));
    }

    #[tokio::test]
    async fn test_overlap_requests_one_resync_when_settled() {
        let gateway = MemoryGateway::new()
            .with_books([book(6, 1), book(7, 1)])
            .with_favorites([6, 7]);
        let mut cache = FavoritesCache::new();
        cache.replace([6]);

        let remove = cache.begin_toggle(6);
        let again = cache.begin_toggle(6);
        assert_eq!(again.action, FavoriteAction::Remove);

        let outcome = remove.send(&gateway).await;
        cache.complete(remove, outcome);
        assert!(!cache.take_resync());

        let outcome = again.send(&gateway).await;
        cache.complete(again, outcome);
        assert!(cache.take_resync());
        assert!(!cache.take_resync());

        let server = gateway.get_favorites().await.unwrap();
        cache.resync(server.iter().map(|b| b.id));
        assert!(!cache.contains(6));
        assert!(cache.contains(7));
    }

    #[tokio::test]
    async fn test_single_toggle_needs_no_resync() {
        let gateway = MemoryGateway::new();
        let mut cache = FavoritesCache::new();

        toggle(&mut cache, &gateway, 8).await;

        assert!(!cache.take_resync());
    }

    #[test]
    fn test_resync_keeps_membership_of_books_in_flight() {
        let mut cache = FavoritesCache::new();
        cache.replace([1]);
        cache.begin_toggle(2);

        // Server answer taken before the add of 2 reached it.
        cache.resync([1, 3]);
        assert!(cache.contains(3));
        assert!(!cache.contains(2));
        assert!(cache.is_pending(2));

        cache.complete(
            FavoriteIntent {
                book_id: 2,
                action: FavoriteAction::Add,
            },
            Ok(()),
        );
        assert!(cache.contains(2));
    }
}
