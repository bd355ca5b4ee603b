//! Dashboard state container.
//!
//! Single owner of everything the dashboard mutates: the favorites cache, the
//! borrow workflow, the book open in the details view and the listing query.
//! The view keeps one `DashboardState` in a signal and only changes it through
//! these methods.

use crate::borrow::BorrowWorkflow;
use crate::favorites::{FavoriteIntent, FavoritesCache};
use crate::models::{Book, BookId};
use crate::notice::Notice;
use crate::query::ListingQuery;
use crate::result::GatewayError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub favorites: FavoritesCache,
    pub borrow: BorrowWorkflow,
    selected: Option<Book>,
    query: ListingQuery,
}

impl DashboardState {
    pub fn new(query: ListingQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Follow a URL change made outside the dashboard controls (back button, links).
    pub fn sync_query(&mut self, query: ListingQuery) {
        if self.query != query {
            self.query = query;
            self.selected = None;
        }
    }

    /// Query for a genre change; the caller navigates to it.
    pub fn select_genre(&mut self, genre: &str) -> ListingQuery {
        self.query = self.query.with_genre(genre);
        self.query.clone()
    }

    /// Query for a new search text; the caller navigates to it.
    pub fn select_search(&mut self, search: &str) -> ListingQuery {
        self.query = self.query.with_search(search);
        self.query.clone()
    }

    /// Query for a page change; the caller navigates to it.
    pub fn select_page(&mut self, page: u32) -> ListingQuery {
        self.query = self.query.with_page(page);
        self.query.clone()
    }

    pub fn view_details(&mut self, book: &Book) {
        self.selected = Some(book.clone());
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn is_favorite(&self, book_id: BookId) -> bool {
        self.favorites.contains(book_id)
    }

    pub fn request_borrow(&mut self, book: &Book) -> Result<(), Notice> {
        self.borrow.request(book)
    }

    pub fn cancel_borrow(&mut self) {
        self.borrow.cancel();
    }

    pub fn begin_toggle_favorite(&mut self, book_id: BookId) -> FavoriteIntent {
        self.favorites.begin_toggle(book_id)
    }

    pub fn complete_toggle_favorite(
        &mut self,
        intent: FavoriteIntent,
        outcome: Result<(), GatewayError>,
    ) -> Notice {
        self.favorites.complete(intent, outcome)
    }

    pub fn begin_confirm_borrow(&mut self) -> Option<Book> {
        self.borrow.begin_confirm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::LibraryGateway;
    use crate::memory::{GatewayCall, MemoryGateway};
    use crate::models::fixtures::book;

    #[tokio::test]
    async fn test_favorites_loaded_once_into_state() {
        let gateway = MemoryGateway::new()
            .with_books([book(7, 1), book(9, 1)])
            .with_favorites([7, 9]);

        let mut state = DashboardState::new(ListingQuery::default());
        state.favorites = FavoritesCache::load(&gateway).await;

        assert!(state.is_favorite(7));
        assert!(state.is_favorite(9));
        assert_eq!(state.favorites.len(), 2);
        assert_eq!(gateway.calls(), vec![GatewayCall::GetFavorites]);
    }

    #[tokio::test]
    async fn test_borrow_from_details_view() {
        let gateway = MemoryGateway::new().with_books([book(2, 1)]);
        let mut state = DashboardState::new(ListingQuery::default());

        state.view_details(&book(2, 1));
        state.request_borrow(&book(2, 1)).unwrap();
        state.close_details();
        let pending = state.begin_confirm_borrow().unwrap();
        let outcome = gateway.borrow_book(pending.id).await;
        let settlement = BorrowWorkflow::settle(&pending, outcome);

        assert!(settlement.refresh);
        assert!(state.selected().is_none());
        assert!(state.borrow.pending().is_none());
        assert_eq!(gateway.book(2).map(|b| b.available_copies), Some(0));
    }

    #[test]
    fn test_sync_query_closes_details_only_on_change() {
        let mut state = DashboardState::new(ListingQuery::default());
        state.view_details(&book(4, 1));

        state.sync_query(ListingQuery::default());
        assert!(state.selected().is_some());

        state.sync_query(ListingQuery::new(2, "all", ""));
        assert!(state.selected().is_none());
        assert_eq!(state.query().page, 2);
    }

    #[tokio::test]
    async fn test_favorite_and_borrow_are_independent() {
        let gateway = MemoryGateway::new().with_books([book(2, 1)]);
        let mut state = DashboardState::new(ListingQuery::default());

        state.request_borrow(&book(2, 1)).unwrap();
        let intent = state.begin_toggle_favorite(2);
        let outcome = intent.send(&gateway).await;
        state.complete_toggle_favorite(intent, outcome);

        assert!(state.is_favorite(2));
        assert_eq!(state.borrow.pending().map(|b| b.id), Some(2));
    }

    #[test]
    fn test_navigation() {
        let mut state = DashboardState::new(ListingQuery::new(3, "Poetry", ""));
        assert_eq!(state.select_page(4), ListingQuery::new(4, "Poetry", ""));

        let searched = state.select_search("dickinson");
        assert_eq!(searched, ListingQuery::new(1, "Poetry", "dickinson"));

        state.select_page(2);
        assert_eq!(state.select_genre("all"), ListingQuery::new(1, "all", "dickinson"));
        assert_eq!(state.select_search(""), ListingQuery::default());
        assert_eq!(state.query(), &ListingQuery::default());
    }
}
