//! # Borrow workflow
//!
//! ```text
//! Idle ──request(available)──▶ PendingConfirmation ──confirm──▶ Idle (+ remote borrow)
//!   ▲                                │
//!   └────────────cancel──────────────┘
//! ```
//!
//! At most one book waits for confirmation. A new request while one is pending
//! replaces it. Every way out of `PendingConfirmation` returns to `Idle`,
//! whatever the remote call answers.

use crate::models::Book;
use crate::notice::Notice;
use crate::result::{BorrowReceipt, GatewayError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BorrowState {
    #[default]
    Idle,
    PendingConfirmation(Book),
}

/// What the view has to do once a confirmed borrow has been answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorrowSettlement {
    pub notice: Notice,
    /// Re-fetch the listing so availability reflects the server.
    pub refresh: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BorrowWorkflow {
    state: BorrowState,
}

impl BorrowWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BorrowState {
        &self.state
    }

    /// The book shown in the confirmation dialog, if any.
    pub fn pending(&self) -> Option<&Book> {
        match &self.state {
            BorrowState::Idle => None,
            BorrowState::PendingConfirmation(book) => Some(book),
        }
    }

    /// Ask to borrow `book`. Unavailable books are rejected without a state change.
    pub fn request(&mut self, book: &Book) -> Result<(), Notice> {
        if !book.is_available() {
            return Err(Notice::error("This book is currently unavailable."));
        }
        self.state = BorrowState::PendingConfirmation(book.clone());
        Ok(())
    }

    /// Dismiss the confirmation without a remote call.
    pub fn cancel(&mut self) {
        self.state = BorrowState::Idle;
    }

    /// Leave `PendingConfirmation` and return the book to borrow.
    ///
    /// `None` when nothing was pending; the caller must then not call the server.
    pub fn begin_confirm(&mut self) -> Option<Book> {
        match std::mem::take(&mut self.state) {
            BorrowState::Idle => None,
            BorrowState::PendingConfirmation(book) => Some(book),
        }
    }

    /// Turn the answer of a borrow call into the notice and refresh decision.
    pub fn settle(book: &Book, outcome: Result<BorrowReceipt, GatewayError>) -> BorrowSettlement {
        match outcome {
            Ok(receipt) if receipt.success => {
                tracing::info!("Borrowed book {}", book.id);
                BorrowSettlement {
                    notice: Notice::success(receipt.message),
                    refresh: true,
                }
            }
            Ok(receipt) => BorrowSettlement {
                notice: Notice::error(receipt.message),
                refresh: false,
            },
            Err(e) => {
                tracing::error!("Error borrowing book {}: {}", book.id, e);
                BorrowSettlement {
                    notice: Notice::error("Failed to borrow book. Please try again."),
                    refresh: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{GatewayCall, MemoryGateway};
    use crate::models::fixtures::book;
    use crate::gateway::LibraryGateway;
    use crate::notice::NoticeLevel;

    async fn confirm(workflow: &mut BorrowWorkflow, gateway: &MemoryGateway) -> Option<BorrowSettlement> {
        let book = workflow.begin_confirm()?;
        let outcome = gateway.borrow_book(book.id).await;
        Some(BorrowWorkflow::settle(&book, outcome))
    }

    #[test]
    fn test_unavailable_book_never_opens_confirmation() {
        let mut workflow = BorrowWorkflow::new();
        for copies in [0, -1] {
            let notice = workflow.request(&book(1, copies)).unwrap_err();
            assert_eq!(notice.description, "This book is currently unavailable.");
            assert_eq!(workflow.state(), &BorrowState::Idle);
        }
    }

    #[test]
    fn test_unavailable_request_keeps_existing_pending_book() {
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(1, 1)).unwrap();
        assert!(workflow.request(&book(2, 0)).is_err());
        assert_eq!(workflow.pending().map(|b| b.id), Some(1));
    }

    #[test]
    fn test_last_request_wins() {
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(1, 1)).unwrap();
        workflow.request(&book(2, 3)).unwrap();
        assert_eq!(workflow.pending().map(|b| b.id), Some(2));
    }

    #[tokio::test]
    async fn test_cancel_makes_no_call() {
        let gateway = MemoryGateway::new().with_books([book(1, 1)]);
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(1, 1)).unwrap();

        workflow.cancel();

        assert_eq!(workflow.state(), &BorrowState::Idle);
        assert!(confirm(&mut workflow, &gateway).await.is_none());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_issues_exactly_one_call() {
        let gateway = MemoryGateway::new().with_books([book(11, 2)]);
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(11, 2)).unwrap();

        let settlement = confirm(&mut workflow, &gateway).await.unwrap();

        assert_eq!(gateway.calls(), vec![GatewayCall::BorrowBook(11)]);
        assert_eq!(settlement.notice.level, NoticeLevel::Success);
        assert!(settlement.refresh);
        assert_eq!(gateway.book(11).unwrap().available_copies, 1);
        assert_eq!(workflow.state(), &BorrowState::Idle);

        // A second confirm has nothing to do.
        assert!(confirm(&mut workflow, &gateway).await.is_none());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_borrowed_scenario_shows_message_and_refreshes() {
        let gateway = MemoryGateway::new();
        gateway.script_borrow(BorrowReceipt::borrowed("Borrowed"));
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(42, 1)).unwrap();

        let settlement = confirm(&mut workflow, &gateway).await.unwrap();

        assert_eq!(settlement.notice, Notice::success("Borrowed"));
        assert!(settlement.refresh);
        assert_eq!(gateway.calls(), vec![GatewayCall::BorrowBook(42)]);
    }

    #[tokio::test]
    async fn test_refusal_clears_state_without_refresh() {
        let gateway = MemoryGateway::new();
        gateway.script_borrow(BorrowReceipt::refused("Borrow limit reached"));
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(5, 1)).unwrap();

        let settlement = confirm(&mut workflow, &gateway).await.unwrap();

        assert_eq!(settlement.notice, Notice::error("Borrow limit reached"));
        assert!(!settlement.refresh);
        assert_eq!(workflow.state(), &BorrowState::Idle);
    }

    #[tokio::test]
    async fn test_transport_error_uses_generic_message() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let mut workflow = BorrowWorkflow::new();
        workflow.request(&book(5, 1)).unwrap();

        let settlement = confirm(&mut workflow, &gateway).await.unwrap();

        assert_eq!(
            settlement.notice.description,
            "Failed to borrow book. Please try again."
        );
        assert!(!settlement.refresh);
        assert!(workflow.pending().is_none());
    }
}
