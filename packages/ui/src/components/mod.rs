mod book_card;
pub use book_card::BookCard;

mod book_details;
pub use book_details::BookDetails;

mod borrow_dialog;
pub use borrow_dialog::BorrowDialog;

mod pagination;
pub use pagination::Pagination;
