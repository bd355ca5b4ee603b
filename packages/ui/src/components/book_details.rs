use dioxus::prelude::*;
use store::Book;

use crate::views::ModalOverlay;

/// Full record of a book, opened from the listing.
#[component]
pub fn BookDetails(
    book: Book,
    is_favorite: bool,
    #[props(default)] favorite_pending: bool,
    on_close: EventHandler<()>,
    on_toggle_favorite: EventHandler<Book>,
    on_borrow: EventHandler<Book>,
) -> Element {
    let available = book.is_available();
    let publisher = book.publisher.clone().unwrap_or_else(|| "Unknown".to_string());
    let isbn = book.isbn_no.clone().unwrap_or_else(|| "-".to_string());
    let pages = book.pages.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
    let for_favorite = book.clone();
    let for_borrow = book.clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "book-details",
                h2 { "{book.title}" }
                p { class: "book-author", "by {book.author}" }
                dl {
                    dt { "Genre" }
                    dd { "{book.genre}" }
                    dt { "Publisher" }
                    dd { "{publisher}" }
                    dt { "ISBN" }
                    dd { "{isbn}" }
                    dt { "Pages" }
                    dd { "{pages}" }
                    dt { "Copies" }
                    dd { "{book.available_copies} of {book.total_copies} available" }
                }
                div {
                    class: "dialog-actions",
                    button {
                        class: "btn",
                        disabled: favorite_pending,
                        onclick: move |_| on_toggle_favorite.call(for_favorite.clone()),
                        if is_favorite { "Remove from favorites" } else { "Add to favorites" }
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !available,
                        onclick: move |_| on_borrow.call(for_borrow.clone()),
                        "{book.availability_label()}"
                    }
                    button {
                        class: "btn btn-link",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
