use dioxus::prelude::*;
use store::Book;

use crate::views::ModalOverlay;

/// Confirmation step before a borrow is sent.
#[component]
pub fn BorrowDialog(book: Book, on_confirm: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            div {
                class: "borrow-dialog",
                h2 { "Confirm borrow" }
                p {
                    "Borrow "
                    strong { "{book.title}" }
                    " by {book.author}?"
                }
                div {
                    class: "dialog-actions",
                    button {
                        class: "btn",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_confirm.call(()),
                        "Confirm"
                    }
                }
            }
        }
    }
}
