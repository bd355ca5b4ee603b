use dioxus::prelude::*;
use store::Book;

use crate::{icons, Icon};

/// One book in the listing grid.
#[component]
pub fn BookCard(
    book: Book,
    is_favorite: bool,
    #[props(default)] favorite_pending: bool,
    on_toggle_favorite: EventHandler<Book>,
    on_borrow: EventHandler<Book>,
    on_view: EventHandler<Book>,
) -> Element {
    let available = book.is_available();
    let heart_class = if is_favorite {
        "favorite-toggle active"
    } else {
        "favorite-toggle"
    };
    let title = if is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    let for_favorite = book.clone();
    let for_borrow = book.clone();
    let for_view = book.clone();

    rsx! {
        article {
            class: "book-card",
            div {
                class: "book-card-header",
                h3 {
                    class: "book-title",
                    onclick: move |_| on_view.call(for_view.clone()),
                    "{book.title}"
                }
                button {
                    class: "{heart_class}",
                    title: "{title}",
                    disabled: favorite_pending,
                    onclick: move |_| on_toggle_favorite.call(for_favorite.clone()),
                    Icon { icon: icons::FaHeart, width: 16, height: 16 }
                }
            }
            p { class: "book-author", "{book.author}" }
            span { class: "book-genre", "{book.genre}" }
            div {
                class: "book-card-footer",
                span {
                    class: if available { "availability available" } else { "availability unavailable" },
                    "{book.available_copies}/{book.total_copies} available"
                }
                button {
                    class: "btn btn-primary",
                    disabled: !available,
                    onclick: move |_| on_borrow.call(for_borrow.clone()),
                    "{book.availability_label()}"
                }
            }
        }
    }
}
