//! Book listing with favorites and borrowing.

use api::ServerGateway;
use dioxus::prelude::*;
use store::{Book, BookPage, BorrowWorkflow, DashboardState, FavoritesCache, LibraryGateway, ListingQuery};

use crate::components::{BookCard, BookDetails, BorrowDialog, Pagination};
use crate::notifications::{notify, use_notifications};

/// The dashboard page. `on_navigate` receives the query to put in the URL.
#[component]
pub fn DashboardView(query: ListingQuery, on_navigate: EventHandler<ListingQuery>) -> Element {
    let mut tray = use_notifications();
    let mut state = use_signal(|| DashboardState::new(query.clone()));

    let page = query.page;
    let genre = query.genre_or_all().to_string();
    let search = query.search_text().to_string();
    let mut search_draft = use_signal(|| search.clone());

    use_effect(use_reactive!(|query| {
        search_draft.set(query.search_text().to_string());
        state.write().sync_query(query);
    }));

    let mut listing = use_resource(use_reactive!(|(page, genre, search)| async move {
        api::list_books(page, genre, search).await
    }));

    // Favorites are read once per mount; toggles keep them current afterwards.
    use_hook(|| {
        spawn(async move {
            let favorites = FavoritesCache::load(&ServerGateway).await;
            state.write().favorites = favorites;
        })
    });

    let toggle_favorite = move |book: Book| {
        let intent = state.write().begin_toggle_favorite(book.id);
        spawn(async move {
            let outcome = intent.send(&ServerGateway).await;
            let notice = state.write().complete_toggle_favorite(intent, outcome);
            notify(&mut tray, notice);

            if !state.write().favorites.take_resync() {
                return;
            }
            match ServerGateway.get_favorites().await {
                Ok(books) => state.write().favorites.resync(books.iter().map(|b| b.id)),
                Err(e) => tracing::error!("Failed to re-sync favorites: {}", e),
            }
        });
    };

    let request_borrow = move |book: Book| {
        let refused = state.write().request_borrow(&book).err();
        if let Some(notice) = refused {
            notify(&mut tray, notice);
        }
    };

    let confirm_borrow = move |_| {
        let Some(book) = state.write().begin_confirm_borrow() else {
            return;
        };
        spawn(async move {
            let outcome = ServerGateway.borrow_book(book.id).await;
            let settlement = BorrowWorkflow::settle(&book, outcome);
            notify(&mut tray, settlement.notice);
            if settlement.refresh {
                listing.restart();
            }
        });
    };

    let select_genre = move |evt: FormEvent| {
        let next = state.write().select_genre(&evt.value());
        on_navigate.call(next);
    };

    let submit_search = move |evt: FormEvent| {
        evt.prevent_default();
        let next = state.write().select_search(&search_draft());
        on_navigate.call(next);
    };

    let select_page = move |page: u32| {
        let next = state.write().select_page(page);
        on_navigate.call(next);
    };

    let snapshot = state.read().clone();
    let selected_genre = snapshot.query().genre_or_all().to_string();

    rsx! {
        div {
            class: "dashboard",
            match listing.cloned() {
                None => rsx! {
                    p { class: "loading", "Loading books..." }
                },
                Some(Err(e)) => rsx! {
                    div {
                        class: "load-error",
                        p { "Failed to load books: {e}" }
                        button { class: "btn", onclick: move |_| listing.restart(), "Retry" }
                    }
                },
                Some(Ok(BookPage { books, recently_added, current_page, total_pages, genres, .. })) => rsx! {
                    if !recently_added.is_empty() {
                        section {
                            class: "recently-added",
                            h2 { "Recently added" }
                            div {
                                class: "book-grid compact",
                                for book in recently_added {
                                    BookCard {
                                        key: "recent-{book.id}",
                                        is_favorite: snapshot.is_favorite(book.id),
                                        favorite_pending: snapshot.favorites.is_pending(book.id),
                                        book: book.clone(),
                                        on_toggle_favorite: toggle_favorite,
                                        on_borrow: request_borrow,
                                        on_view: move |book: Book| state.write().view_details(&book),
                                    }
                                }
                            }
                        }
                    }
                    section {
                        class: "catalogue",
                        div {
                            class: "catalogue-header",
                            h2 { "All books" }
                            form {
                                class: "search-form",
                                onsubmit: submit_search,
                                input {
                                    r#type: "search",
                                    placeholder: "Search title or author",
                                    value: search_draft(),
                                    oninput: move |evt: FormEvent| search_draft.set(evt.value()),
                                }
                                button { r#type: "submit", class: "btn", "Search" }
                            }
                            select {
                                class: "genre-select",
                                value: "{selected_genre}",
                                onchange: select_genre,
                                option { value: store::query::ALL_GENRES, "All genres" }
                                for g in genres {
                                    option { key: "{g}", value: "{g}", "{g}" }
                                }
                            }
                        }
                        if books.is_empty() {
                            p { class: "empty", "No books found." }
                        }
                        div {
                            class: "book-grid",
                            for book in books {
                                BookCard {
                                    key: "{book.id}",
                                    is_favorite: snapshot.is_favorite(book.id),
                                    favorite_pending: snapshot.favorites.is_pending(book.id),
                                    book: book.clone(),
                                    on_toggle_favorite: toggle_favorite,
                                    on_borrow: request_borrow,
                                    on_view: move |book: Book| state.write().view_details(&book),
                                }
                            }
                        }
                        Pagination {
                            current_page,
                            total_pages,
                            on_select: select_page,
                        }
                    }
                },
            }

            if let Some(book) = snapshot.selected().cloned() {
                BookDetails {
                    is_favorite: snapshot.is_favorite(book.id),
                    favorite_pending: snapshot.favorites.is_pending(book.id),
                    book,
                    on_close: move |_| state.write().close_details(),
                    on_toggle_favorite: toggle_favorite,
                    on_borrow: request_borrow,
                }
            }

            if let Some(book) = snapshot.borrow.pending().cloned() {
                BorrowDialog {
                    book,
                    on_confirm: confirm_borrow,
                    on_cancel: move |_| state.write().cancel_borrow(),
                }
            }
        }
    }
}
