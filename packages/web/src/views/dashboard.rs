use dioxus::prelude::*;
use store::ListingQuery;
use ui::views::DashboardView;

use crate::Route;

/// `/dashboard?page=&genre=&q=`: the URL is the source of truth for the listing.
#[component]
pub fn Dashboard(page: u32, genre: String, q: String) -> Element {
    let nav = use_navigator();
    let query = ListingQuery::new(page, &genre, &q);

    rsx! {
        DashboardView {
            query,
            on_navigate: move |next: ListingQuery| {
                nav.push(Route::Dashboard {
                    page: next.page,
                    genre: next.genre.unwrap_or_default(),
                    q: next.search.unwrap_or_default(),
                });
            },
        }
    }
}
