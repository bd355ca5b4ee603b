//! Shell around every signed-in page.

use dioxus::prelude::*;
use ui::{use_auth, Navbar};

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Send visitors without a session to the login page
    use_effect(move || {
        let state = auth();
        if !state.loading && state.member.is_none() {
            nav.replace(Route::Login {});
        }
    });

    if auth().loading {
        return rsx! {
            p { class: "loading", "Loading..." }
        };
    }

    rsx! {
        Navbar {
            Link {
                to: Route::Dashboard { page: 1, genre: String::new(), q: String::new() },
                active_class: "active",
                "Books"
            }
            Link { to: Route::Professors {}, active_class: "active", "Professors" }
            Link { to: Route::Profile {}, active_class: "active", "Profile" }
        }
        main {
            class: "app-content",
            Outlet::<Route> {}
        }
    }
}
