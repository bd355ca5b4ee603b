use dioxus::prelude::*;

use crate::auth::{use_auth, SignOutButton};
use crate::{icons, Icon};

const LIBRARY_CSS: Asset = asset!("/assets/library.css");

/// Top bar shown on every signed-in page. `children` are the navigation links.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        document::Link { rel: "stylesheet", href: LIBRARY_CSS }
        header {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: icons::FaBookOpen, width: 18, height: 18 }
                span { "Shelfmark" }
            }
            nav {
                class: "navbar-links",
                {children}
            }
            div {
                class: "navbar-session",
                if let Some(member) = state.member.as_ref() {
                    span { class: "navbar-member", "{member.display_name()}" }
                    SignOutButton { class: "btn btn-link" }
                }
            }
        }
    }
}
