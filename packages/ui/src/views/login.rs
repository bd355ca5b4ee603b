use dioxus::prelude::*;
use store::SessionMember;

use crate::auth::{use_auth, LoginForm};

/// Sign-in page. Calls `on_signed_in` once a member is in the session.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let auth = use_auth();

    use_effect(move || {
        let state = auth();
        if !state.loading && state.member.is_some() {
            on_signed_in.call(());
        }
    });

    rsx! {
        div {
            class: "login-container",
            h1 { "Shelfmark" }
            p { class: "login-subtitle", "Sign in to browse and borrow books." }
            LoginForm {
                on_success: move |member: SessionMember| {
                    tracing::info!("Signed in as {}", member.email);
                },
            }
        }
    }
}
