use dioxus::prelude::*;
use ui::views::LoginView;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Dashboard { page: 1, genre: String::new(), q: String::new() });
            },
        }
    }
}
