use dioxus::prelude::*;

#[component]
pub fn Pagination(current_page: u32, total_pages: u32, on_select: EventHandler<u32>) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }

    rsx! {
        nav {
            class: "pagination",
            button {
                class: "btn",
                disabled: current_page <= 1,
                onclick: move |_| on_select.call(current_page.saturating_sub(1).max(1)),
                "Previous"
            }
            for page in 1..=total_pages {
                button {
                    key: "{page}",
                    class: if page == current_page { "btn page active" } else { "btn page" },
                    onclick: move |_| on_select.call(page),
                    "{page}"
                }
            }
            button {
                class: "btn",
                disabled: current_page >= total_pages,
                onclick: move |_| on_select.call(current_page + 1),
                "Next"
            }
        }
    }
}
