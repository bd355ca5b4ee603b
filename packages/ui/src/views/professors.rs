use dioxus::prelude::*;

/// Professors that can be booked with scheduling credits.
#[component]
pub fn ProfessorsView(on_schedule: EventHandler<i64>) -> Element {
    let mut professors = use_resource(|| async move { api::list_professors().await });

    rsx! {
        div {
            class: "professors",
            h1 { "Professors" }
            match professors.cloned() {
                None => rsx! {
                    p { class: "loading", "Loading professors..." }
                },
                Some(Err(e)) => rsx! {
                    div {
                        class: "load-error",
                        p { "Failed to load professors: {e}" }
                        button { class: "btn", onclick: move |_| professors.restart(), "Retry" }
                    }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "empty", "No professors are available right now." }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "professor-grid",
                        for professor in list {
                            article {
                                key: "{professor.id}",
                                class: "professor-card",
                                h3 { "{professor.name}" }
                                span { class: "department", "{professor.department}" }
                                p { "{professor.bio}" }
                                div {
                                    class: "book-card-footer",
                                    span { class: "credits", "{professor.credits} credits" }
                                    button {
                                        class: "btn btn-primary",
                                        onclick: move |_| on_schedule.call(professor.id),
                                        "Schedule"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
