use dioxus::prelude::*;
use ui::views::{ProfessorsView, ScheduleView};

use crate::Route;

#[component]
pub fn Professors() -> Element {
    let nav = use_navigator();

    rsx! {
        ProfessorsView {
            on_schedule: move |id: i64| {
                nav.push(Route::Schedule { id });
            },
        }
    }
}

#[component]
pub fn Schedule(id: i64) -> Element {
    rsx! {
        ScheduleView { professor_id: id }
    }
}
