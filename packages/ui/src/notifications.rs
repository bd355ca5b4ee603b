use dioxus::prelude::*;
use store::{ClientSettings, Notice, NoticeLevel, NoticeTray};

use crate::settings::use_client_settings;

pub fn use_notifications() -> Signal<NoticeTray> {
    use_context::<Signal<NoticeTray>>()
}

/// Show a notice and mirror it to the log.
pub fn notify(tray: &mut Signal<NoticeTray>, notice: Notice) {
    match notice.level {
        NoticeLevel::Error => tracing::warn!("{}: {}", notice.title, notice.description),
        _ => tracing::debug!("{}: {}", notice.title, notice.description),
    }
    tray.write().push(notice);
}

/// Provides the notice tray and renders it above the page. Must sit inside
/// [`SettingsProvider`](crate::SettingsProvider).
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let settings = use_client_settings();
    let mut tray = use_signal(|| NoticeTray::new(ClientSettings::default().max_visible_notices));
    use_context_provider(|| tray);

    use_effect(move || {
        let capacity = settings.read().max_visible_notices;
        tray.write().set_capacity(capacity);
    });

    rsx! {
        {children}
        NotificationTray {}
    }
}

#[component]
pub fn NotificationTray() -> Element {
    let mut tray = use_notifications();

    if tray.read().is_empty() {
        return rsx! {};
    }

    let entries: Vec<(u64, Notice)> = tray
        .read()
        .iter()
        .map(|(id, notice)| (id, notice.clone()))
        .collect();

    rsx! {
        div {
            class: "notification-tray",
            for (id, notice) in entries.into_iter().rev() {
                div {
                    key: "{id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notification error",
                        NoticeLevel::Success => "notification success",
                        NoticeLevel::Info => "notification info",
                    },
                    div {
                        class: "notification-body",
                        strong { "{notice.title}" }
                        span { "{notice.description}" }
                    }
                    button {
                        class: "notification-close",
                        title: "Dismiss",
                        onclick: move |_| tray.write().dismiss(id),
                        "×"
                    }
                }
            }
        }
    }
}
