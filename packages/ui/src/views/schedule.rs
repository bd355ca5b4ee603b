//! Meeting booking through the embedded scheduling widget.

use api::ServerGateway;
use dioxus::prelude::*;
use store::{widget_url, Professor, SchedulingCredits};

use crate::auth::use_auth;
use crate::notifications::{notify, use_notifications};
use crate::settings::use_client_settings;

/// Message the widget posts to the parent window after a booking.
const EVENT_SCHEDULED: &str = "calendly.event_scheduled";

#[component]
pub fn ScheduleView(professor_id: i64) -> Element {
    let professor = use_resource(use_reactive!(|professor_id| async move {
        api::get_professor(professor_id).await
    }));

    rsx! {
        div {
            class: "schedule",
            match professor.cloned() {
                None => rsx! {
                    p { class: "loading", "Loading..." }
                },
                Some(Err(e)) => rsx! {
                    p { class: "load-error", "Failed to load professor: {e}" }
                },
                Some(Ok(None)) => rsx! {
                    p { class: "empty", "Professor not found." }
                },
                Some(Ok(Some(professor))) => rsx! {
                    SchedulingWidget { professor }
                },
            }
        }
    }
}

#[component]
fn SchedulingWidget(professor: Professor) -> Element {
    let auth = use_auth();
    let settings = use_client_settings();
    let mut tray = use_notifications();
    let nav = use_navigator();

    // The widget only posts events to the domain it was told it is embedded on.
    let embed_domain = use_resource(|| async move {
        let mut eval = document::eval("dioxus.send(window.location.host);");
        match eval.recv::<String>().await {
            Ok(host) => host,
            Err(e) => {
                tracing::warn!("Could not read the page host: {:?}", e);
                "localhost".to_string()
            }
        }
    });

    // Deduct the meeting cost each time the widget reports a booking.
    let listened = professor.clone();
    use_hook(move || {
        spawn(async move {
            let js = format!(
                r#"window.addEventListener('message', function(e) {{
                    if (e.data && e.data.event === '{EVENT_SCHEDULED}') {{
                        dioxus.send(true);
                    }}
                }});"#
            );
            let mut eval = document::eval(&js);
            while let Ok(true) = eval.recv::<bool>().await {
                let Some(member_id) = auth.peek().member.as_ref().map(|m| m.id) else {
                    tracing::warn!("Meeting scheduled without a signed-in member");
                    continue;
                };
                let professors_path = settings.peek().professors_path.clone();
                let credits = SchedulingCredits::new(member_id, professors_path);
                let settlement = credits.on_event_scheduled(&ServerGateway, &listened).await;
                notify(&mut tray, settlement.notice);
                if let Some(path) = settlement.redirect {
                    nav.push(path.as_str());
                }
            }
        })
    });

    rsx! {
        div {
            class: "schedule-header",
            h1 { "Schedule with {professor.name}" }
            p { "{professor.department} · {professor.credits} credits per meeting" }
        }
        if let Some(link) = professor.calendly_link.as_ref() {
            if let Some(domain) = embed_domain.cloned() {
                iframe {
                    class: "scheduling-widget",
                    src: widget_url(link, &domain, auth.read().member.as_ref()).unwrap_or_else(|e| {
                        tracing::warn!("Invalid booking link {}: {}", link, e);
                        link.clone()
                    }),
                    title: "Scheduling",
                }
            } else {
                p { class: "loading", "Loading..." }
            }
        } else {
            p { class: "empty", "This professor has no booking page yet." }
        }
    }
}
