//! Server-provided client settings.

use dioxus::prelude::*;
use store::ClientSettings;

pub fn use_client_settings() -> Signal<ClientSettings> {
    use_context::<Signal<ClientSettings>>()
}

/// Fetches [`ClientSettings`] once. Children see the defaults until the answer arrives.
#[component]
pub fn SettingsProvider(children: Element) -> Element {
    let mut settings = use_signal(ClientSettings::default);

    let _ = use_resource(move || async move {
        match api::get_client_settings().await {
            Ok(fetched) => settings.set(fetched),
            Err(e) => tracing::warn!("Using default client settings: {}", e),
        }
    });

    use_context_provider(|| settings);

    rsx! {
        {children}
    }
}
