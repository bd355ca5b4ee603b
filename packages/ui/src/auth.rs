//! Session context and hooks for the UI.

use api::SessionMember;
use dioxus::prelude::*;

/// Session state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub member: Option<SessionMember>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            member: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// The session lookup finished with `member`.
    pub fn resolved(member: Option<SessionMember>) -> Self {
        Self {
            member,
            loading: false,
        }
    }
}

/// Get the current session state.
/// Returns a signal that updates when the member signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages session state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current member on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(member) => auth_state.set(AuthState::resolved(member)),
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                auth_state.set(AuthState::resolved(None));
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that signs the member out and returns to the login page.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::resolved(None));
                nav.replace("/login");
            }
            Err(e) => tracing::error!("Failed to sign out: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Email + password sign-in form.
#[component]
pub fn LoginForm(on_success: EventHandler<SessionMember>) -> Element {
    let mut auth_state = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        submitting.set(true);
        error.set(None);
        match api::login_password(email(), password()).await {
            Ok(member) => {
                auth_state.set(AuthState::resolved(Some(member.clone())));
                on_success.call(member);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
        submitting.set(false);
    };

    rsx! {
        form {
            class: "login-form",
            onsubmit: onsubmit,
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            button {
                r#type: "submit",
                class: "btn btn-primary",
                disabled: submitting(),
                if submitting() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lookup_settles_once() {
        assert!(AuthState::default().loading);

        let member = SessionMember {
            id: 1,
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: "member".to_string(),
        };
        let state = AuthState::resolved(Some(member.clone()));
        assert!(!state.loading);
        assert_eq!(state.member, Some(member));
        assert_eq!(AuthState::resolved(None).member, None);
    }
}
