//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LoginForm, SignOutButton};

mod settings;
pub use settings::{use_client_settings, SettingsProvider};

pub mod notifications;
pub use notifications::{notify, use_notifications, NotificationProvider, NotificationTray};
