use api::ServerGateway;
use dioxus::prelude::*;
use store::{LibraryGateway, PasswordForm, ProfileEditor, ProfileField};

use crate::auth::SignOutButton;
use crate::notifications::{notify, use_notifications};

/// Profile page: details form, favorites and password change.
#[component]
pub fn ProfileView() -> Element {
    let mut tray = use_notifications();
    let mut editor = use_signal(ProfileEditor::new);
    let mut password = use_signal(PasswordForm::default);
    let mut password_busy = use_signal(|| false);

    use_hook(|| {
        spawn(async move {
            let (loaded, notice) = ProfileEditor::load(&ServerGateway).await;
            editor.set(loaded);
            if let Some(notice) = notice {
                notify(&mut tray, notice);
            }
        })
    });

    let toggle_edit = move |_| {
        if !editor.read().is_editing() {
            editor.write().start_editing();
            return;
        }
        let update = editor.write().begin_save();
        match update {
            Err(notice) => notify(&mut tray, notice),
            Ok(update) => {
                spawn(async move {
                    let outcome = ServerGateway.update_user_profile(update).await;
                    let notice = editor.write().finish_save(outcome);
                    notify(&mut tray, notice);
                });
            }
        }
    };

    let submit_password = move |evt: FormEvent| {
        evt.prevent_default();
        let change = password.read().begin_submit();
        match change {
            Err(notice) => notify(&mut tray, notice),
            Ok(change) => {
                password_busy.set(true);
                spawn(async move {
                    let outcome = ServerGateway.change_password(change.current, change.new).await;
                    let notice = password.write().finish_submit(outcome);
                    notify(&mut tray, notice);
                    password_busy.set(false);
                });
            }
        }
    };

    let snapshot = editor.read().clone();
    let editing = snapshot.is_editing();

    let Some(profile) = snapshot.profile().cloned() else {
        return rsx! {
            div {
                class: "profile",
                if snapshot.is_loading() {
                    p { class: "loading", "Loading profile..." }
                } else {
                    p { class: "load-error", "Profile unavailable." }
                }
            }
        };
    };

    let form = password.read().clone();

    rsx! {
        div {
            class: "profile",
            section {
                class: "profile-card",
                div {
                    class: "profile-header",
                    div { class: "avatar", "{profile.initials()}" }
                    div {
                        h1 { "{profile.full_name()}" }
                        span { class: "role-badge", "{profile.role}" }
                        span { class: "credits", "{profile.credits} credits" }
                    }
                }

                ProfileInput {
                    label: "First name",
                    field: ProfileField::FirstName,
                    value: profile.first_name.clone(),
                    editing,
                    on_input: move |(field, value)| editor.write().set_field(field, value),
                }
                ProfileInput {
                    label: "Last name",
                    field: ProfileField::LastName,
                    value: profile.last_name.clone(),
                    editing,
                    on_input: move |(field, value)| editor.write().set_field(field, value),
                }
                ProfileInput {
                    label: "Phone number",
                    field: ProfileField::PhoneNumber,
                    value: profile.phone_number.clone(),
                    editing,
                    on_input: move |(field, value)| editor.write().set_field(field, value),
                }
                ProfileInput {
                    label: "Email",
                    field: ProfileField::Email,
                    value: profile.email.clone(),
                    editing,
                    on_input: move |_| {},
                }
                ProfileInput {
                    label: "Role",
                    field: ProfileField::Role,
                    value: profile.role.clone(),
                    editing,
                    on_input: move |_| {},
                }

                div {
                    class: "dialog-actions",
                    button {
                        class: "btn btn-primary",
                        disabled: snapshot.is_loading(),
                        onclick: toggle_edit,
                        "{snapshot.button_label()}"
                    }
                    SignOutButton { class: "btn" }
                }
            }

            section {
                class: "profile-favorites",
                h2 { "Favorite books" }
                if profile.favorites.is_empty() {
                    p { class: "empty", "No favorites yet." }
                }
                ul {
                    for book in profile.favorites.iter() {
                        li {
                            key: "{book.id}",
                            strong { "{book.title}" }
                            " by {book.author}"
                        }
                    }
                }
            }

            section {
                class: "password-card",
                h2 { "Change password" }
                form {
                    onsubmit: submit_password,
                    label { r#for: "current-password", "Current password" }
                    input {
                        id: "current-password",
                        r#type: "password",
                        value: "{form.current}",
                        oninput: move |evt: FormEvent| password.write().current = evt.value(),
                    }
                    label { r#for: "new-password", "New password" }
                    input {
                        id: "new-password",
                        r#type: "password",
                        value: "{form.new}",
                        oninput: move |evt: FormEvent| password.write().new = evt.value(),
                    }
                    label { r#for: "confirm-password", "Confirm new password" }
                    input {
                        id: "confirm-password",
                        r#type: "password",
                        value: "{form.confirm}",
                        oninput: move |evt: FormEvent| password.write().confirm = evt.value(),
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: password_busy(),
                        "Change password"
                    }
                }
            }
        }
    }
}

#[component]
fn ProfileInput(
    label: &'static str,
    field: ProfileField,
    value: String,
    editing: bool,
    on_input: EventHandler<(ProfileField, String)>,
) -> Element {
    let read_only = !editing || !field.is_editable();

    rsx! {
        div {
            class: "profile-field",
            label { "{label}" }
            input {
                value: "{value}",
                readonly: read_only,
                disabled: !field.is_editable(),
                oninput: move |evt: FormEvent| on_input.call((field, evt.value())),
            }
        }
    }
}
