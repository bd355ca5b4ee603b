//! Profile editor and password form.
//!
//! Both follow the same two-phase shape as the dashboard controllers: a
//! synchronous `begin_*` that validates and returns what to send, and a
//! synchronous `finish_*` that applies the server's answer.

use crate::gateway::LibraryGateway;
use crate::models::{ProfileUpdate, UserProfile};
use crate::notice::Notice;
use crate::result::{ActionResult, GatewayError};

/// Fields shown in the profile form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    Role,
}

impl ProfileField {
    /// Email and role are display-only.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::FirstName | Self::LastName | Self::PhoneNumber)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileEditor {
    profile: Option<UserProfile>,
    editing: bool,
    loading: bool,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Fetch the profile. The notice is set when the fetch failed.
    pub async fn load<G: LibraryGateway>(gateway: &G) -> (Self, Option<Notice>) {
        let mut editor = Self::new();
        let notice = editor.finish_load(gateway.get_profile_data().await);
        (editor, notice)
    }

    pub fn finish_load(
        &mut self,
        outcome: Result<ActionResult<UserProfile>, GatewayError>,
    ) -> Option<Notice> {
        self.loading = false;
        match outcome {
            Ok(ActionResult::Success { data }) => {
                self.profile = Some(data);
                None
            }
            Ok(ActionResult::Failure { error }) => Some(Notice::error(error)),
            Err(e) => {
                tracing::error!("Failed to fetch profile data: {}", e);
                Some(Notice::error("Failed to fetch profile data"))
            }
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Label of the single Edit/Save button.
    pub fn button_label(&self) -> &'static str {
        if self.editing {
            "Save"
        } else {
            "Edit"
        }
    }

    /// Update an in-memory field. Ignored outside edit mode and for read-only fields.
    pub fn set_field(&mut self, field: ProfileField, value: String) {
        if !self.editing || !field.is_editable() {
            return;
        }
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        match field {
            ProfileField::FirstName => profile.first_name = value,
            ProfileField::LastName => profile.last_name = value,
            ProfileField::PhoneNumber => profile.phone_number = value,
            ProfileField::Email | ProfileField::Role => {}
        }
    }

    /// Validate a save and return the fields to submit.
    pub fn begin_save(&mut self) -> Result<ProfileUpdate, Notice> {
        let Some(profile) = self.profile.as_ref() else {
            return Err(Notice::error("User data is not available"));
        };
        self.loading = true;
        Ok(profile.to_update())
    }

    pub fn finish_save(&mut self, outcome: Result<ActionResult<String>, GatewayError>) -> Notice {
        self.loading = false;
        match outcome {
            Ok(ActionResult::Success { data }) => {
                self.editing = false;
                Notice::success(data)
            }
            Ok(ActionResult::Failure { error }) => Notice::error(error),
            Err(e) => {
                tracing::error!("Failed to update profile: {}", e);
                Notice::error("Failed to update profile. Please try again.")
            }
        }
    }
}

/// The change-password form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

/// Arguments of a change-password call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

impl PasswordForm {
    /// Validate the form. A mismatch never reaches the server.
    pub fn begin_submit(&self) -> Result<PasswordChange, Notice> {
        if self.new != self.confirm {
            return Err(Notice::error("New passwords do not match"));
        }
        Ok(PasswordChange {
            current: self.current.clone(),
            new: self.new.clone(),
        })
    }

    /// Apply the answer; the fields are cleared on success.
    pub fn finish_submit(&mut self, outcome: Result<ActionResult<String>, GatewayError>) -> Notice {
        match outcome {
            Ok(ActionResult::Success { data }) => {
                *self = Self::default();
                Notice::success(data)
            }
            Ok(ActionResult::Failure { error }) => Notice::error(error),
            Err(e) => {
                tracing::error!("Failed to change password: {}", e);
                Notice::error("Failed to change password. Please try again.")
            }
        }
    }
}
