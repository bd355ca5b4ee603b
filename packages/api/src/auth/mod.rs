//! Session lookup and password hashing for the local member accounts.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{require_member, session_member_id, SESSION_MEMBER_ID_KEY};
