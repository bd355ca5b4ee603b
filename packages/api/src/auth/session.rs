//! Session keys and the signed-in member lookup.

use store::MemberId;
use tower_sessions::Session;

use crate::error::ServerError;

/// Key for storing the member id in the session.
pub const SESSION_MEMBER_ID_KEY: &str = "member_id";

/// The member id stored in the session, if any.
pub async fn session_member_id(session: &Session) -> Result<Option<MemberId>, ServerError> {
    Ok(session.get::<MemberId>(SESSION_MEMBER_ID_KEY).await?)
}

/// The member id stored in the session, or [`ServerError::Unauthenticated`].
pub async fn require_member(session: &Session) -> Result<MemberId, ServerError> {
    session_member_id(session)
        .await?
        .ok_or(ServerError::Unauthenticated)
}
