//! Tagged results returned by the remote action surface.
//!
//! Remote actions fail in two distinct ways. A *structured failure* is an answer
//! from the server ("Book is not available") and travels inside the response as
//! [`ActionResult::Failure`] or an unsuccessful [`BorrowReceipt`]. A *transport
//! failure* means no answer arrived at all and surfaces as [`GatewayError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a remote action that may be refused by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into a std `Result`, the error being the server's message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

/// Answer to a borrow request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowReceipt {
    pub success: bool,
    pub message: String,
}

impl BorrowReceipt {
    pub fn borrowed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// The remote call did not produce an answer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn transport(message: impl std::fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_result_into_result() {
        assert_eq!(ActionResult::success(3).into_result(), Ok(3));
        assert_eq!(
            ActionResult::<()>::failure("nope").into_result(),
            Err("nope".to_string())
        );
    }

    #[test]
    fn test_gateway_error_carries_transport_message() {
        let err = GatewayError::transport("connection reset");
        assert_eq!(err, GatewayError::Transport("connection reset".into()));
        assert_eq!(err.to_string(), "transport error: connection reset");
    }

    #[test]
    fn test_action_result_is_tagged_on_the_wire() {
        let text = toml::to_string(&ActionResult::<String>::failure("Invalid phone")).unwrap();
        assert!(text.contains("status = \"failure\""));
        assert!(text.contains("error = \"Invalid phone\""));
    }
}
