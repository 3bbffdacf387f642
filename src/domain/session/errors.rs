//! Error and outcome types for session operations.
//!
//! Three propagation styles coexist, chosen per operation by criticality:
//! login/register/profile-update raise typed errors, the password-reset
//! actions return a [`ResetOutcome`] instead of raising, and the best-effort
//! fetches swallow failures entirely (see the store).

use thiserror::Error;

use crate::ports::TransportError;

/// Fallback message when a login failure carries no server detail.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Fallback message when a registration failure carries no server detail.
const REGISTRATION_FAILED: &str = "Registration failed";

/// Fallback message for the password-reset actions.
const RESET_FAILED: &str = "Reset failed.";

/// Authentication failure surfaced by `login`.
///
/// Carries a single human-readable message. Message precedence:
/// server-supplied `detail`, then the transport error's own message, then
/// `"Invalid credentials"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_transport(err: &TransportError) -> Self {
        Self::new(message_with_precedence(err, INVALID_CREDENTIALS))
    }
}

/// Registration failure surfaced by `register`.
///
/// Message precedence: server-supplied `detail`, then `"Registration failed"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RegistrationError {
    message: String,
}

impl RegistrationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_transport(err: &TransportError) -> Self {
        Self::new(err.detail().unwrap_or(REGISTRATION_FAILED))
    }
}

/// Profile-update failure surfaced by `update_profile`.
///
/// The message is fixed rather than server-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("Failed to update profile")]
pub struct ProfileUpdateError;

/// Structured outcome of the password-reset actions.
///
/// These actions never raise; callers branch on `success`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResetOutcome {
    pub success: bool,
    pub message: String,
}

impl ResetOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub(crate) fn from_transport(err: &TransportError) -> Self {
        Self::failed(err.error_text().unwrap_or(RESET_FAILED))
    }
}

fn message_with_precedence(err: &TransportError, fallback: &str) -> String {
    if let Some(detail) = err.detail() {
        return detail.to_string();
    }
    let own = err.to_string();
    if own.is_empty() {
        fallback.to_string()
    } else {
        own
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(body: serde_json::Value) -> TransportError {
        TransportError::Status { status: 400, body }
    }

    #[test]
    fn auth_error_prefers_server_detail() {
        let err = status_error(json!({"detail": "No active account found"}));
        assert_eq!(
            AuthError::from_transport(&err).message(),
            "No active account found"
        );
    }

    #[test]
    fn auth_error_falls_back_to_transport_message() {
        let err = TransportError::Network("connection refused".to_string());
        assert_eq!(
            AuthError::from_transport(&err).message(),
            "network error: connection refused"
        );
    }

    #[test]
    fn auth_error_displays_message() {
        let err = AuthError::new("Access token missing");
        assert_eq!(err.to_string(), "Access token missing");
    }

    #[test]
    fn registration_error_prefers_server_detail() {
        let err = status_error(json!({"detail": "Email already registered"}));
        assert_eq!(
            RegistrationError::from_transport(&err).message(),
            "Email already registered"
        );
    }

    #[test]
    fn registration_error_uses_fixed_fallback() {
        let err = status_error(json!({"unexpected": true}));
        assert_eq!(
            RegistrationError::from_transport(&err).message(),
            "Registration failed"
        );
    }

    #[test]
    fn profile_update_error_message_is_fixed() {
        assert_eq!(ProfileUpdateError.to_string(), "Failed to update profile");
    }

    #[test]
    fn reset_outcome_reads_error_key_not_detail() {
        let err = status_error(json!({"error": "User not found."}));
        let outcome = ResetOutcome::from_transport(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "User not found.");
    }

    #[test]
    fn reset_outcome_falls_back_for_bodyless_errors() {
        let err = TransportError::Network("timeout".to_string());
        let outcome = ResetOutcome::from_transport(&err);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Reset failed.");
    }
}
