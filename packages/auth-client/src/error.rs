//! Error types and transport-failure classification for the auth client.

use thiserror::Error;

/// Result type for auth client operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Advisory shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to reach the server. Please check your internet connection and try again.";

/// Advisory shown when the request is dropped before reaching the backend
/// (browser cross-origin rejection and kin).
pub const BLOCKED_MESSAGE: &str =
    "The connection was blocked before reaching the server. Please try again; if this keeps happening, contact support.";

/// Fallback when a transport error carries no message of its own.
pub const GENERIC_TRANSPORT_MESSAGE: &str =
    "Something went wrong while contacting the server. Please try again.";

/// Auth client errors.
///
/// `Display` renders exactly the message the UI layer shows inline; status
/// codes and underlying causes stay in the logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The network could not be reached (offline, DNS, connection refused).
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    /// The request was rejected before the backend saw it.
    #[error("{}", BLOCKED_MESSAGE)]
    Blocked,

    /// Any other transport-level failure, message passed through.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("{0}")]
    Parse(String),
}

/// Innermost source message of a transport error.
///
/// reqwest wraps the underlying failure several levels deep; on the browser
/// runtime the innermost source is the one carrying the fetch layer's text
/// ("Failed to fetch" et al.).
fn innermost_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message = inner.to_string();
        source = inner.source();
    }
    message
}

/// Map a login transport failure onto the user-facing categories.
///
/// Structured signals win where reqwest exposes them; the string heuristics
/// below cover runtimes that surface only a message.
pub(crate) fn classify_login_error(err: &reqwest::Error) -> AuthError {
    // is_connect() does not exist on the wasm backend; the browser runtime
    // goes through the message heuristics instead.
    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return AuthError::Unreachable;
    }
    classify_login_message(&innermost_message(err))
}

pub(crate) fn classify_login_message(message: &str) -> AuthError {
    if message == "Failed to fetch" {
        AuthError::Unreachable
    } else if message.contains("NetworkError") || message.contains("Network request failed") {
        AuthError::Blocked
    } else {
        AuthError::Transport(message_or_fallback(message))
    }
}

/// Passthrough policy used by reset-password and verify-otp.
pub(crate) fn transport_error(err: &reqwest::Error) -> AuthError {
    AuthError::Transport(message_or_fallback(&innermost_message(err)))
}

fn message_or_fallback(message: &str) -> String {
    if message.trim().is_empty() {
        GENERIC_TRANSPORT_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_to_fetch_is_unreachable() {
        let err = classify_login_message("Failed to fetch");
        assert!(matches!(err, AuthError::Unreachable));
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }

    #[test]
    fn network_error_is_blocked() {
        let err = classify_login_message("NetworkError when attempting to fetch resource.");
        assert!(matches!(err, AuthError::Blocked));
        assert_eq!(err.to_string(), BLOCKED_MESSAGE);
    }

    #[test]
    fn network_request_failed_is_blocked() {
        assert!(matches!(
            classify_login_message("Network request failed"),
            AuthError::Blocked
        ));
    }

    #[test]
    fn blocked_and_unreachable_render_distinct_messages() {
        assert_ne!(UNREACHABLE_MESSAGE, BLOCKED_MESSAGE);
    }

    #[test]
    fn other_messages_pass_through_verbatim() {
        let err = classify_login_message("tls handshake eof");
        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(err.to_string(), "tls handshake eof");
    }

    #[test]
    fn substring_match_only_applies_after_exact_check() {
        // "Failed to fetch" embedded in a longer message is not the exact
        // fetch-layer failure and must not map to the unreachable advisory.
        let err = classify_login_message("upstream said: Failed to fetch something");
        assert!(matches!(err, AuthError::Transport(_)));
    }

    #[test]
    fn empty_message_falls_back_to_generic_text() {
        let err = classify_login_message("");
        assert_eq!(err.to_string(), GENERIC_TRANSPORT_MESSAGE);
    }

    #[test]
    fn api_error_displays_only_the_derived_message() {
        let err = AuthError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
