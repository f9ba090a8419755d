//! Typed client for the Tabside ordering backend's auth API.
//!
//! A thin client for the three auth endpoints: login, password-reset request,
//! and OTP verification. Every operation returns a [`Result`] whose error
//! renders the exact message the UI shows inline; nothing is thrown across
//! the crate boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_client::ApiClient;
//!
//! let client = ApiClient::new();
//!
//! match client.login("staff@tabside.example", "secret").await {
//!     Ok(payload) => println!("signed in as {}", payload.user.name),
//!     Err(err) => println!("{err}"),
//! }
//! ```

pub mod context;
pub mod error;
pub mod types;

pub use context::RequestContext;
pub use error::{AuthError, Result};
pub use types::{LoginPayload, MessageResponse, StaffUser};

use reqwest::header;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::types::{LoginRequest, ResetPasswordRequest, VerifyOtpRequest};

/// Address used when neither [`init_base_url`] nor `TABSIDE_API_URL` is set.
pub const DEFAULT_BASE_URL: &str = "https://api.tabside.example";

static BASE_URL: OnceLock<String> = OnceLock::new();

/// Set the API base URL explicitly. Call this once at startup, before the
/// first client is created; later calls lose to whichever value resolved
/// first.
pub fn init_base_url(url: String) {
    BASE_URL.set(url).ok();
}

/// The process-wide API base URL.
///
/// Resolution order: [`init_base_url`], then `TABSIDE_API_URL`, then
/// [`DEFAULT_BASE_URL`].
pub fn base_url() -> &'static str {
    BASE_URL.get_or_init(|| {
        std::env::var("TABSIDE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    })
}

/// Client for the auth endpoints.
///
/// Stateless between calls: holds only the shared HTTP client and the base
/// URL. Cloning is cheap and clones may issue requests concurrently.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the process-wide base URL.
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url().to_string(),
        }
    }

    /// Override the base URL for this instance (tests, staging).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL this instance talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in with email and password.
    ///
    /// Transport failures are classified into user-facing categories: an
    /// unreachable network and a blocked (cross-origin) connection each get
    /// a fixed advisory, anything else surfaces its own message.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.send("/login", &body).await.map_err(|e| {
            warn!(error = %e, "login request failed");
            error::classify_login_error(&e)
        })?;
        handle_response(response).await
    }

    /// Request a password-reset email.
    pub async fn reset_password(&self, email: &str) -> Result<MessageResponse> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
        };
        let response = self.send("/reset-password", &body).await.map_err(|e| {
            warn!(error = %e, "reset-password request failed");
            error::transport_error(&e)
        })?;
        handle_response(response).await
    }

    /// Verify the one-time code sent by the reset flow.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<MessageResponse> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        let response = self.send("/verify-otp", &body).await.map_err(|e| {
            warn!(error = %e, "verify-otp request failed");
            error::transport_error(&e)
        })?;
        handle_response(response).await
    }

    async fn send<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let context = RequestContext::resolve();
        debug!(%url, browser = context.is_browser(), "issuing auth request");

        context
            .apply(self.http_client.post(&url))
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize an HTTP response into the operation's payload.
///
/// The body is structured only when the `Content-Type` header says so; error
/// messages prefer the backend's own `message` field over the synthesized
/// status line.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Parse(e.to_string()))?;

    if !status.is_success() {
        let message = derive_error_message(status.as_u16(), is_json, &body);
        warn!(status = status.as_u16(), %message, "auth API returned an error");
        return Err(AuthError::Api {
            status: status.as_u16(),
            message,
        });
    }

    if !is_json {
        return Err(AuthError::Parse(format!(
            "expected a JSON response, got content type of a different kind (status {})",
            status.as_u16()
        )));
    }
    serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))
}

/// Error message for a non-2xx response: the payload's `message` field when
/// the body is JSON and carries one, else the synthesized status line.
fn derive_error_message(status: u16, is_json: bool, body: &str) -> String {
    let from_payload = is_json
        .then(|| serde_json::from_str::<serde_json::Value>(body).ok())
        .flatten()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(|message| message.as_str())
        .map(str::to_string);

    from_payload.unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builder_overrides_base_url() {
        let client = ApiClient::new().with_base_url("http://127.0.0.1:9999");
        assert_eq!(client.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn error_message_prefers_the_payload_field() {
        let message = derive_error_message(401, true, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(message, "Invalid credentials");
    }

    #[test]
    fn json_without_message_field_falls_back_to_status_line() {
        let message = derive_error_message(500, true, r#"{"error":"boom"}"#);
        assert_eq!(message, "HTTP error! status: 500");
    }

    #[test]
    fn non_json_body_falls_back_to_status_line() {
        // The same body text is ignored when the content type was not JSON,
        // even if it happens to look like JSON.
        let message = derive_error_message(400, false, r#"{"message":"nope"}"#);
        assert_eq!(message, "HTTP error! status: 400");
    }

    #[test]
    fn unparseable_json_body_falls_back_to_status_line() {
        let message = derive_error_message(502, true, "<html>Bad Gateway</html>");
        assert_eq!(message, "HTTP error! status: 502");
    }
}
