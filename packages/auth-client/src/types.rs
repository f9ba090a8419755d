//! Request and response bodies for the auth API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Successful login response.
///
/// Persisting the token is the caller's job; the client hands the payload
/// over and keeps nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: StaffUser,
}

/// The authenticated staff member as the backend reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub branch_id: String,
}

/// Acknowledgement body returned by reset-password and verify-otp.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
