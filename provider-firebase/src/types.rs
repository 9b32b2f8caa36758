//! Firebase Auth REST API wire types
//!
//! Request and response bodies for the Identity Toolkit endpoints
//! consumed by [`FirebaseAuthClient`](crate::FirebaseAuthClient).
//!
//! See: https://firebase.google.com/docs/reference/rest/auth

use serde::{Deserialize, Serialize};

/// Body for `accounts:signUp` and `accounts:signInWithPassword`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
    /// Always `true`: an ID token is required for the backend bridge.
    pub return_secure_token: bool,
}

impl PasswordCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            return_secure_token: true,
        }
    }
}

/// Body for `accounts:delete`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    pub id_token: String,
}

/// Successful response from `accounts:signUp` / `accounts:signInWithPassword`
///
/// `expiresIn` arrives as a decimal string per the API contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: String,
    #[serde(default)]
    pub email: Option<String>,
}

fn default_expires_in() -> String {
    "3600".to_string()
}

impl AuthTokenResponse {
    /// Token lifetime in seconds, defaulting to one hour when the field
    /// is absent or malformed.
    pub fn expires_in_seconds(&self) -> i64 {
        self.expires_in.parse().unwrap_or(3600)
    }
}

/// Error envelope returned by the Identity Toolkit API
#[derive(Debug, Deserialize)]
pub struct FirebaseErrorBody {
    pub error: FirebaseErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct FirebaseErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_serialization() {
        let body = PasswordCredentials::new("user@example.com", "secret");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["password"], "secret");
        assert_eq!(json["returnSecureToken"], true);
    }

    #[test]
    fn test_delete_request_serialization() {
        let body = DeleteAccountRequest {
            id_token: "tok".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["idToken"], "tok");
    }

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "idToken": "eyJh...",
            "refreshToken": "AE0u...",
            "localId": "abc123",
            "expiresIn": "3600",
            "email": "user@example.com"
        }"#;

        let response: AuthTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id_token, "eyJh...");
        assert_eq!(response.local_id, "abc123");
        assert_eq!(response.expires_in_seconds(), 3600);
        assert_eq!(response.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_token_response_defaults_expiry() {
        let json = r#"{
            "idToken": "tok",
            "refreshToken": "ref",
            "localId": "id"
        }"#;

        let response: AuthTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.expires_in_seconds(), 3600);
    }

    #[test]
    fn test_error_body_deserialization() {
        let json = r#"{"error": {"code": 400, "message": "EMAIL_EXISTS"}}"#;

        let body: FirebaseErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.message, "EMAIL_EXISTS");
        assert_eq!(body.error.code, Some(400));
    }
}
