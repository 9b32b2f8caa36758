//! Error types for the Firebase identity provider

use thiserror::Error;

/// Firebase provider errors
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Provider configuration is missing or invalid
    #[error("Firebase configuration error: {0}")]
    Config(String),

    /// The auth API rejected the request
    #[error("{message}")]
    ApiError { status_code: u16, message: String },

    /// No session is currently open
    #[error("No active session")]
    NotSignedIn,

    /// Failed to parse an API response
    #[error("Failed to parse Firebase response: {0}")]
    ParseError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result type for Firebase provider operations
pub type Result<T> = std::result::Result<T, FirebaseError>;

impl From<FirebaseError> for bridge_traits::error::BridgeError {
    fn from(error: FirebaseError) -> Self {
        match error {
            FirebaseError::NotSignedIn => {
                bridge_traits::error::BridgeError::NotAvailable(error.to_string())
            }
            other => bridge_traits::error::BridgeError::OperationFailed(other.to_string()),
        }
    }
}

/// Translate a Firebase error code into a human-readable message.
///
/// Codes sometimes arrive with a detail suffix
/// (`"WEAK_PASSWORD : Password should be at least 6 characters"`);
/// only the leading token is matched. Unknown codes pass through
/// unchanged.
pub(crate) fn describe_error_code(code: &str) -> String {
    let token = code.split([' ', ':']).next().unwrap_or(code);
    match token {
        "EMAIL_EXISTS" => "Email already exists".to_string(),
        "EMAIL_NOT_FOUND" => "Email not found".to_string(),
        "INVALID_PASSWORD" => "Invalid password".to_string(),
        "INVALID_LOGIN_CREDENTIALS" => "Invalid login credentials".to_string(),
        "INVALID_EMAIL" => "Invalid email address".to_string(),
        "USER_DISABLED" => "User account is disabled".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, try again later".to_string(),
        _ => code.to_string(),
    }
}
