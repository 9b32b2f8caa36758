use thiserror::Error;

/// Errors surfaced by the session orchestrator.
///
/// `Signup` and `Login` display the bare message: callers see exactly
/// the backend's error string (or the fixed fallback), nothing wrapped
/// around it.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{message}")]
    Signup { message: String },

    #[error("{message}")]
    Login { message: String },

    #[error("Session storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AuthError {
    pub fn signup(message: impl Into<String>) -> Self {
        Self::Signup {
            message: message.into(),
        }
    }

    pub fn login(message: impl Into<String>) -> Self {
        Self::Login {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let error = AuthError::login("bad credentials");
        assert_eq!(error.to_string(), "bad credentials");

        let error = AuthError::signup("Email already exists");
        assert_eq!(error.to_string(), "Email already exists");
    }
}
