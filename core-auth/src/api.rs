//! Backend Auth API Client
//!
//! Typed client for the application backend's auth endpoints. The
//! backend verifies provider-issued tokens and owns user profiles; this
//! client only shapes requests, checks statuses, and decodes envelopes.

use crate::types::{SessionToken, UserProfile};
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use core_runtime::config::ApiConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Backend API errors.
///
/// `Status` means the backend answered with a non-2xx status and is the
/// only variant that carries a backend-authored message; the others are
/// transport and decoding failures on this side of the wire.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend returned status {status}")]
    Status {
        status: u16,
        /// Message from the response's `error` field, when present
        message: Option<String>,
    },

    #[error(transparent)]
    Http(#[from] BridgeError),

    #[error("Failed to parse backend response: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    email: &'a str,
    id_token: &'a str,
}

/// Success envelope of `/signup` and `/login`
#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// Error body shape used by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Typed client over the backend auth REST endpoints.
#[derive(Clone)]
pub struct AuthApiClient {
    http_client: Arc<dyn HttpClient>,
    config: ApiConfig,
}

impl AuthApiClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Reject non-2xx responses, extracting the backend's `error`
    /// message when the body carries one.
    fn check(response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.error);

        Err(ApiError::Status {
            status: response.status,
            message,
        })
    }

    /// `POST /signup` - create the backend user profile.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        debug!("Calling backend signup");
        let request = HttpRequest::new(HttpMethod::Post, self.endpoint("signup")).json(
            &SignupBody {
                name,
                email,
                password,
            },
        )?;

        let response = Self::check(self.http_client.execute(request).await?)?;
        let envelope: UserEnvelope = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.user)
    }

    /// `POST /login` - verify the provider token and fetch the profile.
    pub async fn login(&self, email: &str, token: &SessionToken) -> Result<UserProfile, ApiError> {
        debug!("Calling backend login");
        let request = HttpRequest::new(HttpMethod::Post, self.endpoint("login")).json(
            &LoginBody {
                email,
                id_token: token.as_str(),
            },
        )?;

        let response = Self::check(self.http_client.execute(request).await?)?;
        let envelope: UserEnvelope = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.user)
    }

    /// `GET /me` - fetch the profile for a bearer token.
    pub async fn me(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        debug!("Calling backend me");
        let request =
            HttpRequest::new(HttpMethod::Get, self.endpoint("me")).bearer_token(token.as_str());

        let response = Self::check(self.http_client.execute(request).await?)?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }
}
