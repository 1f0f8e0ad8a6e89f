//! Credential exchange against the backend's `/login` endpoint.

use std::fmt;

use reqwest::Client;
use shared::{
    error::BackendErrorBody,
    protocol::{LoginForm, TokenResponse, LOGIN_PATH},
};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::error::AuthError;

/// Username/password pair. Wiped from memory when dropped.
pub struct Credential {
    username: String,
    password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn validate(&self) -> Result<(), AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::EmptyField("username"));
        }
        if self.password.is_empty() {
            return Err(AuthError::EmptyField("password"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.username.zeroize();
        self.password.zeroize();
    }
}

/// Opaque bearer token for a single authorized request.
///
/// Not `Clone`: turning it into a header value consumes it.
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn into_bearer_header(self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl TryFrom<TokenResponse> for SessionToken {
    type Error = AuthError;

    fn try_from(mut value: TokenResponse) -> Result<Self, Self::Error> {
        if !value.token_type.eq_ignore_ascii_case("bearer") {
            let token_type = std::mem::take(&mut value.token_type);
            value.access_token.zeroize();
            return Err(AuthError::Malformed(format!(
                "unsupported token_type {token_type:?}"
            )));
        }
        if value.access_token.is_empty() {
            return Err(AuthError::Malformed("empty access_token".to_string()));
        }
        Ok(Self(value.access_token))
    }
}

#[derive(Clone)]
pub struct SessionClient {
    http: Client,
    base_url: String,
}

impl SessionClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Exchanges `credential` for a token. One request, no retry.
    pub async fn login(&self, credential: &Credential) -> Result<SessionToken, AuthError> {
        credential.validate()?;

        let res = self
            .http
            .post(format!("{}{LOGIN_PATH}", self.base_url))
            .form(&LoginForm {
                username: &credential.username,
                password: &credential.password,
            })
            .send()
            .await
            .map_err(AuthError::Transport)?;
        let status = res.status();
        let mut raw = res.text().await.map_err(AuthError::Transport)?;

        if !status.is_success() {
            let detail = BackendErrorBody::parse(&raw).map(|body| body.message());
            warn!(%status, username = credential.username(), "login rejected");
            return Err(AuthError::Rejected { status, detail });
        }

        let parsed = serde_json::from_str::<TokenResponse>(&raw)
            .map_err(|err| AuthError::Malformed(err.to_string()));
        raw.zeroize();
        let token = SessionToken::try_from(parsed?)?;
        debug!(username = credential.username(), "login succeeded");
        Ok(token)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
