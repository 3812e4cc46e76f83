//! Cloudflare Authentication
//!
//! Handles API token and legacy API key + email credentials.

use anyhow::Result;
use reqwest::RequestBuilder;
use std::fmt;

/// Request headers that carry secrets and must never be logged or recorded
pub const SENSITIVE_HEADERS: &[&str] = &["Authorization", "X-Auth-Key", "X-Auth-Email"];

/// Credentials used to authenticate API calls
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token, sent as a bearer token
    ApiToken(String),
    /// Global API key together with the account email
    ApiKey { email: String, key: String },
}

impl Credentials {
    pub fn api_token(token: &str) -> Self {
        Self::ApiToken(token.to_string())
    }

    pub fn api_key(email: &str, key: &str) -> Self {
        Self::ApiKey {
            email: email.to_string(),
            key: key.to_string(),
        }
    }

    /// Pick credentials from the resolved settings.
    ///
    /// A token wins over a key/email pair. A key without an email (or the
    /// reverse) is an error.
    pub fn resolve(token: Option<&str>, email: Option<&str>, key: Option<&str>) -> Result<Self> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            return Ok(Self::api_token(token));
        }

        let email = email.filter(|e| !e.is_empty());
        let key = key.filter(|k| !k.is_empty());
        match (email, key) {
            (Some(email), Some(key)) => Ok(Self::api_key(email, key)),
            (Some(_), None) => anyhow::bail!("an API key is required when an email is set"),
            (None, Some(_)) => anyhow::bail!("an email is required when an API key is set"),
            (None, None) => anyhow::bail!(
                "no credentials found. Set CLOUDFLARE_API_TOKEN or use --token \
                 (or --email and --key)"
            ),
        }
    }

    /// Attach authentication headers to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::ApiToken(token) => request.bearer_auth(token),
            Self::ApiKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        }
    }

    /// Short description for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiToken(_) => "api token",
            Self::ApiKey { .. } => "api key",
        }
    }
}

// Security: never print secrets
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken(_) => f.write_str("ApiToken(***)"),
            Self::ApiKey { email, .. } => f
                .debug_struct("ApiKey")
                .field("email", email)
                .field("key", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_wins_over_key() {
        let creds = Credentials::resolve(Some("tok"), Some("a@b.c"), Some("key")).unwrap();
        assert_eq!(creds, Credentials::api_token("tok"));
    }

    #[test]
    fn test_key_and_email() {
        let creds = Credentials::resolve(Some(""), Some("a@b.c"), Some("key")).unwrap();
        assert_eq!(creds, Credentials::api_key("a@b.c", "key"));
        assert_eq!(creds.kind(), "api key");
    }

    #[test]
    fn test_incomplete_credentials_are_rejected() {
        assert!(Credentials::resolve(None, Some("a@b.c"), None).is_err());
        assert!(Credentials::resolve(None, None, Some("key")).is_err());
        assert!(Credentials::resolve(None, None, None).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = format!("{:?}", Credentials::api_token("secret-token"));
        assert!(!token.contains("secret-token"));

        let key = format!("{:?}", Credentials::api_key("a@b.c", "secret-key"));
        assert!(key.contains("a@b.c"));
        assert!(!key.contains("secret-key"));
    }
}
