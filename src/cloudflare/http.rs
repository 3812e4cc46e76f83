//! HTTP utilities for Cloudflare v4 REST API calls

use super::auth::Credentials;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A `code: message` pair from the `errors` array of a response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Pagination details of a collection response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// The v4 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

fn describe_errors(errors: &[ApiMessage]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// HTTP client wrapper for Cloudflare API calls
#[derive(Clone)]
pub struct CloudflareHttpClient {
    client: Client,
}

impl CloudflareHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cf-terraforming/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request and decode the response envelope
    pub async fn get(&self, url: &str, credentials: &Credentials) -> Result<ApiResponse> {
        tracing::debug!("GET {}", url);

        let request = credentials.apply(self.client.get(url));
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        let envelope: Option<ApiResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return match envelope {
                Some(env) if !env.errors.is_empty() => Err(anyhow::anyhow!(
                    "API request failed: {} ({})",
                    status,
                    describe_errors(&env.errors)
                )),
                _ => Err(anyhow::anyhow!("API request failed: {}", status)),
            };
        }

        let envelope = envelope.context("Failed to parse response JSON")?;
        if !envelope.success {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            anyhow::bail!(
                "API request unsuccessful ({})",
                describe_errors(&envelope.errors)
            );
        }

        Ok(envelope)
    }
}

/// Format a Cloudflare API error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = format!("{:#}", error);

    if error_str.contains("failed: 401") || error_str.contains("(10000:") {
        return "Authentication failed. Check your API token or API key and email.".to_string();
    }
    if error_str.contains("failed: 403") {
        return "Permission denied. Check the permissions of your API token.".to_string();
    }
    if error_str.contains("failed: 404") {
        return "Resource not found. Check the zone or account identifier.".to_string();
    }
    if error_str.contains("failed: 429") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if ["failed: 500", "failed: 502", "failed: 503"]
        .iter()
        .any(|code| error_str.contains(code))
    {
        return "Cloudflare API temporarily unavailable. Please try again.".to_string();
    }

    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
