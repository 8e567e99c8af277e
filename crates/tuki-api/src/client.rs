//! JSON-over-HTTP plumbing shared by every storefront call.
//!
//! The backend signals failures two ways: a non-2xx status, or a 2xx body
//! that is an object carrying `mensaje`. Both surface as
//! [`ApiError::Backend`] with the backend's text passed through.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use tuki_core::AppConfig;

use crate::error::ApiError;

/// Characters left unescaped in a path segment, matching what browsers
/// leave alone in `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const MESSAGE_KEYS: &[&str] = &["mensaje", "message", "error"];

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.user_agent,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// # Errors
    ///
    /// See [`ApiClient::request_json`].
    pub async fn get(&self, url: &str) -> Result<Value, ApiError> {
        self.request_json(Method::GET, url, None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request_json`].
    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        let body = encode_body(url, body)?;
        self.request_json(Method::POST, url, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request_json`].
    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        let body = encode_body(url, body)?;
        self.request_json(Method::PUT, url, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request_json`].
    pub async fn patch<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        let body = encode_body(url, body)?;
        self.request_json(Method::PATCH, url, Some(body)).await
    }

    /// Sends a DELETE and returns the confirmation text, if any.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::command`].
    pub async fn delete(&self, url: &str) -> Result<Option<String>, ApiError> {
        self.command::<Value>(Method::DELETE, url, None).await
    }

    /// Sends a request whose response is a human-readable confirmation rather
    /// than data: a JSON `mensaje`, or plain text.
    ///
    /// Success is decided by the status alone, so a 2xx `mensaje` is returned
    /// as the confirmation.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if `url` does not parse.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Backend`] on a non-2xx status.
    pub async fn command<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Option<String>, ApiError> {
        let body = body.map(|b| encode_body(url, b)).transpose()?;
        let (status, text) = self.send(method, url, body).await?;
        let message = confirmation_message(&text);

        if status.is_success() {
            Ok(message)
        } else {
            Err(ApiError::Backend {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| fallback_message(status.as_u16())),
            })
        }
    }

    /// Sends a request and parses the response body as JSON.
    ///
    /// An empty body reads as `null`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if `url` does not parse.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Backend`] on a non-2xx status or a body carrying `mensaje`.
    /// - [`ApiError::Deserialize`] if a successful body is not JSON.
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let (status, text) = self.send(method, url, body).await?;
        let trimmed = text.trim();

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(trimmed)
                .ok()
                .and_then(|v| embedded_message(&v))
                .or_else(|| (!trimmed.is_empty()).then(|| trimmed.to_string()))
                .unwrap_or_else(|| fallback_message(status.as_u16()));
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        if trimmed.is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(trimmed).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })?;

        if value.get("mensaje").is_some() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: embedded_message(&value).unwrap_or_else(|| value["mensaje"].to_string()),
            });
        }

        Ok(value)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<(reqwest::StatusCode, String), ApiError> {
        let parsed = parse_url(url)?;
        tracing::debug!(%method, url = %parsed, "sending request");

        let mut request = self
            .client
            .request(method.clone(), parsed)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, url, error = %e, "request failed");
            ApiError::Http(e)
        })?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%method, url, status = status.as_u16(), "response received");
        Ok((status, text))
    }
}

/// Joins `base` and an id-like segment, percent-encoding the segment.
#[must_use]
pub fn join_path(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(segment, PATH_SEGMENT)
    )
}

#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn parse_url(url: &str) -> Result<Url, ApiError> {
    Url::parse(url).map_err(|e| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn encode_body<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Deserialize {
        context: format!("request body for {url}"),
        source: e,
    })
}

/// `mensaje` (or `message`/`error`) when it holds non-blank text.
fn embedded_message(value: &Value) -> Option<String> {
    MESSAGE_KEYS.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// JSON `mensaje` when present, a JSON string as-is, otherwise the trimmed
/// raw text. Other JSON documents carry no message.
fn confirmation_message(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Ok(value) => embedded_message(&value),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn fallback_message(status: u16) -> String {
    format!("The server rejected the request (HTTP {status}).")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
