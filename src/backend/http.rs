//! reqwest-backed transport for the admin backend

use super::auth::Session;
use super::client::Transport;
use super::error::{ClientError, TransportError};
use super::request::{MultipartValue, RequestBody, RequestDescriptor, CONTENT_TYPE};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("seckill-admin/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging.
/// Truncates long responses and strips control characters.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();

    let cleaned: String = truncated
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect();

    if total > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} bytes total]", cleaned, body.len())
    } else {
        cleaned
    }
}

/// Timeouts can fire while sending or while reading the body
fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(error)
    }
}

/// HTTP transport for backend calls
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Session,
    ) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            TransportError::InvalidRequest(format!("bad base URL {}: {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidRequest(format!(
                "unsupported scheme in base URL: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Session shared with this transport
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a backend path onto the base URL with exactly one slash
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_form(payload: super::request::MultipartPayload) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for (name, value) in payload.into_fields() {
            form = match value {
                MultipartValue::Text(text) => form.text(name, text),
                MultipartValue::File(file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<Value, TransportError> {
        let url = self.url(&request.path);
        tracing::debug!("{} {}", request.method, url);

        let multipart = request.is_multipart();
        let mut builder = self.client.request(request.method.into(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            // reqwest writes the multipart content type itself, boundary included
            if multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(payload) => builder.multipart(Self::build_form(payload)?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            let sanitized = sanitize_for_log(&body);
            tracing::error!("API error: {} - {}", status, sanitized);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: sanitized,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Format a client error for display on the command line.
/// Maps HTTP statuses to short messages instead of echoing raw bodies.
pub fn format_backend_error(error: &ClientError) -> String {
    match error {
        ClientError::Transport(transport) => match transport {
            TransportError::Timeout => "Request timed out. Is the backend reachable?".to_string(),
            TransportError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
            TransportError::Json(_) => "Backend answered with malformed JSON.".to_string(),
            other => match other.status() {
                Some(401) => "Authentication failed. Run 'seckill-admin login' first.".to_string(),
                Some(403) => "Permission denied for this account.".to_string(),
                Some(404) => "Endpoint or resource not found.".to_string(),
                Some(400) | Some(415) => "Invalid request. Check your parameters.".to_string(),
                Some(status) if status >= 500 => {
                    "Backend temporarily unavailable. Please try again.".to_string()
                }
                Some(status) => format!("Request failed with HTTP {}.", status),
                None => "Request failed. Check your network connection and try again.".to_string(),
            },
        },
        ClientError::Application { code, msg } => format!(
            "Backend rejected the request (code {}): {}",
            code,
            msg.as_deref().unwrap_or("no message")
        ),
        other => other.to_string(),
    }
}
