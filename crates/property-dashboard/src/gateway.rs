//! One outbound call per inbound query, and the mapping from its outcome to
//! an HTTP status plus a JSON tree.

use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use propjson::{Options, Value, decode};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://www.microburbs.com.au/report_generator/api/suburb/properties";
pub const DEFAULT_PROPERTY_TYPE: &str = "house";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("suburb parameter is required")]
    MissingSuburb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyQuery {
    pub suburb: String,
    pub property_type: String,
}

impl PropertyQuery {
    /// Validate raw query parameters. Runs before any network call.
    pub fn from_params(
        suburb: Option<String>,
        property_type: Option<String>,
    ) -> Result<Self, ValidationError> {
        let suburb = suburb
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingSuburb)?;
        let property_type = property_type.unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string());
        Ok(Self {
            suburb,
            property_type,
        })
    }
}

/// Outcome of the single upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Ok { body: Vec<u8>, status: u16 },
    Timeout,
    Transport(String),
}

pub trait Upstream: Send + Sync + 'static {
    fn fetch(&self, query: &PropertyQuery) -> impl Future<Output = FetchResult> + Send;
}

/// Bearer-authenticated GET against the property search endpoint.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpUpstream {
    pub fn new(url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Upstream for HttpUpstream {
    async fn fetch(&self, query: &PropertyQuery) -> FetchResult {
        let sent = self
            .client
            .get(&self.url)
            .query(&[
                ("suburb", query.suburb.as_str()),
                ("property_type", query.property_type.as_str()),
            ])
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(e) => return classify(e),
        };
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => FetchResult::Ok {
                body: body.to_vec(),
                status,
            },
            Err(e) => classify(e),
        }
    }
}

fn classify(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::Timeout
    } else {
        FetchResult::Transport(e.to_string())
    }
}

fn error_object(message: impl Into<String>) -> Value {
    Value::object([("error", Value::from(message.into()))])
}

/// Status to answer with for a failed upstream call. Statuses that cannot
/// carry a body (1xx, 204, 304) or that `http` rejects become 502.
fn relayed_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code)
            if code.is_informational()
                || code == StatusCode::NO_CONTENT
                || code == StatusCode::NOT_MODIFIED =>
        {
            StatusCode::BAD_GATEWAY
        }
        Ok(code) => code,
        Err(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Turn a fetch outcome into the response status and the tree to serialize.
pub fn respond(result: FetchResult, options: &Options) -> (StatusCode, Value) {
    match result {
        FetchResult::Ok { body, status: 200 } => {
            match decode::parse_with_options(&body, options) {
                Ok(data) => {
                    let count = data
                        .get("results")
                        .and_then(Value::as_array)
                        .map_or(0, <[Value]>::len);
                    info!(count, "fetched properties");
                    (StatusCode::OK, data)
                }
                Err(e) => {
                    error!(error = %e, response_length = body.len(), "upstream returned invalid JSON");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        decode::invalid_body_report(&e, &body, Some(200), options),
                    )
                }
            }
        }
        FetchResult::Ok { body, status } => {
            error!(status, "upstream request failed");
            let code = relayed_status(status);
            let details = decode::preview(&body, options.details_len);
            (
                code,
                Value::object([
                    ("error", Value::from(format!("API request failed with status {}", status))),
                    ("details", Value::from(details)),
                ]),
            )
        }
        FetchResult::Timeout => {
            warn!("upstream request timed out");
            (StatusCode::GATEWAY_TIMEOUT, error_object("Request timed out"))
        }
        FetchResult::Transport(message) => {
            error!(error = %message, "upstream request error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_object(format!("Request failed: {}", message)),
            )
        }
    }
}
