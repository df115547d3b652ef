use crate::config::ProxyConfig;
use crate::headers::Headers;
use bytes::Bytes;
use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const MAX_REDIRECTS: usize = 10;
/// Connection-scoped headers the transport owns.
const HOP_BY_HOP: [&str; 9] = [
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "upgrade",
];

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream request: {reason}")]
    InvalidRequest { reason: String },
    #[error("upstream did not respond in time")]
    Timeout {
        #[source]
        source: BoxError,
    },
    #[error("upstream transport failed")]
    Transport {
        #[source]
        source: BoxError,
    },
}

impl UpstreamError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn timeout(source: impl Into<BoxError>) -> Self {
        Self::Timeout {
            source: source.into(),
        }
    }

    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Performs the outbound HTTP exchange. Redirects are followed by the implementation.
pub trait Upstream: Send + Sync {
    fn fetch(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, UpstreamError>> + Send;
}

/// [`Upstream`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    pub fn new(timeout: Option<Duration>) -> Result<Self, UpstreamError> {
        let mut builder =
            reqwest::Client::builder().redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(UpstreamError::transport)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        Self::new(config.upstream_timeout)
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Upstream for ReqwestUpstream {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| UpstreamError::invalid_request(format!("method `{}`", request.method)))?;
        let headers = to_header_map(&request.headers)?;

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let status_text = status_text(status, response.extensions().get::<ReasonPhrase>());
        let headers = from_header_map(response.headers());
        let body = response.bytes().await.map_err(classify)?;

        Ok(UpstreamResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, UpstreamError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if HOP_BY_HOP
            .iter()
            .any(|hop| name.eq_ignore_ascii_case(hop))
        {
            continue;
        }
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| UpstreamError::invalid_request(format!("header name `{name}`")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| UpstreamError::invalid_request(format!("value of header `{name}`")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Repeated values for one name are joined with `", "`.
fn from_header_map(map: &HeaderMap) -> Headers {
    let mut headers = Headers::with_capacity(map.keys_len());
    for name in map.keys() {
        let value = map
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        headers.insert(name.as_str(), value);
    }
    headers
}

/// The phrase the upstream actually sent when it differs from the canonical one.
fn status_text(status: reqwest::StatusCode, reason: Option<&ReasonPhrase>) -> String {
    match reason {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_owned(),
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::timeout(err)
    } else if err.is_builder() {
        UpstreamError::invalid_request(err.to_string())
    } else {
        UpstreamError::transport(err)
    }
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod upstream_test;
