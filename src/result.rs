use crate::access::DenyReason;
use crate::upstream::UpstreamError;
use std::str::Utf8Error;
use thiserror::Error;

/// Which response path a request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Info,
    Preflight,
    Forward,
    Denied(DenyReason),
}

/// Failures the proxy hands back to the host instead of building a response.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("target URL is not valid UTF-8 after decoding")]
    InvalidTarget(#[source] Utf8Error),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ProxyError {
    /// Status a host may answer with when converting this error into a response.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::InvalidTarget(_) => 400,
            ProxyError::Upstream(err) if err.is_timeout() => 504,
            ProxyError::Upstream(_) => 502,
        }
    }
}
