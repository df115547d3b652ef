use crate::constants::{header, method};
use crate::headers::Headers;
use bytes::Bytes;

/// Location hints a hosting platform may attach to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoHints {
    pub country: Option<String>,
    pub datacenter: Option<String>,
}

/// An inbound request as handed over by the host.
///
/// `url` may be absolute (`https://proxy.example/?target`) or origin-form
/// (`/?target`); everything after the first `?` names the target.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Bytes,
    pub client_ip: Option<String>,
    pub geo: GeoHints,
}

impl ProxyRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: Bytes::new(),
            client_ip: None,
            geo: GeoHints::default(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn geo(mut self, geo: GeoHints) -> Self {
        self.geo = geo;
        self
    }

    pub fn context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.headers.get(header::ORIGIN),
            access_control_request_method: self.headers.get(header::ACCESS_CONTROL_REQUEST_METHOD),
            access_control_request_headers: self
                .headers
                .get(header::ACCESS_CONTROL_REQUEST_HEADERS),
            client_ip: self
                .client_ip
                .as_deref()
                .or_else(|| self.headers.get(header::CF_CONNECTING_IP)),
            country: self
                .geo
                .country
                .as_deref()
                .or_else(|| self.headers.get(header::CF_IPCOUNTRY)),
            datacenter: self.geo.datacenter.as_deref(),
        }
    }
}

/// The request fields the response composer reads.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub client_ip: Option<&'a str>,
    pub country: Option<&'a str>,
    pub datacenter: Option<&'a str>,
}

impl RequestContext<'_> {
    /// Methods are case-sensitive; only `OPTIONS` counts.
    pub fn is_preflight(&self) -> bool {
        self.method == method::OPTIONS
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
