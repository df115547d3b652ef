use bytes::Bytes;
use cors_anywhere_rs::{
    CorsProxy, Headers, ProxyConfig, ProxyRequest, ProxyResponse, Upstream, UpstreamError,
    UpstreamRequest, UpstreamResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned upstream that records every request it receives.
#[derive(Clone)]
pub struct MockUpstream {
    calls: Arc<Mutex<Vec<UpstreamRequest>>>,
    status: u16,
    status_text: String,
    headers: Headers,
    body: Bytes,
    fail: bool,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            status: 200,
            status_text: "OK".into(),
            headers: [("content-type", "application/json")].into_iter().collect(),
            body: Bytes::from_static(br#"{"ok":true}"#),
            fail: false,
        }
    }
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: u16, text: &str) -> Self {
        self.status = status;
        self.status_text = text.into();
        self
    }

    pub fn headers(mut self, pairs: &[(&str, &str)]) -> Self {
        self.headers = pairs.iter().copied().collect();
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Upstream for MockUpstream {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().expect("calls lock").push(request);
        if self.fail {
            return Err(UpstreamError::transport("connection refused"));
        }
        Ok(UpstreamResponse {
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}

/// Builds a proxy from environment-style variables.
#[derive(Default)]
pub struct ProxyBuilder {
    vars: HashMap<String, String>,
    upstream: MockUpstream,
}

impl ProxyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn upstream(mut self, upstream: MockUpstream) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn build(self) -> (CorsProxy<MockUpstream>, MockUpstream) {
        let vars = self.vars;
        let config = ProxyConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("valid proxy configuration");
        let handle = self.upstream.clone();
        (CorsProxy::new(config, self.upstream), handle)
    }
}

pub struct RequestBuilder {
    request: ProxyRequest,
}

impl RequestBuilder {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            request: ProxyRequest::new(method, url),
        }
    }

    pub fn origin(self, origin: &str) -> Self {
        self.header("Origin", origin)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request = self.request.body(body);
        self
    }

    pub fn client_ip(mut self, ip: &str) -> Self {
        self.request = self.request.client_ip(ip);
        self
    }

    pub fn build(self) -> ProxyRequest {
        self.request
    }

    pub async fn send(self, proxy: &CorsProxy<MockUpstream>) -> ProxyResponse {
        proxy
            .handle(self.request)
            .await
            .expect("request should be handled")
    }
}

pub fn proxy() -> ProxyBuilder {
    ProxyBuilder::new()
}

pub fn get(target: &str) -> RequestBuilder {
    RequestBuilder::new("GET", &format!("/?{target}"))
}

pub fn preflight(target: &str) -> RequestBuilder {
    RequestBuilder::new("OPTIONS", &format!("/?{target}"))
}

pub fn info() -> RequestBuilder {
    RequestBuilder::new("GET", "/")
}
