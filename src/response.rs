use crate::constants::{header, page};
use crate::context::RequestContext;
use crate::headers::Headers;
use crate::request_filter::CustomHeaders;
use crate::upstream::UpstreamResponse;
use bytes::Bytes;
use serde_json::{Map, Value};

/// What the host should send back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    /// `None` means the response has no body at all.
    pub body: Option<Bytes>,
}

/// Inputs for the informational page served when no target is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoPage<'a> {
    pub service_origin: Option<&'a str>,
    pub custom_headers: Option<&'a CustomHeaders>,
}

pub struct ResponseComposer<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Reflects the caller origin; preflights also echo the requested method and headers.
    pub fn apply_cors_headers(&self, headers: &mut Headers) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.ctx.origin.unwrap_or_default(),
        );

        if self.ctx.is_preflight() {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                self.ctx.access_control_request_method.unwrap_or_default(),
            );
            if let Some(requested) = self.ctx.access_control_request_headers {
                headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested);
            }
            headers.remove(header::X_CONTENT_TYPE_OPTIONS);
        }
    }

    pub fn preflight(&self) -> ProxyResponse {
        let mut headers = Headers::with_capacity(3);
        self.apply_cors_headers(&mut headers);

        ProxyResponse {
            status: 200,
            status_text: "OK".to_owned(),
            headers,
            body: None,
        }
    }

    /// Passes the upstream response through and opens every upstream header to
    /// scripts, either directly or through the `cors-received-headers` JSON echo.
    pub fn forwarded(&self, upstream: UpstreamResponse) -> ProxyResponse {
        let UpstreamResponse {
            status,
            status_text,
            headers: upstream_headers,
            body,
        } = upstream;

        let mut exposed: Vec<&str> = Vec::with_capacity(upstream_headers.len() + 1);
        let mut received = Map::with_capacity(upstream_headers.len());
        for (name, value) in upstream_headers.iter() {
            exposed.push(name);
            received.insert(name.to_owned(), Value::String(value.to_owned()));
        }
        exposed.push(header::CORS_RECEIVED_HEADERS);
        let expose_value = exposed.join(",");

        let mut headers = upstream_headers;
        self.apply_cors_headers(&mut headers);
        headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, expose_value);
        headers.insert(
            header::CORS_RECEIVED_HEADERS,
            Value::Object(received).to_string(),
        );

        ProxyResponse {
            status,
            status_text,
            headers,
            body: Some(body),
        }
    }

    pub fn info(&self, page: InfoPage<'_>) -> ProxyResponse {
        let mut headers = Headers::with_capacity(4);
        headers.insert(header::CONTENT_TYPE, "text/plain;charset=UTF-8");
        self.apply_cors_headers(&mut headers);

        ProxyResponse {
            status: 200,
            status_text: "OK".to_owned(),
            headers,
            body: Some(Bytes::from(self.info_body(page))),
        }
    }

    fn info_body(&self, page: InfoPage<'_>) -> String {
        let mut body = format!(
            "{banner}\n\nSource:\n{source}\n\nUsage:\n{origin}/?uri\n\n\
             Limits: {daily}\n          {burst}\n\n",
            banner = page::BANNER,
            source = page::SOURCE_URL,
            origin = page.service_origin.unwrap_or_default(),
            daily = page::DAILY_LIMIT,
            burst = page::BURST_LIMIT,
        );

        if let Some(origin) = self.ctx.origin {
            body.push_str(&format!("Origin: {origin}\n"));
        }
        body.push_str(&format!("IP: {}\n", self.ctx.client_ip.unwrap_or("unknown")));
        if let Some(country) = self.ctx.country {
            body.push_str(&format!("Country: {country}\n"));
        }
        if let Some(datacenter) = self.ctx.datacenter {
            body.push_str(&format!("Datacenter: {datacenter}\n"));
        }
        body.push('\n');

        if let Some(custom) = page.custom_headers {
            body.push_str(&format!(
                "\n{}: {}",
                header::X_CORS_HEADERS,
                Value::Object(custom.clone())
            ));
        }
        body
    }

    /// Fixed rejection for requests the access lists refuse.
    pub fn forbidden() -> ProxyResponse {
        let mut headers = Headers::with_capacity(1);
        headers.insert(header::CONTENT_TYPE, "text/html");

        let body = format!(
            "Create your own CORS proxy</br>\n<a href='{source}'>{source}</a></br>\n",
            source = page::SOURCE_URL,
        );

        ProxyResponse {
            status: 403,
            status_text: "Forbidden".to_owned(),
            headers,
            body: Some(Bytes::from(body)),
        }
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;
