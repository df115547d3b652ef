use crate::access::AccessDecision;
use crate::config::ProxyConfig;
use crate::constants::header;
use crate::context::{ProxyRequest, RequestContext};
use crate::request_filter::{build_outbound_headers, parse_custom_headers};
use crate::response::{InfoPage, ProxyResponse, ResponseComposer};
use crate::result::{ProxyError, Route};
use crate::target::{extract_target, service_origin};
use crate::upstream::{ReqwestUpstream, Upstream, UpstreamError, UpstreamRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

const HOST: &str = "Host";

/// Admits, forwards and decorates cross-origin requests.
///
/// Holds no per-request state; share one instance behind an [`Arc`].
pub struct CorsProxy<U> {
    config: Arc<ProxyConfig>,
    upstream: U,
}

impl CorsProxy<ReqwestUpstream> {
    pub fn from_config(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream = ReqwestUpstream::from_config(&config)?;
        Ok(Self::new(config, upstream))
    }
}

impl<U: Upstream> CorsProxy<U> {
    pub fn new(config: impl Into<Arc<ProxyConfig>>, upstream: U) -> Self {
        Self {
            config: config.into(),
            upstream,
        }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Runs the access lists, then picks the response path. Requests without a
    /// target are checked against an empty URL.
    pub fn classify(&self, target: Option<&str>, ctx: &RequestContext<'_>) -> Route {
        match self
            .config
            .access
            .evaluate(target.unwrap_or_default(), ctx.origin)
        {
            AccessDecision::Deny(reason) => Route::Denied(reason),
            AccessDecision::Allow if target.is_none() => Route::Info,
            AccessDecision::Allow if ctx.is_preflight() => Route::Preflight,
            AccessDecision::Allow => Route::Forward,
        }
    }

    pub async fn handle(&self, request: ProxyRequest) -> Result<ProxyResponse, ProxyError> {
        let target = extract_target(&request.url).map_err(ProxyError::InvalidTarget)?;
        let ctx = request.context();
        let composer = ResponseComposer::new(ctx);
        let route = self.classify(target.as_deref(), &ctx);
        debug!(method = %request.method, target = ?target, ?route, "classified request");

        match (route, target) {
            (Route::Denied(reason), target) => {
                warn!(origin = ?ctx.origin, ?target, ?reason, "request denied by access lists");
                Ok(ResponseComposer::forbidden())
            }
            (Route::Preflight, _) => Ok(composer.preflight()),
            (Route::Forward, Some(target)) => self.forward(&request, &composer, target).await,
            (Route::Info, _) | (Route::Forward, None) => {
                let custom = parse_custom_headers(request.headers.get(header::X_CORS_HEADERS));
                let origin = service_origin(&request.url, request.headers.get(HOST));
                Ok(composer.info(InfoPage {
                    service_origin: origin.as_deref(),
                    custom_headers: custom.as_ref(),
                }))
            }
        }
    }

    async fn forward(
        &self,
        request: &ProxyRequest,
        composer: &ResponseComposer<'_>,
        target: String,
    ) -> Result<ProxyResponse, ProxyError> {
        let custom = parse_custom_headers(request.headers.get(header::X_CORS_HEADERS));
        let headers = build_outbound_headers(&request.headers, custom.as_ref());

        let upstream_request = UpstreamRequest {
            method: request.method.clone(),
            url: target,
            headers,
            body: request.body.clone(),
        };
        let url = upstream_request.url.clone();

        let response = self
            .upstream
            .fetch(upstream_request)
            .await
            .inspect_err(|err| warn!(%url, error = %err, "upstream request failed"))?;
        info!(%url, status = response.status, "forwarded upstream response");

        Ok(composer.forwarded(response))
    }
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;
