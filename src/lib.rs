mod access;
mod config;
pub mod constants;
mod context;
mod headers;
mod pattern;
mod proxy;
mod request_filter;
mod response;
mod result;
mod target;
mod upstream;

pub use access::{AccessDecision, AccessLists, DenyReason};
pub use config::{ConfigError, ProxyConfig};
pub use context::{GeoHints, ProxyRequest, RequestContext};
pub use headers::{Header, Headers};
pub use pattern::{Pattern, PatternError, PatternKind, PatternList};
pub use proxy::CorsProxy;
pub use request_filter::{CustomHeaders, build_outbound_headers, is_excluded, parse_custom_headers};
pub use response::{InfoPage, ProxyResponse, ResponseComposer};
pub use result::{ProxyError, Route};
pub use target::{extract_target, service_origin};
pub use upstream::{
    BoxError, ReqwestUpstream, Upstream, UpstreamError, UpstreamRequest, UpstreamResponse,
};
