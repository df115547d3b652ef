use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use cors_anywhere_rs::{CorsProxy, ProxyConfig, ProxyError, ProxyRequest, ProxyResponse, ReqwestUpstream};
use tracing::error;
use tracing_subscriber::EnvFilter;

const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

type SharedProxy = Arc<CorsProxy<ReqwestUpstream>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ProxyConfig::from_env()?;
    let proxy: SharedProxy = Arc::new(CorsProxy::from_config(config)?);

    let app = Router::new().fallback(proxy_handler).with_state(proxy);

    let addr: SocketAddr = "127.0.0.1:8787".parse()?;
    tracing::info!(%addr, "cors proxy listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn proxy_handler(
    State(proxy): State<SharedProxy>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(_) => return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response(),
    };

    let url = parts
        .uri
        .path_and_query()
        .map(|value| value.as_str().to_owned())
        .unwrap_or_else(|| "/".to_owned());
    let mut proxy_request = ProxyRequest::new(parts.method.as_str(), url)
        .body(body)
        .client_ip(peer.ip().to_string());
    for (name, value) in parts.headers.iter() {
        if let Ok(value) = value.to_str() {
            proxy_request.headers.insert(name.as_str(), value);
        }
    }

    match proxy.handle(proxy_request).await {
        Ok(response) => into_axum_response(response),
        Err(err) => error_response(err),
    }
}

fn into_axum_response(response: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut out = Response::new(response.body.map(Body::from).unwrap_or_else(Body::empty));
    *out.status_mut() = status;

    for (name, value) in response.headers.iter() {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            out.headers_mut().insert(name, value);
        }
    }
    out
}

fn error_response(err: ProxyError) -> Response {
    error!(error = %err, "proxy request failed");
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, format!("proxy error: {err}")).into_response()
}
