//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, error mapping and access logging.

use crate::config::AppState;
use crate::error::ApiError;
use crate::handler::encode;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Uri, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_log = state.access_log_enabled();
    let mut entry = access_log.then(|| access_entry(&req, peer_addr));

    let response = route(req.method(), req.uri(), &state).await;

    if let Some(entry) = entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a request and map any error onto its JSON response
///
/// HEAD is answered by the GET route with the body removed.
pub async fn route(method: &Method, uri: &Uri, state: &AppState) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;

    let response = match dispatch(method, uri, state).await {
        Ok(response) => response,
        Err(err) => {
            if err.status().is_server_error() {
                logger::log_error(&format!("{} {}: {err}", method, uri.path()));
            }
            err.into_response(&state.config.http)
        }
    };

    if is_head {
        http::strip_body(response)
    } else {
        response
    }
}

/// Only GET and HEAD are served; the QR path is checked first so it may be "/"
async fn dispatch(
    method: &Method,
    uri: &Uri,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError> {
    if !matches!(*method, Method::GET | Method::HEAD) {
        return Err(ApiError::NotFound);
    }

    let path = uri.path();
    let qr_config = &state.config.qr;

    if path == qr_config.api_path {
        return encode::serve_qrcode(uri.query(), state).await;
    }
    if path == "/" {
        return Ok(http::build_text_response(
            &qr_config.description,
            &state.config.http,
        ));
    }

    Err(ApiError::NotFound)
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
