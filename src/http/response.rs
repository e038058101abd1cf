//! HTTP response building module
//!
//! Every builder adds the configured `Server` header (and CORS header when enabled)
//! and falls back to a bare response instead of panicking if the builder fails.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::mime;
use crate::config::HttpConfig;
use crate::qr::QrImage;

/// Start a response with status, content type and common headers
fn base_builder(status: StatusCode, content_type: &str, http_config: &HttpConfig) -> Builder {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder
}

/// Build 200 plain-text response
pub fn build_text_response(text: &str, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let body = Bytes::copy_from_slice(text.as_bytes());
    base_builder(StatusCode::OK, mime::get_content_type(Some("txt")), http_config)
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("text", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying a rendered QR code
pub fn build_image_response(image: QrImage, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let content_type = image.image_type().content_type();
    let body = Bytes::from(image.into_bytes());

    base_builder(StatusCode::OK, content_type, http_config)
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("image", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return fallback_internal_error();
        }
    };

    base_builder(status, mime::get_content_type(Some("json")), http_config)
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_internal_error()
        })
}

/// Drop the body of a HEAD response, keeping status and headers (including `Content-Length`)
pub fn strip_body(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

/// Hand-written 500 used when JSON serialization itself fails
fn fallback_internal_error() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(
        br#"{"status":500,"message":"an unknown error occurred"}"#,
    )));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
