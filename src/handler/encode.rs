//! QR endpoint: validate the query, render off the async workers, respond

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::params::{QrQuery, QrRequest};
use crate::config::AppState;
use crate::error::ApiError;
use crate::http;
use crate::qr;

/// Serve `GET <api_path>?url=...`
///
/// Rendering is CPU-bound, so it runs on the blocking pool.
pub async fn serve_qrcode(
    query: Option<&str>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError> {
    let request = QrRequest::from_query(QrQuery::parse(query), &state.config.qr)?;

    let image = tokio::task::spawn_blocking(move || qr::generate(&request.data, &request.options))
        .await??;

    Ok(http::build_image_response(image, &state.config.http))
}
