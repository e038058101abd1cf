//! Request error taxonomy
//!
//! Client input errors map to 400, routing errors to 404, and anything
//! raised while rendering maps to 500. All of them are rendered as
//! `{"status": <code>, "message": <text>}`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::config::HttpConfig;
use crate::http;
use crate::qr::RenderError;

/// Message returned for failures whose detail must not reach the client
pub const INTERNAL_ERROR_MESSAGE: &str = "an unknown error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("query parameter `url` is required")]
    MissingUrl,

    #[error("query parameter `type` must be png or svg (got `{0}`)")]
    UnsupportedType(String),

    #[error("query parameter `{param}` must be a 6 or 8 digit hex color (got `{value}`)")]
    InvalidColor { param: &'static str, value: String },

    #[error("query parameter `width` must not exceed {max} pixels")]
    WidthTooLarge { max: u32 },

    #[error("the requested page does not exist")]
    NotFound,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// JSON error payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl
            | Self::UnsupportedType(_)
            | Self::InvalidColor { .. }
            | Self::WidthTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Render(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::Render(_) | Self::Task(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status().as_u16(),
            message: self.public_message(),
        }
    }

    pub fn into_response(self, http_config: &HttpConfig) -> Response<Full<Bytes>> {
        http::build_json_response(self.status(), &self.body(), http_config)
    }
}
