//! QR code rendering module
//!
//! Thin layer over the `qrcode` encoder and the `image` PNG writer:
//! - Image type and error-correction selection
//! - Rendering options built from request parameters
//! - PNG / SVG output

mod color;
mod render;

pub use color::{HexColor, ParseColorError};
pub use render::generate;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Png,
    Svg,
}

impl ImageType {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn content_type(self) -> &'static str {
        crate::http::mime::get_content_type(Some(self.extension()))
    }
}

impl FromStr for ImageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(()),
        }
    }
}

/// Error correction level passed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    #[serde(alias = "L")]
    Low,
    #[serde(alias = "M")]
    Medium,
    #[serde(alias = "Q")]
    Quartile,
    #[serde(alias = "H")]
    High,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => Self::L,
            ErrorCorrection::Medium => Self::M,
            ErrorCorrection::Quartile => Self::Q,
            ErrorCorrection::High => Self::H,
        }
    }
}

/// Rendering options for a single code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    pub image_type: ImageType,
    /// Requested output width in pixels (SVG user units for svg)
    pub width: Option<u32>,
    pub dark: HexColor,
    pub light: HexColor,
    pub error_correction: ErrorCorrection,
    /// Pixels per module when `width` is absent or too small
    pub scale: u32,
    pub quiet_zone: bool,
}

impl QrOptions {
    pub const fn new(image_type: ImageType) -> Self {
        Self {
            image_type,
            width: None,
            dark: HexColor::BLACK,
            light: HexColor::WHITE,
            error_correction: ErrorCorrection::Medium,
            scale: 4,
            quiet_zone: true,
        }
    }
}

/// Rendered code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrImage {
    Png(Vec<u8>),
    Svg(String),
}

impl QrImage {
    pub const fn image_type(&self) -> ImageType {
        match self {
            Self::Png(_) => ImageType::Png,
            Self::Svg(_) => ImageType::Svg,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Png(data) => data,
            Self::Svg(text) => text.into_bytes(),
        }
    }
}

/// Failure inside the encoder or image writer
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to encode data: {0}")]
    Encode(qrcode::types::QrError),
    #[error("failed to write png: {0}")]
    Png(#[from] image::ImageError),
}
