//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from QR rendering.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{build_image_response, build_json_response, build_text_response, strip_body};
