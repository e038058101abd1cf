//! MIME type detection module
//!
//! Returns the corresponding Content-Type for the formats this server emits.

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use qrserve::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("png")), "image/png");
/// assert_eq!(get_content_type(Some("svg")), "image/svg+xml");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Images
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",

        // Text
        Some("txt") => "text/plain; charset=utf-8",
        Some("json") => "application/json",

        // Default
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("svg")), "image/svg+xml");
        assert_eq!(get_content_type(Some("txt")), "text/plain; charset=utf-8");
        assert_eq!(get_content_type(Some("json")), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("bmp")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }
}
