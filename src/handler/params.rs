//! Query parameter extraction and validation for the QR endpoint

use url::form_urlencoded;

use crate::config::QrConfig;
use crate::error::ApiError;
use crate::qr::{HexColor, ImageType, QrOptions};

/// Raw query parameters understood by the QR endpoint
///
/// Values are percent-decoded; the first occurrence of a key wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QrQuery {
    pub url: Option<String>,
    pub image_type: Option<String>,
    pub width: Option<String>,
    pub qrcolor: Option<String>,
    pub bgcolor: Option<String>,
}

impl QrQuery {
    pub fn parse(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        let Some(query) = query else {
            return parsed;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "url" => &mut parsed.url,
                "type" => &mut parsed.image_type,
                "width" => &mut parsed.width,
                "qrcolor" => &mut parsed.qrcolor,
                "bgcolor" => &mut parsed.bgcolor,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        parsed
    }
}

/// Validated request: the text to encode and how to render it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub data: String,
    pub options: QrOptions,
}

impl QrRequest {
    pub fn from_query(query: QrQuery, qr_config: &QrConfig) -> Result<Self, ApiError> {
        let data = query
            .url
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingUrl)?;

        let image_type = match query.image_type {
            None => qr_config.default_type,
            Some(raw) => raw
                .parse::<ImageType>()
                .map_err(|()| ApiError::UnsupportedType(raw))?,
        };

        let mut options = QrOptions::new(image_type);
        options.width = parse_width(query.width.as_deref(), qr_config.max_width)?;
        options.dark = parse_color("qrcolor", query.qrcolor, HexColor::BLACK)?;
        options.light = parse_color("bgcolor", query.bgcolor, HexColor::WHITE)?;
        options.error_correction = qr_config.error_correction;
        options.scale = qr_config.scale;
        options.quiet_zone = qr_config.quiet_zone;

        Ok(Self { data, options })
    }
}

/// Decimal and exponent forms (`300.5`, `1e3`) are accepted and truncated.
/// Non-numeric, non-finite and sub-pixel widths are ignored and rendering
/// falls back to the scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_width(raw: Option<&str>, max_width: u32) -> Result<Option<u32>, ApiError> {
    let width = raw
        .and_then(|w| w.trim().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .map(f64::trunc)
        .filter(|w| *w >= 1.0);

    match width {
        Some(w) if w > f64::from(max_width) => Err(ApiError::WidthTooLarge { max: max_width }),
        // In 1..=max_width, so the cast is exact
        Some(w) => Ok(Some(w as u32)),
        None => Ok(None),
    }
}

fn parse_color(
    param: &'static str,
    raw: Option<String>,
    default: HexColor,
) -> Result<HexColor, ApiError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::InvalidColor { param, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn qr_config() -> QrConfig {
        Config::load_from("does-not-exist/config").unwrap().qr
    }

    fn request(query: &str) -> Result<QrRequest, ApiError> {
        QrRequest::from_query(QrQuery::parse(Some(query)), &qr_config())
    }

    #[test]
    fn test_parse_decodes_values() {
        let query = QrQuery::parse(Some(
            "url=https%3A%2F%2Fexample.com%2F%3Fq%3Da+b&type=svg&qrcolor=%23ff0000&other=1",
        ));
        assert_eq!(query.url.as_deref(), Some("https://example.com/?q=a b"));
        assert_eq!(query.image_type.as_deref(), Some("svg"));
        assert_eq!(query.qrcolor.as_deref(), Some("#ff0000"));
        assert_eq!(query.width, None);
    }

    #[test]
    fn test_parse_first_value_wins() {
        let query = QrQuery::parse(Some("url=first&url=second"));
        assert_eq!(query.url.as_deref(), Some("first"));
    }

    #[test]
    fn test_parse_without_query() {
        assert_eq!(QrQuery::parse(None), QrQuery::default());
    }

    #[test]
    fn test_defaults() {
        let req = request("url=https://example.com").unwrap();
        assert_eq!(req.data, "https://example.com");
        assert_eq!(req.options.image_type, ImageType::Png);
        assert_eq!(req.options.width, None);
        assert_eq!(req.options.dark, HexColor::BLACK);
        assert_eq!(req.options.light, HexColor::WHITE);
        assert_eq!(req.options.scale, 4);
    }

    #[test]
    fn test_missing_or_empty_url() {
        assert!(matches!(request(""), Err(ApiError::MissingUrl)));
        assert!(matches!(request("url="), Err(ApiError::MissingUrl)));
        assert!(matches!(request("type=svg"), Err(ApiError::MissingUrl)));
    }

    #[test]
    fn test_unsupported_type() {
        match request("url=x&type=bmp") {
            Err(ApiError::UnsupportedType(t)) => assert_eq!(t, "bmp"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(request("url=x&type="), Err(ApiError::UnsupportedType(_))));
    }

    #[test]
    fn test_width_handling() {
        assert_eq!(request("url=x&width=300").unwrap().options.width, Some(300));
        assert_eq!(request("url=x&width=abc").unwrap().options.width, None);
        assert_eq!(request("url=x&width=0").unwrap().options.width, None);
        assert_eq!(request("url=x&width=-5").unwrap().options.width, None);
        assert_eq!(request("url=x&width=0.5").unwrap().options.width, None);
        assert_eq!(request("url=x&width=inf").unwrap().options.width, None);
        assert_eq!(request("url=x&width=NaN").unwrap().options.width, None);
        assert!(matches!(
            request("url=x&width=100000"),
            Err(ApiError::WidthTooLarge { max: 4096 })
        ));
    }

    #[test]
    fn test_width_accepts_decimal_and_exponent() {
        assert_eq!(request("url=x&width=300.5").unwrap().options.width, Some(300));
        assert_eq!(request("url=x&width=1e3").unwrap().options.width, Some(1000));
        assert_eq!(request("url=x&width=%20256%20").unwrap().options.width, Some(256));
        assert_eq!(request("url=x&width=4096.9").unwrap().options.width, Some(4096));
        assert!(matches!(
            request("url=x&width=1e5"),
            Err(ApiError::WidthTooLarge { max: 4096 })
        ));
    }

    #[test]
    fn test_colors() {
        let req = request("url=x&qrcolor=112233&bgcolor=%23ffeeddcc").unwrap();
        assert_eq!(req.options.dark, HexColor::rgba(0x11, 0x22, 0x33, 0xff));
        assert_eq!(req.options.light, HexColor::rgba(0xff, 0xee, 0xdd, 0xcc));

        match request("url=x&bgcolor=blue") {
            Err(ApiError::InvalidColor { param, value }) => {
                assert_eq!(param, "bgcolor");
                assert_eq!(value, "blue");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
