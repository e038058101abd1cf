//! Delegate calls into the `qrcode` encoder

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba};
use qrcode::render::svg;
use qrcode::QrCode;

use super::{ImageType, QrImage, QrOptions, RenderError};

/// Quiet zone width on each side, in modules (fixed by the encoder)
const QUIET_ZONE_MODULES: u32 = 4;

/// Encode `data` and render it in the requested format
///
/// The output depends only on `data` and `options`, so equal inputs
/// always produce byte-identical images.
pub fn generate(data: &str, options: &QrOptions) -> Result<QrImage, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), options.error_correction.into())
        .map_err(RenderError::Encode)?;
    let layout = Layout::new(&code, options);

    match options.image_type {
        ImageType::Png => render_png(&code, options, layout).map(QrImage::Png),
        ImageType::Svg => Ok(QrImage::Svg(render_svg(&code, options, layout))),
    }
}

/// Pixel geometry of one rendered code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Whole pixels per module passed to the renderer
    module: u32,
    /// Exact output edge length, set when the requested width fits the symbol
    size: Option<u32>,
}

impl Layout {
    /// A requested width at least as large as the symbol (quiet zone included)
    /// is honoured exactly; smaller widths fall back to the configured scale.
    fn new(code: &QrCode, options: &QrOptions) -> Self {
        let quiet = if options.quiet_zone { QUIET_ZONE_MODULES * 2 } else { 0 };
        let total = u32::try_from(code.width())
            .unwrap_or(u32::MAX)
            .saturating_add(quiet);

        match options.width {
            Some(width) if width >= total => Self {
                module: width / total,
                size: Some(width),
            },
            _ => Self {
                module: options.scale.max(1),
                size: None,
            },
        }
    }
}

fn render_png(code: &QrCode, options: &QrOptions, layout: Layout) -> Result<Vec<u8>, RenderError> {
    let module = layout.module;
    let mut image = code
        .render::<Rgba<u8>>()
        .quiet_zone(options.quiet_zone)
        .module_dimensions(module, module)
        .dark_color(options.dark.to_rgba())
        .light_color(options.light.to_rgba())
        .build();

    // Whole-pixel modules rarely add up to the requested width
    if let Some(size) = layout.size {
        if image.width() != size {
            image = imageops::resize(&image, size, size, FilterType::Nearest);
        }
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn render_svg(code: &QrCode, options: &QrOptions, layout: Layout) -> String {
    let module = layout.module;
    let dark = options.dark.to_string();
    let light = options.light.to_string();

    let markup = code
        .render::<svg::Color<'_>>()
        .quiet_zone(options.quiet_zone)
        .module_dimensions(module, module)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build();

    let markup = strip_xml_declaration(markup);
    match layout.size {
        // The viewBox keeps the module grid, so only the outer size changes
        Some(size) => set_svg_size(&markup, size),
        None => markup,
    }
}

/// Rewrite `width` and `height` on the root `<svg>` element
fn set_svg_size(markup: &str, size: u32) -> String {
    let Some(tag_end) = markup.find('>') else {
        return markup.to_string();
    };
    let (tag, rest) = markup.split_at(tag_end);
    let tag = replace_attribute(tag, "width", size);
    let tag = replace_attribute(&tag, "height", size);
    format!("{tag}{rest}")
}

fn replace_attribute(tag: &str, name: &str, value: u32) -> String {
    let needle = format!(" {name}=\"");
    let Some(start) = tag.find(&needle) else {
        return tag.to_string();
    };
    let value_start = start + needle.len();
    match tag[value_start..].find('"') {
        Some(len) => format!("{}{value}{}", &tag[..value_start], &tag[value_start + len..]),
        None => tag.to_string(),
    }
}

/// Drop a leading `<?xml ...?>` so the document starts at `<svg`
fn strip_xml_declaration(markup: String) -> String {
    if !markup.starts_with("<?xml") {
        return markup;
    }
    match markup.find("?>") {
        Some(end) => markup[end + 2..].trim_start().to_string(),
        None => markup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::HexColor;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    fn symbol_modules(data: &str) -> u32 {
        let code = QrCode::with_error_correction_level(data.as_bytes(), qrcode::EcLevel::M).unwrap();
        u32::try_from(code.width()).unwrap() + QUIET_ZONE_MODULES * 2
    }

    fn render(data: &str, options: &QrOptions) -> QrImage {
        generate(data, options).expect("render failed")
    }

    #[test]
    fn test_png_output() {
        let image = render("https://example.com", &QrOptions::new(ImageType::Png));
        assert_eq!(image.image_type(), ImageType::Png);
        let png = image.into_bytes();
        assert!(png.starts_with(&PNG_SIGNATURE));

        let expected = symbol_modules("https://example.com") * 4;
        assert_eq!(png_dimensions(&png), (expected, expected));
    }

    #[test]
    fn test_svg_output() {
        let QrImage::Svg(svg) = render("https://example.com", &QrOptions::new(ImageType::Svg)) else {
            panic!("expected svg output");
        };
        assert!(svg.starts_with("<svg"), "unexpected prefix: {}", &svg[..20]);
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("#000000"));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn test_output_is_deterministic() {
        for image_type in [ImageType::Png, ImageType::Svg] {
            let mut options = QrOptions::new(image_type);
            options.width = Some(300);
            let first = render("https://example.com/a?b=c", &options);
            let second = render("https://example.com/a?b=c", &options);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_png_matches_requested_width() {
        let modules = symbol_modules("https://example.com");
        for width in [modules, modules * 10, modules * 10 + 3, 300] {
            let mut options = QrOptions::new(ImageType::Png);
            options.width = Some(width);

            let png = render("https://example.com", &options).into_bytes();
            assert_eq!(png_dimensions(&png), (width, width), "width {width}");
        }
    }

    #[test]
    fn test_svg_matches_requested_width() {
        let modules = symbol_modules("https://example.com");
        let mut options = QrOptions::new(ImageType::Svg);
        options.width = Some(300);

        let QrImage::Svg(svg) = render("https://example.com", &options) else {
            panic!("expected svg output");
        };
        let root = &svg[..svg.find('>').unwrap()];
        assert!(root.contains(r#" width="300""#), "root tag: {root}");
        assert!(root.contains(r#" height="300""#), "root tag: {root}");

        let grid = (300 / modules) * modules;
        assert!(root.contains(&format!(r#"viewBox="0 0 {grid} {grid}""#)), "root tag: {root}");
    }

    #[test]
    fn test_set_svg_size_only_touches_root() {
        let markup = r#"<svg width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#;
        assert_eq!(
            set_svg_size(markup, 42),
            r#"<svg width="42" height="42" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#
        );
    }

    #[test]
    fn test_width_too_small_uses_scale() {
        let modules = symbol_modules("https://example.com");
        let mut options = QrOptions::new(ImageType::Png);
        options.width = Some(modules - 1);
        options.scale = 2;

        let png = render("https://example.com", &options).into_bytes();
        assert_eq!(png_dimensions(&png), (modules * 2, modules * 2));
    }

    #[test]
    fn test_without_quiet_zone() {
        let code = QrCode::with_error_correction_level(b"hello", qrcode::EcLevel::M).unwrap();
        let bare = u32::try_from(code.width()).unwrap();
        let mut options = QrOptions::new(ImageType::Png);
        options.quiet_zone = false;
        options.scale = 1;

        let png = render("hello", &options).into_bytes();
        assert_eq!(png_dimensions(&png), (bare, bare));
    }

    #[test]
    fn test_custom_colors_in_svg() {
        let mut options = QrOptions::new(ImageType::Svg);
        options.dark = HexColor::rgba(0x12, 0x34, 0x56, 0xff);
        options.light = HexColor::rgba(0xfe, 0xdc, 0xba, 0x80);

        let QrImage::Svg(svg) = render("colors", &options) else {
            panic!("expected svg output");
        };
        assert!(svg.contains("#123456"));
        assert!(svg.contains("#fedcba80"));
    }

    #[test]
    fn test_data_too_long() {
        let data = "a".repeat(4000);
        let result = generate(&data, &QrOptions::new(ImageType::Png));
        assert!(matches!(result, Err(RenderError::Encode(_))));
    }

    #[test]
    fn test_strip_xml_declaration() {
        assert_eq!(
            strip_xml_declaration(r#"<?xml version="1.0"?><svg></svg>"#.to_string()),
            "<svg></svg>"
        );
        assert_eq!(strip_xml_declaration("<svg></svg>".to_string()), "<svg></svg>");
    }
}
