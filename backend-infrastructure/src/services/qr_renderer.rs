use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb};
use qrcode::{EcLevel, QrCode};

use backend_domain::{QrRenderConfig, TicketRenderer};

pub struct QrTicketRenderer {
    config: QrRenderConfig,
}

impl QrTicketRenderer {
    pub fn new(config: QrRenderConfig) -> Self {
        Self { config }
    }
}

impl Default for QrTicketRenderer {
    fn default() -> Self {
        Self::new(QrRenderConfig::default())
    }
}

impl TicketRenderer for QrTicketRenderer {
    fn content_type(&self) -> &'static str {
        "image/png"
    }

    fn render(&self, ticket: &str) -> anyhow::Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(ticket.as_bytes(), EcLevel::M)?;
        let size = self.config.module_size;
        let pixels = code
            .render::<Rgb<u8>>()
            .dark_color(Rgb(self.config.dark_color))
            .light_color(Rgb(self.config.light_color))
            .module_dimensions(size, size)
            .quiet_zone(true)
            .build();

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(pixels).write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET_ZONE_MODULES: u32 = 4;

    #[test]
    fn renders_png_sized_by_module_count() {
        let renderer = QrTicketRenderer::default();
        let bytes = renderer.render("CP-12-7").expect("render");
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));

        let modules = QrCode::with_error_correction_level(b"CP-12-7", EcLevel::M)
            .expect("qr")
            .width() as u32;
        let image = image::load_from_memory(&bytes).expect("decode png").to_rgb8();
        let expected = (modules + 2 * QUIET_ZONE_MODULES) * 10;
        assert_eq!(image.width(), expected);
        assert_eq!(image.height(), expected);
    }

    #[test]
    fn uses_configured_colors() {
        let config = QrRenderConfig {
            module_size: 2,
            dark_color: [0, 0, 0],
            light_color: [255, 255, 255],
        };
        let bytes = QrTicketRenderer::new(config).render("CP-1-1").expect("render");
        let image = image::load_from_memory(&bytes).expect("decode png").to_rgb8();
        // Quiet zone is light, the finder pattern corner right after it is dark.
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
        let corner = QUIET_ZONE_MODULES * 2;
        assert_eq!(image.get_pixel(corner, corner).0, [0, 0, 0]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = QrTicketRenderer::default();
        let first = renderer.render("CP-40-2").expect("render");
        let second = renderer.render("CP-40-2").expect("render");
        assert_eq!(first, second);
        assert_ne!(first, renderer.render("CP-40-3").expect("render"));
    }
}
