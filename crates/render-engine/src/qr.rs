//! QR code rasterisation.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use photobooth_common::error::{PhotoboothError, PhotoboothResult};

/// Pixels per module before any resize.
pub const QR_MODULE_PX: u32 = 10;

/// Error correction level used for every code.
pub const QR_EC_LEVEL: EcLevel = EcLevel::M;

/// Encode `text` as a black-on-white QR code with a 4-module quiet zone.
pub fn encode_qr(text: &str) -> PhotoboothResult<GrayImage> {
    if text.is_empty() {
        return Err(PhotoboothError::invalid_input("QR text is empty"));
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), QR_EC_LEVEL).map_err(|e| {
        PhotoboothError::invalid_input(format!("Text cannot be encoded as a QR code: {e}"))
    })?;

    Ok(code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(QR_MODULE_PX, QR_MODULE_PX)
        .build())
}

/// Encode `text` as a QR code and return PNG bytes.
pub fn encode_qr_png(text: &str) -> PhotoboothResult<Vec<u8>> {
    let img = encode_qr(text)?;
    let mut out = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| PhotoboothError::storage_msg(format!("Failed to encode QR PNG: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobooth_common::error::ErrorKind;
    use qrcode::Color;

    #[test]
    fn test_empty_text_rejected() {
        let err = encode_qr("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_oversized_text_rejected() {
        let err = encode_qr(&"x".repeat(10_000)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_image_matches_module_grid() {
        let text = "https://example.com";
        let img = encode_qr(text).unwrap();
        let code = QrCode::with_error_correction_level(text, QR_EC_LEVEL).unwrap();
        let modules = code.width() as u32;

        assert_eq!(img.width(), (modules + 8) * QR_MODULE_PX);
        assert_eq!(img.width(), img.height());

        let colors = code.to_colors();
        for my in 0..modules {
            for mx in 0..modules {
                let px = (mx + 4) * QR_MODULE_PX + QR_MODULE_PX / 2;
                let py = (my + 4) * QR_MODULE_PX + QR_MODULE_PX / 2;
                let dark = img.get_pixel(px, py).0[0] < 128;
                let expected = colors[(my * modules + mx) as usize] == Color::Dark;
                assert_eq!(dark, expected, "module ({mx}, {my})");
            }
        }
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let img = encode_qr("https://example.com").unwrap();
        for i in 0..img.width() {
            assert_eq!(img.get_pixel(i, 0).0[0], 255);
            assert_eq!(img.get_pixel(0, i).0[0], 255);
        }
    }

    #[test]
    fn test_png_bytes_decode() {
        let png = encode_qr_png("https://example.com").unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.to_luma8(), encode_qr("https://example.com").unwrap());
    }
}
