//! Four-photo compositor.
//!
//! [`Compositor::compose`] is a pure function of its inputs: the same
//! photos, frame, link and date always produce the same pixels.

use chrono::NaiveDate;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use photobooth_common::clock::format_stamp;
use photobooth_common::error::{PhotoboothError, PhotoboothResult};

use crate::layout::{
    qr_rect, slot_origin, CANVAS_HEIGHT, CANVAS_WIDTH, DATE_MARGIN_BOTTOM, PHOTO_COUNT,
    PHOTO_HEIGHT, PHOTO_WIDTH, QR_SIZE,
};
use crate::qr::encode_qr;
use crate::text::StampFont;

/// Canvas background behind the photos.
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Date stamp colour.
pub const DATE_COLOR: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Filter for photos and frame.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Merges photos, frame, date stamp, and QR code into one image.
pub struct Compositor {
    font: StampFont,
}

impl Compositor {
    pub fn new(font: StampFont) -> Self {
        Self { font }
    }

    /// Compose four photos (in slot order) under `frame`, stamped with
    /// `date` and a QR code encoding `link`.
    pub fn compose(
        &self,
        photos: &[DynamicImage],
        frame: &DynamicImage,
        link: &str,
        date: NaiveDate,
    ) -> PhotoboothResult<RgbImage> {
        if photos.len() != PHOTO_COUNT {
            return Err(PhotoboothError::invalid_input(format!(
                "Exactly {PHOTO_COUNT} photos are required, got {}",
                photos.len()
            )));
        }

        // The QR step is the only one that can reject caller input; do it first.
        let qr = encode_qr(link)?;

        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, CANVAS_BACKGROUND);

        for (slot, photo) in photos.iter().enumerate() {
            let resized = imageops::resize(&photo.to_rgb8(), PHOTO_WIDTH, PHOTO_HEIGHT, RESIZE_FILTER);
            let opaque = DynamicImage::ImageRgb8(resized).to_rgba8();
            let (x, y) = slot_origin(slot);
            imageops::replace(&mut canvas, &opaque, x as i64, y as i64);
        }

        let frame = imageops::resize(&frame.to_rgba8(), CANVAS_WIDTH, CANVAS_HEIGHT, RESIZE_FILTER);
        imageops::overlay(&mut canvas, &frame, 0, 0);

        self.stamp_date(&mut canvas, date);

        let qr = imageops::resize(&qr, QR_SIZE, QR_SIZE, FilterType::Nearest);
        let qr = DynamicImage::ImageLuma8(qr).to_rgba8();
        let spot = qr_rect();
        imageops::overlay(&mut canvas, &qr, spot.x as i64, spot.y as i64);

        Ok(flatten(&canvas))
    }

    /// Centre the date horizontally, its ink bottom `DATE_MARGIN_BOTTOM` above the edge.
    fn stamp_date(&self, canvas: &mut RgbaImage, date: NaiveDate) {
        let stamp = format_stamp(date);
        let Some(bounds) = self.font.measure(&stamp) else {
            return;
        };
        let left = (CANVAS_WIDTH as i32 - bounds.width() as i32) / 2;
        let top = CANVAS_HEIGHT as i32 - bounds.height() as i32 - DATE_MARGIN_BOTTOM as i32;
        self.font.draw(canvas, &stamp, left, top, DATE_COLOR);
    }
}

/// Drop alpha by blending onto the canvas background.
fn flatten(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let p = canvas.get_pixel(x, y).0;
        let a = p[3] as f32 / 255.0;
        let inv = 1.0 - a;
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = (p[c] as f32 * a + CANVAS_BACKGROUND.0[c] as f32 * inv).round() as u8;
        }
        Rgb(out)
    })
}
