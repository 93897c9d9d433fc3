//! Date stamp text rendering.

use std::path::Path;

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};

use photobooth_common::error::{PhotoboothError, PhotoboothResult};

/// Pixel extent of laid-out text, relative to the pen origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }
}

/// A TrueType font at a fixed pixel size.
pub struct StampFont {
    font: Font<'static>,
    px: f32,
}

impl StampFont {
    /// Load a font file. Any failure is `ResourceUnavailable`.
    pub fn load(path: &Path, px: f32) -> PhotoboothResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            PhotoboothError::resource_unavailable(format!(
                "font {} could not be read: {e}",
                path.display()
            ))
        })?;
        Self::from_bytes(bytes, px).map_err(|_| {
            PhotoboothError::resource_unavailable(format!(
                "font {} is not a usable TrueType font",
                path.display()
            ))
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, px: f32) -> PhotoboothResult<Self> {
        let font = Font::try_from_vec(bytes).ok_or_else(|| {
            PhotoboothError::resource_unavailable("font data is not a usable TrueType font")
        })?;
        Ok(Self { font, px })
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    fn layout(&self, text: &str) -> Vec<PositionedGlyph<'_>> {
        let scale = Scale::uniform(self.px);
        let ascent = self.font.v_metrics(scale).ascent;
        self.font.layout(text, scale, point(0.0, ascent)).collect()
    }

    /// Ink bounds of `text`, or `None` if nothing would be drawn.
    pub fn measure(&self, text: &str) -> Option<TextBounds> {
        self.layout(text)
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold(None, |acc: Option<TextBounds>, bb| {
                Some(match acc {
                    None => TextBounds {
                        min_x: bb.min.x,
                        min_y: bb.min.y,
                        max_x: bb.max.x,
                        max_y: bb.max.y,
                    },
                    Some(b) => TextBounds {
                        min_x: b.min_x.min(bb.min.x),
                        min_y: b.min_y.min(bb.min.y),
                        max_x: b.max_x.max(bb.max.x),
                        max_y: b.max_y.max(bb.max.y),
                    },
                })
            })
    }

    /// Draw `text` so its ink bounds start at (`left`, `top`), blending
    /// glyph coverage over the existing pixels.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, left: i32, top: i32, color: Rgba<u8>) {
        let Some(bounds) = self.measure(text) else {
            return;
        };
        let dx = left - bounds.min_x;
        let dy = top - bounds.min_y;
        let color_alpha = color.0[3] as f32 / 255.0;

        for glyph in self.layout(text) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x + dx;
                let py = gy as i32 + bb.min.y + dy;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                let a = coverage.clamp(0.0, 1.0) * color_alpha;
                if a <= 0.0 {
                    return;
                }
                let dst = canvas.get_pixel_mut(px, py);
                let inv = 1.0 - a;
                for c in 0..3 {
                    dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
                }
                dst.0[3] = 255;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobooth_common::error::ErrorKind;
    use std::path::PathBuf;

    fn fixture_font() -> StampFont {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("fixtures")
            .join("fonts")
            .join("DejaVuSans.ttf");
        StampFont::load(&path, 20.0).expect("fixture font should load")
    }

    #[test]
    fn test_missing_font_is_resource_unavailable() {
        let result = StampFont::load(Path::new("/nonexistent/font.ttf"), 20.0);
        assert_eq!(
            result.err().map(|e| e.kind()),
            Some(ErrorKind::ResourceUnavailable)
        );
    }

    #[test]
    fn test_garbage_font_is_resource_unavailable() {
        let result = StampFont::from_bytes(b"not a font".to_vec(), 20.0);
        assert_eq!(
            result.err().map(|e| e.kind()),
            Some(ErrorKind::ResourceUnavailable)
        );
    }

    #[test]
    fn test_measure_date_is_reasonable() {
        let font = fixture_font();
        let bounds = font.measure("2024-03-07").unwrap();
        assert!(bounds.width() > 50 && bounds.width() < 200, "{bounds:?}");
        assert!(bounds.height() > 8 && bounds.height() <= 20, "{bounds:?}");
        assert!(font.measure("").is_none());
        assert!(font.measure("   ").is_none());
    }

    #[test]
    fn test_draw_stays_inside_bounds() {
        let font = fixture_font();
        let mut canvas = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
        let bounds = font.measure("2024-03-07").unwrap();
        font.draw(&mut canvas, "2024-03-07", 10, 20, Rgba([20, 20, 20, 255]));

        let mut inked = 0;
        for (x, y, p) in canvas.enumerate_pixels() {
            if p.0[0] < 255 {
                inked += 1;
                assert!(x >= 10 && x < 10 + bounds.width(), "x={x}");
                assert!(y >= 20 && y < 20 + bounds.height(), "y={y}");
            }
            assert_eq!(p.0[3], 255);
        }
        assert!(inked > 0);
    }
}
