//! Fixed print geometry.
//!
//! Downstream print layout assumes these exact numbers. Inputs of any
//! size are force-resized into them; aspect ratio is not preserved.

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1205;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 1795;

/// Size every photo is resized to.
pub const PHOTO_WIDTH: u32 = 533;
pub const PHOTO_HEIGHT: u32 = 698;

/// Number of photos in a composite.
pub const PHOTO_COUNT: usize = 4;

/// Slot origins as fractions of the canvas, in selection order:
/// top-left, top-right, bottom-left, bottom-right.
pub const SLOT_FRACTIONS: [(f64, f64); PHOTO_COUNT] = [
    (0.0352, 0.0261),
    (0.5232, 0.0261),
    (0.0352, 0.4373),
    (0.5232, 0.4373),
];

/// Edge length of the embedded QR code.
pub const QR_SIZE: u32 = 90;
pub const QR_MARGIN_RIGHT: u32 = 36;
pub const QR_MARGIN_BOTTOM: u32 = 24;

/// Gap between the bottom of the date text and the canvas edge.
pub const DATE_MARGIN_BOTTOM: u32 = 30;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Top-left corner of a photo slot, truncated to whole pixels.
pub fn slot_origin(slot: usize) -> (u32, u32) {
    let (fx, fy) = SLOT_FRACTIONS[slot];
    (
        (CANVAS_WIDTH as f64 * fx) as u32,
        (CANVAS_HEIGHT as f64 * fy) as u32,
    )
}

/// Pixel rectangle covered by a photo slot.
pub fn slot_rect(slot: usize) -> Rect {
    let (x, y) = slot_origin(slot);
    Rect {
        x,
        y,
        width: PHOTO_WIDTH,
        height: PHOTO_HEIGHT,
    }
}

/// Pixel rectangle covered by the QR code.
pub fn qr_rect() -> Rect {
    Rect {
        x: CANVAS_WIDTH - QR_SIZE - QR_MARGIN_RIGHT,
        y: CANVAS_HEIGHT - QR_SIZE - QR_MARGIN_BOTTOM,
        width: QR_SIZE,
        height: QR_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_origins_truncate() {
        assert_eq!(slot_origin(0), (42, 46));
        assert_eq!(slot_origin(1), (630, 46));
        assert_eq!(slot_origin(2), (42, 784));
        assert_eq!(slot_origin(3), (630, 784));
    }

    #[test]
    fn test_slots_inside_canvas_and_disjoint() {
        for a in 0..PHOTO_COUNT {
            let ra = slot_rect(a);
            assert!(ra.right() <= CANVAS_WIDTH);
            assert!(ra.bottom() <= CANVAS_HEIGHT);
            for b in (a + 1)..PHOTO_COUNT {
                assert!(!ra.intersects(&slot_rect(b)), "slots {a} and {b} overlap");
            }
        }
    }

    #[test]
    fn test_qr_in_bottom_right_clear_of_photos() {
        let qr = qr_rect();
        assert_eq!((qr.x, qr.y), (1079, 1681));
        assert_eq!(qr.right(), CANVAS_WIDTH - QR_MARGIN_RIGHT);
        for slot in 0..PHOTO_COUNT {
            assert!(!qr.intersects(&slot_rect(slot)));
        }
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect {
            x: 10,
            y: 10,
            width: 5,
            height: 5,
        };
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 14));
        assert!(!r.contains(9, 12));
    }
}
