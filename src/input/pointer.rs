use glam::Vec2;

/// Latest pointer position as a normalized device coordinate.
///
/// A single-writer value cell: cursor events overwrite it in place, and
/// the per-frame hover pass reads whatever is current. No history is
/// kept; only the newest position ever matters to hit-testing.
///
/// NDC space is (-1, -1) at the bottom-left of the viewport, (1, 1) at
/// the top-right. Before the first cursor event the cell reads (0, 0),
/// the viewport center.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    ndc: Vec2,
    last_pixel: Option<Vec2>,
    width: f32,
    height: f32,
}

impl PointerState {
    /// Cell for a viewport of the given physical size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            ndc: Vec2::ZERO,
            last_pixel: None,
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// Overwrite with a cursor position in physical pixels, y-down from
    /// the top-left corner.
    pub fn set_pixel(&mut self, x: f32, y: f32) {
        self.last_pixel = Some(Vec2::new(x, y));
        self.ndc = Vec2::new(
            x / self.width * 2.0 - 1.0,
            1.0 - y / self.height * 2.0,
        );
    }

    /// Track a viewport resize, remapping the last known pixel into the
    /// new NDC space.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
        if let Some(pixel) = self.last_pixel {
            self.set_pixel(pixel.x, pixel.y);
        }
    }

    /// Current normalized device coordinate.
    #[must_use]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        let mut pointer = PointerState::new(800, 600);

        pointer.set_pixel(0.0, 0.0);
        assert_eq!(pointer.ndc(), Vec2::new(-1.0, 1.0));

        pointer.set_pixel(800.0, 600.0);
        assert_eq!(pointer.ndc(), Vec2::new(1.0, -1.0));

        pointer.set_pixel(400.0, 300.0);
        assert_eq!(pointer.ndc(), Vec2::ZERO);
    }

    #[test]
    fn starts_at_center_until_first_event() {
        let pointer = PointerState::new(1024, 768);
        assert_eq!(pointer.ndc(), Vec2::ZERO);
    }

    #[test]
    fn newest_write_wins() {
        let mut pointer = PointerState::new(800, 600);
        pointer.set_pixel(10.0, 10.0);
        pointer.set_pixel(790.0, 10.0);
        let ndc = pointer.ndc();
        assert!(ndc.x > 0.9);
        assert!(ndc.y > 0.9);
    }

    #[test]
    fn resize_remaps_last_pixel() {
        let mut pointer = PointerState::new(800, 600);
        pointer.set_pixel(400.0, 300.0);
        assert_eq!(pointer.ndc(), Vec2::ZERO);

        // Same pixel sits in the top-left quadrant of a larger viewport.
        pointer.resize(1600, 1200);
        assert_eq!(pointer.ndc(), Vec2::new(-0.5, 0.5));
    }
}
