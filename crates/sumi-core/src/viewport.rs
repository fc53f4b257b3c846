//! Zoom, pan, and fitting the paper into its container.

/// Zoom step for the zoom-in control.
pub const ZOOM_IN_FACTOR: f32 = 1.2;
/// Zoom step for the zoom-out control.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

const CONTAINER_PADDING: f32 = 40.0;
const MAX_WIDTH: f32 = 1200.0;
const MAX_HEIGHT: f32 = 800.0;
const ASPECT: f32 = 4.0 / 3.0;

/// The on-screen canvas: pixel size plus zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Multiply the zoom level by `factor`.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom *= factor;
        }
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Map a pointer position on the canvas element into scene coordinates.
    pub fn screen_to_scene(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Resize to the largest 4:3 box that fits the container, after
    /// padding and within the 1200 × 800 cap. Returns the new size.
    pub fn fit(&mut self, container_width: f32, container_height: f32) -> (f32, f32) {
        let max_w = (container_width - CONTAINER_PADDING).min(MAX_WIDTH).max(1.0);
        let max_h = (container_height - CONTAINER_PADDING).min(MAX_HEIGHT).max(1.0);

        let (w, h) = if max_w / max_h > ASPECT {
            (max_h * ASPECT, max_h)
        } else {
            (max_w, max_w / ASPECT)
        };
        self.width = w;
        self.height = h;
        (w, h)
    }
}
