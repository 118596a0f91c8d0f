use glam::Vec2;

/// Points per inch; marker sizes are given in points².
const POINTS_PER_INCH: f32 = 72.0;

/// Maps view-plane coordinates onto a pixel canvas.
///
/// The visible window `[x_min, x_max] x [y_min, y_max]` is stretched over
/// the whole canvas, with y pointing up in view space and down in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub width: u32,
    pub height: u32,
    pub dpi: f32,
}

impl Viewport {
    pub fn to_pixel(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.x_min) / (self.x_max - self.x_min) * self.width as f32,
            (self.y_max - p.y) / (self.y_max - self.y_min) * self.height as f32,
        )
    }

    /// Pixel radius of a marker whose area is `size` points².
    pub fn marker_radius(&self, size: f32) -> f32 {
        size.max(0.0).sqrt() * 0.5 * self.points_to_pixels(1.0)
    }

    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / POINTS_PER_INCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            x_min: -1.6,
            x_max: 1.6,
            y_min: -0.9,
            y_max: 1.65,
            width: 1000,
            height: 800,
            dpi: 100.0,
        }
    }

    #[test]
    fn corners_map_to_canvas_corners() {
        let vp = viewport();
        let tl = vp.to_pixel(Vec2::new(-1.6, 1.65));
        let br = vp.to_pixel(Vec2::new(1.6, -0.9));
        assert!(tl.abs().max_element() < 1e-3);
        assert!((br - Vec2::new(1000.0, 800.0)).abs().max_element() < 1e-3);
    }

    #[test]
    fn marker_radius_follows_area() {
        let vp = viewport();
        // 72² pt² is a one inch wide marker: 100 px across.
        assert!((vp.marker_radius(72.0 * 72.0) - 50.0).abs() < 1e-3);
        assert_eq!(vp.marker_radius(-3.0), 0.0);
    }
}
