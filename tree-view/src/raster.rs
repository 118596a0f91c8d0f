//! Software rasterization of draw lists into RGB frames.
//!
//! Round points and star markers are painted with plotters on a bitmap
//! backend; the title is then blended on top glyph by glyph.

use std::f32::consts::{FRAC_PI_2, PI};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use glam::Vec2;
use plotters::prelude::*;
use tree_core::{color::Rgba, frame::DrawList, viewport::Viewport};

use crate::error::{RenderError, RenderResult};

/// Inner to outer radius ratio of the five-pointed star marker.
pub const STAR_INNER_RATIO: f32 = 0.381966;

/// Outline of a five-pointed star pointing up in pixel space (y down).
pub fn star_outline(center: Vec2, outer: f32) -> [Vec2; 10] {
    let inner = outer * STAR_INNER_RATIO;
    std::array::from_fn(|k| {
        let angle = -FRAC_PI_2 + k as f32 * PI / 5.0;
        let r = if k % 2 == 0 { outer } else { inner };
        center + Vec2::new(angle.cos(), angle.sin()) * r
    })
}

fn to_plotters(c: Rgba) -> RGBAColor {
    let [r, g, b, _] = c.to_rgba8();
    RGBAColor(r, g, b, c.a.clamp(0.0, 1.0) as f64)
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Title text laid out once and blended onto every frame.
pub struct TitleText {
    font: FontVec,
    scale: PxScale,
    text: String,
    color: Rgba,
    /// Pixel position of the horizontal center of the baseline.
    anchor: Vec2,
}

impl TitleText {
    /// ### Parameters
    /// - `font` - Parsed title face.
    /// - `points` - Font size in points.
    /// - `viewport` - Canvas mapping used to place and size the text.
    /// - `anchor` - View-plane position of the baseline center.
    pub fn new(
        font: FontVec,
        points: f32,
        viewport: &Viewport,
        text: &str,
        anchor: Vec2,
        color: Rgba,
    ) -> Self {
        Self {
            font,
            scale: PxScale::from(viewport.points_to_pixels(points)),
            text: text.to_string(),
            color,
            anchor: viewport.to_pixel(anchor),
        }
    }

    fn advance_width(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut prev = None;
        for c in self.text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Blends the text into an RGB buffer of `width` x `height` pixels.
    pub fn draw(&self, rgb: &mut [u8], width: u32, height: u32) {
        let scaled = self.font.as_scaled(self.scale);
        let [r, g, b, _] = self.color.to_rgba8();
        let mut x = self.anchor.x - self.advance_width() / 2.0;
        let mut prev = None;

        for c in self.text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                x += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(x, self.anchor.y));
            x += scaled.h_advance(id);
            prev = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                let i = (py as usize * width as usize + px as usize) * 3;
                blend(&mut rgb[i..i + 3], [r, g, b], coverage * self.color.a);
            });
        }
    }
}

/// Source-over blend of one opaque RGB pixel.
fn blend(dst: &mut [u8], src: [u8; 3], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    for (d, s) in dst.iter_mut().zip(src) {
        *d = (*d as f32 * (1.0 - a) + s as f32 * a).round() as u8;
    }
}

/// Paints draw lists onto a fixed-size canvas.
pub struct FrameRaster {
    viewport: Viewport,
    background: Rgba,
    title: Option<TitleText>,
}

impl FrameRaster {
    pub fn new(viewport: Viewport, background: Rgba, title: Option<TitleText>) -> Self {
        Self {
            viewport,
            background,
            title,
        }
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Renders one frame.
    ///
    /// Paint order is background, round points in list order, star
    /// markers, title.
    ///
    /// ### Returns
    /// A row-major RGB buffer of `width * height * 3` bytes.
    pub fn render(&self, list: &DrawList) -> RenderResult<Vec<u8>> {
        let (w, h) = (self.width(), self.height());
        let mut buffer = vec![0u8; (w * h * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            let [br, bg, bb, _] = self.background.to_rgba8();
            root.fill(&RGBColor(br, bg, bb)).map_err(drawing_error)?;

            for p in list.regular() {
                let center = self.viewport.to_pixel(p.screen);
                let radius = self.viewport.marker_radius(p.size).round().max(1.0) as u32;
                root.draw(&Circle::new(
                    (center.x.round() as i32, center.y.round() as i32),
                    radius,
                    to_plotters(p.color).filled(),
                ))
                .map_err(drawing_error)?;
            }

            for p in list.stars() {
                let center = self.viewport.to_pixel(p.screen);
                let outline = star_outline(center, self.viewport.marker_radius(p.size))
                    .iter()
                    .map(|v| (v.x.round() as i32, v.y.round() as i32))
                    .collect::<Vec<_>>();
                root.draw(&Polygon::new(outline, to_plotters(p.color).filled()))
                    .map_err(drawing_error)?;
            }

            root.present().map_err(drawing_error)?;
        }

        if let Some(title) = &self.title {
            title.draw(&mut buffer, w, h);
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tree_core::{
        config::Config,
        frame::FrameRenderer,
        particle::{Particle, ParticleKind},
        scene::Scene,
        snow::SnowField,
    };

    fn pixel(buf: &[u8], vp: &Viewport, at: Vec2) -> [u8; 3] {
        let p = vp.to_pixel(at);
        let i = (p.y as usize * vp.width as usize + p.x as usize) * 3;
        [buf[i], buf[i + 1], buf[i + 2]]
    }

    fn small_viewport() -> Viewport {
        Viewport {
            width: 200,
            height: 160,
            ..Config::default().viewport()
        }
    }

    fn list_of(particles: Vec<Particle>) -> DrawList {
        FrameRenderer::default().compose(0, &Scene { particles }, &SnowField::default())
    }

    #[test]
    fn empty_frame_is_background() {
        let vp = small_viewport();
        let bg = Rgba::parse("#120508").unwrap();
        let buf = FrameRaster::new(vp, bg, None).render(&DrawList::default()).unwrap();

        assert_eq!(buf.len(), 200 * 160 * 3);
        assert!(buf.chunks(3).all(|px| px == [0x12, 0x05, 0x08]));
    }

    #[test]
    fn opaque_point_covers_its_center() {
        let vp = small_viewport();
        let red = Rgba::parse("#FF0000").unwrap();
        let list = list_of(vec![Particle::new(
            Vec3::ZERO,
            red,
            1.0,
            5000.0,
            ParticleKind::Ornament,
        )]);

        let buf = FrameRaster::new(vp, Rgba::BLACK, None).render(&list).unwrap();
        assert_eq!(pixel(&buf, &vp, Vec2::ZERO), [255, 0, 0]);
        assert_eq!(pixel(&buf, &vp, Vec2::new(1.5, -0.85)), [0, 0, 0]);
    }

    #[test]
    fn star_is_painted_over_nearer_points() {
        let vp = small_viewport();
        let gold = Rgba::parse("#FFD700").unwrap();
        let list = list_of(vec![
            Particle::new(Vec3::new(0.0, 1.0, -1.0), gold, 1.0, 3000.0, ParticleKind::Star),
            Particle::new(Vec3::new(0.0, 1.0, 1.0), Rgba::WHITE, 1.0, 3000.0, ParticleKind::Foliage),
        ]);

        let buf = FrameRaster::new(vp, Rgba::BLACK, None).render(&list).unwrap();
        let star_center = list.stars()[0].screen;
        assert_eq!(pixel(&buf, &vp, star_center), [255, 215, 0]);
    }

    #[test]
    fn star_outline_alternates_radii() {
        let c = Vec2::new(10.0, 20.0);
        let outline = star_outline(c, 8.0);

        assert!((outline[0] - Vec2::new(10.0, 12.0)).length() < 1e-4);
        for (k, v) in outline.iter().enumerate() {
            let expected = if k % 2 == 0 { 8.0 } else { 8.0 * STAR_INNER_RATIO };
            assert!(((*v - c).length() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn blend_mixes_by_alpha() {
        let mut px = [0u8, 100, 200];
        blend(&mut px, [255, 100, 0], 0.5);
        assert_eq!(px, [128, 100, 100]);

        let mut px = [1u8, 2, 3];
        blend(&mut px, [9, 9, 9], 0.0);
        assert_eq!(px, [1, 2, 3]);
    }
}
