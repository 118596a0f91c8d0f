//! Looping preview window built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the live animation state
//! (scene, snow, frame clock) and implements [`eframe::App`] to paint each
//! draw list with the egui painter. The window has no controls; it just
//! plays the animation until closed.

use std::sync::Arc;

use eframe::App;
use glam::Vec2;
use tree_core::{
    color::Rgba,
    config::Config,
    font::TitleFont,
    frame::{DrawList, FrameRenderer},
    scene::Scene,
    snow::SnowField,
    style::Palette,
    types::FrameIndex,
    viewport::Viewport,
};

use crate::raster::star_outline;

/// Name under which the title font is registered with egui.
const TITLE_FONT: &str = "title";

/// Title overlay, drawn with the face registered as [`TITLE_FONT`].
struct Title {
    text: String,
    anchor: Vec2,
    color: egui::Color32,
    points: f32,
}

/// Main application state for the preview window.
///
/// ### Fields
/// - `scene` - Static tree particles.
/// - `snow` - Live snow state, advanced once per animation tick.
/// - `renderer` - Frame composer shared with the GIF export.
/// - `viewport` - Canvas mapping; the window rect is scaled from it.
///
/// - `frame` - Index of the frame currently shown.
/// - `total_frames` - The frame index wraps back to `0` after this many.
/// - `list` - Draw list of the current frame.
///
/// - `step_interval` - Seconds between animation ticks.
/// - `last_step_time` - Time stamp of the last tick (egui time).
pub struct Viewer {
    scene: Scene,
    snow: SnowField,
    renderer: FrameRenderer,
    viewport: Viewport,
    background: egui::Color32,
    title: Option<Title>,

    frame: FrameIndex,
    total_frames: FrameIndex,
    list: DrawList,

    step_interval: f64,
    last_step_time: f64,
}

fn color32(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = c.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Viewer {
    /// Creates a viewer that starts at frame `0` with the given snow state.
    ///
    /// ### Parameters
    /// - `cfg` - Run configuration (canvas, title, timing).
    /// - `palette` - Resolved style colors.
    /// - `scene` - Particles built for this run.
    /// - `snow` - Snow state, continuing wherever the export left it.
    /// - `title_points` - Title size in points, or `None` when no title
    ///   font resolved and the title is left out, as in the GIF.
    pub fn new(
        cfg: &Config,
        palette: &Palette,
        scene: Scene,
        snow: SnowField,
        title_points: Option<f32>,
    ) -> Self {
        let renderer = FrameRenderer::new(cfg.camera);
        let list = renderer.compose(0, &scene, &snow);

        Self {
            scene,
            snow,
            renderer,
            viewport: cfg.viewport(),
            background: color32(palette.background),
            title: title_points.map(|points| Title {
                text: cfg.title.clone(),
                anchor: cfg.title_anchor,
                color: color32(palette.text),
                points,
            }),
            frame: 0,
            total_frames: cfg.total_frames().max(1),
            list,
            step_interval: cfg.preview_interval_ms as f64 / 1000.0,
            last_step_time: 0.0,
        }
    }

    /// Advances to the next frame, wrapping after `total_frames`.
    ///
    /// Snow keeps falling across the wrap; only the camera angle restarts.
    fn step_once(&mut self) {
        self.list = self.renderer.render(self.frame, &self.scene, &mut self.snow);
        self.frame = (self.frame + 1) % self.total_frames;
    }

    /// Converts a view-plane position to screen-space.
    ///
    /// The canvas described by `viewport` is stretched over `rect`, with
    /// y pointing up in view space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let px = self.viewport.to_pixel(p);
        egui::pos2(
            rect.min.x + px.x * rect.width() / self.viewport.width as f32,
            rect.min.y + px.y * rect.height() / self.viewport.height as f32,
        )
    }

    /// Screen points per canvas pixel.
    fn pixel_scale(&self, rect: egui::Rect) -> f32 {
        rect.height() / self.viewport.height as f32
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.rect_filled(rect, 0.0, self.background);
        let scale = self.pixel_scale(rect);

        for p in self.list.regular() {
            let r = (self.viewport.marker_radius(p.size) * scale).max(0.5);
            painter.circle_filled(self.world_to_screen(p.screen, rect), r, color32(p.color));
        }

        // A star is concave, so it is painted as ten convex wedges.
        for p in self.list.stars() {
            let center = self.world_to_screen(p.screen, rect);
            let c = Vec2::new(center.x, center.y);
            let outline = star_outline(c, self.viewport.marker_radius(p.size) * scale);
            let fill = color32(p.color);
            for k in 0..outline.len() {
                let a = outline[k];
                let b = outline[(k + 1) % outline.len()];
                painter.add(egui::Shape::convex_polygon(
                    vec![center, egui::pos2(a.x, a.y), egui::pos2(b.x, b.y)],
                    fill,
                    egui::Stroke::NONE,
                ));
            }
        }

        if let Some(title) = &self.title {
            let size = self.viewport.points_to_pixels(title.points) * scale;
            painter.text(
                self.world_to_screen(title.anchor, rect),
                egui::Align2::CENTER_BOTTOM,
                &title.text,
                egui::FontId::new(size, egui::FontFamily::Name(TITLE_FONT.into())),
                title.color,
            );
        }
    }
}

impl App for Viewer {
    /// eframe callback: ticks the animation on schedule and paints it.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        if now - self.last_step_time >= self.step_interval {
            self.step_once();
            self.last_step_time = now;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.background))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let painter = ui.painter_at(rect);
                self.paint(&painter, rect);
            });

        ctx.request_repaint();
    }
}

/// Registers the title face with egui.
fn install_title_font(ctx: &egui::Context, font: &TitleFont) {
    let mut fonts = egui::FontDefinitions::default();
    let mut data = egui::FontData::from_owned(font.data.bytes.clone());
    data.index = font.data.index;
    fonts.font_data.insert(TITLE_FONT.to_owned(), Arc::new(data));
    fonts.families.insert(
        egui::FontFamily::Name(TITLE_FONT.into()),
        vec![TITLE_FONT.to_owned()],
    );
    ctx.set_fonts(fonts);
}

/// Opens the preview window and blocks until it is closed.
pub fn run(
    cfg: &Config,
    palette: &Palette,
    scene: Scene,
    snow: SnowField,
    title_font: Option<TitleFont>,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            cfg.canvas_width as f32,
            cfg.canvas_height as f32,
        ]),
        ..Default::default()
    };

    let points = title_font.as_ref().map(|f| f.points);
    let viewer = Viewer::new(cfg, palette, scene, snow, points);

    eframe::run_native(
        "Holiday Tree",
        options,
        Box::new(move |cc| {
            if let Some(font) = &title_font {
                install_title_font(&cc.egui_ctx, font);
            }
            Ok(Box::new(viewer))
        }),
    )
}
