//! Run configuration.
//!
//! Everything here is fixed for a run; [`Config::default`] holds the values
//! the binary uses.

use std::path::PathBuf;

use glam::Vec2;

use crate::{camera::OrbitCamera, types::FrameIndex, viewport::Viewport};

/// Frames rendered when no duration is configured.
pub const DEFAULT_FRAME_COUNT: FrameIndex = 300;

#[derive(Clone, Debug)]
pub struct Config {
    pub style_id: String,

    pub save_gif: bool,
    pub output_path: PathBuf,
    pub fps: u32,
    /// Animation length in seconds; `None` renders [`DEFAULT_FRAME_COUNT`].
    pub duration_secs: Option<u32>,

    pub canvas_width: u32,
    pub canvas_height: u32,
    pub dpi: f32,
    /// Visible view-plane window `(min, max)` per axis.
    pub view_x: (f32, f32),
    pub view_y: (f32, f32),

    pub camera: OrbitCamera,

    pub title: String,
    /// Title anchor in view-plane coordinates: horizontal center, baseline.
    pub title_anchor: Vec2,
    pub font_path: PathBuf,
    pub font_candidates: Vec<&'static str>,

    pub show_preview: bool,
    pub preview_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style_id: "6".into(),
            save_gif: true,
            output_path: PathBuf::from("christmas_tree.gif"),
            fps: 15,
            duration_secs: Some(10),
            canvas_width: 1000,
            canvas_height: 800,
            dpi: 100.0,
            view_x: (-1.6, 1.6),
            view_y: (-0.9, 1.65),
            camera: OrbitCamera::default(),
            title: "Merry Christmas".into(),
            title_anchor: Vec2::new(0.0, 1.05),
            font_path: PathBuf::from("GreatVibes-Regular.ttf"),
            font_candidates: vec!["Brush Script MT", "Comic Sans MS", "Segoe Print", "Ink Free"],
            show_preview: true,
            preview_interval_ms: 30,
        }
    }
}

impl Config {
    /// Number of frames in the exported animation.
    pub fn total_frames(&self) -> FrameIndex {
        match self.duration_secs {
            Some(secs) => self.fps * secs,
            None => DEFAULT_FRAME_COUNT,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            x_min: self.view_x.0,
            x_max: self.view_x.1,
            y_min: self.view_y.0,
            y_max: self.view_y.1,
            width: self.canvas_width,
            height: self.canvas_height,
            dpi: self.dpi,
        }
    }
}
