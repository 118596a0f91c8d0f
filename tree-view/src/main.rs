//! Renders the holiday tree animation to a looping GIF, then previews it.
//!
//! The scene is built once from the configured style. Each frame is
//! composed by [`FrameRenderer`], rasterized by [`FrameRaster`] and
//! streamed into the GIF. Afterwards an optional [`viewer`] window keeps
//! playing the animation.

mod error;
mod fonts;
mod gif_writer;
mod raster;
mod viewer;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tree_core::{
    config::Config,
    font::TitleFont,
    frame::FrameRenderer,
    scene::{Scene, SceneBuilder},
    snow::{SNOW_COUNT, SnowField},
    style::{self, Palette},
};

use gif_writer::GifWriter;
use raster::{FrameRaster, TitleText};

/// Renders every frame of the animation into the configured GIF file.
///
/// Advances `snow` once per frame, so the caller sees the state after the
/// last exported frame.
fn export_gif(
    cfg: &Config,
    palette: &Palette,
    scene: &Scene,
    snow: &mut SnowField,
    title_font: Option<&TitleFont>,
) -> Result<()> {
    let viewport = cfg.viewport();
    let title = title_font
        .and_then(|f| fonts::parse_font(&f.data).map(|face| (face, f.points)))
        .map(|(face, points)| {
            TitleText::new(face, points, &viewport, &cfg.title, cfg.title_anchor, palette.text)
        });
    let raster = FrameRaster::new(viewport, palette.background, title);
    let renderer = FrameRenderer::new(cfg.camera);

    let mut writer = GifWriter::create(&cfg.output_path, raster.width(), raster.height(), cfg.fps)
        .with_context(|| format!("creating {}", cfg.output_path.display()))?;

    let total = cfg.total_frames();
    for frame in 0..total {
        let list = renderer.render(frame, scene, snow);
        let rgb = raster.render(&list)?;
        writer.write_rgb(&rgb)?;
        if frame % cfg.fps.max(1) == 0 {
            debug!("frame {}/{} ({} points)", frame + 1, total, list.len());
        }
    }

    info!("{} frames encoded", writer.frame_count());
    writer.finish()?;
    Ok(())
}

/// A preview that cannot open (e.g. no display) is only logged; the GIF
/// has been written by then.
fn preview_outcome(result: eframe::Result<()>) -> Result<()> {
    if let Err(e) = result {
        warn!("preview unavailable: {e}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cfg = Config::default();

    let style = style::lookup(&cfg.style_id);
    if style.id != cfg.style_id {
        warn!("unknown style {:?}, using {}", cfg.style_id, style.id);
    }
    info!("style {} ({})", style.id, style.name);
    let palette = style.resolve()?;

    let mut rng = rand::rng();
    let scene = SceneBuilder::new(&palette).build(&mut rng)?;
    let mut snow = SnowField::generate(SNOW_COUNT, palette.snow, &mut rng);

    let title_font = fonts::title_font(&cfg.font_path, &cfg.font_candidates);

    if cfg.save_gif {
        export_gif(&cfg, &palette, &scene, &mut snow, title_font.as_ref())?;
        println!("✓ GIF saved: {}", cfg.output_path.display());
    }

    if cfg.show_preview {
        preview_outcome(viewer::run(&cfg, &palette, scene, snow, title_font))?;
    }

    Ok(())
}
