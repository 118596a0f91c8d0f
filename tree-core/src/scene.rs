//! Static particle set of the tree.
//!
//! [`SceneBuilder`] samples every population of the model (trunk, layered
//! foliage, ornaments, ribbon spiral, star with its glow and the sparkle
//! bridging the cone tip and the star) into one flat list of
//! [`Particle`]s. Colors come from an already resolved [`Palette`]; only
//! placement is random, drawn from the caller's RNG.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use log::{debug, info};
use rand::{Rng, seq::IndexedRandom};

use crate::{
    color::Rgba,
    error::{SceneError, SceneResult},
    layer::{LAYER_COUNT, Layer, LayerFit, LayerShape, star_height},
    particle::{Particle, ParticleKind},
    style::Palette,
};

pub const TRUNK_COUNT: usize = 2500;
pub const TRUNK_BOTTOM: f32 = -0.8;
pub const TRUNK_TOP: f32 = -0.2;
pub const TRUNK_RADIUS: f32 = 0.28;
pub const TRUNK_SIZE: f32 = 18.0;

pub const FOLIAGE_TOTAL: usize = 8000;
/// The cone holds this much more foliage than a cylinder layer.
pub const CONE_FOLIAGE_FACTOR: f32 = 1.2;
pub const FOLIAGE_OPACITY: f32 = 0.9;
/// Share of the cone height, measured from the tip, blended towards the star color.
pub const TIP_BLEND_ZONE: f32 = 0.15;
pub const TIP_BLEND_MAX_CHANCE: f32 = 0.3;

pub const ORNAMENT_TOTAL: usize = 600;
/// Ornaments sit just inside the layer surface.
pub const ORNAMENT_SURFACE_RATIO: f32 = 0.98;

pub const RIBBON_TOTAL: usize = 1200;
/// Angle swept by one layer's ribbon segment.
pub const RIBBON_SWEEP: f32 = 1.5 * PI;
/// Distance the ribbon floats outside the foliage surface.
pub const RIBBON_OFFSET: f32 = 0.08;
pub const RIBBON_OPACITY: f32 = 0.6;

pub const TRANSITION_COUNT: usize = 50;
pub const TRANSITION_RADIUS: f32 = 0.02;

pub const STAR_SIZE: f32 = 500.0;
/// `(size, opacity)` of the glow points stacked on the star, outermost first.
pub const STAR_HALO: [(f32, f32); 3] = [(800.0, 0.2), (500.0, 0.3), (300.0, 0.4)];

/// Foliage points per cylinder layer.
pub fn foliage_per_layer() -> usize {
    FOLIAGE_TOTAL / LAYER_COUNT
}

/// Foliage points in the top cone.
pub fn foliage_in_cone() -> usize {
    (foliage_per_layer() as f32 * CONE_FOLIAGE_FACTOR) as usize
}

/// The built particle table.
#[derive(Debug, Default)]
pub struct Scene {
    pub particles: Vec<Particle>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles of the given kind.
    pub fn count(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }
}

/// Samples the static tree model for one palette.
pub struct SceneBuilder<'a> {
    palette: &'a Palette,
}

/// Picks one color uniformly.
fn pick(colors: &[Rgba], which: &'static str, rng: &mut impl Rng) -> SceneResult<Rgba> {
    colors
        .choose(rng)
        .copied()
        .ok_or(SceneError::EmptyPalette(which))
}

/// Point on the circle of radius `r` at angle `theta`, lifted to height `h`.
#[inline]
fn on_ring(r: f32, theta: f32, h: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), h, r * theta.sin())
}

/// `n` evenly spaced values from `start` to `end`, both included.
fn linspace(start: f32, end: f32, n: usize) -> impl Iterator<Item = f32> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f32
    } else {
        0.0
    };
    (0..n).map(move |i| start + step * i as f32)
}

impl<'a> SceneBuilder<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Number of particles [`build`](Self::build) produces for this palette.
    pub fn particle_count(&self) -> usize {
        let ribbon = if self.palette.ribbon.is_some() {
            RIBBON_TOTAL
        } else {
            0
        };
        TRUNK_COUNT
            + foliage_per_layer() * (LAYER_COUNT - 1)
            + foliage_in_cone()
            + ORNAMENT_TOTAL / LAYER_COUNT * LAYER_COUNT
            + ribbon
            + TRANSITION_COUNT
            + 1
            + STAR_HALO.len()
    }

    /// Builds the full particle set.
    ///
    /// Populations are appended in a fixed order: trunk, foliage,
    /// ornaments, ribbon (only when the palette has one), transition
    /// sparkle, star apex and halo.
    ///
    /// ### Parameters
    /// - `rng` - Source of all placement randomness. Pass a seeded RNG to
    ///   get a reproducible scene.
    ///
    /// ### Returns
    /// The [`Scene`], or [`SceneError::EmptyPalette`] if a color list that
    /// must be sampled is empty.
    pub fn build(&self, rng: &mut impl Rng) -> SceneResult<Scene> {
        let mut particles = Vec::with_capacity(self.particle_count());

        self.trunk(rng, &mut particles);
        self.foliage(rng, &mut particles)?;
        self.ornaments(rng, &mut particles)?;
        self.ribbon(&mut particles);
        self.transition(rng, &mut particles)?;
        self.star(&mut particles);

        let scene = Scene { particles };
        for kind in ParticleKind::ALL {
            debug!("{:?}: {} particles", kind, scene.count(kind));
        }
        info!("scene built with {} particles", scene.len());
        Ok(scene)
    }

    fn trunk(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) {
        for _ in 0..TRUNK_COUNT {
            let h = rng.random_range(TRUNK_BOTTOM..TRUNK_TOP);
            let r = rng.random_range(0.0..TRUNK_RADIUS);
            let theta = rng.random_range(0.0..TAU);
            out.push(Particle::new(
                on_ring(r, theta, h),
                self.palette.trunk,
                1.0,
                TRUNK_SIZE,
                ParticleKind::Trunk,
            ));
        }
    }

    /// Layered foliage.
    ///
    /// Radii are biased towards the surface with `sqrt(uniform)`; near the
    /// cone tip a growing share of points takes the star color.
    fn foliage(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) -> SceneResult<()> {
        for layer in Layer::all(LayerFit::Foliage) {
            let (count, inner) = match layer.shape {
                LayerShape::Cone => (foliage_in_cone(), 0.05),
                LayerShape::Cylinder => (foliage_per_layer(), 0.1),
            };

            for _ in 0..count {
                let h = rng.random_range(layer.h_min..layer.h_max);
                let rel = layer.rel_height(h);
                let r = layer.surface_radius(h) * rng.random_range(inner..1.0f32).sqrt();

                let tip = 1.0 - TIP_BLEND_ZONE;
                let color = if layer.shape == LayerShape::Cone
                    && rel > tip
                    && rng.random::<f32>() < (rel - tip) / TIP_BLEND_ZONE * TIP_BLEND_MAX_CHANCE
                {
                    self.palette.star
                } else {
                    pick(&self.palette.tree, "tree", rng)?
                };

                let theta = rng.random_range(0.0..TAU);
                out.push(Particle::new(
                    on_ring(r, theta, h),
                    color,
                    FOLIAGE_OPACITY,
                    rng.random_range(5.0..15.0),
                    ParticleKind::Foliage,
                ));
            }
        }
        Ok(())
    }

    fn ornaments(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) -> SceneResult<()> {
        let per_layer = ORNAMENT_TOTAL / LAYER_COUNT;
        for layer in Layer::all(LayerFit::Ornament) {
            for _ in 0..per_layer {
                let h = rng.random_range(layer.h_min..layer.h_max);
                let r = layer.surface_radius(h) * ORNAMENT_SURFACE_RATIO;
                let theta = rng.random_range(0.0..TAU);
                out.push(Particle::new(
                    on_ring(r, theta, h),
                    pick(&self.palette.ornaments, "ornaments", rng)?,
                    1.0,
                    rng.random_range(22.0..45.0),
                    ParticleKind::Ornament,
                ));
            }
        }
        Ok(())
    }

    /// Ribbon spiral, one segment per layer running from the top of the
    /// layer down to its bottom. Fully deterministic.
    fn ribbon(&self, out: &mut Vec<Particle>) {
        let Some(ribbon) = self.palette.ribbon else {
            return;
        };
        let per_layer = RIBBON_TOTAL / LAYER_COUNT;

        for layer in Layer::all(LayerFit::Ribbon) {
            let heights = linspace(layer.h_max, layer.h_min, per_layer);
            let angles = linspace(0.0, RIBBON_SWEEP, per_layer).map(|t| t + layer.ribbon_phase());

            for (h, t) in heights.zip(angles) {
                let r = layer.surface_radius(h) + RIBBON_OFFSET;
                out.push(Particle::new(
                    on_ring(r, t, h),
                    ribbon.color,
                    RIBBON_OPACITY,
                    8.0 * ribbon.width,
                    ParticleKind::Ribbon,
                ));
            }
        }
    }

    /// Small sparkle between the cone tip and the star. Both the chance of
    /// taking the star color and the opacity grow towards the star.
    fn transition(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) -> SceneResult<()> {
        let star_h = star_height();
        let (lo, hi) = (star_h - 0.02, star_h - 0.005);

        for _ in 0..TRANSITION_COUNT {
            let h = rng.random_range(lo..hi);
            let rel = (h - lo) / (hi - lo);
            let r = TRANSITION_RADIUS * (1.0 - rel) * rng.random_range(0.1..1.0f32).sqrt();
            let theta = rng.random_range(0.0..TAU);

            let color = if rng.random::<f32>() < rel {
                self.palette.star
            } else {
                pick(&self.palette.tree, "tree", rng)?
            };

            out.push(Particle::new(
                on_ring(r, theta, h),
                color,
                0.7 + rel * 0.3,
                rng.random_range(3.0..8.0),
                ParticleKind::Transition,
            ));
        }
        Ok(())
    }

    fn star(&self, out: &mut Vec<Particle>) {
        let pos = Vec3::new(0.0, star_height(), 0.0);
        out.push(Particle::new(
            pos,
            self.palette.star,
            1.0,
            STAR_SIZE,
            ParticleKind::Star,
        ));
        for (size, opacity) in STAR_HALO {
            out.push(Particle::new(
                pos,
                self.palette.star,
                opacity,
                size,
                ParticleKind::Halo,
            ));
        }
    }
}
