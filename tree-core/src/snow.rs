//! Falling snow.
//!
//! Flakes are scattered once in a box around the tree. Each frame every
//! flake drops by its own speed and, once below [`SNOW_FLOOR`], reappears
//! at [`SNOW_CEILING`]. The wrap is a plain reset with no easing, so the
//! fall loops forever at constant cost per flake.

use glam::Vec3;
use rand::Rng;

use crate::{color::Rgba, particle::SnowParticle};

pub const SNOW_COUNT: usize = 500;
pub const SNOW_FLOOR: f32 = -1.2;
pub const SNOW_CEILING: f32 = 1.6;
/// Half extent of the spawn box on the x and z axes.
pub const SNOW_HALF_WIDTH: f32 = 2.5;
pub const SNOW_SPAWN_BOTTOM: f32 = -1.0;
pub const SNOW_SPAWN_TOP: f32 = 1.5;

/// Height of a flake after one frame of falling.
///
/// ### Parameters
/// - `y` - Current height.
/// - `speed` - Height lost per frame.
///
/// ### Returns
/// `y - speed`, or [`SNOW_CEILING`] if that drops below [`SNOW_FLOOR`].
#[inline]
pub fn fall(y: f32, speed: f32) -> f32 {
    let y = y - speed;
    if y < SNOW_FLOOR { SNOW_CEILING } else { y }
}

/// The snow particles of one run. Owned by whoever drives the frames.
#[derive(Clone, Debug, Default)]
pub struct SnowField {
    pub flakes: Vec<SnowParticle>,
}

impl SnowField {
    /// Scatters `count` flakes uniformly in the spawn box.
    pub fn generate(count: usize, color: Rgba, rng: &mut impl Rng) -> Self {
        let flakes = (0..count)
            .map(|_| {
                let pos = Vec3::new(
                    rng.random_range(-SNOW_HALF_WIDTH..SNOW_HALF_WIDTH),
                    rng.random_range(SNOW_SPAWN_BOTTOM..SNOW_SPAWN_TOP),
                    rng.random_range(-SNOW_HALF_WIDTH..SNOW_HALF_WIDTH),
                );
                SnowParticle {
                    pos,
                    speed: rng.random_range(0.02..0.05),
                    color: color.with_alpha(rng.random_range(0.4..0.8)),
                    size: rng.random_range(4.0..9.0),
                }
            })
            .collect();

        Self { flakes }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    /// Moves every flake down by one frame, wrapping at the floor.
    pub fn advance(&mut self) {
        for flake in &mut self.flakes {
            flake.pos.y = fall(flake.pos.y, flake.speed);
        }
    }
}
