//! Per-frame composition of the animation.
//!
//! One frame is produced in a fixed order:
//! 1. [`SnowField::advance`] drops every flake, wrapping at the floor.
//! 2. The yaw for the frame index is computed by the [`OrbitCamera`].
//! 3. Every tree particle is rotated and projected.
//! 4. Every flake is rotated and projected; flakes behind the camera
//!    (non-positive depth factor) are dropped for this frame.
//! 5. All points are sorted by rotated depth, farthest first.
//! 6. Star-marker points are moved after every other point, keeping
//!    their relative order.
//!
//! The result is a [`DrawList`] ordered back to front: a backend paints
//! it in slice order, then draws the title on top.

use glam::Vec2;
use log::trace;

use crate::{
    camera::{OrbitCamera, Yaw},
    color::Rgba,
    scene::Scene,
    snow::SnowField,
    types::FrameIndex,
};

/// A projected point ready to be painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPoint {
    pub screen: Vec2,
    /// Rotated z; larger is nearer the camera.
    pub depth: f32,
    pub color: Rgba,
    pub size: f32,
    pub star: bool,
}

/// Points of one frame in paint order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    points: Vec<DrawPoint>,
    star_start: usize,
}

impl DrawList {
    /// Every point in paint order.
    pub fn points(&self) -> &[DrawPoint] {
        &self.points
    }

    /// Round points, back to front.
    pub fn regular(&self) -> &[DrawPoint] {
        &self.points[..self.star_start]
    }

    /// Star-marker points, painted after everything else.
    pub fn stars(&self) -> &[DrawPoint] {
        &self.points[self.star_start..]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Turns the static scene plus the live snow into draw lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRenderer {
    camera: OrbitCamera,
}

impl FrameRenderer {
    pub fn new(camera: OrbitCamera) -> Self {
        Self { camera }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Advances the snow by one tick and composes frame `frame`.
    ///
    /// ### Parameters
    /// - `frame` - Frame index driving the camera yaw.
    /// - `scene` - Static tree particles.
    /// - `snow` - Caller-owned snow state, mutated in place.
    pub fn render(&self, frame: FrameIndex, scene: &Scene, snow: &mut SnowField) -> DrawList {
        snow.advance();
        self.compose(frame, scene, snow)
    }

    /// Composes frame `frame` from the current snow state without
    /// advancing it.
    pub fn compose(&self, frame: FrameIndex, scene: &Scene, snow: &SnowField) -> DrawList {
        let yaw = self.camera.yaw(frame);
        let mut points = Vec::with_capacity(scene.len() + snow.len());

        points.extend(scene.particles.iter().map(|p| {
            let proj = self.camera.project(p.pos, p.size, &yaw);
            DrawPoint {
                screen: proj.screen,
                depth: proj.depth,
                color: p.color,
                size: proj.size,
                star: p.is_star_marker(),
            }
        }));

        let tree_count = points.len();
        points.extend(self.visible_snow(snow, &yaw));
        trace!(
            "frame {frame}: {} tree points, {} of {} flakes visible",
            tree_count,
            points.len() - tree_count,
            snow.len()
        );

        order_for_painting(points)
    }

    fn visible_snow<'s>(
        &'s self,
        snow: &'s SnowField,
        yaw: &'s Yaw,
    ) -> impl Iterator<Item = DrawPoint> + 's {
        snow.flakes.iter().filter_map(move |f| {
            let proj = self.camera.project(f.pos, f.size, yaw);
            (proj.depth_factor > 0.0).then_some(DrawPoint {
                screen: proj.screen,
                depth: proj.depth,
                color: f.color,
                size: proj.size,
                star: false,
            })
        })
    }
}

/// Sorts back to front, then moves star markers to the end.
///
/// Both passes are stable, so stars stay depth-ordered among themselves.
fn order_for_painting(mut points: Vec<DrawPoint>) -> DrawList {
    points.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let (mut regular, stars): (Vec<_>, Vec<_>) = points.into_iter().partition(|p| !p.star);
    let star_start = regular.len();
    regular.extend(stars);

    DrawList {
        points: regular,
        star_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        camera::CAMERA_DISTANCE,
        particle::{Particle, ParticleKind, SnowParticle},
        scene::SceneBuilder,
        snow::{SNOW_CEILING, SNOW_COUNT},
        style::lookup,
    };
    use glam::Vec3;
    use rand::{SeedableRng, rngs::StdRng};

    fn setup(seed: u64) -> (Scene, SnowField) {
        let palette = lookup("1").resolve().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = SceneBuilder::new(&palette).build(&mut rng).unwrap();
        let snow = SnowField::generate(SNOW_COUNT, palette.snow, &mut rng);
        (scene, snow)
    }

    fn flake(pos: Vec3, speed: f32) -> SnowParticle {
        SnowParticle {
            pos,
            speed,
            color: Rgba::WHITE,
            size: 5.0,
        }
    }

    fn leaf(pos: Vec3, color: Rgba) -> Particle {
        Particle::new(pos, color, 1.0, 5.0, ParticleKind::Foliage)
    }

    #[test]
    fn depth_is_non_decreasing_within_each_group() {
        let (scene, mut snow) = setup(1);
        let renderer = FrameRenderer::default();

        for frame in [0, 1, 17, 80, 149] {
            let list = renderer.render(frame, &scene, &mut snow);
            for group in [list.regular(), list.stars()] {
                assert!(
                    group.windows(2).all(|w| w[0].depth <= w[1].depth),
                    "frame {frame} is not depth sorted"
                );
            }
        }
    }

    #[test]
    fn stars_always_come_last() {
        let (scene, mut snow) = setup(2);
        let renderer = FrameRenderer::default();

        for frame in 0..60 {
            let list = renderer.render(frame, &scene, &mut snow);
            let first_star = list.points().iter().position(|p| p.star).unwrap();
            assert_eq!(first_star, list.regular().len());
            assert!(list.points()[first_star..].iter().all(|p| p.star));
            assert_eq!(list.stars().len(), 1);
        }
    }

    #[test]
    fn every_tree_point_is_drawn() {
        let (scene, snow) = setup(3);
        let renderer = FrameRenderer::default();

        let tree_only = renderer.compose(5, &scene, &SnowField::default());
        assert_eq!(tree_only.len(), scene.len());

        let with_snow = renderer.compose(5, &scene, &snow);
        assert!(with_snow.len() > scene.len());
        assert!(with_snow.len() <= scene.len() + snow.len());
    }

    #[test]
    fn snow_behind_the_camera_is_culled() {
        let scene = Scene::default();
        let snow = SnowField {
            flakes: vec![
                flake(Vec3::new(0.0, 0.0, 2.45), 0.0),
                flake(Vec3::new(0.0, 0.0, 0.0), 0.0),
                flake(Vec3::new(0.0, 0.0, 2.5), 0.0),
            ],
        };

        let list = FrameRenderer::default().compose(0, &scene, &snow);
        assert_eq!(list.len(), 1);
        assert_eq!(list.points()[0].depth, 0.0);
    }

    #[test]
    fn render_advances_snow_before_projecting() {
        let scene = Scene::default();
        let mut snow = SnowField {
            flakes: vec![flake(Vec3::new(0.0, -1.19, 0.0), 0.02)],
        };

        let list = FrameRenderer::default().render(0, &scene, &mut snow);

        assert_eq!(snow.flakes[0].pos.y, SNOW_CEILING);
        let expected = SNOW_CEILING / CAMERA_DISTANCE;
        assert!((list.points()[0].screen.y - expected).abs() < 1e-6);
    }

    #[test]
    fn nearer_point_is_painted_later() {
        let star_free = Scene {
            particles: vec![
                leaf(Vec3::new(0.0, 0.0, 1.0), Rgba::WHITE),
                leaf(Vec3::new(0.0, 0.0, -1.0), Rgba::BLACK),
            ],
        };
        let list = FrameRenderer::default().compose(0, &star_free, &SnowField::default());
        assert_eq!(list.points()[0].color, Rgba::BLACK);
        assert_eq!(list.points()[1].color, Rgba::WHITE);
    }

    #[test]
    fn star_stays_on_top_even_when_farthest() {
        let scene = Scene {
            particles: vec![
                leaf(Vec3::new(0.0, 1.0, 1.0), Rgba::WHITE),
                Particle::new(Vec3::new(0.0, 1.0, -1.5), Rgba::WHITE, 1.0, 500.0, ParticleKind::Star),
            ],
        };
        for frame in [0, 20, 40] {
            let list = FrameRenderer::default().compose(frame, &scene, &SnowField::default());
            assert!(list.points().last().unwrap().star);
        }
    }

    #[test]
    fn compose_is_pure() {
        let (scene, snow) = setup(4);
        let renderer = FrameRenderer::default();
        let a = renderer.compose(12, &scene, &snow);
        let b = renderer.compose(12, &scene, &snow);
        assert_eq!(a.points(), b.points());
    }
}
