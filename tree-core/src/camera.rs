//! Orbiting camera and perspective projection.
//!
//! The model never moves. Instead every point is rotated about the
//! vertical axis by the frame's yaw and then projected with a simple
//! `1 / (distance - z)` perspective term.

use glam::{Vec2, Vec3};

use crate::types::FrameIndex;

pub const CAMERA_DISTANCE: f32 = 2.4;
pub const YAW_PER_FRAME: f32 = 0.08;
/// Multiplier applied to marker sizes after perspective scaling.
pub const SIZE_SCALE: f32 = 1000.0 * 0.002;

/// A rotation about the vertical axis with its sine and cosine cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Yaw {
    cos: f32,
    sin: f32,
}

impl Yaw {
    pub fn new(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { cos, sin }
    }

    /// Rigidly rotates `p` in the xz plane. `y` is untouched.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x * self.cos - p.z * self.sin,
            p.y,
            p.x * self.sin + p.z * self.cos,
        )
    }
}

/// A point after rotation and projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Position on the view plane.
    pub screen: Vec2,
    /// Marker size after perspective scaling.
    pub size: f32,
    /// Rotated z, used for back-to-front ordering.
    pub depth: f32,
    /// `1 / (distance - depth)`. Non-positive behind the camera.
    pub depth_factor: f32,
}

/// Camera circling the tree at a fixed distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw_per_frame: f32,
    pub size_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            yaw_per_frame: YAW_PER_FRAME,
            size_scale: SIZE_SCALE,
        }
    }
}

impl OrbitCamera {
    /// Yaw angle of a frame. Grows linearly and never wraps or eases.
    pub fn angle(&self, frame: FrameIndex) -> f32 {
        frame as f32 * self.yaw_per_frame
    }

    pub fn yaw(&self, frame: FrameIndex) -> Yaw {
        Yaw::new(self.angle(frame))
    }

    /// Rotates and projects one point.
    ///
    /// This is a pure function of its inputs. Points with
    /// `depth == distance` project to infinity; callers decide whether to
    /// keep points with a non-positive `depth_factor`.
    ///
    /// ### Parameters
    /// - `p` - Model-space position.
    /// - `size` - Base marker size.
    /// - `yaw` - Rotation of the current frame.
    #[inline]
    pub fn project(&self, p: Vec3, size: f32, yaw: &Yaw) -> Projection {
        let r = yaw.apply(p);
        let depth_factor = 1.0 / (self.distance - r.z);
        Projection {
            screen: Vec2::new(r.x * depth_factor, r.y * depth_factor),
            size: size * depth_factor * self.size_scale,
            depth: r.z,
            depth_factor,
        }
    }
}
