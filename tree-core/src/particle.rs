use crate::color::Rgba;
use glam::Vec3;

/// What part of the scene a particle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Trunk,
    Foliage,
    Ornament,
    Ribbon,
    /// Sparkle bridging the cone tip and the star.
    Transition,
    /// Round glow point sharing the star position.
    Halo,
    /// The star apex itself, drawn with the star marker.
    Star,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 7] = [
        ParticleKind::Trunk,
        ParticleKind::Foliage,
        ParticleKind::Ornament,
        ParticleKind::Ribbon,
        ParticleKind::Transition,
        ParticleKind::Halo,
        ParticleKind::Star,
    ];

    pub fn is_star_marker(self) -> bool {
        matches!(self, ParticleKind::Star)
    }
}

/// One static point of the tree model.
///
/// `color.a` is the particle opacity; `size` is a marker area in points².
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    pub color: Rgba,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(pos: Vec3, color: Rgba, opacity: f32, size: f32, kind: ParticleKind) -> Self {
        Self {
            pos,
            color: color.with_alpha(opacity),
            size,
            kind,
        }
    }

    #[inline]
    pub fn is_star_marker(&self) -> bool {
        self.kind.is_star_marker()
    }
}

/// A falling snow flake. Only `pos.y` changes after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowParticle {
    pub pos: Vec3,
    /// Height lost per frame.
    pub speed: f32,
    pub color: Rgba,
    pub size: f32,
}
