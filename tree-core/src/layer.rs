//! Vertical layer geometry of the tree.
//!
//! The foliage is split into [`LAYER_COUNT`] horizontal bands between
//! [`TREE_BOTTOM`] and [`TREE_TOP`]. The top band is a cone that narrows
//! towards the star; every other band is a cylinder whose surface bulges
//! out at its vertical center.

use std::f32::consts::PI;

pub const LAYER_COUNT: usize = 8;
pub const TREE_BOTTOM: f32 = -0.5;
pub const TREE_TOP: f32 = 1.25;
pub const LAYER_GAP: f32 = 0.04;
/// Height of the star apex above [`TREE_TOP`].
pub const STAR_OFFSET: f32 = 0.28;
/// Radius of the bottom layer.
pub const BASE_RADIUS: f32 = 1.6;
/// Fraction of [`BASE_RADIUS`] lost between the bottom and top layers.
pub const TAPER: f32 = 0.8;
/// Cone base radius relative to the max radius of the layer below it.
pub const CONE_BASE_RATIO: f32 = 0.7;
/// Radius loss at the top/bottom edge of a cylinder layer.
pub const BULGE: f32 = 0.3;
/// Extra inset applied to ornament bounds so they stay off layer edges.
pub const ORNAMENT_INSET: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerShape {
    Cylinder,
    Cone,
}

/// Which population is being placed; each one trims layer bounds slightly
/// differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerFit {
    Foliage,
    Ornament,
    Ribbon,
}

/// One horizontal band of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub index: usize,
    pub shape: LayerShape,
    pub h_min: f32,
    pub h_max: f32,
    pub max_radius: f32,
}

/// Height of the `i`-th layer boundary, `i` in `0..=LAYER_COUNT`.
pub fn boundary(i: usize) -> f32 {
    TREE_BOTTOM + (TREE_TOP - TREE_BOTTOM) * i as f32 / LAYER_COUNT as f32
}

/// Height of the star apex.
pub fn star_height() -> f32 {
    boundary(LAYER_COUNT) + STAR_OFFSET
}

/// Max radius of a cylinder layer, shrinking linearly with layer height.
pub fn taper_radius(index: usize) -> f32 {
    let rel = index as f32 / (LAYER_COUNT - 1) as f32;
    BASE_RADIUS * (1.0 - rel * TAPER)
}

impl Layer {
    /// Builds layer `index` with the bounds used by `fit`.
    ///
    /// ### Parameters
    /// - `index` - Layer index in `0..LAYER_COUNT`; the last one is the cone.
    /// - `fit` - The population placed in the layer.
    pub fn new(index: usize, fit: LayerFit) -> Self {
        let lo = boundary(index);
        let hi = boundary(index + 1);

        if index == LAYER_COUNT - 1 {
            let h_min = lo + LAYER_GAP * 0.3;
            let h_max = match fit {
                LayerFit::Foliage | LayerFit::Ornament => star_height() - 0.02,
                LayerFit::Ribbon => hi - 0.01,
            };
            let inset = if fit == LayerFit::Ornament {
                ORNAMENT_INSET
            } else {
                0.0
            };
            Self {
                index,
                shape: LayerShape::Cone,
                h_min: h_min + inset,
                h_max: h_max - inset,
                max_radius: taper_radius(index - 1) * CONE_BASE_RATIO,
            }
        } else {
            let inset = if fit == LayerFit::Ornament {
                LAYER_GAP + ORNAMENT_INSET
            } else {
                LAYER_GAP
            };
            Self {
                index,
                shape: LayerShape::Cylinder,
                h_min: lo + inset,
                h_max: hi - inset,
                max_radius: taper_radius(index),
            }
        }
    }

    /// All layers bottom to top.
    pub fn all(fit: LayerFit) -> impl Iterator<Item = Layer> {
        (0..LAYER_COUNT).map(move |i| Layer::new(i, fit))
    }

    pub fn span(&self) -> f32 {
        self.h_max - self.h_min
    }

    pub fn center(&self) -> f32 {
        (self.h_min + self.h_max) / 2.0
    }

    /// Normalized position of `h` inside the layer, `0` at the bottom.
    pub fn rel_height(&self, h: f32) -> f32 {
        let span = self.span();
        if span > 0.0 { (h - self.h_min) / span } else { 0.0 }
    }

    /// Radius of the layer surface at height `h`.
    ///
    /// Cones shrink linearly to zero at `h_max`. Cylinders lose up to
    /// [`BULGE`] of their radius with the square of the normalized distance
    /// from the layer center.
    pub fn surface_radius(&self, h: f32) -> f32 {
        match self.shape {
            LayerShape::Cone => self.max_radius * (1.0 - self.rel_height(h)),
            LayerShape::Cylinder => {
                let span = self.span();
                let d = if span > 0.0 {
                    (h - self.center()).abs() / span * 2.0
                } else {
                    0.0
                };
                self.max_radius * (1.0 - d * d * BULGE)
            }
        }
    }

    /// Starting angle of this layer's ribbon segment.
    ///
    /// Consecutive segments are offset so they read as a single helix.
    pub fn ribbon_phase(&self) -> f32 {
        self.index as f32 * PI * 0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn boundaries_span_tree_height() {
        assert_eq!(boundary(0), TREE_BOTTOM);
        assert_eq!(boundary(LAYER_COUNT), TREE_TOP);
        assert!((star_height() - 1.53).abs() < EPS);
    }

    #[test]
    fn only_the_top_layer_is_a_cone() {
        let shapes: Vec<_> = Layer::all(LayerFit::Foliage).map(|l| l.shape).collect();
        assert_eq!(shapes.len(), LAYER_COUNT);
        assert!(shapes[..LAYER_COUNT - 1].iter().all(|s| *s == LayerShape::Cylinder));
        assert_eq!(shapes[LAYER_COUNT - 1], LayerShape::Cone);
    }

    #[test]
    fn radius_tapers_towards_the_top() {
        assert!((taper_radius(0) - 1.6).abs() < EPS);
        assert!((taper_radius(LAYER_COUNT - 1) - 1.6 * 0.2).abs() < EPS);

        let radii: Vec<f32> = Layer::all(LayerFit::Foliage).map(|l| l.max_radius).collect();
        assert!(radii.windows(2).all(|w| w[1] < w[0]), "{radii:?}");
    }

    #[test]
    fn cone_starts_at_seventy_percent_of_layer_below() {
        let cone = Layer::new(LAYER_COUNT - 1, LayerFit::Foliage);
        assert!((cone.max_radius - taper_radius(LAYER_COUNT - 2) * 0.7).abs() < EPS);
        assert!((cone.h_max - (star_height() - 0.02)).abs() < EPS);
    }

    #[test]
    fn cylinder_bulges_at_its_center() {
        let layer = Layer::new(2, LayerFit::Foliage);
        let mid = layer.surface_radius(layer.center());
        let edge = layer.surface_radius(layer.h_min);

        assert!((mid - layer.max_radius).abs() < EPS);
        assert!((edge - layer.max_radius * (1.0 - BULGE)).abs() < EPS);
        assert!(mid > edge);
    }

    #[test]
    fn cone_closes_at_its_tip() {
        let cone = Layer::new(LAYER_COUNT - 1, LayerFit::Foliage);
        assert!((cone.surface_radius(cone.h_min) - cone.max_radius).abs() < EPS);
        assert!(cone.surface_radius(cone.h_max).abs() < EPS);
    }

    #[test]
    fn ornament_bounds_sit_inside_foliage_bounds() {
        for (f, o) in Layer::all(LayerFit::Foliage).zip(Layer::all(LayerFit::Ornament)) {
            assert!((o.h_min - (f.h_min + ORNAMENT_INSET)).abs() < EPS);
            assert!((o.h_max - (f.h_max - ORNAMENT_INSET)).abs() < EPS);
        }
    }

    #[test]
    fn ribbon_cone_stops_below_tree_top() {
        let cone = Layer::new(LAYER_COUNT - 1, LayerFit::Ribbon);
        assert!((cone.h_max - (TREE_TOP - 0.01)).abs() < EPS);
    }

    #[test]
    fn rel_height_of_degenerate_layer_is_zero() {
        let layer = Layer {
            index: 0,
            shape: LayerShape::Cylinder,
            h_min: 0.5,
            h_max: 0.5,
            max_radius: 1.0,
        };
        assert_eq!(layer.rel_height(0.5), 0.0);
        assert_eq!(layer.surface_radius(0.5), 1.0);
    }
}
