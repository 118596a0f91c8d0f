//! Procedural holiday tree: particle scene and per-frame composition.
//!
//! Main components:
//! - [`style`] — named palettes and their resolved colors.
//! - [`layer`] — vertical layer geometry of the tree.
//! - [`scene`] — sampling of the static particle set.
//! - [`snow`] — falling snow state and its per-frame update.
//! - [`camera`] — orbit rotation and perspective projection.
//! - [`frame`] — depth-sorted draw lists for each animation frame.
//! - [`viewport`] — view-plane to pixel mapping.
//! - [`font`] — title font selection behind a resolver trait.
//! - [`config`] — fixed settings of a run.
//! - [`color`], [`particle`], [`error`], [`types`] — shared data types.

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod frame;
pub mod layer;
pub mod particle;
pub mod scene;
pub mod snow;
pub mod style;
pub mod types;
pub mod viewport;
