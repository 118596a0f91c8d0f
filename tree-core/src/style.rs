//! Named color palettes and their resolved form.
//!
//! A [`Style`] is the symbolic bundle as it appears in the registry. Before
//! any particle is built it is resolved once into a [`Palette`] of
//! normalized colors, which is what the scene builder and the renderers
//! consume.

use crate::{
    color::Rgba,
    error::{SceneError, SceneResult},
};

/// Style used when an unknown id is requested.
pub const DEFAULT_STYLE_ID: &str = "1";

/// A named palette bundle.
#[derive(Clone, Debug)]
pub struct Style {
    pub id: &'static str,
    pub name: &'static str,
    pub background: &'static str,
    pub tree: &'static [&'static str],
    pub trunk: &'static str,
    pub ornaments: &'static [&'static str],
    pub star: &'static str,
    pub text: &'static str,
    pub ribbon: &'static str,
    pub snow: &'static str,
    pub has_ribbon: bool,
    pub ribbon_width: f32,
}

/// Ribbon settings of a resolved palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ribbon {
    pub color: Rgba,
    pub width: f32,
}

/// A [`Style`] with every color resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub tree: Vec<Rgba>,
    pub trunk: Rgba,
    pub ornaments: Vec<Rgba>,
    pub star: Rgba,
    pub text: Rgba,
    /// `None` when the style draws no ribbon.
    pub ribbon: Option<Ribbon>,
    pub snow: Rgba,
}

static STYLES: [Style; 6] = [
    Style {
        id: "1",
        name: "classic green",
        background: "#050505",
        tree: &["#0f3d0f", "#144514", "#006400", "#2E8B57", "#228B22"],
        trunk: "#3e2723",
        ornaments: &["#FFD700", "#FF0000", "#FFFFFF", "#FFA500"],
        star: "#FFD700",
        text: "#FFD700",
        ribbon: "#D4AF37",
        snow: "white",
        has_ribbon: true,
        ribbon_width: 2.2,
    },
    Style {
        id: "2",
        name: "ice blue",
        background: "#0a1014",
        tree: &["#2F4F4F", "#5F9EA0", "#708090"],
        trunk: "#404040",
        ornaments: &["#E0FFFF", "#FFFFFF", "#B0C4DE"],
        star: "#E0FFFF",
        text: "#B0C4DE",
        ribbon: "#F0FFFF",
        snow: "#F0FFFF",
        has_ribbon: true,
        ribbon_width: 1.5,
    },
    Style {
        id: "3",
        name: "olive",
        background: "#1a1a1a",
        tree: &["#556B2F", "#6B8E23", "#808000"],
        trunk: "#5D4037",
        ornaments: &["#CD853F", "#FFCC00"],
        star: "#FFCC00",
        text: "#DEB887",
        ribbon: "#000000",
        snow: "white",
        has_ribbon: false,
        ribbon_width: 0.0,
    },
    Style {
        id: "4",
        name: "colorful",
        background: "#000000",
        tree: &["#006400", "#228B22"],
        trunk: "#4E342E",
        ornaments: &["#FF0000", "#00FF00", "#0000FF", "#FFFF00"],
        star: "#FFD700",
        text: "#FF6347",
        ribbon: "#C0C0C0",
        snow: "white",
        has_ribbon: true,
        ribbon_width: 1.5,
    },
    Style {
        id: "5",
        name: "black and white",
        background: "#000000",
        tree: &["#1a1a1a", "#222222", "#333333"],
        trunk: "#111111",
        ornaments: &["#FFFFFF", "#DDDDDD"],
        star: "#FFFFFF",
        text: "#FFFFFF",
        ribbon: "#FFFFFF",
        snow: "#808080",
        has_ribbon: true,
        ribbon_width: 1.2,
    },
    Style {
        id: "6",
        name: "pink",
        background: "#120508",
        tree: &["#D87093", "#FF69B4", "#C71585"],
        trunk: "#5D4037",
        ornaments: &["#FFFFFF", "#FFD700", "#FF1493"],
        star: "#FFD700",
        text: "#FFC0CB",
        ribbon: "#FFB6C1",
        snow: "#FFF0F5",
        has_ribbon: true,
        ribbon_width: 1.5,
    },
];

/// All registered styles, in id order.
pub fn styles() -> &'static [Style] {
    &STYLES
}

/// Looks up a style by id, falling back to [`DEFAULT_STYLE_ID`].
pub fn lookup(id: &str) -> &'static Style {
    STYLES
        .iter()
        .find(|s| s.id == id)
        .or_else(|| STYLES.iter().find(|s| s.id == DEFAULT_STYLE_ID))
        .unwrap_or(&STYLES[0])
}

fn resolve_list(list: &[&str], which: &'static str) -> SceneResult<Vec<Rgba>> {
    if list.is_empty() {
        return Err(SceneError::EmptyPalette(which));
    }
    list.iter().map(|c| Rgba::parse(c)).collect()
}

impl Style {
    /// Resolves every symbolic color of this style.
    ///
    /// ### Returns
    /// The [`Palette`], or the first [`SceneError`] encountered: an
    /// unparseable color or an empty tree/ornament list.
    pub fn resolve(&self) -> SceneResult<Palette> {
        let ribbon = if self.has_ribbon {
            Some(Ribbon {
                color: Rgba::parse(self.ribbon)?,
                width: self.ribbon_width,
            })
        } else {
            None
        };

        Ok(Palette {
            background: Rgba::parse(self.background)?,
            tree: resolve_list(self.tree, "tree")?,
            trunk: Rgba::parse(self.trunk)?,
            ornaments: resolve_list(self.ornaments, "ornaments")?,
            star: Rgba::parse(self.star)?,
            text: Rgba::parse(self.text)?,
            ribbon,
            snow: Rgba::parse(self.snow)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_style_resolves() {
        for style in styles() {
            let palette = style.resolve().unwrap_or_else(|e| panic!("style {}: {e}", style.id));
            assert_eq!(palette.tree.len(), style.tree.len());
            assert_eq!(palette.ornaments.len(), style.ornaments.len());
            assert_eq!(palette.ribbon.is_some(), style.has_ribbon);
        }
    }

    #[test]
    fn lookup_finds_known_ids() {
        for id in ["1", "2", "3", "4", "5", "6"] {
            assert_eq!(lookup(id).id, id);
        }
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(lookup("42").id, DEFAULT_STYLE_ID);
        assert_eq!(lookup("").id, DEFAULT_STYLE_ID);
    }

    #[test]
    fn olive_style_has_no_ribbon() {
        let palette = lookup("3").resolve().unwrap();
        assert!(palette.ribbon.is_none());
    }

    #[test]
    fn resolve_reports_bad_colors_and_empty_lists() {
        let broken = Style {
            id: "x",
            name: "broken",
            background: "not-a-color",
            ..STYLES[0].clone()
        };
        assert_eq!(
            broken.resolve(),
            Err(SceneError::InvalidColor("not-a-color".into()))
        );

        let empty = Style {
            id: "y",
            name: "empty",
            tree: &[],
            ..STYLES[0].clone()
        };
        assert_eq!(empty.resolve(), Err(SceneError::EmptyPalette("tree")));
    }
}
