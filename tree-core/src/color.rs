//! Normalized RGBA colors and resolution of symbolic color strings.

use crate::error::{SceneError, SceneResult};

/// A color with every channel normalized to `[0, 1]`.
///
/// The alpha channel doubles as particle opacity once a particle is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// CSS color names accepted next to hex strings.
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("gold", [255, 215, 0]),
    ("orange", [255, 165, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("pink", [255, 192, 203]),
    ("hotpink", [255, 105, 180]),
    ("snow", [255, 250, 250]),
    ("ivory", [255, 255, 240]),
    ("lavenderblush", [255, 240, 245]),
    ("azure", [240, 255, 255]),
    ("forestgreen", [34, 139, 34]),
    ("darkgreen", [0, 100, 0]),
    ("seagreen", [46, 139, 87]),
    ("brown", [165, 42, 42]),
];

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        )
    }

    /// Returns the same color with its alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Converts to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Resolves a color string into a normalized color.
    ///
    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` hex forms (case-insensitive)
    /// as well as a small table of CSS color names.
    ///
    /// ### Parameters
    /// - `value` - The symbolic color, e.g. `"#FFD700"` or `"white"`.
    ///
    /// ### Returns
    /// The resolved color, or [`SceneError::InvalidColor`] if `value` is not
    /// recognized.
    pub fn parse(value: &str) -> SceneResult<Self> {
        let trimmed = value.trim();
        let invalid = || SceneError::InvalidColor(value.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let nib = |i: usize| {
                        u8::from_str_radix(&hex[i..i + 1], 16)
                            .map(|v| v * 17)
                            .map_err(|_| invalid())
                    };
                    Ok(Self::from_rgb8([nib(0)?, nib(1)?, nib(2)?]))
                }
                6 => Ok(Self::from_rgb8([byte(0)?, byte(2)?, byte(4)?])),
                8 => Ok(Self::from_rgb8([byte(0)?, byte(2)?, byte(4)?])
                    .with_alpha(byte(6)? as f32 / 255.0)),
                _ => Err(invalid()),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| Self::from_rgb8(*rgb))
            .ok_or_else(invalid)
    }
}
