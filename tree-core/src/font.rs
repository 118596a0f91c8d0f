//! Title font selection.
//!
//! Whether a font family exists depends on the machine, so lookups go
//! through the [`FontResolver`] capability. The selection order is:
//! 1. The custom font file, when it was found and parsed.
//! 2. The first candidate family that resolves to an exact name match.
//! 3. A generic serif face, italic and bold.

use log::debug;

/// Point size of the title when the custom font is used.
pub const CUSTOM_TITLE_POINTS: f32 = 45.0;
/// Point size of the title with any system font.
pub const SYSTEM_TITLE_POINTS: f32 = 42.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFamily<'a> {
    Named(&'a str),
    Serif,
}

/// A font lookup request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontQuery<'a> {
    pub family: FontFamily<'a>,
    pub italic: bool,
    pub bold: bool,
}

impl<'a> FontQuery<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            family: FontFamily::Named(name),
            italic: false,
            bold: false,
        }
    }

    pub fn serif_fallback() -> Self {
        Self {
            family: FontFamily::Serif,
            italic: true,
            bold: true,
        }
    }
}

/// Raw font file contents. `index` selects a face inside a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontData {
    pub bytes: Vec<u8>,
    pub index: u32,
}

/// A face returned by a [`FontResolver`], with the family name it
/// actually belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFont {
    pub family: String,
    pub data: FontData,
}

/// Answers "can this font be resolved, and with what bytes?".
pub trait FontResolver {
    fn resolve(&self, query: &FontQuery<'_>) -> Option<ResolvedFont>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    Custom,
    Family(String),
    SerifFallback,
}

/// The font the title is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleFont {
    pub source: FontSource,
    pub data: FontData,
    pub points: f32,
}

/// Picks the title font.
///
/// ### Parameters
/// - `custom` - Contents of the custom font file, if it loaded.
/// - `candidates` - Family names to probe, in order of preference.
/// - `resolver` - Font lookup capability.
///
/// ### Returns
/// The chosen font, or `None` when not even the serif fallback resolves.
pub fn select_title_font(
    custom: Option<FontData>,
    candidates: &[&str],
    resolver: &impl FontResolver,
) -> Option<TitleFont> {
    if let Some(data) = custom {
        return Some(TitleFont {
            source: FontSource::Custom,
            data,
            points: CUSTOM_TITLE_POINTS,
        });
    }

    for &name in candidates {
        match resolver.resolve(&FontQuery::named(name)) {
            Some(found) if found.family == name => {
                return Some(TitleFont {
                    source: FontSource::Family(found.family),
                    data: found.data,
                    points: SYSTEM_TITLE_POINTS,
                });
            }
            Some(found) => debug!("font {name:?} resolved to {:?}, skipping", found.family),
            None => debug!("font {name:?} not found"),
        }
    }

    resolver
        .resolve(&FontQuery::serif_fallback())
        .map(|found| TitleFont {
            source: FontSource::SerifFallback,
            data: found.data,
            points: SYSTEM_TITLE_POINTS,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Resolver backed by a fixed family list. Unknown names resolve to
    /// `substitute`, mimicking fontconfig-style substitution.
    struct FakeResolver {
        installed: Vec<&'static str>,
        substitute: Option<&'static str>,
        serif: bool,
        asked: RefCell<Vec<String>>,
    }

    impl FakeResolver {
        fn new(installed: &[&'static str]) -> Self {
            Self {
                installed: installed.to_vec(),
                substitute: None,
                serif: true,
                asked: RefCell::new(Vec::new()),
            }
        }

        fn face(family: &str) -> ResolvedFont {
            ResolvedFont {
                family: family.to_string(),
                data: FontData {
                    bytes: family.as_bytes().to_vec(),
                    index: 0,
                },
            }
        }
    }

    impl FontResolver for FakeResolver {
        fn resolve(&self, query: &FontQuery<'_>) -> Option<ResolvedFont> {
            match query.family {
                FontFamily::Named(name) => {
                    self.asked.borrow_mut().push(name.to_string());
                    if self.installed.contains(&name) {
                        Some(Self::face(name))
                    } else {
                        self.substitute.map(Self::face)
                    }
                }
                FontFamily::Serif => {
                    assert!(query.italic && query.bold);
                    self.serif.then(|| Self::face("DejaVu Serif"))
                }
            }
        }
    }

    const CANDIDATES: &[&str] = &["Brush Script MT", "Comic Sans MS", "Segoe Print", "Ink Free"];

    #[test]
    fn custom_font_wins_without_probing() {
        let resolver = FakeResolver::new(&["Comic Sans MS"]);
        let custom = FontData {
            bytes: vec![1, 2, 3],
            index: 0,
        };

        let font = select_title_font(Some(custom.clone()), CANDIDATES, &resolver).unwrap();

        assert_eq!(font.source, FontSource::Custom);
        assert_eq!(font.data, custom);
        assert_eq!(font.points, CUSTOM_TITLE_POINTS);
        assert!(resolver.asked.borrow().is_empty());
    }

    #[test]
    fn first_installed_candidate_is_used() {
        let resolver = FakeResolver::new(&["Segoe Print", "Comic Sans MS"]);
        let font = select_title_font(None, CANDIDATES, &resolver).unwrap();

        assert_eq!(font.source, FontSource::Family("Comic Sans MS".into()));
        assert_eq!(font.points, SYSTEM_TITLE_POINTS);
        assert_eq!(
            *resolver.asked.borrow(),
            vec!["Brush Script MT".to_string(), "Comic Sans MS".to_string()]
        );
    }

    #[test]
    fn substituted_family_is_not_an_exact_match() {
        let mut resolver = FakeResolver::new(&[]);
        resolver.substitute = Some("DejaVu Sans");

        let font = select_title_font(None, CANDIDATES, &resolver).unwrap();
        assert_eq!(font.source, FontSource::SerifFallback);
        assert_eq!(resolver.asked.borrow().len(), CANDIDATES.len());
    }

    #[test]
    fn nothing_resolves() {
        let mut resolver = FakeResolver::new(&[]);
        resolver.serif = false;
        assert!(select_title_font(None, CANDIDATES, &resolver).is_none());
    }
}
