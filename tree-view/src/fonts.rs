//! System font lookup and title font loading.

use std::{cell::OnceCell, path::Path};

use ab_glyph::FontVec;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use log::{debug, info, warn};
use tree_core::font::{
    FontData, FontFamily, FontQuery, FontResolver, ResolvedFont, TitleFont, select_title_font,
};

/// Families the generic serif query maps to, first installed one wins.
pub const SERIF_FAMILIES: [&str; 4] = [
    "Times New Roman",
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
];

/// [`FontResolver`] over the fonts installed on this machine.
///
/// The font directories are only scanned on the first lookup.
#[derive(Default)]
pub struct SystemFonts {
    db: OnceCell<Database>,
}

impl SystemFonts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver over an already populated database.
    pub fn with_database(db: Database) -> Self {
        Self {
            db: OnceCell::from(adopt_serif_family(db)),
        }
    }

    fn db(&self) -> &Database {
        self.db.get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            debug!("{} system font faces indexed", db.len());
            adopt_serif_family(db)
        })
    }
}

fn has_family(db: &Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

/// Points [`Family::Serif`] at the first installed entry of [`SERIF_FAMILIES`].
///
/// fontdb's own default only exists on some systems.
fn adopt_serif_family(mut db: Database) -> Database {
    match SERIF_FAMILIES.iter().find(|name| has_family(&db, name)) {
        Some(&name) => {
            debug!("serif family: {name}");
            db.set_serif_family(name);
        }
        None => debug!("none of {SERIF_FAMILIES:?} installed"),
    }
    db
}

impl FontResolver for SystemFonts {
    fn resolve(&self, query: &FontQuery<'_>) -> Option<ResolvedFont> {
        let family = match query.family {
            FontFamily::Named(name) => Family::Name(name),
            FontFamily::Serif => Family::Serif,
        };
        let db = self.db();
        let id = db.query(&Query {
            families: &[family],
            weight: if query.bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: if query.italic { Style::Italic } else { Style::Normal },
        })?;

        let family = db.face(id)?.families.first().map(|(name, _)| name.clone())?;
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

        Some(ResolvedFont {
            family,
            data: FontData { bytes, index },
        })
    }
}

/// Reads and validates the custom font file.
///
/// Any failure (missing file, unreadable, not a font) yields `None`; the
/// caller then probes system fonts instead.
pub fn load_custom_font(path: &Path) -> Option<FontData> {
    if !path.exists() {
        debug!("custom font {} not present", path.display());
        return None;
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("custom font {} unreadable: {e}", path.display());
            return None;
        }
    };
    match FontVec::try_from_vec(bytes.clone()) {
        Ok(_) => Some(FontData { bytes, index: 0 }),
        Err(e) => {
            debug!("custom font {} rejected: {e}", path.display());
            None
        }
    }
}

/// Resolves the title font once for the whole run.
pub fn title_font(custom_path: &Path, candidates: &[&str]) -> Option<TitleFont> {
    let font = select_title_font(load_custom_font(custom_path), candidates, &SystemFonts::new());

    match &font {
        Some(f) => info!("title font: {:?} at {} pt", f.source, f.points),
        None => warn!("no usable title font, the title will not be drawn"),
    }
    font
}

/// Parses font data into a face usable by the rasterizer.
pub fn parse_font(data: &FontData) -> Option<FontVec> {
    FontVec::try_from_vec_and_index(data.bytes.clone(), data.index)
        .map_err(|e| warn!("title font could not be parsed: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fontdb::{FaceInfo, ID, Language, Source};
    use tree_core::font::FontSource;

    use super::*;

    fn face(family: &str, style: Style, weight: Weight) -> FaceInfo {
        FaceInfo {
            id: ID::dummy(),
            source: Source::Binary(Arc::new(vec![0u8; 8])),
            index: 0,
            families: vec![(family.to_owned(), Language::English_UnitedStates)],
            post_script_name: family.replace(' ', ""),
            style,
            weight,
            stretch: Stretch::Normal,
            monospaced: false,
        }
    }

    #[test]
    fn serif_fallback_finds_dejavu_without_times() {
        let mut db = Database::new();
        db.push_face_info(face("DejaVu Sans", Style::Normal, Weight::NORMAL));
        db.push_face_info(face("DejaVu Serif", Style::Italic, Weight::BOLD));
        let fonts = SystemFonts::with_database(db);

        let found = fonts.resolve(&FontQuery::serif_fallback()).unwrap();
        assert_eq!(found.family, "DejaVu Serif");

        let title = select_title_font(None, &["Brush Script MT"], &fonts).unwrap();
        assert_eq!(title.source, FontSource::SerifFallback);
    }

    #[test]
    fn serif_family_follows_preference_order() {
        let mut db = Database::new();
        db.push_face_info(face("Noto Serif", Style::Normal, Weight::NORMAL));
        db.push_face_info(face("Liberation Serif", Style::Normal, Weight::NORMAL));
        let fonts = SystemFonts::with_database(db);

        let found = fonts.resolve(&FontQuery::serif_fallback()).unwrap();
        assert_eq!(found.family, "Liberation Serif");
    }

    #[test]
    fn no_serif_installed_gives_no_title() {
        let mut db = Database::new();
        db.push_face_info(face("DejaVu Sans", Style::Normal, Weight::NORMAL));
        let fonts = SystemFonts::with_database(db);

        assert!(select_title_font(None, &["Brush Script MT"], &fonts).is_none());
    }

    #[test]
    fn missing_custom_font_is_ignored() {
        assert!(load_custom_font(Path::new("definitely/not/here.ttf")).is_none());
    }

    #[test]
    fn garbage_custom_font_is_ignored() {
        let path = std::env::temp_dir()
            .join(format!("holiday_tree_bad_font_{}.ttf", std::process::id()));
        std::fs::write(&path, b"not a font").unwrap();

        assert!(load_custom_font(&path).is_none());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn parse_font_rejects_garbage() {
        let data = FontData {
            bytes: vec![0; 16],
            index: 0,
        };
        assert!(parse_font(&data).is_none());
    }
}
