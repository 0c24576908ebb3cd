use std::collections::HashSet;
use std::sync::Arc;

/// Font configuration for a canvas context.
///
/// Describes which fonts are available using plain Rust types; [`font_config_to_fontdb`]
/// turns it into the backend database.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Custom font data to register (font file bytes + optional family override).
    pub custom_fonts: Vec<CustomFont>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
        }
    }
}

/// A custom font to register, consisting of raw font file data and an optional family name override.
#[derive(Clone, Debug)]
pub struct CustomFont {
    /// Raw font file data (TTF/OTF). Arc-wrapped for cheap cloning.
    pub data: Arc<Vec<u8>>,
    /// When set, every face in `data` is registered under this family name
    /// instead of the name stored in the font's name table.
    pub family_name: Option<String>,
}

/// Concrete fonts for the generic CSS families, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
}

impl GenericFamilyMap {
    /// Browser-like defaults.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
            serif: vec![
                "Times New Roman".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
        }
    }
}

impl FontConfig {
    /// Resolve this configuration into a concrete font database.
    ///
    /// System font scanning happens once here; the result can create any
    /// number of contexts (preview and export surfaces) without rescanning.
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig {
            fontdb: font_config_to_fontdb(self),
        }
    }
}

/// A [`FontConfig`] that has been resolved into a font database.
///
/// Pass it to [`Canvas2dContext::with_resolved()`](crate::Canvas2dContext::with_resolved).
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    /// Whether a face answering to `family` is registered.
    pub fn has_family(&self, family: &str) -> bool {
        database_has_family(&self.fontdb, family)
    }

    /// Number of registered faces.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for font in &config.custom_fonts {
        let ids = db.load_font_source(fontdb::Source::Binary(font.data.clone()));
        if ids.is_empty() {
            log::warn!("Custom font data contained no usable faces");
        }
        if let Some(family) = &font.family_name {
            for id in ids {
                rename_face(&mut db, id, family);
            }
        }
    }

    apply_generic_families(&mut db, &config.generic_families);

    db
}

/// Re-register a face under a different family name.
fn rename_face(db: &mut fontdb::Database, id: fontdb::ID, family: &str) {
    let Some(mut info) = db.face(id).cloned() else {
        return;
    };
    db.remove_face(id);
    info.families = vec![(family.to_string(), fontdb::Language::English_UnitedStates)];
    db.push_face_info(info);
    log::debug!("Registered custom face as {family:?}");
}

pub(crate) fn database_has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

/// Point each generic family at the first available concrete family.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(fam, _lang)| fam.clone()))
        .collect();
    let first_available = |candidates: &[String]| {
        candidates
            .iter()
            .find(|family| available.contains(*family))
            .cloned()
    };

    if let Some(family) = first_available(&families.sans_serif) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = first_available(&families.serif) {
        db.set_serif_family(family);
    }
    if let Some(family) = first_available(&families.monospace) {
        db.set_monospace_family(family);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.custom_fonts.is_empty());
        assert!(config.load_system_fonts);
        assert_eq!(config.generic_families.sans_serif[0], "Arial");
    }

    #[test]
    fn test_no_system_fonts_yields_empty_database() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        let resolved = config.resolve();
        assert_eq!(resolved.face_count(), 0);
        assert!(!resolved.has_family("ChromakopiaType1"));
    }

    #[test]
    fn test_invalid_custom_font_is_skipped() {
        let config = FontConfig {
            load_system_fonts: false,
            custom_fonts: vec![CustomFont {
                data: Arc::new(b"definitely not a font".to_vec()),
                family_name: Some("ChromakopiaType2".into()),
            }],
            ..FontConfig::default()
        };
        let resolved = config.resolve();
        assert!(!resolved.has_family("ChromakopiaType2"));
    }

    #[test]
    fn test_custom_font_answers_to_requested_family() {
        let config = FontConfig {
            load_system_fonts: false,
            custom_fonts: vec![CustomFont {
                data: Arc::new(include_bytes!("../tests/fonts/DejaVuSans.ttf").to_vec()),
                family_name: Some("ChromakopiaType1".into()),
            }],
            ..FontConfig::default()
        };
        let resolved = config.resolve();
        assert_eq!(resolved.face_count(), 1);
        assert!(resolved.has_family("ChromakopiaType1"));
        assert!(resolved.has_family("chromakopiatype1"));
        assert!(!resolved.has_family("DejaVu Sans"));
    }

    #[test]
    fn test_font_config_clone_shares_data() {
        let data = Arc::new(vec![0u8; 1000]);
        let config = FontConfig {
            custom_fonts: vec![CustomFont {
                data: data.clone(),
                family_name: None,
            }],
            ..FontConfig::default()
        };
        let cloned = config.clone();
        assert!(Arc::ptr_eq(
            &config.custom_fonts[0].data,
            &cloned.custom_fonts[0].data
        ));
    }
}
