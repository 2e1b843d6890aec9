//! Font families
//!
//! System families are enumerated with fontdb. Imported font files are
//! validated the same way and their first family name becomes the name the
//! widget refers to them by.

use crate::error::{FontError, FontResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// Sorted, duplicate-free list of font family names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<String>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut families: Vec<String> = families
            .into_iter()
            .map(Into::into)
            .filter(|f| !f.trim().is_empty())
            .collect();
        families.sort();
        families.dedup();
        Self { families }
    }

    /// Families of all fonts installed on the system
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let catalog = Self::from_families(
            db.faces()
                .flat_map(|face| face.families.iter().map(|(name, _)| name.clone())),
        );
        log::info!(
            "Found {} font families in {} faces",
            catalog.families.len(),
            db.len()
        );
        catalog
    }

    /// Enumerate system fonts off the UI thread
    pub async fn system_async() -> Self {
        tokio::task::spawn_blocking(Self::system)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Font enumeration failed: {}", e);
                Self::new()
            })
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Add a family, keeping the list sorted; returns false if already known
    pub fn register(&mut self, family: &str) -> bool {
        match self.families.binary_search_by(|f| f.as_str().cmp(family)) {
            Ok(_) => false,
            Err(pos) => {
                self.families.insert(pos, family.to_string());
                true
            }
        }
    }

    /// Merge another catalog into this one
    pub fn extend(&mut self, other: FontCatalog) {
        for family in other.families {
            self.register(&family);
        }
    }
}

/// A font file read from disk and validated
#[derive(Debug, Clone)]
pub struct ImportedFont {
    pub path: PathBuf,
    pub family: String,
    pub data: Arc<Vec<u8>>,
}

/// Family name declared by font data
pub fn family_of(path: &Path, data: &[u8]) -> FontResult<String> {
    let mut db = fontdb::Database::new();
    let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(data.to_vec())));
    if ids.is_empty() {
        return Err(FontError::Invalid {
            path: path.to_path_buf(),
        });
    }

    ids.iter()
        .filter_map(|id| db.face(*id))
        .flat_map(|face| face.families.iter())
        .map(|(name, _)| name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FontError::NoFamily {
            path: path.to_path_buf(),
        })
}

/// Read a font file and resolve its family name
pub async fn import_font_file(path: PathBuf) -> FontResult<ImportedFont> {
    let data = tokio::fs::read(&path)
        .await
        .map_err(|source| FontError::ReadError {
            path: path.clone(),
            source,
        })?;
    let family = family_of(&path, &data)?;
    log::info!("Imported font family {:?} from {}", family, path.display());
    Ok(ImportedFont {
        path,
        family,
        data: Arc::new(data),
    })
}

/// A `'static` copy of a family name
///
/// Rendering refers to fonts by `&'static str`; each distinct name is
/// leaked once.
pub fn intern(family: &str) -> &'static str {
    static NAMES: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    let names = NAMES.get_or_init(|| Mutex::new(HashSet::new()));
    let mut names = match names.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(name) = names.get(family) {
        return name;
    }
    let name: &'static str = Box::leak(family.to_string().into_boxed_str());
    names.insert(name);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_sorted_and_deduplicated() {
        let catalog = FontCatalog::from_families(["Inter", "Arial", "Inter", " ", "Fira Sans"]);
        assert_eq!(catalog.families(), ["Arial", "Fira Sans", "Inter"]);
    }

    #[test]
    fn test_register_keeps_order() {
        let mut catalog = FontCatalog::from_families(["Arial", "Inter"]);
        assert!(catalog.register("DejaVu Sans"));
        assert!(!catalog.register("Inter"));
        assert_eq!(catalog.families(), ["Arial", "DejaVu Sans", "Inter"]);

        catalog.extend(FontCatalog::from_families(["Zilla Slab", "Arial"]));
        assert_eq!(catalog.families().len(), 4);
        assert_eq!(catalog.families().last().map(String::as_str), Some("Zilla Slab"));
    }

    #[test]
    fn test_garbage_is_not_a_font() {
        let err = family_of(Path::new("junk.ttf"), b"definitely not a font").unwrap_err();
        assert!(matches!(err, FontError::Invalid { .. }));
        assert!(err.user_message().contains("junk.ttf"));
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = import_font_file(dir.path().join("missing.ttf")).await.unwrap_err();
        assert!(matches!(err, FontError::ReadError { .. }));
    }

    #[tokio::test]
    async fn test_import_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.otf");
        std::fs::write(&path, [0u8; 64]).unwrap();
        let err = import_font_file(path).await.unwrap_err();
        assert!(matches!(err, FontError::Invalid { .. }));
    }

    #[test]
    fn test_intern_reuses_names() {
        let a = intern("Motivation Test Sans");
        let b = intern(&String::from("Motivation Test Sans"));
        assert!(std::ptr::eq(a, b));
    }
}
