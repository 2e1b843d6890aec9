//! State document I/O
//!
//! Reading is permissive: a missing file is created empty and an unreadable
//! or malformed file yields an empty document. Writing overwrites the whole
//! file with indented JSON.

use crate::error::{StoreError, StoreResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Create the state file containing `{}` if it does not exist yet
pub fn ensure_state_file(path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, "{}").map_err(|source| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}

/// Load the state document, substituting `{}` on any failure
pub fn load(path: impl AsRef<Path>) -> Value {
    let path = path.as_ref();

    if let Err(e) = ensure_state_file(path) {
        log::warn!("{}", e);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            let err = StoreError::ReadError {
                path: path.to_path_buf(),
                source,
            };
            log::warn!("{}; starting from an empty document", err);
            return empty_document();
        }
    };

    match serde_json::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!(
                "Malformed state file {}: {}; starting from an empty document",
                path.display(),
                e
            );
            empty_document()
        }
    }
}

/// Recursively fill absent keys of `doc` from `defaults`
///
/// Present keys are never overwritten. A non-object `doc` is treated as an
/// empty object.
pub fn merge_defaults(doc: Value, defaults: &Value) -> Value {
    let mut target = match doc {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if let Value::Object(defaults) = defaults {
        for (key, default) in defaults {
            match target.get_mut(key) {
                None => {
                    let filled = match default {
                        Value::Object(_) => merge_defaults(empty_document(), default),
                        other => other.clone(),
                    };
                    target.insert(key.clone(), filled);
                }
                Some(present) if present.is_object() && default.is_object() => {
                    let taken = std::mem::take(present);
                    *present = merge_defaults(taken, default);
                }
                Some(_) => {}
            }
        }
    }

    Value::Object(target)
}

/// Overwrite the state file with the full document
pub fn save(path: impl AsRef<Path>, doc: &Value) -> StoreResult<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, content).map_err(|source| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_document;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("widget_state.json");

        assert_eq!(load(&path), json!({}));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("widget_state.json");
        std::fs::write(&path, "{\"alpha\": 0.9,").unwrap();

        let doc = load(&path);
        assert_eq!(doc, json!({}));
        assert_eq!(merge_defaults(doc, &default_document()), default_document());
    }

    #[test]
    fn test_merge_empty_yields_defaults() {
        let merged = merge_defaults(json!({}), &default_document());
        assert_eq!(merged, default_document());
    }

    #[test]
    fn test_merge_non_object_root() {
        let merged = merge_defaults(json!([1, 2, 3]), &default_document());
        assert_eq!(merged, default_document());
    }

    #[test]
    fn test_merge_keeps_present_fields() {
        let doc = json!({
            "alpha": 0.7,
            "colors": {"background": "#000000"},
            "content": {"text": "Hello", "tags": {}},
            "custom": [1, 2]
        });
        let merged = merge_defaults(doc, &default_document());

        assert_eq!(merged["alpha"], json!(0.7));
        assert_eq!(merged["colors"]["background"], "#000000");
        assert_eq!(merged["colors"]["text"], "#FFFFFF");
        assert_eq!(merged["colors"]["border"], "#222222");
        assert_eq!(merged["content"]["text"], "Hello");
        assert_eq!(merged["base_font"]["family"], "Segoe UI");
        assert_eq!(merged["custom"], json!([1, 2]));
    }

    #[test]
    fn test_merge_keeps_present_non_object_over_object_default() {
        let merged = merge_defaults(json!({"colors": "mono"}), &default_document());
        assert_eq!(merged["colors"], "mono");
    }

    #[test]
    fn test_merge_does_not_fill_inside_present_tags() {
        let doc = json!({"content": {"tags": {"bold": {"ranges": []}}}});
        let merged = merge_defaults(doc, &default_document());
        assert_eq!(merged["content"]["tags"], json!({"bold": {"ranges": []}}));
        assert_eq!(merged["content"]["text"], "");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("widget_state.json");

        let mut doc = default_document();
        doc["geometry"] = json!("800x400+-20+35");
        doc["alpha"] = json!(0.65);
        doc["colors"]["accent"] = json!("#ff00ff");
        doc["base_font"] = json!({"family": "Fira Sans", "size": 22, "weight": "bold", "slant": "italic"});
        doc["content"] = json!({
            "text": "Keep going\nüber alles",
            "tags": {
                "size_18": {
                    "config": {"font": {"family": "Fira Sans", "size": 18, "weight": "normal",
                                        "slant": "roman", "underline": 0, "overstrike": 0}},
                    "ranges": [["1.0", "1.4"], ["2.0", "2.4"]]
                }
            }
        });

        save(&path, &doc).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"geometry\""));
        assert_eq!(load(&path), doc);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("widget_state.json");
        let err = save(&path, &json!({})).unwrap_err();
        assert!(matches!(err, StoreError::WriteError { .. }));
    }
}
