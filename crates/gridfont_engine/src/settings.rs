use serde::{Deserialize, Serialize};

use crate::{GlyphError, GlyphMap, Result, SEED_CHAR, SEED_PATH};

/// Store key under which the whole editor state is persisted.
pub const SETTINGS_KEY: &str = "fontEditorSetting";

/// The entire persisted editor state.
///
/// Wire shape (also the verbatim `font.json` export):
/// `{ "currentChar": "a", "pathList": { "a": [3,0.5,0.5, ...] } }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSetting {
    pub current_char: char,
    pub path_list: GlyphMap,
}

impl EditorSetting {
    /// State used when nothing has been persisted yet: the seed character
    /// with its placeholder glyph.
    pub fn seed() -> Self {
        let mut path_list = GlyphMap::new();
        path_list.insert(SEED_CHAR, SEED_PATH.clone());
        EditorSetting {
            current_char: SEED_CHAR,
            path_list,
        }
    }

    /// Parses persisted state.
    ///
    /// Any JSON or shape problem comes back as
    /// [`GlyphError::Deserialization`], so callers can tell corrupt state
    /// (reset or abort, their choice) from merely absent state.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| GlyphError::Deserialization { message: err.to_string() })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for EditorSetting {
    fn default() -> Self {
        EditorSetting::seed()
    }
}

/// The external key-value string store the editor persists into.
///
/// Mirrors the `get(key)` / `set(key, value)` surface of a browser-style
/// storage backend; the engine never assumes anything beyond that.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used by tests and by one-shot tools that load the
/// persisted state from somewhere else.
#[derive(Default)]
pub struct MemorySettingsStore {
    values: std::collections::HashMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        MemorySettingsStore::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_shape_uses_camel_case_keys() {
        let setting = EditorSetting::seed();
        let json = setting.to_json().unwrap();
        assert!(json.starts_with(r#"{"currentChar":"a","pathList":{"a":[3.0,0.25,0.25,"#));
        assert_eq!(setting, EditorSetting::from_json(&json).unwrap());
    }

    #[test]
    fn malformed_state_is_a_typed_error() {
        for bad in ["{", r#"{"currentChar":"a"}"#, r#"{"currentChar":"a","pathList":{"a":[1]}}"#] {
            assert!(
                matches!(EditorSetting::from_json(bad), Err(GlyphError::Deserialization { .. })),
                "{bad}"
            );
        }
    }
}
