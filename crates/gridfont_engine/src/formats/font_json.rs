use super::OutputFormat;
use crate::{EditorSetting, Grid, Result};

/// Verbatim export: the persisted editor state, unchanged.
#[derive(Default)]
pub struct FontJson {}

impl OutputFormat for FontJson {
    fn file_name(&self) -> &str {
        "font.json"
    }

    fn to_bytes(&self, setting: &EditorSetting, _grid: Grid) -> Result<Vec<u8>> {
        Ok(setting.to_json()?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_matches_the_persisted_state() {
        let setting = EditorSetting::seed();
        let bytes = FontJson::default().to_bytes(&setting, Grid::default()).unwrap();
        assert_eq!(setting.to_json().unwrap().into_bytes(), bytes);
        assert_eq!("font.json", FontJson::default().file_name());
    }
}
