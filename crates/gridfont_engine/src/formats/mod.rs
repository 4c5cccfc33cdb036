mod font_json;
pub use font_json::*;

mod packed;
pub use packed::*;

use crate::{EditorSetting, Grid, Result};

/// An export format producing one downloadable artifact from the glyph set.
pub trait OutputFormat {
    /// Artifact file name handed to the save sink.
    fn file_name(&self) -> &str;

    fn to_bytes(&self, setting: &EditorSetting, grid: Grid) -> Result<Vec<u8>>;
}

/// The external sink export artifacts are handed to (a file system, a
/// browser download trigger, a test buffer).
pub trait SaveSink {
    fn save_blob(&mut self, bytes: &[u8], file_name: &str) -> Result<()>;
}
