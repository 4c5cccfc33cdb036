use crate::{GlyphError, OutputFormat, PointType, Result, SaveSink};

use super::{Change, EditState};

impl EditState {
    /// Inserts a `None` point into the current path (appended when no index
    /// is given, at `(0.5, 0.5)` when no position is given) and selects it.
    pub fn add_point(&mut self, index: Option<usize>, position: Option<(f64, f64)>) -> Result<usize> {
        let ch = self.setting.current_char;
        let inserted = self.setting.path_list.entry(ch).insert_point(index, position)?;
        self.set_selection(Some(inserted));
        self.commit()?;
        Ok(inserted)
    }

    /// Removes a point. Deleting the last point leaves the character with
    /// an empty path, not an absent one.
    pub fn delete_point(&mut self, index: usize) -> Result<()> {
        let ch = self.setting.current_char;
        self.setting.path_list.entry(ch).remove_point(index)?;
        let selection = match self.selection {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.set_selection(selection);
        self.commit()
    }

    pub fn set_point_type(&mut self, index: usize, point_type: PointType) -> Result<()> {
        let ch = self.setting.current_char;
        self.setting.path_list.entry(ch).set_point_type(index, point_type)?;
        self.commit()
    }

    /// Starts a drag gesture on a point and selects it.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        let len = self.current_path().len();
        if index >= len {
            return Err(GlyphError::IndexOutOfRange { index, len });
        }
        self.drag_active = true;
        self.set_selection(Some(index));
        self.redraw();
        Ok(())
    }

    /// Moves the dragged point by a normalized delta. Redraws the live
    /// preview only; persistence and the setting notification are deferred
    /// to [`EditState::end_drag`] so a gesture writes the store once.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> Result<()> {
        if !self.drag_active {
            return Err(GlyphError::NoActiveDrag);
        }
        let index = self.selection.ok_or(GlyphError::NoActiveDrag)?;
        let ch = self.setting.current_char;
        self.setting.path_list.entry(ch).translate_point(index, dx, dy)?;
        self.redraw();
        Ok(())
    }

    pub fn end_drag(&mut self) -> Result<()> {
        if !self.drag_active {
            return Err(GlyphError::NoActiveDrag);
        }
        self.drag_active = false;
        self.commit()
    }

    /// Encodes the glyph set with `format` and hands the artifact to the
    /// sink.
    pub fn export(&self, format: &dyn OutputFormat, sink: &mut dyn SaveSink) -> Result<()> {
        let bytes = format.to_bytes(&self.setting, self.grid)?;
        log::debug!("exporting {} ({} bytes)", format.file_name(), bytes.len());
        sink.save_blob(&bytes, format.file_name())
    }
}
