mod edit_operations;

use crate::{
    CANVAS_HEIGHT, CANVAS_WIDTH, EditorSetting, GlyphError, GlyphPath, Grid, RasterCanvas, Result, SETTINGS_KEY, SettingsStore, charset,
    render_edit_view,
};

/// Notification published to listeners after the session state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// The persisted editor setting changed (and was written to the store).
    Setting,
    /// The point selection changed.
    Selection(Option<usize>),
}

pub trait ChangeListener {
    fn on_change(&mut self, change: &Change);
}

/// The editor session: owns the persisted setting, the grid, the selection
/// and the preview surface, and routes every mutation through the
/// persistence and notification rules.
///
/// All state lives in this one value; mutations go through `&mut self`, so
/// exclusive access is enforced by the borrow rules rather than a lock.
pub struct EditState {
    setting: EditorSetting,
    grid: Grid,
    selection: Option<usize>,
    drag_active: bool,
    preview: RasterCanvas,
    listeners: Vec<Box<dyn ChangeListener>>,
    store: Box<dyn SettingsStore>,
}

impl EditState {
    /// Restores the session from the store, falling back to the seed glyph
    /// when nothing was persisted yet. Corrupt state is a
    /// [`GlyphError::Deserialization`] error, left to the caller to map to
    /// a reset or an abort.
    pub fn new(store: Box<dyn SettingsStore>) -> Result<Self> {
        EditState::with_grid(store, Grid::default())
    }

    pub fn with_grid(store: Box<dyn SettingsStore>, grid: Grid) -> Result<Self> {
        let setting = match store.get(SETTINGS_KEY) {
            Some(json) => EditorSetting::from_json(&json)?,
            None => {
                log::info!("no persisted editor setting, starting from the seed glyph");
                EditorSetting::seed()
            }
        };
        let mut state = EditState {
            setting,
            grid,
            selection: None,
            drag_active: false,
            preview: RasterCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            listeners: Vec::new(),
            store,
        };
        state.redraw();
        Ok(state)
    }

    pub fn current_char(&self) -> char {
        self.setting.current_char
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn setting(&self) -> &EditorSetting {
        &self.setting
    }

    pub fn preview(&self) -> &RasterCanvas {
        &self.preview
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// Live path of the current character, materialized on first access.
    pub fn current_path(&mut self) -> &GlyphPath {
        let ch = self.setting.current_char;
        self.setting.path_list.entry(ch)
    }

    /// Switches the edited character. Clears the selection; creates and
    /// deletes nothing.
    pub fn set_char(&mut self, ch: char) -> Result<()> {
        if !charset::contains(ch) {
            return Err(GlyphError::CharNotInCharset(ch));
        }
        self.drag_active = false;
        self.setting.current_char = ch;
        self.set_selection(None);
        self.commit()
    }

    /// Changes the selected point. Redraws but never persists.
    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            let len = self
                .setting
                .path_list
                .get(self.setting.current_char)
                .map_or(0, GlyphPath::len);
            if i >= len {
                return Err(GlyphError::IndexOutOfRange { index: i, len });
            }
        }
        self.set_selection(index);
        self.redraw();
        Ok(())
    }

    fn set_selection(&mut self, selection: Option<usize>) {
        if self.selection != selection {
            self.selection = selection;
            self.notify(Change::Selection(selection));
        }
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener.on_change(&change);
        }
    }

    fn redraw(&mut self) {
        let ch = self.setting.current_char;
        let Self {
            setting,
            preview,
            grid,
            selection,
            ..
        } = self;
        // Rendering reads the path without materializing it; only the edit
        // operations create map entries.
        let empty = GlyphPath::new();
        let path = setting.path_list.get(ch).unwrap_or(&empty);
        render_edit_view(preview, path, *grid, *selection);
    }

    fn persist(&mut self) -> Result<()> {
        let json = self.setting.to_json()?;
        self.store.set(SETTINGS_KEY, &json);
        Ok(())
    }

    /// Redraw + persist + notify, the rule every mutating operation ends
    /// with (except in-flight drags and pure selection changes).
    fn commit(&mut self) -> Result<()> {
        self.redraw();
        self.persist()?;
        self.notify(Change::Setting);
        Ok(())
    }
}
