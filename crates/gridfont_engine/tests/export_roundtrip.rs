use std::collections::HashMap;

use gridfont_engine::editor::EditState;
use gridfont_engine::{
    EditorSetting, FontJson, MemorySettingsStore, PackedBase64, PackedFont, PointType, Result, SETTINGS_KEY, SaveSink, SettingsStore,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct CaptureSink(HashMap<String, Vec<u8>>);

impl SaveSink for CaptureSink {
    fn save_blob(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        self.0.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[test]
fn session_edits_survive_both_exports() {
    init_logging();
    let mut state = EditState::new(Box::new(MemorySettingsStore::new())).unwrap();

    // Sculpt 'b' next to the seeded 'a'.
    state.set_char('b').unwrap();
    state.add_point(None, Some((0.25, 0.25))).unwrap();
    state.set_point_type(0, PointType::Line).unwrap();
    state.add_point(None, Some((0.75, 0.5))).unwrap();
    state.add_point(None, Some((0.75, 0.75))).unwrap();
    state.set_point_type(2, PointType::End).unwrap();

    let mut sink = CaptureSink(HashMap::new());
    state.export(&FontJson::default(), &mut sink).unwrap();
    state.export(&PackedBase64::default(), &mut sink).unwrap();

    // The verbatim dump is exactly the persisted state.
    let json = &sink.0["font.json"];
    let dumped = EditorSetting::from_json(std::str::from_utf8(json).unwrap()).unwrap();
    assert_eq!(*state.setting(), dumped);
    assert_eq!('b', dumped.current_char);

    // The packed dump decodes back to the grid-snapped glyph set, in
    // charset-segment order.
    let packed = PackedFont::from_bytes(&sink.0["font-base64.json"]).unwrap();
    assert_eq!("ab", packed.charset);

    let (decoded, grid) = packed.decode().unwrap();
    assert_eq!(state.grid(), grid);
    for (ch, original) in state.setting().path_list.iter() {
        let back = decoded.get(ch).unwrap();
        assert_eq!(original.len(), back.len(), "point count of '{ch}'");
        for (a, b) in original.points().iter().zip(back.points()) {
            assert_eq!(a.point_type, b.point_type);
            assert_eq!(grid.snap(a.x, a.y), (b.x, b.y));
        }
    }
}

#[test]
fn a_second_session_resumes_from_the_persisted_store() {
    init_logging();
    let mut first = EditState::new(Box::new(MemorySettingsStore::new())).unwrap();
    first.set_char('c').unwrap();
    first.add_point(None, Some((0.375, 0.625))).unwrap();
    let json = first.store().get(SETTINGS_KEY).unwrap();

    let mut store = MemorySettingsStore::new();
    store.set(SETTINGS_KEY, &json);
    let mut second = EditState::new(Box::new(store)).unwrap();

    assert_eq!('c', second.current_char());
    assert_eq!(1, second.current_path().len());
    assert_eq!(0.375, second.current_path().get(0).unwrap().x);
}
