use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::GlyphPath;

/// Insertion-ordered mapping from character to glyph path.
///
/// The iteration order is load-bearing: the packed codec emits one charset
/// segment per entry in exactly this order, so the map must never reorder
/// entries behind the caller's back. Entries are created lazily through
/// [`GlyphMap::entry`] and are appended at the end.
///
/// The charset is small, so a plain entry vector beats a hash map here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphMap {
    entries: Vec<(char, GlyphPath)>,
}

impl GlyphMap {
    pub fn new() -> Self {
        GlyphMap::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ch: char) -> Option<&GlyphPath> {
        self.entries.iter().find(|(c, _)| *c == ch).map(|(_, p)| p)
    }

    /// Live path for `ch`, materializing an empty one on first access.
    pub fn entry(&mut self, ch: char) -> &mut GlyphPath {
        if let Some(pos) = self.entries.iter().position(|(c, _)| *c == ch) {
            return &mut self.entries[pos].1;
        }
        self.entries.push((ch, GlyphPath::new()));
        &mut self.entries.last_mut().unwrap().1
    }

    pub fn insert(&mut self, ch: char, path: GlyphPath) {
        *self.entry(ch) = path;
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphPath)> {
        self.entries.iter().map(|(c, p)| (*c, p))
    }
}

impl Serialize for GlyphMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ch, path) in &self.entries {
            map.serialize_entry(&ch.to_string(), &path.to_triples())?;
        }
        map.end()
    }
}

struct GlyphMapVisitor;

impl<'de> Visitor<'de> for GlyphMapVisitor {
    type Value = GlyphMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of single characters to flat point triple arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<GlyphMap, A::Error> {
        let mut result = GlyphMap::new();
        while let Some((key, triples)) = access.next_entry::<String, Vec<f64>>()? {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(serde::de::Error::custom(format!("invalid glyph key {key:?}")));
            };
            let path = GlyphPath::from_triples(&triples).map_err(serde::de::Error::custom)?;
            result.insert(ch, path);
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for GlyphMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GlyphMapVisitor)
    }
}
