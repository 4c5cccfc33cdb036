use crate::GlyphPath;

/// Every character the editor can hold a glyph for, in the fixed order the
/// character sheet and the packed export enumerate them.
pub const CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789.,!?-";

/// Character seeded with a default glyph on first start.
pub const SEED_CHAR: char = 'a';

pub fn contains(ch: char) -> bool {
    CHARSET.contains(ch)
}

pub fn index_of(ch: char) -> Option<usize> {
    CHARSET.chars().position(|c| c == ch)
}

lazy_static::lazy_static! {
    /// Placeholder glyph for the seed character: a stroked box in the middle
    /// of the surface. Loaded whenever no persisted state exists.
    pub static ref SEED_PATH: GlyphPath = GlyphPath::from_triples(&[
        3.0, 0.25, 0.25,
        0.0, 0.75, 0.25,
        0.0, 0.75, 0.75,
        2.0, 0.25, 0.75,
    ])
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_contains_the_seed() {
        assert!(contains(SEED_CHAR));
        assert_eq!(Some(0), index_of(SEED_CHAR));
        assert!(!contains('A'));
    }

    #[test]
    fn seed_path_is_a_closed_box() {
        assert_eq!(4, SEED_PATH.len());
        assert!(SEED_PATH.get(0).unwrap().point_type.starts_subpath());
        assert!(SEED_PATH.get(3).unwrap().point_type.ends_subpath());
    }
}
