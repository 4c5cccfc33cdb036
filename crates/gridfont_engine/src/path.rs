use crate::{GlyphError, PathPoint, PointType, Result};

/// Default position for a freshly inserted point.
pub const NEW_POINT_POSITION: (f64, f64) = (0.5, 0.5);

/// The ordered point sequence of one glyph.
///
/// The wire form is a flat `type, x, y, ...` triple stream whose length is
/// always a multiple of three. The first point only produces visible output
/// when it starts a subpath (`Line` or `Fill`); a leading `None`, `End` or
/// `Close` run renders nothing. That quirk is part of the format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphPath {
    points: Vec<PathPoint>,
}

impl GlyphPath {
    pub fn new() -> Self {
        GlyphPath::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    /// Parses the flat triple stream.
    pub fn from_triples(triples: &[f64]) -> Result<Self> {
        if triples.len() % 3 != 0 {
            return Err(GlyphError::InvalidPathLength(triples.len()));
        }
        let mut points = Vec::with_capacity(triples.len() / 3);
        for triple in triples.chunks_exact(3) {
            let code = triple[0] as u8;
            if f64::from(code) != triple[0] {
                return Err(GlyphError::NonIntegerPointType(triple[0]));
            }
            points.push(PathPoint::new(PointType::from_code(code)?, triple[1], triple[2]));
        }
        Ok(GlyphPath { points })
    }

    pub fn to_triples(&self) -> Vec<f64> {
        let mut triples = Vec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            triples.push(f64::from(p.point_type.code()));
            triples.push(p.x);
            triples.push(p.y);
        }
        triples
    }

    /// Inserts a new `None` point at `index` (appends when `None` is given)
    /// and returns the index it landed on.
    pub fn insert_point(&mut self, index: Option<usize>, position: Option<(f64, f64)>) -> Result<usize> {
        let index = index.unwrap_or(self.points.len());
        if index > self.points.len() {
            return Err(GlyphError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        let (x, y) = position.unwrap_or(NEW_POINT_POSITION);
        self.points.insert(index, PathPoint::new(PointType::None, x, y));
        Ok(index)
    }

    pub fn remove_point(&mut self, index: usize) -> Result<PathPoint> {
        if index >= self.points.len() {
            return Err(GlyphError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    pub fn set_point_type(&mut self, index: usize, point_type: PointType) -> Result<()> {
        match self.points.get_mut(index) {
            Some(p) => {
                p.point_type = point_type;
                Ok(())
            }
            None => Err(GlyphError::IndexOutOfRange {
                index,
                len: self.points.len(),
            }),
        }
    }

    /// Adds a normalized delta to a point. Deliberately unclamped.
    pub fn translate_point(&mut self, index: usize, dx: f64, dy: f64) -> Result<()> {
        match self.points.get_mut(index) {
            Some(p) => {
                p.x += dx;
                p.y += dy;
                Ok(())
            }
            None => Err(GlyphError::IndexOutOfRange {
                index,
                len: self.points.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn triples_roundtrip() {
        let triples = vec![3.0, 0.5, 0.5, 0.0, 0.75, 0.5, 1.0, 0.75, 0.75];
        let path = GlyphPath::from_triples(&triples).unwrap();
        assert_eq!(3, path.len());
        assert_eq!(PointType::Line, path.get(0).unwrap().point_type);
        assert_eq!(triples, path.to_triples());
    }

    #[test]
    fn bad_triple_streams_are_rejected() {
        assert!(matches!(
            GlyphPath::from_triples(&[3.0, 0.5]),
            Err(GlyphError::InvalidPathLength(2))
        ));
        assert!(matches!(
            GlyphPath::from_triples(&[7.0, 0.5, 0.5]),
            Err(GlyphError::InvalidPointType(7))
        ));
        assert!(matches!(
            GlyphPath::from_triples(&[2.5, 0.5, 0.5]),
            Err(GlyphError::NonIntegerPointType(v)) if (v - 2.5).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn insert_then_remove_restores_the_path() {
        let mut path = GlyphPath::from_triples(&[3.0, 0.1, 0.1, 1.0, 0.9, 0.9]).unwrap();
        let original = path.clone();
        let idx = path.insert_point(Some(1), None).unwrap();
        assert_eq!(1, idx);
        assert_eq!(PointType::None, path.get(1).unwrap().point_type);
        assert_eq!((0.5, 0.5), (path.get(1).unwrap().x, path.get(1).unwrap().y));
        path.remove_point(1).unwrap();
        assert_eq!(original, path);
    }

    #[test]
    fn insert_appends_without_index() {
        let mut path = GlyphPath::new();
        assert_eq!(0, path.insert_point(None, None).unwrap());
        assert_eq!(1, path.insert_point(None, Some((0.25, 0.75))).unwrap());
        assert_eq!(0.25, path.get(1).unwrap().x);
        assert!(path.insert_point(Some(5), None).is_err());
    }

    #[test]
    fn out_of_range_indices_are_typed_errors() {
        let mut path = GlyphPath::new();
        assert!(matches!(
            path.remove_point(0),
            Err(GlyphError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(path.set_point_type(0, PointType::Line).is_err());
        assert!(path.translate_point(0, 0.1, 0.1).is_err());
    }

    #[test]
    fn translate_is_unclamped() {
        let mut path = GlyphPath::from_triples(&[0.0, 0.9, 0.9]).unwrap();
        path.translate_point(0, 0.5, -1.0).unwrap();
        assert!((path.get(0).unwrap().x - 1.4).abs() < 1e-9);
        assert!((path.get(0).unwrap().y + 0.1).abs() < 1e-9);
    }
}
