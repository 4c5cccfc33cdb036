use crate::{GlyphError, Result};

/// Role of a point inside a glyph path.
///
/// The numeric codes are part of both wire formats and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PointType {
    /// Extends the current subpath with a line segment.
    None = 0,
    /// Last point of a subpath; strokes or fills it.
    End = 1,
    /// Like [`PointType::End`] but connects back to the subpath start first.
    Close = 2,
    /// Starts a stroked subpath.
    Line = 3,
    /// Starts a filled subpath.
    Fill = 4,
}

impl PointType {
    pub fn from_code(code: u8) -> Result<PointType> {
        match code {
            0 => Ok(PointType::None),
            1 => Ok(PointType::End),
            2 => Ok(PointType::Close),
            3 => Ok(PointType::Line),
            4 => Ok(PointType::Fill),
            _ => Err(GlyphError::InvalidPointType(code)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn starts_subpath(self) -> bool {
        matches!(self, PointType::Line | PointType::Fill)
    }

    pub fn ends_subpath(self) -> bool {
        matches!(self, PointType::End | PointType::Close)
    }
}

/// A typed point with coordinates normalized to the unit square.
///
/// Coordinates may temporarily leave `[0, 1]` while a point is dragged;
/// nothing clamps them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub point_type: PointType,
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(point_type: PointType, x: f64, y: f64) -> Self {
        PathPoint { point_type, x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for code in 0..5 {
            assert_eq!(code, PointType::from_code(code).unwrap().code());
        }
        assert!(PointType::from_code(5).is_err());
    }
}
