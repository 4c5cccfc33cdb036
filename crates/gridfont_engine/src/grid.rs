use crate::{GlyphError, Result};

/// Quantization grid resolution for the editing surface.
///
/// Coordinates are normalized to the unit square; the grid snaps them to
/// `res_x` * `res_y` evenly spaced steps. The same grid drives the packed
/// codec's cell indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    res_x: u32,
    res_y: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid { res_x: 8, res_y: 8 }
    }
}

impl Grid {
    pub fn new(res_x: u32, res_y: u32) -> Result<Self> {
        if res_x < 2 || res_y < 2 {
            return Err(GlyphError::GridResolutionTooSmall(res_x, res_y));
        }
        Ok(Grid { res_x, res_y })
    }

    pub fn res_x(self) -> u32 {
        self.res_x
    }

    pub fn res_y(self) -> u32 {
        self.res_y
    }

    /// Number of cells addressable by the packed codec.
    pub fn cells(self) -> u32 {
        (self.res_x - 1) * (self.res_y - 1)
    }

    /// Snaps a normalized coordinate pair to the nearest grid step.
    ///
    /// Pure and idempotent; values outside `[0, 1]` snap outside the unit
    /// square without error.
    pub fn snap(self, x: f64, y: f64) -> (f64, f64) {
        (
            (x * f64::from(self.res_x) + 0.5).floor() / f64::from(self.res_x),
            (y * f64::from(self.res_y) + 0.5).floor() / f64::from(self.res_y),
        )
    }

    /// Linear cell index of an already snapped position.
    ///
    /// Positions snapping to a zero or one coordinate have no cell and are
    /// rejected; so is anything outside the unit square.
    pub fn cell_index(self, qx: f64, qy: f64) -> Result<u8> {
        let gx = (qx * f64::from(self.res_x)).round() as i64 - 1;
        let gy = (qy * f64::from(self.res_y)).round() as i64 - 1;
        if gx < 0 || gy < 0 || gx > i64::from(self.res_x) - 2 || gy > i64::from(self.res_y) - 2 {
            return Err(GlyphError::GridCellOverflow { x: qx, y: qy });
        }
        Ok((gy * (i64::from(self.res_x) - 1) + gx) as u8)
    }

    /// Inverse of [`Grid::cell_index`].
    pub fn cell_position(self, idx: u8) -> (f64, f64) {
        let gx = u32::from(idx) % (self.res_x - 1);
        let gy = u32::from(idx) / (self.res_x - 1);
        (
            f64::from(gx + 1) / f64::from(self.res_x),
            f64::from(gy + 1) / f64::from(self.res_y),
        )
    }
}
