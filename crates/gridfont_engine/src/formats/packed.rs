//! Bit-packed base64 export of the glyph set.
//!
//! Per character, point types pack into 3-bit fields and the position
//! stream into 6-bit fields (a leading point count, then one grid cell
//! index per point), MSB-first with the final byte zero-padded, each
//! base64-encoded. The per-character strings are comma-joined; the charset
//! string records which segment belongs to which character, in map order.

use base64::{Engine, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::{EditorSetting, GlyphError, GlyphMap, GlyphPath, Grid, Result};

use super::OutputFormat;

const TYPE_BITS: u32 = 3;
const SHAPE_BITS: u32 = 6;

/// Point count limit per character imposed by the 6-bit count field.
pub const MAX_POINTS: usize = 63;

/// The compact wire object written to `font-base64.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedFont {
    pub point_type: String,
    pub point_pos: String,
    pub charset: String,
    pub grid: [u32; 2],
}

impl PackedFont {
    /// Encodes the glyph map in its iteration order.
    ///
    /// All bit-width preconditions are checked before a single byte is
    /// produced; an overflowing path or grid never yields partial output.
    pub fn encode(map: &GlyphMap, grid: Grid) -> Result<PackedFont> {
        if grid.cells() > 1_u32 << SHAPE_BITS {
            return Err(GlyphError::GridTooLarge(grid.res_x(), grid.res_y()));
        }
        for (ch, path) in map.iter() {
            if path.len() > MAX_POINTS {
                return Err(GlyphError::PointCountOverflow { ch, count: path.len() });
            }
        }

        let mut type_segments = Vec::with_capacity(map.len());
        let mut pos_segments = Vec::with_capacity(map.len());
        let mut charset = String::with_capacity(map.len());

        for (ch, path) in map.iter() {
            let mut types = BitWriter::new();
            let mut shapes = BitWriter::new();
            shapes.write(path.len() as u8, SHAPE_BITS);
            for point in path.points() {
                types.write(point.point_type.code(), TYPE_BITS);
                let (qx, qy) = grid.snap(point.x, point.y);
                shapes.write(grid.cell_index(qx, qy)?, SHAPE_BITS);
            }
            type_segments.push(general_purpose::STANDARD.encode(types.into_bytes()));
            pos_segments.push(general_purpose::STANDARD.encode(shapes.into_bytes()));
            charset.push(ch);
        }

        Ok(PackedFont {
            point_type: type_segments.join(","),
            point_pos: pos_segments.join(","),
            charset,
            grid: [grid.res_x(), grid.res_y()],
        })
    }

    /// Inverse of [`PackedFont::encode`]: positions come back grid-snapped,
    /// point types come back exactly.
    pub fn decode(&self) -> Result<(GlyphMap, Grid)> {
        let grid = Grid::new(self.grid[0], self.grid[1])?;
        let mut map = GlyphMap::new();
        if self.charset.is_empty() {
            return Ok((map, grid));
        }

        let chars: Vec<char> = self.charset.chars().collect();
        let type_segments: Vec<&str> = self.point_type.split(',').collect();
        let pos_segments: Vec<&str> = self.point_pos.split(',').collect();
        if type_segments.len() != chars.len() || pos_segments.len() != chars.len() {
            return Err(GlyphError::MalformedPackedFont {
                message: format!(
                    "charset has {} entries but {} type and {} position segments",
                    chars.len(),
                    type_segments.len(),
                    pos_segments.len()
                ),
            });
        }

        for ((&ch, type_segment), pos_segment) in chars.iter().zip(&type_segments).zip(&pos_segments) {
            let type_bytes = general_purpose::STANDARD.decode(type_segment)?;
            let pos_bytes = general_purpose::STANDARD.decode(pos_segment)?;

            let mut shapes = BitReader::new(&pos_bytes);
            let count = shapes.read(SHAPE_BITS).ok_or(GlyphError::TruncatedStream)?;

            let mut types = BitReader::new(&type_bytes);
            let mut triples = Vec::with_capacity(usize::from(count) * 3);
            for _ in 0..count {
                let code = types.read(TYPE_BITS).ok_or(GlyphError::TruncatedStream)?;
                let idx = shapes.read(SHAPE_BITS).ok_or(GlyphError::TruncatedStream)?;
                if u32::from(idx) >= grid.cells() {
                    return Err(GlyphError::MalformedPackedFont {
                        message: format!("cell index {idx} exceeds the {}x{} grid", grid.res_x(), grid.res_y()),
                    });
                }
                let (x, y) = grid.cell_position(idx);
                triples.push(f64::from(code));
                triples.push(x);
                triples.push(y);
            }
            map.insert(ch, GlyphPath::from_triples(&triples)?);
        }

        Ok((map, grid))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<PackedFont> {
        serde_json::from_slice(bytes).map_err(|err| GlyphError::MalformedPackedFont { message: err.to_string() })
    }
}

/// Export format wrapper around [`PackedFont`].
#[derive(Default)]
pub struct PackedBase64 {}

impl OutputFormat for PackedBase64 {
    fn file_name(&self) -> &str {
        "font-base64.json"
    }

    fn to_bytes(&self, setting: &EditorSetting, grid: Grid) -> Result<Vec<u8>> {
        let packed = PackedFont::encode(&setting.path_list, grid)?;
        Ok(serde_json::to_vec(&packed)?)
    }
}

/// MSB-first fixed-width bit field writer; the final byte is zero-padded.
struct BitWriter {
    bytes: Vec<u8>,
    used: u32,
}

impl BitWriter {
    fn new() -> Self {
        BitWriter { bytes: Vec::new(), used: 8 }
    }

    fn write(&mut self, value: u8, width: u32) {
        for shift in (0..width).rev() {
            if self.used == 8 {
                self.bytes.push(0);
                self.used = 0;
            }
            let bit = (value >> shift) & 1;
            *self.bytes.last_mut().unwrap() |= bit << (7 - self.used);
            self.used += 1;
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        BitReader { bytes, pos: 0 }
    }

    fn read(&mut self, width: u32) -> Option<u8> {
        let mut value = 0;
        for _ in 0..width {
            let byte = *self.bytes.get(self.pos / 8)?;
            value = (value << 1) | ((byte >> (7 - self.pos % 8)) & 1);
            self.pos += 1;
        }
        Some(value)
    }
}
