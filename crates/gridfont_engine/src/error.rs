//! Unified error types for gridfont_engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Debug, Error)]
pub enum GlyphError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Persisted state ===
    #[error("Malformed editor setting: {message}")]
    Deserialization { message: String },

    // === Editing ===
    #[error("Point index {index} out of range (path has {len} points)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Character '{0}' is not part of the charset")]
    CharNotInCharset(char),

    #[error("No drag gesture is active")]
    NoActiveDrag,

    // === Path data ===
    #[error("Flattened path length {0} is not a multiple of 3")]
    InvalidPathLength(usize),

    #[error("Unknown point type code {0}")]
    InvalidPointType(u8),

    #[error("Point type value {0} is not an integer code")]
    NonIntegerPointType(f64),

    #[error("Grid resolution must be at least 2, got {0}x{1}")]
    GridResolutionTooSmall(u32, u32),

    // === Packed codec ===
    #[error("Path of '{ch}' has {count} points, the packed format allows at most 63")]
    PointCountOverflow { ch: char, count: usize },

    #[error("Point ({x}, {y}) quantizes outside the packable cell range")]
    GridCellOverflow { x: f64, y: f64 },

    #[error("Grid {0}x{1} has more cells than a 6 bit index can address")]
    GridTooLarge(u32, u32),

    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Packed stream ended prematurely")]
    TruncatedStream,

    #[error("Packed font data is malformed: {message}")]
    MalformedPackedFont { message: String },
}

pub type Result<T> = std::result::Result<T, GlyphError>;
