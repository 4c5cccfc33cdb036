#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

mod error;
pub use error::*;

mod grid;
pub use grid::*;

mod point;
pub use point::*;

mod path;
pub use path::*;

pub mod charset;
pub use charset::{CHARSET, SEED_CHAR, SEED_PATH};

mod glyph_map;
pub use glyph_map::*;

mod settings;
pub use settings::*;

mod rendering;
pub use rendering::*;

pub mod formats;
pub use formats::*;

pub mod editor;
