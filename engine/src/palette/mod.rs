//! # Palette Generator
//!
//! Builds complete, validated color palettes from three seed colors. Light and
//! dark palettes are always produced as a pair from the same seeds.
//!
//! - [`generate_palette`] - strict, typed entry point
//! - [`generate_palette_from_strs`] - lenient entry point that never fails and
//!   falls back to the safe default seeds
//! - [`PaletteValidator`] - the palette invariant check used before any palette
//!   is accepted

pub mod color;
pub mod generator;
pub mod types;
pub mod validation;

pub use color::Rgb;
pub use generator::{
    ThemeSeeds, fallback_seeds, generate_palette, generate_palette_from_strs,
    generate_palette_pair,
};
pub use types::{Palette, PaletteMode, PaletteRole};
pub use validation::{ColorSetValidator, PaletteValidator};
