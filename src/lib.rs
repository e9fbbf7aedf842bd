pub mod font;

pub use font::types::{BlockSpec, CharacterBlock, FontConfig, Glyph, DEFAULT_BLOCKS};
pub use font::{compile, CompiledFont};
