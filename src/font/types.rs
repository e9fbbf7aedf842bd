/// Font Database Compiler Data Types

use fxhash::FxHashMap;

// ========== Format constants ==========

/// Database magic bytes ("FO" in ASCII)
pub const DB_MAGIC: [u8; 2] = *b"FO";
/// Database format version
pub const DB_VERSION: u8 = 1;
/// Block index flag: block stores fixed 16 pixel wide characters
pub const FLAG_FW16: u32 = 0x0001;
/// Index entry sentinel: codepoint not present in the corpus
pub const ABSENT_INDEX: u16 = 0xFFFF;
/// Column count substituted for fully blank glyphs. Must be at least 1!
pub const SPACE_PIXELS: usize = 4;
/// A variable-width block's data pool offset must fit in 13 bits
pub const MAX_POOL_WORDS: usize = 8192;
/// Maximum trimmed column count encodable in the 3-bit width field
pub const MAX_CHAR_COLUMNS: usize = 8;

/// Default block set requested when no --font-blocks is given
pub const DEFAULT_BLOCKS: &str = "ascii,latin,latin-a,latin-b,greek,cyrilic";

// ========== Block types ==========

/// A named block declaration: an inclusive codepoint range with its
/// declared width class (8 or 16 pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub start: u32,
    pub end: u32,
    pub width: u8,
}

impl BlockSpec {
    pub fn new(start: u32, end: u32, width: u8) -> Self {
        Self { start, end, width }
    }
}

/// A maximal contiguous run of codepoints sharing one width class,
/// produced by merging adjacent BlockSpecs. Kept sorted by start
/// codepoint so the consumer can binary-search the block index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterBlock {
    pub start: u32,
    pub end: u32,
    pub width: u8,
}

impl CharacterBlock {
    pub fn char_count(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_fixed(&self) -> bool {
        self.width == 16
    }
}

// ========== Glyph types ==========

/// A column-major glyph. Each column is a 16-bit mask over pixel rows
/// with row 0 at the least significant bit; column 0 is the visually
/// leftmost column. Immutable once built by the transposer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub codepoint: u32,
    pub columns: Vec<u16>,
}

/// Map from codepoint to its transposed column-major glyph
pub type GlyphMap = FxHashMap<u32, Glyph>;

// ========== Configuration ==========

/// Immutable compiler configuration: the font block table, enumerated as
/// {name: (start, end, width)}.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub blocks: FxHashMap<String, BlockSpec>,
}

impl FontConfig {
    pub fn with_blocks(blocks: Vec<(&str, BlockSpec)>) -> Self {
        Self {
            blocks: blocks
                .into_iter()
                .map(|(name, spec)| (name.to_string(), spec))
                .collect(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::with_blocks(vec![
            ("ascii", BlockSpec::new(0, 0x7F, 8)),
            ("latin", BlockSpec::new(0x80, 0xFF, 8)), // Most european latin-based languages
            ("latin-a", BlockSpec::new(0x100, 0x17F, 8)),
            ("latin-b", BlockSpec::new(0x180, 0x24F, 8)),
            ("greek", BlockSpec::new(0x370, 0x3FF, 8)), // greek
            ("cyrilic", BlockSpec::new(0x400, 0x4FF, 8)), // russian/ukr/bul...
            ("hangul-j", BlockSpec::new(0x1100, 0x11FF, 16)), // Hangul Jamo Characters
            ("check", BlockSpec::new(0x2610, 0x2611, 8)), // Symbols (ticks)
            ("arrows", BlockSpec::new(0x2BC0, 0x2BCF, 8)), // Symbols (arrows)
            ("cjk-sym", BlockSpec::new(0x3000, 0x3009, 16)), // CJK Symbols and Punctuation
            ("hiragana", BlockSpec::new(0x3040, 0x309F, 16)), // Hiragana block
            ("katakana", BlockSpec::new(0x30A0, 0x30FF, 16)), // Katakana block
            ("hangul", BlockSpec::new(0xAC00, 0xD7A3, 16)), // Hangul Syllables (pre-composed)
            ("cjk-uni", BlockSpec::new(0x4E00, 0x9FEF, 16)), // Unified CJK Ideographs
            ("fixwidth", BlockSpec::new(0xFF01, 0xFF20, 16)), // Full-width characters
        ])
    }
}
