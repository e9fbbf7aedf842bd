/// Width Classifier & Transposer
///
/// Applies the block table width overrides and converts row-major
/// bitmaps into the column-major form the database stores.

use super::corpus::FontCorpus;
use super::types::{FontConfig, Glyph, GlyphMap};
use log::info;

/// Force every codepoint covered by the block table to its block's
/// declared width, replacing the width implied by the source encoding.
/// The database cannot mix 8-wide and 16-wide characters inside one
/// block; some charsets (Hiragana in particular) ship half-width source
/// data that would otherwise do exactly that. Runs strictly before
/// transposition.
pub fn apply_width_overrides(corpus: &mut FontCorpus, config: &FontConfig) {
    for spec in config.blocks.values() {
        for codepoint in spec.start..=spec.end {
            if let Some(width) = corpus.widths.get_mut(&codepoint) {
                *width = spec.width;
            }
        }
    }
}

/// Transpose every loaded bitmap into column-major form: a glyph of
/// width W becomes W columns, column i holding bit r iff row r has its
/// (W-1-i)-th bit set. Bit order reverses between the row-major source
/// and the column target so column 0 is the visually leftmost column.
pub fn transpose_corpus(corpus: &FontCorpus) -> GlyphMap {
    let mut glyphs = GlyphMap::default();

    for (&codepoint, rows) in &corpus.bitmaps {
        let width = corpus.widths[&codepoint];
        glyphs.insert(
            codepoint,
            Glyph {
                codepoint,
                columns: transpose_rows(rows, width),
            },
        );
    }

    info!("Total number of characters in database: {}", glyphs.len());
    glyphs
}

fn transpose_rows(rows: &[u16], width: u8) -> Vec<u16> {
    let width = width as usize;
    let mut columns = vec![0u16; width];
    for (r, &row) in rows.iter().enumerate() {
        for (i, column) in columns.iter_mut().enumerate() {
            if row & (1 << (width - 1 - i)) != 0 {
                *column |= 1 << r;
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::types::BlockSpec;
    use fxhash::FxHashMap;

    #[test]
    fn test_transpose_leftmost_column_is_msb() {
        // Width 8: row bit 7 lands in column 0
        let mut rows = vec![0u16; 16];
        rows[0] = 0b1000_0000;
        rows[5] = 0b0000_0001;
        let columns = transpose_rows(&rows, 8);
        assert_eq!(columns.len(), 8);
        assert_eq!(columns[0], 1 << 0);
        assert_eq!(columns[7], 1 << 5);
        assert!(columns[1..7].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_transpose_16_wide() {
        let mut rows = vec![0u16; 16];
        rows[15] = 0x8000;
        let columns = transpose_rows(&rows, 16);
        assert_eq!(columns.len(), 16);
        assert_eq!(columns[0], 1 << 15);
        assert!(columns[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_width_override_wins_over_source() {
        let mut bitmaps = FxHashMap::default();
        let mut widths = FxHashMap::default();
        bitmaps.insert(0x3041u32, vec![0u16; 16]);
        widths.insert(0x3041u32, 8u8); // source implies half-width
        let mut corpus = FontCorpus { bitmaps, widths };

        let config = FontConfig::with_blocks(vec![("hiragana", BlockSpec::new(0x3040, 0x309F, 16))]);
        apply_width_overrides(&mut corpus, &config);
        assert_eq!(corpus.widths[&0x3041], 16);

        let glyphs = transpose_corpus(&corpus);
        assert_eq!(glyphs[&0x3041].columns.len(), 16);
    }

    #[test]
    fn test_override_ignores_uncovered_codepoints() {
        let mut bitmaps = FxHashMap::default();
        let mut widths = FxHashMap::default();
        bitmaps.insert(0x9999u32, vec![0u16; 16]);
        widths.insert(0x9999u32, 8u8);
        let mut corpus = FontCorpus { bitmaps, widths };

        let config = FontConfig::with_blocks(vec![("ascii", BlockSpec::new(0, 0x7F, 8))]);
        apply_width_overrides(&mut corpus, &config);
        assert_eq!(corpus.widths[&0x9999], 8);
    }
}
