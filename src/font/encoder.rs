/// Block Encoders
///
/// Serializes one CharacterBlock into its payload bytes. Fixed 16px
/// blocks store 16 column words per codepoint, directly addressable by
/// the renderer. Variable-width blocks store a packed 16-bit index per
/// codepoint (3 bits of width, 13 bits of pool offset) followed by a
/// content-deduplicated pool of trimmed column data.

use super::types::{
    CharacterBlock, GlyphMap, ABSENT_INDEX, MAX_CHAR_COLUMNS, MAX_POOL_WORDS, SPACE_PIXELS,
};
use fxhash::FxHashMap;
use log::info;

pub fn encode_block(block: &CharacterBlock, glyphs: &GlyphMap) -> Result<Vec<u8>, String> {
    check_column_counts(block, glyphs)?;
    if block.is_fixed() {
        encode_fixed(block, glyphs)
    } else {
        encode_variable(block, glyphs)
    }
}

/// Every glyph present in the block must carry exactly the block's
/// declared column count. The override pass guarantees this for any
/// corpus the block table covers; a mismatch means the table and the
/// corpus disagree and the output would be unparseable.
fn check_column_counts(block: &CharacterBlock, glyphs: &GlyphMap) -> Result<(), String> {
    for codepoint in block.start..=block.end {
        if let Some(glyph) = glyphs.get(&codepoint) {
            if glyph.columns.len() != block.width as usize {
                return Err(format!(
                    "Codepoint {:#X} has {} columns but block {:#X}-{:#X} is {} wide",
                    codepoint,
                    glyph.columns.len(),
                    block.start,
                    block.end,
                    block.width
                ));
            }
        }
    }
    Ok(())
}

/// Fixed-width encoding: 32 bytes per codepoint, no index, no dedup.
/// Absent codepoints become a fully lit 16x16 placeholder, a visible
/// tofu marker rather than blank space.
fn encode_fixed(block: &CharacterBlock, glyphs: &GlyphMap) -> Result<Vec<u8>, String> {
    let mut payload = Vec::with_capacity(block.char_count() * 32);

    for codepoint in block.start..=block.end {
        match glyphs.get(&codepoint) {
            Some(glyph) => {
                for column in &glyph.columns {
                    payload.extend_from_slice(&column.to_le_bytes());
                }
            }
            None => {
                for _ in 0..16 {
                    payload.extend_from_slice(&0xFFFFu16.to_le_bytes());
                }
            }
        }
    }

    info!(
        "{} characters created for 16x16 char block, {} bytes",
        payload.len() / 32,
        payload.len()
    );
    Ok(payload)
}

/// Variable-width encoding: per-codepoint packed index words followed
/// by the deduplicated column pool, padded to a word boundary.
fn encode_variable(block: &CharacterBlock, glyphs: &GlyphMap) -> Result<Vec<u8>, String> {
    let mut index: Vec<u16> = Vec::with_capacity(block.char_count());
    let mut pool: Vec<u8> = Vec::new();
    // Content-addressed dedup: trimmed column bytes -> pool word offset
    let mut pool_offsets: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
    let mut unique_records = 0usize;

    for codepoint in block.start..=block.end {
        let glyph = match glyphs.get(&codepoint) {
            Some(glyph) => glyph,
            None => {
                index.push(ABSENT_INDEX);
                continue;
            }
        };

        // Remove blank leading/trailing columns; a fully blank glyph
        // (the space character) becomes SPACE_PIXELS zero columns
        // since zero-width records cannot be encoded.
        let mut columns = trim_columns(&glyph.columns).to_vec();
        if columns.is_empty() {
            columns = vec![0u16; SPACE_PIXELS];
        }

        let width = columns.len();
        if width > MAX_CHAR_COLUMNS {
            return Err(format!(
                "Codepoint {:#X} in block {:#X}-{:#X} is {} columns wide (max {})",
                codepoint, block.start, block.end, width, MAX_CHAR_COLUMNS
            ));
        }

        let mut record = Vec::with_capacity(width * 2);
        for column in &columns {
            record.extend_from_slice(&column.to_le_bytes());
        }

        let offset = match pool_offsets.get(&record) {
            Some(&offset) => offset, // Reuse existing char
            None => {
                let offset = pool.len() / 2;
                pool.extend_from_slice(&record);
                pool_offsets.insert(record, offset);
                unique_records += 1;
                offset
            }
        };

        if offset >= MAX_POOL_WORDS {
            return Err(format!(
                "Data pool for block {:#X}-{:#X} overflows the 13-bit offset at codepoint {:#X} \
                 (offset {} words, max {}); split the block into smaller ones",
                block.start, block.end, codepoint, offset, MAX_POOL_WORDS
            ));
        }

        index.push((((width - 1) as u16) << 13) | offset as u16);
    }

    info!(
        "{} characters created, with {} unique chars and {} bytes",
        index.len(),
        unique_records,
        pool.len()
    );

    // Index and pool packed contiguously, padded to a word boundary.
    // An already-aligned payload still gains 4 zero bytes, matching the
    // layout the renderer was built against.
    let mut payload = Vec::with_capacity(index.len() * 2 + pool.len() + 4);
    for entry in &index {
        payload.extend_from_slice(&entry.to_le_bytes());
    }
    payload.extend_from_slice(&pool);
    let pad = 4 - (payload.len() % 4);
    payload.resize(payload.len() + pad, 0);

    Ok(payload)
}

/// Strip contiguous all-zero columns from both ends. Interior zero
/// columns are part of the glyph and stay.
pub fn trim_columns(columns: &[u16]) -> &[u16] {
    let mut start = 0;
    let mut end = columns.len();
    while start < end && columns[start] == 0 {
        start += 1;
    }
    while end > start && columns[end - 1] == 0 {
        end -= 1;
    }
    &columns[start..end]
}
