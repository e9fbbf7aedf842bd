/// Artifact Decoder
///
/// Re-parses a compiled font database the way the device renderer
/// does: header, block index, then per-codepoint lookups through
/// either the fixed-width direct offset or the variable-width packed
/// index. The compiler runs it over the in-memory image before the
/// file write; the round-trip tests drive it as well.

use super::types::{ABSENT_INDEX, DB_MAGIC, DB_VERSION, FLAG_FW16};
use binary_reader::{BinaryReader, Endian};
use std::cmp::Ordering;

#[derive(Debug)]
pub struct BlockIndexEntry {
    pub start: u32,
    pub end: u32,
    pub flags: u32,
    pub offset: u32,
}

#[derive(Debug)]
pub struct FontDatabase<'a> {
    pub version: u8,
    pub total_size: u32,
    pub blocks: Vec<BlockIndexEntry>,
    bytes: &'a [u8],
    payload_base: usize,
}

/// A glyph read back from the database: its stored column words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGlyph {
    pub width: u8,
    pub columns: Vec<u16>,
}

pub fn parse(bytes: &[u8]) -> Result<FontDatabase, String> {
    if bytes.len() < 8 {
        return Err(format!(
            "Database too small for header ({} bytes, need >= 8)",
            bytes.len()
        ));
    }

    let mut reader = BinaryReader::from_u8(bytes);
    reader.set_endian(Endian::Little);

    let magic = reader.read_bytes(2).unwrap().to_vec();
    if magic != DB_MAGIC {
        return Err(format!("Invalid database magic: {:02X?}", magic));
    }
    let version = reader.read_u8().unwrap();
    if version != DB_VERSION {
        return Err(format!("Unsupported database version: {}", version));
    }
    let block_count = reader.read_u8().unwrap() as usize;
    let total_size = reader.read_u32().unwrap();

    if total_size as usize != bytes.len() {
        return Err(format!(
            "Declared size {} does not match database size {}",
            total_size,
            bytes.len()
        ));
    }
    if bytes.len() < 8 + 16 * block_count {
        return Err(format!(
            "Database truncated: {} blocks declared but only {} bytes",
            block_count,
            bytes.len()
        ));
    }

    let mut blocks = Vec::with_capacity(block_count);
    for _ in 0..block_count {
        blocks.push(BlockIndexEntry {
            start: reader.read_u32().unwrap(),
            end: reader.read_u32().unwrap(),
            flags: reader.read_u32().unwrap(),
            offset: reader.read_u32().unwrap(),
        });
    }

    Ok(FontDatabase {
        version,
        total_size,
        blocks,
        bytes,
        payload_base: 8 + 16 * block_count,
    })
}

impl<'a> FontDatabase<'a> {
    /// Binary-search the block index and decode the codepoint's column
    /// data. Returns None for codepoints outside every block and for
    /// variable-width entries holding the absent sentinel.
    pub fn lookup(&self, codepoint: u32) -> Option<DecodedGlyph> {
        let idx = self
            .blocks
            .binary_search_by(|b| {
                if b.end < codepoint {
                    Ordering::Less
                } else if b.start > codepoint {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .ok()?;
        let block = &self.blocks[idx];
        let block_base = self.payload_base + block.offset as usize;
        let code_offset = (codepoint - block.start) as usize;

        if block.flags & FLAG_FW16 != 0 {
            let glyph_base = block_base + 32 * code_offset;
            let columns = (0..16)
                .map(|i| self.read_word(glyph_base + 2 * i))
                .collect::<Option<Vec<u16>>>()?;
            return Some(DecodedGlyph { width: 16, columns });
        }

        let entry = self.read_word(block_base + 2 * code_offset)?;
        if entry == ABSENT_INDEX {
            return None;
        }
        let width = ((entry >> 13) + 1) as u8;
        let pool_offset = (entry & 0x1FFF) as usize;

        let chars_in_block = (block.end - block.start + 1) as usize;
        let pool_base = block_base + 2 * chars_in_block;
        let columns = (0..width as usize)
            .map(|i| self.read_word(pool_base + 2 * (pool_offset + i)))
            .collect::<Option<Vec<u16>>>()?;
        Some(DecodedGlyph { width, columns })
    }

    fn read_word(&self, offset: usize) -> Option<u16> {
        if offset + 2 > self.bytes.len() {
            return None;
        }
        Some(u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::database;
    use super::super::types::CharacterBlock;

    #[test]
    fn test_rejects_bad_magic() {
        let err = parse(&[b'X', b'Y', 1, 0, 8, 0, 0, 0]).unwrap_err();
        assert!(err.contains("magic"));
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let blocks = vec![CharacterBlock { start: 0, end: 0, width: 8 }];
        let mut bytes = database::serialize(&blocks, &[vec![0u8; 8]]);
        bytes.push(0); // grow past the declared size
        assert!(parse(&bytes).unwrap_err().contains("Declared size"));
    }

    #[test]
    fn test_lookup_outside_all_blocks() {
        let blocks = vec![CharacterBlock { start: 0x40, end: 0x40, width: 16 }];
        let bytes = database::serialize(&blocks, &[vec![0u8; 32]]);
        let db = parse(&bytes).unwrap();
        assert!(db.lookup(0x41).is_none());
        assert!(db.lookup(0x3F).is_none());
        assert!(db.lookup(0x40).is_some());
    }
}
