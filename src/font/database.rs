/// Database Serializer
///
/// Emits the final artifact: an 8-byte header, one 16-byte index entry
/// per CharacterBlock, then the concatenated block payloads. All
/// integers are little-endian.

use super::types::{CharacterBlock, DB_MAGIC, DB_VERSION, FLAG_FW16};
use std::fs;
use std::path::Path;

/// Build the complete database image in memory. Payloads must be in
/// block order; each index entry's offset is the cumulative size of the
/// payloads before it, counted from the end of the index table.
pub fn serialize(blocks: &[CharacterBlock], payloads: &[Vec<u8>]) -> Vec<u8> {
    let payload_bytes: usize = payloads.iter().map(|p| p.len()).sum();
    let total_size = payload_bytes + 16 * blocks.len() + 8;

    let mut out = Vec::with_capacity(total_size);
    out.extend_from_slice(&DB_MAGIC);
    out.push(DB_VERSION);
    out.push(blocks.len() as u8);
    out.extend_from_slice(&(total_size as u32).to_le_bytes());

    let mut offset = 0u32;
    for (block, payload) in blocks.iter().zip(payloads) {
        let flags = if block.is_fixed() { FLAG_FW16 } else { 0 };
        out.extend_from_slice(&block.start.to_le_bytes());
        out.extend_from_slice(&block.end.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        offset += payload.len() as u32;
    }

    for payload in payloads {
        out.extend_from_slice(payload);
    }
    out
}

pub fn write_database(path: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes)
        .map_err(|e| format!("Failed to write database '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_header_layout() {
        let blocks = vec![
            CharacterBlock { start: 0, end: 0x7F, width: 8 },
            CharacterBlock { start: 0x3040, end: 0x309F, width: 16 },
        ];
        let payloads = vec![vec![0u8; 12], vec![0u8; 64]];
        let out = serialize(&blocks, &payloads);

        assert_eq!(&out[0..2], b"FO");
        assert_eq!(out[2], 1); // version
        assert_eq!(out[3], 2); // block count
        assert_eq!(read_u32(&out, 4) as usize, 8 + 32 + 12 + 64);
        assert_eq!(read_u32(&out, 4) as usize, out.len());
    }

    #[test]
    fn test_index_entries_and_running_offsets() {
        let blocks = vec![
            CharacterBlock { start: 0, end: 0x7F, width: 8 },
            CharacterBlock { start: 0x3040, end: 0x309F, width: 16 },
        ];
        let payloads = vec![vec![0xAAu8; 20], vec![0xBBu8; 8]];
        let out = serialize(&blocks, &payloads);

        // First entry: variable block at payload offset 0
        assert_eq!(read_u32(&out, 8), 0);
        assert_eq!(read_u32(&out, 12), 0x7F);
        assert_eq!(read_u32(&out, 16), 0);
        assert_eq!(read_u32(&out, 20), 0);
        // Second entry: fixed block, offset past the first payload
        assert_eq!(read_u32(&out, 24), 0x3040);
        assert_eq!(read_u32(&out, 28), 0x309F);
        assert_eq!(read_u32(&out, 32), FLAG_FW16);
        assert_eq!(read_u32(&out, 36), 20);
        // Payloads follow the index in block order
        assert_eq!(out[40], 0xAA);
        assert_eq!(out[60], 0xBB);
    }
}
