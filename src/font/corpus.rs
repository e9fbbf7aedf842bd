/// Glyph Corpus Loader
///
/// Decodes line-oriented hex glyph definitions ("codepoint:bitmap-hex",
/// UNSCII .hex format) into row-major bitmaps. Every glyph is 16 rows
/// tall: a 64 hex digit bitmap holds sixteen 16-bit big-endian rows
/// (up to 16 columns wide), a 32 hex digit bitmap holds sixteen byte
/// rows (up to 8 columns wide). Any other length is a fatal error.

use fxhash::FxHashMap;
use log::debug;

/// The loaded corpus: row-major bitmaps plus the pixel width implied by
/// the source encoding. Implied widths are only a fallback, the block
/// table override pass replaces them before transposition.
pub struct FontCorpus {
    pub bitmaps: FxHashMap<u32, Vec<u16>>,
    pub widths: FxHashMap<u32, u8>,
}

pub fn parse_corpus(text: &str) -> Result<FontCorpus, String> {
    let mut bitmaps = FxHashMap::default();
    let mut widths = FxHashMap::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (codepoint, rows, width) = parse_line(line)?;
        bitmaps.insert(codepoint, rows);
        widths.insert(codepoint, width);
    }

    debug!("Loaded {} glyph definitions from corpus", bitmaps.len());
    Ok(FontCorpus { bitmaps, widths })
}

/// Parse a single "codepoint:bitmap-hex" line into 16 row-major rows
/// plus the implied pixel width (8 or 16).
fn parse_line(line: &str) -> Result<(u32, Vec<u16>, u8), String> {
    let sep = line
        .find(':')
        .ok_or_else(|| format!("Malformed corpus line (no ':' separator): '{}'", line))?;
    let (code_hex, bitmap_hex) = (&line[..sep], &line[sep + 1..]);

    let codepoint = u32::from_str_radix(code_hex, 16)
        .map_err(|_| format!("Malformed codepoint field: '{}'", code_hex))?;

    if bitmap_hex.len() != 32 && bitmap_hex.len() != 64 {
        return Err(format!(
            "Malformed bitmap for codepoint {:#X}: {} hex digits (expected 32 or 64)",
            codepoint,
            bitmap_hex.len()
        ));
    }

    let bytes = decode_hex(bitmap_hex)
        .map_err(|e| format!("Malformed bitmap for codepoint {:#X}: {}", codepoint, e))?;

    // 32 bytes: combine big-endian pairs into 16-bit rows. 16 bytes: one
    // byte per row.
    let rows: Vec<u16> = if bytes.len() == 32 {
        (0..32)
            .step_by(2)
            .map(|i| ((bytes[i] as u16) << 8) | bytes[i + 1] as u16)
            .collect()
    } else {
        bytes.iter().map(|&b| b as u16).collect()
    };

    let width = (bitmap_hex.len() / 4) as u8;
    Ok((codepoint, rows, width))
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err(format!("odd hex digit count ({})", hex.len()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits '{}'", &hex[i..i + 2]))
        })
        .collect()
}
