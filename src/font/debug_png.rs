/// Debug Sheet Renderer
///
/// Renders every codepoint covered by the compiled blocks into a PNG
/// grid of 16x16 cells for visual inspection. Read-only diagnostic
/// consumer of the transposed glyph map, not part of the artifact.

use super::types::{CharacterBlock, GlyphMap};
use image::{Rgb, RgbImage};
use log::info;
use std::path::Path;

pub fn render_sheet(
    glyphs: &GlyphMap,
    blocks: &[CharacterBlock],
    path: &Path,
) -> Result<(), String> {
    let codepoints: Vec<u32> = blocks
        .iter()
        .flat_map(|b| b.start..=b.end)
        .collect();
    if codepoints.is_empty() {
        return Err("No character blocks to render".to_string());
    }

    let start = *codepoints.first().unwrap();
    let end = *codepoints.last().unwrap();
    let span = (end - start + 1) as usize;
    let grid_columns = (span as f64).sqrt() as usize;
    let grid_rows = (span + grid_columns - 1) / grid_columns;

    info!("Number of characters to output: {}", codepoints.len());
    info!(
        "Number of non-empty characters: {}",
        codepoints.iter().filter(|cn| glyphs.contains_key(cn)).count()
    );

    let mut im = RgbImage::new((16 * grid_columns) as u32, (16 * grid_rows) as u32);

    for codepoint in codepoints {
        let cell = (codepoint - start) as usize;
        let bx = ((cell % grid_columns) * 16) as u32;
        let by = ((cell / grid_columns) * 16) as u32;

        // Checkerboard backgrounds so empty cells stay visible
        let bg = if (bx ^ by) & 16 != 0 { 255 } else { 190 };
        for x in bx..bx + 16 {
            for y in by..by + 16 {
                im.put_pixel(x, y, Rgb([bg, bg, bg]));
            }
        }

        if let Some(glyph) = glyphs.get(&codepoint) {
            for (i, &column) in glyph.columns.iter().enumerate() {
                for r in 0..16 {
                    if column & (1 << r) != 0 {
                        im.put_pixel(bx + i as u32, by + r, Rgb([0, 0, 0]));
                    }
                }
            }
        }
    }

    im.save(path)
        .map_err(|e| format!("Failed to write debug PNG '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_block_list_is_an_error() {
        let glyphs = GlyphMap::default();
        assert!(render_sheet(&glyphs, &[], Path::new("/tmp/unused.png")).is_err());
    }
}
