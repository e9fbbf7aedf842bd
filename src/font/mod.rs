/// Font Database Compiler
///
/// Compiles a hex glyph corpus into the compact binary font database
/// the device renderer consumes. The pipeline is a fixed sequence of
/// batch stages: load the corpus, force block table widths and
/// transpose to column-major form, partition the requested blocks,
/// encode each block (fixed 16px or variable-width with dedup), then
/// serialize header + block index + payloads. Everything is built and
/// verified in memory before a single byte is written out.

pub mod blocks;
pub mod corpus;
pub mod database;
pub mod debug_png;
pub mod decoder;
pub mod encoder;
pub mod transpose;
pub mod types;

use itertools::Itertools;
use log::debug;
use types::{CharacterBlock, FontConfig, GlyphMap};

/// The compiled artifact plus the intermediate maps the diagnostic
/// renderer consumes.
pub struct CompiledFont {
    pub bytes: Vec<u8>,
    pub glyphs: GlyphMap,
    pub blocks: Vec<CharacterBlock>,
}

/// Run the full compilation pipeline over an in-memory corpus.
pub fn compile(
    config: &FontConfig,
    corpus_text: &str,
    block_names: &str,
) -> Result<CompiledFont, String> {
    debug!(
        "Compiling font blocks: {}",
        block_names.split(',').map(str::trim).join(", ")
    );

    let mut corpus = corpus::parse_corpus(corpus_text)?;
    let specs = blocks::resolve_blocks(config, block_names)?;
    let char_blocks = blocks::partition_blocks(&specs);

    transpose::apply_width_overrides(&mut corpus, config);
    let glyphs = transpose::transpose_corpus(&corpus);

    let mut payloads = Vec::with_capacity(char_blocks.len());
    for block in &char_blocks {
        payloads.push(encoder::encode_block(block, &glyphs)?);
    }

    let bytes = database::serialize(&char_blocks, &payloads);

    // Re-parse the image before anyone writes it: the header must
    // declare the exact byte count and every block entry must be
    // readable, otherwise the input needs fixing and no output should
    // persist.
    let db = decoder::parse(&bytes)?;
    if db.blocks.len() != char_blocks.len() {
        return Err(format!(
            "Database verification failed: {} blocks written, {} read back",
            char_blocks.len(),
            db.blocks.len()
        ));
    }

    Ok(CompiledFont {
        bytes,
        glyphs,
        blocks: char_blocks,
    })
}
