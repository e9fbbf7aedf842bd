use clap::Parser;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process::exit;

use efontgen::font;
use efontgen::font::types::{FontConfig, DEFAULT_BLOCKS};

/// Parses UNSCII-style font hex files and generates font asset
/// databases for the device renderer.
#[derive(Parser)]
#[command(name = "efontgen")]
struct Args {
    /// Input font corpus (.hex file)
    #[arg(long = "font")]
    font: PathBuf,

    /// Comma separated list of font blocks
    #[arg(long = "font-blocks", default_value = DEFAULT_BLOCKS)]
    blocks: String,

    /// Output file that contains the compiled font database
    #[arg(long = "output")]
    output: PathBuf,

    /// Debug font PNG file
    #[arg(long = "debug-png")]
    debug_png: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), String> {
    let corpus_text = fs::read_to_string(&args.font)
        .map_err(|e| format!("Failed to read font corpus '{}': {}", args.font.display(), e))?;

    let config = FontConfig::default();
    let compiled = font::compile(&config, &corpus_text, &args.blocks)?;

    font::database::write_database(&args.output, &compiled.bytes)?;
    info!(
        "Wrote {} bytes ({} blocks) to '{}'",
        compiled.bytes.len(),
        compiled.blocks.len(),
        args.output.display()
    );

    if let Some(png_path) = &args.debug_png {
        font::debug_png::render_sheet(&compiled.glyphs, &compiled.blocks, png_path)?;
        info!("Wrote debug sheet to '{}'", png_path.display());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        exit(1);
    }
}
