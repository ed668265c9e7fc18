use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use base64::Engine as Base64Engine;
use clap::Parser;

use wordmandala::{plan_word, render_word, RenderConfig};

/// Render a deterministic mandala from a single word.
#[derive(Parser, Debug)]
#[command(name = "wordmandala", version, about)]
struct Args {
    /// The word to render (first whitespace-delimited token is used)
    word: String,

    /// Square output size in pixels
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// Output PNG path (default: mandala_<word>.png)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Draw the word as a low-alpha signature near the bottom
    #[arg(long)]
    signature: bool,

    /// Print the sha256 digest of the raw pixels
    #[arg(long)]
    digest: bool,

    /// Print the PNG as a data URI instead of writing a file
    #[arg(long)]
    data_uri: bool,

    /// Print the seed-driven render parameters as JSON and exit
    #[arg(long)]
    emit_params: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.emit_params {
        let plan = plan_word(&args.word)?;
        println!("{}", serde_json::to_string_pretty(&plan.summary())?);
        return Ok(());
    }

    let config = RenderConfig {
        width: args.size,
        height: args.size,
        signature: args.signature,
    };
    let art = render_word(&args.word, &config)?;
    println!("Seed: {}", art.seed);

    if args.digest {
        println!("Digest: {}", art.pixel_digest);
    }

    if args.data_uri {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&art.png_data);
        println!("data:image/png;base64,{}", b64);
        return Ok(());
    }

    let out = args.out.unwrap_or_else(|| {
        let word = wordmandala::sanitize_word(&args.word).unwrap_or_default();
        PathBuf::from(format!("mandala_{}.png", word.to_lowercase()))
    });
    fs::write(&out, &art.png_data)
        .with_context(|| format!("Failed to write PNG to {}", out.display()))?;
    println!("Wrote {} ({} bytes)", out.display(), art.png_data.len());

    Ok(())
}
