use anyhow::Result;
use clap::Parser;
use morsewav::{MorseDecoder, read_wav};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input WAV file
    #[arg(value_name = "WAV_FILE")]
    wav_file: PathBuf,
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=info` or `RUST_LOG=trace` to see output.
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Opening WAV file: {:?}", cli.wav_file);
    let wav = read_wav(&cli.wav_file)?;

    let decoder = MorseDecoder::new();
    let translation = decoder.decode(&wav.samples)?;

    println!("Translation: {}", translation);
    Ok(())
}
