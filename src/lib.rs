// src/lib.rs
// Library interface for morsewav

pub mod code_table;
pub mod decoder;
pub mod error;
pub mod generator;
pub mod segmenter;
pub mod thresholds;
pub mod wav;

pub use decoder::{DecoderConfig, MorseDecoder};
pub use error::DecodeError;
pub use generator::{MorseGenerator, UnitTiming};
pub use wav::{WavSamples, read_wav};

use std::path::Path;

/// Decodes an in-memory waveform with the default configuration.
pub fn decode_samples(samples: &[i32]) -> Result<String, DecodeError> {
    MorseDecoder::new().decode(samples)
}

/// Reads a WAV file and decodes it with the default configuration.
pub fn decode_wav_file<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let wav = read_wav(path)?;
    Ok(decode_samples(&wav.samples)?)
}
