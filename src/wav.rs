// src/wav.rs
// WAV file input

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// Mono integer samples read from a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavSamples {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i32>,
}

/// Reads a WAV file into integer amplitudes. Float files are scaled to the
/// 16-bit range; multi-channel files are averaged down to mono.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<WavSamples> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();
    log::info!("WAV spec: {:?}", spec);

    let interleaved: Vec<i32> = match spec.sample_format {
        SampleFormat::Int => reader
            .samples::<i32>()
            .collect::<std::result::Result<Vec<i32>, _>>()
            .context("Failed to read integer samples")?,
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                bail!(
                    "Unsupported float sample width: {} bits. Only 32-bit Float is supported.",
                    spec.bits_per_sample
                );
            }
            reader
                .samples::<f32>()
                .map(|s| s.map(|v| (v * i16::MAX as f32).round() as i32))
                .collect::<std::result::Result<Vec<i32>, _>>()
                .context("Failed to read float samples")?
        }
    };

    let samples = downmix(&interleaved, spec.channels);
    log::info!(
        "Read {} samples at {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(WavSamples {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

// Integer averaging can cancel out-of-phase channels down to the silence level.
fn downmix(interleaved: &[i32], channels: u16) -> Vec<i32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels as usize)
        .map(|frame| (frame.iter().map(|&s| s as i64).sum::<i64>() / channels as i64) as i32)
        .collect()
}
