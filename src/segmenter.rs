// src/segmenter.rs
// Splits a keyed waveform into tone and silence runs

use crate::decoder::DecoderConfig;
use crate::error::{DecodeError, Result};
use std::collections::{BTreeSet, HashMap};

/// A retained run, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    Tone(usize),
    Silence(usize),
}

impl Chunk {
    pub fn samples(self) -> usize {
        match self {
            Chunk::Tone(n) | Chunk::Silence(n) => n,
        }
    }
}

/// Everything a single left-to-right scan learns about the waveform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub silence_level: i32,
    /// Tone runs and long-enough silence runs, in temporal order.
    pub chunks: Vec<Chunk>,
    /// Silence run lengths rounded to the spacing resolution.
    pub spacing: BTreeSet<usize>,
    pub tones: Vec<usize>,
}

impl Segmentation {
    fn record_silence(&mut self, length: usize, resolution: usize) {
        self.chunks.push(Chunk::Silence(length));
        self.spacing.insert(round_to_resolution(length, resolution));
    }

    fn record_tone(&mut self, length: usize) {
        self.chunks.push(Chunk::Tone(length));
        self.tones.push(length);
    }
}

/// The most frequent amplitude. Ties go to the value seen first.
pub fn silence_level(samples: &[i32]) -> Result<i32> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for &s in samples {
        *counts.entry(s).or_insert(0) += 1;
    }
    let max_count = counts
        .values()
        .copied()
        .max()
        .ok_or(DecodeError::IndeterminateSilenceLevel)?;
    samples
        .iter()
        .copied()
        .find(|s| counts[s] == max_count)
        .ok_or(DecodeError::IndeterminateSilenceLevel)
}

/// Rounds to the nearest multiple of `resolution`; halves go to the even multiple.
pub fn round_to_resolution(value: usize, resolution: usize) -> usize {
    if resolution == 0 {
        return value;
    }
    let quotient = value / resolution;
    let remainder = value % resolution;
    let doubled = remainder * 2;
    let rounded = if doubled > resolution || (doubled == resolution && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded * resolution
}

/// Scans the samples once and collects chunks, spacing values and tone lengths.
///
/// A tone run closes once it is at least two samples long and is followed by
/// two consecutive silence samples, so a single dropout inside a tone does not
/// split it. The sample past the end of the array counts as not-silence; a
/// tone run still open when the array ends is closed there.
pub fn segment(samples: &[i32], config: &DecoderConfig) -> Result<Segmentation> {
    let silence = silence_level(samples)?;
    let mut segmentation = Segmentation {
        silence_level: silence,
        ..Default::default()
    };

    let mut silence_run = 0usize;
    let mut tone_run = 0usize;

    for (idx, &value) in samples.iter().enumerate() {
        let is_silent = value == silence;
        if is_silent {
            silence_run += 1;
        } else {
            if silence_run > config.tolerance {
                segmentation.record_silence(silence_run, config.spacing_resolution);
            }
            silence_run = 0;
            tone_run += 1;
        }

        let next_is_silent = samples.get(idx + 1).is_some_and(|&next| next == silence);
        if tone_run > 1 && is_silent && next_is_silent {
            segmentation.record_tone(tone_run);
            tone_run = 0;
            silence_run = 0;
        }
    }

    if tone_run > 1 {
        log::debug!("Closing tone run of {} samples at end of array", tone_run);
        segmentation.record_tone(tone_run);
    }

    log::debug!(
        "Segmented {} samples: {} chunks, {} tones, spacing {:?}",
        samples.len(),
        segmentation.chunks.len(),
        segmentation.tones.len(),
        segmentation.spacing
    );
    Ok(segmentation)
}
