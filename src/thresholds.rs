// src/thresholds.rs
// Timing references inferred from the whole waveform

use crate::segmenter::Segmentation;
use std::collections::BTreeSet;

/// Silence thresholds and tone references, all in samples. Missing values are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub tone_gap: usize,
    pub letter_gap: usize,
    pub word_gap: usize,
    pub dot: usize,
    pub dash: usize,
}

impl Thresholds {
    pub fn from_segmentation(segmentation: &Segmentation) -> Self {
        Self::derive(&segmentation.spacing, &segmentation.tones)
    }

    /// The three smallest spacing values become the tone, letter and word
    /// gaps; the shortest and longest tones become the dot and dash.
    pub fn derive(spacing: &BTreeSet<usize>, tones: &[usize]) -> Self {
        let mut ascending = spacing.iter().copied();
        Self {
            tone_gap: ascending.next().unwrap_or(0),
            letter_gap: ascending.next().unwrap_or(0),
            word_gap: ascending.next().unwrap_or(0),
            dot: tones.iter().copied().min().unwrap_or(0),
            dash: tones.iter().copied().max().unwrap_or(0),
        }
    }
}

/// `reference - tolerance < value < reference + tolerance`, without underflow.
pub fn within_tolerance(value: usize, reference: usize, tolerance: usize) -> bool {
    reference < value + tolerance && value < reference + tolerance
}
