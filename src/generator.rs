// src/generator.rs
// Keyed Morse waveform generator for fixtures and testing

use crate::code_table;
use anyhow::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Element lengths in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTiming {
    pub dot: usize,
    pub dash: usize,
    pub element_gap: usize,
    pub letter_gap: usize,
    pub word_gap: usize,
}

impl UnitTiming {
    /// Standard 1:3 symbols with 1:3:7 spacing.
    pub fn from_dot(dot: usize) -> Self {
        Self {
            dot,
            dash: 3 * dot,
            element_gap: dot,
            letter_gap: 3 * dot,
            word_gap: 7 * dot,
        }
    }
}

impl Default for UnitTiming {
    fn default() -> Self {
        Self::from_dot(10)
    }
}

pub struct MorseGenerator {
    timing: UnitTiming,
    amplitude: i32,
    sample_rate: u32,
}

impl MorseGenerator {
    pub fn new(timing: UnitTiming) -> Self {
        Self {
            timing,
            amplitude: i16::MAX as i32 / 2, // 50% amplitude to avoid clipping
            sample_rate: 8000,
        }
    }

    pub fn with_amplitude(mut self, amplitude: i32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Synthesizes `text` as integer samples. Characters outside A-Z are
    /// skipped and a word gap of silence follows the last element.
    pub fn samples(&self, text: &str) -> Vec<i32> {
        let mut samples = Vec::new();
        for element in text_to_morse(text) {
            match element {
                MorseElement::Dot => self.push_tone(&mut samples, self.timing.dot),
                MorseElement::Dash => self.push_tone(&mut samples, self.timing.dash),
                MorseElement::ElementGap => push_silence(&mut samples, self.timing.element_gap),
                MorseElement::LetterGap => push_silence(&mut samples, self.timing.letter_gap),
                MorseElement::WordGap => push_silence(&mut samples, self.timing.word_gap),
            }
        }
        if !samples.is_empty() {
            push_silence(&mut samples, self.timing.word_gap);
        }
        samples
    }

    /// Writes `text` as a 16-bit mono WAV file.
    pub fn generate_wav_file<P: AsRef<Path>>(&self, text: &str, path: P) -> Result<()> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(path, spec)?;
        for sample in self.samples(text) {
            let clamped = sample.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
            writer.write_sample(clamped)?;
        }
        writer.finalize()?;
        Ok(())
    }

    // Square carrier flipping every sample, so neither keyed level outnumbers silence.
    fn push_tone(&self, samples: &mut Vec<i32>, length: usize) {
        samples.extend((0..length).map(|i| {
            if i % 2 == 0 {
                self.amplitude
            } else {
                -self.amplitude
            }
        }));
    }
}

fn push_silence(samples: &mut Vec<i32>, length: usize) {
    samples.extend(std::iter::repeat_n(0, length));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MorseElement {
    Dot,
    Dash,
    ElementGap,
    LetterGap,
    WordGap,
}

fn text_to_morse(text: &str) -> Vec<MorseElement> {
    let words: Vec<Vec<&'static str>> = text
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter_map(code_table::pattern_for)
                .collect::<Vec<_>>()
        })
        .filter(|patterns| !patterns.is_empty())
        .collect();

    let mut result = Vec::new();
    for (word_idx, word) in words.iter().enumerate() {
        if word_idx > 0 {
            result.push(MorseElement::WordGap);
        }
        for (letter_idx, pattern) in word.iter().enumerate() {
            if letter_idx > 0 {
                result.push(MorseElement::LetterGap);
            }
            for (elem_idx, symbol) in pattern.chars().enumerate() {
                if elem_idx > 0 {
                    result.push(MorseElement::ElementGap);
                }
                match symbol {
                    '.' => result.push(MorseElement::Dot),
                    '-' => result.push(MorseElement::Dash),
                    _ => {}
                }
            }
        }
    }
    result
}
