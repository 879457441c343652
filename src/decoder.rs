// src/decoder.rs
// Run-length classification and letter assembly

use crate::code_table;
use crate::error::Result;
use crate::segmenter::{self, Chunk};
use crate::thresholds::{Thresholds, within_tolerance};

// --- Decoding Constants ---
// Silence runs no longer than this are treated as noise, and every reference
// matches values strictly within this many samples of it.
pub const TOLERANCE: usize = 5;
// Silence runs are rounded to this step before becoming spacing candidates,
// so gaps of 29 and 31 samples collapse into one threshold.
pub const SPACING_RESOLUTION: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub tolerance: usize,
    pub spacing_resolution: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            spacing_resolution: SPACING_RESOLUTION,
        }
    }
}

/// What a classified chunk does to the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ElementGap,
    WordGap,
    LetterGap,
    Dash,
    Dot,
}

impl Action {
    /// Gap actions only take silence runs, symbol actions only tone runs.
    fn accepts(self, chunk: Chunk) -> bool {
        match self {
            Action::ElementGap | Action::WordGap | Action::LetterGap => {
                matches!(chunk, Chunk::Silence(_))
            }
            Action::Dash | Action::Dot => matches!(chunk, Chunk::Tone(_)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub reference: usize,
    pub action: Action,
}

/// The classification rules, highest priority first.
pub fn rules(thresholds: &Thresholds) -> [Rule; 5] {
    [
        Rule {
            reference: thresholds.tone_gap,
            action: Action::ElementGap,
        },
        Rule {
            reference: thresholds.word_gap,
            action: Action::WordGap,
        },
        Rule {
            reference: thresholds.letter_gap,
            action: Action::LetterGap,
        },
        Rule {
            reference: thresholds.dash,
            action: Action::Dash,
        },
        Rule {
            reference: thresholds.dot,
            action: Action::Dot,
        },
    ]
}

/// First rule whose reference the chunk falls within wins.
pub fn classify(chunk: Chunk, rules: &[Rule], tolerance: usize) -> Option<Action> {
    rules
        .iter()
        .find(|rule| {
            rule.action.accepts(chunk)
                && within_tolerance(chunk.samples(), rule.reference, tolerance)
        })
        .map(|rule| rule.action)
}

#[derive(Debug, Default)]
struct Translation {
    text: String,
    current_letter: String,
}

impl Translation {
    fn apply(&mut self, action: Action) {
        match action {
            Action::ElementGap => {}
            Action::WordGap => {
                if !self.current_letter.is_empty() {
                    self.flush_letter();
                }
                self.text.push(' ');
            }
            Action::LetterGap => self.flush_letter(),
            Action::Dash => self.current_letter.push('-'),
            Action::Dot => self.current_letter.push('.'),
        }
    }

    fn flush_letter(&mut self) {
        self.text.push(code_table::lookup(&self.current_letter));
        self.current_letter.clear();
    }

    fn finish(mut self) -> String {
        // The last letter has no trailing gap to flush it.
        if !self.current_letter.is_empty() {
            self.flush_letter();
        }
        self.text
    }
}

/// Runs the chunk sequence through the letter state machine.
pub fn translate(chunks: &[Chunk], thresholds: &Thresholds, tolerance: usize) -> String {
    let rules = rules(thresholds);
    let mut translation = Translation::default();
    for &chunk in chunks {
        match classify(chunk, &rules, tolerance) {
            Some(action) => {
                log::trace!("{:?} -> {:?}", chunk, action);
                translation.apply(action);
            }
            None => log::trace!("{:?} matched no reference, dropped", chunk),
        }
    }
    translation.finish()
}

// --- Main Decoder ---
#[derive(Debug, Clone, Default)]
pub struct MorseDecoder {
    config: DecoderConfig,
}

impl MorseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes a whole waveform. Thresholds are inferred from the complete
    /// signal before any chunk is classified.
    pub fn decode(&self, samples: &[i32]) -> Result<String> {
        let segmentation = segmenter::segment(samples, &self.config)?;
        log::info!("Silence level: {}", segmentation.silence_level);

        let thresholds = Thresholds::from_segmentation(&segmentation);
        log::info!(
            "Thresholds: tone gap = {}, letter gap = {}, word gap = {}, dot = {}, dash = {}",
            thresholds.tone_gap,
            thresholds.letter_gap,
            thresholds.word_gap,
            thresholds.dot,
            thresholds.dash
        );
        if segmentation.spacing.len() < 3 {
            log::debug!(
                "Only {} distinct spacing values; missing gap thresholds default to 0",
                segmentation.spacing.len()
            );
        }

        let text = translate(&segmentation.chunks, &thresholds, self.config.tolerance);
        log::info!("Decoded {} characters", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{MorseGenerator, UnitTiming};

    const STANDARD: Thresholds = Thresholds {
        tone_gap: 10,
        letter_gap: 30,
        word_gap: 70,
        dot: 10,
        dash: 30,
    };

    fn chunks_for(patterns: &[&str]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for (i, pattern) in patterns.iter().enumerate() {
            if i > 0 {
                chunks.push(Chunk::Silence(29));
            }
            for (j, symbol) in pattern.chars().enumerate() {
                if j > 0 {
                    chunks.push(Chunk::Silence(9));
                }
                chunks.push(Chunk::Tone(if symbol == '-' { 30 } else { 10 }));
            }
        }
        chunks
    }

    #[test]
    fn test_hello() {
        let chunks = chunks_for(&["....", ".", ".-..", ".-..", "---"]);
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), "HELLO");
    }

    #[test]
    fn test_word_gap_inserts_space() {
        let mut chunks = chunks_for(&["...", "---", "..."]);
        chunks.push(Chunk::Silence(69));
        chunks.extend(chunks_for(&["-", ".", "...", "-"]));
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), "SOS TEST");
    }

    #[test]
    fn test_word_gap_with_empty_letter_only_adds_space() {
        let chunks = [Chunk::Silence(70), Chunk::Tone(10), Chunk::Silence(70)];
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), " E ");
    }

    #[test]
    fn test_letter_gap_with_empty_letter_emits_placeholder() {
        let chunks = [Chunk::Silence(30), Chunk::Tone(30)];
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), "?T");
    }

    #[test]
    fn test_unknown_pattern_becomes_placeholder() {
        let chunks = chunks_for(&["......"]);
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), "?");
    }

    #[test]
    fn test_unmatched_chunks_are_dropped() {
        let chunks = [
            Chunk::Tone(10),
            Chunk::Silence(50),
            Chunk::Tone(20),
            Chunk::Tone(10),
        ];
        assert_eq!(translate(&chunks, &STANDARD, TOLERANCE), "I");
    }

    #[test]
    fn test_empty_chunks() {
        assert_eq!(translate(&[], &STANDARD, TOLERANCE), "");
        assert_eq!(translate(&[], &Thresholds::default(), TOLERANCE), "");
    }

    #[test]
    fn test_priority_order() {
        // Word and letter gaps overlap; the word gap is checked first.
        let overlapping = Thresholds {
            tone_gap: 10,
            letter_gap: 30,
            word_gap: 33,
            dot: 10,
            dash: 12,
        };
        let rules = rules(&overlapping);
        assert_eq!(
            classify(Chunk::Silence(31), &rules, TOLERANCE),
            Some(Action::WordGap)
        );
        assert_eq!(
            classify(Chunk::Silence(27), &rules, TOLERANCE),
            Some(Action::LetterGap)
        );
        // Dash is checked before dot.
        assert_eq!(
            classify(Chunk::Tone(11), &rules, TOLERANCE),
            Some(Action::Dash)
        );
        assert_eq!(
            classify(Chunk::Tone(7), &rules, TOLERANCE),
            Some(Action::Dot)
        );
        assert_eq!(
            classify(Chunk::Silence(9), &rules, TOLERANCE),
            Some(Action::ElementGap)
        );
    }

    #[test]
    fn test_rules_respect_run_kind() {
        let rules = rules(&STANDARD);
        assert_eq!(
            classify(Chunk::Tone(10), &rules, TOLERANCE),
            Some(Action::Dot)
        );
        assert_eq!(
            classify(Chunk::Tone(30), &rules, TOLERANCE),
            Some(Action::Dash)
        );
        assert_eq!(
            classify(Chunk::Silence(30), &rules, TOLERANCE),
            Some(Action::LetterGap)
        );
    }

    #[test]
    fn test_window_edges_do_not_match() {
        let rules = rules(&STANDARD);
        assert_eq!(classify(Chunk::Tone(35), &rules, TOLERANCE), None);
        assert_eq!(classify(Chunk::Tone(25), &rules, TOLERANCE), None);
        assert_eq!(
            classify(Chunk::Tone(34), &rules, TOLERANCE),
            Some(Action::Dash)
        );
        assert_eq!(
            classify(Chunk::Tone(26), &rules, TOLERANCE),
            Some(Action::Dash)
        );
        assert_eq!(classify(Chunk::Silence(75), &rules, TOLERANCE), None);
        assert_eq!(
            classify(Chunk::Silence(66), &rules, TOLERANCE),
            Some(Action::WordGap)
        );
    }

    #[test]
    fn test_zero_thresholds_drop_everything() {
        let chunks = chunks_for(&["...", "---"]);
        assert_eq!(translate(&chunks, &Thresholds::default(), TOLERANCE), "");
    }

    #[test]
    fn test_decode_empty_samples_fails() {
        let decoder = MorseDecoder::new();
        assert!(decoder.decode(&[]).is_err());
    }

    #[test]
    fn test_decode_silence_only() {
        let decoder = MorseDecoder::new();
        assert_eq!(decoder.decode(&[0; 500]).unwrap(), "");
    }

    #[test]
    fn test_custom_config_decodes_fast_signal() {
        let samples = MorseGenerator::new(UnitTiming::from_dot(4)).samples("SOS");
        let fast = MorseDecoder::with_config(DecoderConfig {
            tolerance: 2,
            spacing_resolution: 4,
        });
        assert_eq!(fast.decode(&samples).unwrap(), "SOS");
        // Default tolerance discards the 3-sample element gaps as noise.
        assert_eq!(MorseDecoder::new().decode(&samples).unwrap(), "?");
    }

    #[test]
    fn test_default_config() {
        let decoder = MorseDecoder::new();
        assert_eq!(decoder.config().tolerance, 5);
        assert_eq!(decoder.config().spacing_resolution, 10);
    }
}
