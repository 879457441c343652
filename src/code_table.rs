// src/code_table.rs
// International Morse letters A-Z

use std::collections::HashMap;
use std::sync::LazyLock;

/// Placeholder emitted for any pattern the table does not know.
pub const UNKNOWN: char = '?';

const LETTERS: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
];

static PATTERN_TO_LETTER: LazyLock<HashMap<&'static str, char>> =
    LazyLock::new(|| LETTERS.iter().map(|&(c, p)| (p, c)).collect());

/// Translates a finished dot/dash pattern into its letter, or `?`.
pub fn lookup(pattern: &str) -> char {
    PATTERN_TO_LETTER.get(pattern).copied().unwrap_or(UNKNOWN)
}

/// Dot/dash pattern for a letter, case-insensitive. `None` outside A-Z.
pub fn pattern_for(letter: char) -> Option<&'static str> {
    let upper = letter.to_ascii_uppercase();
    LETTERS
        .iter()
        .find(|&&(c, _)| c == upper)
        .map(|&(_, pattern)| pattern)
}
