// src/error.rs
// Errors raised by the decoding core

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Indeterminate silence level: sample array is empty")]
    IndeterminateSilenceLevel,
}

pub type Result<T> = std::result::Result<T, DecodeError>;
