//! Core error types for the pptoken-util crate
//!
//! This module defines the error type shared by every stage of the
//! tokeniser: character decoding, the phase-1/phase-2 transformation
//! pipeline, and token recognition. Every variant is fatal per the
//! tokeniser's failure policy — there is no local recovery.

use thiserror::Error;

/// Error produced while turning source bytes into preprocessing tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Leading byte of a UTF-8 sequence exceeded 0xF7, or a multi-byte
    /// sequence was truncated by the end of input.
    #[error("invalid UTF-8 byte sequence at byte offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A `??X` window was recognised as a trigraph candidate but `X` did
    /// not appear in the trigraph table. Defensive: the recognizer only
    /// calls the folding routine after matching a valid `X`.
    #[error("invalid trigraph sequence at byte offset {offset}")]
    InvalidTrigraph { offset: usize },

    /// A `/* ... */` comment was not closed before end of input.
    #[error("unterminated block comment starting at byte offset {offset}")]
    UnterminatedComment { offset: usize },

    /// A character or string literal was not closed before end of input.
    #[error("unterminated string or character literal starting at byte offset {offset}")]
    UnterminatedString { offset: usize },

    /// A raw string literal's d-char-sequence delimiter was longer than
    /// 16 characters, or contained a disallowed character.
    #[error("invalid raw string delimiter at byte offset {offset}: {reason}")]
    RawStringBadDelimiter { offset: usize, reason: String },

    /// A new-line appeared inside a header-name literal before its
    /// terminator.
    #[error("new-line inside header-name at byte offset {offset}")]
    NewlineInHeaderName { offset: usize },

    /// `peek`/`skip` requested a code point past the end of the raw
    /// buffer and the pushback queue.
    #[error("read past end of input")]
    ReadPastEnd,

    /// Internal invariant violation: a hex-digit conversion was attempted
    /// on a character that validation should already have excluded.
    #[error("internal error: hex conversion of non-hex character {0:?}")]
    HexOfNonHex(char),
}

/// Result type alias used throughout the tokeniser.
pub type LexResult<T> = std::result::Result<T, LexError>;
