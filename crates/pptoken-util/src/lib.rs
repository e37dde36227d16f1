//! pptoken-util - shared error types for the pptoken workspace
//!
//! This crate holds the pieces common to the lexer and driver crates.
//! It intentionally stays small: the tokeniser has no need for string
//! interning, typed index vectors, or a source-location diagnostic
//! stack, since it only ever reports a single fatal error per call
//! (see the error handling notes in the lexer crate).

mod error;

pub use error::{LexError, LexResult};
