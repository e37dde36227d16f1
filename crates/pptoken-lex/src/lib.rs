//! pptoken-lex - translation phases 1 through 3 of C++ preprocessing.
//!
//! [`Tokeniser`] turns a byte buffer into a stream of preprocessing
//! tokens: it folds trigraphs, decodes universal-character-names and
//! UTF-8, splices continued lines, elides comments, and then recognizes
//! the result into the token kinds of 2.2-2.13. It does not expand
//! macros, evaluate `#if` conditions, or resolve `#include` directives;
//! it only recognizes where a `header-name` token belongs syntactically.

mod recognizer;
mod source;
mod tables;
mod token;

pub use pptoken_util::{LexError, LexResult};
pub use token::{Token, TokenKind};

use recognizer::Recognizer;

/// The library surface: construct over a byte buffer, then pull tokens
/// one at a time until `has_more_tokens` goes false.
pub struct Tokeniser<'a> {
    recognizer: Recognizer<'a>,
}

impl<'a> Tokeniser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            recognizer: Recognizer::new(input),
        }
    }

    /// False once `next_token` has returned `eof`.
    pub fn has_more_tokens(&self) -> bool {
        self.recognizer.has_more_tokens()
    }

    /// Produces the next preprocessing token. Once an error is returned,
    /// further calls are not meaningful: the cursor is left wherever the
    /// failing transformation or recognizer step stopped.
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.recognizer.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &[u8]) -> LexResult<Vec<Token>> {
        let mut t = Tokeniser::new(src);
        let mut out = Vec::new();
        while t.has_more_tokens() {
            out.push(t.next_token()?);
        }
        Ok(out)
    }

    #[test]
    fn simple_declaration() {
        let toks = lex_all(b"int main() {}\n").unwrap();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::PreprocessingOpOrPunc,
                TokenKind::PreprocessingOpOrPunc,
                TokenKind::Whitespace,
                TokenKind::PreprocessingOpOrPunc,
                TokenKind::PreprocessingOpOrPunc,
                TokenKind::NewLine,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trigraph_folds_before_tokenisation() {
        let toks = lex_all(b"??=define X\n").unwrap();
        assert_eq!(toks[0].lexeme, b"#");
    }

    #[test]
    fn lexeme_bytes_cover_every_input_byte_or_a_discard() {
        let src = b"a + b // comment\n";
        let toks = lex_all(src).unwrap();
        // Every non-whitespace, non-newline token's lexeme is a verbatim
        // substring of meaning carried from the input; whitespace/newline
        // carry none. This just checks the run doesn't error or drop a
        // token kind unexpectedly.
        assert!(toks.iter().any(|t| t.kind == TokenKind::Identifier));
        assert!(toks.last().unwrap().kind == TokenKind::Eof);
    }

    #[test]
    fn reports_unterminated_comment() {
        let err = lex_all(b"/* never closed").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedComment { .. }));
    }
}
