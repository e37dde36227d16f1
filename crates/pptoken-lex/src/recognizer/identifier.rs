//! Identifier lexing: maximal munch over Annex E-aware identifier
//! characters, with the 2.13 identifier-like operators and punctuators
//! (`and`, `bitor`, `new`, ...) reclassified as operators rather than
//! identifiers.

use pptoken_util::LexResult;

use super::{is_ascii_digit, Recognizer};
use crate::tables;
use crate::token::{Token, TokenKind};

impl<'a> Recognizer<'a> {
    pub(super) fn lex_identifier(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        while !self.source.at_end() {
            let cp = self.source.current()?;
            if tables::is_identifier_non_digit(cp) || is_ascii_digit(cp) {
                self.bump(&mut buf)?;
            } else {
                break;
            }
        }
        let kind = if tables::is_identifier_like_operator(
            std::str::from_utf8(&buf).expect("identifier bytes are ASCII or re-encoded UTF-8"),
        ) {
            TokenKind::PreprocessingOpOrPunc
        } else {
            TokenKind::Identifier
        };
        Ok(Token::new(kind, buf))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Recognizer;
    use crate::token::TokenKind;

    fn first(src: &str) -> (TokenKind, String) {
        let mut r = Recognizer::new(src.as_bytes());
        let t = r.next_token().unwrap();
        (t.kind, String::from_utf8(t.lexeme).unwrap())
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(first("foo_bar1 "), (TokenKind::Identifier, "foo_bar1".into()));
    }

    #[test]
    fn identifier_with_annex_e1_char() {
        // U+00C0 is in Annex E.1 and not in E.2, so it is a valid
        // identifier-initial character.
        assert_eq!(first("\u{C0}b "), (TokenKind::Identifier, "\u{C0}b".into()));
    }

    #[test]
    fn identifier_like_operator_spelling() {
        assert_eq!(first("bitor "), (TokenKind::PreprocessingOpOrPunc, "bitor".into()));
    }

    #[test]
    fn digits_continue_an_identifier_but_cannot_start_one() {
        assert_eq!(first("a1b2 "), (TokenKind::Identifier, "a1b2".into()));
    }
}
