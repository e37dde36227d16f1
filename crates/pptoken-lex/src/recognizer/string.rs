//! Character and string literals: encoding-prefix detection, raw string
//! contents (suppressed transformations, delimiter matching), verbatim
//! escape handling in non-raw contents, and the trailing user-defined
//! suffix shared by every literal form.
//!
//! Escape sequences are never interpreted here — a `\` simply protects
//! whatever byte follows it from being mistaken for the terminator,
//! exactly as far as token formation cares.

use pptoken_util::{LexError, LexResult};

use super::{cp_to_ascii, is_ascii_digit, Recognizer};
use crate::source::CodePoint;
use crate::tables;
use crate::token::{Token, TokenKind};

const MAX_RAW_DELIMITER_LEN: usize = 16;

impl<'a> Recognizer<'a> {
    /// Tentatively scans one of `u8`, `u8R`, `u`, `uR`, `U`, `UR`, `L`,
    /// `LR`, `R`, committing only if immediately followed by `"`. On
    /// failure the cursor is restored, so `R` not actually starting a raw
    /// string falls through to ordinary identifier lexing rather than
    /// producing a malformed token.
    pub(super) fn try_scan_string_prefix(&mut self) -> LexResult<Option<Vec<u8>>> {
        self.source.save();
        let result = self.scan_string_prefix_inner();
        match &result {
            Ok(Some(_)) => self.source.discard_save(),
            _ => self.source.restore(),
        }
        result
    }

    fn scan_string_prefix_inner(&mut self) -> LexResult<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        let lead = cp_to_ascii(self.source.current()?);
        match lead {
            Some('u') => {
                self.bump(&mut buf)?;
                if self.cur_is('8')? {
                    self.bump(&mut buf)?;
                    if self.cur_is('R')? {
                        self.bump(&mut buf)?;
                    }
                } else if self.cur_is('R')? {
                    self.bump(&mut buf)?;
                }
            }
            Some('U') | Some('L') => {
                self.bump(&mut buf)?;
                if self.cur_is('R')? {
                    self.bump(&mut buf)?;
                }
            }
            Some('R') => {
                self.bump(&mut buf)?;
            }
            _ => return Ok(None),
        }
        if self.cur_is('"')? {
            Ok(Some(buf))
        } else {
            Ok(None)
        }
    }

    /// Character literals only take `u`, `U`, or `L` (no `u8`, no raw form).
    pub(super) fn try_scan_char_prefix(&mut self) -> LexResult<Option<Vec<u8>>> {
        self.source.save();
        let result = self.scan_char_prefix_inner();
        match &result {
            Ok(Some(_)) => self.source.discard_save(),
            _ => self.source.restore(),
        }
        result
    }

    fn scan_char_prefix_inner(&mut self) -> LexResult<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        match cp_to_ascii(self.source.current()?) {
            Some('u') | Some('U') | Some('L') => {
                self.bump(&mut buf)?;
            }
            _ => return Ok(None),
        }
        if self.cur_is('\'')? {
            Ok(Some(buf))
        } else {
            Ok(None)
        }
    }

    pub(super) fn lex_string_literal(&mut self, prefix: Vec<u8>) -> LexResult<Token> {
        let is_raw = prefix.last() == Some(&b'R');
        let mut buf = prefix;
        self.bump(&mut buf)?; // opening '"'
        if is_raw {
            self.lex_raw_string_contents(&mut buf)?;
        } else {
            self.lex_delimited_contents(&mut buf, '"')?;
        }
        let kind = if self.maybe_lex_ud_suffix(&mut buf)? {
            TokenKind::UserDefinedStringLiteral
        } else {
            TokenKind::StringLiteral
        };
        Ok(Token::new(kind, buf))
    }

    pub(super) fn lex_char_literal(&mut self, prefix: Vec<u8>) -> LexResult<Token> {
        let mut buf = prefix;
        self.bump(&mut buf)?; // opening '\''
        self.lex_delimited_contents(&mut buf, '\'')?;
        let kind = if self.maybe_lex_ud_suffix(&mut buf)? {
            TokenKind::UserDefinedCharacterLiteral
        } else {
            TokenKind::CharacterLiteral
        };
        Ok(Token::new(kind, buf))
    }

    /// Non-raw string/char contents: copies bytes verbatim up to the
    /// unescaped terminator. A `\` protects exactly the one code point
    /// after it, whatever it is, from ending the literal.
    fn lex_delimited_contents(&mut self, buf: &mut Vec<u8>, terminator: char) -> LexResult<()> {
        let start = self.source.raw_position();
        loop {
            if self.source.at_end() {
                return Err(LexError::UnterminatedString { offset: start });
            }
            let cp = self.source.current()?;
            if cp == '\n' as CodePoint {
                return Err(LexError::UnterminatedString { offset: start });
            }
            if cp == terminator as CodePoint {
                self.bump(buf)?;
                return Ok(());
            }
            if cp == '\\' as CodePoint {
                self.bump(buf)?;
                if self.source.at_end() {
                    return Err(LexError::UnterminatedString { offset: start });
                }
                self.bump(buf)?;
                continue;
            }
            self.bump(buf)?;
        }
    }

    /// Raw string contents run with transformations suppressed: trigraphs,
    /// UCNs, comment elision, and line splicing all read as their literal
    /// raw bytes inside `R"delim(...)delim"`.
    fn lex_raw_string_contents(&mut self, buf: &mut Vec<u8>) -> LexResult<()> {
        self.source.suppress();
        let result = self.lex_raw_string_contents_inner(buf);
        self.source.unsuppress();
        result
    }

    fn lex_raw_string_contents_inner(&mut self, buf: &mut Vec<u8>) -> LexResult<()> {
        let start = self.source.raw_position();
        let mut delim = Vec::new();
        loop {
            if self.source.at_end() {
                return Err(LexError::UnterminatedString { offset: start });
            }
            let cp = self.source.current()?;
            if cp == '(' as CodePoint {
                self.bump(buf)?;
                break;
            }
            if delim.len() >= MAX_RAW_DELIMITER_LEN {
                return Err(LexError::RawStringBadDelimiter {
                    offset: start,
                    reason: "delimiter longer than 16 characters".into(),
                });
            }
            if is_disallowed_delimiter_char(cp) {
                return Err(LexError::RawStringBadDelimiter {
                    offset: start,
                    reason: "delimiter contains a disallowed character".into(),
                });
            }
            delim.push(cp);
            self.bump(buf)?;
        }

        loop {
            if self.source.at_end() {
                return Err(LexError::UnterminatedString { offset: start });
            }
            if self.source.current()? == ')' as CodePoint && self.matches_raw_closing(&delim) {
                self.bump(buf)?; // ')'
                for _ in 0..delim.len() {
                    self.bump(buf)?;
                }
                self.bump(buf)?; // '"'
                return Ok(());
            }
            self.bump(buf)?;
        }
    }

    fn matches_raw_closing(&mut self, delim: &[CodePoint]) -> bool {
        for (i, &d) in delim.iter().enumerate() {
            match self.source.peek(i + 1) {
                Ok(cp) if cp == d => continue,
                _ => return false,
            }
        }
        matches!(self.source.peek(delim.len() + 1), Ok(cp) if cp == '"' as CodePoint)
    }

    /// Absorbs a ud-suffix identifier immediately following a literal, if
    /// present. Applies uniformly to string, character, and raw string
    /// literals alike — the suffix grammar does not distinguish them.
    fn maybe_lex_ud_suffix(&mut self, buf: &mut Vec<u8>) -> LexResult<bool> {
        if self.source.at_end() {
            return Ok(false);
        }
        let cp = self.source.current()?;
        if !tables::is_identifier_initial(cp) {
            return Ok(false);
        }
        loop {
            if self.source.at_end() {
                break;
            }
            let cp = self.source.current()?;
            if tables::is_identifier_non_digit(cp) || is_ascii_digit(cp) {
                self.bump(buf)?;
            } else {
                break;
            }
        }
        Ok(true)
    }
}

fn is_disallowed_delimiter_char(cp: CodePoint) -> bool {
    matches!(
        cp,
        x if x == ' ' as CodePoint
            || x == '(' as CodePoint
            || x == ')' as CodePoint
            || x == '\\' as CodePoint
            || x == '\t' as CodePoint
            || x == 0x0B
            || x == 0x0C
            || x == '\n' as CodePoint
    )
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
    fn plain_string_literal() {
        assert_eq!(first("\"hi\" "), (TokenKind::StringLiteral, "\"hi\"".into()));
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        assert_eq!(
            first("\"a\\\"b\" "),
            (TokenKind::StringLiteral, "\"a\\\"b\"".into())
        );
    }

    #[test]
    fn char_literal() {
        assert_eq!(first("'x' "), (TokenKind::CharacterLiteral, "'x'".into()));
    }

    #[test]
    fn user_defined_string_suffix() {
        assert_eq!(
            first("\"kg\"_mass "),
            (TokenKind::UserDefinedStringLiteral, "\"kg\"_mass".into())
        );
    }

    #[test]
    fn encoding_prefixed_string() {
        assert_eq!(first("u8\"hi\" "), (TokenKind::StringLiteral, "u8\"hi\"".into()));
    }

    #[test]
    fn raw_string_with_delimiter() {
        assert_eq!(
            first("R\"lit(a\"b)lit\" "),
            (TokenKind::StringLiteral, "R\"lit(a\"b)lit\"".into())
        );
    }

    #[test]
    fn raw_string_user_defined_suffix() {
        // The original tool this is grounded on omits ud-suffix handling
        // for raw strings; this lexer applies it uniformly instead.
        assert_eq!(
            first("R\"(x)\"_u "),
            (TokenKind::UserDefinedStringLiteral, "R\"(x)\"_u".into())
        );
    }

    #[test]
    fn bare_r_not_followed_by_quote_is_an_identifier() {
        assert_eq!(first("Register "), (TokenKind::Identifier, "Register".into()));
    }

    #[test]
    fn prefix_letters_without_trailing_quote_are_an_identifier() {
        assert_eq!(first("u8_count "), (TokenKind::Identifier, "u8_count".into()));
    }

    #[test]
    fn raw_string_delimiter_inner_parens_do_not_close_early() {
        assert_eq!(
            first("R\"a(x)b(y)a)a\" "),
            (TokenKind::StringLiteral, "R\"a(x)b(y)a)a\"".into())
        );
    }
}
