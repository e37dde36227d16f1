//! Token recognition: turns the transformed code point stream from
//! [`crate::source::Source`] into preprocessing tokens.
//!
//! Each call to [`Recognizer::next_token`] returns exactly one token. The
//! only call that can enqueue more than one is end of input, which may
//! need to synthesize a trailing `new-line` before the final `eof`.

mod header_name;
mod identifier;
mod number;
mod operator;
mod string;

use std::collections::VecDeque;

use pptoken_util::LexResult;

use crate::source::{CodePoint, Source};
use crate::tables;
use crate::token::{Token, TokenKind};

/// Tracks whether the next `<` or `"` is eligible to be read as a
/// `header-name`: only true right after a `#` (or `%:`) token is
/// immediately followed by an `include` identifier, modulo intervening
/// whitespace. A `new-line` token always resets this to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderPhase {
    None,
    Hash,
    HashInclude,
}

pub struct Recognizer<'a> {
    source: Source<'a>,
    queue: VecDeque<Token>,
    header_phase: HeaderPhase,
    had_any_bytes: bool,
    last_was_newline: bool,
    finished: bool,
}

impl<'a> Recognizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            source: Source::new(input),
            queue: VecDeque::new(),
            header_phase: HeaderPhase::None,
            had_any_bytes: !input.is_empty(),
            last_was_newline: false,
            finished: false,
        }
    }

    /// Mirrors the library surface's `has_more_tokens`: false once `eof`
    /// has been handed back to the caller.
    pub fn has_more_tokens(&self) -> bool {
        !self.finished
    }

    pub fn next_token(&mut self) -> LexResult<Token> {
        if let Some(tok) = self.queue.pop_front() {
            self.note_token(&tok);
            return Ok(tok);
        }

        if self.source.at_end() {
            if self.had_any_bytes && !self.last_was_newline {
                self.queue.push_back(Token::empty(TokenKind::NewLine));
            }
            self.queue.push_back(Token::empty(TokenKind::Eof));
            let tok = self.queue.pop_front().expect("just pushed eof");
            self.note_token(&tok);
            return Ok(tok);
        }

        let tok = self.scan_one()?;
        self.note_token(&tok);
        Ok(tok)
    }

    fn note_token(&mut self, tok: &Token) {
        if tok.kind == TokenKind::Eof {
            self.finished = true;
            return;
        }
        match tok.kind {
            TokenKind::NewLine => {
                self.last_was_newline = true;
                self.header_phase = HeaderPhase::None;
            }
            TokenKind::Whitespace => {}
            TokenKind::HeaderName => {
                self.last_was_newline = false;
                self.header_phase = HeaderPhase::None;
            }
            TokenKind::PreprocessingOpOrPunc
                if matches!(tok.lexeme_str(), "#" | "%:") =>
            {
                self.last_was_newline = false;
                self.header_phase = HeaderPhase::Hash;
            }
            TokenKind::Identifier
                if self.header_phase == HeaderPhase::Hash && tok.lexeme_str() == "include" =>
            {
                self.last_was_newline = false;
                self.header_phase = HeaderPhase::HashInclude;
            }
            _ => {
                self.last_was_newline = false;
                self.header_phase = HeaderPhase::None;
            }
        }
    }

    fn scan_one(&mut self) -> LexResult<Token> {
        let cp = self.source.current()?;

        if is_horizontal_ws(cp) {
            return self.lex_whitespace();
        }
        if cp == nl() {
            self.source.advance()?;
            return Ok(Token::empty(TokenKind::NewLine));
        }
        if (cp == '<' as CodePoint || cp == '"' as CodePoint)
            && self.header_phase == HeaderPhase::HashInclude
        {
            if let Some(tok) = self.try_header_name()? {
                return Ok(tok);
            }
        }
        if tables::is_identifier_initial(cp) {
            if let Some(ascii) = cp_to_ascii(cp) {
                if matches!(ascii, 'u' | 'U' | 'L' | 'R') {
                    if let Some(prefix) = self.try_scan_string_prefix()? {
                        return self.lex_string_literal(prefix);
                    }
                    if ascii != 'R' {
                        if let Some(prefix) = self.try_scan_char_prefix()? {
                            return self.lex_char_literal(prefix);
                        }
                    }
                }
            }
            return self.lex_identifier();
        }
        if cp == '.' as CodePoint {
            return self.lex_dot();
        }
        if is_ascii_digit(cp) {
            return self.lex_pp_number();
        }
        match cp_to_ascii(cp) {
            Some('"') => self.lex_string_literal(Vec::new()),
            Some('\'') => self.lex_char_literal(Vec::new()),
            Some('#') => self.lex_hash(),
            Some('<') => self.lex_less(),
            Some('>') => self.lex_greater(),
            Some('%') => self.lex_percent(),
            Some(':') => self.lex_colon(),
            Some('-') => self.lex_minus(),
            Some('+') => self.lex_plus(),
            Some('*') => self.lex_star(),
            Some('/') => self.lex_slash(),
            Some('^') => self.lex_caret(),
            Some('&') => self.lex_amp(),
            Some('|') => self.lex_pipe(),
            Some('=') => self.lex_eq(),
            Some('!') => self.lex_bang(),
            Some(c) if "{}[]();,?~".contains(c) => self.lex_single_punct(),
            _ => self.lex_non_whitespace_char(),
        }
    }

    fn lex_whitespace(&mut self) -> LexResult<Token> {
        while !self.source.at_end() {
            let cp = self.source.current()?;
            if is_horizontal_ws(cp) {
                self.source.advance()?;
            } else {
                break;
            }
        }
        Ok(Token::empty(TokenKind::Whitespace))
    }

    fn lex_non_whitespace_char(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        Ok(Token::new(TokenKind::NonWhitespaceChar, buf))
    }

    /// Appends the current code point to `buf` and advances past it.
    fn bump(&mut self, buf: &mut Vec<u8>) -> LexResult<()> {
        let cp = self.source.current()?;
        crate::source::append_codepoint(buf, cp);
        self.source.advance()
    }

    fn cur_is(&mut self, ch: char) -> LexResult<bool> {
        if self.source.at_end() {
            return Ok(false);
        }
        Ok(self.source.current()? == ch as CodePoint)
    }

    fn peek_is(&mut self, n: usize, ch: char) -> bool {
        matches!(self.source.peek(n), Ok(cp) if cp == ch as CodePoint)
    }
}

fn is_horizontal_ws(cp: CodePoint) -> bool {
    matches!(cp, 0x20 | 0x09 | 0x0B | 0x0C | 0x0D)
}

fn nl() -> CodePoint {
    '\n' as CodePoint
}

fn is_ascii_digit(cp: CodePoint) -> bool {
    (0..128).contains(&cp) && (cp as u8 as char).is_ascii_digit()
}

fn cp_to_ascii(cp: CodePoint) -> Option<char> {
    if (0..128).contains(&cp) {
        Some(cp as u8 as char)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<(TokenKind, String)> {
        let mut r = Recognizer::new(src.as_bytes());
        let mut out = Vec::new();
        loop {
            let tok = r.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push((tok.kind, String::from_utf8_lossy(&tok.lexeme).into_owned()));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(tokens(""), vec![(TokenKind::Eof, String::new())]);
    }

    #[test]
    fn trailing_newline_synthesized_when_missing() {
        let t = tokens("x");
        assert_eq!(
            t,
            vec![
                (TokenKind::Identifier, "x".into()),
                (TokenKind::NewLine, String::new()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn existing_trailing_newline_is_not_duplicated() {
        let t = tokens("x\n");
        assert_eq!(
            t,
            vec![
                (TokenKind::Identifier, "x".into()),
                (TokenKind::NewLine, String::new()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn whitespace_run_collapses_to_one_token() {
        let t = tokens("a   b");
        assert_eq!(
            t,
            vec![
                (TokenKind::Identifier, "a".into()),
                (TokenKind::Whitespace, String::new()),
                (TokenKind::Identifier, "b".into()),
                (TokenKind::NewLine, String::new()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn identifier_like_operator_is_tagged_as_operator() {
        let t = tokens("and");
        assert_eq!(t[0], (TokenKind::PreprocessingOpOrPunc, "and".into()));
    }
}
