//! Preprocessing operators and punctuators: maximal munch over the fixed
//! spelling table of 2.13, including the digraphs (`<:`, `:>`, `%:`,
//! `%:%:`) and the special four-character lookahead that disambiguates
//! `<::` between `<` `::` and `<:` `::`.

use pptoken_util::LexResult;

use super::Recognizer;
use crate::token::{Token, TokenKind};

impl<'a> Recognizer<'a> {
    fn op(&mut self, buf: Vec<u8>) -> LexResult<Token> {
        Ok(Token::new(TokenKind::PreprocessingOpOrPunc, buf))
    }

    pub(super) fn lex_single_punct(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        self.op(buf)
    }

    pub(super) fn lex_dot(&mut self) -> LexResult<Token> {
        if !self.source.at_end() {
            if let Ok(n1) = self.source.peek(1) {
                if super::is_ascii_digit(n1) {
                    return self.lex_pp_number();
                }
            }
        }
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // '.'
        if self.cur_is('.')? && self.peek_is(1, '.') {
            self.bump(&mut buf)?;
            self.bump(&mut buf)?;
            return self.op(buf); // "..."
        }
        if self.cur_is('*')? {
            self.bump(&mut buf)?;
            return self.op(buf); // ".*"
        }
        self.op(buf)
    }

    pub(super) fn lex_hash(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        if self.cur_is('#')? {
            self.bump(&mut buf)?;
        }
        self.op(buf)
    }

    pub(super) fn lex_percent(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // '%'
        if self.cur_is('>')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "%>"
        }
        if self.cur_is('=')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "%="
        }
        if self.cur_is(':')? {
            self.bump(&mut buf)?; // "%:"
            if self.cur_is('%')? && self.peek_is(1, ':') {
                self.bump(&mut buf)?;
                self.bump(&mut buf)?;
                return self.op(buf); // "%:%:"
            }
            return self.op(buf);
        }
        self.op(buf) // "%"
    }

    pub(super) fn lex_colon(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // ':'
        if self.cur_is(':')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "::"
        }
        if self.cur_is('>')? {
            self.bump(&mut buf)?;
            return self.op(buf); // ":>"
        }
        self.op(buf) // ":"
    }

    /// `<`, `<<`, `<<=`, `<=`, `<:`, `<%`, plus the `<::` special case: the
    /// character that would follow a would-be `<::` decides whether `<`
    /// stands alone (leaving `::` for the next call) or `<:` does (leaving
    /// `::` likewise), per 2.5p3.
    pub(super) fn lex_less(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // '<'

        if self.cur_is('<')? {
            self.bump(&mut buf)?;
            if self.cur_is('=')? {
                self.bump(&mut buf)?;
            }
            return self.op(buf); // "<<" or "<<="
        }
        if self.cur_is('=')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "<="
        }
        if self.cur_is('%')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "<%"
        }
        if self.cur_is(':')? {
            if self.peek_is(1, ':') {
                let fourth = self.source.peek(2).ok();
                let treat_as_colon_colon_digraph =
                    fourth == Some(':' as crate::source::CodePoint)
                        || fourth == Some('>' as crate::source::CodePoint);
                if treat_as_colon_colon_digraph {
                    self.bump(&mut buf)?; // second char of "<:"
                    return self.op(buf); // "<:" ; the "::" follows on later calls
                }
                // leave both colons for the next call to read as "::"
                return self.op(buf); // "<" alone
            }
            self.bump(&mut buf)?;
            return self.op(buf); // "<:"
        }
        self.op(buf) // "<"
    }

    pub(super) fn lex_greater(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // '>'
        if self.cur_is('=')? {
            self.bump(&mut buf)?;
            return self.op(buf); // ">="
        }
        if self.cur_is('>')? {
            self.bump(&mut buf)?;
            if self.cur_is('=')? {
                self.bump(&mut buf)?;
            }
            return self.op(buf); // ">>" or ">>="
        }
        self.op(buf)
    }

    pub(super) fn lex_minus(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // '-'
        if self.cur_is('-')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "--"
        }
        if self.cur_is('=')? {
            self.bump(&mut buf)?;
            return self.op(buf); // "-="
        }
        if self.cur_is('>')? {
            self.bump(&mut buf)?;
            if self.cur_is('*')? {
                self.bump(&mut buf)?;
            }
            return self.op(buf); // "->" or "->*"
        }
        self.op(buf)
    }

    pub(super) fn lex_plus(&mut self) -> LexResult<Token> {
        self.doubled_or_eq('+')
    }
    pub(super) fn lex_star(&mut self) -> LexResult<Token> {
        self.eq_only('*')
    }
    pub(super) fn lex_slash(&mut self) -> LexResult<Token> {
        self.eq_only('/')
    }
    pub(super) fn lex_caret(&mut self) -> LexResult<Token> {
        self.eq_only('^')
    }
    pub(super) fn lex_amp(&mut self) -> LexResult<Token> {
        self.doubled_or_eq('&')
    }
    pub(super) fn lex_pipe(&mut self) -> LexResult<Token> {
        self.doubled_or_eq('|')
    }
    pub(super) fn lex_eq(&mut self) -> LexResult<Token> {
        self.eq_only('=')
    }
    pub(super) fn lex_bang(&mut self) -> LexResult<Token> {
        self.eq_only('!')
    }

    /// `c`, `cc`, or `c=`: the pattern shared by `+`, `&`, `|`.
    fn doubled_or_eq(&mut self, c: char) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        if self.cur_is(c)? || self.cur_is('=')? {
            self.bump(&mut buf)?;
        }
        self.op(buf)
    }

    /// `c` or `c=`: the pattern shared by `*`, `/`, `^`, `=`, `!`.
    fn eq_only(&mut self, _c: char) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        if self.cur_is('=')? {
            self.bump(&mut buf)?;
        }
        self.op(buf)
    }
}
