//! Header-name recognition, attempted only when a `#include` (or
//! `%:include`) has just been seen on the current logical line.
//!
//! The standard's grammar distinguishes a header-name from an ordinary
//! `<` or `"` token by context alone, so this only ever runs when
//! [`super::HeaderPhase::HashInclude`] is active. Disambiguation against
//! an empty or newline-led h-char-sequence is a one-character lookahead:
//! reject (and fall back to ordinary lexing of `<`/`"`) only when the
//! first h-char would itself be the terminator or a new-line.

use pptoken_util::{LexError, LexResult};

use super::{cp_to_ascii, Recognizer};
use crate::source::CodePoint;
use crate::token::{Token, TokenKind};

impl<'a> Recognizer<'a> {
    pub(super) fn try_header_name(&mut self) -> LexResult<Option<Token>> {
        let opening = self.source.current()?;
        let opening_char = cp_to_ascii(opening).expect("caller checked '<' or '\"'");
        let terminator = if opening_char == '<' { '>' } else { '"' };

        let first_content = match self.source.peek(1) {
            Ok(cp) => cp,
            Err(_) => return Ok(None),
        };
        if first_content == terminator as CodePoint || first_content == '\n' as CodePoint {
            return Ok(None);
        }

        let start = self.source.raw_position();
        let mut buf = Vec::new();
        self.bump(&mut buf)?;
        loop {
            if self.source.at_end() {
                return Err(LexError::UnterminatedString { offset: start });
            }
            let cp = self.source.current()?;
            if cp == '\n' as CodePoint {
                return Err(LexError::NewlineInHeaderName { offset: start });
            }
            if cp == terminator as CodePoint {
                self.bump(&mut buf)?;
                break;
            }
            self.bump(&mut buf)?;
        }
        Ok(Some(Token::new(TokenKind::HeaderName, buf)))
    }
}
