//! pp-number lexing. A pp-number starts with a digit, or a `.` followed by
//! a digit, and then greedily continues through digits, identifier
//! characters, `.`, and a sign immediately following `e`/`E` (covering
//! both decimal and hex-float exponents without needing to track radix).

use pptoken_util::LexResult;

use super::{is_ascii_digit, Recognizer};
use crate::source::CodePoint;
use crate::tables;
use crate::token::{Token, TokenKind};

impl<'a> Recognizer<'a> {
    pub(super) fn lex_pp_number(&mut self) -> LexResult<Token> {
        let mut buf = Vec::new();
        self.bump(&mut buf)?; // leading digit, or '.' before a digit

        loop {
            if self.source.at_end() {
                break;
            }
            let cp = self.source.current()?;

            if cp == '.' as CodePoint {
                self.bump(&mut buf)?;
                continue;
            }

            if matches!(cp, x if x == 'e' as CodePoint || x == 'E' as CodePoint) {
                if let Ok(next) = self.source.peek(1) {
                    if next == '+' as CodePoint || next == '-' as CodePoint {
                        self.bump(&mut buf)?; // e/E
                        self.bump(&mut buf)?; // sign
                        continue;
                    }
                }
            }

            if tables::is_identifier_non_digit(cp) || is_ascii_digit(cp) {
                self.bump(&mut buf)?;
                continue;
            }
            break;
        }

        Ok(Token::new(TokenKind::Number, buf))
    }
}
