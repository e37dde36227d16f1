//! pptoken-drv - the tokeniser command-line driver.
//!
//! Reads an entire translation unit from stdin, runs it through
//! [`pptoken_lex::Tokeniser`], and writes one line per token to stdout:
//!
//! ```text
//! <kind-name> <byte-count> <lexeme-bytes>
//! ```
//!
//! `whitespace-sequence`, `new-line`, and `eof` omit the byte count and
//! lexeme. A lexing failure is reported on stderr as `ERROR: <message>`
//! and maps to a non-zero exit code from `main`.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use pptoken_lex::{Token, TokenKind, Tokeniser};

/// Reads all of `input`, tokenises it, and writes the token stream to
/// `output`. Returns the first lexing error encountered, if any.
pub fn run<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .context("reading source from stdin")?;

    let mut tokeniser = Tokeniser::new(&bytes);
    while tokeniser.has_more_tokens() {
        let token = tokeniser.next_token().context("lexing source")?;
        write_token(&mut output, &token).context("writing token to stdout")?;
    }
    Ok(())
}

fn write_token<W: Write>(out: &mut W, token: &Token) -> std::io::Result<()> {
    match token.kind {
        TokenKind::Whitespace | TokenKind::NewLine | TokenKind::Eof => {
            writeln!(out, "{}", token.kind.driver_name())
        }
        _ => {
            writeln!(out, "{} {}", token.kind.driver_name(), token.lexeme.len())?;
            out.write_all(&token.lexeme)?;
            writeln!(out)
        }
    }
}
