//! Property-based checks of the invariants that must hold for every input,
//! not just the handwritten example cases covered by the unit tests.

use proptest::prelude::*;
use pptoken_lex::{Token, TokenKind, Tokeniser};

fn lex_all(src: &[u8]) -> Option<Vec<Token>> {
    let mut t = Tokeniser::new(src);
    let mut out = Vec::new();
    while t.has_more_tokens() {
        match t.next_token() {
            Ok(tok) => out.push(tok),
            Err(_) => return None,
        }
    }
    Some(out)
}

/// Printable ASCII minus the characters that would open a raw-string,
/// comment, or literal region, so every generated line is guaranteed to
/// lex without hitting a fatal error.
fn plain_line_char() -> impl Strategy<Value = char> {
    prop_oneof![
        Just(' '),
        proptest::char::range('a', 'z'),
        proptest::char::range('A', 'Z'),
        proptest::char::range('0', '9'),
        Just('_'),
        Just('+'),
        Just('-'),
        Just(';'),
        Just('('),
        Just(')'),
    ]
}

proptest! {
    /// Invariant 2 (§8): exactly one `eof`, at the end, preceded by a
    /// `new-line` whenever the source is non-empty.
    #[test]
    fn terminator_is_always_well_formed(line in prop::collection::vec(plain_line_char(), 0..40)) {
        let src: String = line.into_iter().collect();
        let toks = lex_all(src.as_bytes()).expect("plain ascii line never errors");
        prop_assert_eq!(toks.last().unwrap().kind, TokenKind::Eof);
        prop_assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
        if !src.is_empty() {
            let before_eof = &toks[toks.len() - 2];
            prop_assert_eq!(before_eof.kind, TokenKind::NewLine);
        }
    }

    /// Invariant 3 (§8): no whitespace run is ever split into two adjacent
    /// `whitespace` tokens.
    #[test]
    fn whitespace_runs_never_split(line in prop::collection::vec(plain_line_char(), 0..40)) {
        let src: String = line.into_iter().collect();
        let toks = lex_all(src.as_bytes()).expect("plain ascii line never errors");
        for pair in toks.windows(2) {
            prop_assert!(!(pair[0].kind == TokenKind::Whitespace && pair[1].kind == TokenKind::Whitespace));
        }
    }

    /// Appending more source never shrinks the token stream: every byte
    /// still has to land somewhere.
    #[test]
    fn extending_input_does_not_remove_tokens(
        line in prop::collection::vec(plain_line_char(), 1..20),
        suffix in prop::collection::vec(plain_line_char(), 1..20),
    ) {
        let base: String = line.into_iter().collect();
        let extended = format!("{base}{}", suffix.into_iter().collect::<String>());
        let base_toks = lex_all(base.as_bytes()).expect("plain ascii line never errors");
        let extended_toks = lex_all(extended.as_bytes()).expect("plain ascii line never errors");
        prop_assert!(extended_toks.len() >= base_toks.len());
    }
}

#[test]
fn idempotence_of_relexing_identifiers_and_operators() {
    let src = b"foo + bar123 * (baz);\n";
    let first = lex_all(src).unwrap();
    let rejoined: Vec<u8> = first
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::NewLine | TokenKind::Eof))
        .flat_map(|t| t.lexeme.iter().copied().chain(std::iter::once(b' ')))
        .collect();
    let second = lex_all(&rejoined).unwrap();
    let kinds_first: Vec<_> = first
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::NewLine | TokenKind::Eof))
        .map(|t| t.kind)
        .collect();
    let kinds_second: Vec<_> = second
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::NewLine | TokenKind::Eof))
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds_first, kinds_second);
}
