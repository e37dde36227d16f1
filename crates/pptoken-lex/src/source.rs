//! Character source: translation phases 1 and 2 over a raw byte buffer.
//!
//! Presents the post-transformation input as a linear, peekable stream of
//! code points. Internally a raw byte cursor feeds a small pushback queue
//! of already-transformed code points; `current`/`peek` read the queue,
//! refilling it by running the transformation pipeline over the raw bytes
//! whenever it runs dry. This indirection exists so that a single raw
//! pull that yields more structure than one output character (a decoded
//! UTF-8 scalar, a folded trigraph, a comment collapsed to one space)
//! never has to re-enter the pipeline to satisfy a later `peek`.

use std::collections::VecDeque;

use pptoken_util::{LexError, LexResult};

/// A post-transformation code point. Non-negative values are Unicode
/// scalar values. Negative values represent a raw byte with the high bit
/// set that has been read ahead but not combined into a decoded scalar
/// (used inside regions where transformations are suppressed, such as
/// raw string contents).
pub type CodePoint = i32;

const TRIGRAPH_TABLE: &[(u8, u8)] = &[
    (b'=', b'#'),
    (b'/', b'\\'),
    (b'\'', b'^'),
    (b'(', b'['),
    (b')', b']'),
    (b'!', b'|'),
    (b'<', b'{'),
    (b'>', b'}'),
    (b'-', b'~'),
];

/// Encodes a raw byte as a pending (not-yet-combined) code point.
fn pending_byte(b: u8) -> CodePoint {
    -(b as CodePoint) - 1
}

/// Appends the bytes `cp` stands for to `out`, re-encoding scalar values
/// to UTF-8 and writing pending raw bytes back out verbatim.
pub fn append_codepoint(out: &mut Vec<u8>, cp: CodePoint) {
    if cp >= 0 {
        if let Some(c) = char::from_u32(cp as u32) {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    } else {
        out.push((-(cp + 1)) as u8);
    }
}

struct Checkpoint {
    pos: usize,
    pushback: VecDeque<CodePoint>,
}

pub struct Source<'a> {
    bytes: &'a [u8],
    pos: usize,
    pushback: VecDeque<CodePoint>,
    suppress: u32,
    saved: Option<Checkpoint>,
}

impl<'a> Source<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            pushback: VecDeque::new(),
            suppress: 0,
            saved: None,
        }
    }

    /// Byte offset of the cursor in the raw, untransformed buffer.
    pub fn raw_position(&self) -> usize {
        self.pos
    }

    /// Disables transformations until the matching `unsuppress` call.
    /// Nestable: tracked with a counter, not a flag.
    pub fn suppress(&mut self) {
        self.suppress += 1;
    }

    pub fn unsuppress(&mut self) {
        self.suppress = self.suppress.saturating_sub(1);
    }

    pub fn save(&mut self) {
        self.saved = Some(Checkpoint {
            pos: self.pos,
            pushback: self.pushback.clone(),
        });
    }

    pub fn restore(&mut self) {
        if let Some(checkpoint) = self.saved.take() {
            self.pos = checkpoint.pos;
            self.pushback = checkpoint.pushback;
        }
    }

    pub fn discard_save(&mut self) {
        self.saved = None;
    }

    /// True iff the raw buffer is exhausted and the pushback queue is empty.
    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len() && self.pushback.is_empty()
    }

    pub fn current(&mut self) -> LexResult<CodePoint> {
        self.fill(1)?;
        self.pushback.front().copied().ok_or(LexError::ReadPastEnd)
    }

    /// The `n`th subsequent code point, for `n >= 1`.
    pub fn peek(&mut self, n: usize) -> LexResult<CodePoint> {
        debug_assert!(n >= 1, "peek(0) is current()");
        self.fill(n + 1)?;
        self.pushback.get(n).copied().ok_or(LexError::ReadPastEnd)
    }

    pub fn advance(&mut self) -> LexResult<()> {
        self.fill(1)?;
        self.pushback
            .pop_front()
            .map(|_| ())
            .ok_or(LexError::ReadPastEnd)
    }

    pub fn skip(&mut self, n: usize) -> LexResult<()> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    fn fill(&mut self, count: usize) -> LexResult<()> {
        while self.pushback.len() < count {
            match self.transform_next()? {
                Some(cp) => self.pushback.push_back(cp),
                None => break,
            }
        }
        Ok(())
    }

    fn raw_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Runs the transformation pipeline starting at the raw cursor,
    /// producing at most one output code point per call. Returns `Ok(None)`
    /// only when the raw buffer is exhausted.
    fn transform_next(&mut self) -> LexResult<Option<CodePoint>> {
        loop {
            let b = match self.raw_byte_at(0) {
                Some(b) => b,
                None => return Ok(None),
            };

            if self.suppress > 0 {
                self.pos += 1;
                let cp = if b < 0x80 { b as CodePoint } else { pending_byte(b) };
                return Ok(Some(cp));
            }

            if b >= 0x80 {
                return self.decode_utf8().map(Some);
            }

            if b == b'/' {
                if let Some(cp) = self.try_elide_comment()? {
                    return Ok(Some(cp));
                }
            }

            if b == b'?' {
                if let Some(cp) = self.try_fold_trigraph() {
                    return Ok(Some(cp));
                }
            }

            if b == b'\\' {
                if let Some(cp) = self.try_decode_ucn() {
                    return Ok(Some(cp));
                }
                if self.try_splice() {
                    continue;
                }
            }

            self.pos += 1;
            return Ok(Some(b as CodePoint));
        }
    }

    fn decode_utf8(&mut self) -> LexResult<CodePoint> {
        let start = self.pos;
        let lead = self.raw_byte_at(0).expect("checked by caller");
        let len = if lead <= 0xDF {
            2
        } else if lead <= 0xEF {
            3
        } else if lead <= 0xF7 {
            4
        } else {
            return Err(LexError::InvalidUtf8 { offset: start });
        };

        let mut seq = Vec::with_capacity(len);
        for i in 0..len {
            match self.raw_byte_at(i) {
                Some(b) => seq.push(b),
                None => return Err(LexError::InvalidUtf8 { offset: start }),
            }
        }

        let s = std::str::from_utf8(&seq).map_err(|_| LexError::InvalidUtf8 { offset: start })?;
        let ch = s.chars().next().ok_or(LexError::InvalidUtf8 { offset: start })?;
        self.pos += len;
        Ok(ch as CodePoint)
    }

    /// `//` consumes through (not including) the next `\n`; `/*` consumes
    /// through the terminating `*/`. Either way, emits a single space.
    fn try_elide_comment(&mut self) -> LexResult<Option<CodePoint>> {
        if self.raw_byte_at(1) == Some(b'/') {
            self.pos += 2;
            while !matches!(self.raw_byte_at(0), Some(b'\n') | None) {
                self.pos += 1;
            }
            return Ok(Some(b' ' as CodePoint));
        }
        if self.raw_byte_at(1) == Some(b'*') {
            let start = self.pos;
            self.pos += 2;
            loop {
                match (self.raw_byte_at(0), self.raw_byte_at(1)) {
                    (Some(b'*'), Some(b'/')) => {
                        self.pos += 2;
                        break;
                    }
                    (Some(_), _) => self.pos += 1,
                    (None, _) => return Err(LexError::UnterminatedComment { offset: start }),
                }
            }
            return Ok(Some(b' ' as CodePoint));
        }
        Ok(None)
    }

    fn try_fold_trigraph(&mut self) -> Option<CodePoint> {
        if self.raw_byte_at(1) != Some(b'?') {
            return None;
        }
        let third = self.raw_byte_at(2)?;
        let folded = TRIGRAPH_TABLE
            .iter()
            .find(|&&(from, _)| from == third)
            .map(|&(_, to)| to)?;
        self.pos += 3;
        Some(folded as CodePoint)
    }

    /// `\uXXXX` or `\UXXXXXXXX`. Does not mutate the cursor unless all hex
    /// digits are present, which is what "restores the backslash" on a
    /// short hex run without needing a save/restore round trip.
    fn try_decode_ucn(&mut self) -> Option<CodePoint> {
        let hex_len = match self.raw_byte_at(1) {
            Some(b'u') => 4,
            Some(b'U') => 8,
            _ => return None,
        };
        let mut value: u32 = 0;
        for i in 0..hex_len {
            let digit = self.raw_byte_at(2 + i)?;
            value = value * 16 + (digit as char).to_digit(16)?;
        }
        self.pos += 2 + hex_len;
        Some(value as CodePoint)
    }

    fn try_splice(&mut self) -> bool {
        if self.raw_byte_at(1) == Some(b'\n') {
            self.pos += 2;
            true
        } else {
            false
        }
    }
}
