//! Character cursor with pushback.
//!
//! Reader macros consume their trigger character before they run. A
//! handler that decides the character should be read some other way puts
//! it back with [`CharStream::unread`] and re-enters the reader.

use nick_ir::Span;

/// Character cursor over borrowed source text.
#[derive(Clone, Debug)]
pub struct CharStream<'s> {
    source: &'s str,
    /// Byte offset of the next unread source character.
    pos: usize,
    /// Characters pushed back ahead of `pos`, last pushed is read first.
    pushback: Vec<char>,
}

impl<'s> CharStream<'s> {
    pub fn new(source: &'s str) -> Self {
        CharStream {
            source,
            pos: 0,
            pushback: Vec::new(),
        }
    }

    /// The full source text.
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Peek at the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        match self.pushback.last() {
            Some(&c) => Some(c),
            None => self.source[self.pos..].chars().next(),
        }
    }

    /// Consume and return the next character.
    #[inline]
    pub fn next_char(&mut self) -> Option<char> {
        if let Some(c) = self.pushback.pop() {
            return Some(c);
        }
        let c = self.source[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Push `c` back so that it is the next character read.
    ///
    /// When `c` is the character just consumed from the source, the cursor
    /// simply steps back over it, so positions stay exact.
    pub fn unread(&mut self, c: char) {
        if self.pushback.is_empty() && self.source[..self.pos].ends_with(c) {
            self.pos -= c.len_utf8();
        } else {
            self.pushback.push(c);
        }
    }

    /// Returns `true` once every character has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Byte offset of the next character to be read.
    ///
    /// Pushed-back characters count as sitting just before the source cursor.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources are bounded by Span's u32 offsets"
    )]
    pub fn pos(&self) -> u32 {
        let pending: usize = self.pushback.iter().map(|c| c.len_utf8()).sum();
        self.pos.saturating_sub(pending) as u32
    }

    /// Span from `start` to the current position.
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.pos().max(start))
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.next_char();
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
