//! Per-character dispatch table.
//!
//! A [`ReadTable`] maps characters to [`MacroHandler`]s and carries the
//! case-folding policy for plain tokens. A character without a binding is a
//! token constituent. A bound character dispatches when it starts a form;
//! inside a token it ends the token only if its binding is terminating.
//! Tables are cheap to clone (handlers are shared), so a handler can take a
//! private copy, rebind a character, and read with the copy for one form.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::reader::{Datum, ReadError, Reader};
use crate::ReadCase;

/// A reader macro: invoked after its trigger character has been consumed.
pub trait MacroHandler: Send + Sync {
    /// Read the rest of the form introduced by `trigger`.
    ///
    /// `start` is the byte offset of the trigger character. Returning
    /// `Ok(None)` means the handler consumed input without producing a
    /// value (e.g., a comment).
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError>;
}

/// A handler bound to a character.
#[derive(Clone)]
pub struct MacroBinding {
    pub handler: Arc<dyn MacroHandler>,
    /// Whether the character ends a token it appears inside of.
    pub terminating: bool,
}

impl MacroBinding {
    pub fn terminating(handler: Arc<dyn MacroHandler>) -> Self {
        MacroBinding {
            handler,
            terminating: true,
        }
    }

    pub fn non_terminating(handler: Arc<dyn MacroHandler>) -> Self {
        MacroBinding {
            handler,
            terminating: false,
        }
    }
}

/// Case policy plus character → handler bindings.
#[derive(Clone, Default)]
pub struct ReadTable {
    case: ReadCase,
    bindings: FxHashMap<char, MacroBinding>,
}

impl ReadTable {
    /// A table with no bound characters and the default case policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table: `(`, `)`, `"`, `'` and `;` are bound.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.set_handler('(', Arc::new(ListHandler));
        table.set_handler(')', Arc::new(CloseHandler));
        table.set_handler('"', Arc::new(StringHandler));
        table.set_handler('\'', Arc::new(QuoteHandler));
        table.set_handler(';', Arc::new(CommentHandler));
        table
    }

    pub fn case(&self) -> ReadCase {
        self.case
    }

    pub fn set_case(&mut self, case: ReadCase) {
        self.case = case;
    }

    /// Builder form of [`ReadTable::set_case`].
    #[must_use]
    pub fn with_case(mut self, case: ReadCase) -> Self {
        self.case = case;
        self
    }

    /// The binding for `c`, if any.
    pub fn binding(&self, c: char) -> Option<MacroBinding> {
        self.bindings.get(&c).cloned()
    }

    /// The handler bound to `c`, if any.
    pub fn handler(&self, c: char) -> Option<Arc<dyn MacroHandler>> {
        self.bindings.get(&c).map(|b| Arc::clone(&b.handler))
    }

    pub fn is_bound(&self, c: char) -> bool {
        self.bindings.contains_key(&c)
    }

    /// Whether `c` ends a token in progress.
    pub fn is_terminating(&self, c: char) -> bool {
        self.bindings.get(&c).is_some_and(|b| b.terminating)
    }

    /// Bind `c`, returning the previous binding.
    pub fn bind(&mut self, c: char, binding: MacroBinding) -> Option<MacroBinding> {
        self.bindings.insert(c, binding)
    }

    /// Bind `c` to a terminating `handler`, returning the previous binding.
    pub fn set_handler(
        &mut self,
        c: char,
        handler: Arc<dyn MacroHandler>,
    ) -> Option<MacroBinding> {
        self.bind(c, MacroBinding::terminating(handler))
    }

    /// Make `c` a plain constituent again, returning the previous binding.
    pub fn remove_handler(&mut self, c: char) -> Option<MacroBinding> {
        self.bindings.remove(&c)
    }
}

impl fmt::Debug for ReadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<char> = self.bindings.keys().copied().collect();
        bound.sort_unstable();
        f.debug_struct("ReadTable")
            .field("case", &self.case)
            .field("bound", &bound)
            .finish()
    }
}

struct ListHandler;

impl MacroHandler for ListHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        _trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let mut items = Vec::new();
        loop {
            reader.skip_whitespace();
            match reader.stream().peek() {
                None => {
                    return Err(ReadError::UnterminatedList {
                        span: reader.stream().span_from(start),
                    })
                }
                Some(')') => {
                    reader.stream().next_char();
                    return Ok(Some(Datum::List(items)));
                }
                Some(_) => {
                    if let Some(item) = reader.read_form()? {
                        items.push(item);
                    }
                }
            }
        }
    }
}

struct CloseHandler;

impl MacroHandler for CloseHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        _trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        Err(ReadError::UnmatchedClose {
            span: reader.stream().span_from(start),
        })
    }
}

struct StringHandler;

impl MacroHandler for StringHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let mut text = String::new();
        loop {
            match reader.stream().next_char() {
                Some(c) if c == trigger => return Ok(Some(Datum::Str(text))),
                Some('\\') => match reader.stream().next_char() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(ReadError::UnterminatedString {
            span: reader.stream().span_from(start),
        })
    }
}

struct QuoteHandler;

impl MacroHandler for QuoteHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        _trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        match reader.read()? {
            Some(quoted) => Ok(Some(Datum::Quote(Box::new(quoted)))),
            None => Err(ReadError::UnexpectedEof {
                span: reader.stream().span_from(start),
            }),
        }
    }
}

struct CommentHandler;

impl MacroHandler for CommentHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        _trigger: char,
        _start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        reader.stream().eat_while(|c| c != '\n');
        Ok(None)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
