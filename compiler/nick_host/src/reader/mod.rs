//! The host reading loop.
//!
//! [`Reader::read`] skips whitespace, then either dispatches the next
//! character to its handler in the active [`ReadTable`] or reads a plain
//! token, folds its case, and interns it as a symbol in the current
//! namespace.

use std::fmt;

use nick_diagnostic::{Diagnostic, ErrorCode};
use nick_ir::{NamespaceId, Span, SymbolId};
use tracing::trace;

use crate::namespace::{NamespaceHost, NamespaceTable, Visibility};
use crate::{CharStream, ReadTable};

/// A value produced by the reader.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Datum {
    Symbol(SymbolId),
    Str(String),
    List(Vec<Datum>),
    Quote(Box<Datum>),
}

impl Datum {
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            Datum::Symbol(sym) => Some(*sym),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Datum]> {
        match self {
            Datum::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render with symbols qualified by their home namespace
    /// (`NS:NAME` when exported, `NS::NAME` otherwise).
    pub fn display<'a>(&'a self, host: &'a NamespaceTable) -> DatumDisplay<'a> {
        DatumDisplay { datum: self, host }
    }
}

/// Display adapter returned by [`Datum::display`].
pub struct DatumDisplay<'a> {
    datum: &'a Datum,
    host: &'a NamespaceTable,
}

impl fmt::Display for DatumDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datum {
            Datum::Symbol(sym) => {
                let home = self.host.namespace_name(self.host.symbol_home(*sym));
                let sep = match self.host.symbol_visibility(*sym) {
                    Visibility::External => ":",
                    Visibility::Internal => "::",
                };
                write!(f, "{home}{sep}{}", self.host.symbol_name(*sym))
            }
            Datum::Str(text) => write!(f, "{text:?}"),
            Datum::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item.display(self.host))?;
                }
                f.write_str(")")
            }
            Datum::Quote(inner) => write!(f, "'{}", inner.display(self.host)),
        }
    }
}

/// An error raised by a reader macro that is not part of the host itself.
///
/// Implemented by the alias reader's error type so host-level reporting can
/// still produce a precise diagnostic.
pub trait HandlerFailure: std::error::Error + Send + Sync + 'static {
    /// Convert to a diagnostic anchored at the span of the offending form.
    fn to_diagnostic(&self, span: Span) -> Diagnostic;

    /// View as a plain error, for downcasting.
    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static);
}

/// Reader-level errors. Any of these aborts the current form.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("unterminated list")]
    UnterminatedList { span: Span },
    #[error("unmatched `)`")]
    UnmatchedClose { span: Span },
    #[error("end of input before the quoted form")]
    UnexpectedEof { span: Span },
    #[error("{failure}")]
    Handler {
        trigger: char,
        span: Span,
        failure: Box<dyn HandlerFailure>,
    },
}

impl ReadError {
    /// Span of the form being read when the error occurred.
    pub fn span(&self) -> Span {
        match self {
            ReadError::UnterminatedString { span }
            | ReadError::UnterminatedList { span }
            | ReadError::UnmatchedClose { span }
            | ReadError::UnexpectedEof { span }
            | ReadError::Handler { span, .. } => *span,
        }
    }

    /// The handler's own error, if this came from a reader macro.
    pub fn handler_failure(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            ReadError::Handler { failure, .. } => Some(failure.as_error()),
            _ => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = match self {
            ReadError::UnterminatedString { .. } => (ErrorCode::E0001, "string starts here"),
            ReadError::UnterminatedList { .. } => (ErrorCode::E0002, "list starts here"),
            ReadError::UnexpectedEof { .. } => (ErrorCode::E0007, "quote has nothing to quote"),
            ReadError::UnmatchedClose { .. } => (ErrorCode::E0003, "no matching `(`"),
            ReadError::Handler { failure, span, .. } => return failure.to_diagnostic(*span),
        };
        Diagnostic::error(code)
            .with_message(self.to_string())
            .with_label(self.span(), label)
    }
}

/// Reads [`Datum`]s from a character stream.
pub struct Reader<'h, 's> {
    host: &'h mut NamespaceTable,
    stream: CharStream<'s>,
    table: ReadTable,
    namespace: NamespaceId,
}

impl<'h, 's> Reader<'h, 's> {
    pub fn new(
        host: &'h mut NamespaceTable,
        source: &'s str,
        table: ReadTable,
        namespace: NamespaceId,
    ) -> Self {
        Reader {
            host,
            stream: CharStream::new(source),
            table,
            namespace,
        }
    }

    pub fn host(&self) -> &NamespaceTable {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut NamespaceTable {
        self.host
    }

    pub fn stream(&mut self) -> &mut CharStream<'s> {
        &mut self.stream
    }

    /// The active read table.
    pub fn table(&self) -> &ReadTable {
        &self.table
    }

    /// Namespace new symbols are interned in.
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    pub fn set_namespace(&mut self, namespace: NamespaceId) {
        self.namespace = namespace;
    }

    /// Run `f` with `table` active, then restore the previous table.
    pub fn with_table<R>(&mut self, table: ReadTable, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.table, table);
        let result = f(self);
        self.table = saved;
        result
    }

    pub fn skip_whitespace(&mut self) {
        self.stream.eat_while(char::is_whitespace);
    }

    /// Read the next datum, skipping forms that produce no value.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read(&mut self) -> Result<Option<Datum>, ReadError> {
        loop {
            self.skip_whitespace();
            if self.stream.is_eof() {
                return Ok(None);
            }
            if let Some(datum) = self.read_form()? {
                return Ok(Some(datum));
            }
        }
    }

    /// Read exactly one form starting at the next non-whitespace character.
    ///
    /// Returns `Ok(None)` at end of input, or when the form was consumed by
    /// a handler that produces no value.
    pub fn read_form(&mut self) -> Result<Option<Datum>, ReadError> {
        self.skip_whitespace();
        let Some(c) = self.stream.peek() else {
            return Ok(None);
        };
        if let Some(handler) = self.table.handler(c) {
            let start = self.stream.pos();
            self.stream.next_char();
            trace!(trigger = %c, start, "dispatching reader macro");
            return handler.read(self, c, start);
        }
        Ok(Some(self.read_symbol()))
    }

    /// Read a plain token and intern it in the current namespace.
    fn read_symbol(&mut self) -> Datum {
        let mut token = String::new();
        while let Some(c) = self.stream.peek() {
            if c.is_whitespace() || self.table.is_terminating(c) {
                break;
            }
            token.push(c);
            self.stream.next_char();
        }
        let name = self.table.case().fold(&token);
        Datum::Symbol(self.host.intern_symbol(self.namespace, &name))
    }

    /// Read every remaining datum.
    pub fn read_all(&mut self) -> Result<Vec<Datum>, ReadError> {
        let mut data = Vec::new();
        while let Some(datum) = self.read()? {
            data.push(datum);
        }
        Ok(data)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
