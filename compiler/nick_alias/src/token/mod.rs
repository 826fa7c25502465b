//! Reading the token that follows the sentinel.
//!
//! The token runs up to the next whitespace character, syntactic
//! terminator, or end of input. The terminator is left in the stream.

use nick_host::{CharStream, ReadCase};
use nick_ir::Span;
use tracing::trace;

use crate::AliasErrorKind;

/// Returns `true` if `c` ends an aliased token.
#[inline]
pub fn is_terminator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\r' | '\n' | '\x0c' | '"' | '\'' | '(' | ')' | ',' | ';' | '`'
    )
}

/// Apply a case policy to a whole token.
///
/// `Invert` is rejected rather than approximated.
pub fn fold_case(token: &str, case: ReadCase) -> Result<String, AliasErrorKind> {
    match case {
        ReadCase::Invert => Err(AliasErrorKind::UnsupportedCaseMode { mode: case }),
        ReadCase::Upcase | ReadCase::Downcase | ReadCase::Preserve => Ok(case.fold(token)),
    }
}

/// Token text exactly as it appeared in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub span: Span,
}

impl RawToken {
    /// Collect characters up to (not including) the next terminator.
    pub fn read(stream: &mut CharStream<'_>) -> RawToken {
        let start = stream.pos();
        let mut text = String::new();
        while let Some(c) = stream.next_char() {
            if is_terminator(c) {
                stream.unread(c);
                break;
            }
            text.push(c);
        }
        let span = stream.span_from(start);
        trace!(token = %text, ?span, "aliased token read");
        RawToken { text, span }
    }

    pub fn fold(&self, case: ReadCase) -> Result<String, AliasErrorKind> {
        fold_case(&self.text, case)
    }
}

/// Read a token and fold its case.
///
/// An immediate terminator yields the empty string.
pub fn read_token(stream: &mut CharStream<'_>, case: ReadCase) -> Result<String, AliasErrorKind> {
    RawToken::read(stream).fold(case)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
