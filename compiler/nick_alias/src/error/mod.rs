//! Aliased reference errors.
//!
//! Every failure of the alias reader is an [`AliasedReferenceError`]: what
//! went wrong ([`AliasErrorKind`]), the offending token, and the namespace
//! that was current when the token was read.

use nick_diagnostic::{Diagnostic, ErrorCode};
use nick_host::{HandlerFailure, ReadCase};
use nick_ir::Span;

/// What went wrong while resolving an aliased reference.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum AliasErrorKind {
    /// No colon, or the colon is the last character.
    #[error("malformed aliased reference, expected `ALIAS:NAME` or `ALIAS::NAME`")]
    MalformedReference,
    /// The current namespace has no alias table, no entry for the alias, or
    /// the entry names a namespace that does not exist.
    #[error("unknown alias `{alias}`{}", dangling_note(.designator.as_deref()))]
    UnknownAlias {
        alias: String,
        /// Set when the alias exists but its designator resolves to nothing.
        designator: Option<String>,
    },
    /// The aliased namespace has no identifier with this name.
    #[error("`{name}` not found in namespace `{target}`")]
    UnresolvedIdentifier { target: String, name: String },
    /// The identifier is internal and was referenced with a single colon.
    #[error("`{name}` is not external in namespace `{target}`")]
    NotExternal { target: String, name: String },
    /// The active case policy cannot be applied to aliased references.
    #[error("case mode `{mode}` is not implemented for aliased references")]
    UnsupportedCaseMode { mode: ReadCase },
}

fn dangling_note(designator: Option<&str>) -> String {
    designator
        .map(|d| format!(" (it names `{d}`, which is not a namespace)"))
        .unwrap_or_default()
}

impl AliasErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            AliasErrorKind::MalformedReference => ErrorCode::E0101,
            AliasErrorKind::UnknownAlias { .. } => ErrorCode::E0102,
            AliasErrorKind::UnresolvedIdentifier { .. } => ErrorCode::E0103,
            AliasErrorKind::NotExternal { .. } => ErrorCode::E0104,
            AliasErrorKind::UnsupportedCaseMode { .. } => ErrorCode::E0105,
        }
    }
}

/// An aliased reference that could not be read.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} (token `{token}` in namespace `{namespace}`)")]
pub struct AliasedReferenceError {
    pub kind: AliasErrorKind,
    /// Token text as read (after case folding, when folding succeeded).
    pub token: String,
    /// Name of the namespace current when the token was read.
    pub namespace: String,
}

impl AliasedReferenceError {
    pub fn new(kind: AliasErrorKind, token: impl Into<String>, namespace: impl Into<String>) -> Self {
        AliasedReferenceError {
            kind,
            token: token.into(),
            namespace: namespace.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Convert to a diagnostic anchored at the token's span.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(span, format!("in `{}`", self.token))
            .with_note(format!("current namespace is `{}`", self.namespace));
        match &self.kind {
            AliasErrorKind::MalformedReference => {
                diag.with_suggestion("write the alias, a colon, then the identifier")
            }
            AliasErrorKind::UnknownAlias { designator: None, .. } => diag.with_suggestion(
                format!("register the alias for `{}` first", self.namespace),
            ),
            AliasErrorKind::NotExternal { .. } => {
                diag.with_suggestion("use `::` to reference an internal identifier")
            }
            AliasErrorKind::UnsupportedCaseMode { .. } => {
                diag.with_suggestion("use the upcase, downcase, or preserve case mode")
            }
            AliasErrorKind::UnknownAlias { .. } | AliasErrorKind::UnresolvedIdentifier { .. } => {
                diag
            }
        }
    }
}

impl HandlerFailure for AliasedReferenceError {
    fn to_diagnostic(&self, span: Span) -> Diagnostic {
        AliasedReferenceError::to_diagnostic(self, span)
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
