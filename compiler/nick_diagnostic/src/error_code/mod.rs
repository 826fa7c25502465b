//! Error codes for all reader diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E0102`) whose leading
//! digits indicate the layer that raised it.

use std::fmt;

/// Error codes for all reader diagnostics.
///
/// Format: E#### where the first two digits indicate the layer:
/// - E00xx: Host reader errors
/// - E01xx: Aliased reference errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Host reader errors (E00xx)
    /// Unterminated string literal
    E0001,
    /// Unterminated list
    E0002,
    /// Unmatched close parenthesis
    E0003,
    /// Unknown namespace
    E0004,
    /// Namespace name already in use
    E0005,
    /// Malformed script directive
    E0006,
    /// Quote with nothing after it
    E0007,

    // Aliased reference errors (E01xx)
    /// Malformed aliased reference (no colon, or colon is last)
    E0101,
    /// Unknown alias in the current namespace
    E0102,
    /// Identifier not found in the aliased namespace
    E0103,
    /// Identifier is internal but referenced with a single colon
    E0104,
    /// Case-folding mode not supported by the aliased reader
    E0105,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0101,
        ErrorCode::E0102,
        ErrorCode::E0103,
        ErrorCode::E0104,
        ErrorCode::E0105,
    ];

    /// Get the code as a string (e.g., "E0101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E0103 => "E0103",
            ErrorCode::E0104 => "E0104",
            ErrorCode::E0105 => "E0105",
        }
    }

    /// One-line explanation shown by `nickc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "a string literal was not closed before end of input",
            ErrorCode::E0002 => "a list was not closed before end of input",
            ErrorCode::E0003 => "a `)` appeared with no matching `(`",
            ErrorCode::E0004 => "no namespace is known by the given name",
            ErrorCode::E0005 => "the name or nickname is already used by another namespace",
            ErrorCode::E0006 => "a `defnamespace`, `in-namespace` or `aliases` form is malformed",
            ErrorCode::E0007 => "a `'` quote was followed by end of input instead of a form",
            ErrorCode::E0101 => {
                "an aliased reference must have the form `ALIAS:NAME` or `ALIAS::NAME`"
            }
            ErrorCode::E0102 => "the alias is not registered in the current namespace",
            ErrorCode::E0103 => "the aliased namespace has no identifier with that name",
            ErrorCode::E0104 => {
                "the identifier is internal; use `ALIAS::NAME` to reference it explicitly"
            }
            ErrorCode::E0105 => "the `invert` case mode is not supported for aliased references",
        }
    }

    /// Parse a code from its string form (case-insensitive).
    pub fn parse(code: &str) -> Option<ErrorCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }

    /// Check if this is a host reader error (E00xx).
    pub fn is_reader_error(&self) -> bool {
        self.as_str().starts_with("E00")
    }

    /// Check if this is an aliased reference error (E01xx).
    pub fn is_alias_error(&self) -> bool {
        self.as_str().starts_with("E01")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
