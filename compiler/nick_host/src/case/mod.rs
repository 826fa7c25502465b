//! Token case-folding policy.

use std::fmt;

/// How a reader folds the case of a token before interning it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ReadCase {
    /// Fold every letter to upper case.
    #[default]
    Upcase,
    /// Fold every letter to lower case.
    Downcase,
    /// Leave the token as written.
    Preserve,
    /// Flip the case of single-case tokens; leave mixed-case tokens alone.
    Invert,
}

impl ReadCase {
    /// All policies, in declaration order.
    pub const ALL: [ReadCase; 4] = [
        ReadCase::Upcase,
        ReadCase::Downcase,
        ReadCase::Preserve,
        ReadCase::Invert,
    ];

    /// Apply this policy to `token`.
    pub fn fold(self, token: &str) -> String {
        match self {
            ReadCase::Upcase => upcase(token),
            ReadCase::Downcase => downcase(token),
            ReadCase::Preserve => token.to_owned(),
            ReadCase::Invert => {
                let has_upper = token.chars().any(char::is_uppercase);
                let has_lower = token.chars().any(char::is_lowercase);
                match (has_upper, has_lower) {
                    (true, false) => downcase(token),
                    (false, true) => upcase(token),
                    _ => token.to_owned(),
                }
            }
        }
    }

    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadCase::Upcase => "upcase",
            ReadCase::Downcase => "downcase",
            ReadCase::Preserve => "preserve",
            ReadCase::Invert => "invert",
        }
    }

    /// Parse a command-line name.
    pub fn from_name(name: &str) -> Option<ReadCase> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }
}

impl fmt::Display for ReadCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map each character through `map`, keeping it when the mapping is not a
/// single character (e.g. `ß` upcases to `SS`).
fn map_chars<I>(token: &str, map: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    token
        .chars()
        .map(|c| {
            let mut mapped = map(c);
            match (mapped.next(), mapped.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

fn upcase(token: &str) -> String {
    map_chars(token, char::to_uppercase)
}

fn downcase(token: &str) -> String {
    map_chars(token, char::to_lowercase)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
