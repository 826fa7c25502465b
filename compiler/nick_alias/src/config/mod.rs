//! Sentinel installation settings.

use nick_host::ReadCase;

/// Trigger character and case policy for an installed sentinel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    pub trigger: char,
    pub case: ReadCase,
}

impl ReaderConfig {
    pub const DEFAULT_TRIGGER: char = '$';

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: char) -> Self {
        self.trigger = trigger;
        self
    }

    #[must_use]
    pub fn with_case(mut self, case: ReadCase) -> Self {
        self.case = case;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            trigger: Self::DEFAULT_TRIGGER,
            case: ReadCase::Upcase,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.trigger, '$');
        assert_eq!(config.case, ReadCase::Upcase);
    }

    #[test]
    fn builders() {
        let config = ReaderConfig::new()
            .with_trigger('@')
            .with_case(ReadCase::Preserve);
        assert_eq!(
            config,
            ReaderConfig {
                trigger: '@',
                case: ReadCase::Preserve,
            }
        );
    }
}
