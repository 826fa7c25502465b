//! Command handlers for the `nickc` CLI.
//!
//! Handlers print their results and exit with status 1 on failure.

mod explain;
mod read;

pub use explain::explain_error;
pub use read::{parse_read_options, read_file, ReadOptions};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
