//! Diagnostic system for reader errors.
//!
//! Every reader-level failure is reported as a [`Diagnostic`] carrying:
//! - An error code for searchability (`nickc explain E0102`)
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//! - Notes (which namespace was in effect)
//! - Suggestions (how to fix)

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
