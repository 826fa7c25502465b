//! Host environment for the nick alias reader.
//!
//! The alias reader does not own namespaces, symbols, or the general
//! reading loop: it consumes them as capabilities. This crate provides a
//! small, complete host so those capabilities exist:
//!
//! - [`NamespaceHost`] / [`NamespaceRenaming`]: the traits the alias core
//!   is written against, implemented by the [`NamespaceTable`] arena.
//! - [`CharStream`]: character cursor with pushback.
//! - [`ReadCase`]: the case-folding policy applied to tokens.
//! - [`ReadTable`] and [`MacroHandler`]: the per-character dispatch table.
//! - [`Reader`]: reads [`Datum`]s, dispatching bound characters to their
//!   handlers and interning every other token in the current namespace.

mod case;
mod namespace;
mod reader;
mod readtable;
mod stream;

pub use case::ReadCase;
pub use namespace::{
    HostError, NamespaceHost, NamespaceRenaming, NamespaceTable, SymbolLookup, Visibility,
};
pub use reader::{Datum, DatumDisplay, HandlerFailure, ReadError, Reader};
pub use readtable::{MacroBinding, MacroHandler, ReadTable};
pub use stream::CharStream;
