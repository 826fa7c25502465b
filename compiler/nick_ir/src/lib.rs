//! Nick IR - shared handle types
//!
//! This crate contains the small value types every other `nick_*` crate
//! passes around:
//! - Spans for source locations
//! - Names for interned identifier text
//! - Namespace and symbol handles issued by the host's namespace arena
//! - Designators naming a namespace either by handle or by name
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifier text → `Name(u32)`
//! - **Handles, not pointers**: namespaces → `NamespaceId(u32)`, symbols →
//!   `SymbolId(u32)`. Alias tables key on these handles and never rely on
//!   object identity of a particular runtime.

mod handle;
mod interner;
mod name;
mod span;

pub use handle::{Designator, NamespaceId, SymbolId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
