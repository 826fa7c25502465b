//! Namespace-local aliases for qualified references.
//!
//! Within a namespace, short aliases may stand in for other namespaces. A
//! sentinel character (by default `$`) installed in the host read table
//! rewrites `$alias:name` and `$alias::name` into the symbol `name` of the
//! aliased namespace, with the same visibility rules as ordinary qualified
//! names: a single colon requires the symbol to be external, a double colon
//! accepts internal symbols too.
//!
//! # Architecture
//!
//! ```text
//! register ──► registry ──► resolve ◄── dispatch ◄── token / qualified
//! ```
//!
//! - [`registry`]: per-namespace [`AliasTable`]s behind the [`AliasStore`] trait
//! - [`resolve`]: alias → namespace, and the reverse lookup used for nicknames
//! - [`token`]: reads the raw token that follows the sentinel
//! - [`qualified`]: splits `ALIAS:NAME` / `ALIAS::NAME` and resolves it
//! - [`dispatch`]: the installed reader macro; aliases or delegates per call
//! - [`register`]: the declaration-time surface
//! - [`nicknames`]: temporarily exposes aliases as namespace nicknames
//!
//! The registry is an explicit object, never global state: share one
//! `Arc<AliasRegistry>` between the code that registers aliases and the
//! installed dispatcher.

mod config;
pub mod dispatch;
mod error;
pub mod nicknames;
pub mod qualified;
pub mod register;
pub mod registry;
pub mod resolve;
pub mod token;

pub use config::ReaderConfig;
pub use dispatch::{
    install_sentinel, install_sentinel_with, select_handler, AliasingHandler, DelegatingHandler,
    HandlerKind, SentinelDispatcher, TokenHandler,
};
pub use error::{AliasErrorKind, AliasedReferenceError};
pub use nicknames::{with_aliases_as_nicknames, NicknameHook, NicknameScope};
pub use qualified::{resolve_reference, QualifiedRef, RefVisibility};
pub use register::{register_aliases, set_alias_table};
pub use registry::{has_local_aliases, AliasRegistry, AliasStore, AliasTable};
pub use resolve::{aliases_of, resolve_alias};
pub use token::{fold_case, is_terminator, read_token, RawToken};
