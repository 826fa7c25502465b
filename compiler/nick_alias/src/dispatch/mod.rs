//! The installed reader macro.
//!
//! [`SentinelDispatcher`] is bound to the trigger character. Each time it
//! fires it picks a [`TokenHandler`] for the current namespace:
//!
//! - [`AliasingHandler`] when the namespace has aliases: the token after the
//!   trigger is read, case-folded and resolved as `ALIAS:NAME`.
//! - [`DelegatingHandler`] otherwise: the trigger is put back and the form
//!   is read with the fallback table's binding for it, so the character
//!   means exactly what it meant before installation.
//!
//! The choice is made per call from the registry, never cached, so
//! registering aliases takes effect for the very next token.

use std::fmt;
use std::sync::Arc;

use nick_host::{
    Datum, MacroBinding, MacroHandler, NamespaceHost, ReadError, ReadTable, Reader,
};
use nick_ir::NamespaceId;
use tracing::{debug, trace};

use crate::qualified::resolve_reference;
use crate::registry::{has_local_aliases, AliasStore};
use crate::token::RawToken;
use crate::{AliasedReferenceError, ReaderConfig};

/// One way of reading the form introduced by the trigger.
///
/// Called after the trigger character has been consumed; `start` is its
/// byte offset.
pub trait TokenHandler {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError>;
}

/// Which [`TokenHandler`] a namespace gets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Aliasing,
    Delegating,
}

/// Aliasing iff `namespace` has at least one alias.
pub fn select_handler<S: AliasStore + ?Sized>(store: &S, namespace: NamespaceId) -> HandlerKind {
    if has_local_aliases(store, namespace) {
        HandlerKind::Aliasing
    } else {
        HandlerKind::Delegating
    }
}

/// Reads `ALIAS:NAME` / `ALIAS::NAME` and produces the referenced symbol.
pub struct AliasingHandler<'a> {
    store: &'a dyn AliasStore,
}

impl<'a> AliasingHandler<'a> {
    pub fn new(store: &'a dyn AliasStore) -> Self {
        AliasingHandler { store }
    }
}

impl TokenHandler for AliasingHandler<'_> {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let raw = RawToken::read(reader.stream());
        let span = reader.stream().span_from(start);
        let namespace = reader.namespace();
        let host = reader.host();

        let resolved = match raw.fold(reader.table().case()) {
            Ok(token) => resolve_reference(host, self.store, namespace, &token),
            Err(kind) => Err(AliasedReferenceError::new(
                kind,
                raw.text,
                host.namespace_name(namespace),
            )),
        };
        match resolved {
            Ok(symbol) => {
                trace!(?symbol, ?span, "aliased reference read");
                Ok(Some(Datum::Symbol(symbol)))
            }
            Err(err) => {
                debug!(%err, ?span, "aliased reference failed");
                Err(ReadError::Handler {
                    trigger,
                    span,
                    failure: Box::new(err),
                })
            }
        }
    }
}

/// Re-reads the form as if the trigger had the fallback table's binding.
pub struct DelegatingHandler<'a> {
    fallback: &'a ReadTable,
}

impl<'a> DelegatingHandler<'a> {
    pub fn new(fallback: &'a ReadTable) -> Self {
        DelegatingHandler { fallback }
    }
}

impl TokenHandler for DelegatingHandler<'_> {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        _start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let mut table = reader.table().clone();
        match self.fallback.binding(trigger) {
            Some(binding) => {
                table.bind(trigger, binding);
            }
            None => {
                table.remove_handler(trigger);
            }
        }
        reader.stream().unread(trigger);
        reader.with_table(table, |r| r.read_form())
    }
}

/// The [`MacroHandler`] installed for the trigger character.
pub struct SentinelDispatcher {
    store: Arc<dyn AliasStore>,
    /// Table whose binding for the trigger is used in delegation mode. It
    /// must not itself bind the trigger to this dispatcher.
    fallback: ReadTable,
}

impl SentinelDispatcher {
    pub fn new(store: Arc<dyn AliasStore>, fallback: ReadTable) -> Self {
        SentinelDispatcher { store, fallback }
    }

    pub fn fallback(&self) -> &ReadTable {
        &self.fallback
    }
}

impl MacroHandler for SentinelDispatcher {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        trigger: char,
        start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let namespace = reader.namespace();
        let kind = select_handler(&*self.store, namespace);
        debug!(%trigger, ?namespace, ?kind, "sentinel dispatched");
        match kind {
            HandlerKind::Aliasing => {
                AliasingHandler::new(&*self.store).read(reader, trigger, start)
            }
            HandlerKind::Delegating => {
                DelegatingHandler::new(&self.fallback).read(reader, trigger, start)
            }
        }
    }
}

impl fmt::Debug for SentinelDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelDispatcher")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

/// Bind `trigger` in `table` to a [`SentinelDispatcher`].
///
/// Without an explicit `fallback`, a copy of `table` taken before the
/// binding is used, so delegation recovers the pre-installation meaning of
/// `trigger`. The installed binding terminates tokens exactly when the
/// fallback's binding does.
pub fn install_sentinel(
    table: &mut ReadTable,
    trigger: char,
    fallback: Option<ReadTable>,
    store: Arc<dyn AliasStore>,
) {
    let fallback = fallback.unwrap_or_else(|| table.clone());
    let terminating = fallback.is_terminating(trigger);
    let handler: Arc<dyn MacroHandler> = Arc::new(SentinelDispatcher::new(store, fallback));
    table.bind(
        trigger,
        MacroBinding {
            handler,
            terminating,
        },
    );
    debug!(%trigger, terminating, "sentinel installed");
}

/// Apply `config`'s case policy to `table`, then install its trigger.
pub fn install_sentinel_with(
    table: &mut ReadTable,
    config: &ReaderConfig,
    store: Arc<dyn AliasStore>,
) {
    table.set_case(config.case);
    install_sentinel(table, config.trigger, None, store);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
