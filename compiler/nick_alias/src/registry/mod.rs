//! Per-namespace alias tables.
//!
//! An [`AliasTable`] maps alias strings (case-sensitive) to namespace
//! designators and is owned by exactly one namespace. The registry hands
//! out tables as `Arc` snapshots and replaces them wholesale, so a reader
//! holding a snapshot is never affected by a concurrent replacement.
//!
//! Entries are never removed when a namespace goes away; a registry lives
//! as long as whoever owns it.

use std::sync::Arc;

use nick_ir::{Designator, NamespaceId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Alias → namespace designator mapping for one namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: FxHashMap<String, Designator>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(designator, alias)` pairs.
    ///
    /// When an alias appears more than once, the last pair wins.
    pub fn from_pairs<I, D, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (D, A)>,
        D: Into<Designator>,
        A: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(designator, alias)| (alias.into(), designator.into()))
            .collect();
        AliasTable { entries }
    }

    pub fn get(&self, alias: &str) -> Option<&Designator> {
        self.entries.get(alias)
    }

    /// Entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Designator)> {
        self.entries
            .iter()
            .map(|(alias, designator)| (alias.as_str(), designator))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by alias.
    pub fn sorted(&self) -> Vec<(&str, &Designator)> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_unstable_by_key(|&(alias, _)| alias);
        entries
    }
}

/// Get/set access to alias tables, keyed by namespace.
pub trait AliasStore: Send + Sync {
    /// Snapshot of the namespace's current table, if one was registered.
    fn table(&self, namespace: NamespaceId) -> Option<Arc<AliasTable>>;

    /// Replace the namespace's table. The previous table is discarded, not merged.
    fn replace_table(&self, namespace: NamespaceId, table: AliasTable);
}

/// The standard [`AliasStore`]: a lock-protected map of table snapshots.
#[derive(Default)]
pub struct AliasRegistry {
    tables: RwLock<FxHashMap<NamespaceId, Arc<AliasTable>>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry ready to be shared with an installed dispatcher.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of namespaces with a registered table.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl AliasStore for AliasRegistry {
    fn table(&self, namespace: NamespaceId) -> Option<Arc<AliasTable>> {
        self.tables.read().get(&namespace).cloned()
    }

    fn replace_table(&self, namespace: NamespaceId, table: AliasTable) {
        let aliases = table.len();
        let previous = self.tables.write().insert(namespace, Arc::new(table));
        debug!(
            ?namespace,
            aliases,
            replaced = previous.is_some(),
            "alias table replaced"
        );
    }
}

impl std::fmt::Debug for AliasRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasRegistry")
            .field("namespaces", &self.len())
            .finish()
    }
}

/// True iff `namespace` has a table with at least one entry.
pub fn has_local_aliases<S: AliasStore + ?Sized>(store: &S, namespace: NamespaceId) -> bool {
    store
        .table(namespace)
        .is_some_and(|table| !table.is_empty())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
