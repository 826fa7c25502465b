//! Namespace arena.
//!
//! Namespaces and symbols live in flat vectors and are referred to by
//! [`NamespaceId`] / [`SymbolId`] handles. Each namespace has one primary
//! name, any number of nicknames, and a table of the symbols it owns or
//! has imported; a subset of those are exported (externally visible).

use nick_diagnostic::{Diagnostic, ErrorCode};
use nick_ir::{Designator, Name, NamespaceId, Span, StringInterner, SymbolId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Visibility of a symbol within a namespace.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Visibility {
    /// Exported; may be referenced as `NS:NAME`.
    External,
    /// Present but not exported; requires `NS::NAME`.
    Internal,
}

/// Result of looking up an identifier by name in a namespace.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolLookup {
    External(SymbolId),
    Internal(SymbolId),
    NotFound,
}

/// Errors raised by namespace bookkeeping.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("no namespace named `{designator}`")]
    UnknownNamespace { designator: String },
    #[error("name `{name}` is already used by namespace `{owner}`")]
    NameInUse { name: String, owner: String },
}

impl HostError {
    /// Convert to a diagnostic anchored at `span`.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let code = match self {
            HostError::UnknownNamespace { .. } => ErrorCode::E0004,
            HostError::NameInUse { .. } => ErrorCode::E0005,
        };
        Diagnostic::error(code)
            .with_message(self.to_string())
            .with_label(span, "while reading this form")
    }
}

/// The namespace capability consumed by the alias reader.
pub trait NamespaceHost {
    /// Resolve a designator (handle, name, or nickname) to a namespace.
    fn find_namespace(&self, designator: &Designator) -> Option<NamespaceId>;

    /// Look up an identifier by its (already case-folded) name.
    fn find_symbol(&self, namespace: NamespaceId, name: &str) -> SymbolLookup;

    /// Primary name of a namespace, for messages.
    fn namespace_name(&self, namespace: NamespaceId) -> &str;
}

/// Renaming capability used by the nickname bridge.
pub trait NamespaceRenaming: NamespaceHost {
    /// Current nicknames of a namespace.
    fn nicknames(&self, namespace: NamespaceId) -> Vec<String>;

    /// Replace a namespace's primary name and nicknames.
    ///
    /// Fails without changing anything if any of the new names belongs to
    /// a different namespace.
    fn rename_namespace(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        nicknames: &[String],
    ) -> Result<(), HostError>;
}

struct NamespaceData {
    name: Name,
    nicknames: Vec<Name>,
    /// Every symbol interned in this namespace.
    symbols: FxHashMap<Name, SymbolId>,
    exports: FxHashSet<SymbolId>,
}

struct SymbolData {
    name: Name,
    home: NamespaceId,
}

/// Arena of namespaces and symbols.
pub struct NamespaceTable {
    interner: StringInterner,
    namespaces: Vec<NamespaceData>,
    /// Primary names and nicknames → namespace.
    names: FxHashMap<Name, NamespaceId>,
    symbols: Vec<SymbolData>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        NamespaceTable {
            interner: StringInterner::new(),
            namespaces: Vec::new(),
            names: FxHashMap::default(),
            symbols: Vec::new(),
        }
    }

    /// Create a namespace with a unique name.
    pub fn create_namespace(&mut self, name: &str) -> Result<NamespaceId, HostError> {
        let interned = self.interner.intern(name);
        if let Some(&owner) = self.names.get(&interned) {
            return Err(HostError::NameInUse {
                name: name.to_owned(),
                owner: self.namespace_name(owner).to_owned(),
            });
        }
        let raw = u32::try_from(self.namespaces.len()).unwrap_or(u32::MAX);
        let id = NamespaceId::from_raw(raw);
        self.namespaces.push(NamespaceData {
            name: interned,
            nicknames: Vec::new(),
            symbols: FxHashMap::default(),
            exports: FxHashSet::default(),
        });
        self.names.insert(interned, id);
        debug!(namespace = name, ?id, "created namespace");
        Ok(id)
    }

    /// Find or create the symbol `name` in `namespace`.
    ///
    /// A newly created symbol is internal to its home namespace.
    pub fn intern_symbol(&mut self, namespace: NamespaceId, name: &str) -> SymbolId {
        let interned = self.interner.intern(name);
        if let Some(&sym) = self.namespaces[namespace.index()].symbols.get(&interned) {
            return sym;
        }
        let raw = u32::try_from(self.symbols.len()).unwrap_or(u32::MAX);
        let sym = SymbolId::from_raw(raw);
        self.symbols.push(SymbolData {
            name: interned,
            home: namespace,
        });
        self.namespaces[namespace.index()]
            .symbols
            .insert(interned, sym);
        sym
    }

    /// Find or create `name` in `namespace` and export it.
    pub fn export(&mut self, namespace: NamespaceId, name: &str) -> SymbolId {
        let sym = self.intern_symbol(namespace, name);
        self.namespaces[namespace.index()].exports.insert(sym);
        sym
    }

    /// Name of a symbol.
    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        self.interner.lookup(self.symbols[symbol.index()].name)
    }

    /// Namespace that created a symbol.
    pub fn symbol_home(&self, symbol: SymbolId) -> NamespaceId {
        self.symbols[symbol.index()].home
    }

    /// Visibility of `symbol` in its home namespace.
    pub fn symbol_visibility(&self, symbol: SymbolId) -> Visibility {
        let home = &self.namespaces[self.symbol_home(symbol).index()];
        if home.exports.contains(&symbol) {
            Visibility::External
        } else {
            Visibility::Internal
        }
    }

    /// Like [`NamespaceHost::find_namespace`], but failing with a host error.
    pub fn require_namespace(&self, designator: &Designator) -> Result<NamespaceId, HostError> {
        self.find_namespace(designator)
            .ok_or_else(|| HostError::UnknownNamespace {
                designator: designator.to_string(),
            })
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceHost for NamespaceTable {
    fn find_namespace(&self, designator: &Designator) -> Option<NamespaceId> {
        match designator {
            Designator::Handle(id) => (id.index() < self.namespaces.len()).then_some(*id),
            Designator::Name(name) => {
                let interned = self.interner.get(name)?;
                self.names.get(&interned).copied()
            }
        }
    }

    fn find_symbol(&self, namespace: NamespaceId, name: &str) -> SymbolLookup {
        let Some(interned) = self.interner.get(name) else {
            return SymbolLookup::NotFound;
        };
        let data = &self.namespaces[namespace.index()];
        match data.symbols.get(&interned) {
            Some(&sym) if data.exports.contains(&sym) => SymbolLookup::External(sym),
            Some(&sym) => SymbolLookup::Internal(sym),
            None => SymbolLookup::NotFound,
        }
    }

    fn namespace_name(&self, namespace: NamespaceId) -> &str {
        self.interner.lookup(self.namespaces[namespace.index()].name)
    }
}

impl NamespaceRenaming for NamespaceTable {
    fn nicknames(&self, namespace: NamespaceId) -> Vec<String> {
        self.namespaces[namespace.index()]
            .nicknames
            .iter()
            .map(|&n| self.interner.lookup(n).to_owned())
            .collect()
    }

    fn rename_namespace(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        nicknames: &[String],
    ) -> Result<(), HostError> {
        let new_name = self.interner.intern(name);
        let new_nicknames: Vec<Name> = nicknames.iter().map(|n| self.interner.intern(n)).collect();

        for (&interned, text) in std::iter::once((&new_name, name))
            .chain(new_nicknames.iter().zip(nicknames.iter().map(String::as_str)))
        {
            if let Some(&owner) = self.names.get(&interned) {
                if owner != namespace {
                    return Err(HostError::NameInUse {
                        name: text.to_owned(),
                        owner: self.namespace_name(owner).to_owned(),
                    });
                }
            }
        }

        let data = &mut self.namespaces[namespace.index()];
        for old in std::iter::once(data.name).chain(data.nicknames.drain(..)) {
            self.names.remove(&old);
        }
        data.name = new_name;
        data.nicknames.clone_from(&new_nicknames);
        for interned in std::iter::once(new_name).chain(new_nicknames) {
            self.names.insert(interned, namespace);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
