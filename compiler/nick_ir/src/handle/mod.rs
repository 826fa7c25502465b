//! Namespace and symbol handles.
//!
//! Handles are small integer indices issued by the host's namespace arena.
//! They are `Copy`, hashable and compared by value, so alias tables can key
//! on them without caring how the host stores the underlying objects.

use std::fmt;

/// Handle to a namespace owned by the host environment.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NamespaceId(u32);

impl NamespaceId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NamespaceId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index of this namespace.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.0)
    }
}

/// Handle to a symbol (an identifier owned by some namespace).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index of this symbol.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Something that designates a namespace.
///
/// Either a concrete handle, or a name (or nickname) looked up lazily each
/// time the designator is resolved, so an alias may be registered before
/// its target namespace exists.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Designator {
    Handle(NamespaceId),
    Name(String),
}

impl From<NamespaceId> for Designator {
    fn from(id: NamespaceId) -> Self {
        Designator::Handle(id)
    }
}

impl From<&str> for Designator {
    fn from(name: &str) -> Self {
        Designator::Name(name.to_owned())
    }
}

impl From<String> for Designator {
    fn from(name: String) -> Self {
        Designator::Name(name)
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Designator::Handle(id) => write!(f, "#<namespace {}>", id.raw()),
            Designator::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
