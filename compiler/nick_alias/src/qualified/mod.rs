//! `ALIAS:NAME` / `ALIAS::NAME` parsing and resolution.

use nick_host::{NamespaceHost, SymbolLookup};
use nick_ir::{NamespaceId, SymbolId};
use tracing::trace;

use crate::registry::AliasStore;
use crate::resolve::resolve_alias;
use crate::{AliasErrorKind, AliasedReferenceError};

/// Which identifiers a reference may name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RefVisibility {
    /// `ALIAS:NAME`: the identifier must be external.
    PublicOnly,
    /// `ALIAS::NAME`: any identifier present in the namespace.
    Any,
}

/// A syntactically valid aliased reference, borrowed from its token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QualifiedRef<'t> {
    pub alias: &'t str,
    pub visibility: RefVisibility,
    pub name: &'t str,
}

impl<'t> QualifiedRef<'t> {
    /// Split at the first colon.
    ///
    /// Only the first one or two colons are separators: in `a:b:c` the name
    /// is `b:c`. `a::` is well formed and has an empty name.
    pub fn parse(token: &'t str) -> Result<Self, AliasErrorKind> {
        let colon = token
            .find(':')
            .filter(|&at| at + 1 < token.len())
            .ok_or(AliasErrorKind::MalformedReference)?;
        let alias = &token[..colon];
        let rest = &token[colon + 1..];
        let (visibility, name) = match rest.strip_prefix(':') {
            Some(name) => (RefVisibility::Any, name),
            None => (RefVisibility::PublicOnly, rest),
        };
        Ok(QualifiedRef {
            alias,
            visibility,
            name,
        })
    }

    /// Resolve against the aliases of `namespace`.
    pub fn resolve<H, S>(
        &self,
        host: &H,
        store: &S,
        namespace: NamespaceId,
    ) -> Result<SymbolId, AliasErrorKind>
    where
        H: NamespaceHost + ?Sized,
        S: AliasStore + ?Sized,
    {
        let target = resolve_alias(store, host, namespace, self.alias)?;
        let lookup = host.find_symbol(target, self.name);
        trace!(alias = self.alias, name = self.name, ?lookup, "aliased reference looked up");
        match (lookup, self.visibility) {
            (SymbolLookup::External(sym), _) | (SymbolLookup::Internal(sym), RefVisibility::Any) => {
                Ok(sym)
            }
            (SymbolLookup::Internal(_), RefVisibility::PublicOnly) => {
                Err(AliasErrorKind::NotExternal {
                    target: host.namespace_name(target).to_owned(),
                    name: self.name.to_owned(),
                })
            }
            (SymbolLookup::NotFound, _) => Err(AliasErrorKind::UnresolvedIdentifier {
                target: host.namespace_name(target).to_owned(),
                name: self.name.to_owned(),
            }),
        }
    }
}

/// Parse an already case-folded token and resolve it in `namespace`.
pub fn resolve_reference<H, S>(
    host: &H,
    store: &S,
    namespace: NamespaceId,
    token: &str,
) -> Result<SymbolId, AliasedReferenceError>
where
    H: NamespaceHost + ?Sized,
    S: AliasStore + ?Sized,
{
    QualifiedRef::parse(token)
        .and_then(|reference| reference.resolve(host, store, namespace))
        .map_err(|kind| {
            AliasedReferenceError::new(kind, token, host.namespace_name(namespace))
        })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
