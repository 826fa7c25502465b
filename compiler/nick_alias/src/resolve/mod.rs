//! Alias → namespace resolution.

use nick_host::NamespaceHost;
use nick_ir::NamespaceId;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::registry::AliasStore;
use crate::AliasErrorKind;

/// Resolve `alias` in the alias table of `namespace`.
///
/// This is a single lookup: the stored designator is resolved through the
/// host exactly once, and the namespace it names is returned even if that
/// namespace has aliases of its own.
pub fn resolve_alias<S, H>(
    store: &S,
    host: &H,
    namespace: NamespaceId,
    alias: &str,
) -> Result<NamespaceId, AliasErrorKind>
where
    S: AliasStore + ?Sized,
    H: NamespaceHost + ?Sized,
{
    let unknown = |designator: Option<String>| AliasErrorKind::UnknownAlias {
        alias: alias.to_owned(),
        designator,
    };
    let table = store.table(namespace).ok_or_else(|| unknown(None))?;
    let designator = table.get(alias).ok_or_else(|| unknown(None))?;
    let target = host
        .find_namespace(designator)
        .ok_or_else(|| unknown(Some(designator.to_string())))?;
    trace!(alias, ?namespace, ?target, "alias resolved");
    Ok(target)
}

/// Aliases in `in_namespace`'s table whose designator resolves to `namespace`.
pub fn aliases_of<S, H>(
    store: &S,
    host: &H,
    namespace: NamespaceId,
    in_namespace: NamespaceId,
) -> FxHashSet<String>
where
    S: AliasStore + ?Sized,
    H: NamespaceHost + ?Sized,
{
    let Some(table) = store.table(in_namespace) else {
        return FxHashSet::default();
    };
    table
        .entries()
        .filter(|(_, designator)| host.find_namespace(designator) == Some(namespace))
        .map(|(alias, _)| alias.to_owned())
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
