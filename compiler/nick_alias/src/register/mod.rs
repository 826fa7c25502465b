//! Declaring a namespace's aliases.
//!
//! Both entry points replace the namespace's whole table.
//! [`register_aliases`] first folds every alias with the reader's case
//! policy, so that aliases match tokens read under that policy.

use nick_host::ReadCase;
use nick_ir::{Designator, NamespaceId};

use crate::registry::{AliasStore, AliasTable};
use crate::token::fold_case;
use crate::AliasErrorKind;

/// Replace the alias table of `namespace` with `(designator, alias)` pairs,
/// storing each alias exactly as given.
pub fn set_alias_table<S, I, D, A>(store: &S, namespace: NamespaceId, pairs: I)
where
    S: AliasStore + ?Sized,
    I: IntoIterator<Item = (D, A)>,
    D: Into<Designator>,
    A: Into<String>,
{
    store.replace_table(namespace, AliasTable::from_pairs(pairs));
}

/// Fold each alias with `case`, then replace the alias table of `namespace`.
///
/// Nothing is stored if folding fails.
pub fn register_aliases<S, I, D, A>(
    store: &S,
    namespace: NamespaceId,
    pairs: I,
    case: ReadCase,
) -> Result<(), AliasErrorKind>
where
    S: AliasStore + ?Sized,
    I: IntoIterator<Item = (D, A)>,
    D: Into<Designator>,
    A: AsRef<str>,
{
    let folded = pairs
        .into_iter()
        .map(|(designator, alias)| fold_case(alias.as_ref(), case).map(|alias| (designator, alias)))
        .collect::<Result<Vec<_>, AliasErrorKind>>()?;
    set_alias_table(store, namespace, folded);
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
