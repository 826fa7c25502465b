//! Exposing aliases as namespace nicknames for the length of a call.
//!
//! Interactive tools that do not go through the reader still want to
//! understand `$alias:name`. While a [`NicknameScope`] is alive, every
//! alias of a namespace is an extra nickname (trigger + alias) of the
//! namespace it designates. Dropping the scope restores the original names
//! in reverse order of application, so a namespace renamed twice ends up
//! exactly as it started.

use std::ops::{Deref, DerefMut};

use nick_host::NamespaceRenaming;
use nick_ir::NamespaceId;
use tracing::{debug, warn};

use crate::registry::AliasStore;

/// Aliases applied as nicknames; restored on drop.
///
/// Derefs to the host so the body can keep using it.
pub struct NicknameScope<'h, H: NamespaceRenaming + ?Sized> {
    host: &'h mut H,
    /// `(namespace, name, nicknames)` as they were before each rename.
    saved: Vec<(NamespaceId, String, Vec<String>)>,
}

impl<'h, H: NamespaceRenaming + ?Sized> NicknameScope<'h, H> {
    /// Add `trigger` + alias as a nickname of each aliased namespace, in
    /// alias order.
    ///
    /// Aliases whose designator names no namespace are skipped. If a rename
    /// fails, everything applied so far is restored and the scope is left
    /// empty.
    pub fn apply<S: AliasStore + ?Sized>(
        host: &'h mut H,
        store: &S,
        namespace: NamespaceId,
        trigger: char,
    ) -> Self {
        let mut scope = NicknameScope {
            host,
            saved: Vec::new(),
        };
        let Some(table) = store.table(namespace) else {
            return scope;
        };
        for (alias, designator) in table.sorted() {
            let Some(target) = scope.host.find_namespace(designator) else {
                warn!(alias, %designator, "alias names no namespace; not exposed as a nickname");
                continue;
            };
            let name = scope.host.namespace_name(target).to_owned();
            let nicknames = scope.host.nicknames(target);
            let mut extended = nicknames.clone();
            extended.push(format!("{trigger}{alias}"));
            if let Err(err) = scope.host.rename_namespace(target, &name, &extended) {
                warn!(%err, alias, namespace = %name, "could not expose alias as a nickname");
                scope.restore();
                break;
            }
            debug!(alias, namespace = %name, "alias exposed as a nickname");
            scope.saved.push((target, name, nicknames));
        }
        scope
    }

    /// Number of renames currently applied.
    pub fn applied(&self) -> usize {
        self.saved.len()
    }

    fn restore(&mut self) {
        while let Some((namespace, name, nicknames)) = self.saved.pop() {
            if let Err(err) = self.host.rename_namespace(namespace, &name, &nicknames) {
                warn!(%err, namespace = %name, "could not restore namespace names");
            }
        }
    }
}

impl<H: NamespaceRenaming + ?Sized> Deref for NicknameScope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        &*self.host
    }
}

impl<H: NamespaceRenaming + ?Sized> DerefMut for NicknameScope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut *self.host
    }
}

impl<H: NamespaceRenaming + ?Sized> Drop for NicknameScope<'_, H> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Run `body` with the aliases of `namespace` exposed as nicknames.
///
/// Names are restored when `body` returns or unwinds.
pub fn with_aliases_as_nicknames<H, S, R>(
    host: &mut H,
    store: &S,
    namespace: NamespaceId,
    trigger: char,
    body: impl FnOnce(&mut H) -> R,
) -> R
where
    H: NamespaceRenaming + ?Sized,
    S: AliasStore + ?Sized,
{
    let mut scope = NicknameScope::apply(host, store, namespace, trigger);
    body(&mut *scope)
}

/// Switch for wrapping interactive evaluation in
/// [`with_aliases_as_nicknames`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NicknameHook {
    trigger: char,
    installed: bool,
}

impl NicknameHook {
    /// An uninstalled hook for `trigger`.
    pub fn new(trigger: char) -> Self {
        NicknameHook {
            trigger,
            installed: false,
        }
    }

    pub fn install(&mut self) {
        self.installed = true;
    }

    pub fn uninstall(&mut self) {
        self.installed = false;
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Run `body`, wrapped in the nickname bridge when installed.
    pub fn around<H, S, R>(
        &self,
        host: &mut H,
        store: &S,
        namespace: NamespaceId,
        body: impl FnOnce(&mut H) -> R,
    ) -> R
    where
        H: NamespaceRenaming + ?Sized,
        S: AliasStore + ?Sized,
    {
        if self.installed {
            with_aliases_as_nicknames(host, store, namespace, self.trigger, body)
        } else {
            body(host)
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
