use super::*;
use crate::{AliasRegistry, AliasTable};
use nick_host::NamespaceTable;
use nick_ir::Designator;
use pretty_assertions::assert_eq;

struct Fixture {
    host: NamespaceTable,
    registry: AliasRegistry,
    n: NamespaceId,
    pkg_a: NamespaceId,
    pkg_b: NamespaceId,
    pkg_c: NamespaceId,
}

fn fixture() -> Fixture {
    let mut host = NamespaceTable::new();
    let n = host.create_namespace("N").unwrap();
    let pkg_a = host.create_namespace("PKG-A").unwrap();
    let pkg_b = host.create_namespace("PKG-B").unwrap();
    let pkg_c = host.create_namespace("PKG-C").unwrap();
    let registry = AliasRegistry::new();
    registry.replace_table(
        n,
        AliasTable::from_pairs([
            (Designator::Handle(pkg_a), "a"),
            (Designator::from("PKG-B"), "b"),
        ]),
    );
    Fixture {
        host,
        registry,
        n,
        pkg_a,
        pkg_b,
        pkg_c,
    }
}

#[test]
fn resolves_handles_and_names() {
    let f = fixture();
    assert_eq!(resolve_alias(&f.registry, &f.host, f.n, "a"), Ok(f.pkg_a));
    assert_eq!(resolve_alias(&f.registry, &f.host, f.n, "b"), Ok(f.pkg_b));
}

#[test]
fn unknown_alias_in_table() {
    let f = fixture();
    assert_eq!(
        resolve_alias(&f.registry, &f.host, f.n, "zzz"),
        Err(AliasErrorKind::UnknownAlias {
            alias: "zzz".to_owned(),
            designator: None,
        })
    );
}

#[test]
fn namespace_without_table() {
    let f = fixture();
    assert!(matches!(
        resolve_alias(&f.registry, &f.host, f.pkg_a, "a"),
        Err(AliasErrorKind::UnknownAlias { .. })
    ));
}

#[test]
fn designator_resolved_lazily() {
    let mut f = fixture();
    f.registry
        .replace_table(f.n, AliasTable::from_pairs([("LATER", "l")]));
    assert_eq!(
        resolve_alias(&f.registry, &f.host, f.n, "l"),
        Err(AliasErrorKind::UnknownAlias {
            alias: "l".to_owned(),
            designator: Some("LATER".to_owned()),
        })
    );

    let later = f.host.create_namespace("LATER").unwrap();
    assert_eq!(resolve_alias(&f.registry, &f.host, f.n, "l"), Ok(later));
}

#[test]
fn no_transitive_chasing() {
    let f = fixture();
    // PKG-A aliasing `a` to PKG-C does not affect what `a` means in N.
    f.registry
        .replace_table(f.pkg_a, AliasTable::from_pairs([(f.pkg_c, "a")]));
    assert_eq!(resolve_alias(&f.registry, &f.host, f.n, "a"), Ok(f.pkg_a));
}

#[test]
fn aliases_of_round_trip() {
    let f = fixture();
    let of_a = aliases_of(&f.registry, &f.host, f.pkg_a, f.n);
    assert_eq!(of_a.len(), 1);
    assert!(of_a.contains("a"));
    assert!(aliases_of(&f.registry, &f.host, f.pkg_c, f.n).is_empty());
    assert!(aliases_of(&f.registry, &f.host, f.pkg_a, f.pkg_b).is_empty());
}

#[test]
fn aliases_of_collects_every_alias_for_a_namespace() {
    let f = fixture();
    f.registry.replace_table(
        f.n,
        AliasTable::from_pairs([
            (Designator::Handle(f.pkg_a), "a"),
            (Designator::from("PKG-A"), "alpha"),
            (Designator::Handle(f.pkg_b), "b"),
        ]),
    );
    let mut of_a: Vec<_> = aliases_of(&f.registry, &f.host, f.pkg_a, f.n)
        .into_iter()
        .collect();
    of_a.sort();
    assert_eq!(of_a, vec!["a".to_owned(), "alpha".to_owned()]);
}
