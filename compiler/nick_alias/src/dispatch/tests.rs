use super::*;
use crate::{register_aliases, AliasErrorKind, AliasRegistry};
use nick_host::{NamespaceTable, ReadCase};
use nick_ir::{Span, SymbolId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct World {
    host: NamespaceTable,
    registry: Arc<AliasRegistry>,
    user: NamespaceId,
    plain: NamespaceId,
    bar: SymbolId,
}

/// `USER` aliases `FOO` to `LIB` (exporting `BAR`, with internal `HIDDEN`);
/// `PLAIN` has no aliases.
fn world() -> World {
    let mut host = NamespaceTable::new();
    let user = host.create_namespace("USER").unwrap();
    let plain = host.create_namespace("PLAIN").unwrap();
    let lib = host.create_namespace("LIB").unwrap();
    let bar = host.export(lib, "BAR");
    host.intern_symbol(lib, "HIDDEN");
    let registry = AliasRegistry::shared();
    register_aliases(&*registry, user, [("LIB", "foo")], ReadCase::Upcase).unwrap();
    World {
        host,
        registry,
        user,
        plain,
        bar,
    }
}

fn installed(registry: &Arc<AliasRegistry>) -> ReadTable {
    let mut table = ReadTable::standard();
    install_sentinel(&mut table, '$', None, Arc::clone(registry) as Arc<dyn AliasStore>);
    table
}

fn read_in(
    w: &mut World,
    namespace: NamespaceId,
    table: ReadTable,
    source: &str,
) -> Result<Vec<String>, ReadError> {
    let data = Reader::new(&mut w.host, source, table, namespace).read_all()?;
    Ok(data.iter().map(|d| d.display(&w.host).to_string()).collect())
}

/// Wraps the next form in a list; stands in for a user reader macro.
struct Wrap;

impl MacroHandler for Wrap {
    fn read(
        &self,
        reader: &mut Reader<'_, '_>,
        _trigger: char,
        _start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        let inner = reader.read_form()?;
        Ok(Some(Datum::List(inner.into_iter().collect())))
    }
}

// === Handler selection ===

#[test]
fn selection_follows_registry() {
    let w = world();
    assert_eq!(select_handler(&*w.registry, w.user), HandlerKind::Aliasing);
    assert_eq!(select_handler(&*w.registry, w.plain), HandlerKind::Delegating);

    register_aliases(&*w.registry, w.user, Vec::<(&str, &str)>::new(), ReadCase::Upcase).unwrap();
    assert_eq!(select_handler(&*w.registry, w.user), HandlerKind::Delegating);
}

// === Aliasing mode ===

#[test]
fn aliased_reference_reads_target_symbol() {
    let mut w = world();
    let table = installed(&w.registry);
    let datum = Reader::new(&mut w.host, "$foo:bar", table, w.user)
        .read()
        .unwrap()
        .unwrap();
    assert_eq!(datum, Datum::Symbol(w.bar));
}

#[test]
fn aliased_references_inside_lists() {
    let mut w = world();
    let table = installed(&w.registry);
    let user = w.user;
    let shown = read_in(&mut w, user, table, "($foo:bar x $foo::hidden)").unwrap();
    assert_eq!(shown, vec!["(LIB:BAR USER::X LIB::HIDDEN)"]);
}

#[test]
fn sentinel_inside_token_is_a_constituent() {
    let mut w = world();
    let table = installed(&w.registry);
    let user = w.user;
    assert_eq!(read_in(&mut w, user, table, "a$b").unwrap(), vec!["USER::A$B"]);
}

#[test]
fn aliasing_error_aborts_read() {
    let mut w = world();
    let table = installed(&w.registry);
    let user = w.user;
    let err = read_in(&mut w, user, table, "$foo:hidden rest").unwrap_err();

    let ReadError::Handler { trigger, span, .. } = &err else {
        panic!("expected a handler error, got {err:?}");
    };
    assert_eq!(*trigger, '$');
    assert_eq!(*span, Span::new(0, 11));

    let failure = err
        .handler_failure()
        .and_then(|e| e.downcast_ref::<AliasedReferenceError>())
        .unwrap();
    assert_eq!(failure.token, "FOO:HIDDEN");
    assert_eq!(failure.namespace, "USER");
    assert!(matches!(failure.kind, AliasErrorKind::NotExternal { .. }));
    assert_eq!(err.to_diagnostic().code, failure.code());
}

#[test]
fn bare_sentinel_is_malformed() {
    let mut w = world();
    let table = installed(&w.registry);
    let user = w.user;
    let err = read_in(&mut w, user, table, "($)").unwrap_err();
    let failure = err
        .handler_failure()
        .and_then(|e| e.downcast_ref::<AliasedReferenceError>())
        .unwrap();
    assert_eq!(failure.kind, AliasErrorKind::MalformedReference);
    assert_eq!(failure.token, "");
}

#[test]
fn invert_case_is_rejected_when_aliasing() {
    let mut w = world();
    let table = installed(&w.registry).with_case(ReadCase::Invert);
    let user = w.user;
    let err = read_in(&mut w, user, table, "$foo:bar").unwrap_err();
    let failure = err
        .handler_failure()
        .and_then(|e| e.downcast_ref::<AliasedReferenceError>())
        .unwrap();
    assert_eq!(
        failure.kind,
        AliasErrorKind::UnsupportedCaseMode {
            mode: ReadCase::Invert
        }
    );
    assert_eq!(failure.token, "foo:bar");
}

// === Delegation mode ===

#[test]
fn delegation_reads_sentinel_as_constituent() {
    let mut w = world();
    let table = installed(&w.registry);
    let plain = w.plain;
    let shown = read_in(&mut w, plain, table, "$foo:bar ($x)").unwrap();
    assert_eq!(shown, vec!["PLAIN::$FOO:BAR", "(PLAIN::$X)"]);
}

#[test]
fn delegation_uses_fallback_binding() {
    let mut w = world();
    let mut table = ReadTable::standard();
    table.set_handler('$', Arc::new(Wrap));
    install_sentinel(&mut table, '$', None, Arc::clone(&w.registry) as Arc<dyn AliasStore>);
    let plain = w.plain;
    let shown = read_in(&mut w, plain, table.clone(), "$a $$b").unwrap();
    assert_eq!(shown, vec!["(PLAIN::A)", "((PLAIN::B))"]);

    // The terminating flag follows the fallback binding.
    assert!(table.is_terminating('$'));
    let user = w.user;
    assert_eq!(read_in(&mut w, user, table, "$foo:bar").unwrap(), vec!["LIB:BAR"]);
}

#[test]
fn explicit_fallback_overrides_snapshot() {
    let mut w = world();
    let mut fallback = ReadTable::standard();
    fallback.set_handler('$', Arc::new(Wrap));
    let mut table = ReadTable::standard();
    install_sentinel(
        &mut table,
        '$',
        Some(fallback),
        Arc::clone(&w.registry) as Arc<dyn AliasStore>,
    );
    let plain = w.plain;
    assert_eq!(read_in(&mut w, plain, table, "$a").unwrap(), vec!["(PLAIN::A)"]);
}

#[test]
fn delegation_table_is_scoped_to_one_form() {
    let mut w = world();
    let table = installed(&w.registry);
    let plain = w.plain;
    let mut reader = Reader::new(&mut w.host, "$a b", table, plain);
    reader.read().unwrap();
    assert!(reader.table().handler('$').is_some());
}

#[test]
fn registering_aliases_switches_mode_immediately() {
    let mut w = world();
    let table = installed(&w.registry);
    let plain = w.plain;
    let mut reader = Reader::new(&mut w.host, "$foo:bar $foo:bar", table, plain);

    let first = reader.read().unwrap().unwrap();
    assert_eq!(first.display(reader.host()).to_string(), "PLAIN::$FOO:BAR");

    register_aliases(&*w.registry, plain, [("LIB", "foo")], ReadCase::Upcase).unwrap();
    let second = reader.read().unwrap().unwrap();
    assert_eq!(second, Datum::Symbol(w.bar));
}

#[test]
fn install_with_config() {
    let mut w = world();
    let mut table = ReadTable::standard();
    let config = ReaderConfig::new()
        .with_trigger('@')
        .with_case(ReadCase::Preserve);
    install_sentinel_with(&mut table, &config, Arc::clone(&w.registry) as Arc<dyn AliasStore>);
    assert_eq!(table.case(), ReadCase::Preserve);
    assert!(table.handler('$').is_none());

    // Aliases were registered upcased, so a preserved lowercase alias misses.
    let user = w.user;
    let err = read_in(&mut w, user, table.clone(), "@foo:BAR").unwrap_err();
    assert!(err.handler_failure().is_some());
    assert_eq!(read_in(&mut w, user, table, "@FOO:BAR").unwrap(), vec!["LIB:BAR"]);
}

// === Delegation reproduces the fallback ===

type Outcome = Result<Vec<String>, (String, Span)>;

fn read_plain(source: &str, table: ReadTable) -> Outcome {
    let mut host = NamespaceTable::new();
    let plain = host.create_namespace("PLAIN").unwrap();
    match Reader::new(&mut host, source, table, plain).read_all() {
        Ok(data) => Ok(data.iter().map(|d| d.display(&host).to_string()).collect()),
        Err(err) => Err((err.to_string(), err.span())),
    }
}

fn installed_over(fallback: &ReadTable) -> ReadTable {
    let mut table = fallback.clone();
    install_sentinel(&mut table, '$', None, AliasRegistry::shared());
    table
}

proptest! {
    #[test]
    fn delegation_matches_unbound_fallback(source in "[a-c$:() '\";\n]{0,24}") {
        let fallback = ReadTable::standard();
        prop_assert_eq!(read_plain(&source, installed_over(&fallback)), read_plain(&source, fallback));
    }

    #[test]
    fn delegation_matches_bound_fallback(source in "[a-c$:() '\"]{0,24}") {
        let mut fallback = ReadTable::standard();
        fallback.set_handler('$', Arc::new(Wrap));
        prop_assert_eq!(read_plain(&source, installed_over(&fallback)), read_plain(&source, fallback));
    }
}
