use std::sync::Arc;

use super::*;
use crate::{MacroBinding, MacroHandler, ReadCase, SymbolLookup};
use pretty_assertions::assert_eq;

fn host() -> (NamespaceTable, NamespaceId) {
    let mut table = NamespaceTable::new();
    let user = table.create_namespace("USER").unwrap();
    (table, user)
}

fn read_all_displayed(source: &str, table: ReadTable) -> Result<Vec<String>, ReadError> {
    let (mut host, user) = host();
    let data = Reader::new(&mut host, source, table, user).read_all()?;
    Ok(data.iter().map(|d| d.display(&host).to_string()).collect())
}

// === Plain tokens ===

#[test]
fn symbols_are_folded_and_interned() {
    let (mut host, user) = host();
    let datum = Reader::new(&mut host, "  foo-Bar ", ReadTable::standard(), user)
        .read()
        .unwrap()
        .unwrap();

    let sym = datum.as_symbol().unwrap();
    assert_eq!(host.symbol_name(sym), "FOO-BAR");
    assert_eq!(host.find_symbol(user, "FOO-BAR"), SymbolLookup::Internal(sym));
}

#[test]
fn preserve_case_keeps_token() {
    let shown = read_all_displayed("Foo", ReadTable::standard().with_case(ReadCase::Preserve));
    assert_eq!(shown.unwrap(), vec!["USER::Foo"]);
}

#[test]
fn bound_characters_terminate_tokens() {
    let shown = read_all_displayed("a(b)c", ReadTable::standard()).unwrap();
    assert_eq!(shown, vec!["USER::A", "(USER::B)", "USER::C"]);
}

// === Standard handlers ===

#[test]
fn lists_strings_quotes_and_comments() {
    let source = "(a \"s \\\" t\" 'b) ; trailing comment\n'(c ; inner\n)";
    let shown = read_all_displayed(source, ReadTable::standard()).unwrap();
    assert_eq!(
        shown,
        vec![r#"(USER::A "s \" t" 'USER::B)"#, "'(USER::C)"]
    );
}

#[test]
fn empty_input_reads_nothing() {
    let shown = read_all_displayed("  ; only a comment", ReadTable::standard()).unwrap();
    assert!(shown.is_empty());
}

#[test]
fn unterminated_list() {
    let err = read_all_displayed("(a b", ReadTable::standard()).unwrap_err();
    assert!(matches!(err, ReadError::UnterminatedList { span } if span == Span::new(0, 4)));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0002);
}

#[test]
fn unterminated_string() {
    let err = read_all_displayed("\"abc", ReadTable::standard()).unwrap_err();
    assert!(matches!(err, ReadError::UnterminatedString { .. }));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0001);
}

#[test]
fn unmatched_close() {
    let err = read_all_displayed("a )", ReadTable::standard()).unwrap_err();
    assert_eq!(err.span(), Span::new(2, 3));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0003);
    assert!(err.handler_failure().is_none());
}

#[test]
fn quote_at_end_of_input() {
    let err = read_all_displayed("'", ReadTable::standard()).unwrap_err();
    assert!(matches!(err, ReadError::UnexpectedEof { .. }));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0007);
}

// === Table manipulation ===

struct Bang;

impl MacroHandler for Bang {
    fn read(
        &self,
        _reader: &mut Reader<'_, '_>,
        _trigger: char,
        _start: u32,
    ) -> Result<Option<Datum>, ReadError> {
        Ok(Some(Datum::Str("bang".to_owned())))
    }
}

#[test]
fn custom_handler_and_removal() {
    let mut table = ReadTable::standard();
    assert!(table.set_handler('!', Arc::new(Bang)).is_none());
    assert_eq!(
        read_all_displayed("x!y", table.clone()).unwrap(),
        vec!["USER::X", "\"bang\"", "USER::Y"]
    );

    assert!(table.remove_handler('!').is_some());
    assert_eq!(read_all_displayed("x!y", table).unwrap(), vec!["USER::X!Y"]);
}

/// Reads the following form through `read_form`, like a user reader macro.
struct Enclose;

impl MacroHandler for Enclose {
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

#[test]
fn read_form_skips_leading_whitespace() {
    let (mut host, user) = host();
    let mut table = ReadTable::standard();
    table.set_handler('#', Arc::new(Enclose));
    let data = Reader::new(&mut host, "#  a # ", table, user).read_all().unwrap();

    let shown: Vec<String> = data.iter().map(|d| d.display(&host).to_string()).collect();
    assert_eq!(shown, vec!["(USER::A)", "()"]);
    assert_eq!(host.find_symbol(user, ""), SymbolLookup::NotFound);
}

#[test]
fn with_table_restores_previous_table() {
    let (mut host, user) = host();
    let mut reader = Reader::new(&mut host, "!a !b", ReadTable::standard(), user);

    let mut bang = ReadTable::standard();
    bang.set_handler('!', Arc::new(Bang));
    let first = reader.with_table(bang, |r| r.read()).unwrap().unwrap();
    assert_eq!(first, Datum::Str("bang".to_owned()));
    assert!(!reader.table().is_bound('!'));

    let next = reader.read().unwrap().unwrap();
    assert_eq!(next.display(reader.host()).to_string(), "USER::A");
}

#[test]
fn external_symbols_display_with_single_colon() {
    let (mut host, user) = host();
    let sym = host.export(user, "PUBLIC");
    assert_eq!(Datum::Symbol(sym).display(&host).to_string(), "USER:PUBLIC");
}

#[test]
fn read_table_debug_lists_bound_chars() {
    let shown = format!("{:?}", ReadTable::standard());
    assert_eq!(shown, r#"ReadTable { case: Upcase, bound: ['"', '\'', '(', ')', ';'] }"#);
}

#[test]
fn non_terminating_binding_is_constituent_inside_tokens() {
    let mut table = ReadTable::standard();
    table.bind('!', MacroBinding::non_terminating(Arc::new(Bang)));
    assert!(!table.is_terminating('!'));
    assert_eq!(
        read_all_displayed("x!y !z", table).unwrap(),
        vec!["USER::X!Y", "\"bang\"", "USER::Z"]
    );
}
