use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn read(source: &str, case: ReadCase) -> (Result<String, AliasErrorKind>, Option<char>) {
    let mut stream = CharStream::new(source);
    let token = read_token(&mut stream, case);
    (token, stream.peek())
}

#[test]
fn stops_at_whitespace_without_consuming_it() {
    assert_eq!(read("foo:bar baz", ReadCase::Preserve), (Ok("foo:bar".to_owned()), Some(' ')));
    assert_eq!(read("a:b\tc", ReadCase::Preserve), (Ok("a:b".to_owned()), Some('\t')));
    assert_eq!(read("a:b\x0cc", ReadCase::Preserve), (Ok("a:b".to_owned()), Some('\x0c')));
}

#[test]
fn stops_at_syntactic_terminators() {
    for terminator in ['"', '\'', '(', ')', ',', ';', '`'] {
        let source = format!("a::b{terminator}rest");
        assert_eq!(
            read(&source, ReadCase::Preserve),
            (Ok("a::b".to_owned()), Some(terminator)),
            "terminator {terminator:?}"
        );
    }
}

#[test]
fn reads_to_end_of_input() {
    assert_eq!(read("pkg:sym", ReadCase::Preserve), (Ok("pkg:sym".to_owned()), None));
}

#[test]
fn empty_token() {
    assert_eq!(read(")", ReadCase::Upcase), (Ok(String::new()), Some(')')));
    assert_eq!(read("", ReadCase::Upcase), (Ok(String::new()), None));
}

#[test]
fn colons_and_sentinels_are_constituents() {
    assert_eq!(read("a:b:$c d", ReadCase::Preserve).0, Ok("a:b:$c".to_owned()));
}

#[test]
fn case_policies() {
    assert_eq!(read("foo:Bar", ReadCase::Upcase).0, Ok("FOO:BAR".to_owned()));
    assert_eq!(read("FOO:Bar", ReadCase::Downcase).0, Ok("foo:bar".to_owned()));
    assert_eq!(read("Foo:Bar", ReadCase::Preserve).0, Ok("Foo:Bar".to_owned()));
}

#[test]
fn invert_is_rejected() {
    assert_eq!(
        read("foo:bar", ReadCase::Invert).0,
        Err(AliasErrorKind::UnsupportedCaseMode {
            mode: ReadCase::Invert
        })
    );
}

#[test]
fn raw_token_span_covers_text() {
    let mut stream = CharStream::new("xy:zw)");
    stream.next_char();
    let token = RawToken::read(&mut stream);
    assert_eq!(token.text, "y:zw");
    assert_eq!(token.span, Span::new(1, 5));
}

#[test]
fn terminator_set() {
    assert!(is_terminator(' '));
    assert!(is_terminator('`'));
    assert!(!is_terminator(':'));
    assert!(!is_terminator('$'));
    assert!(!is_terminator('|'));
}

proptest! {
    #[test]
    fn token_never_contains_a_terminator(source in "\\PC{0,24}") {
        let mut stream = CharStream::new(&source);
        let token = RawToken::read(&mut stream);
        prop_assert!(!token.text.chars().any(is_terminator));
        prop_assert!(source.starts_with(&token.text));
        if let Some(next) = stream.peek() {
            prop_assert!(is_terminator(next));
        }
    }

    #[test]
    fn upcase_fold_is_idempotent(token in "[a-zA-Z0-9:-]{0,16}") {
        let once = fold_case(&token, ReadCase::Upcase).unwrap();
        prop_assert_eq!(fold_case(&once, ReadCase::Upcase).unwrap(), once);
    }
}
