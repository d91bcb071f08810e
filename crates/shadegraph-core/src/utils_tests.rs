use crate::utils::{float_literal, to_identifier, unique_identifier};

#[test]
fn identifier_strips_non_letters() {
    assert_eq!(to_identifier("foo"), "foo");
    assert_eq!(to_identifier("Foo Bar"), "FooBar");
    assert_eq!(to_identifier("mesh.position"), "meshposition");
    assert_eq!(to_identifier("color #2"), "color");
    assert_eq!(to_identifier("__x__"), "__x__");
}

#[test]
fn identifier_may_be_empty() {
    assert_eq!(to_identifier("123"), "");
}

#[test]
fn unique_identifier_unused_base() {
    let taken: Vec<String> = Vec::new();
    assert_eq!(unique_identifier("foo", |n| taken.iter().any(|t| t == n)), "foo");
}

#[test]
fn unique_identifier_appends_suffix() {
    let taken = vec!["foo".to_string(), "foo1".to_string()];
    assert_eq!(unique_identifier("foo", |n| taken.iter().any(|t| t == n)), "foo2");
}

#[test]
fn unique_identifier_empty_base() {
    let taken = vec!["block".to_string()];
    assert_eq!(unique_identifier("", |n| taken.iter().any(|t| t == n)), "block1");
}

#[test]
fn float_literal_integral() {
    assert_eq!(float_literal(2.0), "2.0");
    assert_eq!(float_literal(0.0), "0.0");
    assert_eq!(float_literal(-3.0), "-3.0");
}

#[test]
fn float_literal_fractional_unchanged() {
    assert_eq!(float_literal(0.5), "0.5");
    assert_eq!(float_literal(-1.25), "-1.25");
}
