mod support;

use support::{ex, registry_with};
use xqtype::{SchemaRegistry, Type, check_regularity, is_regular};

fn regular(defs: &[(&str, &str)], name: &str) -> bool {
    let registry = registry_with(defs);
    is_regular(&registry, &Type::named(ex(name))).unwrap()
}

#[test]
fn tail_recursion_after_a_symbol_is_regular() {
    assert!(regular(&[("list", "integer, (() | ex:list)")], "list"));
    assert!(regular(&[("stream", "string, ex:stream?")], "stream"));
}

#[test]
fn unguarded_recursion_is_not_regular() {
    assert!(!regular(&[("b", "() | ex:b")], "b"));
    assert!(!regular(&[("b", "integer?, ex:b")], "b"));
}

#[test]
fn recursion_outside_tail_position_is_not_regular() {
    assert!(!regular(&[("r", "(ex:r, integer) | integer")], "r"));
    assert!(!regular(&[("s", "integer, ex:s*")], "s"));
    assert!(!regular(&[("p", "integer, (string, ex:p)+")], "p"));
}

#[test]
fn recursion_through_element_content_is_regular() {
    assert!(regular(&[("tree", "element node { ex:tree* }")], "tree"));
}

#[test]
fn mutual_tail_recursion_is_regular() {
    let defs = [("a", "integer, ex:b?"), ("b", "string, ex:a?")];
    assert!(regular(&defs, "a"));
    assert!(regular(&defs, "b"));
}

#[test]
fn unnamed_types_are_regular() {
    let registry = SchemaRegistry::new();
    assert!(is_regular(&registry, &Type::star(Type::integer())).unwrap());
}

#[test]
fn check_reports_every_offending_definition() {
    let registry = registry_with(&[
        ("list", "integer, (() | ex:list)"),
        ("b", "() | ex:b"),
        ("s", "integer, ex:s*"),
    ]);
    let diags = check_regularity(&registry).unwrap_err();
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.code == "E-REGULAR"));
    assert_eq!(diags[0].message, "illegal non-regular type ex:b = () | ex:b");
    assert_eq!(diags[1].message, "illegal non-regular type ex:s = integer, ex:s*");
}

#[test]
fn dangling_reference_is_a_schema_error() {
    let registry = registry_with(&[("a", "integer, ex:missing")]);
    let diags = check_regularity(&registry).unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, "E-SCHEMA");
}

#[test]
fn builtin_types_are_regular() {
    assert!(check_regularity(&SchemaRegistry::with_predefined()).is_ok());
}
