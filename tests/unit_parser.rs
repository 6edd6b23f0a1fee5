mod support;

use support::{ex, namespaces, ty};
use xqtype::{NameTest, Namespaces, QName, SymbolSpace, Type, parse_type};

fn parse_err(src: &str) -> Vec<xqtype::Diagnostic> {
    parse_type(src, &namespaces()).unwrap_err()
}

#[test]
fn operator_precedence() {
    assert_eq!(
        ty("integer, (string | boolean)"),
        Type::seq(Type::integer(), Type::choice(Type::string(), Type::boolean()))
    );
    assert_eq!(
        ty("integer | string, boolean"),
        Type::choice(Type::integer(), Type::seq(Type::string(), Type::boolean()))
    );
    assert_eq!(
        ty("integer | string & boolean"),
        Type::all(Type::choice(Type::integer(), Type::string()), Type::boolean())
    );
    assert_eq!(
        ty("(integer, string)*"),
        Type::star(Type::seq(Type::integer(), Type::string()))
    );
    assert_eq!(ty("integer??"), Type::opt(Type::opt(Type::integer())));
}

#[test]
fn chains_associate_to_the_right() {
    assert_eq!(
        ty("integer, string, boolean"),
        Type::seq(
            Type::integer(),
            Type::seq(Type::string(), Type::boolean())
        )
    );
}

#[test]
fn node_types() {
    assert_eq!(
        ty("element a { integer* }"),
        Type::elem(QName::local("a"), Type::star(Type::integer()))
    );
    assert_eq!(ty("element { () }"), Type::elem(NameTest::Wildcard, Type::Empty));
    assert_eq!(ty("element * {}"), Type::elem(NameTest::Wildcard, Type::Empty));
    assert_eq!(
        ty("attribute ex:id { string }"),
        Type::attr(ex("id"), Type::string())
    );
    assert_eq!(ty("document { node* }"), Type::doc(Type::star(Type::node())));
    assert_eq!(ty("processing-instruction * {}"), Type::pi(None));
    assert_eq!(ty("processing-instruction target {}"), Type::pi(Some("target")));
}

#[test]
fn named_references() {
    assert_eq!(ty("xs:integer"), Type::named(QName::xs("integer")));
    assert_eq!(ty("ex:list"), Type::named(ex("list")));
    assert_eq!(ty("local"), Type::named(QName::local("local")));
    assert_eq!(
        ty("element(ex:a)"),
        Type::named_in(SymbolSpace::Element, ex("a"))
    );
    assert_eq!(
        ty("attribute-group(ex:common)"),
        Type::named_in(SymbolSpace::AttributeGroup, ex("common"))
    );
    assert_eq!(ty("none"), Type::None);
}

#[test]
fn prefixes_resolve_through_bindings() {
    let mut ns = Namespaces::default();
    ns.bind("other", "urn:example");
    assert_eq!(
        parse_type("other:list", &ns).unwrap(),
        Type::named(ex("list"))
    );
}

#[test]
fn display_output_parses_back() {
    for src in [
        "integer, (string | boolean)*",
        "element ex:a { attribute id { string }?, text* } | ()",
        "document { element { item* } }",
        "integer & string? & element(ex:a)",
        "processing-instruction * {}, comment",
    ] {
        let t = ty(src);
        assert_eq!(ty(&t.to_string()), t, "{src}");
    }
}

#[test]
fn errors_carry_positions() {
    let diags = parse_err("integer,\n  $");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, "E-PARSE");
    let span = diags[0].span.as_ref().unwrap();
    assert_eq!((span.line, span.column), (2, 3));
}

#[test]
fn malformed_input_is_rejected() {
    for src in ["integer &", "(integer", "element a { integer", "integer )", "", "| string"] {
        let diags = parse_err(src);
        assert!(!diags.is_empty(), "{src}");
        assert!(diags.iter().all(|d| d.code == "E-PARSE"), "{src}");
    }
}

#[test]
fn unbound_prefix_is_rejected() {
    let diags = parse_err("foo:bar");
    assert!(diags[0].message.contains("unbound namespace prefix"));
    let diags = parse_err("a:b:c");
    assert!(diags[0].message.contains("malformed qualified name"));
}
