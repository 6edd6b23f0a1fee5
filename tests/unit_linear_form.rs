mod support;

use support::{predefined, registry_with, ty};
use xqtype::linear_form::{
    Derivative, Monomial, content_of, leading_names, linear_form, name_eq, nullable, odot,
    partial_derivative, partial_derivative_of_inequality,
};
use xqtype::trivial::Table;
use xqtype::{QName, Type};

fn mono(head: Type, rest: Type) -> Monomial {
    Monomial { head, rest }
}

#[test]
fn nullability() {
    let schema = predefined();
    for (src, expected) in [
        ("integer*", true),
        ("integer?+", true),
        ("integer?, string", false),
        ("integer | ()", true),
        ("integer? & string*", true),
        ("integer & string?", false),
        ("xs:anyType", true),
        ("integer", false),
        ("element a { () }", false),
        ("()", true),
        ("none", false),
    ] {
        assert_eq!(nullable(&schema, &ty(src)).unwrap(), expected, "{src}");
    }
}

#[test]
fn linear_forms_of_basic_shapes() {
    let schema = predefined();
    assert_eq!(
        linear_form(&schema, &ty("integer, string")).unwrap(),
        vec![mono(Type::integer(), Type::string())]
    );
    assert_eq!(
        linear_form(&schema, &ty("integer*")).unwrap(),
        vec![mono(Type::integer(), Type::star(Type::integer()))]
    );
    assert_eq!(
        linear_form(&schema, &ty("integer+")).unwrap(),
        vec![mono(Type::integer(), Type::star(Type::integer()))]
    );
    assert_eq!(
        linear_form(&schema, &ty("integer?, string")).unwrap(),
        vec![
            mono(Type::integer(), Type::string()),
            mono(Type::string(), Type::Empty),
        ]
    );
    assert!(linear_form(&schema, &Type::Empty).unwrap().is_empty());
    assert!(linear_form(&schema, &Type::None).unwrap().is_empty());
}

#[test]
fn linear_form_deduplicates_monomials() {
    let schema = predefined();
    assert_eq!(
        linear_form(&schema, &ty("(integer, string) | integer?, string")).unwrap(),
        vec![
            mono(Type::integer(), Type::string()),
            mono(Type::string(), Type::Empty),
        ]
    );
}

#[test]
fn linear_form_unfolds_named_types_once() {
    let schema = registry_with(&[("list", "integer, (() | ex:list)")]);
    let lf = linear_form(&schema, &ty("ex:list")).unwrap();
    assert_eq!(lf, vec![mono(Type::integer(), ty("() | ex:list"))]);
}

#[test]
fn odot_extends_residuals() {
    let star = Type::star(Type::integer());
    let monomials = vec![
        mono(Type::integer(), Type::Empty),
        mono(Type::string(), Type::None),
        mono(Type::boolean(), Type::string()),
    ];
    assert_eq!(
        odot(monomials.clone(), &star),
        vec![
            mono(Type::integer(), star.clone()),
            mono(Type::string(), Type::None),
            mono(Type::boolean(), Type::seq(Type::string(), star.clone())),
        ]
    );
    assert_eq!(odot(monomials.clone(), &Type::Empty), monomials);
    assert!(odot(monomials, &Type::None).is_empty());
}

#[test]
fn content_of_symbols() {
    assert_eq!(content_of(&ty("element a { integer* }")), Type::star(Type::integer()));
    assert_eq!(content_of(&ty("document { node }")), Type::node());
    assert_eq!(content_of(&Type::item()), Type::star(Type::item()));
    assert_eq!(content_of(&Type::node()), Type::star(Type::item()));
    assert_eq!(content_of(&Type::integer()), Type::Empty);
    assert_eq!(content_of(&Type::pi(None)), Type::Empty);
}

#[test]
fn name_selection_by_table() {
    assert!(name_eq(Table::Hierarchy, &Type::integer(), &Type::numeric()));
    assert!(!name_eq(Table::Hierarchy, &Type::numeric(), &Type::integer()));
    assert!(name_eq(Table::Promotable, &Type::integer(), &Type::double()));
    assert!(!name_eq(Table::Hierarchy, &Type::integer(), &Type::double()));

    let a = ty("element a { () }");
    let b = ty("element b { () }");
    let any = ty("element * { () }");
    assert!(name_eq(Table::Hierarchy, &a, &any));
    assert!(!name_eq(Table::Hierarchy, &any, &a));
    assert!(name_eq(Table::Intersect, &any, &a));
    assert!(!name_eq(Table::Hierarchy, &a, &b));
    assert!(!name_eq(Table::Intersect, &a, &b));
    assert!(!name_eq(Table::Hierarchy, &a, &ty("attribute a { () }")));

    assert!(name_eq(Table::Hierarchy, &Type::pi(Some("x")), &Type::pi(None)));
    assert!(!name_eq(Table::Hierarchy, &Type::pi(Some("x")), &Type::pi(Some("y"))));
}

#[test]
fn leading_names_are_distinct() {
    let schema = predefined();
    assert_eq!(
        leading_names(&schema, &ty("integer | integer, string | string*")).unwrap(),
        vec![Type::integer(), Type::string()]
    );
}

#[test]
fn derivatives_select_matching_heads() {
    let schema = predefined();
    let symbol = Type::elem(QName::local("a"), Type::integer());
    let t = ty("element a { string }, integer | element b { integer }");
    assert_eq!(
        partial_derivative(&schema, Table::Hierarchy, &symbol, &t).unwrap(),
        vec![Derivative {
            content: Type::string(),
            rest: Type::integer(),
        }]
    );

    let t = ty("integer, string | decimal | double");
    assert_eq!(
        partial_derivative(&schema, Table::Hierarchy, &Type::integer(), &t).unwrap(),
        vec![
            Derivative {
                content: Type::Empty,
                rest: Type::string(),
            },
            Derivative {
                content: Type::Empty,
                rest: Type::Empty,
            },
        ]
    );
}

#[test]
fn inequality_derivative_pairs_each_left_entry_with_all_right_entries() {
    let schema = predefined();
    let entries = partial_derivative_of_inequality(
        &schema,
        Table::Hierarchy,
        Table::Hierarchy,
        &Type::integer(),
        &ty("integer, string | integer, boolean"),
        &ty("numeric, (string | boolean) | decimal*"),
    )
    .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].lhs.rest, Type::string());
    assert_eq!(entries[1].lhs.rest, Type::boolean());
    for entry in &entries {
        assert_eq!(entry.rhs.len(), 2);
        assert_eq!(entry.rhs[0].rest, ty("string | boolean"));
        assert_eq!(entry.rhs[1].rest, Type::star(Type::decimal()));
    }

    let none = partial_derivative_of_inequality(
        &schema,
        Table::Hierarchy,
        Table::Hierarchy,
        &Type::integer(),
        &Type::integer(),
        &Type::string(),
    )
    .unwrap();
    assert_eq!(none.len(), 1);
    assert!(none[0].rhs.is_empty());
}
