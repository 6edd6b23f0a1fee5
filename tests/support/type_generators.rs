use proptest::prelude::*;
use xqtype::{QName, Type};

/// Pairwise unrelated leaves.
pub fn leaf() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::integer()),
        Just(Type::string()),
        Just(Type::boolean()),
        Just(Type::Empty),
    ]
}

fn type_tree(depth: u32, size: u32) -> impl Strategy<Value = Type> {
    leaf().prop_recursive(depth, size, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::opt),
            inner.clone().prop_map(Type::star),
            inner.clone().prop_map(Type::plus),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Type::seq(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Type::choice(l, r)),
            inner
                .clone()
                .prop_map(|c| Type::elem(QName::local("a"), c)),
            inner.prop_map(|c| Type::elem(QName::local("b"), c)),
        ]
    })
}

/// Regular types over unrelated leaves and the elements `a` and `b`.
pub fn regular_type() -> impl Strategy<Value = Type> {
    type_tree(3, 12)
}

/// An interleave group of two or three small operands.
pub fn interleaved_type() -> impl Strategy<Value = Type> {
    (
        type_tree(1, 3),
        type_tree(1, 3),
        prop::option::of(type_tree(1, 3)),
    )
        .prop_map(|(a, b, c)| match c {
            Some(c) => Type::all(a, Type::all(b, c)),
            None => Type::all(a, b),
        })
}
