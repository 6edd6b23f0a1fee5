//! Folds used when typing function conversion: prime types, quantifiers,
//! atomization and the node-shape projection.
//!
//! All of these expect named references to be unfolded by the caller; a
//! named reference still present is taken to be a recursive occurrence.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::TypeError;
use crate::linear_form::content_of;
use crate::schema::{SchemaRegistry, any_attribute, any_element, any_simple_type};
use crate::simplify::right_deep;
use crate::subtyping::is_subtype;
use crate::types::{Kind, Prim, Type};

/// Leaf alternatives of `t` with all quantifiers stripped.
pub fn prime(t: &Type) -> Type {
    match t {
        Type::None | Type::Empty => Type::None,
        Type::Seq(l, r) | Type::Choice(l, r) | Type::All(l, r) => {
            right_deep(Kind::Choice, &Type::choice(prime(l), prime(r)))
        }
        Type::Opt(c) | Type::Star(c) | Type::Plus(c) => prime(c),
        Type::Named(..) => Type::None,
        _ => t.clone(),
    }
}

/// Occurrence indicator lattice `0 < 1, ? < + , *`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantifier {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "?")]
    Opt,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "*")]
    Star,
}

use Quantifier::{One, Opt, Plus, Star, Zero};

const SUM: [[Quantifier; 5]; 5] = [
    [Zero, One, Opt, Plus, Star],
    [One, Plus, Plus, Plus, Plus],
    [Opt, Plus, Star, Plus, Star],
    [Plus, Plus, Plus, Plus, Plus],
    [Star, Plus, Star, Plus, Star],
];

const CHOICE: [[Quantifier; 5]; 5] = [
    [Zero, Opt, Opt, Star, Star],
    [Opt, One, Opt, Plus, Star],
    [Opt, Opt, Opt, Star, Star],
    [Star, Plus, Star, Plus, Star],
    [Star, Star, Star, Star, Star],
];

const PRODUCT: [[Quantifier; 5]; 5] = [
    [Zero, Zero, Zero, Zero, Zero],
    [Zero, One, Opt, Plus, Star],
    [Zero, Opt, Opt, Star, Star],
    [Zero, Plus, Star, Plus, Star],
    [Zero, Star, Star, Star, Star],
];

impl Quantifier {
    fn index(self) -> usize {
        match self {
            Zero => 0,
            One => 1,
            Opt => 2,
            Plus => 3,
            Star => 4,
        }
    }

    /// Quantifier of `t1, t2` given the quantifiers of both operands.
    pub fn sum(self, other: Quantifier) -> Quantifier {
        SUM[self.index()][other.index()]
    }

    /// Quantifier of `t1 | t2`.
    pub fn choice(self, other: Quantifier) -> Quantifier {
        CHOICE[self.index()][other.index()]
    }

    /// Quantifier of a quantified type.
    pub fn product(self, other: Quantifier) -> Quantifier {
        PRODUCT[self.index()][other.index()]
    }

    /// `t . q`
    pub fn apply(self, t: Type) -> Type {
        match self {
            Zero => Type::Empty,
            One => t,
            Opt => Type::opt(t),
            Plus => Type::plus(t),
            Star => Type::star(t),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Zero => "0",
            One => "1",
            Opt => "?",
            Plus => "+",
            Star => "*",
        };
        f.write_str(s)
    }
}

pub fn quantifier(t: &Type) -> Quantifier {
    match t {
        Type::None | Type::Empty => Zero,
        Type::Seq(l, r) | Type::All(l, r) => quantifier(l).sum(quantifier(r)),
        Type::Choice(l, r) => quantifier(l).choice(quantifier(r)),
        Type::Opt(c) => quantifier(c).product(Opt),
        Type::Star(c) => quantifier(c).product(Star),
        Type::Plus(c) => quantifier(c).product(Plus),
        _ => One,
    }
}

/// Type of `fn:data` applied to a value of type `t`.
pub fn data_on(schema: &SchemaRegistry, t: &Type) -> Result<Type, TypeError> {
    match t {
        Type::Attr(..) => typed_content(schema, t),
        _ => data_on_nested(schema, t),
    }
}

fn typed_content(schema: &SchemaRegistry, t: &Type) -> Result<Type, TypeError> {
    let typed = data_on(schema, &content_of(t))?;
    if is_subtype(schema, &typed, &any_simple_type())? {
        Ok(typed)
    } else {
        Ok(Type::untyped_atomic())
    }
}

fn data_on_nested(schema: &SchemaRegistry, t: &Type) -> Result<Type, TypeError> {
    let result = match t {
        Type::None => Type::None,
        Type::Empty => Type::Empty,
        Type::Seq(l, r) | Type::Choice(l, r) | Type::All(l, r) => right_deep(
            Kind::Choice,
            &Type::choice(data_on(schema, l)?, data_on(schema, r)?),
        ),
        Type::Opt(c) | Type::Star(c) => Type::opt(data_on(schema, c)?),
        Type::Plus(c) => data_on(schema, c)?,
        Type::Named(..) => Type::None,
        _ => {
            let comment_or_pi = Type::choice(Type::Prim(Prim::Comment), Type::pi(None));
            if is_subtype(schema, t, &Type::atomic())? {
                t.clone()
            } else if is_subtype(schema, t, &comment_or_pi)? {
                Type::string()
            } else if is_subtype(schema, t, &any_element())? {
                typed_content(schema, t)?
            } else if is_subtype(schema, t, &any_attribute())? {
                // attributes inside element content carry no typed value
                Type::None
            } else {
                Type::untyped_atomic()
            }
        }
    };
    Ok(result)
}

/// Replaces atomic leaves by `text`, keeping node leaves and mapping
/// anything else to `node`.
pub fn is2ns(schema: &SchemaRegistry, t: &Type) -> Result<Type, TypeError> {
    let result = match t {
        Type::Seq(l, r) => right_deep(
            Kind::Seq,
            &Type::seq(is2ns(schema, l)?, is2ns(schema, r)?),
        ),
        Type::Choice(l, r) | Type::All(l, r) => right_deep(
            Kind::Choice,
            &Type::choice(is2ns(schema, l)?, is2ns(schema, r)?),
        ),
        Type::Opt(c) => Type::opt(is2ns(schema, c)?),
        Type::Star(c) => Type::star(is2ns(schema, c)?),
        Type::Plus(c) => Type::plus(is2ns(schema, c)?),
        Type::Named(..) => Type::None,
        _ => {
            if is_subtype(schema, t, &Type::atomic())? {
                Type::text()
            } else if is_subtype(schema, t, &Type::node())? {
                t.clone()
            } else {
                Type::node()
            }
        }
    };
    Ok(result)
}
