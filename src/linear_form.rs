//! Antimirov linear forms and partial derivatives over structural types.

use crate::diagnostics::TypeError;
use crate::qname::QName;
use crate::schema::SchemaRegistry;
use crate::simplify::simplify;
use crate::trivial::{self, Table, Trivial};
use crate::types::{Prim, SymbolSpace, Type};

/// A leading symbol and the residual type left after consuming it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Monomial {
    pub head: Type,
    pub rest: Type,
}

/// The content of a consumed symbol and the residual after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Derivative {
    pub content: Type,
    pub rest: Type,
}

/// One left-hand derivative paired with every right-hand derivative for the
/// same symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InequalityDerivative {
    pub lhs: Derivative,
    pub rhs: Vec<Derivative>,
}

/// Does `t` match the empty sequence?
pub fn nullable(schema: &SchemaRegistry, t: &Type) -> Result<bool, TypeError> {
    Ok(nullable_unfolded(&schema.defn(t)?))
}

fn nullable_unfolded(t: &Type) -> bool {
    match t {
        Type::Plus(c) => nullable_unfolded(c),
        Type::Seq(l, r) => nullable_unfolded(l) && nullable_unfolded(r),
        Type::Choice(l, r) => nullable_unfolded(l) || nullable_unfolded(r),
        Type::All(..) => nullable_unfolded(&simplify(t)),
        Type::Empty | Type::Opt(_) | Type::Star(_) => true,
        _ => false,
    }
}

pub fn linear_form(schema: &SchemaRegistry, t: &Type) -> Result<Vec<Monomial>, TypeError> {
    let mut unfolding = Vec::new();
    let monomials = lf(schema, &simplify(t), &mut unfolding)?;
    let mut unique: Vec<Monomial> = Vec::with_capacity(monomials.len());
    for m in monomials {
        if !unique.contains(&m) {
            unique.push(m);
        }
    }
    Ok(unique)
}

fn lf(
    schema: &SchemaRegistry,
    t: &Type,
    unfolding: &mut Vec<(SymbolSpace, QName)>,
) -> Result<Vec<Monomial>, TypeError> {
    let monomials = match t {
        Type::None | Type::Empty => Vec::new(),
        Type::Named(space, name) => {
            if unfolding.iter().any(|(s, n)| s == space && n == name) {
                return Ok(Vec::new());
            }
            let definition =
                schema
                    .lookup(*space, name)
                    .ok_or_else(|| TypeError::UnknownSchemaType {
                        space: *space,
                        name: name.clone(),
                    })?;
            unfolding.push((*space, name.clone()));
            let result = lf(schema, &simplify(definition), unfolding);
            unfolding.pop();
            result?
        }
        // t? = t | ()
        Type::Opt(c) => lf(schema, &Type::choice((**c).clone(), Type::Empty), unfolding)?,
        Type::Star(c) => odot(lf(schema, c, unfolding)?, t),
        // t+ = t, t*
        Type::Plus(c) => lf(
            schema,
            &Type::seq((**c).clone(), Type::star((**c).clone())),
            unfolding,
        )?,
        Type::Seq(l, r) => {
            let mut out = odot(lf(schema, l, unfolding)?, r);
            if nullable(schema, l)? {
                out.extend(lf(schema, r, unfolding)?);
            }
            out
        }
        Type::Choice(l, r) => {
            let mut out = lf(schema, l, unfolding)?;
            out.extend(lf(schema, r, unfolding)?);
            out
        }
        Type::All(..) => {
            return Err(TypeError::InternalInvariantViolation(format!(
                "interleave group in linear form of {t}"
            )));
        }
        Type::Prim(_) | Type::Elem(..) | Type::Attr(..) | Type::Doc(_) | Type::Pi(_) => {
            vec![Monomial {
                head: t.clone(),
                rest: Type::Empty,
            }]
        }
    };
    Ok(monomials)
}

/// Extended concatenation of a linear form with a type.
pub fn odot(monomials: Vec<Monomial>, t: &Type) -> Vec<Monomial> {
    match t {
        Type::Empty => monomials,
        Type::None => Vec::new(),
        _ => monomials
            .into_iter()
            .map(|Monomial { head, rest }| {
                let rest = match rest {
                    Type::None => Type::None,
                    Type::Empty => t.clone(),
                    p => Type::seq(p, t.clone()),
                };
                Monomial { head, rest }
            })
            .collect(),
    }
}

/// Content a symbol opens up: node children, or `item*` for `item`/`node`.
pub fn content_of(t: &Type) -> Type {
    match t {
        Type::Elem(_, c) | Type::Attr(_, c) | Type::Doc(c) => (**c).clone(),
        Type::Prim(Prim::Item | Prim::Node) => Type::star(Type::item()),
        _ => Type::Empty,
    }
}

/// Whether `symbol` selects monomials headed by `head` under `table`.
pub fn name_eq(table: Table, symbol: &Type, head: &Type) -> bool {
    if trivial::lookup(table, symbol.kind(), head.kind()) == Trivial::Yes {
        return true;
    }
    if symbol.kind() != head.kind() {
        return false;
    }
    match (symbol, head) {
        (Type::Elem(a, _), Type::Elem(b, _)) | (Type::Attr(a, _), Type::Attr(b, _)) => {
            match table {
                Table::Intersect => a.is_wildcard() || b.is_wildcard() || a == b,
                _ => b.is_wildcard() || a == b,
            }
        }
        (Type::Pi(a), Type::Pi(b)) => match table {
            Table::Intersect => a.is_none() || b.is_none() || a == b,
            _ => b.is_none() || a == b,
        },
        (Type::Named(..), Type::Named(..)) => symbol == head,
        _ => true,
    }
}

/// Distinct leading symbols of `t`.
pub fn leading_names(schema: &SchemaRegistry, t: &Type) -> Result<Vec<Type>, TypeError> {
    let mut names: Vec<Type> = Vec::new();
    for Monomial { head, .. } in linear_form(schema, t)? {
        if !names.contains(&head) {
            names.push(head);
        }
    }
    Ok(names)
}

/// Derivatives of `t` by `symbol`, selecting heads through `table`.
pub fn partial_derivative(
    schema: &SchemaRegistry,
    table: Table,
    symbol: &Type,
    t: &Type,
) -> Result<Vec<Derivative>, TypeError> {
    let mut out: Vec<Derivative> = Vec::new();
    for Monomial { head, rest } in linear_form(schema, t)? {
        if rest == Type::None || !name_eq(table, symbol, &head) {
            continue;
        }
        let derivative = Derivative {
            content: content_of(&head),
            rest,
        };
        if !out.contains(&derivative) {
            out.push(derivative);
        }
    }
    Ok(out)
}

/// Derivatives of the inequality `lhs ⊑ rhs` by `symbol`: one entry per
/// left-hand derivative, each carrying the full right-hand set.
pub fn partial_derivative_of_inequality(
    schema: &SchemaRegistry,
    lhs_table: Table,
    rhs_table: Table,
    symbol: &Type,
    lhs: &Type,
    rhs: &Type,
) -> Result<Vec<InequalityDerivative>, TypeError> {
    let rhs_derivatives = partial_derivative(schema, rhs_table, symbol, rhs)?;
    let lhs_derivatives = partial_derivative(schema, lhs_table, symbol, lhs)?;
    Ok(lhs_derivatives
        .into_iter()
        .map(|lhs| InequalityDerivative {
            lhs,
            rhs: rhs_derivatives.clone(),
        })
        .collect())
}
