use crate::diagnostics::{Diagnostic, TypeError};
use crate::linear_form::nullable;
use crate::schema::SchemaRegistry;
use crate::simplify::simplify;
use crate::types::{SymbolSpace, Type};

/// Checks that a named type only recurses in tail position and only after a
/// non-nullable prefix. Types other than named references are regular.
pub fn is_regular(schema: &SchemaRegistry, t: &Type) -> Result<bool, TypeError> {
    let Type::Named(..) = t else {
        return Ok(true);
    };
    let body = simplify(&schema.defn(t)?);
    Ok(rec_tail(t, true, &body) && non_null_head(schema, false, &body)?)
}

/// `tail_ok` is false below `*`, `+` and the left operand of `,`.
fn rec_tail(name: &Type, tail_ok: bool, t: &Type) -> bool {
    match t {
        Type::Named(..) => t != name || tail_ok,
        Type::Opt(c) => rec_tail(name, tail_ok, c),
        Type::Star(c) | Type::Plus(c) => rec_tail(name, false, c),
        Type::Seq(l, r) => rec_tail(name, false, l) && rec_tail(name, tail_ok, r),
        Type::Choice(l, r) => rec_tail(name, tail_ok, l) && rec_tail(name, tail_ok, r),
        _ => true,
    }
}

/// `guarded` becomes true once a non-nullable left operand of `,` has been
/// crossed; every remaining reference must be guarded.
fn non_null_head(schema: &SchemaRegistry, guarded: bool, t: &Type) -> Result<bool, TypeError> {
    let ok = match t {
        Type::Named(..) => guarded,
        Type::Opt(c) | Type::Star(c) | Type::Plus(c) => non_null_head(schema, guarded, c)?,
        Type::Seq(l, r) => {
            non_null_head(schema, guarded, l)?
                && non_null_head(schema, guarded || !nullable(schema, l)?, r)?
        }
        Type::Choice(l, r) => {
            non_null_head(schema, guarded, l)? && non_null_head(schema, guarded, r)?
        }
        _ => true,
    };
    Ok(ok)
}

/// Runs [`is_regular`] over every definition of every symbol space.
pub fn check_regularity(schema: &SchemaRegistry) -> Result<(), Vec<Diagnostic>> {
    let mut errors = Vec::new();
    for space in SymbolSpace::ALL {
        for (name, definition) in schema.definitions(space) {
            let named = Type::named_in(space, name.clone());
            match is_regular(schema, &named) {
                Ok(true) => {}
                Ok(false) => errors.push(Diagnostic::from(TypeError::NonRegularType {
                    name: name.clone(),
                    definition: definition.to_string(),
                })),
                Err(err) => errors.push(Diagnostic::from(err)),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
