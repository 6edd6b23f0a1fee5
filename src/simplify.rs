use crate::types::{Kind, Type};

const INTERLEAVE_WARN_OPERANDS: usize = 6;

/// Rewrites `t` to its reduced form, applying the local rewrite rules until a
/// pass leaves the type unchanged. Named references are not unfolded.
pub fn simplify(t: &Type) -> Type {
    let mut current = t.clone();
    loop {
        let next = rewrite(&current);
        if next == current {
            debug_assert!(!matches!(next, Type::All(..)));
            return next;
        }
        tracing::trace!(from = %current, to = %next, "simplify pass");
        current = next;
    }
}

fn rewrite(t: &Type) -> Type {
    match t {
        Type::Opt(c) => match simplify(c) {
            // t*? = t*, t?? = t?
            s @ (Type::Star(_) | Type::Opt(_)) => s,
            s => Type::opt(s),
        },
        Type::Plus(c) => match simplify(c) {
            Type::Empty => Type::Empty,
            s @ Type::Plus(_) => s,
            s => Type::plus(s),
        },
        Type::Star(c) => match simplify(c) {
            Type::Empty | Type::None => Type::Empty,
            s @ Type::Star(_) => s,
            Type::Opt(inner) => Type::Star(inner),
            s => Type::star(s),
        },
        Type::Seq(l, r) => match (simplify(l), simplify(r)) {
            (Type::None, _) | (_, Type::None) => Type::None,
            (Type::Empty, s) | (s, Type::Empty) => s,
            (l, r) => Type::seq(l, r),
        },
        Type::Choice(l, r) => match (simplify(l), simplify(r)) {
            (Type::None, s) | (s, Type::None) => s,
            (l, r) => {
                let mut alternatives: Vec<Type> = Vec::new();
                for alt in operands(Kind::Choice, &Type::choice(l, r)) {
                    let alt = simplify(&alt);
                    if alt != Type::None && !alternatives.contains(&alt) {
                        alternatives.push(alt);
                    }
                }
                Type::choice_of(alternatives)
            }
        },
        Type::All(..) => expand_interleave(t),
        Type::Elem(name, c) => Type::Elem(name.clone(), Box::new(simplify(c))),
        Type::Attr(name, c) => Type::Attr(name.clone(), Box::new(simplify(c))),
        Type::Doc(c) => Type::doc(simplify(c)),
        Type::None | Type::Empty | Type::Named(..) | Type::Prim(_) | Type::Pi(_) => t.clone(),
    }
}

/// `s1 & ... & sn` becomes the choice over all `n!` orderings as sequences.
fn expand_interleave(t: &Type) -> Type {
    let parts = operands(Kind::All, t);
    if parts.len() > INTERLEAVE_WARN_OPERANDS {
        tracing::warn!(
            operands = parts.len(),
            "expanding a large interleave group into all permutations"
        );
    }
    let mut alternatives = Type::None;
    for ordering in permutations(&parts) {
        alternatives = Type::choice(Type::seq_of(ordering), alternatives);
    }
    alternatives
}

fn permutations(items: &[Type]) -> Vec<Vec<Type>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for (i, head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

/// Operands of a chain of `kind` nodes (`,`, `|` or `&`) in left-to-right
/// order, however the chain is nested.
pub fn operands(kind: Kind, t: &Type) -> Vec<Type> {
    let mut out = Vec::new();
    collect_operands(kind, t, &mut out);
    out
}

fn collect_operands(kind: Kind, t: &Type, out: &mut Vec<Type>) {
    match t {
        Type::Seq(l, r) | Type::Choice(l, r) | Type::All(l, r) if t.kind() == kind => {
            collect_operands(kind, l, out);
            collect_operands(kind, r, out);
        }
        _ => out.push(t.clone()),
    }
}

/// Reassociates a chain of `kind` nodes so that every left operand is not
/// itself a `kind` node.
pub fn right_deep(kind: Kind, t: &Type) -> Type {
    if t.kind() != kind {
        return t.clone();
    }
    let parts = operands(kind, t);
    let rebuild = |l: Type, r: Type| match kind {
        Kind::Seq => Type::seq(l, r),
        Kind::Choice => Type::choice(l, r),
        _ => Type::all(l, r),
    };
    parts
        .into_iter()
        .rev()
        .reduce(|acc, part| rebuild(part, acc))
        .unwrap_or_else(|| t.clone())
}
