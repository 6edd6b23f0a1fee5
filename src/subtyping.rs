use crate::diagnostics::TypeError;
use crate::linear_form::{
    InequalityDerivative, leading_names, nullable, partial_derivative_of_inequality,
};
use crate::schema::SchemaRegistry;
use crate::simplify::simplify;
use crate::trivial::{self, Table, Trivial};
use crate::types::Type;

const MAX_SPLIT_DERIVATIVES: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    Subtype,
    Equality,
    Promotable,
    Disjoint,
}

impl Judgment {
    fn fast_path(self) -> Table {
        match self {
            Judgment::Subtype => Table::Hierarchy,
            Judgment::Equality => Table::Equality,
            Judgment::Promotable => Table::Promotable,
            Judgment::Disjoint => Table::Intersect,
        }
    }

    /// Tables selecting left and right monomials for a leading symbol.
    fn symbol_tables(self) -> (Table, Table) {
        match self {
            Judgment::Subtype | Judgment::Equality => (Table::Hierarchy, Table::Hierarchy),
            Judgment::Promotable => (Table::Promotable, Table::Promotable),
            Judgment::Disjoint => (Table::Hierarchy, Table::Intersect),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Judgment::Disjoint => "||",
            Judgment::Equality => "=",
            Judgment::Promotable => "<:p",
            Judgment::Subtype => "<:",
        }
    }
}

pub fn is_subtype(schema: &SchemaRegistry, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
    Prover::new(schema, Judgment::Subtype).decide(t1, t2)
}

/// Mutual containment, each direction with its own assumption set.
pub fn is_equal(schema: &SchemaRegistry, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
    Ok(Prover::new(schema, Judgment::Equality).decide(t1, t2)?
        && Prover::new(schema, Judgment::Equality).decide(t2, t1)?)
}

pub fn is_promotable(schema: &SchemaRegistry, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
    Prover::new(schema, Judgment::Promotable).decide(t1, t2)
}

pub fn is_disjoint(schema: &SchemaRegistry, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
    Prover::new(schema, Judgment::Disjoint).decide(t1, t2)
}

/// One top-level proof search and its coinductive assumptions.
struct Prover<'a> {
    schema: &'a SchemaRegistry,
    judgment: Judgment,
    assumptions: Vec<(Type, Type)>,
}

impl<'a> Prover<'a> {
    fn new(schema: &'a SchemaRegistry, judgment: Judgment) -> Self {
        Self {
            schema,
            judgment,
            assumptions: Vec::new(),
        }
    }

    fn decide(&mut self, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
        let disjoint = self.judgment == Judgment::Disjoint;
        let t1 = self.schema.unfold_head(t1)?;
        let t2 = self.schema.unfold_head(t2)?;
        let op = self.judgment.symbol();

        match trivial::lookup(self.judgment.fast_path(), t1.kind(), t2.kind()) {
            Trivial::No => {
                tracing::debug!("trivial: {t1} {op} {t2} fails");
                return Ok(disjoint);
            }
            Trivial::Yes => {
                tracing::debug!("trivial: {t1} {op} {t2} holds");
                return Ok(!disjoint);
            }
            Trivial::Undecided => {}
        }

        if t1 == t2 {
            tracing::debug!("structurally equal: {t1}");
            return Ok(!disjoint);
        }

        let n1 = nullable(self.schema, &t1)?;
        let n2 = nullable(self.schema, &t2)?;
        if disjoint && n1 && n2 {
            tracing::debug!("both nullable: {t1} {op} {t2} fails");
            return Ok(false);
        }
        if !disjoint && n1 && !n2 {
            tracing::debug!("nullability contradiction: {t1} {op} {t2}");
            return Ok(false);
        }

        if self.assumptions.iter().any(|(a, b)| *a == t1 && *b == t2) {
            tracing::debug!("assumption: {t1} {op} {t2}");
            return Ok(true);
        }

        let mark = self.assumptions.len();
        self.assumptions.push((t1.clone(), t2.clone()));
        let proved = self.derive(&t1, &t2)?;
        if !proved {
            // Facts derived under a refuted assumption are not sound.
            self.assumptions.truncate(mark);
        }
        tracing::debug!("{t1} {op} {t2}: {proved}");
        Ok(proved)
    }

    fn derive(&mut self, t1: &Type, t2: &Type) -> Result<bool, TypeError> {
        let (lhs_table, rhs_table) = self.judgment.symbol_tables();
        for symbol in leading_names(self.schema, t1)? {
            let entries = partial_derivative_of_inequality(
                self.schema,
                lhs_table,
                rhs_table,
                &symbol,
                t1,
                t2,
            )?;
            tracing::debug!(
                "derivative by {symbol}: {} left-hand entries",
                entries.len()
            );
            for entry in &entries {
                let holds = if entry.rhs.is_empty() {
                    self.judgment == Judgment::Disjoint
                } else {
                    self.set_theory(entry)?
                };
                if !holds {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Decides one left-hand derivative against the union of all right-hand
    /// derivatives by splitting the right-hand set into every subset `S`:
    /// contents of `S` against the left content, residuals outside `S`
    /// against the left residual.
    fn set_theory(&mut self, entry: &InequalityDerivative) -> Result<bool, TypeError> {
        let n = entry.rhs.len();
        if n > MAX_SPLIT_DERIVATIVES {
            return Err(TypeError::InternalInvariantViolation(format!(
                "{n} right-hand derivatives exceed the subset encoding"
            )));
        }
        let disjoint = self.judgment == Judgment::Disjoint;

        for subset in 0..(1u64 << n) {
            let mut contents = Type::None;
            let mut rests = Type::None;
            for (i, d) in entry.rhs.iter().enumerate() {
                if subset & (1u64 << i) != 0 {
                    contents = Type::choice(contents, d.content.clone());
                } else {
                    rests = Type::choice(rests, d.rest.clone());
                }
            }
            let contents = simplify(&contents);
            let rests = simplify(&rests);

            if disjoint {
                // Some split must separate both components.
                if self.decide(&entry.lhs.content, &contents)?
                    && self.decide(&entry.lhs.rest, &rests)?
                {
                    return Ok(true);
                }
            } else if !(self.decide(&entry.lhs.content, &contents)?
                || self.decide(&entry.lhs.rest, &rests)?)
            {
                return Ok(false);
            }
        }
        Ok(!disjoint)
    }
}
