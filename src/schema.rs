use std::collections::BTreeMap;

use crate::diagnostics::TypeError;
use crate::qname::{NameTest, QName};
use crate::simplify::simplify;
use crate::types::{Prim, SymbolSpace, Type};

/// Named type definitions, one table per symbol space.
///
/// Built during schema import and read-only afterwards: every judgment takes
/// `&SchemaRegistry`, so no registration can interleave with a proof search.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    spaces: [BTreeMap<QName, Type>; 5],
}

fn slot(space: SymbolSpace) -> usize {
    match space {
        SymbolSpace::Type => 0,
        SymbolSpace::Element => 1,
        SymbolSpace::Attribute => 2,
        SymbolSpace::Group => 3,
        SymbolSpace::AttributeGroup => 4,
    }
}

pub fn predefined_types() -> Vec<(QName, Type)> {
    vec![
        (QName::xs("integer"), Type::integer()),
        (QName::xs("string"), Type::string()),
        (QName::xs("boolean"), Type::boolean()),
        (QName::xs("decimal"), Type::decimal()),
        (QName::xs("double"), Type::double()),
        (QName::xs("QName"), Type::Prim(Prim::QName)),
        (QName::xs("anyType"), Type::star(Type::item())),
        (QName::xs("anyItem"), Type::item()),
        (QName::xs("anyNode"), Type::node()),
        (QName::xs("anySimpleType"), any_simple_type()),
        (QName::xs("anyElement"), any_element()),
        (QName::xs("anyAttribute"), any_attribute()),
        (QName::xs("anyAtomicType"), Type::atomic()),
        (QName::xs("date"), Type::Prim(Prim::Date)),
        (QName::xs("time"), Type::Prim(Prim::Time)),
        (QName::xs("dateTime"), Type::Prim(Prim::DateTime)),
        (QName::xs("gYear"), Type::Prim(Prim::GYear)),
        (QName::xs("gYearMonth"), Type::Prim(Prim::GYearMonth)),
        (QName::xs("gMonth"), Type::Prim(Prim::GMonth)),
        (QName::xs("gMonthDay"), Type::Prim(Prim::GMonthDay)),
        (QName::xs("gDay"), Type::Prim(Prim::GDay)),
        (QName::xs("duration"), Type::Prim(Prim::Duration)),
        (QName::xdt("yearMonthDuration"), Type::Prim(Prim::YearMonthDuration)),
        (QName::xdt("dayTimeDuration"), Type::Prim(Prim::DayTimeDuration)),
        (QName::xdt("untypedAtomic"), Type::untyped_atomic()),
        (QName::xdt("untypedAny"), Type::Prim(Prim::UntypedAny)),
    ]
}

/// `xs:anySimpleType = atomic*`
pub fn any_simple_type() -> Type {
    Type::star(Type::atomic())
}

/// `xs:anyElement = element { item* }`
pub fn any_element() -> Type {
    Type::elem(NameTest::Wildcard, Type::star(Type::item()))
}

/// `xs:anyAttribute = attribute { atomic* }`
pub fn any_attribute() -> Type {
    Type::attr(NameTest::Wildcard, Type::star(Type::atomic()))
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the builtin `xs:` and `xdt:` types.
    pub fn with_predefined() -> Self {
        let mut registry = Self::new();
        for (name, definition) in predefined_types() {
            registry.spaces[slot(SymbolSpace::Type)].insert(name, definition);
        }
        registry
    }

    pub fn register(
        &mut self,
        space: SymbolSpace,
        name: QName,
        definition: Type,
    ) -> Result<(), TypeError> {
        let declares_itself = match (space, &definition) {
            (SymbolSpace::Element, Type::Elem(NameTest::Name(qn), _)) => *qn == name,
            (SymbolSpace::Attribute, Type::Attr(NameTest::Name(qn), _)) => *qn == name,
            (SymbolSpace::Element | SymbolSpace::Attribute, _) => false,
            _ => true,
        };
        if !declares_itself {
            return Err(TypeError::DeclarationMismatch { space, name });
        }

        let table = &mut self.spaces[slot(space)];
        if table.contains_key(&name) {
            return Err(TypeError::TypeRedefinition { space, name });
        }
        tracing::trace!(%space, %name, %definition, "registered schema type");
        table.insert(name, definition);
        Ok(())
    }

    pub fn lookup(&self, space: SymbolSpace, name: &QName) -> Option<&Type> {
        self.spaces[slot(space)].get(name)
    }

    pub fn contains(&self, space: SymbolSpace, name: &QName) -> bool {
        self.spaces[slot(space)].contains_key(name)
    }

    /// Definitions of one symbol space, ordered by (namespace, local name).
    pub fn definitions(&self, space: SymbolSpace) -> impl Iterator<Item = (&QName, &Type)> {
        self.spaces[slot(space)].iter()
    }

    pub fn len(&self) -> usize {
        self.spaces.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every named reference by its definition, leaving a reference
    /// in place when the same name is already being unfolded on the current
    /// path.
    pub fn defn(&self, t: &Type) -> Result<Type, TypeError> {
        let mut unfolding = Vec::new();
        self.unfold(t, &mut unfolding)
    }

    /// Simplifies `t` and replaces a named reference at its root by the
    /// definition, repeating until the root is structural. References below
    /// the root stay folded until a derivative reaches them, so the result is
    /// a stable key for the coinductive assumptions.
    pub fn unfold_head(&self, t: &Type) -> Result<Type, TypeError> {
        let mut seen: Vec<(SymbolSpace, QName)> = Vec::new();
        let mut current = simplify(t);
        while let Type::Named(space, name) = &current {
            if seen.iter().any(|(s, n)| s == space && n == name) {
                break;
            }
            let definition =
                self.lookup(*space, name)
                    .ok_or_else(|| TypeError::UnknownSchemaType {
                        space: *space,
                        name: name.clone(),
                    })?;
            seen.push((*space, name.clone()));
            current = simplify(definition);
        }
        Ok(current)
    }

    fn unfold(
        &self,
        t: &Type,
        unfolding: &mut Vec<(SymbolSpace, QName)>,
    ) -> Result<Type, TypeError> {
        let unfolded = match t {
            Type::Named(space, name) => {
                if unfolding.iter().any(|(s, n)| s == space && n == name) {
                    return Ok(t.clone());
                }
                let definition =
                    self.lookup(*space, name)
                        .ok_or_else(|| TypeError::UnknownSchemaType {
                            space: *space,
                            name: name.clone(),
                        })?;
                unfolding.push((*space, name.clone()));
                let result = self.unfold(definition, unfolding);
                unfolding.pop();
                result?
            }
            Type::Opt(c) => Type::opt(self.unfold(c, unfolding)?),
            Type::Plus(c) => Type::plus(self.unfold(c, unfolding)?),
            Type::Star(c) => Type::star(self.unfold(c, unfolding)?),
            Type::Doc(c) => Type::doc(self.unfold(c, unfolding)?),
            Type::Elem(name, c) => Type::Elem(name.clone(), Box::new(self.unfold(c, unfolding)?)),
            Type::Attr(name, c) => Type::Attr(name.clone(), Box::new(self.unfold(c, unfolding)?)),
            Type::Seq(l, r) => Type::seq(self.unfold(l, unfolding)?, self.unfold(r, unfolding)?),
            Type::Choice(l, r) => {
                Type::choice(self.unfold(l, unfolding)?, self.unfold(r, unfolding)?)
            }
            Type::All(l, r) => Type::all(self.unfold(l, unfolding)?, self.unfold(r, unfolding)?),
            Type::None | Type::Empty | Type::Prim(_) | Type::Pi(_) => t.clone(),
        };
        Ok(unfolded)
    }
}
