use serde::Serialize;

use crate::diagnostics::{Diagnostic, TypeError};
use crate::judgments::{Quantifier, data_on, is2ns, prime, quantifier};
use crate::schema::SchemaRegistry;
use crate::simplify::simplify;
use crate::subtyping::{is_disjoint, is_equal, is_promotable, is_subtype};
use crate::types::{SymbolSpace, Type};

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct RelationReport {
    pub schema_version: String,
    pub lhs: String,
    pub rhs: String,
    pub subtype: bool,
    pub supertype: bool,
    pub equal: bool,
    pub promotable: bool,
    pub disjoint: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeReport {
    pub schema_version: String,
    pub input: String,
    pub simplified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfolded: Option<String>,
    pub quantifier: Quantifier,
    pub prime: String,
    pub data_on: String,
    pub is2ns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    pub schema_version: String,
    pub spaces: Vec<SpaceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpaceReport {
    pub space: SymbolSpace,
    pub definitions: Vec<DefinitionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefinitionReport {
    pub name: String,
    pub definition: String,
}

pub fn relate(schema: &SchemaRegistry, lhs: &Type, rhs: &Type) -> Result<RelationReport, TypeError> {
    Ok(RelationReport {
        schema_version: REPORT_SCHEMA_VERSION.to_string(),
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
        subtype: is_subtype(schema, lhs, rhs)?,
        supertype: is_subtype(schema, rhs, lhs)?,
        equal: is_equal(schema, lhs, rhs)?,
        promotable: is_promotable(schema, lhs, rhs)?,
        disjoint: is_disjoint(schema, lhs, rhs)?,
    })
}

/// Derived judgments of `t`, computed on its unfolded, simplified form.
pub fn shape(schema: &SchemaRegistry, t: &Type, show_unfolded: bool) -> Result<ShapeReport, TypeError> {
    let unfolded = simplify(&schema.defn(t)?);
    Ok(ShapeReport {
        schema_version: REPORT_SCHEMA_VERSION.to_string(),
        input: t.to_string(),
        simplified: simplify(t).to_string(),
        unfolded: show_unfolded.then(|| unfolded.to_string()),
        quantifier: quantifier(&unfolded),
        prime: simplify(&prime(&unfolded)).to_string(),
        data_on: simplify(&data_on(schema, &unfolded)?).to_string(),
        is2ns: simplify(&is2ns(schema, &unfolded)?).to_string(),
    })
}

pub fn describe_schema(schema: &SchemaRegistry) -> SchemaReport {
    let spaces = SymbolSpace::ALL
        .into_iter()
        .map(|space| SpaceReport {
            space,
            definitions: schema
                .definitions(space)
                .map(|(name, definition)| DefinitionReport {
                    name: name.to_string(),
                    definition: definition.to_string(),
                })
                .collect(),
        })
        .collect();
    SchemaReport {
        schema_version: REPORT_SCHEMA_VERSION.to_string(),
        spaces,
    }
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String, Diagnostic> {
    serde_json::to_string_pretty(report).map_err(|err| {
        Diagnostic::new("E-IO", format!("failed to serialize report: {err}"), None)
    })
}
