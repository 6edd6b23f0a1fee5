use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::diagnostics::Diagnostic;
use crate::parser::parse_type;
use crate::qname::Namespaces;
use crate::regularity::check_regularity;
use crate::schema::SchemaRegistry;
use crate::types::SymbolSpace;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    #[serde(default)]
    namespaces: BTreeMap<String, String>,
    #[serde(default, rename = "define")]
    definitions: Vec<DefinitionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionEntry {
    space: SymbolSpace,
    name: String,
    #[serde(rename = "type")]
    definition: String,
}

/// A validated schema: every definition registered and regular.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub registry: SchemaRegistry,
    pub namespaces: Namespaces,
}

impl LoadedSchema {
    /// The builtin types alone.
    pub fn predefined() -> Self {
        Self {
            registry: SchemaRegistry::with_predefined(),
            namespaces: Namespaces::default(),
        }
    }
}

pub fn load_schema(path: &Path) -> Result<LoadedSchema, Vec<Diagnostic>> {
    let body = fs::read_to_string(path).map_err(|err| {
        vec![
            Diagnostic::new("E-IO", format!("failed to read schema: {err}"), None)
                .with_source(path.display().to_string()),
        ]
    })?;
    load_schema_str(&body).map_err(|diags| {
        diags
            .into_iter()
            .map(|d| d.with_source(path.display().to_string()))
            .collect()
    })
}

pub fn load_schema_str(src: &str) -> Result<LoadedSchema, Vec<Diagnostic>> {
    let document: SchemaDocument = toml::from_str(src).map_err(|err| {
        vec![Diagnostic::new(
            "E-CONFIG",
            format!("schema document is not valid: {err}"),
            None,
        )]
    })?;

    let mut namespaces = Namespaces::default();
    for (prefix, uri) in &document.namespaces {
        namespaces.bind(prefix.clone(), uri.clone());
    }

    let mut registry = SchemaRegistry::with_predefined();
    let mut errors = Vec::new();
    for entry in &document.definitions {
        let Some(name) = namespaces.resolve(&entry.name) else {
            errors.push(Diagnostic::new(
                "E-PARSE",
                format!("unbound namespace prefix in `{}`", entry.name),
                None,
            ));
            continue;
        };
        let definition = match parse_type(&entry.definition, &namespaces) {
            Ok(t) => t,
            Err(diags) => {
                errors.extend(diags.into_iter().map(|mut d| {
                    d.message = format!("{} {}: {}", entry.space, entry.name, d.message);
                    d
                }));
                continue;
            }
        };
        if let Err(err) = registry.register(entry.space, name, definition) {
            errors.push(Diagnostic::from(err));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    check_regularity(&registry)?;
    tracing::debug!(definitions = registry.len(), "schema loaded");
    Ok(LoadedSchema {
        registry,
        namespaces,
    })
}
