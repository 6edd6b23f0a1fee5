#![allow(dead_code)]

pub mod type_generators;

use xqtype::{LoadedSchema, Namespaces, QName, SchemaRegistry, SymbolSpace, Type, load_schema_str, parse_type};

pub const EX_NS: &str = "urn:example";

pub fn ex(local: &str) -> QName {
    QName::new(Some("ex"), EX_NS, local)
}

pub fn namespaces() -> Namespaces {
    let mut ns = Namespaces::default();
    ns.bind("ex", EX_NS);
    ns
}

pub fn ty(src: &str) -> Type {
    parse_type(src, &namespaces()).expect("type should parse")
}

pub fn predefined() -> SchemaRegistry {
    SchemaRegistry::with_predefined()
}

/// `ex:list = integer, (() | ex:list)`, registered without a regularity check.
pub fn registry_with(defs: &[(&str, &str)]) -> SchemaRegistry {
    let mut registry = SchemaRegistry::with_predefined();
    for (name, definition) in defs {
        registry
            .register(SymbolSpace::Type, ex(name), ty(definition))
            .expect("definition should register");
    }
    registry
}

pub const LIST_SCHEMA: &str = r#"
[namespaces]
ex = "urn:example"

[[define]]
space = "type"
name = "ex:list"
type = "integer, (() | ex:list)"

[[define]]
space = "element"
name = "ex:item"
type = "element ex:item { ex:list? }"
"#;

pub fn list_schema() -> LoadedSchema {
    load_schema_str(LIST_SCHEMA).expect("list schema should load")
}
