pub mod diagnostics;
pub mod judgments;
pub mod linear_form;
pub mod parser;
pub mod qname;
pub mod regularity;
pub mod report;
pub mod schema;
pub mod schema_file;
pub mod simplify;
pub mod subtyping;
pub mod trivial;
pub mod types;

pub use diagnostics::{Diagnostic, Span, TypeError};
pub use judgments::{Quantifier, data_on, is2ns, prime, quantifier};
pub use linear_form::{
    Derivative, InequalityDerivative, Monomial, content_of, leading_names, linear_form, nullable,
    partial_derivative, partial_derivative_of_inequality,
};
pub use parser::parse_type;
pub use qname::{NameTest, Namespaces, QName};
pub use regularity::{check_regularity, is_regular};
pub use report::{REPORT_SCHEMA_VERSION, RelationReport, SchemaReport, ShapeReport, relate};
pub use schema::SchemaRegistry;
pub use schema_file::{LoadedSchema, load_schema, load_schema_str};
pub use simplify::simplify;
pub use subtyping::{Judgment, is_disjoint, is_equal, is_promotable, is_subtype};
pub use types::{Kind, Prim, SymbolSpace, Type};
