use std::fmt;

use thiserror::Error;

use crate::qname::QName;
use crate::types::SymbolSpace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub file_id: Option<String>,
}

/// Failures of the type engine. A negative judgment is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("unknown schema type {space} {name}")]
    UnknownSchemaType { space: SymbolSpace, name: QName },
    #[error("redefinition of {space} {name}")]
    TypeRedefinition { space: SymbolSpace, name: QName },
    #[error("illegal non-regular type {name} = {definition}")]
    NonRegularType { name: QName, definition: String },
    #[error("{space} declaration {name} does not declare a node of that name")]
    DeclarationMismatch { space: SymbolSpace, name: QName },
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl TypeError {
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::UnknownSchemaType { .. } => "E-SCHEMA",
            TypeError::TypeRedefinition { .. } => "E-REDEF",
            TypeError::NonRegularType { .. } => "E-REGULAR",
            TypeError::DeclarationMismatch { .. } => "E-DECL",
            TypeError::InternalInvariantViolation(_) => "E-INTERNAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub span: Option<Span>,
    pub source: Option<String>,
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            source: None,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        hint_for_code(self.code)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl From<TypeError> for Diagnostic {
    fn from(err: TypeError) -> Self {
        Diagnostic::new(err.code(), err.to_string(), None)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = self.source() {
            write!(f, "{}: ", source)?;
        }
        if let Some(span) = &self.span {
            write!(
                f,
                "{}: {} at {}:{}",
                self.code, self.message, span.line, span.column
            )?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }
        if let Some(hint) = self.hint() {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

pub fn hint_for_code(code: &str) -> Option<&'static str> {
    match code {
        "E-IO" => Some("check the file path and read permissions"),
        "E-CONFIG" => Some("the schema document must be TOML with [namespaces] and [[define]] entries"),
        "E-PARSE" => Some("check operator placement, braces and namespace prefixes"),
        "E-SCHEMA" => Some("define the referenced name in the matching symbol space"),
        "E-REDEF" => Some("each name may be defined once per symbol space"),
        "E-DECL" => Some("element and attribute declarations must define a node of the declared name"),
        "E-REGULAR" => Some(
            "recursive references must follow a non-nullable prefix and stay out of `*`, `+` and the left side of `,`",
        ),
        "E-INTERNAL" => Some("this is a bug in the type engine"),
        _ => None,
    }
}

pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let mut line = 1usize;
    let mut col = 1usize;
    for (i, ch) in src.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

pub fn make_span(src: &str, start: usize, end: usize) -> Span {
    let (line, column) = line_col(src, start);
    Span {
        start,
        end,
        line,
        column,
        file_id: None,
    }
}
