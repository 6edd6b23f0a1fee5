use std::fmt;

use serde::{Deserialize, Serialize};

use crate::qname::{NameTest, QName};

/// The five disjoint symbol spaces a named type can be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolSpace {
    Type,
    Element,
    Attribute,
    Group,
    AttributeGroup,
}

impl SymbolSpace {
    pub const ALL: [SymbolSpace; 5] = [
        SymbolSpace::Type,
        SymbolSpace::Element,
        SymbolSpace::Attribute,
        SymbolSpace::Group,
        SymbolSpace::AttributeGroup,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            SymbolSpace::Type => "type",
            SymbolSpace::Element => "element",
            SymbolSpace::Attribute => "attribute",
            SymbolSpace::Group => "group",
            SymbolSpace::AttributeGroup => "attribute-group",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|space| space.keyword() == word)
    }
}

impl fmt::Display for SymbolSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Leaf kinds of the builtin type lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prim {
    Item,
    UntypedAny,
    Atomic,
    UntypedAtomic,
    Numeric,
    Integer,
    Decimal,
    Double,
    String,
    Boolean,
    QName,
    Date,
    Time,
    DateTime,
    GYear,
    GYearMonth,
    GMonth,
    GMonthDay,
    GDay,
    Duration,
    YearMonthDuration,
    DayTimeDuration,
    Node,
    Text,
    Comment,
    Stmt,
    Docmgmt,
}

impl Prim {
    pub const ALL: [Prim; 27] = [
        Prim::Item,
        Prim::UntypedAny,
        Prim::Atomic,
        Prim::UntypedAtomic,
        Prim::Numeric,
        Prim::Integer,
        Prim::Decimal,
        Prim::Double,
        Prim::String,
        Prim::Boolean,
        Prim::QName,
        Prim::Date,
        Prim::Time,
        Prim::DateTime,
        Prim::GYear,
        Prim::GYearMonth,
        Prim::GMonth,
        Prim::GMonthDay,
        Prim::GDay,
        Prim::Duration,
        Prim::YearMonthDuration,
        Prim::DayTimeDuration,
        Prim::Node,
        Prim::Text,
        Prim::Comment,
        Prim::Stmt,
        Prim::Docmgmt,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Prim::Item => "item",
            Prim::UntypedAny => "untypedAny",
            Prim::Atomic => "atomic",
            Prim::UntypedAtomic => "untypedAtomic",
            Prim::Numeric => "numeric",
            Prim::Integer => "integer",
            Prim::Decimal => "decimal",
            Prim::Double => "double",
            Prim::String => "string",
            Prim::Boolean => "boolean",
            Prim::QName => "QName",
            Prim::Date => "date",
            Prim::Time => "time",
            Prim::DateTime => "dateTime",
            Prim::GYear => "gYear",
            Prim::GYearMonth => "gYearMonth",
            Prim::GMonth => "gMonth",
            Prim::GMonthDay => "gMonthDay",
            Prim::GDay => "gDay",
            Prim::Duration => "duration",
            Prim::YearMonthDuration => "yearMonthDuration",
            Prim::DayTimeDuration => "dayTimeDuration",
            Prim::Node => "node",
            Prim::Text => "text",
            Prim::Comment => "comment",
            Prim::Stmt => "stmt",
            Prim::Docmgmt => "docmgmt",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == word)
    }

    /// Immediate supertype in the builtin lattice.
    pub fn parent(self) -> Option<Prim> {
        match self {
            Prim::Integer => Some(Prim::Decimal),
            Prim::Decimal | Prim::Double => Some(Prim::Numeric),
            Prim::YearMonthDuration | Prim::DayTimeDuration => Some(Prim::Duration),
            Prim::Numeric
            | Prim::UntypedAtomic
            | Prim::String
            | Prim::Boolean
            | Prim::QName
            | Prim::Date
            | Prim::Time
            | Prim::DateTime
            | Prim::GYear
            | Prim::GYearMonth
            | Prim::GMonth
            | Prim::GMonthDay
            | Prim::GDay
            | Prim::Duration => Some(Prim::Atomic),
            Prim::Text | Prim::Comment => Some(Prim::Node),
            Prim::Atomic | Prim::Node => Some(Prim::Item),
            Prim::Item | Prim::UntypedAny | Prim::Stmt | Prim::Docmgmt => None,
        }
    }
}

/// A structural type.
///
/// Derived equality is the structural equality used for memoization: named
/// references compare by space and name without unfolding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    None,
    Empty,
    Named(SymbolSpace, QName),
    Opt(Box<Type>),
    Plus(Box<Type>),
    Star(Box<Type>),
    Seq(Box<Type>, Box<Type>),
    Choice(Box<Type>, Box<Type>),
    All(Box<Type>, Box<Type>),
    Prim(Prim),
    Elem(NameTest, Box<Type>),
    Attr(NameTest, Box<Type>),
    Doc(Box<Type>),
    /// Processing instruction; `None` target is the wildcard.
    Pi(Option<String>),
}

/// Variant tag of a [`Type`], the index of the trivial relation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Empty,
    Named,
    Opt,
    Plus,
    Star,
    Seq,
    Choice,
    All,
    Prim(Prim),
    Elem,
    Attr,
    Doc,
    Pi,
}

impl Kind {
    /// Tags whose relation always needs the general algorithm.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Kind::Named | Kind::Opt | Kind::Plus | Kind::Star | Kind::Seq | Kind::Choice | Kind::All
        )
    }

    /// Node constructors whose same-kind pairs depend on names and content.
    pub fn has_content(self) -> bool {
        matches!(self, Kind::Elem | Kind::Attr | Kind::Doc | Kind::Pi)
    }

    pub fn parent(self) -> Option<Kind> {
        match self {
            Kind::Prim(p) => p.parent().map(Kind::Prim),
            Kind::Elem | Kind::Attr | Kind::Doc | Kind::Pi => Some(Kind::Prim(Prim::Node)),
            _ => None,
        }
    }

    /// Reflexive-transitive closure of [`Kind::parent`].
    pub fn is_subkind_of(self, other: Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl From<Prim> for Type {
    fn from(p: Prim) -> Self {
        Type::Prim(p)
    }
}

impl Type {
    pub fn kind(&self) -> Kind {
        match self {
            Type::None => Kind::None,
            Type::Empty => Kind::Empty,
            Type::Named(..) => Kind::Named,
            Type::Opt(_) => Kind::Opt,
            Type::Plus(_) => Kind::Plus,
            Type::Star(_) => Kind::Star,
            Type::Seq(..) => Kind::Seq,
            Type::Choice(..) => Kind::Choice,
            Type::All(..) => Kind::All,
            Type::Prim(p) => Kind::Prim(*p),
            Type::Elem(..) => Kind::Elem,
            Type::Attr(..) => Kind::Attr,
            Type::Doc(_) => Kind::Doc,
            Type::Pi(_) => Kind::Pi,
        }
    }

    pub fn named(name: QName) -> Type {
        Type::Named(SymbolSpace::Type, name)
    }

    pub fn named_in(space: SymbolSpace, name: QName) -> Type {
        Type::Named(space, name)
    }

    pub fn opt(t: Type) -> Type {
        Type::Opt(Box::new(t))
    }

    pub fn plus(t: Type) -> Type {
        Type::Plus(Box::new(t))
    }

    pub fn star(t: Type) -> Type {
        Type::Star(Box::new(t))
    }

    pub fn seq(l: Type, r: Type) -> Type {
        Type::Seq(Box::new(l), Box::new(r))
    }

    pub fn choice(l: Type, r: Type) -> Type {
        Type::Choice(Box::new(l), Box::new(r))
    }

    pub fn all(l: Type, r: Type) -> Type {
        Type::All(Box::new(l), Box::new(r))
    }

    pub fn elem(name: impl Into<NameTest>, content: Type) -> Type {
        Type::Elem(name.into(), Box::new(content))
    }

    pub fn attr(name: impl Into<NameTest>, content: Type) -> Type {
        Type::Attr(name.into(), Box::new(content))
    }

    pub fn doc(content: Type) -> Type {
        Type::Doc(Box::new(content))
    }

    pub fn pi(target: Option<&str>) -> Type {
        Type::Pi(target.map(str::to_string))
    }

    pub fn item() -> Type {
        Type::Prim(Prim::Item)
    }

    pub fn atomic() -> Type {
        Type::Prim(Prim::Atomic)
    }

    pub fn node() -> Type {
        Type::Prim(Prim::Node)
    }

    pub fn integer() -> Type {
        Type::Prim(Prim::Integer)
    }

    pub fn decimal() -> Type {
        Type::Prim(Prim::Decimal)
    }

    pub fn double() -> Type {
        Type::Prim(Prim::Double)
    }

    pub fn numeric() -> Type {
        Type::Prim(Prim::Numeric)
    }

    pub fn string() -> Type {
        Type::Prim(Prim::String)
    }

    pub fn boolean() -> Type {
        Type::Prim(Prim::Boolean)
    }

    pub fn untyped_atomic() -> Type {
        Type::Prim(Prim::UntypedAtomic)
    }

    pub fn text() -> Type {
        Type::Prim(Prim::Text)
    }

    /// Right fold of `|` over `items`; `none` for an empty list.
    pub fn choice_of(items: Vec<Type>) -> Type {
        items
            .into_iter()
            .rev()
            .reduce(|acc, t| Type::choice(t, acc))
            .unwrap_or(Type::None)
    }

    /// Right fold of `,` over `items`; `()` for an empty list.
    pub fn seq_of(items: Vec<Type>) -> Type {
        items
            .into_iter()
            .rev()
            .reduce(|acc, t| Type::seq(t, acc))
            .unwrap_or(Type::Empty)
    }

    /// Rendering used in diagnostics; identical to the `Display` output.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

const PREC_ALL: u8 = 0;
const PREC_CHOICE: u8 = 1;
const PREC_SEQ: u8 = 2;
const PREC_QUANT: u8 = 3;

fn write_binary(
    f: &mut fmt::Formatter<'_>,
    outer: u8,
    own: u8,
    sep: &str,
    l: &Type,
    r: &Type,
) -> fmt::Result {
    let parens = outer > own;
    if parens {
        f.write_str("(")?;
    }
    write_type(f, l, own)?;
    f.write_str(sep)?;
    write_type(f, r, own)?;
    if parens {
        f.write_str(")")?;
    }
    Ok(())
}

fn write_name_test(f: &mut fmt::Formatter<'_>, name: &NameTest) -> fmt::Result {
    match name {
        NameTest::Wildcard => Ok(()),
        NameTest::Name(qn) => write!(f, " {qn}"),
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, t: &Type, prec: u8) -> fmt::Result {
    match t {
        Type::None => f.write_str("none"),
        Type::Empty => f.write_str("()"),
        Type::Named(SymbolSpace::Type, qn) => write!(f, "{qn}"),
        Type::Named(space, qn) => write!(f, "{space}({qn})"),
        Type::Opt(c) => {
            write_type(f, c, PREC_QUANT)?;
            f.write_str("?")
        }
        Type::Plus(c) => {
            write_type(f, c, PREC_QUANT)?;
            f.write_str("+")
        }
        Type::Star(c) => {
            write_type(f, c, PREC_QUANT)?;
            f.write_str("*")
        }
        Type::Seq(l, r) => write_binary(f, prec, PREC_SEQ, ", ", l, r),
        Type::Choice(l, r) => write_binary(f, prec, PREC_CHOICE, " | ", l, r),
        Type::All(l, r) => write_binary(f, prec, PREC_ALL, " & ", l, r),
        Type::Prim(p) => f.write_str(p.keyword()),
        Type::Elem(name, content) => {
            f.write_str("element")?;
            write_name_test(f, name)?;
            f.write_str(" { ")?;
            write_type(f, content, PREC_ALL)?;
            f.write_str(" }")
        }
        Type::Attr(name, content) => {
            f.write_str("attribute")?;
            write_name_test(f, name)?;
            f.write_str(" { ")?;
            write_type(f, content, PREC_ALL)?;
            f.write_str(" }")
        }
        Type::Doc(content) => {
            f.write_str("document { ")?;
            write_type(f, content, PREC_ALL)?;
            f.write_str(" }")
        }
        Type::Pi(None) => f.write_str("processing-instruction * {}"),
        Type::Pi(Some(target)) => write!(f, "processing-instruction {target} {{}}"),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(f, self, PREC_ALL)
    }
}
