//! Fast-path relation tables indexed by pairs of type tags.
//!
//! The tables are derived from the builtin lattice in [`Kind::parent`]
//! instead of being spelled out cell by cell: a leaf row relates to a leaf
//! column exactly when the lattice says so, while rows and columns of
//! structural tags stay undecided.

use crate::types::{Kind, Prim};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trivial {
    No,
    Yes,
    Undecided,
}

impl From<bool> for Trivial {
    fn from(b: bool) -> Self {
        if b { Trivial::Yes } else { Trivial::No }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Subtyping: `Yes` if the row is below the column.
    Hierarchy,
    /// Equality: `Yes` only on the diagonal, undecided where the hierarchy
    /// relates two distinct kinds.
    Equality,
    /// Hierarchy widened by numeric and untyped promotion.
    Promotable,
    /// Disjointness: `Yes` if the row and column share a value.
    Intersect,
}

pub fn lookup(table: Table, row: Kind, col: Kind) -> Trivial {
    match table {
        Table::Hierarchy | Table::Equality | Table::Promotable => containment(table, row, col),
        Table::Intersect => intersect(row, col),
    }
}

fn containment(table: Table, row: Kind, col: Kind) -> Trivial {
    match (row, col) {
        (Kind::None, _) => Trivial::Yes,
        (Kind::Named, _) => Trivial::Undecided,
        (_, Kind::None) => Trivial::No,
        (r, _) if r.is_structural() => Trivial::Undecided,
        (_, c) if c.is_structural() => Trivial::Undecided,
        (Kind::Empty, Kind::Empty) => Trivial::Yes,
        (Kind::Empty, _) | (_, Kind::Empty) => Trivial::No,
        (r, c) if r == c && r.has_content() => Trivial::Undecided,
        (r, c) => match table {
            Table::Equality if r == c => Trivial::Yes,
            Table::Equality if r.is_subkind_of(c) => Trivial::Undecided,
            Table::Equality => Trivial::No,
            Table::Promotable => promotes(r, c).into(),
            _ => r.is_subkind_of(c).into(),
        },
    }
}

fn promotes(row: Kind, col: Kind) -> bool {
    match (row, col) {
        (Kind::Prim(Prim::UntypedAny), _) => false,
        (Kind::Prim(Prim::UntypedAtomic), Kind::Prim(Prim::UntypedAtomic)) => false,
        (
            Kind::Prim(Prim::Integer | Prim::Decimal | Prim::UntypedAtomic),
            Kind::Prim(Prim::Double),
        ) => true,
        (r, c) => r.is_subkind_of(c),
    }
}

fn intersect(row: Kind, col: Kind) -> Trivial {
    match (row, col) {
        (Kind::None, _) | (_, Kind::None) => Trivial::No,
        (Kind::Empty, Kind::Empty | Kind::Opt | Kind::Star)
        | (Kind::Opt | Kind::Star, Kind::Empty)
        | (Kind::Opt, Kind::Star)
        | (Kind::Star, Kind::Opt | Kind::Star) => Trivial::Yes,
        (r, _) if r.is_structural() => Trivial::Undecided,
        (_, c) if c.is_structural() => Trivial::Undecided,
        (Kind::Empty, _) | (_, Kind::Empty) => Trivial::No,
        (r, c) if r == c && r.has_content() => Trivial::Undecided,
        (r, c) => (r.is_subkind_of(c) || c.is_subkind_of(r)).into(),
    }
}
