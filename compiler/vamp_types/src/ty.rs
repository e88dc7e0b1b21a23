//! The type representation.

use std::fmt;

use vamp_ir::SymbolLookup;
use vamp_tuple::{Tuple, TupleEntry};

/// A Vamp type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Not yet known; compatible with everything so checking can continue
    /// after an error.
    Unknown,
    /// The uninhabited type.
    Void,
    /// The unit type, inhabited by `nil` only.
    Nil,
    Bool,
    Sym,
    Str,
    Int,
    Float,
    /// Product type: every tuple value with this layout and member types.
    Tuple(Tuple<Ty>),
    /// Union of the member types.
    Any(Box<[Ty]>),
}

impl Ty {
    /// The tuple type inside, if this is one.
    pub fn as_tuple(&self) -> Option<&Tuple<Ty>> {
        match self {
            Ty::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// Short category name for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Ty::Unknown => "unknown",
            Ty::Void => "void",
            Ty::Nil => "nil",
            Ty::Bool => "bool",
            Ty::Sym => "symbol",
            Ty::Str => "string",
            Ty::Int => "int",
            Ty::Float => "float",
            Ty::Tuple(_) => "tuple",
            Ty::Any(_) => "union",
        }
    }

    /// Render with field and tag names resolved.
    pub fn display<'a, L: SymbolLookup>(&'a self, lookup: &'a L) -> TyDisplay<'a, L> {
        TyDisplay { ty: self, lookup }
    }
}

impl From<Tuple<Ty>> for Ty {
    fn from(tuple: Tuple<Ty>) -> Self {
        Ty::Tuple(tuple)
    }
}

/// Display adapter for [`Ty`].
pub struct TyDisplay<'a, L> {
    ty: &'a Ty,
    lookup: &'a L,
}

impl<L: SymbolLookup> fmt::Display for TyDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Ty::Unknown => f.write_str("?"),
            Ty::Void => f.write_str("Void"),
            Ty::Nil => f.write_str("Nil"),
            Ty::Bool => f.write_str("Bool"),
            Ty::Sym => f.write_str("Sym"),
            Ty::Str => f.write_str("Str"),
            Ty::Int => f.write_str("Int"),
            Ty::Float => f.write_str("Float"),
            Ty::Tuple(tuple) => {
                if let Some(tag) = tuple.tag() {
                    f.write_str(self.lookup.lookup(tag))?;
                }
                f.write_str("(")?;
                for (i, entry) in tuple.entries().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match entry {
                        TupleEntry::Pos(ty) => write!(f, "{}", ty.display(self.lookup))?,
                        TupleEntry::Named(field, ty) => write!(
                            f,
                            "{}: {}",
                            self.lookup.lookup(field),
                            ty.display(self.lookup)
                        )?,
                    }
                }
                f.write_str(")")
            }
            Ty::Any(members) if members.is_empty() => f.write_str("Any()"),
            Ty::Any(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", member.display(self.lookup))?;
                }
                Ok(())
            }
        }
    }
}
