//! Shared test utilities for phase tests.

use vampc::{CompilerContext, Symbol, Ty, Tuple};

/// A minimal runtime value, enough to exercise destructuring.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Tuple(Tuple<Value>),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl vamp_patterns::Destructure for Value {
    fn as_tuple(&self) -> Option<&Tuple<Self>> {
        match self {
            Value::Tuple(tuple) => Some(tuple),
            Value::Int(_) | Value::Str(_) => None,
        }
    }

    fn from_tuple(tuple: Tuple<Self>) -> Self {
        Value::Tuple(tuple)
    }
}

/// Build a tuple the way the parser does for `Tag(p0, p1, name: v, ...)`.
pub fn literal<T>(
    ctx: &CompilerContext,
    tag: Option<&str>,
    positional: Vec<T>,
    named: Vec<(&str, T)>,
) -> Tuple<T> {
    let mut builder = ctx.tuple_builder(tag);
    for value in positional {
        builder.push(value);
    }
    for (name, value) in named {
        builder.insert(ctx.intern(name), value);
    }
    builder.finish(&ctx.layouts).unwrap()
}

pub fn ints(ctx: &CompilerContext, values: &[i64]) -> Tuple<Value> {
    literal(ctx, None, values.iter().copied().map(Value::Int).collect(), vec![])
}

/// A tuple type literal.
pub fn tuple_ty(
    ctx: &CompilerContext,
    tag: Option<&str>,
    positional: Vec<Ty>,
    named: Vec<(&str, Ty)>,
) -> Ty {
    Ty::Tuple(literal(ctx, tag, positional, named))
}

pub fn sym(ctx: &CompilerContext, name: &str) -> Symbol {
    ctx.intern(name)
}
