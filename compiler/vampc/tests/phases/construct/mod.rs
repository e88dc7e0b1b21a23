//! Construction and access through the pipeline context.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vampc::{CompilerConfig, CompilerContext, Span, Tuple, TupleError};

use crate::common::{ints, literal, sym, Value};

#[test]
fn named_permutations_are_equal() {
    let ctx = CompilerContext::default();
    let a = literal(&ctx, None, vec![1], vec![("x", 2), ("y", 3), ("z", 4)]);
    let b = literal(&ctx, None, vec![1], vec![("z", 4), ("x", 2), ("y", 3)]);
    let c = literal(&ctx, None, vec![1], vec![("y", 3), ("z", 4), ("x", 2)]);

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(Arc::ptr_eq(a.layout(), c.layout()));
}

#[test]
fn named_permutations_are_equal_without_canonicalization() {
    let config = CompilerConfig::from_toml("[cache]\ncanonicalize_layouts = false").unwrap();
    let ctx = CompilerContext::new(config);
    let a = literal(&ctx, None, vec![], vec![("x", 2), ("y", 3)]);
    let b = literal(&ctx, None, vec![], vec![("y", 3), ("x", 2)]);

    assert!(!Arc::ptr_eq(a.layout(), b.layout()));
    assert_eq!(a.layout(), b.layout());
    assert_eq!(a, b);
}

#[test]
fn positional_and_named_round_trip() {
    let ctx = CompilerContext::default();
    let tuple = literal(&ctx, None, vec![10, 20, 30], vec![("k", 40)]);

    for (i, expected) in [10, 20, 30].iter().enumerate() {
        assert_eq!(tuple.get(i), Ok(expected));
    }
    assert_eq!(tuple.get_named(sym(&ctx, "k")), Ok(&40));
    assert_eq!(
        tuple.get(3),
        Err(TupleError::IndexOutOfRange { index: 3, len: 3 })
    );
}

#[test]
fn update_is_local() {
    let ctx = CompilerContext::default();
    let tuple = ints(&ctx, &[1, 2, 3]);
    let updated = tuple.with_updated(1, Value::Int(9)).unwrap();

    assert_eq!(updated.get(0), tuple.get(0));
    assert_eq!(updated.get(1), Ok(&Value::Int(9)));
    assert_eq!(updated.get(2), tuple.get(2));
    assert!(Arc::ptr_eq(updated.layout(), tuple.layout()));
}

#[test]
fn layouts_from_different_orders_are_equal() {
    let ctx = CompilerContext::default();
    let (a, b, tag) = (sym(&ctx, "a"), sym(&ctx, "b"), sym(&ctx, "T"));

    let first = ctx.layouts.construct(2, &[a, b], Some(tag)).unwrap();
    let second = ctx.layouts.construct(2, &[b, a], Some(tag)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.display(&ctx.interner).to_string(), "T(_, _, a:, b:)");
}

#[test]
fn duplicate_field_literal_is_rejected() {
    let ctx = CompilerContext::default();
    let mut builder = ctx.tuple_builder::<i64>(None);
    builder.insert(sym(&ctx, "x"), 1).insert(sym(&ctx, "x"), 2);

    let error = builder.finish(&ctx.layouts).unwrap_err();
    assert_eq!(error, TupleError::DuplicateField { field: sym(&ctx, "x") });

    let diag = error.to_diagnostic(Span::new(0, 12), &ctx.interner);
    assert_eq!(
        diag.to_string().lines().next(),
        Some("error [E2101]: field `x` is specified more than once")
    );
}

#[test]
fn tagged_constructor_call() {
    let ctx = CompilerContext::default();
    let person: Tuple<Value> = literal(
        &ctx,
        Some("Person"),
        vec![],
        vec![("firstName", Value::str("E")), ("lastName", Value::str("L"))],
    );

    assert_eq!(person.tag(), Some(sym(&ctx, "Person")));
    assert_eq!(person.get_named(sym(&ctx, "firstName")), Ok(&Value::str("E")));
    assert_eq!(person.get_named(sym(&ctx, "lastName")), Ok(&Value::str("L")));
}

fn permuted_fields() -> impl Strategy<Value = (Vec<(String, i64)>, Vec<(String, i64)>)> {
    prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 1..10).prop_flat_map(|fields| {
        let fields: Vec<(String, i64)> = fields.into_iter().collect();
        (Just(fields.clone()), Just(fields).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn builder_field_order_is_irrelevant((declared, shuffled) in permuted_fields(), head in any::<i64>()) {
        let ctx = CompilerContext::default();
        let build = |fields: &[(String, i64)]| {
            let mut builder = ctx.tuple_builder(Some("Record"));
            builder.push(head);
            for (name, value) in fields {
                builder.insert(ctx.intern(name), *value);
            }
            builder.finish(&ctx.layouts).unwrap()
        };

        let a = build(&declared);
        let b = build(&shuffled);
        prop_assert_eq!(&a, &b);
        prop_assert!(Arc::ptr_eq(a.layout(), b.layout()));
        for (name, value) in &declared {
            prop_assert_eq!(b.get_named(ctx.intern(name)), Ok(value));
        }
    }
}
