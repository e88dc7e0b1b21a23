//! Shared resources under parallel compilation phases.

use std::sync::Arc;

use rayon::prelude::*;
use vampc::{CompilerContext, Symbol};

#[test]
fn concurrent_interning_yields_one_id() {
    let ctx = CompilerContext::default();

    let ids: Vec<Symbol> = (0..256)
        .into_par_iter()
        .map(|_| ctx.intern("shared_name"))
        .collect();

    let first = ids[0];
    assert!(ids.iter().all(|&id| id == first));
    assert_eq!(ctx.interner.lookup(first), "shared_name");
}

#[test]
fn concurrent_layout_registration_shares_one_layout() {
    let ctx = CompilerContext::default();
    let (x, y, z) = (ctx.intern("x"), ctx.intern("y"), ctx.intern("z"));
    let orders = [[x, y, z], [z, y, x], [y, x, z], [x, z, y]];
    let before = ctx.layouts.len();

    let layouts: Vec<_> = (0..64)
        .into_par_iter()
        .map(|i| ctx.layouts.construct(1, &orders[i % orders.len()], None).unwrap())
        .collect();

    assert!(layouts.iter().all(|layout| Arc::ptr_eq(layout, &layouts[0])));
    assert_eq!(ctx.layouts.len(), before + 1);
}

#[test]
fn tuples_are_shared_across_threads() {
    let ctx = CompilerContext::default();
    let k = ctx.intern("k");
    let mut builder = ctx.tuple_builder(None);
    builder.push(1_i64).insert(k, 2);
    let tuple = Arc::new(builder.finish(&ctx.layouts).unwrap());

    let sums: Vec<i64> = (0..8)
        .into_par_iter()
        .map(|_| tuple.get(0).unwrap() + tuple.get_named(k).unwrap())
        .collect();
    assert!(sums.iter().all(|&sum| sum == 3));
}
