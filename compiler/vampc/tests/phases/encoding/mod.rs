//! Canonical encoding of compiled tuples.

use pretty_assertions::assert_eq;
use vamp_tuple::encoding::{decode, encode};
use vampc::{CompilerContext, Tuple};

use crate::common::literal;

#[test]
fn equal_tuples_encode_identically() {
    let ctx = CompilerContext::default();
    let a = literal(&ctx, Some("P"), vec![1_i64], vec![("b", 2), ("a", 3)]);
    let b = literal(&ctx, Some("P"), vec![1_i64], vec![("a", 3), ("b", 2)]);

    assert_eq!(
        encode(&a.to_canonical(&ctx.interner).unwrap()).unwrap(),
        encode(&b.to_canonical(&ctx.interner).unwrap()).unwrap()
    );
}

#[test]
fn artifacts_load_into_a_fresh_session() {
    let ctx = CompilerContext::default();
    let original = literal(&ctx, Some("P"), vec![1_i64], vec![("b", 2), ("a", 3)]);
    let bytes = encode(&original.to_canonical(&ctx.interner).unwrap()).unwrap();

    let next = CompilerContext::default();
    next.intern("unrelated");
    let loaded = Tuple::<i64>::from_canonical(decode(&bytes).unwrap(), &next.interner, &next.layouts)
        .unwrap();

    assert_eq!(loaded.display(&next.interner).to_string(), "P(1, a: 3, b: 2)");
    assert_eq!(loaded.get_named(next.intern("b")), Ok(&2));
}
