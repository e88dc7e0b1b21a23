//! Destructuring through the pipeline context.

use pretty_assertions::assert_eq;
use vamp_patterns::{MatchFailure, Pattern, SlotBinding};
use vampc::{CompilerContext, MatchOutcome, TuplePattern};

use crate::common::{ints, literal, sym, Value};

#[test]
fn leading_binds_and_rest() {
    let ctx = CompilerContext::default();
    let (a, b, rest) = (sym(&ctx, "a"), sym(&ctx, "b"), sym(&ctx, "rest"));
    // let (a, b, ...rest) = (1, 2, 3, 4)
    let pattern: TuplePattern<i64> = TuplePattern::new()
        .positional(Pattern::Bind(a))
        .positional(Pattern::Bind(b))
        .rest(Some(rest));

    let outcome = ctx.matcher().match_tuple(&pattern, &ints(&ctx, &[1, 2, 3, 4])).unwrap();
    let bound = outcome.into_bindings().unwrap();

    assert_eq!(bound.get(a), Some(&Value::Int(1)));
    assert_eq!(bound.get(b), Some(&Value::Int(2)));
    assert_eq!(bound.get(rest), Some(&Value::Tuple(ints(&ctx, &[3, 4]))));
}

#[test]
fn shorthand_destructuring() {
    let ctx = CompilerContext::default();
    let (x, y) = (sym(&ctx, "x"), sym(&ctx, "y"));
    // let (x:, y:) = (x: 10, y: 20)
    let point = literal(
        &ctx,
        None,
        vec![],
        vec![("x", Value::Int(10)), ("y", Value::Int(20))],
    );
    let pattern: TuplePattern<i64> = TuplePattern::new().shorthand(x).shorthand(y);

    let bound = ctx
        .matcher()
        .match_tuple(&pattern, &point)
        .unwrap()
        .into_bindings()
        .unwrap();
    assert_eq!(bound.get(x), Some(&Value::Int(10)));
    assert_eq!(bound.get(y), Some(&Value::Int(20)));
}

#[test]
fn tag_mismatch_falls_through() {
    let ctx = CompilerContext::default();
    let (ok, err, v, e) = (sym(&ctx, "Ok"), sym(&ctx, "Err"), sym(&ctx, "v"), sym(&ctx, "e"));
    let arms: Vec<TuplePattern<i64>> = vec![
        TuplePattern::new().tagged(ok).positional(Pattern::Bind(v)),
        TuplePattern::new().tagged(err).positional(Pattern::Bind(e)),
    ];
    let failure = literal(&ctx, Some("Err"), vec![Value::str("boom")], vec![]);

    assert_eq!(
        ctx.matcher().match_tuple(&arms[0], &failure).unwrap(),
        MatchOutcome::Failed(MatchFailure::TagMismatch {
            expected: Some(ok),
            found: Some(err)
        })
    );
    let matched = ctx.matcher().match_arms(&arms, &failure).unwrap().unwrap();
    assert_eq!(matched.arm, 1);
    assert_eq!(matched.bindings.get(e), Some(&Value::str("boom")));
}

#[test]
fn refutable_failure_diagnostic() {
    let ctx = CompilerContext::default();
    let pattern: TuplePattern<i64> = TuplePattern::new()
        .positional(Pattern::Wildcard)
        .positional(Pattern::Wildcard);
    let outcome = ctx.matcher().match_tuple(&pattern, &ints(&ctx, &[1])).unwrap();
    let failure = outcome.failure().unwrap();

    let diag = failure.to_diagnostic(vampc::Span::new(4, 10), &ctx.interner);
    assert_eq!(diag.code, vampc::ErrorCode::E3102);
    assert_eq!(
        diag.notes,
        vec!["the pattern needs 2 positional values, the value has 1".to_owned()]
    );
}

#[test]
fn destructuring_compiles_to_slots() {
    let ctx = CompilerContext::default();
    let (x, y, others) = (sym(&ctx, "x"), sym(&ctx, "y"), sym(&ctx, "others"));
    let z = sym(&ctx, "z");
    let layout = ctx.layouts.construct(0, &[z, y, x], None).unwrap();
    // let (x:, ...others) = <value of type (z:, y:, x:)>
    let pattern: TuplePattern<i64> = TuplePattern::new().shorthand(x).named_rest(others);

    let bound = ctx
        .matcher()
        .match_layout(&pattern, &layout)
        .unwrap()
        .into_bindings()
        .unwrap();
    assert_eq!(bound.get(x), Some(&SlotBinding::Slot(2)));
    assert_eq!(
        bound.get(others),
        Some(&SlotBinding::NamedRest(vec![z, y].into_boxed_slice()))
    );
}
