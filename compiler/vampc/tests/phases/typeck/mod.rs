//! Tuple type comparison with policies taken from configuration.

use pretty_assertions::assert_eq;
use vamp_types::MismatchKind;
use vampc::{CompilerConfig, CompilerContext, Ty};

use crate::common::{sym, tuple_ty};

fn context(types: &str) -> CompilerContext {
    CompilerContext::new(CompilerConfig::from_toml(&format!("[types]\n{types}")).unwrap())
}

#[test]
fn default_configuration_is_strict() {
    let ctx = CompilerContext::default();
    let tagged = tuple_ty(&ctx, Some("Person"), vec![], vec![("name", Ty::Str)]);
    let plain = tuple_ty(&ctx, None, vec![], vec![("name", Ty::Str)]);
    let wide = tuple_ty(&ctx, None, vec![], vec![("name", Ty::Str), ("age", Ty::Int)]);

    assert!(!ctx.types.is_subtype(&tagged, &plain));
    assert_eq!(
        ctx.types.check_subtype(&wide, &plain).map_err(|m| m.kind),
        Err(MismatchKind::ExtraField {
            field: sym(&ctx, "age")
        })
    );
}

#[test]
fn configured_relaxations() {
    let ctx = context("tag_policy = \"untagged-accepts-any\"\nwidth_policy = \"extensible\"");
    let person = tuple_ty(
        &ctx,
        Some("Person"),
        vec![Ty::Int],
        vec![("name", Ty::Str), ("age", Ty::Int)],
    );
    let shape = tuple_ty(&ctx, None, vec![Ty::Int], vec![("name", Ty::Str)]);

    assert!(ctx.types.is_subtype(&person, &shape));
    assert!(!ctx.types.is_subtype(&shape, &person));
    assert!(!ctx.types.is_equivalent(&person, &shape));
}

#[test]
fn slot_types_are_checked_against_expectations() {
    let ctx = CompilerContext::default();
    // The literal `(1, name: "n")` checked against `(Int | Nil, name: Str)`.
    let inferred = tuple_ty(&ctx, None, vec![Ty::Int], vec![("name", Ty::Str)]);
    let expected = tuple_ty(
        &ctx,
        None,
        vec![Ty::Any(vec![Ty::Int, Ty::Nil].into_boxed_slice())],
        vec![("name", Ty::Str)],
    );
    assert!(ctx.types.is_subtype(&inferred, &expected));

    let wrong = tuple_ty(&ctx, None, vec![Ty::Float], vec![("name", Ty::Str)]);
    let mismatch = ctx.types.check_subtype(&wrong, &expected).unwrap_err();
    let diag = mismatch.to_diagnostic(vampc::Span::new(0, 15), &ctx.interner);
    assert_eq!(diag.labels[0].message, "expected `Int | Nil`, found `Float`");
    assert_eq!(diag.notes, vec!["at member `.0`".to_owned()]);
}
