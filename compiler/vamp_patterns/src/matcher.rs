//! Pattern matching against tuple values and layouts.

use std::ops::Range;

use smallvec::SmallVec;
use tracing::trace;
use vamp_diagnostic::{Diagnostic, ErrorCode};
use vamp_ir::{Span, Symbol, SymbolLookup};
use vamp_tuple::{Layout, LayoutCache, Tuple};

use crate::{FieldPattern, Pattern, PatternError, PositionalPattern, TuplePattern};

/// Values that may themselves be tuples, so nested patterns and rest
/// captures can reach into them.
pub trait Destructure: Sized {
    /// The tuple inside this value, if it is one.
    fn as_tuple(&self) -> Option<&Tuple<Self>>;

    /// Wrap a captured sub-tuple as a value.
    fn from_tuple(tuple: Tuple<Self>) -> Self;
}

/// Names bound by a successful match, in pattern order.
///
/// Binding a name twice keeps its first position and the last value.
#[derive(Clone, Debug, PartialEq)]
pub struct Bindings<V> {
    entries: SmallVec<[(Symbol, V); 4]>,
}

impl<V> Bindings<V> {
    pub fn new() -> Self {
        Bindings {
            entries: SmallVec::new(),
        }
    }

    pub fn bind(&mut self, name: Symbol, value: V) {
        match self.entries.iter_mut().find(|(bound, _)| *bound == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: Symbol) -> Option<&V> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &V)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn into_vec(self) -> Vec<(Symbol, V)> {
        self.entries.into_vec()
    }
}

impl<V> Default for Bindings<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for Bindings<V> {
    type Item = (Symbol, V);
    type IntoIter = smallvec::IntoIter<[(Symbol, V); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Why a well-formed pattern did not match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchFailure {
    /// Positional sub-pattern count does not fit the value's arity. With a
    /// rest marker, `expected` is the minimum.
    ArityMismatch {
        expected: usize,
        found: usize,
        has_rest: bool,
    },
    /// The value's tag differs from the required one.
    TagMismatch {
        expected: Option<Symbol>,
        found: Option<Symbol>,
    },
    /// A named sub-pattern refers to a field the value lacks.
    MissingField { field: Symbol },
    /// A nested tuple pattern met a non-tuple value.
    NotATuple,
    /// A literal sub-pattern did not equal the value.
    LiteralMismatch,
}

impl MatchFailure {
    /// Describe the failure for a refutable pattern in an irrefutable position.
    pub fn to_diagnostic(&self, span: Span, lookup: &impl SymbolLookup) -> Diagnostic {
        let diag = Diagnostic::error(ErrorCode::E3102)
            .with_message("pattern does not match the value")
            .with_label(span, "refutable pattern");
        let tag_name = |tag: Option<Symbol>| match tag {
            Some(tag) => format!("`{}`", lookup.lookup(tag)),
            None => "no tag".to_owned(),
        };
        match self {
            MatchFailure::ArityMismatch {
                expected,
                found,
                has_rest,
            } => {
                let at_least = if *has_rest { "at least " } else { "" };
                diag.with_note(format!(
                    "the pattern needs {at_least}{expected} positional values, the value has {found}"
                ))
            }
            MatchFailure::TagMismatch { expected, found } => diag.with_note(format!(
                "expected {}, found {}",
                tag_name(*expected),
                tag_name(*found)
            )),
            MatchFailure::MissingField { field } => diag.with_note(format!(
                "the value has no field `{}`",
                lookup.lookup(*field)
            )),
            MatchFailure::NotATuple => diag.with_note("a tuple pattern requires a tuple value"),
            MatchFailure::LiteralMismatch => diag.with_note("the literal is not equal to the value"),
        }
    }
}

/// Result of matching a well-formed pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchOutcome<V> {
    Matched(Bindings<V>),
    Failed(MatchFailure),
}

impl<V> MatchOutcome<V> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn bindings(&self) -> Option<&Bindings<V>> {
        match self {
            MatchOutcome::Matched(bindings) => Some(bindings),
            MatchOutcome::Failed(_) => None,
        }
    }

    pub fn into_bindings(self) -> Option<Bindings<V>> {
        match self {
            MatchOutcome::Matched(bindings) => Some(bindings),
            MatchOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&MatchFailure> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl<V> From<Result<Bindings<V>, MatchFailure>> for MatchOutcome<V> {
    fn from(result: Result<Bindings<V>, MatchFailure>) -> Self {
        match result {
            Ok(bindings) => MatchOutcome::Matched(bindings),
            Err(failure) => MatchOutcome::Failed(failure),
        }
    }
}

/// The first arm of a multi-arm match that matched.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmMatch<V> {
    pub arm: usize,
    pub bindings: Bindings<V>,
}

/// Where a name bound by [`Matcher::match_layout`] lives in the tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotBinding {
    /// A single storage slot.
    Slot(usize),
    /// Positional slots captured by `...name`.
    PositionalRest(Range<usize>),
    /// Named fields captured by a named rest, in declaration order.
    NamedRest(Box<[Symbol]>),
}

/// How a pattern's positional sub-patterns line up with `P` values.
struct PositionalPlan {
    /// Sub-patterns before the rest marker (all of them without one).
    before: usize,
    /// Positional values covered by the rest marker.
    rest: Range<usize>,
}

impl PositionalPlan {
    fn new<L>(pattern: &TuplePattern<L>, positional_count: usize) -> Result<Self, MatchFailure> {
        let fixed = pattern.fixed_positional_count();
        match pattern.rest_position() {
            None if fixed == positional_count => Ok(PositionalPlan {
                before: fixed,
                rest: positional_count..positional_count,
            }),
            Some(before) if fixed <= positional_count => Ok(PositionalPlan {
                before,
                rest: before..before + (positional_count - fixed),
            }),
            rest => Err(MatchFailure::ArityMismatch {
                expected: fixed,
                found: positional_count,
                has_rest: rest.is_some(),
            }),
        }
    }

    /// Value index for the `i`th positional sub-pattern (counting the rest
    /// marker), or `None` for the marker itself.
    fn value_index(&self, i: usize) -> Option<usize> {
        if i < self.before {
            Some(i)
        } else if i == self.before {
            None
        } else {
            Some(self.rest.end + (i - self.before - 1))
        }
    }
}

fn check_tag<L>(pattern: &TuplePattern<L>, found: Option<Symbol>) -> Result<(), MatchFailure> {
    match pattern.tag {
        Some(requirement) if !requirement.accepts(found) => Err(MatchFailure::TagMismatch {
            expected: requirement.expected(),
            found,
        }),
        _ => Ok(()),
    }
}

/// Named fields of `layout` the pattern does not mention, in declaration order.
fn unmentioned_fields<L>(pattern: &TuplePattern<L>, layout: &Layout) -> SmallVec<[Symbol; 8]> {
    layout
        .named_fields()
        .iter()
        .copied()
        .filter(|field| !pattern.fields.iter().any(|(key, _)| key == field))
        .collect()
}

/// Pattern matcher. Holds the layout cache used to build rest captures.
#[derive(Copy, Clone, Debug)]
pub struct Matcher<'c> {
    cache: &'c LayoutCache,
}

impl<'c> Matcher<'c> {
    pub fn new(cache: &'c LayoutCache) -> Self {
        Matcher { cache }
    }

    /// Match a tuple pattern against a tuple value.
    ///
    /// Checks the tag, then positional arity, then positional sub-patterns
    /// left to right, then named sub-patterns in pattern order.
    pub fn match_tuple<T, L>(
        &self,
        pattern: &TuplePattern<L>,
        tuple: &Tuple<T>,
    ) -> Result<MatchOutcome<T>, PatternError>
    where
        T: Destructure + Clone + PartialEq<L>,
    {
        pattern.validate()?;
        let mut bindings = Bindings::new();
        let outcome = self.tuple_into(pattern, tuple, &mut bindings)?;
        if let Err(failure) = &outcome {
            trace!(?failure, "tuple pattern did not match");
        }
        Ok(outcome.map(|()| bindings).into())
    }

    /// Match any pattern against a single value.
    pub fn match_value<T, L>(
        &self,
        pattern: &Pattern<L>,
        value: &T,
    ) -> Result<MatchOutcome<T>, PatternError>
    where
        T: Destructure + Clone + PartialEq<L>,
    {
        pattern.validate()?;
        let mut bindings = Bindings::new();
        let outcome = self.pattern_into(pattern, value, &mut bindings)?;
        Ok(outcome.map(|()| bindings).into())
    }

    /// Try each arm in order and return the first that matches.
    ///
    /// Every arm is validated before any is tried.
    pub fn match_arms<T, L>(
        &self,
        arms: &[TuplePattern<L>],
        tuple: &Tuple<T>,
    ) -> Result<Option<ArmMatch<T>>, PatternError>
    where
        T: Destructure + Clone + PartialEq<L>,
    {
        for arm in arms {
            arm.validate()?;
        }
        for (index, arm) in arms.iter().enumerate() {
            let mut bindings = Bindings::new();
            match self.tuple_into(arm, tuple, &mut bindings)? {
                Ok(()) => {
                    return Ok(Some(ArmMatch {
                        arm: index,
                        bindings,
                    }))
                }
                Err(failure) => trace!(arm = index, ?failure, "match arm fell through"),
            }
        }
        Ok(None)
    }

    /// Match a pattern against a layout alone, binding names to slots.
    ///
    /// Literal and nested tuple sub-patterns are accepted without inspection;
    /// only the outer shape is checked.
    pub fn match_layout<L>(
        &self,
        pattern: &TuplePattern<L>,
        layout: &Layout,
    ) -> Result<MatchOutcome<SlotBinding>, PatternError> {
        pattern.validate()?;
        Ok(Self::layout_into(pattern, layout).into())
    }

    fn layout_into<L>(
        pattern: &TuplePattern<L>,
        layout: &Layout,
    ) -> Result<Bindings<SlotBinding>, MatchFailure> {
        check_tag(pattern, layout.tag())?;
        let plan = PositionalPlan::new(pattern, layout.positional_count())?;
        let mut bindings = Bindings::new();

        for (i, sub) in pattern.positional.iter().enumerate() {
            match (sub, plan.value_index(i)) {
                (PositionalPattern::Rest(Some(name)), _) => {
                    bindings.bind(*name, SlotBinding::PositionalRest(plan.rest.clone()));
                }
                (PositionalPattern::Pattern(Pattern::Bind(name)), Some(slot)) => {
                    bindings.bind(*name, SlotBinding::Slot(slot));
                }
                _ => {}
            }
        }

        for (key, field) in &pattern.fields {
            let slot = layout
                .slot_of(*key)
                .ok_or(MatchFailure::MissingField { field: *key })?;
            match field {
                FieldPattern::Shorthand => bindings.bind(*key, SlotBinding::Slot(slot)),
                FieldPattern::Pattern(Pattern::Bind(name)) => {
                    bindings.bind(*name, SlotBinding::Slot(slot));
                }
                FieldPattern::Pattern(_) => {}
            }
        }

        if let Some(name) = pattern.named_rest {
            let rest = unmentioned_fields(pattern, layout);
            bindings.bind(name, SlotBinding::NamedRest(rest.into_vec().into_boxed_slice()));
        }
        Ok(bindings)
    }

    // The outer `Result` carries malformed-capture errors; the inner one is
    // the ordinary match outcome.
    fn tuple_into<T, L>(
        &self,
        pattern: &TuplePattern<L>,
        tuple: &Tuple<T>,
        bindings: &mut Bindings<T>,
    ) -> Result<Result<(), MatchFailure>, PatternError>
    where
        T: Destructure + Clone + PartialEq<L>,
    {
        if let Err(failure) = check_tag(pattern, tuple.tag()) {
            return Ok(Err(failure));
        }
        let plan = match PositionalPlan::new(pattern, tuple.positional_count()) {
            Ok(plan) => plan,
            Err(failure) => return Ok(Err(failure)),
        };

        for (i, sub) in pattern.positional.iter().enumerate() {
            match sub {
                PositionalPattern::Rest(None) => {}
                PositionalPattern::Rest(Some(name)) => {
                    let rest = tuple.slice_positional(plan.rest.clone(), self.cache)?;
                    bindings.bind(*name, T::from_tuple(rest));
                }
                PositionalPattern::Pattern(sub_pattern) => {
                    let Some(value) = plan.value_index(i).and_then(|index| tuple.at(index)) else {
                        continue;
                    };
                    if let Err(failure) = self.pattern_into(sub_pattern, value, bindings)? {
                        return Ok(Err(failure));
                    }
                }
            }
        }

        for (key, field) in &pattern.fields {
            let Some(value) = tuple.field(*key) else {
                return Ok(Err(MatchFailure::MissingField { field: *key }));
            };
            let result = match field {
                FieldPattern::Shorthand => {
                    bindings.bind(*key, value.clone());
                    Ok(())
                }
                FieldPattern::Pattern(sub_pattern) => self.pattern_into(sub_pattern, value, bindings)?,
            };
            if result.is_err() {
                return Ok(result);
            }
        }

        if let Some(name) = pattern.named_rest {
            let rest = unmentioned_fields(pattern, tuple.layout());
            let captured = tuple.project_named(&rest, self.cache)?;
            bindings.bind(name, T::from_tuple(captured));
        }
        Ok(Ok(()))
    }

    fn pattern_into<T, L>(
        &self,
        pattern: &Pattern<L>,
        value: &T,
        bindings: &mut Bindings<T>,
    ) -> Result<Result<(), MatchFailure>, PatternError>
    where
        T: Destructure + Clone + PartialEq<L>,
    {
        match pattern {
            Pattern::Wildcard => Ok(Ok(())),
            Pattern::Bind(name) => {
                bindings.bind(*name, value.clone());
                Ok(Ok(()))
            }
            Pattern::Literal(literal) if value == literal => Ok(Ok(())),
            Pattern::Literal(_) => Ok(Err(MatchFailure::LiteralMismatch)),
            Pattern::Tuple(inner) => match value.as_tuple() {
                Some(tuple) => self.tuple_into(inner, tuple, bindings),
                None => Ok(Err(MatchFailure::NotATuple)),
            },
        }
    }
}
