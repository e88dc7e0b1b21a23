//! Pattern syntax tree.

use vamp_ir::Symbol;

use crate::PatternError;

/// A destructuring pattern, generic over the literal representation `L`.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern<L> {
    /// `_`
    Wildcard,
    /// `name`, binds the whole value.
    Bind(Symbol),
    /// A literal the value must equal.
    Literal(L),
    /// A nested tuple pattern.
    Tuple(TuplePattern<L>),
}

/// One positional sub-pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionalPattern<L> {
    /// An ordinary sub-pattern.
    Pattern(Pattern<L>),
    /// `...` or `...name`: the positional values not matched by the others.
    Rest(Option<Symbol>),
}

/// The right-hand side of a named sub-pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldPattern<L> {
    /// `key:`, binds the field's value to a local named `key`.
    Shorthand,
    /// `key: pattern`
    Pattern(Pattern<L>),
}

/// Tag constraint on a tuple pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagRequirement {
    /// The value must carry exactly this tag.
    Tag(Symbol),
    /// The value must carry no tag.
    Untagged,
}

impl TagRequirement {
    /// Check a value's tag against this requirement.
    pub fn accepts(self, tag: Option<Symbol>) -> bool {
        match self {
            TagRequirement::Tag(expected) => tag == Some(expected),
            TagRequirement::Untagged => tag.is_none(),
        }
    }

    /// The tag this requirement demands, `None` for `Untagged`.
    pub fn expected(self) -> Option<Symbol> {
        match self {
            TagRequirement::Tag(tag) => Some(tag),
            TagRequirement::Untagged => None,
        }
    }
}

/// Pattern over a tuple: `Tag(p0, p1, ...rest, x:, y: p, ...others)`.
///
/// Without a tag requirement, any tag (or none) is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct TuplePattern<L> {
    pub tag: Option<TagRequirement>,
    pub positional: Vec<PositionalPattern<L>>,
    pub fields: Vec<(Symbol, FieldPattern<L>)>,
    /// Captures named fields the pattern does not mention.
    pub named_rest: Option<Symbol>,
}

impl<L> TuplePattern<L> {
    /// An empty pattern: matches only tuples with no positional members.
    pub fn new() -> Self {
        TuplePattern {
            tag: None,
            positional: Vec::new(),
            fields: Vec::new(),
            named_rest: None,
        }
    }

    #[must_use]
    pub fn tagged(mut self, tag: Symbol) -> Self {
        self.tag = Some(TagRequirement::Tag(tag));
        self
    }

    #[must_use]
    pub fn untagged(mut self) -> Self {
        self.tag = Some(TagRequirement::Untagged);
        self
    }

    #[must_use]
    pub fn positional(mut self, pattern: Pattern<L>) -> Self {
        self.positional.push(PositionalPattern::Pattern(pattern));
        self
    }

    /// Append `...` (or `...name` when `name` is given).
    #[must_use]
    pub fn rest(mut self, name: Option<Symbol>) -> Self {
        self.positional.push(PositionalPattern::Rest(name));
        self
    }

    /// Append `key:`.
    #[must_use]
    pub fn shorthand(mut self, key: Symbol) -> Self {
        self.fields.push((key, FieldPattern::Shorthand));
        self
    }

    /// Append `key: pattern`.
    #[must_use]
    pub fn field(mut self, key: Symbol, pattern: Pattern<L>) -> Self {
        self.fields.push((key, FieldPattern::Pattern(pattern)));
        self
    }

    /// Capture all unmentioned named fields as `name`.
    #[must_use]
    pub fn named_rest(mut self, name: Symbol) -> Self {
        self.named_rest = Some(name);
        self
    }

    /// Position of the positional rest marker, if any.
    pub fn rest_position(&self) -> Option<usize> {
        self.positional
            .iter()
            .position(|p| matches!(p, PositionalPattern::Rest(_)))
    }

    /// Number of positional sub-patterns excluding the rest marker.
    pub fn fixed_positional_count(&self) -> usize {
        self.positional
            .iter()
            .filter(|p| matches!(p, PositionalPattern::Pattern(_)))
            .count()
    }

    /// Reject patterns with more than one positional rest marker, at any depth.
    pub fn validate(&self) -> Result<(), PatternError> {
        let mut first = None;
        for (i, sub) in self.positional.iter().enumerate() {
            match sub {
                PositionalPattern::Rest(_) => match first {
                    Some(first) => return Err(PatternError::MultipleRest { first, second: i }),
                    None => first = Some(i),
                },
                PositionalPattern::Pattern(pattern) => pattern.validate()?,
            }
        }
        for (_, field) in &self.fields {
            if let FieldPattern::Pattern(pattern) = field {
                pattern.validate()?;
            }
        }
        Ok(())
    }
}

impl<L> Default for TuplePattern<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Pattern<L> {
    /// Validate nested tuple patterns.
    pub fn validate(&self) -> Result<(), PatternError> {
        match self {
            Pattern::Tuple(tuple) => tuple.validate(),
            Pattern::Wildcard | Pattern::Bind(_) | Pattern::Literal(_) => Ok(()),
        }
    }
}

impl<L> From<TuplePattern<L>> for Pattern<L> {
    fn from(pattern: TuplePattern<L>) -> Self {
        Pattern::Tuple(pattern)
    }
}
