//! Tuple type compatibility policies.
//!
//! Both are open choices in the language design; the defaults are the
//! strictest reading and the alternatives are opt-in through compiler
//! configuration.

use serde::{Deserialize, Serialize};

/// Whether an untagged tuple type may stand for a tagged one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagPolicy {
    /// Tags must be equal, including both absent.
    #[default]
    Exact,
    /// An untagged supertype accepts a subtype with any tag.
    UntaggedAcceptsAny,
}

/// Whether a subtype may carry named fields the supertype lacks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidthPolicy {
    /// Named field sets must be equal.
    #[default]
    Exact,
    /// Width subtyping: extra named fields on the subtype are allowed.
    Extensible,
}

/// Combined tuple policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuplePolicy {
    pub tags: TagPolicy,
    pub width: WidthPolicy,
}

impl TagPolicy {
    /// Check a subtype's tag against a supertype's.
    pub fn accepts(self, sub: Option<vamp_ir::Symbol>, sup: Option<vamp_ir::Symbol>) -> bool {
        match self {
            TagPolicy::Exact => sub == sup,
            TagPolicy::UntaggedAcceptsAny => sup.is_none() || sub == sup,
        }
    }
}
