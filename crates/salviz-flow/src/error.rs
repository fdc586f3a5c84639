//! Error types for flow graph construction and layout

use crate::graph::Tier;

/// Flow graph and layout errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    /// An edge references a node index past the end of the arena
    #[error("node index {0} out of range")]
    NodeOutOfRange(usize),

    /// An edge skips a tier, stays within one, or points backwards
    #[error("edge {from} -> {to} does not connect adjacent tiers")]
    NonAdjacentTiers {
        /// Source node index
        from: usize,
        /// Target node index
        to: usize,
    },

    /// Lookup of a category that was never added to its tier
    #[error("no {tier} node named `{name}`")]
    UnknownNode {
        /// Tier searched
        tier: Tier,
        /// Category label searched for
        name: String,
    },

    /// The same category was added to one tier twice
    #[error("duplicate {tier} node `{name}`")]
    DuplicateNode {
        /// Tier of the duplicate
        tier: Tier,
        /// Category label
        name: String,
    },

    /// Layout geometry is unusable
    #[error("invalid layout configuration: {0}")]
    InvalidLayout(String),
}
