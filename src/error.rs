//! Error types for item generation and stat resolution.
//!
//! Configuration and resolution failures are represented by `ItemError`.
//! Failed stat merges are represented by `CombineError`, which callers
//! treat as "keep both stats" rather than as a fatal condition.

use crate::code::Code;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[Code]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_codes(codes: &[Code]) -> String {
    codes
        .iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while loading a catalog or generating items.
///
/// # Examples
///
/// ```rust
/// use lootstat::{Code, ItemError};
///
/// let err = ItemError::MissingStat(Code::new("strength"));
/// assert_eq!(err.to_string(), "Missing stat record: strength");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemError {
    /// Treasure classes reference each other in a loop.
    ///
    /// The path closes on its first entry, e.g. `[A, B, A]`.
    #[error("Treasure class cycle detected: {}", format_cycle_path(.path))]
    TreasureCycle { path: Vec<Code> },

    /// Runtime recursion through nested treasure classes went too deep.
    #[error("Treasure class {code} exceeded the maximum nesting depth of {max_depth}")]
    TreasureDepthExceeded { code: Code, max_depth: usize },

    /// A treasure class has no weight to roll against.
    #[error("Treasure class {0} has zero total weight")]
    ZeroTreasureWeight(Code),

    /// A treasure class's weights sum past what a roll can draw from.
    #[error("Treasure class {0} has a total weight too large to roll")]
    TreasureWeightOverflow(Code),

    /// A weight that must be positive is negative.
    #[error("Treasure class {class} has a negative weight for {entry}")]
    NegativeTreasureWeight { class: Code, entry: Code },

    /// A roll fell outside every bucket of a cumulative table.
    #[error("Roll {roll} fell outside every bucket of {code}")]
    ProbabilityExhausted { code: Code, roll: i32 },

    /// A referenced treasure class is not in the catalog.
    #[error("Missing treasure class: {0}")]
    MissingTreasureClass(Code),

    /// A referenced stat is not in the catalog.
    #[error("Missing stat record: {0}")]
    MissingStat(Code),

    /// A referenced property is not in the catalog.
    #[error("Missing property record: {0}")]
    MissingProperty(Code),

    /// A referenced base item is not in the catalog.
    #[error("Missing base item: {0}")]
    MissingBaseItem(Code),

    /// A referenced item type is not in the catalog.
    #[error("Missing item type: {0}")]
    MissingItemType(Code),

    /// A referenced unique template is not in the catalog.
    #[error("Missing unique item: {0}")]
    MissingUnique(Code),

    /// A referenced set item template is not in the catalog.
    #[error("Missing set item: {0}")]
    MissingSetItem(Code),

    /// A referenced prefix or suffix is not in the catalog.
    #[error("Missing affix: {0}")]
    MissingAffix(Code),

    /// None of the given codes names a base item.
    #[error("No base item among codes: [{}]", format_codes(.0))]
    NoBaseItem(Vec<Code>),

    /// Two records of the same kind share a code.
    #[error("Duplicate {kind} code: {code}")]
    DuplicateCode { kind: &'static str, code: Code },

    /// A property declares more effect slots than an evaluator supports.
    #[error("Property {code} declares {count} effects (max {max})")]
    TooManyEffects { code: Code, count: usize, max: usize },

    /// An item was given more affixes of one kind than it can hold.
    #[error("Too many {kind} affixes: {count} (max {max})")]
    TooManyAffixes { kind: &'static str, count: usize, max: usize },

    /// A socket insert was attempted on a full item.
    #[error("Item {code} has no free socket ({capacity} total)")]
    SocketsFull { code: Code, capacity: usize },

    /// The catalog JSON could not be parsed.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(String),
}

/// Reasons two stats refuse to merge.
///
/// Combination failures are expected during reduction: two stats that
/// share a name but differ in a static value (different hero class,
/// different skill) stay as separate entries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CombineError {
    /// The stats have different names.
    #[error("cannot combine {left} with {right}")]
    NameMismatch { left: Code, right: Code },

    /// The stats hold a different number of values.
    #[error("cannot combine {name}: {left} values vs {right} values")]
    ArityMismatch {
        name: Code,
        left: usize,
        right: usize,
    },

    /// Values at the same index differ in number type or combine rule.
    #[error("cannot combine {name}: value {index} has a different shape")]
    ShapeMismatch { name: Code, index: usize },

    /// Static values at the same index hold different content.
    #[error("cannot combine {name}: static value {index} differs")]
    StaticMismatch { name: Code, index: usize },
}
