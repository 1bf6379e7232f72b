//! Resolved property breakdown.
//!
//! Each evaluated property of an item is kept as a `ResolvedProperty`,
//! recording which record contributed it and what it produced. The
//! breakdown is what the item's stat list is built from.

use crate::code::Code;
use crate::property::{Evaluation, PropertyFn, SideEffect};
use crate::source::SourceKind;
use crate::stat::Stat;

/// One evaluated property with its origin.
///
/// # Examples
///
/// ```rust
/// use lootstat::resolved::ResolvedProperty;
/// use lootstat::source::SourceKind;
/// use lootstat::Code;
///
/// let resolved = ResolvedProperty::new(SourceKind::Prefix, Code::new("Sturdy"), Code::new("ac%"));
/// assert_eq!(resolved.label(), "prefix Sturdy: ac%");
/// assert!(resolved.stats.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    /// The kind of record that contributed the property.
    pub source: SourceKind,

    /// The contributing record's code.
    pub source_code: Code,

    /// The property code.
    pub property: Code,

    /// Stats produced, in effect-slot order.
    pub stats: Vec<Stat>,

    /// Non-printing outputs, in effect-slot order.
    pub side_effects: Vec<SideEffect>,
}

impl ResolvedProperty {
    pub fn new(source: SourceKind, source_code: Code, property: Code) -> Self {
        Self {
            source,
            source_code,
            property,
            stats: Vec::new(),
            side_effects: Vec::new(),
        }
    }

    /// Attach the output of an evaluation.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.stats = evaluation.stats;
        self.side_effects = evaluation.side_effects;
        self
    }

    /// Human-readable origin, e.g. `unique Nagelring: oskill`.
    pub fn label(&self) -> String {
        let kind = match self.source {
            SourceKind::Base => "base",
            SourceKind::Unique => "unique",
            SourceKind::SetItem => "set item",
            SourceKind::Prefix => "prefix",
            SourceKind::Suffix => "suffix",
        };
        format!("{} {}: {}", kind, self.source_code, self.property)
    }

    /// Integer side effects produced by the given function.
    pub fn integers(&self, func: PropertyFn) -> impl Iterator<Item = i32> + '_ {
        self.side_effects.iter().filter_map(move |side| match side {
            SideEffect::Integer { func: f, value } if *f == func => Some(*value),
            _ => None,
        })
    }

    /// Whether any flag side effect of the given function rolled true.
    pub fn flag(&self, func: PropertyFn) -> bool {
        self.side_effects.iter().any(|side| {
            matches!(side, SideEffect::Flag { func: f, value: true } if *f == func)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_effect_queries() {
        let evaluation = Evaluation {
            stats: Vec::new(),
            side_effects: vec![
                SideEffect::Integer {
                    func: PropertyFn::DamageMin,
                    value: 3,
                },
                SideEffect::Integer {
                    func: PropertyFn::DamageMax,
                    value: 8,
                },
                SideEffect::Flag {
                    func: PropertyFn::Ethereal,
                    value: true,
                },
                SideEffect::Flag {
                    func: PropertyFn::Indestructible,
                    value: false,
                },
            ],
        };
        let resolved = ResolvedProperty::new(SourceKind::Unique, Code::new("Bul-Kathos"), Code::new("dmg"))
            .with_evaluation(evaluation);

        assert_eq!(resolved.integers(PropertyFn::DamageMin).collect::<Vec<_>>(), vec![3]);
        assert_eq!(resolved.integers(PropertyFn::DamageMax).sum::<i32>(), 8);
        assert!(resolved.flag(PropertyFn::Ethereal));
        assert!(!resolved.flag(PropertyFn::Indestructible));
    }
}
