//! Stat value module.
//!
//! A `StatValue` is one typed numeric slot of a stat: an integer or a
//! float, plus the rule that decides how two slots merge.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The numeric type held by a stat value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    #[default]
    Int,
    Float,
}

/// How a value slot behaves when two stats are combined.
///
/// `Sum` slots are added together. `Static` slots identify the stat
/// (a hero class, a skill index, a monster id) and must hold equal
/// content for a merge to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineRule {
    #[default]
    Sum,
    Static,
}

/// The declared shape of one value slot in a stat record.
///
/// # Examples
///
/// ```rust
/// use lootstat::value::{CombineRule, NumberType, ValueLayout};
///
/// let layout: ValueLayout = serde_json::from_str(r#"{"number": "float"}"#).unwrap();
/// assert_eq!(layout.number, NumberType::Float);
/// assert_eq!(layout.combine, CombineRule::Sum);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValueLayout {
    #[serde(default)]
    pub number: NumberType,
    #[serde(default)]
    pub combine: CombineRule,
}

impl ValueLayout {
    /// An integer slot that sums on merge.
    pub const SUM: ValueLayout = ValueLayout {
        number: NumberType::Int,
        combine: CombineRule::Sum,
    };

    /// An integer slot that must match on merge.
    pub const STATIC: ValueLayout = ValueLayout {
        number: NumberType::Int,
        combine: CombineRule::Static,
    };
}

/// The raw content of a value slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Int(i32),
    Float(f32),
}

/// A single typed numeric slot of a stat.
///
/// # Examples
///
/// ```rust
/// use lootstat::value::{StatValue, ValueLayout};
///
/// let a = StatValue::new(ValueLayout::SUM, 25);
/// let b = StatValue::new(ValueLayout::SUM, 5);
/// assert_eq!(a.merged_with(&b).as_int(), 30);
/// assert_eq!(a.to_string(), "25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    number: Number,
    combine: CombineRule,
}

impl StatValue {
    /// Create a value slot of the given layout from a raw integer.
    pub fn new(layout: ValueLayout, raw: i32) -> Self {
        let number = match layout.number {
            NumberType::Int => Number::Int(raw),
            NumberType::Float => Number::Float(raw as f32),
        };
        Self {
            number,
            combine: layout.combine,
        }
    }

    /// Create a float slot directly.
    pub fn float(value: f32, combine: CombineRule) -> Self {
        Self {
            number: Number::Float(value),
            combine,
        }
    }

    pub fn number(&self) -> Number {
        self.number
    }

    pub fn number_type(&self) -> NumberType {
        match self.number {
            Number::Int(_) => NumberType::Int,
            Number::Float(_) => NumberType::Float,
        }
    }

    pub fn combine_rule(&self) -> CombineRule {
        self.combine
    }

    /// The value as an integer. Floats are truncated toward zero.
    pub fn as_int(&self) -> i32 {
        match self.number {
            Number::Int(v) => v,
            Number::Float(v) => v as i32,
        }
    }

    pub fn as_float(&self) -> f32 {
        match self.number {
            Number::Int(v) => v as f32,
            Number::Float(v) => v,
        }
    }

    /// Returns `true` if both slots have the same number type and combine rule.
    pub fn same_shape(&self, other: &StatValue) -> bool {
        self.number_type() == other.number_type() && self.combine == other.combine
    }

    /// Merge two slots of the same shape.
    ///
    /// `Sum` slots add (integers saturate); `Static` slots keep `self`.
    /// Callers check `same_shape` (and static equality) first.
    pub fn merged_with(&self, other: &StatValue) -> StatValue {
        if self.combine == CombineRule::Static {
            return *self;
        }

        let number = match (self.number, other.number) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.saturating_add(b)),
            (Number::Float(a), Number::Float(b)) => Number::Float(a + b),
            (Number::Int(a), Number::Float(b)) => Number::Int(a.saturating_add(b as i32)),
            (Number::Float(a), Number::Int(b)) => Number::Float(a + b as f32),
        };

        StatValue {
            number,
            combine: self.combine,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{:.2}", v),
        }
    }
}
