//! Stat module.
//!
//! A `Stat` is one line of item text: a stat record plus its ordered
//! value slots. Stats are never edited in place; [`Stat::combine`]
//! returns a new stat.

use crate::catalog::{Catalog, StatRecord};
use crate::code::Code;
use crate::describe;
use crate::error::CombineError;
use crate::value::{CombineRule, StatValue};
use std::fmt;
use std::sync::Arc;

/// A resolved stat: a record and its values.
///
/// # Examples
///
/// ```rust
/// use lootstat::Catalog;
///
/// let catalog = Catalog::from_json(r#"{
///     "stats": [{ "name": "item_nonclassskill", "desc_fn": 28 }],
///     "skills": [{ "index": 64, "name": "Frozen Orb" }]
/// }"#).unwrap();
///
/// let a = catalog.new_stat("item_nonclassskill", &[25, 64]).unwrap();
/// let b = catalog.new_stat("item_nonclassskill", &[5, 64]).unwrap();
/// let c = a.combine(&b).unwrap();
///
/// assert_eq!(c.describe(&catalog), "+30 to Frozen Orb");
/// assert_eq!(a.describe(&catalog), "+25 to Frozen Orb");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    record: Arc<StatRecord>,
    values: Vec<StatValue>,
}

impl Stat {
    /// Build a stat by filling the record's value layout in order.
    ///
    /// Surplus raw values are dropped; missing ones are 0.
    pub fn new(record: Arc<StatRecord>, raw: &[i32]) -> Self {
        let values = record
            .value_layout()
            .into_iter()
            .enumerate()
            .map(|(idx, layout)| StatValue::new(layout, raw.get(idx).copied().unwrap_or(0)))
            .collect();

        Self { record, values }
    }

    /// Build a stat from already-typed values.
    pub fn from_values(record: Arc<StatRecord>, values: Vec<StatValue>) -> Self {
        Self { record, values }
    }

    pub fn name(&self) -> &Code {
        &self.record.name
    }

    pub fn record(&self) -> &StatRecord {
        &self.record
    }

    pub fn values(&self) -> &[StatValue] {
        &self.values
    }

    /// Display priority; higher prints first.
    pub fn priority(&self) -> i32 {
        self.record.desc_priority
    }

    /// Check whether `other` may merge into this stat.
    ///
    /// Requires the same name, the same number of values, the same shape at
    /// every index, and equal content in every static slot.
    pub fn check_combinable(&self, other: &Stat) -> Result<(), CombineError> {
        if self.name() != other.name() {
            return Err(CombineError::NameMismatch {
                left: self.name().clone(),
                right: other.name().clone(),
            });
        }

        if self.values.len() != other.values.len() {
            return Err(CombineError::ArityMismatch {
                name: self.name().clone(),
                left: self.values.len(),
                right: other.values.len(),
            });
        }

        for (index, (mine, theirs)) in self.values.iter().zip(&other.values).enumerate() {
            if !mine.same_shape(theirs) {
                return Err(CombineError::ShapeMismatch {
                    name: self.name().clone(),
                    index,
                });
            }
            if mine.combine_rule() == CombineRule::Static && mine.number() != theirs.number() {
                return Err(CombineError::StaticMismatch {
                    name: self.name().clone(),
                    index,
                });
            }
        }

        Ok(())
    }

    /// Merge two stats into a new one.
    ///
    /// Sum slots are added; static slots keep this stat's content.
    /// Neither operand is modified.
    pub fn combine(&self, other: &Stat) -> Result<Stat, CombineError> {
        self.check_combinable(other)?;

        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(mine, theirs)| mine.merged_with(theirs))
            .collect();

        Ok(Stat {
            record: Arc::clone(&self.record),
            values,
        })
    }

    /// Render this stat as item text. Non-printing stats render as "".
    pub fn describe(&self, catalog: &Catalog) -> String {
        describe::render(&self.record, &self.values, catalog)
    }

    /// A `Display` adapter that renders through the catalog.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> StatDisplay<'a> {
        StatDisplay {
            stat: self,
            catalog,
        }
    }
}

/// Renders a stat with `{}`.
pub struct StatDisplay<'a> {
    stat: &'a Stat,
    catalog: &'a Catalog,
}

impl fmt::Display for StatDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stat.describe(self.catalog))
    }
}
