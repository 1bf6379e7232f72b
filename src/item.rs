//! Assembled items.
//!
//! An `Item` is the output of the assembler: a base item plus an optional
//! unique or set template or a set of affixes, the per-property breakdown,
//! the aggregated stat list, and rolled attributes.

use crate::catalog::Catalog;
use crate::code::Code;
use crate::drop::DropModifier;
use crate::error::ItemError;
use crate::resolved::ResolvedProperty;
use crate::stat_list::StatList;

/// A damage range with the bonuses applied by item properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
    pub bonus_min: i32,
    pub bonus_max: i32,
    /// Percent enhancement applied to the base range.
    pub enhance_percent: i32,
}

impl DamageRange {
    /// Final `(min, max)` after enhancement and flat bonuses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lootstat::item::DamageRange;
    ///
    /// let damage = DamageRange { min: 2, max: 10, bonus_min: 1, bonus_max: 3, enhance_percent: 50 };
    /// assert_eq!(damage.effective(), (4, 18));
    /// ```
    pub fn effective(&self) -> (i32, i32) {
        let percent = self.enhance_percent.saturating_add(100);
        let scale = |value: i32| value.saturating_mul(percent) / 100;
        (
            scale(self.min).saturating_add(self.bonus_min),
            scale(self.max).saturating_add(self.bonus_max),
        )
    }
}

/// Rolled and derived item attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAttributes {
    pub level: i32,
    pub required_level: i32,
    pub defense: i32,
    pub damage: DamageRange,
    pub durability: i32,
    pub sockets: usize,
    pub ethereal: bool,
    pub indestructible: bool,
}

/// A fully assembled item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) base: Code,
    pub(crate) name: String,
    pub(crate) modifier: DropModifier,
    pub(crate) unique: Option<Code>,
    pub(crate) set_item: Option<Code>,
    pub(crate) prefixes: Vec<Code>,
    pub(crate) suffixes: Vec<Code>,
    pub(crate) properties: Vec<ResolvedProperty>,
    pub(crate) stats: StatList,
    pub(crate) attributes: ItemAttributes,
    pub(crate) socketed: Vec<Item>,
}

impl Item {
    /// The base item code.
    pub fn base(&self) -> &Code {
        &self.base
    }

    /// The localized display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drop_modifier(&self) -> DropModifier {
        self.modifier
    }

    pub fn unique(&self) -> Option<&Code> {
        self.unique.as_ref()
    }

    pub fn set_item(&self) -> Option<&Code> {
        self.set_item.as_ref()
    }

    pub fn prefixes(&self) -> &[Code] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[Code] {
        &self.suffixes
    }

    /// Per-property breakdown, in evaluation order.
    pub fn properties(&self) -> &[ResolvedProperty] {
        &self.properties
    }

    pub fn attributes(&self) -> &ItemAttributes {
        &self.attributes
    }

    /// The item's own stats, unreduced, in evaluation order.
    pub fn stat_list(&self) -> &StatList {
        &self.stats
    }

    pub fn socketed(&self) -> &[Item] {
        &self.socketed
    }

    pub fn socket_count(&self) -> usize {
        self.attributes.sockets
    }

    /// Place an item into the next free socket.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::SocketsFull` when every socket is taken.
    pub fn insert_socketed(&mut self, item: Item) -> Result<(), ItemError> {
        if self.socketed.len() >= self.attributes.sockets {
            return Err(ItemError::SocketsFull {
                code: self.base.clone(),
                capacity: self.attributes.sockets,
            });
        }
        tracing::debug!(item = %self.base, socketed = %item.base, "socketed item");
        self.socketed.push(item);
        Ok(())
    }

    /// The item's stats followed by the stats of everything socketed into it.
    pub fn full_stat_list(&self) -> StatList {
        let mut list = self.stats.clone();
        for socketed in &self.socketed {
            list.extend(socketed.full_stat_list());
        }
        list
    }

    /// Display lines: reduced, ordered by priority, non-printing stats dropped.
    pub fn stat_strings(&self, catalog: &Catalog) -> Vec<String> {
        self.full_stat_list()
            .reduce()
            .sorted_for_display()
            .descriptions(catalog)
    }
}
