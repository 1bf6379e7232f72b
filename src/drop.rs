//! Rarity and treasure rolls.
//!
//! Treasure classes are weighted tables. Rolling one means building a
//! cumulative table in declaration order, drawing a single integer below
//! the total, and taking the first bucket the draw falls under. Bucket
//! order is positional and never re-sorted.

use crate::catalog::{Catalog, Treasure, TreasureClassRecord};
use crate::code::Code;
use crate::error::ItemError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weight of the "no modifier" bucket in every rarity roll.
pub const BASE_MODIFIER_WEIGHT: i32 = 1024;

/// Item levels covered by a dynamic code such as `armo33`.
pub const DYNAMIC_LEVEL_RANGE: i32 = 3;

/// The rarity tier stamped on a generated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropModifier {
    #[default]
    None,
    Unique,
    Set,
    Rare,
    Magic,
}

/// Roll a rarity modifier from a treasure class.
///
/// Buckets are, in order: the base weight (no modifier), unique, set, rare
/// and magic frequencies.
///
/// # Examples
///
/// ```rust
/// use lootstat::drop::{roll_drop_modifier, DropModifier};
/// use lootstat::Catalog;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let catalog = Catalog::from_json(r#"{
///     "treasure_classes": [{ "code": "plain", "picks": 1, "treasures": [{ "code": "gld", "probability": 1 }] }]
/// }"#).unwrap();
/// let class = catalog.treasure_class("plain").unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// assert_eq!(roll_drop_modifier(class, &mut rng), DropModifier::None);
/// ```
pub fn roll_drop_modifier<R: Rng + ?Sized>(class: &TreasureClassRecord, rng: &mut R) -> DropModifier {
    let buckets = [
        (DropModifier::None, BASE_MODIFIER_WEIGHT),
        (DropModifier::Unique, class.freq_unique.max(0)),
        (DropModifier::Set, class.freq_set.max(0)),
        (DropModifier::Rare, class.freq_rare.max(0)),
        (DropModifier::Magic, class.freq_magic.max(0)),
    ];

    let total = buckets
        .iter()
        .fold(0i32, |sum, (_, weight)| sum.saturating_add(*weight));
    let roll = rng.gen_range(0..total);

    let mut ceiling = 0i32;
    for (modifier, weight) in buckets {
        ceiling = ceiling.saturating_add(weight);
        if roll < ceiling {
            tracing::trace!(class = %class.code, roll, ?modifier, "rolled drop modifier");
            return modifier;
        }
    }

    DropModifier::None
}

/// Roll one treasure pick.
///
/// Bucket 0 is the class's no-drop weight; the rest are its entries.
/// Returns `None` for a no-drop.
///
/// # Errors
///
/// * `ItemError::ZeroTreasureWeight` if the table has no weight
/// * `ItemError::ProbabilityExhausted` if the draw lands in no bucket
pub fn roll_treasure_pick<'a, R: Rng + ?Sized>(
    class: &'a TreasureClassRecord,
    rng: &mut R,
) -> Result<Option<&'a Treasure>, ItemError> {
    let total = class
        .treasures
        .iter()
        .fold(class.freq_no_drop.max(0), |sum, t| {
            sum.saturating_add(t.probability.max(0))
        });

    if total <= 0 {
        return Err(ItemError::ZeroTreasureWeight(class.code.clone()));
    }

    let roll = rng.gen_range(0..total);

    let mut ceiling = class.freq_no_drop.max(0);
    if roll < ceiling {
        return Ok(None);
    }

    for treasure in &class.treasures {
        ceiling = ceiling.saturating_add(treasure.probability.max(0));
        if roll < ceiling {
            return Ok(Some(treasure));
        }
    }

    Err(ItemError::ProbabilityExhausted {
        code: class.code.clone(),
        roll,
    })
}

/// Expand a treasure class into its picks.
///
/// With non-negative `picks`, the class is rolled that many times and
/// no-drops are skipped. With negative `picks`, nothing is rolled: entries
/// are taken in order, each repeated `probability` times, until `|picks|`
/// picks have been taken.
pub fn expand_picks<'a, R: Rng + ?Sized>(
    class: &'a TreasureClassRecord,
    rng: &mut R,
) -> Result<Vec<&'a Treasure>, ItemError> {
    let mut picks = Vec::new();

    if class.picks < 0 {
        let mut remaining = class.picks.unsigned_abs() as usize;
        for treasure in &class.treasures {
            let count = (treasure.probability.max(0) as usize).min(remaining);
            picks.extend(std::iter::repeat(treasure).take(count));
            remaining -= count;
            if remaining == 0 {
                break;
            }
        }
        return Ok(picks);
    }

    for _ in 0..class.picks {
        if let Some(treasure) = roll_treasure_pick(class, rng)? {
            picks.push(treasure);
        }
    }

    tracing::debug!(class = %class.code, picks = picks.len(), "expanded treasure picks");
    Ok(picks)
}

/// Base items matching a dynamic level code.
///
/// `armo23` matches armor-equivalent base items of level 23, 24 or 25.
///
/// # Examples
///
/// ```rust
/// use lootstat::drop::resolve_dynamic_code;
/// use lootstat::{Catalog, Code};
///
/// let catalog = Catalog::from_json(r#"{
///     "item_types": [{ "code": "armo" }],
///     "base_items": [
///         { "code": "a22", "name": "a22", "item_type": "armo", "level": 22 },
///         { "code": "a23", "name": "a23", "item_type": "armo", "level": 23 },
///         { "code": "a25", "name": "a25", "item_type": "armo", "level": 25 },
///         { "code": "a26", "name": "a26", "item_type": "armo", "level": 26 }
///     ]
/// }"#).unwrap();
///
/// let found = resolve_dynamic_code(&catalog, &Code::new("armo23"));
/// assert_eq!(found, vec![Code::new("a23"), Code::new("a25")]);
/// ```
pub fn resolve_dynamic_code(catalog: &Catalog, code: &Code) -> Vec<Code> {
    let (item_type, min_level) = code.split_level();
    let max_level = min_level.saturating_add(DYNAMIC_LEVEL_RANGE);

    catalog
        .equivalents(&item_type)
        .iter()
        .filter(|base| {
            catalog
                .base_item(base.as_str())
                .map(|record| record.level >= min_level && record.level < max_level)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Resolve a non-class treasure code to a base item.
///
/// Tried in order: an exact base item code, an item type (uniform pick
/// among its equivalent base items), then a dynamic level code (uniform
/// pick among matches). Returns `None` if nothing matches.
pub fn resolve_treasure_item<R: Rng + ?Sized>(
    catalog: &Catalog,
    code: &Code,
    rng: &mut R,
) -> Option<Code> {
    if catalog.contains_base_item(code.as_str()) {
        return Some(code.clone());
    }

    let equivalents = catalog.equivalents(code.as_str());
    if !equivalents.is_empty() {
        return Some(equivalents[rng.gen_range(0..equivalents.len())].clone());
    }

    let matches = resolve_dynamic_code(catalog, code);
    if matches.is_empty() {
        tracing::warn!(code = %code, "treasure code resolves to no item");
        return None;
    }
    Some(matches[rng.gen_range(0..matches.len())].clone())
}
