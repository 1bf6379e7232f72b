//! The item generator.
//!
//! `ItemGenerator` owns the random source and drives the whole pipeline:
//! treasure class expansion, rarity rolls, template and affix selection,
//! and assembly. Two generators built with the same seed over the same
//! catalog produce the same items for the same call sequence.

use crate::assembler::{self, ItemSpec};
use crate::catalog::{AffixKind, Catalog, Treasure, TreasureClassRecord};
use crate::code::Code;
use crate::drop::{self, DropModifier};
use crate::error::ItemError;
use crate::item::Item;
use crate::property::{self, Evaluation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the generator's random source.
    pub seed: u64,

    /// Longest chain of nested treasure classes a roll may follow.
    pub max_treasure_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_treasure_depth: 32,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// A treasure pick waiting for its rarity.
enum Pending {
    Nested(Vec<Item>),
    Base(Code),
}

/// Rolls and assembles items from a catalog.
///
/// # Examples
///
/// ```rust
/// use lootstat::{Catalog, GeneratorConfig, ItemGenerator};
///
/// let catalog = Catalog::from_json(r#"{
///     "item_types": [{ "code": "ring" }],
///     "base_items": [{ "code": "rin", "name": "Ring", "item_type": "ring" }],
///     "treasure_classes": [{ "code": "Rings", "picks": 2,
///                            "treasures": [{ "code": "ring", "probability": 1 }] }]
/// }"#).unwrap();
///
/// let mut generator = ItemGenerator::new(&catalog, GeneratorConfig::with_seed(9));
/// let items = generator.items_from_treasure_class("Rings").unwrap();
/// assert_eq!(items.len(), 2);
/// assert!(items.iter().all(|item| item.base().as_str() == "rin"));
/// ```
pub struct ItemGenerator<'c, R = ChaCha8Rng> {
    catalog: &'c Catalog,
    config: GeneratorConfig,
    rng: R,
}

impl<'c> ItemGenerator<'c, ChaCha8Rng> {
    /// Create a generator seeded from `config.seed`.
    pub fn new(catalog: &'c Catalog, config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(catalog, config, rng)
    }
}

impl<'c, R: Rng> ItemGenerator<'c, R> {
    /// Create a generator over an existing random source.
    pub fn with_rng(catalog: &'c Catalog, config: GeneratorConfig, rng: R) -> Self {
        Self {
            catalog,
            config,
            rng,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Roll every pick of a treasure class, following nested classes.
    ///
    /// # Errors
    ///
    /// * `ItemError::MissingTreasureClass` if `code` is not a treasure class
    /// * `ItemError::TreasureDepthExceeded` if nesting goes deeper than
    ///   `max_treasure_depth`
    /// * any error raised while rolling or assembling a pick
    pub fn items_from_treasure_class(&mut self, code: &str) -> Result<Vec<Item>, ItemError> {
        let catalog = self.catalog;
        let class = catalog
            .treasure_class(code)
            .ok_or_else(|| ItemError::MissingTreasureClass(Code::new(code)))?;
        self.expand_class(class, 1)
    }

    fn expand_class(
        &mut self,
        class: &'c TreasureClassRecord,
        depth: usize,
    ) -> Result<Vec<Item>, ItemError> {
        if depth > self.config.max_treasure_depth {
            return Err(ItemError::TreasureDepthExceeded {
                code: class.code.clone(),
                max_depth: self.config.max_treasure_depth,
            });
        }

        let catalog = self.catalog;
        let picks = drop::expand_picks(class, &mut self.rng)?;

        let mut pending = Vec::with_capacity(picks.len());
        for treasure in picks {
            if let Some(nested) = catalog.treasure_class(treasure.code.as_str()) {
                pending.push(Pending::Nested(self.expand_class(nested, depth + 1)?));
            } else if let Some(base) =
                drop::resolve_treasure_item(catalog, &treasure.code, &mut self.rng)
            {
                pending.push(Pending::Base(base));
            }
        }

        let has_items = pending.iter().any(|p| matches!(p, Pending::Base(_)));
        let modifier = if has_items {
            drop::roll_drop_modifier(class, &mut self.rng)
        } else {
            DropModifier::None
        };

        let mut items = Vec::new();
        for pick in pending {
            match pick {
                Pending::Nested(nested) => items.extend(nested),
                Pending::Base(base) => {
                    let spec = assembler::apply_drop_modifier(catalog, &base, modifier, &mut self.rng)?;
                    items.push(assembler::assemble(catalog, &spec, &mut self.rng)?);
                }
            }
        }

        tracing::debug!(
            class = %class.code,
            depth,
            items = items.len(),
            ?modifier,
            "rolled treasure class"
        );
        Ok(items)
    }

    /// Resolve one non-class treasure entry to a plain item.
    ///
    /// Returns `Ok(None)` when the code matches no base item.
    pub fn item_from_treasure(&mut self, treasure: &Treasure) -> Result<Option<Item>, ItemError> {
        let catalog = self.catalog;
        match drop::resolve_treasure_item(catalog, &treasure.code, &mut self.rng) {
            Some(base) => {
                let spec = ItemSpec::new(base.as_str());
                assembler::assemble(catalog, &spec, &mut self.rng).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Assemble an item from an explicit spec.
    pub fn assemble_item(&mut self, spec: &ItemSpec) -> Result<Item, ItemError> {
        assembler::assemble(self.catalog, spec, &mut self.rng)
    }

    /// Build an item from a bag of codes.
    ///
    /// Each code is classified as a base item, set item, unique, prefix or
    /// suffix, in that order of precedence. Unrecognized codes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::NoBaseItem` if none of the codes is a base item.
    pub fn new_item(&mut self, codes: &[&str]) -> Result<Item, ItemError> {
        let catalog = self.catalog;
        let mut base = None;
        let mut set_item = None;
        let mut unique = None;
        let mut prefixes = Vec::new();
        let mut suffixes = Vec::new();

        for &code in codes {
            if catalog.contains_base_item(code) {
                base = Some(code);
            } else if catalog.contains_set_item(code) {
                set_item = Some(code);
            } else if catalog.contains_unique(code) {
                unique = Some(code);
            } else if catalog.contains_affix(AffixKind::Prefix, code) {
                prefixes.push(Code::new(code));
            } else if catalog.contains_affix(AffixKind::Suffix, code) {
                suffixes.push(Code::new(code));
            } else {
                tracing::warn!(code, "ignoring unrecognized item code");
            }
        }

        let base = base.ok_or_else(|| {
            ItemError::NoBaseItem(codes.iter().map(|code| Code::new(code)).collect())
        })?;

        let mut spec = ItemSpec::new(base);
        spec.modifier = if let Some(code) = set_item {
            spec.set_item = Some(Code::new(code));
            DropModifier::Set
        } else if let Some(code) = unique {
            spec.unique = Some(Code::new(code));
            DropModifier::Unique
        } else if prefixes.len() > 1 || suffixes.len() > 1 {
            DropModifier::Rare
        } else if !prefixes.is_empty() || !suffixes.is_empty() {
            DropModifier::Magic
        } else {
            DropModifier::None
        };
        if spec.modifier != DropModifier::Set && spec.modifier != DropModifier::Unique {
            spec.prefixes = prefixes;
            spec.suffixes = suffixes;
        }

        self.assemble_item(&spec)
    }

    /// Evaluate a single property by code, outside of any item.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::MissingProperty` for an unknown code and
    /// `ItemError::MissingStat` if the property names an unknown stat.
    pub fn evaluate_property(&mut self, code: &str, args: &[i32]) -> Result<Evaluation, ItemError> {
        let record = self.catalog.property(code)?;
        property::evaluate(self.catalog, record, args, &mut self.rng)
    }
}
