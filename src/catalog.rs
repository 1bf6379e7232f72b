//! Catalog module.
//!
//! The catalog is the read-only configuration every resolution call reads:
//! stat and property records, item records, treasure classes, and the
//! reference tables the formatter uses for names. It is built once from a
//! [`CatalogData`] (usually parsed from JSON), validated, and then shared
//! by reference across generation sessions.

use crate::code::Code;
use crate::describe::{DescFn, DescValPosition};
use crate::drop::BASE_MODIFIER_WEIGHT;
use crate::error::ItemError;
use crate::graph::TreasureGraph;
use crate::property::PropertyFn;
use crate::stat::Stat;
use crate::value::ValueLayout;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The maximum number of effect slots in one property record.
pub const MAX_PROPERTY_EFFECTS: usize = 7;

/// How a resolved stat is shaped and described.
///
/// # Examples
///
/// ```rust
/// use lootstat::catalog::StatRecord;
/// use lootstat::describe::{DescFn, DescValPosition};
///
/// let record = StatRecord::new("strength", DescFn::Signed)
///     .with_position(DescValPosition::Prefix)
///     .with_strings("to Strength", "to Strength");
/// assert_eq!(record.value_layout().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatRecord {
    pub name: Code,
    #[serde(default)]
    pub desc_fn: DescFn,
    #[serde(default)]
    pub desc_val: DescValPosition,
    #[serde(default)]
    pub desc_str_pos: String,
    #[serde(default)]
    pub desc_str_neg: String,
    #[serde(default)]
    pub desc_str2: String,
    /// Higher priorities print first.
    #[serde(default)]
    pub desc_priority: i32,
    /// Explicit value layout; derived from `desc_fn` when absent.
    #[serde(default)]
    pub values: Option<Vec<ValueLayout>>,
}

impl StatRecord {
    pub fn new(name: &str, desc_fn: DescFn) -> Self {
        Self {
            name: Code::new(name),
            desc_fn,
            desc_val: DescValPosition::Hide,
            desc_str_pos: String::new(),
            desc_str_neg: String::new(),
            desc_str2: String::new(),
            desc_priority: 0,
            values: None,
        }
    }

    pub fn with_position(mut self, position: DescValPosition) -> Self {
        self.desc_val = position;
        self
    }

    pub fn with_strings(mut self, positive: &str, negative: &str) -> Self {
        self.desc_str_pos = positive.to_string();
        self.desc_str_neg = negative.to_string();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.desc_str2 = suffix.to_string();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.desc_priority = priority;
        self
    }

    pub fn with_layout(mut self, layout: Vec<ValueLayout>) -> Self {
        self.values = Some(layout);
        self
    }

    /// The value slots a stat of this record holds.
    pub fn value_layout(&self) -> Vec<ValueLayout> {
        match &self.values {
            Some(layout) => layout.clone(),
            None => self.desc_fn.default_layout(),
        }
    }
}

/// One effect slot of a property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyEffect {
    #[serde(default)]
    pub func: PropertyFn,
    /// The stat this effect produces, if any.
    #[serde(default)]
    pub stat: Option<Code>,
    /// Extra per-effect value (the hero class for class-skill effects).
    #[serde(default)]
    pub value: i32,
}

impl PropertyEffect {
    pub fn new(func: PropertyFn, stat: Option<&str>) -> Self {
        Self {
            func,
            stat: stat.map(Code::new),
            value: 0,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }
}

/// A declarative property: up to seven effect slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRecord {
    pub code: Code,
    #[serde(default)]
    pub effects: Vec<PropertyEffect>,
}

impl PropertyRecord {
    pub fn new(code: &str, effects: Vec<PropertyEffect>) -> Self {
        Self {
            code: Code::new(code),
            effects,
        }
    }
}

/// The parameter of a property reference.
///
/// Unique and set templates sometimes name a skill instead of giving its index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyParam {
    Index(i32),
    Name(String),
}

/// A property attached to an item source, with its argument range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRef {
    pub code: Code,
    #[serde(default)]
    pub param: Option<PropertyParam>,
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
}

impl PropertyRef {
    pub fn new(code: &str, min: i32, max: i32) -> Self {
        Self {
            code: Code::new(code),
            param: None,
            min,
            max,
        }
    }

    pub fn with_param(mut self, param: PropertyParam) -> Self {
        self.param = Some(param);
        self
    }
}

fn default_true() -> bool {
    true
}

/// An item type and its parent types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemTypeRecord {
    pub code: Code,
    #[serde(default)]
    pub equiv: Vec<Code>,
    /// Always drops without a rarity modifier.
    #[serde(default)]
    pub normal: bool,
    /// Always drops magic.
    #[serde(default)]
    pub magic: bool,
    /// May drop rare.
    #[serde(default = "default_true")]
    pub rare: bool,
}

/// A base item definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseItemRecord {
    pub code: Code,
    /// Localization key of the item name.
    pub name: String,
    pub item_type: Code,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub required_level: i32,
    #[serde(default)]
    pub min_ac: i32,
    #[serde(default)]
    pub max_ac: i32,
    #[serde(default)]
    pub min_damage: i32,
    #[serde(default)]
    pub max_damage: i32,
    #[serde(default)]
    pub durability: i32,
    #[serde(default)]
    pub sockets: usize,
    #[serde(default)]
    pub properties: Vec<PropertyRef>,
}

/// A unique item template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniqueRecord {
    pub code: Code,
    pub name: String,
    /// The base item this unique is built on.
    pub base: Code,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub properties: Vec<PropertyRef>,
}

/// A set item template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetItemRecord {
    pub code: Code,
    pub name: String,
    /// The set this item belongs to.
    pub set: Code,
    pub base: Code,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub properties: Vec<PropertyRef>,
}

/// A prefix or suffix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AffixRecord {
    pub code: Code,
    /// Text joined onto the item name.
    pub name: String,
    #[serde(default)]
    pub include: Vec<Code>,
    #[serde(default)]
    pub exclude: Vec<Code>,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub modifiers: Vec<PropertyRef>,
}

/// Prefix or suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One entry of a treasure class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Treasure {
    /// A base item, an item type, a dynamic level code or another treasure class.
    pub code: Code,
    /// Roll weight, or an exact repeat count when the class has negative picks.
    pub probability: i32,
}

/// A weighted loot table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreasureClassRecord {
    pub code: Code,
    #[serde(default)]
    pub picks: i32,
    #[serde(default)]
    pub freq_unique: i32,
    #[serde(default)]
    pub freq_set: i32,
    #[serde(default)]
    pub freq_rare: i32,
    #[serde(default)]
    pub freq_magic: i32,
    #[serde(default)]
    pub freq_no_drop: i32,
    #[serde(default)]
    pub treasures: Vec<Treasure>,
}

/// Skill text for one hero class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroClassRecord {
    pub name: String,
    #[serde(default)]
    pub skill_str_all: String,
    #[serde(default)]
    pub skill_str_class_only: String,
    #[serde(default)]
    pub skill_str_tab: [String; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillRecord {
    pub index: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonsterRecord {
    pub id: i32,
    pub name: String,
}

/// Raw catalog configuration, as loaded from JSON.
///
/// Hero classes are listed in index order; stats refer to them by position.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub stats: Vec<StatRecord>,
    pub properties: Vec<PropertyRecord>,
    pub item_types: Vec<ItemTypeRecord>,
    pub base_items: Vec<BaseItemRecord>,
    pub uniques: Vec<UniqueRecord>,
    pub set_items: Vec<SetItemRecord>,
    pub prefixes: Vec<AffixRecord>,
    pub suffixes: Vec<AffixRecord>,
    pub treasure_classes: Vec<TreasureClassRecord>,
    pub hero_classes: Vec<HeroClassRecord>,
    pub skills: Vec<SkillRecord>,
    pub monsters: Vec<MonsterRecord>,
    pub strings: BTreeMap<String, String>,
}

/// Index records by code, rejecting duplicates.
fn index_by_code<T, F>(
    kind: &'static str,
    records: Vec<T>,
    code_of: F,
) -> Result<BTreeMap<Code, T>, ItemError>
where
    F: Fn(&T) -> &Code,
{
    let mut map = BTreeMap::new();
    for record in records {
        let code = code_of(&record).clone();
        if map.contains_key(&code) {
            return Err(ItemError::DuplicateCode { kind, code });
        }
        map.insert(code, record);
    }
    Ok(map)
}

/// The validated, immutable configuration used by every resolution call.
///
/// # Examples
///
/// ```rust
/// use lootstat::Catalog;
///
/// let catalog = Catalog::from_json(r#"{
///     "stats": [{ "name": "strength", "desc_fn": 1, "desc_val": 1,
///                 "desc_str_pos": "to Strength", "desc_str_neg": "to Strength" }]
/// }"#).unwrap();
///
/// let stat = catalog.new_stat("strength", &[31]).unwrap();
/// assert_eq!(stat.describe(&catalog), "+31 to Strength");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    stats: BTreeMap<Code, Arc<StatRecord>>,
    properties: BTreeMap<Code, PropertyRecord>,
    item_types: BTreeMap<Code, ItemTypeRecord>,
    base_items: BTreeMap<Code, BaseItemRecord>,
    uniques: BTreeMap<Code, UniqueRecord>,
    set_items: BTreeMap<Code, SetItemRecord>,
    prefixes: BTreeMap<Code, AffixRecord>,
    suffixes: BTreeMap<Code, AffixRecord>,
    treasure_classes: BTreeMap<Code, TreasureClassRecord>,
    hero_classes: Vec<HeroClassRecord>,
    skills: BTreeMap<i32, SkillRecord>,
    monsters: BTreeMap<i32, MonsterRecord>,
    strings: BTreeMap<String, String>,
    /// Item type code -> base items whose type chain includes it.
    equivalency: BTreeMap<Code, Vec<Code>>,
    treasure_depth: usize,
}

impl Catalog {
    /// Parse catalog JSON and build a validated catalog.
    pub fn from_json(json: &str) -> Result<Self, ItemError> {
        let data: CatalogData =
            serde_json::from_str(json).map_err(|e| ItemError::InvalidCatalog(e.to_string()))?;
        Self::from_data(data)
    }

    /// Index and validate raw catalog data.
    ///
    /// # Errors
    ///
    /// Fails on duplicate codes, dangling references, bad treasure weights
    /// and treasure class cycles.
    pub fn from_data(data: CatalogData) -> Result<Self, ItemError> {
        let stats = index_by_code("stat", data.stats, |r| &r.name)?
            .into_iter()
            .map(|(code, record)| (code, Arc::new(record)))
            .collect();

        let mut skills = BTreeMap::new();
        for skill in data.skills {
            skills.insert(skill.index, skill);
        }
        let mut monsters = BTreeMap::new();
        for monster in data.monsters {
            monsters.insert(monster.id, monster);
        }

        let mut catalog = Self {
            stats,
            properties: index_by_code("property", data.properties, |r| &r.code)?,
            item_types: index_by_code("item type", data.item_types, |r| &r.code)?,
            base_items: index_by_code("base item", data.base_items, |r| &r.code)?,
            uniques: index_by_code("unique", data.uniques, |r| &r.code)?,
            set_items: index_by_code("set item", data.set_items, |r| &r.code)?,
            prefixes: index_by_code("prefix", data.prefixes, |r| &r.code)?,
            suffixes: index_by_code("suffix", data.suffixes, |r| &r.code)?,
            treasure_classes: index_by_code(
                "treasure class",
                data.treasure_classes,
                |r| &r.code,
            )?,
            hero_classes: data.hero_classes,
            skills,
            monsters,
            strings: data.strings,
            equivalency: BTreeMap::new(),
            treasure_depth: 0,
        };

        catalog.validate()?;
        catalog.equivalency = catalog.build_equivalency();
        catalog.treasure_depth = catalog.treasure_graph().max_depth()?;

        tracing::debug!(
            stats = catalog.stats.len(),
            properties = catalog.properties.len(),
            base_items = catalog.base_items.len(),
            treasure_classes = catalog.treasure_classes.len(),
            treasure_depth = catalog.treasure_depth,
            "catalog loaded"
        );

        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ItemError> {
        for property in self.properties.values() {
            if property.effects.len() > MAX_PROPERTY_EFFECTS {
                return Err(ItemError::TooManyEffects {
                    code: property.code.clone(),
                    count: property.effects.len(),
                    max: MAX_PROPERTY_EFFECTS,
                });
            }
            for effect in &property.effects {
                match &effect.stat {
                    Some(stat) if !stat.is_empty() && !self.stats.contains_key(stat) => {
                        return Err(ItemError::MissingStat(stat.clone()));
                    }
                    _ => {}
                }
            }
        }

        for item_type in self.item_types.values() {
            for parent in &item_type.equiv {
                if !self.item_types.contains_key(parent) {
                    return Err(ItemError::MissingItemType(parent.clone()));
                }
            }
        }

        for base in self.base_items.values() {
            if !self.item_types.contains_key(&base.item_type) {
                return Err(ItemError::MissingItemType(base.item_type.clone()));
            }
            self.check_property_refs(&base.properties)?;
        }

        for unique in self.uniques.values() {
            if !self.base_items.contains_key(&unique.base) {
                return Err(ItemError::MissingBaseItem(unique.base.clone()));
            }
            self.check_property_refs(&unique.properties)?;
        }

        for set_item in self.set_items.values() {
            if !self.base_items.contains_key(&set_item.base) {
                return Err(ItemError::MissingBaseItem(set_item.base.clone()));
            }
            self.check_property_refs(&set_item.properties)?;
        }

        for affix in self.prefixes.values().chain(self.suffixes.values()) {
            self.check_property_refs(&affix.modifiers)?;
        }

        for class in self.treasure_classes.values() {
            check_treasure_weights(class)?;
        }

        self.treasure_graph().detect_cycles()
    }

    fn check_property_refs(&self, refs: &[PropertyRef]) -> Result<(), ItemError> {
        match refs.iter().find(|r| !self.properties.contains_key(&r.code)) {
            Some(missing) => Err(ItemError::MissingProperty(missing.code.clone())),
            None => Ok(()),
        }
    }

    /// The reference graph between treasure classes.
    pub fn treasure_graph(&self) -> TreasureGraph {
        let mut graph = TreasureGraph::new();
        for class in self.treasure_classes.values() {
            graph.add_node(class.code.clone());
            for treasure in &class.treasures {
                if self.treasure_classes.contains_key(&treasure.code) {
                    graph.add_reference(class.code.clone(), treasure.code.clone());
                }
            }
        }
        graph
    }

    fn build_equivalency(&self) -> BTreeMap<Code, Vec<Code>> {
        let mut equivalency: BTreeMap<Code, Vec<Code>> = BTreeMap::new();
        for base in self.base_items.values() {
            for item_type in self.equivalent_types(base) {
                equivalency
                    .entry(item_type)
                    .or_default()
                    .push(base.code.clone());
            }
        }
        equivalency
    }

    /// A base item's type followed by every ancestor type, breadth first.
    pub fn equivalent_types(&self, base: &BaseItemRecord) -> Vec<Code> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        let mut queue = std::collections::VecDeque::from([base.item_type.clone()]);

        while let Some(code) = queue.pop_front() {
            if !seen.insert(code.clone()) {
                continue;
            }
            if let Some(record) = self.item_types.get(&code) {
                queue.extend(record.equiv.iter().cloned());
            }
            ordered.push(code);
        }

        ordered
    }

    /// Base items whose type chain includes `item_type`, in code order.
    pub fn equivalents(&self, item_type: &str) -> &[Code] {
        self.equivalency
            .get(item_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Longest chain of nested treasure classes.
    pub fn treasure_depth(&self) -> usize {
        self.treasure_depth
    }

    pub fn stat(&self, name: &str) -> Result<&Arc<StatRecord>, ItemError> {
        self.stats
            .get(name)
            .ok_or_else(|| ItemError::MissingStat(Code::new(name)))
    }

    /// Build a stat from raw values using the record's layout.
    pub fn new_stat(&self, name: &str, raw: &[i32]) -> Result<Stat, ItemError> {
        Ok(Stat::new(Arc::clone(self.stat(name)?), raw))
    }

    pub fn property(&self, code: &str) -> Result<&PropertyRecord, ItemError> {
        self.properties
            .get(code)
            .ok_or_else(|| ItemError::MissingProperty(Code::new(code)))
    }

    pub fn item_type(&self, code: &str) -> Result<&ItemTypeRecord, ItemError> {
        self.item_types
            .get(code)
            .ok_or_else(|| ItemError::MissingItemType(Code::new(code)))
    }

    pub fn base_item(&self, code: &str) -> Result<&BaseItemRecord, ItemError> {
        self.base_items
            .get(code)
            .ok_or_else(|| ItemError::MissingBaseItem(Code::new(code)))
    }

    pub fn unique(&self, code: &str) -> Result<&UniqueRecord, ItemError> {
        self.uniques
            .get(code)
            .ok_or_else(|| ItemError::MissingUnique(Code::new(code)))
    }

    pub fn set_item(&self, code: &str) -> Result<&SetItemRecord, ItemError> {
        self.set_items
            .get(code)
            .ok_or_else(|| ItemError::MissingSetItem(Code::new(code)))
    }

    pub fn affix(&self, kind: AffixKind, code: &str) -> Result<&AffixRecord, ItemError> {
        let table = match kind {
            AffixKind::Prefix => &self.prefixes,
            AffixKind::Suffix => &self.suffixes,
        };
        table
            .get(code)
            .ok_or_else(|| ItemError::MissingAffix(Code::new(code)))
    }

    pub fn treasure_class(&self, code: &str) -> Option<&TreasureClassRecord> {
        self.treasure_classes.get(code)
    }

    pub fn contains_base_item(&self, code: &str) -> bool {
        self.base_items.contains_key(code)
    }

    pub fn contains_unique(&self, code: &str) -> bool {
        self.uniques.contains_key(code)
    }

    pub fn contains_set_item(&self, code: &str) -> bool {
        self.set_items.contains_key(code)
    }

    pub fn contains_affix(&self, kind: AffixKind, code: &str) -> bool {
        self.affix(kind, code).is_ok()
    }

    /// Uniques built on the given base item.
    pub fn uniques_for(&self, base: &str) -> Vec<&UniqueRecord> {
        self.uniques
            .values()
            .filter(|unique| unique.base.as_str() == base)
            .collect()
    }

    /// Set items built on the given base item.
    pub fn set_items_for(&self, base: &str) -> Vec<&SetItemRecord> {
        self.set_items
            .values()
            .filter(|set_item| set_item.base.as_str() == base)
            .collect()
    }

    /// Affixes that may spawn on the given base item.
    ///
    /// An affix matches when none of the item's equivalent types is
    /// excluded, at least one is included, and the affix level does not
    /// exceed the item level.
    pub fn affixes_for(&self, kind: AffixKind, base: &BaseItemRecord) -> Vec<&AffixRecord> {
        let table = match kind {
            AffixKind::Prefix => &self.prefixes,
            AffixKind::Suffix => &self.suffixes,
        };
        let types = self.equivalent_types(base);

        table
            .values()
            .filter(|affix| affix.level <= base.level)
            .filter(|affix| !types.iter().any(|t| affix.exclude.contains(t)))
            .filter(|affix| types.iter().any(|t| affix.include.contains(t)))
            .collect()
    }

    /// Look up a localization key. Missing keys render as the key itself.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn hero_class(&self, index: i32) -> Option<&HeroClassRecord> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.hero_classes.get(i))
    }

    pub fn skill_name(&self, index: i32) -> Option<&str> {
        self.skills.get(&index).map(|skill| skill.name.as_str())
    }

    /// The index of the skill with the given name.
    pub fn skill_index(&self, name: &str) -> Option<i32> {
        self.skills
            .values()
            .find(|skill| skill.name == name)
            .map(|skill| skill.index)
    }

    pub fn monster_name(&self, id: i32) -> Option<&str> {
        self.monsters.get(&id).map(|monster| monster.name.as_str())
    }
}

fn check_treasure_weights(class: &TreasureClassRecord) -> Result<(), ItemError> {
    let named = [
        ("freq_unique", class.freq_unique),
        ("freq_set", class.freq_set),
        ("freq_rare", class.freq_rare),
        ("freq_magic", class.freq_magic),
        ("freq_no_drop", class.freq_no_drop),
    ];
    for (entry, weight) in named {
        if weight < 0 {
            return Err(ItemError::NegativeTreasureWeight {
                class: class.code.clone(),
                entry: Code::new(entry),
            });
        }
    }

    if let Some(treasure) = class.treasures.iter().find(|t| t.probability < 0) {
        return Err(ItemError::NegativeTreasureWeight {
            class: class.code.clone(),
            entry: treasure.code.clone(),
        });
    }

    let total: i64 = i64::from(class.freq_no_drop)
        + class
            .treasures
            .iter()
            .map(|t| i64::from(t.probability))
            .sum::<i64>();
    if class.picks >= 0 && total <= 0 {
        return Err(ItemError::ZeroTreasureWeight(class.code.clone()));
    }

    let modifier_total: i64 = i64::from(BASE_MODIFIER_WEIGHT)
        + [class.freq_unique, class.freq_set, class.freq_rare, class.freq_magic]
            .iter()
            .map(|freq| i64::from(*freq))
            .sum::<i64>();
    if total > i64::from(i32::MAX) || modifier_total > i64::from(i32::MAX) {
        return Err(ItemError::TreasureWeightOverflow(class.code.clone()));
    }

    Ok(())
}
