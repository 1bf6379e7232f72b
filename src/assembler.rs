//! Item assembly.
//!
//! Assembly runs in two steps:
//!
//! ```text
//! [base code + DropModifier] → apply_drop_modifier → [ItemSpec] → assemble → [Item]
//! ```
//!
//! `apply_drop_modifier` chooses the unique, set item or affixes for a
//! rolled rarity. `assemble` evaluates every property source in a fixed
//! order (base, template, prefixes, suffixes) and builds the item's stat
//! list and attributes from the results.

use crate::catalog::{AffixKind, BaseItemRecord, Catalog, ItemTypeRecord};
use crate::code::Code;
use crate::drop::DropModifier;
use crate::error::ItemError;
use crate::item::{Item, ItemAttributes};
use crate::property::{self, PropertyFn, SideEffect};
use crate::resolved::ResolvedProperty;
use crate::source::{property_args, AffixSource, PropertySource};
use crate::stat_list::StatList;
use rand::Rng;

/// Most prefixes (or suffixes) an item may carry.
pub const MAX_AFFIXES_PER_KIND: usize = 3;

/// Stat that overrides the base item's socket count.
pub const SOCKETS_STAT: &str = "item_numsockets";

/// Item type code of jewels, which carry fewer rare affixes.
const JEWEL_TYPE: &str = "jew";

/// What to build: a base item plus its template or affixes.
///
/// # Examples
///
/// ```rust
/// use lootstat::assembler::ItemSpec;
/// use lootstat::DropModifier;
///
/// let spec = ItemSpec::new("rin")
///     .with_prefix("Jade")
///     .with_suffix("of Life")
///     .with_modifier(DropModifier::Magic);
/// assert_eq!(spec.prefixes.len(), 1);
/// assert!(spec.unique.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub base: Code,
    pub unique: Option<Code>,
    pub set_item: Option<Code>,
    pub prefixes: Vec<Code>,
    pub suffixes: Vec<Code>,
    pub modifier: DropModifier,
}

impl ItemSpec {
    pub fn new(base: &str) -> Self {
        Self {
            base: Code::new(base),
            unique: None,
            set_item: None,
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            modifier: DropModifier::None,
        }
    }

    pub fn with_unique(mut self, code: &str) -> Self {
        self.unique = Some(Code::new(code));
        self
    }

    pub fn with_set_item(mut self, code: &str) -> Self {
        self.set_item = Some(Code::new(code));
        self
    }

    pub fn with_prefix(mut self, code: &str) -> Self {
        self.prefixes.push(Code::new(code));
        self
    }

    pub fn with_suffix(mut self, code: &str) -> Self {
        self.suffixes.push(Code::new(code));
        self
    }

    pub fn with_modifier(mut self, modifier: DropModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Affix slots available to a rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffixLimits {
    pub prefixes: usize,
    pub suffixes: usize,
    pub total: usize,
}

impl AffixLimits {
    pub fn for_item(modifier: DropModifier, item_type: &Code) -> Self {
        match modifier {
            DropModifier::Magic => Self {
                prefixes: 1,
                suffixes: 1,
                total: 2,
            },
            DropModifier::Rare if item_type.as_str() == JEWEL_TYPE => Self {
                prefixes: 3,
                suffixes: 3,
                total: 4,
            },
            DropModifier::Rare => Self {
                prefixes: 3,
                suffixes: 3,
                total: 6,
            },
            _ => Self {
                prefixes: 0,
                suffixes: 0,
                total: 0,
            },
        }
    }
}

/// Clamp a rolled modifier to what the item type allows.
pub fn sanitize_modifier(item_type: &ItemTypeRecord, modifier: DropModifier) -> DropModifier {
    if item_type.normal {
        DropModifier::None
    } else if item_type.magic {
        DropModifier::Magic
    } else if modifier == DropModifier::Rare && !item_type.rare {
        DropModifier::Magic
    } else {
        modifier
    }
}

/// Choose the template or affixes for a rolled drop modifier.
///
/// A unique or set roll with no matching template falls back to rare.
///
/// # Errors
///
/// Returns `ItemError::MissingBaseItem` or `ItemError::MissingItemType`
/// if the base item cannot be resolved.
pub fn apply_drop_modifier<R: Rng + ?Sized>(
    catalog: &Catalog,
    base_code: &Code,
    modifier: DropModifier,
    rng: &mut R,
) -> Result<ItemSpec, ItemError> {
    let base = catalog.base_item(base_code.as_str())?;
    let item_type = catalog.item_type(base.item_type.as_str())?;

    let mut spec = ItemSpec::new(base_code.as_str());
    let mut modifier = sanitize_modifier(item_type, modifier);

    match modifier {
        DropModifier::Unique => {
            let candidates = catalog.uniques_for(base_code.as_str());
            if candidates.is_empty() {
                tracing::debug!(base = %base_code, "no unique for base item, rolling rare");
                modifier = sanitize_modifier(item_type, DropModifier::Rare);
            } else {
                let chosen = candidates[rng.gen_range(0..candidates.len())];
                spec.unique = Some(chosen.code.clone());
            }
        }
        DropModifier::Set => {
            let candidates = catalog.set_items_for(base_code.as_str());
            if candidates.is_empty() {
                tracing::debug!(base = %base_code, "no set item for base item, rolling rare");
                modifier = sanitize_modifier(item_type, DropModifier::Rare);
            } else {
                let chosen = candidates[rng.gen_range(0..candidates.len())];
                spec.set_item = Some(chosen.code.clone());
            }
        }
        _ => {}
    }

    spec.modifier = modifier;

    let limits = AffixLimits::for_item(modifier, &base.item_type);
    if limits.total > 0 {
        roll_affixes(catalog, base, limits, &mut spec, rng);
    }

    Ok(spec)
}

fn roll_affixes<R: Rng + ?Sized>(
    catalog: &Catalog,
    base: &BaseItemRecord,
    limits: AffixLimits,
    spec: &mut ItemSpec,
    rng: &mut R,
) {
    let slots = [
        (AffixKind::Prefix, limits.prefixes),
        (AffixKind::Suffix, limits.suffixes),
    ];

    for (kind, count) in slots {
        let candidates = catalog.affixes_for(kind, base);
        for _ in 0..count {
            if spec.prefixes.len() + spec.suffixes.len() >= limits.total {
                return;
            }
            if rng.gen_range(0..2) == 0 {
                continue;
            }

            let chosen = match kind {
                AffixKind::Prefix => &mut spec.prefixes,
                AffixKind::Suffix => &mut spec.suffixes,
            };
            let open: Vec<&Code> = candidates
                .iter()
                .map(|affix| &affix.code)
                .filter(|code| !chosen.contains(code))
                .collect();
            if open.is_empty() {
                break;
            }
            chosen.push(open[rng.gen_range(0..open.len())].clone());
        }
    }
}

/// Build an item from a spec.
///
/// A set item wins over a unique, and either template suppresses affixes.
/// Defense is rolled first, then every property in source order. A
/// property that fails to evaluate is logged and skipped.
///
/// # Errors
///
/// * `ItemError::TooManyAffixes` if the spec has more than three prefixes
///   or suffixes
/// * `ItemError::MissingBaseItem`, `MissingUnique`, `MissingSetItem` or
///   `MissingAffix` if the spec names an unknown record
pub fn assemble<R: Rng + ?Sized>(
    catalog: &Catalog,
    spec: &ItemSpec,
    rng: &mut R,
) -> Result<Item, ItemError> {
    check_affix_count("prefix", spec.prefixes.len())?;
    check_affix_count("suffix", spec.suffixes.len())?;

    let base = catalog.base_item(spec.base.as_str())?;

    let set_item = spec
        .set_item
        .as_ref()
        .map(|code| catalog.set_item(code.as_str()))
        .transpose()?;
    let unique = match (&set_item, &spec.unique) {
        (None, Some(code)) => Some(catalog.unique(code.as_str())?),
        _ => None,
    };
    let templated = set_item.is_some() || unique.is_some();

    let mut affixes = Vec::new();
    if templated {
        if !spec.prefixes.is_empty() || !spec.suffixes.is_empty() {
            tracing::debug!(base = %spec.base, "ignoring affixes on a templated item");
        }
    } else {
        for code in &spec.prefixes {
            affixes.push(AffixSource {
                kind: AffixKind::Prefix,
                record: catalog.affix(AffixKind::Prefix, code.as_str())?,
            });
        }
        for code in &spec.suffixes {
            affixes.push(AffixSource {
                kind: AffixKind::Suffix,
                record: catalog.affix(AffixKind::Suffix, code.as_str())?,
            });
        }
    }

    let mut sources: Vec<&dyn PropertySource> = Vec::new();
    sources.push(base);
    if let Some(set_item) = set_item {
        sources.push(set_item);
    } else if let Some(unique) = unique {
        sources.push(unique);
    }
    sources.extend(affixes.iter().map(|affix| affix as &dyn PropertySource));

    let mut attributes = ItemAttributes {
        level: set_item
            .map(|s| s.level)
            .or(unique.map(|u| u.level))
            .unwrap_or(base.level),
        required_level: base.required_level,
        defense: 0,
        durability: base.durability,
        sockets: base.sockets,
        ..ItemAttributes::default()
    };
    attributes.damage.min = base.min_damage;
    attributes.damage.max = base.max_damage;
    if base.max_ac > 0 {
        attributes.defense = property::roll(rng, base.min_ac, base.max_ac);
    }

    let mut properties = Vec::new();
    let mut stats = StatList::new();

    for source in sources {
        for reference in source.property_refs() {
            let record = match catalog.property(reference.code.as_str()) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(source = %source.source_code(), error = %e, "skipping property");
                    continue;
                }
            };
            let args = property_args(catalog, source, reference);
            let evaluation = match property::evaluate(catalog, record, &args, rng) {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    tracing::warn!(
                        source = %source.source_code(),
                        property = %reference.code,
                        error = %e,
                        "skipping property"
                    );
                    continue;
                }
            };

            let resolved = ResolvedProperty::new(
                source.source_kind(),
                source.source_code().clone(),
                reference.code.clone(),
            )
            .with_evaluation(evaluation);

            apply_side_effects(&mut attributes, &resolved.side_effects);
            stats.extend(resolved.stats.iter().cloned());
            properties.push(resolved);
        }
    }

    if let Some(sockets) = socket_override(&stats) {
        attributes.sockets = sockets;
    }

    let name = item_name(catalog, base, spec, set_item.map(|s| &s.name), unique.map(|u| &u.name));
    let (prefixes, suffixes) = if templated {
        (Vec::new(), Vec::new())
    } else {
        (spec.prefixes.clone(), spec.suffixes.clone())
    };

    tracing::debug!(
        base = %spec.base,
        name = %name,
        modifier = ?spec.modifier,
        stats = stats.len(),
        "assembled item"
    );

    Ok(Item {
        base: spec.base.clone(),
        name,
        modifier: spec.modifier,
        unique: unique.map(|u| u.code.clone()),
        set_item: set_item.map(|s| s.code.clone()),
        prefixes,
        suffixes,
        properties,
        stats,
        attributes,
        socketed: Vec::new(),
    })
}

fn check_affix_count(kind: &'static str, count: usize) -> Result<(), ItemError> {
    if count > MAX_AFFIXES_PER_KIND {
        return Err(ItemError::TooManyAffixes {
            kind,
            count,
            max: MAX_AFFIXES_PER_KIND,
        });
    }
    Ok(())
}

fn apply_side_effects(attributes: &mut ItemAttributes, side_effects: &[SideEffect]) {
    for side in side_effects {
        let damage = &mut attributes.damage;
        match *side {
            SideEffect::Integer {
                func: PropertyFn::DamageMin,
                value,
            } => damage.bonus_min = damage.bonus_min.saturating_add(value),
            SideEffect::Integer {
                func: PropertyFn::DamageMax,
                value,
            } => damage.bonus_max = damage.bonus_max.saturating_add(value),
            SideEffect::Integer {
                func: PropertyFn::DamagePercent,
                value,
            } => damage.enhance_percent = damage.enhance_percent.saturating_add(value),
            SideEffect::Flag {
                func: PropertyFn::Ethereal,
                value,
            } => attributes.ethereal |= value,
            SideEffect::Flag {
                func: PropertyFn::Indestructible,
                value,
            } => attributes.indestructible |= value,
            _ => {}
        }
    }
}

fn socket_override(stats: &StatList) -> Option<usize> {
    let reduced = stats.reduce();
    let stat = reduced.find(SOCKETS_STAT).next()?;
    let count = stat.values().first()?.as_int();
    Some(usize::try_from(count).unwrap_or(0))
}

fn item_name(
    catalog: &Catalog,
    base: &BaseItemRecord,
    spec: &ItemSpec,
    set_name: Option<&String>,
    unique_name: Option<&String>,
) -> String {
    if let Some(name) = set_name.or(unique_name) {
        return catalog.translate(name).to_string();
    }

    let prefix = spec
        .prefixes
        .first()
        .and_then(|code| catalog.affix(AffixKind::Prefix, code.as_str()).ok())
        .map(|affix| catalog.translate(&affix.name));
    let suffix = spec
        .suffixes
        .first()
        .and_then(|code| catalog.affix(AffixKind::Suffix, code.as_str()).ok())
        .map(|affix| catalog.translate(&affix.name));

    [prefix, Some(catalog.translate(&base.name)), suffix]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
