//! Property sources.
//!
//! Every record that contributes properties to an item (the base item,
//! a unique or set template, each affix) implements [`PropertySource`].
//! The assembler walks sources in a fixed order and evaluates their
//! property references one by one.

use crate::catalog::{
    AffixKind, AffixRecord, BaseItemRecord, Catalog, PropertyParam, PropertyRef, SetItemRecord,
    UniqueRecord,
};
use crate::code::Code;
use serde::Serialize;

/// Which kind of record contributed a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Base,
    Unique,
    SetItem,
    Prefix,
    Suffix,
}

impl From<AffixKind> for SourceKind {
    fn from(kind: AffixKind) -> Self {
        match kind {
            AffixKind::Prefix => SourceKind::Prefix,
            AffixKind::Suffix => SourceKind::Suffix,
        }
    }
}

/// A record that attaches properties to an item.
///
/// # Examples
///
/// ```rust
/// use lootstat::source::{PropertySource, SourceKind};
/// use lootstat::Catalog;
///
/// let catalog = Catalog::from_json(r#"{
///     "item_types": [{ "code": "ring" }],
///     "base_items": [{ "code": "rin", "name": "Ring", "item_type": "ring" }]
/// }"#).unwrap();
///
/// let ring = catalog.base_item("rin").unwrap();
/// assert_eq!(ring.source_kind(), SourceKind::Base);
/// assert!(ring.property_refs().is_empty());
/// ```
pub trait PropertySource {
    fn source_kind(&self) -> SourceKind;

    /// The code of the contributing record.
    fn source_code(&self) -> &Code;

    /// Property references in declaration order.
    fn property_refs(&self) -> &[PropertyRef];

    /// Whether a skill-name parameter may be resolved through the skill table.
    fn allows_skill_names(&self) -> bool {
        matches!(self.source_kind(), SourceKind::Unique | SourceKind::SetItem)
    }
}

impl PropertySource for BaseItemRecord {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Base
    }

    fn source_code(&self) -> &Code {
        &self.code
    }

    fn property_refs(&self) -> &[PropertyRef] {
        &self.properties
    }
}

impl PropertySource for UniqueRecord {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Unique
    }

    fn source_code(&self) -> &Code {
        &self.code
    }

    fn property_refs(&self) -> &[PropertyRef] {
        &self.properties
    }
}

impl PropertySource for SetItemRecord {
    fn source_kind(&self) -> SourceKind {
        SourceKind::SetItem
    }

    fn source_code(&self) -> &Code {
        &self.code
    }

    fn property_refs(&self) -> &[PropertyRef] {
        &self.properties
    }
}

/// An affix record tagged with whether it is a prefix or a suffix.
#[derive(Debug, Clone, Copy)]
pub struct AffixSource<'a> {
    pub kind: AffixKind,
    pub record: &'a AffixRecord,
}

impl PropertySource for AffixSource<'_> {
    fn source_kind(&self) -> SourceKind {
        self.kind.into()
    }

    fn source_code(&self) -> &Code {
        &self.record.code
    }

    fn property_refs(&self) -> &[PropertyRef] {
        &self.record.modifiers
    }
}

/// Build the evaluation arguments for a property reference.
///
/// The result is `[param, min, max]` when a parameter is present and
/// `[min, max]` otherwise. A skill-name parameter resolves to the skill's
/// index; an unknown name resolves to 0.
pub fn property_args(
    catalog: &Catalog,
    source: &dyn PropertySource,
    property: &PropertyRef,
) -> Vec<i32> {
    let param = match &property.param {
        None => None,
        Some(PropertyParam::Index(index)) => Some(*index),
        Some(PropertyParam::Name(name)) => Some(resolve_skill_param(catalog, source, name)),
    };

    match param {
        Some(param) => vec![param, property.min, property.max],
        None => vec![property.min, property.max],
    }
}

fn resolve_skill_param(catalog: &Catalog, source: &dyn PropertySource, name: &str) -> i32 {
    if let Ok(index) = name.trim().parse::<i32>() {
        return index;
    }
    if !source.allows_skill_names() {
        tracing::warn!(
            source = %source.source_code(),
            param = name,
            "named parameter on a source that only takes indices"
        );
        return 0;
    }
    match catalog.skill_index(name) {
        Some(index) => index,
        None => {
            tracing::warn!(source = %source.source_code(), skill = name, "unknown skill name");
            0
        }
    }
}
