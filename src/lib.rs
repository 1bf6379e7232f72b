//! # lootstat - Deterministic, Data-Driven Item Generation Engine
//!
//! An item generation and stat resolution engine for loot-based games that provides:
//! - **Deterministic** rolls (same seed and calls → same items)
//! - **Data-driven** design (every stat, property, item and loot table comes from the catalog)
//! - **Combinable** stats (like stats merge, incompatible ones stay apart)
//! - **Localized** description lines for every printing stat
//!
//! ## Core Concepts
//!
//! ### Item Pipeline
//!
//! Items flow through a simple pipeline:
//!
//! ```text
//! [TreasureClass] → [DropModifier] → [ItemSpec] → [Property evaluation] → [Item]
//! ```
//!
//! 1. **Treasure classes** are weighted loot tables, possibly nested
//! 2. **Drop modifiers** pick the rarity, then a unique, set item or affixes
//! 3. **Property evaluation** turns each property reference into stats and side effects
//! 4. **Items** carry the stat list, the per-source breakdown and rolled attributes
//!
//! ### Key Features
//!
//! - **Cycle Detection**: Treasure class cycles are rejected at load time
//! - **Stat Reduction**: `StatList::reduce` merges stats that may be combined
//! - **Description Formatting**: `Stat::describe` renders localized text
//! - **Debug-Friendly**: Every item keeps the breakdown of where each stat came from
//!
//! ## Example
//!
//! ```rust
//! use lootstat::*;
//!
//! let catalog = Catalog::from_json(r#"{
//!     "stats": [{ "name": "strength", "desc_fn": 1, "desc_val": 1,
//!                 "desc_str_pos": "to Strength", "desc_str_neg": "to Strength" }],
//!     "properties": [{ "code": "str", "effects": [{ "func": 1, "stat": "strength" }] }],
//!     "item_types": [{ "code": "ring" }],
//!     "base_items": [{ "code": "rin", "name": "Ring", "item_type": "ring" }],
//!     "uniques": [{ "code": "Nagelring", "name": "Nagelring", "base": "rin",
//!                   "properties": [{ "code": "str", "min": 2, "max": 2 },
//!                                  { "code": "str", "min": 3, "max": 3 }] }]
//! }"#).unwrap();
//!
//! let mut generator = ItemGenerator::new(&catalog, GeneratorConfig::default());
//! let ring = generator.new_item(&["rin", "Nagelring"]).unwrap();
//!
//! assert_eq!(ring.name(), "Nagelring");
//! assert_eq!(ring.stat_strings(&catalog), vec!["+5 to Strength"]);
//! ```
//!
//! ## Modules
//!
//! - [`code`] - Catalog identifier type
//! - [`catalog`] - Catalog records, loading and validation
//! - [`value`] - Typed stat values
//! - [`stat`] - Stats and stat combination
//! - [`stat_list`] - Stat lists and reduction
//! - [`describe`] - Description formatting
//! - [`property`] - Property evaluation
//! - [`source`] - Property sources
//! - [`resolved`] - Evaluated property breakdown
//! - [`drop`] - Rarity and treasure rolls
//! - [`assembler`] - Item assembly
//! - [`item`] - Assembled items
//! - [`generator`] - The item generator
//! - [`graph`] - Treasure class reference graph
//! - [`error`] - Error types

pub mod assembler;
pub mod catalog;
pub mod code;
pub mod describe;
pub mod drop;
pub mod error;
pub mod generator;
pub mod graph;
pub mod item;
pub mod property;
pub mod resolved;
pub mod source;
pub mod stat;
pub mod stat_list;
pub mod value;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogData};
pub use code::Code;
pub use error::{CombineError, ItemError};
pub use generator::{GeneratorConfig, ItemGenerator};
pub use item::Item;
pub use stat::Stat;
pub use stat_list::StatList;

// Re-export pipeline types
pub use assembler::ItemSpec;
pub use drop::DropModifier;
pub use property::{Evaluation, PropertyFn, SideEffect};
pub use resolved::ResolvedProperty;
pub use source::{PropertySource, SourceKind};

// Re-export value types
pub use value::{CombineRule, Number, NumberType, StatValue, ValueLayout};
