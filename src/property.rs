//! Property evaluation.
//!
//! A property record lists up to seven effect slots. Each slot names a
//! [`PropertyFn`] that turns the property's input arguments into a stat,
//! a bare integer, a flag, or nothing at all.
//!
//! Input arguments are `[min, max]`, or `[param, min, max]` when the
//! source supplies a parameter. A function that needs more arguments than
//! it was given produces nothing. Damage, flag and class-skill functions
//! always roll over the first two arguments.

use crate::catalog::{Catalog, PropertyEffect, PropertyRecord};
use crate::code::Code;
use crate::error::ItemError;
use crate::stat::Stat;
use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;

/// Number of skill tabs per hero class.
const SKILL_TABS_PER_CLASS: i32 = 3;

/// Hero index for a skill stat not bound to any class.
pub const NO_HERO: i32 = -1;

/// The function an effect slot runs.
///
/// # Examples
///
/// ```rust
/// use lootstat::property::PropertyFn;
///
/// assert_eq!(PropertyFn::from(1), PropertyFn::Values);
/// assert_eq!(PropertyFn::from(18), PropertyFn::Inert(18));
/// assert_eq!(PropertyFn::from(99), PropertyFn::Unknown(99));
/// assert_eq!(PropertyFn::Charges.id(), 19);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i32")]
pub enum PropertyFn {
    /// Rolled value (plus optional parameter) into a stat.
    Values,
    ArmorPercent,
    /// Rerun the previous slot's function.
    RepeatPrevious,
    DamageMin,
    DamageMax,
    DamagePercent,
    Speed,
    /// Rerun the previous slot's function, parameter included.
    RepeatPreviousWithParam,
    /// Skill tab bonus; the parameter encodes class and tab.
    ClassSkillTab,
    /// Chance to cast a skill on an event.
    Procs,
    /// Skill bonus with a rolled skill index.
    RandomSkill,
    MaxDurability,
    NumSockets,
    StatMin,
    StatMax,
    /// The parameter itself is the value.
    StatParam,
    Charges,
    Indestructible,
    /// All-skills bonus for the class in the effect's value.
    ClassSkills,
    SingleSkill,
    Ethereal,
    /// Documented ids that deliberately do nothing.
    Inert(i32),
    /// Ids with no known meaning; also produce nothing.
    Unknown(i32),
}

impl Default for PropertyFn {
    fn default() -> Self {
        PropertyFn::Inert(0)
    }
}

impl From<i32> for PropertyFn {
    fn from(id: i32) -> Self {
        match id {
            1 => PropertyFn::Values,
            2 => PropertyFn::ArmorPercent,
            3 => PropertyFn::RepeatPrevious,
            5 => PropertyFn::DamageMin,
            6 => PropertyFn::DamageMax,
            7 => PropertyFn::DamagePercent,
            8 => PropertyFn::Speed,
            9 => PropertyFn::RepeatPreviousWithParam,
            10 => PropertyFn::ClassSkillTab,
            11 => PropertyFn::Procs,
            12 => PropertyFn::RandomSkill,
            13 => PropertyFn::MaxDurability,
            14 => PropertyFn::NumSockets,
            15 => PropertyFn::StatMin,
            16 => PropertyFn::StatMax,
            17 => PropertyFn::StatParam,
            19 => PropertyFn::Charges,
            20 => PropertyFn::Indestructible,
            21 => PropertyFn::ClassSkills,
            22 => PropertyFn::SingleSkill,
            23 => PropertyFn::Ethereal,
            // unused, time-based, state-on-target, random class skill
            0 | 4 | 18 | 24 | 36 => PropertyFn::Inert(id),
            other => PropertyFn::Unknown(other),
        }
    }
}

impl PropertyFn {
    /// The numeric id of this function.
    pub fn id(&self) -> i32 {
        match self {
            PropertyFn::Values => 1,
            PropertyFn::ArmorPercent => 2,
            PropertyFn::RepeatPrevious => 3,
            PropertyFn::DamageMin => 5,
            PropertyFn::DamageMax => 6,
            PropertyFn::DamagePercent => 7,
            PropertyFn::Speed => 8,
            PropertyFn::RepeatPreviousWithParam => 9,
            PropertyFn::ClassSkillTab => 10,
            PropertyFn::Procs => 11,
            PropertyFn::RandomSkill => 12,
            PropertyFn::MaxDurability => 13,
            PropertyFn::NumSockets => 14,
            PropertyFn::StatMin => 15,
            PropertyFn::StatMax => 16,
            PropertyFn::StatParam => 17,
            PropertyFn::Charges => 19,
            PropertyFn::Indestructible => 20,
            PropertyFn::ClassSkills => 21,
            PropertyFn::SingleSkill => 22,
            PropertyFn::Ethereal => 23,
            PropertyFn::Inert(id) | PropertyFn::Unknown(id) => *id,
        }
    }

    pub fn is_repeat(&self) -> bool {
        matches!(
            self,
            PropertyFn::RepeatPrevious | PropertyFn::RepeatPreviousWithParam
        )
    }
}

/// A non-printing output of a property effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Applied directly to item damage fields.
    Integer { func: PropertyFn, value: i32 },
    /// Item flags such as ethereal or indestructible.
    Flag { func: PropertyFn, value: bool },
}

/// Everything one property produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    pub stats: Vec<Stat>,
    pub side_effects: Vec<SideEffect>,
}

/// What a single effect slot produced.
enum Output {
    Stat(Stat),
    Side(SideEffect),
    Nothing,
}

/// Evaluate a property against its input arguments.
///
/// Slots run in order. A repeat slot runs the function the previous slot
/// ran (with this slot's stat); the function remembered for the next slot
/// stays the one actually run. Each rolling function draws exactly once.
///
/// # Errors
///
/// Returns `ItemError::MissingStat` if a stat-producing slot names a stat
/// the catalog does not have.
///
/// # Examples
///
/// ```rust
/// use lootstat::{property, Catalog};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let catalog = Catalog::from_json(r#"{
///     "stats": [{ "name": "strength", "desc_fn": 1, "desc_val": 1,
///                 "desc_str_pos": "to Strength", "desc_str_neg": "to Strength" }],
///     "properties": [{ "code": "str", "effects": [{ "func": 1, "stat": "strength" }] }]
/// }"#).unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let eval = property::evaluate(&catalog, catalog.property("str").unwrap(), &[4, 4], &mut rng).unwrap();
/// assert_eq!(eval.stats[0].describe(&catalog), "+4 to Strength");
/// ```
pub fn evaluate<R: Rng + ?Sized>(
    catalog: &Catalog,
    record: &PropertyRecord,
    args: &[i32],
    rng: &mut R,
) -> Result<Evaluation, ItemError> {
    let mut evaluation = Evaluation::default();
    let mut last = PropertyFn::default();

    for effect in &record.effects {
        let func = if effect.func.is_repeat() {
            last
        } else {
            effect.func
        };

        match run(catalog, &record.code, func, effect, args, rng)? {
            Output::Stat(stat) => evaluation.stats.push(stat),
            Output::Side(side) => evaluation.side_effects.push(side),
            Output::Nothing => {}
        }

        last = func;
    }

    Ok(evaluation)
}

fn run<R: Rng + ?Sized>(
    catalog: &Catalog,
    property: &Code,
    func: PropertyFn,
    effect: &PropertyEffect,
    args: &[i32],
    rng: &mut R,
) -> Result<Output, ItemError> {
    use PropertyFn::*;

    let output = match func {
        Values | ArmorPercent | Speed | MaxDurability | NumSockets | StatMin | StatMax
        | SingleSkill => match min_max(args) {
            Some((min, max)) => {
                let value = roll(rng, min, max);
                match param(args) {
                    Some(param) => stat(catalog, effect, &[value, param])?,
                    None => stat(catalog, effect, &[value])?,
                }
            }
            None => Output::Nothing,
        },
        DamageMin | DamageMax | DamagePercent => match args {
            [min, max, ..] => Output::Side(SideEffect::Integer {
                func,
                value: roll(rng, *min, *max),
            }),
            _ => Output::Nothing,
        },
        Indestructible | Ethereal => match args {
            [min, max, ..] => Output::Side(SideEffect::Flag {
                func,
                value: roll(rng, *min, *max) > 0,
            }),
            _ => Output::Nothing,
        },
        ClassSkillTab => match args {
            [param, min, max, ..] => {
                let level = roll(rng, *min, *max);
                let class = param / SKILL_TABS_PER_CLASS;
                let tab = param % SKILL_TABS_PER_CLASS;
                stat(catalog, effect, &[level, class, tab])?
            }
            _ => Output::Nothing,
        },
        Procs => match args {
            [skill, chance, level, ..] => stat(catalog, effect, &[*chance, *level, *skill])?,
            _ => Output::Nothing,
        },
        RandomSkill => match args {
            [level, min, max, ..] => {
                let skill = roll(rng, *min, *max);
                stat(catalog, effect, &[*level, skill, NO_HERO])?
            }
            _ => Output::Nothing,
        },
        StatParam => match args {
            [value, ..] => stat(catalog, effect, &[*value])?,
            _ => Output::Nothing,
        },
        Charges => match args {
            [skill, charges, level, ..] => {
                stat(catalog, effect, &[*level, *skill, *charges, *charges])?
            }
            _ => Output::Nothing,
        },
        ClassSkills => match args {
            [min, max, ..] => {
                let value = roll(rng, *min, *max);
                stat(catalog, effect, &[value, effect.value])?
            }
            _ => Output::Nothing,
        },
        RepeatPrevious | RepeatPreviousWithParam | Inert(_) => Output::Nothing,
        Unknown(id) => {
            tracing::warn!(property = %property, func = id, "unknown property function");
            Output::Nothing
        }
    };

    Ok(output)
}

/// The roll range: `[min, max]` or the last two of `[param, min, max]`.
fn min_max(args: &[i32]) -> Option<(i32, i32)> {
    match args {
        [min, max] => Some((*min, *max)),
        [_, min, max, ..] => Some((*min, *max)),
        _ => None,
    }
}

fn param(args: &[i32]) -> Option<i32> {
    match args {
        [param, _, _, ..] => Some(*param),
        _ => None,
    }
}

/// Uniform roll in `[min, max]`; reversed bounds are swapped.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let (lo, hi) = if max < min { (max, min) } else { (min, max) };
    rng.gen_range(lo..=hi)
}

fn stat(catalog: &Catalog, effect: &PropertyEffect, raw: &[i32]) -> Result<Output, ItemError> {
    match &effect.stat {
        Some(code) if !code.is_empty() => {
            let record = catalog.stat(code.as_str())?;
            Ok(Output::Stat(Stat::new(Arc::clone(record), raw)))
        }
        _ => Ok(Output::Nothing),
    }
}
