//! Stat description formatting.
//!
//! Every stat record names a description function. The renderer is a pure
//! function of that record, the stat's values and the read-only catalog
//! (localization, hero classes, skills, monsters).
//!
//! Lookup misses never fail the formatting pass; they render a visible
//! sentinel such as `{Monster not found!}` in place of the name.

use crate::catalog::{Catalog, StatRecord};
use crate::value::{StatValue, ValueLayout};
use serde::Deserialize;

pub const MONSTER_NOT_FOUND: &str = "{Monster not found!}";
pub const SKILL_NOT_FOUND: &str = "{Skill not found!}";
pub const CLASS_NOT_FOUND: &str = "{Class not found!}";

/// Skill tab strings carry a number token that the tab formatter supplies itself.
const SKILL_TAB_TOKEN: &str = "+%d ";
const MAX_SKILL_TAB: i32 = 2;

/// The description function of a stat record.
///
/// Several numeric ids share one rendering; they map onto the same variant.
/// Ids with no rendering map to [`DescFn::Hidden`], which renders an empty
/// string (a non-printing stat).
///
/// # Examples
///
/// ```rust
/// use lootstat::describe::DescFn;
///
/// assert_eq!(DescFn::from(12), DescFn::Signed);
/// assert_eq!(DescFn::from(20), DescFn::SignedPercent);
/// assert_eq!(DescFn::from(17), DescFn::Hidden);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "i32")]
pub enum DescFn {
    /// Non-printing.
    #[default]
    Hidden,
    /// `+N text` (1, 12).
    Signed,
    /// `+N% text` (2, 4, 20).
    SignedPercent,
    /// `N text` (3).
    Plain,
    /// `N% text` (5).
    UnsignedPercent,
    /// `+N text text2` (6).
    SignedWithSuffix,
    /// `+N% text text2` (7, 8).
    SignedPercentWithSuffix,
    /// `N text text2` (9).
    PlainWithSuffix,
    /// Localized template filled with the value (11).
    Template,
    /// `+N to <Class> Skill Levels` (13).
    ClassAllSkills,
    /// `+N to <Tab> (<Class> Only)` (14).
    SkillTab,
    /// Localized chance-to-cast template (15).
    ChanceToCast,
    /// Localized aura template (16).
    Aura,
    /// `N% text <Monster>` (22, 23).
    VersusMonster,
    /// `Level N <Skill> (C/M Charges)` (24).
    Charges,
    /// `+N to <Skill> (<Class> Only)` (27).
    ClassSkill,
    /// `+N to <Skill>` (28).
    Skill,
}

impl From<i32> for DescFn {
    fn from(id: i32) -> Self {
        match id {
            1 | 12 => DescFn::Signed,
            2 | 4 | 20 => DescFn::SignedPercent,
            3 => DescFn::Plain,
            5 => DescFn::UnsignedPercent,
            6 => DescFn::SignedWithSuffix,
            7 | 8 => DescFn::SignedPercentWithSuffix,
            9 => DescFn::PlainWithSuffix,
            11 => DescFn::Template,
            13 => DescFn::ClassAllSkills,
            14 => DescFn::SkillTab,
            15 => DescFn::ChanceToCast,
            16 => DescFn::Aura,
            22 | 23 => DescFn::VersusMonster,
            24 => DescFn::Charges,
            27 => DescFn::ClassSkill,
            28 => DescFn::Skill,
            _ => DescFn::Hidden,
        }
    }
}

impl DescFn {
    /// The value layout a stat gets when its record declares none.
    pub fn default_layout(&self) -> Vec<ValueLayout> {
        use ValueLayout as L;
        match self {
            DescFn::ClassAllSkills => vec![L::SUM, L::STATIC],
            DescFn::SkillTab => vec![L::SUM, L::STATIC, L::STATIC],
            DescFn::ChanceToCast => vec![L::SUM, L::STATIC, L::STATIC],
            DescFn::Aura => vec![L::SUM, L::STATIC],
            DescFn::VersusMonster => vec![L::SUM, L::STATIC],
            DescFn::Charges => vec![L::STATIC, L::STATIC, L::SUM, L::SUM],
            DescFn::ClassSkill => vec![L::SUM, L::STATIC, L::STATIC],
            DescFn::Skill => vec![L::SUM, L::STATIC],
            _ => vec![L::SUM],
        }
    }
}

/// Where the number goes relative to the localized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "i32")]
pub enum DescValPosition {
    #[default]
    Hide,
    Prefix,
    Postfix,
}

impl From<i32> for DescValPosition {
    fn from(id: i32) -> Self {
        match id {
            1 => DescValPosition::Prefix,
            2 => DescValPosition::Postfix,
            _ => DescValPosition::Hide,
        }
    }
}

/// Fill a localized template.
///
/// `%d`, `%s` and `%v` each consume the next argument in order; `%%` is a
/// literal percent sign. Placeholders without a matching argument render
/// as nothing.
///
/// # Examples
///
/// ```rust
/// use lootstat::describe::fill_template;
///
/// let text = fill_template("%d%% Chance to cast level %d %s on attack", &["5", "7", "Frozen Orb"]);
/// assert_eq!(text, "5% Chance to cast level 7 Frozen Orb on attack");
/// ```
pub fn fill_template<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('d') | Some('s') | Some('v') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg.as_ref());
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

/// Render a stat as one line of item text.
pub fn render(record: &StatRecord, values: &[StatValue], catalog: &Catalog) -> String {
    let text = Text {
        record,
        values,
        catalog,
    };

    match record.desc_fn {
        DescFn::Hidden => String::new(),
        DescFn::Signed => text.positioned(signed(text.int(0))),
        DescFn::SignedPercent => text.positioned(signed_percent(text.int(0))),
        DescFn::Plain => text.positioned(text.plain(0)),
        DescFn::UnsignedPercent => text.positioned(format!("{}%", text.int(0))),
        DescFn::SignedWithSuffix => text.positioned_with_suffix(signed(text.int(0))),
        DescFn::SignedPercentWithSuffix => {
            text.positioned_with_suffix(signed_percent(text.int(0)))
        }
        DescFn::PlainWithSuffix => text.positioned_with_suffix(text.plain(0)),
        DescFn::Template => fill_template(text.main_string(), &[text.plain(0)]),
        DescFn::ClassAllSkills => text.class_all_skills(),
        DescFn::SkillTab => text.skill_tab(),
        DescFn::ChanceToCast => fill_template(
            catalog.translate(&record.desc_str_pos),
            &[
                text.int(0).to_string(),
                text.int(1).to_string(),
                text.skill_name(2).to_string(),
            ],
        ),
        DescFn::Aura => fill_template(
            catalog.translate(&record.desc_str_pos),
            &[text.int(0).to_string(), text.skill_name(1).to_string()],
        ),
        DescFn::VersusMonster => format!(
            "{}% {} {}",
            text.int(0),
            catalog.translate(&record.desc_str_pos),
            text.monster_name(1)
        ),
        DescFn::Charges => {
            let charges = fill_template(
                catalog.translate(&record.desc_str_pos),
                &[text.int(3).to_string(), text.int(2).to_string()],
            );
            format!(
                "Level {} {} {}",
                text.plain(0),
                text.skill_name(1),
                charges
            )
        }
        DescFn::ClassSkill if text.int(2) < 0 => text.skill(),
        DescFn::ClassSkill => format!(
            "{} to {} {}",
            signed(text.int(0)),
            text.skill_name(1),
            text.class_only(2)
        ),
        DescFn::Skill => text.skill(),
    }
}

fn signed(value: i32) -> String {
    format!("{:+}", value)
}

fn signed_percent(value: i32) -> String {
    format!("{:+}%", value)
}

/// Borrowed view over one stat for the rendering helpers.
struct Text<'a> {
    record: &'a StatRecord,
    values: &'a [StatValue],
    catalog: &'a Catalog,
}

impl<'a> Text<'a> {
    fn int(&self, index: usize) -> i32 {
        self.values.get(index).map(StatValue::as_int).unwrap_or(0)
    }

    fn plain(&self, index: usize) -> String {
        self.values
            .get(index)
            .map(ToString::to_string)
            .unwrap_or_else(|| String::from("0"))
    }

    /// The positive or negative string, picked by the sign of the first value.
    fn main_string(&self) -> &'a str {
        let key = if self.int(0) < 0 {
            &self.record.desc_str_neg
        } else {
            &self.record.desc_str_pos
        };
        self.catalog.translate(key)
    }

    fn positioned(&self, number: String) -> String {
        let text = self.main_string();
        match self.record.desc_val {
            DescValPosition::Prefix => format!("{} {}", number, text),
            DescValPosition::Postfix => format!("{} {}", text, number),
            DescValPosition::Hide => text.to_string(),
        }
    }

    fn positioned_with_suffix(&self, number: String) -> String {
        let text = self.main_string();
        let suffix = self.catalog.translate(&self.record.desc_str2);
        match self.record.desc_val {
            DescValPosition::Prefix => format!("{} {} {}", number, text, suffix),
            DescValPosition::Postfix => format!("{} {} {}", text, number, suffix),
            DescValPosition::Hide => format!("{} {}", number, suffix),
        }
    }

    fn skill_name(&self, index: usize) -> &'a str {
        self.catalog
            .skill_name(self.int(index))
            .unwrap_or(SKILL_NOT_FOUND)
    }

    fn monster_name(&self, index: usize) -> &'a str {
        match self.catalog.monster_name(self.int(index)) {
            Some(name) => self.catalog.translate(name),
            None => {
                tracing::debug!(monster = self.int(index), "monster lookup missed");
                MONSTER_NOT_FOUND
            }
        }
    }

    fn class_only(&self, index: usize) -> &'a str {
        self.catalog
            .hero_class(self.int(index))
            .map(|hero| self.catalog.translate(&hero.skill_str_class_only))
            .unwrap_or(CLASS_NOT_FOUND)
    }

    fn class_all_skills(&self) -> String {
        let number = signed(self.int(0));
        let all_skills = self
            .catalog
            .hero_class(self.int(1))
            .map(|hero| self.catalog.translate(&hero.skill_str_all))
            .unwrap_or(CLASS_NOT_FOUND);

        match self.record.desc_val {
            DescValPosition::Prefix => format!("{} {}", number, all_skills),
            DescValPosition::Postfix => format!("{} {}", all_skills, number),
            DescValPosition::Hide => all_skills.to_string(),
        }
    }

    fn skill_tab(&self) -> String {
        let number = signed(self.int(0));
        let Some(hero) = self.catalog.hero_class(self.int(1)) else {
            return format!("{} {}", number, CLASS_NOT_FOUND);
        };

        let mut tab = self.int(2);
        if !(0..=MAX_SKILL_TAB).contains(&tab) {
            tab = 0;
        }

        let tab_key = hero
            .skill_str_tab
            .get(tab as usize)
            .map(String::as_str)
            .unwrap_or_default();
        let tab_text = self
            .catalog
            .translate(tab_key)
            .replace(SKILL_TAB_TOKEN, "");
        let class_only = self.catalog.translate(&hero.skill_str_class_only);

        format!("{} {} {}", number, tab_text, class_only)
    }

    fn skill(&self) -> String {
        format!("{} to {}", signed(self.int(0)), self.skill_name(1))
    }
}
