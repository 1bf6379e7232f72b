#![allow(dead_code)]

use lootstat::{Catalog, GeneratorConfig, ItemGenerator};

pub const CATALOG_JSON: &str = r#"{
    "stats": [
        { "name": "strength", "desc_fn": 1, "desc_val": 1, "desc_priority": 67,
          "desc_str_pos": "to Strength", "desc_str_neg": "to Strength" },
        { "name": "dexterity", "desc_fn": 1, "desc_val": 1, "desc_priority": 65,
          "desc_str_pos": "to Dexterity", "desc_str_neg": "to Dexterity" },
        { "name": "vitality", "desc_fn": 1, "desc_val": 1, "desc_priority": 63,
          "desc_str_pos": "to Vitality", "desc_str_neg": "to Vitality" },
        { "name": "energy", "desc_fn": 1, "desc_val": 1, "desc_priority": 61,
          "desc_str_pos": "to Energy", "desc_str_neg": "to Energy" },
        { "name": "hpregen", "desc_fn": 1, "desc_val": 2, "desc_priority": 56,
          "desc_str_pos": "Replenish Life", "desc_str_neg": "Drain Life" },
        { "name": "toblock", "desc_fn": 2, "desc_val": 1, "desc_priority": 134,
          "desc_str_pos": "Increased Chance of Blocking", "desc_str_neg": "Increased Chance of Blocking" },
        { "name": "item_absorblight_percent", "desc_fn": 2, "desc_val": 2, "desc_priority": 18,
          "desc_str_pos": "Lightning Absorb", "desc_str_neg": "Lightning Absorb" },
        { "name": "item_restinpeace", "desc_fn": 3, "desc_val": 0, "desc_priority": 81,
          "desc_str_pos": "Slain Monsters Rest in Peace", "desc_str_neg": "Slain Monsters Rest in Peace" },
        { "name": "normal_damage_reduction", "desc_fn": 3, "desc_val": 2, "desc_priority": 22,
          "desc_str_pos": "Damage Reduced by", "desc_str_neg": "Damage Reduced by" },
        { "name": "poisonresist", "desc_fn": 4, "desc_val": 2, "desc_priority": 28,
          "desc_str_pos": "Poison Resist", "desc_str_neg": "Poison Resist" },
        { "name": "fireresist", "desc_fn": 4, "desc_val": 2, "desc_priority": 36,
          "desc_str_pos": "Fire Resist", "desc_str_neg": "Fire Resist" },
        { "name": "coldresist", "desc_fn": 4, "desc_val": 2, "desc_priority": 32,
          "desc_str_pos": "Cold Resist", "desc_str_neg": "Cold Resist" },
        { "name": "item_fastermovevelocity", "desc_fn": 4, "desc_val": 1, "desc_priority": 148,
          "desc_str_pos": "Faster Run/Walk", "desc_str_neg": "Faster Run/Walk" },
        { "name": "item_howl", "desc_fn": 5, "desc_val": 2, "desc_priority": 97,
          "desc_str_pos": "Hit Causes Monster to Flee", "desc_str_neg": "Hit Causes Monster to Flee" },
        { "name": "item_hp_perlevel", "desc_fn": 6, "desc_val": 1, "desc_priority": 58,
          "desc_str_pos": "to Life", "desc_str_neg": "to Life", "desc_str2": "(Based on Character Level)" },
        { "name": "item_resist_ltng_perlevel", "desc_fn": 7, "desc_val": 2, "desc_priority": 33,
          "desc_str_pos": "Lightning Resist", "desc_str_neg": "Lightning Resist",
          "desc_str2": "(Based on Character Level)" },
        { "name": "item_find_magic_perlevel", "desc_fn": 7, "desc_val": 1, "desc_priority": 7,
          "desc_str_pos": "Better Chance of Getting Magic Items",
          "desc_str_neg": "Better Chance of Getting Magic Items",
          "desc_str2": "(Based on Character Level)" },
        { "name": "item_armorpercent_perlevel", "desc_fn": 8, "desc_val": 1, "desc_priority": 86,
          "desc_str_pos": "Enhanced Defense", "desc_str_neg": "Enhanced Defense",
          "desc_str2": "(Based on Character Level)" },
        { "name": "item_regenstamina_perlevel", "desc_fn": 8, "desc_val": 2, "desc_priority": 52,
          "desc_str_pos": "Heal Stamina Plus", "desc_str_neg": "Heal Stamina Plus",
          "desc_str2": "(Based on Character Level)" },
        { "name": "item_thorns_perlevel", "desc_fn": 9, "desc_val": 2, "desc_priority": 12,
          "desc_str_pos": "Attacker Takes Damage of", "desc_str_neg": "Attacker Takes Damage of",
          "desc_str2": "(Based on Character Level)" },
        { "name": "item_replenish_durability", "desc_fn": 11, "desc_val": 1, "desc_priority": 1,
          "desc_str_pos": "Repairs %v durability per second",
          "desc_str_neg": "Repairs %v durability per second" },
        { "name": "item_stupidity", "desc_fn": 12, "desc_val": 2, "desc_priority": 30,
          "desc_str_pos": "Hit Blinds Target", "desc_str_neg": "Hit Blinds Target" },
        { "name": "item_addclassskills", "desc_fn": 13, "desc_val": 1, "desc_priority": 150 },
        { "name": "item_addskill_tab", "desc_fn": 14, "desc_val": 1, "desc_priority": 151 },
        { "name": "item_skillonattack", "desc_fn": 15, "desc_val": 1, "desc_priority": 160,
          "desc_str_pos": "%d%% Chance to cast level %d %s on attack",
          "desc_str_neg": "%d%% Chance to cast level %d %s on attack" },
        { "name": "item_aura", "desc_fn": 16, "desc_val": 1, "desc_priority": 159,
          "desc_str_pos": "Level %d %s Aura When Equipped",
          "desc_str_neg": "Level %d %s Aura When Equipped" },
        { "name": "item_fractionaltargetac", "desc_fn": 20, "desc_val": 1, "desc_priority": 118,
          "desc_str_pos": "Target Defense", "desc_str_neg": "Target Defense" },
        { "name": "attack_vs_montype", "desc_fn": 22, "desc_val": 1, "desc_priority": 108,
          "desc_str_pos": "to Attack Rating versus", "desc_str_neg": "to Attack Rating versus" },
        { "name": "item_reanimate", "desc_fn": 23, "desc_val": 2, "desc_priority": 17,
          "desc_str_pos": "Reanimate as:", "desc_str_neg": "Reanimate as:" },
        { "name": "item_charged_skill", "desc_fn": 24, "desc_val": 2, "desc_priority": 2,
          "desc_str_pos": "(%d/%d Charges)", "desc_str_neg": "(%d/%d Charges)" },
        { "name": "item_singleskill", "desc_fn": 27, "desc_val": 2, "desc_priority": 81 },
        { "name": "item_nonclassskill", "desc_fn": 28, "desc_val": 2, "desc_priority": 81 },
        { "name": "item_armor_percent", "desc_fn": 4, "desc_val": 1, "desc_priority": 74,
          "desc_str_pos": "Enhanced Defense", "desc_str_neg": "Enhanced Defense" },
        { "name": "item_numsockets", "desc_fn": 0 }
    ],

    "properties": [
        { "code": "str", "effects": [{ "func": 1, "stat": "strength" }] },
        { "code": "dex", "effects": [{ "func": 1, "stat": "dexterity" }] },
        { "code": "regen", "effects": [{ "func": 1, "stat": "hpregen" }] },
        { "code": "block", "effects": [{ "func": 1, "stat": "toblock" }] },
        { "code": "res-pois", "effects": [{ "func": 1, "stat": "poisonresist" }] },
        { "code": "res-fc", "effects": [{ "func": 1, "stat": "fireresist" },
                                        { "func": 3, "stat": "coldresist" }] },
        { "code": "move1", "effects": [{ "func": 1, "stat": "item_fastermovevelocity" }] },
        { "code": "ac%", "effects": [{ "func": 2, "stat": "item_armor_percent" }] },
        { "code": "rip", "effects": [{ "func": 1, "stat": "item_restinpeace" }] },
        { "code": "pal", "effects": [{ "func": 21, "stat": "item_addclassskills", "value": 3 }] },
        { "code": "skilltab", "effects": [{ "func": 10, "stat": "item_addskill_tab" }] },
        { "code": "hit-skill", "effects": [{ "func": 11, "stat": "item_skillonattack" }] },
        { "code": "aura", "effects": [{ "func": 22, "stat": "item_aura" }] },
        { "code": "oskill", "effects": [{ "func": 22, "stat": "item_nonclassskill" }] },
        { "code": "charged", "effects": [{ "func": 19, "stat": "item_charged_skill" }] },
        { "code": "dmg-min", "effects": [{ "func": 5 }] },
        { "code": "dmg-max", "effects": [{ "func": 6 }] },
        { "code": "dmg%", "effects": [{ "func": 7 }] },
        { "code": "indestruct", "effects": [{ "func": 20 }] },
        { "code": "ethereal", "effects": [{ "func": 23 }] },
        { "code": "sock", "effects": [{ "func": 14, "stat": "item_numsockets" }] }
    ],

    "item_types": [
        { "code": "armo" },
        { "code": "tors", "equiv": ["armo"] },
        { "code": "weap" },
        { "code": "swor", "equiv": ["weap"] },
        { "code": "ring" },
        { "code": "amul", "rare": false },
        { "code": "jew" },
        { "code": "gold", "normal": true }
    ],

    "base_items": [
        { "code": "qui", "name": "qui", "item_type": "tors", "level": 1,
          "min_ac": 8, "max_ac": 11, "durability": 20, "sockets": 2 },
        { "code": "lea", "name": "lea", "item_type": "tors", "level": 3,
          "min_ac": 14, "max_ac": 17, "durability": 24, "sockets": 2 },
        { "code": "scl", "name": "scl", "item_type": "tors", "level": 22, "min_ac": 57, "max_ac": 65 },
        { "code": "chn", "name": "chn", "item_type": "tors", "level": 23, "min_ac": 72, "max_ac": 75 },
        { "code": "brs", "name": "brs", "item_type": "tors", "level": 24, "min_ac": 65, "max_ac": 68 },
        { "code": "spl", "name": "spl", "item_type": "tors", "level": 25, "min_ac": 90, "max_ac": 95 },
        { "code": "plt", "name": "plt", "item_type": "tors", "level": 26, "min_ac": 108, "max_ac": 116 },
        { "code": "ssd", "name": "ssd", "item_type": "swor", "level": 1,
          "min_damage": 2, "max_damage": 7, "durability": 24, "sockets": 2 },
        { "code": "rin", "name": "rin", "item_type": "ring", "level": 1 },
        { "code": "amu", "name": "amu", "item_type": "amul", "level": 1 },
        { "code": "jew", "name": "jew", "item_type": "jew", "level": 1 },
        { "code": "gld", "name": "gld", "item_type": "gold" }
    ],

    "uniques": [
        { "code": "Nagelring", "name": "Nagelring", "base": "rin", "level": 7,
          "properties": [{ "code": "oskill", "param": "Warmth", "min": 2, "max": 2 },
                         { "code": "str", "min": 5, "max": 5 }] },
        { "code": "Greyform", "name": "Greyform", "base": "qui", "level": 7,
          "properties": [{ "code": "ac%", "min": 20, "max": 20 },
                         { "code": "dex", "min": 10, "max": 10 },
                         { "code": "sock", "min": 3, "max": 3 }] },
        { "code": "Rixot's Keen", "name": "Rixot's Keen", "base": "ssd", "level": 3,
          "properties": [{ "code": "dmg%", "min": 100, "max": 100 },
                         { "code": "dmg-min", "min": 5, "max": 5 },
                         { "code": "indestruct", "min": 1, "max": 1 },
                         { "code": "hit-skill", "param": "Frozen Orb", "min": 5, "max": 7 }] },
        { "code": "Hammer of Light", "name": "Hammer of Light", "base": "amu", "level": 30,
          "properties": [{ "code": "pal", "min": 2, "max": 2 },
                         { "code": "skilltab", "param": 10, "min": 1, "max": 1 },
                         { "code": "charged", "param": "Frozen Orb", "min": 20, "max": 25 }] }
    ],

    "set_items": [
        { "code": "Sigon's Shelter", "name": "Sigon's Shelter", "set": "Sigon's Complete Steel",
          "base": "qui", "level": 9,
          "properties": [{ "code": "ac%", "min": 25, "max": 25 },
                         { "code": "res-pois", "min": 30, "max": 30 }] }
    ],

    "prefixes": [
        { "code": "Sturdy", "name": "Sturdy", "include": ["armo"], "level": 1,
          "modifiers": [{ "code": "ac%", "min": 10, "max": 20 }] },
        { "code": "Strong", "name": "Strong", "include": ["armo", "ring", "jew"], "level": 1,
          "modifiers": [{ "code": "str", "min": 1, "max": 3 }] },
        { "code": "Jagged", "name": "Jagged", "include": ["weap"], "level": 1,
          "modifiers": [{ "code": "dmg%", "min": 50, "max": 50 }] },
        { "code": "Crimson", "name": "Crimson", "include": ["armo", "jew"], "level": 20,
          "modifiers": [{ "code": "res-fc", "min": 15, "max": 15 }] }
    ],

    "suffixes": [
        { "code": "of the Fox", "name": "of the Fox", "include": ["armo", "weap", "ring", "jew"], "level": 1,
          "modifiers": [{ "code": "dex", "min": 2, "max": 2 }] },
        { "code": "of Maiming", "name": "of Maiming", "include": ["weap"], "level": 1,
          "modifiers": [{ "code": "dmg-max", "min": 3, "max": 3 }] },
        { "code": "of Life", "name": "of Life", "include": ["armo", "ring", "jew"], "exclude": ["tors"], "level": 1,
          "modifiers": [{ "code": "regen", "min": 3, "max": 3 }] }
    ],

    "treasure_classes": [
        { "code": "Gold Only", "picks": 1, "treasures": [{ "code": "gld", "probability": 1 }] },
        { "code": "Armor 23", "picks": 1, "treasures": [{ "code": "armo23", "probability": 1 }] },
        { "code": "Half Empty", "picks": 1, "freq_no_drop": 30,
          "treasures": [{ "code": "rin", "probability": 10 }, { "code": "amu", "probability": 20 }] },
        { "code": "Counted", "picks": -5,
          "treasures": [{ "code": "rin", "probability": 2 }, { "code": "qui", "probability": 1 },
                        { "code": "ssd", "probability": 5 }] },
        { "code": "No Uniques", "picks": 1, "freq_set": 800, "freq_rare": 800, "freq_magic": 1600,
          "treasures": [{ "code": "armo", "probability": 1 }] },
        { "code": "Unique Ring", "picks": 1, "freq_unique": 100000000,
          "treasures": [{ "code": "rin", "probability": 1 }] },
        { "code": "Act 1 Equip", "picks": 1, "freq_unique": 32, "freq_set": 64, "freq_rare": 128,
          "freq_magic": 512, "freq_no_drop": 10,
          "treasures": [{ "code": "armo", "probability": 5 }, { "code": "weap", "probability": 5 },
                        { "code": "ring", "probability": 2 }, { "code": "jew", "probability": 1 }] },
        { "code": "Act 1 Boss", "picks": 3,
          "treasures": [{ "code": "Act 1 Equip", "probability": 3 }, { "code": "Gold Only", "probability": 1 },
                        { "code": "Unique Ring", "probability": 1 }] }
    ],

    "hero_classes": [
        { "name": "Amazon", "skill_str_all": "to Amazon Skill Levels", "skill_str_class_only": "(Amazon Only)",
          "skill_str_tab": ["+%d to Bow and Crossbow Skills", "+%d to Passive and Magic Skills",
                            "+%d to Javelin and Spear Skills"] },
        { "name": "Sorceress", "skill_str_all": "to Sorceress Skill Levels",
          "skill_str_class_only": "(Sorceress Only)",
          "skill_str_tab": ["+%d to Fire Skills", "+%d to Lightning Skills", "+%d to Cold Skills"] },
        { "name": "Necromancer", "skill_str_all": "to Necromancer Skill Levels",
          "skill_str_class_only": "(Necromancer Only)",
          "skill_str_tab": ["+%d to Curses", "+%d to Poison and Bone Skills", "+%d to Summoning Skills"] },
        { "name": "Paladin", "skill_str_all": "to Paladin Skill Levels", "skill_str_class_only": "(Paladin Only)",
          "skill_str_tab": ["+%d to Combat Skills", "+%d to Offensive Auras", "+%d to Defensive Auras"] },
        { "name": "Barbarian", "skill_str_all": "to Barbarian Skill Levels",
          "skill_str_class_only": "(Barbarian Only)",
          "skill_str_tab": ["+%d to Warcries", "+%d to Combat Masteries", "+%d to Combat Skills"] },
        { "name": "Druid", "skill_str_all": "to Druid Skill Levels", "skill_str_class_only": "(Druid Only)",
          "skill_str_tab": ["+%d to Summoning Skills", "+%d to Shape Shifting Skills",
                            "+%d to Elemental Skills"] },
        { "name": "Assassin", "skill_str_all": "to Assassin Skill Levels",
          "skill_str_class_only": "(Assassin Only)",
          "skill_str_tab": ["+%d to Traps", "+%d to Shadow Disciplines", "+%d to Martial Arts"] }
    ],

    "skills": [{ "index": 37, "name": "Warmth" }, { "index": 64, "name": "Frozen Orb" }],

    "monsters": [{ "id": 40, "name": "Specter" }],

    "strings": {
        "qui": "Quilted Armor", "lea": "Leather Armor", "scl": "Scale Mail", "chn": "Chain Mail",
        "brs": "Breast Plate", "spl": "Splint Mail", "plt": "Plate Mail", "ssd": "Short Sword",
        "rin": "Ring", "amu": "Amulet", "jew": "Jewel", "gld": "Gold"
    }
}"#;

pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).unwrap()
}

pub fn generator(catalog: &Catalog, seed: u64) -> ItemGenerator<'_> {
    ItemGenerator::new(catalog, GeneratorConfig::with_seed(seed))
}
