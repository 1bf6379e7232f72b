mod common;

use lootstat::assembler::{apply_drop_modifier, ItemSpec};
use lootstat::catalog::{AffixKind, Treasure};
use lootstat::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A unique's properties render after reduction, in priority order.
#[test]
fn test_unique_ring() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 1);

    let ring = generator.new_item(&["rin", "Nagelring"]).unwrap();

    assert_eq!(ring.name(), "Nagelring");
    assert_eq!(ring.drop_modifier(), DropModifier::Unique);
    assert_eq!(ring.attributes().level, 7);
    assert_eq!(
        ring.stat_strings(&catalog),
        vec!["+2 to Warmth", "+5 to Strength"]
    );
}

#[test]
fn test_socketed_jewels() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 2);

    let mut armor = generator.new_item(&["qui", "Greyform"]).unwrap();
    assert_eq!(armor.socket_count(), 3);
    assert!((8..=11).contains(&armor.attributes().defense));
    assert_eq!(
        armor.stat_strings(&catalog),
        vec!["+20% Enhanced Defense", "+10 to Dexterity"]
    );

    for _ in 0..3 {
        let jewel = generator.new_item(&["jew", "of the Fox"]).unwrap();
        assert_eq!(jewel.name(), "Jewel of the Fox");
        armor.insert_socketed(jewel).unwrap();
    }

    let extra = generator.new_item(&["jew"]).unwrap();
    assert_eq!(
        armor.insert_socketed(extra),
        Err(ItemError::SocketsFull {
            code: Code::new("qui"),
            capacity: 3
        })
    );

    assert_eq!(armor.socketed().len(), 3);
    assert_eq!(armor.full_stat_list().len(), armor.stat_list().len() + 3);
    assert_eq!(
        armor.stat_strings(&catalog),
        vec!["+20% Enhanced Defense", "+16 to Dexterity"]
    );
}

#[test]
fn test_weapon_side_effects() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 3);

    let sword = generator.new_item(&["ssd", "Rixot's Keen"]).unwrap();
    let attributes = sword.attributes();

    assert!(attributes.indestructible);
    assert!(!attributes.ethereal);
    assert_eq!(attributes.damage.enhance_percent, 100);
    assert_eq!(attributes.damage.bonus_min, 5);
    assert_eq!(attributes.damage.effective(), (9, 14));
    assert_eq!(
        sword.stat_strings(&catalog),
        vec!["5% Chance to cast level 7 Frozen Orb on attack"]
    );

    let breakdown = sword.properties();
    assert_eq!(breakdown.len(), 4);
    assert_eq!(breakdown[0].label(), "unique Rixot's Keen: dmg%");
    assert_eq!(
        breakdown[0].integers(PropertyFn::DamagePercent).collect::<Vec<_>>(),
        vec![100]
    );
    assert!(breakdown[0].stats.is_empty());
    assert!(breakdown[2].flag(PropertyFn::Indestructible));
}

#[test]
fn test_class_skill_amulet() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 4);

    let amulet = generator.new_item(&["amu", "Hammer of Light"]).unwrap();
    assert_eq!(
        amulet.stat_strings(&catalog),
        vec![
            "+1 to Offensive Auras (Paladin Only)",
            "+2 to Paladin Skill Levels",
            "Level 25 Frozen Orb (20/20 Charges)",
        ]
    );
}

#[test]
fn test_magic_and_rare_naming() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 5);

    let magic = generator
        .new_item(&["qui", "Sturdy", "of the Fox"])
        .unwrap();
    assert_eq!(magic.drop_modifier(), DropModifier::Magic);
    assert_eq!(magic.name(), "Sturdy Quilted Armor of the Fox");

    let rare = generator.new_item(&["lea", "Sturdy", "Strong"]).unwrap();
    assert_eq!(rare.drop_modifier(), DropModifier::Rare);
    assert_eq!(rare.name(), "Sturdy Leather Armor");
    assert_eq!(rare.prefixes().len(), 2);
}

#[test]
fn test_set_item_wins() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 6);

    let armor = generator
        .new_item(&["qui", "Greyform", "Sigon's Shelter", "Sturdy"])
        .unwrap();
    assert_eq!(armor.name(), "Sigon's Shelter");
    assert_eq!(armor.drop_modifier(), DropModifier::Set);
    assert!(armor.unique().is_none());
    assert!(armor.prefixes().is_empty());
    assert_eq!(armor.socket_count(), 2);
    assert_eq!(
        armor.stat_strings(&catalog),
        vec!["+25% Enhanced Defense", "Poison Resist +30%"]
    );
}

#[test]
fn test_repeat_previous_function() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 7);

    let armor = generator.new_item(&["lea", "Crimson"]).unwrap();
    assert_eq!(
        armor.stat_strings(&catalog),
        vec!["Fire Resist +15%", "Cold Resist +15%"]
    );

    let evaluation = generator.evaluate_property("res-fc", &[10, 10]).unwrap();
    assert_eq!(evaluation.stats.len(), 2);
    assert_eq!(evaluation.stats[1].name().as_str(), "coldresist");
}

#[test]
fn test_affix_matching_uses_type_equivalence() {
    let catalog = common::catalog();

    let armor = catalog.base_item("qui").unwrap();
    let suffixes: Vec<&str> = catalog
        .affixes_for(AffixKind::Suffix, armor)
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(suffixes, vec!["of the Fox"]);

    let prefixes: Vec<&str> = catalog
        .affixes_for(AffixKind::Prefix, armor)
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    assert_eq!(prefixes, vec!["Strong", "Sturdy"]);

    let ring = catalog.base_item("rin").unwrap();
    assert_eq!(catalog.affixes_for(AffixKind::Suffix, ring).len(), 2);
}

#[test]
fn test_drop_modifier_application() {
    let catalog = common::catalog();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let ring = apply_drop_modifier(&catalog, &Code::new("rin"), DropModifier::Unique, &mut rng).unwrap();
    assert_eq!(ring, ItemSpec::new("rin").with_unique("Nagelring").with_modifier(DropModifier::Unique));

    let gold = apply_drop_modifier(&catalog, &Code::new("gld"), DropModifier::Rare, &mut rng).unwrap();
    assert_eq!(gold.modifier, DropModifier::None);

    for _ in 0..100 {
        let amulet =
            apply_drop_modifier(&catalog, &Code::new("amu"), DropModifier::Rare, &mut rng).unwrap();
        assert_eq!(amulet.modifier, DropModifier::Magic);

        let sword =
            apply_drop_modifier(&catalog, &Code::new("ssd"), DropModifier::Set, &mut rng).unwrap();
        assert_eq!(sword.modifier, DropModifier::Rare);
        assert!(sword.set_item.is_none());
    }
}

#[test]
fn test_item_from_treasure() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 9);

    let treasure = Treasure {
        code: Code::new("weap"),
        probability: 1,
    };
    let sword = generator.item_from_treasure(&treasure).unwrap().unwrap();
    assert_eq!(sword.base().as_str(), "ssd");
    assert_eq!(sword.name(), "Short Sword");

    let nothing = Treasure {
        code: Code::new("xyz"),
        probability: 1,
    };
    assert!(generator.item_from_treasure(&nothing).unwrap().is_none());
}

#[test]
fn test_assemble_spec_directly() {
    let catalog = common::catalog();
    let mut generator = common::generator(&catalog, 10);

    let spec = ItemSpec::new("ssd")
        .with_prefix("Jagged")
        .with_suffix("of Maiming")
        .with_modifier(DropModifier::Magic);
    let sword = generator.assemble_item(&spec).unwrap();

    assert_eq!(sword.name(), "Jagged Short Sword of Maiming");
    assert_eq!(sword.attributes().damage.effective(), (3, 13));
    assert!(sword.stat_strings(&catalog).is_empty());

    let sources: Vec<SourceKind> = sword.properties().iter().map(|p| p.source).collect();
    assert_eq!(sources, vec![SourceKind::Prefix, SourceKind::Suffix]);
}
