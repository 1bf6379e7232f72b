//! Drop example: Rolling a treasure class and printing the loot
//!
//! This example demonstrates:
//! - Loading a catalog from JSON
//! - Seeding the generator
//! - Rolling nested treasure classes
//! - Rendering item names and stat lines
//!
//! Run with `RUST_LOG=lootstat=debug` to see every roll.

use lootstat::*;

const CATALOG: &str = include_str!("catalog.json");

fn main() -> Result<(), ItemError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::from_json(CATALOG)?;
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);

    println!("=== Treasure Drop (seed {}) ===\n", seed);

    let mut generator = ItemGenerator::new(&catalog, GeneratorConfig::with_seed(seed));

    for kill in 1..=5 {
        println!("Kill {}:", kill);
        for item in generator.items_from_treasure_class("Act 1 Boss")? {
            println!("  {} [{:?}]", item.name(), item.drop_modifier());
            let attributes = item.attributes();
            if attributes.defense > 0 {
                println!("    Defense: {}", attributes.defense);
            }
            let (min, max) = attributes.damage.effective();
            if max > 0 {
                println!("    Damage: {} to {}", min, max);
            }
            for line in item.stat_strings(&catalog) {
                println!("    {}", line);
            }
        }
        println!();
    }

    println!("=== Socketing ===\n");

    let mut armor = generator.new_item(&["qui", "Greyform"])?;
    while armor.socketed().len() < armor.socket_count() {
        armor.insert_socketed(generator.new_item(&["jew", "of the Fox"])?)?;
    }
    println!("{} ({} sockets filled)", armor.name(), armor.socketed().len());
    for line in armor.stat_strings(&catalog) {
        println!("  {}", line);
    }

    Ok(())
}
