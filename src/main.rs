//! Limb Tracker - Console Driver
//!
//! Loads an anatomy, creates one tracked character and lets you hit, heal
//! and restore it by hand while watching the body-part bookkeeping.

use clap::Parser;
use limb_tracker::anatomy::{load_anatomy, Anatomy};
use limb_tracker::body::{BodyStore, DamageReport, Prosthetic};
use limb_tracker::core::config::{set_config, DamageConfig};
use limb_tracker::core::error::Result;
use limb_tracker::core::types::{EquipSlot, PartId, StatId};
use limb_tracker::entity::character::{Character, Equipment};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::path::PathBuf;

/// Interactive body-part damage simulator
#[derive(Parser, Debug)]
#[command(name = "limb_sim")]
#[command(about = "Hit, heal and restore a character's body parts by hand")]
struct Args {
    /// Anatomy TOML file (built-in humanoid when omitted)
    #[arg(long)]
    anatomy: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Max HP of the tracked character
    #[arg(long, default_value_t = 100)]
    max_hp: u32,

    /// Character name
    #[arg(long, default_value = "Hero")]
    name: String,

    /// Locale for part names (overrides the anatomy file)
    #[arg(long)]
    locale: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("limb_tracker=debug")),
        )
        .init();

    let args = Args::parse();

    let (anatomy, mut damage_config) = match &args.anatomy {
        Some(path) => {
            let loaded = load_anatomy(path)?;
            (loaded.anatomy, loaded.config)
        }
        None => (Anatomy::standard(), DamageConfig::default()),
    };
    if let Some(locale) = &args.locale {
        damage_config.locale = locale.clone();
    }

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Limb Tracker starting with seed {}", seed);

    if set_config(damage_config).is_err() {
        tracing::warn!("Damage config already set, keeping the existing one");
    }
    let mut store = BodyStore::new(anatomy);
    let mut hero = Character::with_max_hp(args.name.clone(), args.max_hp);
    store.ensure_initialized(hero.id, hero.max_health());

    println!("\n=== LIMB TRACKER ===");
    println!("Tracking {} ({} HP)", hero.name, hero.max_health());
    println!();
    println!("Commands:");
    println!("  hit <n>                - Deal n damage");
    println!("  heal <n>               - Recover n HP and heal every part by n");
    println!("  restore [n]            - Restore all parts, revive at n HP");
    println!("  fullheal / f           - Heal everything to max");
    println!("  equip <slot> <name>    - Equip an item (weapon, shield, head, body, accessory)");
    println!("  install <part> <name>  - Fit a prosthetic on a destroyed part");
    println!("  remove <part>          - Take a prosthetic off");
    println!("  status / s             - Show body parts");
    println!("  stats                  - Show derived stats");
    println!("  json                   - Dump body records as JSON");
    println!("  quit / q               - Exit");
    println!();

    loop {
        print!("[{} {}/{}] > ", hero.name, hero.health, hero.max_health());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "hit" => match words.next().and_then(|w| w.parse::<u32>().ok()) {
                Some(n) => {
                    hero.take_damage(n);
                    let report = store.apply_damage(&mut hero, n, &mut rng);
                    print_damage(&report);
                    if store.handle_death(&mut hero) {
                        println!("{} fell and was revived at {} HP.", hero.name, hero.health);
                    }
                }
                None => println!("Usage: hit <number>"),
            },
            "heal" => match words.next().and_then(|w| w.parse::<u32>().ok()) {
                Some(n) => {
                    hero.recover(n);
                    let report = store.heal(&mut hero, n);
                    for part in &report.restored {
                        println!("  {} works again.", part);
                    }
                }
                None => println!("Usage: heal <number>"),
            },
            "restore" => {
                let amount = words.next().and_then(|w| w.parse::<u32>().ok());
                store.restore_all(&mut hero, amount);
                println!("All parts restored. {} HP.", hero.health);
            }
            "fullheal" | "f" => {
                store.fully_heal(&mut hero);
                println!("{} is fully healed.", hero.name);
            }
            "equip" => {
                let slot = words.next().and_then(parse_slot);
                let name: Vec<&str> = words.collect();
                match slot {
                    Some(slot) if !name.is_empty() => {
                        match store.equip(&mut hero, slot, Equipment::new(name.join(" "))) {
                            Ok(_) => println!("Equipped {} on {}.", name.join(" "), slot.name()),
                            Err(e) => println!("Cannot equip: {}", e),
                        }
                    }
                    _ => println!("Usage: equip <slot> <name>"),
                }
            }
            "install" => {
                let part = words.next().map(PartId::new);
                let name: Vec<&str> = words.collect();
                match part {
                    Some(part) if !name.is_empty() => {
                        let prosthetic = Prosthetic::new(name.join(" "));
                        match store.install_prosthetic(&mut hero, &part, prosthetic) {
                            Ok(()) => println!("Prosthetic fitted on {}.", part),
                            Err(e) => println!("Cannot install: {}", e),
                        }
                    }
                    _ => println!("Usage: install <part> <name>"),
                }
            }
            "remove" => match words.next().map(PartId::new) {
                Some(part) => match store.remove_prosthetic(&mut hero, &part) {
                    Ok((prosthetic, events)) => {
                        println!("Removed {}.", prosthetic.name);
                        for event in events {
                            println!("  {}", event.message);
                        }
                    }
                    Err(e) => println!("Cannot remove: {}", e),
                },
                None => println!("Usage: remove <part>"),
            },
            "status" | "s" => display_status(&store, &hero)?,
            "stats" => {
                for stat in StatId::all() {
                    println!(
                        "  {:<10} {:>4} (base {})",
                        stat.name(),
                        store.compute_stat(&hero, stat),
                        hero.base[stat]
                    );
                }
            }
            "json" => println!("{}", store.export_json()?),
            _ => println!(
                "Unknown command. Available: hit, heal, restore, fullheal, equip, install, \
                 remove, status, stats, json, quit"
            ),
        }
    }

    println!("\nGoodbye! {} ends at {} HP.", hero.name, hero.health);
    Ok(())
}

fn parse_slot(word: &str) -> Option<EquipSlot> {
    match word {
        "weapon" => Some(EquipSlot::Weapon),
        "shield" => Some(EquipSlot::Shield),
        "head" => Some(EquipSlot::Head),
        "body" => Some(EquipSlot::Body),
        "accessory" => Some(EquipSlot::Accessory),
        _ => None,
    }
}

fn print_damage(report: &DamageReport) {
    let parts: Vec<&str> = report.parts_hit.iter().map(|p| p.as_str()).collect();
    println!(
        "  Hit {} ({}) - parts absorbed {}",
        report.location.as_deref().unwrap_or("nothing"),
        parts.join(", "),
        report.absorbed
    );
    for event in &report.events {
        match (event.stat, event.amount) {
            (Some(stat), Some(amount)) => {
                println!("  {} ({} {:+})", event.message, stat.name(), amount)
            }
            _ => println!("  {}", event.message),
        }
        if let Some(item) = &event.unequipped {
            println!("    {} fell to the ground.", item);
        }
        if let Some(prosthetic) = &event.prosthetic_lost {
            println!("    The {} was wrecked.", prosthetic);
        }
    }
}

fn display_status(store: &BodyStore, hero: &Character) -> Result<()> {
    println!("\n--- {} ---", hero.name);
    println!("HP: {}/{}", hero.health, hero.max_health());
    for row in store.status(hero.id)? {
        let state = if let Some(prosthetic) = &row.prosthetic {
            format!("prosthetic: {}", prosthetic)
        } else if row.destroyed {
            "DESTROYED".to_string()
        } else {
            format!("{}/{}", row.current_health, row.max_health)
        };
        let vital = if row.vital { "*" } else { " " };
        println!("  {}{:<12} {}", vital, row.name, state);
    }
    println!();
    Ok(())
}
