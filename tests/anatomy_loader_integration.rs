//! Anatomy file integration tests
//!
//! The shipped humanoid TOML must describe the same body as the built-in
//! anatomy and drive a store end to end.

use limb_tracker::anatomy::{load_anatomy, Anatomy};
use limb_tracker::body::BodyStore;
use limb_tracker::core::config::{config, set_config, DamageConfig};
use limb_tracker::core::error::LimbError;
use limb_tracker::core::types::PartId;
use limb_tracker::entity::character::Character;
use std::path::PathBuf;

fn humanoid_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/anatomy/humanoid.toml")
}

#[test]
fn test_humanoid_file_matches_builtin() {
    let loaded = load_anatomy(&humanoid_path()).unwrap();
    let builtin = Anatomy::standard();

    assert_eq!(loaded.anatomy.parts(), builtin.parts());
    assert_eq!(loaded.anatomy.table(), builtin.table());
    assert_eq!(loaded.config, DamageConfig::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_anatomy(&PathBuf::from("data/anatomy/does_not_exist.toml"));
    assert!(matches!(result, Err(LimbError::IoError(_))));
}

#[test]
fn test_loaded_store_uses_file_locale() {
    let mut loaded = load_anatomy(&humanoid_path()).unwrap();
    loaded.config.locale = "ja".to_string();
    let mut store = BodyStore::from_loaded(loaded);
    let mut hero = Character::with_max_hp("勇者", 100);
    hero.health = 10;

    let report = store
        .distribute_damage(&mut hero, "torso", &[PartId::new("heart")], 50)
        .unwrap();

    assert_eq!(report.events[0].part_name, "心臓");
    let status = store.status(hero.id).unwrap();
    assert_eq!(status[0].name, "頭");
}

/// Only test in this binary that touches the global config
#[test]
fn test_global_config_feeds_new_store() {
    let mut loaded = load_anatomy(&humanoid_path()).unwrap();
    loaded.config.locale = "ja".to_string();
    loaded.config.revive_fraction = 0.25;
    set_config(loaded.config.clone()).unwrap();
    assert_eq!(config(), &loaded.config);
    assert!(set_config(DamageConfig::default()).is_err());

    let mut store = BodyStore::new(loaded.anatomy);
    let mut hero = Character::with_max_hp("勇者", 100);
    hero.health = 0;
    assert!(store.handle_death(&mut hero));
    assert_eq!(hero.health, 25);
    assert_eq!(store.status(hero.id).unwrap()[0].name, "頭");
}
