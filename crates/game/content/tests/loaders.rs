use std::fs;

use skirmish_content::{ClassLoader, ConfigLoader, ContentConfig, ContentFactory, ScenarioBuilder};
use skirmish_core::{
    ClassOracle, PickupKind, Position, Side, StandardClasses, TerrainKind, UnitClass,
};
use strum::IntoEnumIterator;

#[test]
fn bundled_class_table_matches_builtin_profiles() {
    let table = ContentFactory::bundled().load_classes().unwrap();
    for class in UnitClass::iter() {
        assert!(table.overrides(class), "{class} missing from classes.ron");
        assert_eq!(table.profile(class), StandardClasses.profile(class), "{class}");
    }
}

#[test]
fn bundled_config_matches_defaults() {
    let config = ContentFactory::bundled().load_config().unwrap();
    assert_eq!(config, ContentConfig::default());
}

#[test]
fn bundled_map_loads() {
    let map = ContentFactory::bundled().load_map("crossing").unwrap();
    assert_eq!(map.dimensions().width, 10);
    assert_eq!(map.terrain_at(Position::new(4, 4)), Some(TerrainKind::Mud));
    assert_eq!(
        map.tile_at(Position::new(9, 0)).unwrap().pickup,
        Some(PickupKind::Bomb)
    );
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap(), ContentConfig::default());
    assert!(factory.load_classes().unwrap().is_empty());
    assert!(factory.load_map("nowhere").is_err());
}

#[test]
fn loaded_overrides_reach_the_scenario() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[game]\nmap_width = 9\nmap_height = 9\n\n[squads]\nplayers = [\"Medic\"]\nenemies = [\"Scout\", \"Scout\"]\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("classes.ron"),
        r#"{
            Medic: (
                max_health: 40, attack_power: 2, defense: 4, movement: 2,
                accuracy: 90, evasion: 10, crit_chance: 5,
                abilities: (
                    single: Strike(reach: Manhattan(3), damage: 5, pellets: 1, damage_type: Ranged),
                    group: Heal(area: Manhattan(2), amount: 3),
                    buff: (defense: 3),
                ),
            ),
        }"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let content = factory.load_config().unwrap();
    let classes = factory.load_classes().unwrap();
    let state = ScenarioBuilder::new(content.game, 21)
        .classes(&classes)
        .params(content.generation)
        .squads(content.squads)
        .build()
        .unwrap();

    assert_eq!(state.map.dimensions().width, 9);
    let medic = &state.roster.side(Side::Player)[0];
    assert_eq!(medic.max_health, 40);
    assert_eq!(medic.health, 40);
    assert_eq!(state.roster.side(Side::Enemy).len(), 2);
    assert!(state.roster.side(Side::Enemy).iter().all(|unit| unit.max_health == 12));
}

#[test]
fn loader_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let err = ConfigLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("config.toml"));

    let path = dir.path().join("classes.ron");
    fs::write(&path, "{ Pyro: (max_health: -1) }").unwrap();
    assert!(ClassLoader::load(&path).is_err());
}
