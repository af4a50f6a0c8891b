//! Integration tests for loading and querying the vocation registry

use std::collections::HashSet;
use std::path::PathBuf;

use vocation_registry::core::config::ServerConfig;
use vocation_registry::core::error::VocationError;
use vocation_registry::core::types::{Skill, VocationId};
use vocation_registry::vocation::{
    init_vocations, vocations, TomlVocationSource, VocationRegistry, WeaponCategory,
};

fn shipped_definitions() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/vocations.toml")
}

fn load_shipped() -> VocationRegistry {
    VocationRegistry::load(&TomlVocationSource::from_path(shipped_definitions()))
        .expect("shipped definitions should load")
}

#[test]
fn test_shipped_definitions_load() {
    let registry = load_shipped();
    assert_eq!(registry.len(), 10);

    let ids: HashSet<VocationId> = registry.iter().map(|v| v.id).collect();
    assert_eq!(ids.len(), registry.len(), "ids must be unique");

    for id in 0..=9u16 {
        assert_eq!(registry.get(VocationId(id)).unwrap().id, VocationId(id));
    }
    assert!(registry.get(VocationId(9999)).is_none());
}

#[test]
fn test_shipped_promotions() {
    let registry = load_shipped();

    let expected = [(1, Some(5)), (2, Some(6)), (3, Some(7)), (4, Some(8))];
    for (from, to) in expected {
        assert_eq!(
            registry.promoted_vocation(VocationId(from)),
            to.map(VocationId),
            "promotion of {}",
            from
        );
    }

    // Promoted vocations have no further promotion, self-sourced ones never promote
    assert_eq!(registry.promoted_vocation(VocationId(5)), None);
    assert_eq!(registry.promoted_vocation(VocationId(0)), None);
    assert_eq!(registry.promoted_vocation(VocationId(9)), None);
}

#[test]
fn test_shipped_names_and_weapons() {
    let registry = load_shipped();

    assert_eq!(registry.id_by_name("Knight"), registry.id_by_name("knight"));
    assert_eq!(registry.id_by_name("elite knight"), Some(VocationId(8)));
    assert_eq!(registry.id_by_name("Necromancer"), None);

    let knight = registry.get_by_name("Knight").unwrap();
    assert_eq!(knight.weapon, WeaponCategory::Sword);
    assert_eq!(knight.skill_multiplier(Skill::Sword), 1.1);
    assert_eq!(knight.mana_multiplier(), 3.0);
    assert_eq!(knight.combat.defense, 1.1);
    assert_eq!(knight.combat.armor, 1.0);

    let monk = registry.get_by_name("monk").unwrap();
    assert_eq!(monk.weapon, WeaponCategory::Glove);
    assert_eq!(monk.skill_multiplier(Skill::Glove), 1.1);
    assert_eq!(monk.attack_speed, 1000);
}

#[test]
fn test_shipped_transformations() {
    let registry = load_shipped();
    let knight = registry.get(VocationId(4)).unwrap();

    assert!(!knight.can_transform(VocationId(8), 19));
    assert!(knight.can_transform(VocationId(8), 20));
    assert!(!knight.can_transform(VocationId(5), 100));

    assert_eq!(knight.looktype_for(VocationId(8)), 268);
    assert_eq!(knight.melee_damage_multiplier_for(VocationId(8)), 1.25);
    assert_eq!(knight.dist_damage_multiplier_for(VocationId(8)), 1.0);

    let transform = knight.transformation(VocationId(8)).unwrap();
    assert_eq!(transform.additional_health, Some(100));
    assert_eq!(transform.additional_mana, None);
    assert_eq!(transform.storage, Some(30008));
}

#[test]
fn test_scenario_from_document() {
    let source = TomlVocationSource::from_text(
        r#"
[[vocation]]
id = 1
name = "Sorcerer"
from_vocation = 0

[[vocation]]
id = 2
name = "Master Sorcerer"
from_vocation = 1

[[vocation]]
name = "Forgotten"
from_vocation = 2
"#,
    );
    let registry = VocationRegistry::load(&source).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.promoted_vocation(VocationId(1)), Some(VocationId(2)));
    assert_eq!(registry.promoted_vocation(VocationId(0)), Some(VocationId(1)));
    assert_eq!(registry.promoted_vocation(VocationId(2)), None);
    assert_eq!(registry.id_by_name("sorcerer"), Some(VocationId(1)));
    assert!(registry.get(VocationId(3)).is_none());
}

#[test]
fn test_unreadable_source_fails_load() {
    let source = TomlVocationSource::from_path("missing/vocations.toml");
    assert!(matches!(
        VocationRegistry::load(&source),
        Err(VocationError::IoError(_))
    ));

    let source = TomlVocationSource::from_text("[[vocation]\nid =");
    assert!(matches!(
        VocationRegistry::load(&source),
        Err(VocationError::TomlError(_))
    ));
}

#[test]
fn test_load_from_config_uses_baselines() {
    let mut config = ServerConfig::from_toml_str(
        r#"
[baselines]
base_speed = 220
gain_soul_ticks = 60
"#,
    )
    .unwrap();
    config.definitions_path = shipped_definitions();

    let registry = VocationRegistry::load_from_config(&config).unwrap();
    let druid = registry.get(VocationId(2)).unwrap();
    assert_eq!(druid.base_speed, 220);
    assert_eq!(druid.regeneration.soul_ticks, 60);
    assert_eq!(druid.attack_speed, 1300);
}

#[test]
fn test_global_registry_lifecycle() {
    assert!(vocations().is_none());

    let installed = init_vocations(load_shipped()).unwrap();
    assert_eq!(installed.len(), 10);
    assert_eq!(vocations().map(|r| r.len()), Some(10));

    let again = init_vocations(VocationRegistry::new());
    assert!(matches!(again, Err(VocationError::AlreadyInitialized)));
    assert_eq!(vocations().map(|r| r.len()), Some(10));
}
