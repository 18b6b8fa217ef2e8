//! Class table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::ClassTable;

/// Loader for class profiles from RON files.
///
/// The file is a map from class name to profile. Classes left out keep
/// their built-in profile.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path) -> LoadResult<ClassTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ClassTable> {
        let table: ClassTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class RON: {}", e))?;
        tracing::debug!(classes = table.len(), "loaded class table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{
        ClassOracle, DamageTags, GroupAbility, Reach, SingleAbility, StandardClasses, UnitClass,
    };

    #[test]
    fn partial_table_overrides_one_class() {
        let table = ClassLoader::parse(
            r#"{
                Sniper: (
                    max_health: 14,
                    attack_power: 6,
                    defense: 3,
                    movement: 3,
                    accuracy: 95,
                    evasion: 10,
                    crit_chance: 20,
                    weakness: ("MELEE"),
                    resistance: ("RANGED | FIRE"),
                    abilities: (
                        single: Strike(
                            reach: Euclidean(radius_sq: 49),
                            damage: 4,
                            pellets: 1,
                            damage_type: Ranged,
                        ),
                        group: Sunder(area: Euclidean(radius_sq: 2), defense: 5),
                        buff: (defense: 1, attack: 0),
                    ),
                ),
            }"#,
        )
        .unwrap();

        let sniper = table.profile(UnitClass::Sniper);
        assert_eq!(sniper.max_health, 14);
        assert_eq!(sniper.attack_range, 1);
        assert_eq!(sniper.weakness, DamageTags::MELEE);
        assert_eq!(sniper.resistance, DamageTags::RANGED | DamageTags::FIRE);
        assert!(matches!(
            sniper.abilities.single,
            SingleAbility::Strike { reach: Reach::Euclidean { radius_sq: 49 }, .. }
        ));
        assert!(matches!(sniper.abilities.group, GroupAbility::Sunder { defense: 5, .. }));
        assert_eq!(
            table.profile(UnitClass::Medic),
            StandardClasses.profile(UnitClass::Medic)
        );
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = ClassLoader::parse("{ Paladin: () }").unwrap_err();
        assert!(err.to_string().contains("class RON"));
    }
}
