//! Class tables that override the built-in profiles.

use std::collections::BTreeMap;

use skirmish_core::{ClassOracle, ClassProfile, StandardClasses, UnitClass};

/// Class profiles keyed by class. Classes missing from the table fall back to
/// [`StandardClasses`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassTable {
    profiles: BTreeMap<UnitClass, ClassProfile>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, class: UnitClass, profile: ClassProfile) -> Self {
        self.profiles.insert(class, profile);
        self
    }

    pub fn insert(&mut self, class: UnitClass, profile: ClassProfile) -> Option<ClassProfile> {
        self.profiles.insert(class, profile)
    }

    /// Whether `class` has an explicit entry.
    pub fn overrides(&self, class: UnitClass) -> bool {
        self.profiles.contains_key(&class)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ClassOracle for ClassTable {
    fn profile(&self, class: UnitClass) -> ClassProfile {
        self.profiles
            .get(&class)
            .copied()
            .unwrap_or_else(|| StandardClasses.profile(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_classes_use_builtin_profiles() {
        let mut sturdy = StandardClasses.profile(UnitClass::Scout);
        sturdy.max_health = 30;
        let table = ClassTable::new().with_profile(UnitClass::Scout, sturdy);

        assert_eq!(table.profile(UnitClass::Scout).max_health, 30);
        assert_eq!(
            table.profile(UnitClass::Pyro),
            StandardClasses.profile(UnitClass::Pyro)
        );
        assert!(table.overrides(UnitClass::Scout));
        assert!(!table.overrides(UnitClass::Medic));
    }
}
