use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use ix_meta::registry::ClassRegistry;

use crate::Identifier;

// -----------------------------------------------------------------------------
// IdentityMap

/// Old to new identifiers of imported records, per mapping class.
///
/// Populated by the [`Importer`](crate::Importer) for records whose class is
/// opted into identity mapping. Later references to an old identifier are
/// redirected to the identifier the store assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    classes: BTreeMap<String, BTreeMap<Identifier, Identifier>>,
}

impl IdentityMap {
    #[inline]
    pub const fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Returns the new identifier recorded for `old` under `class`.
    pub fn get(&self, class: &str, old: &Identifier) -> Option<&Identifier> {
        self.classes.get(class)?.get(old)
    }

    /// Returns every entry recorded under the mapping class `class`.
    pub fn class_entries(&self, class: &str) -> Option<&BTreeMap<Identifier, Identifier>> {
        self.classes.get(class)
    }

    /// Iterates mapping classes with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<Identifier, Identifier>)> {
        self.classes
            .iter()
            .map(|(class, entries)| (class.as_str(), entries))
    }

    /// Returns the total number of recorded identifiers.
    pub fn len(&self) -> usize {
        self.classes.values().map(BTreeMap::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn record(&mut self, class: &str, old: Identifier, new: Identifier) {
        self.classes
            .entry(String::from(class))
            .or_default()
            .insert(old, new);
    }
}

// -----------------------------------------------------------------------------
// IdentityMapper

/// The configured mapping classes together with the map they fill.
#[derive(Debug, Default)]
pub(crate) struct IdentityMapper {
    classes: Vec<String>,
    pub map: IdentityMap,
}

impl IdentityMapper {
    pub fn set_classes(&mut self, classes: Vec<String>) {
        self.classes = classes;
    }

    /// Returns the first configured class that `class` is, extends or implements.
    pub fn mapping_class(&self, registry: &ClassRegistry, class: &str) -> Option<&str> {
        self.classes
            .iter()
            .map(String::as_str)
            .find(|mapping| registry.is_subclass_of(class, mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::{IdentityMap, IdentityMapper};
    use crate::Identifier;
    use crate::test_fixtures::{CHILD_DTO, DTO_INTERFACE, NESTED_DTO, TEST_DTO, registry};
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn records_per_class() {
        let mut map = IdentityMap::new();
        assert!(map.is_empty());

        map.record("A", Identifier::Int(99999), Identifier::Int(1));
        map.record("A", Identifier::Int(77777), Identifier::Int(2));
        map.record("B", Identifier::from("x"), Identifier::Int(3));

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("A", &Identifier::Int(77777)), Some(&Identifier::Int(2)));
        assert_eq!(map.get("B", &Identifier::Int(77777)), None);
        assert_eq!(map.class_entries("A").map(|entries| entries.len()), Some(2));
        assert_eq!(map.iter().map(|(class, _)| class).collect::<vec::Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn first_matching_class_wins() {
        let registry = registry();
        let mut mapper = IdentityMapper::default();
        mapper.set_classes(vec![String::from(TEST_DTO), String::from(DTO_INTERFACE)]);

        assert_eq!(mapper.mapping_class(&registry, CHILD_DTO), Some(TEST_DTO));
        assert_eq!(mapper.mapping_class(&registry, NESTED_DTO), Some(DTO_INTERFACE));
        assert_eq!(mapper.mapping_class(&registry, "ExportEntity"), None);
    }
}
