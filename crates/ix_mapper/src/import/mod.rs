use alloc::string::{String, ToString};
use alloc::vec::Vec;

use ix_meta::access::{EntityAccessor, Object, PropertyAccessor};
use ix_meta::info::ClassInfo;
use ix_meta::registry::{COLLECTION, DATE_TIME_INTERFACE, ULID};
use ix_meta::value::{ENTITY_CLASS_KEY, Mapping, Value, parse_datetime};
use ulid::Ulid;

use crate::resolver::ImportableField;
use crate::{Error, FilterMode, Identifier, ObjectStore, PropertyFilter, Resolver, Result, TypeDetails};

// -----------------------------------------------------------------------------
// Modules

mod identity;

// -----------------------------------------------------------------------------
// Exports

pub use identity::IdentityMap;

use identity::IdentityMapper;

// -----------------------------------------------------------------------------
// Importer

/// Builds objects from their plain representation.
///
/// The class to instantiate is taken from [`ENTITY_CLASS_KEY`] in the payload,
/// or from the target class given by the caller. Only properties carrying an
/// [`ImportableProperty`](ix_meta::info::ImportableProperty) directive are
/// populated; what a payload value turns into is decided by the declared type
/// of the property.
///
/// Integer and string values for object-typed properties are references to
/// stored records, resolved through the [`ObjectStore`]. Classes opted into
/// identity mapping are persisted right after import so references by their
/// old identifier can be redirected to the one the store assigned.
///
/// An importer is not reusable across unrelated batches: its identity map
/// only grows.
pub struct Importer<'a> {
    resolver: &'a Resolver<'a>,
    accessor: &'a dyn PropertyAccessor,
    store: Option<&'a mut dyn ObjectStore>,
    identity: IdentityMapper,
}

impl<'a> Importer<'a> {
    /// Creates an importer writing properties through [`EntityAccessor`].
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self {
            resolver,
            accessor: &EntityAccessor,
            store: None,
            identity: IdentityMapper::default(),
        }
    }

    /// Replaces the property accessor.
    pub fn with_accessor(mut self, accessor: &'a dyn PropertyAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Sets the store used to resolve references and to persist
    /// identity-mapped records.
    pub fn set_object_store(&mut self, store: &'a mut dyn ObjectStore) {
        self.store = Some(store);
    }

    /// Opts classes into identity mapping, replacing any earlier list.
    ///
    /// A record is mapped under the first listed class it is, extends or
    /// implements. Fails if no object store is set.
    pub fn set_identity_mapping_classes<I, S>(&mut self, classes: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.store.is_none() {
            return Err(Error::IdentityMappingWithoutStore);
        }
        self.identity
            .set_classes(classes.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Returns the identifiers mapped so far.
    #[inline]
    pub fn identity_map(&self) -> &IdentityMap {
        &self.identity.map
    }

    /// Creates an object from `data` and populates its importable properties.
    ///
    /// `target` is required when `data` names no class, and otherwise
    /// restricts the named class to itself and its subclasses.
    pub fn import(
        &mut self,
        data: &Mapping,
        target: Option<&str>,
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Object> {
        let info = self.resolve_class(data, target)?;
        let class = info.name();
        let instance = info
            .instantiate()
            .ok_or_else(|| Error::NotConstructible(String::from(class)))?;

        let fields = self.resolver.importable_properties(class);
        for field in fields.iter() {
            if filter.skips(field.name, mode) {
                continue;
            }
            let Some(raw) = data.get(field.name) else {
                continue;
            };

            let details = self.resolver.field_details(field)?;
            let value = self.import_value(class, field, &details, raw, filter.nested(field.name), mode)?;
            self.accessor
                .set_value(&instance, field.name, value)
                .map_err(|source| Error::access(class, field.name, source))?;
        }

        self.map_identity(data, &instance)?;
        Ok(instance)
    }

    /// Imports a list of elements.
    ///
    /// Integers and strings are references to records of `class`. Objects
    /// are kept as long as they are instances of `class`, mappings are
    /// imported with `class` as target.
    pub fn collection_from_list(
        &mut self,
        elements: &[Value],
        class: Option<&str>,
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Vec<Object>> {
        let registry = self.resolver.registry();
        let mut objects = Vec::with_capacity(elements.len());

        for element in elements {
            let object = match (element, class) {
                (Value::Int(_) | Value::Text(_), Some(class)) => self.resolve_reference(class, element)?,
                (Value::Object(object), Some(class))
                    if !registry.is_subclass_of(object.class_name(), class) =>
                {
                    return Err(Error::CollectionElementMismatch {
                        expected: String::from(class),
                        found: String::from(object.class_name()),
                    });
                }
                (Value::Object(object), _) => object.clone(),
                (Value::Map(map), _) => self.import(map, class, filter, mode)?,
                (other, _) => {
                    return Err(Error::InvalidCollectionElement {
                        value: other.clone(),
                    });
                }
            };
            objects.push(object);
        }

        Ok(objects)
    }

    /// Imports every mapping in `elements`, persisting and flushing each
    /// record right away.
    pub fn import_entity_collection(
        &mut self,
        elements: &[Value],
        class: Option<&str>,
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<()> {
        const OPERATION: &str = "importing an entity collection";
        self.store_mut(OPERATION)?;

        for element in elements {
            let Value::Map(map) = element else {
                return Err(Error::NotAMapping {
                    class: String::from(class.unwrap_or_default()),
                    value: element.clone(),
                });
            };

            let entity = self.import(map, class, filter, mode)?;
            let store = self.store_mut(OPERATION)?;
            store.persist(&entity)?;
            store.flush()?;
        }

        Ok(())
    }

    fn store_mut(&mut self, operation: &'static str) -> Result<&mut (dyn ObjectStore + 'a)> {
        self.store
            .as_deref_mut()
            .ok_or(Error::MissingObjectStore { operation })
    }

    fn resolve_class(&self, data: &Mapping, target: Option<&str>) -> Result<&'a ClassInfo> {
        let given = match data.get(ENTITY_CLASS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Text(name)) => Some(name.as_str()),
            Some(other) => return Err(Error::UnknownClass(other.to_string())),
        };
        let Some(name) = given.or(target).filter(|name| !name.is_empty()) else {
            return Err(Error::NoEntityClass {
                data: Value::Map(data.clone()),
            });
        };

        let registry = self.resolver.registry();
        let info = registry.get(name);
        if info.is_some_and(ClassInfo::is_interface) {
            return Err(Error::InterfaceNotInstantiable(String::from(name)));
        }
        let Some(info) = info else {
            return Err(Error::UnknownClass(String::from(name)));
        };

        if let (Some(given), Some(expected)) = (given, target)
            && !registry.is_subclass_of(given, expected)
        {
            return Err(Error::SubclassMismatch {
                given: String::from(given),
                expected: String::from(expected),
            });
        }
        if info.is_abstract() {
            return Err(Error::AbstractNotInstantiable(String::from(name)));
        }

        log::debug!("importing `{}`", info.name());
        Ok(info)
    }

    fn import_value(
        &mut self,
        class: &str,
        field: &ImportableField,
        details: &TypeDetails,
        raw: &Value,
        nested: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Value> {
        if raw.is_null() {
            if !details.allows_null {
                return Err(Error::NotNullable {
                    class: String::from(class),
                    property: String::from(field.name),
                });
            }
            return Ok(Value::Null);
        }

        if details.is_builtin {
            return match field.directive.list_of {
                Some(list_of) => self.process_list(class, field.name, list_of, raw, nested, mode),
                None => Ok(raw.clone()),
            };
        }

        if matches!(raw, Value::Object(_) | Value::DateTime(_) | Value::Ulid(_)) {
            return Ok(raw.clone());
        }

        // Untyped or a union of builtins: only an explicit class is imported.
        let Some(target) = details.classname else {
            return match raw {
                Value::Map(map) if raw.entity_class().is_some() => {
                    self.import(map, None, nested, mode).map(Value::Object)
                }
                _ => Ok(raw.clone()),
            };
        };

        // Interfaces have no properties, the payload must then name the class.
        if self.resolver.is_importable(target) || raw.entity_class().is_some() {
            return match raw {
                Value::Int(_) | Value::Text(_) => self.resolve_reference(target, raw).map(Value::Object),
                Value::Map(map) => self.import(map, Some(target), nested, mode).map(Value::Object),
                other => Err(Error::NotAMapping {
                    class: String::from(target),
                    value: other.clone(),
                }),
            };
        }

        let registry = self.resolver.registry();
        if registry.is_subclass_of(target, COLLECTION) {
            let list_of = field.directive.list_of;
            let objects = match raw {
                Value::List(items) => self.collection_from_list(items, list_of, nested, mode)?,
                Value::Map(map) => {
                    let items: Vec<Value> = map.values().cloned().collect();
                    self.collection_from_list(&items, list_of, nested, mode)?
                }
                other => {
                    return Err(Error::NotAList {
                        class: String::from(class),
                        property: String::from(field.name),
                        value: other.clone(),
                    });
                }
            };
            return Ok(Value::List(objects.into_iter().map(Value::Object).collect()));
        }

        if registry.is_subclass_of(target, DATE_TIME_INTERFACE) {
            return raw
                .as_str()
                .and_then(|text| parse_datetime(text).ok())
                .map(Value::DateTime)
                .ok_or_else(|| Error::InvalidDate {
                    class: String::from(class),
                    property: String::from(field.name),
                    value: raw.clone(),
                });
        }

        if registry.is_subclass_of(target, ULID) {
            return raw
                .as_str()
                .and_then(|text| Ulid::from_string(text).ok())
                .map(Value::Ulid)
                .ok_or_else(|| Error::InvalidUid {
                    class: String::from(class),
                    property: String::from(field.name),
                    value: raw.clone(),
                });
        }

        Err(Error::UnknownImport {
            class: String::from(class),
            property: String::from(field.name),
        })
    }

    /// Imports the entries of a builtin array declared as a list of `list_of`.
    ///
    /// Mapping keys are preserved. Entries that are neither mappings nor
    /// objects are kept as they are, so mixed lists survive a round trip.
    fn process_list(
        &mut self,
        class: &str,
        property: &str,
        list_of: &str,
        raw: &Value,
        nested: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Value> {
        match raw {
            Value::List(entries) => {
                let mut list = Vec::with_capacity(entries.len());
                for entry in entries {
                    list.push(self.list_entry(class, property, list_of, entry, nested, mode)?);
                }
                Ok(Value::List(list))
            }
            Value::Map(entries) => {
                let mut map = Mapping::default();
                for (key, entry) in entries {
                    let value = self.list_entry(class, property, list_of, entry, nested, mode)?;
                    map.insert(key.clone(), value);
                }
                Ok(Value::Map(map))
            }
            other => Err(Error::NotAList {
                class: String::from(class),
                property: String::from(property),
                value: other.clone(),
            }),
        }
    }

    fn list_entry(
        &mut self,
        class: &str,
        property: &str,
        list_of: &str,
        entry: &Value,
        nested: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Value> {
        match entry {
            Value::Object(object)
                if !self.resolver.registry().is_subclass_of(object.class_name(), list_of) =>
            {
                Err(Error::ListElementMismatch {
                    class: String::from(class),
                    property: String::from(property),
                    list_of: String::from(list_of),
                    found: String::from(object.class_name()),
                })
            }
            Value::Map(map) => self.import(map, Some(list_of), nested, mode).map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Finds the record of `class` identified by `raw`, translating the
    /// identifier through the identity map first if `class` is mapped.
    fn resolve_reference(&self, class: &str, raw: &Value) -> Result<Object> {
        let id = Identifier::try_from(raw).map_err(|_| Error::NotAMapping {
            class: String::from(class),
            value: raw.clone(),
        })?;
        let Some(store) = self.store.as_deref() else {
            return Err(Error::ReferenceWithoutStore {
                class: String::from(class),
                id,
            });
        };

        let registry = self.resolver.registry();
        let id = match self.identity.mapping_class(registry, class) {
            Some(mapping_class) => match self.identity.map.get(mapping_class, &id) {
                Some(mapped) => mapped.clone(),
                None => {
                    return Err(Error::ReferenceNotMapped {
                        class: String::from(class),
                        id,
                    });
                }
            },
            None => id,
        };

        let record = store.find(class, &id).ok_or_else(|| Error::ReferenceNotFound {
            class: String::from(class),
            id: id.clone(),
        })?;
        log::debug!("resolved reference `{class}#{id}`");
        Ok(record)
    }

    /// Persists an instance of an identity-mapped class and records its old
    /// and new identifiers.
    fn map_identity(&mut self, data: &Mapping, instance: &Object) -> Result<()> {
        let registry = self.resolver.registry();
        let Some(mapping_class) = self.identity.mapping_class(registry, instance.class_name()) else {
            return Ok(());
        };
        let mapping_class = String::from(mapping_class);

        let store = self
            .store
            .as_deref_mut()
            .ok_or(Error::IdentityMappingWithoutStore)?;
        store.persist(instance)?;
        store.flush()?;

        let old = data.get("id").and_then(|id| Identifier::try_from(id).ok());
        let new = self
            .accessor
            .get_value(instance, "id")
            .ok()
            .and_then(|id| Identifier::try_from(&id).ok());

        match (old, new) {
            (Some(old), Some(new)) => {
                log::debug!("mapped `{mapping_class}` identifier {old} to {new}");
                self.identity.map.record(&mapping_class, old, new);
            }
            _ => log::warn!(
                "cannot map identity of `{}` record, payload or stored record lacks an `id`",
                instance.class_name()
            ),
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
