use alloc::string::{String, ToString};
use alloc::vec::Vec;

use ix_meta::access::{EntityAccessor, Object, PropertyAccessor};
use ix_meta::info::ExportableProperty;
use ix_meta::value::{ENTITY_CLASS_KEY, Mapping, Value, format_atom};

use crate::{Error, FilterMode, PropertyFilter, Resolver, Result};

// -----------------------------------------------------------------------------
// Exporter

/// Converts objects into their plain representation.
///
/// Only properties carrying an [`ExportableProperty`] directive are exported.
/// Nested objects and list elements carry their concrete class under
/// [`ENTITY_CLASS_KEY`], unless they are collapsed to an identifier with
/// `reference_by_identifier`.
pub struct Exporter<'a> {
    resolver: &'a Resolver<'a>,
    accessor: &'a dyn PropertyAccessor,
}

impl<'a> Exporter<'a> {
    /// Creates an exporter reading properties through [`EntityAccessor`].
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self {
            resolver,
            accessor: &EntityAccessor,
        }
    }

    /// Replaces the property accessor.
    pub fn with_accessor(mut self, accessor: &'a dyn PropertyAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Exports `object`, applying `filter` to its properties.
    ///
    /// Nested entries of the filter apply to the sub-record of the property
    /// they are keyed by.
    pub fn export(
        &self,
        object: &Object,
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Mapping> {
        let class = object.class_name();
        let properties = self.resolver.exportable_properties(class);
        if properties.is_empty() {
            return Err(Error::NotExportable(String::from(class)));
        }

        let mut data = Mapping::default();
        for &(name, directive) in properties.iter() {
            if filter.skips(name, mode) {
                continue;
            }

            let value = self
                .accessor
                .get_value(object, name)
                .map_err(|source| Error::access(class, name, source))?;
            let exported =
                self.export_value(class, name, &directive, value, filter.nested(name), mode)?;
            data.insert(String::from(name), exported);
        }

        Ok(data)
    }

    /// Exports a list of elements.
    ///
    /// Non-object elements pass through unchanged. In include mode, a filter
    /// with exactly one plain entry names an identifier: each object is then
    /// exported as the bare value of that property.
    pub fn export_collection(
        &self,
        elements: &[Value],
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Vec<Value>> {
        let identifier = match mode {
            FilterMode::Include => filter.single(),
            FilterMode::Exclude => None,
        };

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            let value = match (element, identifier) {
                (Value::Object(object), Some(identifier)) => {
                    self.export_identifier(object, identifier)?
                }
                (Value::Object(object), None) => self.export_tagged(object, filter, mode)?,
                (other, _) => other.clone(),
            };
            values.push(value);
        }
        Ok(values)
    }

    fn export_value(
        &self,
        class: &str,
        property: &str,
        directive: &ExportableProperty,
        value: Value,
        nested: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Value> {
        let exported = match value {
            Value::Null => Value::Null,
            Value::DateTime(date) => Value::Text(format_atom(&date)),
            Value::List(items) => Value::List(self.export_list(&items, directive, nested, mode)?),
            Value::Map(map) if directive.as_list => {
                let items: Vec<Value> = map.into_values().collect();
                Value::List(self.export_list(&items, directive, nested, mode)?)
            }
            other if directive.as_list => {
                return Err(Error::NotAList {
                    class: String::from(class),
                    property: String::from(property),
                    value: other,
                });
            }
            Value::Object(object) => {
                if !self.resolver.is_exportable(object.class_name()) {
                    return Err(Error::UnknownExport {
                        class: String::from(class),
                        property: String::from(property),
                        found: String::from(object.class_name()),
                    });
                }
                match directive.identifier() {
                    Some(identifier) => self.export_identifier(&object, identifier)?,
                    None => self.export_tagged(&object, nested, mode)?,
                }
            }
            Value::Ulid(ulid) => Value::Text(ulid.to_string()),
            scalar => scalar,
        };
        Ok(exported)
    }

    fn export_list(
        &self,
        items: &[Value],
        directive: &ExportableProperty,
        nested: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Vec<Value>> {
        match directive.identifier() {
            Some(identifier) => {
                self.export_collection(items, &PropertyFilter::only([identifier]), FilterMode::Include)
            }
            None => self.export_collection(items, nested, mode),
        }
    }

    fn export_tagged(
        &self,
        object: &Object,
        filter: &PropertyFilter,
        mode: FilterMode,
    ) -> Result<Value> {
        let mut data = self.export(object, filter, mode)?;
        data.insert(
            String::from(ENTITY_CLASS_KEY),
            Value::from(object.class_name()),
        );
        Ok(Value::Map(data))
    }

    fn export_identifier(&self, object: &Object, identifier: &str) -> Result<Value> {
        let mut data = self.export(object, &PropertyFilter::only([identifier]), FilterMode::Include)?;
        data.shift_remove(identifier).ok_or_else(|| Error::MissingIdentifier {
            class: String::from(object.class_name()),
            identifier: String::from(identifier),
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
