//! Entities shared by the mapper tests.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset};
use ix_meta::access::{AccessError, Entity, Object};
use ix_meta::info::{
    Builtin, Class, ClassInfo, DeclaredType, ExportableEntity, ExportableProperty,
    ImportableEntity, ImportableProperty, PropertyInfo, TypeRef,
};
use ix_meta::registry::{COLLECTION, ClassRegistry, DATE_TIME_IMMUTABLE, ULID};
use ix_meta::value::{FromValue, Mapping, Value};
use ulid::Ulid;

pub(crate) const EXPORT_ENTITY: &str = "ExportEntity";
pub(crate) const IMPORT_ENTITY: &str = "ImportEntity";
pub(crate) const ABSTRACT_IMPORT_ENTITY: &str = "AbstractImportEntity";
pub(crate) const AUTOINCREMENT_ENTITY: &str = "AutoincrementEntity";
pub(crate) const DTO_INTERFACE: &str = "DtoInterface";
pub(crate) const TEST_DTO: &str = "TestDTO";
pub(crate) const NESTED_DTO: &str = "NestedDTO";
pub(crate) const CHILD_DTO: &str = "ChildDTO";

/// A class and property attribute that may be declared several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RepeatableAttribute(pub i64);

// -----------------------------------------------------------------------------
// Helpers

fn exported(name: &'static str, ty: DeclaredType) -> PropertyInfo {
    PropertyInfo::typed(name, ty).with_attribute(ExportableProperty::new())
}

fn imported(name: &'static str, ty: DeclaredType) -> PropertyInfo {
    PropertyInfo::typed(name, ty).with_attribute(ImportableProperty::new())
}

fn both(name: &'static str, ty: DeclaredType) -> PropertyInfo {
    exported(name, ty).with_attribute(ImportableProperty::new())
}

fn builtin(builtin: Builtin) -> DeclaredType {
    DeclaredType::builtin(builtin)
}

/// Turns a JSON object literal into a payload.
pub(crate) fn payload(json: serde_json::Value) -> Mapping {
    match serde_json::from_value(json).unwrap() {
        Value::Map(map) => map,
        other => panic!("expected a JSON object, found {other}"),
    }
}

/// Turns an export into JSON for comparison with literals.
pub(crate) fn to_json(data: Mapping) -> serde_json::Value {
    serde_json::to_value(Value::Map(data)).unwrap()
}

/// Registers every fixture class.
pub(crate) fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.insert(
        ClassInfo::interface(DTO_INTERFACE)
            .with_attribute(ExportableEntity)
            .with_attribute(ImportableEntity),
    );
    registry.insert(
        ClassInfo::abstract_class(ABSTRACT_IMPORT_ENTITY)
            .with_property(PropertyInfo::typed("id", builtin(Builtin::Int).nullable()))
            .with_property(imported("name", builtin(Builtin::String).nullable())),
    );
    registry.register::<ExportEntity>();
    registry.register::<ImportEntity>();
    registry.register::<AutoincrementEntity>();
    registry.register::<TestDto>();
    registry.register::<NestedDto>();
    registry.register::<ChildDto>();
    registry
}

// -----------------------------------------------------------------------------
// ExportEntity

/// Exercises every export shape; `name` is read through a decorating getter.
#[derive(Default)]
pub(crate) struct ExportEntity {
    pub id: i64,
    pub name: Option<String>,
    pub collection: Vec<Object>,
    pub ref_collection: Vec<Object>,
    pub parent: Option<Object>,
    pub reference: Option<Object>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub dto_list: Vec<Value>,
    pub array_prop: Vec<Value>,
    pub not_exported: String,
}

impl Entity for ExportEntity {
    fn class_name(&self) -> &'static str {
        EXPORT_ENTITY
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        Ok(match property {
            "id" => self.id.into(),
            "name" => format!("{} via getter", self.name.as_deref().unwrap_or_default()).into(),
            "collection" => self.collection.clone().into(),
            "refCollection" => self.ref_collection.clone().into(),
            "parent" => self.parent.clone().into(),
            "reference" => self.reference.clone().into(),
            "timestamp" => self.timestamp.into(),
            "dtoList" => self.dto_list.clone().into(),
            "arrayProp" => self.array_prop.clone().into(),
            "notExported" => self.not_exported.clone().into(),
            _ => return Err(AccessError::unknown(property)),
        })
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "id" => self.id = FromValue::from_value(value)?,
            "name" => self.name = FromValue::from_value(value)?,
            "collection" => self.collection = FromValue::from_value(value)?,
            "refCollection" => self.ref_collection = FromValue::from_value(value)?,
            "parent" => self.parent = FromValue::from_value(value)?,
            "reference" => self.reference = FromValue::from_value(value)?,
            "timestamp" => self.timestamp = FromValue::from_value(value)?,
            "dtoList" => self.dto_list = FromValue::from_value(value)?,
            "arrayProp" => self.array_prop = FromValue::from_value(value)?,
            "notExported" => self.not_exported = FromValue::from_value(value)?,
            _ => return Err(AccessError::unknown(property)),
        }
        Ok(())
    }
}

impl Class for ExportEntity {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(EXPORT_ENTITY)
            .with_property(exported("id", builtin(Builtin::Int)))
            .with_property(exported("name", builtin(Builtin::String).nullable()))
            .with_property(exported("collection", DeclaredType::class(COLLECTION)))
            .with_property(
                PropertyInfo::typed("refCollection", DeclaredType::class(COLLECTION))
                    .with_attribute(ExportableProperty::new().reference_by("id")),
            )
            .with_property(exported("parent", DeclaredType::self_class().nullable()))
            .with_property(
                PropertyInfo::typed("reference", DeclaredType::self_class().nullable())
                    .with_attribute(ExportableProperty::new().reference_by("name")),
            )
            .with_property(exported(
                "timestamp",
                DeclaredType::class(DATE_TIME_IMMUTABLE).nullable(),
            ))
            .with_property(
                PropertyInfo::typed("dtoList", builtin(Builtin::Array))
                    .with_attribute(ExportableProperty::new().as_list()),
            )
            .with_property(exported("arrayProp", builtin(Builtin::Array)))
            .with_property(PropertyInfo::typed("notExported", builtin(Builtin::String)))
    }
}

// -----------------------------------------------------------------------------
// ImportEntity

/// Exercises every import shape; `name` is written through a decorating setter.
pub(crate) struct ImportEntity {
    pub name: Option<String>,
    pub collection: Vec<Object>,
    pub parent: Option<Object>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub uid: Option<Ulid>,
    pub other_reference: Option<Object>,
    pub not_imported: String,
    pub dto_list: Value,
    pub interface_list: Value,
    pub union: Value,
    pub untyped_prop: Value,
}

impl Default for ImportEntity {
    fn default() -> Self {
        Self {
            name: Some(String::new()),
            collection: Vec::new(),
            parent: None,
            timestamp: None,
            uid: None,
            other_reference: None,
            not_imported: String::from("initial"),
            dto_list: Value::List(Vec::new()),
            interface_list: Value::List(Vec::new()),
            union: Value::Null,
            untyped_prop: Value::Null,
        }
    }
}

impl ImportEntity {
    /// Returns the imported list elements, whether imported as list or mapping.
    pub fn interface_elements(&self) -> Vec<Object> {
        Vec::from_value(self.interface_list.clone()).unwrap()
    }
}

impl Entity for ImportEntity {
    fn class_name(&self) -> &'static str {
        IMPORT_ENTITY
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        Ok(match property {
            "name" => self.name.clone().into(),
            "collection" => self.collection.clone().into(),
            "parent" => self.parent.clone().into(),
            "timestamp" => self.timestamp.into(),
            "uid" => self.uid.into(),
            "otherReference" => self.other_reference.clone().into(),
            "notImported" => self.not_imported.clone().into(),
            "dtoList" => self.dto_list.clone(),
            "interfaceList" => self.interface_list.clone(),
            "union" => self.union.clone(),
            "untypedProp" => self.untyped_prop.clone(),
            _ => return Err(AccessError::unknown(property)),
        })
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "name" => {
                let name: Option<String> = FromValue::from_value(value)?;
                self.name = name.map(|name| format!("{name} via setter"));
            }
            "collection" => self.collection = FromValue::from_value(value)?,
            "parent" => self.parent = FromValue::from_value(value)?,
            "timestamp" => self.timestamp = FromValue::from_value(value)?,
            "uid" => self.uid = FromValue::from_value(value)?,
            "otherReference" => self.other_reference = FromValue::from_value(value)?,
            "notImported" => self.not_imported = FromValue::from_value(value)?,
            "dtoList" => self.dto_list = value,
            "interfaceList" => self.interface_list = value,
            "union" => self.union = value,
            "untypedProp" => self.untyped_prop = value,
            _ => return Err(AccessError::unknown(property)),
        }
        Ok(())
    }
}

impl Class for ImportEntity {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(IMPORT_ENTITY)
            .with_attribute(ImportableEntity)
            .with_property(imported("name", builtin(Builtin::String).nullable()))
            .with_property(imported("collection", DeclaredType::class(COLLECTION)))
            .with_property(imported("parent", DeclaredType::self_class().nullable()))
            .with_property(imported(
                "timestamp",
                DeclaredType::class(DATE_TIME_IMMUTABLE).nullable(),
            ))
            .with_property(imported("uid", DeclaredType::class(ULID).nullable()))
            .with_property(imported(
                "otherReference",
                DeclaredType::class(EXPORT_ENTITY).nullable(),
            ))
            .with_property(PropertyInfo::typed("notImported", builtin(Builtin::String)))
            .with_property(
                PropertyInfo::typed("dtoList", builtin(Builtin::Array))
                    .with_attribute(ImportableProperty::list_of(TEST_DTO)),
            )
            .with_property(
                PropertyInfo::typed("interfaceList", builtin(Builtin::Array))
                    .with_attribute(ImportableProperty::list_of(DTO_INTERFACE)),
            )
            .with_property(imported(
                "union",
                DeclaredType::union([TypeRef::Class("TestCase"), TypeRef::Class("EntityManager")])
                    .nullable(),
            ))
            .with_property(PropertyInfo::new("untypedProp").with_attribute(ImportableProperty::new()))
    }
}

// -----------------------------------------------------------------------------
// AutoincrementEntity

/// A record whose id is assigned by the store on flush.
#[derive(Default)]
pub(crate) struct AutoincrementEntity {
    pub id: Option<i64>,
    pub name: String,
    pub parent: Option<Object>,
    pub mixed: Value,
}

impl Entity for AutoincrementEntity {
    fn class_name(&self) -> &'static str {
        AUTOINCREMENT_ENTITY
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        Ok(match property {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "parent" => self.parent.clone().into(),
            "mixed" => self.mixed.clone(),
            _ => return Err(AccessError::unknown(property)),
        })
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "id" => self.id = FromValue::from_value(value)?,
            "name" => self.name = FromValue::from_value(value)?,
            "parent" => self.parent = FromValue::from_value(value)?,
            "mixed" => self.mixed = value,
            _ => return Err(AccessError::unknown(property)),
        }
        Ok(())
    }
}

impl Class for AutoincrementEntity {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(AUTOINCREMENT_ENTITY)
            .with_property(imported("id", builtin(Builtin::Int).nullable()))
            .with_property(imported("name", builtin(Builtin::String)))
            .with_property(imported("parent", DeclaredType::self_class().nullable()))
            .with_property(PropertyInfo::new("mixed").with_attribute(ExportableProperty::new()))
    }
}

// -----------------------------------------------------------------------------
// DTOs

#[derive(Default)]
pub(crate) struct TestDto {
    pub name: String,
    pub nested_interface: Option<Object>,
    pub nested_interface_list: Vec<Value>,
}

impl Entity for TestDto {
    fn class_name(&self) -> &'static str {
        TEST_DTO
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        Ok(match property {
            "name" => self.name.clone().into(),
            "nestedInterface" => self.nested_interface.clone().into(),
            "nestedInterfaceList" => self.nested_interface_list.clone().into(),
            _ => return Err(AccessError::unknown(property)),
        })
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "name" => self.name = FromValue::from_value(value)?,
            "nestedInterface" => self.nested_interface = FromValue::from_value(value)?,
            "nestedInterfaceList" => self.nested_interface_list = FromValue::from_value(value)?,
            _ => return Err(AccessError::unknown(property)),
        }
        Ok(())
    }
}

impl Class for TestDto {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(TEST_DTO)
            .implements(DTO_INTERFACE)
            .with_attribute(ExportableEntity)
            .with_attribute(ImportableEntity)
            .with_attribute(RepeatableAttribute(1))
            .with_property(both("name", builtin(Builtin::String)))
            .with_property(both(
                "nestedInterface",
                DeclaredType::class(DTO_INTERFACE).nullable(),
            ))
            .with_property(
                PropertyInfo::typed("nestedInterfaceList", builtin(Builtin::Array))
                    .with_attribute(ExportableProperty::new().as_list())
                    .with_attribute(ImportableProperty::list_of(DTO_INTERFACE)),
            )
    }
}

pub(crate) struct NestedDto {
    pub description: String,
    pub mixed_prop: Value,
}

impl Default for NestedDto {
    fn default() -> Self {
        Self {
            description: String::new(),
            mixed_prop: Value::Int(0),
        }
    }
}

impl Entity for NestedDto {
    fn class_name(&self) -> &'static str {
        NESTED_DTO
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        Ok(match property {
            "description" => self.description.clone().into(),
            "mixedProp" => self.mixed_prop.clone(),
            _ => return Err(AccessError::unknown(property)),
        })
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "description" => self.description = FromValue::from_value(value)?,
            "mixedProp" => match value {
                Value::Int(_) | Value::Text(_) => self.mixed_prop = value,
                other => return Err(AccessError::mismatch("int|string", &other)),
            },
            _ => return Err(AccessError::unknown(property)),
        }
        Ok(())
    }
}

impl Class for NestedDto {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(NESTED_DTO)
            .implements(DTO_INTERFACE)
            .with_attribute(ExportableEntity)
            .with_attribute(ImportableEntity)
            .with_attribute(RepeatableAttribute(1))
            .with_attribute(RepeatableAttribute(2))
            .with_property(both("description", builtin(Builtin::String)))
            .with_property(both(
                "mixedProp",
                DeclaredType::union([
                    TypeRef::Builtin(Builtin::Int),
                    TypeRef::Builtin(Builtin::String),
                ]),
            ))
    }
}

/// A [`TestDto`] subclass adding one property.
#[derive(Default)]
pub(crate) struct ChildDto {
    pub base: TestDto,
    pub extra: String,
}

impl Entity for ChildDto {
    fn class_name(&self) -> &'static str {
        CHILD_DTO
    }

    fn get(&self, property: &str) -> Result<Value, AccessError> {
        match property {
            "extra" => Ok(self.extra.clone().into()),
            _ => self.base.get(property),
        }
    }

    fn set(&mut self, property: &str, value: Value) -> Result<(), AccessError> {
        match property {
            "extra" => {
                self.extra = FromValue::from_value(value)?;
                Ok(())
            }
            _ => self.base.set(property, value),
        }
    }
}

impl Class for ChildDto {
    fn class_info() -> ClassInfo {
        ClassInfo::concrete::<Self>(CHILD_DTO)
            .extends(TEST_DTO)
            .with_property(both("extra", builtin(Builtin::String)))
    }
}

/// Builds a [`TestDto`] with nested DTOs, as used by several scenarios.
pub(crate) fn dto_tree() -> Object {
    let nested = |description: &str, mixed: Value| {
        Object::new(NestedDto {
            description: description.into(),
            mixed_prop: mixed,
        })
    };

    Object::new(TestDto {
        name: String::from("element 1"),
        nested_interface: Some(nested("element a", Value::Int(0))),
        nested_interface_list: vec![
            nested("element b", Value::from("string")).into(),
            nested("element c", Value::Int(999)).into(),
            Object::new(TestDto {
                name: String::from("element d"),
                ..TestDto::default()
            })
            .into(),
        ],
    })
}
