//! Import/export directives attached to classes and properties.
//!
//! These are plain data attributes: attach them with `with_attribute` on a
//! [`ClassInfo`](super::ClassInfo) or [`PropertyInfo`](super::PropertyInfo).

/// Marks a class as eligible for export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportableEntity;

/// Marks a class as eligible for import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportableEntity;

/// Marks a property as exported.
///
/// `as_list` exports a keyed collection as an ordered list.
/// `reference_by_identifier` exports each referenced object as the value of
/// the named property instead of a nested mapping. An empty name means no
/// reference collapsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportableProperty {
    pub as_list: bool,
    pub reference_by_identifier: Option<&'static str>,
}

impl ExportableProperty {
    #[inline]
    pub const fn new() -> Self {
        Self {
            as_list: false,
            reference_by_identifier: None,
        }
    }

    #[inline]
    pub const fn as_list(mut self) -> Self {
        self.as_list = true;
        self
    }

    #[inline]
    pub const fn reference_by(mut self, identifier: &'static str) -> Self {
        self.reference_by_identifier = if identifier.is_empty() { None } else { Some(identifier) };
        self
    }

    /// The identifier property to collapse references to, if one is named.
    #[inline]
    pub fn identifier(&self) -> Option<&'static str> {
        self.reference_by_identifier.filter(|name| !name.is_empty())
    }
}

/// Marks a property as imported.
///
/// `list_of` names the element class of a collection-typed property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportableProperty {
    pub list_of: Option<&'static str>,
}

impl ImportableProperty {
    #[inline]
    pub const fn new() -> Self {
        Self { list_of: None }
    }

    #[inline]
    pub const fn list_of(class: &'static str) -> Self {
        Self { list_of: Some(class) }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ExportableProperty;

    #[test]
    fn empty_reference_identifier_is_unset() {
        let directive = ExportableProperty::new().reference_by("");
        assert_eq!(directive.reference_by_identifier, None);
        assert_eq!(directive.identifier(), None);

        let raw = ExportableProperty { as_list: false, reference_by_identifier: Some("") };
        assert_eq!(raw.identifier(), None);

        let directive = ExportableProperty::new().as_list().reference_by("id");
        assert_eq!(directive.identifier(), Some("id"));
        assert!(directive.as_list);
    }
}
