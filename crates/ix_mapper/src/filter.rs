use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// FilterMode

/// How a [`PropertyFilter`] is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Only listed properties are processed.
    #[default]
    Include,
    /// Listed properties are skipped.
    Exclude,
}

// -----------------------------------------------------------------------------
// PropertyFilter

/// A list of property names, each optionally carrying a nested filter for
/// the sub-record found at that property.
///
/// An empty filter never skips anything, in either [`FilterMode`].
///
/// # Semantics
///
/// - [`Include`](FilterMode::Include): a property is processed if it has an entry.
/// - [`Exclude`](FilterMode::Exclude): a property is skipped if it has a plain
///   entry. An entry carrying a nested filter keeps the property and filters
///   its sub-record instead.
///
/// # Example
///
/// ```
/// use ix_mapper::{FilterMode, PropertyFilter};
///
/// let filter = PropertyFilter::only(["id"])
///     .with_nested("dtoList", PropertyFilter::only(["name"]));
///
/// assert!(!filter.skips("id", FilterMode::Include));
/// assert!(filter.skips("parent", FilterMode::Include));
/// assert!(filter.skips("id", FilterMode::Exclude));
/// assert!(!filter.skips("dtoList", FilterMode::Exclude));
/// assert_eq!(filter.nested("dtoList").single(), Some("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    entries: Vec<(String, Option<PropertyFilter>)>,
}

impl PropertyFilter {
    /// The shared empty filter.
    pub const EMPTY: &'static Self = &Self::new();

    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a filter of plain entries.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::new(), |filter, name| filter.with(name))
    }

    /// Adds a plain entry. An existing entry for `name` is kept as is.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.position(&name).is_none() {
            self.entries.push((name, None));
        }
        self
    }

    /// Adds an entry with a nested filter, replacing any nested filter
    /// already set for `name`.
    pub fn with_nested(mut self, name: impl Into<String>, nested: PropertyFilter) -> Self {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = Some(nested),
            None => self.entries.push((name, Some(nested))),
        }
        self
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the only name if this filter has exactly one plain entry.
    ///
    /// A list export interprets such a filter as "emit just this identifier".
    pub fn single(&self) -> Option<&str> {
        match self.entries.as_slice() {
            [(name, None)] => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the nested filter for `name`, or the empty filter.
    pub fn nested(&self, name: &str) -> &PropertyFilter {
        self.position(name)
            .and_then(|index| self.entries[index].1.as_ref())
            .unwrap_or(Self::EMPTY)
    }

    /// Returns `true` if the property `name` is to be skipped.
    pub fn skips(&self, name: &str, mode: FilterMode) -> bool {
        if self.is_empty() {
            return false;
        }
        match (mode, self.position(name)) {
            (FilterMode::Include, found) => found.is_none(),
            (FilterMode::Exclude, Some(index)) => self.entries[index].1.is_none(),
            (FilterMode::Exclude, None) => false,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PropertyFilter {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::only(iter)
    }
}

// -----------------------------------------------------------------------------
// Tests
