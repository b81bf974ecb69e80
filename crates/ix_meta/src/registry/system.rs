//! Classes the mapper converts natively rather than through properties.

use crate::info::ClassInfo;

/// An ordered or keyed collection of objects.
pub const COLLECTION: &str = "Collection";
/// Any date value.
pub const DATE_TIME_INTERFACE: &str = "DateTimeInterface";
pub const DATE_TIME_IMMUTABLE: &str = "DateTimeImmutable";
pub const DATE_TIME: &str = "DateTime";
/// A universally unique lexicographically sortable identifier.
pub const ULID: &str = "Ulid";

pub(super) fn system_classes() -> [ClassInfo; 5] {
    [
        ClassInfo::interface(COLLECTION),
        ClassInfo::interface(DATE_TIME_INTERFACE),
        ClassInfo::opaque(DATE_TIME_IMMUTABLE).implements(DATE_TIME_INTERFACE),
        ClassInfo::opaque(DATE_TIME).implements(DATE_TIME_INTERFACE),
        ClassInfo::opaque(ULID),
    ]
}
