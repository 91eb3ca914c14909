//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity of their own: two instances with the
/// same attribute values are the same value. Measurement units are the
/// canonical example here. A `Product` on the other hand is an entity,
/// identified by its id regardless of field values.
///
/// Implementors should stay immutable: to "change" a value object, build a
/// new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
