//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Splits store the
/// members, expenses and balances handed to them as value objects, so a stored
/// copy never changes when the caller's original collection does.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Expense {
///     paid_by: String,
///     amount: f64,
/// }
///
/// impl ValueObject for Expense {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

impl ValueObject for String {}

/// Copy a caller-owned collection of value objects into an owned snapshot.
pub fn snapshot<T: ValueObject>(items: &[T]) -> Vec<T> {
    items.to_vec()
}
