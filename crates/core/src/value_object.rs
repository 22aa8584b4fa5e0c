//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same value are
/// interchangeable. They validate themselves on construction, so holding one
/// proves the wrapped primitive satisfies its invariant, and they never change
/// afterwards.
///
/// ```ignore
/// let a = InvoiceNumber::new("INV-2025-0001")?;
/// let b = InvoiceNumber::new("INV-2025-0001")?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
