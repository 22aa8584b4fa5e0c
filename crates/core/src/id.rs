//! Opaque string identifiers.
//!
//! Identifiers are generated at the persistence boundary (UUIDv7) but the
//! domain only relies on them being non-empty and comparable, so they wrap a
//! `String` rather than a `Uuid`.

/// Returns `true` when `value` cannot serve as an identifier.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Declare a non-empty string identifier newtype.
///
/// `$err` is the error type returned by the constructor and `$empty` the value
/// returned for blank input.
///
/// ```ignore
/// invoiceflow_core::string_id!(
///     /// Identifier of an invoice.
///     pub struct InvoiceId, InvalidInvoice, InvalidInvoice::EmptyInvoiceId
/// );
/// ```
#[macro_export]
macro_rules! string_id {
    ($(#[$meta:meta])* $vis:vis struct $t:ident, $err:ty, $empty:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $t(String);

        impl $t {
            /// Wrap an existing identifier, rejecting blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, $err> {
                let value = value.into();
                if $crate::id::is_blank(&value) {
                    return Err($empty);
                }
                Ok(Self(value))
            }

            /// Generate a fresh identifier (UUIDv7, time-ordered).
            pub fn generate() -> Self {
                Self($crate::__private::Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl $crate::ValueObject for $t {}

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::str::FromStr for $t {
            type Err = $err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = $err;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}
