use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use invoiceflow_core::{ValueObject, string_id};

use crate::InvalidInvoice;

string_id!(
    /// Identifier of a submitted invoice.
    pub struct InvoiceId,
    InvalidInvoice,
    InvalidInvoice::EmptyInvoiceId
);

string_id!(
    /// Identifier of the user who submitted an invoice.
    pub struct SubmitterId,
    InvalidInvoice,
    InvalidInvoice::EmptySubmitterId
);

string_id!(
    /// Identifier of the submitter's supervisor, who becomes the approver.
    pub struct SupervisorId,
    InvalidInvoice,
    InvalidInvoice::EmptySupervisorId
);

static INVOICE_NUMBER_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^INV-[0-9]{4}-[0-9]{4}$").expect("invoice number pattern compiles")
});

/// Invoice number in the `INV-YYYY-NNNN` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidInvoice> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(InvalidInvoice::InvalidInvoiceNumber(value));
        }
        Ok(Self(value))
    }

    pub fn is_valid(value: &str) -> bool {
        INVOICE_NUMBER_FORMAT.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for InvoiceNumber {}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InvoiceNumber {
    type Error = InvalidInvoice;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InvoiceNumber> for String {
    fn from(value: InvoiceNumber) -> Self {
        value.0
    }
}

/// Tolerance used when comparing amounts.
const AMOUNT_EPSILON: f64 = 1e-4;

/// Smallest storable amount: one cent.
const MIN_AMOUNT: f64 = 0.01;

/// Positive monetary amount of at least one cent.
///
/// Equality tolerates floating-point noise up to `1e-4`, so `Amount` is
/// `PartialEq` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, InvalidInvoice> {
        if value.is_nan() || value.is_infinite() || value < MIN_AMOUNT {
            return Err(InvalidInvoice::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < AMOUNT_EPSILON
    }
}

impl ValueObject for Amount {}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = InvalidInvoice;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn accepts_well_formed_invoice_numbers() {
        let number = InvoiceNumber::new("INV-2025-0001").unwrap();
        assert_eq!(number.as_str(), "INV-2025-0001");
        assert_eq!(number.to_string(), "INV-2025-0001");
    }

    #[test]
    fn rejects_malformed_invoice_numbers() {
        for bad in [
            "",
            "INV-25-0001",
            "inv-2025-0001",
            "INV-2025-001",
            "INV-2025-00011",
            " INV-2025-0001",
            "INV-2025-0001\n",
        ] {
            assert_eq!(
                InvoiceNumber::new(bad),
                Err(InvalidInvoice::InvalidInvoiceNumber(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn invoice_number_error_message_names_the_value() {
        let err = InvoiceNumber::new("BAD").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invoice number must be in format INV-YYYY-XXXX. Given: BAD"
        );
    }

    #[test]
    fn amount_formats_with_two_decimals() {
        assert_eq!(Amount::new(1500.5).unwrap().to_string(), "1500.50");
        assert_eq!(Amount::new(0.01).unwrap().to_string(), "0.01");
    }

    #[test]
    fn amount_rejects_zero_negative_and_non_finite() {
        assert_eq!(Amount::new(0.0), Err(InvalidInvoice::InvalidAmount(0.0)));
        assert_eq!(Amount::new(-5.0), Err(InvalidInvoice::InvalidAmount(-5.0)));
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn amount_below_one_cent_is_rejected() {
        assert_eq!(Amount::new(0.001), Err(InvalidInvoice::InvalidAmount(0.001)));
        assert_eq!(Amount::new(0.009), Err(InvalidInvoice::InvalidAmount(0.009)));
        assert_eq!(Amount::new(0.01).unwrap().value(), 0.01);
    }

    #[test]
    fn amount_equality_absorbs_floating_point_noise() {
        let a = Amount::new(0.1 + 0.2).unwrap();
        let b = Amount::new(0.3).unwrap();
        assert_eq!(a, b);
        assert_ne!(Amount::new(1.0).unwrap(), Amount::new(1.001).unwrap());
    }

    #[test]
    fn ids_reject_blank_values() {
        assert_eq!(InvoiceId::new(""), Err(InvalidInvoice::EmptyInvoiceId));
        assert_eq!(SubmitterId::new("  "), Err(InvalidInvoice::EmptySubmitterId));
        assert_eq!(SupervisorId::new(""), Err(InvalidInvoice::EmptySupervisorId));
        assert_eq!(SupervisorId::new("s1").unwrap().as_str(), "s1");
    }

    proptest! {
        #[test]
        fn generated_numbers_in_format_are_accepted(year in 0u32..10_000, seq in 0u32..10_000) {
            let raw = format!("INV-{year:04}-{seq:04}");
            let number = InvoiceNumber::new(raw.clone()).unwrap();
            prop_assert_eq!(number.as_str(), raw.as_str());
        }

        #[test]
        fn strings_without_prefix_are_rejected(s in "[A-Z]{0,3}-[0-9]{4}-[0-9]{4}") {
            prop_assume!(!s.starts_with("INV"));
            prop_assert!(InvoiceNumber::new(s).is_err());
        }

        #[test]
        fn amounts_of_at_least_one_cent_are_accepted(value in 0.01f64..1.0e12) {
            let amount = Amount::new(value).unwrap();
            prop_assert_eq!(amount.value(), value);
        }

        #[test]
        fn non_positive_amounts_are_rejected(value in -1.0e12f64..=0.0) {
            prop_assert_eq!(Amount::new(value), Err(InvalidInvoice::InvalidAmount(value)));
        }
    }
}
