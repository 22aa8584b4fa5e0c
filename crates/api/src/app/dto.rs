//! Request validation and response bodies (camelCase JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use invoiceflow_application::SubmitInvoiceData;
use invoiceflow_approval::Approval;
use invoiceflow_core::AggregateRoot;
use invoiceflow_invoicing::{Invoice, InvoiceNumber};

use crate::app::errors::ValidationErrors;

const REASON_MIN_CHARS: usize = 3;
const REASON_MAX_CHARS: usize = 500;

// -------------------------
// Request DTOs
// -------------------------

/// Every field is optional so missing ones are reported as validation errors
/// instead of decode failures.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInvoiceRequest {
    pub invoice_number: Option<String>,
    pub amount: Option<Value>,
    pub submitter_id: Option<String>,
    pub supervisor_id: Option<String>,
}

impl SubmitInvoiceRequest {
    pub fn validate(self) -> Result<SubmitInvoiceData, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let invoice_number = required(
            &mut errors,
            "invoiceNumber",
            "invoice number",
            self.invoice_number,
        );
        let invoice_number = match invoice_number {
            Some(n) if InvoiceNumber::is_valid(&n) => Some(n),
            Some(_) => {
                push(
                    &mut errors,
                    "invoiceNumber",
                    "Invoice number must be in format INV-YYYY-XXXX (e.g., INV-2025-0001).",
                );
                None
            }
            None => None,
        };

        let amount = match self.amount {
            None | Some(Value::Null) => {
                push(&mut errors, "amount", "The amount field is required.");
                None
            }
            Some(value) => match numeric(&value) {
                Some(a) if a > 0.0 => Some(a),
                Some(_) => {
                    push(&mut errors, "amount", "Amount must be greater than zero.");
                    None
                }
                None => {
                    push(&mut errors, "amount", "The amount field must be a number.");
                    None
                }
            },
        };

        let submitter_id = uuid_field(
            &mut errors,
            "submitterId",
            "submitter id",
            "Submitter ID",
            self.submitter_id,
        );
        let supervisor_id = uuid_field(
            &mut errors,
            "supervisorId",
            "supervisor id",
            "Supervisor ID",
            self.supervisor_id,
        );

        match (invoice_number, amount, submitter_id, supervisor_id) {
            (Some(invoice_number), Some(amount), Some(submitter_id), Some(supervisor_id))
                if errors.is_empty() =>
            {
                Ok(SubmitInvoiceData {
                    invoice_number,
                    amount,
                    submitter_id,
                    supervisor_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectInvoiceRequest {
    pub reason: Option<String>,
}

impl RejectInvoiceRequest {
    /// Returns the reason, which must be 3 to 500 characters long.
    pub fn validate(self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let reason = match self.reason {
            Some(r) if !r.trim().is_empty() => r,
            _ => {
                push(&mut errors, "reason", "A rejection reason is required.");
                return Err(errors);
            }
        };

        let chars = reason.chars().count();
        if chars < REASON_MIN_CHARS {
            push(&mut errors, "reason", "The rejection reason must be at least 3 characters.");
        } else if chars > REASON_MAX_CHARS {
            push(&mut errors, "reason", "The rejection reason must not exceed 500 characters.");
        }

        if errors.is_empty() { Ok(reason) } else { Err(errors) }
    }
}

fn push(errors: &mut ValidationErrors, field: &'static str, message: impl Into<String>) {
    errors.entry(field).or_default().push(message.into());
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            push(errors, field, format!("The {label} field is required."));
            None
        }
    }
}

fn uuid_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    display: &str,
    value: Option<String>,
) -> Option<String> {
    let value = required(errors, field, label, value)?;
    if Uuid::parse_str(&value).is_err() {
        push(errors, field, format!("{display} must be a valid UUID."));
        return None;
    }
    Some(value)
}

/// Accept JSON numbers and numeric strings.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInvoiceResponse {
    pub invoice_id: String,
    pub invoice_number: String,
    pub amount: f64,
    pub status: &'static str,
    pub message: &'static str,
}

impl From<&Invoice> for SubmitInvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_id: invoice.id().to_string(),
            invoice_number: invoice.number().to_string(),
            amount: invoice.amount().value(),
            status: "submitted",
            message: "Invoice submitted successfully. Approval process has been started.",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDecisionResponse {
    pub approval_id: String,
    pub invoice_id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub message: &'static str,
}

impl ApprovalDecisionResponse {
    pub fn approved(approval: &Approval) -> Self {
        Self {
            approval_id: approval.id().to_string(),
            invoice_id: approval.invoice_id().to_string(),
            status: approval.status().as_str(),
            reason: None,
            message: "Invoice approved successfully.",
        }
    }

    pub fn rejected(approval: &Approval) -> Self {
        Self {
            approval_id: approval.id().to_string(),
            invoice_id: approval.invoice_id().to_string(),
            status: approval.status().as_str(),
            reason: approval.rejection_reason().map(str::to_string),
            message: "Invoice rejected successfully.",
        }
    }
}

/// Read view of an approval.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalView {
    pub approval_id: String,
    pub invoice_id: String,
    pub approver_id: String,
    pub status: &'static str,
    pub rejection_reason: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Approval> for ApprovalView {
    fn from(approval: &Approval) -> Self {
        Self {
            approval_id: approval.id().to_string(),
            invoice_id: approval.invoice_id().to_string(),
            approver_id: approval.approver_id().to_string(),
            status: approval.status().as_str(),
            rejection_reason: approval.rejection_reason().map(str::to_string),
            started_at: approval.started_at(),
            completed_at: approval.completed_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SUBMITTER: &str = "0192f0c1-7a7e-7cc3-8a55-5b1f1c2d3e4f";
    const SUPERVISOR: &str = "0192f0c1-7a7e-7cc3-8a55-5b1f1c2d3e50";

    fn request(body: Value) -> SubmitInvoiceRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn valid_submission_passes() {
        let data = request(json!({
            "invoiceNumber": "INV-2025-0001",
            "amount": 1500.5,
            "submitterId": SUBMITTER,
            "supervisorId": SUPERVISOR,
        }))
        .validate()
        .unwrap();

        assert_eq!(data.invoice_number, "INV-2025-0001");
        assert_eq!(data.amount, 1500.5);
        assert_eq!(data.supervisor_id, SUPERVISOR);
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let data = request(json!({
            "invoiceNumber": "INV-2025-0001",
            "amount": "99.90",
            "submitterId": SUBMITTER,
            "supervisorId": SUPERVISOR,
        }))
        .validate()
        .unwrap();
        assert_eq!(data.amount, 99.9);
    }

    #[test]
    fn reports_every_invalid_field() {
        let errors = request(json!({
            "invoiceNumber": "2025-0001",
            "amount": 0,
            "submitterId": "u1",
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            errors["invoiceNumber"],
            vec![
                "Invoice number must be in format INV-YYYY-XXXX (e.g., INV-2025-0001).".to_string()
            ]
        );
        assert_eq!(errors["amount"], vec!["Amount must be greater than zero.".to_string()]);
        assert_eq!(errors["submitterId"], vec!["Submitter ID must be a valid UUID.".to_string()]);
        assert_eq!(
            errors["supervisorId"],
            vec!["The supervisor id field is required.".to_string()]
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let errors = request(json!({ "amount": "lots" })).validate().unwrap_err();
        assert_eq!(errors["amount"], vec!["The amount field must be a number.".to_string()]);
    }

    #[test]
    fn reason_length_is_bounded() {
        let missing = RejectInvoiceRequest { reason: None }.validate().unwrap_err();
        assert_eq!(missing["reason"], vec!["A rejection reason is required.".to_string()]);

        let short = RejectInvoiceRequest { reason: Some("no".into()) }.validate().unwrap_err();
        assert_eq!(
            short["reason"],
            vec!["The rejection reason must be at least 3 characters.".to_string()]
        );

        let long = RejectInvoiceRequest { reason: Some("x".repeat(501)) }.validate().unwrap_err();
        assert_eq!(
            long["reason"],
            vec!["The rejection reason must not exceed 500 characters.".to_string()]
        );

        let ok = RejectInvoiceRequest { reason: Some("é".repeat(500)) }.validate().unwrap();
        assert_eq!(ok.chars().count(), 500);
    }
}
