use serde::{Deserialize, Serialize};

/// Raw input of the submit-invoice use case. Validated by the value objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitInvoiceData {
    pub invoice_number: String,
    pub amount: f64,
    pub submitter_id: String,
    pub supervisor_id: String,
}

/// Raw input of the start-approval use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartApprovalData {
    pub invoice_id: String,
    pub approver_id: String,
}
