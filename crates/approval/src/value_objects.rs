use invoiceflow_core::string_id;

use crate::InvalidApproval;

string_id!(
    /// Identifier of an approval process.
    pub struct ApprovalId,
    InvalidApproval,
    InvalidApproval::EmptyApprovalId
);

string_id!(
    /// Identifier of the user who decides an approval.
    pub struct ApproverId,
    InvalidApproval,
    InvalidApproval::EmptyApproverId
);

string_id!(
    /// Reference to the invoice under approval.
    pub struct InvoiceRef,
    InvalidApproval,
    InvalidApproval::EmptyInvoiceId
);
