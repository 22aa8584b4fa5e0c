//! Use-case actions.
//!
//! Every action follows the same pipeline:
//!
//! ```text
//! raw input
//!   ↓
//! 1. Build value objects (fail fast on invalid input)
//!   ↓
//! 2. Load zero or more aggregates through their repository
//!   ↓
//! 3. Invoke exactly one factory or mutating operation
//!   ↓
//! 4. Persist the aggregate
//!   ↓
//! 5. Release the recorded events and publish them, in order
//! ```
//!
//! Persistence completes before anything is published. Publication is
//! synchronous, so a failing subscriber surfaces as `ActionError::Publish`
//! after the aggregate is already stored; nothing is rolled back.
//!
//! Actions receive the publisher per call instead of owning it. The policy
//! runs inside a publication and re-enters the bus through the same handle.

mod approve_invoice;
mod reject_invoice;
mod start_approval_process;
mod submit_invoice;

pub use approve_invoice::ApproveInvoiceAction;
pub use reject_invoice::RejectInvoiceAction;
pub use start_approval_process::StartApprovalProcessAction;
pub use submit_invoice::SubmitInvoiceAction;

use invoiceflow_approval::{
    Approval, ApprovalId, ApprovalRepository, ApprovalStatus, InvalidApproval,
};
use invoiceflow_core::{AggregateRoot, RepositoryError};
use invoiceflow_events::{EventPublisher, PublishError};

use crate::{ActionError, DomainEvent};

/// Publish released events one by one, stopping at the first failure.
pub(crate) async fn publish_all<E>(
    publisher: &dyn EventPublisher<DomainEvent>,
    events: Vec<E>,
) -> Result<(), PublishError>
where
    E: Into<DomainEvent>,
{
    for event in events {
        publisher.publish(event.into()).await?;
    }
    Ok(())
}

/// Load an approval or fail with `InvalidApproval::NotFound`.
pub(crate) async fn load_approval(
    approvals: &dyn ApprovalRepository,
    raw_id: &str,
) -> Result<Approval, ActionError> {
    let id = ApprovalId::new(raw_id)?;
    approvals
        .find_by_id(&id)
        .await?
        .ok_or_else(|| InvalidApproval::NotFound(raw_id.to_string()).into())
}

/// Persist a decided approval.
///
/// A conflict means another decision was stored first. It is reported as the
/// business error that decision implies, so the loser sees "already approved"
/// or "already rejected" instead of a storage failure.
pub(crate) async fn save_decision(
    approvals: &dyn ApprovalRepository,
    approval: &Approval,
) -> Result<(), ActionError> {
    match approvals.save(approval).await {
        Ok(()) => Ok(()),
        Err(RepositoryError::Conflict(msg)) => {
            let stored = approvals.find_by_id(approval.id()).await?;
            match stored.map(|a| a.status()) {
                Some(ApprovalStatus::Approved) => {
                    Err(InvalidApproval::AlreadyApproved.into())
                }
                Some(ApprovalStatus::Rejected) => {
                    Err(InvalidApproval::AlreadyRejected.into())
                }
                _ => Err(RepositoryError::Conflict(msg).into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}
